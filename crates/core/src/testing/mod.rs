//! Testing utilities and mock implementations.
//!
//! The tag store is the only external resource a labeling run touches, so a
//! mock [`TagSource`](crate::tags::TagSource) plus a few fixtures are enough to
//! drive the labeler end to end without a real Last.fm database.
//!
//! # Example
//!
//! ```rust,ignore
//! use moodlabel_core::testing::{fixtures, MockTagSource};
//!
//! let source = MockTagSource::new();
//! source.set_tags("TRAAAAW128F429D538", &["sadness", "happy"]);
//! source.fail_on("TRBROKEN");
//!
//! let csv = fixtures::track_csv(&[fixtures::track("TRAAAAW128F429D538", "Abba", true, true)]);
//! ```

mod mock_tag_source;

pub use mock_tag_source::MockTagSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    use rusqlite::{params, Connection, OptionalExtension};

    /// Create the three Last.fm tag tables and their lookup indexes.
    pub fn create_tag_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE tids (tid TEXT);
            CREATE TABLE tags (tag TEXT);
            CREATE TABLE tid_tag (tid INTEGER, tag INTEGER, val FLOAT);
            CREATE INDEX idx_tids_tid ON tids(tid);
            CREATE INDEX idx_tid_tag_tid ON tid_tag(tid);
            "#,
        )
    }

    /// Attach `tags` (text, weight) to a track, in order.
    ///
    /// Tag texts already in the `tags` table are reused.
    pub fn insert_track_tags(
        conn: &Connection,
        track_id: &str,
        tags: &[(&str, f64)],
    ) -> rusqlite::Result<()> {
        conn.execute("INSERT INTO tids (tid) VALUES (?1)", [track_id])?;
        let tid = conn.last_insert_rowid();

        for (text, weight) in tags {
            let existing: Option<i64> = conn
                .query_row("SELECT ROWID FROM tags WHERE tag = ?1", [text], |row| {
                    row.get(0)
                })
                .optional()?;
            let tag = match existing {
                Some(rowid) => rowid,
                None => {
                    conn.execute("INSERT INTO tags (tag) VALUES (?1)", [text])?;
                    conn.last_insert_rowid()
                }
            };
            conn.execute(
                "INSERT INTO tid_tag (tid, tag, val) VALUES (?1, ?2, ?3)",
                params![tid, tag, weight],
            )?;
        }
        Ok(())
    }

    /// Create a tag database file populated with the given tracks.
    pub fn create_tag_db(path: &Path, tracks: &[(&str, Vec<(&str, f64)>)]) -> rusqlite::Result<()> {
        let conn = Connection::open(path)?;
        create_tag_schema(&conn)?;
        for (track_id, tags) in tracks {
            insert_track_tags(&conn, track_id, tags)?;
        }
        Ok(())
    }

    /// One row of a test track dataset.
    #[derive(Debug, Clone)]
    pub struct TrackSpec {
        pub track_id: String,
        pub artist: String,
        pub title: String,
        pub is_english: bool,
        pub lyrics_available: bool,
    }

    /// Create a track row with a generated title and lyrics file.
    pub fn track(track_id: &str, artist: &str, is_english: bool, lyrics_available: bool) -> TrackSpec {
        TrackSpec {
            track_id: track_id.to_string(),
            artist: artist.to_string(),
            title: format!("Song {}", track_id),
            is_english,
            lyrics_available,
        }
    }

    /// Render tracks as CSV with the default column names.
    pub fn track_csv(tracks: &[TrackSpec]) -> String {
        let mut csv =
            String::from("msd_id,msd_artist,msd_title,lyrics_filename,is_english,lyrics_available\n");
        for t in tracks {
            csv.push_str(&format!(
                "{},{},{},lyrics/{}.txt,{},{}\n",
                t.track_id,
                t.artist,
                t.title,
                t.track_id,
                u8::from(t.is_english),
                u8::from(t.lyrics_available)
            ));
        }
        csv
    }
}
