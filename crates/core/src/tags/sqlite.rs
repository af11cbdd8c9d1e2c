//! SQLite-backed tag store (Last.fm tag database).

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::{sanitize, Tag, TagSource, TagStoreError};

/// Tables the tag query joins.
const REQUIRED_TABLES: [&str; 3] = ["tids", "tags", "tid_tag"];

/// Read-only SQLite tag store.
pub struct SqliteTagStore {
    conn: Connection,
}

impl SqliteTagStore {
    /// Open an existing tag database read-only.
    ///
    /// Fails when the file does not exist or does not have the expected tables,
    /// so an unusable store is reported before any lookup is attempted.
    pub fn open(path: &Path) -> Result<Self, TagStoreError> {
        if !path.is_file() {
            return Err(TagStoreError::NotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| TagStoreError::Database(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Wrap an already open connection (useful for testing).
    pub fn from_connection(conn: Connection) -> Result<Self, TagStoreError> {
        Self::verify_schema(&conn)?;
        Ok(Self { conn })
    }

    fn verify_schema(conn: &Connection) -> Result<(), TagStoreError> {
        for table in REQUIRED_TABLES {
            let found: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                    [table],
                    |row| row.get(0),
                )
                .map_err(|e| TagStoreError::Database(e.to_string()))?;
            if found == 0 {
                return Err(TagStoreError::MissingTable(table.to_string()));
            }
        }
        Ok(())
    }

    fn tags_query(track_id: &str) -> String {
        format!(
            "SELECT tids.tid, tags.tag, tid_tag.val FROM tid_tag, tids, tags \
             WHERE tids.ROWID = tid_tag.tid AND tid_tag.tag = tags.ROWID AND tids.tid = '{}'",
            sanitize(track_id)
        )
    }
}

impl TagSource for SqliteTagStore {
    fn fetch_tags(&self, track_id: &str) -> Result<Vec<Tag>, TagStoreError> {
        let mut stmt = self
            .conn
            .prepare(&Self::tags_query(track_id))
            .map_err(|e| TagStoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Tag {
                    track_id: row.get(0)?,
                    text: row.get(1)?,
                    weight: row.get(2)?,
                })
            })
            .map_err(|e| TagStoreError::Database(e.to_string()))?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row.map_err(|e| TagStoreError::Database(e.to_string()))?);
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn create_test_store() -> SqliteTagStore {
        let conn = Connection::open_in_memory().unwrap();
        fixtures::create_tag_schema(&conn).unwrap();
        fixtures::insert_track_tags(
            &conn,
            "TRAAAAW128F429D538",
            &[("sadness", 100.0), ("happy", 50.0), ("rock", 10.0)],
        )
        .unwrap();
        fixtures::insert_track_tags(&conn, "TRAAABD128F429CF47", &[("happy", 80.0)]).unwrap();
        fixtures::insert_track_tags(&conn, "TR'QUOTE", &[("calm", 5.0)]).unwrap();
        SqliteTagStore::from_connection(conn).unwrap()
    }

    #[test]
    fn test_fetch_tags_in_store_order() {
        let store = create_test_store();
        let tags = store.fetch_tags("TRAAAAW128F429D538").unwrap();

        let texts: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["sadness", "happy", "rock"]);
        assert_eq!(tags[0].track_id, "TRAAAAW128F429D538");
        assert_eq!(tags[0].weight, 100.0);
    }

    #[test]
    fn test_fetch_tags_shared_tag_text() {
        let store = create_test_store();
        let tags = store.fetch_tags("TRAAABD128F429CF47").unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].text, "happy");
        assert_eq!(tags[0].weight, 80.0);
    }

    #[test]
    fn test_fetch_tags_unknown_track_is_empty() {
        let store = create_test_store();
        let tags = store.fetch_tags("TRNOTINTHESTORE").unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_fetch_tags_with_quote_in_id() {
        let store = create_test_store();
        let tags = store.fetch_tags("TR'QUOTE").unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].text, "calm");
    }

    #[test]
    fn test_from_connection_missing_table_fails() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE tids (tid TEXT); CREATE TABLE tags (tag TEXT);")
            .unwrap();
        let result = SqliteTagStore::from_connection(conn);
        assert!(matches!(result, Err(TagStoreError::MissingTable(t)) if t == "tid_tag"));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = SqliteTagStore::open(Path::new("/nonexistent/lastfm_tags.db"));
        assert!(matches!(result, Err(TagStoreError::NotFound(_))));
    }

    #[test]
    fn test_open_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("tags.db");
        fixtures::create_tag_db(&db_path, &[("TRA", vec![("mellow", 1.0)])]).unwrap();

        let store = SqliteTagStore::open(&db_path).unwrap();
        let tags = store.fetch_tags("TRA").unwrap();
        assert_eq!(tags[0].text, "mellow");
    }

    #[test]
    fn test_query_failure_propagates() {
        let conn = Connection::open_in_memory().unwrap();
        // Right table names, wrong columns: the join cannot be prepared.
        conn.execute_batch(
            "CREATE TABLE tids (x TEXT); CREATE TABLE tags (y TEXT); CREATE TABLE tid_tag (z TEXT);",
        )
        .unwrap();
        let store = SqliteTagStore::from_connection(conn).unwrap();
        let result = store.fetch_tags("TRA");
        assert!(matches!(result, Err(TagStoreError::Database(_))));
    }
}
