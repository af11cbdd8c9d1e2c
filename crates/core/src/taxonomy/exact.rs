//! Built-in exact mood table.
//!
//! Moods and tag lists from Table 2 of Hu, Downie & Ehmann,
//! "Lyric Text Mining in Music Mood Classification" (ISMIR 2009).

use super::types::{ExactCategory, ExactTaxonomy};

const EXACT_MOODS: &[(&str, &[&str])] = &[
    ("calm", &["calm", "comfort", "quiet", "serene", "mellow", "chill out"]),
    ("sad", &["sadness", "unhappy", "melancholic", "melancholy"]),
    ("happy", &["happy", "happiness", "happy songs", "happy music"]),
    ("romantic", &["romantic", "romantic music"]),
    ("upbeat", &["upbeat", "gleeful", "high spirits", "zest", "enthusiastic"]),
    ("depressed", &["depressed", "blue", "dark", "depressive", "dreary"]),
    ("anger", &["anger", "angry", "choleric", "fury", "outraged", "rage"]),
    ("grief", &["grief", "heartbreak", "mournful", "sorrow", "sorry"]),
    ("dreamy", &["dreamy"]),
    ("cheerful", &["cheerful", "cheer up", "festive", "jolly", "jovial", "merry"]),
    ("brooding", &["brooding", "contemplative", "meditative", "reflective"]),
    ("aggression", &["aggression", "aggressive"]),
    ("confident", &["confident", "encouraging", "encouragement", "optimism"]),
    ("angst", &["angst", "anxiety", "anxious", "jumpy", "nervous", "angsty"]),
    ("earnest", &["earnest", "heartfelt"]),
    ("desire", &["desire", "hope", "hopeful", "mood: hopeful"]),
    ("pessimism", &["pessimism", "cynical", "pessimistic", "weltschmerz"]),
    ("excitement", &["excitement", "exciting", "exhilarating", "thrill", "ardor"]),
];

/// The built-in exact taxonomy.
pub fn builtin_exact_taxonomy() -> ExactTaxonomy {
    ExactTaxonomy::new(
        EXACT_MOODS
            .iter()
            .map(|(mood, tags)| ExactCategory {
                mood: mood.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            })
            .collect(),
    )
}
