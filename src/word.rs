use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    pub id: i64,
    pub portuguese: String,
    pub english: String,
    pub created_at: DateTime<Utc>,
}

/// A word together with review counts derived from its review items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWithStats {
    pub id: i64,
    pub portuguese: String,
    pub english: String,
    pub created_at: DateTime<Utc>,
    pub correct_count: i64,
    pub wrong_count: i64,
}

impl WordWithStats {
    pub fn stats(&self) -> WordStats {
        WordStats {
            correct_count: self.correct_count,
            wrong_count: self.wrong_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WordStats {
    pub correct_count: i64,
    pub wrong_count: i64,
}

/// Group reference embedded in a word detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordDetail {
    pub id: i64,
    pub portuguese: String,
    pub english: String,
    pub stats: WordStats,
    pub groups: Vec<WordGroup>,
}

impl WordDetail {
    pub fn from_parts(word: WordWithStats, groups: Vec<WordGroup>) -> Self {
        WordDetail {
            stats: word.stats(),
            id: word.id,
            portuguese: word.portuguese,
            english: word.english,
            groups,
        }
    }
}
