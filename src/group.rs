use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupWithStats {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub word_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub total_word_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDetail {
    pub id: i64,
    pub name: String,
    pub stats: GroupStats,
}

impl From<GroupWithStats> for GroupDetail {
    fn from(group: GroupWithStats) -> Self {
        GroupDetail {
            id: group.id,
            name: group.name,
            stats: GroupStats {
                total_word_count: group.word_count,
            },
        }
    }
}
