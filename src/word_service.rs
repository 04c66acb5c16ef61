use crate::database::Database;
use crate::error::Result;
use crate::pagination::{PageRequest, PaginatedResponse};
use crate::word::{Word, WordDetail, WordWithStats};
use log::info;
use std::sync::Arc;

/// Service layer for the word catalog
pub struct WordService {
    db: Arc<Database>,
}

impl WordService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// One page of words in id order, each with its correct/wrong review counts
    pub fn list_words(&self, page: PageRequest) -> Result<PaginatedResponse<WordWithStats>> {
        let (words, total) = self.db.list_words_with_stats(page)?;
        Ok(page.respond(words, total))
    }

    /// Word with stats and groups, `None` when the id does not resolve
    pub fn get_word_detail(&self, word_id: i64) -> Result<Option<WordDetail>> {
        let Some(word) = self.db.get_word_with_stats(word_id)? else {
            return Ok(None);
        };
        let groups = self.db.get_word_groups(word_id)?;
        Ok(Some(WordDetail::from_parts(word, groups)))
    }

    pub fn create_word(&self, portuguese: &str, english: &str) -> Result<Word> {
        let word = self.db.create_word(portuguese, english)?;
        info!("Created word id={} ({} / {})", word.id, portuguese, english);
        Ok(word)
    }

    /// Replaces both text fields
    pub fn update_word(&self, word_id: i64, portuguese: &str, english: &str) -> Result<Option<Word>> {
        self.db.update_word(word_id, portuguese, english)
    }

    /// Unconditional; review items of the word are left in place
    pub fn delete_word(&self, word_id: i64) -> Result<()> {
        self.db.delete_word(word_id)?;
        info!("Deleted word id={}", word_id);
        Ok(())
    }
}
