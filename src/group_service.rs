use crate::database::Database;
use crate::error::Result;
use crate::group::{Group, GroupDetail};
use crate::pagination::{PageRequest, PaginatedResponse};
use crate::study::StudySessionDetail;
use crate::word::WordWithStats;
use log::info;
use std::sync::Arc;

/// Service layer for thematic word groups and their membership
pub struct GroupService {
    db: Arc<Database>,
}

impl GroupService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn list_groups(&self, page: PageRequest) -> Result<PaginatedResponse<Group>> {
        let (groups, total) = self.db.list_groups_paginated(page)?;
        Ok(page.respond(groups, total))
    }

    /// Group with its member count, `None` when the id does not resolve
    pub fn get_group(&self, group_id: i64) -> Result<Option<GroupDetail>> {
        Ok(self.db.get_group_with_stats(group_id)?.map(GroupDetail::from))
    }

    pub fn get_group_words(
        &self,
        group_id: i64,
        page: PageRequest,
    ) -> Result<PaginatedResponse<WordWithStats>> {
        let (words, total) = self.db.list_group_words(group_id, page)?;
        Ok(page.respond(words, total))
    }

    /// Sessions that practiced the group, most recent first
    pub fn get_group_study_sessions(
        &self,
        group_id: i64,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudySessionDetail>> {
        let total = self.db.count_group_study_sessions(group_id)?;
        let sessions =
            self.db
                .list_group_study_sessions(group_id, page.offset(), page.limit())?;
        Ok(page.respond(sessions, total))
    }

    pub fn create_group(&self, name: &str) -> Result<Group> {
        let group = self.db.create_group(name)?;
        info!("Created group id={} ({})", group.id, name);
        Ok(group)
    }

    pub fn update_group(&self, group_id: i64, name: &str) -> Result<Option<Group>> {
        self.db.update_group(group_id, name)
    }

    /// Memberships and group go together or not at all
    pub fn delete_group(&self, group_id: i64) -> Result<()> {
        self.db.delete_group(group_id)?;
        info!("Deleted group id={}", group_id);
        Ok(())
    }

    pub fn add_words(&self, group_id: i64, word_ids: &[i64]) -> Result<()> {
        self.db.add_words_to_group(group_id, word_ids)
    }

    pub fn remove_word(&self, group_id: i64, word_id: i64) -> Result<()> {
        self.db.remove_word_from_group(group_id, word_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupStats;

    fn create_service() -> (Arc<Database>, GroupService) {
        let db = Arc::new(Database::new(":memory:").unwrap());
        (db.clone(), GroupService::new(db))
    }

    #[test]
    fn test_get_group_detail() {
        let (db, service) = create_service();
        let group = service.create_group("Animals").unwrap();
        let gato = db.create_word("gato", "cat").unwrap();
        let cao = db.create_word("cão", "dog").unwrap();
        service.add_words(group.id, &[gato.id, cao.id]).unwrap();

        let detail = service.get_group(group.id).unwrap().unwrap();
        assert_eq!(detail.name, "Animals");
        assert_eq!(
            detail.stats,
            GroupStats {
                total_word_count: 2
            }
        );
        assert!(service.get_group(999).unwrap().is_none());
    }

    #[test]
    fn test_list_groups_pagination() {
        let (_, service) = create_service();
        for i in 0..11 {
            service.create_group(&format!("Group {}", i)).unwrap();
        }

        let page = service.list_groups(PageRequest::new(2, 10)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Group 10");
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_group_words_are_scoped_to_members() {
        let (db, service) = create_service();
        let group = service.create_group("Animals").unwrap();
        let gato = db.create_word("gato", "cat").unwrap();
        db.create_word("pão", "bread").unwrap();
        let cao = db.create_word("cão", "dog").unwrap();
        service.add_words(group.id, &[cao.id, gato.id]).unwrap();

        let page = service.get_group_words(group.id, PageRequest::default()).unwrap();
        let ids: Vec<i64> = page.items.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![gato.id, cao.id]);
        assert_eq!(page.pagination.total_items, 2);
    }

    #[test]
    fn test_group_study_sessions() {
        let (db, service) = create_service();
        let group = service.create_group("Animals").unwrap();
        let activity = db.create_study_activity("Flashcards", "", "").unwrap();
        db.create_study_session(group.id, activity.id).unwrap();
        db.create_study_session(group.id, activity.id).unwrap();

        let page = service
            .get_group_study_sessions(group.id, PageRequest::new(1, 1))
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].group_name, "Animals");
        assert_eq!(page.pagination.total_items, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_update_remove_and_delete() {
        let (db, service) = create_service();
        let group = service.create_group("Animals").unwrap();
        let gato = db.create_word("gato", "cat").unwrap();
        service.add_words(group.id, &[gato.id]).unwrap();

        let renamed = service.update_group(group.id, "Pets").unwrap().unwrap();
        assert_eq!(renamed.name, "Pets");

        service.remove_word(group.id, gato.id).unwrap();
        service.remove_word(group.id, gato.id).unwrap();
        assert_eq!(db.count_group_words(group.id).unwrap(), 0);

        service.delete_group(group.id).unwrap();
        assert!(service.get_group(group.id).unwrap().is_none());
    }
}
