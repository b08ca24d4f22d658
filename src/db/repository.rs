//! Repository for queries and mutations over the in-memory store.
//!
//! Every mutation runs inside a single write guard, so capacity and membership
//! checks cannot interleave with another writer.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::Tables;
use crate::models::{
    AssignmentGroup, CreateGroupRequest, DashboardStats, Datastore, DocumentFile,
    NotificationMessage, RevisionInfo, Semester, Unit, User,
};

struct Store {
    tables: Tables,
    revision_id: i64,
    generated_at: DateTime<Utc>,
}

impl Store {
    fn bump_revision(&mut self) {
        self.revision_id += 1;
        self.generated_at = Utc::now();
    }
}

/// Repository for all data operations.
pub struct Repository {
    store: RwLock<Store>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Repository {
    pub fn new(tables: Tables) -> Self {
        Self {
            store: RwLock::new(Store {
                tables,
                revision_id: 0,
                generated_at: Utc::now(),
            }),
        }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> i64 {
        self.store.read().await.revision_id
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> RevisionInfo {
        let store = self.store.read().await;
        RevisionInfo {
            revision_id: store.revision_id,
            generated_at: store.generated_at,
        }
    }

    /// Get the full datastore.
    pub async fn get_datastore(&self) -> Datastore {
        let store = self.store.read().await;
        let tables = &store.tables;
        Datastore {
            revision_id: store.revision_id,
            generated_at: store.generated_at,
            semesters: tables.semesters.clone(),
            units: tables.units.clone(),
            documents: tables.documents.clone(),
            groups: tables.groups.clone(),
            notifications: sorted_by_newest(&tables.notifications),
        }
    }

    /// Headline counters for the dashboard.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let store = self.store.read().await;
        DashboardStats {
            total_documents: store.tables.documents.len(),
            active_groups: store.tables.groups.len(),
            unread_notifications: store.tables.notifications.iter().filter(|n| !n.read).count(),
        }
    }

    // ==================== SEMESTER & UNIT QUERIES ====================

    /// List all semesters in creation order.
    pub async fn get_semesters(&self) -> Vec<Semester> {
        self.store.read().await.tables.semesters.clone()
    }

    /// Get a semester by ID.
    pub async fn get_semester_by_id(&self, id: &str) -> Option<Semester> {
        let store = self.store.read().await;
        store.tables.semesters.iter().find(|s| s.id == id).cloned()
    }

    /// Units belonging to a semester, in insertion order.
    pub async fn get_units_by_semester(&self, semester_id: &str) -> Vec<Unit> {
        let store = self.store.read().await;
        store
            .tables
            .units
            .iter()
            .filter(|u| u.semester_id == semester_id)
            .cloned()
            .collect()
    }

    /// Get a unit by ID.
    pub async fn get_unit_by_id(&self, id: &str) -> Option<Unit> {
        let store = self.store.read().await;
        store.tables.units.iter().find(|u| u.id == id).cloned()
    }

    // ==================== DOCUMENT QUERIES ====================

    /// Documents filed under both the given semester and unit.
    pub async fn get_documents_by_unit(&self, semester_id: &str, unit_id: &str) -> Vec<DocumentFile> {
        let store = self.store.read().await;
        store
            .tables
            .documents
            .iter()
            .filter(|d| d.semester_id == semester_id && d.unit_id == unit_id)
            .cloned()
            .collect()
    }

    /// Get a document by ID.
    pub async fn get_document_by_id(&self, id: &str) -> Option<DocumentFile> {
        let store = self.store.read().await;
        store.tables.documents.iter().find(|d| d.id == id).cloned()
    }

    // ==================== GROUP OPERATIONS ====================

    /// List all groups in creation order.
    pub async fn get_groups(&self) -> Vec<AssignmentGroup> {
        self.store.read().await.tables.groups.clone()
    }

    /// Get a group by ID.
    pub async fn get_group_by_id(&self, id: &str) -> Option<AssignmentGroup> {
        let store = self.store.read().await;
        store.tables.groups.iter().find(|g| g.id == id).cloned()
    }

    /// Groups filed under both the given semester and unit, in creation order.
    pub async fn get_groups_by_unit(&self, semester_id: &str, unit_id: &str) -> Vec<AssignmentGroup> {
        let store = self.store.read().await;
        store
            .tables
            .groups
            .iter()
            .filter(|g| {
                g.semester_id.as_deref() == Some(semester_id) && g.unit_id.as_deref() == Some(unit_id)
            })
            .cloned()
            .collect()
    }

    /// Groups whose assignment name, or whose unit's name, contains `term`
    /// (case-insensitive). A blank term matches every group.
    pub async fn search_groups(&self, term: &str) -> Vec<AssignmentGroup> {
        let store = self.store.read().await;
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return store.tables.groups.clone();
        }

        let unit_name = |unit_id: &Option<String>| {
            unit_id
                .as_deref()
                .and_then(|id| store.tables.units.iter().find(|u| u.id == id))
                .map(|u| u.name.to_lowercase())
        };

        store
            .tables
            .groups
            .iter()
            .filter(|g| {
                g.assignment_name.to_lowercase().contains(&needle)
                    || unit_name(&g.unit_id).is_some_and(|name| name.contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Append a new, empty group created by `creator`.
    pub async fn add_group(&self, details: &CreateGroupRequest, creator: &User) -> AssignmentGroup {
        let group = AssignmentGroup {
            id: new_id(),
            assignment_name: details.assignment_name.clone(),
            max_size: details.max_size,
            members: Vec::new(),
            created_by: creator.to_ref(),
            unit_id: details.unit_id.clone(),
            semester_id: details.semester_id.clone(),
        };

        let mut store = self.store.write().await;
        store.tables.groups.push(group.clone());
        store.bump_revision();

        tracing::debug!(group_id = %group.id, "Group added");
        group
    }

    /// Add `user` to the group's members.
    ///
    /// Returns `false` without mutating when the group is unknown, full, or
    /// already lists the user.
    pub async fn join_group(&self, group_id: &str, user: &User) -> bool {
        let mut store = self.store.write().await;

        let Some(group) = store.tables.groups.iter_mut().find(|g| g.id == group_id) else {
            return false;
        };
        if group.is_full() || group.is_member(&user.id) {
            return false;
        }

        group.members.push(user.to_ref());
        store.bump_revision();
        true
    }

    // ==================== SEMESTER MUTATIONS ====================

    /// Append a new semester created by `creator`.
    pub async fn add_semester(&self, name: &str, is_public: bool, creator: &User) -> Semester {
        let semester = Semester {
            id: new_id(),
            name: name.to_string(),
            is_public,
            created_by: creator.to_ref(),
        };

        let mut store = self.store.write().await;
        store.tables.semesters.push(semester.clone());
        store.bump_revision();

        tracing::debug!(semester_id = %semester.id, "Semester added");
        semester
    }

    // ==================== NOTIFICATION OPERATIONS ====================

    /// All notifications, newest first. Equal timestamps keep store order.
    pub async fn get_notifications(&self) -> Vec<NotificationMessage> {
        sorted_by_newest(&self.store.read().await.tables.notifications)
    }

    /// Number of notifications not yet read.
    pub async fn unread_notification_count(&self) -> usize {
        let store = self.store.read().await;
        store.tables.notifications.iter().filter(|n| !n.read).count()
    }

    /// Prepend a new unread notification stamped with the current time.
    pub async fn add_notification(
        &self,
        title: &str,
        description: &str,
        link: Option<&str>,
    ) -> NotificationMessage {
        let notification = NotificationMessage {
            id: new_id(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: Utc::now(),
            read: false,
            link: link.map(str::to_string),
        };

        let mut store = self.store.write().await;
        store.tables.notifications.insert(0, notification.clone());
        store.bump_revision();
        notification
    }

    /// Mark a notification as read. Unknown ids and already-read notifications are a no-op.
    pub async fn mark_notification_as_read(&self, id: &str) {
        let mut store = self.store.write().await;
        let changed = match store.tables.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        };
        if changed {
            store.bump_revision();
        }
    }

    /// Mark every notification as read and return how many changed.
    pub async fn mark_all_notifications_as_read(&self) -> usize {
        let mut store = self.store.write().await;
        let mut changed = 0;
        for n in store.tables.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        if changed > 0 {
            store.bump_revision();
        }
        changed
    }
}

fn sorted_by_newest(notifications: &[NotificationMessage]) -> Vec<NotificationMessage> {
    let mut sorted = notifications.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::seed_tables;
    use crate::models::UserRef;

    fn seeded() -> Repository {
        Repository::new(seed_tables())
    }

    fn classmate(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("Classmate {}", id),
            ..User::demo_student()
        }
    }

    fn group_request(name: &str, max_size: usize) -> CreateGroupRequest {
        CreateGroupRequest {
            assignment_name: name.to_string(),
            max_size,
            unit_id: Some("unit101".to_string()),
            semester_id: Some("sem1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_semester_and_unit_lookups() {
        let repo = seeded();

        assert_eq!(repo.get_semesters().await.len(), 3);
        assert_eq!(repo.get_semester_by_id("sem2").await.unwrap().name, "Semester 2");
        assert!(repo.get_semester_by_id("nope").await.is_none());

        let units: Vec<_> = repo
            .get_units_by_semester("sem1")
            .await
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(units, vec!["unit101", "unit102"]);
        assert!(repo.get_units_by_semester("sem9").await.is_empty());

        assert_eq!(repo.get_unit_by_id("unit301").await.unwrap().name, "Algorithms");
        assert!(repo.get_unit_by_id("unit999").await.is_none());
    }

    #[tokio::test]
    async fn test_documents_filtered_by_both_keys() {
        let repo = seeded();

        let docs: Vec<_> = repo
            .get_documents_by_unit("sem1", "unit101")
            .await
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(docs, vec!["doc001", "doc002", "doc003", "doc006"]);

        // unit101 does not live in sem2
        assert!(repo.get_documents_by_unit("sem2", "unit101").await.is_empty());
        assert_eq!(repo.get_document_by_id("doc005").await.unwrap().unit_id, "unit201");
        assert!(repo.get_document_by_id("doc999").await.is_none());
    }

    #[tokio::test]
    async fn test_seed_group_join_example() {
        let repo = seeded();
        let newcomer = classmate("user_student_02");

        assert!(repo.join_group("group001", &newcomer).await);
        assert_eq!(repo.get_group_by_id("group001").await.unwrap().members.len(), 2);

        assert!(!repo.join_group("group001", &newcomer).await);
        assert_eq!(repo.get_group_by_id("group001").await.unwrap().members.len(), 2);
    }

    #[tokio::test]
    async fn test_join_never_exceeds_capacity() {
        let repo = seeded();

        // group003 holds two members
        let mut joined = 0;
        for i in 0..5 {
            if repo.join_group("group003", &classmate(&format!("s{}", i))).await {
                joined += 1;
            }
        }
        assert_eq!(joined, 2);

        let group = repo.get_group_by_id("group003").await.unwrap();
        assert_eq!(group.members.len(), group.max_size);

        let revision = repo.get_revision_id().await;
        assert!(!repo.join_group("group003", &classmate("late")).await);
        assert_eq!(repo.get_group_by_id("group003").await.unwrap().members, group.members);
        assert_eq!(repo.get_revision_id().await, revision);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_respect_capacity() {
        let repo = Arc::new(seeded());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.join_group("group003", &classmate(&format!("s{}", i))).await
                })
            })
            .collect();

        let mut joined = 0;
        for handle in handles {
            if handle.await.unwrap() {
                joined += 1;
            }
        }
        assert_eq!(joined, 2);

        let group = repo.get_group_by_id("group003").await.unwrap();
        assert_eq!(group.members.len(), group.max_size);
        assert_eq!(repo.get_revision_id().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_joins_admit_once() {
        let repo = Arc::new(seeded());

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.join_group("group001", &classmate("user_student_02")).await
                })
            })
            .collect();

        let mut joined = 0;
        for handle in handles {
            if handle.await.unwrap() {
                joined += 1;
            }
        }
        assert_eq!(joined, 1);

        let group = repo.get_group_by_id("group001").await.unwrap();
        assert_eq!(group.members.len(), 2);
        assert_eq!(
            group.members.iter().filter(|m| m.id == "user_student_02").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_groups_by_unit_match_both_keys() {
        let repo = seeded();

        let ids: Vec<_> = repo
            .get_groups_by_unit("sem1", "unit101")
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["group001"]);

        // unit201 lives in sem2
        assert!(repo.get_groups_by_unit("sem1", "unit201").await.is_empty());

        let rep = User::demo_class_representative();
        let added = repo.add_group(&group_request("Lab Report", 3), &rep).await;
        let ids: Vec<_> = repo
            .get_groups_by_unit("sem1", "unit101")
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["group001".to_string(), added.id]);
    }

    #[tokio::test]
    async fn test_join_unknown_group() {
        let repo = seeded();
        assert!(!repo.join_group("missing", &User::demo_student()).await);
    }

    #[tokio::test]
    async fn test_add_group_then_list() {
        let repo = seeded();
        let rep = User::demo_class_representative();

        let group = repo.add_group(&group_request("Lab Report", 3), &rep).await;
        assert!(group.members.is_empty());
        assert_eq!(
            group.created_by,
            UserRef {
                id: rep.id.clone(),
                name: rep.name.clone()
            }
        );

        let groups = repo.get_groups().await;
        assert_eq!(groups.iter().filter(|g| g.id == group.id).count(), 1);
        assert_eq!(groups.last().unwrap().id, group.id);

        // Names need not be unique
        let twin = repo.add_group(&group_request("Lab Report", 3), &rep).await;
        assert_ne!(twin.id, group.id);
    }

    #[tokio::test]
    async fn test_search_groups_by_name_and_unit() {
        let repo = seeded();

        let by_name: Vec<_> = repo
            .search_groups("calculus")
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(by_name, vec!["group002"]);

        let by_unit: Vec<_> = repo
            .search_groups("DATA STRUCT")
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(by_unit, vec!["group003"]);

        let by_unit_only: Vec<_> = repo
            .search_groups("introduction")
            .await
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(by_unit_only, vec!["group001"]);

        assert_eq!(repo.search_groups("  ").await.len(), 3);
        assert!(repo.search_groups("zzz").await.is_empty());
    }

    #[tokio::test]
    async fn test_add_semester() {
        let repo = seeded();
        let semester = repo
            .add_semester("Summer Term", false, &User::demo_class_representative())
            .await;

        assert!(!semester.is_public);
        assert_eq!(semester.created_by.id, "user_classrep_01");
        assert_eq!(repo.get_semesters().await.last().unwrap(), &semester);
        assert!(repo.get_units_by_semester(&semester.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_notifications_sorted_newest_first() {
        let repo = seeded();

        let ids: Vec<_> = repo
            .get_notifications()
            .await
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["notif003", "notif002", "notif001"]);

        let added = repo
            .add_notification("Hello", "A fresh notice", Some("/groups"))
            .await;
        let listed = repo.get_notifications().await;
        assert_eq!(listed[0], added);
        assert!(!listed[0].read);
        assert_eq!(listed.len(), 4);
    }

    #[tokio::test]
    async fn test_mark_notification_as_read_is_idempotent() {
        let repo = seeded();
        assert_eq!(repo.unread_notification_count().await, 2);

        repo.mark_notification_as_read("notif001").await;
        let after_first = repo.get_datastore().await;
        repo.mark_notification_as_read("notif001").await;
        let after_second = repo.get_datastore().await;

        assert_eq!(after_first.notifications, after_second.notifications);
        assert_eq!(after_first.revision_id, after_second.revision_id);
        assert_eq!(repo.unread_notification_count().await, 1);

        // Unknown id is a no-op
        repo.mark_notification_as_read("missing").await;
        assert_eq!(repo.get_revision_id().await, after_second.revision_id);
    }

    #[tokio::test]
    async fn test_mark_all_notifications_as_read() {
        let repo = seeded();
        assert_eq!(repo.mark_all_notifications_as_read().await, 2);
        assert_eq!(repo.unread_notification_count().await, 0);
        assert_eq!(repo.mark_all_notifications_as_read().await, 0);
    }

    #[tokio::test]
    async fn test_revision_and_dashboard() {
        let repo = seeded();
        assert_eq!(repo.get_revision_id().await, 0);

        repo.add_notification("t", "d", None).await;
        repo.join_group("group002", &User::demo_student()).await;
        assert_eq!(repo.get_revision_info().await.revision_id, 2);

        let stats = repo.dashboard_stats().await;
        assert_eq!(stats.total_documents, 6);
        assert_eq!(stats.active_groups, 3);
        assert_eq!(stats.unread_notifications, 3);
    }
}
