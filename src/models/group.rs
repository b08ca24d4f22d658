//! Assignment group model.

use serde::{Deserialize, Serialize};

use super::UserRef;

/// A bounded-capacity roster of members working on a named assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentGroup {
    pub id: String,
    pub assignment_name: String,
    pub max_size: usize,
    pub members: Vec<UserRef>,
    pub created_by: UserRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<String>,
}

impl AssignmentGroup {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_size
    }
}

/// Request body for creating a new group. Id, members and creator are assigned by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub assignment_name: String,
    pub max_size: usize,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub semester_id: Option<String>,
}

/// Groups split into the ones a user belongs to and the ones they could still join.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOverview {
    pub mine: Vec<AssignmentGroup>,
    pub available: Vec<AssignmentGroup>,
}

impl GroupOverview {
    /// Members and creators see a group under `mine`; everyone else sees it under
    /// `available` unless it is full.
    pub fn partition(groups: Vec<AssignmentGroup>, user_id: &str) -> Self {
        let mut overview = Self::default();
        for group in groups {
            if group.is_member(user_id) || group.created_by.id == user_id {
                overview.mine.push(group);
            } else if !group.is_full() {
                overview.available.push(group);
            }
        }
        overview
    }
}
