//! User model and the two fixed demo identities.

use serde::{Deserialize, Serialize};

/// Role of a portal user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    ClassRepresentative,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::ClassRepresentative => "class_representative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "class_representative" => Some(UserRole::ClassRepresentative),
            _ => None,
        }
    }
}

/// A portal user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

const DEMO_AVATAR: &str = "https://placehold.co/100x100.png";

impl User {
    /// The demo student identity.
    pub fn demo_student() -> Self {
        Self {
            id: "user_student_01".to_string(),
            name: "Alex Student".to_string(),
            email: "alex.student@example.com".to_string(),
            role: UserRole::Student,
            avatar_url: Some(DEMO_AVATAR.to_string()),
        }
    }

    /// The demo class representative identity.
    pub fn demo_class_representative() -> Self {
        Self {
            id: "user_classrep_01".to_string(),
            name: "Casey ClassRep".to_string(),
            email: "casey.rep@example.com".to_string(),
            role: UserRole::ClassRepresentative,
            avatar_url: Some(DEMO_AVATAR.to_string()),
        }
    }

    /// The demo identity that holds `role`.
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Student => Self::demo_student(),
            UserRole::ClassRepresentative => Self::demo_class_representative(),
        }
    }

    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// The `(id, name)` projection of a user stored on groups and semesters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

/// Request body for switching the active demo role.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}
