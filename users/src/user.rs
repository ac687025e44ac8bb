//! The user entity and its wire format

use serde::{Deserialize, Serialize};

/// A directory user
///
/// Equality is identity-based: two values with the same `id` are equal
/// regardless of their other fields. Presentation-layer diffing relies on
/// this, so it must not be widened to structural equality.
///
/// Wire format is JSON with `snake_case` field names.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identity
    pub id: u64,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Avatar image address, when the user has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Payload for creating or replacing a user
///
/// The server assigns the identity, so the draft carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Avatar image address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
