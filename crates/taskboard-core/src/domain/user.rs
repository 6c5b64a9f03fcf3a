use serde::{Deserialize, Serialize};

use super::UserId;

/// A person tasks can be assigned to. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Display attribute only.
    pub avatar_color: String,
}
