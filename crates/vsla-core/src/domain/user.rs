use crate::domain::ids::UserId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A member record as entered by group administrators. Phone columns keep
/// whatever formatting the data-entry clerk typed; matching happens at
/// query time against the variants of the value being searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub alt_phone_number: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }

        Ok(())
    }
}
