use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde::deserialize_null_default;

/// Identifier of a user record.
pub type UserId = u64;

/// A user record as returned by the user service.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct User {
    /// The user's unique identifier.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// URL of the user's avatar image.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub avatar: String,
    /// Any other fields the server sent along. They survive merges untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// The user's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Merges the fields returned by an update into this record. Fields the
    /// patch doesn't carry are left alone and the identifier is never
    /// overwritten.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        self.extra.extend(patch.extra);
    }
}

/// One page of users.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct UserPage {
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    pub total_pages: u32,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub data: Vec<User>,
}

/// The fields sent when updating a user.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserUpdate {
    pub fn new<F, L, E>(first_name: F, last_name: L, email: E) -> Self
    where
        F: Into<String>,
        L: Into<String>,
        E: Into<String>,
    {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// The representation returned by an update. The service may echo any
/// subset of the user's fields and usually adds its own (e.g. `updatedAt`).
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sets the options for listing users.
#[derive(Serialize, Default, Debug)]
pub struct ListOptions {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
