//! Canonical user record and write-side inputs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Canonical, source-independent user record.
///
/// This is the shape the directory guarantees regardless of whether a user
/// came from the relational replica or the administrative API. Every string
/// field defaults to an empty string (never null) when the backing source has
/// no value; `enabled` carries the source's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub enabled: bool,
    pub mobile_phone: String,
    pub country: String,
    pub photo: String,
}

/// Input for creating a directory user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub mobile_phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub photo: String,
}

fn default_enabled() -> bool {
    true
}

/// Partial update for an existing directory user.
///
/// Unset fields are left untouched. A set attribute field (mobile_phone,
/// country, photo) replaces the full value list for that attribute key on the
/// provider side; there are no partial-append semantics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub enabled: Option<bool>,
    pub mobile_phone: Option<String>,
    pub country: Option<String>,
    pub photo: Option<String>,
}
