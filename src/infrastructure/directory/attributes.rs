//! Attribute normalization
//!
//! Custom user attributes (country, phone, photo) arrive in two shapes: a
//! JSON object built by `json_object_agg` on the replica path, and a
//! name -> list-of-values map on the administrative-API path. Both are
//! flattened into the same three scalars here. The aggregate is decoded by
//! key, never by position, so an absent attribute can never shift another
//! attribute into the wrong field.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::DirectoryError;

/// Attribute key for the user's country.
pub const ATTR_COUNTRY: &str = "country";
/// Attribute key for the user's mobile phone.
pub const ATTR_PHONE: &str = "phone";
/// Attribute key for the user's photo reference.
pub const ATTR_PHOTO: &str = "photo";

/// The three canonical attribute scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAttributes {
    pub country: String,
    pub phone: String,
    pub photo: String,
}

impl UserAttributes {
    /// Decode the key-tagged JSON aggregate produced by the replica query.
    ///
    /// A SQL NULL aggregate (user without attribute rows) yields empty
    /// strings. The aggregate must be a JSON object and is read strictly by
    /// key; an array in particular is rejected rather than decoded
    /// positionally. Anything that is not an object of string (or null)
    /// values is a data error, reported as [`DirectoryError::Decode`] and
    /// never silently defaulted.
    pub fn from_aggregate(value: Option<Value>) -> Result<Self, DirectoryError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(DirectoryError::decode(format!(
                    "attribute aggregate is not an object: {other}"
                )));
            }
        };

        let scalar = |key: &str| match map.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(other) => Err(DirectoryError::decode(format!(
                "attribute '{key}' is not a string: {other}"
            ))),
        };

        Ok(Self {
            country: scalar(ATTR_COUNTRY)?,
            phone: scalar(ATTR_PHONE)?,
            photo: scalar(ATTR_PHOTO)?,
        })
    }

    /// Flatten the administrative API's multi-valued attribute map.
    ///
    /// Present keys have their value list joined with commas; absent keys and
    /// present-but-empty lists both yield empty strings.
    pub fn from_map(attributes: Option<&HashMap<String, Vec<String>>>) -> Self {
        let Some(map) = attributes else {
            return Self::default();
        };

        let join = |key: &str| map.get(key).map(|values| values.join(",")).unwrap_or_default();

        Self {
            country: join(ATTR_COUNTRY),
            phone: join(ATTR_PHONE),
            photo: join(ATTR_PHOTO),
        }
    }
}
