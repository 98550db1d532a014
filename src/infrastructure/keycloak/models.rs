//! Administrative-API wire models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DirectoryUser, NewUser, UserUpdate};
use crate::infrastructure::directory::{ATTR_COUNTRY, ATTR_PHONE, ATTR_PHOTO, UserAttributes};

/// Token returned by the admin login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A user record as the administrative API represents it: pointer-style
/// optional scalars plus a name -> list-of-values attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, Vec<String>>>,
}

impl AdminUser {
    /// Build the provider representation of a create request.
    ///
    /// All three attribute keys are written, each as a single-element list,
    /// replacing whatever the provider held before.
    pub fn from_new(user: &NewUser) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert(ATTR_PHONE.to_string(), vec![user.mobile_phone.clone()]);
        attributes.insert(ATTR_COUNTRY.to_string(), vec![user.country.clone()]);
        attributes.insert(ATTR_PHOTO.to_string(), vec![user.photo.clone()]);

        Self {
            id: None,
            username: Some(user.username.clone()),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            enabled: Some(user.enabled),
            attributes: Some(attributes),
        }
    }

    /// Build the provider representation of a partial update.
    ///
    /// Unset fields are omitted from the payload so the provider leaves them
    /// untouched. Each set attribute field replaces the full value list for
    /// its key; when no attribute field is set the map is omitted entirely.
    pub fn from_update(id: &str, update: &UserUpdate) -> Self {
        let mut attributes = HashMap::new();
        if let Some(phone) = &update.mobile_phone {
            attributes.insert(ATTR_PHONE.to_string(), vec![phone.clone()]);
        }
        if let Some(country) = &update.country {
            attributes.insert(ATTR_COUNTRY.to_string(), vec![country.clone()]);
        }
        if let Some(photo) = &update.photo {
            attributes.insert(ATTR_PHOTO.to_string(), vec![photo.clone()]);
        }

        Self {
            id: Some(id.to_string()),
            username: update.username.clone(),
            first_name: update.first_name.clone(),
            last_name: update.last_name.clone(),
            email: update.email.clone(),
            enabled: update.enabled,
            attributes: (!attributes.is_empty()).then_some(attributes),
        }
    }

    /// Flatten into the canonical record shape.
    pub fn into_directory_user(self) -> DirectoryUser {
        let attrs = UserAttributes::from_map(self.attributes.as_ref());

        DirectoryUser {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            enabled: self.enabled.unwrap_or_default(),
            mobile_phone: attrs.phone,
            country: attrs.country,
            photo: attrs.photo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_user() -> NewUser {
        serde_json::from_value(serde_json::json!({
            "username": "jdoe",
            "email": "jdoe@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "mobile_phone": "555-1234",
            "country": "US",
            "photo": "https://cdn.example.com/jdoe.png"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_new_writes_all_attribute_keys() {
        let admin = AdminUser::from_new(&sample_new_user());

        let attrs = admin.attributes.unwrap();
        assert_eq!(attrs[ATTR_PHONE], vec!["555-1234".to_string()]);
        assert_eq!(attrs[ATTR_COUNTRY], vec!["US".to_string()]);
        assert_eq!(
            attrs[ATTR_PHOTO],
            vec!["https://cdn.example.com/jdoe.png".to_string()]
        );
        assert_eq!(admin.enabled, Some(true));
        assert_eq!(admin.username.as_deref(), Some("jdoe"));
    }

    #[test]
    fn test_from_update_omits_unset_fields() {
        let update = UserUpdate {
            country: Some("CA".to_string()),
            ..Default::default()
        };

        let admin = AdminUser::from_update("user-1", &update);

        assert_eq!(admin.id.as_deref(), Some("user-1"));
        assert!(admin.username.is_none());
        assert!(admin.enabled.is_none());

        let attrs = admin.attributes.unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[ATTR_COUNTRY], vec!["CA".to_string()]);
    }

    #[test]
    fn test_from_update_without_attributes_omits_the_map() {
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };

        let admin = AdminUser::from_update("user-1", &update);
        assert!(admin.attributes.is_none());

        // And the wire payload must not carry an attributes key at all.
        let payload = serde_json::to_value(&admin).unwrap();
        assert!(payload.get("attributes").is_none());
    }

    #[test]
    fn test_into_directory_user_flattens_attribute_map() {
        let mut attributes = HashMap::new();
        attributes.insert(ATTR_COUNTRY.to_string(), vec!["US".to_string()]);
        attributes.insert(ATTR_PHONE.to_string(), vec!["555-1234".to_string()]);

        let user = AdminUser {
            id: Some("user-1".to_string()),
            username: Some("jdoe".to_string()),
            enabled: Some(true),
            attributes: Some(attributes),
            ..Default::default()
        }
        .into_directory_user();

        assert_eq!(user.id, "user-1");
        assert_eq!(user.country, "US");
        assert_eq!(user.mobile_phone, "555-1234");
        assert_eq!(user.photo, "");
        // Absent scalars default to empty strings, never null.
        assert_eq!(user.first_name, "");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let admin = AdminUser::from_new(&sample_new_user());
        let payload = serde_json::to_value(&admin).unwrap();

        assert!(payload.get("firstName").is_some());
        assert!(payload.get("lastName").is_some());
        assert!(payload.get("first_name").is_none());
    }
}
