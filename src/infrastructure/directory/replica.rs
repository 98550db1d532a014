//! Relational-replica queries
//!
//! Lists users from a denormalized replica of the identity provider's
//! tables: one row per user joined across the role-mapping table, with the
//! relevant attribute rows aggregated into a key-tagged JSON object by the
//! query itself.

use sqlx::PgPool;
use sqlx::types::Json;

use super::attributes::UserAttributes;
use super::query::{SqlParam, compile_filter, paginate, rebind};
use crate::domain::{DirectoryError, DirectoryUser, UserFilter};

// The attribute-name restriction lives in the join condition so users
// without attribute rows still come back (with a NULL aggregate).
const LIST_BASE: &str = "SELECT ue.id, ue.first_name, ue.last_name, ue.email, ue.username, ue.enabled, \
     json_object_agg(ua.name, ua.value) FILTER (WHERE ua.name IS NOT NULL) AS attributes \
     FROM keycloak_role kr \
     JOIN user_role_mapping rm ON kr.id = rm.role_id \
     JOIN user_entity ue ON rm.user_id = ue.id \
     LEFT JOIN user_attribute ua ON ue.id = ua.user_id \
     AND ua.name IN ('country', 'phone', 'photo')";

/// One row scanned from the replica, before normalization.
///
/// Constructed per query execution and discarded after mapping.
#[derive(Debug, sqlx::FromRow)]
pub struct ReplicaRow {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub enabled: bool,
    pub attributes: Option<Json<serde_json::Value>>,
}

impl ReplicaRow {
    /// Flatten the row into the canonical record shape.
    pub fn into_user(self) -> Result<DirectoryUser, DirectoryError> {
        let attrs = UserAttributes::from_aggregate(self.attributes.map(|json| json.0))?;

        Ok(DirectoryUser {
            id: self.id,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            enabled: self.enabled,
            mobile_phone: attrs.phone,
            country: attrs.country,
            photo: attrs.photo,
        })
    }
}

/// Map scanned rows into canonical records, preserving row order exactly.
pub fn map_rows(rows: Vec<ReplicaRow>) -> Result<Vec<DirectoryUser>, DirectoryError> {
    rows.into_iter().map(ReplicaRow::into_user).collect()
}

/// Read-only access to the relational replica.
#[derive(Debug, Clone)]
pub struct PostgresReplica {
    pool: PgPool,
}

impl PostgresReplica {
    /// Create a new replica reader over the shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List users matching the filter, paginated.
    ///
    /// Mutates the filter's page/size in place so callers see the effective
    /// pagination values. Rows come back in source order; no re-sorting.
    pub async fn list(
        &self,
        filter: &mut UserFilter,
    ) -> Result<Vec<DirectoryUser>, DirectoryError> {
        let (sql, params) = compile_filter(LIST_BASE, filter);
        let sql = paginate(format!("{sql} GROUP BY ue.id"), filter);
        let sql = rebind(&sql);

        let mut query = sqlx::query_as::<_, ReplicaRow>(&sql);
        for param in params {
            query = match param {
                SqlParam::Text(value) => query.bind(value),
                SqlParam::Bool(value) => query.bind(value),
            };
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DirectoryError::connection(format!("user list query failed: {e}")))?;

        map_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, attributes: Option<serde_json::Value>) -> ReplicaRow {
        ReplicaRow {
            id: id.to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            username: Some("jdoe".to_string()),
            enabled: true,
            attributes: attributes.map(Json),
        }
    }

    #[test]
    fn test_map_rows_preserves_source_order() {
        let rows = vec![row("3", None), row("1", None), row("2", None)];

        let users = map_rows(rows).unwrap();

        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_row_with_aggregate_flattens_attributes() {
        let user = row("1", Some(json!({"country": "US", "phone": "555-1234"})))
            .into_user()
            .unwrap();

        assert_eq!(user.country, "US");
        assert_eq!(user.mobile_phone, "555-1234");
        assert_eq!(user.photo, "");
    }

    #[test]
    fn test_row_without_attributes_yields_empty_scalars() {
        let user = row("1", None).into_user().unwrap();

        assert_eq!(user.country, "");
        assert_eq!(user.mobile_phone, "");
        assert_eq!(user.photo, "");
        assert_eq!(user.username, "jdoe");
    }

    #[test]
    fn test_null_columns_become_empty_strings() {
        let user = ReplicaRow {
            id: "1".to_string(),
            first_name: None,
            last_name: None,
            email: None,
            username: None,
            enabled: false,
            attributes: None,
        }
        .into_user()
        .unwrap();

        assert_eq!(user.first_name, "");
        assert_eq!(user.email, "");
        assert!(!user.enabled);
    }

    #[test]
    fn test_malformed_aggregate_fails_the_mapping() {
        let rows = vec![row("1", Some(json!("country,phone")))];

        let err = map_rows(rows).unwrap_err();
        assert!(matches!(err, DirectoryError::Decode { .. }));
    }
}
