//! Administrative-API client
//!
//! A thin reqwest client for the identity provider's admin REST API. Every
//! operation requires a bearer token obtained through [`AdminApi::login_admin`];
//! tokens are acquired per call and never cached here. The trait exists so the
//! client can be injected and mocked instead of being constructed inside each
//! operation.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use reqwest::StatusCode;
use reqwest::header::LOCATION;

use super::models::{AdminToken, AdminUser};
use crate::config::KeycloakConfig;
use crate::domain::DirectoryError;

/// Operations the directory needs from the administrative API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminApi: Send + Sync + std::fmt::Debug {
    /// Obtain an admin bearer token via the password grant.
    async fn login_admin(&self) -> Result<AdminToken, DirectoryError>;

    /// Create a user, returning the provider-assigned id.
    async fn create_user(&self, token: &str, user: AdminUser) -> Result<String, DirectoryError>;

    /// Update a user; `user.id` selects the record.
    async fn update_user(&self, token: &str, user: AdminUser) -> Result<(), DirectoryError>;

    /// Delete a user by id.
    async fn delete_user(&self, token: &str, id: &str) -> Result<(), DirectoryError>;

    /// Fetch a single user by id.
    async fn get_user_by_id(&self, token: &str, id: &str) -> Result<AdminUser, DirectoryError>;

    /// List users with the provider's own paging (`first` offset, `max` size).
    async fn get_users(
        &self,
        token: &str,
        first: u32,
        max: u32,
    ) -> Result<Vec<AdminUser>, DirectoryError>;
}

/// Real client over the Keycloak admin REST API.
#[derive(Debug, Clone)]
pub struct KeycloakAdminClient {
    http: reqwest::Client,
    config: KeycloakConfig,
    base_url: String,
}

impl KeycloakAdminClient {
    pub fn new(config: KeycloakConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                DirectoryError::configuration(format!("failed to build admin HTTP client: {e}"))
            })?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.config.realm
        )
    }

    fn users_url(&self) -> String {
        format!("{}/admin/realms/{}/users", self.base_url, self.config.realm)
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/{}", self.users_url(), id)
    }

    fn transport_error(context: &str, error: reqwest::Error) -> DirectoryError {
        DirectoryError::connection(format!("{context}: {error}"))
    }

    async fn response_error(context: &str, response: reqwest::Response) -> DirectoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                DirectoryError::authentication(format!("{context}: HTTP {status}: {body}"))
            }
            StatusCode::NOT_FOUND => DirectoryError::not_found(format!("{context}: no such user")),
            _ => DirectoryError::provider(format!("{context}: HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl AdminApi for KeycloakAdminClient {
    async fn login_admin(&self) -> Result<AdminToken, DirectoryError> {
        let response = self
            .http
            .post(self.token_url())
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.config.admin_client_id.as_str()),
                ("username", self.config.admin_username.as_str()),
                ("password", self.config.admin_password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Self::transport_error("admin login", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::authentication(format!(
                "admin login failed: HTTP {status}: {body}"
            )));
        }

        response
            .json::<AdminToken>()
            .await
            .map_err(|e| DirectoryError::decode(format!("malformed token response: {e}")))
    }

    async fn create_user(&self, token: &str, user: AdminUser) -> Result<String, DirectoryError> {
        let response = self
            .http
            .post(self.users_url())
            .bearer_auth(token)
            .json(&user)
            .send()
            .await
            .map_err(|e| Self::transport_error("create user", e))?;

        if !response.status().is_success() {
            return Err(Self::response_error("create user", response).await);
        }

        // The provider returns the new id only via the Location header.
        let id = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| location.rsplit('/').next())
            .map(str::to_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                DirectoryError::decode("create user response carried no Location header")
            })?;

        Ok(id)
    }

    async fn update_user(&self, token: &str, user: AdminUser) -> Result<(), DirectoryError> {
        let id = user
            .id
            .clone()
            .ok_or_else(|| DirectoryError::validation("update payload is missing the user id"))?;

        let response = self
            .http
            .put(self.user_url(&id))
            .bearer_auth(token)
            .json(&user)
            .send()
            .await
            .map_err(|e| Self::transport_error("update user", e))?;

        if !response.status().is_success() {
            return Err(Self::response_error("update user", response).await);
        }

        Ok(())
    }

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), DirectoryError> {
        let response = self
            .http
            .delete(self.user_url(id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Self::transport_error("delete user", e))?;

        if !response.status().is_success() {
            return Err(Self::response_error("delete user", response).await);
        }

        Ok(())
    }

    async fn get_user_by_id(&self, token: &str, id: &str) -> Result<AdminUser, DirectoryError> {
        let response = self
            .http
            .get(self.user_url(id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Self::transport_error("get user", e))?;

        if !response.status().is_success() {
            return Err(Self::response_error("get user", response).await);
        }

        response
            .json::<AdminUser>()
            .await
            .map_err(|e| DirectoryError::decode(format!("malformed user response: {e}")))
    }

    async fn get_users(
        &self,
        token: &str,
        first: u32,
        max: u32,
    ) -> Result<Vec<AdminUser>, DirectoryError> {
        let response = self
            .http
            .get(self.users_url())
            .bearer_auth(token)
            // briefRepresentation=false so the attribute map comes back.
            .query(&[
                ("first", first.to_string()),
                ("max", max.to_string()),
                ("briefRepresentation", "false".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::transport_error("list users", e))?;

        if !response.status().is_success() {
            return Err(Self::response_error("list users", response).await);
        }

        response
            .json::<Vec<AdminUser>>()
            .await
            .map_err(|e| DirectoryError::decode(format!("malformed user list response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> KeycloakAdminClient {
        KeycloakAdminClient::new(KeycloakConfig {
            base_url: base_url.to_string(),
            realm: "master".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "secret".to_string(),
            admin_client_id: "admin-cli".to_string(),
            accept_invalid_certs: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("client_id=admin-cli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-123",
                "expires_in": 60,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let token = test_client(&server.uri()).login_admin().await.unwrap();
        assert_eq!(token.access_token, "tok-123");
        assert_eq!(token.expires_in, Some(60));
    }

    #[tokio::test]
    async fn test_login_failure_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/realms/master/protocol/openid-connect/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).login_admin().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users/user-1"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-1",
                "username": "jdoe",
                "enabled": true,
                "attributes": {"country": ["US"]}
            })))
            .mount(&server)
            .await;

        let user = test_client(&server.uri())
            .get_user_by_id("tok", "user-1")
            .await
            .unwrap();

        assert_eq!(user.id.as_deref(), Some("user-1"));
        assert_eq!(
            user.attributes.unwrap()["country"],
            vec!["US".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .get_user_by_id("tok", "missing")
            .await
            .unwrap_err();

        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_user_reads_id_from_location_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/master/users"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(201).insert_header(
                "location",
                format!("{}/admin/realms/master/users/new-id-42", server.uri()).as_str(),
            ))
            .mount(&server)
            .await;

        let id = test_client(&server.uri())
            .create_user("tok", AdminUser::default())
            .await
            .unwrap();

        assert_eq!(id, "new-id-42");
    }

    #[tokio::test]
    async fn test_create_conflict_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/realms/master/users"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"errorMessage": "User exists with same username"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .create_user("tok", AdminUser::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DirectoryError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_get_users_pages_with_first_and_max() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/realms/master/users"))
            .and(query_param("first", "10"))
            .and(query_param("max", "5"))
            .and(query_param("briefRepresentation", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "3", "username": "c"},
                {"id": "1", "username": "a"},
                {"id": "2", "username": "b"}
            ])))
            .mount(&server)
            .await;

        let users = test_client(&server.uri())
            .get_users("tok", 10, 5)
            .await
            .unwrap();

        // Provider order comes back untouched.
        let ids: Vec<_> = users.iter().filter_map(|u| u.id.as_deref()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/realms/master/users/user-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        test_client(&server.uri())
            .delete_user("tok", "user-1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        // Nothing listens on this port.
        let client = test_client("http://127.0.0.1:1");

        let err = client.login_admin().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Connection { .. }));
    }
}
