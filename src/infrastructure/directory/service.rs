//! Directory service
//!
//! Composes the two backing sources behind the [`UserDirectory`] trait:
//! list queries go to the relational replica, everything else goes through
//! the administrative API. Both collaborators are shared, pooled resources
//! injected by the surrounding service; no state is held per request and
//! nothing is retried here.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use async_trait::async_trait;

use super::replica::PostgresReplica;
use crate::domain::{
    DirectoryError, DirectoryUser, NewUser, UserDirectory, UserFilter, UserUpdate,
};
use crate::infrastructure::keycloak::{AdminApi, AdminUser};

/// The user-directory facade.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    replica: PostgresReplica,
    admin: Arc<dyn AdminApi>,
}

impl DirectoryService {
    pub fn new(replica: PostgresReplica, admin: Arc<dyn AdminApi>) -> Self {
        Self { replica, admin }
    }

    fn validate_id(id: &str) -> Result<(), DirectoryError> {
        Uuid::parse_str(id)
            .map(|_| ())
            .map_err(|_| DirectoryError::validation(format!("invalid user id '{id}'")))
    }
}

#[async_trait]
impl UserDirectory for DirectoryService {
    async fn create(&self, user: NewUser) -> Result<String, DirectoryError> {
        user.validate()
            .map_err(|e| DirectoryError::validation(e.to_string()))?;

        let token = self.admin.login_admin().await?;
        let id = self
            .admin
            .create_user(&token.access_token, AdminUser::from_new(&user))
            .await?;

        info!(user_id = %id, username = %user.username, "created directory user");
        Ok(id)
    }

    async fn update(&self, id: &str, update: UserUpdate) -> Result<(), DirectoryError> {
        Self::validate_id(id)?;

        let token = self.admin.login_admin().await?;
        self.admin
            .update_user(&token.access_token, AdminUser::from_update(id, &update))
            .await?;

        info!(user_id = %id, "updated directory user");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<DirectoryUser, DirectoryError> {
        Self::validate_id(id)?;

        let token = self.admin.login_admin().await?;
        let user = self.admin.get_user_by_id(&token.access_token, id).await?;

        Ok(user.into_directory_user())
    }

    async fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        Self::validate_id(id)?;

        let token = self.admin.login_admin().await?;
        self.admin.delete_user(&token.access_token, id).await?;

        info!(user_id = %id, "deleted directory user");
        Ok(())
    }

    async fn list(&self, mut filter: UserFilter) -> Result<Vec<DirectoryUser>, DirectoryError> {
        let users = self.replica.list(&mut filter).await?;

        debug!(
            page = filter.page,
            size = filter.size,
            count = users.len(),
            "listed users from replica"
        );
        Ok(users)
    }

    async fn list_from_provider(
        &self,
        mut filter: UserFilter,
    ) -> Result<Vec<DirectoryUser>, DirectoryError> {
        filter.normalize();

        let token = self.admin.login_admin().await?;
        let first = u32::try_from(filter.offset())
            .map_err(|_| DirectoryError::validation("page * size exceeds the provider's range"))?;
        let users = self
            .admin
            .get_users(&token.access_token, first, filter.size)
            .await?;

        debug!(
            page = filter.page,
            size = filter.size,
            count = users.len(),
            "listed users from provider"
        );
        Ok(users
            .into_iter()
            .map(AdminUser::into_directory_user)
            .collect())
    }
}
