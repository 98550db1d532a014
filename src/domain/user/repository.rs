//! Directory access trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{DirectoryUser, NewUser, UserUpdate};
use super::filter::UserFilter;
use crate::domain::DirectoryError;

/// The operations this facade exposes to the surrounding service.
///
/// Implementations hold the shared, pooled collaborators (relational replica
/// connection, administrative-API client) injected by the caller; every call
/// is independent, performs exactly one round of I/O per backing source and
/// never retries internally.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a user through the administrative API, returning the new id.
    async fn create(&self, user: NewUser) -> Result<String, DirectoryError>;

    /// Apply a partial update to an existing user through the administrative
    /// API. Attribute fields replace the full value list for their key.
    async fn update(&self, id: &str, update: UserUpdate) -> Result<(), DirectoryError>;

    /// Fetch a single user by id. An unknown id yields
    /// [`DirectoryError::NotFound`], distinct from a connection failure.
    async fn get(&self, id: &str) -> Result<DirectoryUser, DirectoryError>;

    /// Delete a user by id.
    async fn delete(&self, id: &str) -> Result<(), DirectoryError>;

    /// List users from the relational replica, applying the filter predicates
    /// and pagination. Source row order is preserved exactly.
    async fn list(&self, filter: UserFilter) -> Result<Vec<DirectoryUser>, DirectoryError>;

    /// List users straight from the administrative API. Only pagination is
    /// supported on this path; field predicates are replica-only.
    async fn list_from_provider(
        &self,
        filter: UserFilter,
    ) -> Result<Vec<DirectoryUser>, DirectoryError>;
}
