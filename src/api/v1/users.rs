//! User endpoints
//!
//! Thin HTTP surface over the [`UserDirectory`] facade; all query and
//! normalization logic lives below it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{DirectoryUser, NewUser, UserFilter, UserUpdate};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Which backing source a list request reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSource {
    #[default]
    Replica,
    Provider,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub enabled: Option<bool>,
    pub page: u32,
    pub size: u32,
    pub source: ListSource,
}

impl ListUsersQuery {
    fn into_filter(self) -> UserFilter {
        UserFilter {
            role: self.role,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            enabled: self.enabled,
            page: self.page,
            size: self.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<DirectoryUser>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: String,
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let source = query.source;
    let filter = query.into_filter();

    let users = match source {
        ListSource::Replica => state.directory.list(filter).await?,
        ListSource::Provider => state.directory.list_from_provider(filter).await?,
    };

    Ok(Json(ListUsersResponse { users }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DirectoryUser>, ApiError> {
    let user = state.directory.get(&id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let id = state.directory.create(user).await?;
    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<StatusCode, ApiError> {
    state.directory.update(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
