//! User handlers

use crate::handlers::ApiError;
use crate::AppState;
use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use userapi_types::{MessageResponse, User, UserRequest};

pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(req): Json<UserRequest>,
) -> Result<Json<User>, ApiError> {
    match state.users.create(req).await {
        Ok(user) => Ok(Json(user)),
        Err(e) if e.is_unique_violation() => Err(ApiError::NotUniqueEmail),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            Err(ApiError::Internal {
                path: uri.path().to_string(),
            })
        }
    }
}

pub async fn get(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    match state.users.get(id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(ApiError::NotFound {
            path: uri.path().to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to get user {}: {}", id, e);
            Err(ApiError::Internal {
                path: uri.path().to_string(),
            })
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(user): Json<User>,
) -> Result<Json<User>, ApiError> {
    match state.users.update(user).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(ApiError::NotFound {
            path: uri.path().to_string(),
        }),
        // Unlike create, a unique violation here gets no dedicated reply
        Err(e) => {
            tracing::error!("Failed to update user: {}", e);
            Err(ApiError::Internal {
                path: uri.path().to_string(),
            })
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.users.delete(id).await {
        Ok(true) => Ok(Json(MessageResponse::new("Deleted"))),
        Ok(false) => Err(ApiError::NotFound {
            path: uri.path().to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to delete user {}: {}", id, e);
            Err(ApiError::Internal {
                path: uri.path().to_string(),
            })
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<User>>, ApiError> {
    match state.users.list().await {
        Ok(users) => Ok(Json(users)),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Err(ApiError::Internal {
                path: uri.path().to_string(),
            })
        }
    }
}
