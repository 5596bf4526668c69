//! User endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::CreateOutcome;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidListParams, ValidNewUser, ValidUserId};
use crate::models::User;
use crate::state::AppState;

/// POST /users/ - create a user unless the email is taken
async fn create_user(
    State(state): State<AppState>,
    ValidNewUser(new_user): ValidNewUser,
) -> Result<(StatusCode, Json<User>), ApiError> {
    match state.store().create_user(&new_user).await? {
        CreateOutcome::Created(user) => {
            tracing::info!(user_id = user.id, "user created");
            Ok((StatusCode::CREATED, Json(user)))
        }
        CreateOutcome::Duplicate => {
            tracing::info!(email = %new_user.email, "rejected duplicate email");
            Err(ApiError::DuplicateEmail)
        }
    }
}

/// GET /users/?skip=&limit= - list users in creation order
async fn list_users(
    State(state): State<AppState>,
    ValidListParams(params): ValidListParams,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store().list_users(params).await?;
    Ok(Json(users))
}

/// GET /users/{user_id} - fetch one user
async fn get_user(
    State(state): State<AppState>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<User>, ApiError> {
    state
        .store()
        .find_user_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

/// User routes; the collection answers with and without trailing slash
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user))
}
