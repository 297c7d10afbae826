use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    pagination::PageRequest,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, CreatedUser, DataResponse, MessageResponse, PageResponse,
            StatusResponse, UpdateUserRequest,
        },
        repo_types::{NewUser, User, UserChanges},
        validation::validate_new_user,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<DataResponse<CreatedUser>>, ApiError> {
    let Json(payload) = body.map_err(|e| {
        warn!(error = %e, "create user: undecodable body");
        ApiError::MalformedBody(e.body_text())
    })?;

    let valid = validate_new_user(payload).map_err(|violations| {
        warn!(count = violations.len(), "create user: constraint violations");
        ApiError::Violations(violations)
    })?;

    // argon2 is CPU bound; keep it off the async workers
    let hasher = state.hasher.clone();
    let plain = valid.password;
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&plain))
        .await
        .map_err(|e| ApiError::downstream("Couldn't hash password", e))?
        .map_err(|e| {
            error!(error = %e, "hash_password failed");
            ApiError::downstream("Couldn't hash password", e)
        })?;

    let new_user = NewUser {
        name: valid.name,
        email: valid.email,
        password: hash,
        date: valid.date,
        company: valid.company,
    };
    let user = state.users.create(&new_user).await.map_err(|e| {
        error!(error = %e, "create user failed");
        ApiError::downstream("Couldn't create user", format!("{e:#}"))
    })?;

    info!(user_id = user.id, "user created");
    Ok(Json(DataResponse {
        message: "User has been added",
        data: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<User>>, ApiError> {
    let id = non_empty(&id, StatusCode::INTERNAL_SERVER_ERROR)?;
    let not_found = || ApiError::status(StatusCode::BAD_REQUEST, "Could not get the user");

    let Ok(id) = id.parse::<i64>() else {
        warn!(%id, "get user: id is not numeric");
        return Err(not_found());
    };
    match state.users.find_by_id(id).await {
        Ok(Some(user)) => Ok(Json(DataResponse {
            message: "User id fetched successfully",
            data: user,
        })),
        Ok(None) => {
            warn!(user_id = id, "user not found");
            Err(not_found())
        }
        Err(e) => {
            error!(error = %e, user_id = id, "find user failed");
            Err(not_found())
        }
    }
}

#[instrument(skip(state, query))]
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    // unparseable paging params fall back to the defaults
    let req = query.map(|Query(q)| q).unwrap_or_default();
    let page = state.users.page(req).await.map_err(|e| {
        error!(error = %e, "list users failed");
        ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, "Could not list users")
    })?;
    Ok(Json(PageResponse { data: page }))
}

/// Updates `name`/`email` only. The new values are not re-validated.
#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(payload) = body.map_err(|e| {
        warn!(error = %e, "update user: undecodable body");
        ApiError::downstream("Review your input", e.body_text())
    })?;
    let id = non_empty(&id, StatusCode::BAD_REQUEST)?;
    let no_match = || ApiError::status(StatusCode::BAD_REQUEST, "Could not get User with given id");

    let Ok(id) = id.parse::<i64>() else {
        warn!(%id, "update user: id is not numeric");
        return Err(no_match());
    };
    let changes = UserChanges {
        name: payload.name,
        email: payload.email,
    };
    match state.users.update(id, &changes).await {
        Ok(0) => {
            warn!(user_id = id, "update user: no rows affected");
            Err(no_match())
        }
        Ok(_) => {
            info!(user_id = id, "user updated");
            Ok(Json(StatusResponse {
                status: "success",
                message: "User successfully updated",
            }))
        }
        Err(e) => {
            error!(error = %e, user_id = id, "update user failed");
            Err(no_match())
        }
    }
}

/// Succeeds whether or not the row existed; only store failures are reported.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = non_empty(&id, StatusCode::INTERNAL_SERVER_ERROR)?;
    let failed = || ApiError::status(StatusCode::BAD_REQUEST, "Could not delete user");

    let Ok(id) = id.parse::<i64>() else {
        warn!(%id, "delete user: id is not numeric");
        return Err(failed());
    };
    match state.users.delete(id).await {
        Ok(rows) => {
            info!(user_id = id, rows, "user deleted");
            Ok(Json(MessageResponse {
                message: "User deleted successfully",
            }))
        }
        Err(e) => {
            error!(error = %e, user_id = id, "delete user failed");
            Err(failed())
        }
    }
}

fn non_empty(id: &str, status: StatusCode) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::status(status, "ID cannot be empty"));
    }
    Ok(id)
}
