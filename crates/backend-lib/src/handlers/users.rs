use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use credgate_common::{UsersRequest, UsersResponse};
use tracing::{debug, instrument};

use crate::{error::AppError, storage::Storage, AppState};

/// `POST /users`
///
/// Authorisation rests on the username the caller claims; no session or
/// password proves it.
#[instrument(skip_all)]
pub async fn users<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<UsersRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_else(|rejection| {
        debug!(%rejection, "unreadable users body");
        UsersRequest::default()
    });

    let users = state.auth.list_users(&request).await?;

    Ok((StatusCode::OK, Json(UsersResponse::new(users))))
}
