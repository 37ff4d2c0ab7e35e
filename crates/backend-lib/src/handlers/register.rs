use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use credgate_common::{ApiResponse, CredentialsRequest};
use tracing::{debug, instrument};

use crate::{error::AppError, storage::Storage, AppState};

/// `POST /registro`
#[instrument(skip_all)]
pub async fn register<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "unreadable registration body");
        AppError::MissingCredentials
    })?;

    state.auth.register(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Usuario registrado exitosamente")),
    ))
}
