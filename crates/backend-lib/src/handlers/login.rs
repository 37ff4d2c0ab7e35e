use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Extensions, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use credgate_common::{CredentialsRequest, LoginResponse};
use tracing::{debug, instrument};

use super::{client_key, peer_addr};
use crate::{error::AppError, storage::Storage, AppState};

/// `POST /login`
///
/// An unreadable body goes through the same failure path as missing fields.
/// Lockouts are keyed by the connecting peer; forwarding headers count only
/// with `server.trust_proxy_headers`.
#[instrument(skip_all)]
pub async fn login<S: Storage>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_else(|rejection| {
        debug!(%rejection, "unreadable login body");
        CredentialsRequest::default()
    });

    let client = client_key(
        peer_addr(&extensions),
        &headers,
        state.settings.server.trust_proxy_headers,
    );
    let role = state.auth.login(&request, &client).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            message: "Autenticación exitosa".to_string(),
            role: role.to_string(),
        }),
    ))
}
