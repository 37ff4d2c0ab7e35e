//! HTTP handlers for the authentication API.

pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod users;
pub use self::users::users;

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{Extensions, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use credgate_common::NotFoundResponse;

/// Bucket used when neither a peer address nor a trusted header is known
const UNKNOWN_CLIENT: &str = "unknown";

/// Socket peer recorded by `into_make_service_with_connect_info`
pub fn peer_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// Identify the caller for lockout bookkeeping.
///
/// The socket peer's IP is authoritative. `x-real-ip` and the first
/// `x-forwarded-for` entry are only read when `trust_proxy` is set, since a
/// client talking to us directly can put anything in them.
pub fn client_key(peer: Option<SocketAddr>, headers: &HeaderMap, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_ip(headers) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|list| list.split(',').next())
        })
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "No encontrado".to_string(),
            message: "La ruta solicitada no existe".to_string(),
        }),
    )
}
