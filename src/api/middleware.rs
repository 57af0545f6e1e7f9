use crate::api::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::warn;

/// Rejects requests whose peer address does not start with the configured prefix.
///
/// IPv4-mapped IPv6 peers are compared in their IPv4 form. Requests without a
/// known peer address are rejected while a filter is set.
pub async fn enforce_request_source(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(prefix) = state.ip_filter.as_deref() else {
        return next.run(request).await;
    };

    let peer = connect_info.map(|ConnectInfo(addr)| addr.ip().to_canonical().to_string());

    match peer {
        Some(ip) if ip.starts_with(prefix) => next.run(request).await,
        Some(ip) => {
            warn!("Rejected request from {} (filter {})", ip, prefix);
            StatusCode::FORBIDDEN.into_response()
        }
        None => {
            warn!("Rejected request without peer address (filter {})", prefix);
            StatusCode::FORBIDDEN.into_response()
        }
    }
}
