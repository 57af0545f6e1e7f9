mod common;

use anylist_rest::api::{routes, AppState};
use axum::extract::connect_info::MockConnectInfo;
use axum::http::StatusCode;
use axum::Router;
use common::{get, seeded_client};
use std::net::SocketAddr;

fn filtered_app(filter: &str, peer: Option<&str>) -> Router {
    let (client, _) = seeded_client();
    let app = routes::app(AppState::new(client).with_ip_filter(Some(filter.to_string())));
    match peer {
        Some(peer) => app.layer(MockConnectInfo(peer.parse::<SocketAddr>().unwrap())),
        None => app,
    }
}

#[tokio::test]
async fn matching_peer_is_allowed() {
    let response = get(filtered_app("192.168.1.", Some("192.168.1.20:50000")), "/lists").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn other_peers_are_forbidden() {
    let response = get(filtered_app("192.168.1.", Some("10.0.0.5:50000")), "/lists").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn ipv4_mapped_peers_are_compared_as_ipv4() {
    let response = get(
        filtered_app("192.168.1.", Some("[::ffff:192.168.1.20]:50000")),
        "/recipes",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_peer_is_forbidden() {
    let response = get(filtered_app("127.0.0.1", None), "/lists").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
