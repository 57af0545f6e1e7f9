/// API error types and upstream error classification
pub mod errors;
/// HTTP handlers for lists, recipes and the meal plan
pub mod handlers;
/// Source-IP allowlist
pub mod middleware;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;

use crate::anylist::AnyListApi;
use std::sync::Arc;

/// Configuration and upstream client shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Arc<dyn AnyListApi>,
    /// List used when a request names none
    pub default_list: Option<String>,
    /// Required prefix of the peer address, if any
    pub ip_filter: Option<String>,
}

impl AppState {
    pub fn new(client: Arc<dyn AnyListApi>) -> Self {
        AppState {
            client,
            default_list: None,
            ip_filter: None,
        }
    }

    pub fn with_default_list(mut self, default_list: Option<String>) -> Self {
        self.default_list = default_list;
        self
    }

    pub fn with_ip_filter(mut self, ip_filter: Option<String>) -> Self {
        self.ip_filter = ip_filter;
        self
    }
}
