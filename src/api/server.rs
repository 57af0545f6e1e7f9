use crate::anylist::AnyListApi;
use crate::api::{routes, AppState};
use crate::config::ServerConfig;
use crate::errors::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `config` - Resolved server configuration
/// * `client` - Upstream client shared by every request
///
/// # Returns
/// * `Result<(), Error>` - Returns when the server stops, Error if binding or serving fails
///
/// # Example
/// ```no_run
/// use anylist_rest::anylist::RemoteClient;
/// use anylist_rest::api::server;
/// use anylist_rest::config::ServerConfig;
/// use std::sync::Arc;
///
/// async fn run(config: ServerConfig) -> Result<(), anylist_rest::errors::Error> {
///     let client = RemoteClient::new(&config.api_url, &config.email, &config.password, None)?;
///     server::launch_server(&config, Arc::new(client)).await
/// }
/// ```
pub async fn launch_server(config: &ServerConfig, client: Arc<dyn AnyListApi>) -> Result<(), Error> {
    let state = AppState::new(client)
        .with_default_list(config.default_list.clone())
        .with_ip_filter(config.ip_filter.clone());
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on port {}", config.port);
    if let Some(filter) = &config.ip_filter {
        info!("IP filter: {}", filter);
    }
    if let Some(list) = &config.default_list {
        info!("Default list: {}", list);
    }
    if let Some(path) = &config.credentials_file {
        info!("Credentials file: {}", path.display());
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
