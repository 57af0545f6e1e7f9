//! HTTPS client for the AnyList service.
//!
//! Authenticates with the account email and password, keeps the issued
//! tokens in memory and in an optional credentials file, and exchanges JSON
//! with the data endpoints.

use super::{
    new_identifier, AnyListApi, ListItem, MealPlanEvent, RecentItem, Recipe, RecipeCollection,
    ShoppingList, UpstreamError,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

const API_VERSION: &str = "3";
const CLIENT_ID_HEADER: &str = "X-AnyLeaf-Client-Identifier";
const API_VERSION_HEADER: &str = "X-AnyLeaf-API-Version";

/// Tokens persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Credentials {
    #[serde(default = "new_identifier")]
    client_id: String,
    access_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

pub struct RemoteClient {
    http: Client,
    base_url: Url,
    email: String,
    password: String,
    credentials_file: Option<PathBuf>,
    session: RwLock<Option<Credentials>>,
}

impl fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("credentials_file", &self.credentials_file)
            .finish_non_exhaustive()
    }
}

impl RemoteClient {
    /// Creates a client bound to one account.
    ///
    /// # Arguments
    /// * `base_url` - Root URL of the AnyList service
    /// * `email` - Account email
    /// * `password` - Account password
    /// * `credentials_file` - Where issued tokens are cached, if anywhere
    pub fn new(
        base_url: &str,
        email: &str,
        password: &str,
        credentials_file: Option<PathBuf>,
    ) -> Result<Self, UpstreamError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(RemoteClient {
            http: Client::new(),
            base_url,
            email: email.to_string(),
            password: password.to_string(),
            credentials_file,
            session: RwLock::new(None),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_credentials_file(&self) -> Result<Option<Credentials>, UpstreamError> {
        let Some(path) = &self.credentials_file else {
            return Ok(None);
        };

        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                warn!("Ignoring unreadable credentials file {:?}: {}", path, e);
                Ok(None)
            }
        }
    }

    async fn write_credentials_file(&self, credentials: &Credentials) -> Result<(), UpstreamError> {
        if let Some(path) = &self.credentials_file {
            let contents = serde_json::to_string(credentials)?;
            tokio::fs::write(path, contents).await?;
            debug!("Stored credentials in {:?}", path);
        }
        Ok(())
    }

    /// Exchanges a form for a token pair.
    async fn request_tokens(
        &self,
        path: &[&str],
        client_id: &str,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, UpstreamError> {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .header(CLIENT_ID_HEADER, client_id)
            .form(form)
            .send()
            .await?;
        let res = Self::check_status(res).await?;
        Ok(res.json::<TokenResponse>().await?)
    }

    async fn password_tokens(&self, client_id: &str) -> Result<TokenResponse, UpstreamError> {
        self.request_tokens(
            &["auth", "token"],
            client_id,
            &[("email", self.email.as_str()), ("password", self.password.as_str())],
        )
        .await
    }

    /// Renews the session after the access token was rejected.
    ///
    /// Uses the refresh token first and falls back to the account password
    /// when that is rejected too. The new tokens replace the cached ones.
    async fn refresh(&self, stale: &Credentials) -> Result<Credentials, UpstreamError> {
        let mut session = self.session.write().await;
        if let Some(current) = session.as_ref() {
            if current.access_token != stale.access_token {
                return Ok(current.clone());
            }
        }

        debug!("Access token rejected, refreshing");
        let refreshed = self
            .request_tokens(
                &["auth", "token", "refresh"],
                &stale.client_id,
                &[("refresh_token", stale.refresh_token.as_str())],
            )
            .await;
        let tokens = match refreshed {
            Ok(tokens) => tokens,
            Err(e) if is_token_rejection(&e) => {
                warn!("Refresh token rejected ({}), logging in again", e);
                self.password_tokens(&stale.client_id).await?
            }
            Err(e) => return Err(e),
        };
        let credentials = Credentials {
            client_id: stale.client_id.clone(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        };
        self.write_credentials_file(&credentials).await?;
        *session = Some(credentials.clone());
        Ok(credentials)
    }

    async fn credentials(&self) -> Result<Credentials, UpstreamError> {
        if let Some(credentials) = self.session.read().await.as_ref() {
            return Ok(credentials.clone());
        }
        self.login().await?;
        self.session
            .read()
            .await
            .clone()
            .ok_or_else(|| UpstreamError::Other("Not logged in".to_string()))
    }

    fn build(
        &self,
        method: Method,
        url: Url,
        credentials: &Credentials,
        body: Option<&serde_json::Value>,
    ) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .bearer_auth(&credentials.access_token)
            .header(CLIENT_ID_HEADER, &credentials.client_id)
            .header(API_VERSION_HEADER, API_VERSION);
        match body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    /// Sends an authenticated request, renewing the token once on 401.
    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<Response, UpstreamError> {
        let url = self.endpoint(segments)?;
        let credentials = self.credentials().await?;

        let mut res = self
            .build(method.clone(), url.clone(), &credentials, body.as_ref())
            .send()
            .await?;

        if res.status() == StatusCode::UNAUTHORIZED {
            let renewed = self.refresh(&credentials).await?;
            res = self
                .build(method, url, &renewed, body.as_ref())
                .send()
                .await?;
        }

        Self::check_status(res).await
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, UpstreamError> {
        let res = self.call(Method::GET, segments, None).await?;
        Ok(res.json::<T>().await?)
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: &T,
    ) -> Result<(), UpstreamError> {
        let body = serde_json::to_value(body)?;
        self.call(method, segments, Some(body)).await?;
        Ok(())
    }

    /// Turns a non-success response into [`UpstreamError::Status`].
    async fn check_status(res: Response) -> Result<Response, UpstreamError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let text = res.text().await.unwrap_or_default();
        let message = error_message(&text).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Upstream request failed")
                .to_string()
        });
        debug!("AnyList API error {}: {}", status, text);
        Err(UpstreamError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// True when the token endpoint refused the grant itself.
fn is_token_rejection(err: &UpstreamError) -> bool {
    matches!(err.status_code(), Some(400 | 401 | 403))
}

/// Extracts a human-readable message from an error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["error", "message"] {
            if let Some(message) = json[key].as_str() {
                return Some(message.to_string());
            }
        }
    }
    Some(trimmed.to_string())
}

#[async_trait]
impl AnyListApi for RemoteClient {
    async fn login(&self) -> Result<(), UpstreamError> {
        let mut session = self.session.write().await;
        if session.is_some() {
            return Ok(());
        }

        if let Some(cached) = self.read_credentials_file().await? {
            debug!("Reusing cached credentials");
            *session = Some(cached);
            return Ok(());
        }

        let client_id = new_identifier();
        let tokens = self.password_tokens(&client_id).await?;
        let credentials = Credentials {
            client_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        };
        self.write_credentials_file(&credentials).await?;
        *session = Some(credentials);
        info!("Logged in to AnyList as {}", self.email);
        Ok(())
    }

    async fn get_lists(&self) -> Result<Vec<ShoppingList>, UpstreamError> {
        self.fetch(&["data", "shopping-lists"]).await
    }

    async fn get_recent_items(&self, list_id: &str) -> Result<Vec<RecentItem>, UpstreamError> {
        self.fetch(&["data", "shopping-lists", list_id, "recent-items"])
            .await
    }

    async fn add_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError> {
        self.send(
            Method::POST,
            &["data", "shopping-lists", list_id, "items"],
            item,
        )
        .await
    }

    async fn save_item(&self, list_id: &str, item: &ListItem) -> Result<(), UpstreamError> {
        self.send(
            Method::PUT,
            &["data", "shopping-lists", list_id, "items", &item.identifier],
            item,
        )
        .await
    }

    async fn remove_item(&self, list_id: &str, item_id: &str) -> Result<(), UpstreamError> {
        self.call(
            Method::DELETE,
            &["data", "shopping-lists", list_id, "items", item_id],
            None,
        )
        .await?;
        Ok(())
    }

    async fn get_recipes(&self) -> Result<Vec<Recipe>, UpstreamError> {
        self.fetch(&["data", "recipes"]).await
    }

    async fn get_recipe_collections(&self) -> Result<Vec<RecipeCollection>, UpstreamError> {
        self.fetch(&["data", "recipe-collections"]).await
    }

    async fn save_recipe(&self, recipe: &Recipe) -> Result<(), UpstreamError> {
        self.send(Method::PUT, &["data", "recipes", &recipe.identifier], recipe)
            .await
    }

    async fn delete_recipe(&self, recipe_id: &str) -> Result<(), UpstreamError> {
        self.call(Method::DELETE, &["data", "recipes", recipe_id], None)
            .await?;
        Ok(())
    }

    async fn save_event(&self, event: &MealPlanEvent) -> Result<(), UpstreamError> {
        self.send(
            Method::PUT,
            &["data", "meal-plan", "events", &event.identifier],
            event,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_path_and_escape_segments() {
        let client = RemoteClient::new("http://localhost:9000/api", "a@b.c", "pw", None).unwrap();
        let url = client
            .endpoint(&["data", "recipes", "id with space"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/api/data/recipes/id%20with%20space"
        );
    }

    #[test]
    fn only_refused_grants_trigger_password_login() {
        assert!(is_token_rejection(&UpstreamError::status(401, "Unauthorized")));
        assert!(is_token_rejection(&UpstreamError::status(400, "invalid_grant")));
        assert!(!is_token_rejection(&UpstreamError::status(429, "Too many requests")));
        assert!(!is_token_rejection(&UpstreamError::status(502, "Bad gateway")));
    }

    #[test]
    fn cached_credentials_without_client_id_get_one() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert!(!credentials.client_id.is_empty());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = RemoteClient::new("not a url", "a@b.c", "pw", None).unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidUrl(_)));
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            error_message(r#"{"error":"Too many requests"}"#).as_deref(),
            Some("Too many requests")
        );
        assert_eq!(
            error_message(r#"{"message":"bad token"}"#).as_deref(),
            Some("bad token")
        );
        assert_eq!(error_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(error_message("   "), None);
    }

    #[test]
    fn debug_output_hides_password() {
        let client = RemoteClient::new("http://localhost", "a@b.c", "hunter2", None).unwrap();
        assert!(!format!("{:?}", client).contains("hunter2"));
    }
}
