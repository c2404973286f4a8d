//! Management API client.
//!
//! HTTP client for the realm management REST API. Handles the admin login,
//! realm-scoped URL building, status mapping and `Location`-based ids for
//! created resources. Resource specific calls live in the sibling modules.

use crate::auth::{AccessToken, TokenResponse};
use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use admin_model::CreatedResource;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, LOCATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

/// Management API client.
///
/// Cloning is cheap; clones share the HTTP connection pool and the admin
/// token. Every call is addressed to the client's current realm, see
/// [`AdminClient::with_realm`].
#[derive(Clone)]
pub struct AdminClient {
    /// HTTP client instance.
    client: Client,

    /// Connection and credential settings.
    config: Arc<AdminConfig>,

    /// Realm addressed by realm-scoped calls.
    realm: String,

    /// Current admin token, shared between clones.
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("server_url", &self.config.server_url)
            .field("realm", &self.realm)
            .finish()
    }
}

impl AdminClient {
    /// Create a new admin client.
    ///
    /// Fails when the configuration does not validate or the HTTP client
    /// cannot be built. No request is made until the first call.
    pub fn new(config: AdminConfig) -> AdminResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            client,
            realm: config.realm.clone(),
            config: Arc::new(config),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> AdminResult<Self> {
        Self::new(AdminConfig::from_env())
    }

    /// Clone of this client addressing another realm with the same login.
    pub fn with_realm(&self, realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            ..self.clone()
        }
    }

    /// Realm addressed by realm-scoped calls.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Configuration in use.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Log in with the configured admin credentials, replacing any held token.
    #[instrument(skip(self), fields(username = %self.config.username))]
    pub async fn login(&self) -> AdminResult<()> {
        let response = self
            .request_token(
                &self.config.username,
                &self.config.password,
                &self.config.client_id,
            )
            .await?;
        *self.token.write().await = Some(AccessToken::from_response(&response, Utc::now())?);
        Ok(())
    }

    /// Log in as an arbitrary user without touching the admin token.
    #[instrument(skip(self, password))]
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
        client_id: &str,
    ) -> AdminResult<TokenResponse> {
        self.request_token(username, password, client_id).await
    }

    /// Bearer header value for the admin account, logging in when needed.
    async fn bearer(&self) -> AdminResult<String> {
        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref() {
                if !token.is_expired(Utc::now()) {
                    return Ok(token.header_value());
                }
            }
        }

        let mut token = self.token.write().await;
        if let Some(current) = token.as_ref() {
            if !current.is_expired(Utc::now()) {
                return Ok(current.header_value());
            }
        }

        debug!("Admin token missing or stale, logging in");
        let response = self
            .request_token(
                &self.config.username,
                &self.config.password,
                &self.config.client_id,
            )
            .await?;
        let fresh = AccessToken::from_response(&response, Utc::now())?;
        let header = fresh.header_value();
        *token = Some(fresh);
        Ok(header)
    }

    async fn request_token(
        &self,
        username: &str,
        password: &str,
        client_id: &str,
    ) -> AdminResult<TokenResponse> {
        let response = self
            .client
            .post(self.config.token_url())
            .form(&[
                ("grant_type", "password"),
                ("client_id", client_id),
                ("username", username),
                ("password", password),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            error!(username, "Password grant rejected");
            return Err(AdminError::AuthenticationFailed);
        }

        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| AdminError::InvalidResponse(e.to_string()))
    }

    /// Full URL of a path under `/admin/realms`.
    pub(crate) fn admin_url(&self, path: &str) -> String {
        self.config.url(&format!("/admin/realms/{}", path.trim_start_matches('/')))
    }

    /// Full URL of a path under the current realm's admin root.
    pub(crate) fn realm_url(&self, path: &str) -> String {
        self.admin_url(&format!("{}/{}", self.realm, path.trim_start_matches('/')))
    }

    /// Attach the admin token, send, and map error statuses.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AdminResult<Response> {
        let bearer = self.bearer().await?;
        let response = request.header(AUTHORIZATION, bearer).send().await?;
        self.check_status(response).await
    }

    /// GET a JSON body.
    pub(crate) async fn get_json<T>(&self, url: &str) -> AdminResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.send(self.client.get(url)).await?;
        Self::parse_json(response).await
    }

    /// GET a JSON body with query parameters.
    pub(crate) async fn get_json_with_query<T, Q>(&self, url: &str, query: &Q) -> AdminResult<T>
    where
        T: for<'de> Deserialize<'de>,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.client.get(url).query(query)).await?;
        Self::parse_json(response).await
    }

    /// POST a JSON body, ignoring the response body.
    pub(crate) async fn post_json<B>(&self, url: &str, body: &B) -> AdminResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(url).json(body)).await?;
        Ok(())
    }

    /// POST a JSON body and read the new resource id from `Location`.
    pub(crate) async fn post_created<B>(&self, url: &str, body: &B) -> AdminResult<CreatedResource>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(self.client.post(url).json(body)).await?;
        created_resource(&response)
    }

    /// PUT a JSON body.
    pub(crate) async fn put_json<B>(&self, url: &str, body: &B) -> AdminResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.put(url).json(body)).await?;
        Ok(())
    }

    /// PUT without a body.
    pub(crate) async fn put_empty(&self, url: &str) -> AdminResult<()> {
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    /// DELETE a resource.
    pub(crate) async fn delete(&self, url: &str) -> AdminResult<()> {
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// Map error statuses to [`AdminError`] and pass successes through.
    async fn check_status(&self, response: Response) -> AdminResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            error!("Management API authentication failed");
            return Err(AdminError::AuthenticationFailed);
        }

        if status == StatusCode::NOT_FOUND {
            let resource = response.url().path().to_string();
            warn!(%resource, "Management API resource not found");
            return Err(AdminError::NotFound(resource));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Management API error ({}): {}", status.as_u16(), message);
            return Err(AdminError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn parse_json<T>(response: Response) -> AdminResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        response
            .json()
            .await
            .map_err(|e| AdminError::InvalidResponse(e.to_string()))
    }
}

/// Id of a created resource: the last path segment of `Location`.
fn created_resource(response: &Response) -> AdminResult<CreatedResource> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AdminError::MissingLocation)?;

    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(|id| CreatedResource { id: id.to_string() })
        .ok_or(AdminError::MissingLocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_validates_config() {
        let bad = AdminConfig::default().with_server_url("");
        assert!(matches!(AdminClient::new(bad), Err(AdminError::Config(_))));

        let client = AdminClient::new(AdminConfig::default()).unwrap();
        assert_eq!(client.realm(), "master");
    }

    #[test]
    fn test_realm_urls() {
        let config = AdminConfig::default()
            .with_server_url("http://localhost:8180/")
            .with_realm("acme");
        let client = AdminClient::new(config).unwrap();

        assert_eq!(
            client.realm_url("/groups"),
            "http://localhost:8180/admin/realms/acme/groups"
        );
        assert_eq!(
            client.with_realm("other").realm_url("clients"),
            "http://localhost:8180/admin/realms/other/clients"
        );
        assert_eq!(
            client.admin_url("acme"),
            "http://localhost:8180/admin/realms/acme"
        );
    }
}
