//! Appwrite account API client.
//!
//! Implements `AccountService` over the Appwrite REST API:
//! - `GET    /account`                  current user
//! - `DELETE /account/sessions/current` end the session
//! - `POST   /account/sessions/email`   email/password login
//!
//! The session credential travels in the `X-Appwrite-Session` header and
//! lives in a `SessionStore` between runs.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    AccountError, AccountErrorKind, AccountResult, AccountService, SessionStore, StoredSession,
};
use crate::config::Config;
use crate::profile::UserProfile;

/// Default Appwrite Cloud endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// User-Agent header for plate requests.
pub const USER_AGENT: &str = concat!("plate/", env!("CARGO_PKG_VERSION"));

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const SESSION_HEADER: &str = "X-Appwrite-Session";

/// Connection settings for an Appwrite project.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// API endpoint including the version segment (e.g. `.../v1`).
    pub endpoint: String,
    pub project: String,
    /// Per-request timeout; `None` disables it.
    pub timeout: Option<Duration>,
}

impl AppwriteConfig {
    /// Resolves connection settings from config + environment.
    ///
    /// # Errors
    /// Returns an error if the endpoint is invalid or no project is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: config.effective_endpoint()?,
            project: config.effective_project()?,
            timeout: config.request_timeout(),
        })
    }
}

/// Account service backed by the Appwrite REST API.
pub struct AppwriteAccount {
    config: AppwriteConfig,
    http: reqwest::Client,
    store: SessionStore,
}

impl AppwriteAccount {
    /// Creates a client for the given project and credential store.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AppwriteConfig, store: SessionStore) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            http,
            store,
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Creates an email/password session and stores its credential.
    ///
    /// # Errors
    /// Returns an error if the service rejects the login, the response
    /// carries no credential, or the credential cannot be stored.
    pub async fn create_email_session(&self, email: &str, password: &str) -> Result<StoredSession> {
        let response = self
            .request(Method::POST, "account/sessions/email", None)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(AccountError::from)?;

        let response = ensure_success(response).await?;
        let cookie_secret = session_cookie(response.headers(), &self.config.project);
        let body: SessionResponse = read_json(response).await?;

        let secret = if body.secret.is_empty() {
            cookie_secret
                .ok_or_else(|| AccountError::parse("Session response carried no credential"))?
        } else {
            body.secret
        };

        let session = StoredSession {
            session_id: body.id,
            user_id: body.user_id,
            secret,
            created_at: Utc::now(),
        };
        self.store.save(&session).context("store session")?;
        tracing::info!(session_id = %session.session_id, "session created");
        Ok(session)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, secret: Option<&str>) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.config.project);
        if let Some(secret) = secret {
            request = request.header(SESSION_HEADER, secret);
        }
        request
    }

    /// Loads the stored credential; fails fast when there is none.
    ///
    /// An unreadable credential file is unusable, so it is removed and
    /// treated as no session.
    fn stored_secret(&self) -> AccountResult<String> {
        match self.store.load() {
            Ok(Some(session)) if !session.secret.is_empty() => Ok(session.secret),
            Ok(_) => Err(AccountError::no_session()),
            Err(err) => {
                if let Err(clear_err) = self.store.clear() {
                    tracing::warn!(
                        path = %self.store.path().display(),
                        "failed to remove unreadable session: {clear_err:#}"
                    );
                }
                Err(AccountError::new(
                    AccountErrorKind::NoSession,
                    format!("No session: {err:#}"),
                ))
            }
        }
    }

    async fn delete_current_session(&self, secret: &str) -> AccountResult<()> {
        let response = self
            .request(Method::DELETE, "account/sessions/current", Some(secret))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountService for AppwriteAccount {
    async fn get_current_user(&self) -> AccountResult<UserProfile> {
        let secret = self.stored_secret()?;
        let response = self
            .request(Method::GET, "account", Some(&secret))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let account: AccountResponse = read_json(response).await?;
        Ok(account.into_profile())
    }

    async fn terminate_current_session(&self) -> AccountResult<()> {
        let secret = self.stored_secret()?;
        let outcome = self.delete_current_session(&secret).await;

        // The local credential goes away whatever the server said.
        if let Err(err) = self.store.clear() {
            tracing::warn!(
                path = %self.store.path().display(),
                "failed to remove stored session: {err:#}"
            );
        }
        outcome
    }
}

/// Shape of `GET /account`.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    /// Free-form user preferences; may be `{}` or `[]` when empty.
    #[serde(default)]
    prefs: Value,
}

impl AccountResponse {
    fn into_profile(self) -> UserProfile {
        let pref = |key: &str| {
            self.prefs
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        UserProfile {
            address_home: pref("addressHome"),
            address_work: pref("addressWork"),
            avatar_url: pref("avatarUrl"),
            phone: self.phone.filter(|p| !p.is_empty()),
            name: self.name,
            email: self.email,
        }
    }
}

/// Shape of `POST /account/sessions/email`.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default)]
    secret: String,
}

async fn ensure_success(response: Response) -> AccountResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AccountError::http_status(status.as_u16(), &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> AccountResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|err| AccountError::parse(format!("Malformed account response: {err}")))
}

/// Extracts the `a_session_<project>` cookie value, if set.
fn session_cookie(headers: &HeaderMap, project: &str) -> Option<String> {
    let prefix = format!("a_session_{project}=");
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find_map(|pair| pair.trim().strip_prefix(&prefix).map(str::to_string))
        .filter(|value| !value.is_empty())
}
