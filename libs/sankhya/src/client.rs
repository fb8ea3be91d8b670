use std::time::Duration;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::dataset::{LoadRecordsRequest, LoadRecordsResponse, SaveRequest, SAVE_SERVICE};
use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.sankhya.com.br";

const LOAD_RECORDS_SERVICE: &str = "CRUDServiceProvider.loadRecords";
const GATEWAY_SEGMENTS: [&str; 4] = ["gateway", "v1", "mge", "service.sbr"];

const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Service-account credentials, sent as headers on the login call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub appkey: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub credentials: Credentials,
    /// Timeout for the login call.
    pub login_timeout: Duration,
    /// Timeout for data calls; longer than login.
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Authenticated client for the Sankhya gateway.
///
/// Owns the cached bearer token: absent at start, filled by the first call,
/// cleared whenever the gateway answers 401/403 or a login fails. There is
/// no expiry timer and no mutual exclusion around a cold-cache login; two
/// concurrent callers racing on an empty cache may both log in, which costs
/// a duplicate call but nothing else.
pub struct Client {
    http: reqwest::Client,
    config: Config,
    token: Mutex<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "bearerToken")]
    bearer_token: Option<String>,
    token: Option<String>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    /// Query records by criteria via `CRUDServiceProvider.loadRecords`.
    pub async fn load_records(
        &self,
        request: &LoadRecordsRequest,
    ) -> Result<LoadRecordsResponse, Error> {
        let url = self.service_url(LOAD_RECORDS_SERVICE)?;
        self.post_authenticated(url, request).await
    }

    /// Insert or update records via `DatasetSP.save`. The gateway's response
    /// body is checked for well-formedness but otherwise unused.
    pub async fn save(&self, request: &SaveRequest) -> Result<(), Error> {
        let url = self.service_url(SAVE_SERVICE)?;
        let _: serde_json::Value = self.post_authenticated(url, request).await?;
        Ok(())
    }

    /// Drop the cached token; the next call logs in again.
    pub fn invalidate_token(&self) {
        *self.token.lock() = None;
    }

    /// POST `body` with a valid bearer token and JSON content type attached.
    /// No retry happens here: on 401/403 the token cache is cleared and the
    /// caller re-invokes the whole operation.
    #[instrument(name = "sankhya.request", skip_all, fields(url = %url))]
    async fn post_authenticated<B, T>(&self, url: Url, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer_token().await?;

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(&token)
            .timeout(self.config.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::communication(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(%status, "gateway rejected the cached token");
            self.invalidate_token();
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            return Err(Error::communication(format!("{url} answered {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::communication(format!("malformed response from {url}: {e}")))
    }

    /// Cached token, or a fresh login. The lock is only held for the
    /// read/store, never across the login call.
    async fn bearer_token(&self) -> Result<String, Error> {
        if let Some(token) = self.token.lock().clone() {
            return Ok(token);
        }

        let token = self.login().await?;
        *self.token.lock() = Some(token.clone());
        Ok(token)
    }

    #[instrument(name = "sankhya.login", skip(self))]
    async fn login(&self) -> Result<String, Error> {
        debug!("logging in to the gateway");
        let credentials = &self.config.credentials;
        let url = self.endpoint(&["login"])?;

        let result = self
            .http
            .post(url)
            .header("token", &credentials.token)
            .header("appkey", &credentials.appkey)
            .header("username", &credentials.username)
            .header("password", &credentials.password)
            .timeout(self.config.login_timeout)
            .json(&serde_json::json!({}))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.login_failed(format!("login request failed: {e}"))),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.login_failed(format!("login answered {status}")));
        }

        let body: LoginResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => return Err(self.login_failed(format!("malformed login response: {e}"))),
        };

        body.bearer_token
            .or(body.token)
            .ok_or_else(|| self.login_failed("token not found in login response".to_string()))
    }

    fn login_failed(&self, message: String) -> Error {
        self.invalidate_token();
        Error::authentication(message)
    }

    fn service_url(&self, service: &str) -> Result<Url, Error> {
        let mut url = self.endpoint(&GATEWAY_SEGMENTS)?;
        url.query_pairs_mut()
            .append_pair("serviceName", service)
            .append_pair("outputType", "json");
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::communication("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
