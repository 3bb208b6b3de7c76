use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::core::errors::{AdtrailError, Result};
use crate::core::models::credentials::Credentials;
use crate::core::models::filter::FilterState;
use crate::core::models::log_stats::LogStats;
use crate::core::models::raw_log::RawLogRecord;
use crate::core::traits::log_transport::LogTransport;

/// Format the backend expects for `fechaDesde`/`fechaHasta`.
const QUERY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Longest slice of a non-JSON error body quoted back to the user.
const MAX_ERROR_BODY: usize = 200;

/// Build a reqwest client with the given timeout.
fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("adtrail/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AdtrailError::InvalidConfig {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// `LogTransport` over the backend's `/logging` REST resource.
///
/// Each call spins up a current-thread runtime, sends exactly one
/// request and blocks until the body is read.
pub struct HttpLogTransport {
    base_url: Url,
    credentials: Credentials,
    timeout: Duration,
}

impl HttpLogTransport {
    /// Create a transport rooted at `base_url` (e.g. `http://host:8080/api`).
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| AdtrailError::InvalidConfig {
            detail: format!("Invalid API URL '{base_url}': {e}"),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(AdtrailError::InvalidConfig {
                detail: format!("API URL must be an http(s) URL, got '{base_url}'"),
            });
        }
        Ok(Self {
            base_url,
            credentials,
            timeout,
        })
    }

    /// Whether requests will carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        !self.credentials.is_anonymous()
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdtrailError::InvalidConfig {
                detail: format!("API URL cannot take a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and return the body of a 2xx response.
    fn call(&self, method: Method, url: Url, query: &[(&str, String)]) -> Result<String> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AdtrailError::Network {
                url: url.to_string(),
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        rt.block_on(async {
            let client = build_client(self.timeout)?;
            let mut request = client
                .request(method.clone(), url.clone())
                .header(ACCEPT, "application/json");
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(token) = self.credentials.token() {
                request = request.bearer_auth(token);
            }

            tracing::debug!(%method, %url, params = query.len(), "sending audit API request");

            let resp = request.send().await.map_err(|e| AdtrailError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

            let status = resp.status();
            let body = resp.text().await.map_err(|e| AdtrailError::Network {
                url: url.to_string(),
                reason: format!("Failed to read response body: {e}"),
            })?;

            tracing::debug!(status = status.as_u16(), bytes = body.len(), "audit API responded");

            if !status.is_success() {
                return Err(AdtrailError::Transport {
                    status: status.as_u16(),
                    message: error_message(status, &body),
                });
            }
            Ok(body)
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let body = self.call(Method::GET, url, query)?;
        serde_json::from_str(&body).map_err(|e| AdtrailError::InvalidResponse {
            detail: format!("Failed to parse response: {e}"),
        })
    }

    /// GET a list of records. An empty body is an empty list.
    fn get_records(&self, url: Url, query: &[(&str, String)]) -> Result<Vec<RawLogRecord>> {
        let body = self.call(Method::GET, url, query)?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|e| AdtrailError::InvalidResponse {
            detail: format!("Failed to parse log records: {e}"),
        })
    }
}

impl LogTransport for HttpLogTransport {
    fn fetch_logs(&self, filter: &FilterState) -> Result<Vec<RawLogRecord>> {
        let url = self.endpoint(&["logging"])?;
        self.get_records(url, &query_params(filter))
    }

    fn fetch_logs_by_entity(&self, entity_id: &str) -> Result<Vec<RawLogRecord>> {
        let url = self.endpoint(&["logging", "entidad", entity_id])?;
        self.get_records(url, &[])
    }

    fn fetch_logs_by_user(&self, user: &str) -> Result<Vec<RawLogRecord>> {
        let url = self.endpoint(&["logging", "usuario", user])?;
        self.get_records(url, &[])
    }

    fn fetch_recent_logs(&self, limit: usize) -> Result<Vec<RawLogRecord>> {
        let url = self.endpoint(&["logging", "recientes"])?;
        self.get_records(url, &[("limite", limit.to_string())])
    }

    fn fetch_stats(&self) -> Result<LogStats> {
        let url = self.endpoint(&["logging", "estadisticas"])?;
        self.get_json(url, &[])
    }

    fn delete_all_logs(&self) -> Result<()> {
        let url = self.endpoint(&["logging"])?;
        self.call(Method::DELETE, url, &[]).map(|_| ())
    }
}

/// Server-side query parameters for `GET /logging`.
///
/// The category has no server-side counterpart and is applied locally.
fn query_params(filter: &FilterState) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(user) = filter.user() {
        params.push(("usuario", user.to_string()));
    }
    if let Some(role) = filter.role() {
        params.push(("rol", role.to_string()));
    }
    if let Some(action) = filter.action() {
        params.push(("accion", action.to_string()));
    }
    if let Some(entity) = filter.entity() {
        params.push(("entidad", entity.to_string()));
    }
    if let Some(id) = filter.entity_id() {
        params.push(("entidadId", id.to_string()));
    }
    if let Some(from) = filter.date_from {
        params.push(("fechaDesde", from.format(QUERY_DATE_FORMAT).to_string()));
    }
    if let Some(to) = filter.date_to {
        params.push(("fechaHasta", to.format(QUERY_DATE_FORMAT).to_string()));
    }
    params
}

/// Best human-readable message for a failed response: the backend's
/// `message` (or `error`) field, else the start of the body, else the
/// status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
        && let Some(msg) = ["message", "error"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
    {
        return msg.to_string();
    }
    if !trimmed.is_empty() {
        return trimmed.chars().take(MAX_ERROR_BODY).collect();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
