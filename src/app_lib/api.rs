//! HTTP helpers for the JSON auth API with bearer handling and error
//! normalization. Feature clients use these helpers so every request gets the
//! same headers and every failure the same [`ApiError`] shape. No timeout is
//! set beyond the transport defaults and nothing is retried.

use super::{config::AppConfig, errors::ApiError};
use crate::{features::auth::state::Session, APP_USER_AGENT};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

/// Thin wrapper over `reqwest` bound to one base URL and one session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Builds a client for `config.api_base_url`.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the base URL is empty or not absolute, or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig, session: Session) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::Config {
                message: "API base URL is not configured.".to_string(),
            });
        }
        Url::parse(base_url).map_err(|err| ApiError::Config {
            message: format!("Invalid API base URL {base_url}: {err}"),
        })?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| ApiError::Config {
                message: format!("Failed to build HTTP client: {err}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET and returns the body as JSON.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`]; `fallback` is used when no better
    /// message exists.
    pub async fn get_value(&self, path: &str, fallback: &str) -> Result<Value, ApiError> {
        let response = send(self.request(Method::GET, path), fallback).await?;
        handle_value_response(response, fallback).await
    }

    /// Issues a JSON POST and returns the body as JSON.
    ///
    /// # Errors
    /// Returns the normalized [`ApiError`]; `fallback` is used when no better
    /// message exists.
    pub async fn post_value<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let response = send(self.request(Method::POST, path).json(body), fallback).await?;
        handle_value_response(response, fallback).await
    }

    /// Prepares a request with JSON content type and, when a token is stored,
    /// the bearer header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = build_url_with_base(&self.base_url, path);
        debug!("{method} {url}");

        let builder = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        match self.session.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Joins a base URL and a path with exactly one slash between them.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

async fn send(builder: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
    builder.send().await.map_err(|err| {
        error!("request failed before a response arrived: {err}");
        ApiError::from_transport(&err, fallback)
    })
}

/// Returns the parsed body on 2xx and the normalized error otherwise.
async fn handle_value_response(response: Response, fallback: &str) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| ApiError::from_transport(&err, fallback))?;

    if status.is_success() {
        Ok(parse_body(&body))
    } else {
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

/// Empty bodies become `null`; non-JSON bodies are kept as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
