//! # HTTP Transport
//!
//! [`HttpClient`] implements [`RestClient`] with `reqwest`.
//!
//! - POST/PUT parameters are sent as an `application/x-www-form-urlencoded` body.
//! - GET/DELETE parameters are sent as the query string.
//! - JSON object bodies decode to the response map; empty, non-JSON and
//!   non-object bodies decode to an empty map.
//! - Status >= 400 sets the response's error flag. Nothing is retried.
//! - The body is never inspected for an error envelope: a 2xx response is
//!   never flagged. Transports for APIs that report errors inside a 2xx body
//!   mark them with [`RestResponse::with_error`].

use crate::framework::{Method, Parameters, RestClient, RestResponse, TransportError};
use crate::runtime::config::ClientConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// Transport talking to a real REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base has.
    pub fn url(&self, path: &str) -> Result<Url, TransportError> {
        if !path.starts_with('/') {
            return Err(TransportError::InvalidUrl(format!(
                "path must start with '/': {path}"
            )));
        }
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| TransportError::InvalidUrl(format!("{joined}: {e}")))
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        warn!(error = %e, "Response body is not JSON");
        Value::Null
    })
}

#[async_trait]
impl RestClient for HttpClient {
    #[instrument(skip(self, parameters))]
    async fn request(
        &self,
        path: &str,
        method: Method,
        parameters: Option<&Parameters>,
    ) -> Result<RestResponse, TransportError> {
        let url = self.url(path)?;
        let mut request = self
            .http
            .request(to_reqwest(method), url)
            .header(ACCEPT, "application/json");
        if let Some(parameters) = parameters {
            request = match method {
                Method::Post | Method::Put => request.form(parameters),
                Method::Get | Method::Delete => request.query(parameters),
            };
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        debug!(status, len = bytes.len(), "Response");

        Ok(RestResponse::from_json(status, decode_body(&bytes)))
    }
}
