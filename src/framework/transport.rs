//! # Transport Contract
//!
//! The lifecycle engine never talks HTTP itself. It drives a [`RestClient`], which
//! takes a path, a [`Method`] and optional flat parameters, and hands back a
//! [`RestResponse`]: the decoded JSON body plus an error flag.
//!
//! Two implementations ship with the crate:
//! - [`HttpClient`](crate::runtime::HttpClient) for real traffic (reqwest).
//! - [`MockTransport`](crate::framework::mock::MockTransport) for tests.

use crate::framework::error::{ResourceError, TransportError};
use crate::framework::value::{parse_id, PropertyMap};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Flat, form-encodable request parameters.
///
/// A `BTreeMap` keeps the encoded order stable, which makes request bodies
/// reproducible in logs and tests.
pub type Parameters = BTreeMap<String, String>;

/// The HTTP verbs used by the instance lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded response.
///
/// `is_error` is set for HTTP status >= 400, or explicitly by a transport that
/// detects an error envelope in an otherwise successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    status: u16,
    body: PropertyMap,
    error: bool,
}

impl RestResponse {
    /// Builds a response from a status code and a decoded body.
    ///
    /// Non-object bodies (arrays, scalars, empty) decode to an empty map. A
    /// top-level `id` sent as a string numeral is normalized to an integer.
    pub fn from_json(status: u16, body: Value) -> Self {
        let mut body = match body {
            Value::Object(map) => map,
            _ => PropertyMap::new(),
        };
        normalize_id(&mut body);
        Self {
            status,
            body,
            error: status >= 400,
        }
    }

    /// Overrides the error flag (envelope-level errors).
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The decoded body as a property map.
    pub fn to_map(&self) -> PropertyMap {
        self.body.clone()
    }

    pub fn into_map(self) -> PropertyMap {
        self.body
    }

    /// The `id` field of the body, if present.
    pub fn id(&self) -> Result<Option<i64>, ResourceError> {
        match self.body.get("id") {
            Some(value) => parse_id(value),
            None => Ok(None),
        }
    }
}

fn normalize_id(body: &mut PropertyMap) {
    if let Some(Value::String(text)) = body.get("id") {
        if let Ok(id) = text.trim().parse::<i64>() {
            body.insert("id".to_string(), Value::from(id));
        }
    }
}

/// The HTTP-speaking collaborator behind every instance resource.
///
/// Implementations must be safe to share between instances (`Send + Sync`);
/// timeouts and cancellation are their business, not the engine's.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Issues one request.
    ///
    /// `path` starts with `/`. `parameters` are form-encoded for POST/PUT and
    /// sent as the query string otherwise.
    async fn request(
        &self,
        path: &str,
        method: Method,
        parameters: Option<&Parameters>,
    ) -> Result<RestResponse, TransportError>;
}
