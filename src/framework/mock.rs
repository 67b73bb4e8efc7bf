//! # Mock Transport
//!
//! Utilities for testing instance resources without a server.
//!
//! [`MockTransport`] implements [`RestClient`] from a FIFO queue of expectations.
//! Every request pops the next expectation, checks that method and path match,
//! and answers with the canned response. All requests are recorded so tests can
//! assert on the exact parameters that were sent, or that nothing was sent.
//!
//! ```rust
//! use rest_resource::framework::mock::MockTransport;
//! use rest_resource::framework::Method;
//! use serde_json::json;
//!
//! let mock = MockTransport::new();
//! mock.expect(Method::Get, "/contacts/1").return_ok(json!({"id": 1}));
//! mock.expect(Method::Delete, "/contacts/1").return_status(404, json!({"message": "Not found"}));
//! ```
//!
//! Call [`MockTransport::verify`] at the end of a test to ensure every
//! expectation was consumed.

use crate::framework::error::TransportError;
use crate::framework::transport::{Method, Parameters, RestClient, RestResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub parameters: Option<Parameters>,
}

impl RecordedRequest {
    /// The parameters as form-encoded text (empty when none were sent).
    pub fn form(&self) -> String {
        self.parameters
            .as_ref()
            .map(crate::framework::params::encode_form)
            .unwrap_or_default()
    }
}

struct Expectation {
    method: Method,
    path: String,
    response: Result<RestResponse, String>,
}

/// A transport with expectation tracking for fluent testing.
#[derive(Default)]
pub struct MockTransport {
    expectations: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request; finish with one of the builder's `return_*` methods.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder<'_> {
        ExpectationBuilder {
            mock: self,
            method,
            path: path.into(),
        }
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn push(&self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

#[async_trait]
impl RestClient for MockTransport {
    async fn request(
        &self,
        path: &str,
        method: Method,
        parameters: Option<&Parameters>,
    ) -> Result<RestResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            parameters: parameters.cloned(),
        });

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == method && exp.path == path => {
                exp.response.map_err(TransportError::Mock)
            }
            Some(exp) => panic!(
                "Unexpected request: expected {} {}, got {} {}",
                exp.method, exp.path, method, path
            ),
            None => panic!("Unexpected request: {} {} (no expectations left)", method, path),
        }
    }
}

/// Builder for one expectation.
pub struct ExpectationBuilder<'a> {
    mock: &'a MockTransport,
    method: Method,
    path: String,
}

impl ExpectationBuilder<'_> {
    /// Answers with HTTP 200 and `body`.
    pub fn return_ok(self, body: Value) {
        self.return_status(200, body);
    }

    /// Answers with `status` and `body`; status >= 400 sets the error flag.
    pub fn return_status(self, status: u16, body: Value) {
        self.return_response(RestResponse::from_json(status, body));
    }

    /// Answers with a prepared response (e.g. an envelope-level error).
    pub fn return_response(self, response: RestResponse) {
        self.mock.push(Expectation {
            method: self.method,
            path: self.path,
            response: Ok(response),
        });
    }

    /// Fails the exchange at the transport level.
    pub fn return_transport_error(self, message: impl Into<String>) {
        self.mock.push(Expectation {
            method: self.method,
            path: self.path,
            response: Err(message.into()),
        });
    }
}
