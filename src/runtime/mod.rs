//! Runtime infrastructure: the HTTP transport, its configuration, and logging setup.
//!
//! # Main Components
//!
//! - [`HttpClient`] - `reqwest`-backed [`RestClient`](crate::framework::RestClient)
//! - [`ClientConfig`] - Base URL, timeout and user agent, optionally from the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod http;
pub mod tracing;

pub use self::config::*;
pub use self::http::*;
pub use self::tracing::*;
