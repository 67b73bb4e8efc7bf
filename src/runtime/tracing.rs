//! # Observability & Tracing
//!
//! Every lifecycle operation runs inside a span carrying the resource path
//! (`get{resource="/contacts" id=42}`), and the engine logs:
//!
//! - **debug**: write payloads and successful loads
//! - **info**: saved and deleted items
//! - **warn**: responses flagged as errors, failed refetches, precondition violations
//!
//! ```bash
//! RUST_LOG=info cargo run -- 42
//! RUST_LOG=rest_resource::framework=debug cargo run -- 42
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Verbosity is controlled by the `RUST_LOG` environment variable. The output is
/// compact and hides module paths; spans already name the resource.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
