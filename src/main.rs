//! Fetches one contact and logs it.
//!
//! ```bash
//! REST_RESOURCE_BASE_URL=https://api.example.com/v2 RUST_LOG=info cargo run -- 42
//! ```

use rest_resource::clients::{Contact, InstanceClient};
use rest_resource::runtime::{setup_tracing, ClientConfig, HttpClient};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let id: i64 = std::env::args()
        .nth(1)
        .ok_or_else(|| "usage: rest-resource <contact-id>".to_string())?
        .parse()
        .map_err(|e| format!("invalid contact id: {e}"))?;

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, "Starting");
    let client = Arc::new(HttpClient::new(&config).map_err(|e| e.to_string())?);

    let mut contact = Contact::new(client);
    if contact.get(id).await.map_err(|e| e.to_string())? {
        info!(
            id,
            first_name = contact.first_name(),
            last_name = contact.last_name(),
            phone = contact.phone(),
            created_at = ?contact.created_at(),
            "Contact loaded"
        );
    } else {
        warn!(id, body = ?contact.record().ok(), "Contact could not be loaded");
    }

    Ok(())
}
