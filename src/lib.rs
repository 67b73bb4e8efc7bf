//! # rest-resource
//!
//! > **Instance resources for REST SDKs.**
//!
//! An *instance resource* is a handle for one remote object identified by an
//! integer id and manipulated with GET/POST/PUT/DELETE. This crate provides the
//! property bag that mirrors the object's JSON body, typed accessors (including
//! the API's `yyyy-MM-dd'T'HH:mm:ssZ` timestamps) and a generic CRUD lifecycle on
//! top of any [`RestClient`](framework::RestClient).
//!
//! ## 🏗️ Design
//!
//! ### One engine, many resources
//! [`InstanceResource<R, C>`](framework::InstanceResource) implements the
//! lifecycle once. A resource only declares its path stem and typed record by
//! implementing [`ResourceRecord`](framework::ResourceRecord); handles such as
//! [`Contact`](clients::Contact) wrap the engine and get `get`,
//! `create_or_update` and `delete` from [`InstanceClient`](clients::InstanceClient).
//!
//! ### The server copy wins
//! After every successful write the local properties are discarded and the item
//! is fetched again, so the handle reflects server-side defaults and computed
//! fields.
//!
//! ### Three kinds of failure
//! - a response flagged as an error comes back as a value (`false`,
//!   [`WriteOutcome::WriteFailed`](framework::WriteOutcome));
//! - misuse (`get` on a loaded instance, `delete` without an id) is
//!   [`ResourceError::Unsupported`](framework::ResourceError), raised before any
//!   request is sent;
//! - transport and protocol failures are the remaining `ResourceError` variants.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: property bag, dates, parameter builder, transport contract, engine, mock.
//! - [`domain`]: typed records ([`ContactRecord`](domain::ContactRecord), [`TemplateRecord`](domain::TemplateRecord)).
//! - [`clients`]: resource handles ([`Contact`](clients::Contact), [`Template`](clients::Template)).
//! - [`runtime`]: `reqwest` transport, configuration and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```rust,no_run
//! use rest_resource::clients::{Contact, InstanceClient};
//! use rest_resource::runtime::{ClientConfig, HttpClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpClient::new(&ClientConfig::from_env()?)?);
//!
//! let mut contact = Contact::new(client);
//! contact.set_first_name("Alice");
//! contact.set_phone("+15550100");
//! let outcome = contact.create_or_update().await?;
//! assert!(outcome.is_saved());
//! println!("created contact {:?} at {:?}", contact.id()?, contact.created_at());
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod domain;
pub mod framework;
pub mod runtime;
