//! Generic instance-resource framework.
//!
//! This module provides the building blocks shared by every concrete resource:
//! the property bag, the wire date format, the request-parameter builder, the
//! transport contract and the lifecycle engine.
//!
//! # Main Components
//!
//! - [`ResourceRecord`] - Trait that resource records implement (path stem + serde)
//! - [`InstanceResource`] - Generic handle driving the CRUD lifecycle
//! - [`RestClient`] - Transport contract the engine talks to
//! - [`PropertyBag`] - Dynamic property map with typed accessors
//! - [`ResourceError`] / [`TransportError`] - Error types
//!
//! # Testing
//!
//! See [`mock`] module for a transport that answers from canned expectations.

pub mod date;
pub mod error;
pub mod instance;
pub mod mock;
pub mod params;
pub mod resource;
pub mod transport;
pub mod value;

pub use error::{ResourceError, TransportError};
pub use instance::{InstanceResource, InstanceState, WriteOutcome};
pub use params::{build_request_parameters, encode_form};
pub use resource::ResourceRecord;
pub use transport::{Method, Parameters, RestClient, RestResponse};
pub use value::{PropertyBag, PropertyMap};
