//! Type-safe resource handles wrapping [`InstanceResource`](crate::framework::InstanceResource).

mod accessors;
pub mod contact;
pub mod instance_client;
pub mod template;

pub use contact::*;
pub use instance_client::*;
pub use template::*;
