//! Typed records implementing the [`ResourceRecord`](crate::framework::ResourceRecord) trait.

pub mod contact;
pub mod template;

pub use contact::*;
pub use template::*;
