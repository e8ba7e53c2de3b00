//! Named resource access for Maven index chunks.
//!
//! Index readers and writers address chunk files and properties by name
//! relative to a base location. This crate provides that lookup and the
//! byte streams behind it; it never interprets the bytes.
//!
//! # Handlers
//!
//! All handlers implement [`ResourceHandler`]; writable ones also implement
//! [`WritableResourceHandler`]:
//!
//! - [`PathResourceHandler`] -- a local directory (read/write)
//! - [`UriResourceHandler`] -- a base URI; `file:` URIs are readable
//! - [`InMemoryResourceHandler`] -- `HashMap`-backed, for tests and embedding
//!
//! A missing resource reads as `Ok(None)`. All other I/O errors are
//! propagated unchanged.

pub mod error;
pub mod memory;
pub mod path;
pub mod traits;
pub mod uri;

pub use error::{ResourceError, ResourceResult};
pub use memory::InMemoryResourceHandler;
pub use path::{PathResource, PathResourceHandler};
pub use traits::{Resource, ResourceHandler, WritableResource, WritableResourceHandler};
pub use uri::{UriResource, UriResourceHandler};
