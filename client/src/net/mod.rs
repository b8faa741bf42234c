//! Networking modules for the licensing gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the authenticated gateway every call goes through, `http`
//! holds the transport seam, and the remaining modules are thin endpoint
//! wrappers over the REST resources.

pub mod api;
pub mod applications;
pub mod citizens;
pub mod client;
pub mod error;
pub mod http;
pub mod licenses;
pub mod types;
