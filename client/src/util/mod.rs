//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` holds the route table and guard decision; `format` holds display
//! helpers; `latest` drops stale fetch results. None of them touch the DOM,
//! so all are unit-tested natively.

pub mod auth;
pub mod format;
pub mod latest;
