//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the signed-in chrome and shared list widgets while
//! reading auth state from Leptos context providers.

pub mod citizen_editor;
pub mod layout;
pub mod pagination;
pub mod protected_route;
pub mod status_badge;
