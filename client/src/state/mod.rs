//! Client-side state: persisted session, auth transitions, and the
//! new-application wizard.

pub mod auth;
pub mod session;
pub mod wizard;

use crate::net::http::BrowserTransport;
use session::BrowserStorage;

/// Auth service wired to the browser transport and `localStorage`.
pub type AppAuth = auth::AuthService<BrowserTransport, BrowserStorage>;
