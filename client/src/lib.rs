//! # licensing-client
//!
//! Leptos + WASM front-end for the driver's-license administration office.
//!
//! Staff sign in, look up citizens, browse issued licenses, and move license
//! applications through review. All data lives behind the licensing REST
//! gateway; this crate holds the session store, the authenticated gateway
//! client, the route guard, and the pages.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
