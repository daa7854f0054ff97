//! # marketplace-client
//!
//! Leptos + WASM client for a local-services marketplace, where customers post
//! jobs and workers offer their skills.
//!
//! This crate contains the phone/OTP login flow, persisted session and
//! account-type state, the voice-input adapter, the REST gateway, and the
//! route-level pages that host them. Domain logic is plain Rust and runs
//! natively under test; browser bindings are behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod flow;
pub mod net;
pub mod pages;
pub mod state;
pub mod store;
pub mod util;
pub mod voice;

#[cfg(test)]
mod test_support;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
