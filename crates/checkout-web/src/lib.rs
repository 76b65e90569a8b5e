//! Checkout Web Frontend
//!
//! Leptos-based WASM client that renders the PayPal buttons and the
//! completion and cancellation pages.

mod api;
mod app;
mod components;
mod pages;
mod paypal;

pub use api::HttpOrderApi;
pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
