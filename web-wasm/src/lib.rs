//! Reunion Site (Leptos + WASM)

mod api;
mod app;
mod auth;
mod components;
mod logger;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    leptos::mount::mount_to_body(app::App);
}
