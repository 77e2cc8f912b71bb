//! Notepad Local — a single-user, browser-local markdown notes app.
//!
//! Notes and folders live in one signal-backed store and persist to
//! localStorage on every committed mutation; the whole collection can be
//! exported to (and restored from) a conventional ZIP archive. There is no
//! server and no account: the browser profile is the database.

mod app;
mod archive;
mod components;
mod markdown;
mod models;
mod storage;
mod store;
mod util;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::prelude::mount_to_body(app::App);
}
