//! Persistence adapter: two durable collections (notes, folders) and one
//! scalar (theme mode) in browser localStorage, under fixed keys.
//!
//! The adapter serializes blindly and performs no validation; callers own
//! the semantics of what they store. On non-wasm targets (native test runs)
//! the same API is backed by a thread-local map so the store's
//! persist-on-commit behavior can be asserted from plain `#[test]`s.

use crate::models::{Folder, Note, ThemeMode};
use serde::{Deserialize, Serialize};

pub(crate) const NOTES_KEY: &str = "notepad-notes";
pub(crate) const FOLDERS_KEY: &str = "notepad-folders";
pub(crate) const THEME_KEY: &str = "notepad-theme";

#[cfg(target_arch = "wasm32")]
fn raw_get(key: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(key).ok().flatten())
}

#[cfg(target_arch = "wasm32")]
fn raw_set(key: &str, value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        if storage.set_item(key, value).is_err() {
            // Quota exhaustion or private-mode restrictions. The in-memory
            // state stays authoritative for this session; only durability
            // is lost, so say so instead of failing the mutation.
            leptos::logging::warn!("localStorage write failed for key {key}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    thread_local! {
        static MAP: RefCell<BTreeMap<String, String>> = RefCell::new(BTreeMap::new());
    }

    pub(super) fn raw_get(key: &str) -> Option<String> {
        MAP.with(|m| m.borrow().get(key).cloned())
    }

    pub(super) fn raw_set(key: &str, value: &str) {
        MAP.with(|m| {
            m.borrow_mut().insert(key.to_string(), value.to_string());
        });
    }

    pub(super) fn clear() {
        MAP.with(|m| m.borrow_mut().clear());
    }
}

#[cfg(not(target_arch = "wasm32"))]
use native::{raw_get, raw_set};

/// Wipe the backing map between native tests. Each test thread already has
/// its own map; this is for tests that build several stores on one thread.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn clear_for_tests() {
    native::clear();
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = raw_get(key)?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        raw_set(key, &json);
    }
}

// Typed surface consumed by the store. A blob that fails to deserialize is
// reported as absent, which the store treats the same as a first run.

pub(crate) fn load_notes() -> Option<Vec<Note>> {
    load_json_from_storage(NOTES_KEY)
}

pub(crate) fn save_notes(notes: &[Note]) {
    save_json_to_storage(NOTES_KEY, &notes);
}

pub(crate) fn load_folders() -> Option<Vec<Folder>> {
    load_json_from_storage(FOLDERS_KEY)
}

pub(crate) fn save_folders(folders: &[Folder]) {
    save_json_to_storage(FOLDERS_KEY, &folders);
}

/// The theme scalar is stored as its bare name, not JSON. Unknown values
/// (or none at all) leave the caller on the default.
pub(crate) fn load_theme_mode() -> Option<ThemeMode> {
    raw_get(THEME_KEY)?.parse().ok()
}

pub(crate) fn save_theme_mode(mode: ThemeMode) {
    raw_set(THEME_KEY, &mode.to_string());
}
