use chrono::{SecondsFormat, Utc};
use wasm_bindgen::JsCast;

/// Current instant as an ISO-8601 UTC string with millisecond precision —
/// the exact shape `Date.prototype.toISOString` produces, so timestamps
/// written by any earlier build of this app compare and sort the same way.
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Download name for an exported archive, e.g. `notepad-backup-2024-06-01.zip`.
pub(crate) fn backup_filename() -> String {
    format!("notepad-backup-{}.zip", Utc::now().format("%Y-%m-%d"))
}

/// Date portion of a stored ISO timestamp, for compact sidebar display.
pub(crate) fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

/// Hand the given bytes to the browser as a file download: object URL on a
/// transient anchor element. Browser-only; outside a window this is a no-op.
pub(crate) fn trigger_download(filename: &str, bytes: &[u8]) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let bag = web_sys::BlobPropertyBag::new();
    bag.set_type("application/zip");

    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &bag) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

/// Read a picked [`web_sys::File`] fully into memory.
pub(crate) async fn picked_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "could not read the selected file".to_string())?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
