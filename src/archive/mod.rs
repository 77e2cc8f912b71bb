//! Archive codec: the full note collection as a conventional ZIP — a
//! `notes.json` manifest (authoritative) plus one human-readable markdown
//! entry per note. Import only ever reads the manifest; the `.md` entries
//! exist for people, not for the program.

use crate::models::Note;
use std::io::{Cursor, Read, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub(crate) const MANIFEST_NAME: &str = "notes.json";

/// Import/export failures, worded for direct display to the user.
#[derive(Debug, Error)]
pub(crate) enum ArchiveError {
    #[error("Error reading ZIP file: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Error reading ZIP file: {0}")]
    Io(#[from] std::io::Error),

    #[error("No notes.json found in the ZIP file")]
    MissingManifest,

    #[error("Error creating ZIP file: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Error reading ZIP file: notes.json is not valid JSON")]
    ManifestJson(#[source] serde_json::Error),

    #[error("No valid notes found in the ZIP file")]
    NoValidNotes,
}

/// Markdown entry name for a note: 1-based position plus a
/// filesystem-safe slug of the title.
fn entry_name(index: usize, title: &str) -> String {
    format!("{}-{}.md", index + 1, slug::slugify(title))
}

/// Serialize the collection into ZIP bytes: the JSON manifest first, then
/// one `# title` + body markdown file per note.
pub(crate) fn export_archive(notes: &[Note]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = serde_json::to_string_pretty(notes).map_err(ArchiveError::Encode)?;
    writer.start_file(MANIFEST_NAME, options)?;
    writer.write_all(manifest.as_bytes())?;

    for (index, note) in notes.iter().enumerate() {
        writer.start_file(entry_name(index, &note.title), options)?;
        let body = format!("# {}\n\n{}", note.title, note.content);
        writer.write_all(body.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Decode an uploaded archive back into a note collection.
///
/// The manifest must exist and decode to a non-empty array; anything else
/// is an error and the caller's state stays untouched. Markdown entries are
/// ignored entirely.
pub(crate) fn parse_archive(bytes: &[u8]) -> Result<Vec<Note>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut manifest = String::new();
    match archive.by_name(MANIFEST_NAME) {
        Ok(mut file) => {
            file.read_to_string(&mut manifest)?;
        }
        Err(zip::result::ZipError::FileNotFound) => return Err(ArchiveError::MissingManifest),
        Err(e) => return Err(e.into()),
    }

    let notes: Vec<Note> =
        serde_json::from_str(&manifest).map_err(ArchiveError::ManifestJson)?;
    if notes.is_empty() {
        return Err(ArchiveError::NoValidNotes);
    }
    Ok(notes)
}
