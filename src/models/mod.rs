use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A titled markdown document, the primary content unit.
///
/// Serialized field names stay camelCase so localStorage blobs and exported
/// archives keep the shape this app has always written.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    pub content: String,

    /// ISO-8601 UTC, millisecond precision. Set once at creation.
    pub created_at: String,

    /// Refreshed on every committed mutation of title, content or folder.
    pub updated_at: String,

    /// `None` means the note lives at the root.
    ///
    /// Older exports predate folders and omit the field entirely.
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// A named container forming a forest over notes and other folders.
///
/// `parent_id` is assigned at creation and never reassigned afterwards,
/// which is what keeps the forest acyclic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: String,
}

/// Partial update for [`Note`]: absent fields are left untouched.
///
/// `folder_id` is doubly optional — the outer `Option` is "was the field
/// supplied", the inner one is the root sentinel.
#[derive(Clone, Debug, Default)]
pub(crate) struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<Option<String>>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn folder(folder_id: Option<String>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }
}

/// One row of the flattened folder picker: a folder plus its nesting depth,
/// used purely for indentation in the consuming UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FolderOption {
    pub id: String,
    pub name: String,
    pub depth: usize,
}

/// Color scheme for the whole app. Persisted as its lowercase name;
/// anything else found in storage is ignored and the default wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}
