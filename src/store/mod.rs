//! The note/folder store: canonical collections, the active-note selector,
//! sidebar visibility and theme, all as signals on one cheap-to-copy handle
//! provided through context. Every committed mutation writes the affected
//! collection back through the persistence adapter before returning.
//!
//! The store is the sole writer of its collections; components only read
//! snapshots and call the operations here.

use crate::models::{Folder, FolderOption, Note, NotePatch, ThemeMode};
use crate::storage;
use crate::util::now_iso;
use leptos::prelude::*;
use uuid::Uuid;

const WELCOME_TITLE: &str = "Welcome";
const WELCOME_CONTENT: &str = "# Welcome to Notepad Local\n\nStart writing your notes here!";

#[derive(Clone, Copy)]
pub(crate) struct NoteStore {
    pub notes: RwSignal<Vec<Note>>,
    pub folders: RwSignal<Vec<Folder>>,

    /// Note currently shown in the editor. Kept consistent with the
    /// collection by `delete_note`; `set_active_note_id` itself does not
    /// validate, so a stale id simply renders as "no active note".
    pub active_note_id: RwSignal<Option<String>>,

    /// Session-scoped; deliberately not persisted.
    pub sidebar_open: RwSignal<bool>,

    pub theme: RwSignal<ThemeMode>,
}

#[derive(Clone)]
pub(crate) struct StoreContext(pub NoteStore);

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl NoteStore {
    /// Load-or-seed. A persisted collection is adopted verbatim with its
    /// first note active; a blank slate gets the welcome note instead.
    pub fn new() -> Self {
        let (notes, active) = match storage::load_notes() {
            Some(saved) => {
                let active = saved.first().map(|n| n.id.clone());
                (saved, active)
            }
            None => {
                let now = now_iso();
                let welcome = Note {
                    id: new_id(),
                    title: WELCOME_TITLE.to_string(),
                    content: WELCOME_CONTENT.to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                    folder_id: None,
                };
                let active = Some(welcome.id.clone());
                storage::save_notes(std::slice::from_ref(&welcome));
                (vec![welcome], active)
            }
        };

        let folders = storage::load_folders().unwrap_or_default();
        let theme = storage::load_theme_mode().unwrap_or_default();

        Self {
            notes: RwSignal::new(notes),
            folders: RwSignal::new(folders),
            active_note_id: RwSignal::new(active),
            sidebar_open: RwSignal::new(true),
            theme: RwSignal::new(theme),
        }
    }

    fn persist_notes(&self) {
        self.notes.with_untracked(|notes| storage::save_notes(notes));
    }

    fn persist_folders(&self) {
        self.folders
            .with_untracked(|folders| storage::save_folders(folders));
    }

    /// Create an empty "Untitled" note, select it, and return it. Always
    /// succeeds. A non-null `folder_id` is trusted to reference an existing
    /// folder — callers only offer ids of folders that are on screen.
    pub fn create_note(&self, folder_id: Option<String>) -> Note {
        let now = now_iso();
        let note = Note {
            id: new_id(),
            title: "Untitled".to_string(),
            content: String::new(),
            created_at: now.clone(),
            updated_at: now,
            folder_id,
        };
        self.notes.update(|notes| notes.push(note.clone()));
        self.active_note_id.set(Some(note.id.clone()));
        self.persist_notes();
        note
    }

    /// Merge the supplied fields into the matching note and refresh its
    /// `updated_at`. An unknown id is a silent no-op, not an error.
    pub fn update_note(&self, id: &str, patch: NotePatch) {
        let exists = self.notes.with_untracked(|notes| notes.iter().any(|n| n.id == id));
        if !exists {
            return;
        }

        self.notes.update(|notes| {
            if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
                if let Some(title) = patch.title {
                    note.title = title;
                }
                if let Some(content) = patch.content {
                    note.content = content;
                }
                if let Some(folder_id) = patch.folder_id {
                    note.folder_id = folder_id;
                }
                note.updated_at = now_iso();
            }
        });
        self.persist_notes();
    }

    /// Remove the matching note. If it was active, the first remaining
    /// note (collection order) takes over, or the selection clears.
    pub fn delete_note(&self, id: &str) {
        let exists = self.notes.with_untracked(|notes| notes.iter().any(|n| n.id == id));
        if !exists {
            return;
        }

        self.notes.update(|notes| notes.retain(|n| n.id != id));
        if self.active_note_id.get_untracked().as_deref() == Some(id) {
            let next = self
                .notes
                .with_untracked(|notes| notes.first().map(|n| n.id.clone()));
            self.active_note_id.set(next);
        }
        self.persist_notes();
    }

    /// Append a new folder and return it.
    ///
    /// Precondition: `name` is already trimmed and non-empty — the input
    /// boundary enforces this, the store does not re-validate.
    pub fn create_folder(&self, name: &str, parent_id: Option<String>) -> Folder {
        let folder = Folder {
            id: new_id(),
            name: name.to_string(),
            parent_id,
            created_at: now_iso(),
        };
        self.folders.update(|folders| folders.push(folder.clone()));
        self.persist_folders();
        folder
    }

    /// Delete a folder, but only if nothing lives in it: no note points at
    /// it and no folder calls it parent. Returns whether it was removed;
    /// on refusal both collections are left untouched.
    pub fn delete_folder(&self, id: &str) -> bool {
        let has_notes = self
            .notes
            .with_untracked(|notes| notes.iter().any(|n| n.folder_id.as_deref() == Some(id)));
        let has_subfolders = self
            .folders
            .with_untracked(|folders| folders.iter().any(|f| f.parent_id.as_deref() == Some(id)));
        if has_notes || has_subfolders {
            return false;
        }

        self.folders.update(|folders| folders.retain(|f| f.id != id));
        self.persist_folders();
        true
    }

    /// Replace the folder's name. Siblings may share a name; an unknown id
    /// is a no-op.
    pub fn rename_folder(&self, id: &str, new_name: &str) {
        let exists = self
            .folders
            .with_untracked(|folders| folders.iter().any(|f| f.id == id));
        if !exists {
            return;
        }

        self.folders.update(|folders| {
            if let Some(folder) = folders.iter_mut().find(|f| f.id == id) {
                folder.name = new_name.to_string();
            }
        });
        self.persist_folders();
    }

    /// Move a note into a folder, or to the root with `None`. Same
    /// trust-the-caller contract as `create_note`.
    pub fn move_note_to_folder(&self, note_id: &str, folder_id: Option<String>) {
        self.update_note(note_id, NotePatch::folder(folder_id));
    }

    /// Direct selection setter; deliberately unvalidated (selecting an id
    /// that no longer exists yields "no active note" downstream).
    pub fn set_active_note_id(&self, id: Option<String>) {
        self.active_note_id.set(id);
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get_untracked().toggled();
        self.theme.set(next);
        storage::save_theme_mode(next);
    }

    /// Wholesale replacement of the note collection (bulk import). The
    /// incoming collection is adopted as-is: `folder_id` references are not
    /// re-validated and the active selection is left alone, so a selection
    /// that no longer resolves renders as "no active note".
    pub fn replace_all_notes(&self, new_notes: Vec<Note>) {
        self.notes.set(new_notes);
        self.persist_notes();
    }

    /// The note currently shown in the editor, if the selection resolves.
    pub fn active_note(&self) -> Option<Note> {
        let id = self.active_note_id.get()?;
        self.notes
            .with(|notes| notes.iter().find(|n| n.id == id).cloned())
    }

    /// Flattened, depth-first listing of the folder forest for the folder
    /// picker: every folder preceded by its ancestors, siblings sorted
    /// alphabetically (case-insensitive), annotated with nesting depth.
    /// The picker itself prepends its depth-0 "Root" sentinel.
    pub fn folder_options(&self) -> Vec<FolderOption> {
        self.folders.with(|folders| {
            let mut options = Vec::with_capacity(folders.len());
            push_level(folders, None, 1, &mut options);
            options
        })
    }
}

fn push_level(folders: &[Folder], parent: Option<&str>, depth: usize, out: &mut Vec<FolderOption>) {
    let mut level: Vec<&Folder> = folders
        .iter()
        .filter(|f| f.parent_id.as_deref() == parent)
        .collect();
    level.sort_by_cached_key(|f| f.name.to_lowercase());

    for folder in level {
        out.push(FolderOption {
            id: folder.id.clone(),
            name: folder.name.clone(),
            depth,
        });
        push_level(folders, Some(&folder.id), depth + 1, out);
    }
}

/// Subfolders of `parent` (or root-level folders for `None`), in display
/// order — alphabetical, case-insensitive. Used by the sidebar tree.
pub(crate) fn child_folders(folders: &[Folder], parent: Option<&str>) -> Vec<Folder> {
    let mut children: Vec<Folder> = folders
        .iter()
        .filter(|f| f.parent_id.as_deref() == parent)
        .cloned()
        .collect();
    children.sort_by_cached_key(|f| f.name.to_lowercase());
    children
}

/// Notes directly inside `folder` (or at the root for `None`), in
/// insertion order.
pub(crate) fn notes_in(notes: &[Note], folder: Option<&str>) -> Vec<Note> {
    notes
        .iter()
        .filter(|n| n.folder_id.as_deref() == folder)
        .cloned()
        .collect()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::storage::clear_for_tests;

    fn fresh_store() -> NoteStore {
        clear_for_tests();
        NoteStore::new()
    }

    #[test]
    fn test_first_run_seeds_the_welcome_note_and_selects_it() {
        let store = fresh_store();

        let notes = store.notes.get_untracked();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Welcome");
        assert_eq!(notes[0].folder_id, None);
        assert_eq!(store.active_note_id.get_untracked(), Some(notes[0].id.clone()));

        // The seed is durable, not just in-memory.
        assert_eq!(storage::load_notes(), Some(notes));
    }

    #[test]
    fn test_init_adopts_a_persisted_collection_verbatim() {
        let store = fresh_store();
        store.create_note(None);
        store.update_note(
            &store.notes.get_untracked()[1].id.clone(),
            NotePatch::title("Second"),
        );
        let persisted = store.notes.get_untracked();

        // A new store over the same storage sees the same collection with
        // the first note active.
        let reloaded = NoteStore::new();
        assert_eq!(reloaded.notes.get_untracked(), persisted);
        assert_eq!(
            reloaded.active_note_id.get_untracked(),
            Some(persisted[0].id.clone())
        );
    }

    #[test]
    fn test_create_note_appends_selects_and_persists() {
        let store = fresh_store();
        let created = store.create_note(None);

        assert_eq!(created.title, "Untitled");
        assert_eq!(created.content, "");
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.active_note_id.get_untracked(), Some(created.id.clone()));

        let notes = store.notes.get_untracked();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.last().map(|n| n.id.clone()), Some(created.id));
        assert_eq!(storage::load_notes(), Some(notes));
    }

    #[test]
    fn test_create_note_inside_a_folder() {
        let store = fresh_store();
        let folder = store.create_folder("Work", None);
        let created = store.create_note(Some(folder.id.clone()));
        assert_eq!(created.folder_id, Some(folder.id));
    }

    #[test]
    fn test_update_note_merges_supplied_fields_only() {
        let store = fresh_store();
        let created = store.create_note(None);

        store.update_note(&created.id, NotePatch::title("Plans"));
        let after = store.notes.get_untracked().pop().expect("note should exist");
        assert_eq!(after.title, "Plans");
        assert_eq!(after.content, created.content);
        assert_eq!(after.folder_id, created.folder_id);
        assert_eq!(after.created_at, created.created_at);
        assert!(after.updated_at >= created.updated_at);

        assert_eq!(storage::load_notes(), Some(store.notes.get_untracked()));
    }

    #[test]
    fn test_update_note_with_unknown_id_changes_nothing() {
        let store = fresh_store();
        let before = store.notes.get_untracked();
        store.update_note("no-such-id", NotePatch::title("ghost"));
        assert_eq!(store.notes.get_untracked(), before);
    }

    #[test]
    fn test_delete_note_reselects_the_first_remaining_note() {
        let store = fresh_store();
        let second = store.create_note(None);
        let first_id = store.notes.get_untracked()[0].id.clone();

        assert_eq!(store.active_note_id.get_untracked(), Some(second.id.clone()));
        store.delete_note(&second.id);
        assert_eq!(store.active_note_id.get_untracked(), Some(first_id));
    }

    #[test]
    fn test_deleting_the_last_note_clears_the_selection() {
        let store = fresh_store();
        let only = store.notes.get_untracked()[0].id.clone();

        store.delete_note(&only);
        assert_eq!(store.active_note_id.get_untracked(), None);
        assert!(store.notes.get_untracked().is_empty());
        // The empty collection is persisted; deleted notes must not come
        // back on reload.
        assert_eq!(storage::load_notes(), Some(vec![]));

        // And creating again restores a selection.
        let created = store.create_note(None);
        assert_eq!(store.active_note_id.get_untracked(), Some(created.id));
    }

    #[test]
    fn test_deleting_an_inactive_note_keeps_the_selection() {
        let store = fresh_store();
        let second = store.create_note(None);
        let first_id = store.notes.get_untracked()[0].id.clone();

        store.delete_note(&first_id);
        assert_eq!(store.active_note_id.get_untracked(), Some(second.id));
    }

    #[test]
    fn test_delete_note_with_unknown_id_is_a_no_op() {
        let store = fresh_store();
        let before = store.notes.get_untracked();
        store.delete_note("no-such-id");
        assert_eq!(store.notes.get_untracked(), before);
    }

    #[test]
    fn test_active_note_id_always_resolves_or_is_null() {
        let store = fresh_store();

        // Arbitrary create/delete churn.
        let a = store.create_note(None);
        let b = store.create_note(None);
        store.delete_note(&a.id);
        let c = store.create_note(None);
        store.delete_note(&c.id);
        store.delete_note(&b.id);

        for _ in 0..3 {
            match store.active_note_id.get_untracked() {
                Some(id) => assert!(store
                    .notes
                    .get_untracked()
                    .iter()
                    .any(|n| n.id == id)),
                None => assert!(store.notes.get_untracked().is_empty()),
            }
            store.delete_note(
                &store
                    .notes
                    .get_untracked()
                    .first()
                    .map(|n| n.id.clone())
                    .unwrap_or_default(),
            );
        }
    }

    #[test]
    fn test_folder_lifecycle_guard_scenario() {
        // The walkthrough from the product notes: a folder with a note in
        // it refuses deletion until the note moves out.
        let store = fresh_store();

        let work = store.create_folder("Work", None);
        let note = store.create_note(Some(work.id.clone()));
        assert_eq!(store.active_note_id.get_untracked(), Some(note.id.clone()));

        assert!(!store.delete_folder(&work.id));
        assert_eq!(store.folders.get_untracked().len(), 1);
        assert_eq!(store.notes.get_untracked().len(), 2);

        store.move_note_to_folder(&note.id, None);
        let moved = store
            .notes
            .get_untracked()
            .into_iter()
            .find(|n| n.id == note.id)
            .expect("note should exist");
        assert_eq!(moved.folder_id, None);

        assert!(store.delete_folder(&work.id));
        assert!(store.folders.get_untracked().is_empty());
        assert_eq!(storage::load_folders(), Some(vec![]));
    }

    #[test]
    fn test_delete_folder_refuses_while_subfolders_exist() {
        let store = fresh_store();
        let parent = store.create_folder("Parent", None);
        let child = store.create_folder("Child", Some(parent.id.clone()));

        assert!(!store.delete_folder(&parent.id));
        assert_eq!(store.folders.get_untracked().len(), 2);

        assert!(store.delete_folder(&child.id));
        assert!(store.delete_folder(&parent.id));
        assert!(store.folders.get_untracked().is_empty());
    }

    #[test]
    fn test_move_note_refreshes_updated_at() {
        let store = fresh_store();
        let folder = store.create_folder("Work", None);
        let note = store.create_note(None);

        store.move_note_to_folder(&note.id, Some(folder.id.clone()));
        let moved = store
            .notes
            .get_untracked()
            .into_iter()
            .find(|n| n.id == note.id)
            .expect("note should exist");
        assert_eq!(moved.folder_id, Some(folder.id));
        assert!(moved.updated_at >= note.updated_at);
    }

    #[test]
    fn test_rename_folder_allows_sibling_duplicates() {
        let store = fresh_store();
        let a = store.create_folder("Alpha", None);
        let _b = store.create_folder("Beta", None);

        store.rename_folder(&a.id, "Beta");
        let names: Vec<String> = store
            .folders
            .get_untracked()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Beta".to_string(), "Beta".to_string()]);
        assert_eq!(storage::load_folders(), Some(store.folders.get_untracked()));

        // Unknown id: nothing moves.
        store.rename_folder("no-such-id", "Gamma");
        assert_eq!(store.folders.get_untracked().len(), 2);
    }

    #[test]
    fn test_set_active_note_id_is_unvalidated() {
        let store = fresh_store();
        store.set_active_note_id(Some("no-such-id".to_string()));
        assert_eq!(
            store.active_note_id.get_untracked(),
            Some("no-such-id".to_string())
        );
        assert_eq!(store.active_note(), None);
    }

    #[test]
    fn test_toggle_sidebar_flips_the_flag() {
        let store = fresh_store();
        assert!(store.sidebar_open.get_untracked());
        store.toggle_sidebar();
        assert!(!store.sidebar_open.get_untracked());
    }

    #[test]
    fn test_toggle_theme_persists_the_new_mode() {
        let store = fresh_store();
        assert_eq!(store.theme.get_untracked(), ThemeMode::Dark);

        store.toggle_theme();
        assert_eq!(store.theme.get_untracked(), ThemeMode::Light);
        assert_eq!(storage::load_theme_mode(), Some(ThemeMode::Light));

        // A fresh store adopts the persisted mode.
        let reloaded = NoteStore::new();
        assert_eq!(reloaded.theme.get_untracked(), ThemeMode::Light);
    }

    #[test]
    fn test_replace_all_notes_adopts_the_collection_as_is() {
        let store = fresh_store();
        let stale_active = store.active_note_id.get_untracked();

        let imported = vec![Note {
            id: "imported".to_string(),
            title: "From backup".to_string(),
            content: "body".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
            // Import does not replace folders, so this may dangle; the
            // collection is adopted anyway.
            folder_id: Some("folder-from-another-machine".to_string()),
        }];
        store.replace_all_notes(imported.clone());

        assert_eq!(store.notes.get_untracked(), imported);
        assert_eq!(storage::load_notes(), Some(imported));
        // Selection is left alone; it now dangles and renders as
        // "no active note".
        assert_eq!(store.active_note_id.get_untracked(), stale_active);
        assert_eq!(store.active_note(), None);
    }

    #[test]
    fn test_folder_options_flatten_depth_first_and_alphabetically() {
        let store = fresh_store();
        let work = store.create_folder("work", None);
        let _archive = store.create_folder("Archive", None);
        let _reports = store.create_folder("Reports", Some(work.id.clone()));
        let _drafts = store.create_folder("drafts", Some(work.id.clone()));

        let options = store.folder_options();
        let listing: Vec<(String, usize)> =
            options.into_iter().map(|o| (o.name, o.depth)).collect();
        assert_eq!(
            listing,
            vec![
                ("Archive".to_string(), 1),
                ("work".to_string(), 1),
                ("drafts".to_string(), 2),
                ("Reports".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_parent_links_never_form_a_cycle() {
        // parent_id is only ever assigned at creation, so walking up from
        // any folder must terminate at the root.
        let store = fresh_store();
        let a = store.create_folder("a", None);
        let b = store.create_folder("b", Some(a.id.clone()));
        let _c = store.create_folder("c", Some(b.id.clone()));

        let folders = store.folders.get_untracked();
        for folder in &folders {
            let mut hops = 0;
            let mut current = folder.parent_id.clone();
            while let Some(id) = current {
                hops += 1;
                assert!(hops <= folders.len(), "cycle via parent links");
                current = folders
                    .iter()
                    .find(|f| f.id == id)
                    .and_then(|f| f.parent_id.clone());
            }
        }
    }

    #[test]
    fn test_child_folders_and_notes_in_display_order() {
        let store = fresh_store();
        let work = store.create_folder("work", None);
        let _archive = store.create_folder("Archive", None);
        let inbox = store.create_note(Some(work.id.clone()));
        let second = store.create_note(Some(work.id.clone()));

        let folders = store.folders.get_untracked();
        let roots = child_folders(&folders, None);
        assert_eq!(
            roots.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["Archive", "work"]
        );

        let notes = store.notes.get_untracked();
        let inside = notes_in(&notes, Some(&work.id));
        assert_eq!(
            inside.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec![inbox.id.as_str(), second.id.as_str()]
        );
    }
}
