use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::models::{Folder, Note};
use crate::store::{child_folders, notes_in, NoteStore, StoreContext};
use crate::util::date_part;
use icons::{ChevronDown, ChevronRight};
use leptos::prelude::*;
use std::collections::HashSet;
use wasm_bindgen::JsCast;

/// Everything the recursive tree needs, bundled so it can be copied into
/// every row's event handlers. All interaction state here is transient UI
/// state — it never reaches the store and dies with the gesture.
#[derive(Clone, Copy)]
struct TreeState {
    store: NoteStore,

    /// Folders the user collapsed; everything else renders expanded.
    collapsed: RwSignal<HashSet<String>>,

    /// Note currently being dragged, if any.
    dragging: RwSignal<Option<String>>,

    /// Folder currently hovered as a drop target.
    drag_over: RwSignal<Option<String>>,

    /// Folder whose name is being edited inline, plus the draft text.
    renaming: RwSignal<Option<String>>,
    rename_value: RwSignal<String>,

    /// `Some(parent)` while the create-folder dialog is open; the inner
    /// option is the parent folder (`None` = root).
    dialog_parent: RwSignal<Option<Option<String>>>,
    folder_name: RwSignal<String>,
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = expect_context::<StoreContext>().0;

    let state = TreeState {
        store,
        collapsed: RwSignal::new(HashSet::new()),
        dragging: RwSignal::new(None),
        drag_over: RwSignal::new(None),
        renaming: RwSignal::new(None),
        rename_value: RwSignal::new(String::new()),
        dialog_parent: RwSignal::new(None),
        folder_name: RwSignal::new(String::new()),
    };

    let create_folder_from_dialog = move || {
        let name = state.folder_name.get_untracked();
        let name = name.trim();
        // The store trusts its callers on this; the gate lives here.
        if name.is_empty() {
            return;
        }
        let parent = state.dialog_parent.get_untracked().flatten();
        store.create_folder(name, parent);
        state.dialog_parent.set(None);
        state.folder_name.set(String::new());
    };

    view! {
        <aside class=move || {
            if store.sidebar_open.get() {
                "flex w-72 shrink-0 flex-col border-r border-border bg-card"
            } else {
                "hidden"
            }
        }>
            <div class="flex items-center justify-between border-b border-border px-3 py-2">
                <h2 class="text-sm font-semibold">"Notes"</h2>
                <div class="flex items-center gap-1">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Create new folder"
                        on:click=move |_| {
                            state.folder_name.set(String::new());
                            state.dialog_parent.set(Some(None));
                        }
                    >
                        "📁+"
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Create new note"
                        on:click=move |_| {
                            store.create_note(None);
                        }
                    >
                        "➕"
                    </Button>
                </div>
            </div>

            // The list body doubles as the root drop target.
            <div
                class="min-h-0 flex-1 overflow-y-auto px-2 py-2"
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    // dragover fires per mouse move; only write on change.
                    if state.drag_over.get_untracked().is_some() {
                        state.drag_over.set(None);
                    }
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    if let Some(note_id) = state.dragging.get_untracked() {
                        store.move_note_to_folder(&note_id, None);
                    }
                    state.dragging.set(None);
                    state.drag_over.set(None);
                }
            >
                {move || {
                    let folders = store.folders.get();
                    let notes = store.notes.get();
                    let root_folders = child_folders(&folders, None);
                    let root_notes = notes_in(&notes, None);
                    view! {
                        <div class="flex flex-col gap-0.5">
                            {root_folders
                                .into_iter()
                                .map(|folder| folder_node(state, folder))
                                .collect_view()}
                            {root_notes
                                .into_iter()
                                .map(|note| note_row(state, note))
                                .collect_view()}
                        </div>
                    }
                }}
            </div>

            {move || {
                state.dialog_parent.get().map(|_| view! {
                    <div
                        class="fixed inset-0 z-50 flex items-center justify-center bg-black/50"
                        on:click=move |_| state.dialog_parent.set(None)
                    >
                        <div
                            class="w-80 rounded-lg border border-border bg-card p-4 shadow-lg"
                            on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                        >
                            <h3 class="mb-3 text-sm font-semibold">"Create New Folder"</h3>
                            // Keydown bubbles up from the input.
                            <div
                                class="flex flex-col gap-2"
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        create_folder_from_dialog();
                                    }
                                }
                            >
                                <Label html_for="folder-name" class="text-xs">"Folder Name"</Label>
                                <Input
                                    id="folder-name"
                                    placeholder="Folder Name"
                                    autofocus=true
                                    bind_value=state.folder_name
                                />
                            </div>
                            <div class="mt-4 flex justify-end gap-2">
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    on:click=move |_| state.dialog_parent.set(None)
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || state.folder_name.get().trim().is_empty()
                                    on:click=move |_| create_folder_from_dialog()
                                >
                                    "Create"
                                </Button>
                            </div>
                        </div>
                    </div>
                })
            }}
        </aside>
    }
}

/// One folder row plus, when expanded, its subtree: subfolders first, then
/// the folder's notes. Plain function instead of a component so it can
/// recurse through `AnyView`.
fn folder_node(state: TreeState, folder: Folder) -> AnyView {
    let store = state.store;
    let folder_id = StoredValue::new(folder.id.clone());

    let is_collapsed = state.collapsed.with(|c| c.contains(&folder.id));
    let is_drag_over = state.drag_over.with(|d| d.as_deref() == Some(folder.id.as_str()));
    let is_renaming = state.renaming.with(|r| r.as_deref() == Some(folder.id.as_str()));

    let row_class = if is_drag_over {
        "group flex items-center gap-1 rounded-md bg-primary/15 px-1.5 py-1 ring-1 ring-primary/40"
    } else {
        "group flex items-center gap-1 rounded-md px-1.5 py-1 hover:bg-accent/60"
    };

    let commit_rename = move || {
        // A cancelled edit (Escape) can still see a trailing blur; only
        // commit while this folder is the one being renamed.
        let still_renaming = state
            .renaming
            .with_untracked(|r| r.as_deref() == Some(folder_id.get_value().as_str()));
        if !still_renaming {
            return;
        }

        let value = state.rename_value.get_untracked();
        let value = value.trim().to_string();
        if !value.is_empty() {
            store.rename_folder(&folder_id.get_value(), &value);
        }
        state.renaming.set(None);
    };

    let children = if is_collapsed {
        None
    } else {
        let folders = store.folders.get();
        let notes = store.notes.get();
        let subfolders = child_folders(&folders, Some(&folder.id));
        let folder_notes = notes_in(&notes, Some(&folder.id));
        Some(view! {
            <div class="ml-3 flex flex-col gap-0.5 border-l border-border/60 pl-1">
                {subfolders
                    .into_iter()
                    .map(|sub| folder_node(state, sub))
                    .collect_view()}
                {folder_notes
                    .into_iter()
                    .map(|note| note_row(state, note))
                    .collect_view()}
            </div>
        })
    };

    let name_view = if is_renaming {
        view! {
            <input
                class="h-6 min-w-0 flex-1 rounded border border-input bg-transparent px-1 text-sm outline-none"
                autofocus=true
                prop:value=move || state.rename_value.get_untracked()
                on:input=move |ev: web_sys::Event| {
                    if let Some(input) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    {
                        state.rename_value.set(input.value());
                    }
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    match ev.key().as_str() {
                        "Enter" => commit_rename(),
                        "Escape" => state.renaming.set(None),
                        _ => {}
                    }
                }
                on:blur=move |_| commit_rename()
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            />
        }
        .into_any()
    } else {
        view! {
            <span class="min-w-0 flex-1 truncate text-sm">{folder.name.clone()}</span>
        }
        .into_any()
    };

    view! {
        <div>
            <div
                class=row_class
                on:click=move |_| {
                    state.collapsed.update(|c| {
                        let id = folder_id.get_value();
                        if !c.remove(&id) {
                            c.insert(id);
                        }
                    });
                }
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    let id = folder_id.get_value();
                    if state.drag_over.get_untracked().as_ref() != Some(&id) {
                        state.drag_over.set(Some(id));
                    }
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    if let Some(note_id) = state.dragging.get_untracked() {
                        store.move_note_to_folder(&note_id, Some(folder_id.get_value()));
                    }
                    state.dragging.set(None);
                    state.drag_over.set(None);
                }
            >
                <span class="text-muted-foreground">
                    {if is_collapsed {
                        view! { <ChevronRight class="size-3.5" /> }.into_any()
                    } else {
                        view! { <ChevronDown class="size-3.5" /> }.into_any()
                    }}
                </span>
                <span>"📁"</span>
                {name_view}
                <div class="hidden items-center gap-0.5 group-hover:flex">
                    <button
                        class="rounded px-1 text-xs hover:bg-accent"
                        title="Create subfolder"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            state.folder_name.set(String::new());
                            state.dialog_parent.set(Some(Some(folder_id.get_value())));
                        }
                    >
                        "➕"
                    </button>
                    <button
                        class="rounded px-1 text-xs hover:bg-accent"
                        title="Rename folder"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            state.rename_value.set(folder_id.with_value(|id| {
                                store
                                    .folders
                                    .with_untracked(|folders| {
                                        folders
                                            .iter()
                                            .find(|f| &f.id == id)
                                            .map(|f| f.name.clone())
                                            .unwrap_or_default()
                                    })
                            }));
                            state.renaming.set(Some(folder_id.get_value()));
                        }
                    >
                        "✏"
                    </button>
                    <button
                        class="rounded px-1 text-xs hover:bg-accent"
                        title="Delete folder"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            if !store.delete_folder(&folder_id.get_value()) {
                                let _ = window().alert_with_message(
                                    "Cannot delete folder: it contains notes or subfolders.",
                                );
                            }
                        }
                    >
                        "🗑"
                    </button>
                </div>
            </div>
            {children}
        </div>
    }
    .into_any()
}

fn note_row(state: TreeState, note: Note) -> AnyView {
    let store = state.store;
    let note_id = StoredValue::new(note.id.clone());

    let is_active = state
        .store
        .active_note_id
        .with(|active| active.as_deref() == Some(note.id.as_str()));
    let is_dragging = state.dragging.with(|d| d.as_deref() == Some(note.id.as_str()));

    let row_class = match (is_active, is_dragging) {
        (_, true) => "group flex cursor-pointer items-center gap-1.5 rounded-md px-1.5 py-1 opacity-50",
        (true, _) => "group flex cursor-pointer items-center gap-1.5 rounded-md bg-accent px-1.5 py-1",
        _ => "group flex cursor-pointer items-center gap-1.5 rounded-md px-1.5 py-1 hover:bg-accent/60",
    };

    let title = if note.title.is_empty() {
        "Untitled".to_string()
    } else {
        note.title.clone()
    };
    let date = date_part(&note.updated_at).to_string();

    view! {
        <div
            class=row_class
            draggable="true"
            on:click=move |_| store.set_active_note_id(Some(note_id.get_value()))
            on:dragstart=move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &note_id.get_value());
                    dt.set_drop_effect("move");
                }
                state.dragging.set(Some(note_id.get_value()));
            }
            on:dragend=move |_| {
                state.dragging.set(None);
                state.drag_over.set(None);
            }
        >
            <span>"📄"</span>
            <div class="min-w-0 flex-1">
                <div class="truncate text-sm">{title}</div>
                <div class="text-xs text-muted-foreground">{date}</div>
            </div>
            <button
                class="hidden rounded px-1 text-xs hover:bg-accent group-hover:block"
                title="Delete note"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    let confirmed = window()
                        .confirm_with_message("Are you sure you want to delete this note?")
                        .unwrap_or(false);
                    if confirmed {
                        store.delete_note(&note_id.get_value());
                    }
                }
            >
                "🗑"
            </button>
        </div>
    }
    .into_any()
}
