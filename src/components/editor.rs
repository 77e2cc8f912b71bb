use crate::components::toolbar::{apply_format, MarkdownFormat, MarkdownToolbar};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::markdown::markdown_to_html;
use crate::models::{Note, NotePatch};
use crate::store::{NoteStore, StoreContext};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Value the folder `<select>` uses for "no folder".
const ROOT_SENTINEL: &str = "root";

#[component]
pub fn Editor() -> impl IntoView {
    let store = expect_context::<StoreContext>().0;

    // Key the pane on the *resolved* active note id. Edits keep the id
    // stable so the memo dedupes and the inputs below are not rebuilt
    // mid-keystroke; switching or deleting notes swaps the whole pane.
    let active_key = Memo::new(move |_| {
        let id = store.active_note_id.get()?;
        store
            .notes
            .with(|notes| notes.iter().find(|n| n.id == id).map(|n| n.id.clone()))
    });

    view! {
        <main class="flex min-w-0 flex-1 flex-col">
            {move || {
                let note = active_key.get().and_then(|id| {
                    store
                        .notes
                        .with_untracked(|notes| notes.iter().find(|n| n.id == id).cloned())
                });
                match note {
                    Some(note) => note_pane(store, note).into_any(),
                    None => view! {
                        <div class="flex flex-1 items-center justify-center">
                            <p class="text-muted-foreground">
                                "Select a note or create a new one to get started"
                            </p>
                        </div>
                    }
                    .into_any(),
                }
            }}
        </main>
    }
}

fn note_pane(store: NoteStore, note: Note) -> impl IntoView {
    let note_id = StoredValue::new(note.id.clone());
    let show_preview: RwSignal<bool> = RwSignal::new(false);
    let textarea_ref: NodeRef<html::Textarea> = NodeRef::new();

    let on_title_input = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        store.update_note(&note_id.get_value(), NotePatch::title(input.value()));
    };

    let on_content_input = move |ev: web_sys::Event| {
        let Some(textarea) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        else {
            return;
        };
        store.update_note(&note_id.get_value(), NotePatch::content(textarea.value()));
    };

    let on_folder_change = move |ev: web_sys::Event| {
        let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };
        let value = select.value();
        let folder_id = (value != ROOT_SENTINEL).then_some(value);
        store.move_note_to_folder(&note_id.get_value(), folder_id);
    };

    let on_format = Callback::new(move |format: MarkdownFormat| {
        let Some(textarea) = textarea_ref.get_untracked() else {
            return;
        };
        let start = textarea.selection_start().ok().flatten().unwrap_or(0) as usize;
        let end = textarea
            .selection_end()
            .ok()
            .flatten()
            .unwrap_or(start as u32) as usize;

        let (new_content, cursor) = apply_format(&textarea.value(), start, end, format);
        textarea.set_value(&new_content);
        let _ = textarea.set_selection_range(cursor as u32, cursor as u32);
        let _ = textarea.focus();
        store.update_note(&note_id.get_value(), NotePatch::content(new_content));
    });

    // The folder picker re-renders from the live enumeration so a move made
    // elsewhere (drag-and-drop in the sidebar) shows up immediately.
    let folder_picker = move || {
        let current = store
            .notes
            .with(|notes| {
                notes
                    .iter()
                    .find(|n| n.id == note_id.get_value())
                    .and_then(|n| n.folder_id.clone())
            })
            .unwrap_or_else(|| ROOT_SENTINEL.to_string());

        let root_selected = current == ROOT_SENTINEL;
        let mut options = vec![view! {
            <option value=ROOT_SENTINEL selected=root_selected>"Root"</option>
        }
        .into_any()];
        options.extend(store.folder_options().into_iter().map(|option| {
            let indent = "\u{a0}".repeat(option.depth * 4);
            let selected = current == option.id;
            view! {
                <option value=option.id selected=selected>
                    {format!("{indent}{}", option.name)}
                </option>
            }
            .into_any()
        }));
        options
    };

    view! {
        <div class="flex min-h-0 flex-1 flex-col">
            <div class="flex flex-wrap items-center justify-between gap-2 border-b border-border bg-card px-4 py-3">
                <div class="flex flex-wrap items-center gap-2">
                    <input
                        class="h-8 rounded-md border border-input bg-transparent px-3 text-sm outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50"
                        placeholder="Note title"
                        prop:value=note.title.clone()
                        on:input=on_title_input
                    />
                    <label class="flex items-center gap-1 text-xs text-muted-foreground">
                        "📂 Folder"
                        <select
                            class="h-8 min-w-40 rounded-md border border-input bg-card px-2 text-sm outline-none"
                            on:change=on_folder_change
                        >
                            {folder_picker}
                        </select>
                    </label>
                </div>

                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| show_preview.update(|p| *p = !*p)
                >
                    {move || if show_preview.get() { "✏ Edit" } else { "👁 Preview" }}
                </Button>
            </div>

            <MarkdownToolbar on_format=on_format />

            <div class="min-h-0 flex-1 overflow-auto p-4">
                <Show
                    when=move || show_preview.get()
                    fallback=move || {
                        // Uncontrolled while mounted; seeded with whatever
                        // the note holds right now.
                        let initial = store.notes.with_untracked(|notes| {
                            notes
                                .iter()
                                .find(|n| n.id == note_id.get_value())
                                .map(|n| n.content.clone())
                                .unwrap_or_default()
                        });
                        view! {
                            <textarea
                                class="h-full w-full resize-none bg-transparent text-sm leading-relaxed outline-none"
                                placeholder="Start writing your note..."
                                prop:value=initial
                                on:input=on_content_input
                                node_ref=textarea_ref
                            />
                        }
                    }
                >
                    <div
                        class="markdown-preview"
                        inner_html=move || {
                            store
                                .notes
                                .with(|notes| {
                                    notes
                                        .iter()
                                        .find(|n| n.id == note_id.get_value())
                                        .map(|n| markdown_to_html(&n.content))
                                })
                                .unwrap_or_default()
                        }
                    />
                </Show>
            </div>
        </div>
    }
}
