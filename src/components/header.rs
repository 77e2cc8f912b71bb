use crate::archive;
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::models::ThemeMode;
use crate::store::StoreContext;
use crate::util::{backup_filename, picked_file_bytes, trigger_download};
use icons::X;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Header() -> impl IntoView {
    let store = expect_context::<StoreContext>().0;

    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let on_export = move |_| {
        error.set(None);
        notice.set(None);

        let notes = store.notes.get_untracked();
        if notes.is_empty() {
            notice.set(Some("No notes to download".to_string()));
            return;
        }

        match archive::export_archive(&notes) {
            Ok(bytes) => trigger_download(&backup_filename(), &bytes),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let on_pick_archive = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_import = move |_ev: web_sys::Event| {
        error.set(None);
        notice.set(None);

        let Some(input) = file_input.get_untracked() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        spawn_local(async move {
            match picked_file_bytes(&file).await {
                Ok(bytes) => match archive::parse_archive(&bytes) {
                    Ok(notes) => {
                        // The collection may have changed while the dialog
                        // was up; whatever is current gets overwritten.
                        let confirmed = window()
                            .confirm_with_message(
                                "This will replace all your current notes. Continue?",
                            )
                            .unwrap_or(false);
                        if confirmed {
                            store.replace_all_notes(notes);
                            notice.set(Some("Notes restored successfully!".to_string()));
                        }
                    }
                    Err(e) => error.set(Some(e.to_string())),
                },
                Err(e) => error.set(Some(format!("Error reading ZIP file: {e}"))),
            }
            // Reset so picking the same file again re-fires the change event.
            input.set_value("");
        });
    };

    let theme_title = move || format!("Switch to {} mode", store.theme.get().toggled());

    view! {
        <header class="border-b border-border bg-card">
            <div class="flex items-center justify-between px-4 py-2">
                <div class="flex items-center gap-2">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Toggle sidebar"
                        on:click=move |_| store.toggle_sidebar()
                    >
                        "☰"
                    </Button>
                    <h1 class="text-sm font-semibold">"📝 Notepad Local"</h1>
                </div>

                <div class="flex items-center gap-2">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:title="Download all notes as ZIP"
                        on:click=on_export
                    >
                        "⬇ Export"
                    </Button>

                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:title="Upload ZIP to restore notes"
                        on:click=on_pick_archive
                    >
                        "⬆ Import"
                    </Button>
                    <input
                        type="file"
                        accept=".zip"
                        class="hidden"
                        node_ref=file_input
                        on:change=on_import
                    />

                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title=theme_title
                        on:click=move |_| store.toggle_theme()
                    >
                        {move || match store.theme.get() {
                            ThemeMode::Dark => "☀",
                            ThemeMode::Light => "🌙",
                        }}
                    </Button>
                </div>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <div class="px-4 pb-2">
                            <Alert class="border-destructive/30 flex items-center justify-between gap-2">
                                <AlertDescription class="text-destructive">{e}</AlertDescription>
                                <button
                                    class="text-muted-foreground hover:text-foreground"
                                    title="Dismiss"
                                    on:click=move |_| error.set(None)
                                >
                                    <X />
                                </button>
                            </Alert>
                        </div>
                    })
                }}
            </Show>

            <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
                {move || {
                    notice.get().map(|msg| view! {
                        <div class="px-4 pb-2">
                            <Alert class="flex items-center justify-between gap-2">
                                <AlertDescription>{msg}</AlertDescription>
                                <button
                                    class="text-muted-foreground hover:text-foreground"
                                    title="Dismiss"
                                    on:click=move |_| notice.set(None)
                                >
                                    <X />
                                </button>
                            </Alert>
                        </div>
                    })
                }}
            </Show>
        </header>
    }
}
