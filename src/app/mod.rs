use crate::components::{Editor, Header, Sidebar};
use crate::store::{NoteStore, StoreContext};
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let store = NoteStore::new();
    provide_context(StoreContext(store));

    // Keep the <body> class in step with the theme so the Tailwind
    // palette variables follow.
    Effect::new(move |_| {
        let mode = store.theme.get();
        if let Some(body) = document().body() {
            let _ = body.class_list().remove_2("light", "dark");
            let _ = body.class_list().add_1(&mode.to_string());
        }
    });

    // Ctrl/Cmd+B mirrors the header's sidebar toggle.
    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key() == "b" {
            ev.prevent_default();
            store.toggle_sidebar();
        }
    });

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=Workspace />
            </Routes>
        </Router>
    }
}

#[component]
fn Workspace() -> impl IntoView {
    view! {
        <div class="flex h-screen flex-col">
            <Header />
            <div class="flex min-h-0 flex-1">
                <Sidebar />
                <Editor />
            </div>
        </div>
    }
}
