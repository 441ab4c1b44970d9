use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,

    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(optional)] autofocus: bool,

    // Wired by hand instead of `bind:value` so the signal stays the single
    // source of truth while a dialog resets it.
    #[prop(into)] bind_value: RwSignal<String>,

    /// Fired on Enter, e.g. to submit the surrounding dialog.
    #[prop(into, optional)] on_enter: Option<Callback<()>>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "flex h-9 w-full min-w-0 rounded-md border border-border bg-background px-3 py-1 text-sm outline-none transition-colors placeholder:text-muted-foreground",
        "focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/40 disabled:cursor-not-allowed disabled:opacity-50 aria-invalid:border-destructive",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                bind_value.set(input.value());
            }
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            if let Some(cb) = on_enter {
                ev.prevent_default();
                cb.run(());
            }
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            disabled=move || disabled.get()
            autofocus=autofocus
            prop:value=move || bind_value.get()
            on:input=on_input
            on:keydown=on_keydown
            node_ref=node_ref
        />
    }
    .into_any()
}
