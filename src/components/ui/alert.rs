use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "w-full rounded-md border border-border px-3 py-2 text-sm", "bg-background"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;

/// Inline error message; the one way failures reach the page.
#[component]
pub fn ErrorAlert(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <Alert class="border-destructive/30" attr:role="alert">
            <AlertDescription class="text-destructive text-xs">{message}</AlertDescription>
        </Alert>
    }
}
