use icons::X;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

use crate::components::hooks::use_random::use_random_id_for;

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogHeader, div, "flex flex-col gap-2 text-center sm:text-left"}
    clx! {DialogTitle, h3, "text-lg leading-none font-semibold"}
    clx! {DialogDescription, p, "text-muted-foreground text-sm"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

#[allow(unused_imports)]
pub use components::*;

/// Modal rendered only while `open` is true.
///
/// Clicking the backdrop or the close button calls `on_close`; the owner
/// decides whether that actually closes the dialog.
#[component]
pub fn Dialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    #[prop(default = "Dialog")] data_name_prefix: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let target_id = use_random_id_for("dialog");
    let merged_class = tw_merge!(
        "relative w-full max-w-md rounded-md border border-border bg-background p-5 shadow-lg",
        class
    );

    let backdrop_data_name = format!("{}Backdrop", data_name_prefix);
    let content_data_name = format!("{}Content", data_name_prefix);
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                data-name=backdrop_data_name.clone()
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                on:click=move |_| on_close.run(())
            >
                <div
                    data-name=content_data_name.clone()
                    id=target_id.clone()
                    role="dialog"
                    aria-modal="true"
                    class=merged_class.clone()
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Escape" {
                            on_close.run(());
                        }
                    }
                >
                    <button
                        type="button"
                        class="absolute top-3 right-3 rounded-sm p-1 text-muted-foreground hover:text-foreground focus:ring-2 focus:ring-ring focus:outline-none [&_svg:not([class*='size-'])]:size-4"
                        aria-label="Close dialog"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </button>

                    {children.with_value(|c| c())}
                </div>
            </div>
        </Show>
    }
}
