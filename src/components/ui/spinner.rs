use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(
    #[prop(into, optional)] class: String,
    #[prop(default = "Loading")] label: &'static str,
) -> impl IntoView {
    let class = tw_merge!("size-4 animate-spin text-muted-foreground", class);

    view! { <LoaderCircle class=class attr:role="status" attr:aria-label=label /> }
}
