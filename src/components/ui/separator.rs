use leptos::prelude::*;
use tw_merge::*;

#[derive(TwVariant)]
pub enum Axis {
    #[tw(default, class = "h-px w-full")]
    Horizontal,
    #[tw(class = "h-full w-px")]
    Vertical,
}

#[derive(TwClass, Default)]
#[tw(class = "shrink-0 bg-border")]
struct RuleClass {
    axis: Axis,
}

/// Thin rule between toolbar groups or sections.
#[component]
pub fn Separator(
    #[prop(optional)] axis: Axis,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let class = RuleClass { axis }.with_class(class);

    view! { <div class=class role="separator" aria-hidden="true" /> }
}
