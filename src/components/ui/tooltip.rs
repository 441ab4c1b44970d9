use leptos::prelude::*;
use tw_merge::tw_merge;

#[derive(Clone, Copy, Default, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TooltipPosition {
    #[default]
    Top,
    Bottom,
}

/// Hover hint around `children`; pure CSS, shown through `group-hover`.
#[component]
pub fn Tooltip(
    #[prop(into)] text: Signal<String>,
    #[prop(optional)] position: TooltipPosition,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let placement = match position {
        TooltipPosition::Top => "bottom-full mb-1.5",
        TooltipPosition::Bottom => "top-full mt-1.5",
    };
    let bubble = tw_merge!(
        "pointer-events-none absolute left-1/2 z-50 -translate-x-1/2 whitespace-nowrap rounded bg-foreground/90 px-2 py-1 text-xs text-background opacity-0 shadow transition-opacity group-hover/tooltip:opacity-100",
        placement,
        class
    );

    view! {
        <span data-name="Tooltip" class="group/tooltip relative inline-flex">
            {children()}
            <span role="tooltip" data-position=position.as_ref().to_string() class=bubble>
                {move || text.get()}
            </span>
        </span>
    }
}
