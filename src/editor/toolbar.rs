use super::format::FormatAction;
use crate::components::ui::{
    Axis, Button, ButtonSize, ButtonVariant, Separator, Tooltip, TooltipPosition,
};
use crate::storage::{
    clamp_split_percent, load_json_from_storage, save_json_to_storage, EDITOR_SPLIT_KEY,
    SPLIT_DEFAULT_PERCENT,
};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ViewMode {
    Edit,
    #[default]
    Split,
    Preview,
}

impl ViewMode {
    pub fn shows_editor(self) -> bool {
        self != Self::Preview
    }

    pub fn shows_preview(self) -> bool {
        self != Self::Edit
    }
}

/// Persisted editor pane arrangement.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub(crate) struct EditorLayout {
    #[serde(default)]
    pub mode: ViewMode,
    /// Width of the source pane in split mode, in percent.
    #[serde(default = "default_split")]
    pub split: f64,
}

fn default_split() -> f64 {
    SPLIT_DEFAULT_PERCENT
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            split: SPLIT_DEFAULT_PERCENT,
        }
    }
}

impl EditorLayout {
    pub fn load() -> Self {
        load_json_from_storage::<EditorLayout>(EDITOR_SPLIT_KEY)
            .map(EditorLayout::clamped)
            .unwrap_or_default()
    }

    pub fn save(&self) {
        save_json_to_storage(EDITOR_SPLIT_KEY, &self.clamped());
    }

    pub fn clamped(self) -> Self {
        Self {
            mode: self.mode,
            split: clamp_split_percent(self.split),
        }
    }
}

const GROUPS: &[&[(FormatAction, &str)]] = &[
    &[
        (FormatAction::Bold, "B"),
        (FormatAction::Italic, "I"),
        (FormatAction::Code, "`"),
    ],
    &[
        (FormatAction::Heading1, "H1"),
        (FormatAction::Heading2, "H2"),
        (FormatAction::Heading3, "H3"),
    ],
    &[
        (FormatAction::BulletList, "•"),
        (FormatAction::NumberedList, "1."),
        (FormatAction::Checkbox, "☐"),
        (FormatAction::Quote, "❝"),
    ],
    &[
        (FormatAction::Link, "Link"),
        (FormatAction::Image, "Img"),
        (FormatAction::CodeBlock, "{ }"),
        (FormatAction::Table, "Table"),
        (FormatAction::HorizontalRule, "—"),
    ],
];

#[component]
pub fn MarkdownToolbar(
    #[prop(into)] on_action: Callback<FormatAction>,
    layout: RwSignal<EditorLayout>,
) -> impl IntoView {
    let set_mode = move |mode: ViewMode| {
        layout.update(|l| l.mode = mode);
        layout.get_untracked().save();
    };

    let groups = GROUPS
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let buttons = group
                .iter()
                .map(|(action, label)| {
                    let action = *action;
                    view! {
                        <Tooltip text=Signal::derive(move || action.to_string()) position=TooltipPosition::Bottom>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Sm
                                class="h-7 min-w-7 px-1.5 font-mono text-xs"
                                attr:aria-label=action.to_string()
                                on:mousedown=|ev: web_sys::MouseEvent| ev.prevent_default()
                                on:click=move |_| on_action.run(action)
                            >
                                {*label}
                            </Button>
                        </Tooltip>
                    }
                })
                .collect_view();

            view! {
                {(i > 0).then(|| view! {
                    <Separator axis=Axis::Vertical class="mx-1 h-5" />
                })}
                <div class="flex items-center gap-0.5">{buttons}</div>
            }
        })
        .collect_view();

    let mode_button = move |mode: ViewMode| {
        view! {
            <button
                type="button"
                class=move || {
                    if layout.get().mode == mode {
                        "h-7 rounded-md px-2 text-xs bg-accent text-accent-foreground"
                    } else {
                        "h-7 rounded-md px-2 text-xs text-muted-foreground hover:bg-accent/50"
                    }
                }
                on:click=move |_| set_mode(mode)
            >
                {mode.to_string()}
            </button>
        }
    };

    view! {
        <div class="flex flex-wrap items-center justify-between gap-2 border-b border-border px-2 py-1">
            <div class="flex flex-wrap items-center">{groups}</div>

            <div class="flex items-center gap-2">
                <Show when=move || layout.get().mode == ViewMode::Split fallback=|| ().into_view()>
                    <input
                        type="range"
                        min="20"
                        max="80"
                        step="5"
                        class="w-24"
                        aria-label="Split position"
                        prop:value=move || layout.get().split.to_string()
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                layout.update(|l| l.split = clamp_split_percent(v));
                                layout.get_untracked().save();
                            }
                        }
                    />
                </Show>
                <div class="flex items-center rounded-md border border-border">
                    {mode_button(ViewMode::Edit)}
                    {mode_button(ViewMode::Split)}
                    {mode_button(ViewMode::Preview)}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_panes() {
        assert!(ViewMode::Edit.shows_editor() && !ViewMode::Edit.shows_preview());
        assert!(ViewMode::Split.shows_editor() && ViewMode::Split.shows_preview());
        assert!(!ViewMode::Preview.shows_editor() && ViewMode::Preview.shows_preview());
    }

    #[test]
    fn test_editor_layout_json_and_clamp() {
        let layout: EditorLayout = serde_json::from_str(r#"{"mode":"preview","split":95}"#).unwrap();
        assert_eq!(layout.mode, ViewMode::Preview);
        assert_eq!(layout.clamped().split, 80.0);

        let partial: EditorLayout = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, EditorLayout::default());
    }
}
