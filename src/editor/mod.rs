pub(crate) mod format;
pub(crate) mod preview;
pub(crate) mod toolbar;

use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::navigation::NavigationState;
use format::{indent, Edit, FormatAction, Selection};
use leptos::html;
use leptos::prelude::*;
use preview::render_preview;
use toolbar::{EditorLayout, MarkdownToolbar, ViewMode};
use wasm_bindgen::JsCast;

fn utf16_to_byte_idx(s: &str, pos_utf16: u32) -> usize {
    if pos_utf16 == 0 {
        return 0;
    }
    let mut acc: u32 = 0;
    for (i, ch) in s.char_indices() {
        let w = ch.len_utf16() as u32;
        if acc + w > pos_utf16 {
            return i;
        }
        acc += w;
        if acc == pos_utf16 {
            return i + ch.len_utf8();
        }
    }
    s.len()
}

fn byte_idx_to_utf16(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

fn textarea_selection(el: &web_sys::HtmlTextAreaElement) -> Selection {
    let start = el.selection_start().ok().flatten().unwrap_or(0);
    let end = el.selection_end().ok().flatten().unwrap_or(start);
    Selection::new(start, end)
}

/// Markdown source editor with toolbar and live preview.
///
/// Any difference from `initial` marks the session as having unsaved changes,
/// which holds navigation until the user saves or discards.
#[component]
pub fn MarkdownEditor(
    #[prop(into)] initial: String,
    #[prop(into)] on_save: Callback<String>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] saving: Signal<bool>,
) -> impl IntoView {
    let nav = expect_context::<NavigationState>();

    let baseline = StoredValue::new(initial.clone());
    let content: RwSignal<String> = RwSignal::new(initial);
    let layout: RwSignal<EditorLayout> = RwSignal::new(EditorLayout::load());
    let textarea_ref: NodeRef<html::Textarea> = NodeRef::new();

    let sync_dirty = move |value: &str| {
        let dirty = baseline.with_value(|b| b != value);
        nav.set_has_unsaved_changes(dirty);
    };

    // Leaving the editor drops whatever was typed.
    on_cleanup(move || nav.set_has_unsaved_changes(false));

    let commit_edit = move |edit: Edit| {
        sync_dirty(&edit.content);
        content.set(edit.content.clone());

        let Some(el) = textarea_ref.get_untracked() else {
            return;
        };
        el.set_value(&edit.content);

        // Restore the caret after the DOM has the new value.
        let sel = edit.selection;
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                let _ = el.focus();
                let _ = el.set_selection_range(sel.start, sel.end);
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    };

    let on_action = Callback::new(move |action: FormatAction| {
        let selection = textarea_ref
            .get_untracked()
            .map(|el| textarea_selection(&el))
            .unwrap_or_default();
        let edit = content.with_untracked(|c| action.apply(c, selection));
        commit_edit(edit);
    });

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        on_save.run(content.get_untracked());
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        let is_meta = ev.meta_key() || ev.ctrl_key();

        if key == "Tab" && !is_meta && !ev.shift_key() {
            ev.prevent_default();
            let Some(el) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
            else {
                return;
            };
            let edit = indent(&el.value(), textarea_selection(&el));
            commit_edit(edit);
            return;
        }

        if is_meta && key.to_lowercase() == "s" {
            ev.prevent_default();
            save();
        }
    };

    let editor_style = move || {
        let l = layout.get();
        match l.mode {
            ViewMode::Split => format!("width: {}%;", l.split),
            _ => "width: 100%;".to_string(),
        }
    };

    view! {
        <div class="flex h-full min-h-0 flex-col rounded-md border border-border bg-background">
            <MarkdownToolbar on_action=on_action layout=layout />

            <div class="flex min-h-0 flex-1">
                <Show when=move || layout.get().mode.shows_editor() fallback=|| ().into_view()>
                    <div class="flex min-h-0 flex-col" style=editor_style>
                        <textarea
                            node_ref=textarea_ref
                            class="h-full min-h-[60vh] w-full flex-1 resize-none bg-transparent p-3 font-mono text-sm outline-none"
                            spellcheck="false"
                            prop:value=move || content.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                sync_dirty(&value);
                                content.set(value);
                            }
                            on:keydown=on_keydown
                        ></textarea>
                    </div>
                </Show>

                <Show when=move || layout.get().mode.shows_preview() fallback=|| ().into_view()>
                    <div
                        class=move || {
                            if layout.get().mode == ViewMode::Split {
                                "prose prose-sm min-w-0 flex-1 overflow-auto border-l border-border p-3"
                            } else {
                                "prose prose-sm min-w-0 flex-1 overflow-auto p-3"
                            }
                        }
                        inner_html=move || render_preview(&content.get())
                    ></div>
                </Show>
            </div>

            <div class="flex items-center justify-end gap-2 border-t border-border px-3 py-2">
                <span class="mr-auto text-xs text-muted-foreground">
                    {move || if nav.has_unsaved_changes() { "Unsaved changes" } else { "" }}
                </span>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || saving.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || saving.get()
                    on:click=move |_| save()
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || saving.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </span>
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_byte_index_conversion() {
        let s = "a😀b";
        assert_eq!(utf16_to_byte_idx(s, 0), 0);
        assert_eq!(utf16_to_byte_idx(s, 1), 1);
        // Inside the surrogate pair snaps to the char start.
        assert_eq!(utf16_to_byte_idx(s, 2), 1);
        assert_eq!(utf16_to_byte_idx(s, 3), 5);
        assert_eq!(utf16_to_byte_idx(s, 99), s.len());

        assert_eq!(byte_idx_to_utf16(s, 5), 3);
        assert_eq!(byte_idx_to_utf16(s, 999), 4);
    }
}
