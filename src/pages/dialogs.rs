use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Dialog, DialogBody, DialogDescription, DialogFooter,
    DialogHeader, DialogTitle, ErrorAlert, Input, Label, Spinner,
};
use crate::navigation::use_guarded_navigate;
use crate::pages::resolve::new_page_content;
use crate::paths::{
    add_content_suffix, edit_href, join_paths, leaf_of, page_href, parent_of,
    remove_content_suffix, validate_page_name,
};
use crate::state::{AppContext, PageDialog};
use crate::tree::{folder_choices, folder_label};
use crate::util::default_page_name;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Logical path of a new page called `name` inside `folder`.
pub(crate) fn new_page_target(folder: &str, name: &str) -> Result<String, String> {
    let name = name.trim();
    validate_page_name(name)?;
    Ok(join_paths(&[folder, name]))
}

/// Storage name after renaming `current` in place.
pub(crate) fn rename_target(current: &str, name: &str) -> Result<String, String> {
    let name = name.trim();
    validate_page_name(name)?;
    let parent = parent_of(current);
    Ok(add_content_suffix(&join_paths(&[&parent, name])))
}

/// Storage name after moving `current` into `folder` under `name`.
pub(crate) fn move_target(current: &str, folder: &str, name: &str) -> Result<String, String> {
    let name = name.trim();
    validate_page_name(name)?;
    let target = add_content_suffix(&join_paths(&[folder, name]));
    if target == add_content_suffix(current) {
        return Err("New path is the same as the current path".to_string());
    }
    Ok(target)
}

fn new_page_description(folder: &str) -> String {
    if folder.is_empty() {
        "Enter a name for the new page in the root directory.".to_string()
    } else {
        format!("Enter a name for the new page in folder \"{folder}\".")
    }
}

/// Confirmation shown while a navigation is held back by unsaved edits.
#[component]
pub fn UnsavedChangesDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Dialog open=open on_close=on_cancel data_name_prefix="UnsavedChanges">
            <DialogBody>
                <DialogHeader>
                    <DialogTitle>"Unsaved Changes"</DialogTitle>
                    <DialogDescription>
                        "You have unsaved changes that will be lost if you navigate away. Do you want to discard your changes?"
                    </DialogDescription>
                </DialogHeader>
                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        on:click=move |_| on_confirm.run(())
                    >
                        "Discard Changes"
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn NewPageDialog(folder: String) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_guarded_navigate());

    let description = StoredValue::new(new_page_description(&folder));
    let folder = StoredValue::new(folder);
    let name: RwSignal<String> = RwSignal::new(default_page_name());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy: RwSignal<bool> = RwSignal::new(false);

    let submit = move || {
        if busy.get_untracked() {
            return;
        }
        let target = match folder.with_value(|f| new_page_target(f, &name.get_untracked())) {
            Ok(t) => t,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .save(&add_content_suffix(&target), &new_page_content(&target))
                .await
            {
                Ok(_) => {
                    app.forget_deleted(&target);
                    app.refresh_tree();
                    let _ = navigate.try_with_value(|go| go(&edit_href(&target)));
                    app.close_dialog();
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                    busy.try_set(false);
                }
            }
        });
    };

    view! {
        <Dialog
            open=Signal::derive(|| true)
            on_close=Callback::new(move |_: ()| app.close_dialog())
            data_name_prefix="NewPage"
        >
            <DialogBody>
                <DialogHeader>
                    <DialogTitle>"Create New Page"</DialogTitle>
                    <DialogDescription>{description.get_value()}</DialogDescription>
                </DialogHeader>

                <div class="space-y-1">
                    <Label class="text-xs" html_for="new-page-name">"Page Name"</Label>
                    <Input
                        id="new-page-name"
                        bind_value=name
                        autofocus=true
                        disabled=busy
                        on_enter=Callback::new(move |_: ()| submit())
                        class="h-8 text-sm"
                    />
                </div>

                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| app.close_dialog()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| submit()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if busy.get() { "Creating..." } else { "Create" }}
                        </span>
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn RenameDialog(path: String) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_guarded_navigate());

    let dir = StoredValue::new(parent_of(&path));
    let name: RwSignal<String> = RwSignal::new(leaf_of(&path));
    let path = StoredValue::new(path);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy: RwSignal<bool> = RwSignal::new(false);

    let submit = move || {
        if busy.get_untracked() {
            return;
        }
        let current = path.get_value();
        let target = match rename_target(&current, &name.get_untracked()) {
            Ok(t) => t,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if target == add_content_suffix(&current) {
            app.close_dialog();
            return;
        }

        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .rename(&add_content_suffix(&current), &target)
                .await
            {
                Ok(_) => {
                    app.forget_deleted(&remove_content_suffix(&target));
                    app.refresh_tree();
                    let _ = navigate.try_with_value(|go| go(&page_href(&target)));
                    app.close_dialog();
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                    busy.try_set(false);
                }
            }
        });
    };

    view! {
        <Dialog
            open=Signal::derive(|| true)
            on_close=Callback::new(move |_: ()| app.close_dialog())
            data_name_prefix="RenamePage"
        >
            <DialogBody>
                <DialogHeader>
                    <DialogTitle>"Rename Page"</DialogTitle>
                    <DialogDescription>
                        "Enter the new name for this page (without .md extension)"
                    </DialogDescription>
                </DialogHeader>

                <div class="space-y-1">
                    <Label class="text-xs" html_for="rename-page-name">"New Page Name"</Label>
                    <Input
                        id="rename-page-name"
                        bind_value=name
                        autofocus=true
                        disabled=busy
                        on_enter=Callback::new(move |_: ()| submit())
                        class="h-8 text-sm"
                    />
                    {(!dir.with_value(|d| d.is_empty())).then(|| view! {
                        <p class="text-xs text-muted-foreground">
                            "The page will remain in the same directory: "
                            <code>{format!("{}/", dir.get_value())}</code>
                        </p>
                    })}
                </div>

                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| app.close_dialog()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| submit()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if busy.get() { "Renaming..." } else { "Rename" }}
                        </span>
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn MoveDialog(path: String) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_guarded_navigate());

    let current_storage = StoredValue::new(add_content_suffix(&path));
    let folder: RwSignal<String> = RwSignal::new(parent_of(&path));
    let name: RwSignal<String> = RwSignal::new(leaf_of(&path));
    let path = StoredValue::new(path);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy: RwSignal<bool> = RwSignal::new(false);

    let choices = Memo::new(move |_| app.tree.with(|t| folder_choices(t)));

    let submit = move || {
        if busy.get_untracked() {
            return;
        }
        let current = path.get_value();
        let target = match move_target(
            &current,
            &folder.get_untracked(),
            &name.get_untracked(),
        ) {
            Ok(t) => t,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .rename(&add_content_suffix(&current), &target)
                .await
            {
                Ok(_) => {
                    app.forget_deleted(&remove_content_suffix(&target));
                    app.refresh_tree();
                    let _ = navigate.try_with_value(|go| go(&page_href(&target)));
                    app.close_dialog();
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                    busy.try_set(false);
                }
            }
        });
    };

    view! {
        <Dialog
            open=Signal::derive(|| true)
            on_close=Callback::new(move |_: ()| app.close_dialog())
            data_name_prefix="MovePage"
        >
            <DialogBody>
                <DialogHeader>
                    <DialogTitle>"Move Page"</DialogTitle>
                    <DialogDescription>
                        "Current path: "
                        <code>{current_storage.get_value()}</code>
                    </DialogDescription>
                </DialogHeader>

                <div class="space-y-1">
                    <Label class="text-xs" html_for="move-page-folder">"Target Directory"</Label>
                    <select
                        id="move-page-folder"
                        class="border-input flex h-8 w-full rounded-md border bg-transparent px-2 text-sm"
                        prop:value=move || folder.get()
                        disabled=move || busy.get()
                        on:change=move |ev| folder.set(event_target_value(&ev))
                    >
                        <For
                            each=move || choices.get()
                            key=|f| f.clone()
                            children=move |f| {
                                let label = folder_label(&f);
                                view! { <option value=f>{label}</option> }
                            }
                        />
                    </select>
                </div>

                <div class="space-y-1">
                    <Label class="text-xs" html_for="move-page-name">"Page Name"</Label>
                    <Input
                        id="move-page-name"
                        bind_value=name
                        disabled=busy
                        on_enter=Callback::new(move |_: ()| submit())
                        class="h-8 text-sm"
                    />
                </div>

                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| app.close_dialog()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| submit()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if busy.get() { "Moving..." } else { "Move" }}
                        </span>
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn DeleteConfirmDialog(path: String) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let storage = StoredValue::new(add_content_suffix(&path));
    let path = StoredValue::new(path);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy: RwSignal<bool> = RwSignal::new(false);

    let submit = move || {
        if busy.get_untracked() {
            return;
        }
        let logical = remove_content_suffix(&path.get_value());
        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.delete(&add_content_suffix(&logical)).await {
                Ok(_) => {
                    // The open page now shows the create prompt without reloading.
                    app.recently_deleted.set(Some(logical));
                    app.refresh_tree();
                    app.close_dialog();
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                    busy.try_set(false);
                }
            }
        });
    };

    view! {
        <Dialog
            open=Signal::derive(|| true)
            on_close=Callback::new(move |_: ()| app.close_dialog())
            data_name_prefix="DeletePage"
        >
            <DialogBody>
                <DialogHeader>
                    <DialogTitle class="text-destructive">"Delete Page"</DialogTitle>
                    <DialogDescription>
                        "Are you sure you want to delete the following page?"
                    </DialogDescription>
                </DialogHeader>

                <div class="rounded-md border border-border bg-muted px-3 py-2 text-sm font-mono">
                    {storage.get_value()}
                </div>
                <p class="text-xs text-muted-foreground">"This action cannot be undone."</p>

                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| app.close_dialog()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| submit()
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || busy.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if busy.get() { "Deleting..." } else { "Delete" }}
                        </span>
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

/// Renders whichever page dialog is open in [`AppState::dialog`].
///
/// [`AppState::dialog`]: crate::state::AppState
#[component]
pub fn PageDialogs() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    move || match app.dialog.get() {
        Some(PageDialog::NewPage { folder }) => view! { <NewPageDialog folder=folder /> }.into_any(),
        Some(PageDialog::Rename { path }) => view! { <RenameDialog path=path /> }.into_any(),
        Some(PageDialog::Move { path }) => view! { <MoveDialog path=path /> }.into_any(),
        Some(PageDialog::Delete { path }) => {
            view! { <DeleteConfirmDialog path=path /> }.into_any()
        }
        None => ().into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_target() {
        assert_eq!(new_page_target("", "todo").as_deref(), Ok("todo"));
        assert_eq!(new_page_target("docs/api", " intro ").as_deref(), Ok("docs/api/intro"));
        assert_eq!(
            new_page_target("docs", "").unwrap_err(),
            "Page name cannot be empty"
        );
        assert_eq!(
            new_page_target("docs", "a?b").unwrap_err(),
            "Page name contains invalid characters"
        );
    }

    #[test]
    fn test_rename_keeps_directory() {
        assert_eq!(rename_target("docs/old", "new").as_deref(), Ok("docs/new.md"));
        assert_eq!(rename_target("old", "new").as_deref(), Ok("new.md"));
        assert_eq!(
            rename_target("docs/old", "a/b").unwrap_err(),
            "Page name cannot contain slashes"
        );
    }

    #[test]
    fn test_move_to_other_folder() {
        assert_eq!(move_target("docs/page", "", "page").as_deref(), Ok("page.md"));
        assert_eq!(
            move_target("page", "archive/2024", "page").as_deref(),
            Ok("archive/2024/page.md")
        );
    }

    #[test]
    fn test_move_to_same_path_is_rejected() {
        assert_eq!(
            move_target("docs/page", "docs", "page").unwrap_err(),
            "New path is the same as the current path"
        );
        assert_eq!(
            move_target("docs/page.md", "docs", "page").unwrap_err(),
            "New path is the same as the current path"
        );
    }

    #[test]
    fn test_new_page_description() {
        assert_eq!(
            new_page_description(""),
            "Enter a name for the new page in the root directory."
        );
        assert_eq!(
            new_page_description("docs"),
            "Enter a name for the new page in folder \"docs\"."
        );
    }
}
