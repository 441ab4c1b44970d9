pub(crate) mod dialogs;
pub(crate) mod resolve;
pub(crate) mod setup;
pub(crate) mod status_bar;
pub(crate) mod tree;

use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardHeader, CardTitle, ErrorAlert, Spinner,
};
use crate::editor::preview::render_preview;
use crate::editor::MarkdownEditor;
use crate::models::WikiConfig;
use crate::navigation::{use_guarded_navigate, NavigationState};
use crate::paths::{
    breadcrumb_trail, edit_href, leaf_of, page_href, resolve_route_path, route_tail, RoutePath,
    INDEX_SEGMENT,
};
use crate::state::{AppContext, PageDialog};
use crate::storage::{clamp_sidebar_width, save_sidebar_width};
use dialogs::PageDialogs;
use leptos::ev;
use leptos::logging::{error, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::use_location;
use resolve::{
    create_prompt_text, new_page_content, on_path_change, resolve_load, PageView, PathChange,
    RequestSeq,
};
use setup::SetupWizard;
use status_bar::GitStatusBar;
use tree::FileTree;

pub(crate) const VIEW_PREFIX: &str = "/page";
pub(crate) const EDIT_PREFIX: &str = "/edit";

#[component]
fn LoadingLine(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 p-4 text-sm text-muted-foreground">
            <Spinner />
            {label}
        </div>
    }
}

/// Loads the wiki configuration and gates the app behind the setup wizard.
#[component]
pub fn RootConfigured(children: ChildrenFn) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let load_config = move || {
        let api_client = app.api_client.get_untracked();
        app.config_error.set(None);
        spawn_local(async move {
            match api_client.get_config().await {
                Ok(config) => app.config.set(Some(config)),
                Err(e) => {
                    error!("failed to load config: {e}");
                    app.config_error.set(Some(e.to_string()));
                }
            }
        });
    };

    if app.config.get_untracked().is_none() {
        load_config();
    }

    let on_setup_complete = Callback::new(move |config: WikiConfig| {
        app.config.set(Some(config));
        app.refresh_tree();
    });

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    move || {
        if let Some(e) = app.config_error.get() {
            return view! {
                <div class="flex min-h-screen items-center justify-center px-4">
                    <div class="w-full max-w-md space-y-3">
                        <ErrorAlert message=e />
                        <Button size=ButtonSize::Sm on:click=move |_| load_config()>"Retry"</Button>
                    </div>
                </div>
            }
            .into_any();
        }

        let configured = app.config.with(|c| c.as_ref().map(|c| c.is_configured()));
        match configured {
            None => view! {
                <div class="flex min-h-screen items-center justify-center">
                    <LoadingLine label="Loading..." />
                </div>
            }
            .into_any(),
            Some(false) => view! { <SetupWizard on_complete=on_setup_complete /> }.into_any(),
            Some(true) => view! {
                <AppLayout>
                    {move || children.with_value(|c| c())}
                </AppLayout>
            }
            .into_any(),
        }
    }
}

/// Sidebar (file tree), main area and status bar.
#[component]
pub fn AppLayout(children: ChildrenFn) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = use_guarded_navigate();

    // The tree is refetched whole whenever the trigger moves.
    Effect::new(move |_| {
        app.tree_refresh.track();

        let api_client = app.api_client.get_untracked();
        app.tree_loading.set(true);
        spawn_local(async move {
            match api_client.get_files().await {
                Ok(files) => {
                    app.tree.try_set(files);
                    app.tree_error.try_set(None);
                }
                Err(e) => {
                    error!("failed to load file tree: {e}");
                    app.tree_error.try_set(Some(e.to_string()));
                }
            }
            app.tree_loading.try_set(false);
        });
    });

    let resizing: RwSignal<bool> = RwSignal::new(false);

    let on_move = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        if !resizing.get_untracked() {
            return;
        }
        ev.prevent_default();
        app.sidebar_width
            .set(clamp_sidebar_width(f64::from(ev.client_x())));
    });

    let on_up = window_event_listener(ev::mouseup, move |_| {
        if !resizing.get_untracked() {
            return;
        }
        resizing.set(false);
        save_sidebar_width(app.sidebar_width.get_untracked());
    });

    on_cleanup(move || {
        on_move.remove();
        on_up.remove();
    });

    let children = StoredValue::new(children);

    view! {
        <div class=move || {
            if resizing.get() {
                "flex h-screen flex-col select-none"
            } else {
                "flex h-screen flex-col"
            }
        }>
            <div class="flex min-h-0 flex-1">
                <aside
                    class="flex shrink-0 flex-col border-r border-border bg-muted/30"
                    style=move || format!("width: {}px", app.sidebar_width.get())
                >
                    <button
                        type="button"
                        class="px-3 py-3 text-left text-sm font-semibold hover:text-primary"
                        on:click=move |_| navigate(&page_href(INDEX_SEGMENT))
                    >
                        "Fishki Wiki"
                    </button>
                    <div class="min-h-0 flex-1">
                        <FileTree />
                    </div>
                </aside>

                <div
                    class="w-1 shrink-0 cursor-col-resize bg-transparent hover:bg-border"
                    role="separator"
                    aria-orientation="vertical"
                    on:mousedown=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        resizing.set(true);
                    }
                ></div>

                <main class="min-w-0 flex-1 overflow-auto">
                    {move || children.with_value(|c| c())}
                </main>
            </div>

            <GitStatusBar />
            <PageDialogs />
        </div>
    }
}

/// Home / ancestor folders / current page.
#[component]
pub fn Breadcrumbs(#[prop(into)] path: Signal<String>) -> impl IntoView {
    let navigate = StoredValue::new(use_guarded_navigate());

    view! {
        <nav aria-label="Breadcrumb" class="flex flex-wrap items-center gap-1 text-sm text-muted-foreground">
            {move || {
                let trail = breadcrumb_trail(&path.get());
                let last = trail.len().saturating_sub(1);
                trail
                    .into_iter()
                    .enumerate()
                    .map(|(i, crumb)| {
                        let sep = (i > 0).then(|| view! { <span>"/"</span> });
                        let item = match crumb.href {
                            Some(href) => view! {
                                <button
                                    type="button"
                                    class="hover:text-foreground hover:underline"
                                    on:click=move |_| navigate.with_value(|go| go(&href))
                                >
                                    {crumb.label}
                                </button>
                            }
                            .into_any(),
                            None => view! {
                                <span
                                    class="font-medium text-foreground"
                                    aria-current=(i == last).then_some("page")
                                >
                                    {crumb.label}
                                </span>
                            }
                            .into_any(),
                        };
                        view! { {sep} {item} }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

/// Offer to create a page that does not exist.
#[component]
fn CreatePagePrompt(path: String, folder_index: bool) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_guarded_navigate());

    let text = create_prompt_text(&path, folder_index);
    let label = format!("Create \"{}\"", leaf_of(&path));
    let path = StoredValue::new(path);
    let busy: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_create = move |_: web_sys::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        let logical = path.get_value();
        let route = RoutePath {
            logical: logical.clone(),
            is_folder: false,
        };
        let api_client = app.api_client.get_untracked();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .save(&route.storage_name(), &new_page_content(&logical))
                .await
            {
                Ok(_) => {
                    app.forget_deleted(&logical);
                    app.refresh_tree();
                    let _ = navigate.try_with_value(|go| go(&edit_href(&logical)));
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <Card class="mx-auto mt-10 max-w-lg">
            <CardHeader>
                <CardTitle>"Page Not Found"</CardTitle>
                <CardDescription>{text}</CardDescription>
            </CardHeader>
            <CardContent>
                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}
            </CardContent>
            <CardFooter class="justify-end">
                <Button size=ButtonSize::Sm attr:disabled=move || busy.get() on:click=on_create>
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || busy.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {label}
                    </span>
                </Button>
            </CardFooter>
        </Card>
    }
}

/// `/page/*path`: rendered page, or the create prompt when it is missing.
#[component]
pub fn ViewPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let location = use_location();
    let navigate = StoredValue::new(use_guarded_navigate());

    let tail = Memo::new(move |_| route_tail(&location.pathname.get(), VIEW_PREFIX));
    let route = Memo::new(move |_| resolve_route_path(&tail.get()));

    let page: RwSignal<PageView> = RwSignal::new(PageView::Loading);
    let html: RwSignal<Option<String>> = RwSignal::new(None);

    // Responses for an older path are dropped.
    let request_seq = StoredValue::new(RequestSeq::default());

    Effect::new(move |prev: Option<String>| {
        let current = tail.get();
        let deleted = app.recently_deleted.get();

        let initial = match on_path_change(prev.as_deref(), &current, deleted.as_deref()) {
            PathChange::ForgetDeleted => {
                app.recently_deleted.set(None);
                return current;
            }
            PathChange::Show(view) => view,
        };

        let route = resolve_route_path(&current);
        let mut seq = 0;
        request_seq.update_value(|s| seq = s.next());

        let needs_load = initial == PageView::Loading;
        html.set(None);
        page.set(initial);
        if !needs_load {
            return current;
        }

        let api_client = app.api_client.get_untracked();
        spawn_local(async move {
            let outcome = api_client.load(&route.storage_name()).await;
            if !request_seq.try_with_value(|s| s.is_current(seq)).unwrap_or(false) {
                return;
            }

            let next = resolve_load(&route, outcome);
            if let PageView::Content(markdown) = &next {
                let rendered = match api_client.render(markdown).await {
                    Ok(h) => h,
                    Err(e) => {
                        warn!("server render failed, using local preview: {e}");
                        render_preview(markdown)
                    }
                };
                if !request_seq.try_with_value(|s| s.is_current(seq)).unwrap_or(false) {
                    return;
                }
                html.try_set(Some(rendered));
            }
            page.try_set(next);
        });

        current
    });

    let logical = Signal::derive(move || route.with(|r| r.logical.clone()));
    let has_content = move || matches!(page.get(), PageView::Content(_));

    view! {
        <div class="mx-auto flex max-w-4xl flex-col gap-4 p-6">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <Breadcrumbs path=logical />
                <Show when=has_content fallback=|| ().into_view()>
                    <div class="flex items-center gap-1">
                        <Button
                            size=ButtonSize::Sm
                            on:click=move |_| {
                                navigate.with_value(|go| go(&edit_href(&logical.get_untracked())))
                            }
                        >
                            "Edit"
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| app.open_dialog(PageDialog::Rename { path: logical.get_untracked() })
                        >
                            "Rename"
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| app.open_dialog(PageDialog::Move { path: logical.get_untracked() })
                        >
                            "Move"
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            class="border-destructive/40 text-destructive"
                            on:click=move |_| app.open_dialog(PageDialog::Delete { path: logical.get_untracked() })
                        >
                            "Delete"
                        </Button>
                    </div>
                </Show>
            </div>

            {move || match page.get() {
                PageView::Loading => view! { <LoadingLine label="Loading..." /> }.into_any(),
                PageView::Content(_) => match html.get() {
                    Some(h) => view! { <article class="prose max-w-none" inner_html=h></article> }
                        .into_any(),
                    None => view! { <LoadingLine label="Rendering..." /> }.into_any(),
                },
                PageView::CreatePrompt { path, folder_index } => {
                    view! { <CreatePagePrompt path=path folder_index=folder_index /> }.into_any()
                }
                PageView::Error(message) => view! { <ErrorAlert message=message /> }.into_any(),
            }}
        </div>
    }
}

/// Editor state for one `/edit/*path` visit.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EditorSource {
    Loading,
    Ready(String),
    Failed(String),
}

/// `/edit/*path`: Markdown editor; a missing page starts from a heading.
#[component]
pub fn EditPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let nav = expect_context::<NavigationState>();
    let location = use_location();
    let navigate = StoredValue::new(use_guarded_navigate());

    let route = Memo::new(move |_| {
        resolve_route_path(&route_tail(&location.pathname.get(), EDIT_PREFIX))
    });

    let source: RwSignal<EditorSource> = RwSignal::new(EditorSource::Loading);
    let saving: RwSignal<bool> = RwSignal::new(false);
    let save_error: RwSignal<Option<String>> = RwSignal::new(None);
    let request_seq = StoredValue::new(RequestSeq::default());

    Effect::new(move |_| {
        let route = route.get();
        let mut seq = 0;
        request_seq.update_value(|s| seq = s.next());
        source.set(EditorSource::Loading);
        save_error.set(None);

        let api_client = app.api_client.get_untracked();
        spawn_local(async move {
            let outcome = api_client.load(&route.storage_name()).await;
            if !request_seq.try_with_value(|s| s.is_current(seq)).unwrap_or(false) {
                return;
            }
            let next = match outcome {
                Ok(markdown) => EditorSource::Ready(markdown),
                Err(e) if e.is_not_found() => EditorSource::Ready(new_page_content(&route.logical)),
                Err(e) => EditorSource::Failed(e.to_string()),
            };
            source.try_set(next);
        });
    });

    let on_save = Callback::new(move |markdown: String| {
        if saving.get_untracked() {
            return;
        }
        let route = route.get_untracked();
        let api_client = app.api_client.get_untracked();
        saving.set(true);
        save_error.set(None);

        spawn_local(async move {
            match api_client.save(&route.storage_name(), &markdown).await {
                Ok(_) => {
                    nav.set_has_unsaved_changes(false);
                    app.forget_deleted(&route.logical);
                    app.refresh_tree();
                    let _ = navigate.try_with_value(|go| go(&page_href(&route.logical)));
                }
                Err(e) => {
                    error!("save failed: {e}");
                    save_error.try_set(Some(e.to_string()));
                }
            }
            saving.try_set(false);
        });
    });

    // Cancel discards the edits without asking.
    let on_cancel = Callback::new(move |_: ()| {
        nav.set_has_unsaved_changes(false);
        let href = page_href(&route.get_untracked().logical);
        navigate.with_value(|go| go(&href));
    });

    let logical = Signal::derive(move || route.with(|r| r.logical.clone()));

    view! {
        <div class="flex h-full flex-col gap-3 p-4">
            <Breadcrumbs path=logical />

            {move || save_error.get().map(|e| view! { <ErrorAlert message=e /> })}

            {move || match source.get() {
                EditorSource::Loading => view! { <LoadingLine label="Loading..." /> }.into_any(),
                EditorSource::Failed(message) => view! { <ErrorAlert message=message /> }.into_any(),
                EditorSource::Ready(markdown) => view! {
                    <div class="min-h-0 flex-1">
                        <MarkdownEditor
                            initial=markdown
                            on_save=on_save
                            on_cancel=on_cancel
                            saving=saving
                        />
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_guarded_navigate();

    view! {
        <Card class="mx-auto mt-10 max-w-md">
            <CardHeader>
                <CardTitle>"Not Found"</CardTitle>
                <CardDescription>"There is nothing at this address."</CardDescription>
            </CardHeader>
            <CardFooter class="justify-end">
                <Button size=ButtonSize::Sm on:click=move |_| navigate(&page_href(INDEX_SEGMENT))>
                    "Go to the home page"
                </Button>
            </CardFooter>
        </Card>
    }
}
