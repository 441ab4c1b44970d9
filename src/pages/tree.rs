use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert, Spinner};
use crate::models::FileTreeNode;
use crate::navigation::NavigationState;
use crate::paths::{page_href, remove_content_suffix};
use crate::state::{AppContext, PageDialog};
use icons::{ChevronDown, ChevronRight};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

/// Nodes shown at the top level: the synthetic root's children, or the raw
/// list when the backend sent no root folder.
fn visible_roots(tree: &[FileTreeNode]) -> Vec<FileTreeNode> {
    match tree.first() {
        Some(root) if root.is_folder() && tree.len() == 1 => root.children.clone(),
        _ => tree.to_vec(),
    }
}

fn indent_style(depth: usize) -> String {
    format!("padding-left: {}px", 8 + depth * 12)
}

#[component]
fn TreeFolder(node: FileTreeNode, depth: usize) -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    let path = StoredValue::new(node.path.clone());
    let expanded = move || {
        app.expanded_folders
            .with(|f| path.with_value(|p| f.is_expanded(p)))
    };
    let children = StoredValue::new(node.children);

    view! {
        <li>
            <div
                class="group flex items-center gap-1 rounded-md py-1 pr-1 text-sm hover:bg-accent"
                style=indent_style(depth)
            >
                <button
                    type="button"
                    class="flex min-w-0 flex-1 items-center gap-1 text-left"
                    on:click=move |_| path.with_value(|p| app.toggle_folder(p))
                >
                    <span class="size-4 shrink-0 text-muted-foreground">
                        {move || if expanded() {
                            view! { <ChevronDown class="size-4" /> }.into_any()
                        } else {
                            view! { <ChevronRight class="size-4" /> }.into_any()
                        }}
                    </span>
                    <span class="truncate font-medium">{node.name}</span>
                </button>
                <button
                    type="button"
                    class="hidden size-5 items-center justify-center rounded text-xs text-muted-foreground hover:bg-background group-hover:inline-flex"
                    title="New page in this folder"
                    on:click=move |_| {
                        app.open_dialog(PageDialog::NewPage { folder: path.get_value() })
                    }
                >
                    "+"
                </button>
            </div>

            <Show when=expanded fallback=|| ().into_view()>
                <ul>
                    {move || children.with_value(|nodes| tree_level(nodes, depth + 1))}
                </ul>
            </Show>
        </li>
    }
}

#[component]
fn TreeFile(node: FileTreeNode, depth: usize) -> impl IntoView {
    let nav = expect_context::<NavigationState>();
    let navigate = use_navigate();
    let location = use_location();

    let href = StoredValue::new(page_href(&node.path));
    let is_active = move || location.pathname.with(|p| href.with_value(|h| p == h));

    // Held as a deferred action while the editor has unsaved changes.
    let open = Callback::new(move |_: ()| {
        href.with_value(|h| navigate(h, Default::default()))
    });

    view! {
        <li>
            <button
                type="button"
                class=move || {
                    if is_active() {
                        "flex w-full items-center rounded-md bg-accent py-1 pr-2 text-left text-sm font-medium"
                    } else {
                        "flex w-full items-center rounded-md py-1 pr-2 text-left text-sm hover:bg-accent"
                    }
                }
                style=indent_style(depth + 1)
                on:click=move |_| href.with_value(|h| nav.run_guarded(h, open))
            >
                <span class="truncate">{remove_content_suffix(&node.name)}</span>
            </button>
        </li>
    }
}

fn tree_level(nodes: &[FileTreeNode], depth: usize) -> AnyView {
    nodes
        .iter()
        .map(|n| {
            if n.is_folder() {
                view! { <TreeFolder node=n.clone() depth=depth /> }.into_any()
            } else {
                view! { <TreeFile node=n.clone() depth=depth /> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Sidebar file tree. Folders toggle, files navigate through the guard.
#[component]
pub fn FileTree() -> impl IntoView {
    let app = expect_context::<AppContext>().0;

    view! {
        <div class="flex h-full flex-col">
            <div class="flex items-center justify-between px-3 py-2">
                <span class="text-xs font-semibold uppercase tracking-wide text-muted-foreground">
                    "Pages"
                </span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Xs
                    attr:title="New page"
                    on:click=move |_| app.open_dialog(PageDialog::NewPage { folder: String::new() })
                >
                    "+ New"
                </Button>
            </div>

            <Show when=move || app.tree_error.get().is_some() fallback=|| ().into_view()>
                {move || app.tree_error.get().map(|e| view! {
                    <div class="px-3">
                        <ErrorAlert message=e />
                    </div>
                })}
            </Show>

            <Show
                when=move || !(app.tree_loading.get() && app.tree.with(|t| t.is_empty()))
                fallback=|| view! {
                    <div class="flex items-center gap-2 px-3 py-2 text-xs text-muted-foreground">
                        <Spinner />
                        "Loading..."
                    </div>
                }
            >
                <ul class="min-h-0 flex-1 overflow-y-auto px-1 pb-2">
                    {move || app.tree.with(|t| tree_level(&visible_roots(t), 0))}
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn file(path: &str) -> FileTreeNode {
        FileTreeNode {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: NodeKind::File,
            path: path.to_string(),
            children: vec![],
        }
    }

    #[test]
    fn test_visible_roots_unwraps_synthetic_root() {
        let root = FileTreeNode {
            name: "wiki".into(),
            kind: NodeKind::Folder,
            path: String::new(),
            children: vec![file("index.md"), file("todo.md")],
        };
        let shown = visible_roots(&[root]);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].path, "index.md");
    }

    #[test]
    fn test_visible_roots_keeps_flat_lists() {
        let shown = visible_roots(&[file("a.md"), file("b.md")]);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn test_indent_grows_with_depth() {
        assert_eq!(indent_style(0), "padding-left: 8px");
        assert_eq!(indent_style(2), "padding-left: 32px");
    }
}
