use crate::api::ApiClient;
use crate::models::{FileTreeNode, WikiConfig};
use crate::storage::load_sidebar_width;
use crate::tree::ExpandedFolders;
use leptos::prelude::*;

/// Page operation dialogs; at most one is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PageDialog {
    /// New page inside `folder` (`""` is the root).
    NewPage { folder: String },
    Rename { path: String },
    Move { path: String },
    Delete { path: String },
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// `None` until `/api/config` answered.
    pub config: RwSignal<Option<WikiConfig>>,
    pub config_error: RwSignal<Option<String>>,

    /// Replaced wholesale on every fetch.
    pub tree: RwSignal<Vec<FileTreeNode>>,
    pub tree_loading: RwSignal<bool>,
    pub tree_error: RwSignal<Option<String>>,

    /// Bump to refetch the tree (after create/rename/move/delete/pull).
    pub tree_refresh: RwSignal<u64>,

    /// Logical path of a page deleted in this session.
    pub recently_deleted: RwSignal<Option<String>>,

    pub dialog: RwSignal<Option<PageDialog>>,

    /// Global UI state.
    pub sidebar_width: RwSignal<f64>,
    pub expanded_folders: RwSignal<ExpandedFolders>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            config: RwSignal::new(None),
            config_error: RwSignal::new(None),
            tree: RwSignal::new(vec![]),
            tree_loading: RwSignal::new(false),
            tree_error: RwSignal::new(None),
            tree_refresh: RwSignal::new(0),
            recently_deleted: RwSignal::new(None),
            dialog: RwSignal::new(None),
            sidebar_width: RwSignal::new(load_sidebar_width()),
            expanded_folders: RwSignal::new(ExpandedFolders::load()),
        }
    }

    pub fn refresh_tree(&self) {
        self.tree_refresh.update(|n| *n = n.wrapping_add(1));
    }

    pub fn open_dialog(&self, dialog: PageDialog) {
        self.dialog.set(Some(dialog));
    }

    pub fn close_dialog(&self) {
        self.dialog.set(None);
    }

    /// `logical` exists again, so it no longer counts as deleted.
    pub fn forget_deleted(&self, logical: &str) {
        let current = self.recently_deleted.get_untracked();
        let next = marker_after_write(current.clone(), logical);
        if next != current {
            self.recently_deleted.set(next);
        }
    }

    pub fn toggle_folder(&self, path: &str) {
        self.expanded_folders.update(|f| f.toggle(path));
        self.expanded_folders.with_untracked(|f| f.save());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Deleted marker after `written` was saved or moved into place.
fn marker_after_write(marker: Option<String>, written: &str) -> Option<String> {
    marker.filter(|m| m != written)
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
