use crate::api::ApiResult;
use crate::paths::{is_index_path, leaf_of, parent_of, resolve_route_path, RoutePath};

/// What the page area shows for the current route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PageView {
    Loading,
    /// Raw Markdown of the loaded page.
    Content(String),
    /// The page does not exist; offer to create `path`.
    CreatePrompt { path: String, folder_index: bool },
    Error(String),
}

impl PageView {
    pub fn create_prompt(route: &RoutePath) -> Self {
        Self::CreatePrompt {
            path: route.logical.clone(),
            folder_index: route.is_folder && is_index_path(&route.logical),
        }
    }
}

/// Map a load result onto the view. Only a 404 offers page creation.
pub(crate) fn resolve_load(route: &RoutePath, outcome: ApiResult<String>) -> PageView {
    match outcome {
        Ok(markdown) => PageView::Content(markdown),
        Err(e) if e.is_not_found() => PageView::create_prompt(route),
        Err(e) => PageView::Error(e.to_string()),
    }
}

/// View to show before any request is made for `route`.
///
/// A page deleted in this session is known to be gone, so it skips the load.
pub(crate) fn initial_view(route: &RoutePath, recently_deleted: Option<&str>) -> PageView {
    if recently_deleted == Some(route.logical.as_str()) {
        return PageView::create_prompt(route);
    }
    PageView::Loading
}

/// Next step of the view effect after the route tail or the deleted marker
/// changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PathChange {
    /// Drop the deleted marker; the effect reruns and decides then.
    ForgetDeleted,
    Show(PageView),
}

/// `prev` is the tail the effect last handled, `None` on mount.
///
/// The deleted marker only counts while the user stays on the path it was
/// set on. Arriving at a path, including remounting on the same one, forgets it.
pub(crate) fn on_path_change(
    prev: Option<&str>,
    current: &str,
    deleted: Option<&str>,
) -> PathChange {
    if prev != Some(current) && deleted.is_some() {
        return PathChange::ForgetDeleted;
    }
    PathChange::Show(initial_view(&resolve_route_path(current), deleted))
}

/// Load request counter; only the newest request may update the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RequestSeq(u64);

impl RequestSeq {
    pub fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Heading written into a freshly created page.
pub(crate) fn new_page_content(path: &str) -> String {
    format!("# {}\n", leaf_of(path))
}

pub(crate) fn create_prompt_text(path: &str, folder_index: bool) -> String {
    if folder_index {
        let folder = parent_of(path);
        if folder.is_empty() {
            return "The wiki has no index page yet.".to_string();
        }
        return format!("The folder \"{}\" has no index page yet.", leaf_of(&folder));
    }
    format!("The page \"{}\" does not exist yet.", leaf_of(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::paths::resolve_route_path;

    fn not_found() -> ApiError {
        ApiError::NotFound {
            message: "File not found".into(),
        }
    }

    #[test]
    fn test_content_on_success() {
        let route = resolve_route_path("notes/today");
        assert_eq!(
            resolve_load(&route, Ok("# Today\n".into())),
            PageView::Content("# Today\n".into())
        );
    }

    #[test]
    fn test_folder_route_404_prompts_for_index() {
        let route = resolve_route_path("docs/");
        assert_eq!(
            resolve_load(&route, Err(not_found())),
            PageView::CreatePrompt {
                path: "docs/index".into(),
                folder_index: true
            }
        );
    }

    #[test]
    fn test_page_route_404_prompts_for_exact_path() {
        let route = resolve_route_path("docs/missing");
        assert_eq!(
            resolve_load(&route, Err(not_found())),
            PageView::CreatePrompt {
                path: "docs/missing".into(),
                folder_index: false
            }
        );

        // An explicit `/index` without trailing slash is a page route.
        let route = resolve_route_path("docs/index");
        assert!(matches!(
            resolve_load(&route, Err(not_found())),
            PageView::CreatePrompt { folder_index: false, .. }
        ));
    }

    #[test]
    fn test_other_errors_show_banner() {
        let route = resolve_route_path("docs/");
        let err = ApiError::Http {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(resolve_load(&route, Err(err)), PageView::Error("boom".into()));

        let err = ApiError::Network("offline".into());
        assert!(matches!(resolve_load(&route, Err(err)), PageView::Error(_)));
    }

    #[test]
    fn test_recently_deleted_skips_load() {
        let route = resolve_route_path("gone");
        assert_eq!(
            initial_view(&route, Some("gone")),
            PageView::CreatePrompt {
                path: "gone".into(),
                folder_index: false
            }
        );
        assert_eq!(initial_view(&route, Some("other")), PageView::Loading);
        assert_eq!(initial_view(&route, None), PageView::Loading);
    }

    #[test]
    fn test_deleted_marker_shows_prompt_on_same_path() {
        assert_eq!(
            on_path_change(Some("gone"), "gone", Some("gone")),
            PathChange::Show(PageView::CreatePrompt {
                path: "gone".into(),
                folder_index: false
            })
        );
    }

    #[test]
    fn test_leaving_the_path_forgets_deleted_marker() {
        assert_eq!(
            on_path_change(Some("gone"), "other", Some("gone")),
            PathChange::ForgetDeleted
        );
        // The rerun after forgetting loads normally.
        assert_eq!(
            on_path_change(Some("other"), "other", None),
            PathChange::Show(PageView::Loading)
        );
    }

    #[test]
    fn test_remount_forgets_stale_deleted_marker() {
        // Deleted X, recreated it through the editor, came back to /page/X.
        assert_eq!(on_path_change(None, "X", Some("X")), PathChange::ForgetDeleted);
        assert_eq!(on_path_change(None, "X", None), PathChange::Show(PageView::Loading));
    }

    #[test]
    fn test_superseded_requests_are_not_current() {
        let mut seq = RequestSeq::default();
        let first = seq.next();
        assert!(seq.is_current(first));

        let second = seq.next();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_new_page_content_and_prompt_text() {
        assert_eq!(new_page_content("docs/setup"), "# setup\n");
        assert_eq!(
            create_prompt_text("docs/setup", false),
            "The page \"setup\" does not exist yet."
        );
        assert_eq!(
            create_prompt_text("docs/api/index", true),
            "The folder \"api\" has no index page yet."
        );
        assert_eq!(
            create_prompt_text("index", true),
            "The wiki has no index page yet."
        );
    }
}
