//! Page path helpers.
//!
//! A *logical* path names a page the way users see it (`folder/page`), a
//! *storage* name is what the backend keeps on disk (`folder/page.md`).
//! Root is the empty string in both forms.

pub(crate) const CONTENT_SUFFIX: &str = ".md";
pub(crate) const INDEX_SEGMENT: &str = "index";

pub(crate) fn add_content_suffix(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') || path.ends_with(CONTENT_SUFFIX) {
        return path.to_string();
    }
    format!("{path}{CONTENT_SUFFIX}")
}

pub(crate) fn remove_content_suffix(path: &str) -> String {
    path.strip_suffix(CONTENT_SUFFIX).unwrap_or(path).to_string()
}

pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Parent folder of a page, without leading or trailing slash.
pub(crate) fn parent_of(path: &str) -> String {
    let mut segments = path_segments(path);
    segments.pop();
    segments.join("/")
}

/// Last segment of a path with the content suffix removed.
pub(crate) fn leaf_of(path: &str) -> String {
    let clean = remove_content_suffix(path);
    path_segments(&clean)
        .last()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

pub(crate) fn join_paths(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn is_index_path(path: &str) -> bool {
    path_segments(path).last().copied() == Some(INDEX_SEGMENT)
}

/// The folder-index page of `folder` (`folder/index`, or `index` for root).
pub(crate) fn index_path_of(folder: &str) -> String {
    join_paths(&[folder, INDEX_SEGMENT])
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RoutePath {
    /// Logical page path to load.
    pub logical: String,
    /// The route named a folder (empty or trailing slash).
    pub is_folder: bool,
}

impl RoutePath {
    pub fn storage_name(&self) -> String {
        add_content_suffix(&self.logical)
    }
}

/// Resolve the part of the URL after `/page/` into the page to load.
///
/// `""` and `"docs/"` are folder routes and load the folder's index page.
pub(crate) fn resolve_route_path(raw: &str) -> RoutePath {
    let raw = raw.trim_start_matches('/');
    if raw.is_empty() || raw.ends_with('/') {
        return RoutePath {
            logical: index_path_of(raw),
            is_folder: true,
        };
    }

    RoutePath {
        logical: remove_content_suffix(raw),
        is_folder: false,
    }
}

/// URL of the view route for a logical path.
pub(crate) fn page_href(path: &str) -> String {
    format!("/page/{}", remove_content_suffix(path.trim_start_matches('/')))
}

pub(crate) fn edit_href(path: &str) -> String {
    format!("/edit/{}", remove_content_suffix(path.trim_start_matches('/')))
}

/// The page part of a router pathname, e.g. `/page/docs/` with prefix
/// `/page` gives `docs/`. The trailing slash is kept; it marks a folder.
pub(crate) fn route_tail(pathname: &str, prefix: &str) -> String {
    let tail = pathname
        .strip_prefix(prefix)
        .unwrap_or(pathname)
        .trim_start_matches('/');
    urlencoding::decode(tail)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| tail.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Crumb {
    pub label: String,
    /// `None` for the current page.
    pub href: Option<String>,
}

/// Home, one link per ancestor folder (to its index page), then the page.
pub(crate) fn breadcrumb_trail(path: &str) -> Vec<Crumb> {
    let clean = remove_content_suffix(path);
    let segments = path_segments(&clean);

    let mut trail = vec![Crumb {
        label: "Home".to_string(),
        href: Some(page_href(INDEX_SEGMENT)),
    }];

    if let Some((last, ancestors)) = segments.split_last() {
        for (i, segment) in ancestors.iter().enumerate() {
            let prefix = ancestors[..=i].join("/");
            trail.push(Crumb {
                label: segment.to_string(),
                href: Some(page_href(&index_path_of(&prefix))),
            });
        }
        trail.push(Crumb {
            label: last.to_string(),
            href: None,
        });
    }

    trail
}

const INVALID_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

pub(crate) fn validate_page_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Page name cannot be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("Page name cannot contain slashes".to_string());
    }
    if name.contains(INVALID_NAME_CHARS) {
        return Err("Page name contains invalid characters".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_content_suffix() {
        assert_eq!(add_content_suffix("page"), "page.md");
        assert_eq!(add_content_suffix("folder/page"), "folder/page.md");
        assert_eq!(add_content_suffix("page.md"), "page.md");
        assert_eq!(add_content_suffix("folder/"), "folder/");
        assert_eq!(add_content_suffix(""), "");
    }

    #[test]
    fn test_remove_content_suffix_is_idempotent() {
        assert_eq!(remove_content_suffix("folder/page.md"), "folder/page");
        assert_eq!(remove_content_suffix("folder/page"), "folder/page");
        assert_eq!(remove_content_suffix(&remove_content_suffix("a.md")), "a");
        assert_eq!(remove_content_suffix(""), "");
    }

    #[test]
    fn test_suffix_roundtrip_for_page_paths() {
        for p in ["page", "folder/page", "a/b/c", "index"] {
            assert_eq!(remove_content_suffix(&add_content_suffix(p)), p);
        }
    }

    #[test]
    fn test_parent_and_leaf() {
        assert_eq!(parent_of("folder/sub/page"), "folder/sub");
        assert_eq!(parent_of("page"), "");
        assert_eq!(parent_of(""), "");
        assert_eq!(parent_of("/"), "");

        assert_eq!(leaf_of("folder/sub/page.md"), "page");
        assert_eq!(leaf_of("page"), "page");
        assert_eq!(leaf_of(""), "");
        assert_eq!(leaf_of("/"), "");
    }

    #[test]
    fn test_segments_and_join() {
        assert_eq!(path_segments("/a//b/c/"), vec!["a", "b", "c"]);
        assert!(path_segments("/").is_empty());

        assert_eq!(join_paths(&["/a/", "b", "", "/c"]), "a/b/c");
        assert_eq!(join_paths(&["", "/"]), "");
        assert_eq!(join_paths(&["", "page"]), "page");
    }

    #[test]
    fn test_resolve_route_path_folder_forms() {
        let root = resolve_route_path("");
        assert_eq!(root.logical, "index");
        assert!(root.is_folder);

        let folder = resolve_route_path("docs/");
        assert_eq!(folder.logical, "docs/index");
        assert!(folder.is_folder);
        assert_eq!(folder.storage_name(), "docs/index.md");
    }

    #[test]
    fn test_resolve_route_path_page_forms() {
        let page = resolve_route_path("/docs/intro.md");
        assert_eq!(page.logical, "docs/intro");
        assert!(!page.is_folder);

        let index = resolve_route_path("docs/index");
        assert!(is_index_path(&index.logical));
        assert!(!index.is_folder);
    }

    #[test]
    fn test_hrefs() {
        assert_eq!(page_href("folder/page.md"), "/page/folder/page");
        assert_eq!(edit_href("/folder/page"), "/edit/folder/page");
    }

    #[test]
    fn test_route_tail_keeps_folder_slash() {
        assert_eq!(route_tail("/page/docs/", "/page"), "docs/");
        assert_eq!(route_tail("/page", "/page"), "");
        assert_eq!(route_tail("/page/", "/page"), "");
        assert_eq!(route_tail("/edit/my%20notes/todo", "/edit"), "my notes/todo");
    }

    #[test]
    fn test_breadcrumb_trail() {
        let trail = breadcrumb_trail("docs/api/intro.md");
        let labels: Vec<_> = trail.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "docs", "api", "intro"]);
        assert_eq!(trail[0].href.as_deref(), Some("/page/index"));
        assert_eq!(trail[1].href.as_deref(), Some("/page/docs/index"));
        assert_eq!(trail[2].href.as_deref(), Some("/page/docs/api/index"));
        assert_eq!(trail[3].href, None);

        assert_eq!(breadcrumb_trail("").len(), 1);
    }

    #[test]
    fn test_validate_page_name() {
        assert!(validate_page_name("2024-01-02T10-11-12").is_ok());
        assert_eq!(
            validate_page_name("  ").unwrap_err(),
            "Page name cannot be empty"
        );
        assert_eq!(
            validate_page_name("a/b").unwrap_err(),
            "Page name cannot contain slashes"
        );
        assert_eq!(
            validate_page_name("what?").unwrap_err(),
            "Page name contains invalid characters"
        );
    }
}
