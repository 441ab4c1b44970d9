use crate::models::FileTreeNode;
use crate::storage::{load_json_from_storage, save_json_to_storage, EXPANDED_FOLDERS_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every folder below the synthetic root, in document order.
///
/// Only the first root node is looked at, and only when it is a folder. The
/// root itself is not part of the result.
pub(crate) fn extract_folder_paths(tree: &[FileTreeNode]) -> Vec<String> {
    fn collect(nodes: &[FileTreeNode], out: Vec<String>) -> Vec<String> {
        nodes
            .iter()
            .filter(|n| n.is_folder())
            .fold(out, |mut acc, n| {
                acc.push(n.path.clone());
                collect(&n.children, acc)
            })
    }

    match tree.first() {
        Some(root) if root.is_folder() => collect(&root.children, Vec::new()),
        _ => Vec::new(),
    }
}

/// Target folders for pickers; `""` is the wiki root.
pub(crate) fn folder_choices(tree: &[FileTreeNode]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(extract_folder_paths(tree))
        .collect()
}

pub(crate) fn folder_label(path: &str) -> String {
    if path.is_empty() {
        "/ (root)".to_string()
    } else {
        path.to_string()
    }
}

/// Expand/collapse state of the sidebar tree. Unknown folders are expanded.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct ExpandedFolders(HashMap<String, bool>);

impl ExpandedFolders {
    pub fn load() -> Self {
        load_json_from_storage(EXPANDED_FOLDERS_KEY).unwrap_or_default()
    }

    pub fn save(&self) {
        save_json_to_storage(EXPANDED_FOLDERS_KEY, self);
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.0.get(path).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, path: &str) {
        let next = !self.is_expanded(path);
        self.0.insert(path.to_string(), next);
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

    fn folder(path: &str, children: Vec<FileTreeNode>) -> FileTreeNode {
        FileTreeNode {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: NodeKind::Folder,
            path: path.to_string(),
            children,
        }
    }

    fn sample() -> Vec<FileTreeNode> {
        vec![folder(
            "",
            vec![
                file("index.md"),
                folder(
                    "docs",
                    vec![
                        file("docs/intro.md"),
                        folder("docs/api", vec![file("docs/api/index.md")]),
                    ],
                ),
                folder("journal", vec![]),
            ],
        )]
    }

    #[test]
    fn test_extract_folder_paths_preorder() {
        assert_eq!(
            extract_folder_paths(&sample()),
            vec!["docs", "docs/api", "journal"]
        );
    }

    #[test]
    fn test_extract_ignores_non_folder_root_and_extra_roots() {
        assert!(extract_folder_paths(&[]).is_empty());
        assert!(extract_folder_paths(&[file("a.md"), folder("b", vec![])]).is_empty());

        let mut tree = sample();
        tree.push(folder("other", vec![folder("other/x", vec![])]));
        assert_eq!(extract_folder_paths(&tree).len(), 3);
    }

    #[test]
    fn test_extract_counts_every_folder_once() {
        let paths = extract_folder_paths(&sample());
        let mut dedup = paths.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), paths.len());
    }

    #[test]
    fn test_folder_choices_start_with_root() {
        let choices = folder_choices(&sample());
        assert_eq!(choices[0], "");
        assert_eq!(choices.len(), 4);
        assert_eq!(folder_label(&choices[0]), "/ (root)");
        assert_eq!(folder_label(&choices[1]), "docs");
    }

    #[test]
    fn test_expanded_folders_default_and_toggle() {
        let mut state = ExpandedFolders::default();
        assert!(state.is_expanded("docs"));

        state.toggle("docs");
        assert!(!state.is_expanded("docs"));
        assert!(state.is_expanded("journal"));

        state.toggle("docs");
        assert!(state.is_expanded("docs"));
    }

    #[test]
    fn test_expanded_folders_json_shape() {
        let mut state = ExpandedFolders::default();
        state.toggle("docs");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"docs":false}"#);

        let back: ExpandedFolders = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
