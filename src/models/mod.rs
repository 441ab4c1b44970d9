use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum NodeKind {
    File,
    #[serde(alias = "directory")]
    Folder,
}

/// One entry of the backend file tree.
///
/// The backend wraps everything in a single synthetic root folder named after
/// the repository, whose `path` is `""`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct FileTreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileTreeNode>,
}

impl FileTreeNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct FilesResponse {
    #[serde(default)]
    pub files: Vec<FileTreeNode>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct WikiConfig {
    #[serde(rename = "wikiPath", default)]
    pub wiki_path: String,
}

impl WikiConfig {
    pub fn is_configured(&self) -> bool {
        !self.wiki_path.trim().is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct InitRequest {
    pub path: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SaveRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DeleteRequest {
    pub filename: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RenameRequest {
    #[serde(rename = "oldPath")]
    pub old_path: String,
    #[serde(rename = "newPath")]
    pub new_path: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CommitRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RenderRequest {
    pub markdown: String,
}

/// Raw `/api/status` payload.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StatusResponse {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub ahead: u32,
    #[serde(default)]
    pub behind: u32,
    #[serde(default)]
    pub modified: u32,
    #[serde(default)]
    pub untracked: u32,
}
