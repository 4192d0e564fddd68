use serde::{Deserialize, Serialize};

/// One entry in a directory listing, as returned by the upstream tree API
///
/// Deserialized defensively: fields the upstream omits stay `None`, and
/// unknown entry types fall back to `File` so a contract drift upstream
/// degrades rendering instead of breaking it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileItem {
    /// Path relative to the dataset root, slash-separated
    pub path: String,
    /// Type of entry
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Byte size, present for plain files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Large-file-storage metadata, present for LFS-tracked files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lfs: Option<LfsPointer>,
}

/// Type of directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    #[serde(other)]
    File,
}

/// Nested LFS metadata on a tree entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LfsPointer {
    /// Byte size of the LFS-tracked content
    #[serde(default)]
    pub size: Option<u64>,
}

/// One segment of the breadcrumb trail
///
/// Invariant: a trail is a strictly increasing-depth prefix chain of the
/// current directory path, always starting with the root entry
/// (`name: "Home"`, `path: ""`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// Display label; `"Home"` for the root
    pub name: String,
    /// Cumulative directory path up to and including this segment
    pub path: String,
}

impl BreadcrumbItem {
    pub fn root() -> Self {
        Self {
            name: "Home".to_string(),
            path: String::new(),
        }
    }
}

/// Raw bytes of a resolved file, buffered fully in memory
#[derive(Debug, Clone)]
pub struct RawFile {
    /// File content
    pub content: bytes::Bytes,
    /// `Content-Type` reported by the upstream response, when present
    pub content_type: Option<String>,
}

impl FileItem {
    /// Display name: the final `/`-delimited segment of the path
    pub fn name(&self) -> &str {
        crate::display::file_name(&self.path)
    }

    /// Byte count used for display: the LFS size takes precedence when
    /// present, since `size` may be absent for LFS-tracked files
    pub fn display_bytes(&self) -> Option<u64> {
        self.lfs.as_ref().and_then(|lfs| lfs.size).or(self.size)
    }

    /// Formatted size label, `"N/A"` when no size is known
    pub fn display_size(&self) -> String {
        crate::display::format_file_size(self.display_bytes())
    }
}
