//! Pure display derivations for the file listing UI.

/// Format a byte count for display
///
/// Sizes below one megabyte render in KB, the rest in MB, both to two
/// decimal places. An absent size renders as `"N/A"`.
pub fn format_file_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "N/A".to_string();
    };

    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1.0 {
        format!("{:.2} MB", mb)
    } else {
        format!("{:.2} KB", kb)
    }
}

/// Final `/`-delimited segment of a path, used as the display label
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Display category of a file, derived from its lowercased extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Pdf,
    Markdown,
    Other,
}

impl FileCategory {
    pub fn from_path(path: &str) -> Self {
        let name = file_name(path);
        match name.rsplit('.').next().map(str::to_lowercase).as_deref() {
            Some("pdf") => FileCategory::Pdf,
            Some("md") => FileCategory::Markdown,
            _ => FileCategory::Other,
        }
    }

    /// Icon name shown next to the file
    pub fn icon(self) -> &'static str {
        match self {
            FileCategory::Pdf => "file-type",
            FileCategory::Markdown => "file-text",
            FileCategory::Other => "file",
        }
    }

    /// Whether the external PDF viewer applies to this file
    pub fn viewable(self) -> bool {
        self == FileCategory::Pdf
    }
}
