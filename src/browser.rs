use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::{
    error::{BrowseError, Result},
    proxy::{self, ProxyResponse},
    source::DatasetSource,
    types::{BreadcrumbItem, EntryKind, FileItem},
};

/// The one user-facing message shown for any failed listing fetch
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load files. Please try again.";

const DOWNLOAD_ENDPOINT: &str = "/api/download";
const PDF_VIEWER: &str = "https://drive.google.com/viewerng/viewer";

/// Mutually exclusive display state layered over the navigation data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Error,
    Loaded,
}

/// Client-side navigation state: current directory, breadcrumb trail, and
/// the listing last fetched for it
///
/// Fetches are identified by a monotonically increasing generation id;
/// a completion carrying a stale generation is discarded, so two quick
/// navigations cannot leave the older listing on screen.
#[derive(Debug, Default)]
pub struct Browser {
    current_path: String,
    breadcrumbs: Vec<BreadcrumbItem>,
    files: Vec<FileItem>,
    state: DisplayState,
    generation: u64,
}

impl Browser {
    /// Fresh state pointed at the dataset root
    pub fn new() -> Self {
        Self {
            breadcrumbs: vec![BreadcrumbItem::root()],
            ..Self::default()
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbItem] {
        &self.breadcrumbs
    }

    pub fn files(&self) -> &[FileItem] {
        &self.files
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Fixed user-facing message, present only in the error state
    pub fn error_message(&self) -> Option<&'static str> {
        (self.state == DisplayState::Error).then_some(FETCH_ERROR_MESSAGE)
    }

    /// Start a listing fetch for the current path
    ///
    /// Clears any prior error, enters `Loading`, and hands out the
    /// generation id the completion must present to `finish_fetch`.
    pub fn begin_fetch(&mut self) -> u64 {
        self.state = DisplayState::Loading;
        self.generation += 1;
        self.generation
    }

    /// Complete a listing fetch started by `begin_fetch`
    ///
    /// Success replaces the listing; failure keeps the stale listing but
    /// switches to the error view. Completions for superseded generations
    /// are dropped.
    pub fn finish_fetch(&mut self, generation: u64, result: Result<Vec<FileItem>>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale listing fetch");
            return;
        }

        match result {
            Ok(files) => {
                self.files = files;
                self.state = DisplayState::Loaded;
            }
            Err(err) => {
                debug!(%err, path = %self.current_path, "listing fetch failed");
                self.state = DisplayState::Error;
            }
        }
    }

    /// Navigate into a directory item
    ///
    /// Recomputes the breadcrumb trail from scratch from the new path and
    /// starts a fetch, returning its generation. File items are ignored.
    pub fn open_directory(&mut self, item: &FileItem) -> Option<u64> {
        if item.kind != EntryKind::Directory {
            return None;
        }

        self.current_path = item.path.clone();
        self.breadcrumbs = breadcrumbs_for(&self.current_path);
        Some(self.begin_fetch())
    }

    /// Navigate to the breadcrumb at `index`, truncating the trail there
    ///
    /// The surviving crumbs are already valid prefixes, so no re-derivation
    /// is needed. Out-of-range indices are ignored.
    pub fn click_breadcrumb(&mut self, index: usize) -> Option<u64> {
        if index >= self.breadcrumbs.len() {
            return None;
        }

        self.breadcrumbs.truncate(index + 1);
        self.current_path = self.breadcrumbs[index].path.clone();
        Some(self.begin_fetch())
    }

    /// Run one listing fetch for the current path through the listing proxy
    /// and apply the outcome
    pub async fn refresh(&mut self, source: &dyn DatasetSource) {
        let generation = self.begin_fetch();
        let path = self.current_path.clone();
        let response = proxy::handle_listing(source, Some(&path)).await;
        self.finish_from_response(generation, &response);
    }

    /// Apply a listing proxy response to a fetch in flight
    ///
    /// A non-success status or a body that does not parse as a listing
    /// array both land in the error state; the proxy relays the upstream
    /// body without validating it, so parsing happens here, defensively.
    pub fn finish_from_response(&mut self, generation: u64, response: &ProxyResponse) {
        if response.status != StatusCode::OK {
            self.finish_fetch(
                generation,
                Err(BrowseError::Upstream {
                    status: response.status,
                }),
            );
            return;
        }

        let parsed = serde_json::from_slice::<Vec<FileItem>>(&response.body)
            .map_err(BrowseError::Serialization);
        self.finish_fetch(generation, parsed);
    }
}

/// Breadcrumb trail for a directory path: the root entry followed by one
/// crumb per path segment, each carrying the cumulative prefix
pub fn breadcrumbs_for(path: &str) -> Vec<BreadcrumbItem> {
    let mut crumbs = vec![BreadcrumbItem::root()];
    let mut prefix = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        crumbs.push(BreadcrumbItem {
            name: segment.to_string(),
            path: prefix.clone(),
        });
    }

    crumbs
}

/// Download proxy URL for a file, relative to the deployment origin
pub fn download_url(origin: &str, path: &str) -> Result<String> {
    let base = format!("{}{}", origin.trim_end_matches('/'), DOWNLOAD_ENDPOINT);
    let url = Url::parse_with_params(&base, &[("path", path)]).map_err(|e| {
        BrowseError::InvalidUrl {
            message: e.to_string(),
        }
    })?;
    Ok(url.into())
}

/// External viewer URL for a PDF, embedding the absolute download URL
pub fn pdf_viewer_url(origin: &str, path: &str) -> Result<String> {
    let target = download_url(origin, path)?;
    let url = Url::parse_with_params(PDF_VIEWER, &[("embedded", "true"), ("url", &target)])
        .map_err(|e| BrowseError::InvalidUrl {
            message: e.to_string(),
        })?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryKind, FileItem};

    fn dir(path: &str) -> FileItem {
        FileItem {
            path: path.to_string(),
            kind: EntryKind::Directory,
            size: None,
            lfs: None,
        }
    }

    fn file(path: &str, size: u64) -> FileItem {
        FileItem {
            path: path.to_string(),
            kind: EntryKind::File,
            size: Some(size),
            lfs: None,
        }
    }

    #[test]
    fn test_breadcrumbs_for_nested_path() {
        let crumbs = breadcrumbs_for("a/b");
        assert_eq!(
            crumbs,
            vec![
                BreadcrumbItem::root(),
                BreadcrumbItem {
                    name: "a".to_string(),
                    path: "a".to_string()
                },
                BreadcrumbItem {
                    name: "b".to_string(),
                    path: "a/b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_for_root() {
        assert_eq!(breadcrumbs_for(""), vec![BreadcrumbItem::root()]);
    }

    #[test]
    fn test_open_directory_rebuilds_trail() {
        let mut browser = Browser::new();
        let generation = browser.open_directory(&dir("a/b")).unwrap();

        assert_eq!(browser.current_path(), "a/b");
        assert_eq!(browser.breadcrumbs().len(), 3);
        assert_eq!(browser.state(), DisplayState::Loading);

        browser.finish_fetch(generation, Ok(vec![file("a/b/c.txt", 10)]));
        assert_eq!(browser.state(), DisplayState::Loaded);
        assert_eq!(browser.files().len(), 1);
    }

    #[test]
    fn test_open_directory_ignores_files() {
        let mut browser = Browser::new();
        assert!(browser.open_directory(&file("a.txt", 10)).is_none());
        assert_eq!(browser.state(), DisplayState::Idle);
    }

    #[test]
    fn test_breadcrumb_click_resets_to_root() {
        let mut browser = Browser::new();
        browser.open_directory(&dir("a/b/c"));

        let generation = browser.click_breadcrumb(0).unwrap();
        assert_eq!(browser.current_path(), "");
        assert_eq!(browser.breadcrumbs(), &[BreadcrumbItem::root()]);

        browser.finish_fetch(generation, Ok(vec![]));
        assert_eq!(browser.state(), DisplayState::Loaded);
    }

    #[test]
    fn test_breadcrumb_click_truncates_trail() {
        let mut browser = Browser::new();
        browser.open_directory(&dir("a/b/c"));

        browser.click_breadcrumb(2).unwrap();
        assert_eq!(browser.current_path(), "a/b");
        assert_eq!(browser.breadcrumbs().len(), 3);
    }

    #[test]
    fn test_breadcrumb_click_out_of_range() {
        let mut browser = Browser::new();
        assert!(browser.click_breadcrumb(5).is_none());
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut browser = Browser::new();
        let first = browser.open_directory(&dir("a")).unwrap();
        let second = browser.open_directory(&dir("a/b")).unwrap();

        // The older fetch completes after the newer one was dispatched
        browser.finish_fetch(first, Ok(vec![file("a/old.txt", 1)]));
        assert_eq!(browser.state(), DisplayState::Loading);
        assert!(browser.files().is_empty());

        browser.finish_fetch(second, Ok(vec![file("a/b/new.txt", 2)]));
        assert_eq!(browser.state(), DisplayState::Loaded);
        assert_eq!(browser.files()[0].path, "a/b/new.txt");
    }

    #[test]
    fn test_fetch_error_keeps_stale_listing() {
        let mut browser = Browser::new();
        let generation = browser.begin_fetch();
        browser.finish_fetch(generation, Ok(vec![file("a.txt", 10)]));

        let generation = browser.open_directory(&dir("b")).unwrap();
        browser.finish_fetch(
            generation,
            Err(BrowseError::Upstream {
                status: StatusCode::NOT_FOUND,
            }),
        );

        assert_eq!(browser.state(), DisplayState::Error);
        assert_eq!(browser.error_message(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(browser.files().len(), 1);
    }

    #[test]
    fn test_malformed_listing_body_is_an_error() {
        let mut browser = Browser::new();
        let generation = browser.begin_fetch();
        let response = ProxyResponse {
            status: StatusCode::OK,
            content_type: "application/json".to_string(),
            content_disposition: None,
            body: bytes::Bytes::from_static(b"{\"not\": \"an array\"}"),
        };

        browser.finish_from_response(generation, &response);
        assert_eq!(browser.state(), DisplayState::Error);
    }

    #[test]
    fn test_download_url() {
        let url = download_url("https://example.org", "a/b/report.pdf").unwrap();
        assert_eq!(
            url,
            "https://example.org/api/download?path=a%2Fb%2Freport.pdf"
        );
    }

    #[test]
    fn test_pdf_viewer_url_embeds_download_url() {
        let url = pdf_viewer_url("https://example.org", "a/report.pdf").unwrap();
        assert!(url.starts_with("https://drive.google.com/viewerng/viewer?embedded=true&url="));
        assert!(url.contains("example.org"));
    }
}
