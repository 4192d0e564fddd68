use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::json;
use tracing::error;

use crate::{
    error::{BrowseError, Result},
    source::DatasetSource,
};

const OCTET_STREAM: &str = "application/octet-stream";
const DEFAULT_FILENAME: &str = "download";

/// Runtime-agnostic HTTP response produced by the proxy handlers
///
/// The hosting web runtime writes the status, the `Content-Type` header,
/// the optional `Content-Disposition` header, and the body out verbatim.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub content_disposition: Option<String>,
    pub body: Bytes,
}

impl ProxyResponse {
    fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            content_disposition: None,
            body: Bytes::from(body.to_string()),
        }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }
}

/// Listing proxy: relay the upstream tree listing for a directory path
///
/// `path` defaults to the dataset root when absent. The upstream JSON body
/// is relayed verbatim on success; any failure maps to a 500 with a generic
/// error body, with the cause logged here and never forwarded to the caller.
pub async fn handle_listing(source: &dyn DatasetSource, path: Option<&str>) -> ProxyResponse {
    let path = path.unwrap_or("");

    match source.fetch_tree(path).await {
        Ok(body) => ProxyResponse {
            status: StatusCode::OK,
            content_type: "application/json".to_string(),
            content_disposition: None,
            body,
        },
        Err(err) => {
            error!(source = %source.identifier(), path, %err, "error fetching files");
            ProxyResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch files")
        }
    }
}

/// Download proxy: fetch a file and return it as a browser attachment
///
/// Requires a non-empty `path`; responds 400 without touching the upstream
/// when it is absent. Any upstream failure maps to a 500 with a generic
/// error body.
pub async fn handle_download(source: &dyn DatasetSource, path: Option<&str>) -> ProxyResponse {
    match download(source, path).await {
        Ok(response) => response,
        Err(BrowseError::MissingParameter { .. }) => {
            ProxyResponse::error(StatusCode::BAD_REQUEST, "Path is required")
        }
        Err(err) => {
            error!(
                source = %source.identifier(),
                path = path.unwrap_or(""),
                %err,
                "error downloading file"
            );
            ProxyResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to download file",
            )
        }
    }
}

/// Fetch the file and build the attachment response
///
/// The whole file is buffered in memory before the response is built.
/// `Content-Type` is copied from the upstream when present, and
/// `Content-Disposition` names the file after the final path segment.
async fn download(source: &dyn DatasetSource, path: Option<&str>) -> Result<ProxyResponse> {
    let path = path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BrowseError::MissingParameter {
            name: "path".to_string(),
        })?;

    let file = source.fetch_file(path).await?;

    Ok(ProxyResponse {
        status: StatusCode::OK,
        content_type: file.content_type.unwrap_or_else(|| OCTET_STREAM.to_string()),
        content_disposition: Some(format!("attachment; filename=\"{}\"", attachment_name(path))),
        body: file.content,
    })
}

/// Final `/`-delimited segment of the path, or a literal default when the
/// path ends in a separator
fn attachment_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => DEFAULT_FILENAME,
    }
}
