use crate::{error::Result, types::RawFile};
use async_trait::async_trait;
use bytes::Bytes;

/// Core abstraction over the upstream dataset API
///
/// Implementors provide read-only access to one dataset's tree and raw
/// files. The proxy handlers talk to the upstream only through this trait,
/// so tests can substitute an in-memory source.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the tree listing for a directory path (empty string for the
    /// dataset root)
    ///
    /// Returns the upstream JSON body verbatim; the shape of the listing
    /// is never inspected or validated here.
    async fn fetch_tree(&self, path: &str) -> Result<Bytes>;

    /// Fetch the raw bytes of a single file by its path
    async fn fetch_file(&self, path: &str) -> Result<RawFile>;

    /// Get a human-readable identifier for this source (for logging/debugging)
    fn identifier(&self) -> String;
}
