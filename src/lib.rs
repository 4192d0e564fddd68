pub mod browser;
pub mod config;
pub mod display;
pub mod error;
pub mod hub;
pub mod proxy;
pub mod source;
pub mod types;

pub use browser::{Browser, DisplayState, FETCH_ERROR_MESSAGE};
pub use config::Config;
pub use display::{format_file_size, FileCategory};
pub use error::{BrowseError, Result};
pub use hub::HubDataset;
pub use proxy::{handle_download, handle_listing, ProxyResponse};
pub use source::DatasetSource;
pub use types::{BreadcrumbItem, EntryKind, FileItem, LfsPointer, RawFile};
