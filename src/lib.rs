pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::HttpFetcher, source::PdfDirectorySource, storage::LocalStorage};
pub use config::{ActionFlags, AppConfig, CliConfig, LogFormat};
pub use crate::core::{dispatcher::Command, etl::DirectoryEngine, etl::RunSummary};
pub use domain::model::{DirectoryRecord, ExtensionKind, OutputFormat};
pub use utils::error::{DirectoryError, Result};
