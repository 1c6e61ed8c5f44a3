pub mod dispatcher;
pub mod etl;
pub mod extractor;
pub mod generators;

pub use crate::domain::model::{DirectoryRecord, ExtensionKind, OutputFormat};
pub use crate::domain::ports::{ConfigProvider, DocumentSource, Storage};
pub use crate::utils::error::Result;
