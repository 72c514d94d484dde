pub mod bundle;
pub mod config;
pub mod error;
pub mod gather;
pub mod language;
pub mod options;
pub mod render;
pub mod response_file;
pub mod sort;

pub use bundle::{BundleReport, bundle, collect_files};
pub use config::{Config, Exclusions, FolderMatch};
pub use error::{AppError, Result};
pub use gather::{CandidateFile, filter_relevant};
pub use language::filter_by_language;
pub use options::{BundleOptions, BundleRequest, LanguageSelector, SortKey};
pub use render::{LINE_ENDING, Renderer, SEPARATOR};
pub use response_file::{RESPONSE_FILE_NAME, ResponseFile, expand_args};
pub use sort::sort_files;
