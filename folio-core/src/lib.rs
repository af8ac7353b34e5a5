//! folio-core: framework-agnostic core for the folio portfolio backend.
//!
//! Holds the project data model and read-only catalog, the structured
//! error type shared by every crate, and the key/value configuration store.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod project;

pub use catalog::{Catalog, CatalogFilter};
pub use config::{load_env_config, FolioConfig, FolioConfigSnapshot};
pub use errors::{ErrorKind, FolioError, FolioResult};
pub use project::ProjectRecord;
