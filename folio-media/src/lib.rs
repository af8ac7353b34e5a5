//! # folio-media
//!
//! Decides which picture to show for a portfolio project.
//!
//! ```text
//! ┌──────────────────┐
//! │  MediaResolver   │  ← one display URL, animated → image → placeholder
//! │  Gallery         │  ← primaries + numbered extras, fixed order
//! ├──────────────────┤
//! │  MediaExistence  │  ← "does this file exist?" (filesystem, fakes in tests)
//! └──────────────────┘
//! ```
//!
//! Existence checks distinguish a confident "absent" (`Ok(false)`) from an
//! infrastructure failure (`Err`). The resolver treats failures as "unknown"
//! and falls back to trusting the record's own references (offline mode)
//! instead of showing the placeholder.

mod error;
pub mod gallery;
mod kind;
mod probe;
pub mod resolver;
mod settings;
pub mod store;

pub use error::{MediaError, MediaResult};
pub use gallery::{assemble_gallery, slugify, Gallery, MediaCandidate};
pub use kind::{MediaKind, MediaReference};
pub use resolver::{cycle_media_type, DisplayMedia, DisplayMediaView, MediaResolver, ResolutionMode};
pub use settings::MediaSettings;
pub use store::{FsMediaStore, MediaExistence, MediaInfo};
