//! folio-axum: Axum adapter for folio.
//!
//! Builds the router around shared application state, renders
//! `FolioError`s as JSON envelopes and carries the middleware stack every
//! folio service runs behind.

pub mod app;
pub mod layers;
pub mod statics;
mod error;
pub use error::{json_rejection, AxumResult, FolioAxumError};

pub use app::{axum, AxumApp};
