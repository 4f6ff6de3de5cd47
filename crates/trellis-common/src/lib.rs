//! Common infrastructure for the Trellis markup builder.
//!
//! This crate provides the pieces shared by the HTML, JavaScript and CSS
//! object models:
//! - **Formatter** - the text sink every model serializes into
//! - **Errors** - the two failure kinds surfaced by the builders
//! - **Warning System** - colored, deduplicated diagnostics for lossy output
//! - **Resources** - opaque references to external script and style files

pub mod error;
pub mod formatter;
pub mod resource;
pub mod warning;

pub use error::{MarkupError, Result};
pub use formatter::{Formatter, Renderable};
pub use resource::ExternalResource;
