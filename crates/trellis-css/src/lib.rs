//! CSS fragments for the Trellis markup builder.
//!
//! # Scope
//!
//! This crate builds and serializes the CSS that ends up inside a document:
//! - **Declarations** ([CSS Syntax § 5.4.5](https://www.w3.org/TR/css-syntax-3/#consume-declaration))
//!   - ordered declaration lists, last write per property wins
//!   - inline form for `style` attributes
//!
//! - **Rules and stylesheets** ([CSS Syntax § 5.4.3](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule))
//!   - selector lists with a declaration block
//!   - pretty or compact output through the shared formatter
//!
//! # Not Yet Implemented
//!
//! - At-rules (`@media`, `@font-face`, `@import`)
//! - Value validation

/// Declarations and declaration lists.
pub mod declaration;
/// Rules and stylesheets.
pub mod stylesheet;

pub use declaration::{CssDeclaration, CssDeclarationList};
pub use stylesheet::{CssRule, CssStyleSheet};
