//! Letter personalization and measured line layout.
//!
//! Two independent engines share no state:
//! - [`personalization`]: placeholders, greeting/closing rewriting, recipient parsing, slugs.
//! - [`layout`]: measured line wrapping over an injected [`layout::TextMeasurer`].
//!
//! [`compose`] wires them together for the binary.

pub mod compose;
pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod personalization;
pub mod text;
