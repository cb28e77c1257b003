// Measured line-wrap engine.
// Implements: hyphen-aware greedy wrap with widow control, built-in font metrics, emphasis spans.
// The wrap engine only sees a `TextMeasurer`; it never touches a rendering surface.

pub mod emphasis;
pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by composition and the binary.
pub use emphasis::{split_emphasis, Span, DEFAULT_EMPHASIS_PHRASES};
pub use font_metrics::{default_view_config, FontFamily, ScaledFont, ViewConfig};
pub use wrap::{wrap_letter_to_measured_lines, TextMeasurer};
