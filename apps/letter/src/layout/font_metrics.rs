//! Static font-metric tables for the three families the letter page loads.
//!
//! Character widths are in em units (relative to font size). This approximates what a
//! canvas `measureText` call returns for the same font: no kerning, no ligatures. Good
//! enough to wrap a letter offline and to test the wrap engine against realistic widths.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::wrap::TextMeasurer;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// Letter body, a contemporary serif.
    Lora,
    /// Page chrome, a geometric sans-serif.
    Geist,
    /// Monospace companion of Geist.
    GeistMono,
}

impl FromStr for FontFamily {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lora" => Ok(FontFamily::Lora),
            "geist" => Ok(FontFamily::Geist),
            "geist-mono" | "geist_mono" | "geistmono" => Ok(FontFamily::GeistMono),
            other => Err(AppError::Validation(format!(
                "unknown font family '{other}' (expected lora, geist or geist-mono)"
            ))),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View configuration
// ────────────────────────────────────────────────────────────────────────────

/// Typography and geometry of the letter column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub font: FontFamily,
    /// Size of the active (focused) line, which is the widest rendering of any line.
    pub font_size_px: f32,
    pub content_width_px: f32,
    /// Fraction of the column used for wrapping; the active line is drawn scaled by 1.12.
    pub wrap_width_factor: f32,
}

impl ViewConfig {
    pub fn wrap_width_px(&self) -> f32 {
        self.content_width_px * self.wrap_width_factor
    }

    pub fn measurer(&self) -> ScaledFont {
        ScaledFont::new(self.font, self.font_size_px)
    }
}

/// Default column: `max-w-prose` (65ch ≈ 608px) with 28px active-line text.
pub fn default_view_config(font: FontFamily) -> ViewConfig {
    ViewConfig {
        font,
        font_size_px: 28.0,
        content_width_px: 608.0,
        wrap_width_factor: 0.88,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (curly quotes, dashes, accented letters).
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else if c.is_whitespace() {
                    self.widths[0]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// A metric table at a concrete pixel size. This is the crate's built-in measurer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFont {
    pub font: FontFamily,
    pub size_px: f32,
}

impl ScaledFont {
    pub fn new(font: FontFamily, size_px: f32) -> Self {
        ScaledFont { font, size_px }
    }
}

impl TextMeasurer for ScaledFont {
    fn measure(&self, text: &str) -> f32 {
        get_metrics(&self.font).measure_em(text) * self.size_px
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Lora: brushed serif used for the letter text.
static LORA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Lora,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.27, 0.40, 0.60, 0.56, 0.80, 0.72, 0.22, 0.34, 0.34, 0.44, 0.58, 0.25, 0.36, 0.25, 0.38,
        // 0     1     2     3     4     5     6     7     8     9
        0.58, 0.42, 0.54, 0.53, 0.57, 0.53, 0.57, 0.50, 0.57, 0.57,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.58, 0.58, 0.58, 0.45, 0.90,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.68, 0.63, 0.66, 0.72, 0.61, 0.58, 0.71, 0.78, 0.36, 0.40, 0.68, 0.58, 0.89,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.75, 0.74, 0.60, 0.74, 0.66, 0.53, 0.61, 0.73, 0.67, 0.98, 0.66, 0.62, 0.60,
        // [     \     ]     ^     _     `
        0.34, 0.38, 0.34, 0.52, 0.50, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.55, 0.46, 0.56, 0.49, 0.33, 0.50, 0.57, 0.28, 0.27, 0.52, 0.28, 0.86,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.57, 0.53, 0.56, 0.55, 0.40, 0.42, 0.33, 0.56, 0.49, 0.74, 0.49, 0.49, 0.44,
        // {     |     }     ~
        0.34, 0.24, 0.34, 0.58,
    ],
    average_char_width: 0.52,
};

/// Geist: geometric sans used for headings and chrome.
static GEIST_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Geist,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.26, 0.28, 0.38, 0.62, 0.58, 0.84, 0.66, 0.21, 0.34, 0.34, 0.44, 0.60, 0.26, 0.40, 0.26, 0.36,
        // 0     1     2     3     4     5     6     7     8     9
        0.60, 0.42, 0.57, 0.58, 0.60, 0.58, 0.59, 0.52, 0.59, 0.59,
        // :     ;     <     =     >     ?     @
        0.26, 0.26, 0.60, 0.60, 0.60, 0.50, 0.96,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.66, 0.64, 0.68, 0.68, 0.58, 0.55, 0.70, 0.70, 0.26, 0.50, 0.64, 0.54, 0.84,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.71, 0.72, 0.62, 0.72, 0.64, 0.60, 0.59, 0.69, 0.65, 0.92, 0.63, 0.62, 0.60,
        // [     \     ]     ^     _     `
        0.34, 0.36, 0.34, 0.50, 0.48, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.54, 0.58, 0.52, 0.58, 0.54, 0.34, 0.58, 0.56, 0.24, 0.24, 0.52, 0.24, 0.84,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.58, 0.58, 0.37, 0.50, 0.35, 0.56, 0.52, 0.76, 0.52, 0.52, 0.50,
        // {     |     }     ~
        0.34, 0.26, 0.34, 0.60,
    ],
    average_char_width: 0.54,
};

/// Geist Mono: every glyph advances 0.6em.
static GEIST_MONO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::GeistMono,
    widths: [0.60; 95],
    average_char_width: 0.60,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Lora => &LORA_TABLE,
        FontFamily::Geist => &GEIST_TABLE,
        FontFamily::GeistMono => &GEIST_MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
