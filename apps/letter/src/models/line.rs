use serde::{Deserialize, Serialize};

/// One visually laid-out row of the letter.
///
/// `is_empty` marks blank source lines (paragraph breaks) and whitespace-only wrapped content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Stable identifier, unique within one wrap result (`l-0`, `l-1`, ...).
    pub id: String,
    pub text: String,
    pub is_empty: bool,
}

impl Line {
    pub(crate) fn new(index: usize, text: String) -> Self {
        let is_empty = text.trim().is_empty();
        Line {
            id: format!("l-{index}"),
            text,
            is_empty,
        }
    }
}
