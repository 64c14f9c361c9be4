//! Render commands.
//!
//! Every editor operation returns an ordered list of [`RenderCommand`]s instead of mutating a
//! platform text view. A host applies them in order to its own attributed-text primitive; the
//! same list always leaves the host's text, styles and caret in the state the core expects.

use crate::offsets::TextRange;
use crate::style::{StyleRole, TextStyle};

/// A single text, style or caret change for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Replace `range` (UTF-16, in the text as it is before this command) with `text`.
    ReplaceText {
        /// Range being replaced; empty for a pure insertion.
        range: TextRange,
        /// Replacement text.
        text: String,
    },
    /// Merge `style` onto the text in `range` (UTF-16).
    ApplyStyle {
        /// Styled range.
        range: TextRange,
        /// What the style means.
        role: StyleRole,
        /// Attributes to merge.
        style: TextStyle,
    },
    /// Move the caret to a UTF-16 offset.
    SetCursor {
        /// New caret offset.
        offset: usize,
    },
}

impl RenderCommand {
    /// Convenience constructor for [`RenderCommand::ApplyStyle`].
    pub fn style(range: TextRange, role: StyleRole, style: &TextStyle) -> Self {
        Self::ApplyStyle {
            range,
            role,
            style: style.clone(),
        }
    }

    /// Returns `true` for [`RenderCommand::ApplyStyle`].
    pub fn is_style(&self) -> bool {
        matches!(self, Self::ApplyStyle { .. })
    }
}
