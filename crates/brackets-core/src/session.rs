//! Editor session: one buffer, one caret, one editing mode.
//!
//! [`EditorSession`] owns the text of a single document and converts input events into
//! [`RenderCommand`]s. It never touches a view; a host applies the returned commands to its own
//! text widget and re-reads [`EditorSession::gutter`] after each event.
//!
//! # State machine
//!
//! ```text
//!            begin_editing / first keystroke
//!   ┌──────┐ ─────────────────────────────▶ ┌─────────┐
//!   │ Idle │                                 │ Editing │
//!   └──────┘ ◀───────────────────────────── └─────────┘
//!                      end_editing
//! ```
//!
//! Triggers fire and the current line is tracked only while editing.
//!
//! # Example
//!
//! ```rust
//! use brackets_core::{EditorConfig, EditorSession, RenderCommand};
//! use std::sync::Arc;
//!
//! let mut session = EditorSession::new(Arc::new(EditorConfig::builtin()));
//! session.insert("hello");
//! let commands = session.insert("{");
//!
//! assert_eq!(session.text(), "hello{ TODO  }");
//! assert_eq!(session.cursor(), 10);
//! assert!(matches!(commands.last(), Some(RenderCommand::SetCursor { offset: 10 })));
//! ```

use crate::commands::RenderCommand;
use crate::config::EditorConfig;
use crate::gutter::{Gutter, line_style_commands};
use crate::line_ending::{LineEnding, normalize_to_lf};
use crate::line_index::LineIndex;
use crate::offsets::{TextRange, Utf16Converter};
use crate::style::StyleRole;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Editing mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingMode {
    /// Read-only visual mode: no triggers, no current-line highlighting.
    #[default]
    Idle,
    /// Focused and accepting keystrokes.
    Editing,
}

/// Identifies the buffer snapshot a re-highlight pass was computed for.
///
/// Any edit makes every previously issued ticket stale, so results of a pass that raced with a
/// keystroke are discarded rather than applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTicket {
    generation: u64,
}

/// A single-document editor session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: Arc<EditorConfig>,
    index: LineIndex,
    cursor: usize,
    mode: EditingMode,
    line_ending: LineEnding,
    generation: u64,
}

impl EditorSession {
    /// Create an idle session with an empty buffer.
    pub fn new(config: Arc<EditorConfig>) -> Self {
        Self {
            config,
            index: LineIndex::new(),
            cursor: 0,
            mode: EditingMode::Idle,
            line_ending: LineEnding::Lf,
            generation: 0,
        }
    }

    /// Create an idle session holding `text`. The caret starts at the beginning.
    pub fn with_text(config: Arc<EditorConfig>, text: &str) -> Self {
        let mut session = Self::new(config);
        session.replace_buffer(text);
        session.cursor = 0;
        session
    }

    /// Shared configuration.
    pub fn config(&self) -> &Arc<EditorConfig> {
        &self.config
    }

    /// Buffer contents (LF newlines).
    pub fn text(&self) -> String {
        self.index.text()
    }

    /// Buffer contents converted back to the line ending of the last wholesale replacement.
    pub fn text_with_line_ending(&self) -> String {
        self.line_ending.apply_to_text(&self.index.text())
    }

    /// Line ending detected in the last wholesale replacement.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Buffer length in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.index.len_utf16()
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Caret offset (UTF-16).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current editing mode.
    pub fn mode(&self) -> EditingMode {
        self.mode
    }

    /// Returns `true` while editing.
    pub fn is_editing(&self) -> bool {
        self.mode == EditingMode::Editing
    }

    /// Enter editing mode (focus gained).
    pub fn begin_editing(&mut self) {
        if self.mode != EditingMode::Editing {
            tracing::debug!("editing started");
            self.mode = EditingMode::Editing;
        }
    }

    /// Return to idle mode (focus lost).
    pub fn end_editing(&mut self) {
        if self.mode != EditingMode::Idle {
            tracing::debug!("editing ended");
            self.mode = EditingMode::Idle;
        }
    }

    /// 1-based line holding the caret, recomputed from the current buffer. `None` while idle.
    pub fn current_line(&self) -> Option<usize> {
        if !self.is_editing() {
            return None;
        }
        // The caret is kept clamped, so the lookup cannot fail.
        self.index.line_number(self.cursor).ok()
    }

    /// 1-based line holding the caret regardless of mode.
    pub fn caret_line(&self) -> usize {
        self.index.line_number(self.cursor).unwrap_or(1)
    }

    /// Gutter snapshot for the current buffer and caret.
    pub fn gutter(&self) -> Gutter {
        Gutter::build(
            self.index.line_count(),
            self.current_line(),
            self.config.gutter().min_rows,
        )
    }

    /// Gutter label style commands (over [`Gutter::text`]).
    pub fn gutter_style_commands(&self) -> Vec<RenderCommand> {
        self.gutter().style_commands(self.config.gutter())
    }

    /// Per-line styles for a read-only line view of the buffer: the caret's line bright, the
    /// rest dim. While idle every line is dim.
    pub fn line_style_commands(&self) -> Vec<RenderCommand> {
        let gutter = self.config.gutter();
        line_style_commands(
            &self.index.text(),
            self.current_line(),
            &gutter.current,
            &gutter.other,
        )
    }

    /// Move the caret. The offset is clamped into the buffer and onto a char boundary.
    /// Returns the caret's new 1-based line.
    pub fn set_cursor(&mut self, offset: usize) -> usize {
        self.cursor = self.index.clamp_offset(offset);
        self.caret_line()
    }

    /// Handle text typed at the caret.
    ///
    /// A single typed character that matches a trigger expands into its template; anything
    /// else (including pastes that happen to contain a trigger character) is inserted
    /// literally with the plain text style. A keystroke while idle starts editing first.
    pub fn insert(&mut self, text: &str) -> Vec<RenderCommand> {
        self.begin_editing();
        let text = normalize_to_lf(text);
        if text.is_empty() {
            return Vec::new();
        }

        let offset = self.cursor;
        if let Some(instance) = self.config.triggers().fire_text(&text, offset) {
            self.index.insert(offset, &instance.inserted_text);
            self.cursor = instance.cursor;
            self.bump_generation();
            return instance.render_commands(self.config.theme());
        }

        let inserted = self.index.insert(offset, &text);
        self.cursor = offset + inserted;
        self.bump_generation();

        vec![
            RenderCommand::ReplaceText {
                range: TextRange::empty(offset),
                text: text.into_owned(),
            },
            RenderCommand::style(
                TextRange::from_len(offset, inserted),
                StyleRole::Text,
                &self.config.theme().text,
            ),
            RenderCommand::SetCursor {
                offset: self.cursor,
            },
        ]
    }

    /// Delete the grapheme cluster before the caret (or the newline, at a line start).
    pub fn delete_backward(&mut self) -> Vec<RenderCommand> {
        self.begin_editing();
        if self.cursor == 0 {
            return Vec::new();
        }

        let prefix = self.index.line_prefix(self.cursor);
        let removed = match prefix.graphemes(true).next_back() {
            Some(grapheme) => Utf16Converter::len(grapheme),
            None => 1, // the preceding '\n'
        };

        let range = TextRange::new(self.cursor - removed, self.cursor);
        self.index.delete(range);
        self.cursor = range.start;
        self.bump_generation();

        vec![
            RenderCommand::ReplaceText {
                range,
                text: String::new(),
            },
            RenderCommand::SetCursor {
                offset: self.cursor,
            },
        ]
    }

    /// Replace the whole buffer (a programmatic set, not a keystroke).
    ///
    /// Returns the replacement itself, the plain text style over the new buffer, then the
    /// re-highlight pass over every template occurrence. The caret is clamped into the new
    /// buffer.
    pub fn replace_buffer(&mut self, text: &str) -> Vec<RenderCommand> {
        self.line_ending = LineEnding::detect_in_text(text);
        let text = normalize_to_lf(text);
        let old_len = self.index.len_utf16();

        self.index.set_text(&text);
        self.cursor = self.index.clamp_offset(self.cursor);
        self.bump_generation();

        let mut commands = vec![
            RenderCommand::ReplaceText {
                range: TextRange::new(0, old_len),
                text: text.to_string(),
            },
            RenderCommand::style(
                TextRange::new(0, self.index.len_utf16()),
                StyleRole::Text,
                &self.config.theme().text,
            ),
        ];
        commands.extend(self.rehighlight());
        commands.push(RenderCommand::SetCursor {
            offset: self.cursor,
        });
        commands
    }

    /// Full-buffer template re-highlight over the current text.
    pub fn rehighlight(&self) -> Vec<RenderCommand> {
        self.config
            .highlighter()
            .highlight(&self.index.text(), self.config.theme())
    }

    /// Ticket for a re-highlight pass over the current buffer.
    pub fn highlight_ticket(&self) -> HighlightTicket {
        HighlightTicket {
            generation: self.generation,
        }
    }

    /// Returns `true` if no edit happened since `ticket` was issued.
    pub fn is_current(&self, ticket: HighlightTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Accept the results of a re-highlight pass if its ticket is still current.
    pub fn accept_highlight(
        &self,
        ticket: HighlightTicket,
        commands: Vec<RenderCommand>,
    ) -> Option<Vec<RenderCommand>> {
        if self.is_current(ticket) {
            Some(commands)
        } else {
            tracing::trace!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale re-highlight"
            );
            None
        }
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> EditorSession {
        EditorSession::new(Arc::new(EditorConfig::builtin()))
    }

    #[test]
    fn test_starts_idle_and_first_keystroke_starts_editing() {
        let mut session = session();
        assert_eq!(session.mode(), EditingMode::Idle);
        assert_eq!(session.current_line(), None);

        session.insert("a");
        assert_eq!(session.mode(), EditingMode::Editing);
        assert_eq!(session.current_line(), Some(1));

        session.end_editing();
        assert_eq!(session.current_line(), None);
        assert_eq!(session.caret_line(), 1);
    }

    #[test]
    fn test_literal_insert_commands() {
        let mut session = session();
        let commands = session.insert("ab");
        let theme = session.config().theme().clone();

        assert_eq!(
            commands,
            vec![
                RenderCommand::ReplaceText {
                    range: TextRange::empty(0),
                    text: "ab".to_string(),
                },
                RenderCommand::style(TextRange::new(0, 2), StyleRole::Text, &theme.text),
                RenderCommand::SetCursor { offset: 2 },
            ]
        );
    }

    #[test]
    fn test_paste_containing_trigger_is_literal() {
        let mut session = session();
        session.insert("x{y");
        assert_eq!(session.text(), "x{y");
        assert_eq!(session.cursor(), 3);
    }

    #[test]
    fn test_enter_moves_to_new_line() {
        let mut session = session();
        session.insert("a");
        session.insert("\n");
        assert_eq!(session.current_line(), Some(2));
        session.insert("\r\n");
        assert_eq!(session.text(), "a\n\n");
        assert_eq!(session.current_line(), Some(3));
    }

    #[test]
    fn test_delete_backward_graphemes_and_newlines() {
        let mut session = session();
        session.insert("e\u{301}");
        session.insert("\n");
        session.insert("👋");

        session.delete_backward();
        assert_eq!(session.text(), "e\u{301}\n");
        session.delete_backward();
        assert_eq!(session.text(), "e\u{301}");
        assert_eq!(session.current_line(), Some(1));
        session.delete_backward();
        assert_eq!(session.text(), "");
        assert!(session.delete_backward().is_empty());
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut session = EditorSession::with_text(Arc::new(EditorConfig::builtin()), "a\nb");
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.set_cursor(99), 2);
        assert_eq!(session.cursor(), 3);
    }

    #[test]
    fn test_stale_tickets_are_rejected() {
        let mut session = session();
        let ticket = session.highlight_ticket();
        let result = session.rehighlight();
        assert!(session.accept_highlight(ticket, result.clone()).is_some());

        session.insert("x");
        assert!(!session.is_current(ticket));
        assert!(session.accept_highlight(ticket, result).is_none());
    }

    #[test]
    fn test_replace_buffer_normalizes_and_remembers_line_ending() {
        let mut session = session();
        session.replace_buffer("a\r\nb\r\n");
        assert_eq!(session.text(), "a\nb\n");
        assert_eq!(session.line_ending(), LineEnding::Crlf);
        assert_eq!(session.text_with_line_ending(), "a\r\nb\r\n");
        assert_eq!(session.line_count(), 3);
    }
}
