//! Terminal-side attributed text.
//!
//! [`AttributedBuffer`] is the host's counterpart of a native attributed text view: a sequence
//! of styled characters plus a caret, mutated only by applying [`RenderCommand`]s. Offsets in
//! commands are UTF-16 code units and are mapped onto `char` cells here.

use brackets_core::{Color as CoreColor, FontWeight, RenderCommand, TextStyle};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, PartialEq)]
struct Cell {
    ch: char,
    style: TextStyle,
}

/// Styled characters plus a caret, driven by render commands.
#[derive(Debug, Clone, Default)]
pub struct AttributedBuffer {
    cells: Vec<Cell>,
    cursor: usize,
}

impl AttributedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh buffer with `commands` applied.
    pub fn from_commands(commands: &[RenderCommand]) -> Self {
        let mut buffer = Self::new();
        buffer.apply(commands);
        buffer
    }

    /// Apply commands in order.
    pub fn apply(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::ReplaceText { range, text } => {
                let start = self.char_index(range.start);
                let end = self.char_index(range.end).max(start);
                let cells = text.chars().map(|ch| Cell {
                    ch,
                    style: TextStyle::default(),
                });
                self.cells.splice(start..end, cells);
            }
            RenderCommand::ApplyStyle { range, style, .. } => {
                let start = self.char_index(range.start);
                let end = self.char_index(range.end).max(start);
                for cell in &mut self.cells[start..end] {
                    cell.style = cell.style.merged_with(style);
                }
            }
            RenderCommand::SetCursor { offset } => {
                self.cursor = self.utf16_offset(self.char_index(*offset));
            }
        }
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.ch).collect()
    }

    /// Caret offset (UTF-16).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the cell holding `offset`; offsets inside a surrogate pair round down.
    fn char_index(&self, offset: usize) -> usize {
        let mut units = 0usize;
        for (index, cell) in self.cells.iter().enumerate() {
            let next = units + cell.ch.len_utf16();
            if next > offset {
                return index;
            }
            units = next;
        }
        self.cells.len()
    }

    fn utf16_offset(&self, char_index: usize) -> usize {
        self.cells[..char_index.min(self.cells.len())]
            .iter()
            .map(|cell| cell.ch.len_utf16())
            .sum()
    }

    /// Offset one character after `offset`, clamped to the end.
    pub fn next_offset(&self, offset: usize) -> usize {
        let index = self.char_index(offset);
        self.utf16_offset((index + 1).min(self.cells.len()))
    }

    /// Offset one character before `offset`, clamped to the start.
    pub fn prev_offset(&self, offset: usize) -> usize {
        let index = self.char_index(offset);
        self.utf16_offset(index.saturating_sub(1))
    }

    pub fn line_count(&self) -> usize {
        1 + self.cells.iter().filter(|cell| cell.ch == '\n').count()
    }

    /// Zero-based `(row, display column)` of the caret.
    pub fn cursor_position(&self) -> (usize, usize) {
        let index = self.char_index(self.cursor);
        let mut row = 0usize;
        let mut column = 0usize;
        for cell in &self.cells[..index] {
            if cell.ch == '\n' {
                row += 1;
                column = 0;
            } else {
                column += cell.ch.width().unwrap_or(0);
            }
        }
        (row, column)
    }

    /// Offset of the character at display `column` on zero-based `row`, clamped to the row's
    /// end. Rows past the end map to the end of the buffer.
    pub fn offset_at(&self, row: usize, column: usize) -> usize {
        let mut index = 0usize;
        let mut current_row = 0usize;
        while current_row < row {
            match self.cells[index..].iter().position(|cell| cell.ch == '\n') {
                Some(newline) => {
                    index += newline + 1;
                    current_row += 1;
                }
                None => return self.utf16_offset(self.cells.len()),
            }
        }

        let mut width = 0usize;
        for cell in &self.cells[index..] {
            if cell.ch == '\n' {
                break;
            }
            let cell_width = cell.ch.width().unwrap_or(0);
            if width + cell_width > column {
                break;
            }
            width += cell_width;
            index += 1;
        }
        self.utf16_offset(index)
    }

    /// One ratatui line per buffer line, consecutive equally-styled characters merged into a
    /// span.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.line_count());
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = Style::default();

        for cell in &self.cells {
            if cell.ch == '\n' {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }
            let style = to_ratatui_style(&cell.style);
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push(cell.ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }
        lines.push(Line::from(spans));
        lines
    }
}

/// Terminal approximation of a text style: colours become 24-bit RGB, bold faces become
/// [`Modifier::BOLD`]. Font family, size, baseline offset and kerning have no terminal
/// equivalent.
pub fn to_ratatui_style(style: &TextStyle) -> Style {
    let mut out = Style::default();
    if let Some(color) = style.foreground {
        out = out.fg(to_ratatui_color(color));
    }
    if let Some(color) = style.background {
        out = out.bg(to_ratatui_color(color));
    }
    if style
        .font
        .as_ref()
        .is_some_and(|font| font.weight == FontWeight::Bold)
    {
        out = out.add_modifier(Modifier::BOLD);
    }
    out
}

pub fn to_ratatui_color(color: CoreColor) -> Color {
    if color.is_clear() {
        return Color::Reset;
    }
    let (r, g, b) = color.to_rgb8();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brackets_core::{EditorConfig, EditorSession, StyleRole, TextRange};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn session() -> EditorSession {
        EditorSession::new(Arc::new(EditorConfig::builtin()))
    }

    #[test]
    fn test_mirrors_session_text_and_cursor() {
        let mut session = session();
        let mut buffer = AttributedBuffer::new();
        buffer.apply(&session.insert("hello"));
        buffer.apply(&session.insert("{"));
        buffer.apply(&session.insert("x"));
        buffer.apply(&session.delete_backward());

        assert_eq!(buffer.text(), session.text());
        assert_eq!(buffer.cursor(), session.cursor());
    }

    #[test]
    fn test_keyword_cells_are_bold_on_accent() {
        let mut session = session();
        let buffer = AttributedBuffer::from_commands(&session.insert("["));
        let theme = session.config().theme();

        let keyword = to_ratatui_style(&buffer.cells[2].style);
        assert_eq!(keyword.bg, theme.reminder.background.map(to_ratatui_color));
        assert!(keyword.add_modifier.contains(Modifier::BOLD));

        let body = to_ratatui_style(&buffer.cells[0].style);
        assert_eq!(body.fg, theme.template_body.foreground.map(to_ratatui_color));
        assert!(!body.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_styles_merge_attribute_by_attribute() {
        let mut session = session();
        let mut buffer = AttributedBuffer::from_commands(&session.insert("ab"));
        let text_style = session.config().theme().text.clone();
        let highlight = TextStyle {
            background: Some(CoreColor::BLACK),
            ..TextStyle::default()
        };
        buffer.apply(&[RenderCommand::style(
            TextRange::new(0, 1),
            StyleRole::Text,
            &highlight,
        )]);

        // Attributes the later style leaves unset survive from the earlier one.
        assert_eq!(buffer.cells[0].style, text_style.merged_with(&highlight));
        assert_eq!(buffer.cells[0].style.kern, text_style.kern);
        assert_eq!(buffer.cells[0].style.background, Some(CoreColor::BLACK));
        assert_eq!(buffer.cells[1].style, text_style);
    }

    #[test]
    fn test_utf16_offsets_map_to_chars() {
        let mut buffer = AttributedBuffer::from_commands(&[RenderCommand::ReplaceText {
            range: TextRange::empty(0),
            text: "a👋b".to_string(),
        }]);
        assert_eq!(buffer.next_offset(1), 3);
        assert_eq!(buffer.prev_offset(3), 1);
        assert_eq!(buffer.next_offset(4), 4);

        buffer.apply(&[RenderCommand::SetCursor { offset: 2 }]);
        assert_eq!(buffer.cursor(), 1);

        buffer.apply(&[RenderCommand::ReplaceText {
            range: TextRange::new(1, 3),
            text: String::new(),
        }]);
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn test_cursor_position_uses_display_width() {
        let buffer = AttributedBuffer::from_commands(&[
            RenderCommand::ReplaceText {
                range: TextRange::empty(0),
                text: "x\n你好y".to_string(),
            },
            RenderCommand::SetCursor { offset: 4 },
        ]);
        assert_eq!(buffer.cursor_position(), (1, 4));
        assert_eq!(buffer.offset_at(1, 3), 3);
        assert_eq!(buffer.offset_at(1, 99), 5);
        assert_eq!(buffer.offset_at(0, 99), 1);
        assert_eq!(buffer.offset_at(7, 0), 5);
    }

    #[test]
    fn test_lines_merge_equal_styles() {
        let mut session = session();
        let mut buffer = AttributedBuffer::new();
        buffer.apply(&session.insert("ab\n"));
        buffer.apply(&session.insert("{"));

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 1);
        // body "{ ", keyword "TODO", body "  }"
        let contents: Vec<_> = lines[1]
            .spans
            .iter()
            .map(|span| span.content.to_string())
            .collect();
        assert_eq!(contents, vec!["{ ", "TODO", "  }"]);
    }
}
