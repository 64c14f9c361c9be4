//! Line-number gutter.
//!
//! The gutter is a read-only column of line labels kept in step with the editable buffer. While
//! the editor is in editing mode the label of the line holding the cursor is drawn bright and
//! every other label dim; while idle every label is dim.

use crate::commands::RenderCommand;
use crate::offsets::{TextRange, Utf16Converter};
use crate::style::{
    Color, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FontRef, FontWeight, StyleRole, TextStyle, palette,
};

/// Minimum number of labels shown, even for short documents.
pub const DEFAULT_MIN_ROWS: usize = 30;

/// Gutter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GutterConfig {
    /// Minimum number of labels rendered.
    pub min_rows: usize,
    /// Style of the label (and line) holding the cursor.
    pub current: TextStyle,
    /// Style of every other label (and line).
    pub other: TextStyle,
    /// Background band drawn behind the cursor's row, in both the gutter and the text, while
    /// editing. May be translucent.
    pub band: Color,
}

impl Default for GutterConfig {
    fn default() -> Self {
        let font = FontRef::new(DEFAULT_FONT_FAMILY, FontWeight::Regular, DEFAULT_FONT_SIZE);
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            current: TextStyle {
                foreground: Some(palette::LIGHT_FG),
                font: Some(font.clone()),
                ..TextStyle::default()
            },
            other: TextStyle {
                foreground: Some(palette::DARK_FG),
                font: Some(font),
                ..TextStyle::default()
            },
            band: palette::CURRENT_LINE_BAND,
        }
    }
}

/// A single gutter label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterLine {
    /// 1-based line number.
    pub number: usize,
    /// Whether the cursor is on this line.
    pub current: bool,
}

/// A snapshot of the gutter for one buffer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gutter {
    lines: Vec<GutterLine>,
    current_line: Option<usize>,
}

impl Gutter {
    /// Build labels `1..=max(line_count, min_rows)`, marking `current_line` if given.
    pub fn build(line_count: usize, current_line: Option<usize>, min_rows: usize) -> Self {
        let rows = line_count.max(min_rows);
        let lines = (1..=rows)
            .map(|number| GutterLine {
                number,
                current: current_line == Some(number),
            })
            .collect();
        Self {
            lines,
            current_line,
        }
    }

    /// Labels, top to bottom.
    pub fn lines(&self) -> &[GutterLine] {
        &self.lines
    }

    /// The marked line, if any.
    pub fn current_line(&self) -> Option<usize> {
        self.current_line
    }

    /// Labels joined by newlines, one per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.number.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Style commands over [`Gutter::text`].
    pub fn style_commands(&self, config: &GutterConfig) -> Vec<RenderCommand> {
        line_style_commands(&self.text(), self.current_line, &config.current, &config.other)
    }
}

/// Style every `'\n'`-separated line of `text`: `current` for line `current_line` (1-based),
/// `other` for the rest. The empty line after a trailing newline is included.
pub fn line_style_commands(
    text: &str,
    current_line: Option<usize>,
    current: &TextStyle,
    other: &TextStyle,
) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    let mut start = 0usize;

    for (index, line) in text.split('\n').enumerate() {
        let len = Utf16Converter::len(line);
        let range = TextRange::from_len(start, len);
        start += len + 1;

        if current_line == Some(index + 1) {
            commands.push(RenderCommand::style(range, StyleRole::CurrentLine, current));
        } else {
            commands.push(RenderCommand::style(range, StyleRole::OtherLine, other));
        }
    }

    commands
}
