//! Brackets TUI demo
//!
//! A terminal host for `brackets-core`: a read-only line-number gutter next to an editor pane
//! that expands `{` and `[` into TODO / REMINDER markers.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p brackets-tui -- [config.yaml] [document.txt]
//! BRACKETS_LOG=brackets.log cargo run -p brackets-tui
//! ```
//!
//! # Keys
//!
//! - Printable characters: insert (`{` / `[` expand into templates)
//! - Paste: inserted literally, triggers included
//! - Enter: newline
//! - Backspace: delete before the caret
//! - Arrow keys: move the caret
//! - Esc: toggle editing / idle
//! - Ctrl+R: re-highlight the whole buffer
//! - Ctrl+Q: quit

mod attributed;

use attributed::{AttributedBuffer, to_ratatui_color};
use brackets_core::{EditorConfig, EditorSession, RenderCommand, TextRange, style::palette};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};
use std::{
    env, fs,
    io::{self, stdout},
    path::PathBuf,
    process,
    sync::{Arc, Mutex},
    time::Duration,
};

/// Application state.
struct App {
    session: EditorSession,
    /// Editor pane contents, kept in step by applying the session's render commands.
    editor: AttributedBuffer,
    should_quit: bool,
    status_message: String,
    /// First visible row of both panes.
    scroll_top: usize,
    viewport_height: usize,
}

impl App {
    fn new(config: EditorConfig, document: Option<String>) -> Self {
        let mut app = Self {
            session: EditorSession::new(Arc::new(config)),
            editor: AttributedBuffer::new(),
            should_quit: false,
            status_message: String::new(),
            scroll_top: 0,
            viewport_height: 0,
        };

        if let Some(text) = document {
            let commands = app.session.replace_buffer(&text);
            app.apply(&commands);
        }
        app
    }

    fn apply(&mut self, commands: &[RenderCommand]) {
        self.editor.apply(commands);
        self.adjust_scroll();
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            // Pasted text arrives whole, so trigger characters inside it stay literal.
            Event::Paste(text) => self.handle_paste(text),
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status_message.clear();

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.should_quit = true;
            }

            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                self.rehighlight();
            }

            (_, KeyCode::Esc) => {
                if self.session.is_editing() {
                    self.session.end_editing();
                } else {
                    self.session.begin_editing();
                }
            }

            (modifiers, KeyCode::Char(c))
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let commands = self.session.insert(c.encode_utf8(&mut [0; 4]));
                self.apply(&commands);
            }

            (_, KeyCode::Enter) => {
                let commands = self.session.insert("\n");
                self.apply(&commands);
            }

            (_, KeyCode::Backspace) => {
                let commands = self.session.delete_backward();
                self.apply(&commands);
            }

            (_, KeyCode::Left) => {
                let offset = self.editor.prev_offset(self.session.cursor());
                self.move_cursor_to(offset);
            }
            (_, KeyCode::Right) => {
                let offset = self.editor.next_offset(self.session.cursor());
                self.move_cursor_to(offset);
            }
            (_, KeyCode::Up) => self.move_cursor_vertically(-1),
            (_, KeyCode::Down) => self.move_cursor_vertically(1),

            _ => {}
        }
    }

    fn handle_paste(&mut self, text: String) {
        let commands = self.session.insert(&text);
        self.apply(&commands);
    }

    fn move_cursor_to(&mut self, offset: usize) {
        self.session.begin_editing();
        let line = self.session.set_cursor(offset);
        let offset = self.session.cursor();
        self.apply(&[RenderCommand::SetCursor { offset }]);
        tracing::trace!(offset, line, "caret moved");
    }

    fn move_cursor_vertically(&mut self, delta: isize) {
        let (row, column) = self.editor.cursor_position();
        let Some(target) = row.checked_add_signed(delta) else {
            return;
        };
        if target >= self.editor.line_count() {
            return;
        }
        self.move_cursor_to(self.editor.offset_at(target, column));
    }

    fn rehighlight(&mut self) {
        let ticket = self.session.highlight_ticket();
        let commands = self.session.rehighlight();
        match self.session.accept_highlight(ticket, commands) {
            Some(commands) => {
                self.status_message = format!("re-highlighted {} styles", commands.len());
                self.apply(&commands);
            }
            None => {
                self.status_message = "buffer changed; re-highlight discarded".to_string();
            }
        }
    }

    /// Keep the caret row visible.
    fn adjust_scroll(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let (row, _) = self.editor.cursor_position();
        if row < self.scroll_top {
            self.scroll_top = row;
        }
        if row >= self.scroll_top + self.viewport_height {
            self.scroll_top = row + 1 - self.viewport_height;
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // gutter + editor
                Constraint::Length(1), // status line
                Constraint::Length(1), // shortcuts
            ])
            .split(frame.area());

        self.viewport_height = chunks[0].height as usize;
        self.adjust_scroll();

        let gutter = self.session.gutter();
        let label_width = gutter.lines().len().to_string().len() as u16;
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(label_width + 2), Constraint::Min(1)])
            .split(chunks[0]);

        self.render_gutter(frame, panes[0], &gutter.text());
        self.render_editor(frame, panes[1]);
        self.render_status_line(frame, chunks[1]);
        self.render_shortcuts(frame, chunks[2]);
    }

    fn background(&self) -> Style {
        Style::default().bg(to_ratatui_color(palette::DARK_BG))
    }

    /// The configured band flattened over the editor background.
    fn band_color(&self) -> Color {
        to_ratatui_color(self.session.config().gutter().band.over(palette::DARK_BG))
    }

    /// Rows of `lines` inside the viewport. While editing, the caret's row is padded to `width`
    /// cells and given the band background.
    fn visible_lines(
        &self,
        lines: Vec<Line<'static>>,
        height: usize,
        width: usize,
    ) -> Vec<Line<'static>> {
        let band_row = self.session.current_line().map(|line| line - 1);
        let band = self.band_color();

        lines
            .into_iter()
            .enumerate()
            .skip(self.scroll_top)
            .take(height)
            .map(|(row, mut line)| {
                if band_row == Some(row) {
                    let fill = Span::raw(" ".repeat(width.saturating_sub(line.width())));
                    if line.alignment == Some(Alignment::Right) {
                        line.spans.insert(0, fill);
                    } else {
                        line.spans.push(fill);
                    }
                    line = line.style(Style::default().bg(band));
                }
                line
            })
            .collect()
    }

    fn render_gutter(&self, frame: &mut Frame, area: Rect, labels: &str) {
        let mut gutter = AttributedBuffer::from_commands(&[RenderCommand::ReplaceText {
            range: TextRange::empty(0),
            text: labels.to_string(),
        }]);
        gutter.apply(&self.session.gutter_style_commands());

        let labels = gutter
            .lines()
            .into_iter()
            .map(|line| line.right_aligned())
            .collect();
        let lines = self.visible_lines(
            labels,
            area.height as usize,
            area.width.saturating_sub(1) as usize,
        );

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .style(self.background())
                .padding(Padding::right(1)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let lines = self.visible_lines(
            self.editor.lines(),
            area.height as usize,
            area.width.saturating_sub(1) as usize,
        );

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .style(self.background())
                .padding(Padding::left(1)),
        );
        frame.render_widget(paragraph, area);

        if self.session.is_editing() {
            let (row, column) = self.editor.cursor_position();
            let y = area.y as usize + row.saturating_sub(self.scroll_top);
            let x = area.x as usize + 1 + column;
            if y < (area.y + area.height) as usize && x < (area.x + area.width) as usize {
                frame.set_cursor_position((x as u16, y as u16));
            }
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let mode = if self.session.is_editing() {
            "EDITING"
        } else {
            "IDLE"
        };
        let status_text = if self.status_message.is_empty() {
            format!(
                "{mode} | line:{} | lines:{} | offset:{}/{}",
                self.session.caret_line(),
                self.session.line_count(),
                self.session.cursor(),
                self.session.len_utf16(),
            )
        } else {
            format!("{mode} | {}", self.status_message)
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = "{ : TODO  [ : REMINDER  Esc: edit/idle  Ctrl-R: re-highlight  Ctrl-Q: quit";
        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }
}

/// Route `tracing` output to the file named by `BRACKETS_LOG`, if set. The terminal itself is
/// owned by the UI, so nothing is logged to stderr.
fn init_logging() -> io::Result<()> {
    let Some(path) = env::var_os("BRACKETS_LOG") else {
        return Ok(());
    };
    let file = fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!("usage: {} [config.yaml] [document.txt]", args[0]);
        process::exit(1);
    }

    init_logging()?;

    let config = match args.get(1) {
        Some(path) => match EditorConfig::from_path(PathBuf::from(path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("invalid configuration {path}: {err}");
                process::exit(1);
            }
        },
        None => EditorConfig::builtin(),
    };
    let document = args.get(2).map(fs::read_to_string).transpose()?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, document);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
