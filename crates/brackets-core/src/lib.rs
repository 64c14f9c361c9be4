#![warn(missing_docs)]
//! Brackets Core - Headless Bracket-Expansion Editor Kernel
//!
//! # Overview
//!
//! `brackets-core` implements the editing logic of a note editor whose distinguishing feature is
//! *bracket expansion*: typing `{` or `[` expands into a styled inline marker (`{ TODO  }`,
//! `[ REMINDER  ]`) with a highlighted keyword placeholder, while a read-only line-number gutter
//! follows the line that holds the caret.
//!
//! The crate does not render. Every operation returns a list of [`RenderCommand`]s (text
//! replacements, style applications, caret moves) that a host applies to whatever text widget
//! it draws with.
//!
//! # Components
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorSession (Idle / Editing)             │  ← Host-facing API
//! ├──────────────────────┬──────────────────────┤
//! │  Trigger Engine      │  Template Highlighter│  ← Keystroke / full-buffer styling
//! ├──────────────────────┴──────────────────────┤
//! │  Line Locator + Gutter                      │  ← Cursor-to-line mapping
//! ├─────────────────────────────────────────────┤
//! │  EditorConfig (triggers, theme, gutter)     │  ← Immutable, loaded once
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use brackets_core::{EditorConfig, EditorSession, line_number};
//! use std::sync::Arc;
//!
//! let config = Arc::new(EditorConfig::builtin());
//! let mut session = EditorSession::new(config);
//!
//! session.insert("first line\n");
//! session.insert("[");
//!
//! assert_eq!(session.text(), "first line\n[ REMINDER  ]");
//! assert_eq!(session.current_line(), Some(2));
//! assert_eq!(line_number(&session.text(), 0).unwrap(), 1);
//! ```
//!
//! # Offsets
//!
//! All offsets and ranges are UTF-16 code units, matching the addressing of native text views.
//! Internally text is UTF-8 in a rope with LF newlines.
//!
//! # Module Description
//!
//! - [`trigger`] - trigger definitions, registry and single-keystroke expansion
//! - [`highlight`] - full-buffer template re-highlight pass
//! - [`line_index`] - canonical cursor-to-line mapping and the rope-backed buffer
//! - [`gutter`] - line-number gutter model and per-line styling
//! - [`session`] - the editing session and its Idle/Editing state machine
//! - [`config`] - YAML-loadable configuration
//! - [`style`] - colors, fonts, text styles and the theme
//! - [`commands`] - render commands consumed by hosts

pub mod commands;
pub mod config;
pub mod error;
pub mod gutter;
pub mod highlight;
pub mod line_ending;
pub mod line_index;
pub mod offsets;
pub mod session;
pub mod style;
pub mod trigger;

pub use commands::RenderCommand;
pub use config::EditorConfig;
pub use error::{ConfigError, LineLocatorError};
pub use gutter::{Gutter, GutterConfig, GutterLine, line_style_commands};
pub use highlight::{TemplateHighlighter, TemplateMatch};
pub use line_ending::LineEnding;
pub use line_index::{LineIndex, clamp_offset, line_number};
pub use offsets::{TextRange, Utf16Converter};
pub use session::{EditingMode, EditorSession, HighlightTicket};
pub use style::{Color, FontRef, FontWeight, StyleRole, StyleTag, TextStyle, Theme};
pub use trigger::{
    KeywordRange, StyledSubrange, TemplateInstance, TriggerDefinition, TriggerRegistry, fire,
};
