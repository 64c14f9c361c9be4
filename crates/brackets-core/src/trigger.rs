//! Trigger Engine: single-keystroke template expansion.
//!
//! A [`TriggerRegistry`] holds an ordered list of [`TriggerDefinition`]s. When a host reports
//! that exactly one character was typed, [`fire`] looks up the first definition whose trigger
//! character matches and returns a [`TemplateInstance`] describing the expansion. Everything is
//! expressed in UTF-16 code units.
//!
//! # Example
//!
//! ```rust
//! use brackets_core::{TriggerRegistry, fire};
//!
//! let registry = TriggerRegistry::builtin();
//! let instance = fire('{', 5, &registry).unwrap();
//!
//! assert_eq!(instance.inserted_text, "{ TODO  }");
//! assert_eq!(instance.styled_subranges[0].range.start, 7);
//! assert_eq!(instance.cursor, 10);
//! assert!(fire('x', 5, &registry).is_none());
//! ```

use crate::commands::RenderCommand;
use crate::error::ConfigError;
use crate::offsets::{TextRange, Utf16Converter};
use crate::style::{StyleRole, StyleTag, Theme};
use std::collections::HashSet;

/// Trigger character for TODO markers.
pub const TODO_TRIGGER: char = '{';
/// Template inserted for [`TODO_TRIGGER`].
pub const TODO_TEMPLATE: &str = "{ TODO  }";
/// Keyword range of [`TODO_TEMPLATE`].
pub const TODO_KEYWORD: KeywordRange = KeywordRange::new(2, 4);

/// Trigger character for REMINDER markers.
pub const REMINDER_TRIGGER: char = '[';
/// Template inserted for [`REMINDER_TRIGGER`].
pub const REMINDER_TEMPLATE: &str = "[ REMINDER  ]";
/// Keyword range of [`REMINDER_TEMPLATE`].
pub const REMINDER_KEYWORD: KeywordRange = KeywordRange::new(2, 8);

/// Keyword placeholder position inside a template (UTF-16, relative to the template start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeywordRange {
    /// Start, relative to the template start.
    pub offset: usize,
    /// Length.
    pub length: usize,
}

impl KeywordRange {
    /// Create a keyword range.
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// The absolute range once the template is placed at `template_start`.
    pub fn at(self, template_start: usize) -> TextRange {
        TextRange::from_len(self.offset, self.length).shifted(template_start)
    }
}

/// One registered trigger. Validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDefinition {
    trigger_char: char,
    template: String,
    template_len: usize,
    keyword_range: KeywordRange,
    style_tag: StyleTag,
}

impl TriggerDefinition {
    /// Create a definition. Rejects a carriage-return trigger, empty templates, templates
    /// containing `'\r'`, and keyword ranges that do not fit or that split a surrogate pair.
    pub fn new(
        trigger_char: char,
        template: impl Into<String>,
        keyword_range: KeywordRange,
        style_tag: StyleTag,
    ) -> Result<Self, ConfigError> {
        let template = template.into();
        if trigger_char == '\r' {
            return Err(ConfigError::InvalidTrigger(trigger_char.to_string()));
        }
        if template.is_empty() {
            return Err(ConfigError::EmptyTemplate {
                trigger: trigger_char,
            });
        }
        if template.contains('\r') {
            return Err(ConfigError::CarriageReturnInTemplate(template));
        }

        let template_len = Utf16Converter::len(&template);
        let fits = keyword_range
            .offset
            .checked_add(keyword_range.length)
            .is_some_and(|end| end <= template_len);
        if !fits {
            return Err(ConfigError::KeywordOutOfBounds {
                template,
                offset: keyword_range.offset,
                length: keyword_range.length,
                template_len,
            });
        }
        let keyword_end = keyword_range.offset + keyword_range.length;
        if !Utf16Converter::is_char_boundary(&template, keyword_range.offset)
            || !Utf16Converter::is_char_boundary(&template, keyword_end)
        {
            return Err(ConfigError::KeywordSplitsCharacter {
                template,
                offset: keyword_range.offset,
                length: keyword_range.length,
            });
        }

        Ok(Self {
            trigger_char,
            template,
            template_len,
            keyword_range,
            style_tag,
        })
    }

    /// The character whose insertion fires this trigger.
    pub fn trigger_char(&self) -> char {
        self.trigger_char
    }

    /// The template text inserted in place of the trigger character.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Template length in UTF-16 code units.
    pub fn template_len(&self) -> usize {
        self.template_len
    }

    /// Keyword placeholder range, relative to the template start.
    pub fn keyword_range(&self) -> KeywordRange {
        self.keyword_range
    }

    /// Style tag of the keyword placeholder.
    pub fn style_tag(&self) -> StyleTag {
        self.style_tag
    }

    /// Caret position after expanding at `template_start`.
    pub fn cursor_after_expansion(&self, template_start: usize) -> usize {
        template_start + self.template_len - self.keyword_range.length
    }

    /// Style commands for one occurrence of this template starting at `template_start`: the
    /// body style over the whole template, then the keyword style over the keyword range.
    ///
    /// Identical to the style commands [`TemplateInstance::render_commands`] emits for the same
    /// occurrence.
    pub fn style_commands(&self, template_start: usize, theme: &Theme) -> Vec<RenderCommand> {
        vec![
            RenderCommand::style(
                TextRange::from_len(template_start, self.template_len),
                StyleRole::TemplateBody,
                &theme.template_body,
            ),
            RenderCommand::style(
                self.keyword_range.at(template_start),
                StyleRole::Keyword(self.style_tag),
                theme.keyword(self.style_tag),
            ),
        ]
    }
}

/// A styled region produced by firing a trigger (absolute UTF-16 range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSubrange {
    /// Absolute range in the buffer after insertion.
    pub range: TextRange,
    /// Style tag.
    pub tag: StyleTag,
}

/// The result of firing a trigger. Transient: produced per keystroke and consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInstance {
    /// Text to insert in place of the typed character.
    pub inserted_text: String,
    /// Offset the trigger character was typed at (the template start).
    pub insertion_offset: usize,
    /// Keyword regions, translated to absolute offsets.
    pub styled_subranges: Vec<StyledSubrange>,
    /// Caret position after the expansion.
    pub cursor: usize,
}

impl TemplateInstance {
    /// Absolute range the template occupies once inserted.
    pub fn template_range(&self) -> TextRange {
        TextRange::from_len(
            self.insertion_offset,
            Utf16Converter::len(&self.inserted_text),
        )
    }

    /// A subrange expressed relative to the template start.
    pub fn local_range(&self, subrange: &StyledSubrange) -> TextRange {
        TextRange::new(
            subrange.range.start - self.insertion_offset,
            subrange.range.end - self.insertion_offset,
        )
    }

    /// Commands that perform the expansion: insert the template at the caret, style its body
    /// and keyword region, then place the caret.
    pub fn render_commands(&self, theme: &Theme) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(3 + self.styled_subranges.len());
        commands.push(RenderCommand::ReplaceText {
            range: TextRange::empty(self.insertion_offset),
            text: self.inserted_text.clone(),
        });
        commands.push(RenderCommand::style(
            self.template_range(),
            StyleRole::TemplateBody,
            &theme.template_body,
        ));
        for subrange in &self.styled_subranges {
            commands.push(RenderCommand::style(
                subrange.range,
                StyleRole::Keyword(subrange.tag),
                theme.keyword(subrange.tag),
            ));
        }
        commands.push(RenderCommand::SetCursor {
            offset: self.cursor,
        });
        commands
    }
}

/// Ordered, validated set of trigger definitions.
///
/// Lookup is by registration order: when several definitions share a trigger character the
/// first registered one always wins, regardless of buffer content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRegistry {
    definitions: Vec<TriggerDefinition>,
}

impl TriggerRegistry {
    /// Build a registry. Two definitions may share a trigger character (the later one is then
    /// unreachable), but not a template text.
    pub fn new(definitions: Vec<TriggerDefinition>) -> Result<Self, ConfigError> {
        let mut templates = HashSet::new();
        let mut triggers = HashSet::new();
        for definition in &definitions {
            if !templates.insert(definition.template()) {
                return Err(ConfigError::DuplicateTemplate(
                    definition.template().to_string(),
                ));
            }
            if !triggers.insert(definition.trigger_char()) {
                tracing::debug!(
                    trigger = %definition.trigger_char(),
                    template = definition.template(),
                    "trigger shadowed by an earlier definition"
                );
            }
        }
        Ok(Self { definitions })
    }

    /// The two built-in triggers: `{` -> `{ TODO  }` and `[` -> `[ REMINDER  ]`.
    pub fn builtin() -> Self {
        Self {
            definitions: vec![
                TriggerDefinition {
                    trigger_char: TODO_TRIGGER,
                    template: TODO_TEMPLATE.to_string(),
                    template_len: Utf16Converter::len(TODO_TEMPLATE),
                    keyword_range: TODO_KEYWORD,
                    style_tag: StyleTag::Todo,
                },
                TriggerDefinition {
                    trigger_char: REMINDER_TRIGGER,
                    template: REMINDER_TEMPLATE.to_string(),
                    template_len: Utf16Converter::len(REMINDER_TEMPLATE),
                    keyword_range: REMINDER_KEYWORD,
                    style_tag: StyleTag::Reminder,
                },
            ],
        }
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> &[TriggerDefinition] {
        &self.definitions
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no triggers are registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// First definition registered for `trigger_char`.
    pub fn find(&self, trigger_char: char) -> Option<&TriggerDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.trigger_char == trigger_char)
    }

    /// Fire on a single typed character. See [`fire`].
    pub fn fire(&self, inserted_char: char, insertion_offset: usize) -> Option<TemplateInstance> {
        let definition = self.find(inserted_char)?;
        tracing::debug!(
            trigger = %inserted_char,
            offset = insertion_offset,
            template = definition.template(),
            "trigger fired"
        );

        Some(TemplateInstance {
            inserted_text: definition.template.clone(),
            insertion_offset,
            styled_subranges: vec![StyledSubrange {
                range: definition.keyword_range.at(insertion_offset),
                tag: definition.style_tag,
            }],
            cursor: definition.cursor_after_expansion(insertion_offset),
        })
    }

    /// Fire on inserted text. Only a single-character insertion can fire; pastes and other
    /// multi-character inserts always return `None`.
    pub fn fire_text(&self, inserted: &str, insertion_offset: usize) -> Option<TemplateInstance> {
        let mut chars = inserted.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.fire(ch, insertion_offset)
    }
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Fire the first trigger in `registry` matching `inserted_char`.
///
/// Returns `None` when nothing matches; the caller then inserts the character normally.
pub fn fire(
    inserted_char: char,
    insertion_offset: usize,
    registry: &TriggerRegistry,
) -> Option<TemplateInstance> {
    registry.fire(inserted_char, insertion_offset)
}
