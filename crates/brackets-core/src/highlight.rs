//! Full-buffer template re-highlighting.
//!
//! Template styling is never stored with the text; it is always rederived from content. After
//! a wholesale buffer replacement (a programmatic set rather than a keystroke), the host runs
//! [`TemplateHighlighter::highlight`] to restyle every occurrence of every registered template.

use crate::commands::RenderCommand;
use crate::error::ConfigError;
use crate::offsets::{TextRange, Utf16Converter};
use crate::style::Theme;
use crate::trigger::{TriggerDefinition, TriggerRegistry};
use regex::Regex;

/// One template occurrence found in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateMatch {
    /// Index of the matching definition in the registry.
    pub definition: usize,
    /// UTF-16 range of the occurrence.
    pub range: TextRange,
}

/// Finds literal template occurrences and produces their style commands.
///
/// Matching is leftmost-first and non-overlapping; when two templates would match at the same
/// position the one registered first wins, mirroring [`TriggerRegistry::fire`].
#[derive(Debug, Clone)]
pub struct TemplateHighlighter {
    registry: TriggerRegistry,
    regex: Option<Regex>,
}

impl TemplateHighlighter {
    /// Compile a highlighter for all templates in `registry`.
    pub fn new(registry: TriggerRegistry) -> Result<Self, ConfigError> {
        let regex = if registry.is_empty() {
            None
        } else {
            let pattern = registry
                .definitions()
                .iter()
                .map(|definition| format!("({})", regex::escape(definition.template())))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&pattern)?)
        };
        Ok(Self { registry, regex })
    }

    /// The registry this highlighter was built from.
    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Locate every template occurrence in `text`, in buffer order.
    pub fn find_templates(&self, text: &str) -> Vec<TemplateMatch> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };
        let definitions = self.registry.definitions();

        let mut matches = Vec::new();
        let mut scanned_bytes = 0usize;
        let mut scanned_utf16 = 0usize;

        for caps in regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            scanned_utf16 += Utf16Converter::len(&text[scanned_bytes..whole.start()]);
            scanned_bytes = whole.start();

            let Some(index) = (0..definitions.len()).find(|i| caps.get(i + 1).is_some()) else {
                continue;
            };
            matches.push(TemplateMatch {
                definition: index,
                range: TextRange::from_len(scanned_utf16, definitions[index].template_len()),
            });
        }

        matches
    }

    /// Style commands for every template occurrence in `text`.
    ///
    /// Pure: calling it twice on the same text yields the same commands.
    pub fn highlight(&self, text: &str, theme: &Theme) -> Vec<RenderCommand> {
        let matches = self.find_templates(text);
        tracing::trace!(matches = matches.len(), "template re-highlight pass");

        matches
            .iter()
            .flat_map(|m| self.definition(m).style_commands(m.range.start, theme))
            .collect()
    }

    /// The definition a match refers to.
    pub fn definition(&self, m: &TemplateMatch) -> &TriggerDefinition {
        &self.registry.definitions()[m.definition]
    }
}
