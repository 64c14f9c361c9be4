//! Editor configuration: trigger registry, theme and gutter settings.
//!
//! An [`EditorConfig`] is built once at startup, validated, and then shared read-only (usually
//! behind an `Arc`) with every [`EditorSession`](crate::EditorSession). It can be loaded from
//! YAML; omitted sections fall back to the built-in defaults.
//!
//! ```yaml
//! triggers:
//!   - trigger: "{"
//!     template: "{ TODO  }"
//!     keyword: { offset: 2, length: 4 }
//!     tag: todo
//! theme:
//!   template_body:
//!     foreground: "#FF7E4E"
//! gutter:
//!   min_rows: 30
//!   band: "#80808033"
//! ```

use crate::error::ConfigError;
use crate::gutter::GutterConfig;
use crate::highlight::TemplateHighlighter;
use crate::style::{Color, FontRef, FontWeight, StyleTag, TextStyle, Theme};
use crate::trigger::{KeywordRange, TriggerDefinition, TriggerRegistry};
use serde::Deserialize;
use std::path::Path;

/// Validated, immutable editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    highlighter: TemplateHighlighter,
    theme: Theme,
    gutter: GutterConfig,
}

impl EditorConfig {
    /// Assemble a configuration from already-validated parts.
    pub fn new(
        triggers: TriggerRegistry,
        theme: Theme,
        gutter: GutterConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            highlighter: TemplateHighlighter::new(triggers)?,
            theme,
            gutter,
        })
    }

    /// The built-in configuration: `{`/`[` triggers, default theme and gutter.
    pub fn builtin() -> Self {
        let highlighter = TemplateHighlighter::new(TriggerRegistry::builtin())
            .expect("valid built-in template regex");
        Self {
            highlighter,
            theme: Theme::default(),
            gutter: GutterConfig::default(),
        }
    }

    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        let config = raw.validate().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected editor configuration");
        })?;
        tracing::debug!(
            triggers = config.triggers().len(),
            "loaded editor configuration"
        );
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Trigger registry, in registration order.
    pub fn triggers(&self) -> &TriggerRegistry {
        self.highlighter.registry()
    }

    /// Full-buffer template highlighter for the registry.
    pub fn highlighter(&self) -> &TemplateHighlighter {
        &self.highlighter
    }

    /// Resolved theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Gutter settings.
    pub fn gutter(&self) -> &GutterConfig {
        &self.gutter
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    triggers: Option<Vec<RawTrigger>>,
    #[serde(default)]
    theme: RawTheme,
    #[serde(default)]
    gutter: RawGutter,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTrigger {
    trigger: String,
    template: String,
    keyword: RawKeyword,
    tag: StyleTag,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawKeyword {
    offset: usize,
    length: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTheme {
    #[serde(default)]
    text: Option<RawStyle>,
    #[serde(default)]
    template_body: Option<RawStyle>,
    #[serde(default)]
    todo: Option<RawStyle>,
    #[serde(default)]
    reminder: Option<RawStyle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGutter {
    #[serde(default)]
    min_rows: Option<usize>,
    #[serde(default)]
    current: Option<RawStyle>,
    #[serde(default)]
    other: Option<RawStyle>,
    #[serde(default)]
    band: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStyle {
    #[serde(default)]
    foreground: Option<String>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    font: Option<RawFont>,
    #[serde(default)]
    baseline_offset: Option<f32>,
    #[serde(default)]
    kern: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFont {
    family: String,
    weight: FontWeight,
    size: f32,
}

impl RawConfig {
    fn validate(self) -> Result<EditorConfig, ConfigError> {
        let triggers = match self.triggers {
            Some(raw) => {
                let definitions = raw
                    .into_iter()
                    .map(RawTrigger::validate)
                    .collect::<Result<Vec<_>, _>>()?;
                TriggerRegistry::new(definitions)?
            }
            None => TriggerRegistry::builtin(),
        };

        let defaults = Theme::default();
        let theme = Theme {
            text: resolve_style(self.theme.text, defaults.text)?,
            template_body: resolve_style(self.theme.template_body, defaults.template_body)?,
            todo: resolve_style(self.theme.todo, defaults.todo)?,
            reminder: resolve_style(self.theme.reminder, defaults.reminder)?,
        };

        let gutter_defaults = GutterConfig::default();
        let gutter = GutterConfig {
            min_rows: self.gutter.min_rows.unwrap_or(gutter_defaults.min_rows),
            current: resolve_style(self.gutter.current, gutter_defaults.current)?,
            other: resolve_style(self.gutter.other, gutter_defaults.other)?,
            band: match self.gutter.band.as_deref() {
                Some(band) => Color::parse(band)?,
                None => gutter_defaults.band,
            },
        };

        EditorConfig::new(triggers, theme, gutter)
    }
}

impl RawTrigger {
    fn validate(self) -> Result<TriggerDefinition, ConfigError> {
        let mut chars = self.trigger.chars();
        let (Some(trigger_char), None) = (chars.next(), chars.next()) else {
            return Err(ConfigError::InvalidTrigger(self.trigger));
        };
        TriggerDefinition::new(
            trigger_char,
            self.template,
            KeywordRange::new(self.keyword.offset, self.keyword.length),
            self.tag,
        )
    }
}

/// A style section given in YAML replaces the default style as a whole.
fn resolve_style(raw: Option<RawStyle>, default: TextStyle) -> Result<TextStyle, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    Ok(TextStyle {
        foreground: raw.foreground.as_deref().map(Color::parse).transpose()?,
        background: raw.background.as_deref().map(Color::parse).transpose()?,
        font: raw
            .font
            .map(|font| FontRef::new(font.family, font.weight, font.size)),
        baseline_offset: raw.baseline_offset,
        kern: raw.kern,
    })
}
