//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating an [`EditorConfig`](crate::EditorConfig).
///
/// Every malformed trigger or style entry is rejected here, at load time, so that nothing in
/// the keystroke path can fail on configuration.
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Reading the configuration file failed.
    Io(#[from] std::io::Error),

    #[error("trigger {0:?} must be exactly one character other than a carriage return")]
    /// A trigger entry did not name a single character, or named a carriage return (which never
    /// reaches the buffer, so could never fire).
    InvalidTrigger(String),

    #[error("template {0:?} contains a carriage return")]
    /// A template contained `'\r'`; buffers hold LF newlines only.
    CarriageReturnInTemplate(String),

    #[error("trigger '{trigger}' has an empty template")]
    /// A trigger entry had an empty template string.
    EmptyTemplate {
        /// The offending trigger character.
        trigger: char,
    },

    #[error(
        "keyword range {offset}+{length} exceeds template '{template}' ({template_len} UTF-16 units)"
    )]
    /// The keyword range of a trigger entry does not fit inside its template.
    KeywordOutOfBounds {
        /// The template the range was declared for.
        template: String,
        /// Keyword start, relative to the template start.
        offset: usize,
        /// Keyword length.
        length: usize,
        /// Template length in UTF-16 code units.
        template_len: usize,
    },

    #[error(
        "keyword range {offset}+{length} of template '{template}' splits a surrogate pair"
    )]
    /// The keyword range starts or ends between the two halves of a surrogate pair.
    KeywordSplitsCharacter {
        /// The template the range was declared for.
        template: String,
        /// Keyword start, relative to the template start.
        offset: usize,
        /// Keyword length.
        length: usize,
    },

    #[error("template '{0}' is registered more than once")]
    /// Two trigger entries share one template text.
    DuplicateTemplate(String),

    #[error("invalid color '{0}' (expected #RRGGBB, #RRGGBBAA or 'clear')")]
    /// A color literal could not be parsed.
    InvalidColor(String),

    #[error("template pattern error: {0}")]
    /// The re-highlight pattern could not be compiled.
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by [`line_number`](crate::line_number).
pub enum LineLocatorError {
    #[error("offset {offset} is outside the buffer (length {len})")]
    /// The offset was past the end of the buffer. Callers are expected to clamp first.
    OutOfRange {
        /// Requested offset, in UTF-16 code units.
        offset: usize,
        /// Buffer length, in UTF-16 code units.
        len: usize,
    },
}
