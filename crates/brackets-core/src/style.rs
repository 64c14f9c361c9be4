//! Style model: colors, font references, text styles and the theme.
//!
//! Styles are plain data. The core never draws anything; hosts map a [`TextStyle`] onto
//! whatever attributed-text primitive they render with.

use crate::error::ConfigError;
use serde::Deserialize;

/// Style tag attached to a trigger template's keyword region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    /// `{ TODO  }` style marker.
    Todo,
    /// `[ REMINDER  ]` style marker.
    Reminder,
}

/// An RGBA color with `0.0..=1.0` components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (`0.0` is fully transparent).
    pub a: f32,
}

impl Color {
    /// Fully transparent.
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or `clear`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(value.to_string());
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("clear") {
            return Ok(Self::CLEAR);
        }

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        let mut color = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
        if hex.len() == 8 {
            color.a = f32::from(channel(6)?) / 255.0;
        }
        Ok(color)
    }

    /// 8-bit RGB components (alpha dropped).
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (quantize(self.r), quantize(self.g), quantize(self.b))
    }

    /// Returns `true` if the color is fully transparent.
    pub fn is_clear(self) -> bool {
        self.a <= 0.0
    }

    /// Composite this color over an opaque `backdrop` ("source over"). Hosts without alpha
    /// blending use this to flatten translucent overlays.
    pub fn over(self, backdrop: Color) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |top: f32, bottom: f32| top * a + bottom * (1.0 - a);
        Color::rgba(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
            1.0,
        )
    }
}

/// Font weight of a [`FontRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    Regular,
    /// Medium weight.
    Medium,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Suffix used in PostScript-style face names (`GeistMono-Bold`).
    pub fn face_suffix(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Medium => "Medium",
            Self::Bold => "Bold",
        }
    }
}

/// A reference to a font face. Hosts fall back to a system font of the same weight and size
/// when the family is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRef {
    /// Font family (`GeistMono`).
    pub family: String,
    /// Weight.
    pub weight: FontWeight,
    /// Point size.
    pub size: f32,
}

impl FontRef {
    /// Create a font reference.
    pub fn new(family: impl Into<String>, weight: FontWeight, size: f32) -> Self {
        Self {
            family: family.into(),
            weight,
            size,
        }
    }

    /// Face name, e.g. `GeistMono-Bold`.
    pub fn face_name(&self) -> String {
        format!("{}-{}", self.family, self.weight.face_suffix())
    }
}

/// A set of text attributes. `None` leaves the attribute of the target text untouched, so
/// applying a style merges it onto whatever is already there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    /// Foreground (text) color.
    pub foreground: Option<Color>,
    /// Background color.
    pub background: Option<Color>,
    /// Font.
    pub font: Option<FontRef>,
    /// Baseline offset in points.
    pub baseline_offset: Option<f32>,
    /// Letter spacing in points.
    pub kern: Option<f32>,
}

impl TextStyle {
    /// Overlay `other` onto `self`: attributes set in `other` win.
    pub fn merged_with(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            foreground: other.foreground.or(self.foreground),
            background: other.background.or(self.background),
            font: other.font.clone().or_else(|| self.font.clone()),
            baseline_offset: other.baseline_offset.or(self.baseline_offset),
            kern: other.kern.or(self.kern),
        }
    }
}

/// The semantic role of a style application. Hosts that theme by role rather than by
/// attributes can switch on this instead of reading the [`TextStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    /// Ordinary typed text.
    Text,
    /// The full body of an expanded template.
    TemplateBody,
    /// The keyword placeholder inside a template.
    Keyword(StyleTag),
    /// A line (or gutter label) that holds the cursor.
    CurrentLine,
    /// A line (or gutter label) that does not hold the cursor.
    OtherLine,
}

/// Editor palette.
pub mod palette {
    use super::Color;

    /// Editor background.
    pub const DARK_BG: Color = Color::BLACK;
    /// Dim foreground (inactive lines, idle gutter).
    pub const DARK_FG: Color = Color::rgba(0.301_960_74, 0.301_960_74, 0.301_960_74, 1.0);
    /// Bright foreground (typed text, current line).
    pub const LIGHT_FG: Color = Color::WHITE;
    /// Accent (template bodies, keyword backgrounds, caret).
    pub const ACCENT: Color = Color::rgba(0.999_996, 0.494, 0.306, 1.0);
    /// Translucent band behind the line holding the cursor while editing.
    pub const CURRENT_LINE_BAND: Color = Color::rgba(0.5, 0.5, 0.5, 0.2);
}

/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "GeistMono";
/// Default point size for editor text.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
/// Fixed line box height that keyword markers are vertically centered in.
pub const KEYWORD_BASELINE_HEIGHT: f32 = 13.0;
/// Letter spacing applied to typed text.
pub const DEFAULT_KERN: f32 = -0.5;

/// Resolved styles for everything the editor core emits.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Style of ordinary typed text.
    pub text: TextStyle,
    /// Style applied over the whole body of an expanded template.
    pub template_body: TextStyle,
    /// Keyword style for [`StyleTag::Todo`].
    pub todo: TextStyle,
    /// Keyword style for [`StyleTag::Reminder`].
    pub reminder: TextStyle,
}

impl Theme {
    /// Keyword style for a tag.
    pub fn keyword(&self, tag: StyleTag) -> &TextStyle {
        match tag {
            StyleTag::Todo => &self.todo,
            StyleTag::Reminder => &self.reminder,
        }
    }

    fn keyword_marker() -> TextStyle {
        TextStyle {
            foreground: Some(palette::LIGHT_FG),
            background: Some(palette::ACCENT),
            font: Some(FontRef::new(
                DEFAULT_FONT_FAMILY,
                FontWeight::Bold,
                DEFAULT_FONT_SIZE,
            )),
            baseline_offset: Some((KEYWORD_BASELINE_HEIGHT - DEFAULT_FONT_SIZE) / 2.0),
            kern: None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let body_font = FontRef::new(DEFAULT_FONT_FAMILY, FontWeight::Medium, DEFAULT_FONT_SIZE);
        Self {
            text: TextStyle {
                foreground: Some(palette::LIGHT_FG),
                font: Some(body_font.clone()),
                kern: Some(DEFAULT_KERN),
                ..TextStyle::default()
            },
            template_body: TextStyle {
                foreground: Some(palette::ACCENT),
                font: Some(body_font),
                ..TextStyle::default()
            },
            todo: Self::keyword_marker(),
            reminder: Self::keyword_marker(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(Color::parse("#FFFFFF").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("clear").unwrap(), Color::CLEAR);
        let half = Color::parse("#00000080").unwrap();
        assert!((half.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::parse(" #ff7e4e ").unwrap().to_rgb8(), (255, 126, 78));
    }

    #[test]
    fn test_parse_rejects_malformed_colors() {
        for bad in ["", "FFFFFF", "#FFF", "#GGGGGG", "#FFFFFFF", "#ÿÿÿ"] {
            assert!(
                matches!(Color::parse(bad), Err(ConfigError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_merge_keeps_unset_attributes() {
        let base = Theme::default().template_body;
        let merged = base.merged_with(&Theme::default().todo);
        assert_eq!(merged.foreground, Some(palette::LIGHT_FG));
        assert_eq!(merged.background, Some(palette::ACCENT));
        assert_eq!(merged.font.unwrap().weight, FontWeight::Bold);
    }

    #[test]
    fn test_default_keyword_marker() {
        let theme = Theme::default();
        let todo = theme.keyword(StyleTag::Todo);
        assert_eq!(todo.baseline_offset, Some(-0.5));
        assert_eq!(todo.font.as_ref().unwrap().face_name(), "GeistMono-Bold");
        assert_eq!(palette::ACCENT.to_rgb8(), (255, 126, 78));
        assert_eq!(palette::DARK_FG.to_rgb8(), (77, 77, 77));
    }

    #[test]
    fn test_band_flattens_over_background() {
        let band = palette::CURRENT_LINE_BAND.over(palette::DARK_BG);
        assert_eq!(band.a, 1.0);
        assert_eq!(band.to_rgb8(), (26, 26, 26));
        assert_eq!(Color::WHITE.over(Color::BLACK), Color::WHITE);
        assert_eq!(Color::CLEAR.over(palette::ACCENT).to_rgb8(), palette::ACCENT.to_rgb8());
    }
}
