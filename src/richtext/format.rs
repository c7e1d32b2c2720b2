// Formatting primitives
// Character formats (bold, colors, fonts) and block formats (alignment, indent),
// plus the partial "patch" forms that get merged onto them.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Font family and size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub family: String,
    pub point_size: u16,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, point_size: u16) -> Self {
        FontDescriptor {
            family: family.into(),
            point_size,
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.point_size)
    }
}

/// The boolean character attributes that can be toggled from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharAttribute {
    Bold,
    Italic,
    Underline,
}

impl fmt::Display for CharAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CharAttribute::Bold => "bold",
            CharAttribute::Italic => "italic",
            CharAttribute::Underline => "underline",
        })
    }
}

/// Character-level formatting of a run of text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font: Option<FontDescriptor>,
}

impl CharFormat {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        CharFormat {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        CharFormat {
            italic: true,
            ..Default::default()
        }
    }

    pub fn attribute(&self, attribute: CharAttribute) -> bool {
        match attribute {
            CharAttribute::Bold => self.bold,
            CharAttribute::Italic => self.italic,
            CharAttribute::Underline => self.underline,
        }
    }

    pub fn set_attribute(&mut self, attribute: CharAttribute, value: bool) {
        match attribute {
            CharAttribute::Bold => self.bold = value,
            CharAttribute::Italic => self.italic = value,
            CharAttribute::Underline => self.underline = value,
        }
    }

    pub fn toggle(&mut self, attribute: CharAttribute) {
        let value = self.attribute(attribute);
        self.set_attribute(attribute, !value);
    }

    /// Overwrite only the properties the patch carries
    pub fn merge(&mut self, patch: &CharFormatPatch) {
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(strikeout) = patch.strikeout {
            self.strikeout = strikeout;
        }
        if let Some(foreground) = patch.foreground {
            self.foreground = foreground;
        }
        if let Some(background) = patch.background {
            self.background = background;
        }
        if let Some(font) = &patch.font {
            self.font = font.clone();
        }
    }
}

impl fmt::Display for CharFormat {
    /// Compact attribute list, e.g. `[bold,fg=#ff0000]`; empty for the plain format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.bold {
            parts.push("bold".into());
        }
        if self.italic {
            parts.push("italic".into());
        }
        if self.underline {
            parts.push("underline".into());
        }
        if self.strikeout {
            parts.push("strikeout".into());
        }
        if let Some(color) = self.foreground {
            parts.push(format!("fg={color}"));
        }
        if let Some(color) = self.background {
            parts.push(format!("bg={color}"));
        }
        if let Some(font) = &self.font {
            parts.push(format!("font={font}"));
        }
        if parts.is_empty() {
            return Ok(());
        }
        write!(f, "[{}]", parts.join(","))
    }
}

/// A partial character format: `None` leaves the property untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharFormatPatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikeout: Option<bool>,
    pub foreground: Option<Option<Color>>,
    pub background: Option<Option<Color>>,
    pub font: Option<Option<FontDescriptor>>,
}

impl CharFormatPatch {
    pub fn attribute(attribute: CharAttribute, value: bool) -> Self {
        let mut patch = Self::default();
        match attribute {
            CharAttribute::Bold => patch.bold = Some(value),
            CharAttribute::Italic => patch.italic = Some(value),
            CharAttribute::Underline => patch.underline = Some(value),
        }
        patch
    }

    pub fn foreground(color: Color) -> Self {
        CharFormatPatch {
            foreground: Some(Some(color)),
            ..Default::default()
        }
    }

    pub fn font(font: FontDescriptor) -> Self {
        CharFormatPatch {
            font: Some(Some(font)),
            ..Default::default()
        }
    }

    /// A patch that sets every property to the given format's value
    pub fn replace_with(format: &CharFormat) -> Self {
        CharFormatPatch {
            bold: Some(format.bold),
            italic: Some(format.italic),
            underline: Some(format.underline),
            strikeout: Some(format.strikeout),
            foreground: Some(format.foreground),
            background: Some(format.background),
            font: Some(format.font.clone()),
        }
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        })
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            "justify" => Ok(Alignment::Justify),
            other => Err(format!("unknown alignment '{other}'")),
        }
    }
}

/// Paragraph-level formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockFormat {
    pub alignment: Alignment,
    pub indent: u8,
}

impl BlockFormat {
    pub fn merge(&mut self, patch: &BlockFormatPatch) {
        if let Some(alignment) = patch.alignment {
            self.alignment = alignment;
        }
        if let Some(indent) = patch.indent {
            self.indent = indent;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockFormatPatch {
    pub alignment: Option<Alignment>,
    pub indent: Option<u8>,
}

impl BlockFormatPatch {
    pub fn alignment(alignment: Alignment) -> Self {
        BlockFormatPatch {
            alignment: Some(alignment),
            ..Default::default()
        }
    }
}

/// Bullet/numbering style of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    #[default]
    None,
    Bulleted,
    Numbered,
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListStyle::None => "none",
            ListStyle::Bulleted => "bulleted",
            ListStyle::Numbered => "numbered",
        })
    }
}

impl FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ListStyle::None),
            "bulleted" | "disc" => Ok(ListStyle::Bulleted),
            "numbered" | "decimal" => Ok(ListStyle::Numbered),
            other => Err(format!("unknown list style '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        let color: Color = "#FF8000".parse().unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
        assert_eq!(color.to_string(), "#ff8000");
        assert_eq!("00ff00".parse::<Color>().unwrap(), Color::rgb(0, 255, 0));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_char_format_merge_only_touches_patched_fields() {
        let mut format = CharFormat {
            italic: true,
            foreground: Some(Color::WHITE),
            ..Default::default()
        };
        format.merge(&CharFormatPatch::attribute(CharAttribute::Bold, true));
        assert!(format.bold);
        assert!(format.italic);
        assert_eq!(format.foreground, Some(Color::WHITE));

        format.merge(&CharFormatPatch {
            foreground: Some(None),
            ..Default::default()
        });
        assert_eq!(format.foreground, None);
    }

    #[test]
    fn test_char_format_display() {
        assert_eq!(CharFormat::plain().to_string(), "");
        let format = CharFormat {
            bold: true,
            underline: true,
            font: Some(FontDescriptor::new("Serif", 12)),
            ..Default::default()
        };
        assert_eq!(format.to_string(), "[bold,underline,font=Serif 12]");
    }

    #[test]
    fn test_block_format_merge_preserves_indent() {
        let mut format = BlockFormat {
            alignment: Alignment::Left,
            indent: 2,
        };
        format.merge(&BlockFormatPatch::alignment(Alignment::Center));
        assert_eq!(format.alignment, Alignment::Center);
        assert_eq!(format.indent, 2);
    }

    #[test]
    fn test_toggle() {
        let mut format = CharFormat::plain();
        format.toggle(CharAttribute::Underline);
        assert!(format.underline);
        format.toggle(CharAttribute::Underline);
        assert!(!format.underline);
    }
}
