use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Errors from [`Color::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0:?}")]
    BadHex(String),
    #[error("unknown color name {0:?}")]
    UnknownName(String),
}

/// CSS color keywords the demo understands.
const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("lime", 0x00ff00),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("orange", 0xffa500),
    ("purple", 0x800080),
    ("gray", 0x808080),
    ("grey", 0x808080),
];

impl Color {
    pub const WHITE: Color = Color::from_hex(0xffffff);
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const RED: Color = Color::from_hex(0xff0000);
    pub const GREEN: Color = Color::from_hex(0x008000);
    pub const BLUE: Color = Color::from_hex(0x0000ff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    pub fn from_css_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| Self::from_hex(*hex))
    }

    /// Parse `#rrggbb`, `0xrrggbb` or a CSS color name.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"));
        match digits {
            Some(d) if d.len() == 6 => u32::from_str_radix(d, 16)
                .map(Self::from_hex)
                .map_err(|_| ColorParseError::BadHex(input.to_string())),
            Some(_) => Err(ColorParseError::BadHex(input.to_string())),
            None => Self::from_css_name(s)
                .ok_or_else(|| ColorParseError::UnknownName(input.to_string())),
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    /// Linear-light RGBA, alpha 1. Shaders write into an sRGB target.
    pub fn to_linear_rgba(self) -> [f32; 4] {
        fn channel(c: u8) -> f32 {
            let c = f32::from(c) / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b), 1.0]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_constructors() {
        let c = Color::from_hex(0x12ab34);
        assert_eq!(c, Color::new(0x12, 0xab, 0x34));
        assert_eq!(c.to_hex(), 0x12ab34);
        assert_eq!(c.to_string(), "#12ab34");
    }

    #[test]
    fn css_green_is_half_intensity() {
        assert_eq!(Color::parse("green").unwrap(), Color::new(0, 128, 0));
        assert_eq!(Color::parse(" Red ").unwrap(), Color::RED);
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("0x0000ff").unwrap(), Color::BLUE);
        assert!(matches!(Color::parse("#fff"), Err(ColorParseError::BadHex(_))));
        assert!(matches!(Color::parse("#zzzzzz"), Err(ColorParseError::BadHex(_))));
        assert!(matches!(
            Color::parse("chartreuse"),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(Color::BLACK.to_linear_rgba(), [0.0, 0.0, 0.0, 1.0]);
        let white = Color::WHITE.to_linear_rgba();
        for c in &white[..3] {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }
}
