//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black (default foreground).
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (default background).
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a colour from a hex string or a CSS colour name.
    ///
    /// Hex strings may omit the leading `#`; names such as `navy` or
    /// `rebeccapurple` are resolved through the `palette` named colour table.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(named) = palette::named::from_str(&trimmed.to_ascii_lowercase()) {
            return Ok(Self::rgb(named.red, named.green, named.blue));
        }
        Self::from_hex(trimmed)
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut digits = [255u8; 4];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::new(digits[0], digits[1], digits[2], digits[3]))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The `#RRGGBB` form without alpha, as used for SVG paint values.
    pub fn to_rgb_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0-1.0 opacity.
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// WCAG 2.1 relative luminance of the colour (alpha ignored).
    pub fn relative_luminance(self) -> f32 {
        use palette::{LinSrgb, Srgb};

        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        let lin: LinSrgb<f32> = srgb.into_linear();
        0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue
    }

    /// WCAG contrast ratio between two colours, in 1.0..=21.0.
    pub fn contrast_ratio(self, other: Colour) -> f32 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Mix two colours in linear RGB space; `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Colour, t: f32) -> Colour {
        use palette::{LinSrgb, Mix, Srgb};

        let t = t.clamp(0.0, 1.0);
        let a: LinSrgb<f32> = Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear();
        let b: LinSrgb<f32> = Srgb::new(other.r, other.g, other.b)
            .into_format::<f32>()
            .into_linear();
        let mixed: Srgb<f32> = Srgb::from_linear(a.mix(b, t));
        let alpha = self.a as f32 + (other.a as f32 - self.a as f32) * t;

        Colour::new(
            (mixed.red * 255.0).round() as u8,
            (mixed.green * 255.0).round() as u8,
            (mixed.blue * 255.0).round() as u8,
            alpha.round() as u8,
        )
    }
}

impl FromStr for Colour {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> QrError {
    QrError::Parse {
        message: format!("Invalid colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, #RRGGBBAA or a CSS colour name".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| QrError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| QrError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Colour::from_hex("#F00").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 0x88));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Colour::parse("navy").unwrap(), Colour::rgb(0, 0, 128));
        assert_eq!(Colour::parse("White").unwrap(), Colour::WHITE);
        assert!(Colour::parse("transparent").unwrap().is_transparent());
        assert!(Colour::parse("not-a-colour").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
        assert_eq!(Colour::new(255, 0, 0, 128).to_rgb_hex(), "#FF0000");
    }

    #[test]
    fn test_serde_string_form() {
        let c: Colour = serde_json::from_str("\"#336699\"").unwrap();
        assert_eq!(c, Colour::rgb(0x33, 0x66, 0x99));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#336699\"");
        assert!(serde_json::from_str::<Colour>("\"#33\"").is_err());
    }

    #[test]
    fn test_contrast_ratio() {
        let ratio = Colour::BLACK.contrast_ratio(Colour::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
        assert!((Colour::WHITE.contrast_ratio(Colour::WHITE) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mix_endpoints() {
        let red = Colour::rgb(255, 0, 0);
        let blue = Colour::rgb(0, 0, 255);
        assert_eq!(red.mix(blue, 0.0), red);
        assert_eq!(red.mix(blue, 1.0), blue);
        let mid = red.mix(blue, 0.5);
        assert!(mid.r > 100 && mid.b > 100 && mid.g == 0);
    }
}
