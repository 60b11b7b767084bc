//! Color handling for overlay text and QR rasters

use crate::Result;
use crate::error::SealError;

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// White color
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#RGB`, `#RRGGBB`, `RGB` or `RRGGBB`
    ///
    /// The 3-digit form expands each nibble, so `#FFF` equals `#FFFFFF`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || SealError::InvalidColor(hex.to_string());

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let nibble = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Channels scaled to the 0.0-1.0 range used by PDF color operators
    pub fn to_pdf_components(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_short_and_long_white_match() {
        assert_eq!(Color::from_hex("#FFF").unwrap(), Color::white());
        assert_eq!(Color::from_hex("#FFFFFF").unwrap(), Color::white());
    }

    #[test]
    fn test_hash_is_optional() {
        assert_eq!(
            Color::from_hex("CCCCCC").unwrap(),
            Color::rgb(0xCC, 0xCC, 0xCC)
        );
        assert_eq!(Color::from_hex("1a2").unwrap(), Color::rgb(0x11, 0xAA, 0x22));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        for bad in ["#GGG", "#FFFF", "", "#", "##FFF", "#12345", "#+1+2+3"] {
            let err = Color::from_hex(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidColor, "input {bad:?}");
        }
    }

    #[test]
    fn test_non_ascii_rejected_without_panic() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_pdf_components() {
        let [r, g, b] = Color::rgb(255, 0, 51).to_pdf_components();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}
