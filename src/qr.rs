//! QR size resolution and QR raster generation

use crate::Result;
use crate::constants::*;
use crate::error::SealError;
use crate::style::Color;
use image::{ImageFormat, RgbImage};
use qrcode::{EcLevel, QrCode};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Requested QR size: a named preset or a literal size in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum QrSize {
    #[default]
    Small,
    Medium,
    Large,
    Custom(f32),
}

impl QrSize {
    /// Map a size token to points.
    ///
    /// Custom numeric sizes are passed through unchanged, without a range check.
    pub fn resolve(token: &str) -> Result<f32> {
        token.parse::<QrSize>().map(QrSize::points)
    }

    /// Edge length in points
    pub fn points(self) -> f32 {
        match self {
            Self::Small => QR_SIZE_SMALL,
            Self::Medium => QR_SIZE_MEDIUM,
            Self::Large => QR_SIZE_LARGE,
            Self::Custom(points) => points,
        }
    }
}

impl FromStr for QrSize {
    type Err = SealError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => other
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Custom)
                .ok_or_else(|| SealError::InvalidSizeToken(token.to_string())),
        }
    }
}

impl fmt::Display for QrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => f.write_str("small"),
            Self::Medium => f.write_str("medium"),
            Self::Large => f.write_str("large"),
            Self::Custom(points) => write!(f, "{points}"),
        }
    }
}

/// Encodes strings into QR rasters
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    /// Quiet zone width in modules
    pub margin_modules: u32,
    /// Pixels per module edge
    pub module_pixels: u32,
    pub dark: Color,
    pub light: Color,
    pub ec_level: EcLevel,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            margin_modules: QR_MARGIN_MODULES,
            module_pixels: QR_MODULE_PIXELS,
            dark: Color::black(),
            light: Color::white(),
            ec_level: EcLevel::L,
        }
    }
}

impl QrEncoder {
    /// Set the quiet zone width in modules
    pub fn with_margin_modules(mut self, margin_modules: u32) -> Self {
        self.margin_modules = margin_modules;
        self
    }

    /// Encode `data` into a square RGB raster
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn encode(&self, data: &str) -> Result<QrImage> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ec_level)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let scale = self.module_pixels.max(1);
        let side = (modules + 2 * self.margin_modules) * scale;
        let dark = image::Rgb::from(self.dark);
        let light = image::Rgb::from(self.light);
        let margin = self.margin_modules;

        let pixels = RgbImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            let inside = (margin..margin + modules).contains(&mx)
                && (margin..margin + modules).contains(&my);
            if inside {
                let idx = ((my - margin) * modules + (mx - margin)) as usize;
                if colors[idx] == qrcode::Color::Dark {
                    return dark;
                }
            }
            light
        });

        debug!("Encoded QR with {} modules into {}px raster", modules, side);
        Ok(QrImage { pixels })
    }
}

/// Rendered QR symbol
#[derive(Debug, Clone)]
pub struct QrImage {
    pixels: RgbImage,
}

impl QrImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Packed 8-bit RGB samples, row-major
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Save the raster as a PNG file
    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.pixels.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_presets() {
        assert_eq!(QrSize::resolve("small").unwrap(), 30.0);
        assert_eq!(QrSize::resolve("medium").unwrap(), 50.0);
        assert_eq!(QrSize::resolve("large").unwrap(), 80.0);
    }

    #[test]
    fn test_numeric_tokens_pass_through() {
        assert_eq!(QrSize::resolve("42").unwrap(), 42.0);
        assert_eq!(QrSize::resolve("12.5").unwrap(), 12.5);
        assert_eq!(QrSize::resolve("1000").unwrap(), 1000.0);
        assert_eq!(QrSize::resolve("-5").unwrap(), -5.0);
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["huge", "", "SMALL", "10pt", "nan", "inf"] {
            let err = QrSize::resolve(token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSizeToken, "token {token:?}");
        }
    }

    #[test]
    fn test_display_round_trips_token() {
        assert_eq!(QrSize::Medium.to_string(), "medium");
        assert_eq!("64".parse::<QrSize>().unwrap(), QrSize::Custom(64.0));
        assert_eq!(QrSize::default(), QrSize::Small);
    }

    #[test]
    fn test_encode_dimensions() {
        let encoder = QrEncoder::default();
        let image = encoder.encode("https://example.com").unwrap();
        assert_eq!(image.width(), image.height());
        // Smallest symbol is 21 modules; plus a 2-module border on each side.
        assert!(image.width() >= (21 + 4) * 10);
        assert_eq!(image.width() % 10, 0);
        assert_eq!(
            image.as_rgb_bytes().len(),
            (image.width() * image.height() * 3) as usize
        );
    }

    #[test]
    fn test_quiet_zone_is_light_and_finder_is_dark() {
        let image = QrEncoder::default().encode("hello").unwrap();
        let bytes = image.as_rgb_bytes();
        // Top-left pixel sits in the quiet zone.
        assert_eq!(&bytes[0..3], &[255, 255, 255]);
        // First module after the quiet zone is the finder pattern corner.
        let offset = ((20 * image.width() + 20) * 3) as usize;
        assert_eq!(&bytes[offset..offset + 3], &[0, 0, 0]);
    }

    #[test]
    fn test_margin_changes_size() {
        let narrow = QrEncoder::default().with_margin_modules(0).encode("x").unwrap();
        let wide = QrEncoder::default().with_margin_modules(4).encode("x").unwrap();
        assert_eq!(wide.width() - narrow.width(), 8 * 10);
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        QrEncoder::default()
            .encode("data")
            .unwrap()
            .write_png(&path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
