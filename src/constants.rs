//! Constants for page dimensions, overlay placement and watermark ranges

/// Standard A4 page width in points
pub const A4_WIDTH: f32 = 595.28;

/// Standard A4 page height in points
pub const A4_HEIGHT: f32 = 841.89;

/// US Letter page width in points
pub const LETTER_WIDTH: f32 = 612.0;

/// US Letter page height in points
pub const LETTER_HEIGHT: f32 = 792.0;

/// Distance between the QR code and the top/right page edges
pub const QR_MARGIN: f32 = 20.0;

/// QR size presets in points
pub const QR_SIZE_SMALL: f32 = 30.0;
pub const QR_SIZE_MEDIUM: f32 = 50.0;
pub const QR_SIZE_LARGE: f32 = 80.0;

/// Quiet zone around the QR symbol, in modules
pub const QR_MARGIN_MODULES: u32 = 2;

/// Raster pixels per QR module
pub const QR_MODULE_PIXELS: u32 = 10;

/// Footer font size in points
pub const FOOTER_FONT_SIZE: f32 = 10.0;

/// Largest page side accepted, the PDF limit of 200 inches
pub const MAX_PAGE_DIMENSION: f32 = 14_400.0;

/// Footer baseline distance from the bottom edge
pub const FOOTER_MARGIN_BOTTOM: f32 = 20.0;

/// Extra room added around a watermark instance when spacing the tile grid
pub const WATERMARK_GAP: f32 = 50.0;

pub const WATERMARK_FONT_SIZE_RANGE: (f32, f32) = (8.0, 72.0);
pub const WATERMARK_OPACITY_RANGE: (f32, f32) = (0.1, 1.0);
pub const WATERMARK_ANGLE_RANGE: (f32, f32) = (-90.0, 90.0);
pub const WATERMARK_SPACING_RANGE: (f32, f32) = (50.0, 500.0);

pub const DEFAULT_WATERMARK_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.4;
pub const DEFAULT_WATERMARK_ANGLE: f32 = 45.0;
pub const DEFAULT_WATERMARK_SPACING_X: f32 = 200.0;
pub const DEFAULT_WATERMARK_SPACING_Y: f32 = 150.0;
pub const DEFAULT_WATERMARK_COLOR: &str = "#CCCCCC";

/// Suffix appended to the input file stem for the default output path
pub const SEALED_SUFFIX: &str = "_sealed.pdf";
