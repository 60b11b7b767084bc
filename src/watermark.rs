//! Watermark configuration and tile-grid geometry

use crate::Result;
use crate::constants::*;
use crate::error::SealError;
use crate::layout::PageGeometry;
use crate::style::Color;
use tracing::trace;

/// Coerce `value` into `[lo, hi]`. NaN lands on `hi`.
fn clamp_to((lo, hi): (f32, f32), value: f32) -> f32 {
    lo.max(hi.min(value))
}

/// Validated watermark settings.
///
/// Numeric fields are clamped into their ranges on every setter, so a
/// constructed value always satisfies them.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkConfig {
    text: String,
    font_size: f32,
    opacity: f32,
    angle: f32,
    spacing_x: f32,
    spacing_y: f32,
    color: Color,
}

impl WatermarkConfig {
    /// Create a watermark with default styling
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(SealError::InvalidWatermark(
                "watermark text must not be empty".to_string(),
            ));
        }

        Ok(Self {
            text,
            font_size: DEFAULT_WATERMARK_FONT_SIZE,
            opacity: DEFAULT_WATERMARK_OPACITY,
            angle: DEFAULT_WATERMARK_ANGLE,
            spacing_x: DEFAULT_WATERMARK_SPACING_X,
            spacing_y: DEFAULT_WATERMARK_SPACING_Y,
            color: Color::from_hex(DEFAULT_WATERMARK_COLOR)?,
        })
    }

    /// Build from all seven fields at once
    pub fn from_parts(
        text: impl Into<String>,
        font_size: f32,
        opacity: f32,
        angle: f32,
        spacing_x: f32,
        spacing_y: f32,
        color_hex: &str,
    ) -> Result<Self> {
        Self::new(text)?
            .with_font_size(font_size)
            .with_opacity(opacity)
            .with_angle(angle)
            .with_spacing(spacing_x, spacing_y)
            .with_color(color_hex)
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = clamp_to(WATERMARK_FONT_SIZE_RANGE, font_size);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = clamp_to(WATERMARK_OPACITY_RANGE, opacity);
        self
    }

    /// Rotation in degrees, counter-clockwise
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = clamp_to(WATERMARK_ANGLE_RANGE, angle);
        self
    }

    /// Minimum distance between neighbouring instances
    pub fn with_spacing(mut self, spacing_x: f32, spacing_y: f32) -> Self {
        self.spacing_x = clamp_to(WATERMARK_SPACING_RANGE, spacing_x);
        self.spacing_y = clamp_to(WATERMARK_SPACING_RANGE, spacing_y);
        self
    }

    /// Set the text color from a hex string
    pub fn with_color(mut self, color_hex: &str) -> Result<Self> {
        self.color = Color::from_hex(color_hex)?;
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn spacing_x(&self) -> f32 {
        self.spacing_x
    }

    pub fn spacing_y(&self) -> f32 {
        self.spacing_y
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Lattice of watermark anchors covering a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub cols: usize,
    pub rows: usize,
    page_height: f32,
}

impl TileGrid {
    /// Compute the grid for `config` on `page`, given the measured text width.
    ///
    /// Two extra rows and columns keep the edges covered once the text is
    /// rotated away from its anchor.
    pub fn compute(page: PageGeometry, config: &WatermarkConfig, text_width: f32) -> Self {
        let spacing_x = config.spacing_x.max(text_width + WATERMARK_GAP);
        let spacing_y = config.spacing_y.max(config.font_size + WATERMARK_GAP);
        // `as` saturates, so a degenerate page cannot overflow the count
        let cols = ((page.width() / spacing_x).floor() as usize).saturating_add(2);
        let rows = ((page.height() / spacing_y).floor() as usize).saturating_add(2);

        trace!(
            "Tile grid {}x{} with spacing ({}, {})",
            cols, rows, spacing_x, spacing_y
        );

        Self {
            spacing_x,
            spacing_y,
            cols,
            rows,
            page_height: page.height(),
        }
    }

    /// Number of watermark instances drawn
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Anchor of cell `(row, col)`, counted from the top-left of the page
    pub fn anchor(&self, row: usize, col: usize) -> (f32, f32) {
        (
            col as f32 * self.spacing_x,
            self.page_height - row as f32 * self.spacing_y,
        )
    }

    /// All anchors, row by row
    pub fn anchors(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.anchor(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = WatermarkConfig::new("DRAFT").unwrap();
        assert_eq!(config.font_size(), 24.0);
        assert_eq!(config.opacity(), 0.4);
        assert_eq!(config.angle(), 45.0);
        assert_eq!(config.spacing_x(), 200.0);
        assert_eq!(config.spacing_y(), 150.0);
        assert_eq!(config.color(), Color::rgb(0xCC, 0xCC, 0xCC));
    }

    #[test]
    fn test_values_above_range_are_clamped() {
        let config = WatermarkConfig::new("DRAFT")
            .unwrap()
            .with_font_size(100.0)
            .with_opacity(2.0)
            .with_angle(100.0)
            .with_spacing(1000.0, 501.0);
        assert_eq!(config.font_size(), 72.0);
        assert_eq!(config.opacity(), 1.0);
        assert_eq!(config.angle(), 90.0);
        assert_eq!(config.spacing_x(), 500.0);
        assert_eq!(config.spacing_y(), 500.0);
    }

    #[test]
    fn test_values_below_range_are_clamped() {
        let config = WatermarkConfig::new("DRAFT")
            .unwrap()
            .with_font_size(1.0)
            .with_opacity(0.0)
            .with_angle(-200.0)
            .with_spacing(0.0, -10.0);
        assert_eq!(config.font_size(), 8.0);
        assert_eq!(config.opacity(), 0.1);
        assert_eq!(config.angle(), -90.0);
        assert_eq!(config.spacing_x(), 50.0);
        assert_eq!(config.spacing_y(), 50.0);
    }

    #[test]
    fn test_bounds_are_preserved() {
        let low = WatermarkConfig::from_parts("X", 8.0, 0.1, -90.0, 50.0, 50.0, "#000").unwrap();
        assert_eq!(
            (low.font_size(), low.opacity(), low.angle(), low.spacing_x()),
            (8.0, 0.1, -90.0, 50.0)
        );
        let high =
            WatermarkConfig::from_parts("X", 72.0, 1.0, 90.0, 500.0, 500.0, "#000").unwrap();
        assert_eq!(
            (high.font_size(), high.opacity(), high.angle(), high.spacing_y()),
            (72.0, 1.0, 90.0, 500.0)
        );
    }

    #[test]
    fn test_nan_is_coerced_into_range() {
        let config = WatermarkConfig::new("DRAFT").unwrap().with_opacity(f32::NAN);
        assert_eq!(config.opacity(), 1.0);
    }

    #[test]
    fn test_bad_color_fails() {
        let err = WatermarkConfig::from_parts("X", 24.0, 0.4, 45.0, 200.0, 150.0, "#GGG")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidColor);
    }

    #[test]
    fn test_empty_text_fails() {
        let err = WatermarkConfig::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidWatermark);
    }

    #[test]
    fn test_grid_uses_configured_spacing_for_short_text() {
        let config = WatermarkConfig::new("X").unwrap();
        let grid = TileGrid::compute(PageGeometry::A4, &config, 20.0);
        assert_eq!(grid.spacing_x, 200.0);
        assert_eq!(grid.spacing_y, 150.0);
        // floor(595.28 / 200) + 2, floor(841.89 / 150) + 2
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.rows, 7);
        assert_eq!(grid.cell_count(), 28);
    }

    #[test]
    fn test_grid_widens_for_long_text() {
        let config = WatermarkConfig::new("CONFIDENTIAL").unwrap().with_font_size(72.0);
        let grid = TileGrid::compute(PageGeometry::A4, &config, 480.0);
        assert_eq!(grid.spacing_x, 530.0);
        assert_eq!(grid.spacing_y, 150.0);

        let tall = WatermarkConfig::new("X")
            .unwrap()
            .with_font_size(72.0)
            .with_spacing(50.0, 50.0);
        let grid = TileGrid::compute(PageGeometry::A4, &tall, 10.0);
        assert_eq!(grid.spacing_y, 122.0);
        assert_eq!(grid.spacing_x, 60.0);
    }

    #[test]
    fn test_grid_covers_page() {
        let pages = [
            PageGeometry::A4,
            PageGeometry::LETTER,
            PageGeometry::new(100.0, 100.0).unwrap(),
            PageGeometry::new(2000.0, 300.0).unwrap(),
            PageGeometry::new(500.0, 500.0).unwrap(),
            PageGeometry::new(MAX_PAGE_DIMENSION, MAX_PAGE_DIMENSION).unwrap(),
        ];
        let spacings = [50.0, 137.5, 200.0, 500.0];
        for page in pages {
            for &sx in &spacings {
                for &sy in &spacings {
                    for text_width in [0.0, 75.0, 900.0] {
                        let config = WatermarkConfig::new("X").unwrap().with_spacing(sx, sy);
                        let grid = TileGrid::compute(page, &config, text_width);
                        assert!(grid.cols as f32 * grid.spacing_x >= page.width());
                        assert!(grid.rows as f32 * grid.spacing_y >= page.height());
                    }
                }
            }
        }
    }

    #[test]
    fn test_anchors_start_top_left() {
        let config = WatermarkConfig::new("X").unwrap();
        let page = PageGeometry::new(400.0, 300.0).unwrap();
        let grid = TileGrid::compute(page, &config, 10.0);
        let anchors: Vec<_> = grid.anchors().collect();
        assert_eq!(anchors.len(), grid.cell_count());
        assert_eq!(anchors[0], (0.0, 300.0));
        assert_eq!(anchors[1], (200.0, 300.0));
        assert_eq!(anchors[grid.cols], (0.0, 150.0));
    }

    #[test]
    fn test_largest_page_has_bounded_grid() {
        let config = WatermarkConfig::new("X").unwrap().with_spacing(50.0, 50.0);
        let page = PageGeometry::new(MAX_PAGE_DIMENSION, MAX_PAGE_DIMENSION).unwrap();
        let grid = TileGrid::compute(page, &config, 0.0);
        // floor(14400 / 50) + 2 on both axes
        assert_eq!((grid.cols, grid.rows), (290, 290));
        assert_eq!(grid.cell_count(), 290 * 290);
    }

    #[test]
    fn test_oversized_pages_are_rejected() {
        assert!(PageGeometry::new(f32::INFINITY, 100.0).is_err());
        assert!(PageGeometry::new(f32::NAN, 100.0).is_err());
        assert!(PageGeometry::new(100.0, MAX_PAGE_DIMENSION + 1.0).is_err());
        assert!(PageGeometry::new(1.0e30, 1.0e30).is_err());
    }
}
