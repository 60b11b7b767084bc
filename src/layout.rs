//! Overlay layout: QR placement, footer placement and watermark tiling
//!
//! All coordinates use PDF user space: origin at the bottom-left corner of
//! the page, y increasing upward.

use crate::Result;
use crate::constants::*;
use crate::error::SealError;
use crate::font::StandardFont;
use crate::style::Color;
use crate::surface::{ImageHandle, RenderSurface};
use crate::watermark::{TileGrid, WatermarkConfig};
use tracing::{debug, instrument, trace};

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width: f32,
    height: f32,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width: A4_WIDTH,
        height: A4_HEIGHT,
    };

    pub const LETTER: Self = Self {
        width: LETTER_WIDTH,
        height: LETTER_HEIGHT,
    };

    /// Create a page size. Each side must be positive and at most
    /// `MAX_PAGE_DIMENSION` points.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v > 0.0 && v <= MAX_PAGE_DIMENSION;
        if !valid(width) || !valid(height) {
            return Err(SealError::Render(format!(
                "page dimensions must be in (0, {MAX_PAGE_DIMENSION}], got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Lower-left corner and edge length of the QR image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrPlacement {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl QrPlacement {
    /// Top-right placement, `margin` away from both edges.
    ///
    /// The image is not moved when it does not fit; it overflows the page.
    pub fn top_right(page: PageGeometry, size: f32, margin: f32) -> Self {
        Self {
            x: page.width - size - margin,
            y: page.height - size - margin,
            size,
        }
    }
}

/// Baseline origin of the footer line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterPlacement {
    pub x: f32,
    pub y: f32,
    pub text_width: f32,
}

impl FooterPlacement {
    /// Horizontally centered, `margin_bottom` above the bottom edge
    pub fn centered(page: PageGeometry, text_width: f32, margin_bottom: f32) -> Self {
        Self {
            x: (page.width - text_width) / 2.0,
            y: margin_bottom,
            text_width,
        }
    }
}

/// Font and position settings for the footer line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterStyle {
    pub font: StandardFont,
    pub font_size: f32,
    pub margin_bottom: f32,
    pub color: Color,
}

impl Default for FooterStyle {
    fn default() -> Self {
        Self {
            font: StandardFont::Helvetica,
            font_size: FOOTER_FONT_SIZE,
            margin_bottom: FOOTER_MARGIN_BOTTOM,
            color: Color::black(),
        }
    }
}

/// Content stamped onto a page
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub qr_image: &'a ImageHandle,
    /// QR edge length in points
    pub qr_size: f32,
    pub footer_text: &'a str,
    pub watermark: Option<&'a WatermarkConfig>,
}

/// Resolved geometry of an overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPlan {
    pub qr: QrPlacement,
    pub footer: FooterPlacement,
    pub watermark: Option<TileGrid>,
}

/// Computes overlay geometry and draws it back to front
#[derive(Debug, Clone)]
pub struct OverlayLayoutEngine {
    pub qr_margin: f32,
    pub footer: FooterStyle,
    pub watermark_font: StandardFont,
}

impl Default for OverlayLayoutEngine {
    fn default() -> Self {
        Self {
            qr_margin: QR_MARGIN,
            footer: FooterStyle::default(),
            watermark_font: StandardFont::HelveticaBold,
        }
    }
}

impl OverlayLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_footer_style(mut self, footer: FooterStyle) -> Self {
        self.footer = footer;
        self
    }

    pub fn with_qr_margin(mut self, margin: f32) -> Self {
        self.qr_margin = margin;
        self
    }

    /// Compute placements without drawing anything
    pub fn plan<S: RenderSurface + ?Sized>(
        &self,
        surface: &S,
        page: PageGeometry,
        overlay: &Overlay<'_>,
    ) -> Result<OverlayPlan> {
        if !(overlay.qr_size.is_finite() && overlay.qr_size > 0.0) {
            return Err(SealError::Render(format!(
                "QR size must be positive, got {}",
                overlay.qr_size
            )));
        }

        let qr = QrPlacement::top_right(page, overlay.qr_size, self.qr_margin);

        let footer_width = surface.measure_text_width(
            overlay.footer_text,
            self.footer.font,
            self.footer.font_size,
        );
        let footer = FooterPlacement::centered(page, footer_width, self.footer.margin_bottom);

        let watermark = overlay.watermark.map(|config| {
            let text_width =
                surface.measure_text_width(config.text(), self.watermark_font, config.font_size());
            TileGrid::compute(page, config, text_width)
        });

        Ok(OverlayPlan {
            qr,
            footer,
            watermark,
        })
    }

    /// Draw the overlay: watermark first, then the QR image, then the footer
    #[instrument(skip(self, surface, overlay), fields(watermark = overlay.watermark.is_some()))]
    pub fn render_overlay<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        page: PageGeometry,
        overlay: &Overlay<'_>,
    ) -> Result<()> {
        let plan = self.plan(&*surface, page, overlay)?;
        debug!("Overlay plan: {:?}", plan);

        if let (Some(config), Some(grid)) = (overlay.watermark, plan.watermark.as_ref()) {
            self.draw_watermark(surface, config, grid)?;
        }

        surface.draw_image(
            overlay.qr_image,
            plan.qr.x,
            plan.qr.y,
            plan.qr.size,
            plan.qr.size,
        )?;

        surface.draw_text(
            plan.footer.x,
            plan.footer.y,
            overlay.footer_text,
            self.footer.font,
            self.footer.font_size,
            self.footer.color,
        )?;

        Ok(())
    }

    fn draw_watermark<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        config: &WatermarkConfig,
        grid: &TileGrid,
    ) -> Result<()> {
        trace!("Drawing {} watermark instances", grid.cell_count());

        for (x, y) in grid.anchors() {
            surface.push_transform()?;
            surface.apply_transform(config.angle(), x, y)?;
            surface.set_fill_opacity(config.opacity())?;
            surface.draw_text(
                0.0,
                0.0,
                config.text(),
                self.watermark_font,
                config.font_size(),
                config.color(),
            )?;
            surface.pop_transform()?;
        }

        Ok(())
    }
}
