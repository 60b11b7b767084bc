//! Drawing primitives the layout engine renders through

use crate::Result;
use crate::font::StandardFont;
use crate::style::Color;

/// Opaque reference to an image registered with a surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resource name of the image on its surface
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A rendering back end.
///
/// Coordinates are in points with a bottom-left origin, relative to the
/// current transform.
pub trait RenderSurface {
    /// Place an image with its lower-left corner at `(x, y)`
    fn draw_image(&mut self, image: &ImageHandle, x: f32, y: f32, width: f32, height: f32)
    -> Result<()>;

    /// Draw a single line of text with its baseline starting at `(x, y)`
    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        color: Color,
    ) -> Result<()>;

    /// Advance width of `text` in points
    fn measure_text_width(&self, text: &str, font: StandardFont, size: f32) -> f32;

    /// Save the graphics state
    fn push_transform(&mut self) -> Result<()>;

    /// Restore the graphics state saved by the matching `push_transform`
    fn pop_transform(&mut self) -> Result<()>;

    /// Translate the origin to `(translate_x, translate_y)`, then rotate
    /// counter-clockwise by `rotation_deg` around it
    fn apply_transform(&mut self, rotation_deg: f32, translate_x: f32, translate_y: f32)
    -> Result<()>;

    /// Alpha applied to subsequent fills, until the state is restored
    fn set_fill_opacity(&mut self, opacity: f32) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use crate::error::SealError;
    use crate::font::FontMetrics;

    /// A draw call captured by [`RecordingSurface`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Image {
            name: String,
            x: f32,
            y: f32,
            width: f32,
            height: f32,
        },
        Text {
            x: f32,
            y: f32,
            text: String,
            font: StandardFont,
            size: f32,
            color: Color,
        },
        Push,
        Pop,
        Transform {
            rotation_deg: f32,
            translate_x: f32,
            translate_y: f32,
        },
        Opacity(f32),
    }

    /// Surface that records calls instead of producing bytes
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
        /// Fail the nth draw call (0-based) with a render error
        pub fail_at: Option<usize>,
    }

    impl RecordingSurface {
        fn record(&mut self, call: DrawCall) -> Result<()> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(SealError::Render("recording surface failure".to_string()));
            }
            self.calls.push(call);
            Ok(())
        }

        pub fn texts(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::Text { .. }))
                .collect()
        }
    }

    impl RenderSurface for RecordingSurface {
        fn draw_image(
            &mut self,
            image: &ImageHandle,
            x: f32,
            y: f32,
            width: f32,
            height: f32,
        ) -> Result<()> {
            self.record(DrawCall::Image {
                name: image.name().to_string(),
                x,
                y,
                width,
                height,
            })
        }

        fn draw_text(
            &mut self,
            x: f32,
            y: f32,
            text: &str,
            font: StandardFont,
            size: f32,
            color: Color,
        ) -> Result<()> {
            self.record(DrawCall::Text {
                x,
                y,
                text: text.to_string(),
                font,
                size,
                color,
            })
        }

        fn measure_text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
            font.text_width(text, size)
        }

        fn push_transform(&mut self) -> Result<()> {
            self.record(DrawCall::Push)
        }

        fn pop_transform(&mut self) -> Result<()> {
            self.record(DrawCall::Pop)
        }

        fn apply_transform(
            &mut self,
            rotation_deg: f32,
            translate_x: f32,
            translate_y: f32,
        ) -> Result<()> {
            self.record(DrawCall::Transform {
                rotation_deg,
                translate_x,
                translate_y,
            })
        }

        fn set_fill_opacity(&mut self, opacity: f32) -> Result<()> {
            self.record(DrawCall::Opacity(opacity))
        }
    }
}
