//! Stamp a QR code, a footer line and an optional tiled watermark onto a PDF page
//!
//! The layout engine draws through the [`RenderSurface`] trait, so geometry and
//! paint order can be exercised without producing PDF bytes. [`PdfSurface`] is
//! the lopdf-backed implementation used by [`DocumentAssembler`].

pub mod constants;
pub mod document;
pub mod drawing;
pub mod error;
pub mod font;
pub mod layout;
pub mod qr;
pub mod style;
pub mod surface;
pub mod watermark;

pub use document::{DocumentAssembler, SealRequest, default_output_path, validate_input};
pub use drawing::PdfSurface;
pub use error::{ErrorKind, Result, SealError};
pub use font::{FontMetrics, StandardFont};
pub use layout::{
    FooterPlacement, FooterStyle, Overlay, OverlayLayoutEngine, OverlayPlan, PageGeometry,
    QrPlacement,
};
pub use qr::{QrEncoder, QrImage, QrSize};
pub use style::Color;
pub use surface::{ImageHandle, RenderSurface};
pub use watermark::{TileGrid, WatermarkConfig};
