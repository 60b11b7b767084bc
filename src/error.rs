//! Error types for the pdf-sealer library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SealError
pub type Result<T> = std::result::Result<T, SealError>;

/// Errors that can occur while building or writing a sealed page
#[derive(Debug, Error)]
pub enum SealError {
    /// QR size token is neither a preset nor a positive number
    #[error("Invalid QR size '{0}': use 'small', 'medium', 'large', or a number")]
    InvalidSizeToken(String),

    /// Color string is not 3 or 6 hex digits
    #[error("Invalid color '{0}': expected 3 or 6 hex digits with optional '#'")]
    InvalidColor(String),

    /// Watermark text is missing
    #[error("Invalid watermark: {0}")]
    InvalidWatermark(String),

    /// Input path is missing, not a file, or not a PDF
    #[error("Invalid input file '{}': {reason}", .path.display())]
    InvalidInputFile { path: PathBuf, reason: String },

    /// Drawing failed on the rendering surface
    #[error("Render failed: {0}")]
    Render(String),

    /// Error from the underlying lopdf library
    #[error("PDF operation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// QR symbol could not be encoded
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// QR raster could not be written
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Reading, writing or renaming a file failed
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`SealError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSizeToken,
    InvalidColor,
    InvalidWatermark,
    InvalidInputFile,
    RenderFailure,
    IoFailure,
}

impl SealError {
    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSizeToken(_) => ErrorKind::InvalidSizeToken,
            Self::InvalidColor(_) => ErrorKind::InvalidColor,
            Self::InvalidWatermark(_) => ErrorKind::InvalidWatermark,
            Self::InvalidInputFile { .. } => ErrorKind::InvalidInputFile,
            Self::Render(_) | Self::Pdf(_) | Self::Qr(_) | Self::Image(_) => {
                ErrorKind::RenderFailure
            }
            Self::Io(_) => ErrorKind::IoFailure,
        }
    }

    /// Validation errors are raised before any rendering work starts
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidSizeToken
                | ErrorKind::InvalidColor
                | ErrorKind::InvalidWatermark
                | ErrorKind::InvalidInputFile
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            SealError::InvalidColor("#GGG".into()).kind(),
            ErrorKind::InvalidColor
        );
        assert_eq!(
            SealError::Render("stack underflow".into()).kind(),
            ErrorKind::RenderFailure
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(SealError::from(io).kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_validation_classification() {
        assert!(SealError::InvalidSizeToken("huge".into()).is_validation());
        assert!(!SealError::Render("boom".into()).is_validation());
    }

    #[test]
    fn test_input_file_message() {
        let err = SealError::InvalidInputFile {
            path: PathBuf::from("notes.txt"),
            reason: "not a PDF file".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input file 'notes.txt': not a PDF file"
        );
    }
}
