//! Sealing pipeline: validate the input, render the overlay page, write it out

use crate::Result;
use crate::constants::SEALED_SUFFIX;
use crate::drawing::PdfSurface;
use crate::error::SealError;
use crate::layout::{Overlay, OverlayLayoutEngine, PageGeometry};
use crate::qr::{QrEncoder, QrSize};
use crate::watermark::WatermarkConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Everything needed to seal one document
#[derive(Debug, Clone)]
pub struct SealRequest {
    pub input_path: PathBuf,
    /// Defaults to `<input stem>_sealed.pdf` next to the input
    pub output_path: Option<PathBuf>,
    pub qr_data: String,
    pub footer_message: String,
    pub qr_size: QrSize,
    pub watermark: Option<WatermarkConfig>,
}

impl SealRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        qr_data: impl Into<String>,
        footer_message: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            qr_data: qr_data.into(),
            footer_message: footer_message.into(),
            qr_size: QrSize::default(),
            watermark: None,
        }
    }

    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_qr_size(mut self, qr_size: QrSize) -> Self {
        self.qr_size = qr_size;
        self
    }

    pub fn with_watermark(mut self, watermark: WatermarkConfig) -> Self {
        self.watermark = Some(watermark);
        self
    }
}

/// Check that `path` names an existing file with a `.pdf` extension
pub fn validate_input(path: &Path) -> Result<()> {
    let invalid = |reason: &str| SealError::InvalidInputFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if !path.exists() {
        return Err(invalid("file does not exist"));
    }
    if !path.is_file() {
        return Err(invalid("not a regular file"));
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(invalid("not a PDF file"));
    }

    Ok(())
}

/// `report.pdf` becomes `report_sealed.pdf` in the same directory
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{SEALED_SUFFIX}"))
}

/// Runs the sealing pipeline for a single page
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    page: PageGeometry,
    engine: OverlayLayoutEngine,
    qr_encoder: QrEncoder,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn with_engine(mut self, engine: OverlayLayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_qr_encoder(mut self, qr_encoder: QrEncoder) -> Self {
        self.qr_encoder = qr_encoder;
        self
    }

    pub fn page(&self) -> PageGeometry {
        self.page
    }

    pub fn qr_encoder(&self) -> &QrEncoder {
        &self.qr_encoder
    }

    /// Seal `request` and return the path that was written.
    ///
    /// Validation happens before any rendering. Output goes to a uniquely
    /// named temporary file in the destination directory and is renamed into
    /// place only after it has been fully written.
    #[instrument(skip(self, request), fields(input = %request.input_path.display()))]
    pub fn process(&self, request: &SealRequest) -> Result<PathBuf> {
        validate_input(&request.input_path)?;

        let qr_size = request.qr_size.points();
        if !(qr_size.is_finite() && qr_size > 0.0) {
            return Err(SealError::InvalidSizeToken(request.qr_size.to_string()));
        }

        let output_path = request
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input_path));
        debug!("Resolved output path {}", output_path.display());

        let bytes = self.render(request, qr_size)?;
        write_atomically(&output_path, &bytes)?;

        info!(
            "Sealed {} into {} ({} bytes)",
            request.input_path.display(),
            output_path.display(),
            bytes.len()
        );
        Ok(output_path)
    }

    /// Render the overlay page and serialize it
    fn render(&self, request: &SealRequest, qr_size: f32) -> Result<Vec<u8>> {
        let qr_image = self.qr_encoder.encode(&request.qr_data)?;

        let mut surface = PdfSurface::new();
        let qr_handle = surface.add_image(&qr_image);

        let overlay = Overlay {
            qr_image: &qr_handle,
            qr_size,
            footer_text: &request.footer_message,
            watermark: request.watermark.as_ref(),
        };
        self.engine
            .render_overlay(&mut surface, self.page, &overlay)?;

        let title = request
            .input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mut doc = surface.into_document(self.page, title.as_deref())?;
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".pdf-sealer-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| SealError::Io(e.error))?;
    Ok(())
}
