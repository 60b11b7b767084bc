//! Seal a page with a QR code, a footer and a rotated watermark

use pdf_sealer::{
    DocumentAssembler, OverlayLayoutEngine, PageGeometry, QrSize, SealRequest, WatermarkConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with debug level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let dir = std::env::temp_dir().join("pdf-sealer-demo");
    std::fs::create_dir_all(&dir)?;

    // The input is only validated, never parsed
    let input = dir.join("invoice.pdf");
    std::fs::write(&input, b"%PDF-1.4\n%%EOF\n")?;

    let watermark = WatermarkConfig::new("CONFIDENTIAL")?
        .with_font_size(36.0)
        .with_opacity(0.2)
        .with_angle(30.0)
        .with_color("#D04040")?;

    let request = SealRequest::new(
        &input,
        "https://example.com/invoice/2024-0042",
        "Invoice 2024-0042",
    )
    .with_qr_size(QrSize::Medium)
    .with_watermark(watermark);

    let assembler = DocumentAssembler::new()
        .with_page(PageGeometry::LETTER)
        .with_engine(OverlayLayoutEngine::new().with_qr_margin(30.0));

    let output = assembler.process(&request)?;
    println!("Created {}", output.display());

    Ok(())
}
