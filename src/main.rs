//! Command-line front end for pdf-sealer

use clap::{Parser, ValueEnum};
use pdf_sealer::{
    DocumentAssembler, PageGeometry, QrEncoder, QrSize, SealRequest, WatermarkConfig,
    validate_input,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageSize {
    A4,
    Letter,
}

impl From<PageSize> for PageGeometry {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::A4 => PageGeometry::A4,
            PageSize::Letter => PageGeometry::LETTER,
        }
    }
}

/// Add a QR code header, a footer message and an optional tiled watermark to a PDF
#[derive(Debug, Parser)]
#[command(name = "pdf-sealer", version)]
struct Cli {
    /// Path to the input PDF file
    input_pdf: PathBuf,

    /// String data to encode in the QR code
    #[arg(short = 'q', long)]
    qr_data: String,

    /// Message to display in the footer
    #[arg(short = 'f', long)]
    footer_message: String,

    /// QR code size: small (30pt), medium (50pt), large (80pt), or a size in points
    #[arg(short = 's', long, default_value = "small")]
    qr_size: String,

    /// Quiet zone around the QR code, in modules
    #[arg(short = 'b', long, default_value_t = 2)]
    qr_border: u32,

    /// Page size of the generated page
    #[arg(long, value_enum, default_value_t = PageSize::A4)]
    page_size: PageSize,

    /// Watermark text; enables the watermark
    #[arg(long)]
    watermark_text: Option<String>,

    /// Watermark font size, 8-72
    #[arg(long, default_value_t = 24, allow_negative_numbers = true)]
    watermark_font_size: i32,

    /// Watermark opacity, 0.1-1.0
    #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
    watermark_opacity: f32,

    /// Watermark rotation in degrees, -90 to 90
    #[arg(long, default_value_t = 45, allow_negative_numbers = true)]
    watermark_angle: i32,

    /// Horizontal distance between watermark instances, 50-500
    #[arg(long, default_value_t = 200, allow_negative_numbers = true)]
    watermark_spacing_x: i32,

    /// Vertical distance between watermark instances, 50-500
    #[arg(long, default_value_t = 150, allow_negative_numbers = true)]
    watermark_spacing_y: i32,

    /// Watermark color as hex, e.g. #CCCCCC
    #[arg(long, default_value = "#CCCCCC")]
    watermark_color: String,

    /// Output PDF path (default: <input>_sealed.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save the QR code as a PNG image
    #[arg(long)]
    save_qr: Option<PathBuf>,
}

impl Cli {
    fn watermark(&self) -> pdf_sealer::Result<Option<WatermarkConfig>> {
        self.watermark_text
            .as_deref()
            .map(|text| {
                WatermarkConfig::from_parts(
                    text,
                    self.watermark_font_size as f32,
                    self.watermark_opacity,
                    self.watermark_angle as f32,
                    self.watermark_spacing_x as f32,
                    self.watermark_spacing_y as f32,
                    &self.watermark_color,
                )
            })
            .transpose()
    }

    fn request(&self) -> pdf_sealer::Result<SealRequest> {
        let qr_size: QrSize = self.qr_size.parse()?;
        let mut request = SealRequest::new(&self.input_pdf, &self.qr_data, &self.footer_message)
            .with_qr_size(qr_size);
        if let Some(output) = &self.output {
            request = request.with_output(output);
        }
        if let Some(watermark) = self.watermark()? {
            request = request.with_watermark(watermark);
        }
        Ok(request)
    }

    fn assembler(&self) -> DocumentAssembler {
        DocumentAssembler::new()
            .with_page(self.page_size.into())
            .with_qr_encoder(QrEncoder::default().with_margin_modules(self.qr_border))
    }
}

fn seal(cli: &Cli) -> pdf_sealer::Result<PathBuf> {
    let request = cli.request()?;
    debug!("Sealing with {:?}", request);

    let assembler = cli.assembler();

    // Before `process`, so a PNG failure leaves no sealed PDF behind
    if let Some(path) = &cli.save_qr {
        validate_input(&request.input_path)?;
        assembler
            .qr_encoder()
            .encode(&request.qr_data)?
            .write_png(path)?;
    }

    assembler.process(&request)
}

fn run(cli: &Cli) -> u8 {
    match seal(cli) {
        Ok(output) => {
            println!(
                "Successfully processed PDF. Output saved to: {}",
                output.display()
            );
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    }
}

/// Parse arguments; help and version requests succeed, anything else fails with 1
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => EXIT_OK,
            _ => EXIT_FAILURE,
        }
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let code = match parse_args(std::env::args_os()) {
        Ok(cli) => run(&cli),
        Err(code) => code,
    };
    ExitCode::from(code)
}
