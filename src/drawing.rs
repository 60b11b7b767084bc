//! PDF drawing surface built on lopdf content streams

use crate::Result;
use crate::error::SealError;
use crate::font::{FontMetrics, StandardFont};
use crate::layout::PageGeometry;
use crate::qr::QrImage;
use crate::style::Color;
use crate::surface::{ImageHandle, RenderSurface};
use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};
use tracing::{debug, trace};

const FONTS: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

/// Collects content-stream operations and the resources they reference
#[derive(Debug, Default)]
pub struct PdfSurface {
    operations: Vec<Operation>,
    images: Vec<(String, Stream)>,
    /// ExtGState resource name per fill alpha
    opacities: Vec<(f32, String)>,
    depth: usize,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a QR raster as an image XObject
    pub fn add_image(&mut self, image: &QrImage) -> ImageHandle {
        let name = format!("Im{}", self.images.len() + 1);
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width()),
                "Height" => i64::from(image.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.as_rgb_bytes().to_vec(),
        );
        trace!(
            "Registered image {} ({}x{})",
            name,
            image.width(),
            image.height()
        );
        self.images.push((name.clone(), stream));
        ImageHandle::new(name)
    }

    /// Operations emitted so far
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn ext_gstate_for(&mut self, opacity: f32) -> String {
        if let Some((_, name)) = self.opacities.iter().find(|(a, _)| *a == opacity) {
            return name.clone();
        }
        let name = format!("GS{}", self.opacities.len() + 1);
        self.opacities.push((opacity, name.clone()));
        name
    }

    fn has_image(&self, handle: &ImageHandle) -> bool {
        self.images.iter().any(|(name, _)| name == handle.name())
    }

    /// Build a single-page document carrying the collected content
    pub fn into_document(self, page: PageGeometry, title: Option<&str>) -> Result<Document> {
        if self.depth != 0 {
            return Err(SealError::Render(format!(
                "{} graphics state(s) left unrestored",
                self.depth
            )));
        }

        debug!(
            "Writing page {}x{} with {} operations",
            page.width(),
            page.height(),
            self.operations.len()
        );

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for font in FONTS {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(font.resource_name(), font_id);
        }

        let mut xobjects = Dictionary::new();
        for (name, stream) in self.images {
            let image_id = doc.add_object(stream);
            xobjects.set(name, image_id);
        }

        let mut ext_gstates = Dictionary::new();
        for (opacity, name) in self.opacities {
            ext_gstates.set(
                name,
                dictionary! {
                    "Type" => "ExtGState",
                    "ca" => opacity,
                    "CA" => opacity,
                },
            );
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
            "XObject" => xobjects,
            "ExtGState" => ext_gstates,
        });

        let content = Content {
            operations: self.operations,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width().into(), page.height().into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal(concat!("pdf-sealer ", env!("CARGO_PKG_VERSION"))),
        };
        if let Some(title) = title {
            info.set("Title", Object::string_literal(title));
        }
        let info_id: ObjectId = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

impl RenderSurface for PdfSurface {
    fn draw_image(
        &mut self,
        image: &ImageHandle,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        if !self.has_image(image) {
            return Err(SealError::Render(format!(
                "image {} is not registered on this surface",
                image.name()
            )));
        }

        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(image.name().as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
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
        let [r, g, b] = color.to_pdf_components();
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource_name().as_bytes().to_vec()),
                    size.into(),
                ],
            ),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(font.encode_text(text))]),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn measure_text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        font.text_width(text, size)
    }

    fn push_transform(&mut self) -> Result<()> {
        self.depth += 1;
        self.operations.push(Operation::new("q", vec![]));
        Ok(())
    }

    fn pop_transform(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(SealError::Render(
                "graphics state restored without a matching save".to_string(),
            ));
        }
        self.depth -= 1;
        self.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn apply_transform(
        &mut self,
        rotation_deg: f32,
        translate_x: f32,
        translate_y: f32,
    ) -> Result<()> {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        self.operations.push(Operation::new(
            "cm",
            vec![
                cos.into(),
                sin.into(),
                (-sin).into(),
                cos.into(),
                translate_x.into(),
                translate_y.into(),
            ],
        ));
        Ok(())
    }

    fn set_fill_opacity(&mut self, opacity: f32) -> Result<()> {
        let name = self.ext_gstate_for(opacity);
        self.operations
            .push(Operation::new("gs", vec![Object::Name(name.into_bytes())]));
        Ok(())
    }
}
