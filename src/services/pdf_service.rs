use base64::{engine::general_purpose, Engine as _};
use image::GenericImageView;
use pdfium_render::prelude::*;
use std::error::Error;
use std::fmt;

// A4 layout, all in millimetres
const PAGE_WIDTH_MM: f32 = 210.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_Y_MM: f32 = 270.0;
const CAPTURE_TOP_MM: f32 = 260.0;
const CAPTURE_MAX_WIDTH_MM: f32 = 170.0;
const CAPTURE_MAX_HEIGHT_MM: f32 = 220.0;

#[derive(Debug)]
pub enum PdfExportError {
    InvalidImageData(String),
    ImageDecodeError(String),
    PdfError(String),
}

impl fmt::Display for PdfExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfExportError::InvalidImageData(err) => write!(f, "Invalid image data: {}", err),
            PdfExportError::ImageDecodeError(err) => write!(f, "Image decode error: {}", err),
            PdfExportError::PdfError(err) => write!(f, "PDF error: {}", err),
        }
    }
}

impl Error for PdfExportError {}

impl From<PdfiumError> for PdfExportError {
    fn from(err: PdfiumError) -> Self {
        PdfExportError::PdfError(format!("{:?}", err))
    }
}

/// Decode the browser-side capture, which arrives either as a bare base64
/// string or a full `data:image/png;base64,...` URL.
pub fn decode_capture(image_data: &str) -> Result<Vec<u8>, PdfExportError> {
    let base64_data = if image_data.starts_with("data:") {
        image_data.split(',').nth(1).ok_or_else(|| {
            PdfExportError::InvalidImageData("Invalid base64 data format".to_string())
        })?
    } else {
        image_data
    };

    general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|e| PdfExportError::InvalidImageData(e.to_string()))
}

/// Download filename for an exported trip, whitespace collapsed to
/// underscores.
pub fn pdf_filename(destination: &str) -> String {
    let destination = if destination.trim().is_empty() {
        "Your_Trip"
    } else {
        destination.trim()
    };

    let whitespace = regex::Regex::new(r"\s+").unwrap();
    format!("Trip_to_{}.pdf", whitespace.replace_all(destination, "_"))
}

/// Assemble the export artifact: one A4 page with a title line, the client's
/// rendered capture scaled to fit, and a generation-date footer.
pub fn render_trip_pdf(destination: &str, image_data: &str) -> Result<Vec<u8>, PdfExportError> {
    let capture_bytes = decode_capture(image_data)?;

    let capture = image::load_from_memory(&capture_bytes)
        .map_err(|e| PdfExportError::ImageDecodeError(e.to_string()))?;

    let pdfium = Pdfium::new(Pdfium::bind_to_system_library()?);
    let mut document = pdfium.create_new_pdf()?;
    let mut page = document
        .pages_mut()
        .create_page_at_end(PdfPagePaperSize::a4())?;

    let font = document.fonts_mut().helvetica();

    let title = if destination.trim().is_empty() {
        "Trip Plan: Your Trip".to_string()
    } else {
        format!("Trip Plan: {}", destination.trim())
    };
    let mut title_object =
        PdfPageTextObject::new(&document, title, font, PdfPoints::new(22.0))?;
    title_object.translate(PdfPoints::from_mm(MARGIN_MM), PdfPoints::from_mm(TITLE_Y_MM))?;
    page.objects_mut().add_text_object(title_object)?;

    // Scale the capture to fit the content box, preserving aspect ratio
    let (pixel_width, pixel_height) = capture.dimensions();
    let scale = (CAPTURE_MAX_WIDTH_MM / pixel_width as f32)
        .min(CAPTURE_MAX_HEIGHT_MM / pixel_height as f32);
    let width_mm = pixel_width as f32 * scale;
    let height_mm = pixel_height as f32 * scale;
    let x_mm = (PAGE_WIDTH_MM - width_mm) / 2.0;
    let y_mm = CAPTURE_TOP_MM - height_mm;

    let mut capture_object =
        PdfPageImageObject::new_with_width(&document, &capture, PdfPoints::from_mm(width_mm))?;
    capture_object.translate(PdfPoints::from_mm(x_mm), PdfPoints::from_mm(y_mm))?;
    page.objects_mut().add_image_object(capture_object)?;

    let footer = format!("Generated on: {}", chrono::Utc::now().format("%Y-%m-%d"));
    let mut footer_object = PdfPageTextObject::new(&document, footer, font, PdfPoints::new(10.0))?;
    footer_object.translate(PdfPoints::from_mm(MARGIN_MM), PdfPoints::from_mm(12.0))?;
    page.objects_mut().add_text_object(footer_object)?;

    Ok(document.save_to_bytes()?)
}
