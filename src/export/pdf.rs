//! Single-page PDF output.
//!
//! The code is rasterized (white background), JPEG-compressed and placed as
//! one image filling a page sized from the pixel dimensions at the
//! configured DPI.

use image::RgbaImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use crate::error::Result;

use super::raster::encode_jpeg;

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Millimetres covered by `px` pixels at `dpi`.
pub fn px_to_mm(px: u32, dpi: f32) -> f32 {
    px as f32 * MM_PER_INCH / dpi
}

/// PDF points for a length in millimetres.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Build a one-page PDF showing `img` edge to edge.
pub fn write_pdf(img: &RgbaImage, dpi: f32, jpeg_quality: u8) -> Result<Vec<u8>> {
    let dpi = if dpi.is_finite() && dpi > 0.0 { dpi } else { 96.0 };
    let width_pt = mm_to_pt(px_to_mm(img.width(), dpi));
    let height_pt = mm_to_pt(px_to_mm(img.height(), dpi));
    let jpeg = encode_jpeg(img, jpeg_quality)?;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Code");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &jpeg);
    image.filter(Filter::DctDecode);
    image.width(img.width() as i32);
    image.height(img.height() as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([width_pt, 0.0, 0.0, height_pt, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    tracing::debug!(width_pt, height_pt, dpi, bytes = jpeg.len(), "wrote pdf page");
    Ok(pdf.finish())
}
