use super::page::{PageLayout, PageOptions};
use super::raster::RasterImage;
use super::sanitize::neutralize_color_functions;
use crate::error::ExportError;
use crate::render::text::escape_xml;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

/// Embeds a captured image into a single-page PDF sized by [`PageLayout::fit`].
pub fn embed_in_document(image: &RasterImage, options: &PageOptions) -> Result<Vec<u8>, ExportError> {
    let layout = PageLayout::fit(image.width, image.height, options)?;
    let background = neutralize_color_functions(&options.background, "#ffffff").text;
    let svg = page_svg(image, &layout, &background);

    // One SVG user unit maps to one PDF point at the default 72 dpi.
    let opt = svg2pdf::usvg::Options::default();
    let tree = svg2pdf::usvg::Tree::from_str(&svg, &opt)
        .map_err(|e| ExportError::PdfConvert(e.to_string()))?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| ExportError::PdfConvert("svg2pdf could not convert the page".to_string()))?;

    debug!(
        width = layout.width,
        height = layout.height,
        orientation = ?layout.orientation,
        bytes = pdf.len(),
        "embedded image in document"
    );
    Ok(pdf)
}

/// The page as an SVG wrapper around the PNG, at the computed placement.
fn page_svg(image: &RasterImage, layout: &PageLayout, background: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
            "width=\"{pw:.3}\" height=\"{ph:.3}\" viewBox=\"0 0 {pw:.3} {ph:.3}\">",
            "<rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>",
            "<image x=\"{x:.3}\" y=\"{y:.3}\" width=\"{w:.3}\" height=\"{h:.3}\" preserveAspectRatio=\"none\" ",
            "xlink:href=\"data:image/png;base64,{data}\"/>",
            "</svg>"
        ),
        pw = layout.width,
        ph = layout.height,
        bg = escape_xml(background),
        x = layout.image.x,
        y = layout.image.y,
        w = layout.image.width,
        h = layout.image.height,
        data = STANDARD.encode(&image.png),
    )
}
