use super::sanitize::{DEFAULT_FALLBACK_COLOR, sanitize_svg};
use crate::error::ExportError;
use resvg::{tiny_skia, usvg};
use tracing::{debug, warn};

/// Options for capturing an SVG document to a raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Output pixels per SVG user unit.
    pub pixel_ratio: f32,
    /// Fill painted under the capture, so transparent regions do not come out black.
    pub background: String,
    /// Substituted for color functions the rasterizer cannot parse.
    pub fallback_color: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            background: "#ffffff".to_string(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

impl RasterOptions {
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }
}

/// An encoded PNG and its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return f64::INFINITY;
        }
        self.width as f64 / self.height as f64
    }
}

/// Rasterizes one SVG document. `target` only labels errors and logs.
pub fn rasterize_svg(
    target: &str,
    svg: &str,
    options: &RasterOptions,
) -> Result<RasterImage, ExportError> {
    let sanitized = sanitize_svg(svg, &options.fallback_color);
    if sanitized.replaced > 0 {
        warn!(
            target_id = target,
            replaced = sanitized.replaced,
            "replaced unsupported color functions before capture"
        );
    }

    let background = parse_color(&options.background)
        .ok_or_else(|| ExportError::InvalidBackground(options.background.clone()))?;

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(&sanitized.text, &opt).map_err(|e| ExportError::SvgParse {
        target: target.to_string(),
        message: e.to_string(),
    })?;

    let scale = if options.pixel_ratio.is_finite() && options.pixel_ratio > 0.0 {
        options.pixel_ratio
    } else {
        1.0
    };
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::PixmapAlloc { width, height })?;
    pixmap.fill(background);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))?;
    debug!(target_id = target, width, height, "captured raster image");

    Ok(RasterImage { png, width, height })
}

/// Parses a CSS color: hex forms, `rgb()`/`rgba()`, `hsl()`/`hsla()` and named colors
/// including `transparent`.
pub fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let color: svgtypes::Color = text.trim().to_ascii_lowercase().parse().ok()?;
    Some(tiny_skia::Color::from_rgba8(
        color.red,
        color.green,
        color.blue,
        color.alpha,
    ))
}
