use crate::error::ExportError;
use serde::Deserialize;

/// Points per CSS pixel (72pt per inch over 96px per inch).
pub const PX_TO_PT: f64 = 72.0 / 96.0;
/// Margin around an embedded image, in points.
pub const DEFAULT_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape when the image is at least as wide as it is tall.
    pub fn from_aspect(width: f64, height: f64) -> Self {
        if height <= 0.0 || width / height >= 1.0 {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    /// Margin on every side, in points.
    pub margin: f64,
    /// `None` derives the orientation from the image's aspect ratio.
    pub orientation: Option<Orientation>,
    /// Page fill behind the image.
    pub background: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            orientation: None,
            background: "#ffffff".to_string(),
        }
    }
}

impl PageOptions {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Where the image lands on the page, in points from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Page geometry for embedding one captured image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub orientation: Orientation,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub image: Placement,
}

impl PageLayout {
    /// Fits a `width_px` × `height_px` image (96dpi) onto a page of its own.
    ///
    /// The page measures `(W·72/96 + 2M) × (H·72/96 + 2M)` points. If an explicit
    /// orientation contradicts that shape the page dimensions are swapped and the image
    /// is scaled down uniformly to the safe area. Either way the image is centered, so the
    /// leftover space on opposing sides is equal.
    pub fn fit(width_px: u32, height_px: u32, options: &PageOptions) -> Result<Self, ExportError> {
        if width_px == 0 || height_px == 0 {
            return Err(ExportError::EmptyImage);
        }
        let margin = options.margin.max(0.0);
        let image_w = width_px as f64 * PX_TO_PT;
        let image_h = height_px as f64 * PX_TO_PT;

        let orientation = options
            .orientation
            .unwrap_or_else(|| Orientation::from_aspect(width_px as f64, height_px as f64));

        let (mut page_w, mut page_h) = (image_w + 2.0 * margin, image_h + 2.0 * margin);
        let contradicts = match orientation {
            Orientation::Landscape => page_w < page_h,
            Orientation::Portrait => page_w > page_h,
        };
        if contradicts {
            std::mem::swap(&mut page_w, &mut page_h);
        }

        let safe_w = page_w - 2.0 * margin;
        let safe_h = page_h - 2.0 * margin;
        let scale = (safe_w / image_w).min(safe_h / image_h).min(1.0);
        let draw_w = image_w * scale;
        let draw_h = image_h * scale;

        Ok(Self {
            orientation,
            width: page_w,
            height: page_h,
            margin,
            image: Placement {
                x: (page_w - draw_w) / 2.0,
                y: (page_h - draw_h) / 2.0,
                width: draw_w,
                height: draw_h,
            },
        })
    }
}
