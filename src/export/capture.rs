use super::raster::{RasterImage, RasterOptions, rasterize_svg};
use crate::error::ExportError;
use tracing::warn;

/// A named SVG document that can be captured, optionally backed by an alternate target.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureTarget {
    pub id: String,
    pub svg: String,
    /// Captured instead when this target fails to rasterize.
    pub fallback: Option<String>,
}

/// The set of capturable regions, addressed by id.
#[derive(Debug, Clone, Default)]
pub struct CaptureRegistry {
    targets: Vec<CaptureTarget>,
}

impl CaptureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a target.
    pub fn register(&mut self, id: impl Into<String>, svg: impl Into<String>) -> &mut Self {
        self.insert(CaptureTarget {
            id: id.into(),
            svg: svg.into(),
            fallback: None,
        })
    }

    pub fn register_with_fallback(
        &mut self,
        id: impl Into<String>,
        svg: impl Into<String>,
        fallback_id: impl Into<String>,
    ) -> &mut Self {
        self.insert(CaptureTarget {
            id: id.into(),
            svg: svg.into(),
            fallback: Some(fallback_id.into()),
        })
    }

    fn insert(&mut self, target: CaptureTarget) -> &mut Self {
        match self.targets.iter_mut().find(|t| t.id == target.id) {
            Some(existing) => *existing = target,
            None => self.targets.push(target),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&CaptureTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<CaptureTarget> {
        let index = self.targets.iter().position(|t| t.id == id)?;
        Some(self.targets.remove(index))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Captures a registered target to a PNG.
///
/// An unknown target is reported as [`ExportError::TargetNotFound`]. When rasterization
/// fails and the target names a fallback that is registered, the fallback is captured
/// instead; otherwise the original error is returned. Fallbacks are not chained.
pub fn export_to_image(
    registry: &CaptureRegistry,
    target_id: &str,
    options: &RasterOptions,
) -> Result<RasterImage, ExportError> {
    let target = registry
        .get(target_id)
        .ok_or_else(|| ExportError::TargetNotFound(target_id.to_string()))?;

    match rasterize_svg(&target.id, &target.svg, options) {
        Ok(image) => Ok(image),
        Err(err) => {
            let Some(fallback) = target.fallback.as_deref().and_then(|id| registry.get(id)) else {
                return Err(err);
            };
            warn!(
                target_id = target_id,
                fallback_id = %fallback.id,
                error = %err,
                "capture failed, retrying with fallback target"
            );
            rasterize_svg(&fallback.id, &fallback.svg, options)
        }
    }
}
