use serde::Deserialize;

/// Colors and typography for rendered diagrams.
///
/// Colors are CSS color strings. Functions the rasterizer cannot handle (such as
/// `oklch(...)`) are allowed here; the export pipeline neutralizes them before capture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub background: String,
    pub node_background: String,
    pub node_border: String,
    pub accent: String,
    pub text: String,
    pub muted_text: String,
    pub edge: String,
    pub timeline_background: String,
    pub font_family: String,
    pub font_size: f64,
    /// Opacity applied to nodes that are not active.
    pub inactive_opacity: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            node_background: "#f8fafc".to_string(),
            node_border: "#cbd5e1".to_string(),
            accent: "#2563eb".to_string(),
            text: "#0f172a".to_string(),
            muted_text: "#64748b".to_string(),
            edge: "#94a3b8".to_string(),
            timeline_background: "#eef2ff".to_string(),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 14.0,
            inactive_opacity: 0.45,
        }
    }
}

impl Theme {
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }
}
