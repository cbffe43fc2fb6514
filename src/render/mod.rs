//! Headless diagram rendering: SVG output, text measurement and viewport math.

pub mod svg;
pub mod text;
pub mod theme;
pub mod viewport;

pub use svg::{CANVAS_PADDING, render_svg};
pub use theme::Theme;
pub use viewport::{Bounds, NODE_HEIGHT, NODE_WIDTH, Viewport};
