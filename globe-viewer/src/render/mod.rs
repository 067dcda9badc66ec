pub mod application_renderers;
pub mod buffer;
pub mod data;
pub mod geometry;
pub mod globe_renderer;
pub mod guide_renderer;
pub mod overlay_renderer;
pub mod pipeline;
pub mod preview_renderer;
pub mod render_engine;
pub mod texture;
