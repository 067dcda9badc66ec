use glyphon::{
    Attrs, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache, TextArea,
    TextAtlas, TextBounds, TextRenderer, Viewport,
};
use wgpu::MultisampleState;
use winit::dpi::PhysicalSize;

use crate::data::frame_stats::FrameStats;

use super::pipeline::Pipeline;

const FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 16.0;
const OVERLAY_WIDTH: f32 = 160.0;
const OVERLAY_PADDING: f32 = 8.0;

/// Draws the frame statistics in the top-right corner. Purely
/// observational; a failed prepare only costs the overlay for that frame.
pub struct OverlayRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    pub viewport: Viewport,
    pub atlas: TextAtlas,
    text_renderer: TextRenderer,
    buffer: glyphon::Buffer,
}

impl OverlayRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &wgpu::SurfaceConfiguration,
    ) -> Self {
        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, config.format);
        let text_renderer = TextRenderer::new(
            &mut atlas,
            device,
            MultisampleState::default(),
            Pipeline::get_depth_stencil_state(),
        );

        let mut buffer = glyphon::Buffer::new(&mut font_system, Metrics::new(FONT_SIZE, LINE_HEIGHT));
        buffer.set_size(&mut font_system, Some(OVERLAY_WIDTH), Some(LINE_HEIGHT));

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            buffer,
        }
    }

    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: PhysicalSize<u32>,
        frame_stats: &FrameStats,
    ) {
        self.buffer.set_text(
            &mut self.font_system,
            &frame_stats.overlay_text(),
            &Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
            None,
        );
        self.buffer.shape_until_scroll(&mut self.font_system, false);

        let text_areas = [TextArea {
            buffer: &self.buffer,
            left: size.width as f32 - OVERLAY_WIDTH - OVERLAY_PADDING,
            top: OVERLAY_PADDING,
            scale: 1.0,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: size.width as i32,
                bottom: size.height as i32,
            },
            default_color: Color::rgb(20, 20, 20),
            custom_glyphs: &[],
        }];

        if let Err(err) = self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        ) {
            log::warn!("skipping overlay for this frame: {err}");
        }
    }

    pub fn render(&mut self, pass: &mut wgpu::RenderPass<'_>) {
        if let Err(err) = self
            .text_renderer
            .render(&self.atlas, &self.viewport, pass)
        {
            log::warn!("unable to draw overlay: {err}");
        }
    }
}
