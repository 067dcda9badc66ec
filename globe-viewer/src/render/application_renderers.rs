use wgpu::TextureFormat;

use super::{
    globe_renderer::GlobeRenderer, guide_renderer::GuideRenderer,
    overlay_renderer::OverlayRenderer, preview_renderer::PreviewRenderer,
};

pub struct ApplicationRenderers {
    pub globe: GlobeRenderer,
    pub guide: GuideRenderer,
    pub preview: PreviewRenderer,
    pub overlay: OverlayRenderer,
}

impl ApplicationRenderers {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &wgpu::SurfaceConfiguration,
        format: TextureFormat,
    ) -> Self {
        let globe = GlobeRenderer::new(device, format);
        let guide = GuideRenderer::new(device, format);
        let preview = PreviewRenderer::new(device, format);
        let overlay = OverlayRenderer::new(device, queue, config);

        Self {
            globe,
            guide,
            preview,
            overlay,
        }
    }
}
