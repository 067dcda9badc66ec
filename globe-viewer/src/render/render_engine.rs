use std::sync::Arc;

use color_eyre::Result;
use glyphon::Resolution;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    data::{Size, application_data::ApplicationData},
    render::{data::Uniforms, texture::Texture},
};

use super::application_renderers::ApplicationRenderers;

/// This struct handles logic that necessarily requires access to wgpu
/// primitives and so must be done synchronously in a tight loop
pub struct RenderEngine {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth_texture: Texture,
    renderers: ApplicationRenderers,
}

impl RenderEngine {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);

        let format = {
            let mut format = surface_caps.formats[0];
            let format_srgb = format.add_srgb_suffix();
            if surface_caps.formats.contains(&format_srgb) {
                format = format_srgb;
            }
            format
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![format],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture =
            Texture::create_depth_texture(&device, size.into(), "depth texture");
        let renderers = ApplicationRenderers::new(&device, &queue, &config, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            renderers,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn bounds(&self) -> Size<f32> {
        (self.size.width as f32, self.size.height as f32).into()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>, data: &mut ApplicationData) -> bool {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.size = new_size;

            data.uniforms = Uniforms::new(&data.camera, self.bounds());
            self.depth_texture =
                Texture::create_depth_texture(&self.device, new_size.into(), "depth texture");

            self.renderers.overlay.viewport.update(
                &self.queue,
                Resolution {
                    width: self.config.width,
                    height: self.config.height,
                },
            );

            true
        } else {
            false
        }
    }

    pub fn update(&mut self, data: &mut ApplicationData) {
        data.uniforms = Uniforms::new(&data.camera, self.bounds());

        self.renderers.globe.update(&self.queue, &data.uniforms);
        self.renderers.preview.update(&self.queue, &data.uniforms);
        self.renderers.guide.update(
            &self.queue,
            &data.uniforms,
            data.camera.target,
            data.guide_visible,
        );

        if data.preview_dirty {
            self.renderers
                .preview
                .rebuild(&self.device, &self.queue, &data.preview_entries);
            data.preview_dirty = false;
        }

        self.renderers
            .overlay
            .prepare(&self.device, &self.queue, self.size, &data.frame_stats);
    }

    pub fn render(
        &mut self,
        data: &mut ApplicationData,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.config.format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene.pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 1.0,
                            g: 1.0,
                            b: 1.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth_texture.get_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.renderers.globe.render(&mut pass);
            self.renderers.preview.render(&mut pass);
            self.renderers.guide.render(&mut pass);
            self.renderers.overlay.render(&mut pass);
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        self.renderers.overlay.atlas.trim();

        data.frame_stats.frame_rendered();

        Ok(())
    }
}
