use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use itertools::Itertools;
use wgpu::util::DeviceExt;

use super::{
    data::{GuideUniforms, MeshVertex, Uniforms},
    geometry::{self, GUIDE_RADIUS, RING_SEGMENTS},
    texture::Texture,
};

/// The camera orientation guide: three colored rings, one per principal
/// plane, centered on the camera target. Hidden unless the camera is being
/// rotated or panned, and drawn on top of everything so it stays visible
/// inside the globe.
pub struct GuideRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    offset_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    visible: bool,
}

impl GuideRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("guide uniform buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let offset_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("guide offset buffer"),
            size: std::mem::size_of::<GuideUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("guide bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("guide bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: offset_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            bind_group_layouts: &[&bind_group_layout],
            label: Some("guide pipeline layout"),
            immediate_size: 0,
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../resources/shaders/guide_shader.wgsl"
        )));

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("guide pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                polygon_mode: wgpu::PolygonMode::Fill,
                front_face: wgpu::FrontFace::Ccw,
                strip_index_format: None,
                cull_mode: None,
                conservative: false,
                unclipped_depth: false,
            },
            // drawn over the scene regardless of depth; the rings would
            // otherwise disappear whenever the target sits inside the globe
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview_mask: None,
            cache: None,
        });

        let vertices = guide_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("guide vertex buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            uniform_buffer,
            offset_buffer,
            bind_group,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            visible: false,
        }
    }

    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        uniforms: &Uniforms,
        target: Vec3,
        visible: bool,
    ) {
        self.visible = visible;
        if visible {
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
            queue.write_buffer(
                &self.offset_buffer,
                0,
                bytemuck::bytes_of(&GuideUniforms::new(target)),
            );
        }
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.visible {
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..self.vertex_count, 0..1);
        }
    }
}

fn guide_vertices() -> Vec<MeshVertex> {
    // one ring per principal plane, each with its own color
    let rings = [
        (Quat::from_rotation_z(FRAC_PI_2), [0.0, 0.0, 1.0, 1.0]),
        (Quat::from_rotation_x(-FRAC_PI_2), [0.0, 1.0, 0.0, 1.0]),
        (Quat::from_rotation_y(-FRAC_PI_2), [1.0, 0.0, 0.0, 1.0]),
    ];

    rings
        .iter()
        .flat_map(|&(rotation, color)| {
            geometry::ring(GUIDE_RADIUS, RING_SEGMENTS, rotation)
                .into_iter()
                .circular_tuple_windows()
                .flat_map(|(start, end)| {
                    [MeshVertex::new(start, color), MeshVertex::new(end, color)]
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_has_three_closed_rings() {
        let vertices = guide_vertices();

        // a closed ring of n points needs n line segments
        assert_eq!(vertices.len(), 3 * 2 * RING_SEGMENTS as usize);

        let mut colors = vertices.iter().map(|vertex| vertex.color).collect::<Vec<_>>();
        colors.dedup();
        assert_eq!(colors.len(), 3);
    }
}
