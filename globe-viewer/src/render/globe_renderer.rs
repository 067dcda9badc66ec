use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Quat;
use wgpu::util::DeviceExt;

use super::{
    data::Uniforms,
    geometry::{self, GLOBE_RADIUS, OVERLAY_RING_RADIUS, RING_SEGMENTS},
    pipeline::Pipeline,
};

const GLOBE_COLOR: [f32; 4] = [0.4, 0.4, 1.0, 1.0];
const EQUATOR_COLOR: [f32; 4] = [0.867, 0.2, 0.2, 0.5];
const MERIDIAN_COLOR: [f32; 4] = [0.2, 0.867, 0.2, 0.5];

/// Draws the static part of the scene: the globe sphere, the equator disc
/// and the prime-meridian half disc. Built once at startup.
pub struct GlobeRenderer {
    pipeline: Pipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GlobeRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        // the sphere first so the translucent discs blend over it
        let mut mesh = geometry::sphere(GLOBE_RADIUS, RING_SEGMENTS, RING_SEGMENTS, GLOBE_COLOR);
        mesh.append(geometry::disc(
            OVERLAY_RING_RADIUS,
            RING_SEGMENTS,
            0.0,
            TAU,
            Quat::from_rotation_x(-FRAC_PI_2),
            EQUATOR_COLOR,
        ));
        mesh.append(geometry::disc(
            OVERLAY_RING_RADIUS,
            RING_SEGMENTS,
            -FRAC_PI_2,
            PI,
            Quat::IDENTITY,
            MERIDIAN_COLOR,
        ));

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe vertex buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe index buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline: Pipeline::create_mesh_pipeline(device, format),
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(self.pipeline.get_uniforms(), 0, bytemuck::bytes_of(uniforms));
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(self.pipeline.get_pipeline());
        pass.set_bind_group(0, self.pipeline.get_uniform_bind_group(), &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
