use glam::Vec3;
use globe_common::CoordinateEntry;
use itertools::Itertools;

use super::{
    buffer::Buffer,
    data::{MeshVertex, Uniforms},
    geometry::{self, MARKER_RAY_LENGTH, POLYLINE_RAY_LENGTH},
    pipeline::Pipeline,
};

const MARKER_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const POLYLINE_COLOR: [f32; 4] = [0.333, 0.333, 0.333, 1.0];

/// Draws the submitted coordinate entries: marker rays from the globe center
/// and connected polylines above the surface. The whole line set is replaced
/// on every successful submission.
pub struct PreviewRenderer {
    pipeline: Pipeline,
    vertex_buffer: Buffer,
    vertex_count: u32,
}

impl PreviewRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let vertex_buffer = Buffer::new(
            device,
            "preview vertex buffer",
            0,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        );

        Self {
            pipeline: Pipeline::create_line_pipeline(device, format),
            vertex_buffer,
            vertex_count: 0,
        }
    }

    /// Drops the previous line set and uploads one built from `entries`.
    pub fn rebuild(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        entries: &[CoordinateEntry],
    ) {
        let vertices = build_preview_vertices(entries);

        self.vertex_buffer.resize(
            device,
            vertices.len() as u64 * std::mem::size_of::<MeshVertex>() as u64,
        );
        queue.write_buffer(&self.vertex_buffer.raw, 0, bytemuck::cast_slice(&vertices));
        self.vertex_count = vertices.len() as u32;
    }

    pub fn update(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(self.pipeline.get_uniforms(), 0, bytemuck::bytes_of(uniforms));
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count > 0 {
            pass.set_pipeline(self.pipeline.get_pipeline());
            pass.set_bind_group(0, self.pipeline.get_uniform_bind_group(), &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.raw.slice(..));
            pass.draw(0..self.vertex_count, 0..1);
        }
    }
}

/// Line-list vertices for a set of coordinate entries: a marker becomes one
/// segment from the origin, a polyline becomes segments between consecutive
/// rays.
fn build_preview_vertices(entries: &[CoordinateEntry]) -> Vec<MeshVertex> {
    let mut vertices = Vec::new();
    for entry in entries {
        match entry {
            CoordinateEntry::Marker(coord) => {
                vertices.push(MeshVertex::new(Vec3::ZERO, MARKER_COLOR));
                vertices.push(MeshVertex::new(
                    geometry::surface_ray(MARKER_RAY_LENGTH, *coord),
                    MARKER_COLOR,
                ));
            }
            CoordinateEntry::Polyline(coords) => {
                for (start, end) in coords.iter().tuple_windows() {
                    vertices.push(MeshVertex::new(
                        geometry::surface_ray(POLYLINE_RAY_LENGTH, *start),
                        POLYLINE_COLOR,
                    ));
                    vertices.push(MeshVertex::new(
                        geometry::surface_ray(POLYLINE_RAY_LENGTH, *end),
                        POLYLINE_COLOR,
                    ));
                }
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use globe_common::GeoCoord;

    use super::*;

    #[test]
    fn markers_become_origin_rays() {
        let entries = vec![
            CoordinateEntry::Marker(GeoCoord::new(10.0, 20.0)),
            CoordinateEntry::Marker(GeoCoord::new(30.0, 40.0)),
        ];

        let vertices = build_preview_vertices(&entries);

        assert_eq!(vertices.len(), 4);
        for segment in vertices.chunks(2) {
            assert_eq!(segment[0].position(), Vec3::ZERO);
            assert_relative_eq!(
                segment[1].position().length(),
                MARKER_RAY_LENGTH,
                max_relative = 1e-5
            );
        }
    }

    #[test]
    fn polylines_connect_consecutive_points() {
        let entries = vec![CoordinateEntry::Polyline(vec![
            GeoCoord::new(10.0, 20.0),
            GeoCoord::new(11.0, 21.0),
            GeoCoord::new(12.0, 22.0),
        ])];

        let vertices = build_preview_vertices(&entries);

        // two segments, none of them starting at the origin
        assert_eq!(vertices.len(), 4);
        for vertex in &vertices {
            assert_relative_eq!(
                vertex.position().length(),
                POLYLINE_RAY_LENGTH,
                max_relative = 1e-5
            );
        }
        // consecutive segments share their middle point
        assert_eq!(vertices[1].position(), vertices[2].position());
    }

    #[test]
    fn single_point_polyline_draws_nothing() {
        let entries = vec![CoordinateEntry::Polyline(vec![GeoCoord::new(5.0, 5.0)])];

        assert!(build_preview_vertices(&entries).is_empty());
    }

    #[test]
    fn mixed_entries_keep_their_own_shape() {
        let entries = vec![
            CoordinateEntry::Marker(GeoCoord::new(10.0, 20.0)),
            CoordinateEntry::Polyline(vec![GeoCoord::new(30.0, 40.0), GeoCoord::new(31.0, 41.0)]),
        ];

        let vertices = build_preview_vertices(&entries);

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].position(), Vec3::ZERO);
        assert_relative_eq!(
            vertices[2].position().length(),
            POLYLINE_RAY_LENGTH,
            max_relative = 1e-5
        );
    }
}
