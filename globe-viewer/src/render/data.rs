use glam::{Mat4, Vec3, Vec4};

use crate::data::{Size, camera::Camera};

#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        // position
        0 => Float32x3,
        // color
        1 => Float32x4,
    ];

    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Uniforms {
    camera_proj: Mat4,
}

impl Uniforms {
    pub fn new(camera: &Camera, bounds: Size<f32>) -> Self {
        Self {
            camera_proj: camera.build_view_proj_matrix(bounds.width, bounds.height),
        }
    }
}

#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct GuideUniforms {
    offset: Vec4,
}

impl GuideUniforms {
    pub fn new(target: Vec3) -> Self {
        Self {
            offset: Vec4::from((target, 0.0)),
        }
    }
}
