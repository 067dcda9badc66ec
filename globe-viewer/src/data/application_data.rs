use globe_common::CoordinateEntry;

use crate::{
    data::{Size, camera::Camera, frame_stats::FrameStats},
    render::data::Uniforms,
};

pub struct ApplicationData {
    pub camera: Camera,
    pub uniforms: Uniforms,
    pub guide_visible: bool,
    pub preview_entries: Vec<CoordinateEntry>,
    pub preview_dirty: bool,
    pub frame_stats: FrameStats,
}

impl ApplicationData {
    pub fn new(bounds: Size<f32>) -> Self {
        let camera = Camera::default();
        let uniforms = Uniforms::new(&camera, bounds);

        Self {
            camera,
            uniforms,
            guide_visible: false,
            preview_entries: Vec::new(),
            preview_dirty: false,
            frame_stats: FrameStats::new(),
        }
    }

    /// Replaces the whole preview line set. The renderer picks the new
    /// entries up before the next frame, so a half-updated set is never
    /// drawn.
    pub fn replace_preview(&mut self, entries: Vec<CoordinateEntry>) {
        self.preview_entries = entries;
        self.preview_dirty = true;
    }
}
