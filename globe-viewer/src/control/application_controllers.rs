use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    control::{camera_controller::CameraController, ui_controller::UiController},
    data::application_data::ApplicationData,
};

pub struct ApplicationControllers {
    pub ui_controller: UiController,
    pub camera_controller: CameraController,
}

impl ApplicationControllers {
    pub fn new() -> Self {
        ApplicationControllers {
            ui_controller: UiController::new(),
            camera_controller: CameraController::new(),
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        self.camera_controller.process_events(event)
    }

    pub fn device_input(&mut self, event: &DeviceEvent) {
        self.camera_controller.process_device_events(event)
    }

    /// Runs the once-per-frame camera update. Returns whether the frame
    /// needs to be rendered.
    pub fn update(&mut self, require_render: bool, data: &mut ApplicationData) -> bool {
        let camera_changed = self.camera_controller.update_camera(&mut data.camera);

        let guide_visible = self.camera_controller.is_interacting();
        let guide_changed = guide_visible != data.guide_visible;
        data.guide_visible = guide_visible;

        require_render || camera_changed || guide_changed
    }
}

impl Default for ApplicationControllers {
    fn default() -> Self {
        Self::new()
    }
}
