use std::collections::BTreeMap;

use glam::Vec3;
use strum::{EnumIter, IntoEnumIterator};
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::{data::camera::Camera, render::geometry::rotate_vector};

/// Distance below which zooming stops, so the camera can neither collapse
/// onto the target nor invert through it.
pub const MIN_TARGET_DISTANCE: f32 = 10.0;

const ZOOM_STEP_DIVISOR: f32 = 20.0;
const WHEEL_PIXELS_PER_LINE: f32 = 20.0;

#[derive(Copy, Clone, Debug, EnumIter, PartialEq, Eq, PartialOrd, Ord)]
pub enum Control {
    /// Left mouse button: orbit the camera around the target.
    Rotate,
    /// Middle mouse button: move camera and target together.
    Pan,
}

/// Turns pointer state into camera motion. Button and wheel events only
/// record state here; the camera math runs at most once per rendered frame,
/// in [`Self::update_camera`].
pub struct CameraController {
    is_pressed_map: BTreeMap<Control, bool>,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
}

impl CameraController {
    pub fn new() -> Self {
        let mut is_pressed = BTreeMap::new();
        for control in Control::iter() {
            is_pressed.insert(control, false);
        }
        Self {
            is_pressed_map: is_pressed,
            mouse_delta: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    fn is_pressed(&self, control: Control) -> bool {
        *self.is_pressed_map.get(&control).unwrap_or(&false)
    }

    /// Whether a rotate or pan drag is in progress; the orientation guide is
    /// shown exactly while this holds.
    pub fn is_interacting(&self) -> bool {
        self.is_pressed(Control::Rotate) || self.is_pressed(Control::Pan)
    }

    pub fn process_events(&mut self, event: &WindowEvent) -> bool {
        match *event {
            WindowEvent::MouseInput {
                device_id: _,
                state,
                button: MouseButton::Left,
            } => {
                self.set_control(Control::Rotate, state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseInput {
                device_id: _,
                state,
                button: MouseButton::Middle,
            } => {
                self.set_control(Control::Pan, state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.add_scroll(match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => {
                        position.y as f32 / WHEEL_PIXELS_PER_LINE
                    }
                });
                true
            }
            WindowEvent::CursorLeft { device_id: _ } => {
                // the button may be released outside the window, which we
                // would never hear about; leaving the window ends the drag
                self.is_pressed_map
                    .iter_mut()
                    .for_each(|(_, pressed)| *pressed = false);
                false
            }
            _ => false,
        }
    }

    fn set_control(&mut self, control: Control, pressed: bool) {
        // only one drag action at a time; a second button is ignored until
        // the first is released
        if pressed && self.is_interacting() && !self.is_pressed(control) {
            return;
        }
        if let Some(entry) = self.is_pressed_map.get_mut(&control) {
            *entry = pressed;
        }
    }

    fn add_scroll(&mut self, y: f32) {
        // the wheel is disarmed while a drag is in progress
        if !self.is_interacting() {
            self.scroll_delta += y;
        }
    }

    pub fn process_device_events(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                if self.is_interacting() {
                    self.mouse_delta.0 += delta.0 as f32;
                    self.mouse_delta.1 += delta.1 as f32;
                }
            }
            _ => {}
        }
    }

    /// Applies the pointer state accumulated since the previous frame.
    /// Returns whether the camera changed.
    pub fn update_camera(&mut self, camera: &mut Camera) -> bool {
        let mut changed = false;

        if self.mouse_delta != (0.0, 0.0) {
            // drags are measured as previous minus current pointer position
            let (diff_x, diff_y) = (-self.mouse_delta.0, -self.mouse_delta.1);

            if self.is_pressed(Control::Rotate) {
                let offset = rotate_vector(camera.offset(), diff_x, diff_y, true);
                camera.set_eye(camera.target + offset);
                changed = true;
            }
            if self.is_pressed(Control::Pan) {
                let toward_target = camera.target - camera.eye;
                let horizontal = set_length(rotate_vector(toward_target, -90.0, 0.0, false), diff_x);
                let vertical = set_length(rotate_vector(toward_target, 0.0, 90.0, false), diff_y);
                camera.translate(horizontal + vertical);
                changed = true;
            }
            self.mouse_delta = (0.0, 0.0);
        }

        if self.scroll_delta != 0.0 {
            let offset = camera.offset();
            let scaled = offset * (1.0 - self.scroll_delta / ZOOM_STEP_DIVISOR);
            let new_offset = if scaled.length() < MIN_TARGET_DISTANCE || scaled.dot(offset) <= 0.0 {
                offset.normalize_or_zero() * MIN_TARGET_DISTANCE
            } else {
                scaled
            };
            camera.set_eye(camera.target + new_offset);
            self.scroll_delta = 0.0;
            changed = true;
        }

        changed
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

fn set_length(v: Vec3, length: f32) -> Vec3 {
    v.normalize_or_zero() * length
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    fn drag(controller: &mut CameraController, delta: (f64, f64)) {
        controller.process_device_events(&DeviceEvent::MouseMotion { delta });
    }

    #[test]
    fn rotation_orbits_without_changing_distance() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let distance_before = camera.distance_to_target();
        let eye_before = camera.eye;

        controller.set_control(Control::Rotate, true);
        drag(&mut controller, (30.0, -12.0));
        assert!(controller.update_camera(&mut camera));

        assert_ne!(camera.eye, eye_before);
        assert_eq!(camera.target, Vec3::ZERO);
        assert_relative_eq!(
            camera.distance_to_target(),
            distance_before,
            max_relative = 1e-5
        );
    }

    #[test]
    fn motion_after_release_is_discarded() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();

        controller.set_control(Control::Rotate, true);
        drag(&mut controller, (30.0, -12.0));
        controller.update_camera(&mut camera);
        let eye_after_drag = camera.eye;

        controller.set_control(Control::Rotate, false);
        drag(&mut controller, (100.0, 100.0));
        assert!(!controller.update_camera(&mut camera));
        assert_eq!(camera.eye, eye_after_drag);
    }

    #[test]
    fn guide_is_shown_exactly_while_dragging() {
        let mut controller = CameraController::new();
        assert!(!controller.is_interacting());

        controller.set_control(Control::Pan, true);
        assert!(controller.is_interacting());

        controller.set_control(Control::Pan, false);
        assert!(!controller.is_interacting());
    }

    #[test]
    fn second_button_is_ignored_while_dragging() {
        let mut controller = CameraController::new();

        controller.set_control(Control::Rotate, true);
        controller.set_control(Control::Pan, true);

        assert!(controller.is_pressed(Control::Rotate));
        assert!(!controller.is_pressed(Control::Pan));
    }

    #[test]
    fn panning_moves_eye_and_target_together() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let offset_before = camera.offset();

        controller.set_control(Control::Pan, true);
        drag(&mut controller, (25.0, 10.0));
        assert!(controller.update_camera(&mut camera));

        assert_ne!(camera.target, Vec3::ZERO);
        let offset_after = camera.offset();
        assert_relative_eq!(offset_after.x, offset_before.x, epsilon = 1e-3);
        assert_relative_eq!(offset_after.y, offset_before.y, epsilon = 1e-3);
        assert_relative_eq!(offset_after.z, offset_before.z, epsilon = 1e-3);
    }

    #[test]
    fn zoom_out_by_one_step_doubles_the_distance() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let distance_before = camera.distance_to_target();

        controller.add_scroll(-20.0);
        assert!(controller.update_camera(&mut camera));

        assert_relative_eq!(
            camera.distance_to_target(),
            2.0 * distance_before,
            max_relative = 1e-5
        );
    }

    #[test]
    fn zoom_all_the_way_in_stops_at_the_floor_distance() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let direction_before = camera.offset().normalize();

        controller.add_scroll(20.0);
        controller.update_camera(&mut camera);

        assert_relative_eq!(
            camera.distance_to_target(),
            MIN_TARGET_DISTANCE,
            max_relative = 1e-5
        );
        // still on the same side of the target
        assert!(camera.offset().normalize().dot(direction_before) > 0.99);
    }

    #[test]
    fn wheel_is_suspended_while_dragging() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        let distance_before = camera.distance_to_target();

        controller.set_control(Control::Rotate, true);
        controller.add_scroll(-20.0);
        controller.update_camera(&mut camera);

        assert_relative_eq!(
            camera.distance_to_target(),
            distance_before,
            max_relative = 1e-5
        );
    }

    #[test]
    fn small_zoom_steps_scale_proportionally() {
        let mut controller = CameraController::new();
        let mut camera = Camera::default();
        camera.set_eye(vec3(0.0, 0.0, 100.0));

        controller.add_scroll(1.0);
        controller.update_camera(&mut camera);

        assert_relative_eq!(camera.distance_to_target(), 95.0, max_relative = 1e-5);
    }
}
