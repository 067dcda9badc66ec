use color_eyre::{Report, Result};
use globe_viewer::app::{ApplicationEvent, ApplicationRunner};
use winit::window::Window;

// There is no desktop input form yet, so the viewer starts with a builtin
// payload: a few markers plus one polyline.
const SAMPLE_COORDINATES: &str =
    "[[0, 0], [51.5, -0.13], [[40.71, -74.01], [48.86, 2.35], [52.23, 21.01]]]";

pub fn main() -> Result<()> {
    env_logger::init();
    use winit::dpi::LogicalSize;
    use winit::platform::x11::WindowAttributesExtX11;

    let (width, height) = (800, 600);
    let window_attributes = Window::default_attributes()
        .with_base_size(LogicalSize::new(width as f64, height as f64))
        .with_min_inner_size(LogicalSize::new(width as f64, height as f64))
        .with_inner_size(LogicalSize::new(width as f64, height as f64));

    let app_runner = ApplicationRunner::new(window_attributes);

    let proxy = app_runner.get_event_loop_proxy();
    if let Err(err) = proxy.send_event(ApplicationEvent::SubmitCoordinates(
        SAMPLE_COORDINATES.to_string(),
    )) {
        log::error!("{err}");
    }

    Ok::<(), Report>(app_runner.run()?)
}
