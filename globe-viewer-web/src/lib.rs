//! Browser entry point: wires the viewer to a page canvas and exposes the
//! coordinate submission surface to the page's JavaScript.

#[cfg(target_arch = "wasm32")]
use std::cell::OnceCell;

#[cfg(target_arch = "wasm32")]
use color_eyre::{
    Report, Result,
    eyre::{OptionExt, eyre},
};
#[cfg(target_arch = "wasm32")]
use globe_viewer::app::{ApplicationEvent, ApplicationRunner};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use winit::{event_loop::EventLoopProxy, window::Window};

#[cfg(target_arch = "wasm32")]
thread_local! {
    pub static EVENT_LOOP_PROXY: OnceCell<EventLoopProxy<ApplicationEvent>> = OnceCell::new();
}

/// Entry point for the page's coordinate form: the raw textarea contents are
/// handed over unparsed and validated inside the viewer.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn submit_coordinates(text: String) {
    EVENT_LOOP_PROXY.with(|cell| {
        if let Some(proxy) = cell.get() {
            if let Err(err) = proxy.send_event(ApplicationEvent::SubmitCoordinates(text)) {
                log::error!("{err}");
            }
        }
    })
}

#[cfg(target_arch = "wasm32")]
pub fn run() -> Result<()> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info).expect("could not initialize logger");

    use wasm_bindgen::JsCast;
    use winit::platform::web::WindowAttributesExtWebSys;
    match wgpu::web_sys::window()
        .ok_or_eyre("Unable to get window")?
        .document()
        .ok_or_eyre("Unable to get document")?
        .get_element_by_id("canvas")
        .ok_or_eyre("Unable to get canvas by id \"canvas\"")?
        .dyn_into::<wgpu::web_sys::HtmlCanvasElement>()
        .map_err(|_| eyre!("Unable to convert canvas to HtmlCanvasElement"))
    {
        Ok::<_, Report>(canvas) => {
            let window_attributes = Window::default_attributes().with_canvas(Some(canvas));
            let app_runner = ApplicationRunner::new(window_attributes);
            EVENT_LOOP_PROXY.with(|cell| cell.set(app_runner.get_event_loop_proxy()).ok());
            Ok(app_runner.run()?)
        }
        Err(err) => {
            log::error!("{err:?}");
            Err(err)
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    if let Err(err) = run() {
        log::error!("{err:?}");
    }
}
