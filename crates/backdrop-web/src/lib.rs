pub mod canvas;
pub mod capabilities;
mod resize;
pub mod runner;
mod scheduler;

use std::cell::RefCell;

use backdrop_engine::BackdropConfig;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub use canvas::CanvasTarget;
pub use capabilities::WindowCapabilities;
pub use runner::BackdropRunner;

thread_local! {
    static RUNNER: RefCell<Option<BackdropRunner>> = const { RefCell::new(None) };
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn install(canvas: HtmlCanvasElement, config: BackdropConfig, reduced_motion: bool, seed: u32) {
    // Unmount the previous view before the new one claims the window listeners.
    let previous = RUNNER.with(|cell| cell.borrow_mut().take());
    drop(previous);

    let runner = BackdropRunner::mount(canvas, config, reduced_motion, seed as u64);
    RUNNER.with(|cell| *cell.borrow_mut() = runner);
}

/// Mount the backdrop with the default configuration.
#[wasm_bindgen]
pub fn backdrop_mount(canvas: HtmlCanvasElement, reduced_motion: bool, seed: u32) {
    init_logging();
    install(canvas, BackdropConfig::default(), reduced_motion, seed);
}

/// Mount the backdrop with a JSON configuration. Invalid JSON or out-of-range
/// values are rejected and nothing is mounted.
#[wasm_bindgen]
pub fn backdrop_mount_with_config(
    canvas: HtmlCanvasElement,
    reduced_motion: bool,
    seed: u32,
    config_json: &str,
) -> Result<(), JsValue> {
    init_logging();
    let config = BackdropConfig::from_json(config_json).map_err(|e| {
        log::error!("backdrop: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    install(canvas, config, reduced_motion, seed);
    Ok(())
}

/// Stop the loop and release every listener. Safe to call repeatedly.
#[wasm_bindgen]
pub fn backdrop_unmount() {
    let previous = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = previous {
        runner.unmount();
    }
}

#[wasm_bindgen]
pub fn backdrop_is_running() -> bool {
    RUNNER.with(|cell| cell.borrow().as_ref().is_some_and(|r| r.is_running()))
}
