//! Recording controls overlaid on the render surface.

use wasm_bindgen::JsValue;
use web_sys as web;

use crate::capture::CanvasRecorder;
use crate::constants::{BUTTON_START_LEFT_PX, BUTTON_STOP_LEFT_PX, BUTTON_TOP_PX};
use crate::dom;

pub fn install_recording_controls(
    document: &web::Document,
    recorder: &CanvasRecorder,
) -> Result<(), JsValue> {
    dom::create_overlay_button(
        document,
        "record-start",
        "Start Recording",
        BUTTON_TOP_PX,
        BUTTON_START_LEFT_PX,
    )?;
    dom::create_overlay_button(
        document,
        "record-stop",
        "Stop Recording",
        BUTTON_TOP_PX,
        BUTTON_STOP_LEFT_PX,
    )?;

    let start = recorder.clone();
    dom::add_click_listener(document, "record-start", move || {
        if let Err(e) = start.start() {
            log::error!("[record] start failed: {e:?}");
        }
    });

    let stop = recorder.clone();
    dom::add_click_listener(document, "record-stop", move || stop.stop());
    Ok(())
}
