use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::HeldKeys;

/// Track held key codes for the camera's movement bindings. Which codes mean
/// what is the camera's business; this just mirrors keyboard state.
pub fn wire_camera_keys(keys: Rc<RefCell<HeldKeys>>) {
    let window = match web::window() {
        Some(w) => w,
        None => return,
    };

    let down = keys.clone();
    let keydown = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        down.borrow_mut().press(ev.key_code());
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();

    let up = keys;
    let keyup = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        up.borrow_mut().release(ev.key_code());
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
    keyup.forget();
}
