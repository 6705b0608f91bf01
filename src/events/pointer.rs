use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::FirstPersonCamera;
use crate::dom;
use crate::interact::{self, DragState};
use crate::scene::Scene;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<FirstPersonCamera>>,
    pub scene: Rc<RefCell<Scene>>,
    pub interactive: Rc<RefCell<Option<usize>>>,
    pub hovering: Rc<RefCell<bool>>,
    pub drag: Rc<RefCell<DragState>>,
    pub look_active: Rc<RefCell<bool>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &w.canvas);

        if *w.look_active.borrow() {
            w.camera
                .borrow_mut()
                .look(ev.movement_x() as f32, ev.movement_y() as f32);
            return;
        }

        let (ro, rd) = w.camera.borrow().screen_to_world_ray(
            pos.x,
            pos.y,
            w.canvas.width() as f32,
            w.canvas.height() as f32,
        );

        let drag = *w.drag.borrow();
        if drag.active {
            if let Some(translation) = drag.translation_for_ray(ro, rd) {
                let mut scene = w.scene.borrow_mut();
                if let Some(mesh) = scene.meshes.get_mut(drag.mesh) {
                    mesh.translation = translation;
                }
            }
            return;
        }

        let hovering_now = match *w.interactive.borrow() {
            Some(index) => {
                let scene = w.scene.borrow();
                scene.meshes.get(index).is_some_and(|mesh| {
                    let (bmin, bmax) = mesh.world_aabb();
                    interact::ray_aabb(ro, rd, bmin, bmax).is_some()
                })
            }
            None => false,
        };
        match interact::hover_transition(*w.hovering.borrow(), hovering_now) {
            Some(interact::HoverChange::Enter) => dom::set_canvas_cursor(&w.canvas, "pointer"),
            Some(interact::HoverChange::Exit) => dom::set_canvas_cursor(&w.canvas, "default"),
            None => {}
        }
        *w.hovering.borrow_mut() = hovering_now;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &w.canvas);
        let mut began_drag = false;

        if *w.hovering.borrow() {
            if let Some(index) = *w.interactive.borrow() {
                let scene = w.scene.borrow();
                if let Some(mesh) = scene.meshes.get(index) {
                    let (ro, rd) = w.camera.borrow().screen_to_world_ray(
                        pos.x,
                        pos.y,
                        w.canvas.width() as f32,
                        w.canvas.height() as f32,
                    );
                    let (bmin, bmax) = mesh.world_aabb();
                    if let Some(t) = interact::ray_aabb(ro, rd, bmin, bmax) {
                        *w.drag.borrow_mut() =
                            DragState::begin(index, mesh.translation, ro + rd * t);
                        began_drag = true;
                        log::info!("[drag] begin on mesh '{}'", mesh.name);
                    }
                }
            }
        }
        if !began_drag {
            *w.look_active.borrow_mut() = true;
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.drag.borrow().active {
            w.drag.borrow_mut().active = false;
            log::info!("[drag] end");
        }
        *w.look_active.borrow_mut() = false;
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
