use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::{FirstPersonCamera, HeldKeys};
use crate::constants::PHYSICS_FPS;
use crate::render;
use crate::scene::Scene;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub camera: Rc<RefCell<FirstPersonCamera>>,
    pub keys: Rc<RefCell<HeldKeys>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let ticks = dt.as_secs_f32() * PHYSICS_FPS;

        let (gravity, colliders) = {
            let scene = self.scene.borrow();
            (scene.gravity, scene.colliders())
        };
        self.camera
            .borrow_mut()
            .update(&self.keys.borrow(), gravity, &colliders, ticks);

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            let view_proj = {
                let camera = self.camera.borrow();
                let aspect = w as f32 / h.max(1) as f32;
                camera.projection(aspect) * camera.view_matrix()
            };
            if let Err(e) = g.render(&self.scene.borrow(), view_proj) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive the frame context from requestAnimationFrame, unconditionally, for
/// the lifetime of the page.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
