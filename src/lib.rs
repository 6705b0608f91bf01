#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod capture;
mod constants;
mod dom;
mod events;
mod frame;
mod interact;
mod level;
mod overlay;
mod recorder;
mod render;
mod scene;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rampwalk-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // Scene, controller, and input state
    let scene = Rc::new(RefCell::new(scene::Scene::bootstrap()));
    let camera = Rc::new(RefCell::new(camera::FirstPersonCamera::create_controller()));
    let keys = Rc::new(RefCell::new(camera::HeldKeys::default()));
    events::wire_camera_keys(keys.clone());

    // ---------------- Interaction state ----------------
    let hovering = Rc::new(RefCell::new(false));
    let drag = Rc::new(RefCell::new(interact::DragState::default()));
    let look_active = Rc::new(RefCell::new(false));
    let interactive = Rc::new(RefCell::new(None::<usize>));

    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        camera: camera.clone(),
        scene: scene.clone(),
        interactive: interactive.clone(),
        hovering: hovering.clone(),
        drag: drag.clone(),
        look_active: look_active.clone(),
    });

    // Recording controls record whatever the canvas currently shows,
    // independent of scene state
    let recorder = capture::CanvasRecorder::new(canvas.clone());
    if let Err(e) = overlay::install_recording_controls(&document, &recorder) {
        log::error!("[record] controls not installed: {e:?}");
    }

    // Initialize WebGPU and start the unconditional render loop
    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene: scene.clone(),
        camera: camera.clone(),
        keys: keys.clone(),
        canvas: canvas.clone(),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx.clone());

    // Level load is a suspending operation; the loop keeps drawing the empty
    // scene until it completes. Failures degrade silently to a level without
    // interaction.
    let config = level::LevelConfig::prototype_level();
    spawn_local(async move {
        match level::fetch_level(&config.url).await {
            Ok(loaded) => {
                let meshes = level::instantiate(&loaded);
                let designated = level::designate_interactive(&meshes, &config.interactive);
                log::info!("[level] loaded {} meshes", meshes.len());
                scene.borrow_mut().meshes = meshes;
                if let Some(g) = frame_ctx.borrow_mut().gpu.as_mut() {
                    g.upload_level(&loaded);
                }
                match designated {
                    Some(index) => {
                        let scene_ref = scene.borrow();
                        log::info!(
                            "[level] interactive mesh '{}' (index {index})",
                            scene_ref.meshes[index].name
                        );
                    }
                    None => log::warn!("[level] no interactive mesh resolved; drag disabled"),
                }
                *interactive.borrow_mut() = designated;
            }
            Err(e) => log::warn!("[level] load failed, interaction disabled: {e}"),
        }
    });

    Ok(())
}
