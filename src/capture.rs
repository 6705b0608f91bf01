//! Canvas capture: binds the render surface to a `MediaRecorder` and
//! packages finished sessions into a downloadable WebM file.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::constants::{CAPTURE_FPS, CAPTURE_MIME, CONTAINER_MIME, DOWNLOAD_FILENAME};
use crate::dom;
use crate::recorder::{BeginOutcome, CaptureSession};

/// Start/stop controller for recording the render surface.
///
/// Clones share one session and one in-flight recorder, so the overlay
/// buttons can each hold a handle.
#[derive(Clone)]
pub struct CanvasRecorder {
    canvas: web::HtmlCanvasElement,
    session: Rc<RefCell<CaptureSession<web::Blob>>>,
    media_recorder: Rc<RefCell<Option<web::MediaRecorder>>>,
}

impl CanvasRecorder {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self {
            canvas,
            session: Rc::new(RefCell::new(CaptureSession::new())),
            media_recorder: Rc::new(RefCell::new(None)),
        }
    }

    /// Bind a capture source to the canvas and start buffering fragments.
    ///
    /// Starting while a session is in flight restarts it: the old recorder
    /// is stopped with its callbacks detached, so it produces no download,
    /// and its fragments are discarded. A capture-unavailable failure is
    /// returned to the caller; there is no retry.
    pub fn start(&self) -> Result<(), JsValue> {
        if let Some(old) = self.media_recorder.borrow_mut().take() {
            old.set_ondataavailable(None);
            old.set_onstop(None);
            _ = old.stop();
        }

        let stream = self
            .canvas
            .capture_stream_with_frame_request_rate(CAPTURE_FPS)?;
        let options = web::MediaRecorderOptions::new();
        options.set_mime_type(CAPTURE_MIME);
        let recorder =
            web::MediaRecorder::new_with_media_stream_and_media_recorder_options(&stream, &options)?;

        let session = self.session.clone();
        let ondata = Closure::wrap(Box::new(move |ev: web::BlobEvent| {
            if let Some(blob) = ev.data() {
                let size = blob.size() as u64;
                session.borrow_mut().push(blob, size);
            }
        }) as Box<dyn FnMut(_)>);
        recorder.set_ondataavailable(Some(ondata.as_ref().unchecked_ref()));
        ondata.forget();

        let session = self.session.clone();
        let recorder_slot = self.media_recorder.clone();
        let onstop = Closure::wrap(Box::new(move || {
            *recorder_slot.borrow_mut() = None;
            if let Some(fragments) = session.borrow_mut().finish() {
                match package_and_download(&fragments) {
                    Ok(()) => {
                        log::info!("[record] download triggered ({} fragments)", fragments.len())
                    }
                    Err(e) => log::error!("[record] packaging failed: {e:?}"),
                }
            }
        }) as Box<dyn FnMut()>);
        recorder.set_onstop(Some(onstop.as_ref().unchecked_ref()));
        onstop.forget();

        recorder.start()?;
        if self.session.borrow_mut().begin() == BeginOutcome::RestartedPrior {
            log::info!("[record] restarted; prior session discarded");
        }
        *self.media_recorder.borrow_mut() = Some(recorder);
        log::info!("[record] recording started");
        Ok(())
    }

    /// Signal the capture source to finalize. Packaging and the download
    /// happen in the recorder's stop callback, which also releases the
    /// source; calling this while idle is a no-op. The recorder stays in its
    /// slot until that callback runs so a restart can still detach it.
    pub fn stop(&self) {
        let recorder = self.media_recorder.borrow().clone();
        match recorder {
            Some(recorder) => {
                // Finalizing recorders are already inactive; stopping again
                // is a no-op.
                if recorder.state() != web::RecordingState::Inactive {
                    _ = recorder.stop();
                    log::info!("[record] recording stopped");
                }
            }
            None => {
                // A failed start can leave the session open with no source.
                if self.session.borrow_mut().finish().is_some() {
                    log::warn!("[record] closed a session that had no capture source");
                }
            }
        }
    }
}

/// Concatenate the fragments into one WebM blob and hand it to the user via
/// a transient anchor click.
fn package_and_download(fragments: &[web::Blob]) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    for fragment in fragments {
        parts.push(fragment);
    }
    let options = web::BlobPropertyBag::new();
    options.set_type(CONTAINER_MIME);
    let blob = web::Blob::new_with_blob_sequence_and_options(parts.as_ref(), &options)?;

    let url = web::Url::create_object_url_with_blob(&blob)?;
    let document =
        dom::window_document().ok_or_else(|| JsValue::from_str("no document for download"))?;
    let anchor: web::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(DOWNLOAD_FILENAME);
    anchor.click();
    web::Url::revoke_object_url(&url)?;
    Ok(())
}
