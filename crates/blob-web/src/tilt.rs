//! Device orientation permission. Every failure path ends in a non-granted
//! permission; nothing here surfaces an error to the caller. A rejected
//! prompt leaves the permission `Unknown` so the next gesture can retry.

use crate::input;
use blob_core::{BlobEngine, TiltPermission};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub enum TiltSupport {
    Unsupported,
    /// `DeviceOrientationEvent.requestPermission` exists and must be called
    /// from a user gesture.
    NeedsGesture(js_sys::Function, JsValue),
    Available,
}

pub fn detect_support() -> TiltSupport {
    let Some(window) = web::window() else {
        return TiltSupport::Unsupported;
    };
    let ctor = js_sys::Reflect::get(&window, &JsValue::from_str("DeviceOrientationEvent"))
        .unwrap_or(JsValue::UNDEFINED);
    if ctor.is_undefined() || ctor.is_null() {
        return TiltSupport::Unsupported;
    }
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
        .unwrap_or(JsValue::UNDEFINED);
    match request.dyn_into::<js_sys::Function>() {
        Ok(func) => TiltSupport::NeedsGesture(func, ctor),
        Err(_) => TiltSupport::Available,
    }
}

async fn request(func: js_sys::Function, ctor: JsValue) -> TiltPermission {
    let promise = match func.call0(&ctor) {
        Ok(p) => js_sys::Promise::resolve(&p),
        Err(e) => {
            log::warn!("[tilt] requestPermission threw: {:?}", e);
            return input::permission_from_outcome(Err(e));
        }
    };
    let outcome = JsFuture::from(promise).await;
    if let Err(e) = &outcome {
        log::warn!("[tilt] permission rejected: {:?}", e);
    }
    let response = outcome.map(|v| v.as_string());
    input::permission_from_outcome(response.as_ref().map(|r| r.as_deref()))
}

/// Resolve the permission without prompting when the platform allows it.
/// Gesture-gated platforms stay `Unknown` until [`request_into`] runs.
pub fn init_permission(engine: &Rc<RefCell<BlobEngine>>) {
    match detect_support() {
        TiltSupport::Unsupported => engine
            .borrow_mut()
            .set_tilt_permission(TiltPermission::Unsupported),
        TiltSupport::Available => engine
            .borrow_mut()
            .set_tilt_permission(TiltPermission::Granted),
        TiltSupport::NeedsGesture(..) => {}
    }
}

/// Ask for orientation access and store the outcome on the engine.
///
/// `pending` is set while a prompt is open; further calls return early.
pub fn request_into(engine: Rc<RefCell<BlobEngine>>, pending: Rc<Cell<bool>>) {
    let TiltSupport::NeedsGesture(func, ctor) = detect_support() else {
        init_permission(&engine);
        return;
    };
    if pending.replace(true) {
        return;
    }
    spawn_local(async move {
        let outcome = request(func, ctor).await;
        pending.set(false);
        let mut eng = engine.borrow_mut();
        if !eng.is_torn_down() {
            eng.set_tilt_permission(outcome);
        }
    });
}
