use crate::input;
use crate::tilt;
use blob_core::BlobEngine;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM listener we can detach again on teardown.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{}: {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn detach(&self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub engine: Rc<RefCell<BlobEngine>>,
    pub epoch: Instant,
    /// Set while an orientation permission prompt is open.
    pub tilt_pending: Rc<Cell<bool>>,
}

impl InputWiring {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

pub fn wire_input_handlers(w: &InputWiring) -> anyhow::Result<Vec<Listener>> {
    Ok(vec![
        wire_pointermove(w)?,
        wire_pointerdown(w)?,
        wire_pointerup(w, "pointerup")?,
        wire_pointerup(w, "pointercancel")?,
        wire_pointerleave(w)?,
        wire_deviceorientation(w)?,
    ])
}

fn wire_pointermove(w: &InputWiring) -> anyhow::Result<Listener> {
    let w2 = w.clone();
    Listener::attach(w.window.as_ref(), "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let px = input::pointer_client_px(ev);
        let now = w2.now();
        w2.engine
            .borrow_mut()
            .pointer_moved_px(px, input::viewport_px(), now);
    })
}

fn wire_pointerdown(w: &InputWiring) -> anyhow::Result<Listener> {
    let w2 = w.clone();
    Listener::attach(w.window.as_ref(), "pointerdown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let px = input::pointer_client_px(ev);
        let now = w2.now();
        w2.engine
            .borrow_mut()
            .press_px(px, input::viewport_px(), now);
    })
}

fn wire_pointerup(w: &InputWiring, event: &'static str) -> anyhow::Result<Listener> {
    let w2 = w.clone();
    Listener::attach(w.window.as_ref(), event, move |ev: web::Event| {
        let touch = ev
            .dyn_ref::<web::PointerEvent>()
            .is_some_and(|p| input::lift_clears_pointer(&p.pointer_type()));
        let needs_permission = {
            let mut eng = w2.engine.borrow_mut();
            eng.release();
            if touch {
                eng.pointer_left();
            }
            input::should_request_tilt(eng.input.tilt_permission, w2.tilt_pending.get())
        };
        // Gesture-gated platforms only honor the prompt from a pointerup,
        // which counts as user activation for touch as well as mouse.
        if event == "pointerup" && needs_permission {
            tilt::request_into(w2.engine.clone(), w2.tilt_pending.clone());
        }
    })
}

fn wire_pointerleave(w: &InputWiring) -> anyhow::Result<Listener> {
    let w2 = w.clone();
    let root = w
        .window
        .document()
        .and_then(|d| d.document_element())
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    Listener::attach(root.as_ref(), "pointerleave", move |_ev: web::Event| {
        w2.engine.borrow_mut().pointer_left();
    })
}

fn wire_deviceorientation(w: &InputWiring) -> anyhow::Result<Listener> {
    let w2 = w.clone();
    Listener::attach(
        w.window.as_ref(),
        "deviceorientation",
        move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::DeviceOrientationEvent>() else {
                return;
            };
            let (beta, gamma) = input::orientation_degrees(ev.beta(), ev.gamma());
            w2.engine.borrow_mut().orientation_changed(beta, gamma);
        },
    )
}
