use crate::dom::BlobStage;
use blob_core::constants::MOTION_TICK_MS;
use blob_core::BlobEngine;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fixed-rate motion tick. Speed only scales simulated time, never the
/// interval itself.
pub struct MotionTicker {
    window: web::Window,
    handle: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl MotionTicker {
    pub fn start(
        window: &web::Window,
        engine: Rc<RefCell<BlobEngine>>,
        epoch: Instant,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(move || {
            let now = epoch.elapsed().as_secs_f64();
            engine.borrow_mut().tick(now);
        }) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                MOTION_TICK_MS,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            window: window.clone(),
            handle: Some(handle),
            _closure: closure,
        })
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            self.window.clear_interval_with_handle(h);
        }
    }
}

/// Display-synced loop: steps the press overlay and pushes transforms to the
/// DOM every animation frame.
pub struct FrameLoop {
    window: web::Window,
    handle: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(
        window: &web::Window,
        engine: Rc<RefCell<BlobEngine>>,
        stage: Rc<BlobStage>,
        epoch: Instant,
    ) -> Self {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let handle_clone = handle.clone();
        let window_clone = window.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_clone.set(None);
            let now = epoch.elapsed().as_secs_f64();
            let transforms = {
                let mut eng = engine.borrow_mut();
                if eng.is_torn_down() {
                    return;
                }
                eng.step_interaction(now);
                eng.transforms()
            };
            stage.apply_transforms(&transforms);

            if let Some(cb) = tick_clone.borrow().as_ref() {
                if let Ok(h) = window_clone.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    handle_clone.set(Some(h));
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            if let Ok(h) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                handle.set(Some(h));
            }
        }
        Self {
            window: window.clone(),
            handle,
            tick,
        }
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            _ = self.window.cancel_animation_frame(h);
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
    }
}
