#![cfg(target_arch = "wasm32")]
use blob_core::{BlobControls, BlobEngine};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod tilt;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

fn controls_from_js(value: &JsValue) -> anyhow::Result<BlobControls> {
    if value.is_undefined() || value.is_null() {
        return Ok(BlobControls::default());
    }
    let json = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_string()
        .unwrap_or_default();
    Ok(BlobControls::from_json(&json)?)
}

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

struct SceneParts {
    container: web::HtmlElement,
    engine: Rc<RefCell<BlobEngine>>,
    stage: Rc<dom::BlobStage>,
    tilt_pending: Rc<Cell<bool>>,
    listeners: Vec<events::Listener>,
    ticker: frame::MotionTicker,
    frames: frame::FrameLoop,
}

impl SceneParts {
    fn apply_visuals(&self) {
        let viewport = input::viewport_px();
        let visual = self
            .engine
            .borrow()
            .controls
            .for_viewport(viewport.x, viewport.y)
            .visual_params();
        self.stage.apply_visuals(&self.container, &visual);
    }
}

/// One mounted blob scene. Dropping it from JS without `destroy()` leaves the
/// listeners attached, so call `destroy()` when unmounting.
#[wasm_bindgen]
pub struct BlobScene {
    parts: Rc<RefCell<Option<SceneParts>>>,
    resize: RefCell<Option<events::Listener>>,
    destroyed: Cell<bool>,
}

#[wasm_bindgen]
impl BlobScene {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, controls: JsValue) -> Result<BlobScene, JsValue> {
        let controls = controls_from_js(&controls).map_err(to_js)?;
        let parts = mount(container, controls).map_err(to_js)?;
        parts.apply_visuals();
        let parts = Rc::new(RefCell::new(Some(parts)));

        // Portrait/landscape changes alter the derived blob size and blur.
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let parts_resize = parts.clone();
        let resize = events::Listener::attach(window.as_ref(), "resize", move |_ev: web::Event| {
            if let Some(p) = parts_resize.borrow().as_ref() {
                p.apply_visuals();
            }
        })
        .map_err(to_js)?;

        Ok(BlobScene {
            parts,
            resize: RefCell::new(Some(resize)),
            destroyed: Cell::new(false),
        })
    }

    /// Replace the controls with a new settings object.
    pub fn set_controls(&self, controls: JsValue) -> Result<(), JsValue> {
        let controls = controls_from_js(&controls).map_err(to_js)?;
        if let Some(p) = self.parts.borrow().as_ref() {
            p.engine.borrow_mut().set_controls(controls);
            p.apply_visuals();
        }
        Ok(())
    }

    /// Ask for device orientation access. Call from a user gesture on
    /// platforms that require one.
    pub fn request_tilt_permission(&self) {
        if let Some(p) = self.parts.borrow().as_ref() {
            tilt::request_into(p.engine.clone(), p.tilt_pending.clone());
        }
    }

    /// Current transforms as `[x, y, scale, rotationRad, scaleX, scaleY, ...shape]`
    /// per blob, flattened.
    pub fn transforms(&self) -> Vec<f32> {
        let Some(transforms) = self.parts.borrow().as_ref().map(|p| p.engine.borrow().transforms()) else {
            return Vec::new();
        };
        let instances = transforms.map(|t| t.to_instance());
        bytemuck::cast_slice(&instances).to_vec()
    }

    /// Detach every listener, stop both loops and drop pending timers.
    /// Calling it again does nothing.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(r) = self.resize.borrow_mut().take() {
            r.detach();
        }
        if let Some(mut p) = self.parts.borrow_mut().take() {
            for l in &p.listeners {
                l.detach();
            }
            p.ticker.stop();
            p.frames.stop();
            p.engine.borrow_mut().teardown();
            p.stage.remove();
            log::info!("[scene] destroyed");
        }
    }
}

fn mount(container: web::HtmlElement, controls: BlobControls) -> anyhow::Result<SceneParts> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let seed: u64 = rand::random();
    let engine = Rc::new(RefCell::new(BlobEngine::new(controls, seed)));
    tilt::init_permission(&engine);

    let stage = Rc::new(dom::BlobStage::build(&document, &container)?);
    let epoch = Instant::now();
    let tilt_pending = Rc::new(Cell::new(false));

    let wiring = events::InputWiring {
        window: window.clone(),
        engine: engine.clone(),
        epoch,
        tilt_pending: tilt_pending.clone(),
    };
    let listeners = events::wire_input_handlers(&wiring)?;
    let ticker = frame::MotionTicker::start(&window, engine.clone(), epoch)?;
    let frames = frame::FrameLoop::start(&window, engine.clone(), stage.clone(), epoch);

    {
        let viewport = input::viewport_px();
        let e = engine.borrow();
        log::info!(
            "[scene] mounted viewport=({:.0},{:.0}) variant={:?} tilt={:?}",
            viewport.x,
            viewport.y,
            e.controls.engine,
            e.input.tilt_permission
        );
    }
    // Blobs start centered with their autonomous offsets.
    stage.apply_transforms(&engine.borrow().transforms());

    Ok(SceneParts {
        container,
        engine,
        stage,
        tilt_pending,
        listeners,
        ticker,
        frames,
    })
}
