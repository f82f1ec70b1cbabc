//! Scripted input timeline standing in for a real pointer and tilt sensor.

use blob_core::{BlobEngine, TiltPermission};
use glam::Vec2;

pub const FRAME_DT: f64 = 1.0 / 60.0;
pub const MOTION_DT: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptEvent {
    Pointer(Vec2),
    Tilt { beta: f32, gamma: f32 },
    Press(Vec2),
    Release,
}

/// Default demo: circle the pointer, pause, resume, press and release,
/// then fall back to tilt only.
pub fn demo_script() -> Vec<(f64, ScriptEvent)> {
    let mut events = Vec::new();
    let mut t = 0.0;
    while t < 2.0 {
        let a = t as f32 * std::f32::consts::PI;
        events.push((t, ScriptEvent::Pointer(Vec2::new(a.cos(), a.sin()) * 0.6)));
        t += 0.04;
    }
    // silent until 3.0: pause detected, next move regenerates
    events.push((3.0, ScriptEvent::Pointer(Vec2::new(-0.5, 0.2))));
    events.push((3.5, ScriptEvent::Press(Vec2::new(0.6, 0.0))));
    events.push((4.2, ScriptEvent::Release));
    events.push((5.0, ScriptEvent::Tilt { beta: 20.0, gamma: -30.0 }));
    events
}

pub struct Runner {
    pub engine: BlobEngine,
    script: Vec<(f64, ScriptEvent)>,
    next_event: usize,
    now: f64,
    next_motion: f64,
}

impl Runner {
    pub fn new(mut engine: BlobEngine, mut script: Vec<(f64, ScriptEvent)>) -> Self {
        script.sort_by(|a, b| a.0.total_cmp(&b.0));
        engine.set_tilt_permission(TiltPermission::Granted);
        Self {
            engine,
            script,
            next_event: 0,
            now: 0.0,
            next_motion: 0.0,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    fn apply(&mut self, ev: ScriptEvent, at: f64) {
        match ev {
            ScriptEvent::Pointer(p) => self.engine.pointer_moved(p, at),
            ScriptEvent::Tilt { beta, gamma } => {
                self.engine.pointer_left();
                self.engine.orientation_changed(Some(beta), Some(gamma));
            }
            ScriptEvent::Press(p) => self.engine.press(p, at),
            ScriptEvent::Release => self.engine.release(),
        }
    }

    /// Advance one display frame. Returns `true` when a motion tick fired.
    pub fn step(&mut self) -> bool {
        self.now += FRAME_DT;
        while let Some(&(at, ev)) = self.script.get(self.next_event) {
            if at > self.now {
                break;
            }
            self.apply(ev, at);
            self.next_event += 1;
        }
        let mut ticked = false;
        while self.next_motion <= self.now {
            self.engine.tick(self.next_motion);
            self.next_motion += MOTION_DT;
            ticked = true;
        }
        self.engine.step_interaction(self.now);
        ticked
    }
}
