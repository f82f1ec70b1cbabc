use crate::clock::AnimationClock;
use crate::config::{BlobControls, EngineVariant};
use crate::constants::BLOB_COUNT;
use crate::input::{normalize_pointer, InputState, TiltPermission};
use crate::interaction::{InteractionState, Overlay};
use crate::profile::{generate_all, InputResponse, MotionProfile};
use crate::transform::{compute_transform, BlobTransform};
use glam::Vec2;
use rand::prelude::*;

/// Everything one tick's transform computation reads, copied out of the
/// engine so event handlers can never tear it mid-computation.
#[derive(Clone, Debug)]
pub struct EngineSnapshot {
    pub clock: AnimationClock,
    pub direction: Vec2,
    pub overlay: Overlay,
    pub profiles: [MotionProfile; BLOB_COUNT],
}

impl EngineSnapshot {
    pub fn transforms(&self, controls: &BlobControls) -> [BlobTransform; BLOB_COUNT] {
        std::array::from_fn(|i| {
            compute_transform(
                &self.profiles[i],
                self.direction,
                &self.overlay,
                &self.clock,
                i,
                controls,
            )
        })
    }
}

/// Owns all mutable motion state for one scene.
pub struct BlobEngine {
    pub controls: BlobControls,
    pub clock: AnimationClock,
    pub input: InputState,
    pub interaction: InteractionState,
    profiles: [MotionProfile; BLOB_COUNT],
    rng: StdRng,
    generation: u64,
    torn_down: bool,
}

impl BlobEngine {
    pub fn new(controls: BlobControls, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let profiles = generate_all(&mut rng, response_for(controls.engine));
        log::info!(
            "[engine] start variant={:?} seed={} speeds=({:.2},{:.2},{:.2})",
            controls.engine,
            seed,
            profiles[0].speed_x,
            profiles[1].speed_x,
            profiles[2].speed_x
        );
        Self {
            controls,
            clock: AnimationClock::new(),
            input: InputState::new(),
            interaction: InteractionState::new(),
            profiles,
            rng,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn profiles(&self) -> &[MotionProfile; BLOB_COUNT] {
        &self.profiles
    }

    /// Bumped on every regeneration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn set_controls(&mut self, controls: BlobControls) {
        let variant_changed = controls.engine != self.controls.engine;
        self.controls = controls;
        if variant_changed {
            self.regenerate_profiles();
        }
    }

    /// Replace all three profiles in one assignment.
    pub fn regenerate_profiles(&mut self) {
        let next = generate_all(&mut self.rng, response_for(self.controls.engine));
        self.profiles = next;
        self.generation += 1;
        log::debug!("[profiles] regenerated generation={}", self.generation);
    }

    /// Pointer sample in pixels against the current viewport.
    pub fn pointer_moved_px(&mut self, px: Vec2, viewport: Vec2, now: f64) {
        if let Some(pos) = normalize_pointer(px, viewport) {
            self.pointer_moved(pos, now);
        }
    }

    /// Pointer sample already in [-1, 1]².
    pub fn pointer_moved(&mut self, pos: Vec2, now: f64) {
        if self.torn_down {
            return;
        }
        if self.input.pointer_moved(pos, now) {
            self.regenerate_profiles();
        }
    }

    /// The pointer left the page or a touch lifted; tilt may drive again.
    pub fn pointer_left(&mut self) {
        if self.torn_down {
            return;
        }
        self.input.pointer_left();
    }

    pub fn set_tilt_permission(&mut self, permission: TiltPermission) {
        log::info!("[input] tilt permission {:?}", permission);
        self.input.set_tilt_permission(permission);
    }

    pub fn orientation_changed(&mut self, beta: Option<f32>, gamma: Option<f32>) {
        if self.torn_down {
            return;
        }
        self.input.orientation_changed(beta, gamma);
    }

    pub fn press(&mut self, origin: Vec2, now: f64) {
        if self.torn_down {
            return;
        }
        let duration = self.controls.interaction_intensity;
        let params = self.controls.press;
        self.interaction.engage(origin, now, duration, &params);
        self.regenerate_profiles();
    }

    pub fn press_px(&mut self, px: Vec2, viewport: Vec2, now: f64) {
        if let Some(origin) = normalize_pointer(px, viewport) {
            self.press(origin, now);
        }
    }

    pub fn release(&mut self) {
        self.interaction.release();
    }

    /// Coarse motion tick: advance simulated time and expire the pause timer.
    pub fn tick(&mut self, now: f64) {
        if self.torn_down {
            return;
        }
        self.input.poll(now);
        self.clock
            .tick(self.controls.animation_speed, self.controls.rotation_speed);
    }

    /// Fine-grained easing/decay step, once per display frame.
    pub fn step_interaction(&mut self, now: f64) {
        if self.torn_down {
            return;
        }
        self.interaction.step(now);
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            clock: self.clock,
            direction: self.input.current_direction(),
            overlay: self.interaction.current,
            profiles: self.profiles,
        }
    }

    pub fn transforms(&self) -> [BlobTransform; BLOB_COUNT] {
        self.snapshot().transforms(&self.controls)
    }

    /// Stop reacting to input and drop pending timers. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.input.cancel_pause_timer();
        self.torn_down = true;
        log::info!("[engine] teardown after {} ticks", self.clock.ticks);
    }
}

fn response_for(variant: EngineVariant) -> InputResponse {
    match variant {
        EngineVariant::Classic => InputResponse::Shared,
        EngineVariant::Extended => InputResponse::Independent,
    }
}
