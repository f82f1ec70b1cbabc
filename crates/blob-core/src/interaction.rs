//! Press-and-hold overlay: a scale pop plus a directional nudge.
//!
//! Engaging eases toward the target over a known duration (cubic ease-out),
//! releasing decays exponentially toward identity with no fixed duration.

use crate::config::PressParams;
use crate::constants::{IDLE_OFFSET_EPSILON, IDLE_SCALE_EPSILON, RELEASE_RETAIN};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub scale: f32,
    pub offset: Vec2,
}

impl Overlay {
    pub const IDENTITY: Overlay = Overlay {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    #[inline]
    pub fn lerp(self, to: Overlay, t: f32) -> Overlay {
        Overlay {
            scale: self.scale + (to.scale - self.scale) * t,
            offset: self.offset + (to.offset - self.offset) * t,
        }
    }

    fn near_identity(&self) -> bool {
        (self.scale - 1.0).abs() < IDLE_SCALE_EPSILON
            && self.offset.x.abs() < IDLE_OFFSET_EPSILON
            && self.offset.y.abs() < IDLE_OFFSET_EPSILON
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Engaging,
    Held,
    Releasing,
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionState {
    pub phase: InteractionPhase,
    pub start_time: f64,
    pub duration: f32,
    pub target: Overlay,
    /// Overlay right after the engage pop; easing starts here.
    pub from: Overlay,
    pub current: Overlay,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            InteractionPhase::Engaging | InteractionPhase::Held
        )
    }

    /// Start a press at `origin` (normalized [-1, 1]²).
    ///
    /// The overlay jumps `pop_fraction` of the way to the target immediately.
    /// A press during release starts from the current overlay rather than
    /// identity.
    pub fn engage(&mut self, origin: Vec2, now: f64, duration: f32, params: &PressParams) {
        let target = Overlay {
            scale: params.pop_scale,
            offset: origin * params.offset_gain,
        };
        let base = match self.phase {
            InteractionPhase::Idle => Overlay::IDENTITY,
            _ => self.current,
        };
        let popped = base.lerp(target, params.pop_fraction);
        log::debug!(
            "[interaction] engage from {:?} origin=({:.2},{:.2})",
            self.phase,
            origin.x,
            origin.y
        );
        *self = InteractionState {
            phase: InteractionPhase::Engaging,
            start_time: now,
            duration,
            target,
            from: popped,
            current: popped,
        };
    }

    pub fn release(&mut self) {
        if self.is_active() {
            log::debug!("[interaction] release from {:?}", self.phase);
            self.phase = InteractionPhase::Releasing;
        }
    }

    /// Advance easing/decay. Called once per display frame.
    pub fn step(&mut self, now: f64) {
        match self.phase {
            InteractionPhase::Idle | InteractionPhase::Held => {}
            InteractionPhase::Engaging => {
                let elapsed = (now - self.start_time) as f32;
                if self.duration <= 0.0 || elapsed >= self.duration {
                    self.current = self.target;
                    self.phase = InteractionPhase::Held;
                    return;
                }
                let progress = (elapsed / self.duration).clamp(0.0, 1.0);
                self.current = self.from.lerp(self.target, ease_out_cubic(progress));
            }
            InteractionPhase::Releasing => {
                self.current = self
                    .current
                    .lerp(Overlay::IDENTITY, 1.0 - RELEASE_RETAIN);
                if self.current.near_identity() {
                    self.current = Overlay::IDENTITY;
                    self.phase = InteractionPhase::Idle;
                    log::debug!("[interaction] settled");
                }
            }
        }
    }
}
