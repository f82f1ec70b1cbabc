//! Pointer and tilt fusion plus pause detection.
//!
//! Times are plain seconds supplied by the caller so the state machine stays
//! deterministic under test.

use crate::constants::{PAUSE_THRESHOLD_SEC, SIGNIFICANT_MOVE, TILT_FULL_SCALE_DEG};
use glam::Vec2;

/// Device orientation access. Anything other than `Granted` keeps tilt at
/// the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TiltPermission {
    #[default]
    Unknown,
    Granted,
    Denied,
    Unsupported,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub pointer: Option<Vec2>,
    pub tilt: Vec2,
    pub tilt_permission: TiltPermission,
    last_significant: Option<Vec2>,
    pause_deadline: Option<f64>,
    paused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer if present, else tilt (origin when tilt never arrived).
    #[inline]
    pub fn current_direction(&self) -> Vec2 {
        self.pointer.unwrap_or(self.tilt)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause_pending(&self) -> bool {
        self.pause_deadline.is_some()
    }

    /// Record a normalized pointer sample. Returns `true` when this sample is
    /// the first significant movement after a pause, i.e. profiles should be
    /// regenerated.
    pub fn pointer_moved(&mut self, pos: Vec2, now: f64) -> bool {
        self.poll(now);
        self.pointer = Some(pos);

        let significant = match self.last_significant {
            Some(last) => (pos - last).length() > SIGNIFICANT_MOVE,
            None => true,
        };
        if !significant {
            return false;
        }

        self.last_significant = Some(pos);
        self.pause_deadline = Some(now + PAUSE_THRESHOLD_SEC);
        let resumed = self.paused;
        self.paused = false;
        if resumed {
            log::debug!("[input] movement resumed at ({:.2},{:.2})", pos.x, pos.y);
        }
        resumed
    }

    /// Expire the pause deadline if it has passed.
    pub fn poll(&mut self, now: f64) {
        if let Some(deadline) = self.pause_deadline {
            if now >= deadline {
                self.pause_deadline = None;
                self.paused = true;
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Drop any pending pause so nothing fires after teardown.
    pub fn cancel_pause_timer(&mut self) {
        self.pause_deadline = None;
    }

    pub fn set_tilt_permission(&mut self, permission: TiltPermission) {
        self.tilt_permission = permission;
        if permission != TiltPermission::Granted {
            self.tilt = Vec2::ZERO;
        }
    }

    /// Record an orientation sample in degrees. Ignored without permission or
    /// when either axis is missing.
    pub fn orientation_changed(&mut self, beta: Option<f32>, gamma: Option<f32>) {
        if self.tilt_permission != TiltPermission::Granted {
            return;
        }
        if let Some(t) = normalize_tilt(beta, gamma) {
            self.tilt = t;
        }
    }
}

/// Map a pixel position to [-1, 1]² against the viewport. `None` for an
/// empty viewport.
#[inline]
pub fn normalize_pointer(px: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some((px / viewport - Vec2::splat(0.5)) * 2.0)
}

/// `gamma` drives x, `beta` drives y, both saturating at ±45°.
#[inline]
pub fn normalize_tilt(beta: Option<f32>, gamma: Option<f32>) -> Option<Vec2> {
    let (beta, gamma) = (beta?, gamma?);
    if !beta.is_finite() || !gamma.is_finite() {
        return None;
    }
    Some(Vec2::new(
        (gamma / TILT_FULL_SCALE_DEG).clamp(-1.0, 1.0),
        (beta / TILT_FULL_SCALE_DEG).clamp(-1.0, 1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted() -> InputState {
        let mut s = InputState::new();
        s.set_tilt_permission(TiltPermission::Granted);
        s
    }

    #[test]
    fn pointer_overrides_tilt() {
        let mut s = granted();
        s.orientation_changed(Some(-45.0), Some(-45.0));
        assert_eq!(s.current_direction(), Vec2::new(-1.0, -1.0));
        s.pointer_moved(Vec2::new(0.5, 0.5), 0.0);
        assert_eq!(s.current_direction(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn nothing_known_is_origin() {
        assert_eq!(InputState::new().current_direction(), Vec2::ZERO);
    }

    #[test]
    fn tilt_without_permission_stays_at_origin() {
        let mut s = InputState::new();
        s.orientation_changed(Some(30.0), Some(30.0));
        assert_eq!(s.tilt, Vec2::ZERO);
        s.set_tilt_permission(TiltPermission::Denied);
        s.orientation_changed(Some(30.0), Some(30.0));
        assert_eq!(s.current_direction(), Vec2::ZERO);
    }

    #[test]
    fn tilt_is_clamped() {
        let mut s = granted();
        s.orientation_changed(Some(90.0), Some(-22.5));
        assert_eq!(s.tilt, Vec2::new(-0.5, 1.0));
        s.orientation_changed(None, Some(10.0));
        assert_eq!(s.tilt, Vec2::new(-0.5, 1.0));
    }

    #[test]
    fn pointer_normalization() {
        let vp = Vec2::new(800.0, 600.0);
        assert_eq!(normalize_pointer(Vec2::new(400.0, 300.0), vp), Some(Vec2::ZERO));
        assert_eq!(normalize_pointer(Vec2::ZERO, vp), Some(Vec2::new(-1.0, -1.0)));
        assert_eq!(normalize_pointer(vp, vp), Some(Vec2::ONE));
        assert_eq!(normalize_pointer(Vec2::ONE, Vec2::ZERO), None);
    }

    #[test]
    fn small_moves_do_not_restart_the_timer() {
        let mut s = InputState::new();
        assert!(!s.pointer_moved(Vec2::ZERO, 0.0));
        assert!(!s.pointer_moved(Vec2::new(0.01, 0.0), 0.15));
        s.poll(0.21);
        assert!(s.is_paused());
    }

    #[test]
    fn cancelled_timer_never_pauses() {
        let mut s = InputState::new();
        s.pointer_moved(Vec2::ZERO, 0.0);
        s.cancel_pause_timer();
        s.poll(10.0);
        assert!(!s.is_paused());
        assert!(!s.pointer_moved(Vec2::ONE, 10.0));
    }
}
