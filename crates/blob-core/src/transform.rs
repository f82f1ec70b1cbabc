//! Per-blob, per-tick transform math.

use crate::clock::AnimationClock;
use crate::config::{BlobControls, EngineVariant};
use crate::constants::*;
use crate::interaction::Overlay;
use crate::profile::MotionProfile;
use crate::shape::ShapeParams;
use glam::Vec2;
use std::f64::consts::TAU;

/// What the render sink receives for one blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Degrees. Extended variant only.
    pub rotation: Option<f32>,
    /// Extended variant only.
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub shape: ShapeParams,
}

impl BlobTransform {
    /// CSS transform for an element centered with `top/left: 50%`.
    pub fn css_transform(&self) -> String {
        let mut css = format!(
            "translate(-50%, -50%) translate({}px, {}px)",
            self.x, self.y
        );
        if let Some(deg) = self.rotation {
            css.push_str(&format!(" rotate({deg}deg)"));
        }
        let sx = self.scale * self.scale_x.unwrap_or(1.0);
        let sy = self.scale * self.scale_y.unwrap_or(1.0);
        if sx == sy {
            css.push_str(&format!(" scale({sx})"));
        } else {
            css.push_str(&format!(" scale({sx}, {sy})"));
        }
        css
    }

    pub fn to_instance(&self) -> BlobInstance {
        BlobInstance {
            offset: [self.x, self.y],
            scale: self.scale,
            rotation_rad: self.rotation.unwrap_or(0.0).to_radians(),
            aspect: [self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0)],
            shape: self.shape.0,
        }
    }
}

/// Flat per-instance record for GPU-style sinks.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlobInstance {
    pub offset: [f32; 2],
    pub scale: f32,
    pub rotation_rad: f32,
    pub aspect: [f32; 2],
    pub shape: [f32; 8],
}

/// `t * speed + phase` wrapped into one turn before narrowing, so large
/// simulated times keep full angular resolution.
#[inline]
fn angle(t: f64, speed: f32, phase: f32) -> f32 {
    (t * speed as f64 + phase as f64).rem_euclid(TAU) as f32
}

/// Autonomous oscillation offset, before input and overlay.
#[inline]
pub fn autonomous_offset(profile: &MotionProfile, t: f64, motion_range: f32) -> Vec2 {
    Vec2::new(
        angle(t, profile.speed_x, profile.phase_x).sin() * motion_range,
        angle(t, profile.speed_y, profile.phase_y).cos() * motion_range,
    )
}

#[inline]
pub fn size_pulse(profile: &MotionProfile, t: f64, size_change_range: f32) -> f32 {
    angle(t, profile.speed_size, profile.phase_size).sin() * size_change_range
}

/// Combine oscillation, fused input and the press overlay for one blob.
///
/// Pure: identical arguments always give bit-identical output.
pub fn compute_transform(
    profile: &MotionProfile,
    direction: Vec2,
    overlay: &Overlay,
    clock: &AnimationClock,
    blob: usize,
    controls: &BlobControls,
) -> BlobTransform {
    let t = clock.sim_time;
    let auto = autonomous_offset(profile, t, controls.motion_range);
    let pulse = size_pulse(profile, t, controls.size_change_range);

    let sensitivity = controls.movement_sensitivity;
    let input_x = direction.x * sensitivity * profile.input_multiplier_x;
    let input_y = direction.y * sensitivity * profile.input_multiplier_y;
    let input_size =
        (direction.x.abs() + direction.y.abs()) * profile.input_size_multiplier * INPUT_SIZE_GAIN;

    let x = input_x + auto.x + overlay.offset.x;
    let y = input_y + auto.y + overlay.offset.y;
    let scale = (1.0 + (pulse + input_size) / 100.0) * overlay.scale;

    let (rotation, scale_x, scale_y) = match controls.engine {
        EngineVariant::Classic => (None, None, None),
        EngineVariant::Extended => {
            let rate = ROTATION_RATES.get(blob).copied().unwrap_or(1.0);
            let degrees = (rate * ROTATION_DEGREES_PER_UNIT) as f64;
            let rotation = (clock.rotation_time * degrees).rem_euclid(360.0) as f32;
            let seed = SHAPE_SEEDS.get(blob).copied().unwrap_or(0.0);
            let variation = controls.aspect_ratio_variation / 100.0;
            (
                Some(rotation),
                Some(1.0 + angle(t, ASPECT_FREQ_X, seed).sin() * variation),
                Some(1.0 + angle(t, ASPECT_FREQ_Y, seed).cos() * variation),
            )
        }
    };

    BlobTransform {
        x,
        y,
        scale,
        rotation,
        scale_x,
        scale_y,
        shape: ShapeParams::for_blob(blob),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> BlobControls {
        BlobControls {
            engine: EngineVariant::Classic,
            ..BlobControls::default()
        }
    }

    #[test]
    fn classic_has_no_rotation_or_aspect() {
        let t = compute_transform(
            &MotionProfile::still(0.5),
            Vec2::ZERO,
            &Overlay::IDENTITY,
            &AnimationClock::new(),
            0,
            &classic(),
        );
        assert_eq!(t.rotation, None);
        assert_eq!(t.scale_x, None);
        assert_eq!(t.css_transform(), "translate(-50%, -50%) translate(0px, 100px) scale(1)");
    }

    #[test]
    fn rotation_rates_differ_per_blob() {
        let clock = AnimationClock {
            rotation_time: 1.0,
            ..AnimationClock::new()
        };
        let p = MotionProfile::still(0.5);
        let c = BlobControls::default();
        let a = compute_transform(&p, Vec2::ZERO, &Overlay::IDENTITY, &clock, 0, &c);
        let b = compute_transform(&p, Vec2::ZERO, &Overlay::IDENTITY, &clock, 1, &c);
        let ra = a.rotation.unwrap();
        let rb = b.rotation.unwrap();
        assert!((rb / ra - 1.3).abs() < 1e-5);
    }

    #[test]
    fn aspect_stays_within_variation() {
        let c = BlobControls::default();
        let p = MotionProfile::still(0.5);
        let limit = c.aspect_ratio_variation / 100.0 + 1e-6;
        for i in 0..400 {
            let clock = AnimationClock {
                sim_time: i as f64 * 0.37,
                ..AnimationClock::new()
            };
            let t = compute_transform(&p, Vec2::ZERO, &Overlay::IDENTITY, &clock, 2, &c);
            assert!((t.scale_x.unwrap() - 1.0).abs() <= limit);
            assert!((t.scale_y.unwrap() - 1.0).abs() <= limit);
        }
    }

    #[test]
    fn input_size_uses_both_axes() {
        let mut p = MotionProfile::still(0.5);
        p.input_size_multiplier = 1.0;
        let c = BlobControls {
            size_change_range: 0.0,
            ..classic()
        };
        let t = compute_transform(
            &p,
            Vec2::new(-0.5, 0.25),
            &Overlay::IDENTITY,
            &AnimationClock::new(),
            0,
            &c,
        );
        // (0.5 + 0.25) * 1 * 20 = 15 -> 1.15
        assert!((t.scale - 1.15).abs() < 1e-6);
    }

    #[test]
    fn instance_is_flat_floats() {
        let t = compute_transform(
            &MotionProfile::still(0.5),
            Vec2::ZERO,
            &Overlay::IDENTITY,
            &AnimationClock::new(),
            1,
            &BlobControls::default(),
        );
        let inst = [t.to_instance()];
        let floats: &[f32] = bytemuck::cast_slice(&inst);
        assert_eq!(floats.len(), 14);
        assert_eq!(floats[2], t.scale);
        assert_eq!(&floats[6..], &t.shape.0);
    }

    #[test]
    fn motion_keeps_advancing_at_large_sim_time() {
        let p = MotionProfile::still(0.5);
        let c = classic();
        let base = 262_144.0;
        let a = compute_transform(
            &p,
            Vec2::ZERO,
            &Overlay::IDENTITY,
            &AnimationClock {
                sim_time: base,
                ..AnimationClock::new()
            },
            0,
            &c,
        );
        let mut clock = AnimationClock {
            sim_time: base,
            ..AnimationClock::new()
        };
        clock.tick(1.0, 1.0);
        let b = compute_transform(&p, Vec2::ZERO, &Overlay::IDENTITY, &clock, 0, &c);
        assert_ne!(a.x, b.x);
        // One 0.01 step at speed 0.5 moves the angle by 0.005 rad.
        let expected = ((base + 0.01) * 0.5).rem_euclid(TAU).sin() * c.motion_range as f64;
        assert!((b.x as f64 - expected).abs() < 1e-3);
    }
}
