use crate::constants::*;
use rand::prelude::*;
use std::f32::consts::TAU;

/// How a blob reacts to the fused input direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResponse {
    /// Fixed per-blob multiplier on both axes, no input-driven size pulse.
    Shared,
    /// Random signed multiplier per axis plus a random size multiplier.
    Independent,
}

/// Randomized autonomous-motion parameters for one blob.
///
/// Profiles are replaced wholesale on regeneration, never edited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    pub phase_x: f32,
    pub phase_y: f32,
    pub phase_size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub speed_size: f32,
    pub input_multiplier_x: f32,
    pub input_multiplier_y: f32,
    pub input_size_multiplier: f32,
}

impl MotionProfile {
    pub fn generate<R: Rng>(rng: &mut R, response: InputResponse, blob: usize) -> Self {
        let phase_x = rng.gen_range(0.0..TAU);
        let phase_y = rng.gen_range(0.0..TAU);
        let phase_size = rng.gen_range(0.0..TAU);
        let speed_x = rng.gen_range(SPEED_XY_MIN..SPEED_XY_MAX);
        let speed_y = rng.gen_range(SPEED_XY_MIN..SPEED_XY_MAX);
        let speed_size = rng.gen_range(SPEED_SIZE_MIN..SPEED_SIZE_MAX);
        let (input_multiplier_x, input_multiplier_y, input_size_multiplier) = match response {
            InputResponse::Shared => {
                let m = CLASSIC_INPUT_MULTIPLIERS
                    .get(blob)
                    .copied()
                    .unwrap_or(1.0);
                (m, m, 0.0)
            }
            InputResponse::Independent => (
                rng.gen_range(-INPUT_MULTIPLIER_MAX..=INPUT_MULTIPLIER_MAX),
                rng.gen_range(-INPUT_MULTIPLIER_MAX..=INPUT_MULTIPLIER_MAX),
                rng.gen_range(-INPUT_SIZE_MULTIPLIER_MAX..=INPUT_SIZE_MULTIPLIER_MAX),
            ),
        };
        Self {
            phase_x,
            phase_y,
            phase_size,
            speed_x,
            speed_y,
            speed_size,
            input_multiplier_x,
            input_multiplier_y,
            input_size_multiplier,
        }
    }

    /// Profile with zero phases, unit input response and the given speed on
    /// every axis. Handy for reproducible scenes.
    pub fn still(speed: f32) -> Self {
        Self {
            phase_x: 0.0,
            phase_y: 0.0,
            phase_size: 0.0,
            speed_x: speed,
            speed_y: speed,
            speed_size: speed,
            input_multiplier_x: 1.0,
            input_multiplier_y: 1.0,
            input_size_multiplier: 0.0,
        }
    }
}

/// Generate a full set of profiles. Callers swap the returned array in as a
/// single assignment so no frame sees a mix of old and new profiles.
pub fn generate_all<R: Rng>(
    rng: &mut R,
    response: InputResponse,
) -> [MotionProfile; BLOB_COUNT] {
    std::array::from_fn(|i| MotionProfile::generate(rng, response, i))
}
