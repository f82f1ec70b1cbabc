use crate::constants::SIM_STEP;

/// Simulated time for oscillation and rotation.
///
/// The wall-clock tick rate never changes; the speed multipliers only scale
/// how much simulated time each tick adds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    pub sim_time: f64,
    pub rotation_time: f64,
    pub ticks: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one motion tick. Negative multipliers freeze the respective
    /// time axis so both stay monotonic.
    pub fn tick(&mut self, speed: f32, rotation_speed: f32) {
        self.sim_time += SIM_STEP * speed.max(0.0) as f64;
        self.rotation_time += SIM_STEP * rotation_speed.max(0.0) as f64;
        self.ticks += 1;
    }
}
