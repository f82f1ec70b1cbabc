use crate::constants::{SHAPE_BASE, SHAPE_COEFFS, SHAPE_SEEDS, SHAPE_VARIATION};

/// Eight border-radius percentages giving a blob its slightly irregular
/// outline. Order: four horizontal radii, then four vertical radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams(pub [f32; 8]);

impl ShapeParams {
    /// Deterministic outline for `seed`. Even slots use `sin`, odd slots `cos`.
    pub fn from_seed(seed: f32) -> Self {
        Self(std::array::from_fn(|i| {
            let arg = seed * SHAPE_COEFFS[i];
            let wobble = if i % 2 == 0 { arg.sin() } else { arg.cos() };
            SHAPE_BASE[i] + SHAPE_VARIATION * wobble
        }))
    }

    pub fn for_blob(blob: usize) -> Self {
        Self::from_seed(SHAPE_SEEDS.get(blob).copied().unwrap_or(SHAPE_SEEDS[0]))
    }

    /// CSS `border-radius` value, e.g. `"48% 52% ... / 50% ..."`.
    pub fn css_border_radius(&self) -> String {
        let p = &self.0;
        format!(
            "{}% {}% {}% {}% / {}% {}% {}% {}%",
            p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]
        )
    }
}
