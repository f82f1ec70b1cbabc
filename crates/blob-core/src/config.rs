//! User-facing controls consumed by the engine and the render sink.
//!
//! The engine only reads these values. Ranges are enforced by whatever UI
//! produces them; out-of-range values simply flow through the arithmetic.

use crate::constants::{PORTRAIT_BLUR_FACTOR, PORTRAIT_SIZE_FACTOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid controls json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which feature set the engine runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineVariant {
    /// One fixed input multiplier per blob, no rotation, no aspect breathing.
    Classic,
    /// Random signed per-axis multipliers, rotation and aspect breathing.
    #[default]
    Extended,
}

/// Press pop tuning. Kept separate so the web and native front ends can share it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressParams {
    pub pop_scale: f32,
    pub offset_gain: f32,
    pub pop_fraction: f32,
}

impl Default for PressParams {
    fn default() -> Self {
        Self {
            pop_scale: 1.15,
            offset_gain: 30.0,
            pop_fraction: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlobControls {
    pub blur_amount: f32,
    pub blob_size: f32,
    pub movement_sensitivity: f32,
    pub animation_speed: f32,
    pub color_opacity: f32,
    pub motion_range: f32,
    pub size_change_range: f32,
    pub background_color: String,
    pub container_padding: f32,
    pub blend_mode: String,
    pub rotation_speed: f32,
    /// Engage duration in seconds.
    pub interaction_intensity: f32,
    pub aspect_ratio_variation: f32,
    pub engine: EngineVariant,
    pub press: PressParams,
}

impl Default for BlobControls {
    fn default() -> Self {
        Self {
            blur_amount: 80.0,
            blob_size: 500.0,
            movement_sensitivity: 50.0,
            animation_speed: 1.0,
            color_opacity: 0.8,
            motion_range: 100.0,
            size_change_range: 20.0,
            background_color: "#000000".to_string(),
            container_padding: 0.0,
            blend_mode: "screen".to_string(),
            rotation_speed: 1.0,
            interaction_intensity: 0.3,
            aspect_ratio_variation: 10.0,
            engine: EngineVariant::Extended,
            press: PressParams::default(),
        }
    }
}

impl BlobControls {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Shrink blob size and blur when the viewport is taller than wide.
    ///
    /// This is a pure configuration step; the transform math never looks at
    /// the viewport.
    pub fn for_viewport(&self, width: f32, height: f32) -> BlobControls {
        let mut out = self.clone();
        if height > width {
            out.blob_size *= PORTRAIT_SIZE_FACTOR;
            out.blur_amount *= PORTRAIT_BLUR_FACTOR;
        }
        out
    }

    pub fn visual_params(&self) -> VisualParams {
        VisualParams {
            size: self.blob_size,
            blur: self.blur_amount,
            opacity: self.color_opacity,
            blend_mode: self.blend_mode.clone(),
            background: self.background_color.clone(),
            padding: self.container_padding,
        }
    }
}

/// Everything the render sink needs besides per-blob transforms.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualParams {
    pub size: f32,
    pub blur: f32,
    pub opacity: f32,
    pub blend_mode: String,
    pub background: String,
    pub padding: f32,
}

impl VisualParams {
    /// CSS radial gradient for one blob color: full opacity at the center,
    /// 80% at 30%, transparent from 70%.
    pub fn radial_gradient(&self, rgb: [u8; 3]) -> String {
        let [r, g, b] = rgb;
        format!(
            "radial-gradient(circle, rgba({r},{g},{b},{}) 0%, rgba({r},{g},{b},{}) 30%, rgba({r},{g},{b},0) 70%)",
            self.opacity,
            self.opacity * 0.8
        )
    }
}
