//! Motion engine for three soft RGB blobs.
//!
//! The engine is platform-free: front ends push pointer, tilt and press
//! events in, drive [`BlobEngine::tick`] and [`BlobEngine::step_interaction`]
//! from their own timers, and pull per-blob [`BlobTransform`]s out.

pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod input;
pub mod interaction;
pub mod profile;
pub mod shape;
pub mod transform;

pub use clock::*;
pub use config::*;
pub use engine::*;
pub use input::*;
pub use interaction::*;
pub use profile::*;
pub use shape::*;
pub use transform::*;
