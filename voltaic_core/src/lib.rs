//! Voltaic core: simulation engine for ambient desktop visuals.
//!
//! Two independent subsystems share the per-frame scheduling contract the
//! desktop shell provides:
//!
//! - [`ParticleField`] advances a fixed-size particle collection every tick
//!   (pointer force, damping, wrap-around, minimum-speed floor) and computes
//!   proximity links.
//! - [`LightningEngine`] synthesizes randomly routed, branching bolts on a
//!   jittered schedule and fades them out over ~20 frames.
//!
//! Everything here is UI-free and deterministic under an injected RNG; the
//! iced shell in `voltaic_desktop` does the drawing.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod storm;

pub use color::Rgba;
pub use config::{EffectsConfig, LightningSettings, ParticleSettings};
pub use error::{CoreError, CoreResult};
pub use field::{Link, Particle, ParticleField};
pub use storm::{BoltOptions, BoltPoint, BoltScheduler, LightningBolt, LightningEngine};
