//! Voltaic Desktop - the iced shell around the Voltaic animation engine.

pub mod canvas;
pub mod constants;
pub mod fps;
pub mod theme;

pub use canvas::{ParticleLayer, StormLayer};
pub use constants::*;
pub use fps::FpsCounter;
pub use theme::{hsla, palette, storm_theme, PaletteColors};
