mod particle_layer;
mod storm_layer;

pub use particle_layer::ParticleLayer;
pub use storm_layer::StormLayer;
