//! Core types: unit newtypes, species, gas cell and particle records

pub mod gas;
pub mod particle;
pub mod species;
pub mod units;
pub mod vec3;

pub use gas::GasCellState;
pub use particle::{
    Particle, ParticleCompositionState, ParticleScratch, ParticleTransferState, SCRATCH_SLOTS,
};
pub use species::{Species, SpeciesMassFractions};
pub use units::*;
pub use vec3::Vec3;
