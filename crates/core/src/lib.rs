//! Reacting Two-Phase Kinetics Core Library
//!
//! Chemical source terms and particle-gas exchange for a reacting two-phase flow:
//! two-step methane combustion in the gas, and thermal decomposition of hydrated
//! nitrate salt particles (dehydration, then denitration to an oxide residue).
//!
//! ## Kernels
//!
//! - Equivalence-ratio corrected Arrhenius rates for CH4 and CO oxidation
//! - Two-stage particle decomposition with mass-budget limiting
//! - Particle heat balance: convection, radiation, decomposition enthalpy
//! - Eddy dissipation concept closure with a high-temperature regime ramp
//! - Cell aggregation of particle exchange into volumetric source terms
//!
//! The host flow solver owns mesh, transport and particle tracking. It hands the kernel
//! cell and particle state through [`HostDomain`] and receives rates, source terms and
//! updated particles back.

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Physics kernels and orchestration
pub mod physics;
pub mod solver;

// Re-export core types
pub use core_types::{
    GasCellState, Kelvin, Kilograms, Meters, Particle, ParticleCompositionState,
    ParticleScratch, ParticleTransferState, Seconds, Species, SpeciesMassFractions, Vec3,
};

// Re-export configuration and errors
pub use config::{
    DecompositionParams, EdcParams, GasKineticsParams, KineticsConfig, ParticleHeatParams,
    SaltProperties,
};
pub use error::KineticsError;

// Re-export kernels
pub use physics::{
    calculate_phi, edc_closure, f1, f2, gas_reaction_rates, EdcClosureResult, MassTransferRates,
    ReactionRatePair, EDC_INFINITE_TIME_SCALE,
};

// Re-export orchestration
pub use solver::{
    CellDomain, CellSourceTerms, ConvectiveCoefficient, HostDomain, KineticsSession,
    PipelineOptions, SingleCellView, SourceEquation, SourceTerm, StepDiagnostics, StepOutput,
    StepPipeline,
};
