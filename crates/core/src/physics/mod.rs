//! Physics kernels: gas kinetics, particle decomposition and heat exchange, EDC closure
//!
//! Every function here is a pure computation on borrowed state. Orchestration, step
//! ordering and diagnostics live in [`crate::solver`].

pub mod arrhenius;
pub mod convection;
pub mod decomposition;
pub mod edc;
pub mod gas_combustion;
pub mod kinetics_correction;
pub mod particle_heat;

pub use arrhenius::arrhenius;
pub use convection::{particle_reynolds, ranz_marshall_coefficient, ranz_marshall_nusselt};
pub use decomposition::{
    apply_mass_transfer, decomposition_rates, dehydration_rate, denitration_rates,
    MassTransferRates,
};
pub use edc::{
    edc_closure, edc_closure_for_cell, regime_multiplier, EdcClosureResult,
    EDC_INFINITE_TIME_SCALE,
};
pub use gas_combustion::{gas_reaction_rates, ReactionRatePair};
pub use kinetics_correction::{calculate_phi, calculate_phi_with, f1, f2};
pub use particle_heat::{heat_balance, temperature_rate};
