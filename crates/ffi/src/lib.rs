//! C ABI for the reacting-flow kinetics kernel.
//!
//! A host CFD code creates one [`RfSession`] and calls the per-particle and per-cell
//! entry points from its own loops. All functions return an [`RfErrorCode`]; the message
//! for the last failure on the calling thread is available from `rf_get_last_error`.

mod error;
mod helpers;
mod kinetics;
mod session;
mod types;

pub use error::{rf_get_last_error, rf_get_last_error_code, RfErrorCode};
pub use kinetics::{
    rf_calculate_phi, rf_cell_sources, rf_edc_closure, rf_gas_reaction_rates, rf_particle_init,
    rf_particle_update, rf_source_term,
};
pub use session::{
    rf_session_create, rf_session_destroy, rf_session_diagnostics, rf_session_reset, RfSession,
};
pub use types::{
    RfCellSources, RfDiagnostics, RfEdcResult, RfGasCell, RfParticle, RfReactionRates,
    RfSourceTerm, RF_SCRATCH_SLOTS, RF_SPECIES_COUNT,
};
