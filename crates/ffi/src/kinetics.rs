//! Per-particle and per-cell kernel entry points.
//!
//! Every function returns an `RfErrorCode`; on failure the message is available from
//! `rf_get_last_error` and output records are left untouched. Kernel evaluation only
//! reads the session's fixed parameter set; the totals lock is taken afterwards to fold
//! the result in.

use crate::error::{DefaultRfError, RfErrorCode};
use crate::helpers::{handle_ffi_result, read_ptr, session_from_ptr, write_ptr};
use crate::session::RfSession;
use crate::types::{
    RfCellSources, RfEdcResult, RfGasCell, RfParticle, RfReactionRates, RfSourceTerm,
};
use reacting_flow_core::physics::edc_closure_for_cell;
use reacting_flow_core::solver::{aggregate_cell, initialize_particle, update_particle};
use reacting_flow_core::{
    calculate_phi, gas_reaction_rates, CellSourceTerms, Particle, SingleCellView,
    SourceEquation, SourceTerm,
};
use std::slice;

/// Particle creation hook: all mass becomes hydrate, diameter follows from mass and
/// density, and the scratch buffer is reset.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `particle` must be null or point to a valid, writable `RfParticle`.
#[no_mangle]
pub unsafe extern "C" fn rf_particle_init(
    session: *const RfSession,
    particle: *mut RfParticle,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let record = unsafe { write_ptr(particle, "particle") }?;

        let mut core = record.to_core(0)?;
        initialize_particle(&mut core)?;
        record.store(&core);
        Ok(())
    })
}

/// Advance one particle by `dt` seconds in the given gas cell.
///
/// Updates mass, diameter and the scratch buffer in place. The particle temperature is
/// NOT integrated; the net heat into the particle (W) is written to `out_net_heat` when
/// that pointer is non-null.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `particle` must be null or point to a valid, writable `RfParticle`.
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `out_net_heat` may be null; otherwise it must point to writable `f64` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_particle_update(
    session: *const RfSession,
    particle: *mut RfParticle,
    gas: *const RfGasCell,
    convective_coefficient: f64,
    dt: f64,
    out_net_heat: *mut f64,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let record = unsafe { write_ptr(particle, "particle") }?;
        // SAFETY: forwarded caller contract
        let gas = unsafe { read_ptr(gas, "gas") }?.to_core()?;
        if !(convective_coefficient.is_finite() && convective_coefficient >= 0.0) {
            return Err(DefaultRfError::invalid_parameter(
                "convective_coefficient",
                convective_coefficient,
            ));
        }

        let mut core = record.to_core(0)?;
        let update =
            update_particle(&session.config, &mut core, &gas, convective_coefficient, dt)?;
        session.record(update.diagnostics)?;
        record.store(&core);

        // SAFETY: null is allowed, otherwise forwarded caller contract
        if let Some(net_heat) = unsafe { out_net_heat.as_mut() } {
            *net_heat = update.net_heat;
        }
        Ok(())
    })
}

/// Aggregate the sources of one cell from its gas state and resident particle records,
/// folding the cell's diagnostics into the session totals when `record` is set.
///
/// # Safety
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `particles` must point to `count` valid `RfParticle` records (or be null with `count == 0`).
unsafe fn evaluate_cell(
    session: &RfSession,
    gas: *const RfGasCell,
    particles: *const RfParticle,
    count: usize,
    dt: f64,
    record: bool,
) -> Result<CellSourceTerms, DefaultRfError> {
    // SAFETY: forwarded caller contract
    let gas = unsafe { read_ptr(gas, "gas") }?.to_core()?;
    let records: &[RfParticle] = if count == 0 {
        &[]
    } else if particles.is_null() {
        return Err(DefaultRfError::null_pointer("particles"));
    } else {
        // SAFETY: non-null, caller guarantees `count` valid records
        unsafe { slice::from_raw_parts(particles, count) }
    };
    let resident = records
        .iter()
        .map(|record| record.to_core(0))
        .collect::<Result<Vec<Particle>, _>>()?;

    let view = SingleCellView::new(&gas, &resident);
    let aggregation = aggregate_cell(&session.config, &view, 0, dt)?;
    if record {
        session.record(aggregation.diagnostics)?;
    }
    Ok(aggregation.sources)
}

/// All four volumetric sources of a single cell from one aggregation.
///
/// Energy is in W/m³, the H2O, NO2 and O2 sources in kg/(m³·s); every derivative is
/// zero. `particles` lists the particles resident in the cell; it may be null when
/// `count` is 0. The cell's energy diagnostics are added to the session totals.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `particles` must point to `count` valid `RfParticle` records (or be null with `count == 0`).
/// - `out` must be null or point to writable `RfCellSources` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_cell_sources(
    session: *const RfSession,
    gas: *const RfGasCell,
    particles: *const RfParticle,
    count: usize,
    dt: f64,
    out: *mut RfCellSources,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let out = unsafe { write_ptr(out, "out") }?;
        // SAFETY: forwarded caller contract
        *out = unsafe { evaluate_cell(session, gas, particles, count, dt, true) }?.into();
        Ok(())
    })
}

/// Volumetric source of one equation for a single cell.
///
/// `equation` is 0 energy (W/m³), 1 H2O, 2 NO2, 3 O2 (kg/(m³·s)). `particles` lists the
/// particles resident in the cell; it may be null when `count` is 0. Querying the energy
/// equation also adds the cell's energy diagnostics to the session totals. Hosts that
/// need all four equations should prefer `rf_cell_sources`, which aggregates once.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `particles` must point to `count` valid `RfParticle` records (or be null with `count == 0`).
/// - `out` must be null or point to writable `RfSourceTerm` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_source_term(
    session: *const RfSession,
    gas: *const RfGasCell,
    particles: *const RfParticle,
    count: usize,
    equation: u8,
    dt: f64,
    out: *mut RfSourceTerm,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let out = unsafe { write_ptr(out, "out") }?;
        let equation = SourceEquation::from_repr(equation)
            .ok_or_else(|| DefaultRfError::invalid_equation(equation))?;

        let record = equation == SourceEquation::Energy;
        // SAFETY: forwarded caller contract
        let sources = unsafe { evaluate_cell(session, gas, particles, count, dt, record) }?;
        *out = SourceTerm::explicit(sources.get(equation)).into();
        Ok(())
    })
}

/// Rates of the two global gas-phase steps in one cell (mol/(m³·s)).
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `out` must be null or point to writable `RfReactionRates` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_gas_reaction_rates(
    session: *const RfSession,
    gas: *const RfGasCell,
    out: *mut RfReactionRates,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let gas = unsafe { read_ptr(gas, "gas") }?.to_core()?;
        // SAFETY: forwarded caller contract
        let out = unsafe { write_ptr(out, "out") }?;
        *out = gas_reaction_rates(&session.config.gas, &gas).into();
        Ok(())
    })
}

/// EDC reacting fraction and mixing time scale of one cell.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `gas` must be null or point to a valid `RfGasCell`.
/// - `out` must be null or point to writable `RfEdcResult` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_edc_closure(
    session: *const RfSession,
    gas: *const RfGasCell,
    out: *mut RfEdcResult,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let gas = unsafe { read_ptr(gas, "gas") }?.to_core()?;
        // SAFETY: forwarded caller contract
        let out = unsafe { write_ptr(out, "out") }?;
        *out = edc_closure_for_cell(&session.config.edc, &gas).into();
        Ok(())
    })
}

/// Equivalence ratio from fuel and oxidizer mass fractions.
///
/// Returns the oxidizer-starved value 100 when the oxidizer fraction is below 1e-10.
#[no_mangle]
pub extern "C" fn rf_calculate_phi(fuel_mass_fraction: f64, oxidizer_mass_fraction: f64) -> f64 {
    calculate_phi(fuel_mass_fraction, oxidizer_mass_fraction)
}
