//! Simulation session: parameter set plus running diagnostic totals
//!
//! The totals are only ever advanced through [`KineticsSession::record`], which takes a
//! fully reduced [`StepDiagnostics`]. Parallel phases build their own partial sums and
//! hand the combined result over once, so no evaluation writes the totals directly.

use crate::config::KineticsConfig;
use crate::core_types::gas::GasCellState;
use crate::core_types::particle::Particle;
use crate::error::KineticsError;
use crate::physics::edc::{edc_closure_for_cell, EdcClosureResult};
use crate::physics::gas_combustion::{gas_reaction_rates, ReactionRatePair};
use crate::solver::aggregator::{aggregate_cell, CellSourceTerms, SourceEquation, SourceTerm};
use crate::solver::domain::HostDomain;
use crate::solver::lifecycle::{self, ParticleUpdate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Diagnostic counters and energy totals.
///
/// Used both for one step's reduction and for the session's running totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepDiagnostics {
    /// Heat released by gas-phase combustion (J)
    pub combustion_energy: f64,
    /// Heat absorbed by particle decomposition (J)
    pub decomposition_energy: f64,
    /// Reaction rates floored at zero
    pub clamp_events: u64,
    /// Particles whose dehydration hit the remaining-mass limit
    pub dehydration_limited: u64,
    /// Particles whose denitration hit the remaining-mass limit
    pub denitration_limited: u64,
    /// Particle updates performed
    pub particles_updated: u64,
    /// Cell aggregations performed
    pub cells_aggregated: u64,
}

impl StepDiagnostics {
    /// Combine two partial reductions
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            combustion_energy: self.combustion_energy + other.combustion_energy,
            decomposition_energy: self.decomposition_energy + other.decomposition_energy,
            clamp_events: self.clamp_events + other.clamp_events,
            dehydration_limited: self.dehydration_limited + other.dehydration_limited,
            denitration_limited: self.denitration_limited + other.denitration_limited,
            particles_updated: self.particles_updated + other.particles_updated,
            cells_aggregated: self.cells_aggregated + other.cells_aggregated,
        }
    }
}

/// Explicit simulation context passed into every host-facing evaluation.
#[derive(Debug, Clone)]
pub struct KineticsSession {
    config: KineticsConfig,
    totals: StepDiagnostics,
    steps: u64,
}

impl KineticsSession {
    /// Start a session with a validated parameter set
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::InvalidParameter`] when `config` fails validation.
    pub fn new(config: KineticsConfig) -> Result<Self, KineticsError> {
        config.validate()?;
        info!(
            "Kinetics session started: stoich ratio {:.3}, f_H2O {:.4}, f_gas {:.4}",
            config.gas.stoich_ratio,
            config.salt.stoich_h2o_fraction(),
            config.salt.stoich_gas_fraction()
        );
        Ok(Self {
            config,
            totals: StepDiagnostics::default(),
            steps: 0,
        })
    }

    /// Parameter set of this session
    pub fn config(&self) -> &KineticsConfig {
        &self.config
    }

    /// Running totals since the last reset
    pub fn totals(&self) -> StepDiagnostics {
        self.totals
    }

    /// Number of recorded pipeline steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Zero every running total
    pub fn reset(&mut self) {
        info!(
            "Kinetics session reset after {} steps (combustion {:.3e} J, decomposition {:.3e} J)",
            self.steps, self.totals.combustion_energy, self.totals.decomposition_energy
        );
        self.totals = StepDiagnostics::default();
        self.steps = 0;
    }

    /// Fold a reduced step into the running totals
    pub fn record(&mut self, diagnostics: StepDiagnostics) {
        self.totals = self.totals.merge(diagnostics);
    }

    /// Count one completed pipeline step
    pub(crate) fn finish_step(&mut self, diagnostics: StepDiagnostics) {
        self.record(diagnostics);
        self.steps += 1;
        debug!(
            step = self.steps,
            particles = diagnostics.particles_updated,
            cells = diagnostics.cells_aggregated,
            clamp_events = diagnostics.clamp_events,
            "step recorded"
        );
    }

    /// Particle creation hook: all mass becomes hydrate, transfer terms are cleared
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::InvalidParticle`] for a non-positive density or specific heat.
    pub fn initialize_particle(&self, particle: &mut Particle) -> Result<(), KineticsError> {
        lifecycle::initialize_particle(particle)
    }

    /// Advance one particle by `dt` and record its diagnostics
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::InvalidTimeStep`] or [`KineticsError::InvalidParticle`]
    /// for inputs the kernel cannot interpret.
    pub fn update_particle(
        &mut self,
        particle: &mut Particle,
        gas: &GasCellState,
        convective_coefficient: f64,
        dt: f64,
    ) -> Result<ParticleUpdate, KineticsError> {
        let update =
            lifecycle::update_particle(&self.config, particle, gas, convective_coefficient, dt)?;
        self.record(update.diagnostics);
        Ok(update)
    }

    /// All four volumetric sources of one cell from a single aggregation, with the
    /// cell's diagnostics recorded once
    ///
    /// # Errors
    ///
    /// Propagates cell lookup and volume errors from the aggregator.
    pub fn cell_sources<D: HostDomain>(
        &mut self,
        domain: &D,
        cell: usize,
        dt: f64,
    ) -> Result<CellSourceTerms, KineticsError> {
        let aggregation = aggregate_cell(&self.config, domain, cell, dt)?;
        self.record(aggregation.diagnostics);
        Ok(aggregation.sources)
    }

    /// Volumetric source of one equation in one cell, derivative always zero.
    ///
    /// Gas combustion diagnostics are recorded on the [`SourceEquation::Energy`] call
    /// only, so querying all four equations of a cell counts the cell once. Each call
    /// aggregates the cell again; [`KineticsSession::cell_sources`] returns all four.
    ///
    /// # Errors
    ///
    /// Propagates cell lookup and volume errors from the aggregator.
    pub fn source_term<D: HostDomain>(
        &mut self,
        domain: &D,
        cell: usize,
        equation: SourceEquation,
        dt: f64,
    ) -> Result<SourceTerm, KineticsError> {
        let aggregation = aggregate_cell(&self.config, domain, cell, dt)?;
        if equation == SourceEquation::Energy {
            self.record(aggregation.diagnostics);
        }
        Ok(SourceTerm::explicit(aggregation.sources.get(equation)))
    }

    /// Gas-phase rates of one cell with this session's parameters
    pub fn gas_reaction_rates(&self, cell: &GasCellState) -> ReactionRatePair {
        gas_reaction_rates(&self.config.gas, cell)
    }

    /// EDC closure of one cell with this session's parameters
    pub fn edc_closure(&self, cell: &GasCellState) -> EdcClosureResult {
        edc_closure_for_cell(&self.config.edc, cell)
    }
}
