//! C-compatible mirrors of the core records
//!
//! All quantities are SI. Species arrays follow the core storage order
//! `CH4, O2, CO, CO2, H2O, NO2, N2`.

use crate::error::DefaultRfError;
use reacting_flow_core::core_types::particle::SCRATCH_SLOTS;
use reacting_flow_core::core_types::species::Species;
use reacting_flow_core::{
    CellSourceTerms, EdcClosureResult, GasCellState, Kelvin, Kilograms, Meters, Particle,
    ParticleScratch, ReactionRatePair, SourceTerm, StepDiagnostics, Vec3,
};

/// Number of species in `RfGasCell::mass_fractions`
pub const RF_SPECIES_COUNT: usize = 7;

/// Number of slots in `RfParticle::scratch`
pub const RF_SCRATCH_SLOTS: usize = 9;

const _: () = assert!(RF_SPECIES_COUNT == Species::COUNT);
const _: () = assert!(RF_SCRATCH_SLOTS == SCRATCH_SLOTS);

fn finite_non_negative(name: &str, value: f64) -> Result<f64, DefaultRfError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DefaultRfError::invalid_parameter(name, value))
    }
}

/// Gas state of one control volume
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RfGasCell {
    /// K
    pub temperature: f64,
    /// kg/m³
    pub density: f64,
    /// Mass fractions, core species order
    pub mass_fractions: [f64; RF_SPECIES_COUNT],
    /// m/s
    pub velocity: [f64; 3],
    /// m³
    pub volume: f64,
    /// m²/s²
    pub turbulent_kinetic_energy: f64,
    /// m²/s³
    pub dissipation_rate: f64,
    /// m²/s
    pub kinematic_viscosity: f64,
    /// W/(m·K)
    pub thermal_conductivity: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
}

impl RfGasCell {
    pub(crate) fn to_core(self) -> Result<GasCellState, DefaultRfError> {
        Ok(GasCellState {
            temperature: Kelvin::new(finite_non_negative("gas.temperature", self.temperature)?),
            density: finite_non_negative("gas.density", self.density)?,
            mass_fractions: self.mass_fractions.into(),
            velocity: Vec3::from(self.velocity),
            volume: self.volume,
            turbulent_kinetic_energy: self.turbulent_kinetic_energy,
            dissipation_rate: self.dissipation_rate,
            kinematic_viscosity: self.kinematic_viscosity,
            thermal_conductivity: self.thermal_conductivity,
            specific_heat: self.specific_heat,
        })
    }
}

impl From<&GasCellState> for RfGasCell {
    fn from(cell: &GasCellState) -> Self {
        Self {
            temperature: *cell.temperature,
            density: cell.density,
            mass_fractions: cell.mass_fractions.to_array(),
            velocity: [cell.velocity.x, cell.velocity.y, cell.velocity.z],
            volume: cell.volume,
            turbulent_kinetic_energy: cell.turbulent_kinetic_energy,
            dissipation_rate: cell.dissipation_rate,
            kinematic_viscosity: cell.kinematic_viscosity,
            thermal_conductivity: cell.thermal_conductivity,
            specific_heat: cell.specific_heat,
        }
    }
}

/// Host particle record with its nine-slot scratch buffer.
///
/// Scratch layout: 0 hydrate, 1 anhydrous salt, 2 oxide (kg); 3 H2O, 4 NO2, 5 O2
/// release (kg/s); 6 convective, 7 radiative, 8 reaction heat (W).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RfParticle {
    pub id: u64,
    /// K
    pub temperature: f64,
    /// kg
    pub mass: f64,
    /// m
    pub diameter: f64,
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
    /// m/s
    pub velocity: [f64; 3],
    pub scratch: [f64; RF_SCRATCH_SLOTS],
}

impl RfParticle {
    /// Core particle resident in `cell`
    pub(crate) fn to_core(self, cell: usize) -> Result<Particle, DefaultRfError> {
        let (composition, transfer) = ParticleScratch(self.scratch).unpack();
        Ok(Particle {
            id: self.id,
            cell,
            temperature: Kelvin::new(finite_non_negative(
                "particle.temperature",
                self.temperature,
            )?),
            mass: Kilograms::new(finite_non_negative("particle.mass", self.mass)?),
            diameter: Meters::new(finite_non_negative("particle.diameter", self.diameter)?),
            density: self.density,
            specific_heat: self.specific_heat,
            velocity: Vec3::from(self.velocity),
            composition,
            transfer,
        })
    }

    /// Copy the mutable state of a core particle back into this record
    pub(crate) fn store(&mut self, particle: &Particle) {
        self.temperature = *particle.temperature;
        self.mass = *particle.mass;
        self.diameter = *particle.diameter;
        self.scratch = ParticleScratch::pack(&particle.composition, &particle.transfer).0;
    }
}

/// Rates of the two global gas steps (mol/(m³·s))
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfReactionRates {
    pub fuel_oxidation: f64,
    pub intermediate_oxidation: f64,
}

impl From<ReactionRatePair> for RfReactionRates {
    fn from(rates: ReactionRatePair) -> Self {
        Self {
            fuel_oxidation: rates.fuel_oxidation,
            intermediate_oxidation: rates.intermediate_oxidation,
        }
    }
}

/// EDC fine-structure fraction and time scale
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfEdcResult {
    pub reacting_volume_fraction: f64,
    /// s; 1e30 when no fine structures exist
    pub mixing_time_scale: f64,
    /// `fraction / time scale` (1/s)
    pub exchange_rate: f64,
}

impl From<EdcClosureResult> for RfEdcResult {
    fn from(result: EdcClosureResult) -> Self {
        Self {
            reacting_volume_fraction: result.reacting_volume_fraction,
            mixing_time_scale: result.mixing_time_scale,
            exchange_rate: result.exchange_rate(),
        }
    }
}

/// Volumetric source and its derivative (always zero)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfSourceTerm {
    pub value: f64,
    pub derivative: f64,
}

impl From<SourceTerm> for RfSourceTerm {
    fn from(term: SourceTerm) -> Self {
        Self {
            value: term.value,
            derivative: term.derivative,
        }
    }
}

/// The four volumetric sources of one cell
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfCellSources {
    /// W/m³
    pub energy: RfSourceTerm,
    /// kg/(m³·s)
    pub h2o: RfSourceTerm,
    /// kg/(m³·s)
    pub no2: RfSourceTerm,
    /// kg/(m³·s)
    pub o2: RfSourceTerm,
}

impl From<CellSourceTerms> for RfCellSources {
    fn from(sources: CellSourceTerms) -> Self {
        Self {
            energy: SourceTerm::explicit(sources.energy).into(),
            h2o: SourceTerm::explicit(sources.h2o).into(),
            no2: SourceTerm::explicit(sources.no2).into(),
            o2: SourceTerm::explicit(sources.o2).into(),
        }
    }
}

/// Session running totals
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RfDiagnostics {
    /// J
    pub combustion_energy: f64,
    /// J
    pub decomposition_energy: f64,
    pub clamp_events: u64,
    pub dehydration_limited: u64,
    pub denitration_limited: u64,
    pub particles_updated: u64,
    pub cells_aggregated: u64,
}

impl From<StepDiagnostics> for RfDiagnostics {
    fn from(d: StepDiagnostics) -> Self {
        Self {
            combustion_energy: d.combustion_energy,
            decomposition_energy: d.decomposition_energy,
            clamp_events: d.clamp_events,
            dehydration_limited: d.dehydration_limited,
            denitration_limited: d.denitration_limited,
            particles_updated: d.particles_updated,
            cells_aggregated: d.cells_aggregated,
        }
    }
}
