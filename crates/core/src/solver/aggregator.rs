//! Cell source aggregation
//!
//! Turns the per-particle transfer records of one cell into volumetric sources for the
//! host's transport equations:
//!
//! ```text
//! S_energy = −Σ (Q_conv + Q_rad + Q_rxn) / V      W/m³
//! S_H2O    =  Σ ṁ_H2O / V                           kg/(m³·s)
//! S_NO2    =  Σ ṁ_NO2 / V
//! S_O2     =  Σ ṁ_O2  / V
//! ```
//!
//! Heat that enters a particle leaves the gas, hence the sign flip on the energy source.
//! The cell's own gas-phase rates are evaluated once per call and only contribute to the
//! combustion energy diagnostic. Aggregation reads the domain and never writes it, so
//! cells can be processed in parallel.

use crate::config::KineticsConfig;
use crate::core_types::particle::ParticleTransferState;
use crate::core_types::species::Species;
use crate::error::KineticsError;
use crate::physics::gas_combustion::gas_reaction_rates_checked;
use crate::solver::domain::HostDomain;
use crate::solver::session::StepDiagnostics;
use serde::{Deserialize, Serialize};

/// Transported equation receiving a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SourceEquation {
    /// Gas energy (W/m³)
    Energy = 0,
    /// Water vapour mass (kg/(m³·s))
    H2O = 1,
    /// Nitrogen dioxide mass (kg/(m³·s))
    NO2 = 2,
    /// Oxygen mass (kg/(m³·s))
    O2 = 3,
}

impl SourceEquation {
    /// Every equation, in storage order
    pub const ALL: [SourceEquation; 4] = [
        SourceEquation::Energy,
        SourceEquation::H2O,
        SourceEquation::NO2,
        SourceEquation::O2,
    ];

    /// Species transported by this equation, `None` for energy
    pub fn species(self) -> Option<Species> {
        match self {
            SourceEquation::Energy => None,
            SourceEquation::H2O => Some(Species::H2O),
            SourceEquation::NO2 => Some(Species::NO2),
            SourceEquation::O2 => Some(Species::O2),
        }
    }

    /// Decode the C ABI discriminant
    pub fn from_repr(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }
}

/// Source value and its derivative with respect to the solved variable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceTerm {
    /// Volumetric source
    pub value: f64,
    /// `∂S/∂φ`; always zero since every term is explicit
    pub derivative: f64,
}

impl SourceTerm {
    /// Explicit source with zero derivative
    #[inline]
    pub fn explicit(value: f64) -> Self {
        Self {
            value,
            derivative: 0.0,
        }
    }
}

/// The four volumetric sources of one cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellSourceTerms {
    /// W/m³
    pub energy: f64,
    /// kg/(m³·s)
    pub h2o: f64,
    /// kg/(m³·s)
    pub no2: f64,
    /// kg/(m³·s)
    pub o2: f64,
}

impl CellSourceTerms {
    /// Source of one equation
    #[inline]
    pub fn get(&self, equation: SourceEquation) -> f64 {
        match equation {
            SourceEquation::Energy => self.energy,
            SourceEquation::H2O => self.h2o,
            SourceEquation::NO2 => self.no2,
            SourceEquation::O2 => self.o2,
        }
    }
}

/// Sources of one cell plus its diagnostic contribution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellAggregation {
    /// Volumetric sources
    pub sources: CellSourceTerms,
    /// Combustion energy, clamp events and the cell count of this call
    pub diagnostics: StepDiagnostics,
}

/// Running sums over a cell's particle population
#[derive(Debug, Clone, Copy, Default)]
struct ParticleSums {
    heat: f64,
    h2o: f64,
    no2: f64,
    o2: f64,
}

impl ParticleSums {
    fn add(mut self, transfer: &ParticleTransferState) -> Self {
        self.heat += transfer.net_heat();
        self.h2o += transfer.h2o_rate;
        self.no2 += transfer.no2_rate;
        self.o2 += transfer.o2_rate;
        self
    }
}

/// Aggregate one cell.
///
/// `dt` only scales the combustion energy diagnostic; the sources are rates.
///
/// # Errors
///
/// Returns [`KineticsError::CellOutOfRange`] for an unknown cell and
/// [`KineticsError::InvalidCellVolume`] for a zero, negative or non-finite volume.
pub fn aggregate_cell<D: HostDomain>(
    config: &KineticsConfig,
    domain: &D,
    cell: usize,
    dt: f64,
) -> Result<CellAggregation, KineticsError> {
    let gas = domain.gas_state(cell).ok_or(KineticsError::CellOutOfRange {
        cell,
        count: domain.cell_count(),
    })?;
    let volume = gas.volume;
    if !(volume.is_finite() && volume > 0.0) {
        return Err(KineticsError::InvalidCellVolume { cell, volume });
    }

    let checked = gas_reaction_rates_checked(&config.gas, gas);
    let combustion_energy = checked.rates.heat_release_rate(&config.gas) * volume * dt;

    let sums = domain
        .resident_particles(cell)
        .fold(ParticleSums::default(), |sums, p| sums.add(&p.transfer));

    let inv_volume = 1.0 / volume;
    Ok(CellAggregation {
        sources: CellSourceTerms {
            energy: -sums.heat * inv_volume,
            h2o: sums.h2o * inv_volume,
            no2: sums.no2 * inv_volume,
            o2: sums.o2 * inv_volume,
        },
        diagnostics: StepDiagnostics {
            combustion_energy,
            clamp_events: u64::from(checked.clamp_events),
            cells_aggregated: 1,
            ..StepDiagnostics::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::gas::GasCellState;
    use crate::core_types::particle::Particle;
    use crate::core_types::species::SpeciesMassFractions;
    use crate::core_types::units::{Kelvin, Kilograms};
    use crate::solver::domain::{CellDomain, SingleCellView};
    use approx::assert_relative_eq;

    fn particle_with_transfer(id: u64, transfer: ParticleTransferState) -> Particle {
        let mut p = Particle::new(id, 0, Kelvin::new(700.0), Kilograms::new(1e-6), 1900.0, 1200.0);
        p.transfer = transfer;
        p
    }

    #[test]
    fn test_empty_inert_cell_has_zero_sources() {
        let mut gas = GasCellState::air(Kelvin::new(1500.0), 2e-6);
        gas.mass_fractions = SpeciesMassFractions::ZERO;
        let config = KineticsConfig::default();
        let view = SingleCellView::new(&gas, &[]);

        let result = aggregate_cell(&config, &view, 0, 0.01).unwrap();
        for eq in SourceEquation::ALL {
            assert_eq!(result.sources.get(eq), 0.0);
        }
        assert_eq!(result.diagnostics.combustion_energy, 0.0);
        assert_eq!(result.diagnostics.cells_aggregated, 1);
    }

    #[test]
    fn test_particle_sums_divided_by_volume() {
        let gas = GasCellState::air(Kelvin::new(1200.0), 1e-3);
        let t = ParticleTransferState {
            h2o_rate: 1e-9,
            no2_rate: 2e-9,
            o2_rate: 3e-10,
            convective_heat: 4e-3,
            radiative_heat: 1e-3,
            reaction_heat: -2e-3,
        };
        let particles = [particle_with_transfer(1, t), particle_with_transfer(2, t)];
        let config = KineticsConfig::default();
        let view = SingleCellView::new(&gas, &particles);
        let result = aggregate_cell(&config, &view, 0, 0.01).unwrap();

        assert_relative_eq!(result.sources.h2o, 2e-9 / 1e-3, max_relative = 1e-12);
        assert_relative_eq!(result.sources.no2, 4e-9 / 1e-3, max_relative = 1e-12);
        assert_relative_eq!(result.sources.o2, 6e-10 / 1e-3, max_relative = 1e-12);
        // Particles gained 3 mW each, the gas lost it
        assert_relative_eq!(result.sources.energy, -6e-3 / 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_combustion_diagnostic_scales_with_volume_and_dt() {
        let mut gas = GasCellState::air(Kelvin::new(1800.0), 1e-6);
        gas.density = 0.3;
        gas.mass_fractions = SpeciesMassFractions::from_pairs(&[
            (Species::CH4, 0.05),
            (Species::O2, 0.15),
            (Species::CO, 0.01),
            (Species::N2, 0.79),
        ]);
        let config = KineticsConfig::default();
        let view = SingleCellView::new(&gas, &[]);
        let a = aggregate_cell(&config, &view, 0, 0.01).unwrap();
        let b = aggregate_cell(&config, &view, 0, 0.02).unwrap();

        assert!(a.diagnostics.combustion_energy > 0.0);
        assert_relative_eq!(b.diagnostics.combustion_energy, 2.0 * a.diagnostics.combustion_energy);
        // Gas combustion never enters the particle-driven sources
        assert_eq!(a.sources, CellSourceTerms::default());
    }

    #[test]
    fn test_bad_volume_and_cell_rejected() {
        let config = KineticsConfig::default();
        let mut d = CellDomain::new(vec![GasCellState::air(Kelvin::new(900.0), 0.0)]);
        assert!(matches!(
            aggregate_cell(&config, &d, 0, 0.01),
            Err(KineticsError::InvalidCellVolume { cell: 0, .. })
        ));
        if let Some(cell) = d.cell_mut(0) {
            cell.volume = 1e-6;
        }
        assert_eq!(
            aggregate_cell(&config, &d, 3, 0.01),
            Err(KineticsError::CellOutOfRange { cell: 3, count: 1 })
        );
    }

    #[test]
    fn test_equation_discriminants() {
        assert_eq!(SourceEquation::from_repr(0), Some(SourceEquation::Energy));
        assert_eq!(SourceEquation::from_repr(3), Some(SourceEquation::O2));
        assert_eq!(SourceEquation::from_repr(4), None);
        assert_eq!(SourceEquation::NO2.species(), Some(Species::NO2));
        assert_eq!(SourceEquation::Energy.species(), None);
    }
}
