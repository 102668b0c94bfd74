//! Explicit step ordering: particle phase, then cell aggregation
//!
//! ```text
//! particles (parallel): decomposition → mass/diameter update → heat balance
//!                       → ParticleTransferState stored on the particle
//! cells     (parallel): read resident transfer states + cell gas → CellSourceTerms
//! session             : record the reduced StepDiagnostics once
//! ```
//!
//! Each phase reduces its diagnostics per worker and combines them after the phase
//! completes; the session totals are touched once per step.

use crate::core_types::units::Seconds;
use crate::error::{check_time_step, KineticsError};
use crate::physics::convection::ranz_marshall_coefficient;
use crate::solver::aggregator::{aggregate_cell, CellSourceTerms};
use crate::solver::domain::{CellDomain, HostDomain};
use crate::solver::lifecycle::{advance_temperature, update_particle};
use crate::solver::session::{KineticsSession, StepDiagnostics};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Source of the particle convective coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConvectiveCoefficient {
    /// Host-supplied constant `h` (W/(m²·K))
    Fixed(f64),
    /// Ranz-Marshall correlation from slip velocity and cell transport properties
    RanzMarshall,
}

/// Pipeline behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Integrate particle temperature with the net heat after each update
    pub integrate_particle_temperature: bool,
    /// How `h` is obtained for each particle
    pub convective_coefficient: ConvectiveCoefficient,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            integrate_particle_temperature: true,
            convective_coefficient: ConvectiveCoefficient::RanzMarshall,
        }
    }
}

/// Result of one pipeline step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepOutput {
    /// Sources indexed by cell
    pub sources: Vec<CellSourceTerms>,
    /// Reduced diagnostics of this step
    pub diagnostics: StepDiagnostics,
}

/// Runs one kinetics step over a [`CellDomain`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StepPipeline {
    options: PipelineOptions,
}

impl StepPipeline {
    /// Pipeline with the given options
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Advance every particle, then aggregate every cell.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::InvalidTimeStep`] for a zero step, or the first particle
    /// or cell error encountered. On a particle error the particle phase may have
    /// partially run; the session totals are left untouched.
    pub fn run(
        &self,
        session: &mut KineticsSession,
        domain: &mut CellDomain,
        dt: Seconds,
    ) -> Result<StepOutput, KineticsError> {
        let dt = dt.value();
        check_time_step(dt)?;

        let particle_diagnostics = self.particle_phase(session, domain, dt)?;
        domain.rebuild_index();
        let (sources, cell_diagnostics) = Self::cell_phase(session, domain, dt)?;

        let diagnostics = particle_diagnostics.merge(cell_diagnostics);
        session.finish_step(diagnostics);
        debug!(
            "Step {}: {} particles, {} cells, combustion {:.3e} J, decomposition {:.3e} J",
            session.steps(),
            diagnostics.particles_updated,
            diagnostics.cells_aggregated,
            diagnostics.combustion_energy,
            diagnostics.decomposition_energy
        );

        Ok(StepOutput {
            sources,
            diagnostics,
        })
    }

    fn particle_phase(
        &self,
        session: &KineticsSession,
        domain: &mut CellDomain,
        dt: f64,
    ) -> Result<StepDiagnostics, KineticsError> {
        let config = session.config();
        let options = self.options;
        let (cells, particles) = domain.split_mut();
        let cell_count = cells.len();

        particles
            .par_iter_mut()
            .map(|particle| {
                let gas = cells.get(particle.cell).ok_or(KineticsError::CellOutOfRange {
                    cell: particle.cell,
                    count: cell_count,
                })?;
                let h = match options.convective_coefficient {
                    ConvectiveCoefficient::Fixed(h) => h,
                    ConvectiveCoefficient::RanzMarshall => ranz_marshall_coefficient(particle, gas),
                };
                let update = update_particle(config, particle, gas, h, dt)?;
                if options.integrate_particle_temperature {
                    advance_temperature(particle, update.net_heat, dt);
                }
                Ok(update.diagnostics)
            })
            .try_reduce(StepDiagnostics::default, |a, b| Ok(a.merge(b)))
    }

    fn cell_phase(
        session: &KineticsSession,
        domain: &CellDomain,
        dt: f64,
    ) -> Result<(Vec<CellSourceTerms>, StepDiagnostics), KineticsError> {
        let config = session.config();
        let aggregations = (0..domain.cell_count())
            .into_par_iter()
            .map(|cell| aggregate_cell(config, domain, cell, dt))
            .collect::<Result<Vec<_>, _>>()?;

        let diagnostics = aggregations
            .iter()
            .fold(StepDiagnostics::default(), |acc, a| acc.merge(a.diagnostics));
        let sources = aggregations.into_iter().map(|a| a.sources).collect();
        Ok((sources, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KineticsConfig;
    use crate::core_types::gas::GasCellState;
    use crate::core_types::particle::Particle;
    use crate::core_types::units::{Kelvin, Kilograms};

    fn two_cell_domain() -> CellDomain {
        let mut domain = CellDomain::new(vec![
            GasCellState::air(Kelvin::new(1200.0), 1e-6),
            GasCellState::air(Kelvin::new(300.0), 1e-6),
        ]);
        for id in 0..8 {
            let cell = (id % 2) as usize;
            let p =
                Particle::new(id, cell, Kelvin::new(650.0), Kilograms::new(1e-7), 1900.0, 1200.0);
            domain.insert_particle(p).unwrap();
        }
        domain
    }

    #[test]
    fn test_zero_step_rejected_without_side_effects() {
        let mut session = KineticsSession::new(KineticsConfig::default()).unwrap();
        let mut domain = two_cell_domain();
        let before = domain.particles().to_vec();
        let err = StepPipeline::default().run(&mut session, &mut domain, Seconds::new(0.0));
        assert_eq!(err, Err(KineticsError::InvalidTimeStep(0.0)));
        assert_eq!(domain.particles(), before.as_slice());
        assert_eq!(session.steps(), 0);
    }

    #[test]
    fn test_step_counts_particles_and_cells() {
        let mut session = KineticsSession::new(KineticsConfig::default()).unwrap();
        let mut domain = two_cell_domain();
        let out = StepPipeline::default()
            .run(&mut session, &mut domain, Seconds::new(0.01))
            .unwrap();

        assert_eq!(out.sources.len(), 2);
        assert_eq!(out.diagnostics.particles_updated, 8);
        assert_eq!(out.diagnostics.cells_aggregated, 2);
        assert_eq!(session.steps(), 1);
        assert_eq!(session.totals(), out.diagnostics);

        // Hot cell: particles draw heat and release water
        assert!(out.sources[0].energy < 0.0);
        assert!(out.sources[0].h2o > 0.0);
        // Cold cell: particles lose heat to the gas
        assert!(out.sources[1].energy > 0.0);
    }

    #[test]
    fn test_fixed_coefficient_without_temperature_integration() {
        let mut session = KineticsSession::new(KineticsConfig::default()).unwrap();
        let mut domain = two_cell_domain();
        let pipeline = StepPipeline::new(PipelineOptions {
            integrate_particle_temperature: false,
            convective_coefficient: ConvectiveCoefficient::Fixed(50.0),
        });
        pipeline.run(&mut session, &mut domain, Seconds::new(0.01)).unwrap();
        assert!(domain.particles().iter().all(|p| *p.temperature == 650.0));
    }
}
