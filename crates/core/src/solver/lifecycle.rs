//! Particle lifecycle: creation hook and per-step update
//!
//! One update runs the three kernels in a fixed order:
//!
//! 1. [`decomposition_rates`] reads the particle as it stood at the start of the step
//! 2. [`apply_mass_transfer`] removes the released gas and shrinks the particle
//! 3. [`heat_balance`] evaluates the exchange on the updated particle
//!
//! The resulting [`ParticleTransferState`] is stored on the particle for the aggregator.

use crate::config::KineticsConfig;
use crate::core_types::gas::GasCellState;
use crate::core_types::particle::{
    sphere_diameter, Particle, ParticleCompositionState, ParticleTransferState,
};
use crate::core_types::units::Kelvin;
use crate::error::{check_time_step, KineticsError};
use crate::physics::decomposition::{apply_mass_transfer, decomposition_rates, MassTransferRates};
use crate::physics::particle_heat::{heat_balance, temperature_rate};
use crate::solver::session::StepDiagnostics;

/// Outcome of one particle update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleUpdate {
    /// Release rates used for the step
    pub rates: MassTransferRates,
    /// Transfer record written to the particle
    pub transfer: ParticleTransferState,
    /// Net heat into the particle (W), for the host's energy integrator
    pub net_heat: f64,
    /// This particle's diagnostic contribution
    pub diagnostics: StepDiagnostics,
}

fn check_particle(particle: &Particle) -> Result<(), KineticsError> {
    let invalid = |reason: String| KineticsError::InvalidParticle {
        id: particle.id,
        reason,
    };
    if !(particle.density.is_finite() && particle.density > 0.0) {
        return Err(invalid(format!("density must be positive, got {}", particle.density)));
    }
    if !(particle.specific_heat.is_finite() && particle.specific_heat > 0.0) {
        return Err(invalid(format!(
            "specific heat must be positive, got {}",
            particle.specific_heat
        )));
    }
    if !particle.mass.is_finite() {
        return Err(invalid(format!("mass must be finite, got {}", *particle.mass)));
    }
    Ok(())
}

/// Reset a freshly created particle: all mass is hydrate, diameter follows from mass
/// and density, transfer terms are cleared.
///
/// # Errors
///
/// Returns [`KineticsError::InvalidParticle`] for a non-positive density or specific heat.
pub fn initialize_particle(particle: &mut Particle) -> Result<(), KineticsError> {
    check_particle(particle)?;
    particle.composition = ParticleCompositionState::all_hydrate(particle.mass);
    particle.transfer = ParticleTransferState::default();
    particle.diameter = sphere_diameter(particle.mass, particle.density);
    Ok(())
}

/// Advance one particle by `dt`: decompose, shrink, then evaluate heat exchange with
/// the convective coefficient `h` (W/(m²·K)).
///
/// Particle temperature is left to the host; see [`advance_temperature`].
///
/// # Errors
///
/// Returns [`KineticsError::InvalidTimeStep`] for a non-positive `dt` and
/// [`KineticsError::InvalidParticle`] for a particle with non-physical properties.
pub fn update_particle(
    config: &KineticsConfig,
    particle: &mut Particle,
    gas: &GasCellState,
    h: f64,
    dt: f64,
) -> Result<ParticleUpdate, KineticsError> {
    check_time_step(dt)?;
    check_particle(particle)?;

    let rates = decomposition_rates(config, particle, dt);
    apply_mass_transfer(&config.salt, particle, &rates, dt);
    let transfer = heat_balance(config, particle, gas.temperature, h, &rates);
    particle.transfer = transfer;

    Ok(ParticleUpdate {
        rates,
        transfer,
        net_heat: transfer.net_heat(),
        diagnostics: StepDiagnostics {
            decomposition_energy: -transfer.reaction_heat * dt,
            dehydration_limited: u64::from(rates.dehydration_limited),
            denitration_limited: u64::from(rates.denitration_limited),
            particles_updated: 1,
            ..StepDiagnostics::default()
        },
    })
}

/// Explicit lumped-capacity temperature step, floored at 0 K
pub fn advance_temperature(particle: &mut Particle, net_heat: f64, dt: f64) {
    let next = *particle.temperature + temperature_rate(particle, net_heat) * dt;
    particle.temperature = Kelvin::new(next.max(0.0));
}
