//! Heat exchange of a decomposing particle with its cell
//!
//! ```text
//! Q_conv = h · A_p · (T_g − T_p)
//! Q_rad  = ε · A_p · σ · (T_g⁴ − T_p⁴)
//! Q_rxn  = −ṁ_H2O · ΔH_deh / f_H2O − ṁ_NO2 · ΔH_den / f_NO2
//! ```
//!
//! Positive terms heat the particle. `f_H2O` and `f_NO2` are the stoichiometric release
//! fractions, so `ṁ/f` is the rate at which the parent component is consumed.
//!
//! # References
//! - Incropera, F.P., DeWitt, D.P. (2002). "Fundamentals of Heat and Mass Transfer", 5th ed.

use crate::config::{KineticsConfig, STEFAN_BOLTZMANN};
use crate::core_types::particle::{Particle, ParticleTransferState};
use crate::core_types::units::Kelvin;
use crate::physics::decomposition::MassTransferRates;

/// Convective heat into the particle (W)
#[inline]
pub fn convective_heat(
    h: f64,
    area: f64,
    gas_temperature: Kelvin,
    particle_temperature: Kelvin,
) -> f64 {
    h * area * (gas_temperature - particle_temperature)
}

/// Net radiative heat into the particle from surroundings at the gas temperature (W)
#[inline]
pub fn radiative_heat(
    emissivity: f64,
    area: f64,
    gas_temperature: Kelvin,
    particle_temperature: Kelvin,
) -> f64 {
    emissivity * area * STEFAN_BOLTZMANN * (gas_temperature.pow4() - particle_temperature.pow4())
}

/// Decomposition enthalpy drawn from the particle (W, never positive)
#[inline]
pub fn reaction_heat(config: &KineticsConfig, rates: &MassTransferRates) -> f64 {
    let decomposition = &config.decomposition;
    let salt = &config.salt;
    -(rates.h2o * decomposition.dehydration_enthalpy / salt.stoich_h2o_fraction())
        - (rates.no2 * decomposition.denitration_enthalpy / salt.stoich_no2_fraction())
}

/// Full transfer record for one particle and step.
///
/// `particle` should already carry this step's mass and diameter; the exchange area is
/// taken from its current diameter. `h` is the convective coefficient in W/(m²·K).
pub fn heat_balance(
    config: &KineticsConfig,
    particle: &Particle,
    gas_temperature: Kelvin,
    h: f64,
    rates: &MassTransferRates,
) -> ParticleTransferState {
    let area = particle.surface_area();
    ParticleTransferState {
        h2o_rate: rates.h2o,
        no2_rate: rates.no2,
        o2_rate: rates.o2,
        convective_heat: convective_heat(h, area, gas_temperature, particle.temperature),
        radiative_heat: radiative_heat(
            config.heat.emissivity,
            area,
            gas_temperature,
            particle.temperature,
        ),
        reaction_heat: reaction_heat(config, rates),
    }
}

/// Lumped temperature rate `Q/(m·cp)` (K/s); zero for a massless particle
#[inline]
pub fn temperature_rate(particle: &Particle, net_heat: f64) -> f64 {
    let heat_capacity = *particle.mass * particle.specific_heat;
    if heat_capacity > 0.0 {
        net_heat / heat_capacity
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::Kilograms;
    use approx::assert_relative_eq;

    fn particle_at(t: f64) -> Particle {
        Particle::new(0, 0, Kelvin::new(t), Kilograms::new(1e-6), 1900.0, 1200.0)
    }

    #[test]
    fn test_isothermal_particle_exchanges_nothing() {
        let config = KineticsConfig::default();
        let p = particle_at(900.0);
        let rates = MassTransferRates::default();
        let state = heat_balance(&config, &p, Kelvin::new(900.0), 150.0, &rates);
        assert_eq!(state.convective_heat, 0.0);
        assert_eq!(state.radiative_heat, 0.0);
        assert_eq!(state.reaction_heat, 0.0);
        assert_eq!(state.net_heat(), 0.0);
    }

    #[test]
    fn test_hot_gas_heats_particle() {
        let config = KineticsConfig::default();
        let p = particle_at(650.0);
        let rates = MassTransferRates::default();
        let state = heat_balance(&config, &p, Kelvin::new(1200.0), 150.0, &rates);

        let area = p.surface_area();
        assert_relative_eq!(state.convective_heat, 150.0 * area * 550.0, max_relative = 1e-12);
        let expected_rad = 0.85 * area * STEFAN_BOLTZMANN * (1200f64.powi(4) - 650f64.powi(4));
        assert_relative_eq!(state.radiative_heat, expected_rad, max_relative = 1e-12);
        assert!(state.net_heat() > 0.0);
    }

    #[test]
    fn test_decomposition_cools_particle() {
        let config = KineticsConfig::default();
        let rates = MassTransferRates {
            h2o: 1e-9,
            no2: 2e-9,
            o2: 0.35e-9,
            ..MassTransferRates::default()
        };
        let q = reaction_heat(&config, &rates);
        let expected = -(1e-9 * 5.5e5 / config.salt.stoich_h2o_fraction())
            - (2e-9 * 2.25e6 / config.salt.stoich_no2_fraction());
        assert!(q < 0.0);
        assert_relative_eq!(q, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_transfer_record_carries_mass_rates() {
        let config = KineticsConfig::default();
        let rates = MassTransferRates {
            h2o: 3e-9,
            no2: 1e-10,
            o2: 2e-11,
            ..MassTransferRates::default()
        };
        let state = heat_balance(&config, &particle_at(700.0), Kelvin::new(700.0), 0.0, &rates);
        assert_eq!(state.h2o_rate, 3e-9);
        assert_eq!(state.no2_rate, 1e-10);
        assert_eq!(state.o2_rate, 2e-11);
        assert_eq!(state.net_heat(), state.reaction_heat);
    }

    #[test]
    fn test_temperature_rate_of_massless_particle() {
        let mut p = particle_at(700.0);
        p.mass = Kilograms::ZERO;
        assert_eq!(temperature_rate(&p, 1.0), 0.0);
    }
}
