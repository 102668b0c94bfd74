//! Two-stage thermal decomposition of hydrated nitrate salt particles
//!
//! Dehydration and denitration are surface reactions on the particle. Each stage is an
//! Arrhenius rate constant scaled by the particle's external area and the mass fraction
//! of the reacting component:
//!
//! ```text
//! k_deh  = A_deh · exp(−E_deh/(R·T_p))
//! ṁ_H2O  = β · (m_hydrate/m_p) · η · π·d² · MW_H2O · k_deh
//!
//! k_den  = A_den · exp(−E_den/(R·T_p))
//! ṅ_salt = η · (m_salt/m_p) · π·d² · k_den
//! ṁ_NO2  = 2 · MW_NO2 · ṅ_salt,   ṁ_O2 = 0.5 · MW_O2 · ṅ_salt
//! ```
//!
//! # Mass-budget limiting
//!
//! A stage may not release more gas in one step than the stoichiometric content of the
//! component it consumes. When it would, the rate is rescaled to exactly
//! `available / dt`. Denitration scales NO2 and O2 by the same factor so their ratio
//! stays fixed.

use crate::config::{KineticsConfig, SaltProperties};
use crate::core_types::particle::{sphere_diameter, Particle};
use crate::core_types::species::Species;
use crate::core_types::units::Kilograms;
use crate::physics::arrhenius::arrhenius;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Gas release rates of one particle for one step (kg/s)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassTransferRates {
    /// Water vapour from dehydration
    pub h2o: f64,
    /// NO2 from denitration
    pub no2: f64,
    /// O2 from denitration
    pub o2: f64,
    /// Dehydration was cut back to the remaining hydrate's water content
    pub dehydration_limited: bool,
    /// Denitration was cut back to the remaining salt's gas content
    pub denitration_limited: bool,
}

impl MassTransferRates {
    /// Denitration gases, NO2 + O2 (kg/s)
    #[inline]
    pub fn denitration_gas(&self) -> f64 {
        self.no2 + self.o2
    }

    /// All released gas (kg/s)
    #[inline]
    pub fn total(&self) -> f64 {
        self.h2o + self.denitration_gas()
    }
}

/// Rescale `rate` so that `rate·dt` does not exceed `available`.
///
/// Returns the possibly reduced rate and whether the limit was applied.
#[inline]
fn limit_to_budget(rate: f64, available: f64, dt: f64) -> (f64, bool) {
    if rate * dt > available {
        (available.max(0.0) / dt, true)
    } else {
        (rate, false)
    }
}

/// H2O release rate (kg/s) and whether it was budget-limited
pub fn dehydration_rate(config: &KineticsConfig, particle: &Particle, dt: f64) -> (f64, bool) {
    let params = &config.decomposition;
    let hydrate = particle.composition.hydrate_mass;
    if hydrate <= params.active_mass_threshold {
        return (0.0, false);
    }

    let k_deh = arrhenius(
        params.dehydration_pre_exponential,
        params.dehydration_activation_energy,
        *particle.temperature,
    );
    let rate = params.dehydration_yield
        * particle.hydrate_fraction()
        * params.effectiveness
        * particle.surface_area()
        * Species::H2O.molecular_weight()
        * k_deh;

    let available = hydrate * config.salt.stoich_h2o_fraction();
    limit_to_budget(rate, available, dt)
}

/// NO2 and O2 release rates (kg/s) and whether they were budget-limited
pub fn denitration_rates(
    config: &KineticsConfig,
    particle: &Particle,
    dt: f64,
) -> (f64, f64, bool) {
    let params = &config.decomposition;
    let salt_props = &config.salt;
    let salt = particle.composition.anhydrous_salt_mass;
    if salt <= params.active_mass_threshold {
        return (0.0, 0.0, false);
    }

    let k_den = arrhenius(
        params.denitration_pre_exponential,
        params.denitration_activation_energy,
        *particle.temperature,
    );
    // mol of salt formula units decomposing per second
    let molar_rate =
        params.effectiveness * particle.salt_fraction() * particle.surface_area() * k_den;
    let no2 = salt_props.no2_per_formula * Species::NO2.molecular_weight() * molar_rate;
    let o2 = salt_props.o2_per_formula * Species::O2.molecular_weight() * molar_rate;

    let combined = no2 + o2;
    let available = salt * salt_props.stoich_gas_fraction();
    let (limited, was_limited) = limit_to_budget(combined, available, dt);
    if !was_limited || combined <= 0.0 {
        return (no2, o2, false);
    }
    let scale = limited / combined;
    (no2 * scale, o2 * scale, true)
}

/// Compute both stages for one particle over a step of `dt` seconds.
///
/// Reads the particle only; the returned rates are the hand-off to
/// [`apply_mass_transfer`] and to the heat balance.
pub fn decomposition_rates(
    config: &KineticsConfig,
    particle: &Particle,
    dt: f64,
) -> MassTransferRates {
    let (h2o, dehydration_limited) = dehydration_rate(config, particle, dt);
    let (no2, o2, denitration_limited) = denitration_rates(config, particle, dt);

    if dehydration_limited || denitration_limited {
        trace!(
            particle = particle.id,
            dehydration_limited,
            denitration_limited,
            "decomposition limited by remaining mass"
        );
    }

    MassTransferRates {
        h2o,
        no2,
        o2,
        dehydration_limited,
        denitration_limited,
    }
}

/// Advance particle mass, diameter and composition by one step of released gas.
///
/// ```text
/// hydrate consumed = H2O released / stoich_h2o_fraction
/// salt formed      = hydrate consumed − H2O released
/// salt consumed    = (NO2 + O2) released / stoich_gas_fraction
/// oxide formed     = salt consumed − (NO2 + O2) released
/// ```
///
/// Total composition mass falls by exactly the released gas mass. Components are floored
/// at zero afterwards; with limited rates the floor only absorbs round-off.
pub fn apply_mass_transfer(
    salt_props: &SaltProperties,
    particle: &mut Particle,
    rates: &MassTransferRates,
    dt: f64,
) {
    let h2o_released = rates.h2o * dt;
    let gas_released = rates.denitration_gas() * dt;

    let mass = Kilograms::saturating(*particle.mass - h2o_released - gas_released);
    particle.mass = mass;
    particle.diameter = sphere_diameter(mass, particle.density);

    let composition = &mut particle.composition;

    let hydrate_consumed = h2o_released / salt_props.stoich_h2o_fraction();
    composition.hydrate_mass -= hydrate_consumed;
    composition.anhydrous_salt_mass += hydrate_consumed - h2o_released;

    let salt_consumed = gas_released / salt_props.stoich_gas_fraction();
    composition.anhydrous_salt_mass -= salt_consumed;
    composition.oxide_mass += salt_consumed - gas_released;

    composition.clamp_non_negative();
}
