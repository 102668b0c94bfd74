//! Two-step methane combustion rates
//!
//! ```text
//! q1 = A1 · f1(φ) · exp(−E1/(R·T)) · [CH4]^0.5 · [O2]^0.65
//! q2 = A2 · f2(φ) · exp(−E2/(R·T)) · T^0.8 · [CO]^1.0 · [O2]^0.5
//! ```
//!
//! Concentrations are `ρ·y/MW` in mol/m³, rates in mol/(m³·s). Orders and constants
//! come from [`GasKineticsParams`].

use crate::config::GasKineticsParams;
use crate::core_types::gas::GasCellState;
use crate::core_types::species::Species;
use crate::physics::arrhenius::arrhenius;
use crate::physics::kinetics_correction::{calculate_phi_with, f1, f2};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rates of the two global steps (mol/(m³·s)), both non-negative
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionRatePair {
    /// CH4 + 1.5 O2 → CO + 2 H2O
    pub fuel_oxidation: f64,
    /// CO + 0.5 O2 → CO2
    pub intermediate_oxidation: f64,
}

impl ReactionRatePair {
    /// Volumetric heat release of both steps (W/m³)
    #[inline]
    pub fn heat_release_rate(&self, params: &GasKineticsParams) -> f64 {
        self.fuel_oxidation * params.fuel_oxidation_enthalpy
            + self.intermediate_oxidation * params.co_oxidation_enthalpy
    }
}

/// Rates plus the number of results that had to be floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct CheckedRates {
    pub(crate) rates: ReactionRatePair,
    pub(crate) clamp_events: u32,
}

/// Fuel oxidation rate `q1` for one cell (mol/(m³·s)), before flooring
#[inline]
pub fn fuel_oxidation_rate_raw(params: &GasKineticsParams, cell: &GasCellState) -> f64 {
    let t = *cell.temperature;
    let phi = calculate_phi_with(params, cell.y(Species::CH4), cell.y(Species::O2));
    arrhenius(params.fuel_pre_exponential, params.fuel_activation_energy, t)
        * f1(phi)
        * cell.concentration(Species::CH4).powf(params.fuel_order_fuel)
        * cell.concentration(Species::O2).powf(params.fuel_order_oxidizer)
}

/// CO oxidation rate `q2` for one cell (mol/(m³·s)), before flooring
#[inline]
pub fn intermediate_oxidation_rate_raw(params: &GasKineticsParams, cell: &GasCellState) -> f64 {
    let t = *cell.temperature;
    let phi = calculate_phi_with(params, cell.y(Species::CH4), cell.y(Species::O2));
    arrhenius(params.co_pre_exponential, params.co_activation_energy, t)
        * f2(phi)
        * t.powf(params.co_temperature_exponent)
        * cell.concentration(Species::CO).powf(params.co_order_co)
        * cell.concentration(Species::O2).powf(params.co_order_oxidizer)
}

/// Floor a raw rate at zero, reporting whether the floor was needed.
///
/// Negative or non-finite rates do not arise from physical inputs; reaching this branch
/// points at a bad upstream state, so it is logged rather than absorbed silently.
#[inline]
fn floor_rate(raw: f64, step: &'static str, cell: &GasCellState) -> (f64, bool) {
    if raw.is_finite() && raw >= 0.0 {
        (raw, false)
    } else {
        warn!(
            step,
            raw,
            temperature = *cell.temperature,
            density = cell.density,
            "non-physical reaction rate floored at zero"
        );
        (0.0, true)
    }
}

pub(crate) fn gas_reaction_rates_checked(
    params: &GasKineticsParams,
    cell: &GasCellState,
) -> CheckedRates {
    let (fuel_oxidation, fuel_clamped) =
        floor_rate(fuel_oxidation_rate_raw(params, cell), "fuel_oxidation", cell);
    let (intermediate_oxidation, co_clamped) = floor_rate(
        intermediate_oxidation_rate_raw(params, cell),
        "intermediate_oxidation",
        cell,
    );
    CheckedRates {
        rates: ReactionRatePair {
            fuel_oxidation,
            intermediate_oxidation,
        },
        clamp_events: u32::from(fuel_clamped) + u32::from(co_clamped),
    }
}

/// Evaluate both global steps for one cell.
///
/// Pure function of the cell state; both rates are non-negative.
pub fn gas_reaction_rates(params: &GasKineticsParams, cell: &GasCellState) -> ReactionRatePair {
    gas_reaction_rates_checked(params, cell).rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GAS_CONSTANT;
    use crate::core_types::species::SpeciesMassFractions;
    use crate::core_types::units::Kelvin;
    use approx::assert_relative_eq;

    fn methane_cell(t: f64, y_ch4: f64, y_o2: f64, y_co: f64, rho: f64) -> GasCellState {
        let mut cell = GasCellState::air(Kelvin::new(t), 1e-6);
        cell.density = rho;
        cell.mass_fractions = SpeciesMassFractions::from_pairs(&[
            (Species::CH4, y_ch4),
            (Species::O2, y_o2),
            (Species::CO, y_co),
            (Species::N2, 1.0 - y_ch4 - y_o2 - y_co),
        ]);
        cell
    }

    #[test]
    fn test_fuel_rate_matches_closed_form() {
        let params = GasKineticsParams::default();
        let cell = methane_cell(1800.0, 0.05, 0.15, 0.0, 0.3);

        let phi = calculate_phi_with(&params, 0.05, 0.15);
        let c_ch4 = 0.3 * 0.05 / Species::CH4.molecular_weight();
        let c_o2 = 0.3 * 0.15 / Species::O2.molecular_weight();
        let expected = params.fuel_pre_exponential
            * f1(phi)
            * (-params.fuel_activation_energy / (GAS_CONSTANT * 1800.0)).exp()
            * c_ch4.powf(0.5)
            * c_o2.powf(0.65);

        let rates = gas_reaction_rates(&params, &cell);
        assert_relative_eq!(rates.fuel_oxidation, expected, max_relative = 1e-12);
        // No CO in the cell, so the second step is idle
        assert_eq!(rates.intermediate_oxidation, 0.0);
    }

    #[test]
    fn test_rates_non_negative_over_temperature_sweep() {
        let params = GasKineticsParams::default();
        for t in [1.0, 300.0, 900.0, 1500.0, 2200.0, 3000.0] {
            for (y_ch4, y_o2, y_co) in [(0.0, 0.23, 0.0), (0.05, 0.2, 0.01), (0.3, 0.0, 0.1)] {
                let rates = gas_reaction_rates(&params, &methane_cell(t, y_ch4, y_o2, y_co, 0.5));
                assert!(rates.fuel_oxidation >= 0.0);
                assert!(rates.intermediate_oxidation >= 0.0);
            }
        }
    }

    #[test]
    fn test_oxidizer_starved_cell_does_not_react() {
        let params = GasKineticsParams::default();
        let rates = gas_reaction_rates(&params, &methane_cell(2000.0, 0.5, 0.0, 0.1, 0.3));
        assert_eq!(rates.fuel_oxidation, 0.0);
        assert_eq!(rates.intermediate_oxidation, 0.0);
    }

    #[test]
    fn test_rates_increase_with_temperature() {
        let params = GasKineticsParams::default();
        let cold = gas_reaction_rates(&params, &methane_cell(1200.0, 0.05, 0.2, 0.02, 0.3));
        let hot = gas_reaction_rates(&params, &methane_cell(1800.0, 0.05, 0.2, 0.02, 0.3));
        assert!(hot.fuel_oxidation > cold.fuel_oxidation);
        assert!(hot.intermediate_oxidation > cold.intermediate_oxidation);
    }

    #[test]
    fn test_non_finite_rate_is_floored_and_counted() {
        let params = GasKineticsParams {
            fuel_pre_exponential: f64::NAN,
            ..GasKineticsParams::default()
        };
        let cell = methane_cell(1800.0, 0.05, 0.15, 0.0, 0.3);
        let checked = gas_reaction_rates_checked(&params, &cell);
        assert_eq!(checked.rates.fuel_oxidation, 0.0);
        assert_eq!(checked.clamp_events, 1);
    }

    #[test]
    fn test_heat_release_uses_both_steps() {
        let params = GasKineticsParams::default();
        let rates = ReactionRatePair {
            fuel_oxidation: 2.0,
            intermediate_oxidation: 3.0,
        };
        let q = rates.heat_release_rate(&params);
        assert_relative_eq!(
            q,
            2.0 * params.fuel_oxidation_enthalpy + 3.0 * params.co_oxidation_enthalpy
        );
    }
}
