//! Gas-phase kinetics and EDC closure checked against closed forms and bounds
//!
//! Covers the equivalence-ratio corrections, the two global CH4/CO steps and the
//! fine-structure closure over a wide spread of inputs.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reacting_flow_core::config::{EdcParams, GasKineticsParams, GAS_CONSTANT};
use reacting_flow_core::physics::edc::regime_multiplier;
use reacting_flow_core::{
    calculate_phi, edc_closure, f1, f2, gas_reaction_rates, GasCellState, Kelvin, Species,
    SpeciesMassFractions, EDC_INFINITE_TIME_SCALE,
};

fn methane_cell(temperature: f64, density: f64, y_fuel: f64, y_oxidizer: f64) -> GasCellState {
    let mut cell = GasCellState::air(Kelvin::new(temperature), 1e-6);
    cell.density = density;
    cell.mass_fractions = SpeciesMassFractions::from_pairs(&[
        (Species::CH4, y_fuel),
        (Species::O2, y_oxidizer),
        (Species::N2, (1.0 - y_fuel - y_oxidizer).max(0.0)),
    ]);
    cell
}

#[test]
fn test_correction_factors_never_flip_sign() {
    for i in 0..=4000 {
        let phi = f64::from(i) * 0.005;
        assert!(f1(phi) > 0.0, "f1({phi}) = {}", f1(phi));
        assert!(f2(phi) >= 0.0, "f2({phi}) = {}", f2(phi));
    }
    // Oxidizer-starved sentinel
    assert!(f1(100.0) > 0.0);
    assert!(f2(100.0) >= 0.0);
}

#[test]
fn test_phi_sentinel_independent_of_fuel() {
    for y_fuel in [0.0, 1e-6, 0.05, 0.5, 1.0] {
        assert_eq!(calculate_phi(y_fuel, 0.0), 100.0);
        assert_eq!(calculate_phi(y_fuel, 9.9e-11), 100.0);
    }
}

#[test]
fn test_phi_stoichiometric_mixture_is_one() {
    let params = GasKineticsParams::default();
    let y_oxidizer = 0.2;
    let y_fuel = y_oxidizer / params.stoich_ratio;
    assert_relative_eq!(calculate_phi(y_fuel, y_oxidizer), 1.0, max_relative = 1e-12);
}

#[test]
fn test_fuel_oxidation_closed_form_at_1800k() {
    let params = GasKineticsParams::default();
    let cell = methane_cell(1800.0, 0.3, 0.05, 0.15);

    let c_fuel = 0.3 * 0.05 / Species::CH4.molecular_weight();
    let c_oxidizer = 0.3 * 0.15 / Species::O2.molecular_weight();
    let phi = calculate_phi(0.05, 0.15);
    let expected = params.fuel_pre_exponential
        * f1(phi)
        * (-params.fuel_activation_energy / (GAS_CONSTANT * 1800.0)).exp()
        * c_fuel.powf(0.5)
        * c_oxidizer.powf(0.65);

    let rates = gas_reaction_rates(&params, &cell);
    assert_relative_eq!(rates.fuel_oxidation, expected, max_relative = 1e-12);
    // No CO present
    assert_eq!(rates.intermediate_oxidation, 0.0);
}

#[test]
fn test_gas_rates_non_negative_over_random_states() {
    let params = GasKineticsParams::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..2000 {
        let temperature = rng.random_range(250.0..3500.0);
        let density = rng.random_range(0.05..3.0);
        let mut fractions = [0.0; Species::COUNT];
        for y in &mut fractions {
            *y = rng.random_range(0.0..1.0);
        }
        let sum: f64 = fractions.iter().sum();
        for y in &mut fractions {
            *y /= sum;
        }

        let mut cell = GasCellState::air(Kelvin::new(temperature), 1e-6);
        cell.density = density;
        cell.mass_fractions = SpeciesMassFractions::from(fractions);

        let rates = gas_reaction_rates(&params, &cell);
        assert!(rates.fuel_oxidation.is_finite() && rates.fuel_oxidation >= 0.0);
        assert!(rates.intermediate_oxidation.is_finite() && rates.intermediate_oxidation >= 0.0);
    }
}

#[test]
fn test_rates_vanish_without_oxygen() {
    let params = GasKineticsParams::default();
    let mut cell = methane_cell(2000.0, 0.2, 0.1, 0.0);
    cell.mass_fractions[Species::CO] = 0.05;
    let rates = gas_reaction_rates(&params, &cell);
    assert_eq!(rates.fuel_oxidation, 0.0);
    assert_eq!(rates.intermediate_oxidation, 0.0);
}

#[test]
fn test_edc_degenerate_turbulence_for_any_viscosity() {
    let params = EdcParams::default();
    for nu in [0.0, 1e-6, 1.5e-4, 10.0] {
        let result = edc_closure(&params, 0.0, 25.0, nu, 1800.0);
        assert_eq!(result.reacting_volume_fraction, 0.0);
        assert_eq!(result.mixing_time_scale, EDC_INFINITE_TIME_SCALE);

        let result = edc_closure(&params, 2.0, 0.0, nu, 1800.0);
        assert_eq!(result.reacting_volume_fraction, 0.0);
        assert_eq!(result.mixing_time_scale, EDC_INFINITE_TIME_SCALE);
    }
}

#[test]
fn test_edc_regime_ramp_scales_constants() {
    let params = EdcParams::default();
    let (k, eps, nu) = (1.0, 10.0, 1.5e-4);

    let cold = edc_closure(&params, k, eps, nu, 1000.0);
    let hot = edc_closure(&params, k, eps, nu, 2500.0);
    let m = regime_multiplier(&params, 2500.0);
    assert_relative_eq!(m, params.regime_max_multiplier, max_relative = 1e-12);

    let gamma = params.c_xi * (nu * eps / (k * k)).powf(0.25);
    assert_relative_eq!(cold.reacting_volume_fraction, gamma * gamma, max_relative = 1e-12);
    assert_relative_eq!(
        hot.reacting_volume_fraction,
        (gamma * m).powi(2),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        hot.mixing_time_scale,
        cold.mixing_time_scale / m,
        max_relative = 1e-12
    );
}

#[test]
fn test_edc_fraction_saturates_at_one() {
    let params = EdcParams::default();
    // Very weak turbulence relative to viscosity gives γ > 1
    let result = edc_closure(&params, 1e-3, 1.0, 1.0, 1000.0);
    assert_eq!(result.reacting_volume_fraction, 1.0);
    assert!(result.mixing_time_scale.is_finite());
}
