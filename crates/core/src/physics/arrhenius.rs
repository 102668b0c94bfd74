//! Arrhenius rate constants shared by the gas and particle kernels

use crate::config::GAS_CONSTANT;

/// Rate constant `A·exp(−E/(R·T))`; zero at or below 0 K
#[inline(always)]
pub fn arrhenius(pre_exponential: f64, activation_energy: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    pre_exponential * (-activation_energy / (GAS_CONSTANT * temperature)).exp()
}
