//! Equivalence-ratio corrections for the two-step methane mechanism
//!
//! A two-step scheme cannot reproduce laminar flame speeds on both sides of
//! stoichiometry with constant pre-exponentials. The corrections `f1(φ)` and `f2(φ)`
//! multiply the pre-exponentials of the fuel and CO steps respectively and are built
//! from tanh sigmoids:
//!
//! ```text
//! f1(φ) = 2 / [ (1 + tanh((φ0,1 − φ)/σ0,1))
//!             + B1 (1 + tanh((φ − φ1,1)/σ1,1))
//!             + C1 (1 + tanh((φ − φ2,1)/σ2,1)) ]
//!
//! f2(φ) = ½ (1 + tanh((φ0,2 − φ)/σ0,2))
//!       + ½ B2 (1 + tanh((φ − φ1,2)/σ1,2))
//!       + ½ C2 (1 + tanh((φ − φ2,2)/σ2,2)) (1 + tanh((φ3,2 − φ)/σ3,2))
//! ```
//!
//! # References
//! - Franzelli, B., Riber, E., Gicquel, L.Y.M., Poinsot, T. (2012). "Large Eddy
//!   Simulation of combustion instabilities in a lean partially premixed swirled flame."
//!   Combustion and Flame, 159(2), 621-637.

use crate::config::GasKineticsParams;

/// Stoichiometric O2/CH4 mass ratio used by [`calculate_phi`]
pub const STOICH_RATIO: f64 = 2.0 * 31.998 / 16.043;

/// Oxidizer mass fraction below which the cell is treated as oxidizer-starved
pub const OXIDIZER_THRESHOLD: f64 = 1e-10;

/// φ reported for an oxidizer-starved cell
pub const PHI_OXIDIZER_STARVED: f64 = 100.0;

// f1 fit
const PHI0_1: f64 = 1.1;
const SIGMA0_1: f64 = 0.09;
const B1: f64 = 0.37;
const PHI1_1: f64 = 1.13;
const SIGMA1_1: f64 = 0.03;
const C1: f64 = 6.7;
const PHI2_1: f64 = 1.6;
const SIGMA2_1: f64 = 0.22;

// f2 fit
const PHI0_2: f64 = 0.95;
const SIGMA0_2: f64 = 0.08;
const B2: f64 = 2.0e-4;
const PHI1_2: f64 = 1.45;
const SIGMA1_2: f64 = 0.04;
const C2: f64 = 0.1;
const PHI2_2: f64 = 1.2;
const SIGMA2_2: f64 = 0.04;
const PHI3_2: f64 = 1.2;
const SIGMA3_2: f64 = 0.05;

/// Rising sigmoid `1 + tanh((φ − centre)/width)`, in [0, 2]
#[inline(always)]
fn rising(phi: f64, centre: f64, width: f64) -> f64 {
    1.0 + ((phi - centre) / width).tanh()
}

/// Falling sigmoid `1 + tanh((centre − φ)/width)`, in [0, 2]
#[inline(always)]
fn falling(phi: f64, centre: f64, width: f64) -> f64 {
    1.0 + ((centre - phi) / width).tanh()
}

/// Fuel-step correction. Equals 1 on the lean side and falls off past φ ≈ 1.1.
///
/// Strictly positive for every φ: the `C1` branch saturates at 2·C1 on the rich side,
/// so the denominator never reaches zero.
#[inline]
pub fn f1(phi: f64) -> f64 {
    let denominator = falling(phi, PHI0_1, SIGMA0_1)
        + B1 * rising(phi, PHI1_1, SIGMA1_1)
        + C1 * rising(phi, PHI2_1, SIGMA2_1);
    2.0 / denominator
}

/// CO-step correction. Equals 1 on the lean side, decays past φ ≈ 0.95 with a bump
/// near φ ≈ 1.2 and a small rich-side floor `B2`.
#[inline]
pub fn f2(phi: f64) -> f64 {
    0.5 * falling(phi, PHI0_2, SIGMA0_2)
        + 0.5 * B2 * rising(phi, PHI1_2, SIGMA1_2)
        + 0.5 * C2 * rising(phi, PHI2_2, SIGMA2_2) * falling(phi, PHI3_2, SIGMA3_2)
}

/// Equivalence ratio from CH4 and O2 mass fractions with the built-in constants.
///
/// Returns exactly [`PHI_OXIDIZER_STARVED`] when `y_oxidizer` is below
/// [`OXIDIZER_THRESHOLD`], whatever the fuel fraction.
#[inline]
pub fn calculate_phi(y_fuel: f64, y_oxidizer: f64) -> f64 {
    phi_from_fractions(
        y_fuel,
        y_oxidizer,
        STOICH_RATIO,
        OXIDIZER_THRESHOLD,
        PHI_OXIDIZER_STARVED,
    )
}

/// Equivalence ratio using a session's parameter set
#[inline]
pub fn calculate_phi_with(params: &GasKineticsParams, y_fuel: f64, y_oxidizer: f64) -> f64 {
    phi_from_fractions(
        y_fuel,
        y_oxidizer,
        params.stoich_ratio,
        params.oxidizer_threshold,
        params.phi_oxidizer_starved,
    )
}

#[inline]
fn phi_from_fractions(
    y_fuel: f64,
    y_oxidizer: f64,
    stoich_ratio: f64,
    threshold: f64,
    starved: f64,
) -> f64 {
    if y_oxidizer < threshold {
        return starved;
    }
    (y_fuel.max(0.0) / y_oxidizer) * stoich_ratio
}
