//! Gas-phase species tracked by the kinetics kernel
//!
//! The mechanism is the two-step methane scheme
//!
//! ```text
//! CH4 + 1.5 O2 -> CO + 2 H2O      (fuel oxidation)
//! CO  + 0.5 O2 -> CO2             (intermediate oxidation)
//! ```
//!
//! plus the gases released by particle decomposition (H2O, NO2, O2). N2 is carried as
//! the inert balance species.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Gas species, in storage order of [`SpeciesMassFractions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Species {
    /// Methane (fuel)
    CH4 = 0,
    /// Oxygen (oxidizer)
    O2 = 1,
    /// Carbon monoxide (intermediate)
    CO = 2,
    /// Carbon dioxide
    CO2 = 3,
    /// Water vapour
    H2O = 4,
    /// Nitrogen dioxide
    NO2 = 5,
    /// Nitrogen (inert balance)
    N2 = 6,
}

impl Species {
    /// Number of tracked species
    pub const COUNT: usize = 7;

    /// All species in storage order
    pub const ALL: [Species; Self::COUNT] = [
        Species::CH4,
        Species::O2,
        Species::CO,
        Species::CO2,
        Species::H2O,
        Species::NO2,
        Species::N2,
    ];

    /// Molecular weight in kg/mol
    #[inline]
    pub const fn molecular_weight(self) -> f64 {
        match self {
            Species::CH4 => 16.043e-3,
            Species::O2 => 31.998e-3,
            Species::CO => 28.010e-3,
            Species::CO2 => 44.009e-3,
            Species::H2O => 18.015e-3,
            Species::NO2 => 46.005e-3,
            Species::N2 => 28.014e-3,
        }
    }
}

/// Per-cell species mass fractions, indexed by [`Species`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesMassFractions([f64; Species::COUNT]);

impl SpeciesMassFractions {
    /// All fractions zero
    pub const ZERO: SpeciesMassFractions = SpeciesMassFractions([0.0; Species::COUNT]);

    /// Build from (species, fraction) pairs; unlisted species are zero.
    pub fn from_pairs(pairs: &[(Species, f64)]) -> Self {
        let mut fractions = Self::ZERO;
        for &(species, y) in pairs {
            fractions[species] = y;
        }
        fractions
    }

    /// Dry air: 23.3% O2 by mass, balance N2
    pub fn air() -> Self {
        Self::from_pairs(&[(Species::O2, 0.233), (Species::N2, 0.767)])
    }

    /// Molar concentration `ρ·y/MW` in mol/m³.
    ///
    /// Negative fractions (solver undershoot) are treated as zero so fractional
    /// reaction orders never see a negative base.
    #[inline]
    pub fn concentration(&self, species: Species, density: f64) -> f64 {
        density * self[species].max(0.0) / species.molecular_weight()
    }

    /// Copy out in storage order
    pub fn to_array(&self) -> [f64; Species::COUNT] {
        self.0
    }
}

impl From<[f64; Species::COUNT]> for SpeciesMassFractions {
    fn from(fractions: [f64; Species::COUNT]) -> Self {
        Self(fractions)
    }
}

impl Index<Species> for SpeciesMassFractions {
    type Output = f64;
    #[inline]
    fn index(&self, species: Species) -> &f64 {
        &self.0[species as usize]
    }
}

impl IndexMut<Species> for SpeciesMassFractions {
    #[inline]
    fn index_mut(&mut self, species: Species) -> &mut f64 {
        &mut self.0[species as usize]
    }
}
