//! Per-control-volume gas state snapshot
//!
//! The host solver owns and mutates the cell data; the kernel only ever receives a
//! shared reference to a [`GasCellState`] copy.

use crate::core_types::species::{Species, SpeciesMassFractions};
use crate::core_types::units::Kelvin;
use crate::core_types::vec3::Vec3;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of one control volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasCellState {
    /// Gas temperature
    pub temperature: Kelvin,
    /// Density (kg/m³)
    pub density: f64,
    /// Species mass fractions
    pub mass_fractions: SpeciesMassFractions,
    /// Mean gas velocity (m/s)
    pub velocity: Vec3,
    /// Cell volume (m³)
    pub volume: f64,
    /// Turbulent kinetic energy `k` (m²/s²)
    pub turbulent_kinetic_energy: f64,
    /// Turbulent dissipation rate `ε` (m²/s³)
    pub dissipation_rate: f64,
    /// Laminar kinematic viscosity `ν` (m²/s)
    pub kinematic_viscosity: f64,
    /// Thermal conductivity (W/(m·K))
    pub thermal_conductivity: f64,
    /// Specific heat at constant pressure (J/(kg·K))
    pub specific_heat: f64,
}

impl GasCellState {
    /// Quiescent air cell at the given temperature and volume.
    ///
    /// Transport properties are those of air near 1000 K; callers overwrite whatever
    /// the host provides.
    pub fn air(temperature: Kelvin, volume: f64) -> Self {
        // Ideal gas at 1 atm, M_air = 28.97 g/mol
        let density = 101_325.0 * 28.97e-3 / (8.314_462_618 * *temperature);
        Self {
            temperature,
            density,
            mass_fractions: SpeciesMassFractions::air(),
            velocity: Vec3::zeros(),
            volume,
            turbulent_kinetic_energy: 0.0,
            dissipation_rate: 0.0,
            kinematic_viscosity: 1.5e-4,
            thermal_conductivity: 0.067,
            specific_heat: 1140.0,
        }
    }

    /// Velocity magnitude (m/s)
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Mass fraction of one species
    #[inline]
    pub fn y(&self, species: Species) -> f64 {
        self.mass_fractions[species]
    }

    /// Molar concentration of one species (mol/m³)
    #[inline]
    pub fn concentration(&self, species: Species) -> f64 {
        self.mass_fractions.concentration(species, self.density)
    }

    /// Dynamic viscosity `μ = ρ·ν` (Pa·s)
    #[inline]
    pub fn dynamic_viscosity(&self) -> f64 {
        self.density * self.kinematic_viscosity
    }

    /// Prandtl number `cp·μ/λ`
    #[inline]
    pub fn prandtl(&self) -> f64 {
        self.specific_heat * self.dynamic_viscosity() / self.thermal_conductivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_density_ideal_gas() {
        let cell = GasCellState::air(Kelvin::new(300.0), 1.0);
        assert!((cell.density - 1.177).abs() < 0.01);
        assert_eq!(cell.speed(), 0.0);
    }

    #[test]
    fn test_prandtl_of_air_is_order_one() {
        let cell = GasCellState::air(Kelvin::new(1000.0), 1.0);
        let pr = cell.prandtl();
        assert!(pr > 0.5 && pr < 1.0, "Pr = {pr}");
    }
}
