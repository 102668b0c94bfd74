//! Model parameters
//!
//! Every constant the kernels use lives here. `Default` reproduces the built-in
//! parameter set; hosts may deserialize a partial document on top of it, since every
//! struct is `#[serde(default)]`:
//!
//! ```
//! use reacting_flow_core::KineticsConfig;
//!
//! let config = KineticsConfig::default();
//! assert!(config.validate().is_ok());
//! assert!((config.salt.stoich_h2o_fraction() - 0.18).abs() < 1e-3);
//! ```

use crate::core_types::species::Species;
use crate::error::KineticsError;
use serde::{Deserialize, Serialize};

/// Universal gas constant (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Stefan-Boltzmann constant (W/(m²·K⁴))
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Complete parameter set for one simulation session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsConfig {
    /// Two-step methane mechanism
    pub gas: GasKineticsParams,
    /// Salt stoichiometry
    pub salt: SaltProperties,
    /// Decomposition kinetics and enthalpies
    pub decomposition: DecompositionParams,
    /// Particle heat exchange
    pub heat: ParticleHeatParams,
    /// Eddy dissipation concept closure
    pub edc: EdcParams,
}

impl KineticsConfig {
    /// Check every parameter for physical consistency.
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::InvalidParameter`] naming the first offending value.
    pub fn validate(&self) -> Result<(), KineticsError> {
        self.gas.validate()?;
        self.salt.validate()?;
        self.decomposition.validate()?;
        self.heat.validate()?;
        self.edc.validate()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), KineticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KineticsError::parameter(
            name,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), KineticsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(KineticsError::parameter(
            name,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

// ============================================================================
// GAS PHASE
// ============================================================================

/// Two-step CH4/air mechanism with equivalence-ratio corrected pre-exponentials.
///
/// Pre-exponential factors are in SI (mol, m³, s): the fuel step carries an overall
/// order of 1.15, the CO step 1.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasKineticsParams {
    /// Stoichiometric oxidizer-to-fuel mass ratio (kg O2 / kg CH4)
    pub stoich_ratio: f64,
    /// Oxidizer mass fraction below which φ is pinned to `phi_oxidizer_starved`
    pub oxidizer_threshold: f64,
    /// φ used for an oxidizer-starved cell
    pub phi_oxidizer_starved: f64,
    /// Fuel oxidation pre-exponential `A1`
    pub fuel_pre_exponential: f64,
    /// Fuel oxidation activation energy `E1` (J/mol)
    pub fuel_activation_energy: f64,
    /// Reaction order in CH4
    pub fuel_order_fuel: f64,
    /// Reaction order in O2 for the fuel step
    pub fuel_order_oxidizer: f64,
    /// CO oxidation pre-exponential `A2`
    pub co_pre_exponential: f64,
    /// CO oxidation activation energy `E2` (J/mol)
    pub co_activation_energy: f64,
    /// Temperature exponent of the CO step
    pub co_temperature_exponent: f64,
    /// Reaction order in CO
    pub co_order_co: f64,
    /// Reaction order in O2 for the CO step
    pub co_order_oxidizer: f64,
    /// Heat released per mol of CH4 oxidised to CO (J/mol)
    pub fuel_oxidation_enthalpy: f64,
    /// Heat released per mol of CO oxidised to CO2 (J/mol)
    pub co_oxidation_enthalpy: f64,
}

impl Default for GasKineticsParams {
    fn default() -> Self {
        Self {
            stoich_ratio: 2.0 * Species::O2.molecular_weight() / Species::CH4.molecular_weight(),
            oxidizer_threshold: 1e-10,
            phi_oxidizer_starved: 100.0,
            fuel_pre_exponential: 6.1687e8,
            fuel_activation_energy: 1.48532e5,
            fuel_order_fuel: 0.5,
            fuel_order_oxidizer: 0.65,
            co_pre_exponential: 2.0e5,
            co_activation_energy: 5.0208e4,
            co_temperature_exponent: 0.8,
            co_order_co: 1.0,
            co_order_oxidizer: 0.5,
            fuel_oxidation_enthalpy: 5.1931e5,
            co_oxidation_enthalpy: 2.8298e5,
        }
    }
}

impl GasKineticsParams {
    fn validate(&self) -> Result<(), KineticsError> {
        positive("gas.stoich_ratio", self.stoich_ratio)?;
        positive("gas.oxidizer_threshold", self.oxidizer_threshold)?;
        positive("gas.phi_oxidizer_starved", self.phi_oxidizer_starved)?;
        positive("gas.fuel_pre_exponential", self.fuel_pre_exponential)?;
        non_negative("gas.fuel_activation_energy", self.fuel_activation_energy)?;
        non_negative("gas.fuel_order_fuel", self.fuel_order_fuel)?;
        non_negative("gas.fuel_order_oxidizer", self.fuel_order_oxidizer)?;
        positive("gas.co_pre_exponential", self.co_pre_exponential)?;
        non_negative("gas.co_activation_energy", self.co_activation_energy)?;
        non_negative("gas.co_order_co", self.co_order_co)?;
        non_negative("gas.co_order_oxidizer", self.co_order_oxidizer)?;
        non_negative("gas.fuel_oxidation_enthalpy", self.fuel_oxidation_enthalpy)?;
        non_negative("gas.co_oxidation_enthalpy", self.co_oxidation_enthalpy)
    }
}

// ============================================================================
// SALT STOICHIOMETRY
// ============================================================================

/// Molecular weights and stoichiometry of the hydrate → salt → oxide sequence.
///
/// Defaults describe a divalent nitrate dihydrate, `M(NO3)2·2H2O`, with calcium as
/// the metal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaltProperties {
    /// Hydrate molecular weight (kg/mol)
    pub mw_hydrate: f64,
    /// Anhydrous nitrate molecular weight (kg/mol)
    pub mw_anhydrous: f64,
    /// Oxide molecular weight (kg/mol)
    pub mw_oxide: f64,
    /// Water molecules per hydrate formula unit
    pub water_per_formula: f64,
    /// NO2 molecules released per salt formula unit
    pub no2_per_formula: f64,
    /// O2 molecules released per salt formula unit
    pub o2_per_formula: f64,
}

impl Default for SaltProperties {
    fn default() -> Self {
        Self {
            mw_hydrate: 200.118e-3,
            mw_anhydrous: 164.088e-3,
            mw_oxide: 56.077e-3,
            water_per_formula: 2.0,
            no2_per_formula: 2.0,
            o2_per_formula: 0.5,
        }
    }
}

impl SaltProperties {
    /// Releasable water per unit hydrate mass, `n·MW_H2O/MW_hydrate`
    #[inline]
    pub fn stoich_h2o_fraction(&self) -> f64 {
        self.water_per_formula * Species::H2O.molecular_weight() / self.mw_hydrate
    }

    /// Releasable NO2 per unit salt mass
    #[inline]
    pub fn stoich_no2_fraction(&self) -> f64 {
        self.no2_per_formula * Species::NO2.molecular_weight() / self.mw_anhydrous
    }

    /// Releasable O2 per unit salt mass
    #[inline]
    pub fn stoich_o2_fraction(&self) -> f64 {
        self.o2_per_formula * Species::O2.molecular_weight() / self.mw_anhydrous
    }

    /// Releasable NO2 + O2 per unit salt mass
    #[inline]
    pub fn stoich_gas_fraction(&self) -> f64 {
        self.stoich_no2_fraction() + self.stoich_o2_fraction()
    }

    fn validate(&self) -> Result<(), KineticsError> {
        positive("salt.mw_hydrate", self.mw_hydrate)?;
        positive("salt.mw_anhydrous", self.mw_anhydrous)?;
        positive("salt.mw_oxide", self.mw_oxide)?;
        positive("salt.water_per_formula", self.water_per_formula)?;
        positive("salt.no2_per_formula", self.no2_per_formula)?;
        non_negative("salt.o2_per_formula", self.o2_per_formula)?;

        let hydrate = self.mw_anhydrous + self.water_per_formula * Species::H2O.molecular_weight();
        if ((hydrate - self.mw_hydrate) / self.mw_hydrate).abs() > 1e-3 {
            return Err(KineticsError::parameter(
                "salt.mw_hydrate",
                format!("expected ≈{hydrate:.6} kg/mol from salt + water, got {}", self.mw_hydrate),
            ));
        }
        let salt = self.mw_oxide
            + self.no2_per_formula * Species::NO2.molecular_weight()
            + self.o2_per_formula * Species::O2.molecular_weight();
        if ((salt - self.mw_anhydrous) / self.mw_anhydrous).abs() > 1e-3 {
            return Err(KineticsError::parameter(
                "salt.mw_anhydrous",
                format!("expected ≈{salt:.6} kg/mol from oxide + gases, got {}", self.mw_anhydrous),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DECOMPOSITION
// ============================================================================

/// Surface-reaction kinetics of the two decomposition stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionParams {
    /// Dehydration pre-exponential (mol/(m²·s))
    pub dehydration_pre_exponential: f64,
    /// Dehydration activation energy (J/mol)
    pub dehydration_activation_energy: f64,
    /// Moles of H2O per mole of reacting surface sites, `β`
    pub dehydration_yield: f64,
    /// Denitration pre-exponential (mol/(m²·s))
    pub denitration_pre_exponential: f64,
    /// Denitration activation energy (J/mol)
    pub denitration_activation_energy: f64,
    /// Effectiveness factor of the particle surface, `η`
    pub effectiveness: f64,
    /// Component mass below which a stage is inactive (kg)
    pub active_mass_threshold: f64,
    /// Dehydration enthalpy per kg of hydrate consumed (J/kg, positive = endothermic)
    pub dehydration_enthalpy: f64,
    /// Denitration enthalpy per kg of salt consumed (J/kg, positive = endothermic)
    pub denitration_enthalpy: f64,
}

impl Default for DecompositionParams {
    fn default() -> Self {
        Self {
            dehydration_pre_exponential: 1.0e6,
            dehydration_activation_energy: 9.0e4,
            dehydration_yield: 2.0,
            denitration_pre_exponential: 5.0e6,
            denitration_activation_energy: 1.8e5,
            effectiveness: 1.0,
            active_mass_threshold: 1e-10,
            dehydration_enthalpy: 5.5e5,
            denitration_enthalpy: 2.25e6,
        }
    }
}

impl DecompositionParams {
    fn validate(&self) -> Result<(), KineticsError> {
        positive("decomposition.dehydration_pre_exponential", self.dehydration_pre_exponential)?;
        non_negative(
            "decomposition.dehydration_activation_energy",
            self.dehydration_activation_energy,
        )?;
        positive("decomposition.dehydration_yield", self.dehydration_yield)?;
        positive("decomposition.denitration_pre_exponential", self.denitration_pre_exponential)?;
        non_negative(
            "decomposition.denitration_activation_energy",
            self.denitration_activation_energy,
        )?;
        positive("decomposition.effectiveness", self.effectiveness)?;
        non_negative("decomposition.active_mass_threshold", self.active_mass_threshold)?;
        non_negative("decomposition.dehydration_enthalpy", self.dehydration_enthalpy)?;
        non_negative("decomposition.denitration_enthalpy", self.denitration_enthalpy)
    }
}

// ============================================================================
// PARTICLE HEAT
// ============================================================================

/// Radiative and convective exchange of a particle with its cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleHeatParams {
    /// Particle surface emissivity (0-1)
    pub emissivity: f64,
}

impl Default for ParticleHeatParams {
    fn default() -> Self {
        Self { emissivity: 0.85 }
    }
}

impl ParticleHeatParams {
    fn validate(&self) -> Result<(), KineticsError> {
        if (0.0..=1.0).contains(&self.emissivity) {
            Ok(())
        } else {
            Err(KineticsError::parameter(
                "heat.emissivity",
                format!("must lie in [0, 1], got {}", self.emissivity),
            ))
        }
    }
}

// ============================================================================
// EDC CLOSURE
// ============================================================================

/// Eddy dissipation concept constants and the high-temperature regime ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdcParams {
    /// Volume fraction constant `C_ξ`
    pub c_xi: f64,
    /// Time scale constant `C_τ`
    pub c_tau: f64,
    /// `k` or `ε` below this value means no fine structures
    pub turbulence_threshold: f64,
    /// Temperature where the ramp starts (K)
    pub regime_temperature: f64,
    /// Width of the linear ramp (K)
    pub regime_ramp_width: f64,
    /// Multiplier reached at the end of the ramp
    pub regime_max_multiplier: f64,
}

impl Default for EdcParams {
    fn default() -> Self {
        Self {
            c_xi: 2.1377,
            c_tau: 0.4083,
            turbulence_threshold: 1e-10,
            regime_temperature: 1500.0,
            regime_ramp_width: 500.0,
            regime_max_multiplier: 1.5,
        }
    }
}

impl EdcParams {
    fn validate(&self) -> Result<(), KineticsError> {
        positive("edc.c_xi", self.c_xi)?;
        positive("edc.c_tau", self.c_tau)?;
        positive("edc.turbulence_threshold", self.turbulence_threshold)?;
        positive("edc.regime_temperature", self.regime_temperature)?;
        positive("edc.regime_ramp_width", self.regime_ramp_width)?;
        if self.regime_max_multiplier < 1.0 || !self.regime_max_multiplier.is_finite() {
            return Err(KineticsError::parameter(
                "edc.regime_max_multiplier",
                format!("must be finite and >= 1, got {}", self.regime_max_multiplier),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(KineticsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_stoich_ratio_is_four_for_methane() {
        let gas = GasKineticsParams::default();
        assert!((gas.stoich_ratio - 3.989).abs() < 0.01);
    }

    #[test]
    fn test_salt_mass_balance_closes() {
        let salt = SaltProperties::default();
        // Dihydrate carries 18% releasable water by mass
        assert!((salt.stoich_h2o_fraction() - 0.18004).abs() < 1e-4);
        // Denitration leaves 56.077/164.088 of the salt as oxide
        let residue = 1.0 - salt.stoich_gas_fraction();
        assert!((residue - salt.mw_oxide / salt.mw_anhydrous).abs() < 1e-4);
    }

    #[test]
    fn test_inconsistent_hydrate_rejected() {
        let mut config = KineticsConfig::default();
        config.salt.mw_hydrate = 0.3;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            KineticsError::InvalidParameter { name: "salt.mw_hydrate", .. }
        ));
    }

    #[test]
    fn test_emissivity_range() {
        let mut config = KineticsConfig::default();
        config.heat.emissivity = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_edc_multiplier_below_one_rejected() {
        let mut config = KineticsConfig::default();
        config.edc.regime_max_multiplier = 0.5;
        assert!(config.validate().is_err());
    }
}
