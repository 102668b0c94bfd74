//! Particle records for the decomposing salt phase
//!
//! A particle starts life as pure hydrate and sheds water, then NO2 and O2, leaving
//! an oxide residue:
//!
//! ```text
//! M(NO3)2·2H2O -> M(NO3)2 + 2 H2O           (dehydration)
//! M(NO3)2      -> MO + 2 NO2 + 0.5 O2       (denitration)
//! ```
//!
//! The structured [`ParticleCompositionState`] and [`ParticleTransferState`] replace the
//! host's flat per-particle buffer. [`ParticleScratch`] is that flat buffer, kept only
//! for the C ABI, with a fixed slot layout.

use crate::core_types::units::{Kelvin, Kilograms, Meters};
use crate::core_types::vec3::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of real-valued slots in the host scratch buffer
pub const SCRATCH_SLOTS: usize = 9;

/// Component masses of one particle (kg each).
///
/// Invariant: `hydrate + anhydrous_salt + oxide ≈ particle mass`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleCompositionState {
    /// Remaining hydrated salt (kg)
    pub hydrate_mass: f64,
    /// Anhydrous nitrate formed by dehydration (kg)
    pub anhydrous_salt_mass: f64,
    /// Oxide residue formed by denitration (kg)
    pub oxide_mass: f64,
}

impl ParticleCompositionState {
    /// Composition of a freshly injected particle: all mass is hydrate
    pub fn all_hydrate(mass: Kilograms) -> Self {
        Self {
            hydrate_mass: *mass,
            anhydrous_salt_mass: 0.0,
            oxide_mass: 0.0,
        }
    }

    /// Sum of the three component masses (kg)
    #[inline]
    pub fn total(&self) -> f64 {
        self.hydrate_mass + self.anhydrous_salt_mass + self.oxide_mass
    }

    /// Floor every component at zero
    pub(crate) fn clamp_non_negative(&mut self) {
        self.hydrate_mass = self.hydrate_mass.max(0.0);
        self.anhydrous_salt_mass = self.anhydrous_salt_mass.max(0.0);
        self.oxide_mass = self.oxide_mass.max(0.0);
    }
}

/// Per-step exchange between one particle and the gas.
///
/// Written by the lifecycle step, read once by the cell aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleTransferState {
    /// H2O release rate (kg/s)
    pub h2o_rate: f64,
    /// NO2 release rate (kg/s)
    pub no2_rate: f64,
    /// O2 release rate (kg/s)
    pub o2_rate: f64,
    /// Convective heat into the particle (W)
    pub convective_heat: f64,
    /// Radiative heat into the particle (W)
    pub radiative_heat: f64,
    /// Reaction heat into the particle (W, negative for endothermic decomposition)
    pub reaction_heat: f64,
}

impl ParticleTransferState {
    /// Net heat rate into the particle (W)
    #[inline]
    pub fn net_heat(&self) -> f64 {
        self.convective_heat + self.radiative_heat + self.reaction_heat
    }
}

/// A decomposing salt particle as seen by the kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Host-assigned identifier
    pub id: u64,
    /// Index of the control volume the particle currently resides in
    pub cell: usize,
    /// Particle temperature
    pub temperature: Kelvin,
    /// Particle mass
    pub mass: Kilograms,
    /// Particle diameter
    pub diameter: Meters,
    /// Bulk density (kg/m³), constant over the particle's life
    pub density: f64,
    /// Specific heat (J/(kg·K))
    pub specific_heat: f64,
    /// Particle velocity (m/s)
    pub velocity: Vec3,
    /// Component masses
    pub composition: ParticleCompositionState,
    /// Exchange terms of the most recent step
    pub transfer: ParticleTransferState,
}

impl Particle {
    /// Create a freshly injected, all-hydrate particle at rest.
    ///
    /// The diameter is derived from mass and density.
    pub fn new(
        id: u64,
        cell: usize,
        temperature: Kelvin,
        mass: Kilograms,
        density: f64,
        specific_heat: f64,
    ) -> Self {
        Self {
            id,
            cell,
            temperature,
            mass,
            diameter: sphere_diameter(mass, density),
            density,
            specific_heat,
            velocity: Vec3::zeros(),
            composition: ParticleCompositionState::all_hydrate(mass),
            transfer: ParticleTransferState::default(),
        }
    }

    /// Set the velocity (builder style)
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// External surface area `π·d²` (m²)
    #[inline]
    pub fn surface_area(&self) -> f64 {
        self.diameter.sphere_surface()
    }

    /// Hydrate mass fraction of the whole particle
    #[inline]
    pub fn hydrate_fraction(&self) -> f64 {
        if *self.mass > 0.0 {
            self.composition.hydrate_mass / *self.mass
        } else {
            0.0
        }
    }

    /// Anhydrous-salt mass fraction of the whole particle
    #[inline]
    pub fn salt_fraction(&self) -> f64 {
        if *self.mass > 0.0 {
            self.composition.anhydrous_salt_mass / *self.mass
        } else {
            0.0
        }
    }
}

/// Diameter of a sphere of the given mass and density, `(6m/(πρ))^(1/3)`
#[inline]
pub fn sphere_diameter(mass: Kilograms, density: f64) -> Meters {
    if *mass <= 0.0 || density <= 0.0 {
        return Meters::new(0.0);
    }
    Meters::new((6.0 * *mass / (PI * density)).cbrt())
}

/// The host's flat per-particle buffer.
///
/// | slot | content |
/// |------|---------|
/// | 0 | hydrate mass (kg) |
/// | 1 | anhydrous salt mass (kg) |
/// | 2 | oxide mass (kg) |
/// | 3 | H2O release rate (kg/s) |
/// | 4 | NO2 release rate (kg/s) |
/// | 5 | O2 release rate (kg/s) |
/// | 6 | convective heat (W) |
/// | 7 | radiative heat (W) |
/// | 8 | reaction heat (W) |
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct ParticleScratch(pub [f64; SCRATCH_SLOTS]);

impl ParticleScratch {
    pub const HYDRATE_MASS: usize = 0;
    pub const SALT_MASS: usize = 1;
    pub const OXIDE_MASS: usize = 2;
    pub const H2O_RATE: usize = 3;
    pub const NO2_RATE: usize = 4;
    pub const O2_RATE: usize = 5;
    pub const CONVECTIVE_HEAT: usize = 6;
    pub const RADIATIVE_HEAT: usize = 7;
    pub const REACTION_HEAT: usize = 8;

    /// Pack the structured records into the flat layout
    pub fn pack(composition: &ParticleCompositionState, transfer: &ParticleTransferState) -> Self {
        let mut slots = [0.0; SCRATCH_SLOTS];
        slots[Self::HYDRATE_MASS] = composition.hydrate_mass;
        slots[Self::SALT_MASS] = composition.anhydrous_salt_mass;
        slots[Self::OXIDE_MASS] = composition.oxide_mass;
        slots[Self::H2O_RATE] = transfer.h2o_rate;
        slots[Self::NO2_RATE] = transfer.no2_rate;
        slots[Self::O2_RATE] = transfer.o2_rate;
        slots[Self::CONVECTIVE_HEAT] = transfer.convective_heat;
        slots[Self::RADIATIVE_HEAT] = transfer.radiative_heat;
        slots[Self::REACTION_HEAT] = transfer.reaction_heat;
        Self(slots)
    }

    /// Unpack the flat layout into structured records
    pub fn unpack(&self) -> (ParticleCompositionState, ParticleTransferState) {
        let s = &self.0;
        (
            ParticleCompositionState {
                hydrate_mass: s[Self::HYDRATE_MASS],
                anhydrous_salt_mass: s[Self::SALT_MASS],
                oxide_mass: s[Self::OXIDE_MASS],
            },
            ParticleTransferState {
                h2o_rate: s[Self::H2O_RATE],
                no2_rate: s[Self::NO2_RATE],
                o2_rate: s[Self::O2_RATE],
                convective_heat: s[Self::CONVECTIVE_HEAT],
                radiative_heat: s[Self::RADIATIVE_HEAT],
                reaction_heat: s[Self::REACTION_HEAT],
            },
        )
    }
}
