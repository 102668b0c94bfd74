//! Convective heat transfer coefficient for a sphere in a gas stream
//!
//! Ranz-Marshall correlation:
//!
//! ```text
//! Re = |u_g − u_p| · d / ν
//! Nu = 2 + 0.6 · Re^½ · Pr^⅓
//! h  = Nu · λ / d
//! ```
//!
//! Used when the host does not supply `h` from its own particle transfer framework.
//!
//! # References
//! - Ranz, W.E., Marshall, W.R. (1952). "Evaporation from drops."
//!   Chemical Engineering Progress, 48(3), 141-146.

use crate::core_types::gas::GasCellState;
use crate::core_types::particle::Particle;

/// Particle Reynolds number from the slip velocity
#[inline]
pub fn particle_reynolds(particle: &Particle, cell: &GasCellState) -> f64 {
    if cell.kinematic_viscosity <= 0.0 {
        return 0.0;
    }
    let slip = (cell.velocity - particle.velocity).norm();
    slip * *particle.diameter / cell.kinematic_viscosity
}

/// Ranz-Marshall Nusselt number; 2 for a particle at rest in the gas
#[inline]
pub fn ranz_marshall_nusselt(reynolds: f64, prandtl: f64) -> f64 {
    2.0 + 0.6 * reynolds.max(0.0).sqrt() * prandtl.max(0.0).cbrt()
}

/// Convective coefficient `h` (W/(m²·K)); zero for a particle of zero diameter
pub fn ranz_marshall_coefficient(particle: &Particle, cell: &GasCellState) -> f64 {
    let d = *particle.diameter;
    if d <= 0.0 {
        return 0.0;
    }
    let nu = ranz_marshall_nusselt(particle_reynolds(particle, cell), cell.prandtl());
    nu * cell.thermal_conductivity / d
}
