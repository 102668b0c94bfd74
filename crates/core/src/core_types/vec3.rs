//! Vector type alias for 3D velocities.

use nalgebra::Vector3;

/// 3D vector type for velocities and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f64>`, used for gas and particle
/// velocities when the slip velocity of a particle is needed for the Reynolds number.
pub type Vec3 = Vector3<f64>;
