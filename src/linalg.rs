//! Some shared linear algebra concepts

use crate::numeric::Float;

/// Re-export of nalgebra's 3-vector type
pub use nalgebra::Vector3;

/// Position in 3D detector coordinates
///
/// The beam axis is Z, with the detector front face at Z = 0; X and Y span
/// the transverse plane.
///
pub type Position = Vector3<Float>;

/// Convenience const for accessing the X coordinate of a position
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a position
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a position
pub const Z: usize = 2;
