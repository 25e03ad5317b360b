//! Force models for the simulation
//!
//! A `ForceModel` overwrites the `forces` field of every body with the net
//! force acting on it. `compute_forces` picks the model selected by
//! `SimulationMode`.

use crate::body::Body;
use crate::settings::SimulationMode;

pub mod approximate;
pub mod gravity;


pub use approximate::ApproximateGravity;
pub use gravity::DirectGravity;

/// A source of force on bodies
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::forces::{DirectGravity, ForceModel};
/// use nalgebra::{Point3, Vector3};
///
/// let mut bodies = vec![
///     Body::new(BodyId(0), 10.0, 0.5, Point3::new(0.0, -1.8, 0.0), Vector3::zeros()),
///     Body::new(BodyId(1), 1.0, 0.5, Point3::new(5.0, -1.8, 0.0), Vector3::zeros()),
/// ];
///
/// DirectGravity::new().accumulate(&mut bodies, 1.0);
///
/// // G * 10 * 1 / 5² = 0.4, pulling body 0 toward +x
/// assert!((bodies[0].forces.x - 0.4).abs() < 1e-12);
/// assert!((bodies[1].forces.x + 0.4).abs() < 1e-12);
/// ```
pub trait ForceModel: Send + Sync {
    /// Replace each body's `forces` with the net force from all the others
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies to update in place
    /// * `g` - Gravitational constant
    fn accumulate(&self, bodies: &mut [Body], g: f64);
}

/// Run the force model selected by `mode` over `bodies`
pub fn compute_forces(bodies: &mut [Body], g: f64, mode: SimulationMode) {
    match mode {
        SimulationMode::Exact => DirectGravity::new().accumulate(bodies, g),
        SimulationMode::Approximate => ApproximateGravity::new().accumulate(bodies, g),
    }
}
