//! Read-only conservation diagnostics
//!
//! Nothing here mutates bodies. Every function is safe on empty and
//! single-body lists, returning zero.

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Kinetic, potential and total mechanical energy
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// Σ ½ m |v|²
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Σ_{i<j} −G mᵢ mⱼ / rᵢⱼ
///
/// Unlike the force step there is no minimum-distance guard, so coincident
/// bodies yield an infinite potential.
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut potential = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            potential -= g * a.mass * b.mass / a.distance_to(b);
        }
    }
    potential
}

/// Kinetic and potential energy with their sum
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::diagnostics::total_energy;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 2.0, 0.1, Point3::origin(), Vector3::new(1.0, 0.0, 0.0)),
///     Body::new(BodyId(1), 3.0, 0.1, Point3::new(0.0, 0.0, 2.0), Vector3::zeros()),
/// ];
///
/// let energy = total_energy(&bodies, 1.0);
/// assert_eq!(energy.kinetic, 1.0);
/// assert_eq!(energy.potential, -3.0);
/// assert_eq!(energy.total, -2.0);
/// ```
pub fn total_energy(bodies: &[Body], g: f64) -> Energy {
    let kinetic = kinetic_energy(bodies);
    let potential = potential_energy(bodies, g);

    Energy {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Σ |rᵢ × mᵢvᵢ|
///
/// Per-body magnitudes are summed, not the vectors, so opposite spins do
/// not cancel. This is a display quantity, not the conserved total.
pub fn angular_momentum(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|body| body.angular_momentum().magnitude())
        .sum()
}

pub fn total_momentum(bodies: &[Body]) -> Vector3<f64> {
    bodies
        .iter()
        .fold(Vector3::zeros(), |acc, body| acc + body.momentum())
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|body| body.mass).sum()
}

/// Keplerian period of an isolated pair at its current separation
///
/// `T = 2π √(r³ / (G (ma + mb)))`, treating the separation as the
/// semi-major axis.
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::diagnostics::orbital_period;
/// use nalgebra::{Point3, Vector3};
/// use std::f64::consts::PI;
///
/// let a = Body::new(BodyId(0), 3.0, 0.1, Point3::origin(), Vector3::zeros());
/// let b = Body::new(BodyId(1), 1.0, 0.1, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());
///
/// let period = orbital_period(&a, &b, 2.0);
/// assert!((period - 2.0 * PI).abs() < 1e-12);
/// ```
pub fn orbital_period(a: &Body, b: &Body, g: f64) -> f64 {
    let r = a.distance_to(b);
    2.0 * PI * (r.powi(3) / (g * (a.mass + b.mass))).sqrt()
}

/// Speed needed to escape `central` from `distance`: `√(2 G m / d)`
pub fn escape_velocity(central: &Body, distance: f64, g: f64) -> f64 {
    (2.0 * g * central.mass / distance).sqrt()
}
