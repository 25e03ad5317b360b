//! Time integration for the body list
//!
//! Integrators read the `forces` left by the accumulation step and advance
//! velocities and positions by one tick.

use crate::body::Body;
use crate::settings::SimulationParameters;

/// A fixed-step time integrator
pub trait Integrator: Send + Sync {
    /// Advance every body by `params.effective_dt()`
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies with freshly computed `forces` (modified in place)
    /// * `params` - Time step, multiplier, floor and trail bound
    fn advance(&self, bodies: &mut [Body], params: &SimulationParameters);
}

/// Semi-implicit (symplectic) Euler with the fabric constraint
///
/// For each body:
///
/// 1. a = F / m
/// 2. v += a * dt
/// 3. x += v * dt (using the updated velocity)
/// 4. x.y = max(floor, x.y)
/// 5. the new position is appended to the trail, oldest points evicted first
///
/// The vertical velocity is not touched by the clamp. The step is fully
/// deterministic.
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::integrator::{Integrator, SemiImplicitEuler};
/// use spacetime::settings::SimulationParameters;
/// use nalgebra::{Point3, Vector3};
///
/// let mut bodies = vec![Body::new(
///     BodyId(0),
///     2.0,
///     0.5,
///     Point3::new(0.0, -1.8, 0.0),
///     Vector3::new(1.0, -3.0, 0.0),
/// )];
/// bodies[0].forces = Vector3::new(4.0, 0.0, 0.0);
///
/// let params = SimulationParameters::default();
/// SemiImplicitEuler.advance(&mut bodies, &params);
///
/// assert!(bodies[0].velocity.x > 1.0);
/// assert_eq!(bodies[0].position.y, -1.8);
/// assert_eq!(bodies[0].trail.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance(&self, bodies: &mut [Body], params: &SimulationParameters) {
        let dt = params.effective_dt();

        bodies.iter_mut().for_each(|body| {
            let acceleration = body.forces / body.mass;
            body.velocity += acceleration * dt;
            body.position += body.velocity * dt;
            body.position.y = body.position.y.max(params.fabric_floor);
            body.trail.push(body.position, params.max_trail_length);
        });
    }
}
