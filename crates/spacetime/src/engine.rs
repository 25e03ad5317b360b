//! One simulation tick: forces, then integration, then collisions
//!
//! The phases never interleave. Forces are computed for every pair before
//! any body moves, and every body has moved before overlaps are resolved.

use tracing::trace;

use crate::body::Body;
use crate::collisions::{CollisionOutcome, resolve_collisions};
use crate::diagnostics::{self, Energy};
use crate::forces::compute_forces;
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::settings::{CollisionMode, ParameterUpdate, SimulationMode, SimulationParameters};

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub bodies: Vec<Body>,
    pub collisions: Vec<CollisionOutcome>,
}

/// Advance a snapshot by one tick, reporting every collision
pub fn advance(mut bodies: Vec<Body>, params: &SimulationParameters) -> StepOutcome {
    compute_forces(
        &mut bodies,
        params.gravitational_constant,
        params.simulation_mode,
    );
    SemiImplicitEuler.advance(&mut bodies, params);
    let (bodies, collisions) = resolve_collisions(bodies, params.collision_mode);

    trace!(
        bodies = bodies.len(),
        collisions = collisions.len(),
        "tick complete"
    );

    StepOutcome { bodies, collisions }
}

/// Advance a snapshot by one tick
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::engine::step;
/// use spacetime::settings::SimulationParameters;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 10.0, 0.5, Point3::new(0.0, -1.8, 0.0), Vector3::zeros()),
///     Body::new(BodyId(1), 1.0, 0.5, Point3::new(5.0, -1.8, 0.0), Vector3::zeros()),
/// ];
/// let params = SimulationParameters {
///     gravitational_constant: 1.0,
///     ..Default::default()
/// };
///
/// let next = step(bodies, &params);
///
/// assert!((next[0].forces.magnitude() - 0.4).abs() < 1e-12);
/// assert!((next[0].velocity.x - 0.04 * 0.016).abs() < 1e-15);
/// ```
pub fn step(bodies: Vec<Body>, params: &SimulationParameters) -> Vec<Body> {
    advance(bodies, params).bodies
}

/// The physics core with its own parameters
///
/// Setters take effect on the next call to `step` and are not validated.
#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    params: SimulationParameters,
}

impl PhysicsEngine {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn set_gravitational_constant(&mut self, value: f64) {
        self.params.gravitational_constant = value;
    }

    pub fn set_time_multiplier(&mut self, value: f64) {
        self.params.time_multiplier = value;
    }

    pub fn set_simulation_mode(&mut self, mode: SimulationMode) {
        self.params.simulation_mode = mode;
    }

    pub fn set_collision_mode(&mut self, mode: CollisionMode) {
        self.params.collision_mode = mode;
    }

    pub fn set_max_trail_length(&mut self, max: usize) {
        self.params.max_trail_length = max;
    }

    pub fn apply(&mut self, update: &ParameterUpdate) {
        self.params.apply(update);
    }

    pub fn step(&self, bodies: Vec<Body>) -> StepOutcome {
        advance(bodies, &self.params)
    }

    pub fn compute_energy(&self, bodies: &[Body]) -> Energy {
        diagnostics::total_energy(bodies, self.params.gravitational_constant)
    }

    pub fn compute_angular_momentum(&self, bodies: &[Body]) -> f64 {
        diagnostics::angular_momentum(bodies)
    }

    pub fn orbital_period(&self, a: &Body, b: &Body) -> f64 {
        diagnostics::orbital_period(a, b, self.params.gravitational_constant)
    }

    pub fn escape_velocity(&self, central: &Body, distance: f64) -> f64 {
        diagnostics::escape_velocity(central, distance, self.params.gravitational_constant)
    }
}
