//! Direct N-body gravity (O(N²) implementation)

use nalgebra::Vector3;

use crate::body::Body;
use crate::forces::ForceModel;
use crate::settings::MIN_INTERACTION_DISTANCE;

/// Direct pairwise Newtonian gravity
///
/// Every unordered pair is visited once. Pairs closer than `min_distance`
/// are skipped entirely: neither body receives a contribution from the other.
/// This is a hard cutoff, not a softened potential.
///
/// Best for the tens of bodies an interactive scene holds.
#[derive(Debug, Clone, Copy)]
pub struct DirectGravity {
    /// Separation below which a pair exerts no force
    pub min_distance: f64,
}

impl DirectGravity {
    /// Creates a direct gravity model with the standard 0.1 cutoff
    pub fn new() -> Self {
        Self {
            min_distance: MIN_INTERACTION_DISTANCE,
        }
    }

    /// Creates a direct gravity model with a custom cutoff distance
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self { min_distance }
    }

    /// Force on `a` due to `b`, or `None` when the pair is inside the cutoff
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::body::{Body, BodyId};
    /// use spacetime::forces::DirectGravity;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let a = Body::new(BodyId(0), 2.0, 0.1, Point3::new(0.0, 0.0, 0.0), Vector3::zeros());
    /// let b = Body::new(BodyId(1), 3.0, 0.1, Point3::new(0.0, 0.0, 2.0), Vector3::zeros());
    ///
    /// let gravity = DirectGravity::new();
    /// let f = gravity.pair_force(&a, &b, 1.0).unwrap();
    /// assert!((f.z - 1.5).abs() < 1e-12);
    ///
    /// let close = Body::new(BodyId(2), 3.0, 0.1, Point3::new(0.0, 0.0, 0.05), Vector3::zeros());
    /// assert!(gravity.pair_force(&a, &close, 1.0).is_none());
    /// ```
    pub fn pair_force(&self, a: &Body, b: &Body, g: f64) -> Option<Vector3<f64>> {
        let d = b.position - a.position;
        let r = d.magnitude();
        if r < self.min_distance {
            return None;
        }

        let magnitude = g * a.mass * b.mass / (r * r);
        Some(d * (magnitude / r))
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn accumulate(&self, bodies: &mut [Body], g: f64) {
        bodies
            .iter_mut()
            .for_each(|body| body.forces = Vector3::zeros());

        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let Some(force) = self.pair_force(&bodies[i], &bodies[j], g) else {
                    continue;
                };

                // Equal and opposite
                bodies[i].forces += force;
                bodies[j].forces -= force;
            }
        }
    }
}
