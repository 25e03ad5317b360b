//! Overlap detection between spheres

use crate::body::{Body, BodyId};

/// An overlapping pair found by `detect_overlaps`
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Earlier body in list order
    pub body_a: BodyId,
    /// Later body in list order
    pub body_b: BodyId,
    /// Centre-to-centre distance
    pub separation: f64,
    /// Sum of radii that the separation fell below
    pub contact_distance: f64,
}

/// True when the spheres of `a` and `b` overlap
///
/// Touching spheres (`distance == ra + rb`) do not count.
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::collisions::bodies_overlap;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body::new(BodyId(0), 1.0, 1.0, Point3::origin(), Vector3::zeros());
/// let b = Body::new(BodyId(1), 1.0, 1.0, Point3::new(1.5, 0.0, 0.0), Vector3::zeros());
/// let c = Body::new(BodyId(2), 1.0, 1.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros());
///
/// assert!(bodies_overlap(&a, &b));
/// assert!(!bodies_overlap(&a, &c));
/// ```
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    a.distance_to(b) < a.radius + b.radius
}

/// Every overlapping pair in ascending `(i, j)` order, without resolving any
pub fn detect_overlaps(bodies: &[Body]) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let separation = a.distance_to(b);
            let contact_distance = a.radius + b.radius;
            if separation < contact_distance {
                events.push(CollisionEvent {
                    body_a: a.id,
                    body_b: b.id,
                    separation,
                    contact_distance,
                });
            }
        }
    }

    events
}
