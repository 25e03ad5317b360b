//! Collision response: inelastic merging and elastic bouncing

use tracing::debug;

use crate::body::{Body, BodyId};
use crate::collisions::bodies_overlap;
use crate::settings::CollisionMode;

/// What happened to one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// `absorbed` no longer exists; its mass now belongs to `survivor`
    Merged { survivor: BodyId, absorbed: BodyId },
    /// Both bodies received an elastic impulse
    Bounced { a: BodyId, b: BodyId },
}

impl CollisionOutcome {
    /// Id removed from the simulation by this outcome, if any
    pub fn absorbed(&self) -> Option<BodyId> {
        match self {
            CollisionOutcome::Merged { absorbed, .. } => Some(*absorbed),
            CollisionOutcome::Bounced { .. } => None,
        }
    }
}

/// Merge `absorbed` into `survivor`
///
/// The result keeps the survivor's id, name, position, trail and cosmetics.
/// Mass is summed, velocity conserves linear momentum and the radius
/// conserves volume: `r = cbrt(r1³ + r2³)`.
///
/// # Arguments
///
/// * `survivor` - The heavier body (the caller decides)
/// * `absorbed` - The body that disappears
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::collisions::merge_bodies;
/// use nalgebra::{Point3, Vector3};
///
/// let big = Body::new(BodyId(0), 4.0, 1.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
/// let small = Body::new(BodyId(1), 2.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
///
/// let merged = merge_bodies(&big, &small);
///
/// assert_eq!(merged.id, BodyId(0));
/// assert_eq!(merged.mass, 6.0);
/// assert!((merged.radius - 2f64.cbrt()).abs() < 1e-12);
/// assert!((merged.momentum() - (big.momentum() + small.momentum())).magnitude() < 1e-12);
/// ```
pub fn merge_bodies(survivor: &Body, absorbed: &Body) -> Body {
    let total_mass = survivor.mass + absorbed.mass;
    let velocity = (survivor.momentum() + absorbed.momentum()) / total_mass;
    let radius = (survivor.volume_scale() + absorbed.volume_scale()).cbrt();

    Body {
        mass: total_mass,
        velocity,
        radius,
        ..survivor.clone()
    }
}

/// Elastic bounce along the line of centres
///
/// Only the velocity component along the normal is exchanged, so momentum
/// and kinetic energy are both conserved. Pairs already separating, or with
/// coincident centres, are left untouched.
///
/// # Returns
///
/// `true` when an impulse was applied
pub fn bounce_bodies(a: &mut Body, b: &mut Body) -> bool {
    let offset = b.position - a.position;
    let distance = offset.magnitude();
    if distance == 0.0 {
        return false;
    }

    let normal = offset / distance;
    let closing_speed = (a.velocity - b.velocity).dot(&normal);
    if closing_speed <= 0.0 {
        return false;
    }

    let scale = 2.0 * closing_speed / (a.mass + b.mass);
    a.velocity -= normal * (scale * b.mass);
    b.velocity += normal * (scale * a.mass);
    true
}

/// Resolve every overlap in one pass over the list
///
/// Pairs are visited in ascending `(i, j)` order. Absorbed bodies are
/// tombstoned in place so indices stay valid; the survivors are compacted
/// at the end in their original order.
///
/// * When the later body is absorbed the scan carries on with the next
///   later body against the grown survivor, so chains resolve in one pass.
/// * When the earlier body is absorbed its row ends; the grown later body
///   is tested against the rest when the outer index reaches it.
///
/// With equal masses the earlier body survives.
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::collisions::{CollisionOutcome, resolve_collisions};
/// use spacetime::settings::CollisionMode;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 2.0, 1.0, Point3::origin(), Vector3::zeros()),
///     Body::new(BodyId(1), 4.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros()),
/// ];
///
/// let (bodies, outcomes) = resolve_collisions(bodies, CollisionMode::Merge);
///
/// assert_eq!(bodies.len(), 1);
/// assert_eq!(bodies[0].id, BodyId(1));
/// assert_eq!(
///     outcomes,
///     vec![CollisionOutcome::Merged { survivor: BodyId(1), absorbed: BodyId(0) }]
/// );
/// ```
pub fn resolve_collisions(
    bodies: Vec<Body>,
    mode: CollisionMode,
) -> (Vec<Body>, Vec<CollisionOutcome>) {
    let mut slots: Vec<Option<Body>> = bodies.into_iter().map(Some).collect();
    let mut outcomes = Vec::new();
    let n = slots.len();

    for i in 0..n {
        if slots[i].is_none() {
            continue;
        }

        for j in (i + 1)..n {
            let (head, tail) = slots.split_at_mut(j);
            let (Some(a), Some(b)) = (head[i].as_mut(), tail[0].as_mut()) else {
                continue;
            };

            if !bodies_overlap(a, b) {
                continue;
            }

            match mode {
                CollisionMode::Merge if a.mass >= b.mass => {
                    debug!(survivor = a.id.0, absorbed = b.id.0, "bodies merged");
                    outcomes.push(CollisionOutcome::Merged {
                        survivor: a.id,
                        absorbed: b.id,
                    });
                    *a = merge_bodies(a, b);
                    tail[0] = None;
                }
                CollisionMode::Merge => {
                    debug!(survivor = b.id.0, absorbed = a.id.0, "bodies merged");
                    outcomes.push(CollisionOutcome::Merged {
                        survivor: b.id,
                        absorbed: a.id,
                    });
                    *b = merge_bodies(b, a);
                    head[i] = None;
                    break;
                }
                CollisionMode::Bounce => {
                    if bounce_bodies(a, b) {
                        debug!(a = a.id.0, b = b.id.0, "bodies bounced");
                        outcomes.push(CollisionOutcome::Bounced { a: a.id, b: b.id });
                    }
                }
            }
        }
    }

    (slots.into_iter().flatten().collect(), outcomes)
}
