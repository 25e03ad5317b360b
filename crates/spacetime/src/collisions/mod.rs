//! Collision detection and resolution
//!
//! Overlapping bodies either merge (mass, momentum and volume conserved) or
//! bounce elastically, depending on `CollisionMode`.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionEvent, bodies_overlap, detect_overlaps};
pub use resolution::{CollisionOutcome, bounce_bodies, merge_bodies, resolve_collisions};
