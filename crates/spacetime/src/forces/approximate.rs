//! Approximate gravity for large body counts

use crate::body::Body;
use crate::forces::{DirectGravity, ForceModel};

/// Force model selected by `SimulationMode::Approximate`
///
/// This is the seam for a hierarchical method (an octree with a multipole
/// opening criterion). Until one exists it produces exactly the forces of
/// `DirectGravity`, so switching modes never changes a trajectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateGravity {
    exact: DirectGravity,
}

impl ApproximateGravity {
    pub fn new() -> Self {
        Self {
            exact: DirectGravity::new(),
        }
    }
}

impl ForceModel for ApproximateGravity {
    fn accumulate(&self, bodies: &mut [Body], g: f64) {
        // TODO: build an octree here and open nodes by angle instead of
        // summing every pair once scenes grow past a few hundred bodies.
        self.exact.accumulate(bodies, g);
    }
}
