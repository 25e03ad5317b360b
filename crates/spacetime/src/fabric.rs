//! Depth field of the space-time fabric
//!
//! Every body sinks the plane below it. The well never flattens out
//! completely, so distant bodies still tilt the whole sheet slightly.
//! Renderers sample the field on a grid; nothing here feeds back into the
//! physics.

use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Side length of the default fabric sheet
pub const FABRIC_SIZE: f64 = 20.0;

/// Default number of grid cells along each side
pub const FABRIC_SEGMENTS: usize = 100;

const WELL_STRENGTH: f64 = 1.5;
const WELL_FALLOFF: f64 = 0.2;
const FAR_FIELD_STRENGTH: f64 = 0.1;
const FAR_FIELD_DECAY: f64 = 0.05;

/// Depth contributed by a single mass at horizontal distance `distance`
///
/// `-(1.5 m / (1 + 0.2 d)) - 0.1 m e^(-0.05 d)`
pub fn well_depth(mass: f64, distance: f64) -> f64 {
    -(WELL_STRENGTH * mass / (1.0 + distance * WELL_FALLOFF))
        - mass * FAR_FIELD_STRENGTH * (-distance * FAR_FIELD_DECAY).exp()
}

/// Total depth of the fabric at `(x, z)`; the vertical coordinate of the
/// bodies is ignored
///
/// # Examples
///
/// ```
/// use spacetime::body::{Body, BodyId};
/// use spacetime::fabric::depth_at;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![Body::new(BodyId(0), 10.0, 1.0, Point3::new(0.0, -1.8, 0.0), Vector3::zeros())];
///
/// // Directly under the body: -(15) - 1
/// assert!((depth_at(&bodies, 0.0, 0.0) + 16.0).abs() < 1e-12);
/// assert!(depth_at(&bodies, 5.0, 0.0) > depth_at(&bodies, 1.0, 0.0));
/// ```
pub fn depth_at(bodies: &[Body], x: f64, z: f64) -> f64 {
    bodies
        .iter()
        .map(|body| {
            let dx = x - body.position.x;
            let dz = z - body.position.z;
            well_depth(body.mass, (dx * dx + dz * dz).sqrt())
        })
        .sum()
}

/// The depth field sampled on a square lattice centred on the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricGrid {
    pub size: f64,
    pub segments: usize,
    /// `(segments + 1)²` depths, row-major with `x` varying fastest
    pub depths: Vec<f64>,
}

impl FabricGrid {
    /// Evaluate the field at every lattice vertex
    ///
    /// # Arguments
    ///
    /// * `size` - Side length of the sheet
    /// * `segments` - Cells per side; a zero count samples the origin only
    /// * `bodies` - Bodies deforming the sheet
    pub fn sample(size: f64, segments: usize, bodies: &[Body]) -> Self {
        let vertices = segments + 1;
        let mut depths = Vec::with_capacity(vertices * vertices);

        for row in 0..vertices {
            for col in 0..vertices {
                let (x, z) = lattice_point(size, segments, col, row);
                depths.push(depth_at(bodies, x, z));
            }
        }

        Self {
            size,
            segments,
            depths,
        }
    }

    /// Default 20×20 sheet with 100 cells per side
    pub fn standard(bodies: &[Body]) -> Self {
        Self::sample(FABRIC_SIZE, FABRIC_SEGMENTS, bodies)
    }

    pub fn vertices_per_side(&self) -> usize {
        self.segments + 1
    }

    /// World `(x, z)` of the vertex in column `col` and row `row`
    pub fn vertex(&self, col: usize, row: usize) -> (f64, f64) {
        lattice_point(self.size, self.segments, col, row)
    }

    pub fn depth(&self, col: usize, row: usize) -> Option<f64> {
        let n = self.vertices_per_side();
        if col >= n || row >= n {
            return None;
        }
        self.depths.get(row * n + col).copied()
    }

    /// Deepest point of the sheet
    pub fn min_depth(&self) -> f64 {
        self.depths.iter().copied().fold(0.0, f64::min)
    }
}

fn lattice_point(size: f64, segments: usize, col: usize, row: usize) -> (f64, f64) {
    if segments == 0 {
        return (0.0, 0.0);
    }
    let cell = size / segments as f64;
    let half = size / 2.0;
    (col as f64 * cell - half, row as f64 * cell - half)
}
