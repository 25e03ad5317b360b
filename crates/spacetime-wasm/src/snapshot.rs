//! Serializable types exchanged with JavaScript
//!
//! Vectors cross the boundary as `[x, y, z]` arrays and field names are
//! camelCase.

use nalgebra::{Point3, Vector3};
use serde::de::{DeserializeOwned, IntoDeserializer, value};
use serde::{Deserialize, Serialize};

use spacetime::body::{Body, BodyTemplate, BodyUpdate};
use spacetime::collisions::CollisionEvent;
use spacetime::diagnostics::Energy;
use spacetime::scheduler::FrameReport;
use spacetime::settings::SimulationParameters;
use spacetime::state::SimulationState;

/// Parse a lowercase mode name such as `"bounce"` through its serde spelling
pub fn parse_mode<T: DeserializeOwned>(name: &str) -> Result<T, value::Error> {
    T::deserialize(name.into_deserializer())
}

/// Body data for adding new bodies
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInput {
    #[serde(default)]
    pub name: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    pub mass: f64,
    pub radius: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub has_rings: bool,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

impl From<BodyInput> for BodyTemplate {
    fn from(input: BodyInput) -> Self {
        BodyTemplate::new(input.name, input.mass, input.radius, input.position)
            .with_velocity(input.velocity)
            .with_color(input.color)
            .with_rings(input.has_rings)
    }
}

/// Partial edit sent by a properties panel
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub velocity: Option<[f64; 3]>,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub has_rings: Option<bool>,
}

impl From<BodyPatch> for BodyUpdate {
    fn from(patch: BodyPatch) -> Self {
        BodyUpdate {
            name: patch.name,
            position: patch.position.map(Point3::from),
            velocity: patch.velocity.map(Vector3::from),
            mass: patch.mass,
            radius: patch.radius,
            color: patch.color,
            has_rings: patch.has_rings,
        }
    }
}

/// Body state for rendering
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    pub name: String,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub mass: f64,
    pub radius: f64,
    pub forces: [f64; 3],
    /// Oldest first
    pub trail: Vec<[f64; 3]>,
    pub color: String,
    pub has_rings: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.0,
            name: body.name.clone(),
            position: body.position.coords.into(),
            velocity: body.velocity.into(),
            mass: body.mass,
            radius: body.radius,
            forces: body.forces.into(),
            trail: body.trail.iter().map(|p| <[f64; 3]>::from(p.coords)).collect(),
            color: body.color.clone(),
            has_rings: body.has_rings,
        }
    }
}

/// Complete simulation state
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub time: f64,
    pub is_running: bool,
    pub selected_body_id: Option<u32>,
    pub parameters: SimulationParameters,
    pub bodies: Vec<BodySnapshot>,
    pub energy: Energy,
    pub angular_momentum: f64,
}

impl From<&SimulationState> for SimulationSnapshot {
    fn from(state: &SimulationState) -> Self {
        let engine = state.engine();

        Self {
            time: state.simulation_time(),
            is_running: state.is_running(),
            selected_body_id: state.selected_body_id().map(|id| id.0),
            parameters: state.parameters().clone(),
            bodies: state.bodies().iter().map(BodySnapshot::from).collect(),
            energy: engine.compute_energy(state.bodies()),
            angular_momentum: engine.compute_angular_momentum(state.bodies()),
        }
    }
}

/// Overlapping pair for JavaScript
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionSnapshot {
    pub body_a: u32,
    pub body_b: u32,
    pub separation: f64,
    pub contact_distance: f64,
}

impl From<&CollisionEvent> for CollisionSnapshot {
    fn from(event: &CollisionEvent) -> Self {
        Self {
            body_a: event.body_a.0,
            body_b: event.body_b.0,
            separation: event.separation,
            contact_distance: event.contact_distance,
        }
    }
}

/// Work done for a rendered frame
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub ticks_run: u32,
    pub ticks_dropped: u32,
    pub merges: usize,
    pub time: f64,
}

impl FrameSnapshot {
    pub fn new(report: FrameReport, time: f64) -> Self {
        Self {
            ticks_run: report.ticks_run,
            ticks_dropped: report.ticks_dropped,
            merges: report.merges,
            time,
        }
    }
}
