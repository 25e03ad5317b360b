//! The simulation controller
//!
//! `SimulationState` owns the body list between ticks. Collaborators (a UI,
//! the CLI, the wasm bindings) change it only through the command methods
//! below and read it through accessors and `analytics`.

use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::body::{Body, BodyId, BodyTemplate, BodyUpdate};
use crate::collisions::CollisionOutcome;
use crate::diagnostics::Energy;
use crate::engine::PhysicsEngine;
use crate::presets::Preset;
use crate::settings::{ParameterUpdate, SimulationParameters};

/// Summary of one executed tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Simulated time after the tick
    pub simulation_time: f64,
    pub body_count: usize,
    pub collisions: Vec<CollisionOutcome>,
}

impl TickReport {
    /// Number of bodies absorbed during the tick
    pub fn merges(&self) -> usize {
        self.collisions
            .iter()
            .filter(|outcome| outcome.absorbed().is_some())
            .count()
    }
}

/// Relation of the selected body to the heaviest other body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAnalytics {
    pub id: u32,
    pub distance: f64,
    pub orbital_period: f64,
    pub escape_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedBodyAnalytics {
    pub id: u32,
    pub speed: f64,
    pub distance_from_origin: f64,
    pub force_magnitude: f64,
    /// `None` when the selected body is alone
    pub primary: Option<PrimaryAnalytics>,
}

/// Live figures shown next to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub body_count: usize,
    pub simulation_time: f64,
    pub energy: Energy,
    pub angular_momentum: f64,
    pub selected: Option<SelectedBodyAnalytics>,
}

/// Complete state of a running simulation
///
/// # Examples
///
/// ```
/// use spacetime::body::BodyTemplate;
/// use spacetime::state::SimulationState;
///
/// let mut state = SimulationState::default();
/// let sun = state.add_body(BodyTemplate::new("Sun", 20.0, 1.5, [0.0, 0.0, 0.0]));
/// state.add_body(BodyTemplate::new("Earth", 3.0, 0.4, [5.0, 0.0, 0.0]).with_velocity([0.0, 0.0, 0.3]));
///
/// // Paused by default
/// assert!(state.tick().is_none());
///
/// state.set_running(true);
/// let report = state.tick().unwrap();
///
/// assert_eq!(report.body_count, 2);
/// assert!(state.simulation_time() > 0.0);
/// assert!(state.get_body(sun).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    bodies: Vec<Body>,
    selected: Option<BodyId>,
    running: bool,
    time: f64,
    next_id: u32,
    engine: PhysicsEngine,
}

impl SimulationState {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            engine: PhysicsEngine::new(params),
            ..Default::default()
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn parameters(&self) -> &SimulationParameters {
        self.engine.parameters()
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn simulation_time(&self) -> f64 {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Adds a body built from `template` and returns its new id
    pub fn add_body(&mut self, template: BodyTemplate) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;

        debug!(id = id.0, name = %template.name, mass = template.mass, "body added");
        self.bodies.push(template.into_body(id));
        id
    }

    /// Adds a body from a press-drag-release gesture
    ///
    /// # Arguments
    ///
    /// * `anchor` - Point where the press landed
    /// * `drag` - Drag vector from press to release
    /// * `hold_seconds` - How long the press was held
    /// * `rng` - Source for the colour and ring flag
    pub fn place_body<R: Rng>(
        &mut self,
        anchor: Point3<f64>,
        drag: Vector3<f64>,
        hold_seconds: f64,
        rng: &mut R,
    ) -> BodyId {
        let name = format!("Planet {:04}", self.next_id);
        let template = BodyTemplate::from_placement(anchor, drag, hold_seconds, name, rng);
        self.add_body(template)
    }

    /// Removes a body, clearing the selection if it pointed at it
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let removed = self
            .bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx));

        if removed.is_some() {
            debug!(id = id.0, "body removed");
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
        removed
    }

    /// Applies a manual edit; returns false for unknown ids
    pub fn update_body(&mut self, id: BodyId, update: BodyUpdate) -> bool {
        match self.get_body_mut(id) {
            Some(body) => {
                update.apply_to(body);
                true
            }
            None => false,
        }
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Selects a body, or clears the selection with `None`
    ///
    /// Unknown ids are refused and leave the selection unchanged.
    pub fn select_body(&mut self, id: Option<BodyId>) -> bool {
        match id {
            Some(id) if self.get_body(id).is_none() => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    pub fn selected_body_id(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn selected_body(&self) -> Option<&Body> {
        self.selected.and_then(|id| self.get_body(id))
    }

    pub fn update_parameters(&mut self, update: &ParameterUpdate) {
        self.engine.apply(update);
    }

    pub fn set_gravitational_constant(&mut self, value: f64) {
        self.engine.set_gravitational_constant(value);
    }

    pub fn set_time_multiplier(&mut self, value: f64) {
        self.engine.set_time_multiplier(value);
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flips the running flag and returns the new value
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Empties the simulation; parameters are kept
    pub fn reset(&mut self) {
        info!(bodies = self.bodies.len(), "simulation reset");
        self.bodies.clear();
        self.selected = None;
        self.running = false;
        self.time = 0.0;
    }

    /// Replaces every body with the preset's, paused at time zero
    ///
    /// The same seed always yields the same scene.
    pub fn load_preset(&mut self, preset: Preset, seed: u64) {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let templates = preset.templates(&mut rng);

        self.bodies.clear();
        self.selected = None;
        self.running = false;
        self.time = 0.0;
        for template in templates {
            self.add_body(template);
        }

        info!(preset = %preset, bodies = self.bodies.len(), seed, "preset loaded");
    }

    /// Runs one tick if the simulation is running
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        Some(self.advance())
    }

    /// Runs one tick regardless of the running flag
    pub fn advance(&mut self) -> TickReport {
        let bodies = std::mem::take(&mut self.bodies);
        let outcome = self.engine.step(bodies);
        self.bodies = outcome.bodies;

        if let Some(selected) = self.selected {
            let absorbed = outcome
                .collisions
                .iter()
                .any(|collision| collision.absorbed() == Some(selected));
            if absorbed {
                debug!(id = selected.0, "selected body absorbed");
                self.selected = None;
            }
        }

        self.time += self.engine.parameters().effective_dt();

        TickReport {
            simulation_time: self.time,
            body_count: self.bodies.len(),
            collisions: outcome.collisions,
        }
    }

    pub fn analytics(&self) -> Analytics {
        Analytics {
            body_count: self.bodies.len(),
            simulation_time: self.time,
            energy: self.engine.compute_energy(&self.bodies),
            angular_momentum: self.engine.compute_angular_momentum(&self.bodies),
            selected: self.selected_body().map(|body| self.selected_analytics(body)),
        }
    }

    fn selected_analytics(&self, body: &Body) -> SelectedBodyAnalytics {
        let primary = self
            .bodies
            .iter()
            .filter(|other| other.id != body.id)
            .max_by(|a, b| a.mass.total_cmp(&b.mass))
            .map(|primary| {
                let distance = body.distance_to(primary);
                PrimaryAnalytics {
                    id: primary.id.0,
                    distance,
                    orbital_period: self.engine.orbital_period(body, primary),
                    escape_velocity: self.engine.escape_velocity(primary, distance),
                }
            });

        SelectedBodyAnalytics {
            id: body.id.0,
            speed: body.speed(),
            distance_from_origin: body.distance_from_origin(),
            force_magnitude: body.force_magnitude(),
            primary,
        }
    }
}
