//! Simulation parameters and the modes that select force and collision handling
//!
//! Parameters deserialize from partial documents (YAML scenario files or JS
//! objects): any missing field falls back to its default.

use serde::{Deserialize, Serialize};

/// Default gravitational constant (simulation units, not SI)
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 2.0;

/// Fixed time advanced per tick before the multiplier is applied
pub const DEFAULT_TIME_STEP: f64 = 0.016;

/// Default bound on the number of positions kept in a trail
pub const DEFAULT_MAX_TRAIL_LENGTH: usize = 1000;

/// Lowest allowed value of the vertical (fabric-normal) coordinate
pub const FABRIC_FLOOR: f64 = -1.8;

/// Pairs closer than this exert no force on each other
pub const MIN_INTERACTION_DISTANCE: f64 = 0.1;

/// Force algorithm used by the accumulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// Direct O(N²) pairwise summation
    #[default]
    Exact,
    /// Hierarchical approximation (currently computed exactly)
    Approximate,
}

/// Response applied to overlapping bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Inelastic merge into the heavier body
    #[default]
    Merge,
    /// Elastic reflection along the line of centres
    Bounce,
}

/// Runtime parameters consumed by every step
///
/// # Examples
///
/// ```
/// use spacetime::settings::{SimulationParameters, SimulationMode};
///
/// let params = SimulationParameters::default();
/// assert_eq!(params.gravitational_constant, 2.0);
/// assert_eq!(params.simulation_mode, SimulationMode::Exact);
/// assert!((params.effective_dt() - 0.016).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: f64,
    /// Fixed for the lifetime of a simulation; there is no setter for it
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    #[serde(default)]
    pub simulation_mode: SimulationMode,
    #[serde(default)]
    pub collision_mode: CollisionMode,
    #[serde(default = "default_max_trail_length")]
    pub max_trail_length: usize,
    #[serde(default = "default_fabric_floor")]
    pub fabric_floor: f64,
}

fn default_gravitational_constant() -> f64 {
    DEFAULT_GRAVITATIONAL_CONSTANT
}

fn default_time_multiplier() -> f64 {
    1.0
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}

fn default_max_trail_length() -> usize {
    DEFAULT_MAX_TRAIL_LENGTH
}

fn default_fabric_floor() -> f64 {
    FABRIC_FLOOR
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravitational_constant: default_gravitational_constant(),
            time_multiplier: default_time_multiplier(),
            time_step: default_time_step(),
            simulation_mode: SimulationMode::default(),
            collision_mode: CollisionMode::default(),
            max_trail_length: default_max_trail_length(),
            fabric_floor: default_fabric_floor(),
        }
    }
}

impl SimulationParameters {
    /// Time advanced by one tick: `time_step * time_multiplier`
    pub fn effective_dt(&self) -> f64 {
        self.time_step * self.time_multiplier
    }

    /// Apply a partial update; absent fields are left untouched
    ///
    /// Values are not validated.
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(g) = update.gravitational_constant {
            self.gravitational_constant = g;
        }
        if let Some(multiplier) = update.time_multiplier {
            self.time_multiplier = multiplier;
        }
        if let Some(mode) = update.simulation_mode {
            self.simulation_mode = mode;
        }
        if let Some(mode) = update.collision_mode {
            self.collision_mode = mode;
        }
        if let Some(max) = update.max_trail_length {
            self.max_trail_length = max;
        }
    }
}

/// Partial settings patch, mirroring what a settings panel sends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUpdate {
    #[serde(default)]
    pub gravitational_constant: Option<f64>,
    #[serde(default)]
    pub time_multiplier: Option<f64>,
    #[serde(default)]
    pub simulation_mode: Option<SimulationMode>,
    #[serde(default)]
    pub collision_mode: Option<CollisionMode>,
    #[serde(default)]
    pub max_trail_length: Option<usize>,
}
