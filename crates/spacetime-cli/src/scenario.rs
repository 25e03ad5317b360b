//! YAML scenario files for headless runs
//!
//! ```yaml
//! parameters:
//!   gravitationalConstant: 2.0
//!   collisionMode: merge
//! preset: binary-star     # optional, loaded before `bodies`
//! seed: 7
//! frames: 600
//! bodies:
//!   - name: Comet
//!     position: [10.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, -0.4]
//!     mass: 0.5
//!     radius: 0.1
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use spacetime::body::BodyTemplate;
use spacetime::presets::Preset;
use spacetime::settings::SimulationParameters;
use spacetime::state::SimulationState;

/// Initial state for one body
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
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

impl From<&BodyConfig> for BodyTemplate {
    fn from(cfg: &BodyConfig) -> Self {
        BodyTemplate::new(cfg.name.clone(), cfg.mass, cfg.radius, cfg.position)
            .with_velocity(cfg.velocity)
            .with_color(cfg.color.clone())
            .with_rings(cfg.has_rings)
    }
}

/// Top-level scenario document
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: SimulationParameters,
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

fn default_frames() -> u32 {
    600
}

impl ScenarioConfig {
    pub fn from_preset(preset: Preset, seed: u64) -> Self {
        Self {
            parameters: SimulationParameters::default(),
            preset: Some(preset),
            seed,
            frames: default_frames(),
            bodies: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Build a running simulation: preset bodies first, then the listed ones
    pub fn build(&self) -> SimulationState {
        let mut state = SimulationState::new(self.parameters.clone());
        if let Some(preset) = self.preset {
            state.load_preset(preset, self.seed);
        }
        for body in &self.bodies {
            state.add_body(BodyTemplate::from(body));
        }
        state.set_running(true);
        state
    }
}
