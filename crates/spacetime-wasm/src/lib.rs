//! WASM bindings for the space-time fabric simulation.
//!
//! This crate exposes the `spacetime` core to a browser renderer. The
//! renderer owns the scene graph and input handling; it calls in once per
//! animation frame and reads back snapshots.
//!
//! # Architecture
//!
//! Simulations live in thread-local storage (WASM is single-threaded).
//! Functions take the opaque simulation ID returned by `simulation_create`.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create(42);
//! simulation_load_preset(simId, "solar-system", 42);
//! simulation_set_running(simId, true);
//!
//! function frame(elapsedSeconds) {
//!   simulation_frame(simId, elapsedSeconds);
//!   const bodies = simulation_get_bodies(simId);
//!   const fabric = simulation_get_fabric(simId, 20, 100);
//!   // ...update meshes
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use spacetime::body::{Body, BodyId, BodyTemplate};
use spacetime::collisions::detect_overlaps;
use spacetime::fabric::FabricGrid;
use spacetime::presets::Preset;
use spacetime::scheduler::FixedTickScheduler;
use spacetime::settings::{CollisionMode, ParameterUpdate, SimulationMode, SimulationParameters};
use spacetime::state::SimulationState;

pub mod snapshot;


use snapshot::{
    BodyInput, BodyPatch, BodySnapshot, CollisionSnapshot, FrameSnapshot, SimulationSnapshot,
    parse_mode,
};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

struct Simulation {
    state: SimulationState,
    scheduler: FixedTickScheduler,
    /// Colours and ring flags for placed bodies
    rng: ChaChaRng,
}

impl Simulation {
    fn new(params: SimulationParameters, seed: u32) -> Self {
        Self {
            scheduler: FixedTickScheduler::for_parameters(&params),
            state: SimulationState::new(params),
            rng: ChaChaRng::seed_from_u64(seed as u64),
        }
    }
}

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn not_found(sim_id: u32) -> JsError {
    JsError::new(&format!("Simulation {} not found", sim_id))
}

fn with_simulation<T>(
    sim_id: u32,
    f: impl FnOnce(&Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(sim)
    })
}

fn with_simulation_mut<T>(
    sim_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;
        f(sim)
    })
}

fn register(simulation: Simulation) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });

    id
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a simulation with default parameters.
///
/// # Arguments
/// * `seed` - Seed for placement colours and preset randomness
#[wasm_bindgen]
pub fn simulation_create(seed: u32) -> u32 {
    register(Simulation::new(SimulationParameters::default(), seed))
}

/// Create a simulation from a (partial) parameters object.
///
/// Missing fields take their defaults, e.g. `{ gravitationalConstant: 1 }`.
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue, seed: u32) -> Result<u32, JsError> {
    let params: SimulationParameters = from_js(config)?;
    Ok(register(Simulation::new(params, seed)))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

// =============================================================================
// Body management
// =============================================================================

/// Add a body.
///
/// # Arguments
/// * `body` - `{ name?, position, velocity?, mass, radius, color?, hasRings? }`
///
/// # Returns
/// The new body's ID
#[wasm_bindgen]
pub fn simulation_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let body: BodyInput = from_js(body)?;
    with_simulation_mut(sim_id, |sim| {
        Ok(sim.state.add_body(BodyTemplate::from(body)).0)
    })
}

/// Add a body from a press-drag-release gesture on the fabric.
///
/// # Arguments
/// * `x`, `z` - Where the press landed
/// * `drag_x`, `drag_z` - Drag from press to release
/// * `hold_seconds` - How long the press was held
#[wasm_bindgen]
pub fn simulation_place_body(
    sim_id: u32,
    x: f64,
    z: f64,
    drag_x: f64,
    drag_z: f64,
    hold_seconds: f64,
) -> Result<u32, JsError> {
    with_simulation_mut(sim_id, |sim| {
        let id = sim.state.place_body(
            Point3::new(x, 0.0, z),
            Vector3::new(drag_x, 0.0, drag_z),
            hold_seconds,
            &mut sim.rng,
        );
        Ok(id.0)
    })
}

/// Remove a body.
///
/// # Returns
/// true if the body was found and removed
#[wasm_bindgen]
pub fn simulation_remove_body(sim_id: u32, body_id: u32) -> Result<bool, JsError> {
    with_simulation_mut(sim_id, |sim| {
        Ok(sim.state.remove_body(BodyId(body_id)).is_some())
    })
}

/// Edit a body's properties; omitted fields are left unchanged.
///
/// # Returns
/// true if the body exists
#[wasm_bindgen]
pub fn simulation_update_body(sim_id: u32, body_id: u32, patch: JsValue) -> Result<bool, JsError> {
    let patch: BodyPatch = from_js(patch)?;
    with_simulation_mut(sim_id, |sim| {
        Ok(sim.state.update_body(BodyId(body_id), patch.into()))
    })
}

/// Select a body, or clear the selection with `undefined`.
///
/// # Returns
/// false if the body does not exist
#[wasm_bindgen]
pub fn simulation_select_body(sim_id: u32, body_id: Option<u32>) -> Result<bool, JsError> {
    with_simulation_mut(sim_id, |sim| Ok(sim.state.select_body(body_id.map(BodyId))))
}

// =============================================================================
// Settings and control
// =============================================================================

/// Apply a partial settings object, e.g. `{ collisionMode: "bounce" }`.
#[wasm_bindgen]
pub fn simulation_update_settings(sim_id: u32, update: JsValue) -> Result<(), JsError> {
    let update: ParameterUpdate = from_js(update)?;
    simulation_update(sim_id, update)
}

#[wasm_bindgen]
pub fn simulation_set_gravitational_constant(sim_id: u32, value: f64) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.set_gravitational_constant(value);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn simulation_set_time_multiplier(sim_id: u32, value: f64) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.set_time_multiplier(value);
        Ok(())
    })
}

/// Select the force algorithm: "exact" or "approximate".
#[wasm_bindgen]
pub fn simulation_set_simulation_mode(sim_id: u32, mode: &str) -> Result<(), JsError> {
    let mode: SimulationMode = parse_mode(mode).map_err(|e| JsError::new(&e.to_string()))?;
    simulation_update(sim_id, ParameterUpdate {
        simulation_mode: Some(mode),
        ..Default::default()
    })
}

/// Select the collision response: "merge" or "bounce".
#[wasm_bindgen]
pub fn simulation_set_collision_mode(sim_id: u32, mode: &str) -> Result<(), JsError> {
    let mode: CollisionMode = parse_mode(mode).map_err(|e| JsError::new(&e.to_string()))?;
    simulation_update(sim_id, ParameterUpdate {
        collision_mode: Some(mode),
        ..Default::default()
    })
}

fn simulation_update(sim_id: u32, update: ParameterUpdate) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.update_parameters(&update);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn simulation_set_running(sim_id: u32, running: bool) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.set_running(running);
        Ok(())
    })
}

/// Flip between running and paused.
///
/// # Returns
/// true if the simulation is now running
#[wasm_bindgen]
pub fn simulation_toggle(sim_id: u32) -> Result<bool, JsError> {
    with_simulation_mut(sim_id, |sim| Ok(sim.state.toggle_running()))
}

/// Remove every body and rewind to time zero, paused.
#[wasm_bindgen]
pub fn simulation_reset(sim_id: u32) -> Result<(), JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.reset();
        Ok(())
    })
}

/// Replace all bodies with a preset.
///
/// # Arguments
/// * `name` - "solar-system", "binary-star" or "planetary-ring"
/// * `seed` - Seed for the preset's randomness
///
/// # Returns
/// Number of bodies loaded
#[wasm_bindgen]
pub fn simulation_load_preset(sim_id: u32, name: &str, seed: u32) -> Result<usize, JsError> {
    let preset =
        Preset::from_name(name).ok_or_else(|| JsError::new(&format!("Unknown preset {}", name)))?;
    with_simulation_mut(sim_id, |sim| {
        sim.state.load_preset(preset, seed as u64);
        Ok(sim.state.body_count())
    })
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Run the ticks due after `elapsed` seconds of wall-clock time.
///
/// Call once per animation frame. Does nothing while paused.
#[wasm_bindgen]
pub fn simulation_frame(sim_id: u32, elapsed: f64) -> Result<JsValue, JsError> {
    with_simulation_mut(sim_id, |sim| {
        let report = sim.scheduler.frame(&mut sim.state, elapsed);
        to_js(&FrameSnapshot::new(report, sim.state.simulation_time()))
    })
}

/// Advance by one tick, even while paused.
///
/// # Returns
/// Current simulation time
#[wasm_bindgen]
pub fn simulation_step(sim_id: u32) -> Result<f64, JsError> {
    with_simulation_mut(sim_id, |sim| {
        sim.state.advance();
        Ok(sim.state.simulation_time())
    })
}

/// Advance by `n_steps` ticks, even while paused.
///
/// # Returns
/// Current simulation time
#[wasm_bindgen]
pub fn simulation_integrate(sim_id: u32, n_steps: u32) -> Result<f64, JsError> {
    with_simulation_mut(sim_id, |sim| {
        spacetime::scheduler::run_frames(&mut sim.state, n_steps);
        Ok(sim.state.simulation_time())
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies for rendering, including trails.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let bodies: Vec<BodySnapshot> = sim.state.bodies().iter().map(BodySnapshot::from).collect();
        to_js(&bodies)
    })
}

/// Get the complete simulation state snapshot.
#[wasm_bindgen]
pub fn simulation_get_state(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| to_js(&SimulationSnapshot::from(&sim.state)))
}

/// Get energy, angular momentum and selected-body figures.
#[wasm_bindgen]
pub fn simulation_get_analytics(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| to_js(&sim.state.analytics()))
}

#[wasm_bindgen]
pub fn simulation_get_time(sim_id: u32) -> Result<f64, JsError> {
    with_simulation(sim_id, |sim| Ok(sim.state.simulation_time()))
}

#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    with_simulation(sim_id, |sim| Ok(sim.state.body_count()))
}

/// Two-body orbital period of `body_a` and `body_b` at their current separation.
#[wasm_bindgen]
pub fn simulation_orbital_period(sim_id: u32, body_a: u32, body_b: u32) -> Result<f64, JsError> {
    with_simulation(sim_id, |sim| {
        let a = find_body(sim, body_a)?;
        let b = find_body(sim, body_b)?;
        Ok(sim.state.engine().orbital_period(a, b))
    })
}

/// Escape velocity from `body_id` at `distance`.
#[wasm_bindgen]
pub fn simulation_escape_velocity(sim_id: u32, body_id: u32, distance: f64) -> Result<f64, JsError> {
    with_simulation(sim_id, |sim| {
        let central = find_body(sim, body_id)?;
        Ok(sim.state.engine().escape_velocity(central, distance))
    })
}

fn find_body(sim: &Simulation, body_id: u32) -> Result<&Body, JsError> {
    sim.state
        .get_body(BodyId(body_id))
        .ok_or_else(|| JsError::new(&format!("Body {} not found", body_id)))
}

/// Fabric depths on a `(segments + 1)²` grid of side `size`.
#[wasm_bindgen]
pub fn simulation_get_fabric(sim_id: u32, size: f64, segments: usize) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        to_js(&FabricGrid::sample(size, segments, sim.state.bodies()))
    })
}

/// Currently overlapping pairs, without resolving them.
#[wasm_bindgen]
pub fn simulation_detect_collisions(sim_id: u32) -> Result<JsValue, JsError> {
    with_simulation(sim_id, |sim| {
        let snapshots: Vec<CollisionSnapshot> = detect_overlaps(sim.state.bodies())
            .iter()
            .map(CollisionSnapshot::from)
            .collect();
        to_js(&snapshots)
    })
}
