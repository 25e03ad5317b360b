use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::body::{BodyId, BodyTemplate, BodyUpdate};
use crate::presets::Preset;
use crate::settings::{CollisionMode, ParameterUpdate, SimulationParameters};
use crate::state::SimulationState;

fn two_body_state() -> (SimulationState, BodyId, BodyId) {
    let mut state = SimulationState::default();
    let sun = state.add_body(BodyTemplate::new("Sun", 20.0, 1.5, [0.0, 0.0, 0.0]));
    let earth = state.add_body(
        BodyTemplate::new("Earth", 3.0, 0.4, [5.0, 0.0, 0.0]).with_velocity([0.0, 0.0, 0.3]),
    );
    (state, sun, earth)
}

#[test]
fn test_new_state() {
    let state = SimulationState::default();

    assert_eq!(state.body_count(), 0);
    assert_eq!(state.simulation_time(), 0.0);
    assert!(!state.is_running());
    assert_eq!(state.parameters(), &SimulationParameters::default());
}

#[test]
fn test_add_body_assigns_fresh_ids() {
    let (state, sun, earth) = two_body_state();

    assert_eq!(sun, BodyId(0));
    assert_eq!(earth, BodyId(1));
    assert_eq!(state.body_count(), 2);

    let body = state.get_body(earth).unwrap();
    assert_eq!(body.name, "Earth");
    assert!(body.trail.is_empty());
    assert_eq!(body.forces, Vector3::zeros());
}

#[test]
fn test_ids_not_reused_after_removal() {
    let (mut state, _, earth) = two_body_state();

    state.remove_body(earth);
    let next = state.add_body(BodyTemplate::new("Moon", 0.5, 0.1, [6.0, 0.0, 0.0]));

    assert_eq!(next, BodyId(2));
}

#[test]
fn test_remove_body_clears_selection() {
    let (mut state, sun, earth) = two_body_state();

    assert!(state.select_body(Some(earth)));
    let removed = state.remove_body(earth).unwrap();

    assert_eq!(removed.id, earth);
    assert_eq!(state.selected_body_id(), None);

    // Removing another body keeps an unrelated selection
    let (mut state, _, _) = two_body_state();
    state.select_body(Some(sun));
    state.remove_body(earth);
    assert_eq!(state.selected_body_id(), Some(sun));
}

#[test]
fn test_remove_nonexistent_body() {
    let (mut state, _, _) = two_body_state();

    assert!(state.remove_body(BodyId(99)).is_none());
    assert_eq!(state.body_count(), 2);
}

#[test]
fn test_update_body() {
    let (mut state, _, earth) = two_body_state();

    let updated = state.update_body(
        earth,
        BodyUpdate {
            mass: Some(6.0),
            position: Some(Point3::new(1.0, 2.0, 3.0)),
            ..Default::default()
        },
    );

    assert!(updated);
    let body = state.get_body(earth).unwrap();
    assert_eq!(body.mass, 6.0);
    assert_eq!(body.position, Point3::new(1.0, 2.0, 3.0));
    assert_eq!(body.radius, 0.4);

    assert!(!state.update_body(BodyId(42), BodyUpdate::default()));
}

#[test]
fn test_select_unknown_body_refused() {
    let (mut state, sun, _) = two_body_state();

    assert!(state.select_body(Some(sun)));
    assert!(!state.select_body(Some(BodyId(7))));
    assert_eq!(state.selected_body_id(), Some(sun));

    assert!(state.select_body(None));
    assert!(state.selected_body().is_none());
}

#[test]
fn test_tick_gated_by_running_flag() {
    let (mut state, _, earth) = two_body_state();
    let before = state.get_body(earth).unwrap().position;

    assert!(state.tick().is_none());
    assert_eq!(state.get_body(earth).unwrap().position, before);
    assert_eq!(state.simulation_time(), 0.0);

    assert!(state.toggle_running());
    assert!(state.tick().is_some());
    assert_ne!(state.get_body(earth).unwrap().position, before);

    assert!(!state.toggle_running());
    assert!(state.tick().is_none());
}

#[test]
fn test_advance_while_paused_and_time() {
    let (mut state, _, _) = two_body_state();
    state.set_time_multiplier(2.0);

    let report = state.advance();
    state.advance();

    assert!(!state.is_running());
    assert_relative_eq!(report.simulation_time, 0.032, epsilon = 1e-15);
    assert_relative_eq!(state.simulation_time(), 0.064, epsilon = 1e-15);
}

#[test]
fn test_merge_invalidates_selection() {
    let mut state = SimulationState::default();
    let big = state.add_body(BodyTemplate::new("Big", 4.0, 1.0, [0.0, 0.0, 0.0]));
    let small = state.add_body(BodyTemplate::new("Small", 2.0, 1.0, [0.5, 0.0, 0.0]));
    state.select_body(Some(small));

    let report = state.advance();

    assert_eq!(report.merges(), 1);
    assert_eq!(report.body_count, 1);
    assert_eq!(state.selected_body_id(), None);
    assert!(state.get_body(big).is_some());
    assert_eq!(state.get_body(big).unwrap().mass, 6.0);
}

#[test]
fn test_merge_keeps_survivor_selected() {
    let mut state = SimulationState::default();
    let big = state.add_body(BodyTemplate::new("Big", 4.0, 1.0, [0.0, 0.0, 0.0]));
    state.add_body(BodyTemplate::new("Small", 2.0, 1.0, [0.5, 0.0, 0.0]));
    state.select_body(Some(big));

    state.advance();

    assert_eq!(state.selected_body_id(), Some(big));
}

#[test]
fn test_bounce_mode_through_parameters() {
    let mut state = SimulationState::default();
    state.update_parameters(&ParameterUpdate {
        collision_mode: Some(CollisionMode::Bounce),
        ..Default::default()
    });
    state.add_body(
        BodyTemplate::new("A", 4.0, 1.0, [0.0, 0.0, 0.0]).with_velocity([1.0, 0.0, 0.0]),
    );
    state.add_body(
        BodyTemplate::new("B", 2.0, 1.0, [1.0, 0.0, 0.0]).with_velocity([-1.0, 0.0, 0.0]),
    );

    let report = state.advance();

    assert_eq!(report.merges(), 0);
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(state.body_count(), 2);
}

#[test]
fn test_reset() {
    let (mut state, sun, _) = two_body_state();
    state.set_gravitational_constant(5.0);
    state.select_body(Some(sun));
    state.set_running(true);
    state.tick();

    state.reset();

    assert_eq!(state.body_count(), 0);
    assert_eq!(state.selected_body_id(), None);
    assert!(!state.is_running());
    assert_eq!(state.simulation_time(), 0.0);
    // Settings survive a reset
    assert_eq!(state.parameters().gravitational_constant, 5.0);
}

#[test]
fn test_load_preset_replaces_bodies() {
    let (mut state, sun, _) = two_body_state();
    state.select_body(Some(sun));
    state.set_running(true);
    state.tick();

    state.load_preset(Preset::PlanetaryRing, 3);

    assert_eq!(state.body_count(), 21);
    assert_eq!(state.selected_body_id(), None);
    assert!(!state.is_running());
    assert_eq!(state.simulation_time(), 0.0);
    assert!(state.get_body(sun).is_none());

    let mut ids: Vec<_> = state.bodies().iter().map(|b| b.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 21);
}

#[test]
fn test_load_preset_reproducible() {
    let mut a = SimulationState::default();
    let mut b = SimulationState::default();
    a.load_preset(Preset::PlanetaryRing, 11);
    b.load_preset(Preset::PlanetaryRing, 11);

    assert_eq!(a.bodies(), b.bodies());
}

#[test]
fn test_place_body() {
    let mut state = SimulationState::default();
    let mut rng = ChaChaRng::seed_from_u64(5);

    let id = state.place_body(
        Point3::new(2.0, 1.0, -1.0),
        Vector3::new(1.0, 0.0, 0.5),
        2.0,
        &mut rng,
    );

    let body = state.get_body(id).unwrap();
    assert_eq!(body.name, "Planet 0000");
    assert_eq!(body.mass, 7.0);
    assert_eq!(body.position, Point3::new(2.0, 0.0, -1.0));
    assert_eq!(body.velocity, Vector3::new(0.5, 0.0, 0.25));
}

#[test]
fn test_analytics_without_selection() {
    let (state, _, _) = two_body_state();

    let analytics = state.analytics();

    assert_eq!(analytics.body_count, 2);
    assert!(analytics.selected.is_none());
    assert_relative_eq!(analytics.energy.kinetic, 0.5 * 3.0 * 0.09, epsilon = 1e-12);
    assert_relative_eq!(analytics.energy.potential, -2.0 * 60.0 / 5.0, epsilon = 1e-12);
    assert_relative_eq!(analytics.angular_momentum, 4.5, epsilon = 1e-12);
}

#[test]
fn test_analytics_selected_body() {
    let (mut state, sun, earth) = two_body_state();
    state.add_body(BodyTemplate::new("Moon", 0.5, 0.1, [5.5, 0.0, 0.0]));
    state.select_body(Some(earth));

    let selected = state.analytics().selected.unwrap();

    assert_eq!(selected.id, earth.0);
    assert_relative_eq!(selected.speed, 0.3, epsilon = 1e-12);
    assert_relative_eq!(selected.distance_from_origin, 5.0, epsilon = 1e-12);

    let primary = selected.primary.unwrap();
    assert_eq!(primary.id, sun.0);
    assert_relative_eq!(primary.distance, 5.0, epsilon = 1e-12);
    assert_relative_eq!(primary.escape_velocity, 4.0, epsilon = 1e-12);
    assert!(primary.orbital_period > 0.0);
}

#[test]
fn test_analytics_lone_selected_body() {
    let mut state = SimulationState::default();
    let id = state.add_body(BodyTemplate::new("Alone", 1.0, 0.2, [0.0, 0.0, 0.0]));
    state.select_body(Some(id));

    let selected = state.analytics().selected.unwrap();

    assert!(selected.primary.is_none());
}
