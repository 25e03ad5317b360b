use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::collisions::CollisionOutcome;
use crate::engine::*;
use crate::settings::{CollisionMode, FABRIC_FLOOR, ParameterUpdate, SimulationParameters};

fn body(id: u32, mass: f64, radius: f64, position: [f64; 3], velocity: [f64; 3]) -> Body {
    Body::new(
        BodyId(id),
        mass,
        radius,
        Point3::from(position),
        Vector3::from(velocity),
    )
}

#[test]
fn test_step_scenario_force_and_kick() {
    let bodies = vec![
        body(0, 10.0, 0.5, [0.0, -1.8, 0.0], [0.0, 0.0, 0.0]),
        body(1, 1.0, 0.5, [5.0, -1.8, 0.0], [0.0, 0.0, 0.0]),
    ];
    let params = SimulationParameters {
        gravitational_constant: 1.0,
        time_multiplier: 2.0,
        ..Default::default()
    };

    let next = step(bodies, &params);

    assert_relative_eq!(next[0].forces.magnitude(), 0.4, epsilon = 1e-12);
    let dt = params.time_step * params.time_multiplier;
    assert_relative_eq!(next[0].velocity.x, 0.4 / 10.0 * dt, epsilon = 1e-15);
    assert_relative_eq!(next[1].velocity.x, -0.4 / 1.0 * dt, epsilon = 1e-15);
    assert_eq!(next[0].velocity.y, 0.0);
    assert_eq!(next[0].velocity.z, 0.0);
}

#[test]
fn test_step_runs_collisions_after_integration() {
    // Just out of contact; one tick of drift closes the gap
    let bodies = vec![
        body(0, 4.0, 1.0, [0.0, -1.8, 0.0], [10.0, 0.0, 0.0]),
        body(1, 2.0, 1.0, [2.05, -1.8, 0.0], [-10.0, 0.0, 0.0]),
    ];

    let outcome = advance(bodies, &SimulationParameters::default());

    assert_eq!(outcome.bodies.len(), 1);
    assert_eq!(outcome.bodies[0].mass, 6.0);
    assert_eq!(
        outcome.collisions,
        vec![CollisionOutcome::Merged {
            survivor: BodyId(0),
            absorbed: BodyId(1)
        }]
    );
}

#[test]
fn test_single_body_drifts() {
    let start = Point3::new(1.0, -1.8, 2.0);
    let velocity = Vector3::new(0.5, 0.0, -0.25);
    let mut bodies = vec![Body::new(BodyId(0), 3.0, 0.3, start, velocity)];
    let params = SimulationParameters::default();

    let n = 100;
    for _ in 0..n {
        bodies = step(bodies, &params);
        assert_eq!(bodies[0].forces, Vector3::zeros());
        assert_eq!(bodies[0].velocity, velocity);
    }

    let expected = start + velocity * params.effective_dt() * n as f64;
    assert_relative_eq!(bodies[0].position.x, expected.x, epsilon = 1e-9);
    assert_relative_eq!(bodies[0].position.z, expected.z, epsilon = 1e-9);
    assert_eq!(bodies[0].position.y, FABRIC_FLOOR);
}

#[test]
fn test_step_empty_list() {
    let outcome = advance(Vec::new(), &SimulationParameters::default());
    assert!(outcome.bodies.is_empty());
    assert!(outcome.collisions.is_empty());
}

#[test]
fn test_engine_setters_take_effect_next_step() {
    let bodies = vec![
        body(0, 10.0, 0.5, [0.0, -1.8, 0.0], [0.0, 0.0, 0.0]),
        body(1, 1.0, 0.5, [5.0, -1.8, 0.0], [0.0, 0.0, 0.0]),
    ];

    let mut engine = PhysicsEngine::default();
    let weak = engine.step(bodies.clone());

    engine.set_gravitational_constant(8.0);
    let strong = engine.step(bodies.clone());

    assert_relative_eq!(
        strong.bodies[0].forces.magnitude(),
        4.0 * weak.bodies[0].forces.magnitude(),
        epsilon = 1e-12
    );

    engine.set_time_multiplier(0.0);
    let frozen = engine.step(bodies.clone());
    assert_eq!(frozen.bodies[0].position, bodies[0].position);
    assert_eq!(frozen.bodies[0].velocity, Vector3::zeros());
}

#[test]
fn test_engine_accepts_unvalidated_values() {
    let mut engine = PhysicsEngine::default();
    engine.set_gravitational_constant(-1.0);
    engine.set_time_multiplier(-3.0);

    assert_eq!(engine.parameters().gravitational_constant, -1.0);
    assert_eq!(engine.parameters().time_multiplier, -3.0);
}

#[test]
fn test_engine_apply_update() {
    let mut engine = PhysicsEngine::default();
    engine.apply(&ParameterUpdate {
        collision_mode: Some(CollisionMode::Bounce),
        max_trail_length: Some(50),
        ..Default::default()
    });

    assert_eq!(engine.parameters().collision_mode, CollisionMode::Bounce);
    assert_eq!(engine.parameters().max_trail_length, 50);
    assert_eq!(engine.parameters().gravitational_constant, 2.0);
}

#[test]
fn test_engine_bounce_mode_keeps_bodies() {
    let bodies = vec![
        body(0, 4.0, 1.0, [0.0, -1.8, 0.0], [1.0, 0.0, 0.0]),
        body(1, 2.0, 1.0, [1.0, -1.8, 0.0], [-1.0, 0.0, 0.0]),
    ];

    let mut engine = PhysicsEngine::default();
    engine.set_collision_mode(CollisionMode::Bounce);
    let outcome = engine.step(bodies);

    assert_eq!(outcome.bodies.len(), 2);
    assert!(outcome.bodies[0].velocity.x < outcome.bodies[1].velocity.x);
}

#[test]
fn test_engine_diagnostics_use_current_g() {
    let a = body(0, 20.0, 1.5, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
    let b = body(1, 3.0, 0.4, [5.0, 0.0, 0.0], [0.0, 0.0, 0.3]);
    let bodies = vec![a.clone(), b.clone()];

    let mut engine = PhysicsEngine::default();
    let before = engine.compute_energy(&bodies);
    engine.set_gravitational_constant(4.0);
    let after = engine.compute_energy(&bodies);

    assert_relative_eq!(after.potential, 2.0 * before.potential, epsilon = 1e-12);
    assert_eq!(after.kinetic, before.kinetic);
    assert_relative_eq!(engine.escape_velocity(&a, 5.0), 32f64.sqrt(), epsilon = 1e-12);
    assert!(engine.orbital_period(&a, &b) > 0.0);
    assert_relative_eq!(engine.compute_angular_momentum(&bodies), 4.5, epsilon = 1e-12);
}
