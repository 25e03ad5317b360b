use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::settings::{FABRIC_FLOOR, SimulationParameters};

fn resting(id: u32, mass: f64, position: [f64; 3]) -> Body {
    Body::new(BodyId(id), mass, 0.2, Point3::from(position), Vector3::zeros())
}

#[test]
fn test_velocity_then_position() {
    let mut bodies = vec![resting(0, 2.0, [0.0, 0.0, 0.0])];
    bodies[0].forces = Vector3::new(4.0, 0.0, -2.0);

    let params = SimulationParameters {
        time_step: 0.5,
        time_multiplier: 2.0,
        ..Default::default()
    };
    SemiImplicitEuler.advance(&mut bodies, &params);

    // dt = 1.0, a = (2, 0, -1)
    assert_eq!(bodies[0].velocity, Vector3::new(2.0, 0.0, -1.0));
    // Position uses the already updated velocity
    assert_eq!(bodies[0].position, Point3::new(2.0, 0.0, -1.0));
}

#[test]
fn test_floor_clamp() {
    let mut bodies = vec![Body::new(
        BodyId(0),
        1.0,
        0.2,
        Point3::new(0.0, -1.7, 0.0),
        Vector3::new(0.0, -50.0, 0.0),
    )];

    SemiImplicitEuler.advance(&mut bodies, &SimulationParameters::default());

    assert_eq!(bodies[0].position.y, FABRIC_FLOOR);
    // Clamp constrains position only
    assert_eq!(bodies[0].velocity.y, -50.0);
}

#[test]
fn test_custom_floor() {
    let mut bodies = vec![resting(0, 1.0, [0.0, 0.0, 0.0])];
    bodies[0].velocity = Vector3::new(0.0, -100.0, 0.0);

    let params = SimulationParameters {
        fabric_floor: -0.5,
        ..Default::default()
    };
    SemiImplicitEuler.advance(&mut bodies, &params);

    assert_eq!(bodies[0].position.y, -0.5);
}

#[test]
fn test_bodies_above_floor_move_freely() {
    let mut bodies = vec![resting(0, 1.0, [0.0, 2.0, 0.0])];
    bodies[0].velocity = Vector3::new(0.0, 1.0, 0.0);

    SemiImplicitEuler.advance(&mut bodies, &SimulationParameters::default());

    assert_relative_eq!(bodies[0].position.y, 2.016, epsilon = 1e-12);
}

#[test]
fn test_trail_records_new_position() {
    let mut bodies = vec![resting(0, 1.0, [0.0, -1.8, 0.0])];
    bodies[0].velocity = Vector3::new(1.0, 0.0, 0.0);

    let params = SimulationParameters::default();
    SemiImplicitEuler.advance(&mut bodies, &params);
    SemiImplicitEuler.advance(&mut bodies, &params);

    assert_eq!(bodies[0].trail.len(), 2);
    assert_eq!(bodies[0].trail.latest(), Some(&bodies[0].position));
}

#[test]
fn test_trail_bounded_fifo() {
    let mut bodies = vec![resting(0, 1.0, [0.0, -1.8, 0.0])];
    bodies[0].velocity = Vector3::new(1.0, 0.0, 0.0);

    let params = SimulationParameters {
        max_trail_length: 10,
        ..Default::default()
    };

    let mut history = Vec::new();
    for _ in 0..25 {
        SemiImplicitEuler.advance(&mut bodies, &params);
        history.push(bodies[0].position);
        assert!(bodies[0].trail.len() <= 10);
    }

    let kept: Vec<_> = bodies[0].trail.iter().copied().collect();
    assert_eq!(kept, history[15..].to_vec());
}

#[test]
fn test_zero_multiplier_freezes_motion() {
    let mut bodies = vec![resting(0, 1.0, [1.0, -1.8, 1.0])];
    bodies[0].velocity = Vector3::new(3.0, 0.0, 3.0);
    bodies[0].forces = Vector3::new(10.0, 0.0, 10.0);

    let params = SimulationParameters {
        time_multiplier: 0.0,
        ..Default::default()
    };
    SemiImplicitEuler.advance(&mut bodies, &params);

    assert_eq!(bodies[0].velocity, Vector3::new(3.0, 0.0, 3.0));
    assert_eq!(bodies[0].position, Point3::new(1.0, -1.8, 1.0));
}

#[test]
fn test_two_bodies_close_monotonically() {
    let mut bodies = vec![
        resting(0, 4.0, [-3.0, -1.8, 0.0]),
        resting(1, 2.0, [3.0, -1.8, 0.0]),
    ];
    let params = SimulationParameters::default();
    let gravity = DirectGravity::new();

    let mut previous = bodies[0].distance_to(&bodies[1]);
    for _ in 0..200 {
        gravity.accumulate(&mut bodies, params.gravitational_constant);
        SemiImplicitEuler.advance(&mut bodies, &params);

        let separation = bodies[0].distance_to(&bodies[1]);
        if separation < bodies[0].radius + bodies[1].radius {
            break;
        }
        assert!(separation < previous);
        previous = separation;

        // Motion stays on the line of centres
        assert_eq!(bodies[0].position.z, 0.0);
        assert_eq!(bodies[1].position.z, 0.0);
        assert!(bodies[0].velocity.x > 0.0);
        assert!(bodies[1].velocity.x < 0.0);
    }
}

#[test]
fn test_deterministic() {
    let make = || {
        let mut bodies = vec![
            resting(0, 4.0, [-3.0, -1.8, 1.0]),
            resting(1, 2.0, [3.0, -1.8, 0.0]),
            resting(2, 1.0, [0.0, -1.8, 4.0]),
        ];
        bodies[2].velocity = Vector3::new(0.3, 0.0, -0.1);
        bodies
    };

    let params = SimulationParameters::default();
    let gravity = DirectGravity::new();
    let mut a = make();
    let mut b = make();
    for _ in 0..50 {
        gravity.accumulate(&mut a, params.gravitational_constant);
        SemiImplicitEuler.advance(&mut a, &params);
        gravity.accumulate(&mut b, params.gravitational_constant);
        SemiImplicitEuler.advance(&mut b, &params);
    }

    assert_eq!(a, b);
}
