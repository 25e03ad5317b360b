//! Merge versus bounce for the same head-on approach
//!
//! Run with: cargo run --package spacetime --example collision_demo

use spacetime::body::BodyTemplate;
use spacetime::diagnostics::{kinetic_energy, total_momentum};
use spacetime::settings::{CollisionMode, SimulationParameters};
use spacetime::state::SimulationState;

fn run(mode: CollisionMode) {
    let params = SimulationParameters {
        collision_mode: mode,
        ..Default::default()
    };
    let mut state = SimulationState::new(params);
    state.add_body(BodyTemplate::new("Left", 4.0, 0.5, [-4.0, 0.0, 0.0]).with_velocity([0.5, 0.0, 0.0]));
    state.add_body(BodyTemplate::new("Right", 2.0, 0.4, [4.0, 0.0, 0.0]).with_velocity([-0.5, 0.0, 0.0]));

    let p0 = total_momentum(state.bodies());
    let ke0 = kinetic_energy(state.bodies());

    let mut first_contact = None;
    for tick in 1..=1000 {
        let report = state.advance();
        if first_contact.is_none() && !report.collisions.is_empty() {
            first_contact = Some(tick);
        }
    }

    println!("{:?}", mode);
    match first_contact {
        Some(tick) => println!("  first contact at tick {}", tick),
        None => println!("  no contact"),
    }
    println!("  bodies left: {}", state.body_count());
    println!(
        "  |Δp| = {:.3e}",
        (total_momentum(state.bodies()) - p0).magnitude()
    );
    println!(
        "  KE {:.4} -> {:.4}",
        ke0,
        kinetic_energy(state.bodies())
    );
    for body in state.bodies() {
        println!(
            "  {:<6} m = {:.2}, r = {:.3}, v = {:.3}",
            body.name,
            body.mass,
            body.radius,
            body.speed()
        );
    }
}

fn main() {
    println!("Head-on approach, G = 2\n");
    run(CollisionMode::Merge);
    println!();
    run(CollisionMode::Bounce);
}
