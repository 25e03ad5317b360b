//! Earth around the Sun from the solar-system preset
//!
//! Prints conserved quantities every few hundred ticks so drift is visible.
//!
//! Run with: cargo run --package spacetime --example simple_orbit

use spacetime::presets::Preset;
use spacetime::state::SimulationState;

fn main() {
    println!("Solar system preset, semi-implicit Euler\n");
    println!("{}", "=".repeat(60));

    let mut state = SimulationState::default();
    state.load_preset(Preset::SolarSystem, 0);

    let initial = state.analytics();
    println!("Bodies: {}", initial.body_count);
    println!("  Kinetic:   {:.6}", initial.energy.kinetic);
    println!("  Potential: {:.6}", initial.energy.potential);
    println!("  Total:     {:.6}", initial.energy.total);
    println!("  Angular momentum: {:.6}", initial.angular_momentum);

    println!(
        "\n{:>8} {:>10} {:>14} {:>12} {:>8}",
        "tick", "time", "energy", "L", "bodies"
    );
    for tick in 1..=3000 {
        state.advance();
        if tick % 300 == 0 {
            let a = state.analytics();
            println!(
                "{:>8} {:>10.3} {:>14.6} {:>12.6} {:>8}",
                tick, a.simulation_time, a.energy.total, a.angular_momentum, a.body_count
            );
        }
    }

    let last = state.analytics();
    let drift = (last.energy.total - initial.energy.total) / initial.energy.total.abs();
    println!("\nRelative energy drift: {:.3e}", drift);

    for body in state.bodies() {
        println!(
            "  {:<8} at ({:>7.3}, {:>6.3}, {:>7.3})  speed {:.3}",
            body.name,
            body.position.x,
            body.position.y,
            body.position.z,
            body.speed()
        );
    }
}
