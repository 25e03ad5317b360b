pub mod body;
pub mod collisions;
pub mod diagnostics;
pub mod engine;
pub mod fabric;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod scheduler;
pub mod settings;
pub mod state;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod state_test;
