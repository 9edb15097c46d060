pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod thermostat;
pub mod utils;

pub use simulation::*;
