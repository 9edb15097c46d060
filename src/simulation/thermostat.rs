// thermostat.rs
// Temperature control. Rescale multiplies every velocity by a single scale
// factor; Langevin adds a stochastic kick and a viscous drag to the force
// accumulator before integration. Both freeze the system when the target
// temperature is at or below zero.

use crate::config::ThermostatKind;
use crate::simulation::{utils, Simulation};
use rand::Rng;
use rand_distr::StandardNormal;
use ultraviolet::Vec3;

pub fn apply(sim: &mut Simulation) {
    match sim.config.thermostat {
        ThermostatKind::Off => {}
        ThermostatKind::Rescale => rescale(sim),
        ThermostatKind::Langevin => langevin(sim),
    }
}

/// Velocity rescaling toward the target temperature, measured here as
/// 2KE / (3N) without the center-of-mass correction. A system at rest has
/// no defined scale factor and is left untouched.
pub fn rescale(sim: &mut Simulation) {
    if sim.particles.is_empty() {
        return;
    }
    let target = sim.config.temperature;
    if target <= 0.0 {
        for p in &mut sim.particles {
            p.vel = Vec3::zero();
        }
        return;
    }
    let dof = (3 * sim.particles.len()) as f32;
    let current = 2.0 * utils::kinetic_energy(&sim.particles) / dof;
    if current <= 0.0 {
        return;
    }
    let scale = (target / current).sqrt();
    for p in &mut sim.particles {
        p.vel *= scale;
    }
}

/// Langevin bath. Each particle receives a Gaussian kick with per-axis
/// standard deviation sqrt(2 γ k_B T / dt) * sqrt(m) and a drag of -γ m v,
/// both added to the force accumulator. Sampling order follows storage
/// order, so a fixed seed reproduces the trajectory exactly.
pub fn langevin(sim: &mut Simulation) {
    let target = sim.config.temperature;
    if target <= 0.0 {
        for p in &mut sim.particles {
            p.vel = Vec3::zero();
        }
        return;
    }
    let gamma = sim.config.gamma;
    let sigma = (2.0 * gamma * sim.config.boltzmann * target / sim.config.dt).sqrt();
    let rng = &mut sim.rng;
    for p in &mut sim.particles {
        let kick = Vec3::new(
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
            rng.sample(StandardNormal),
        ) * (sigma * p.mass.sqrt());
        p.force += kick - p.vel * (gamma * p.mass);
    }
}
