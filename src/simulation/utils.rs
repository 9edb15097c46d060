// Aggregate observables over the particle set.

use crate::particle::Particle;
use ultraviolet::Vec3;

pub fn kinetic_energy(particles: &[Particle]) -> f32 {
    particles.iter().map(|p| p.kinetic_energy()).sum()
}

/// Instantaneous temperature from equipartition, 2KE / ((3N - 3) k_B).
/// Three degrees of freedom are removed for the center-of-mass drift;
/// fewer than two particles have no meaningful temperature.
pub fn instantaneous_temperature(particles: &[Particle], boltzmann: f32) -> f32 {
    let n = particles.len();
    if n < 2 {
        return 0.0;
    }
    let dof = (3 * n - 3) as f32;
    2.0 * kinetic_energy(particles) / (dof * boltzmann)
}

pub fn total_momentum(particles: &[Particle]) -> Vec3 {
    particles
        .iter()
        .fold(Vec3::zero(), |acc, p| acc + p.vel * p.mass)
}
