// utils.rs
// Scenario construction helpers. Seeded placement keeps demo runs and
// tests reproducible.

use crate::config::SimConfig;
use crate::particle::Particle;
use ultraviolet::Vec3;

/// Placement retries before accepting an overlapping position.
pub const RANDOM_ATTEMPTS: usize = 20;

/// `n` neutral particles scattered in the box with small random velocities,
/// rejecting overlaps where possible.
pub fn random_box(n: usize, config: &SimConfig, seed: u64) -> Vec<Particle> {
    fastrand::seed(seed);
    let half = config.box_size / 2.0 - config.interaction_radius;
    let mut particles: Vec<Particle> = Vec::with_capacity(n);
    for _ in 0..n {
        let mut pos = random_position(half);
        for _ in 0..RANDOM_ATTEMPTS {
            if overlaps_any(&particles, pos, config.interaction_radius).is_none() {
                break;
            }
            pos = random_position(half);
        }
        let vel = Vec3::new(
            (fastrand::f32() - 0.5) * config.max_velocity,
            (fastrand::f32() - 0.5) * config.max_velocity,
            (fastrand::f32() - 0.5) * config.max_velocity,
        );
        particles.push(Particle::new(
            pos,
            vel,
            crate::config::DEFAULT_MASS,
            crate::config::DEFAULT_CHARGE,
            config.interaction_radius,
        ));
    }
    particles
}

fn random_position(half: f32) -> Vec3 {
    Vec3::new(
        (fastrand::f32() - 0.5) * 2.0 * half,
        (fastrand::f32() - 0.5) * 2.0 * half,
        (fastrand::f32() - 0.5) * 2.0 * half,
    )
}

/// Index of the first existing particle whose sphere overlaps a candidate
/// at `pos` with radius `radius`.
pub fn overlaps_any(existing: &[Particle], pos: Vec3, radius: f32) -> Option<usize> {
    existing
        .iter()
        .position(|p| (p.pos - pos).mag() < p.radius + radius)
}

/// Rescale velocities so the instantaneous temperature matches `target`.
/// Systems at rest or below two particles are left untouched.
pub fn initialize_velocities_to_temperature(particles: &mut [Particle], target: f32, boltzmann: f32) {
    if particles.len() < 2 || target <= 0.0 {
        return;
    }
    let current = crate::simulation::utils::instantaneous_temperature(particles, boltzmann);
    if current <= 0.0 {
        return;
    }
    let scale = (target / current).sqrt();
    for p in particles {
        p.vel *= scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_box_is_reproducible_for_a_seed() {
        let config = SimConfig::default();
        let a = random_box(10, &config, 7);
        let b = random_box(10, &config, 7);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }

    #[test]
    fn random_box_stays_inside_the_box() {
        let config = SimConfig::default();
        let half = config.box_size / 2.0;
        for p in random_box(50, &config, 3) {
            assert!(p.pos.x.abs() <= half);
            assert!(p.pos.y.abs() <= half);
            assert!(p.pos.z.abs() <= half);
        }
    }

    #[test]
    fn velocity_initialization_hits_the_target() {
        let config = SimConfig::default();
        let mut particles = random_box(20, &config, 11);
        initialize_velocities_to_temperature(&mut particles, 5.0, config.boltzmann);
        let t = crate::simulation::utils::instantaneous_temperature(&particles, config.boltzmann);
        assert!((t - 5.0).abs() < 1e-3);
    }
}
