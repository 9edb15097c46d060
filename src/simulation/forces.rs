// forces.rs
// Non-bonded pair forces: Lennard-Jones plus Coulomb, accumulated with
// exact action/reaction symmetry. The grid path and the brute path visit
// the same pairs in the dense regime and produce identical sums; summation
// stays serial so the floating-point order is deterministic.

use crate::config::{NeighborStrategy, SimConfig};
use crate::particle::{pair_mut, Particle};
use crate::simulation::Simulation;
use rayon::prelude::*;

/// Zero every force accumulator. `acc` is left alone: the integrator reads
/// the previous step's acceleration from it.
pub fn reset(sim: &mut Simulation) {
    sim.particles.par_iter_mut().for_each(|p| {
        p.force = ultraviolet::Vec3::zero();
    });
}

/// Signed magnitude of the combined LJ + Coulomb force for a pair at
/// squared distance `r2`. Positive is repulsive along the separation axis.
/// Clamped to ±max_force so close approaches stay integrable.
pub fn pair_force_magnitude(config: &SimConfig, r2: f32, qi: f32, qj: f32) -> f32 {
    let r = r2.sqrt();
    let sigma2 = config.lj_sigma * config.lj_sigma;
    let sigma6 = sigma2 * sigma2 * sigma2;
    let sigma12 = sigma6 * sigma6;
    let r6 = r2 * r2 * r2;
    let r12 = r6 * r6;
    let lj = 24.0 * config.lj_epsilon * (2.0 * sigma12 / (r12 * r) - sigma6 / (r6 * r));
    let coulomb = config.coulomb_constant * qi * qj / r2;
    (lj + coulomb).clamp(-config.max_force, config.max_force)
}

fn apply_pair(particles: &mut [Particle], config: &SimConfig, i: usize, j: usize) {
    let (pi, pj) = pair_mut(particles, i, j);
    let sep = pi.pos - pj.pos;
    let r2 = sep.mag_sq();
    if r2 < crate::config::MIN_PAIR_DISTANCE_SQ {
        return;
    }
    let magnitude = pair_force_magnitude(config, r2, pi.charge, pj.charge);
    let force = sep * (magnitude / r2.sqrt());
    pi.force += force;
    pj.force -= force;
}

/// Every unordered pair, once. O(n²).
pub fn accumulate_brute(particles: &mut [Particle], config: &SimConfig) {
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            apply_pair(particles, config, i, j);
        }
    }
}

/// Grid-accelerated sweep. Each particle scans its 27-cell neighborhood;
/// the id ordering guard keeps every pair counted exactly once even though
/// both endpoints see each other in their own scans.
pub fn accumulate_grid(sim: &mut Simulation) {
    for i in 0..sim.particles.len() {
        let neighbors = sim.grid.neighbors_of(&sim.particles, i);
        for j in neighbors {
            if sim.particles[j].id <= sim.particles[i].id {
                continue;
            }
            apply_pair(&mut sim.particles, &sim.config, i, j);
        }
    }
}

/// Full non-bonded force pass for this step.
pub fn accumulate_pairwise(sim: &mut Simulation) {
    if sim.particles.len() < 2 {
        return;
    }
    if sim.use_grid() {
        sim.grid.rebuild(&sim.particles);
        accumulate_grid(sim);
    } else {
        accumulate_brute(&mut sim.particles, &sim.config);
    }
}

/// True when the grid sweep pays for itself under the current strategy.
pub fn wants_grid(config: &SimConfig, particle_count: usize) -> bool {
    match config.neighbor_strategy {
        NeighborStrategy::Brute => false,
        NeighborStrategy::Grid => true,
        NeighborStrategy::Auto => {
            let volume = config.box_size * config.box_size * config.box_size;
            particle_count as f32 / volume > config.grid_density_threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::Vec3;

    fn neutral_pair(separation: f32) -> Vec<Particle> {
        vec![
            Particle::new(Vec3::zero(), Vec3::zero(), 1.0, 0.0, 0.3),
            Particle::new(Vec3::new(separation, 0.0, 0.0), Vec3::zero(), 1.0, 0.0, 0.3),
        ]
    }

    #[test]
    fn lj_magnitude_matches_closed_form_at_sigma() {
        // At r = sigma with epsilon = 1 the LJ force is exactly 24.
        let mut config = SimConfig::default();
        config.lj_epsilon = 1.0;
        config.lj_sigma = 1.0;
        config.max_force = 1.0e6;
        let magnitude = pair_force_magnitude(&config, 1.0, 0.0, 0.0);
        assert!((magnitude - 24.0).abs() < 1e-3);
    }

    #[test]
    fn magnitude_is_clamped_to_max_force() {
        let config = SimConfig::default();
        let magnitude = pair_force_magnitude(&config, 0.01, 0.0, 0.0);
        assert_eq!(magnitude, config.max_force);
        let magnitude = pair_force_magnitude(&config, 0.01, 1.0e-3, -1.0e-3);
        assert!(magnitude >= -config.max_force);
    }

    #[test]
    fn coulomb_repels_like_charges() {
        let mut config = SimConfig::default();
        config.lj_epsilon = 0.0;
        config.coulomb_constant = 1.0;
        config.max_force = 1.0e6;
        let magnitude = pair_force_magnitude(&config, 4.0, 2.0, 3.0);
        assert!((magnitude - 1.5).abs() < 1e-5);
    }

    #[test]
    fn overlapping_pair_contributes_nothing() {
        let mut particles = neutral_pair(1.0e-4);
        let config = SimConfig::default();
        accumulate_brute(&mut particles, &config);
        assert_eq!(particles[0].force, Vec3::zero());
        assert_eq!(particles[1].force, Vec3::zero());
    }

    #[test]
    fn brute_pass_is_antisymmetric() {
        let mut particles = neutral_pair(0.6);
        let config = SimConfig::default();
        accumulate_brute(&mut particles, &config);
        let sum = particles[0].force + particles[1].force;
        assert!(sum.mag() < 1e-5);
        assert!(particles[0].force.mag() > 0.0);
    }
}
