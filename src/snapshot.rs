// snapshot.rs
// Plain-data views of the simulation. `Snapshot` is the per-tick observer
// surface; `SimulationState` is the full serializable state for capture
// and restore.

use crate::bond::Bond;
use crate::cell_grid::SpatialGrid;
use crate::config::SimConfig;
use crate::particle::{self, Particle};
use crate::simulation::Simulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub id: u64,
    pub pos: Vec3,
    pub vel: Vec3,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BondSnapshot {
    pub a: u64,
    pub b: u64,
    pub length: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: usize,
    pub particles: Vec<ParticleSnapshot>,
    pub bonds: Vec<BondSnapshot>,
    pub kinetic_energy: f32,
    pub temperature: f32,
}

/// Everything needed to reconstruct a run up to RNG phase. Restoring
/// reseeds the noise stream from the config seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationState {
    pub frame: usize,
    pub particles: Vec<Particle>,
    pub bonds: Vec<Bond>,
    pub config: SimConfig,
}

impl SimulationState {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        Self {
            frame: simulation.frame,
            particles: simulation.particles.clone(),
            bonds: simulation.bonds.clone(),
            config: simulation.config.clone(),
        }
    }

    /// Overwrite `simulation` with this state. Restored particles keep
    /// their ids; the allocator is advanced past them so later additions
    /// never collide.
    pub fn apply_to(self, simulation: &mut Simulation) {
        let config = self.config.sanitized();
        simulation.frame = self.frame;
        simulation.particles = self
            .particles
            .into_iter()
            .map(Particle::sanitized)
            .collect();
        simulation.bonds = self.bonds;
        simulation.grid = SpatialGrid::new(config.box_size, config.cell_size());
        simulation.rng = StdRng::seed_from_u64(config.seed);
        simulation.config = config;
        if let Some(max_id) = simulation.particles.iter().map(|p| p.id).max() {
            particle::claim_ids_up_to(max_id);
        }
    }
}
