// simulation.rs
// The simulation aggregate: owns the particle set, the bond list, the grid
// and the run parameters, and drives the fixed step order
// reset -> pair forces -> bond forces -> thermostat -> integration.

use crate::bond::Bond;
use crate::cell_grid::SpatialGrid;
use crate::commands::{self, SimCommand};
use crate::config::SimConfig;
use crate::particle::Particle;
use crate::simulation::{forces, integrator, thermostat, utils};
use crate::snapshot::{BondSnapshot, ParticleSnapshot, Snapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

pub struct Simulation {
    pub frame: usize,
    pub particles: Vec<Particle>,
    pub bonds: Vec<Bond>,
    pub grid: SpatialGrid,
    pub config: SimConfig,
    pub(crate) rng: StdRng,
    pending: Vec<SimCommand>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        Self {
            frame: 0,
            particles: Vec::new(),
            bonds: Vec::new(),
            grid: SpatialGrid::new(config.box_size, config.cell_size()),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            pending: Vec::new(),
        }
    }

    /// Queue a mutation for the start of the next tick. Nothing mutates the
    /// live state between ticks.
    pub fn queue(&mut self, command: SimCommand) {
        self.pending.push(command);
    }

    /// Replace the run parameters between ticks. Reseeds the thermostat RNG
    /// only if the seed changed, so retuning forces mid-run does not disturb
    /// the noise stream.
    pub fn set_config(&mut self, config: SimConfig) {
        let config = config.sanitized();
        if config.seed != self.config.seed {
            self.rng = StdRng::seed_from_u64(config.seed);
        }
        self.grid = SpatialGrid::new(config.box_size, config.cell_size());
        self.config = config;
    }

    /// One tick. Queued commands run first, then the force pipeline, then
    /// the integrator. Stepping an empty system is a no-op apart from the
    /// frame counter.
    pub fn step(&mut self) {
        self.flush_commands();
        forces::reset(self);
        forces::accumulate_pairwise(self);
        self.apply_bond_forces();
        thermostat::apply(self);
        integrator::advance(self);
        self.frame += 1;
    }

    fn flush_commands(&mut self) {
        for command in std::mem::take(&mut self.pending) {
            commands::process_command(command, self);
        }
    }

    /// Particle id to slot index, rebuilt on demand.
    pub fn id_index(&self) -> HashMap<u64, usize> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect()
    }

    /// Apply every resolvable bond. A bond whose endpoints no longer exist
    /// (or collapsed onto one particle) contributes nothing; unresolved
    /// endpoints are reported once per step.
    pub fn apply_bond_forces(&mut self) {
        if self.bonds.is_empty() {
            return;
        }
        let index = self.id_index();
        for k in 0..self.bonds.len() {
            let bond = self.bonds[k];
            match (index.get(&bond.a), index.get(&bond.b)) {
                (Some(&i), Some(&j)) if i != j => bond.apply(&mut self.particles, i, j),
                _ => eprintln!("[bond-skip] unresolved endpoints {} {}", bond.a, bond.b),
            }
        }
    }

    pub fn use_grid(&self) -> bool {
        forces::wants_grid(&self.config, self.particles.len())
    }

    pub fn kinetic_energy(&self) -> f32 {
        utils::kinetic_energy(&self.particles)
    }

    pub fn temperature(&self) -> f32 {
        utils::instantaneous_temperature(&self.particles, self.config.boltzmann)
    }

    /// Plain-data view of the current state for observers.
    pub fn snapshot(&self) -> Snapshot {
        let index = self.id_index();
        let bonds = self
            .bonds
            .iter()
            .filter_map(|bond| {
                let i = *index.get(&bond.a)?;
                let j = *index.get(&bond.b)?;
                Some(BondSnapshot {
                    a: bond.a,
                    b: bond.b,
                    length: (self.particles[j].pos - self.particles[i].pos).mag(),
                })
            })
            .collect();
        Snapshot {
            frame: self.frame,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleSnapshot {
                    id: p.id,
                    pos: p.pos,
                    vel: p.vel,
                })
                .collect(),
            bonds,
            kinetic_energy: self.kinetic_energy(),
            temperature: self.temperature(),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
