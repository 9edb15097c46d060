// commands.rs
// Between-tick mutations. Callers queue commands on the simulation; the
// queue drains at the start of the next step, so the live state never
// changes mid-tick. Invalid commands log and do nothing.

use crate::bond::Bond;
use crate::config::SimConfig;
use crate::particle::{Particle, ParticleField};
use crate::simulation::{thermostat, Simulation};
use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SimCommand {
    AddParticle { particle: Particle },
    RemoveParticle { id: u64 },
    DuplicateParticle { id: u64, offset: Vec3 },
    UpdateParticle { id: u64, field: ParticleField, value: f32 },
    AddBond { a: u64, b: u64 },
    RemoveBond { a: u64, b: u64 },
    SetConfig { config: SimConfig },
    SetTemperature { temperature: f32 },
    DeleteAll,
}

pub fn process_command(command: SimCommand, simulation: &mut Simulation) {
    match command {
        SimCommand::AddParticle { particle } => handle_add_particle(simulation, particle),
        SimCommand::RemoveParticle { id } => handle_remove_particle(simulation, id),
        SimCommand::DuplicateParticle { id, offset } => {
            handle_duplicate_particle(simulation, id, offset)
        }
        SimCommand::UpdateParticle { id, field, value } => {
            handle_update_particle(simulation, id, field, value)
        }
        SimCommand::AddBond { a, b } => handle_add_bond(simulation, a, b),
        SimCommand::RemoveBond { a, b } => handle_remove_bond(simulation, a, b),
        SimCommand::SetConfig { config } => simulation.set_config(config),
        SimCommand::SetTemperature { temperature } => {
            handle_set_temperature(simulation, temperature)
        }
        SimCommand::DeleteAll => handle_delete_all(simulation),
    }
}

fn handle_add_particle(simulation: &mut Simulation, particle: Particle) {
    simulation.particles.push(particle.sanitized());
}

/// Remove a particle and prune every bond that referenced it, so the bond
/// list never accumulates permanently dangling entries.
fn handle_remove_particle(simulation: &mut Simulation, id: u64) {
    let before = simulation.particles.len();
    simulation.particles.retain(|p| p.id != id);
    if simulation.particles.len() == before {
        eprintln!("[remove-skip] no particle with id {}", id);
        return;
    }
    simulation.bonds.retain(|bond| bond.a != id && bond.b != id);
}

fn handle_duplicate_particle(simulation: &mut Simulation, id: u64, offset: Vec3) {
    let Some(source) = simulation.particles.iter().find(|p| p.id == id) else {
        eprintln!("[duplicate-skip] no particle with id {}", id);
        return;
    };
    let copy = Particle::new(
        source.pos + offset,
        source.vel,
        source.mass,
        source.charge,
        source.radius,
    );
    simulation.particles.push(copy);
}

fn handle_update_particle(simulation: &mut Simulation, id: u64, field: ParticleField, value: f32) {
    match simulation.particles.iter_mut().find(|p| p.id == id) {
        Some(p) => p.apply_field(field, value),
        None => eprintln!("[update-skip] no particle with id {}", id),
    }
}

/// Create a bond between two existing particles and settle them onto the
/// rest length. Self-bonds and unresolved or duplicate pairs are rejected.
fn handle_add_bond(simulation: &mut Simulation, a: u64, b: u64) {
    if a == b {
        eprintln!("[bond-skip] refusing self-bond on {}", a);
        return;
    }
    if simulation
        .bonds
        .iter()
        .any(|bond| (bond.a, bond.b) == (a, b) || (bond.a, bond.b) == (b, a))
    {
        eprintln!("[bond-skip] bond {} {} already exists", a, b);
        return;
    }
    let index = simulation.id_index();
    let (Some(&i), Some(&j)) = (index.get(&a), index.get(&b)) else {
        eprintln!("[bond-skip] unresolved endpoints {} {}", a, b);
        return;
    };
    let bond = Bond::new(&simulation.particles[i], &simulation.particles[j]);
    bond.settle(&mut simulation.particles, i, j);
    simulation.bonds.push(bond);
}

fn handle_remove_bond(simulation: &mut Simulation, a: u64, b: u64) {
    simulation
        .bonds
        .retain(|bond| (bond.a, bond.b) != (a, b) && (bond.a, bond.b) != (b, a));
}

/// Retarget the thermostat and rescale the current velocities immediately,
/// so the system does not wait a relaxation time to reflect the change.
fn handle_set_temperature(simulation: &mut Simulation, temperature: f32) {
    simulation.config.temperature = if temperature.is_finite() {
        temperature
    } else {
        crate::config::DEFAULT_TEMPERATURE
    };
    thermostat::rescale(simulation);
}

fn handle_delete_all(simulation: &mut Simulation) {
    simulation.particles.clear();
    simulation.bonds.clear();
}
