// integrator.rs
// Kinematic update for one tick. Velocity Verlet is the canonical scheme;
// semi-implicit Euler is the cheap alternative. A run uses exactly one of
// the two, selected by the config, never a mixture.

use crate::config::IntegratorKind;
use crate::simulation::{forces, Simulation};
use rayon::prelude::*;

/// Advance positions and velocities by one dt, then apply the speed cap
/// and the reflecting walls.
pub fn advance(sim: &mut Simulation) {
    match sim.config.integrator {
        IntegratorKind::VelocityVerlet => velocity_verlet(sim),
        IntegratorKind::SemiImplicitEuler => semi_implicit_euler(sim),
    }
    finish(sim);
}

/// Standard velocity Verlet. Positions move on the current acceleration,
/// deterministic forces are re-evaluated at the new positions, and the
/// velocity update averages old and new accelerations. The thermostat is
/// not re-applied at the half step; its contribution enters once per tick
/// through the pre-integration force pass.
fn velocity_verlet(sim: &mut Simulation) {
    let dt = sim.config.dt;
    sim.particles.par_iter_mut().for_each(|p| {
        p.acc = p.force / p.mass;
        p.pos += p.vel * dt + p.acc * (0.5 * dt * dt);
    });

    forces::reset(sim);
    forces::accumulate_pairwise(sim);
    sim.apply_bond_forces();

    sim.particles.par_iter_mut().for_each(|p| {
        let new_acc = p.force / p.mass;
        p.vel += (p.acc + new_acc) * (0.5 * dt);
        p.acc = new_acc;
    });
}

fn semi_implicit_euler(sim: &mut Simulation) {
    let dt = sim.config.dt;
    sim.particles.par_iter_mut().for_each(|p| {
        p.acc = p.force / p.mass;
        p.vel += p.acc * dt;
        p.pos += p.vel * dt;
    });
}

/// Speed cap plus reflecting box walls. The cap rescales to exactly
/// max_velocity, preserving direction. A particle pushed past a wall is
/// clamped onto it and its normal velocity component is negated.
fn finish(sim: &mut Simulation) {
    let max_velocity = sim.config.max_velocity;
    let half = sim.config.box_size / 2.0;
    sim.particles.par_iter_mut().for_each(|p| {
        let speed = p.vel.mag();
        if speed > max_velocity {
            p.vel *= max_velocity / speed;
        }

        if p.pos.x < -half {
            p.pos.x = -half;
            p.vel.x = -p.vel.x;
        } else if p.pos.x > half {
            p.pos.x = half;
            p.vel.x = -p.vel.x;
        }

        if p.pos.y < -half {
            p.pos.y = -half;
            p.vel.y = -p.vel.y;
        } else if p.pos.y > half {
            p.pos.y = half;
            p.vel.y = -p.vel.y;
        }

        if p.pos.z < -half {
            p.pos.z = -half;
            p.vel.z = -p.vel.z;
        } else if p.pos.z > half {
            p.pos.z = half;
            p.vel.z = -p.vel.z;
        }
    });
}
