// bond.rs
// Harmonic spring constraints between particle pairs. Bonds reference stable
// particle ids so they survive removals elsewhere in the set; a bond whose
// endpoints no longer resolve is inert, never fatal.

use crate::config;
use crate::particle::{pair_mut, Particle};
use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub a: u64,
    pub b: u64,
    pub spring_k: f32,
    pub rest_length: f32,
}

impl Bond {
    /// Pair two live particles; rest length defaults to just under the sum
    /// of their radii so bonded particles sit touching.
    pub fn new(a: &Particle, b: &Particle) -> Self {
        Self {
            a: a.id,
            b: b.id,
            spring_k: config::BOND_SPRING_K,
            rest_length: config::BOND_REST_FACTOR * (a.radius + b.radius),
        }
    }

    /// Bond with explicit parameters (initial bond lists supplied by the
    /// caller). Non-positive values fall back to the defaults.
    pub fn with_params(a: u64, b: u64, spring_k: f32, rest_length: f32) -> Self {
        Self {
            a,
            b,
            spring_k: if spring_k.is_finite() && spring_k > 0.0 {
                spring_k
            } else {
                config::BOND_SPRING_K
            },
            rest_length: if rest_length.is_finite() && rest_length > 0.0 {
                rest_length
            } else {
                config::MIN_RADIUS
            },
        }
    }

    /// Hookean force on both endpoints, equal and opposite. `i`/`j` index
    /// this bond's endpoints within `particles`. Zero separation has no
    /// defined direction and is skipped. Past the stabilization tolerance
    /// the endpoints are also projected back toward the rest length.
    pub fn apply(&self, particles: &mut [Particle], i: usize, j: usize) {
        let (pa, pb) = pair_mut(particles, i, j);
        let sep = pb.pos - pa.pos;
        let length = sep.mag();
        if length == 0.0 {
            return;
        }
        let displacement = length - self.rest_length;
        let dir = sep / length;
        // Intentionally unclamped: bonds are stiff by design.
        let force = dir * (self.spring_k * displacement);
        pa.force += force;
        pb.force -= force;

        if displacement.abs() > config::BOND_STABILIZE_TOLERANCE {
            settle_pair(pa, pb, dir, displacement);
        }
    }

    /// Snap a freshly created bond to its rest length, as pairing does.
    pub fn settle(&self, particles: &mut [Particle], i: usize, j: usize) {
        let (pa, pb) = pair_mut(particles, i, j);
        let sep = pb.pos - pa.pos;
        let length = sep.mag();
        if length == 0.0 {
            return;
        }
        settle_pair(pa, pb, sep / length, length - self.rest_length);
    }
}

/// Semi-implicit stabilization for stiff springs under explicit integration:
/// reposition both endpoints symmetrically onto the rest length and transfer
/// the velocity component along the bond axis elastically, mass-weighted.
fn settle_pair(pa: &mut Particle, pb: &mut Particle, dir: Vec3, displacement: f32) {
    let correction = displacement / 2.0;
    pa.pos += dir * correction;
    pb.pos -= dir * correction;

    let total_mass = pa.mass + pb.mass;
    let along = (pb.vel - pa.vel).dot(dir);
    let impulse = 2.0 * along / total_mass;
    pa.vel += dir * (impulse * pb.mass / total_mass);
    pb.vel -= dir * (impulse * pa.mass / total_mass);
}
