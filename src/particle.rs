// particle.rs
// The physical particle record. Display concerns (color, meshes) belong to
// the caller; the engine only tracks numeric state plus a stable id.

use crate::config;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use ultraviolet::Vec3;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Mutable particle scalar, addressed by the between-tick update API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleField {
    Mass,
    Charge,
    Radius,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Per-step force accumulator, reset at the top of every tick.
    pub force: Vec3,
    /// Acceleration at the time of the last position update.
    pub acc: Vec3,
    pub mass: f32,
    pub charge: f32,
    pub radius: f32,
}

impl Particle {
    pub fn new(pos: Vec3, vel: Vec3, mass: f32, charge: f32, radius: f32) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            pos,
            vel,
            force: Vec3::zero(),
            acc: Vec3::zero(),
            mass: sanitize_mass(mass),
            charge: sanitize_charge(charge),
            radius: sanitize_radius(radius),
        }
    }

    /// Re-apply the boundary clamps after deserialization or direct field
    /// writes, so mass/radius invariants hold no matter where the record
    /// came from.
    pub fn sanitized(mut self) -> Self {
        self.mass = sanitize_mass(self.mass);
        self.charge = sanitize_charge(self.charge);
        self.radius = sanitize_radius(self.radius);
        claim_ids_up_to(self.id);
        self
    }

    /// Clamped single-field mutation used by `UpdateParticle`.
    pub fn apply_field(&mut self, field: ParticleField, value: f32) {
        match field {
            ParticleField::Mass => self.mass = sanitize_mass(value),
            ParticleField::Charge => self.charge = sanitize_charge(value),
            ParticleField::Radius => self.radius = sanitize_radius(value),
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    pub fn speed(&self) -> f32 {
        self.vel.mag()
    }
}

/// Keep the id allocator ahead of externally supplied ids (state restore),
/// so later additions never collide.
pub fn claim_ids_up_to(id: u64) {
    NEXT_ID.fetch_max(id.saturating_add(1), Ordering::Relaxed);
}

fn sanitize_mass(mass: f32) -> f32 {
    if !mass.is_finite() {
        config::DEFAULT_MASS
    } else if mass <= 0.0 {
        config::MIN_MASS
    } else {
        mass
    }
}

fn sanitize_charge(charge: f32) -> f32 {
    if charge.is_finite() {
        charge
    } else {
        config::DEFAULT_CHARGE
    }
}

fn sanitize_radius(radius: f32) -> f32 {
    if !radius.is_finite() {
        config::DEFAULT_RADIUS
    } else if radius <= 0.0 {
        config::MIN_RADIUS
    } else {
        radius
    }
}

/// Mutable access to two distinct particles at once.
pub fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i != j);
    if i < j {
        let (left, right) = particles.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = particles.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
