// Centralized configuration for simulation parameters

use crate::units;
use serde::{Deserialize, Serialize};

// ====================
// Integration
// ====================
/// Default integration timestep.
pub const DEFAULT_DT: f32 = 0.005;
/// Edge length of the cubic confinement box.
pub const DEFAULT_BOX_SIZE: f32 = 5.0;
/// Speed cap applied after every kinematic update.
pub const MAX_VELOCITY: f32 = 10.0;

// ====================
// Pair Forces
// ====================
/// Lennard-Jones well depth.
pub const LJ_EPSILON: f32 = 0.5;
/// Lennard-Jones zero-crossing distance.
pub const LJ_SIGMA: f32 = 0.5;
/// Cap on the combined LJ + Coulomb pair force magnitude.
pub const MAX_FORCE: f32 = 40.0;
/// Pairs closer than this squared distance contribute no force.
pub const MIN_PAIR_DISTANCE_SQ: f32 = 1e-6;

// ====================
// Particle Defaults
// ====================
pub const DEFAULT_MASS: f32 = 1.0;
pub const DEFAULT_CHARGE: f32 = 0.0;
pub const DEFAULT_RADIUS: f32 = 0.3;
/// Smallest mass accepted at the boundary; lower values are clamped.
pub const MIN_MASS: f32 = 0.1;
/// Smallest radius accepted at the boundary.
pub const MIN_RADIUS: f32 = 0.1;

// ====================
// Bonds
// ====================
/// Spring constant for newly created bonds.
pub const BOND_SPRING_K: f32 = 1.0e4;
/// Rest length of a new bond as a fraction of the summed radii.
pub const BOND_REST_FACTOR: f32 = 0.95;
/// Displacement beyond which bond stabilization repositions the endpoints.
pub const BOND_STABILIZE_TOLERANCE: f32 = 0.01;

// ====================
// Thermostat
// ====================
/// Default thermostat target temperature.
pub const DEFAULT_TEMPERATURE: f32 = 25.0;
/// Langevin damping coefficient.
pub const LANGEVIN_GAMMA: f32 = 0.5;

// ====================
// Spatial Grid
// ====================
/// Grid cell size as a multiple of the interaction radius.
pub const CELL_SIZE_FACTOR: f32 = 2.0;
/// Particle density (per unit volume) above which Auto uses the grid path.
pub const GRID_DENSITY_THRESHOLD: f32 = 0.5;

/// Thermostat policy. `Langevin` is the canonical stochastic bath; `Rescale`
/// is the simpler deterministic alternative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermostatKind {
    Off,
    Rescale,
    Langevin,
}

impl Default for ThermostatKind {
    fn default() -> Self {
        ThermostatKind::Langevin
    }
}

/// Integration scheme. The two must never be mixed within one run; the
/// choice is fixed in the config and read every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegratorKind {
    VelocityVerlet,
    SemiImplicitEuler,
}

impl Default for IntegratorKind {
    fn default() -> Self {
        IntegratorKind::VelocityVerlet
    }
}

/// Pair-force evaluation strategy. `Auto` switches from the brute O(n²)
/// sweep to the grid once the box gets dense enough to pay for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborStrategy {
    Auto,
    Brute,
    Grid,
}

impl Default for NeighborStrategy {
    fn default() -> Self {
        NeighborStrategy::Auto
    }
}

/// Per-run scalar parameters. Swapped only between ticks, never mid-step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub dt: f32,
    pub box_size: f32,
    pub lj_epsilon: f32,
    pub lj_sigma: f32,
    pub coulomb_constant: f32,
    pub max_velocity: f32,
    pub max_force: f32,
    /// Thermostat target temperature.
    pub temperature: f32,
    /// Langevin damping coefficient γ.
    pub gamma: f32,
    pub boltzmann: f32,
    /// Radius used for neighbor-cell sizing and default particle creation.
    pub interaction_radius: f32,
    pub grid_density_threshold: f32,
    pub thermostat: ThermostatKind,
    pub integrator: IntegratorKind,
    pub neighbor_strategy: NeighborStrategy,
    /// Seed for the thermostat RNG; identical seeds reproduce trajectories.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            box_size: DEFAULT_BOX_SIZE,
            lj_epsilon: LJ_EPSILON,
            lj_sigma: LJ_SIGMA,
            coulomb_constant: units::COULOMB_CONSTANT,
            max_velocity: MAX_VELOCITY,
            max_force: MAX_FORCE,
            temperature: DEFAULT_TEMPERATURE,
            gamma: LANGEVIN_GAMMA,
            boltzmann: units::BOLTZMANN_CONSTANT,
            interaction_radius: DEFAULT_RADIUS,
            grid_density_threshold: GRID_DENSITY_THRESHOLD,
            thermostat: ThermostatKind::default(),
            integrator: IntegratorKind::default(),
            neighbor_strategy: NeighborStrategy::default(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Boundary validation: invalid scalars fall back to safe positive
    /// defaults instead of failing. A non-positive temperature is kept
    /// (it selects the freeze behavior of the thermostats).
    pub fn sanitized(mut self) -> Self {
        self.dt = positive_or(self.dt, DEFAULT_DT);
        self.box_size = positive_or(self.box_size, DEFAULT_BOX_SIZE);
        self.lj_epsilon = positive_or(self.lj_epsilon, LJ_EPSILON);
        self.lj_sigma = positive_or(self.lj_sigma, LJ_SIGMA);
        self.max_velocity = positive_or(self.max_velocity, MAX_VELOCITY);
        self.max_force = positive_or(self.max_force, MAX_FORCE);
        self.boltzmann = positive_or(self.boltzmann, units::BOLTZMANN_CONSTANT);
        self.interaction_radius = positive_or(self.interaction_radius, DEFAULT_RADIUS);
        self.grid_density_threshold =
            positive_or(self.grid_density_threshold, GRID_DENSITY_THRESHOLD);
        if !self.coulomb_constant.is_finite() {
            self.coulomb_constant = units::COULOMB_CONSTANT;
        }
        if !(self.gamma.is_finite() && self.gamma >= 0.0) {
            self.gamma = LANGEVIN_GAMMA;
        }
        if !self.temperature.is_finite() {
            self.temperature = DEFAULT_TEMPERATURE;
        }
        self
    }

    /// Neighbor-cell edge length: twice the interaction radius.
    pub fn cell_size(&self) -> f32 {
        CELL_SIZE_FACTOR * self.interaction_radius
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
