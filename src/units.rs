//! Reduced simulation units.
//!
//! The engine runs in the sandbox units of the source tool: lengths, times
//! and masses are dimensionless knobs and k_B defaults to 1. The Coulomb
//! prefactor keeps its SI numeric value without a consistent unit system
//! behind it; the engine promises a reproducible procedure, not physical
//! accuracy.

/// Boltzmann constant in sandbox units.
pub const BOLTZMANN_CONSTANT: f32 = 1.0;

/// Coulomb prefactor in sandbox units (numerically the SI value).
pub const COULOMB_CONSTANT: f32 = 8.99e9;
