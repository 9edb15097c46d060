// cell_grid.rs
// Uniform spatial grid over the confinement box. Rebuilt from scratch every
// step; lives only as a neighbor-query accelerator for the force pass.

use crate::particle::Particle;
use smallvec::SmallVec;
use std::collections::HashMap;
use ultraviolet::Vec3;

/// Discretized cell coordinate. A structured integer key (rather than a
/// formatted string) makes malformed neighbor lookups unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellKey(pub i32, pub i32, pub i32);

pub struct SpatialGrid {
    pub box_size: f32,
    pub cell_size: f32,
    cells: HashMap<CellKey, SmallVec<[usize; 8]>>,
}

impl SpatialGrid {
    pub fn new(box_size: f32, cell_size: f32) -> Self {
        Self {
            box_size,
            cell_size: cell_size.max(f32::MIN_POSITIVE),
            cells: HashMap::new(),
        }
    }

    /// Cell containing `pos`: floor((coord + box/2) / cell) per axis.
    /// Positions outside the nominal box (transient, before the boundary
    /// pass) map to out-of-range but perfectly valid keys.
    pub fn cell_key(&self, pos: Vec3) -> CellKey {
        let half = self.box_size / 2.0;
        CellKey(
            ((pos.x + half) / self.cell_size).floor() as i32,
            ((pos.y + half) / self.cell_size).floor() as i32,
            ((pos.z + half) / self.cell_size).floor() as i32,
        )
    }

    /// Clear and repopulate from current positions. O(n).
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.cells.clear();
        for (i, p) in particles.iter().enumerate() {
            self.cells.entry(self.cell_key(p.pos)).or_default().push(i);
        }
    }

    /// Indices of all particles in the same cell or any of the 26 adjacent
    /// cells, excluding `i` itself.
    pub fn neighbors_of(&self, particles: &[Particle], i: usize) -> Vec<usize> {
        let CellKey(cx, cy, cz) = self.cell_key(particles[i].pos);
        let mut neighbors = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = CellKey(cx + dx, cy + dy, cz + dz);
                    if let Some(cell) = self.cells.get(&key) {
                        for &idx in cell {
                            if idx != i {
                                neighbors.push(idx);
                            }
                        }
                    }
                }
            }
        }
        neighbors
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
