//! Host domain seam: cell state and particle-in-cell enumeration
//!
//! The aggregator only needs three things from the host: how many cells there are, a
//! read-only view of each cell's gas, and a single-pass walk over the particles resident
//! in a cell. [`HostDomain`] captures exactly that. [`CellDomain`] is an in-memory host
//! used by the step pipeline, the demo and the tests; [`SingleCellView`] wraps one cell
//! and a particle slice for callers that already did their own binning.

use crate::core_types::gas::GasCellState;
use crate::core_types::particle::Particle;
use crate::error::KineticsError;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Read access to the host's cells and resident particles.
///
/// `Sync` because cells are aggregated in parallel.
pub trait HostDomain: Sync {
    /// Number of control volumes
    fn cell_count(&self) -> usize;

    /// Gas snapshot of a cell, `None` when the index is out of range
    fn gas_state(&self, cell: usize) -> Option<&GasCellState>;

    /// Particles currently resident in `cell`.
    ///
    /// The sequence is finite and stays consistent for the duration of one aggregation.
    fn resident_particles(&self, cell: usize) -> impl Iterator<Item = &Particle>;
}

/// In-memory host: cells, particles and a particle-in-cell index
#[derive(Debug, Clone, Default)]
pub struct CellDomain {
    cells: Vec<GasCellState>,
    particles: Vec<Particle>,
    /// cell → positions in `particles`
    index: FxHashMap<usize, Vec<usize>>,
}

impl CellDomain {
    /// Domain with the given cells and no particles
    pub fn new(cells: Vec<GasCellState>) -> Self {
        Self {
            cells,
            particles: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// All cells
    pub fn cells(&self) -> &[GasCellState] {
        &self.cells
    }

    /// Mutable access to one cell's gas state
    pub fn cell_mut(&mut self, cell: usize) -> Option<&mut GasCellState> {
        self.cells.get_mut(cell)
    }

    /// All particles, in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Add a particle to its cell
    ///
    /// # Errors
    ///
    /// Returns [`KineticsError::CellOutOfRange`] when the particle's cell does not exist.
    pub fn insert_particle(&mut self, particle: Particle) -> Result<(), KineticsError> {
        if particle.cell >= self.cells.len() {
            return Err(KineticsError::CellOutOfRange {
                cell: particle.cell,
                count: self.cells.len(),
            });
        }
        let position = self.particles.len();
        self.index.entry(particle.cell).or_default().push(position);
        self.particles.push(particle);
        Ok(())
    }

    /// Remove a particle by host id, returning it
    pub fn remove_particle(&mut self, id: u64) -> Option<Particle> {
        let position = self.particles.iter().position(|p| p.id == id)?;
        let removed = self.particles.swap_remove(position);
        self.rebuild_index();
        Some(removed)
    }

    /// Drop every particle for which `keep` returns false
    pub fn retain_particles(&mut self, keep: impl FnMut(&Particle) -> bool) {
        let before = self.particles.len();
        self.particles.retain(keep);
        if self.particles.len() != before {
            debug!("Removed {} particles", before - self.particles.len());
            self.rebuild_index();
        }
    }

    /// Recompute the particle-in-cell index from each particle's `cell`.
    ///
    /// Particles pointing at a non-existent cell are left out of the index.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        let cell_count = self.cells.len();
        for (position, particle) in self.particles.iter().enumerate() {
            if particle.cell < cell_count {
                self.index.entry(particle.cell).or_default().push(position);
            }
        }
    }

    /// Read-only cells alongside mutable particles, for the particle phase
    pub(crate) fn split_mut(&mut self) -> (&[GasCellState], &mut [Particle]) {
        (&self.cells, &mut self.particles)
    }
}

impl HostDomain for CellDomain {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn gas_state(&self, cell: usize) -> Option<&GasCellState> {
        self.cells.get(cell)
    }

    fn resident_particles(&self, cell: usize) -> impl Iterator<Item = &Particle> {
        self.index
            .get(&cell)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&position| &self.particles[position])
    }
}

/// One cell and the particles the caller says reside in it
#[derive(Debug, Clone, Copy)]
pub struct SingleCellView<'a> {
    gas: &'a GasCellState,
    particles: &'a [Particle],
}

impl<'a> SingleCellView<'a> {
    /// View exposing `gas` as cell 0 with `particles` resident
    pub fn new(gas: &'a GasCellState, particles: &'a [Particle]) -> Self {
        Self { gas, particles }
    }
}

impl HostDomain for SingleCellView<'_> {
    fn cell_count(&self) -> usize {
        1
    }

    fn gas_state(&self, cell: usize) -> Option<&GasCellState> {
        (cell == 0).then_some(self.gas)
    }

    fn resident_particles(&self, cell: usize) -> impl Iterator<Item = &Particle> {
        let particles: &[Particle] = if cell == 0 { self.particles } else { &[] };
        particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Kelvin, Kilograms};

    fn particle(id: u64, cell: usize) -> Particle {
        Particle::new(id, cell, Kelvin::new(600.0), Kilograms::new(1e-7), 1900.0, 1200.0)
    }

    fn domain(cells: usize) -> CellDomain {
        CellDomain::new(vec![GasCellState::air(Kelvin::new(1000.0), 1e-6); cells])
    }

    #[test]
    fn test_insert_indexes_by_cell() {
        let mut d = domain(3);
        d.insert_particle(particle(1, 0)).unwrap();
        d.insert_particle(particle(2, 2)).unwrap();
        d.insert_particle(particle(3, 2)).unwrap();

        let ids: Vec<u64> = d.resident_particles(2).map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(d.resident_particles(1).count(), 0);
        assert_eq!(d.resident_particles(99).count(), 0);
    }

    #[test]
    fn test_insert_rejects_unknown_cell() {
        let mut d = domain(2);
        assert_eq!(
            d.insert_particle(particle(1, 5)),
            Err(KineticsError::CellOutOfRange { cell: 5, count: 2 })
        );
    }

    #[test]
    fn test_remove_keeps_index_consistent() {
        let mut d = domain(2);
        for id in 0..4 {
            d.insert_particle(particle(id, (id % 2) as usize)).unwrap();
        }
        assert_eq!(d.remove_particle(0).map(|p| p.id), Some(0));
        assert!(d.remove_particle(0).is_none());

        let cell0: Vec<u64> = d.resident_particles(0).map(|p| p.id).collect();
        assert_eq!(cell0, vec![2]);
        assert_eq!(d.resident_particles(1).count(), 2);
    }

    #[test]
    fn test_retain_drops_particles() {
        let mut d = domain(1);
        for id in 0..5 {
            d.insert_particle(particle(id, 0)).unwrap();
        }
        d.retain_particles(|p| p.id % 2 == 0);
        assert_eq!(d.resident_particles(0).count(), 3);
    }

    #[test]
    fn test_single_cell_view() {
        let gas = GasCellState::air(Kelvin::new(900.0), 1e-6);
        let particles = [particle(1, 0), particle(2, 0)];
        let view = SingleCellView::new(&gas, &particles);
        assert_eq!(view.cell_count(), 1);
        assert!(view.gas_state(1).is_none());
        assert_eq!(view.resident_particles(0).count(), 2);
        assert_eq!(view.resident_particles(1).count(), 0);
    }
}
