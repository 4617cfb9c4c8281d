use nalgebra::Point3;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SnapshotError {
    #[error("Got {positions} positions but {atomic_numbers} atomic numbers")]
    LengthMismatch {
        positions: usize,
        atomic_numbers: usize,
    },

    #[error("Cell limit {cell_limit} exceeds the number of atoms ({num_atoms})")]
    CellLimitOutOfRange { cell_limit: usize, num_atoms: usize },

    #[error("Atomic number {atomic_number} (atom {atom_index}) has no feature index")]
    UnmappedElement {
        atomic_number: u32,
        atom_index: usize,
    },
}

/// An immutable atomic configuration with periodic copies already expanded.
///
/// Atoms `0..cell_limit` belong to the original simulation cell; atoms from `cell_limit`
/// onwards are periodic copies placed at lattice-translated positions.
///
/// Positions are trusted not to coincide. The kernel does not re-check this; use
/// [`crate::engine::config::ConfigurationBuilder::min_separation`] to validate upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct ConfigurationSnapshot {
    positions: Vec<Point3<f64>>,
    atomic_numbers: Vec<u32>,
    element_index: HashMap<u32, usize>,
    cell_limit: usize,
}

impl ConfigurationSnapshot {
    /// Creates a snapshot after checking the parallel-array and cell-limit invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the arrays differ in length, if `cell_limit` exceeds the
    /// number of atoms, or if an atomic number has no entry in `element_index`.
    pub fn new(
        positions: Vec<Point3<f64>>,
        atomic_numbers: Vec<u32>,
        element_index: HashMap<u32, usize>,
        cell_limit: usize,
    ) -> Result<Self, SnapshotError> {
        if positions.len() != atomic_numbers.len() {
            return Err(SnapshotError::LengthMismatch {
                positions: positions.len(),
                atomic_numbers: atomic_numbers.len(),
            });
        }
        if cell_limit > positions.len() {
            return Err(SnapshotError::CellLimitOutOfRange {
                cell_limit,
                num_atoms: positions.len(),
            });
        }
        if let Some((atom_index, &atomic_number)) = atomic_numbers
            .iter()
            .enumerate()
            .find(|(_, z)| !element_index.contains_key(*z))
        {
            return Err(SnapshotError::UnmappedElement {
                atomic_number,
                atom_index,
            });
        }

        Ok(Self {
            positions,
            atomic_numbers,
            element_index,
            cell_limit,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn position(&self, index: usize) -> &Point3<f64> {
        &self.positions[index]
    }

    pub fn atomic_numbers(&self) -> &[u32] {
        &self.atomic_numbers
    }

    pub fn atomic_number(&self, index: usize) -> u32 {
        self.atomic_numbers[index]
    }

    pub fn element_index(&self) -> &HashMap<u32, usize> {
        &self.element_index
    }

    /// Position of `atomic_number` in the descriptor feature space, if it is mapped.
    pub fn feature_index(&self, atomic_number: u32) -> Option<usize> {
        self.element_index.get(&atomic_number).copied()
    }

    pub fn cell_limit(&self) -> usize {
        self.cell_limit
    }

    pub fn num_periodic_copies(&self) -> usize {
        self.len() - self.cell_limit
    }

    #[inline]
    pub fn is_cell_atom(&self, index: usize) -> bool {
        index < self.cell_limit
    }

    /// True if at least one of `indices` belongs to the original cell.
    ///
    /// Pairs and triplets made only of periodic copies repeat an interaction that is already
    /// counted through the original cell, so every enumeration filters through this predicate.
    #[inline]
    pub fn anchors_cell(&self, indices: &[usize]) -> bool {
        indices.iter().any(|&index| self.is_cell_atom(index))
    }
}

#[derive(Debug, Deserialize)]
struct RawElementEntry {
    atomic_number: u32,
    feature_index: usize,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    positions: Vec<[f64; 3]>,
    atomic_numbers: Vec<u32>,
    elements: Vec<RawElementEntry>,
    cell_limit: usize,
}

impl TryFrom<RawSnapshot> for ConfigurationSnapshot {
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Self::new(
            raw.positions.into_iter().map(Point3::from).collect(),
            raw.atomic_numbers,
            raw.elements
                .into_iter()
                .map(|entry| (entry.atomic_number, entry.feature_index))
                .collect(),
            raw.cell_limit,
        )
    }
}
