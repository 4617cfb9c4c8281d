use crate::core::models::snapshot::ConfigurationSnapshot;
use crate::core::utils::geometry::displacement;
use nalgebra::Vector3;
use std::ops::Index;
use std::sync::OnceLock;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Dense N×N table of displacement vectors; entry `(i, j)` points from atom `i` to atom `j`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplacementTensor {
    num_atoms: usize,
    data: Vec<Vector3<f64>>,
}

impl DisplacementTensor {
    #[instrument(skip_all, name = "displacement_tensor_task")]
    pub fn compute(snapshot: &ConfigurationSnapshot) -> Self {
        let n = snapshot.len();
        let positions = snapshot.positions();

        if n == 0 {
            return Self::default();
        }

        // Only the upper triangle is evaluated in place; the lower one is its negation.
        let mut data = vec![Vector3::zeros(); n * n];
        let fill_upper_row = |(i, row): (usize, &mut [Vector3<f64>])| {
            for (j, entry) in row.iter_mut().enumerate().skip(i + 1) {
                *entry = displacement(&positions[i], &positions[j]);
            }
        };

        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(n).enumerate().for_each(fill_upper_row);

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(n).enumerate().for_each(fill_upper_row);

        for i in 0..n {
            for j in 0..i {
                data[i * n + j] = -data[j * n + i];
            }
        }

        debug!(num_atoms = n, "Computed displacement tensor.");
        Self { num_atoms: n, data }
    }

    pub fn len(&self) -> usize {
        self.num_atoms
    }

    pub fn is_empty(&self) -> bool {
        self.num_atoms == 0
    }

    /// Displacements from atom `i` to every atom, indexed by the target atom.
    pub fn row(&self, i: usize) -> &[Vector3<f64>] {
        &self.data[i * self.num_atoms..(i + 1) * self.num_atoms]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Vector3<f64>> {
        if i < self.num_atoms && j < self.num_atoms {
            self.data.get(i * self.num_atoms + j)
        } else {
            None
        }
    }
}

impl Index<(usize, usize)> for DisplacementTensor {
    type Output = Vector3<f64>;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(
            i < self.num_atoms && j < self.num_atoms,
            "displacement index ({i}, {j}) out of range for {} atoms",
            self.num_atoms
        );
        &self.data[i * self.num_atoms + j]
    }
}

/// Computes the displacement tensor on first access and hands out the stored value afterwards.
#[derive(Debug, Default)]
pub struct DisplacementCache {
    tensor: OnceLock<DisplacementTensor>,
}

impl DisplacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.tensor.get().is_some()
    }

    pub fn get_or_compute(&self, snapshot: &ConfigurationSnapshot) -> &DisplacementTensor {
        self.tensor
            .get_or_init(|| DisplacementTensor::compute(snapshot))
    }
}
