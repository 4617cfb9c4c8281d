use crate::core::models::keys::{ElementPair, TripletKey};
use crate::core::models::snapshot::ConfigurationSnapshot;
use crate::engine::cache::{DisplacementCache, DisplacementTensor};
use crate::engine::tasks::{pairwise, triplet};
use nalgebra::DMatrix;
use std::collections::BTreeMap;
use tracing::debug;

/// Geometric queries over one immutable atomic configuration.
///
/// The displacement tensor is computed on the first pairwise query and reused afterwards;
/// everything else is recomputed per call and returned as a freshly owned container.
/// The kernel is `Send + Sync`, and a concurrent first query still computes the tensor once.
#[derive(Debug)]
pub struct GeometryKernel {
    snapshot: ConfigurationSnapshot,
    displacements: DisplacementCache,
}

impl GeometryKernel {
    pub fn new(snapshot: ConfigurationSnapshot) -> Self {
        debug!(
            num_atoms = snapshot.len(),
            cell_limit = snapshot.cell_limit(),
            "Creating geometry kernel."
        );
        Self {
            snapshot,
            displacements: DisplacementCache::new(),
        }
    }

    pub fn snapshot(&self) -> &ConfigurationSnapshot {
        &self.snapshot
    }

    /// The N×N displacement tensor, `(i, j)` = `position[j] - position[i]`.
    pub fn displacements(&self) -> &DisplacementTensor {
        self.displacements.get_or_compute(&self.snapshot)
    }

    pub fn distance_matrix(&self) -> DMatrix<f64> {
        pairwise::distance_matrix(self.displacements())
    }

    /// Reciprocal distances with a zero diagonal.
    ///
    /// # Panics
    ///
    /// Panics if two atoms share a position.
    pub fn inverse_distance_matrix(&self) -> DMatrix<f64> {
        pairwise::inverse_distance_matrix(&self.distance_matrix())
    }

    /// Inverse distances grouped by unordered element pair.
    ///
    /// Each unordered atom pair appears once, and only if at least one of its atoms belongs to
    /// the original cell.
    ///
    /// # Panics
    ///
    /// Panics if two atoms of an anchored pair share a position.
    pub fn inverse_distance_by_element_pair(&self) -> BTreeMap<ElementPair, Vec<f64>> {
        pairwise::inverse_distance_by_element_pair(&self.snapshot, self.displacements())
    }

    pub fn distance_by_element_pair(&self) -> BTreeMap<ElementPair, Vec<f64>> {
        pairwise::distance_by_element_pair(&self.snapshot, self.displacements())
    }

    /// Cosines of all cell-anchored angles, one entry per center and unordered arm pair.
    ///
    /// # Panics
    ///
    /// Panics if two atoms of an enumerated triplet share a position.
    pub fn angle_cosines(&self) -> BTreeMap<TripletKey, f64> {
        triplet::angle_cosines(&self.snapshot)
    }

    /// Same keys as [`Self::angle_cosines`], with angles in degrees.
    pub fn angles(&self) -> BTreeMap<TripletKey, f64> {
        triplet::angles(&self.snapshot)
    }
}

impl From<ConfigurationSnapshot> for GeometryKernel {
    fn from(snapshot: ConfigurationSnapshot) -> Self {
        Self::new(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ConfigurationBuilder;
    use nalgebra::Point3;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn right_triangle_kernel() -> GeometryKernel {
        ConfigurationBuilder::new()
            .positions(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ])
            .atomic_numbers(vec![1, 1, 1])
            .element_index(HashMap::from([(1, 0)]))
            .cell_limit(3)
            .build()
            .unwrap()
            .into()
    }

    /// Two cell atoms and a copy of atom 0 translated by the lattice vector (3, 0, 0).
    fn periodic_kernel() -> GeometryKernel {
        ConfigurationBuilder::new()
            .positions(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.5, 0.0),
                Point3::new(3.0, 0.0, 0.0),
            ])
            .atomic_numbers(vec![6, 8, 6])
            .element_index(HashMap::from([(6, 0), (8, 1)]))
            .cell_limit(2)
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn right_triangle_distances_and_angle() {
        let kernel = right_triangle_kernel();
        let distances = kernel.distance_matrix();
        assert_eq!(distances[(0, 1)], 1.0);
        assert_eq!(distances[(0, 2)], 1.0);
        assert!(f64_approx_equal(distances[(1, 2)], 2.0f64.sqrt()));

        let cosines = kernel.angle_cosines();
        assert!(f64_approx_equal(cosines[&TripletKey::new(1, 0, 2)], 0.0));
        assert!(f64_approx_equal(kernel.angles()[&TripletKey::new(1, 0, 2)], 90.0));
    }

    #[test]
    fn diagonals_are_zero_and_inverse_is_reciprocal() {
        let kernel = periodic_kernel();
        let distances = kernel.distance_matrix();
        let inverse = kernel.inverse_distance_matrix();
        for i in 0..3 {
            assert_eq!(distances[(i, i)], 0.0);
            assert_eq!(inverse[(i, i)], 0.0);
            for j in 0..3 {
                assert_eq!(distances[(i, j)], distances[(j, i)]);
                if i != j {
                    assert!(f64_approx_equal(inverse[(i, j)], 1.0 / distances[(i, j)]));
                }
            }
        }
    }

    #[test]
    fn periodic_copy_pairs_with_cell_atom_are_kept() {
        let kernel = periodic_kernel();
        let grouped = kernel.inverse_distance_by_element_pair();

        // Pairs (0, 1), (0, 2), (1, 2): each touches a cell atom.
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), 3);
        let carbon_oxygen = &grouped[&ElementPair::new(8, 6)];
        assert_eq!(carbon_oxygen.len(), 2);
        let d12 = kernel.distance_matrix()[(1, 2)];
        assert!(f64_approx_equal(carbon_oxygen[1], 1.0 / d12));
        assert!(f64_approx_equal(grouped[&ElementPair::new(6, 6)][0], 1.0 / 3.0));
    }

    #[test]
    fn pairs_among_periodic_copies_only_are_excluded() {
        let snapshot = ConfigurationSnapshot::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.5, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(4.0, 0.5, 0.0),
            ],
            vec![6, 8, 6, 8],
            HashMap::from([(6, 0), (8, 1)]),
            2,
        )
        .unwrap();
        let kernel = GeometryKernel::new(snapshot);
        let grouped = kernel.inverse_distance_by_element_pair();

        // 6 unordered pairs minus the copy-copy pair (2, 3).
        assert_eq!(grouped.values().map(Vec::len).sum::<usize>(), 5);
        assert_eq!(grouped[&ElementPair::new(6, 8)].len(), 3);
    }

    #[test]
    fn repeated_queries_return_identical_results() {
        let kernel = periodic_kernel();
        let first = kernel.displacements().clone();
        let first_distances = kernel.distance_matrix();
        assert_eq!(kernel.displacements(), &first);
        assert_eq!(kernel.distance_matrix(), first_distances);
        assert!(std::ptr::eq(kernel.displacements(), kernel.displacements()));
        assert_eq!(kernel.angle_cosines(), kernel.angle_cosines());
    }

    #[test]
    fn concurrent_first_access_computes_tensor_once() {
        let kernel = Arc::new(periodic_kernel());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let kernel = Arc::clone(&kernel);
                thread::spawn(move || kernel.displacements() as *const DisplacementTensor as usize)
            })
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    #[should_panic(expected = "must not share a position")]
    fn inverse_distances_of_coincident_atoms_fail_fast() {
        let kernel = GeometryKernel::new(
            ConfigurationSnapshot::new(
                vec![Point3::origin(), Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
                vec![1, 1, 1],
                HashMap::from([(1, 0)]),
                3,
            )
            .unwrap(),
        );
        assert_eq!(kernel.distance_matrix()[(0, 1)], 0.0);
        kernel.inverse_distance_matrix();
    }

    #[test]
    fn empty_kernel_returns_empty_results() {
        let kernel = GeometryKernel::new(
            ConfigurationSnapshot::new(Vec::new(), Vec::new(), HashMap::new(), 0).unwrap(),
        );
        assert!(kernel.displacements().is_empty());
        assert_eq!(kernel.distance_matrix().shape(), (0, 0));
        assert!(kernel.inverse_distance_by_element_pair().is_empty());
        assert!(kernel.angle_cosines().is_empty());
    }
}
