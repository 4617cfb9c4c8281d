use crate::core::models::keys::ElementPair;
use crate::core::models::snapshot::ConfigurationSnapshot;
use crate::engine::cache::DisplacementTensor;
use nalgebra::DMatrix;
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[instrument(skip_all, name = "distance_matrix_task")]
pub fn distance_matrix(tensor: &DisplacementTensor) -> DMatrix<f64> {
    let n = tensor.len();
    // Both triangles read the same vector so the matrix is exactly symmetric.
    DMatrix::from_fn(n, n, |i, j| {
        let (a, b) = if i <= j { (i, j) } else { (j, i) };
        tensor[(a, b)].norm()
    })
}

/// Element-wise reciprocal of a distance matrix with the diagonal held at zero.
///
/// # Panics
///
/// Panics if an off-diagonal distance is zero.
#[instrument(skip_all, name = "inverse_distance_matrix_task")]
pub fn inverse_distance_matrix(distances: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(distances.nrows(), distances.ncols(), |i, j| {
        if i == j {
            0.0
        } else {
            reciprocal_distance(distances[(i, j)])
        }
    })
}

/// # Panics
///
/// Panics if two atoms of an anchored pair share a position.
#[instrument(skip_all, name = "inverse_distance_by_element_pair_task")]
pub fn inverse_distance_by_element_pair(
    snapshot: &ConfigurationSnapshot,
    tensor: &DisplacementTensor,
) -> BTreeMap<ElementPair, Vec<f64>> {
    group_by_element_pair(snapshot, tensor, reciprocal_distance)
}

#[instrument(skip_all, name = "distance_by_element_pair_task")]
pub fn distance_by_element_pair(
    snapshot: &ConfigurationSnapshot,
    tensor: &DisplacementTensor,
) -> BTreeMap<ElementPair, Vec<f64>> {
    group_by_element_pair(snapshot, tensor, |distance| distance)
}

#[inline]
fn reciprocal_distance(distance: f64) -> f64 {
    assert!(
        distance > 0.0,
        "inverse distance is undefined for a zero-length pair; atoms must not share a position"
    );
    1.0 / distance
}

/// Applies `value_fn` to the distance of every unordered atom pair anchored to the original
/// cell and buckets the results by element pair.
///
/// Pairs are visited as `i < j`, so each pair contributes once and every bucket is ordered
/// by `(i, j)`.
fn group_by_element_pair<F>(
    snapshot: &ConfigurationSnapshot,
    tensor: &DisplacementTensor,
    value_fn: F,
) -> BTreeMap<ElementPair, Vec<f64>>
where
    F: Fn(f64) -> f64 + Sync,
{
    let n = snapshot.len();
    let value_fn = &value_fn;
    let pairs_from = |i: usize| {
        (i + 1..n)
            .filter(move |&j| snapshot.anchors_cell(&[i, j]))
            .map(move |j| {
                let key = ElementPair::new(snapshot.atomic_number(i), snapshot.atomic_number(j));
                (key, value_fn(tensor[(i, j)].norm()))
            })
    };

    #[cfg(not(feature = "parallel"))]
    let entries: Vec<(ElementPair, f64)> = (0..n).flat_map(pairs_from).collect();

    #[cfg(feature = "parallel")]
    let entries: Vec<(ElementPair, f64)> =
        (0..n).into_par_iter().flat_map_iter(pairs_from).collect();

    let num_pairs = entries.len();
    let mut grouped: BTreeMap<ElementPair, Vec<f64>> = BTreeMap::new();
    for (key, value) in entries {
        grouped.entry(key).or_default().push(value);
    }

    info!(
        num_pairs,
        num_element_pairs = grouped.len(),
        "Grouped pair values by element pair."
    );
    grouped
}
