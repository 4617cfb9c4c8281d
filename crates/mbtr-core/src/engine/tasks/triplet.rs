use crate::core::models::keys::TripletKey;
use crate::core::models::snapshot::ConfigurationSnapshot;
use crate::core::utils::geometry::{angle_cosine, angle_degrees};
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::BTreeMap;
use tracing::{info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cosines of every angle ∠ijk anchored to the original cell, keyed canonically with `i < k`.
///
/// Arm vectors are taken straight from the positions of each triplet rather than from the
/// displacement tensor.
///
/// # Panics
///
/// Panics if two atoms of a triplet share a position.
#[instrument(skip_all, name = "angle_cosines_task")]
pub fn angle_cosines(snapshot: &ConfigurationSnapshot) -> BTreeMap<TripletKey, f64> {
    enumerate_angles(snapshot, angle_cosine)
}

/// Same enumeration as [`angle_cosines`], with the angle in degrees.
#[instrument(skip_all, name = "angles_task")]
pub fn angles(snapshot: &ConfigurationSnapshot) -> BTreeMap<TripletKey, f64> {
    enumerate_angles(snapshot, angle_degrees)
}

fn enumerate_angles<F>(snapshot: &ConfigurationSnapshot, value_fn: F) -> BTreeMap<TripletKey, f64>
where
    F: Fn(&Point3<f64>, &Point3<f64>, &Point3<f64>) -> f64 + Sync,
{
    let n = snapshot.len();
    let value_fn = &value_fn;
    let angles_at = |center: usize| {
        (0..n)
            .filter(move |&outer| outer != center)
            .tuple_combinations::<(usize, usize)>()
            .filter(move |&(i, k)| snapshot.anchors_cell(&[i, center, k]))
            .map(move |(i, k)| {
                let value = value_fn(
                    snapshot.position(i),
                    snapshot.position(center),
                    snapshot.position(k),
                );
                (TripletKey::new(i, center, k), value)
            })
    };

    #[cfg(not(feature = "parallel"))]
    let result: BTreeMap<TripletKey, f64> = (0..n).flat_map(angles_at).collect();

    #[cfg(feature = "parallel")]
    let result: BTreeMap<TripletKey, f64> =
        (0..n).into_par_iter().flat_map_iter(angles_at).collect();

    trace!(
        num_atoms = n,
        cell_limit = snapshot.cell_limit(),
        "Enumerated anchored triplets."
    );
    info!(num_triplets = result.len(), "Angle enumeration complete.");
    result
}
