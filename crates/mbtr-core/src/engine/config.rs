use crate::core::models::snapshot::{ConfigurationSnapshot, SnapshotError};
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid configuration: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Atoms {i} and {j} are {distance:.3e} apart, below the minimum separation {min_separation}")]
    CoincidentAtoms {
        i: usize,
        j: usize,
        distance: f64,
        min_separation: f64,
    },
}

#[derive(Default)]
pub struct ConfigurationBuilder {
    positions: Option<Vec<Point3<f64>>>,
    atomic_numbers: Option<Vec<u32>>,
    element_index: Option<HashMap<u32, usize>>,
    cell_limit: Option<usize>,
    min_separation: Option<f64>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(mut self, positions: Vec<Point3<f64>>) -> Self {
        self.positions = Some(positions);
        self
    }
    pub fn atomic_numbers(mut self, atomic_numbers: Vec<u32>) -> Self {
        self.atomic_numbers = Some(atomic_numbers);
        self
    }
    pub fn element_index(mut self, element_index: HashMap<u32, usize>) -> Self {
        self.element_index = Some(element_index);
        self
    }
    pub fn cell_limit(mut self, cell_limit: usize) -> Self {
        self.cell_limit = Some(cell_limit);
        self
    }
    /// Rejects configurations in which two atoms are closer than `distance`.
    ///
    /// The kernel itself assumes distinct positions; this is the place to check it.
    pub fn min_separation(mut self, distance: f64) -> Self {
        self.min_separation = Some(distance);
        self
    }

    pub fn build(self) -> Result<ConfigurationSnapshot, ConfigError> {
        let positions = self
            .positions
            .ok_or(ConfigError::MissingParameter("positions"))?;
        let atomic_numbers = self
            .atomic_numbers
            .ok_or(ConfigError::MissingParameter("atomic_numbers"))?;
        let element_index = self
            .element_index
            .ok_or(ConfigError::MissingParameter("element_index"))?;
        let cell_limit = self
            .cell_limit
            .ok_or(ConfigError::MissingParameter("cell_limit"))?;

        if let Some(min_separation) = self.min_separation {
            check_separation(&positions, min_separation)?;
        }

        let snapshot =
            ConfigurationSnapshot::new(positions, atomic_numbers, element_index, cell_limit)?;
        debug!(
            num_atoms = snapshot.len(),
            cell_limit = snapshot.cell_limit(),
            num_elements = snapshot.element_index().len(),
            "Built configuration snapshot."
        );
        Ok(snapshot)
    }
}

fn check_separation(positions: &[Point3<f64>], min_separation: f64) -> Result<(), ConfigError> {
    let offending = positions
        .iter()
        .enumerate()
        .tuple_combinations::<((usize, &Point3<f64>), (usize, &Point3<f64>))>()
        .map(|((i, a), (j, b))| (i, j, nalgebra::distance(a, b)))
        .find(|&(_, _, distance)| distance < min_separation);

    match offending {
        Some((i, j, distance)) => Err(ConfigError::CoincidentAtoms {
            i,
            j,
            distance,
            min_separation,
        }),
        None => Ok(()),
    }
}
