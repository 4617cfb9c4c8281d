use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const TRIPLET_KEY_SEPARATOR: char = ',';

/// Identifies the angle ∠ijk formed by three atoms, with `j` as the central atom.
///
/// Equality, hashing and ordering all compare the full `(i, j, k)` tuple lexicographically,
/// so the key behaves identically in ordered and hashed maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripletKey {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl TripletKey {
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Builds the canonical key for an angle at `center`: the outer atoms are ordered so that
    /// `i < k`, since the angle does not change when its arms are swapped.
    pub fn canonical(outer_a: usize, center: usize, outer_b: usize) -> Self {
        if outer_a <= outer_b {
            Self::new(outer_a, center, outer_b)
        } else {
            Self::new(outer_b, center, outer_a)
        }
    }

    pub fn center(&self) -> usize {
        self.j
    }

    pub fn is_canonical(&self) -> bool {
        self.i < self.k
    }
}

impl fmt::Display for TripletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.i,
            self.j,
            self.k,
            sep = TRIPLET_KEY_SEPARATOR
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseTripletKeyError {
    #[error("Expected 3 comma-separated indices, found {found} in '{input}'")]
    WrongArity { input: String, found: usize },

    #[error("Invalid atom index '{token}' in '{input}'")]
    InvalidIndex { input: String, token: String },
}

impl FromStr for TripletKey {
    type Err = ParseTripletKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(TRIPLET_KEY_SEPARATOR).collect();
        if tokens.len() != 3 {
            return Err(ParseTripletKeyError::WrongArity {
                input: s.to_string(),
                found: tokens.len(),
            });
        }

        let mut indices = [0usize; 3];
        for (slot, token) in indices.iter_mut().zip(&tokens) {
            *slot = token
                .trim()
                .parse()
                .map_err(|_| ParseTripletKeyError::InvalidIndex {
                    input: s.to_string(),
                    token: token.to_string(),
                })?;
        }

        Ok(Self::new(indices[0], indices[1], indices[2]))
    }
}

/// An unordered pair of atomic numbers, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementPair {
    low: u32,
    high: u32,
}

impl ElementPair {
    pub fn new(z_a: u32, z_b: u32) -> Self {
        Self {
            low: z_a.min(z_b),
            high: z_a.max(z_b),
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn as_tuple(&self) -> (u32, u32) {
        (self.low, self.high)
    }
}

impl From<(u32, u32)> for ElementPair {
    fn from((z_a, z_b): (u32, u32)) -> Self {
        Self::new(z_a, z_b)
    }
}
