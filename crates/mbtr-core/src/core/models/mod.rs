//! # Core Models Module
//!
//! Data structures describing the configuration a kernel operates on and the keys of its results.
//!
//! ## Key Components
//!
//! - [`snapshot`] - Positions, atomic numbers, element feature indices and the cell boundary
//! - [`keys`] - `TripletKey` for angle results and `ElementPair` for pair aggregations
//!
//! Atoms with an index below the snapshot's cell limit belong to the original simulation cell;
//! the remaining atoms are periodic copies placed at translated positions. Every enumeration
//! in the kernel keeps only pairs and triplets anchored to the original cell.

pub mod keys;
pub mod snapshot;
