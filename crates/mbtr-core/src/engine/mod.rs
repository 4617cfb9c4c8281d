//! # Engine Module
//!
//! The stateful part of the library: a [`kernel::GeometryKernel`] owns one configuration
//! snapshot together with its lazily computed displacement tensor and exposes the pairwise
//! and triplet computations on top of it.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated construction of snapshots
//! - **Displacement Cache** ([`cache`]) - One-time computed N×N displacement tensor
//! - **Kernel** ([`kernel`]) - The public entry point for all geometric queries
//! - **Tasks** ([`tasks`]) - Pairwise (distances, element-pair grouping) and triplet
//!   (angle) enumerations
//!
//! With the `parallel` feature the enumerations run on the rayon thread pool. Results are
//! collected in a fixed order, so the output does not depend on the feature.

pub mod cache;
pub mod config;
pub mod kernel;
pub mod tasks;
