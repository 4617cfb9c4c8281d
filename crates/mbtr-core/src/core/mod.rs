//! # Core Module
//!
//! Stateless building blocks of the geometry kernel.
//!
//! - **Configuration Representation** ([`models`]) - The immutable atomic configuration snapshot
//!   and the key types used to index pair and triplet results
//! - **Geometry** ([`utils`]) - Pure vector math shared by the enumeration tasks
//!
//! Nothing in this module caches or mutates state; the stateful pieces live in
//! [`crate::engine`].

pub mod models;
pub mod utils;
