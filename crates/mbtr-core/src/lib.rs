//! # MBTR Geometry Kernel
//!
//! The performance-critical geometric part of the many-body tensor representation (MBTR):
//! pairwise displacement vectors, distances, inverse distances and angle cosines over atom
//! triplets, computed over a configuration whose periodic images have already been expanded
//! into explicit pseudo-atoms.
//!
//! ## Architectural Philosophy
//!
//! The library follows a two-layer split:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`ConfigurationSnapshot`), the shared
//!   key types (`TripletKey`, `ElementPair`) and pure geometric helpers.
//!
//! - **[`engine`]: The Logic Core.** The stateful `GeometryKernel` with its memoized
//!   displacement tensor, the validated configuration builder, and the pairwise and triplet
//!   enumeration tasks.
//!
//! [`interop`] re-encodes native results for binding layers that cannot carry composite keys.
//!
//! ## Example
//!
//! ```
//! use mbtr_kernel::engine::config::ConfigurationBuilder;
//! use mbtr_kernel::engine::kernel::GeometryKernel;
//! use nalgebra::Point3;
//!
//! let snapshot = ConfigurationBuilder::new()
//!     .positions(vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ])
//!     .atomic_numbers(vec![1, 1, 1])
//!     .element_index([(1, 0)].into_iter().collect())
//!     .cell_limit(3)
//!     .build()
//!     .unwrap();
//!
//! let kernel = GeometryKernel::new(snapshot);
//! assert_eq!(kernel.distance_matrix()[(0, 1)], 1.0);
//! ```

pub mod core;
pub mod engine;
pub mod interop;
