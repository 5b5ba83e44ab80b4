//! # Kiwi Algorithms
//!
//! Picking support for interactive widgets.
//!
//! Geometry from several representations is merged with [`AppendPolyData`],
//! which remembers which input every triangle came from, and indexed by a
//! [`CellLocator`] that answers line-segment intersection queries.

pub mod append;
pub mod intersection;
pub mod locator;

// Re-export commonly used items
pub use append::*;
pub use intersection::*;
pub use locator::*;
