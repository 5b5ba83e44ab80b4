//! # Kiwi Volume
//!
//! Volumetric image data and the filters the scene layer consumes as black
//! boxes: slice (VOI) extraction, grayscale color mapping, bounding outline
//! generation and marching-cubes isosurface contouring.

pub mod lookup_table;
pub mod marching_cubes;
pub mod outline;
pub mod parallel;
pub mod volume;

// Re-export commonly used items
pub use lookup_table::*;
pub use marching_cubes::*;
pub use outline::*;
pub use volume::*;
