//! Wireframe bounding-box outlines

use kiwi_core::{Bounds, PolyMesh};

use crate::volume::ImageVolume;

/// Corner pairs of the twelve box edges, corners numbered x-fastest
const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [2, 3],
    [4, 5],
    [6, 7],
    [0, 2],
    [1, 3],
    [4, 6],
    [5, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Eight-point, twelve-line wireframe around `bounds`
pub fn outline(bounds: &Bounds) -> PolyMesh {
    PolyMesh::from_lines(bounds.corners().to_vec(), BOX_EDGES.to_vec())
}

/// Outline around the full extent of a volume
pub fn volume_outline(volume: &ImageVolume) -> PolyMesh {
    outline(&volume.bounds())
}
