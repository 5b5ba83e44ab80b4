//! Aggregation of several meshes into one tagged mesh

use kiwi_core::{Error, PolyMesh, Result};

/// Merges a fixed list of tagged input meshes into one mesh
///
/// Every triangle of the output keeps the tag of the input it came from, so a
/// cell hit in the merged mesh can be traced back without relying on the
/// position of that input in the list.
#[derive(Debug, Clone)]
pub struct AppendPolyData<T> {
    inputs: Vec<(T, PolyMesh)>,
}

/// Output of [`AppendPolyData::update`]
#[derive(Debug, Clone)]
pub struct AppendedPolyData<T> {
    pub mesh: PolyMesh,
    /// Tag of each output triangle, indexed by triangle id
    pub triangle_tags: Vec<T>,
}

impl<T: Copy> AppendPolyData<T> {
    /// Create an aggregator without inputs
    pub fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    /// Register an input and return its slot
    pub fn add_input(&mut self, tag: T, mesh: PolyMesh) -> usize {
        self.inputs.push((tag, mesh));
        self.inputs.len() - 1
    }

    /// Replace the mesh in an existing slot, keeping its tag
    pub fn set_input(&mut self, slot: usize, mesh: PolyMesh) -> Result<()> {
        let count = self.inputs.len();
        let entry = self.inputs.get_mut(slot).ok_or_else(|| {
            Error::InvalidData(format!("Append input {} out of range ({} inputs)", slot, count))
        })?;
        entry.1 = mesh;
        Ok(())
    }

    /// Mesh currently held in `slot`
    pub fn input(&self, slot: usize) -> Option<&PolyMesh> {
        self.inputs.get(slot).map(|(_, mesh)| mesh)
    }

    /// Tag of `slot`
    pub fn tag(&self, slot: usize) -> Option<T> {
        self.inputs.get(slot).map(|(tag, _)| *tag)
    }

    /// Number of registered inputs
    pub fn number_of_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Merge all inputs in slot order
    pub fn update(&self) -> AppendedPolyData<T> {
        let mut mesh = PolyMesh::new();
        let mut triangle_tags = Vec::new();
        for (tag, input) in &self.inputs {
            mesh.append(input);
            triangle_tags.extend(std::iter::repeat(*tag).take(input.triangle_count()));
        }
        AppendedPolyData {
            mesh,
            triangle_tags,
        }
    }
}

impl<T: Copy> Default for AppendPolyData<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> AppendedPolyData<T> {
    /// Tag of the input that produced triangle `cell_id`
    pub fn tag_of_cell(&self, cell_id: usize) -> Option<T> {
        self.triangle_tags.get(cell_id).copied()
    }
}
