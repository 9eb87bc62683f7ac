//! Triangle meshes of embossed Braille, for 3D printing.
//!
//! Cells are laid out left to right and lines top to bottom, each raised dot
//! modelled as a short cylinder with a tapered dome, all sitting on a
//! rectangular backing plate. Meshes export to Wavefront OBJ.
//!
//! # Example
//!
//! ```rust
//! use braille_fsm::mesh::{write_obj, MeshGenerator, MeshParams};
//!
//! let generator = MeshGenerator::new(MeshParams::default()).unwrap();
//! let mesh = generator.braille_mesh("⠁").unwrap();
//!
//! let mut obj = Vec::new();
//! write_obj(&mut obj, &mesh).unwrap();
//! assert!(String::from_utf8(obj).unwrap().starts_with("v "));
//! ```

pub mod generator;
pub mod obj;

pub use generator::{MeshGenerator, MeshParams};
pub use obj::write_obj;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::braille::CellError;

pub type Vertex = [f64; 3];

/// Zero-based vertex indices of one triangle.
pub type Triangle = [usize; 3];

/// Errors raised while building or writing a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Cannot emboss text: {0}")]
    Cell(#[from] CellError),

    #[error("Invalid mesh parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to read mesh parameters: {0}")]
    Params(#[from] serde_json::Error),

    #[error("Failed to write mesh: {0}")]
    Io(#[from] std::io::Error),
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `other`, shifting its indices past the existing vertices.
    pub fn append(&mut self, other: Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|[i, j, k]| [i + offset, j + offset, k + offset]),
        );
    }

    /// Scale each axis, then move by `offset`.
    pub fn transformed(mut self, scale: Vertex, offset: Vertex) -> Self {
        for v in &mut self.vertices {
            for axis in 0..3 {
                v[axis] = offset[axis] + v[axis] * scale[axis];
            }
        }
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn append_offsets_indices() {
        let mut mesh = triangle();
        mesh.append(triangle());

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn append_to_empty_keeps_indices() {
        let mut mesh = Mesh::new();
        assert!(mesh.is_empty());
        mesh.append(triangle());
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn transformed_scales_before_offsetting() {
        let mesh = triangle().transformed([2.0, 3.0, 1.0], [1.0, 1.0, -0.5]);
        assert_eq!(mesh.vertices[1], [3.0, 1.0, -0.5]);
        assert_eq!(mesh.vertices[2], [1.0, 4.0, -0.5]);
    }
}
