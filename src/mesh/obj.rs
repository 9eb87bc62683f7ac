//! Wavefront OBJ output.

use std::io::Write;

use super::{Mesh, MeshError};

/// Write `mesh` as OBJ: every vertex with three decimals, then every
/// triangle with one-based indices.
pub fn write_obj<W: Write>(out: &mut W, mesh: &Mesh) -> Result<(), MeshError> {
    for [x, y, z] in &mesh.vertices {
        writeln!(out, "v {x:.3} {y:.3} {z:.3}")?;
    }
    for [i, j, k] in &mesh.triangles {
        writeln!(out, "f {} {} {}", i + 1, j + 1, k + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_vertices_then_one_based_faces() {
        let mesh = Mesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.25, 0.0, -0.5], [0.0, 2.0, 0.12345]],
            triangles: vec![[0, 1, 2]],
        };

        let mut out = Vec::new();
        write_obj(&mut out, &mesh).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "v 0.000 0.000 0.000\n\
             v 1.250 0.000 -0.500\n\
             v 0.000 2.000 0.123\n\
             f 1 2 3\n"
        );
    }

    #[test]
    fn empty_mesh_writes_nothing() {
        let mut out = Vec::new();
        write_obj(&mut out, &Mesh::new()).unwrap();
        assert!(out.is_empty());
    }
}
