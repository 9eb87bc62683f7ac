//! Geometry for dots, cells, lines and the backing plate.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Mesh, MeshError, Triangle, Vertex};
use crate::braille::Cell;

/// Dimensions of the embossed text, in millimetres.
///
/// Defaults follow the Library of Congress Specification 800 for size and
/// spacing of Braille. `dot_taper` is the fraction of the dot height that is
/// cylindrical before the dome starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    pub dot_radius: f64,
    pub dot_height: f64,
    pub dot_taper: f64,
    /// Horizontal distance between dot centres within a cell
    pub dot_dx: f64,
    /// Vertical distance between dot centres within a cell
    pub dot_dy: f64,
    /// Horizontal distance between corresponding dots of adjacent cells
    pub char_dx: f64,
    /// Vertical distance between corresponding dots of adjacent lines
    pub char_dy: f64,
    pub vtx_per_ring: usize,
    pub n_taper_rings: usize,
    /// Thickness of the backing plate below the dots
    pub backing_depth: f64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            dot_radius: 1.44 / 2.0,
            dot_height: 0.48,
            dot_taper: 0.75,
            dot_dx: 2.34,
            dot_dy: 2.34,
            char_dx: 6.2,
            char_dy: 10.0,
            vtx_per_ring: 10,
            n_taper_rings: 5,
            backing_depth: 0.5,
        }
    }
}

impl MeshParams {
    pub fn from_json(json: &str) -> Result<Self, MeshError> {
        let params: Self = serde_json::from_str(json)?;
        params.check()?;
        Ok(params)
    }

    pub fn check(&self) -> Result<(), MeshError> {
        let lengths = [
            ("dot_radius", self.dot_radius),
            ("dot_height", self.dot_height),
            ("dot_dx", self.dot_dx),
            ("dot_dy", self.dot_dy),
            ("char_dx", self.char_dx),
            ("char_dy", self.char_dy),
            ("backing_depth", self.backing_depth),
        ];
        let bad = lengths
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0));
        if let Some((name, value)) = bad {
            return Err(MeshError::InvalidParams(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if !(0.0..=1.0).contains(&self.dot_taper) {
            return Err(MeshError::InvalidParams(format!(
                "dot_taper must be within 0..=1, got {}",
                self.dot_taper
            )));
        }
        if self.vtx_per_ring < 3 {
            return Err(MeshError::InvalidParams(format!(
                "vtx_per_ring must be at least 3, got {}",
                self.vtx_per_ring
            )));
        }
        Ok(())
    }
}

/// Builds meshes from Braille cells.
///
/// The unit dot is generated once per generator and scaled into place for
/// every raised dot.
pub struct MeshGenerator {
    params: MeshParams,
    unit_dot: Mesh,
}

impl MeshGenerator {
    pub fn new(params: MeshParams) -> Result<Self, MeshError> {
        params.check()?;
        let unit_dot = Self::unit_dot(params.dot_taper, params.vtx_per_ring, params.n_taper_rings);
        Ok(Self { params, unit_dot })
    }

    pub fn params(&self) -> &MeshParams {
        &self.params
    }

    /// Two triangles covering the quad `i -> j -> k -> l`.
    ///
    /// ```text
    /// l--k
    /// |  |
    /// i--j
    /// ```
    pub fn plane(i: usize, j: usize, k: usize, l: usize) -> [Triangle; 2] {
        [[i, j, k], [k, l, i]]
    }

    /// A dot of unit radius and height, base centred on the origin, axis
    /// along +z.
    ///
    /// Cylindrical up to `taper`, then closed by `n_taper_rings` rings of
    /// shrinking radius and a cap vertex at height 1.
    pub fn unit_dot(taper: f64, vtx_per_ring: usize, n_taper_rings: usize) -> Mesh {
        let n = vtx_per_ring;
        let delta = TAU / n as f64;
        let circle: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 * delta;
                (angle.sin(), angle.cos())
            })
            .collect();

        let ring = |radius: f64, z: f64| {
            circle
                .iter()
                .map(move |&(x, y)| [x * radius, y * radius, z])
        };
        let disc = move |centre: usize, first: usize| {
            (0..n).map(move |i| [first + i, first + (i + 1) % n, centre])
        };
        let band = move |upper: usize, lower: usize| {
            (0..n).flat_map(move |i| {
                let j = (i + 1) % n;
                Self::plane(upper + i, upper + j, lower + j, lower + i)
            })
        };

        let mut mesh = Mesh::new();
        let (cylinder, dome) = (taper, 1.0 - taper);

        mesh.vertices.push([0.0, 0.0, 0.0]);
        mesh.vertices.extend(ring(1.0, 0.0));
        mesh.triangles.extend(disc(0, 1));

        mesh.vertices.extend(ring(1.0, cylinder));
        let top = mesh.vertices.len() - n;
        mesh.triangles.extend(band(top, top - n));

        let rings = n_taper_rings + 1;
        for i in 1..rings {
            let radius = (i as f64 * FRAC_PI_2 / rings as f64).cos();
            let height = cylinder + (i as f64 * FRAC_PI_2 / (rings - 1) as f64).sin() * dome;
            mesh.vertices.extend(ring(radius, height));
            let top = mesh.vertices.len() - n;
            mesh.triangles.extend(band(top, top - n));
        }

        // Cap winding is flipped so its normals face up.
        mesh.vertices.push([0.0, 0.0, 1.0]);
        let centre = mesh.vertices.len() - 1;
        let cap = disc(centre, centre - n).map(|[i, j, k]| [j, i, k]);
        mesh.triangles.extend(cap);

        mesh
    }

    /// The unit cube on `[0, 1]` along every axis.
    pub fn unit_cube() -> Mesh {
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        let faces = [
            (4, 5, 6, 7),
            (3, 2, 1, 0),
            (0, 1, 5, 4),
            (1, 2, 6, 5),
            (2, 3, 7, 6),
            (3, 0, 4, 7),
        ];
        let triangles = faces
            .into_iter()
            .flat_map(|(i, j, k, l)| Self::plane(i, j, k, l))
            .collect();

        Mesh {
            vertices,
            triangles,
        }
    }

    /// One dot with its base centred on `centre`.
    pub fn dot(&self, centre: Vertex) -> Mesh {
        let p = &self.params;
        self.unit_dot
            .clone()
            .transformed([p.dot_radius, p.dot_radius, p.dot_height], centre)
    }

    /// One cell whose bounding box has its lower-left corner at `origin`.
    pub fn cell(&self, cell: Cell, origin: Vertex) -> Mesh {
        let p = &self.params;
        let [x, y, z] = origin;
        let x_ofs = 0.5 * (p.char_dx - p.dot_dx);
        let y_ofs = p.char_dy - 0.5 * (p.char_dy - 2.0 * p.dot_dy);

        let mut mesh = Mesh::new();
        for col in 0..2u8 {
            for row in 0..3u8 {
                if cell.is_raised(col * 3 + row + 1) {
                    let centre = [
                        x + x_ofs + f64::from(col) * p.dot_dx,
                        y + y_ofs - f64::from(row) * p.dot_dy,
                        z,
                    ];
                    mesh.append(self.dot(centre));
                }
            }
        }
        mesh
    }

    /// A row of cells starting at `origin`.
    pub fn line(&self, cells: &[Cell], origin: Vertex) -> Mesh {
        let [x, y, z] = origin;
        let mut mesh = Mesh::new();
        for (i, cell) in cells.iter().enumerate() {
            let x = x + i as f64 * self.params.char_dx;
            mesh.append(self.cell(*cell, [x, y, z]));
        }
        mesh
    }

    /// Several rows, first row on top; `origin` is the lower-left corner of
    /// the last row.
    pub fn lines(&self, lines: &[Vec<Cell>], origin: Vertex) -> Mesh {
        let [x, y, z] = origin;
        let top = y + lines.len().saturating_sub(1) as f64 * self.params.char_dy;

        let mut mesh = Mesh::new();
        for (i, cells) in lines.iter().enumerate() {
            let y = top - i as f64 * self.params.char_dy;
            mesh.append(self.line(cells, [x, y, z]));
        }
        mesh
    }

    /// Plate under `lines`, as wide as the longest line and as tall as all
    /// of them, with its top face at z = 0.
    pub fn backing(&self, lines: &[Vec<Cell>]) -> Mesh {
        let p = &self.params;
        let longest = lines.iter().map(Vec::len).max().unwrap_or(0);
        let scale = [
            p.char_dx * longest as f64,
            p.char_dy * lines.len() as f64,
            p.backing_depth,
        ];
        Self::unit_cube().transformed(scale, [0.0, 0.0, -p.backing_depth])
    }

    /// Mesh for a string of Braille cells, one row per text line, on a
    /// backing plate.
    pub fn braille_mesh(&self, text: &str) -> Result<Mesh, MeshError> {
        let lines = text
            .lines()
            .map(|line| line.chars().map(Cell::from_char).collect())
            .collect::<Result<Vec<Vec<Cell>>, _>>()?;

        let mut mesh = self.lines(&lines, [0.0, 0.0, 0.0]);
        mesh.append(self.backing(&lines));

        tracing::debug!(
            lines = lines.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "mesh generated"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::braille::CellError;

    fn generator() -> MeshGenerator {
        MeshGenerator::new(MeshParams::default()).unwrap()
    }

    fn close(a: Vertex, b: Vertex) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    fn indices_in_range(mesh: &Mesh) -> bool {
        mesh.triangles
            .iter()
            .flatten()
            .all(|&i| i < mesh.vertex_count())
    }

    #[test]
    fn plane_splits_quad_into_two_triangles() {
        assert_eq!(MeshGenerator::plane(0, 1, 2, 3), [[0, 1, 2], [2, 3, 0]]);
    }

    #[test]
    fn unit_dot_has_expected_topology() {
        let dot = MeshGenerator::unit_dot(0.75, 10, 5);

        // centre + base ring + cylinder top + 5 taper rings + cap
        assert_eq!(dot.vertex_count(), 2 + 7 * 10);
        // base disc + cylinder band + 5 taper bands + cap disc
        assert_eq!(dot.triangle_count(), 10 + 20 + 5 * 20 + 10);
        assert!(indices_in_range(&dot));

        assert_eq!(dot.vertices[0], [0.0, 0.0, 0.0]);
        assert_eq!(dot.vertices[dot.vertex_count() - 1], [0.0, 0.0, 1.0]);
        assert!(dot.vertices.iter().all(|v| (0.0..=1.0 + 1e-9).contains(&v[2])));
    }

    #[test]
    fn unit_dot_cap_is_wound_opposite_to_base() {
        let dot = MeshGenerator::unit_dot(0.75, 4, 1);
        assert_eq!(dot.triangles[0], [1, 2, 0]);

        let centre = dot.vertex_count() - 1;
        let last = dot.triangles[dot.triangle_count() - 4];
        assert_eq!(last, [centre - 3, centre - 4, centre]);
    }

    #[test]
    fn unit_cube_is_closed_box() {
        let cube = MeshGenerator::unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(indices_in_range(&cube));
    }

    #[test]
    fn cell_places_dots_inside_its_box() {
        let g = generator();
        let per_dot = g.unit_dot.vertex_count();

        let a = g.cell(Cell::from_dots(&[1]).unwrap(), [0.0, 0.0, 0.0]);
        assert_eq!(a.vertex_count(), per_dot);
        assert!(close(a.vertices[0], [1.93, 7.34, 0.0]));

        let c = g.cell(Cell::from_dots(&[3, 4]).unwrap(), [0.0, 0.0, 0.0]);
        assert_eq!(c.vertex_count(), 2 * per_dot);
        assert!(close(c.vertices[0], [1.93, 7.34 - 2.0 * 2.34, 0.0]));
        assert!(close(c.vertices[per_dot], [1.93 + 2.34, 7.34, 0.0]));
    }

    #[test]
    fn blank_cell_has_no_geometry() {
        assert!(generator().cell(Cell::BLANK, [0.0, 0.0, 0.0]).is_empty());
    }

    #[test]
    fn line_advances_by_cell_width() {
        let g = generator();
        let a = Cell::from_dots(&[1]).unwrap();
        let mesh = g.line(&[a, a], [0.0, 0.0, 0.0]);
        let second = mesh.vertices[g.unit_dot.vertex_count()];
        assert!(close(second, [1.93 + 6.2, 7.34, 0.0]));
        assert!(indices_in_range(&mesh));
    }

    #[test]
    fn first_line_sits_above_the_last() {
        let g = generator();
        let a = Cell::from_dots(&[1]).unwrap();
        let mesh = g.lines(&[vec![a], vec![a]], [0.0, 0.0, 0.0]);
        let per_dot = g.unit_dot.vertex_count();

        assert!(close(mesh.vertices[0], [1.93, 17.34, 0.0]));
        assert!(close(mesh.vertices[per_dot], [1.93, 7.34, 0.0]));
    }

    #[test]
    fn backing_spans_longest_line_and_all_lines() {
        let g = generator();
        let lines = vec![vec![Cell::BLANK; 3], vec![Cell::BLANK]];
        let plate = g.backing(&lines);

        assert!(close(plate.vertices[0], [0.0, 0.0, -0.5]));
        assert!(close(plate.vertices[6], [18.6, 20.0, 0.0]));
    }

    #[test]
    fn braille_mesh_adds_backing_after_dots() {
        let g = generator();
        let mesh = g.braille_mesh("⠁⠃\n⠉").unwrap();

        // a, b and c raise five dots between them
        let dots = 5 * g.unit_dot.vertex_count();
        assert_eq!(mesh.vertex_count(), dots + 8);
        assert!(mesh.triangles[mesh.triangle_count() - 12..]
            .iter()
            .flatten()
            .all(|&i| i >= dots));
        assert!(indices_in_range(&mesh));
    }

    #[test]
    fn braille_mesh_rejects_plain_text() {
        let err = generator().braille_mesh("⠁a").unwrap_err();
        assert!(matches!(err, MeshError::Cell(CellError::NotACell('a'))));
    }

    #[test]
    fn params_are_checked() {
        let bad = MeshParams {
            vtx_per_ring: 2,
            ..MeshParams::default()
        };
        assert!(matches!(
            MeshGenerator::new(bad),
            Err(MeshError::InvalidParams(_))
        ));

        let bad = MeshParams {
            char_dx: 0.0,
            ..MeshParams::default()
        };
        assert!(bad.check().is_err());
    }

    #[test]
    fn params_from_partial_json() {
        let params = MeshParams::from_json(r#"{ "dot_height": 0.6 }"#).unwrap();
        assert_eq!(params.dot_height, 0.6);
        assert_eq!(params.char_dx, 6.2);
    }
}
