//! Geometric entities built for one residual sweep.
//!
//! Cells map the reference element onto physical space:
//! - Line: x(ξ) = x0 + (1 + ξ) h / 2, J = h / 2
//! - Quadrilateral: bilinear map through the four corners
//!
//! The mapped-coordinate plane normals are the rows of J · ∂ξ/∂x, so the
//! contravariant flux along ξ_d is F·m_d. On a quadrilateral
//! m_ξ = (y_η, -x_η) and m_η = (-y_ξ, x_ξ).

use crate::types::Side;

/// Physical shape of one cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellGeometry {
    Line { x0: f64, x1: f64 },
    /// Corners counter-clockwise
    Quad { corners: [[f64; 2]; 4] },
}

impl CellGeometry {
    /// Physical coordinates of a mapped point.
    pub fn map_to_physical(&self, mapped: &[f64]) -> Vec<f64> {
        match self {
            CellGeometry::Line { x0, x1 } => vec![x0 + 0.5 * (1.0 + mapped[0]) * (x1 - x0)],
            CellGeometry::Quad { corners } => {
                let shape_fns = bilinear_shape_functions(mapped[0], mapped[1]);
                let mut x = vec![0.0; 2];
                for (n, corner) in shape_fns.iter().zip(corners) {
                    x[0] += n * corner[0];
                    x[1] += n * corner[1];
                }
                x
            }
        }
    }

    /// Cell volume (length in 1D, area in 2D).
    pub fn volume(&self) -> f64 {
        match self {
            CellGeometry::Line { x0, x1 } => x1 - x0,
            CellGeometry::Quad { corners } => {
                // Shoelace formula
                let mut area = 0.0;
                for a in 0..4 {
                    let b = (a + 1) % 4;
                    area += corners[a][0] * corners[b][1] - corners[b][0] * corners[a][1];
                }
                0.5 * area
            }
        }
    }

    /// Jacobian determinant at a mapped point.
    pub fn jacob_det(&self, mapped: &[f64]) -> f64 {
        match self {
            CellGeometry::Line { x0, x1 } => 0.5 * (x1 - x0),
            CellGeometry::Quad { .. } => {
                let [[x_xi, y_xi], [x_eta, y_eta]] = self.quad_tangents(mapped);
                x_xi * y_eta - x_eta * y_xi
            }
        }
    }

    /// Mapped-coordinate plane normals `[axis][dim]` at a mapped point.
    pub fn mapped_coord_plane_normals(&self, mapped: &[f64]) -> Vec<Vec<f64>> {
        match self {
            CellGeometry::Line { .. } => vec![vec![1.0]],
            CellGeometry::Quad { .. } => {
                let [[x_xi, y_xi], [x_eta, y_eta]] = self.quad_tangents(mapped);
                vec![vec![y_eta, -x_eta], vec![-y_xi, x_xi]]
            }
        }
    }

    /// Outward face Jacobian vector at face parameter `t`.
    ///
    /// Its length is the face Jacobian (half the edge length on a straight
    /// edge), its direction the outward normal.
    pub fn face_jacob_vec(&self, face: usize, _t: f64) -> Vec<f64> {
        match self {
            CellGeometry::Line { .. } => {
                if face == 0 {
                    vec![-1.0]
                } else {
                    vec![1.0]
                }
            }
            CellGeometry::Quad { corners } => {
                // Straight edge from corner f to corner f + 1
                let a = corners[face];
                let b = corners[(face + 1) % 4];
                let dx = 0.5 * (b[0] - a[0]);
                let dy = 0.5 * (b[1] - a[1]);
                vec![dy, -dx]
            }
        }
    }

    /// [[x_ξ, y_ξ], [x_η, y_η]] of the bilinear map.
    fn quad_tangents(&self, mapped: &[f64]) -> [[f64; 2]; 2] {
        let CellGeometry::Quad { corners } = self else {
            return [[0.0; 2]; 2];
        };
        let (xi, eta) = (mapped[0], mapped[1]);
        let d_xi = [
            -0.25 * (1.0 - eta),
            0.25 * (1.0 - eta),
            0.25 * (1.0 + eta),
            -0.25 * (1.0 + eta),
        ];
        let d_eta = [
            -0.25 * (1.0 - xi),
            -0.25 * (1.0 + xi),
            0.25 * (1.0 + xi),
            0.25 * (1.0 - xi),
        ];
        let mut tangents = [[0.0; 2]; 2];
        for a in 0..4 {
            for c in 0..2 {
                tangents[0][c] += d_xi[a] * corners[a][c];
                tangents[1][c] += d_eta[a] * corners[a][c];
            }
        }
        tangents
    }
}

fn bilinear_shape_functions(xi: f64, eta: f64) -> [f64; 4] {
    [
        0.25 * (1.0 - xi) * (1.0 - eta),
        0.25 * (1.0 + xi) * (1.0 - eta),
        0.25 * (1.0 + xi) * (1.0 + eta),
        0.25 * (1.0 - xi) * (1.0 + eta),
    ]
}

/// A built cell: its states and geometry.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) id: usize,
    pub(crate) element_type: usize,
    pub(crate) states: Vec<usize>,
    pub(crate) geometry: CellGeometry,
}

impl Cell {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Index into the mesh's element type data.
    pub fn element_type(&self) -> usize {
        self.element_type
    }

    /// Local state IDs of the solution points.
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    pub fn volume(&self) -> f64 {
        self.geometry.volume()
    }

    /// Jacobian determinants at mapped coordinates.
    pub fn jacob_dets(&self, coords: &[Vec<f64>]) -> Vec<f64> {
        coords.iter().map(|c| self.geometry.jacob_det(c)).collect()
    }

    /// Mapped-coordinate plane normals `[point][axis][dim]`.
    pub fn mapped_coord_plane_normals(&self, coords: &[Vec<f64>]) -> Vec<Vec<Vec<f64>>> {
        coords
            .iter()
            .map(|c| self.geometry.mapped_coord_plane_normals(c))
            .collect()
    }
}

/// A built face with its neighbour cells.
///
/// Interior faces hold two cells (LEFT, RIGHT), partition faces only the
/// resident cell (LEFT).
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) id: usize,
    pub(crate) orientation: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) local_faces: Vec<usize>,
}

impl Face {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn is_partition(&self) -> bool {
        self.cells.len() == 1
    }

    /// Neighbour cell on one side.
    ///
    /// # Panics
    /// On `Side::Right` of a partition face.
    pub fn neighbour(&self, side: Side) -> &Cell {
        &self.cells[side.index()]
    }

    /// Local face index inside the neighbour on one side.
    pub fn local_face(&self, side: Side) -> usize {
        self.local_faces[side.index()]
    }

    /// Face Jacobian vectors at face parameters, seen from the LEFT cell.
    pub fn face_jacob_det_vectors(&self, params: &[f64]) -> Vec<Vec<f64>> {
        let left = &self.cells[0];
        params
            .iter()
            .map(|&t| left.geometry.face_jacob_vec(self.local_faces[0], t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn skewed_quad() -> CellGeometry {
        CellGeometry::Quad {
            corners: [[0.0, 0.0], [2.0, 0.2], [2.4, 1.5], [0.1, 1.0]],
        }
    }

    #[test]
    fn test_line_geometry() {
        let geo = CellGeometry::Line { x0: 1.0, x1: 1.5 };
        assert_relative_eq!(geo.volume(), 0.5);
        assert_relative_eq!(geo.jacob_det(&[0.3]), 0.25);
        assert_relative_eq!(geo.map_to_physical(&[0.0])[0], 1.25);
        assert_eq!(geo.face_jacob_vec(0, 0.0), vec![-1.0]);
    }

    #[test]
    fn test_quad_jacobian_integrates_to_area() {
        // 2x2 Gauss quadrature is exact for the bilinear Jacobian
        let geo = skewed_quad();
        let g = 1.0 / 3.0_f64.sqrt();
        let mut area = 0.0;
        for xi in [-g, g] {
            for eta in [-g, g] {
                area += geo.jacob_det(&[xi, eta]);
            }
        }
        assert_relative_eq!(area, geo.volume(), epsilon = 1e-13);
    }

    #[test]
    fn test_face_vectors_match_plane_normals() {
        let geo = skewed_quad();
        // Face 1 lies on ξ = +1 and points along +m_ξ
        let m = geo.mapped_coord_plane_normals(&[1.0, 0.4]);
        let v = geo.face_jacob_vec(1, 0.4);
        assert_relative_eq!(v[0], m[0][0], epsilon = 1e-14);
        assert_relative_eq!(v[1], m[0][1], epsilon = 1e-14);

        // Face 0 lies on η = -1 and points along -m_η
        let m = geo.mapped_coord_plane_normals(&[-0.2, -1.0]);
        let v = geo.face_jacob_vec(0, -0.2);
        assert_relative_eq!(v[0], -m[1][0], epsilon = 1e-14);
        assert_relative_eq!(v[1], -m[1][1], epsilon = 1e-14);
    }

    #[test]
    fn test_face_vectors_close_the_cell() {
        // Σ over faces of the outward face vectors times face length is zero
        let geo = skewed_quad();
        let mut sum = [0.0; 2];
        for face in 0..4 {
            let v = geo.face_jacob_vec(face, 0.0);
            sum[0] += 2.0 * v[0];
            sum[1] += 2.0 * v[1];
        }
        assert!(sum[0].abs() < 1e-14 && sum[1].abs() < 1e-14);
    }
}
