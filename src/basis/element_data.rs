//! Flux Reconstruction tables for one element type.
//!
//! Solution points are a tensor product of a 1D node set. Flux points sit
//! on the faces at the same 1D nodes, so each face flux point lines up
//! with one row (or column) of solution points. Flux point `m` of face `f`
//! has element-local index `f * n_flx_pnts_1d + m`.
//!
//! Face orientations bucket faces by their pair of local face indices:
//! an interior face between local face `lf` of the LEFT cell and local
//! face `rf` of the RIGHT cell has orientation `lf * n_faces + rf`. The
//! RIGHT side traverses the shared face in the opposite direction, so its
//! flux points are listed in reverse order. A partition face carries the
//! resident cell's local face index as orientation.

use super::shape::ElementShape;
use super::vandermonde::Vandermonde1D;
use crate::error::{FrError, Result};
use crate::polynomial::{
    gauss_legendre_nodes, gauss_legendre_weights, gauss_lobatto_nodes, gauss_lobatto_weights,
};
use crate::types::{Side, SidePair};

/// Highest polynomial order we build tables for.
pub const MAX_ORDER: usize = 15;

/// 1D node set used for solution points (and face flux points).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SolutionPointSet {
    #[default]
    GaussLegendre,
    GaussLobatto,
}

impl SolutionPointSet {
    /// Nodes and quadrature weights for the given order.
    pub fn nodes_and_weights(&self, order: usize) -> (Vec<f64>, Vec<f64>) {
        match self {
            SolutionPointSet::GaussLegendre => {
                let nodes = gauss_legendre_nodes(order + 1);
                let weights = gauss_legendre_weights(&nodes);
                (nodes, weights)
            }
            SolutionPointSet::GaussLobatto => {
                let nodes = gauss_lobatto_nodes(order);
                let weights = gauss_lobatto_weights(order, &nodes);
                (nodes, weights)
            }
        }
    }
}

/// Basis and connectivity tables of one FR element type.
#[derive(Clone)]
pub struct FrElementData {
    shape: ElementShape,
    order: usize,
    sol_pnt_set: SolutionPointSet,
    vandermonde: Vandermonde1D,

    sol_pnt_coords_1d: Vec<f64>,
    sol_pnt_weights_1d: Vec<f64>,
    sol_pnt_coords: Vec<Vec<f64>>,

    flx_pnt_coords_1d: Vec<f64>,
    face_integration_coefs: Vec<f64>,
    flx_pnt_coords: Vec<Vec<f64>>,
    face_flx_pnt_conn: Vec<Vec<usize>>,

    face_conn_per_orient: Vec<SidePair<usize>>,
    face_flx_pnt_conn_per_orient: Vec<SidePair<Vec<usize>>>,
    face_mapped_coord_dir_per_orient: Vec<SidePair<f64>>,
}

impl FrElementData {
    /// Build all tables for a shape and polynomial order.
    pub fn new(shape: ElementShape, order: usize, sol_pnt_set: SolutionPointSet) -> Result<Self> {
        if order > MAX_ORDER || (sol_pnt_set == SolutionPointSet::GaussLobatto && order == 0) {
            return Err(FrError::InvalidOrder { order });
        }

        let (sol_pnt_coords_1d, sol_pnt_weights_1d) = sol_pnt_set.nodes_and_weights(order);
        let vandermonde = Vandermonde1D::new(&sol_pnt_coords_1d);
        let n1 = order + 1;

        let sol_pnt_coords: Vec<Vec<f64>> = match shape {
            ElementShape::Line => sol_pnt_coords_1d.iter().map(|&x| vec![x]).collect(),
            ElementShape::Quadrilateral => {
                let mut coords = Vec::with_capacity(n1 * n1);
                for &eta in &sol_pnt_coords_1d {
                    for &xi in &sol_pnt_coords_1d {
                        coords.push(vec![xi, eta]);
                    }
                }
                coords
            }
        };

        // Faces of a line are points: one flux point with unit weight
        let (flx_pnt_coords_1d, face_integration_coefs) = match shape {
            ElementShape::Line => (vec![0.0], vec![1.0]),
            ElementShape::Quadrilateral => (sol_pnt_coords_1d.clone(), sol_pnt_weights_1d.clone()),
        };
        let n_flx_1d = flx_pnt_coords_1d.len();

        let n_faces = shape.n_faces();
        let mut flx_pnt_coords = Vec::with_capacity(n_faces * n_flx_1d);
        let mut face_flx_pnt_conn = Vec::with_capacity(n_faces);
        for face in 0..n_faces {
            let mut conn = Vec::with_capacity(n_flx_1d);
            for (m, &t) in flx_pnt_coords_1d.iter().enumerate() {
                conn.push(face * n_flx_1d + m);
                flx_pnt_coords.push(shape.face_point(face, t));
            }
            face_flx_pnt_conn.push(conn);
        }

        let mut face_conn_per_orient = Vec::with_capacity(n_faces * n_faces);
        let mut face_flx_pnt_conn_per_orient = Vec::with_capacity(n_faces * n_faces);
        let mut face_mapped_coord_dir_per_orient = Vec::with_capacity(n_faces * n_faces);
        for left in 0..n_faces {
            for right in 0..n_faces {
                face_conn_per_orient.push(SidePair::new(left, right));
                let right_conn: Vec<usize> =
                    face_flx_pnt_conn[right].iter().rev().copied().collect();
                face_flx_pnt_conn_per_orient
                    .push(SidePair::new(face_flx_pnt_conn[left].clone(), right_conn));
                face_mapped_coord_dir_per_orient.push(SidePair::new(
                    shape.face_mapped_coord_dir(left),
                    -shape.face_mapped_coord_dir(right),
                ));
            }
        }

        Ok(Self {
            shape,
            order,
            sol_pnt_set,
            vandermonde,
            sol_pnt_coords_1d,
            sol_pnt_weights_1d,
            sol_pnt_coords,
            flx_pnt_coords_1d,
            face_integration_coefs,
            flx_pnt_coords,
            face_flx_pnt_conn,
            face_conn_per_orient,
            face_flx_pnt_conn_per_orient,
            face_mapped_coord_dir_per_orient,
        })
    }

    pub fn shape(&self) -> ElementShape {
        self.shape
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn sol_pnt_set(&self) -> SolutionPointSet {
        self.sol_pnt_set
    }

    pub fn dim(&self) -> usize {
        self.shape.dim()
    }

    pub fn n_faces(&self) -> usize {
        self.shape.n_faces()
    }

    pub fn n_sol_pnts(&self) -> usize {
        self.sol_pnt_coords.len()
    }

    pub fn n_flx_pnts(&self) -> usize {
        self.flx_pnt_coords.len()
    }

    pub fn n_flx_pnts_1d(&self) -> usize {
        self.flx_pnt_coords_1d.len()
    }

    /// Number of interior face orientations.
    pub fn n_orientations(&self) -> usize {
        self.face_conn_per_orient.len()
    }

    /// Number of partition face orientations (one per local face).
    pub fn n_partition_orientations(&self) -> usize {
        self.n_faces()
    }

    /// 1D solution point coordinates.
    pub fn sol_pnt_coords_1d(&self) -> &[f64] {
        &self.sol_pnt_coords_1d
    }

    /// 1D quadrature weights attached to the solution points.
    pub fn sol_pnt_weights_1d(&self) -> &[f64] {
        &self.sol_pnt_weights_1d
    }

    /// Solution point mapped coordinates, `[sol][dim]`.
    pub fn sol_pnt_coords(&self) -> &[Vec<f64>] {
        &self.sol_pnt_coords
    }

    /// Face parameter of each face flux point.
    pub fn flx_pnt_coords_1d(&self) -> &[f64] {
        &self.flx_pnt_coords_1d
    }

    /// Integration weights of the face flux points.
    pub fn face_integration_coefs(&self) -> &[f64] {
        &self.face_integration_coefs
    }

    /// Flux point mapped coordinates, `[flx][dim]`.
    pub fn flx_pnt_coords(&self) -> &[Vec<f64>] {
        &self.flx_pnt_coords
    }

    /// Element-local flux point indices of each face, `[face][flx1d]`.
    pub fn face_flx_pnt_conn(&self) -> &[Vec<usize>] {
        &self.face_flx_pnt_conn
    }

    /// Local face indices (LEFT, RIGHT) for each orientation.
    pub fn face_conn_per_orient(&self) -> &[SidePair<usize>] {
        &self.face_conn_per_orient
    }

    /// Element-local flux point indices per orientation and side.
    pub fn face_flx_pnt_conn_per_orient(&self) -> &[SidePair<Vec<usize>>] {
        &self.face_flx_pnt_conn_per_orient
    }

    /// Signed mapped coordinate direction per orientation and side.
    pub fn face_mapped_coord_dir_per_orient(&self) -> &[SidePair<f64>] {
        &self.face_mapped_coord_dir_per_orient
    }

    /// Outward sign of the mapped coordinate on each local face.
    pub fn face_mapped_coord_dir(&self, face: usize) -> f64 {
        self.shape.face_mapped_coord_dir(face)
    }

    /// Orientation of an interior face joining local faces `left` and `right`.
    pub fn orientation_of(&self, left: usize, right: usize) -> usize {
        left * self.n_faces() + right
    }

    /// Local face index of one side of an orientation.
    pub fn local_face(&self, orient: usize, side: Side) -> usize {
        self.face_conn_per_orient[orient][side]
    }

    /// Solution polynomial values at mapped points, `[point][sol]`.
    pub fn sol_poly_vals_at_nodes(&self, points: &[Vec<f64>]) -> Vec<Vec<f64>> {
        points
            .iter()
            .map(|point| {
                let factors = self.lagrange_factors(point);
                match self.shape {
                    ElementShape::Line => factors[0].0.clone(),
                    ElementShape::Quadrilateral => {
                        let (lx, _) = &factors[0];
                        let (ly, _) = &factors[1];
                        let n1 = lx.len();
                        let mut vals = vec![0.0; n1 * n1];
                        for j in 0..n1 {
                            for i in 0..n1 {
                                vals[j * n1 + i] = lx[i] * ly[j];
                            }
                        }
                        vals
                    }
                }
            })
            .collect()
    }

    /// Solution polynomial derivatives at mapped points, `[point][dim][sol]`.
    pub fn sol_poly_derivs_at_nodes(&self, points: &[Vec<f64>]) -> Vec<Vec<Vec<f64>>> {
        points
            .iter()
            .map(|point| {
                let factors = self.lagrange_factors(point);
                match self.shape {
                    ElementShape::Line => vec![factors[0].1.clone()],
                    ElementShape::Quadrilateral => {
                        let (lx, dlx) = &factors[0];
                        let (ly, dly) = &factors[1];
                        let n1 = lx.len();
                        let mut dxi = vec![0.0; n1 * n1];
                        let mut deta = vec![0.0; n1 * n1];
                        for j in 0..n1 {
                            for i in 0..n1 {
                                dxi[j * n1 + i] = dlx[i] * ly[j];
                                deta[j * n1 + i] = lx[i] * dly[j];
                            }
                        }
                        vec![dxi, deta]
                    }
                }
            })
            .collect()
    }

    fn lagrange_factors(&self, point: &[f64]) -> Vec<(Vec<f64>, Vec<f64>)> {
        debug_assert_eq!(point.len(), self.dim());
        point
            .iter()
            .map(|&x| self.vandermonde.lagrange_at(x))
            .collect()
    }
}

impl std::fmt::Debug for FrElementData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrElementData")
            .field("shape", &self.shape)
            .field("order", &self.order)
            .field("sol_pnt_set", &self.sol_pnt_set)
            .field("n_sol_pnts", &self.n_sol_pnts())
            .field("n_flx_pnts", &self.n_flx_pnts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let line = FrElementData::new(ElementShape::Line, 3, SolutionPointSet::GaussLegendre)
            .unwrap();
        assert_eq!(line.n_sol_pnts(), 4);
        assert_eq!(line.n_flx_pnts(), 2);
        assert_eq!(line.n_flx_pnts_1d(), 1);
        assert_eq!(line.n_orientations(), 4);

        let quad =
            FrElementData::new(ElementShape::Quadrilateral, 2, SolutionPointSet::GaussLegendre)
                .unwrap();
        assert_eq!(quad.n_sol_pnts(), 9);
        assert_eq!(quad.n_flx_pnts(), 12);
        assert_eq!(quad.n_flx_pnts_1d(), 3);
        assert_eq!(quad.n_orientations(), 16);
        assert_eq!(quad.n_partition_orientations(), 4);
    }

    #[test]
    fn test_invalid_order() {
        assert!(matches!(
            FrElementData::new(ElementShape::Line, 0, SolutionPointSet::GaussLobatto),
            Err(FrError::InvalidOrder { order: 0 })
        ));
        assert!(FrElementData::new(ElementShape::Line, MAX_ORDER + 1, Default::default()).is_err());
    }

    #[test]
    fn test_right_side_points_coincide_with_left() {
        // Two unit squares sharing the edge x = 1: face 1 of the left cell
        // is face 3 of the right cell. Matching flux points must map to
        // the same physical point.
        let data =
            FrElementData::new(ElementShape::Quadrilateral, 3, SolutionPointSet::GaussLegendre)
                .unwrap();
        let orient = data.orientation_of(1, 3);
        let conn = &data.face_flx_pnt_conn_per_orient()[orient];
        for m in 0..data.n_flx_pnts_1d() {
            let left = &data.flx_pnt_coords()[conn.left[m]];
            let right = &data.flx_pnt_coords()[conn.right[m]];
            // left cell x = ξ, right cell x = ξ + 2; both share y = η
            assert!((left[0] - (right[0] + 2.0)).abs() < 1e-14);
            assert!((left[1] - right[1]).abs() < 1e-14);
        }
        let dirs = data.face_mapped_coord_dir_per_orient()[orient];
        assert_eq!(dirs.left, 1.0);
        assert_eq!(dirs.right, 1.0);
    }

    #[test]
    fn test_sol_poly_vals_reproduce_polynomial() {
        let data =
            FrElementData::new(ElementShape::Quadrilateral, 2, SolutionPointSet::GaussLobatto)
                .unwrap();
        let f = |x: f64, y: f64| 1.0 + 2.0 * x - y + x * y * y;
        let u: Vec<f64> = data.sol_pnt_coords().iter().map(|c| f(c[0], c[1])).collect();

        let vals = data.sol_poly_vals_at_nodes(data.flx_pnt_coords());
        for (row, coord) in vals.iter().zip(data.flx_pnt_coords()) {
            let interp: f64 = row.iter().zip(&u).map(|(l, v)| l * v).sum();
            assert!((interp - f(coord[0], coord[1])).abs() < 1e-12);
        }

        let derivs = data.sol_poly_derivs_at_nodes(data.sol_pnt_coords());
        for (rows, coord) in derivs.iter().zip(data.sol_pnt_coords()) {
            let dx: f64 = rows[0].iter().zip(&u).map(|(l, v)| l * v).sum();
            let dy: f64 = rows[1].iter().zip(&u).map(|(l, v)| l * v).sum();
            assert!((dx - (2.0 + coord[1] * coord[1])).abs() < 1e-11);
            assert!((dy - (-1.0 + 2.0 * coord[0] * coord[1])).abs() < 1e-11);
        }
    }
}
