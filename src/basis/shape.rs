//! Reference element shapes and their face numbering.
//!
//! Faces are numbered counter-clockwise and parametrised by t ∈ [-1, 1]
//! along the counter-clockwise traversal of the element boundary:
//!
//! ```text
//! Line:           Quadrilateral:
//!                        face 2 (η = +1)
//!  0 ●──────● 1        3 ●──────────● 2
//!   ξ=-1   ξ=+1          │          │
//!                 face 3 │          │ face 1
//!                 (ξ=-1) │          │ (ξ=+1)
//!                        ●──────────●
//!                      0   face 0     1
//!                         (η = -1)
//! ```
//!
//! Two cells sharing an edge traverse it in opposite directions, so a
//! point at parameter t on one side sits at -t on the other.

use std::fmt;

/// Reference element shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// Interval [-1, 1]
    Line,
    /// Square [-1, 1]²
    Quadrilateral,
}

impl ElementShape {
    /// Spatial dimension.
    pub fn dim(&self) -> usize {
        match self {
            ElementShape::Line => 1,
            ElementShape::Quadrilateral => 2,
        }
    }

    /// Number of faces.
    pub fn n_faces(&self) -> usize {
        match self {
            ElementShape::Line => 2,
            ElementShape::Quadrilateral => 4,
        }
    }

    /// Number of geometric (corner) nodes.
    pub fn n_nodes(&self) -> usize {
        match self {
            ElementShape::Line => 2,
            ElementShape::Quadrilateral => 4,
        }
    }

    /// Local node indices of a face, in counter-clockwise order.
    pub fn face_nodes(&self, face: usize) -> Vec<usize> {
        match self {
            ElementShape::Line => vec![face],
            ElementShape::Quadrilateral => vec![face, (face + 1) % 4],
        }
    }

    /// Sign of the mapped coordinate along the outward normal of a face.
    pub fn face_mapped_coord_dir(&self, face: usize) -> f64 {
        match (self, face) {
            (ElementShape::Line, 0) => -1.0,
            (ElementShape::Line, _) => 1.0,
            (ElementShape::Quadrilateral, 0 | 3) => -1.0,
            (ElementShape::Quadrilateral, _) => 1.0,
        }
    }

    /// Mapped coordinate held constant on a face (0 = ξ, 1 = η).
    pub fn face_normal_axis(&self, face: usize) -> usize {
        match self {
            ElementShape::Line => 0,
            ElementShape::Quadrilateral => {
                if face % 2 == 0 {
                    1
                } else {
                    0
                }
            }
        }
    }

    /// Mapped coordinates of the point at parameter `t` on a face.
    pub fn face_point(&self, face: usize, t: f64) -> Vec<f64> {
        match (self, face) {
            (ElementShape::Line, 0) => vec![-1.0],
            (ElementShape::Line, _) => vec![1.0],
            (ElementShape::Quadrilateral, 0) => vec![t, -1.0],
            (ElementShape::Quadrilateral, 1) => vec![1.0, t],
            (ElementShape::Quadrilateral, 2) => vec![-t, 1.0],
            (ElementShape::Quadrilateral, _) => vec![-1.0, -t],
        }
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementShape::Line => write!(f, "Line"),
            ElementShape::Quadrilateral => write!(f, "Quadrilateral"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_faces_are_counter_clockwise() {
        let shape = ElementShape::Quadrilateral;
        let corners = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        for face in 0..4 {
            let nodes = shape.face_nodes(face);
            let start = shape.face_point(face, -1.0);
            let end = shape.face_point(face, 1.0);
            assert_eq!(start, corners[nodes[0]].to_vec());
            assert_eq!(end, corners[nodes[1]].to_vec());
        }
    }

    #[test]
    fn test_face_dir_matches_face_coordinate() {
        for shape in [ElementShape::Line, ElementShape::Quadrilateral] {
            for face in 0..shape.n_faces() {
                let axis = shape.face_normal_axis(face);
                let point = shape.face_point(face, 0.3);
                assert_eq!(point[axis], shape.face_mapped_coord_dir(face));
            }
        }
    }
}
