//! Mesh topology for FR residual sweeps.
//!
//! The mesh stores:
//! - Node coordinates
//! - Cell-node and cell-state connectivity (one element type)
//! - Interior faces between two resident cells
//! - Partition faces with a single resident cell
//!
//! Faces of each region are sorted into contiguous orientation buckets:
//! the faces with orientation `o` are
//! `faces[start_idxs[o]..start_idxs[o + 1]]`. Interior faces carry the
//! orientation `left_face * n_faces + right_face`, partition faces the
//! local face index of their resident cell. Face IDs number the interior
//! faces first, then the partition faces, in bucket order.
//!
//! Boundary faces (one neighbour, not a partition cut) are counted but not
//! stored: boundary conditions are handled by separate commands.

use super::geometry::CellGeometry;
use crate::basis::ElementShape;
use crate::error::{FrError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Topological region set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trs {
    InnerCells,
    InnerFaces,
    PartitionFaces,
}

impl Trs {
    /// Region name as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Trs::InnerCells => "InnerCells",
            Trs::InnerFaces => "InnerFaces",
            Trs::PartitionFaces => "PartitionFaces",
        }
    }

    /// Whether the region holds faces.
    pub fn is_face_region(&self) -> bool {
        !matches!(self, Trs::InnerCells)
    }
}

impl FromStr for Trs {
    type Err = FrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "InnerCells" => Ok(Trs::InnerCells),
            "InnerFaces" => Ok(Trs::InnerFaces),
            "PartitionFaces" => Ok(Trs::PartitionFaces),
            _ => Err(FrError::UnknownRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Trs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Range of cells sharing one element type.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementTypeData {
    pub shape: ElementShape,
    /// Polynomial order of the solution
    pub order: usize,
    /// Solution points (states) per cell
    pub n_sol_pnts: usize,
    /// First cell of this type
    pub start_idx: usize,
    /// One past the last cell of this type
    pub end_idx: usize,
}

impl ElementTypeData {
    pub fn n_cells(&self) -> usize {
        self.end_idx - self.start_idx
    }
}

/// Connectivity of one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    /// Node indices, counter-clockwise
    pub nodes: Vec<usize>,
    /// Local state IDs of the solution points
    pub states: Vec<usize>,
    /// Cell index in the unpartitioned mesh
    pub global_id: usize,
}

/// Reference to a cell and one of its local faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementFace {
    /// Cell index
    pub element: usize,
    /// Local face index
    pub face: usize,
}

impl ElementFace {
    pub fn new(element: usize, face: usize) -> Self {
        Self { element, face }
    }
}

/// Connectivity of one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceRecord {
    pub id: usize,
    pub orientation: usize,
    /// LEFT neighbour; the resident cell of a partition face
    pub left: ElementFace,
    /// RIGHT neighbour (None for partition faces)
    pub right: Option<ElementFace>,
}

impl FaceRecord {
    pub fn is_partition(&self) -> bool {
        self.right.is_none()
    }
}

/// Unstructured FR mesh of a single element type.
#[derive(Clone, Debug)]
pub struct FrMesh {
    pub shape: ElementShape,
    /// Node coordinates, `dim` entries each
    pub nodes: Vec<Vec<f64>>,
    pub cells: Vec<CellRecord>,
    pub element_type_data: Vec<ElementTypeData>,
    pub inner_faces: Vec<FaceRecord>,
    pub inner_faces_start_idxs: Vec<usize>,
    pub partition_faces: Vec<FaceRecord>,
    pub partition_faces_start_idxs: Vec<usize>,
    /// Faces with one neighbour that are not partition cuts
    pub n_boundary_faces: usize,
    pub n_states: usize,
}

/// Number of solution points of a shape at a polynomial order.
pub fn n_sol_pnts(shape: ElementShape, order: usize) -> usize {
    (order + 1).pow(shape.dim() as u32)
}

impl FrMesh {
    /// Line mesh through the given increasing vertices.
    pub fn line(vertices: &[f64], order: usize) -> Result<Self> {
        Self::line_with_links(vertices, order, false)
    }

    /// Uniform line mesh of [x_min, x_max].
    pub fn uniform_line(x_min: f64, x_max: f64, n_cells: usize, order: usize) -> Result<Self> {
        Self::line_with_links(&uniform_vertices(x_min, x_max, n_cells)?, order, false)
    }

    /// Uniform periodic line mesh: the last cell's right face is joined to
    /// the first cell's left face.
    pub fn uniform_line_periodic(
        x_min: f64,
        x_max: f64,
        n_cells: usize,
        order: usize,
    ) -> Result<Self> {
        Self::line_with_links(&uniform_vertices(x_min, x_max, n_cells)?, order, true)
    }

    fn line_with_links(vertices: &[f64], order: usize, periodic: bool) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(FrError::InvalidMesh("Need at least one cell".into()));
        }
        if vertices.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FrError::InvalidMesh(
                "Line vertices must be strictly increasing".into(),
            ));
        }
        let n_cells = vertices.len() - 1;
        let nodes = vertices.iter().map(|&x| vec![x]).collect();
        let cells = (0..n_cells).map(|k| vec![k, k + 1]).collect();
        let links = if periodic {
            vec![(ElementFace::new(n_cells - 1, 1), ElementFace::new(0, 0))]
        } else {
            Vec::new()
        };
        Self::assemble(ElementShape::Line, order, nodes, cells, links)
    }

    /// Uniform quadrilateral mesh of [x0, x1] × [y0, y1].
    pub fn uniform_quad(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        nx: usize,
        ny: usize,
        order: usize,
    ) -> Result<Self> {
        let coords = uniform_grid_coords(x0, x1, y0, y1, nx, ny)?;
        Self::quad_grid_with_links(nx, ny, coords, order, false)
    }

    /// Uniform quadrilateral mesh, periodic in both directions.
    pub fn uniform_quad_periodic(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        nx: usize,
        ny: usize,
        order: usize,
    ) -> Result<Self> {
        let coords = uniform_grid_coords(x0, x1, y0, y1, nx, ny)?;
        Self::quad_grid_with_links(nx, ny, coords, order, true)
    }

    /// Structured quadrilateral grid with explicit node coordinates.
    ///
    /// `coords` holds `(nx + 1) * (ny + 1)` points, row by row:
    /// node (i, j) is `coords[j * (nx + 1) + i]`.
    pub fn quad_grid(nx: usize, ny: usize, coords: Vec<[f64; 2]>, order: usize) -> Result<Self> {
        Self::quad_grid_with_links(nx, ny, coords, order, false)
    }

    fn quad_grid_with_links(
        nx: usize,
        ny: usize,
        coords: Vec<[f64; 2]>,
        order: usize,
        periodic: bool,
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(FrError::InvalidMesh(
                "Need at least one cell in each direction".into(),
            ));
        }
        if coords.len() != (nx + 1) * (ny + 1) {
            return Err(FrError::size_mismatch(
                "quad grid nodes",
                (nx + 1) * (ny + 1),
                coords.len(),
            ));
        }

        let nodes = coords.iter().map(|c| c.to_vec()).collect();
        let cell = |i: usize, j: usize| j * nx + i;
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let v0 = j * (nx + 1) + i;
                let v1 = v0 + 1;
                let v2 = v1 + (nx + 1);
                let v3 = v0 + (nx + 1);
                cells.push(vec![v0, v1, v2, v3]);
            }
        }

        let mut links = Vec::new();
        if periodic {
            for j in 0..ny {
                links.push((ElementFace::new(cell(nx - 1, j), 1), ElementFace::new(cell(0, j), 3)));
            }
            for i in 0..nx {
                links.push((ElementFace::new(cell(i, ny - 1), 2), ElementFace::new(cell(i, 0), 0)));
            }
        }
        Self::assemble(ElementShape::Quadrilateral, order, nodes, cells, links)
    }

    /// Build the face lists from cell connectivity.
    ///
    /// Faces sharing the same nodes are joined, the lower cell index
    /// becoming LEFT. `links` joins additional (LEFT, RIGHT) face pairs
    /// such as periodic boundaries.
    pub fn assemble(
        shape: ElementShape,
        order: usize,
        nodes: Vec<Vec<f64>>,
        cell_nodes: Vec<Vec<usize>>,
        links: Vec<(ElementFace, ElementFace)>,
    ) -> Result<Self> {
        let dim = shape.dim();
        if nodes.iter().any(|n| n.len() != dim) {
            return Err(FrError::InvalidMesh(format!(
                "Node coordinates must have {} components",
                dim
            )));
        }
        for (k, cell) in cell_nodes.iter().enumerate() {
            if cell.len() != shape.n_nodes() {
                return Err(FrError::size_mismatch(
                    format!("nodes of cell {}", k),
                    shape.n_nodes(),
                    cell.len(),
                ));
            }
            if cell.iter().any(|&n| n >= nodes.len()) {
                return Err(FrError::InvalidMesh(format!(
                    "Cell {} references a missing node",
                    k
                )));
            }
        }

        let n_faces = shape.n_faces();
        let mut linked = HashSet::new();
        for (left, right) in &links {
            for ef in [left, right] {
                if ef.element >= cell_nodes.len() || ef.face >= n_faces {
                    return Err(FrError::InvalidMesh(format!(
                        "Invalid face link to cell {} face {}",
                        ef.element, ef.face
                    )));
                }
                if !linked.insert(*ef) {
                    return Err(FrError::InvalidMesh(format!(
                        "Cell {} face {} linked twice",
                        ef.element, ef.face
                    )));
                }
            }
        }

        let mut pairs = links;
        let mut open: HashMap<Vec<usize>, ElementFace> = HashMap::new();
        for (k, cell) in cell_nodes.iter().enumerate() {
            for face in 0..n_faces {
                let ef = ElementFace::new(k, face);
                if linked.contains(&ef) {
                    continue;
                }
                let mut key: Vec<usize> = shape.face_nodes(face).iter().map(|&n| cell[n]).collect();
                key.sort_unstable();
                match open.remove(&key) {
                    Some(left) => pairs.push((left, ef)),
                    None => {
                        open.insert(key, ef);
                    }
                }
            }
        }
        let n_boundary_faces = open.len();

        let mut inner_faces: Vec<FaceRecord> = pairs
            .into_iter()
            .map(|(left, right)| FaceRecord {
                id: 0,
                orientation: left.face * n_faces + right.face,
                left,
                right: Some(right),
            })
            .collect();
        let inner_faces_start_idxs = sort_into_buckets(&mut inner_faces, n_faces * n_faces, 0);

        let n_sol = n_sol_pnts(shape, order);
        let n_cells = cell_nodes.len();
        let cells = cell_nodes
            .into_iter()
            .enumerate()
            .map(|(k, nodes)| CellRecord {
                nodes,
                states: (k * n_sol..(k + 1) * n_sol).collect(),
                global_id: k,
            })
            .collect();

        let mesh = Self {
            shape,
            nodes,
            cells,
            element_type_data: vec![ElementTypeData {
                shape,
                order,
                n_sol_pnts: n_sol,
                start_idx: 0,
                end_idx: n_cells,
            }],
            inner_faces,
            inner_faces_start_idxs,
            partition_faces: Vec::new(),
            partition_faces_start_idxs: vec![0; n_faces + 1],
            n_boundary_faces,
            n_states: n_cells * n_sol,
        };

        // Cells must be counter-clockwise
        let centroid = vec![0.0; dim];
        for k in 0..n_cells {
            let jacob = mesh.cell_geometry(k).jacob_det(&centroid);
            if jacob <= 0.0 {
                return Err(FrError::InvalidMesh(format!(
                    "Cell {} has non-positive Jacobian determinant {}",
                    k, jacob
                )));
            }
        }
        Ok(mesh)
    }

    /// Keep the cells owned by `rank`.
    ///
    /// Faces between a kept and a dropped cell become partition faces of
    /// the kept cell. Cells and states are renumbered compactly in their
    /// original order; `CellRecord::global_id` keeps the original index.
    pub fn partition(&self, owner: &[usize], rank: usize) -> Result<Self> {
        if owner.len() != self.cells.len() {
            return Err(FrError::size_mismatch(
                "cell owners",
                self.cells.len(),
                owner.len(),
            ));
        }

        let mut new_index = vec![None; self.cells.len()];
        let mut cells = Vec::new();
        let n_sol = self.n_sol_pnts();
        for (k, cell) in self.cells.iter().enumerate() {
            if owner[k] == rank {
                let local = cells.len();
                new_index[k] = Some(local);
                cells.push(CellRecord {
                    nodes: cell.nodes.clone(),
                    states: (local * n_sol..(local + 1) * n_sol).collect(),
                    global_id: cell.global_id,
                });
            }
        }
        if cells.is_empty() {
            return Err(FrError::InvalidMesh(format!("Rank {} owns no cells", rank)));
        }

        let remap = |ef: ElementFace| new_index[ef.element].map(|e| ElementFace::new(e, ef.face));

        let mut inner_faces = Vec::new();
        let mut partition_faces = Vec::new();
        for face in self.inner_faces.iter().chain(&self.partition_faces) {
            let left = remap(face.left);
            let right = face.right.and_then(remap);
            match (left, right) {
                (Some(left), Some(right)) => inner_faces.push(FaceRecord {
                    id: 0,
                    orientation: face.orientation,
                    left,
                    right: Some(right),
                }),
                (Some(resident), None) | (None, Some(resident)) => {
                    partition_faces.push(FaceRecord {
                        id: 0,
                        orientation: resident.face,
                        left: resident,
                        right: None,
                    })
                }
                (None, None) => {}
            }
        }

        let n_faces = self.shape.n_faces();
        let inner_faces_start_idxs = sort_into_buckets(&mut inner_faces, n_faces * n_faces, 0);
        let partition_faces_start_idxs =
            sort_into_buckets(&mut partition_faces, n_faces, inner_faces.len());

        let n_cells = cells.len();
        let mut element_type_data = self.element_type_data[0].clone();
        element_type_data.start_idx = 0;
        element_type_data.end_idx = n_cells;

        Ok(Self {
            shape: self.shape,
            nodes: self.nodes.clone(),
            cells,
            element_type_data: vec![element_type_data],
            inner_faces,
            inner_faces_start_idxs,
            partition_faces,
            partition_faces_start_idxs,
            n_boundary_faces: self.n_boundary_faces,
            n_states: n_cells * n_sol,
        })
    }

    pub fn dim(&self) -> usize {
        self.shape.dim()
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Polynomial order of the first element type.
    pub fn order(&self) -> usize {
        self.element_type_data.first().map_or(0, |etd| etd.order)
    }

    /// States per cell of the first element type.
    pub fn n_sol_pnts(&self) -> usize {
        self.element_type_data.first().map_or(0, |etd| etd.n_sol_pnts)
    }

    /// Interior plus partition faces.
    pub fn n_faces_total(&self) -> usize {
        self.inner_faces.len() + self.partition_faces.len()
    }

    /// Look up a region by name.
    pub fn get_trs(&self, name: &str) -> Result<Trs> {
        name.parse()
    }

    /// Number of entities in a region.
    pub fn trs_size(&self, trs: Trs) -> usize {
        match trs {
            Trs::InnerCells => self.cells.len(),
            Trs::InnerFaces => self.inner_faces.len(),
            Trs::PartitionFaces => self.partition_faces.len(),
        }
    }

    /// Faces of a face region.
    pub fn faces(&self, trs: Trs) -> Result<&[FaceRecord]> {
        match trs {
            Trs::InnerFaces => Ok(&self.inner_faces),
            Trs::PartitionFaces => Ok(&self.partition_faces),
            Trs::InnerCells => Err(FrError::InvalidMesh(format!(
                "{} is not a face region",
                trs
            ))),
        }
    }

    /// Orientation bucket boundaries of a face region.
    pub fn face_start_idxs(&self, trs: Trs) -> Result<&[usize]> {
        match trs {
            Trs::InnerFaces => Ok(&self.inner_faces_start_idxs),
            Trs::PartitionFaces => Ok(&self.partition_faces_start_idxs),
            Trs::InnerCells => Err(FrError::InvalidMesh(format!(
                "{} is not a face region",
                trs
            ))),
        }
    }

    /// Geometry of one cell.
    pub fn cell_geometry(&self, idx: usize) -> CellGeometry {
        let cell = &self.cells[idx];
        match self.shape {
            ElementShape::Line => CellGeometry::Line {
                x0: self.nodes[cell.nodes[0]][0],
                x1: self.nodes[cell.nodes[1]][0],
            },
            ElementShape::Quadrilateral => {
                let mut corners = [[0.0; 2]; 4];
                for (corner, &n) in corners.iter_mut().zip(&cell.nodes) {
                    corner[0] = self.nodes[n][0];
                    corner[1] = self.nodes[n][1];
                }
                CellGeometry::Quad { corners }
            }
        }
    }
}

fn uniform_vertices(x_min: f64, x_max: f64, n_cells: usize) -> Result<Vec<f64>> {
    if n_cells == 0 || x_max <= x_min {
        return Err(FrError::InvalidMesh(format!(
            "Invalid uniform line [{}, {}] with {} cells",
            x_min, x_max, n_cells
        )));
    }
    let h = (x_max - x_min) / n_cells as f64;
    Ok((0..=n_cells).map(|i| x_min + i as f64 * h).collect())
}

fn uniform_grid_coords(
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    nx: usize,
    ny: usize,
) -> Result<Vec<[f64; 2]>> {
    if nx == 0 || ny == 0 || x1 <= x0 || y1 <= y0 {
        return Err(FrError::InvalidMesh("Invalid domain bounds".into()));
    }
    let dx = (x1 - x0) / nx as f64;
    let dy = (y1 - y0) / ny as f64;
    let mut coords = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            coords.push([x0 + i as f64 * dx, y0 + j as f64 * dy]);
        }
    }
    Ok(coords)
}

/// Stable sort by orientation, assign IDs from `first_id`, and return the
/// bucket start indices (length `n_orient + 1`).
fn sort_into_buckets(faces: &mut [FaceRecord], n_orient: usize, first_id: usize) -> Vec<usize> {
    faces.sort_by_key(|f| f.orientation);
    let mut start_idxs = vec![0; n_orient + 1];
    for face in faces.iter() {
        start_idxs[face.orientation + 1] += 1;
    }
    for o in 0..n_orient {
        start_idxs[o + 1] += start_idxs[o];
    }
    for (i, face) in faces.iter_mut().enumerate() {
        face.id = first_id + i;
    }
    start_idxs
}
