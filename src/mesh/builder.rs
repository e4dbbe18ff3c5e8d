//! Scoped construction of cells and faces.
//!
//! A builder hands out one entity at a time. The returned guard borrows the
//! builder mutably, so a second `build` cannot happen while an entity is
//! live, and dropping the guard releases the entity on every exit path.

use super::geometry::{Cell, Face};
use super::topology::{FrMesh, Trs};
use crate::error::{FrError, Result};
use std::ops::Deref;

fn build_cell(mesh: &FrMesh, idx: usize) -> Cell {
    let element_type = mesh
        .element_type_data
        .iter()
        .position(|etd| (etd.start_idx..etd.end_idx).contains(&idx))
        .unwrap_or(0);
    Cell {
        id: idx,
        element_type,
        states: mesh.cells[idx].states.clone(),
        geometry: mesh.cell_geometry(idx),
    }
}

/// Builds cells of the `InnerCells` region.
#[derive(Debug)]
pub struct CellBuilder<'m> {
    mesh: &'m FrMesh,
    n_built: usize,
    n_released: usize,
}

impl<'m> CellBuilder<'m> {
    pub fn new(mesh: &'m FrMesh) -> Self {
        Self {
            mesh,
            n_built: 0,
            n_released: 0,
        }
    }

    /// Build cell `idx`; released when the guard is dropped.
    pub fn build(&mut self, idx: usize) -> Result<BuiltCell<'_, 'm>> {
        if idx >= self.mesh.n_cells() {
            return Err(FrError::InvalidMesh(format!(
                "Cell index {} out of range ({} cells)",
                idx,
                self.mesh.n_cells()
            )));
        }
        let cell = build_cell(self.mesh, idx);
        self.n_built += 1;
        Ok(BuiltCell {
            builder: self,
            cell,
        })
    }

    pub fn n_built(&self) -> usize {
        self.n_built
    }

    pub fn n_released(&self) -> usize {
        self.n_released
    }
}

/// A live cell; releases itself on drop.
#[derive(Debug)]
pub struct BuiltCell<'b, 'm> {
    builder: &'b mut CellBuilder<'m>,
    cell: Cell,
}

impl Deref for BuiltCell<'_, '_> {
    type Target = Cell;

    fn deref(&self) -> &Cell {
        &self.cell
    }
}

impl Drop for BuiltCell<'_, '_> {
    fn drop(&mut self) {
        self.builder.n_released += 1;
    }
}

/// Builds faces of a face region together with their neighbour cells.
#[derive(Debug)]
pub struct FaceBuilder<'m> {
    mesh: &'m FrMesh,
    trs: Trs,
    n_built: usize,
    n_released: usize,
}

impl<'m> FaceBuilder<'m> {
    pub fn new(mesh: &'m FrMesh, trs: Trs) -> Result<Self> {
        // Validates the region
        mesh.faces(trs)?;
        Ok(Self {
            mesh,
            trs,
            n_built: 0,
            n_released: 0,
        })
    }

    pub fn trs(&self) -> Trs {
        self.trs
    }

    /// Build face `idx` of the region; released when the guard is dropped.
    pub fn build(&mut self, idx: usize) -> Result<BuiltFace<'_, 'm>> {
        let mesh = self.mesh;
        let faces = mesh.faces(self.trs)?;
        let record = faces.get(idx).ok_or_else(|| {
            FrError::InvalidMesh(format!(
                "Face index {} out of range ({} faces in {})",
                idx,
                faces.len(),
                self.trs
            ))
        })?;

        let mut cells = vec![build_cell(mesh, record.left.element)];
        let mut local_faces = vec![record.left.face];
        if let Some(right) = record.right {
            cells.push(build_cell(mesh, right.element));
            local_faces.push(right.face);
        }

        let face = Face {
            id: record.id,
            orientation: record.orientation,
            cells,
            local_faces,
        };
        self.n_built += 1;
        Ok(BuiltFace {
            builder: self,
            face,
        })
    }

    pub fn n_built(&self) -> usize {
        self.n_built
    }

    pub fn n_released(&self) -> usize {
        self.n_released
    }
}

/// A live face; releases itself on drop.
#[derive(Debug)]
pub struct BuiltFace<'b, 'm> {
    builder: &'b mut FaceBuilder<'m>,
    face: Face,
}

impl Deref for BuiltFace<'_, '_> {
    type Target = Face;

    fn deref(&self) -> &Face {
        &self.face
    }
}

impl Drop for BuiltFace<'_, '_> {
    fn drop(&mut self) {
        self.builder.n_released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn test_cell_guard_releases() {
        let mesh = FrMesh::uniform_line(0.0, 1.0, 3, 2).unwrap();
        let mut builder = CellBuilder::new(&mesh);
        for idx in 0..3 {
            let cell = builder.build(idx).unwrap();
            assert_eq!(cell.id(), idx);
            assert_eq!(cell.states().len(), 3);
        }
        assert_eq!(builder.n_built(), 3);
        assert_eq!(builder.n_released(), 3);
        assert!(builder.build(3).is_err());
        assert_eq!(builder.n_built(), 3);
    }

    #[test]
    fn test_face_guard_releases_on_early_exit() {
        let mesh = FrMesh::uniform_line(0.0, 1.0, 3, 1).unwrap();
        let mut builder = FaceBuilder::new(&mesh, Trs::InnerFaces).unwrap();

        fn visit(builder: &mut FaceBuilder<'_>, idx: usize) -> Result<bool> {
            let face = builder.build(idx)?;
            if face.neighbour(Side::Left).id() == 0 {
                return Ok(false);
            }
            Ok(face.neighbour(Side::Right).id() == 2)
        }
        assert!(!visit(&mut builder, 0).unwrap());
        assert!(visit(&mut builder, 1).unwrap());
        assert_eq!(builder.n_built(), 2);
        assert_eq!(builder.n_released(), 2);
    }

    #[test]
    fn test_face_builder_rejects_cell_region() {
        let mesh = FrMesh::uniform_line(0.0, 1.0, 2, 1).unwrap();
        assert!(FaceBuilder::new(&mesh, Trs::InnerCells).is_err());
    }
}
