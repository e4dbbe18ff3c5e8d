//! Global state storage.
//!
//! States are stored contiguously with layout `[n_states, n_eqs]`; the
//! state with local ID `s` is `data[s * n_eqs..(s + 1) * n_eqs]`. Each
//! state carries a "parallel updatable" flag: states owned by another
//! rank are present locally but must not be updated here.

use crate::basis::FrElementData;
use crate::error::{FrError, Result};
use crate::mesh::FrMesh;

/// Solution values at all solution points of a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct StateField {
    data: Vec<f64>,
    n_eqs: usize,
    par_updatable: Vec<bool>,
}

impl StateField {
    /// Zero states, all updatable.
    pub fn new(n_states: usize, n_eqs: usize) -> Self {
        Self {
            data: vec![0.0; n_states * n_eqs],
            n_eqs,
            par_updatable: vec![true; n_states],
        }
    }

    /// Zero states for every solution point of a mesh.
    pub fn for_mesh(mesh: &FrMesh, n_eqs: usize) -> Self {
        Self::new(mesh.n_states, n_eqs)
    }

    pub fn n_states(&self) -> usize {
        self.par_updatable.len()
    }

    pub fn n_eqs(&self) -> usize {
        self.n_eqs
    }

    /// Raw values, `[n_states * n_eqs]`.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn state(&self, id: usize) -> &[f64] {
        &self.data[id * self.n_eqs..(id + 1) * self.n_eqs]
    }

    pub fn state_mut(&mut self, id: usize) -> &mut [f64] {
        &mut self.data[id * self.n_eqs..(id + 1) * self.n_eqs]
    }

    /// Set every state to the same value.
    pub fn set_uniform(&mut self, state: &[f64]) {
        debug_assert_eq!(state.len(), self.n_eqs);
        for chunk in self.data.chunks_exact_mut(self.n_eqs) {
            chunk.copy_from_slice(state);
        }
    }

    /// Set the states from a function of the physical coordinates.
    ///
    /// Evaluates f(x) at each solution point of each cell.
    pub fn set_from_function<F>(&mut self, mesh: &FrMesh, data: &FrElementData, f: F) -> Result<()>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        if self.n_states() != mesh.n_states {
            return Err(FrError::size_mismatch("states", mesh.n_states, self.n_states()));
        }
        for (k, cell) in mesh.cells.iter().enumerate() {
            if cell.states.len() != data.n_sol_pnts() {
                return Err(FrError::size_mismatch(
                    "solution points per cell",
                    data.n_sol_pnts(),
                    cell.states.len(),
                ));
            }
            let geometry = mesh.cell_geometry(k);
            for (&id, coord) in cell.states.iter().zip(data.sol_pnt_coords()) {
                let value = f(&geometry.map_to_physical(coord));
                if value.len() != self.n_eqs {
                    return Err(FrError::size_mismatch("state", self.n_eqs, value.len()));
                }
                self.state_mut(id).copy_from_slice(&value);
            }
        }
        Ok(())
    }

    pub fn is_par_updatable(&self, id: usize) -> bool {
        self.par_updatable[id]
    }

    pub fn set_par_updatable(&mut self, id: usize, updatable: bool) {
        self.par_updatable[id] = updatable;
    }

    /// Mark all states of one cell.
    pub fn set_cell_par_updatable(&mut self, mesh: &FrMesh, cell: usize, updatable: bool) {
        for &id in &mesh.cells[cell].states {
            self.par_updatable[id] = updatable;
        }
    }

    /// Whether any of the given states is updatable.
    pub fn any_par_updatable(&self, ids: &[usize]) -> bool {
        ids.iter().any(|&id| self.par_updatable[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{ElementShape, SolutionPointSet};

    #[test]
    fn test_set_from_function() {
        let mesh = FrMesh::uniform_line(0.0, 2.0, 2, 1).unwrap();
        let data = FrElementData::new(ElementShape::Line, 1, SolutionPointSet::GaussLegendre)
            .unwrap();
        let mut states = StateField::for_mesh(&mesh, 2);
        states
            .set_from_function(&mesh, &data, |x| vec![x[0], 2.0 * x[0]])
            .unwrap();

        let g = 1.0 / 3.0_f64.sqrt();
        // Second cell is [1, 2]: first solution point at 1.5 - g/2
        let s = states.state(2);
        assert!((s[0] - (1.5 - 0.5 * g)).abs() < 1e-14);
        assert!((s[1] - 2.0 * s[0]).abs() < 1e-14);
    }

    #[test]
    fn test_updatable_flags() {
        let mesh = FrMesh::uniform_line(0.0, 1.0, 2, 2).unwrap();
        let mut states = StateField::for_mesh(&mesh, 1);
        assert!(states.any_par_updatable(&mesh.cells[1].states));
        states.set_cell_par_updatable(&mesh, 1, false);
        assert!(!states.any_par_updatable(&mesh.cells[1].states));
        assert!(states.is_par_updatable(0));

        states.set_par_updatable(4, true);
        assert!(states.any_par_updatable(&mesh.cells[1].states));
    }

    #[test]
    fn test_set_from_function_checks_sizes() {
        let mesh = FrMesh::uniform_line(0.0, 1.0, 2, 2).unwrap();
        let data = FrElementData::new(ElementShape::Line, 1, SolutionPointSet::GaussLegendre)
            .unwrap();
        let mut states = StateField::for_mesh(&mesh, 1);
        assert!(states.set_from_function(&mesh, &data, |_| vec![0.0]).is_err());
    }
}
