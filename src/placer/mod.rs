//! Geometric placement of atoms around already placed ones.
//!
//! An [`AtomPlacer`] borrows a molecule exclusively for one layout call. It
//! owns the transient per-atom annotations the algorithms need (priority
//! ranks and macrocycle hints) in side tables, so nothing but points and
//! `placed` flags is written to the molecule itself.

mod error;
mod linear;
mod partners;

pub use error::PlacementError;
pub use linear::{is_collinear, is_collinear_atom};

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::chain;
use crate::geometry::{centroid, Point2D};
use crate::mol::Mol;
use crate::options::LayoutOptions;
use crate::priority;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasHydrogenCount, HasPlaced, HasPosition2D,
    HasRingMembership,
};

pub struct AtomPlacer<'m, A, B> {
    mol: &'m mut Mol<A, B>,
    bond_length: f64,
    priorities: Option<Vec<u32>>,
    macrocycle_hints: HashSet<NodeIndex>,
}

impl<'m, A, B> AtomPlacer<'m, A, B>
where
    A: HasAtomicNum + HasHydrogenCount + HasPosition2D + HasPlaced + HasRingMembership,
    B: HasBondOrder + HasBondStereo + HasRingMembership,
{
    pub fn new(mol: &'m mut Mol<A, B>, options: &LayoutOptions) -> Self {
        Self {
            mol,
            bond_length: options.bond_length,
            priorities: None,
            macrocycle_hints: HashSet::new(),
        }
    }

    pub fn mol(&self) -> &Mol<A, B> {
        self.mol
    }

    pub fn mol_mut(&mut self) -> &mut Mol<A, B> {
        self.mol
    }

    pub fn bond_length(&self) -> f64 {
        self.bond_length
    }

    /// Compute priority ranks for every atom and keep them for this call.
    pub fn prioritise(&mut self) {
        self.priorities = Some(priority::rank(self.mol));
    }

    /// Priority of `atom`, if [`prioritise`](Self::prioritise) has run.
    pub fn priority(&self, atom: NodeIndex) -> Option<u32> {
        self.priorities
            .as_deref()
            .and_then(|ranks| priority::priority_of(ranks, atom))
    }

    pub fn set_macrocycle_hint(&mut self, atom: NodeIndex) {
        self.macrocycle_hints.insert(atom);
    }

    pub fn clear_macrocycle_hint(&mut self, atom: NodeIndex) {
        self.macrocycle_hints.remove(&atom);
    }

    pub fn has_macrocycle_hint(&self, atom: NodeIndex) -> bool {
        self.macrocycle_hints.contains(&atom)
    }

    /// Whether every atom of the molecule is placed.
    pub fn all_placed(&self) -> bool {
        self.mol.atoms().all(|atom| self.mol.atom(atom).is_placed())
    }

    /// Whether every atom in `atoms` is placed.
    pub fn all_placed_in(&self, atoms: &[NodeIndex]) -> bool {
        atoms.iter().all(|&atom| self.mol.atom(atom).is_placed())
    }

    pub fn mark_placed(&mut self, atoms: &[NodeIndex]) {
        for &atom in atoms {
            self.mol.atom_mut(atom).set_placed(true);
        }
    }

    pub fn mark_not_placed(&mut self, atoms: &[NodeIndex]) {
        for &atom in atoms {
            self.mol.atom_mut(atom).set_placed(false);
        }
    }

    /// Placed atoms in index order.
    pub fn placed_atoms(&self) -> Vec<NodeIndex> {
        self.mol
            .atoms()
            .filter(|&atom| self.mol.atom(atom).is_placed())
            .collect()
    }

    /// Split the neighbours of `atom` into placed and unplaced ones.
    pub fn partition_partners(&self, atom: NodeIndex) -> (Vec<NodeIndex>, Vec<NodeIndex>) {
        let mut bonds: Vec<_> = self.mol.bonds_of(atom).collect();
        bonds.sort_by_key(|e| e.index());
        bonds
            .into_iter()
            .filter_map(|e| self.mol.other_atom(e, atom))
            .partition(|&nb| self.mol.atom(nb).is_placed())
    }

    /// Centroid of the placed atoms; points left on unplaced atoms are ignored.
    pub fn placed_centroid(&self) -> Option<Point2D> {
        centroid(
            self.mol
                .atoms()
                .filter(|&atom| self.mol.is_placed(atom))
                .filter_map(|atom| self.mol.point(atom)),
        )
    }

    /// Centroid of the given atoms' points; atoms without points are skipped.
    pub fn centroid_of(&self, atoms: &[NodeIndex]) -> Option<Point2D> {
        centroid(atoms.iter().filter_map(|&atom| self.mol.point(atom)))
    }

    pub fn longest_unplaced_chain(&self, start: NodeIndex) -> Vec<NodeIndex> {
        chain::longest_unplaced_chain(self.mol, start)
    }

    pub fn initial_longest_chain(&self) -> Vec<NodeIndex> {
        chain::initial_longest_chain(self.mol)
    }

    /// Place `atoms` on a circle around `center`, the first one at
    /// `start_angle + step`, each following one a further `step` on.
    pub fn populate_polygon_corners(
        &mut self,
        atoms: &[NodeIndex],
        center: Point2D,
        start_angle: f64,
        step: f64,
        radius: f64,
    ) {
        let mut theta = start_angle;
        for &atom in atoms {
            theta = crate::geometry::wrap_angle(theta + step);
            let point = center + Point2D::from_angle(theta) * radius;
            self.mol.place(atom, point);
        }
    }

    fn point_of(&self, atom: NodeIndex) -> Result<Point2D, PlacementError> {
        self.mol
            .point(atom)
            .ok_or(PlacementError::AtomNotPlaced(atom))
    }
}
