use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::bond::BondStereo;
use crate::geometry::Point2D;
use crate::traits::{HasBondStereo, HasPlaced, HasPosition2D};

/// A molecular graph: atoms and bonds in an arena addressed by index handles.
///
/// Indices are stable as long as nothing is removed, which the layout code
/// never does; side tables keyed by `NodeIndex::index()` stay valid for the
/// lifetime of a layout call.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Number of bonds incident to `idx` (implicit hydrogens not counted).
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// The atom at the other end of `bond` from `atom`.
    pub fn other_atom(&self, bond: EdgeIndex, atom: NodeIndex) -> Option<NodeIndex> {
        let (a, b) = self.bond_endpoints(bond)?;
        if a == atom {
            Some(b)
        } else if b == atom {
            Some(a)
        } else {
            None
        }
    }
}

impl<A: HasPosition2D + HasPlaced, B> Mol<A, B> {
    pub fn point(&self, idx: NodeIndex) -> Option<Point2D> {
        self.atom(idx).position_2d()
    }

    /// Assign a point and mark the atom placed.
    pub fn place(&mut self, idx: NodeIndex, point: Point2D) {
        let atom = self.atom_mut(idx);
        atom.set_position_2d(Some(point));
        atom.set_placed(true);
    }

    pub fn is_placed(&self, idx: NodeIndex) -> bool {
        self.atom(idx).is_placed()
    }

    /// Whether every atom carries a 2D point.
    pub fn has_2d_coordinates(&self) -> bool {
        self.atoms().all(|idx| self.point(idx).is_some())
    }
}

impl<A, B: HasBondStereo> Mol<A, B> {
    /// Configuration of the path `a-b=c-d` across the double bond `b=c`.
    ///
    /// Returns `Some(true)` for trans, `Some(false)` for cis and `None` when
    /// `b=c` is not a bond, carries no stereo, or `a`/`d` are not neighbours
    /// of `b`/`c`.
    pub fn is_trans(
        &self,
        a: NodeIndex,
        b: NodeIndex,
        c: NodeIndex,
        d: NodeIndex,
    ) -> Option<bool> {
        let bond = self.bond_between(b, c)?;
        if self.bond_between(a, b).is_none() || self.bond_between(c, d).is_none() {
            return None;
        }
        let (r1, r2, trans) = match self.bond(bond).bond_stereo() {
            BondStereo::None => return None,
            BondStereo::Cis(r1, r2) => (r1, r2, false),
            BondStereo::Trans(r1, r2) => (r1, r2, true),
        };
        let (ref_b, ref_c) = if self.bond_between(r1, b).is_some() && r1 != c {
            (r1, r2)
        } else {
            (r2, r1)
        };
        if self.bond_between(ref_b, b).is_none() || self.bond_between(ref_c, c).is_none() {
            return None;
        }
        // a substituent other than the reference sits on the opposite side
        let flip_a = a != ref_b;
        let flip_d = d != ref_c;
        Some(trans ^ flip_a ^ flip_d)
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            if self.atom(idx) != other.atom(idx) {
                return false;
            }
        }
        for idx in self.bonds() {
            if self.bond(idx) != other.bond(idx) {
                return false;
            }
            if self.bond_endpoints(idx) != other.bond_endpoints(idx) {
                return false;
            }
        }
        true
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}
