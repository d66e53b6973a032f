use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;
use crate::traits::HasRingMembership;

/// Whether `bond` lies on a cycle: its endpoints stay connected when it is removed.
pub fn is_ring_bond<A, B>(mol: &Mol<A, B>, bond: EdgeIndex) -> bool {
    let Some((from, to)) = mol.bond_endpoints(bond) else {
        return false;
    };
    let mut visited = vec![false; mol.atom_count()];
    visited[from.index()] = true;
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        for edge in mol.bonds_of(current) {
            if edge == bond {
                continue;
            }
            let Some(next) = mol.other_atom(edge, current) else {
                continue;
            };
            if next == to {
                return true;
            }
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

/// Set the ring flags on every atom and bond.
///
/// A bond is a ring bond iff it is not a bridge; an atom is a ring atom iff
/// it has at least one ring bond. Returns the ring atoms in index order.
pub fn perceive_ring_membership<A, B>(mol: &mut Mol<A, B>) -> Vec<NodeIndex>
where
    A: HasRingMembership,
    B: HasRingMembership,
{
    let ring_bonds: Vec<EdgeIndex> = mol.bonds().filter(|&e| is_ring_bond(mol, e)).collect();
    let mut ring_atom = vec![false; mol.atom_count()];

    let bonds: Vec<EdgeIndex> = mol.bonds().collect();
    for bond in bonds {
        let in_ring = ring_bonds.contains(&bond);
        mol.bond_mut(bond).set_in_ring(in_ring);
        if in_ring {
            if let Some((a, b)) = mol.bond_endpoints(bond) {
                ring_atom[a.index()] = true;
                ring_atom[b.index()] = true;
            }
        }
    }

    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    let mut result = Vec::new();
    for atom in atoms {
        let in_ring = ring_atom[atom.index()];
        mol.atom_mut(atom).set_in_ring(in_ring);
        if in_ring {
            result.push(atom);
        }
    }
    result
}
