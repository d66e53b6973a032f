//! Longest-chain search used to seed the layout of acyclic parts.

use petgraph::algo::floyd_warshall;
use petgraph::graph::NodeIndex;

use crate::mol::Mol;
use crate::traits::{HasHydrogenCount, HasPlaced, HasRingMembership};

/// Neighbours of `atom` in bond insertion order.
fn ordered_neighbors<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Vec<NodeIndex> {
    let mut bonds: Vec<_> = mol.bonds_of(atom).collect();
    bonds.sort_by_key(|e| e.index());
    bonds
        .into_iter()
        .filter_map(|e| mol.other_atom(e, atom))
        .collect()
}

/// Connected-bond count plus implicit hydrogens, summed over the path.
pub fn degree_sum<A: HasHydrogenCount, B>(mol: &Mol<A, B>, path: &[NodeIndex]) -> usize {
    path.iter()
        .map(|&atom| mol.degree(atom) + mol.atom(atom).hydrogen_count() as usize)
        .sum()
}

/// The longest path of unplaced atoms starting at `start`.
///
/// A breadth-first search grows one candidate path per reached atom. Ring
/// atoms other than `start` may end a path but are never expanded, and
/// placed atoms are never entered. The longest candidate wins; among equally
/// long ones the larger [`degree_sum`] wins, then the lower atom index.
pub fn longest_unplaced_chain<A, B>(mol: &Mol<A, B>, start: NodeIndex) -> Vec<NodeIndex>
where
    A: HasPlaced + HasRingMembership + HasHydrogenCount,
{
    let n = mol.atom_count();
    if start.index() >= n {
        return Vec::new();
    }

    let mut paths: Vec<Vec<NodeIndex>> = vec![vec![start]; n];
    let mut visited = vec![false; n];
    visited[start.index()] = true;

    let mut sphere = vec![start];
    while !sphere.is_empty() {
        let mut next_sphere = Vec::new();
        for &atom in &sphere {
            if atom != start && mol.atom(atom).in_ring() {
                continue;
            }
            for next in ordered_neighbors(mol, atom) {
                if visited[next.index()] || mol.atom(next).is_placed() {
                    continue;
                }
                visited[next.index()] = true;
                let mut path = paths[atom.index()].clone();
                path.push(next);
                paths[next.index()] = path;
                if mol.degree(next) > 1 {
                    next_sphere.push(next);
                }
            }
        }
        sphere = next_sphere;
    }

    let mut best = start.index();
    let mut best_key = (1, degree_sum(mol, &paths[best]));
    for (i, path) in paths.iter().enumerate() {
        let key = (path.len(), degree_sum(mol, path));
        if key > best_key {
            best = i;
            best_key = key;
        }
    }
    log::debug!(
        "longest unplaced chain from atom {} has {} atoms",
        start.index(),
        paths[best].len()
    );
    paths.swap_remove(best)
}

/// Pick a start atom with all-pairs shortest paths and grow the longest
/// unplaced chain from it.
///
/// The start is the terminal (degree 1) atom with the largest topological
/// distance to any other atom; without terminal atoms the first atom is used.
/// An empty molecule yields an empty path.
pub fn initial_longest_chain<A, B>(mol: &Mol<A, B>) -> Vec<NodeIndex>
where
    A: HasPlaced + HasRingMembership + HasHydrogenCount,
{
    let Some(first) = mol.atoms().next() else {
        return Vec::new();
    };

    // edge costs are positive, so no negative cycle can be reported
    let apsp = floyd_warshall(mol.graph(), |_| 1u32).unwrap_or_default();

    let mut start = first;
    let mut max_length = 0u32;
    for from in mol.atoms().filter(|&a| mol.degree(a) == 1) {
        for to in mol.atoms() {
            let d = apsp.get(&(from, to)).copied().unwrap_or(u32::MAX);
            if d != u32::MAX && d > max_length {
                max_length = d;
                start = from;
            }
        }
    }

    longest_unplaced_chain(mol, start)
}
