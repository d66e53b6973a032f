//! Subgraph monomorphism search used by the template library.
//!
//! The search is a plain backtracking matcher in the VF2 family: query atoms
//! are visited in a connected order starting from the highest degree, and
//! each candidate target atom is checked against the atom matcher and
//! against every bond to an already mapped query neighbour. Target atoms are tried in index order, so the
//! enumeration order of matches is deterministic.

use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder};

/// How a query atom is compared with a target atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomMatcher {
    /// Every atom matches; only topology matters.
    Any,
    /// Atomic numbers must be equal.
    SameElement,
}

impl AtomMatcher {
    pub fn matches<Q: HasAtomicNum, T: HasAtomicNum>(self, query: &Q, target: &T) -> bool {
        match self {
            AtomMatcher::Any => true,
            AtomMatcher::SameElement => query.atomic_num() == target.atomic_num(),
        }
    }
}

/// How a query bond is compared with a target bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondMatcher {
    /// Every bond matches.
    Any,
    /// Bond orders must be equal.
    SameOrder,
}

impl BondMatcher {
    pub fn matches<Q: HasBondOrder, T: HasBondOrder>(self, query: &Q, target: &T) -> bool {
        match self {
            BondMatcher::Any => true,
            BondMatcher::SameOrder => query.bond_order() == target.bond_order(),
        }
    }
}

/// One embedding of a query in a target, as query → target pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    pub atoms: Vec<(NodeIndex, NodeIndex)>,
    pub bonds: Vec<(EdgeIndex, EdgeIndex)>,
}

impl Mapping {
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn target_atom(&self, query: NodeIndex) -> Option<NodeIndex> {
        self.atoms
            .iter()
            .find(|&&(q, _)| q == query)
            .map(|&(_, t)| t)
    }
}

/// A matcher bound to the shape of one query graph.
///
/// The visiting order is computed once from the query; the query itself is
/// passed again on each call so a `Pattern` can be stored next to the graph
/// it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    atom_matcher: AtomMatcher,
    bond_matcher: BondMatcher,
    query_order: Vec<NodeIndex>,
    query_atoms: usize,
    query_bonds: usize,
}

impl Pattern {
    pub fn new<A, B>(query: &Mol<A, B>, atom_matcher: AtomMatcher, bond_matcher: BondMatcher) -> Self {
        Self {
            atom_matcher,
            bond_matcher,
            query_order: visiting_order(query),
            query_atoms: query.atom_count(),
            query_bonds: query.bond_count(),
        }
    }

    pub fn atom_matcher(&self) -> AtomMatcher {
        self.atom_matcher
    }

    pub fn bond_matcher(&self) -> BondMatcher {
        self.bond_matcher
    }

    fn check_query<A, B>(&self, query: &Mol<A, B>) {
        debug_assert_eq!(
            (self.query_atoms, self.query_bonds),
            (query.atom_count(), query.bond_count()),
            "pattern used with a different query graph"
        );
    }

    /// Every embedding of `query` in `target`.
    pub fn match_all<A1, B1, A2, B2>(&self, query: &Mol<A1, B1>, target: &Mol<A2, B2>) -> Vec<Mapping>
    where
        A1: HasAtomicNum,
        B1: HasBondOrder,
        A2: HasAtomicNum,
        B2: HasBondOrder,
    {
        self.check_query(query);
        Vf2::new(self, query, target).find(false)
    }

    /// The first embedding of `query` in `target`, if any.
    pub fn match_first<A1, B1, A2, B2>(
        &self,
        query: &Mol<A1, B1>,
        target: &Mol<A2, B2>,
    ) -> Option<Mapping>
    where
        A1: HasAtomicNum,
        B1: HasBondOrder,
        A2: HasAtomicNum,
        B2: HasBondOrder,
    {
        self.check_query(query);
        Vf2::new(self, query, target).find(true).into_iter().next()
    }

    /// Whole-graph matches: only when `query` and `target` have the same
    /// number of atoms and bonds, so every embedding is an isomorphism.
    pub fn match_exact<A1, B1, A2, B2>(
        &self,
        query: &Mol<A1, B1>,
        target: &Mol<A2, B2>,
    ) -> Option<Mapping>
    where
        A1: HasAtomicNum,
        B1: HasBondOrder,
        A2: HasAtomicNum,
        B2: HasBondOrder,
    {
        if query.atom_count() != target.atom_count() || query.bond_count() != target.bond_count() {
            return None;
        }
        self.match_first(query, target)
    }

    /// Embeddings that share no target atom or bond, chosen greedily in
    /// enumeration order.
    pub fn match_unique_non_overlapping<A1, B1, A2, B2>(
        &self,
        query: &Mol<A1, B1>,
        target: &Mol<A2, B2>,
    ) -> Vec<Mapping>
    where
        A1: HasAtomicNum,
        B1: HasBondOrder,
        A2: HasAtomicNum,
        B2: HasBondOrder,
    {
        let mut claimed = Claimed::default();
        self.match_all(query, target)
            .into_iter()
            .filter(|m| claimed.claim(m))
            .collect()
    }
}

/// Query atoms ordered so each one after the first of its component has as
/// many already ordered neighbours as possible; ties go to the higher degree,
/// then the lower index.
fn visiting_order<A, B>(query: &Mol<A, B>) -> Vec<NodeIndex> {
    let n = query.atom_count();
    let mut ordered = vec![false; n];
    let mut links = vec![0usize; n];
    let mut order = Vec::with_capacity(n);
    while order.len() < n {
        let next = query
            .atoms()
            .filter(|a| !ordered[a.index()])
            .max_by(|&a, &b| {
                (links[a.index()], query.degree(a))
                    .cmp(&(links[b.index()], query.degree(b)))
                    .then(b.index().cmp(&a.index()))
            });
        let Some(next) = next else {
            break;
        };
        ordered[next.index()] = true;
        for nb in query.neighbors(next) {
            links[nb.index()] += 1;
        }
        order.push(next);
    }
    order
}

/// Target atoms and bonds already taken by accepted matches.
#[derive(Debug, Default)]
pub struct Claimed {
    atoms: HashSet<NodeIndex>,
    bonds: HashSet<EdgeIndex>,
}

impl Claimed {
    /// Take every target atom and bond of `mapping` unless one is already taken.
    pub fn claim(&mut self, mapping: &Mapping) -> bool {
        let overlaps = mapping.atoms.iter().any(|(_, t)| self.atoms.contains(t))
            || mapping.bonds.iter().any(|(_, t)| self.bonds.contains(t));
        if overlaps || mapping.is_empty() {
            return false;
        }
        self.atoms.extend(mapping.atoms.iter().map(|&(_, t)| t));
        self.bonds.extend(mapping.bonds.iter().map(|&(_, t)| t));
        true
    }
}

pub fn find_matches<A1, B1, A2, B2>(
    query: &Mol<A1, B1>,
    target: &Mol<A2, B2>,
    atom_matcher: AtomMatcher,
    bond_matcher: BondMatcher,
) -> Vec<Mapping>
where
    A1: HasAtomicNum,
    B1: HasBondOrder,
    A2: HasAtomicNum,
    B2: HasBondOrder,
{
    Pattern::new(query, atom_matcher, bond_matcher).match_all(query, target)
}

pub fn find_exact_matches<A1, B1, A2, B2>(
    query: &Mol<A1, B1>,
    target: &Mol<A2, B2>,
    atom_matcher: AtomMatcher,
    bond_matcher: BondMatcher,
) -> Vec<Mapping>
where
    A1: HasAtomicNum,
    B1: HasBondOrder,
    A2: HasAtomicNum,
    B2: HasBondOrder,
{
    if query.atom_count() != target.atom_count() || query.bond_count() != target.bond_count() {
        return Vec::new();
    }
    find_matches(query, target, atom_matcher, bond_matcher)
}

pub fn find_unique_non_overlapping_matches<A1, B1, A2, B2>(
    query: &Mol<A1, B1>,
    target: &Mol<A2, B2>,
    atom_matcher: AtomMatcher,
    bond_matcher: BondMatcher,
) -> Vec<Mapping>
where
    A1: HasAtomicNum,
    B1: HasBondOrder,
    A2: HasAtomicNum,
    B2: HasBondOrder,
{
    Pattern::new(query, atom_matcher, bond_matcher).match_unique_non_overlapping(query, target)
}

struct Vf2<'a, A1, B1, A2, B2> {
    pattern: &'a Pattern,
    query: &'a Mol<A1, B1>,
    target: &'a Mol<A2, B2>,
    query_map: Vec<Option<NodeIndex>>,
    target_used: Vec<bool>,
}

impl<'a, A1, B1, A2, B2> Vf2<'a, A1, B1, A2, B2>
where
    A1: HasAtomicNum,
    B1: HasBondOrder,
    A2: HasAtomicNum,
    B2: HasBondOrder,
{
    fn new(pattern: &'a Pattern, query: &'a Mol<A1, B1>, target: &'a Mol<A2, B2>) -> Self {
        Self {
            pattern,
            query,
            target,
            query_map: vec![None; query.atom_count()],
            target_used: vec![false; target.atom_count()],
        }
    }

    fn find(&mut self, first_only: bool) -> Vec<Mapping> {
        let mut results = Vec::new();
        if self.query.atom_count() <= self.target.atom_count() {
            self.recurse(0, &mut results, first_only);
        }
        results
    }

    fn recurse(&mut self, depth: usize, results: &mut Vec<Mapping>, first_only: bool) {
        if depth == self.pattern.query_order.len() {
            if let Some(mapping) = self.current_mapping() {
                results.push(mapping);
            }
            return;
        }

        let query_node = self.pattern.query_order[depth];

        for t_idx in 0..self.target_used.len() {
            if self.target_used[t_idx] {
                continue;
            }

            let target_node = NodeIndex::new(t_idx);

            if !self.is_feasible(query_node, target_node) {
                continue;
            }

            self.query_map[query_node.index()] = Some(target_node);
            self.target_used[t_idx] = true;

            self.recurse(depth + 1, results, first_only);

            self.query_map[query_node.index()] = None;
            self.target_used[t_idx] = false;

            if first_only && !results.is_empty() {
                return;
            }
        }
    }

    fn current_mapping(&self) -> Option<Mapping> {
        let mut atoms = Vec::with_capacity(self.pattern.query_order.len());
        for &qn in &self.pattern.query_order {
            atoms.push((qn, self.query_map[qn.index()]?));
        }
        atoms.sort_by_key(|&(q, _)| q.index());

        let mut bonds = Vec::with_capacity(self.query.bond_count());
        for q_bond in self.query.bonds() {
            let (qa, qb) = self.query.bond_endpoints(q_bond)?;
            let ta = self.query_map[qa.index()]?;
            let tb = self.query_map[qb.index()]?;
            bonds.push((q_bond, self.target.bond_between(ta, tb)?));
        }
        Some(Mapping { atoms, bonds })
    }

    fn is_feasible(&self, query_node: NodeIndex, target_node: NodeIndex) -> bool {
        if !self
            .pattern
            .atom_matcher
            .matches(self.query.atom(query_node), self.target.atom(target_node))
        {
            return false;
        }

        if self.target.degree(target_node) < self.query.degree(query_node) {
            return false;
        }

        for q_bond in self.query.bonds_of(query_node) {
            let Some(q_neighbor) = self.query.other_atom(q_bond, query_node) else {
                continue;
            };
            if let Some(t_mapped) = self.query_map[q_neighbor.index()] {
                match self.target.bond_between(target_node, t_mapped) {
                    Some(t_bond) => {
                        if !self
                            .pattern
                            .bond_matcher
                            .matches(self.query.bond(q_bond), self.target.bond(t_bond))
                        {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }

        true
    }
}
