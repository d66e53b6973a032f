//! Precomputed layouts for ring systems and cages.
//!
//! A [`TemplateLibrary`] keeps every registered [`Template`] next to two
//! patterns built from it: an anonymous one that only looks at topology and
//! an element one that also requires equal atomic numbers. Matching a
//! template copies its coordinates onto the target atoms and marks them
//! placed.

mod error;
mod loader;

pub use error::TemplateError;
pub use loader::{AtomRecord, BondRecord, LoadReport, TemplateRecord};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::geometry::median;
use crate::mol::Mol;
use crate::options::LayoutOptions;
use crate::substruct::{AtomMatcher, BondMatcher, Claimed, Mapping, Pattern};
use crate::traits::{HasAtomicNum, HasBondOrder, HasPlaced, HasPosition2D};
use crate::{Atom, Bond};

/// A named fragment with coordinates on every atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: Option<String>,
    pub mol: Mol<Atom, Bond>,
}

impl Template {
    pub fn new(mol: Mol<Atom, Bond>) -> Self {
        Self { name: None, mol }
    }

    pub fn named(name: impl Into<String>, mol: Mol<Atom, Bond>) -> Self {
        Self {
            name: Some(name.into()),
            mol,
        }
    }

    /// Median length over all bonds, `None` without bonds.
    pub fn median_bond_length(&self) -> Option<f64> {
        let lengths = self
            .mol
            .bonds()
            .filter_map(|e| {
                let (a, b) = self.mol.bond_endpoints(e)?;
                Some(self.mol.point(a)?.distance(self.mol.point(b)?))
            })
            .collect();
        median(lengths)
    }

    fn check_coordinates(&self) -> Result<(), TemplateError> {
        match self.mol.atoms().find(|&a| self.mol.point(a).is_none()) {
            Some(atom) => Err(TemplateError::MissingCoordinates {
                template: self.name.clone(),
                atom: atom.index(),
            }),
            None => Ok(()),
        }
    }

    fn rescale(&mut self, bond_length: f64) {
        let factor = match self.median_bond_length() {
            Some(len) if len > 0.0 => bond_length / len,
            _ => 1.0,
        };
        let atoms: Vec<NodeIndex> = self.mol.atoms().collect();
        for atom in atoms {
            if let Some(p) = self.mol.point(atom) {
                self.mol.place(atom, p * factor);
            }
        }
    }
}

/// Atoms and bonds of a target covered by one template match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substructure {
    pub atoms: Vec<NodeIndex>,
    pub bonds: Vec<EdgeIndex>,
}

impl From<&Mapping> for Substructure {
    fn from(mapping: &Mapping) -> Self {
        Self {
            atoms: mapping.atoms.iter().map(|&(_, t)| t).collect(),
            bonds: mapping.bonds.iter().map(|&(_, t)| t).collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    template: Template,
    anonymous: Pattern,
    element: Pattern,
}

/// Ordered collection of templates; earlier registrations win ties.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    options: LayoutOptions,
    entries: Vec<Entry>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl TemplateLibrary {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.entries.get(index).map(|e| &e.template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> + '_ {
        self.entries.iter().map(|e| &e.template)
    }

    /// Add a template, rescaled so its median bond has the configured length.
    ///
    /// Every atom must carry coordinates. A template without bonds, or whose
    /// median bond has zero length, is stored unscaled.
    pub fn register(&mut self, mut template: Template) -> Result<(), TemplateError> {
        template.check_coordinates()?;
        template.rescale(self.options.bond_length);
        let anonymous = Pattern::new(&template.mol, AtomMatcher::Any, BondMatcher::Any);
        let element = Pattern::new(&template.mol, AtomMatcher::SameElement, BondMatcher::Any);
        log::debug!(
            "registered template {} ({} atoms, {} bonds)",
            template.name.as_deref().unwrap_or("<unnamed>"),
            template.mol.atom_count(),
            template.mol.bond_count()
        );
        self.entries.push(Entry {
            template,
            anonymous,
            element,
        });
        Ok(())
    }

    fn position_exact<A, B>(&self, query: &Mol<A, B>) -> Option<usize>
    where
        A: HasAtomicNum,
        B: HasBondOrder,
    {
        self.entries.iter().position(|e| {
            e.anonymous
                .match_exact(&e.template.mol, query)
                .is_some_and(|m| !m.is_empty())
        })
    }

    /// Whether a template with the same topology as `query` is registered.
    pub fn contains<A, B>(&self, query: &Mol<A, B>) -> bool
    where
        A: HasAtomicNum,
        B: HasBondOrder,
    {
        self.position_exact(query).is_some()
    }

    /// Remove and return the template with the same topology as `query`.
    pub fn unregister<A, B>(&mut self, query: &Mol<A, B>) -> Option<Template>
    where
        A: HasAtomicNum,
        B: HasBondOrder,
    {
        let index = self.position_exact(query)?;
        Some(self.entries.remove(index).template)
    }

    /// Lay out `target` from a template with exactly its topology.
    pub fn map_exact<A, B>(&self, target: &mut Mol<A, B>) -> bool
    where
        A: HasAtomicNum + HasPosition2D + HasPlaced,
        B: HasBondOrder,
    {
        for entry in &self.entries {
            if let Some(mapping) = entry.anonymous.match_exact(&entry.template.mol, target) {
                if mapping.is_empty() {
                    continue;
                }
                log::debug!("exact template hit: {:?}", entry.template.name);
                copy_coordinates(&entry.template, &mapping, target);
                return true;
            }
        }
        false
    }

    /// Lay out part of `target` from the first template embedded in it.
    ///
    /// Element patterns are tried before anonymous ones so heteroatoms land
    /// where the template has them.
    pub fn map_substructure<A, B>(&self, target: &mut Mol<A, B>) -> bool
    where
        A: HasAtomicNum + HasPosition2D + HasPlaced,
        B: HasBondOrder,
    {
        for element_aware in [true, false] {
            for entry in &self.entries {
                let pattern = if element_aware {
                    &entry.element
                } else {
                    &entry.anonymous
                };
                let hit = pattern
                    .match_first(&entry.template.mol, target)
                    .filter(|m| !m.is_empty());
                if let Some(mapping) = hit {
                    log::debug!(
                        "substructure template hit: {:?} ({:?} atoms)",
                        entry.template.name,
                        pattern.atom_matcher()
                    );
                    copy_coordinates(&entry.template, &mapping, target);
                    return true;
                }
            }
        }
        false
    }

    /// Disjoint template embeddings in `target`, chosen greedily.
    ///
    /// Coordinates are not touched.
    pub fn find_non_overlapping_substructures<A, B>(&self, target: &Mol<A, B>) -> Vec<Substructure>
    where
        A: HasAtomicNum,
        B: HasBondOrder,
    {
        let mut claimed = Claimed::default();
        let mut found = Vec::new();
        for entry in &self.entries {
            for mapping in entry.anonymous.match_all(&entry.template.mol, target) {
                if claimed.claim(&mapping) {
                    found.push(Substructure::from(&mapping));
                }
            }
        }
        found
    }
}

fn copy_coordinates<A, B>(template: &Template, mapping: &Mapping, target: &mut Mol<A, B>)
where
    A: HasPosition2D + HasPlaced,
{
    for &(query, atom) in &mapping.atoms {
        if let Some(point) = template.mol.point(query) {
            target.place(atom, point);
        }
    }
}
