pub mod atom;
pub mod bond;
pub mod chain;
pub mod element;
pub mod geometry;
pub mod mol;
pub mod options;
pub mod placer;
pub mod priority;
pub mod rings;
pub mod substruct;
pub mod templates;
pub mod traits;

pub use atom::Atom;
pub use bond::{Bond, BondOrder, BondStereo};
pub use chain::{initial_longest_chain, longest_unplaced_chain};
pub use geometry::Point2D;
pub use mol::Mol;
pub use options::{LayoutOptions, DEFAULT_BOND_LENGTH};
pub use placer::{is_collinear, is_collinear_atom, AtomPlacer, PlacementError};
pub use priority::rank;
pub use rings::perceive_ring_membership;
pub use substruct::{AtomMatcher, BondMatcher, Mapping, Pattern};
pub use templates::{LoadReport, Substructure, Template, TemplateError, TemplateLibrary, TemplateRecord};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasBondStereo, HasFormalCharge, HasHydrogenCount,
    HasPlaced, HasPosition2D, HasRingMembership,
};
