//! Capability traits that decouple the algorithms from concrete atom and
//! bond types. Every engine operation is generic over the subset it needs.

use crate::bond::{BondOrder, BondStereo};
use crate::geometry::Point2D;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

/// Ring membership flag, shared by atoms and bonds.
pub trait HasRingMembership {
    fn in_ring(&self) -> bool;
    fn set_in_ring(&mut self, in_ring: bool);
}

pub trait HasPosition2D {
    fn position_2d(&self) -> Option<Point2D>;
    fn set_position_2d(&mut self, pos: Option<Point2D>);
}

/// The "placed" flag of the layout engine.
pub trait HasPlaced {
    fn is_placed(&self) -> bool;
    fn set_placed(&mut self, placed: bool);
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

pub trait HasBondStereo {
    fn bond_stereo(&self) -> BondStereo;
}
