use std::f64::consts::PI;

use petgraph::graph::NodeIndex;

use super::{AtomPlacer, PlacementError};
use crate::bond::BondOrder;
use crate::element::forms_linear_sp_centre;
use crate::geometry::Point2D;
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasHydrogenCount, HasPlaced, HasPosition2D,
    HasRingMembership,
};

/// Candidate directions closer than this are treated as equally good.
const TIE_TOLERANCE: f64 = 1e-9;

/// Whether an atom with exactly these two incident bonds should be drawn
/// with a straight (180°) angle.
///
/// Implicit hydrogens count as extra single bonds. Any quadruple bond makes
/// the centre linear; otherwise C, N, Si and Ge are linear with one triple
/// and one single bond, or with two double bonds and no single bond.
pub fn is_collinear<A, B>(atom: &A, bonds: &[&B]) -> bool
where
    A: HasAtomicNum + HasHydrogenCount,
    B: HasBondOrder,
{
    if bonds.len() != 2 {
        return false;
    }

    if bonds.iter().any(|b| b.bond_order() == BondOrder::Quadruple) {
        return true;
    }

    let mut singles = atom.hydrogen_count() as usize;
    let mut doubles = 0usize;
    let mut triples = 0usize;
    for bond in bonds {
        match bond.bond_order() {
            BondOrder::Single => singles += 1,
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => triples += 1,
            BondOrder::Quadruple => {}
            BondOrder::Unset => return false,
        }
    }

    if !forms_linear_sp_centre(atom.atomic_num()) {
        return false;
    }
    (triples == 1 && singles == 1) || (doubles == 2 && singles == 0)
}

/// [`is_collinear`] for an atom of `mol`, using all of its bonds.
pub fn is_collinear_atom<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> bool
where
    A: HasAtomicNum + HasHydrogenCount,
    B: HasBondOrder,
{
    let bonds: Vec<&B> = mol.bonds_of(atom).map(|e| mol.bond(e)).collect();
    is_collinear(mol.atom(atom), &bonds)
}

impl<A, B> AtomPlacer<'_, A, B>
where
    A: HasAtomicNum + HasHydrogenCount + HasPosition2D + HasPlaced + HasRingMembership,
    B: HasBondOrder + HasBondStereo + HasRingMembership,
{
    /// Lay out an unbranched path as a zig-zag.
    ///
    /// `path[0]` must already be placed; every following atom is put one
    /// bond length along the current bond vector, starting with
    /// `initial_bond_vector`, and marked placed. Bond angles are 120°, 60°
    /// where a configured double bond makes the next substituent cis, and
    /// 180° at collinear atoms. Across a configured double bond the next
    /// substituent goes on the side its configuration asks for; elsewhere
    /// the mirror-image choice farther from the centroid of the placed atoms
    /// is taken.
    ///
    /// If every atom after the first is already placed nothing moves.
    pub fn place_chain(
        &mut self,
        path: &[NodeIndex],
        initial_bond_vector: Point2D,
    ) -> Result<(), PlacementError> {
        let Some(&first) = path.first() else {
            return Ok(());
        };
        if !self.mol.is_placed(first) {
            return Err(PlacementError::AtomNotPlaced(first));
        }
        self.point_of(first)?;
        if self.all_placed_in(&path[1..]) {
            return Ok(());
        }
        for pair in path.windows(2) {
            if self.mol.bond_between(pair[0], pair[1]).is_none() {
                return Err(PlacementError::NotBonded(pair[0], pair[1]));
            }
        }

        log::debug!("placing linear chain of {} atoms", path.len());

        let mut bond_vector = initial_bond_vector;
        for i in 0..path.len() - 1 {
            let atom = path[i];
            let next = path[i + 1];
            let atom_point = self.point_of(atom)?;

            let step = bond_vector
                .scale_to(self.bond_length)
                .ok_or(PlacementError::ZeroBondVector)?;
            let mut next_point = atom_point + step;

            if i > 0 && is_collinear_atom(self.mol, atom) {
                // extend the previous bond straight through `atom`
                let previous_point = self.point_of(path[i - 1])?;
                next_point = previous_point.lerp(atom_point, 2.0);
            }
            self.mol.place(next, next_point);

            let configured = if i > 0 && i + 2 < path.len() {
                self.mol.is_trans(path[i - 1], atom, next, path[i + 2])
            } else {
                None
            };
            // a configured double bond is oriented against the substituent
            // on its far end, anything else against the placed atoms
            let (reference, trans) = match configured {
                Some(trans) => (self.point_of(path[i - 1])?, trans),
                None => (self.placed_centroid().unwrap_or(next_point), true),
            };
            bond_vector = self.next_bond_vector(next, atom, reference, trans)?;
        }
        Ok(())
    }

    /// Direction of the bond leaving `atom`, given the bond it was reached by.
    ///
    /// The two candidates are the direction back to `previous` rotated either
    /// way by the bond angle: 120° when `trans`, 60° otherwise. A trans bond
    /// takes the candidate whose end point lies farther from `reference`, a
    /// cis bond the nearer one; the second candidate wins a tie. Collinear
    /// atoms continue straight on.
    pub fn next_bond_vector(
        &self,
        atom: NodeIndex,
        previous: NodeIndex,
        reference: Point2D,
        trans: bool,
    ) -> Result<Point2D, PlacementError> {
        let atom_point = self.point_of(atom)?;
        let previous_point = self.point_of(previous)?;
        let back = previous_point - atom_point;
        let back_angle = back.angle();

        if is_collinear_atom(self.mol, atom) {
            return Ok(Point2D::from_angle(back_angle + PI));
        }

        let bond_angle = if trans {
            120f64.to_radians()
        } else {
            60f64.to_radians()
        };
        let v1 = Point2D::from_angle(back_angle + bond_angle);
        let v2 = Point2D::from_angle(back_angle - bond_angle);
        let d1 = (atom_point + v1).distance(reference);
        let d2 = (atom_point + v2).distance(reference);
        let second = if trans {
            d2 >= d1 - TIE_TOLERANCE
        } else {
            d2 <= d1 + TIE_TOLERANCE
        };
        Ok(if second { v2 } else { v1 })
    }
}
