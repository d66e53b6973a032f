use crate::geometry::Point2D;

/// Default atom type for a molecular graph node.
///
/// Besides the intrinsic properties read off a structural formula, `Atom`
/// carries the layout state the placement engine works on: an optional 2D
/// point and the `placed` flag. Ring membership is expected to be perceived
/// before layout (see [`perceive_ring_membership`](crate::rings::perceive_ring_membership)).
///
/// # Examples
///
/// ```
/// use sdgcrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     hydrogen_count: 3,
///     ..Atom::default()
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// assert!(!carbon.placed);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). `0` is a wildcard/dummy atom.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Number of implicit (suppressed) hydrogens on this atom.
    pub hydrogen_count: u8,
    /// Whether this atom is in an aromatic ring.
    pub is_aromatic: bool,
    /// Whether this atom is a member of at least one ring.
    pub in_ring: bool,
    /// Depiction coordinates, `None` until assigned.
    pub position_2d: Option<Point2D>,
    /// Set once the coordinates are final for the current layout pass.
    pub placed: bool,
}

impl Atom {
    /// A neutral atom of the given element with no hydrogens.
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn with_hydrogens(mut self, hydrogen_count: u8) -> Self {
        self.hydrogen_count = hydrogen_count;
        self
    }

    /// Builder used mostly by templates: sets a point and marks the atom placed.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position_2d = Some(Point2D::new(x, y));
        self.placed = true;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::HasRingMembership for Atom {
    fn in_ring(&self) -> bool {
        self.in_ring
    }
    fn set_in_ring(&mut self, in_ring: bool) {
        self.in_ring = in_ring;
    }
}

impl crate::traits::HasPosition2D for Atom {
    fn position_2d(&self) -> Option<Point2D> {
        self.position_2d
    }
    fn set_position_2d(&mut self, pos: Option<Point2D>) {
        self.position_2d = pos;
    }
}

impl crate::traits::HasPlaced for Atom {
    fn is_placed(&self) -> bool {
        self.placed
    }
    fn set_placed(&mut self, placed: bool) {
        self.placed = placed;
    }
}
