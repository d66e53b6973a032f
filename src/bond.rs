use petgraph::graph::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    /// Order not known (e.g. a query or a delocalised bond without a Kekulé form).
    Unset,
    #[default]
    Single,
    Double,
    Triple,
    Quadruple,
}

/// Double-bond configuration, expressed with one reference atom on each end.
///
/// `Cis(a, b)` means `a` (a neighbour of one double-bond atom) and `b`
/// (a neighbour of the other) lie on the same side; `Trans(a, b)` on
/// opposite sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondStereo {
    #[default]
    None,
    Cis(NodeIndex, NodeIndex),
    Trans(NodeIndex, NodeIndex),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
    pub stereo: BondStereo,
    pub is_aromatic: bool,
    /// Whether this bond is part of at least one ring.
    pub in_ring: bool,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn single() -> Self {
        Self::new(BondOrder::Single)
    }

    pub fn double() -> Self {
        Self::new(BondOrder::Double)
    }

    pub fn triple() -> Self {
        Self::new(BondOrder::Triple)
    }
}

impl Default for Bond {
    fn default() -> Self {
        Self {
            order: BondOrder::Single,
            stereo: BondStereo::None,
            is_aromatic: false,
            in_ring: false,
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasBondStereo for Bond {
    fn bond_stereo(&self) -> BondStereo {
        self.stereo
    }
}

impl crate::traits::HasAromaticity for Bond {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}

impl crate::traits::HasRingMembership for Bond {
    fn in_ring(&self) -> bool {
        self.in_ring
    }
    fn set_in_ring(&mut self, in_ring: bool) {
        self.in_ring = in_ring;
    }
}
