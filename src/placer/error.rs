use std::fmt;

use petgraph::graph::NodeIndex;

/// Precondition violations reported by the atom placer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Asked to distribute partners of an atom with no neighbours at all.
    EmptyNeighbourhood(NodeIndex),
    /// An atom that has to be placed already has no coordinates.
    AtomNotPlaced(NodeIndex),
    /// Two consecutive chain atoms are not bonded.
    NotBonded(NodeIndex, NodeIndex),
    /// The bond vector handed to the chain placer has zero length.
    ZeroBondVector,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNeighbourhood(atom) => write!(
                f,
                "atom {} has neither placed nor unplaced neighbours",
                atom.index()
            ),
            Self::AtomNotPlaced(atom) => {
                write!(f, "atom {} must be placed first", atom.index())
            }
            Self::NotBonded(a, b) => {
                write!(f, "atoms {} and {} are not bonded", a.index(), b.index())
            }
            Self::ZeroBondVector => write!(f, "initial bond vector has zero length"),
        }
    }
}

impl std::error::Error for PlacementError {}
