//! Topological priority by Morgan-style relaxation.
//!
//! Every atom starts in class 1. Each round an atom's value becomes three
//! times its own class plus the classes of its neighbours; atoms are then
//! re-sorted (stably) by value and given dense class numbers. Rounds stop
//! once the number of classes no longer grows, or after `n` rounds. The
//! final priority is `1 + classes - class`, so the most buried atoms get
//! priority 1 and the most peripheral atoms the largest value.

use petgraph::graph::NodeIndex;

use crate::mol::Mol;

/// Priority per atom, indexed by `NodeIndex::index()`.
pub fn rank<A, B>(mol: &Mol<A, B>) -> Vec<u32> {
    let n = mol.atom_count();
    if n == 0 {
        return Vec::new();
    }

    let adjacency: Vec<Vec<usize>> = mol
        .atoms()
        .map(|atom| mol.neighbors(atom).map(|nb| nb.index()).collect())
        .collect();

    let mut class = vec![1u64; n];
    let mut value = vec![0u64; n];
    // kept across rounds so ties stay in the order the previous round left them
    let mut order: Vec<usize> = (0..n).collect();
    let mut num_classes = 1u64;

    for _ in 0..n {
        for i in 0..n {
            value[i] = 3 * class[i] + adjacency[i].iter().map(|&w| class[w]).sum::<u64>();
        }

        order.sort_by_key(|&i| value[i]);

        let mut current = 1u64;
        class[order[0]] = current;
        for pair in order.windows(2) {
            if value[pair[1]] != value[pair[0]] {
                current += 1;
            }
            class[pair[1]] = current;
        }

        if current == num_classes {
            break;
        }
        num_classes = current;
    }

    class
        .iter()
        .map(|&c| (1 + num_classes - c) as u32)
        .collect()
}

/// Priority of a single atom from a table produced by [`rank`].
pub fn priority_of(ranks: &[u32], atom: NodeIndex) -> Option<u32> {
    ranks.get(atom.index()).copied()
}
