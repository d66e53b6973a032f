use std::f64::consts::PI;

use petgraph::graph::NodeIndex;

use super::{AtomPlacer, PlacementError};
use crate::geometry::{positive_angle, wrap_angle, Point2D};
use crate::traits::{
    HasAtomicNum, HasBondOrder, HasBondStereo, HasHydrogenCount, HasPlaced, HasPosition2D,
    HasRingMembership,
};

impl<A, B> AtomPlacer<'_, A, B>
where
    A: HasAtomicNum + HasHydrogenCount + HasPosition2D + HasPlaced + HasRingMembership,
    B: HasBondOrder + HasBondStereo + HasRingMembership,
{
    /// Place the unplaced neighbours of `atom` in the free angular space
    /// left by its placed neighbours, one bond length away.
    ///
    /// * no placed neighbours: spread evenly over the full circle from angle 0;
    /// * one placed neighbour: spread over the full circle with that
    ///   neighbour occupying one slot;
    /// * a macrocycle atom with two placed ring neighbours and only terminal
    ///   substituents: spread inside the reflex gap between the ring bonds;
    /// * otherwise: spread over the angle not occupied by the two placed
    ///   neighbours bordering the least hindered side.
    ///
    /// `placed_centroid` is the centroid of the placed neighbours. When a
    /// priority table is present the unplaced neighbours are placed in
    /// ascending priority value order.
    pub fn distribute_partners(
        &mut self,
        atom: NodeIndex,
        placed: &[NodeIndex],
        placed_centroid: Point2D,
        unplaced: &[NodeIndex],
    ) -> Result<(), PlacementError> {
        if unplaced.is_empty() {
            return if placed.is_empty() {
                Err(PlacementError::EmptyNeighbourhood(atom))
            } else {
                Ok(())
            };
        }

        let centre = self.point_of(atom)?;
        let mut placed_points = Vec::with_capacity(placed.len());
        for &nb in placed {
            placed_points.push((nb, self.point_of(nb)?));
        }

        let mut to_place = unplaced.to_vec();
        if self.priorities.is_some() {
            to_place.sort_by_key(|&nb| self.priority(nb).unwrap_or(u32::MAX));
        }

        let n = to_place.len() as f64;
        let radius = self.bond_length;

        match placed_points.as_slice() {
            [] => {
                log::debug!("distributing {} partners of atom {} freely", to_place.len(), atom.index());
                self.populate_polygon_corners(&to_place, centre, 0.0, 2.0 * PI / n, radius);
                return Ok(());
            }
            [(_, nb_point)] => {
                let start = positive_angle(nb_point.x - centre.x, nb_point.y - centre.y);
                self.populate_polygon_corners(&to_place, centre, start, 2.0 * PI / (n + 1.0), radius);
                return Ok(());
            }
            _ => {}
        }

        if self.has_macrocycle_hint(atom) {
            if let Some((start, step)) = self.macrocycle_sweep(atom, centre, &placed_points, &to_place) {
                log::debug!("atom {}: macrocycle substituents point into the ring", atom.index());
                self.populate_polygon_corners(&to_place, centre, start, step, radius);
                return Ok(());
            }
        }

        let Some((start, step)) = self.free_sector_sweep(centre, placed_centroid, &placed_points, n) else {
            log::debug!(
                "atom {} sits on the centroid of its placed neighbours, spreading freely",
                atom.index()
            );
            self.populate_polygon_corners(&to_place, centre, 0.0, 2.0 * PI / n, radius);
            return Ok(());
        };
        self.populate_polygon_corners(&to_place, centre, start, step, radius);
        Ok(())
    }

    /// Start angle and step for the reflex gap between two ring bonds.
    ///
    /// Clears the hint and returns `None` when the case does not apply, so
    /// the caller falls back to the general distribution from scratch.
    fn macrocycle_sweep(
        &mut self,
        atom: NodeIndex,
        centre: Point2D,
        placed: &[(NodeIndex, Point2D)],
        unplaced: &[NodeIndex],
    ) -> Option<(f64, f64)> {
        let ring_neighbours = placed.len() == 2
            && placed.iter().all(|&(nb, _)| {
                self.mol
                    .bond_between(atom, nb)
                    .is_some_and(|e| self.mol.bond(e).in_ring())
            });
        let all_terminal = unplaced.iter().all(|&nb| self.mol.degree(nb) == 1);
        if !ring_neighbours || !all_terminal {
            self.clear_macrocycle_hint(atom);
            return None;
        }

        let (_, b) = placed[0];
        let (_, c) = placed[1];
        let a1 = positive_angle(b.x - centre.x, b.y - centre.y);
        let a2 = positive_angle(c.x - centre.x, c.y - centre.y);
        // counter-clockwise sweep from a1 to a2
        let ccw = wrap_angle(a2 - a1);
        let (start, span) = if ccw >= PI {
            (a1, ccw)
        } else {
            (a2, 2.0 * PI - ccw)
        };
        Some((start, span / (unplaced.len() as f64 + 1.0)))
    }

    /// Start angle and step for the general case, `None` if the atom sits on
    /// the centroid of its placed neighbours.
    fn free_sector_sweep(
        &self,
        centre: Point2D,
        placed_centroid: Point2D,
        placed: &[(NodeIndex, Point2D)],
        n: f64,
    ) -> Option<(f64, f64)> {
        let occupied_direction = placed_centroid - centre;
        let free_direction = -occupied_direction.scale_to(self.bond_length)?;
        let distance_point = centre + free_direction;

        let mut sorted: Vec<(NodeIndex, Point2D)> = placed.to_vec();
        sorted.sort_by(|a, b| {
            a.1.distance(distance_point)
                .total_cmp(&b.1.distance(distance_point))
        });
        let closest1 = sorted[0].1;
        let closest2 = sorted[1].1;

        let occupied_angle = (closest1 - centre).angle_between(occupied_direction)
            + (closest2 - centre).angle_between(occupied_direction);

        let angle1 = positive_angle(closest1.x - centre.x, closest1.y - centre.y);
        let angle2 = positive_angle(closest2.x - centre.x, closest2.y - centre.y);
        let angle3 = positive_angle(free_direction.x, free_direction.y);

        // start from the bordering neighbour that lies clockwise of the free direction
        let start = if angle1 > angle3 {
            if angle1 - angle3 < PI {
                angle2
            } else {
                angle1
            }
        } else if angle3 - angle1 < PI {
            angle1
        } else {
            angle2
        };

        let remaining = 2.0 * PI - occupied_angle;
        Some((start, remaining / (n + 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::centroid;
    use crate::mol::Mol;
    use crate::options::LayoutOptions;
    use crate::{Atom, Bond};

    const BOND: f64 = 1.5;

    fn options() -> LayoutOptions {
        LayoutOptions::default().with_bond_length(BOND)
    }

    /// Centre atom 0 at the origin with `n` unbonded-elsewhere leaves.
    fn star(n: usize) -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        let centre = mol.add_atom(Atom::new(6).at(0.0, 0.0));
        for _ in 0..n {
            let leaf = mol.add_atom(Atom::new(6));
            mol.add_bond(centre, leaf, Bond::single());
        }
        mol
    }

    fn leaf_angles(mol: &Mol<Atom, Bond>, leaves: &[NodeIndex]) -> Vec<f64> {
        let mut angles: Vec<f64> = leaves
            .iter()
            .map(|&l| {
                let p = mol.point(l).unwrap();
                positive_angle(p.x, p.y)
            })
            .collect();
        angles.sort_by(|a, b| a.total_cmp(b));
        angles
    }

    fn assert_equally_spaced(angles: &[f64], step: f64) {
        for w in angles.windows(2) {
            let gap = w[1] - w[0];
            assert!((gap - step).abs() < 1e-9, "gap {gap} != {step}");
        }
    }

    #[test]
    fn no_placed_neighbours_spreads_evenly() {
        for n in [1usize, 2, 3, 4, 6] {
            let mut mol = star(n);
            let leaves: Vec<NodeIndex> = (1..=n).map(NodeIndex::new).collect();
            let mut placer = AtomPlacer::new(&mut mol, &options());
            placer
                .distribute_partners(NodeIndex::new(0), &[], Point2D::ORIGIN, &leaves)
                .unwrap();
            for &l in &leaves {
                let d = mol.point(l).unwrap().length();
                assert!((d - BOND).abs() < 1e-9);
                assert!(mol.is_placed(l));
            }
            let angles = leaf_angles(&mol, &leaves);
            assert_equally_spaced(&angles, 2.0 * PI / n as f64);
        }
    }

    #[test]
    fn one_placed_neighbour_leaves_its_slot() {
        for n in [1usize, 2, 3, 4, 6] {
            let mut mol = star(n + 1);
            let anchor = NodeIndex::new(1);
            mol.place(anchor, Point2D::new(BOND, 0.0));
            let leaves: Vec<NodeIndex> = (2..=n + 1).map(NodeIndex::new).collect();
            let mut placer = AtomPlacer::new(&mut mol, &options());
            placer
                .distribute_partners(NodeIndex::new(0), &[anchor], Point2D::new(BOND, 0.0), &leaves)
                .unwrap();

            let mut all = leaves.clone();
            all.push(anchor);
            let step = 2.0 * PI / (n as f64 + 1.0);
            let angles = leaf_angles(&mol, &all);
            assert!(angles[0].abs() < 1e-9);
            assert_equally_spaced(&angles, step);
        }
    }

    #[test]
    fn general_case_fills_the_open_side() {
        // centre with two placed neighbours at 120 degrees below, one to place
        let mut mol = star(3);
        let a = NodeIndex::new(1);
        let b = NodeIndex::new(2);
        let down_left = Point2D::from_angle(210f64.to_radians()) * BOND;
        let down_right = Point2D::from_angle(330f64.to_radians()) * BOND;
        mol.place(a, down_left);
        mol.place(b, down_right);
        let c = centroid([down_left, down_right]).unwrap();

        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer
            .distribute_partners(NodeIndex::new(0), &[a, b], c, &[NodeIndex::new(3)])
            .unwrap();
        let p = mol.point(NodeIndex::new(3)).unwrap();
        assert!((p.length() - BOND).abs() < 1e-9);
        assert!(p.x.abs() < 1e-9, "expected straight up, got {p:?}");
        assert!(p.y > 0.0);
    }

    #[test]
    fn general_case_two_into_open_side() {
        // one neighbour pair at 90 and 180 degrees; two atoms go into the 270 degree gap
        let mut mol = star(4);
        let a = NodeIndex::new(1);
        let b = NodeIndex::new(2);
        mol.place(a, Point2D::new(0.0, BOND));
        mol.place(b, Point2D::new(-BOND, 0.0));
        let c = centroid([Point2D::new(0.0, BOND), Point2D::new(-BOND, 0.0)]).unwrap();
        let to_place = [NodeIndex::new(3), NodeIndex::new(4)];

        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer
            .distribute_partners(NodeIndex::new(0), &[a, b], c, &to_place)
            .unwrap();
        let angles = leaf_angles(&mol, &[a, b, to_place[0], to_place[1]]);
        assert_equally_spaced(&angles, PI / 2.0);
    }

    #[test]
    fn degenerate_centroid_falls_back_to_full_circle() {
        let mut mol = star(3);
        let a = NodeIndex::new(1);
        let b = NodeIndex::new(2);
        mol.place(a, Point2D::new(BOND, 0.0));
        mol.place(b, Point2D::new(-BOND, 0.0));
        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer
            .distribute_partners(NodeIndex::new(0), &[a, b], Point2D::ORIGIN, &[NodeIndex::new(3)])
            .unwrap();
        let p = mol.point(NodeIndex::new(3)).unwrap();
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!((p.length() - BOND).abs() < 1e-9);
    }

    fn macrocycle_fragment(terminal: bool) -> Mol<Atom, Bond> {
        // ring atom 0 with ring neighbours 1 and 2 placed, substituent 3
        let mut mol = Mol::new();
        let centre = mol.add_atom(Atom::new(6).at(0.0, 0.0));
        let r1 = mol.add_atom(Atom::new(6).at(BOND, 0.0));
        let r2 = mol.add_atom(Atom::new(6).at(0.0, BOND));
        let sub = mol.add_atom(Atom::new(8));
        for nb in [r1, r2] {
            let e = mol.add_bond(centre, nb, Bond::single());
            mol.bond_mut(e).in_ring = true;
            mol.atom_mut(nb).in_ring = true;
        }
        mol.atom_mut(centre).in_ring = true;
        mol.add_bond(centre, sub, Bond::single());
        if !terminal {
            let tail = mol.add_atom(Atom::new(6));
            mol.add_bond(sub, tail, Bond::single());
        }
        mol
    }

    #[test]
    fn macrocycle_terminal_substituent_uses_reflex_gap() {
        let mut mol = macrocycle_fragment(true);
        let placed = [NodeIndex::new(1), NodeIndex::new(2)];
        let c = centroid([Point2D::new(BOND, 0.0), Point2D::new(0.0, BOND)]).unwrap();
        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer.set_macrocycle_hint(NodeIndex::new(0));
        placer
            .distribute_partners(NodeIndex::new(0), &placed, c, &[NodeIndex::new(3)])
            .unwrap();
        assert!(placer.has_macrocycle_hint(NodeIndex::new(0)));
        let p = mol.point(NodeIndex::new(3)).unwrap();
        // middle of the 270 degree gap from 90 to 360
        let theta = positive_angle(p.x, p.y);
        assert!((theta - 225f64.to_radians()).abs() < 1e-9, "theta = {theta}");
    }

    #[test]
    fn macrocycle_hint_cleared_for_non_terminal_substituent() {
        let mut mol = macrocycle_fragment(false);
        let placed = [NodeIndex::new(1), NodeIndex::new(2)];
        let c = centroid([Point2D::new(BOND, 0.0), Point2D::new(0.0, BOND)]).unwrap();
        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer.set_macrocycle_hint(NodeIndex::new(0));
        placer
            .distribute_partners(NodeIndex::new(0), &placed, c, &[NodeIndex::new(3)])
            .unwrap();
        assert!(!placer.has_macrocycle_hint(NodeIndex::new(0)));
        let p = mol.point(NodeIndex::new(3)).unwrap();
        assert!((p.length() - BOND).abs() < 1e-9);
    }

    #[test]
    fn nothing_to_place_is_a_no_op() {
        let mut mol = star(1);
        mol.place(NodeIndex::new(1), Point2D::new(BOND, 0.0));
        let before = mol.clone();
        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer
            .distribute_partners(NodeIndex::new(0), &[NodeIndex::new(1)], Point2D::new(BOND, 0.0), &[])
            .unwrap();
        assert_eq!(mol, before);
    }

    #[test]
    fn empty_neighbourhood_is_an_error() {
        let mut mol = star(0);
        let mut placer = AtomPlacer::new(&mut mol, &options());
        let err = placer
            .distribute_partners(NodeIndex::new(0), &[], Point2D::ORIGIN, &[])
            .unwrap_err();
        assert_eq!(err, PlacementError::EmptyNeighbourhood(NodeIndex::new(0)));
    }

    #[test]
    fn unplaced_centre_is_an_error() {
        let mut mol = Mol::<Atom, Bond>::new();
        let a = mol.add_atom(Atom::new(6));
        let b = mol.add_atom(Atom::new(6));
        mol.add_bond(a, b, Bond::single());
        let mut placer = AtomPlacer::new(&mut mol, &options());
        let err = placer
            .distribute_partners(a, &[], Point2D::ORIGIN, &[b])
            .unwrap_err();
        assert_eq!(err, PlacementError::AtomNotPlaced(a));
        assert!(mol.point(b).is_none());
    }

    #[test]
    fn priority_order_takes_first_slot() {
        // centre 0 with leaves 1 (terminal) and 2 (which continues to 3)
        let mut mol = star(2);
        let tail = mol.add_atom(Atom::new(6));
        mol.add_bond(NodeIndex::new(2), tail, Bond::single());
        let mut placer = AtomPlacer::new(&mut mol, &options());
        placer.prioritise();
        placer
            .distribute_partners(
                NodeIndex::new(0),
                &[],
                Point2D::ORIGIN,
                &[NodeIndex::new(1), NodeIndex::new(2)],
            )
            .unwrap();
        // atom 2 is more central, so it takes the first slot at angle pi
        let p2 = mol.point(NodeIndex::new(2)).unwrap();
        assert!((p2.x + BOND).abs() < 1e-9 && p2.y.abs() < 1e-9, "{p2:?}");
    }
}
