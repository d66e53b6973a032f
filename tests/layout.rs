use petgraph::graph::NodeIndex;

use sdgcrab::{
    is_collinear, perceive_ring_membership, Atom, AtomPlacer, Bond, LayoutOptions, Mol, Point2D,
    Template, TemplateLibrary,
};

fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

fn carbons(count: usize, bonds: &[(usize, usize)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for _ in 0..count {
        mol.add_atom(Atom::new(6));
    }
    for &(a, b) in bonds {
        mol.add_bond(n(a), n(b), Bond::single());
    }
    mol
}

/// Cyclohexane (0..6) with a butyl chain (6..10) on atom 0.
fn butylcyclohexane() -> Mol<Atom, Bond> {
    carbons(
        10,
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 0),
            (0, 6),
            (6, 7),
            (7, 8),
            (8, 9),
        ],
    )
}

/// Template seed, substituent fan-out, then the chain.
fn lay_out(mol: &mut Mol<Atom, Bond>, library: &TemplateLibrary) {
    perceive_ring_membership(mol);
    assert!(library.map_substructure(mol));

    let mut placer = AtomPlacer::new(mol, library.options());
    placer.prioritise();
    let (placed, unplaced) = placer.partition_partners(n(0));
    assert_eq!(unplaced, vec![n(6)]);
    let centroid = placer.centroid_of(&placed).unwrap();
    placer
        .distribute_partners(n(0), &placed, centroid, &unplaced)
        .unwrap();

    let chain = placer.longest_unplaced_chain(n(6));
    assert_eq!(chain, vec![n(6), n(7), n(8), n(9)]);
    let p0 = placer.mol().point(n(0)).unwrap();
    let p6 = placer.mol().point(n(6)).unwrap();
    placer.place_chain(&chain, p6 - p0).unwrap();
    assert!(placer.all_placed());
}

#[test]
fn propane_chain() {
    let mut mol = carbons(3, &[(0, 1), (1, 2)]);
    mol.place(n(0), Point2D::ORIGIN);
    let mut placer = AtomPlacer::new(&mut mol, &LayoutOptions::default());
    placer
        .place_chain(&[n(0), n(1), n(2)], Point2D::new(1.0, 0.0))
        .unwrap();

    let p1 = mol.point(n(1)).unwrap();
    let p2 = mol.point(n(2)).unwrap();
    assert!((p1.x - 1.5).abs() < 1e-9 && p1.y.abs() < 1e-9, "{p1:?}");
    // 120 degree bond angle at atom 1
    assert!((p2.x - 2.25).abs() < 1e-9, "{p2:?}");
    assert!((p2.y - 1.5 * 60f64.to_radians().sin()).abs() < 1e-9, "{p2:?}");
}

#[test]
fn exact_template_match_on_four_ring() {
    let mut square = Mol::new();
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    for (x, y) in corners {
        square.add_atom(Atom::new(6).at(x, y));
    }
    for i in 0..4 {
        square.add_bond(n(i), n((i + 1) % 4), Bond::single());
    }
    let mut library = TemplateLibrary::new(LayoutOptions::default().with_bond_length(1.0));
    library.register(Template::named("cyclobutane", square)).unwrap();

    // same ring with a different atom order and elements
    let mut target = Mol::new();
    for z in [7, 6, 8, 6] {
        target.add_atom(Atom::new(z));
    }
    for (a, b) in [(0, 2), (2, 1), (1, 3), (3, 0)] {
        target.add_bond(n(a), n(b), Bond::single());
    }

    assert!(library.map_exact(&mut target));
    for atom in target.atoms() {
        assert!(target.is_placed(atom));
        let p = target.point(atom).unwrap();
        assert!(corners.contains(&(p.x, p.y)), "{p:?} is not a template corner");
    }
    for bond in target.bonds() {
        let (a, b) = target.bond_endpoints(bond).unwrap();
        let d = target.point(a).unwrap().distance(target.point(b).unwrap());
        assert!((d - 1.0).abs() < 1e-12);
    }
}

#[test]
fn collinear_centres() {
    let nitrile_carbon = Atom::new(6);
    assert!(is_collinear(&nitrile_carbon, &[&Bond::triple(), &Bond::single()]));

    let methylene = Atom::new(6).with_hydrogens(2);
    assert!(!is_collinear(&methylene, &[&Bond::single(), &Bond::single()]));
}

#[test]
fn new_bonds_have_the_configured_length() {
    let library = TemplateLibrary::with_default_templates(LayoutOptions::default());
    let mut mol = butylcyclohexane();
    lay_out(&mut mol, &library);

    for (a, b) in [(0, 6), (6, 7), (7, 8), (8, 9)] {
        let d = mol.point(n(a)).unwrap().distance(mol.point(n(b)).unwrap());
        assert!((d - 1.5).abs() <= 1.5e-9, "bond {a}-{b} is {d}");
    }
}

#[test]
fn layout_is_deterministic() {
    let library = TemplateLibrary::with_default_templates(LayoutOptions::default());
    let mut first = butylcyclohexane();
    let mut second = butylcyclohexane();
    lay_out(&mut first, &library);
    lay_out(&mut second, &library);
    for atom in first.atoms() {
        let p = first.point(atom).unwrap();
        let q = second.point(atom).unwrap();
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn placing_again_changes_nothing() {
    let library = TemplateLibrary::with_default_templates(LayoutOptions::default());
    let mut mol = butylcyclohexane();
    lay_out(&mut mol, &library);
    let before = mol.clone();

    let mut placer = AtomPlacer::new(&mut mol, library.options());
    assert!(placer.all_placed());
    let (placed, unplaced) = placer.partition_partners(n(0));
    assert!(unplaced.is_empty());
    let centroid = placer.centroid_of(&placed).unwrap();
    placer
        .distribute_partners(n(0), &placed, centroid, &unplaced)
        .unwrap();
    placer
        .place_chain(&[n(6), n(7), n(8), n(9)], Point2D::new(0.0, 1.0))
        .unwrap();

    assert_eq!(mol, before);
}

#[test]
fn chain_placement_keeps_hydrogen_counts() {
    let mut mol = carbons(4, &[(0, 1), (1, 2), (2, 3)]);
    for (i, h) in [3u8, 2, 2, 3].into_iter().enumerate() {
        mol.atom_mut(n(i)).hydrogen_count = h;
    }
    mol.place(n(0), Point2D::ORIGIN);
    let mut placer = AtomPlacer::new(&mut mol, &LayoutOptions::default());
    let chain = placer.initial_longest_chain();
    assert_eq!(chain, vec![n(0), n(1), n(2), n(3)]);
    placer.place_chain(&chain, Point2D::new(1.0, 0.0)).unwrap();
    let counts: Vec<u8> = mol.atoms().map(|a| mol.atom(a).hydrogen_count).collect();
    assert_eq!(counts, vec![3, 2, 2, 3]);
}
