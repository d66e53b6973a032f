use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petgraph::graph::NodeIndex;

use sdgcrab::{Atom, AtomPlacer, Bond, LayoutOptions, Mol, Point2D, TemplateLibrary};

fn alkane(len: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let mut prev = mol.add_atom(Atom::new(6).with_hydrogens(3));
    for _ in 1..len {
        let next = mol.add_atom(Atom::new(6).with_hydrogens(2));
        mol.add_bond(prev, next, Bond::single());
        prev = next;
    }
    mol
}

/// `rings` cyclohexanes joined in a row by single bonds.
fn ring_chain(rings: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let mut last: Option<NodeIndex> = None;
    for _ in 0..rings {
        let atoms: Vec<NodeIndex> = (0..6).map(|_| mol.add_atom(Atom::new(6))).collect();
        for i in 0..6 {
            mol.add_bond(atoms[i], atoms[(i + 1) % 6], Bond::single());
        }
        if let Some(prev) = last {
            mol.add_bond(prev, atoms[0], Bond::single());
        }
        last = Some(atoms[3]);
    }
    mol
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    let options = LayoutOptions::default();

    for len in [8usize, 32, 128] {
        let template = alkane(len);
        group.bench_function(format!("longest_{len}"), |b| {
            b.iter(|| black_box(sdgcrab::initial_longest_chain(black_box(&template))))
        });
        group.bench_function(format!("place_{len}"), |b| {
            b.iter(|| {
                let mut mol = template.clone();
                mol.place(NodeIndex::new(0), Point2D::ORIGIN);
                let mut placer = AtomPlacer::new(&mut mol, &options);
                let path = placer.initial_longest_chain();
                placer.place_chain(&path, Point2D::new(1.0, 0.0)).unwrap();
                black_box(mol)
            })
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let decane = alkane(10);
    let rings = ring_chain(8);

    let mut group = c.benchmark_group("rank");
    group.bench_function("decane", |b| b.iter(|| black_box(sdgcrab::rank(black_box(&decane)))));
    group.bench_function("ring_chain_8", |b| {
        b.iter(|| black_box(sdgcrab::rank(black_box(&rings))))
    });
    group.finish();
}

fn bench_templates(c: &mut Criterion) {
    let library = TemplateLibrary::with_default_templates(LayoutOptions::default());
    let single = ring_chain(1);
    let four = ring_chain(4);

    let mut group = c.benchmark_group("templates");
    group.bench_function("map_exact_cyclohexane", |b| {
        b.iter(|| {
            let mut mol = single.clone();
            black_box(library.map_exact(&mut mol))
        })
    });
    group.bench_function("map_substructure_4_rings", |b| {
        b.iter(|| {
            let mut mol = four.clone();
            black_box(library.map_substructure(&mut mol))
        })
    });
    group.bench_function("non_overlapping_4_rings", |b| {
        b.iter(|| black_box(library.find_non_overlapping_substructures(black_box(&four))))
    });
    group.finish();
}

criterion_group!(benches, bench_chain, bench_rank, bench_templates);
criterion_main!(benches);
