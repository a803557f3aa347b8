use crate::*;
use graphdiag_core::geom::point;
use graphdiag_core::parse;
use std::sync::{Arc, Mutex};

fn positions(g: &GraphModel) -> Vec<(f64, f64)> {
    g.nodes
        .values()
        .map(|n| {
            let p = n.position.expect("positioned");
            (p.x, p.y)
        })
        .collect()
}

#[derive(Debug, Default)]
struct RecordingLayout {
    calls: Mutex<Vec<(usize, usize, usize)>>,
    place_at: Option<(f64, f64)>,
}

impl IterativeLayout for RecordingLayout {
    fn name(&self) -> &str {
        "recording"
    }

    fn run(&self, bodies: &mut [Body], springs: &[Spring], iterations: usize) {
        self.calls
            .lock()
            .unwrap()
            .push((bodies.len(), springs.len(), iterations));
        if let Some((x, y)) = self.place_at {
            for b in bodies {
                b.x = x;
                b.y = y;
            }
        }
    }
}

#[test]
fn empty_graph_is_a_no_op_for_every_strategy() {
    for name in ["random", "circular", "simple-force", "force-atlas2"] {
        let mut g = GraphModel::new();
        apply_layout(&mut g, &name.parse().unwrap());
        assert_eq!(g, GraphModel::new(), "{name}");
    }
}

#[test]
fn every_strategy_positions_every_node() {
    let text = "person A\nA->B\nB--C\nC<-D\nD-3-A\nE";
    for name in ["random", "circular", "simple-force", "force-atlas2"] {
        let mut g = parse(text);
        apply_layout(&mut g, &name.parse::<Algorithm>().unwrap().with_seed(Some(5)));
        for (x, y) in positions(&g) {
            assert!(x.is_finite() && y.is_finite(), "{name}");
        }
    }
}

#[test]
fn seeded_force_layouts_are_reproducible() {
    let text = "A->B\nB->C\nC->A\nC->D";
    for name in ["simple-force", "force-atlas2"] {
        let algorithm = name.parse::<Algorithm>().unwrap().with_seed(Some(11));
        let mut a = parse(text);
        let mut b = parse(text);
        apply_layout(&mut a, &algorithm);
        apply_layout(&mut b, &algorithm);
        assert_eq!(positions(&a), positions(&b), "{name}");
    }
}

#[test]
fn random_layout_twice_differs() {
    let mut g = parse("A--B\nB--C\nC--D");
    let random: Algorithm = "random".parse().unwrap();
    apply_layout(&mut g, &random);
    let first = positions(&g);
    apply_layout(&mut g, &random);
    assert_ne!(first, positions(&g));
}

#[test]
fn delegated_strategy_seeds_then_hands_off() {
    let stub = Arc::new(RecordingLayout::default());
    let algorithm = Algorithm::Delegated(DelegatedOptions {
        collaborator: Some(stub.clone() as Arc<dyn IterativeLayout>),
        iterations: 7,
        seed: Some(3),
    });

    let mut g = parse("A->B\nB->C\nA->A");
    g.nodes["A"].position = Some(point(400.0, 400.0));
    apply_layout(&mut g, &algorithm);

    assert_eq!(*stub.calls.lock().unwrap(), vec![(3, 2, 7)]);
    // The stub moves nothing, so the output is exactly the seeded input.
    assert_eq!(g.nodes["A"].position, Some(point(400.0, 400.0)));
    for id in ["B", "C"] {
        let p = g.nodes[id].position.unwrap();
        assert!(p.x.abs() < 100.0 && p.y.abs() < 100.0, "{id}: {p:?}");
    }
}

#[test]
fn missing_collaborator_falls_back_to_simple_force() {
    let text = "A->B\nB->C\nC->D";
    let mut delegated = parse(text);
    apply_layout(
        &mut delegated,
        &Algorithm::Delegated(DelegatedOptions {
            collaborator: None,
            iterations: DEFAULT_ITERATIONS,
            seed: Some(21),
        }),
    );

    let mut simple = parse(text);
    apply_layout(&mut simple, &Algorithm::default().with_seed(Some(21)));
    assert_eq!(positions(&delegated), positions(&simple));
}

#[test]
fn non_finite_collaborator_output_is_reset() {
    let stub = Arc::new(RecordingLayout {
        place_at: Some((f64::NAN, f64::INFINITY)),
        ..Default::default()
    });
    let mut g = parse("A--B");
    apply_layout(
        &mut g,
        &Algorithm::Delegated(DelegatedOptions {
            collaborator: Some(stub as Arc<dyn IterativeLayout>),
            ..Default::default()
        }),
    );
    assert_eq!(positions(&g), vec![(0.0, 0.0), (0.0, 0.0)]);
}

#[test]
fn circular_layout_ignores_previous_positions() {
    let mut g = parse("A--B\nB--C\nC--D");
    apply_layout(&mut g, &"random".parse().unwrap());
    apply_layout(&mut g, &Algorithm::Circular);
    let first = g.nodes["A"].position.unwrap();
    assert!((first.x - 80.0).abs() < 1e-9 && first.y.abs() < 1e-9);
}
