use super::RandomOptions;
use crate::rng::layout_rng;
use graphdiag_core::GraphModel;
use graphdiag_core::geom::point;
use rand::Rng;

/// Half-width of the square random positions are drawn from.
pub const EXTENT: f64 = 200.0;

pub fn layout(graph: &mut GraphModel, opts: &RandomOptions) {
    let mut rng = layout_rng(opts.seed);
    for node in graph.nodes.values_mut() {
        let x = rng.random_range(-EXTENT..EXTENT);
        let y = rng.random_range(-EXTENT..EXTENT);
        node.position = Some(point(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphdiag_core::parse;

    fn positions(g: &GraphModel) -> Vec<(f64, f64)> {
        g.nodes
            .values()
            .map(|n| n.position.map(|p| (p.x, p.y)).unwrap())
            .collect()
    }

    #[test]
    fn positions_stay_inside_extent() {
        let mut g = parse("A--B\nB--C\nC--D\nD--E");
        layout(&mut g, &RandomOptions::default());
        for (x, y) in positions(&g) {
            assert!((-EXTENT..EXTENT).contains(&x) && (-EXTENT..EXTENT).contains(&y));
        }
    }

    #[test]
    fn unseeded_runs_differ() {
        let mut g = parse("A--B\nB--C");
        layout(&mut g, &RandomOptions::default());
        let first = positions(&g);
        layout(&mut g, &RandomOptions::default());
        assert_ne!(first, positions(&g));
    }

    #[test]
    fn seeded_runs_repeat() {
        let opts = RandomOptions { seed: Some(42) };
        let mut a = parse("A--B\nB--C");
        let mut b = a.clone();
        layout(&mut a, &opts);
        layout(&mut b, &opts);
        assert_eq!(positions(&a), positions(&b));
    }
}
