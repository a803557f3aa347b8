use graphdiag_core::GraphModel;
use graphdiag_core::geom::point;
use std::f64::consts::PI;

pub const MIN_RADIUS: f64 = 80.0;
pub const RADIUS_PER_NODE: f64 = 20.0;

pub fn radius(count: usize) -> f64 {
    MIN_RADIUS.max(count as f64 * RADIUS_PER_NODE)
}

pub fn layout(graph: &mut GraphModel) {
    let count = graph.nodes.len();
    if count == 0 {
        return;
    }
    let r = radius(count);
    let step = 2.0 * PI / count as f64;
    for (i, node) in graph.nodes.values_mut().enumerate() {
        let angle = i as f64 * step;
        node.position = Some(point(angle.cos() * r, angle.sin() * r));
    }
}
