use graphdiag_core::GraphModel;
use graphdiag_core::geom::point;
use rand::Rng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

/// Half-width of the square that unset positions are seeded in before a force simulation.
pub const SEED_EXTENT: f64 = 100.0;

/// A simulated node: a point mass the iterative strategies push around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    /// Fixed bodies still exert forces but are never moved.
    pub fixed: bool,
}

/// An edge between two bodies (indices into the body slice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Index-based view of a [`GraphModel`] for the simulation loops.
#[derive(Debug, Clone)]
pub struct SimGraph {
    ids: Vec<String>,
    pub bodies: Vec<Body>,
    pub springs: Vec<Spring>,
}

impl SimGraph {
    /// Nodes without a position start at the origin; call [`seed_missing_positions`] first.
    pub fn from_model(graph: &GraphModel) -> Self {
        let mut ids = Vec::with_capacity(graph.nodes.len());
        let mut bodies = Vec::with_capacity(graph.nodes.len());
        let mut id_to_idx: FxHashMap<&str, usize> = FxHashMap::default();
        id_to_idx.reserve(graph.nodes.len());

        for (idx, (id, node)) in graph.nodes.iter().enumerate() {
            let (x, y) = node.position.map_or((0.0, 0.0), |p| (p.x, p.y));
            ids.push(id.clone());
            bodies.push(Body { x, y, fixed: false });
            id_to_idx.insert(id.as_str(), idx);
        }

        let mut springs = Vec::with_capacity(graph.edges.len());
        for e in &graph.edges {
            let Some(&a) = id_to_idx.get(e.source.as_str()) else {
                continue;
            };
            let Some(&b) = id_to_idx.get(e.target.as_str()) else {
                continue;
            };
            if a == b {
                continue;
            }
            springs.push(Spring {
                a,
                b,
                weight: e.weight,
            });
        }

        Self {
            ids,
            bodies,
            springs,
        }
    }

    pub fn write_back(&self, graph: &mut GraphModel) {
        for (id, body) in self.ids.iter().zip(&self.bodies) {
            if let Some(node) = graph.nodes.get_mut(id) {
                node.position = Some(point(body.x, body.y));
            }
        }
    }
}

/// Gives every node without a position a uniform random one in `[-100, 100)²`.
pub fn seed_missing_positions(graph: &mut GraphModel, rng: &mut StdRng) {
    for node in graph.nodes.values_mut() {
        if node.position.is_none() {
            let x = rng.random_range(-SEED_EXTENT..SEED_EXTENT);
            let y = rng.random_range(-SEED_EXTENT..SEED_EXTENT);
            node.position = Some(point(x, y));
        }
    }
}

/// Resets non-finite coordinates to the origin. Returns how many nodes were touched.
pub fn sanitize_positions(graph: &mut GraphModel) -> usize {
    let mut fixed = 0;
    for node in graph.nodes.values_mut() {
        if let Some(p) = node.position {
            if !(p.x.is_finite() && p.y.is_finite()) {
                node.position = Some(point(0.0, 0.0));
                fixed += 1;
            }
        }
    }
    fixed
}
