#![forbid(unsafe_code)]

//! Headless layout strategies for graphdiag models.
//!
//! [`apply_layout`] writes a position into every node of a [`GraphModel`]. Strategies are
//! selected through [`Algorithm`], which also parses from the names the CLI accepts
//! (`random`, `circular`, `simple-force`, `force-atlas2`).

pub mod algo;
pub mod error;
pub mod graph;
mod rng;

pub use algo::{
    Algorithm, DEFAULT_ITERATIONS, DelegatedOptions, ForceAtlas2, ForceAtlas2Settings,
    IterativeLayout, RandomOptions, SimpleForce, SimpleForceOptions,
};
pub use error::{Error, Result};
pub use graph::{Body, SimGraph, Spring};

use graphdiag_core::GraphModel;

/// Assigns positions to every node of `graph` in place.
///
/// Never fails: an empty graph is left untouched, and any non-finite coordinate a strategy
/// produces is reset to the origin.
pub fn apply_layout(graph: &mut GraphModel, algorithm: &Algorithm) {
    if graph.nodes.is_empty() {
        return;
    }
    tracing::debug!(
        algorithm = algorithm.name(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "applying layout"
    );

    match algorithm {
        Algorithm::Random(opts) => algo::random::layout(graph, opts),
        Algorithm::Circular => algo::circular::layout(graph),
        Algorithm::SimpleForce(opts) => {
            run_iterative(graph, &opts.physics, opts.iterations, opts.seed);
        }
        Algorithm::Delegated(opts) => match &opts.collaborator {
            Some(collaborator) => {
                run_iterative(graph, collaborator.as_ref(), opts.iterations, opts.seed);
            }
            None => {
                tracing::debug!("no layout collaborator available, falling back to simple-force");
                run_iterative(graph, &SimpleForce::default(), opts.iterations, opts.seed);
            }
        },
    }

    let reset = graph::sanitize_positions(graph);
    if reset > 0 {
        tracing::debug!(reset, "non-finite positions reset to origin");
    }
}

fn run_iterative(
    graph: &mut GraphModel,
    physics: &dyn IterativeLayout,
    iterations: usize,
    seed: Option<u64>,
) {
    let mut rng = rng::layout_rng(seed);
    graph::seed_missing_positions(graph, &mut rng);

    let mut sim = SimGraph::from_model(graph);
    physics.run(&mut sim.bodies, &sim.springs, iterations);
    sim.write_back(graph);
}

#[cfg(test)]
mod tests;
