#![forbid(unsafe_code)]

//! Headless SVG rendering for laid-out graphdiag models.
//!
//! Edges are filled shapes (quads, ribbons and arrowhead triangles) clipped to their node
//! circles. Icons are fetched through an [`IconFetcher`] and embedded once as `<symbol>`s.

pub mod bounds;
pub mod edges;
pub mod geometry;
pub mod icons;
pub mod label;
pub mod options;
pub mod path;
pub mod scene;
pub mod svg;
mod util;

pub use icons::{BundledIconFetcher, HttpIconFetcher, IconError, IconFetcher, IconSymbol};
pub use options::{EdgeStyle, LabelOptions, RenderOptions};
pub use path::optimize_path;
pub use scene::Scene;

use graphdiag_core::GraphModel;

/// Renders `graph` (whose nodes should already carry positions) as an SVG document.
///
/// Rendering never fails: icons that cannot be fetched are logged and referenced externally.
pub async fn render_svg(
    graph: &GraphModel,
    options: &RenderOptions,
    fetcher: &dyn IconFetcher,
) -> String {
    let scene = Scene::build(graph, options);
    let symbols = if options.embed_icons {
        icons::fetch_symbols(fetcher, scene.nodes.iter().filter_map(|n| n.icon.as_deref())).await
    } else {
        Default::default()
    };
    tracing::debug!(
        nodes = scene.nodes.len(),
        edges = scene.edges.len(),
        symbols = symbols.len(),
        scale = scene.scale,
        "rendering svg"
    );
    svg::write_document(&graph.title, &scene, &symbols, options)
}

/// Blocking form of [`render_svg`] for fetchers that do not need an async runtime.
pub fn render_svg_sync(
    graph: &GraphModel,
    options: &RenderOptions,
    fetcher: &dyn IconFetcher,
) -> String {
    futures::executor::block_on(render_svg(graph, options, fetcher))
}

#[cfg(test)]
mod tests;
