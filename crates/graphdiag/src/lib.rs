#![forbid(unsafe_code)]

//! `graphdiag` parses the graphDiagram language, lays the graph out, and renders it to SVG.
//!
//! ```text
//! graphDiagram Demo
//! person Alice 25 #lightgreen
//! node Bob 12 #lightblue
//! Alice->Bob: Hi
//! ```
//!
//! [`HeadlessRenderer`] bundles a layout strategy and render options for that pipeline.
//!
//! # Features
//!
//! - `raster`: PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use graphdiag_core::*;

pub mod canvas;
pub mod config;

pub use canvas::{EdgeAttributes, GraphCanvas, NodeAttributes, sync_canvas};
pub use config::{Config, LayoutConfig};
pub use render::{HeadlessError, HeadlessRenderer};

pub mod layout {
    pub use graphdiag_layout::*;
}

pub mod render {
    pub use graphdiag_render::{
        BundledIconFetcher, EdgeStyle, HttpIconFetcher, IconError, IconFetcher, LabelOptions,
        RenderOptions, optimize_path, render_svg, render_svg_sync,
    };

    #[cfg(feature = "raster")]
    pub mod raster;

    use graphdiag_core::GraphModel;
    use graphdiag_layout::{Algorithm, apply_layout};
    use std::path::PathBuf;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Layout(#[from] graphdiag_layout::Error),
        #[error(transparent)]
        Icons(#[from] IconError),
        #[error("failed to read config {}: {source}", path.display())]
        ConfigIo {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("invalid config: {0}")]
        Config(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// A layout strategy plus render options, applied to diagram text in one call.
    ///
    /// Parsing, layout and rendering are total, so none of the pipeline methods fail; only
    /// building a renderer from a config can.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub layout: Algorithm,
        pub render: RenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_layout(mut self, layout: Algorithm) -> Self {
            self.layout = layout;
            self
        }

        pub fn with_render_options(mut self, render: RenderOptions) -> Self {
            self.render = render;
            self
        }

        pub fn parse(&self, text: &str) -> GraphModel {
            graphdiag_core::parse(text)
        }

        /// Parses `text` and positions every node.
        pub fn layout(&self, text: &str) -> GraphModel {
            let mut graph = self.parse(text);
            apply_layout(&mut graph, &self.layout);
            graph
        }

        pub async fn render_svg(&self, text: &str, fetcher: &dyn IconFetcher) -> String {
            let graph = self.layout(text);
            graphdiag_render::render_svg(&graph, &self.render, fetcher).await
        }

        /// Renders with the bundled icons only; no runtime or network is needed.
        pub fn render_svg_sync(&self, text: &str) -> String {
            let graph = self.layout(text);
            graphdiag_render::render_svg_sync(&graph, &self.render, &BundledIconFetcher::new())
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg_sync(text), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg_sync(text), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, text: &str) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg_sync(text))
        }
    }
}

/// File name for an exported diagram: the lowercased title with everything but
/// `[a-z0-9 _-]` removed and whitespace runs turned into single dashes.
///
/// An empty result falls back to `graph`; `extension` gains a leading dot when it lacks one.
pub fn title_to_filename(title: &str, extension: &str) -> String {
    let lower = title.trim().to_lowercase();
    let kept: String = lower
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '_' || *c == '-'
        })
        .collect();

    let mut stem = String::with_capacity(kept.len());
    for ch in kept.chars() {
        let ch = if ch.is_whitespace() { '-' } else { ch };
        if ch == '-' && stem.ends_with('-') {
            continue;
        }
        stem.push(ch);
    }
    if stem.is_empty() {
        stem.push_str("graph");
    }

    if extension.starts_with('.') {
        format!("{stem}{extension}")
    } else {
        format!("{stem}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(title_to_filename("  My Graph!  ", "svg"), "my-graph.svg");
        assert_eq!(title_to_filename("a  --  b", ".png"), "a-b.png");
        assert_eq!(title_to_filename("snake_case 2", "pdf"), "snake_case-2.pdf");
        assert_eq!(title_to_filename("Graph Diagram", "svg"), "graph-diagram.svg");
        assert_eq!(title_to_filename("日本", "svg"), "graph.svg");
        assert_eq!(title_to_filename("", "jpg"), "graph.jpg");
    }

    #[test]
    fn renderer_runs_the_whole_pipeline() {
        let renderer = HeadlessRenderer::new().with_layout(layout::Algorithm::Circular);
        let graph = renderer.layout("A->B\nB->C");
        assert!(graph.nodes.values().all(|n| n.position.is_some()));

        let svg = renderer.render_svg_sync("graphDiagram Demo\nperson Alice 25\nAlice->Bob: Hi");
        let doc = roxmltree::Document::parse(&svg).unwrap();
        let nodes = doc
            .descendants()
            .filter(|n| n.attribute("class") == Some("node"))
            .count();
        assert_eq!(nodes, 2);
        assert!(svg.contains("<title>Demo</title>"));
    }

    #[test]
    fn async_render_matches_sync_with_bundled_icons() {
        let renderer = HeadlessRenderer::new().with_layout(layout::Algorithm::Circular);
        let text = "tag T\nbook B\nT--B";
        let fetcher = render::BundledIconFetcher::new();
        let async_svg = futures::executor::block_on(renderer.render_svg(text, &fetcher));
        assert_eq!(async_svg, renderer.render_svg_sync(text));
    }
}
