use crate::render::{HeadlessError, HeadlessRenderer, RenderOptions, Result};
use graphdiag_layout::Algorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Any name [`Algorithm`] parses (`random`, `circular`, `simple-force`, `force-atlas2`, ...).
    pub algorithm: String,
    pub seed: Option<u64>,
    /// Iteration count for the force strategies.
    pub iterations: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default().name().to_string(),
            seed: None,
            iterations: None,
        }
    }
}

impl LayoutConfig {
    pub fn to_algorithm(&self) -> graphdiag_layout::Result<Algorithm> {
        let mut algorithm = self.algorithm.parse::<Algorithm>()?.with_seed(self.seed);
        if let Some(iterations) = self.iterations {
            algorithm = algorithm.with_iterations(iterations);
        }
        Ok(algorithm)
    }
}

/// Settings file shared by the CLI and embedders.
///
/// ```json
/// { "layout": { "algorithm": "force-atlas2", "seed": 7 }, "render": { "edgeStyle": "curved" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderOptions,
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HeadlessError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), algorithm = %config.layout.algorithm, "loaded config");
        Ok(config)
    }

    pub fn renderer(&self) -> Result<HeadlessRenderer> {
        Ok(HeadlessRenderer {
            layout: self.layout.to_algorithm()?,
            render: self.render.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EdgeStyle;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout.algorithm, "simple-force");
        assert_eq!(config.render.padding, 20.0);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = Config::from_json_str(
            r#"{"layout": {"algorithm": "fa2", "seed": 7, "iterations": 10},
                "render": {"edgeStyle": "curved", "background": "white"}}"#,
        )
        .unwrap();
        let renderer = config.renderer().unwrap();
        let graphdiag_layout::Algorithm::Delegated(opts) = renderer.layout else {
            panic!("expected delegated layout");
        };
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.iterations, 10);
        assert_eq!(renderer.render.edge_style, EdgeStyle::Curved);
        assert!(renderer.render.has_background());
        assert!(renderer.render.embed_icons);
    }

    #[test]
    fn unknown_algorithm_is_a_layout_error() {
        let config = Config::from_json_str(r#"{"layout": {"algorithm": "spiral"}}"#).unwrap();
        assert!(matches!(config.renderer(), Err(HeadlessError::Layout(_))));
    }

    #[test]
    fn load_reports_io_and_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphdiag.json");
        assert!(matches!(Config::load(&path), Err(HeadlessError::ConfigIo { .. })));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(HeadlessError::Config(_))));

        std::fs::write(&path, r#"{"layout": {"algorithm": "circular"}}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.layout.algorithm, "circular");
    }
}
