use serde::{Deserialize, Serialize};

/// How edges without parallel siblings are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Each edge keeps its own kind.
    #[default]
    Straight,
    /// Straight kinds are promoted to their curved counterparts.
    Curved,
}

impl std::str::FromStr for EdgeStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" | "line" => Ok(EdgeStyle::Straight),
            "curved" | "curve" => Ok(EdgeStyle::Curved),
            other => Err(format!(
                "unknown edge style: {other} (expected straight or curved)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Root `width` attribute; `None` uses the computed viewBox width.
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Space added around the drawing on every side.
    pub padding: f64,
    /// `"transparent"` omits the background rectangle.
    pub background: String,
    pub embed_icons: bool,
    /// Emit relative, one-decimal path data instead of full-precision absolute commands.
    pub optimize: bool,
    pub edge_style: EdgeStyle,
    pub edge_color: String,
    pub node_label_color: String,
    /// Fill for nodes whose color is empty.
    pub default_node_color: String,
    pub font_family: String,
    pub labels: LabelOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: Some(800.0),
            height: Some(600.0),
            padding: 20.0,
            background: "transparent".to_string(),
            embed_icons: true,
            optimize: true,
            edge_style: EdgeStyle::Straight,
            edge_color: "currentColor".to_string(),
            node_label_color: "black".to_string(),
            default_node_color: "#cccccc".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            labels: LabelOptions::default(),
        }
    }
}

impl RenderOptions {
    pub fn has_background(&self) -> bool {
        let bg = self.background.trim();
        !bg.is_empty() && !bg.eq_ignore_ascii_case("transparent")
    }
}

/// Font fitting and legibility rules shared by edge and node labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelOptions {
    pub min_font_size: f64,
    pub max_edge_font_size: f64,
    pub max_node_font_size: f64,
    /// Labels whose on-screen font size would fall below this many pixels are dropped.
    pub hide_below: f64,
    /// Share of the available box a label may fill.
    pub fill_ratio: f64,
    pub char_width_factor: f64,
    /// Render size the viewBox is assumed to be displayed at.
    pub reference_width: f64,
    pub reference_height: f64,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            min_font_size: 4.0,
            max_edge_font_size: 12.0,
            max_node_font_size: 16.0,
            hide_below: 3.0,
            fill_ratio: 0.8,
            char_width_factor: 0.6,
            reference_width: 800.0,
            reference_height: 600.0,
        }
    }
}
