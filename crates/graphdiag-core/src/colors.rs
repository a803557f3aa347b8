//! Named colors accepted after `#` in node declarations.

/// Color used for nodes that do not specify one.
pub const DEFAULT_NODE_COLOR: &str = "#666";

const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("green", "#00ff00"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("pink", "#ffc0cb"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("lime", "#00ff00"),
    ("brown", "#a52a2a"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("lightgreen", "#90ee90"),
    ("lightblue", "#add8e6"),
    ("lightred", "#ffcccb"),
];

/// Resolves a `#`-prefixed color token.
///
/// Named colors (`#lightgreen`, `#Red`, ...) map to their hex value; anything else is returned
/// verbatim so raw hex values and unknown names pass through untouched.
pub fn resolve_color(token: &str) -> String {
    let Some(name) = token.strip_prefix('#') else {
        return token.to_string();
    };
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, hex)| (*hex).to_string())
        .unwrap_or_else(|| token.to_string())
}
