//! Node icons: fetching, symbol extraction, and placement inside a node circle.

use crate::geometry::Circle;
use async_trait::async_trait;
use futures::future::join_all;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_VIEW_BOX: &str = "0 0 100 100";
/// Icon box side as a share of the node radius, on each side of the center.
pub const ICON_EXTENT: f64 = 0.8;
/// Padding inside the icon box as a share of the node radius.
pub const ICON_PADDING: f64 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("icon not found: {href}")]
    NotFound { href: String },
    #[error("failed to read icon {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch icon {href}: {source}")]
    Http {
        href: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching icon {href} returned HTTP {status}")]
    Status { href: String, status: u16 },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, IconError>;

/// Source of icon markup for node `icon` references.
#[async_trait]
pub trait IconFetcher: Send + Sync {
    async fn fetch(&self, href: &str) -> Result<String>;
}

const BUNDLED: [(&str, &str); 10] = [
    ("icons/person.svg", include_str!("../assets/icons/person.svg")),
    ("icons/group.svg", include_str!("../assets/icons/group.svg")),
    ("icons/tag.svg", include_str!("../assets/icons/tag.svg")),
    ("icons/message.svg", include_str!("../assets/icons/message.svg")),
    ("icons/location.svg", include_str!("../assets/icons/location.svg")),
    ("icons/document.svg", include_str!("../assets/icons/document.svg")),
    ("icons/company.svg", include_str!("../assets/icons/company.svg")),
    ("icons/concept.svg", include_str!("../assets/icons/concept.svg")),
    ("icons/book.svg", include_str!("../assets/icons/book.svg")),
    ("icons/education.svg", include_str!("../assets/icons/education.svg")),
];

/// Markup of a built-in icon, accepting `icons/x.svg`, `./icons/x.svg` and `/icons/x.svg`.
pub fn bundled_icon(href: &str) -> Option<&'static str> {
    let key = href.trim();
    let key = key.strip_prefix("./").unwrap_or(key);
    let key = key.strip_prefix('/').unwrap_or(key);
    BUNDLED
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, svg)| *svg)
}

/// Serves the built-in icons, then files relative to `base_dir`.
#[derive(Debug, Clone, Default)]
pub struct BundledIconFetcher {
    pub base_dir: Option<PathBuf>,
}

impl BundledIconFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn read_local(&self, href: &str) -> Result<String> {
        let path = match &self.base_dir {
            Some(dir) => dir.join(href),
            None if Path::new(href).is_absolute() => PathBuf::from(href),
            None => {
                return Err(IconError::NotFound {
                    href: href.to_string(),
                });
            }
        };
        if !path.is_file() {
            return Err(IconError::NotFound {
                href: href.to_string(),
            });
        }
        std::fs::read_to_string(&path).map_err(|source| IconError::Io { path, source })
    }
}

#[async_trait]
impl IconFetcher for BundledIconFetcher {
    async fn fetch(&self, href: &str) -> Result<String> {
        if let Some(svg) = bundled_icon(href) {
            return Ok(svg.to_string());
        }
        self.read_local(href)
    }
}

/// Fetches `http(s)://` icons over the network and everything else from a bundled fetcher.
#[derive(Debug, Clone)]
pub struct HttpIconFetcher {
    client: reqwest::Client,
    fallback: BundledIconFetcher,
}

impl HttpIconFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(fallback: BundledIconFetcher) -> Result<Self> {
        Self::with_timeout(fallback, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(fallback: BundledIconFetcher, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("graphdiag/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(IconError::Client)?;
        Ok(Self { client, fallback })
    }
}

fn is_remote(href: &str) -> bool {
    url::Url::parse(href).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[async_trait]
impl IconFetcher for HttpIconFetcher {
    async fn fetch(&self, href: &str) -> Result<String> {
        if !is_remote(href) {
            return self.fallback.fetch(href).await;
        }
        let http_err = |source| IconError::Http {
            href: href.to_string(),
            source,
        };
        let response = self.client.get(href).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(IconError::Status {
                href: href.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_err)
    }
}

/// Stable symbol id for an icon reference: a 32-bit string hash over UTF-16 code units.
pub fn symbol_id(href: &str) -> String {
    let mut h: i32 = 0;
    for unit in href.encode_utf16() {
        h = (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    format!("img_{}", h.unsigned_abs())
}

/// Icon markup re-wrapped as a reusable `<symbol>`.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSymbol {
    pub id: String,
    pub view_box: String,
    /// Children of the source `<svg>` element.
    pub content: String,
}

fn svg_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<svg[^>]*>").expect("svg tag regex"))
}

fn attr_re(name: &'static str) -> &'static Regex {
    static VIEW_BOX: OnceLock<Regex> = OnceLock::new();
    static WIDTH: OnceLock<Regex> = OnceLock::new();
    static HEIGHT: OnceLock<Regex> = OnceLock::new();
    match name {
        "viewBox" => VIEW_BOX.get_or_init(|| {
            Regex::new(r#"\sviewBox=["']([^"']+)["']"#).expect("viewBox regex")
        }),
        "width" => WIDTH.get_or_init(|| {
            Regex::new(r#"\swidth=["']?([^"'\s>]+)["']?"#).expect("width regex")
        }),
        _ => HEIGHT.get_or_init(|| {
            Regex::new(r#"\sheight=["']?([^"'\s>]+)["']?"#).expect("height regex")
        }),
    }
}

fn inner_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<svg[^>]*>(.*)</svg>").expect("svg body regex"))
}

/// Leading numeric part of a length such as `24px`.
fn parse_length(raw: &str) -> Option<f64> {
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

impl IconSymbol {
    /// Extracts the view box and children of `svg`.
    ///
    /// The view box comes from the root's `viewBox`, else from its `width`/`height`, else
    /// [`DEFAULT_VIEW_BOX`]. Markup without an `<svg>` root is kept whole.
    pub fn from_svg(svg: &str, id: impl Into<String>) -> Self {
        let mut view_box = DEFAULT_VIEW_BOX.to_string();
        if let Some(tag) = svg_tag_re().find(svg) {
            let tag = tag.as_str();
            let capture = |name| {
                attr_re(name)
                    .captures(tag)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().trim().to_string())
            };
            if let Some(vb) = capture("viewBox") {
                view_box = vb;
            } else if let (Some(w), Some(h)) = (
                capture("width").as_deref().and_then(parse_length),
                capture("height").as_deref().and_then(parse_length),
            ) {
                view_box = format!("0 0 {} {}", crate::util::fmt(w), crate::util::fmt(h));
            }
        }

        let content = inner_re()
            .captures(svg)
            .and_then(|c| c.get(1))
            .map_or(svg, |m| m.as_str())
            .to_string();

        Self {
            id: id.into(),
            view_box,
            content,
        }
    }

    /// Width over height of the view box; 1 when it cannot be read.
    pub fn aspect_ratio(&self) -> f64 {
        let parts: Vec<f64> = self
            .view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        match parts.as_slice() {
            [_, _, w, h] if *w > 0.0 && *h > 0.0 => w / h,
            _ => 1.0,
        }
    }

    pub fn markup(&self) -> String {
        format!(
            r#"<symbol id="{}" viewBox="{}">{}</symbol>"#,
            self.id,
            crate::util::escape_xml(&self.view_box),
            self.content
        )
    }
}

/// Placement of an icon inside a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl IconBox {
    /// Square box centered on the node, inset by the icon padding.
    pub fn square(circle: &Circle) -> Self {
        let half = circle.radius * ICON_EXTENT;
        let pad = circle.radius * ICON_PADDING;
        Self {
            x: circle.center.x - half + pad,
            y: circle.center.y - half + pad,
            width: 2.0 * (half - pad),
            height: 2.0 * (half - pad),
        }
    }

    /// Largest box of the given aspect ratio inside `self`, centered.
    pub fn fit(&self, aspect_ratio: f64) -> Self {
        let (width, height) = if self.width / self.height > aspect_ratio {
            (self.height * aspect_ratio, self.height)
        } else {
            (self.width, self.width / aspect_ratio)
        };
        Self {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Fetches every distinct href once, concurrently, and converts the results into symbols.
///
/// Failures are logged and left out of the map; their nodes fall back to an external image.
pub async fn fetch_symbols<'a>(
    fetcher: &dyn IconFetcher,
    hrefs: impl IntoIterator<Item = &'a str>,
) -> IndexMap<String, IconSymbol> {
    let unique: IndexSet<&str> = hrefs.into_iter().collect();
    let results = join_all(unique.iter().map(|href| fetcher.fetch(href))).await;

    let mut symbols = IndexMap::new();
    for (href, result) in unique.into_iter().zip(results) {
        match result {
            Ok(svg) if !svg.trim().is_empty() => {
                let symbol = IconSymbol::from_svg(&svg, symbol_id(href));
                tracing::debug!(href, id = %symbol.id, "embedded icon");
                symbols.insert(href.to_string(), symbol);
            }
            Ok(_) => tracing::warn!(href, "icon is empty; using external reference"),
            Err(err) => tracing::warn!(href, error = %err, "failed to fetch icon"),
        }
    }
    symbols
}
