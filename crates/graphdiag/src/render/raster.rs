//! PNG, JPG and PDF export of rendered SVG documents.

use graphdiag_core::colors::resolve_color;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    SvgParse(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    PngEncode(String),
    #[error("unrecognized background color: {0}")]
    Background(String),
    #[error("JPG output needs an opaque background, got {0}")]
    TranslucentBackground(String),
    #[error("failed to encode JPG: {0}")]
    JpegEncode(#[from] image::ImageError),
    #[error("failed to convert SVG to PDF: {0}")]
    PdfConvert(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Output pixels per SVG user unit.
    pub scale: f32,
    /// Fill behind the drawing; JPG output defaults to white.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Parses `transparent`, a named color, or `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`.
pub fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
        return Some(tiny_skia::Color::TRANSPARENT);
    }
    let hex = if text.starts_with('#') {
        resolve_color(text)
    } else {
        resolve_color(&format!("#{text}"))
    };
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (r, g, b, a) = match digits.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

fn load_tree(svg: &str) -> Result<usvg::Tree> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();
    Ok(usvg::Tree::from_str(svg, &opt)?)
}

fn rasterize(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let tree = load_tree(svg)?;
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(bg) = background {
        let color = parse_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
        pixmap.fill(color);
    }
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, scale, "rasterized svg");
    Ok(pixmap)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = rasterize(svg, options.scale, options.background.as_deref())?;
    pixmap
        .encode_png()
        .map_err(|err| RasterError::PngEncode(err.to_string()))
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let color = parse_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
    if color.alpha() < 1.0 {
        return Err(RasterError::TranslucentBackground(bg.to_string()));
    }

    let pixmap = rasterize(svg, options.scale, Some(bg))?;
    // Opaque fill means every alpha byte is 255.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality).encode(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt)
        .map_err(|err| RasterError::PdfConvert(err.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|err| RasterError::PdfConvert(format!("{err:?}")))
}
