use graphdiag::render::raster::{self, RasterOptions};
use graphdiag::render::{BundledIconFetcher, EdgeStyle, HttpIconFetcher, IconError, IconFetcher};
use graphdiag::{Config, GraphModel, HeadlessError, HeadlessRenderer, title_to_filename};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

mod debounce;
mod watch;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Headless(HeadlessError),
    Raster(raster::RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<IconError> for CliError {
    fn from(value: IconError) -> Self {
        Self::Headless(value.into())
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Parse,
    Layout,
    Render,
    Watch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
            RenderFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    layout: Option<String>,
    seed: Option<u64>,
    edge_style: Option<EdgeStyle>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    no_icons: bool,
    no_optimize: bool,
    icon_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    out: Option<String>,
    debounce: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Parse,
            input: None,
            pretty: false,
            verbose: false,
            layout: None,
            seed: None,
            edge_style: None,
            render_format: RenderFormat::Svg,
            render_scale: 1.0,
            background: None,
            no_icons: false,
            no_optimize: false,
            icon_dir: None,
            config: None,
            out: None,
            debounce: debounce::DEFAULT_DELAY,
        }
    }
}

fn usage() -> &'static str {
    "graphdiag-cli\n\
\n\
USAGE:\n\
  graphdiag-cli [parse] [--pretty] [<path>|-]\n\
  graphdiag-cli layout [--layout <name>] [--seed <n>] [--config <json>] [--pretty] [<path>|-]\n\
  graphdiag-cli render [--layout <name>] [--seed <n>] [--edge-style straight|curved] [--format svg|png|jpg|pdf] [--scale <n>] [--background <color>] [--no-icons] [--no-optimize] [--icon-dir <dir>] [--config <json>] [--out <path>] [<path>|-]\n\
  graphdiag-cli watch <path> [--debounce-ms <n>] [render options]\n\
\n\
LAYOUTS:\n\
  random, circular, simple-force (default), force-atlas2\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to a file named after the diagram title in the current directory.\n\
  - watch re-renders after the file stops changing for --debounce-ms (default 3000).\n\
  - --verbose enables debug logging; RUST_LOG overrides the filter.\n\
"
}

fn usage_error(msg: impl std::fmt::Display) -> CliError {
    CliError::Usage(format!("error: {msg}\n\n{}", usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = |flag: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| usage_error(format!("{flag} needs a value")))
        };
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage().to_string())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "watch" => args.command = Command::Watch,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--no-icons" => args.no_icons = true,
            "--no-optimize" => args.no_optimize = true,
            "--layout" => {
                let name = value("--layout")?;
                name.parse::<graphdiag::layout::Algorithm>()
                    .map_err(usage_error)?;
                args.layout = Some(name);
            }
            "--seed" => {
                let seed = value("--seed")?;
                args.seed = Some(
                    seed.parse::<u64>()
                        .map_err(|_| usage_error(format!("invalid seed: {seed}")))?,
                );
            }
            "--edge-style" => {
                let style = value("--edge-style")?;
                args.edge_style = Some(style.parse::<EdgeStyle>().map_err(usage_error)?);
            }
            "--format" => {
                let fmt = value("--format")?;
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| usage_error(format!("unknown format: {fmt}")))?;
            }
            "--scale" => {
                let scale = value("--scale")?;
                args.render_scale = scale
                    .parse::<f32>()
                    .map_err(|_| usage_error(format!("invalid scale: {scale}")))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(usage_error(format!("scale must be positive: {scale}")));
                }
            }
            "--background" => {
                let bg = value("--background")?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--icon-dir" => args.icon_dir = Some(PathBuf::from(value("--icon-dir")?)),
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--out" | "-o" => args.out = Some(value("--out")?),
            "--debounce-ms" => {
                let ms = value("--debounce-ms")?;
                let ms = ms
                    .parse::<u64>()
                    .map_err(|_| usage_error(format!("invalid debounce: {ms}")))?;
                args.debounce = Duration::from_millis(ms);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(usage_error("more than one input given"));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(usage_error("unexpected arguments after input"));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(usage_error(format!("unknown option: {other}")));
            }
            path => {
                if args.input.is_some() {
                    return Err(usage_error("more than one input given"));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command == Command::Watch && matches!(args.input.as_deref(), None | Some("-")) {
        return Err(usage_error("watch needs a file path"));
    }
    Ok(args)
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "graphdiag=debug"
    } else {
        "graphdiag=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Config file first, then command line overrides.
fn build_renderer(args: &Args) -> Result<HeadlessRenderer, CliError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(name) = &args.layout {
        config.layout.algorithm = name.clone();
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }
    if let Some(style) = args.edge_style {
        config.render.edge_style = style;
    }
    if let Some(bg) = &args.background {
        config.render.background = bg.clone();
    }
    if args.no_icons {
        config.render.embed_icons = false;
    }
    if args.no_optimize {
        config.render.optimize = false;
    }
    Ok(config.renderer()?)
}

/// Remote icons over HTTP; everything else from the bundled set or next to the input file.
fn build_fetcher(args: &Args) -> Result<HttpIconFetcher, CliError> {
    let base_dir = args.icon_dir.clone().or_else(|| match args.input.as_deref() {
        Some(path) if path != "-" => Path::new(path).parent().map(Path::to_path_buf),
        _ => None,
    });
    let bundled = match base_dir {
        Some(dir) => BundledIconFetcher::with_base_dir(dir),
        None => BundledIconFetcher::new(),
    };
    Ok(HttpIconFetcher::new(bundled)?)
}

/// Everything `render` and `watch` need to turn diagram text into an output file.
#[derive(Debug)]
struct Exporter {
    renderer: HeadlessRenderer,
    fetcher: HttpIconFetcher,
    format: RenderFormat,
    raster: RasterOptions,
    out: Option<String>,
}

impl Exporter {
    fn new(args: &Args) -> Result<Self, CliError> {
        Ok(Self {
            renderer: build_renderer(args)?,
            fetcher: build_fetcher(args)?,
            format: args.render_format,
            raster: RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            },
            out: args.out.clone(),
        })
    }

    async fn svg(&self, graph: &GraphModel) -> String {
        let fetcher: &dyn IconFetcher = &self.fetcher;
        graphdiag::render::render_svg(graph, &self.renderer.render, fetcher).await
    }

    fn encode(&self, svg: String) -> Result<Vec<u8>, CliError> {
        Ok(match self.format {
            RenderFormat::Svg => svg.into_bytes(),
            RenderFormat::Png => raster::svg_to_png(&svg, &self.raster)?,
            RenderFormat::Jpeg => raster::svg_to_jpeg(&svg, &self.raster)?,
            RenderFormat::Pdf => raster::svg_to_pdf(&svg)?,
        })
    }

    /// Where output goes; `None` means stdout.
    fn out_path(&self, graph: &GraphModel, stdout_for_svg: bool) -> Option<PathBuf> {
        match self.out.as_deref() {
            Some("-") => None,
            Some(path) => Some(PathBuf::from(path)),
            None if stdout_for_svg && self.format == RenderFormat::Svg => None,
            None => Some(PathBuf::from(title_to_filename(
                &graph.title,
                self.format.extension(),
            ))),
        }
    }

    async fn export(&self, text: &str, stdout_for_svg: bool) -> Result<Option<PathBuf>, CliError> {
        let graph = self.renderer.layout(text);
        let bytes = self.encode(self.svg(&graph).await)?;
        let out = self.out_path(&graph, stdout_for_svg);
        match &out {
            Some(path) => {
                std::fs::write(path, &bytes)?;
                tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote diagram");
            }
            None => std::io::stdout().lock().write_all(&bytes)?,
        }
        Ok(out)
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Parse => {
            let text = read_input(args.input.as_deref())?;
            let graph = graphdiag::parse(&text);
            write_json(&graph, args.pretty)
        }
        Command::Layout => {
            let text = read_input(args.input.as_deref())?;
            let graph = build_renderer(&args)?.layout(&text);
            write_json(&graph, args.pretty)
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            Exporter::new(&args)?.export(&text, true).await?;
            Ok(())
        }
        Command::Watch => {
            let path = PathBuf::from(args.input.clone().unwrap_or_default());
            let exporter = Exporter::new(&args)?;
            watch::watch(&path, exporter, args.debounce).await
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::from)
        .and_then(|rt| rt.block_on(run(args)));
    match result {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("graphdiag-cli")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn render_flags_are_collected() {
        let args = parse_args(&argv(&[
            "render",
            "--layout",
            "fa2",
            "--seed",
            "9",
            "--edge-style",
            "curved",
            "--format",
            "jpeg",
            "--scale",
            "2",
            "--no-icons",
            "diagram.graph",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.layout.as_deref(), Some("fa2"));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.edge_style, Some(EdgeStyle::Curved));
        assert_eq!(args.render_format, RenderFormat::Jpeg);
        assert_eq!(args.render_scale, 2.0);
        assert!(args.no_icons);
        assert_eq!(args.input.as_deref(), Some("diagram.graph"));
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        for bad in [
            &["render", "--layout", "spiral"][..],
            &["render", "--scale", "0"],
            &["render", "--format", "gif"],
            &["render", "--seed"],
            &["a.graph", "b.graph"],
            &["--frobnicate"],
            &["watch"],
            &["watch", "-"],
        ] {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("graphdiag.json");
        std::fs::write(
            &config,
            r#"{"layout": {"algorithm": "random", "seed": 1}, "render": {"optimize": false, "edgeStyle": "curved"}}"#,
        )
        .unwrap();
        let config = config.to_string_lossy().to_string();

        let args = parse_args(&argv(&[
            "render",
            "--config",
            config.as_str(),
            "--layout",
            "circular",
            "--edge-style",
            "straight",
        ]))
        .unwrap();
        let renderer = build_renderer(&args).unwrap();
        assert_eq!(renderer.layout.name(), "circular");
        assert_eq!(renderer.render.edge_style, EdgeStyle::Straight);
        assert!(!renderer.render.optimize);
    }

    #[test]
    fn raster_output_defaults_to_the_title() {
        let args = parse_args(&argv(&["render", "--format", "png"])).unwrap();
        let exporter = Exporter::new(&args).unwrap();
        let graph = graphdiag::parse("graphDiagram My Team\nA->B");
        assert_eq!(
            exporter.out_path(&graph, true),
            Some(PathBuf::from("my-team.png"))
        );

        let args = parse_args(&argv(&["render"])).unwrap();
        let exporter = Exporter::new(&args).unwrap();
        assert_eq!(exporter.out_path(&graph, true), None);
        assert_eq!(
            exporter.out_path(&graph, false),
            Some(PathBuf::from("my-team.svg"))
        );
    }
}
