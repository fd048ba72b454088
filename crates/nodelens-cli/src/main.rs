use nodelens::camera::{InMemoryZoomCache, ViewClock};
use nodelens::layout::{GraphNode, GraphNodes, LayoutOptions, graph_nodes};
use nodelens::{CameraTransform, ChartConfig, ChartError, NodesChart, Viewport, ZoomLimits};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(nodelens::Error),
    Chart(ChartError),
    Input(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Input(msg) => write!(f, "invalid graph input: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<nodelens::Error> for CliError {
    fn from(value: nodelens::Error) -> Self {
        Self::Config(value)
    }
}

impl From<ChartError> for CliError {
    fn from(value: ChartError) -> Self {
        Self::Chart(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Focus,
    ZoomLimits,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    select: Option<String>,
    panel: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoomOut {
    limits: Option<ZoomLimits>,
    default_transform: CameraTransform,
}

fn usage() -> &'static str {
    "nodelens-cli\n\
\n\
USAGE:\n\
  nodelens-cli [layout] [--pretty] [--width <w>] [--height <h>] [--config <path>] [<path>|-]\n\
  nodelens-cli focus --select <node-id> [--panel] [--pretty] [--width <w>] [--height <h>] [--config <path>] [<path>|-]\n\
  nodelens-cli zoom-limits [--pretty] [--width <w>] [--height <h>] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON array of nodes ({\"id\", \"adjacency\"}) or an object keyed by node id.\n\
  - focus prints the frame with <node-id> centered and its neighbors on a circle around it.\n\
  - --panel reserves room for an open details panel.\n\
  - --config merges a partial chart config JSON onto the defaults.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Layout,
        width: 800.0,
        height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "focus" => args.command = Command::Focus,
            "zoom-limits" => args.command = Command::ZoomLimits,
            "--pretty" => args.pretty = true,
            "--panel" => args.panel = true,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = parse_extent(w)?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = parse_extent(h)?;
            }
            "--select" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select = Some(id.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Focus) && args.select.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn parse_extent(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
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
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Accepts `[{"id": ..}, ..]` or `{"<id>": {..}, ..}`; in the keyed form `id` may be omitted.
fn parse_graph(text: &str) -> Result<GraphNodes, CliError> {
    let value: Value = serde_json::from_str(text)?;
    let nodes = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<GraphNode>)
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(map) => map
            .into_iter()
            .map(|(id, mut node)| {
                if let Value::Object(fields) = &mut node {
                    fields.entry("id").or_insert(Value::String(id));
                }
                serde_json::from_value::<GraphNode>(node)
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(CliError::Input(format!(
                "expected a JSON array or object, got {other}"
            )));
        }
    };
    Ok(graph_nodes(nodes))
}

fn load_config(path: Option<&str>) -> Result<ChartConfig, CliError> {
    match path {
        None => Ok(ChartConfig::default()),
        Some(path) => Ok(ChartConfig::from_json(&std::fs::read_to_string(path)?)?),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;
    let nodes = parse_graph(&text)?;

    let mut chart = NodesChart::new(
        config,
        Viewport::new(args.width, args.height),
        InMemoryZoomCache::new(),
        ViewClock::new(),
    );
    chart.update_graph(nodes, LayoutOptions::default())?;

    match args.command {
        Command::Layout => write_json(chart.full_layout(), args.pretty),
        Command::Focus => {
            if let Some(id) = args.select {
                if !chart.full_layout().nodes.contains_key(&id) {
                    tracing::warn!(node = %id, "selected node not in graph; layout unchanged");
                }
                chart.select_node(id);
            }
            chart.set_details_panel_open(args.panel);
            write_json(&chart.frame(), args.pretty)
        }
        Command::ZoomLimits => {
            let out = ZoomOut {
                limits: chart.camera().limits().copied(),
                default_transform: *chart.camera().default_transform(),
            };
            write_json(&out, args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
