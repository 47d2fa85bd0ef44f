mod page;
mod scales;


use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use controls::{CoordinateMode, Overrides, PhysicalScaleConfig};

use crate::page::{PageKind, RenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown page `{0}`; run `metoybox pages` to list them")]
    UnknownPage(String),
    #[error("page `{0}` has no scale table")]
    NoTable(String),
    #[error("invalid --set `{0}`; expected <slider>=<value>")]
    InvalidAssignment(String),
    #[error("page has no slider `{0}`")]
    UnknownSlider(String),
    #[error("invalid --starting-coordinates: {0}")]
    InvalidMode(String),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to write output: {0}")]
    Stdout(#[from] io::Error),
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Controls(#[from] controls::Error),
    #[error(transparent)]
    Tree(#[from] controls::TreeError),
    #[error(transparent)]
    Configuration(#[from] controls::ConfigurationError),
}

#[derive(Parser, Debug)]
#[command(name = "metoybox", about = "Render and evaluate scale-analysis pages")]
struct Cli {
    /// JSON file with the physical scale configuration. Only `render` reads
    /// it; calculator pages take their ranges from the page itself.
    #[arg(long, env = "METOYBOX_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available pages.
    Pages,
    /// Render a page's controls and scale table to static HTML.
    Render(RenderArgs),
    /// Evaluate a page's scale table for given slider values.
    Scales(ScalesArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    page: String,

    /// Id of the wrapping container; defaults to the page name.
    #[arg(long, env = "METOYBOX_CONTAINER_ID")]
    container_id: Option<String>,

    #[arg(long, default_value = "non-dimensional")]
    starting_coordinates: String,

    /// JSON file of per-control overrides.
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Output file, or stdout when absent.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScalesArgs {
    #[arg(long)]
    page: String,

    /// Slider value as `<slider>=<value>`; log sliders take the exponent.
    #[arg(long = "set", value_name = "SLIDER=VALUE")]
    assignments: Vec<String>,

    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if ignores_config(&cli) {
        tracing::warn!("--config is only read by `render`; ignoring it");
    }
    let config = match &cli.config {
        Some(path) => read_json::<PhysicalScaleConfig>(path)?,
        None => PhysicalScaleConfig::default(),
    };

    match cli.command {
        Command::Pages => run_pages(),
        Command::Render(args) => run_render(args, config),
        Command::Scales(args) => run_scales(args),
    }
}

/// Whether a configuration was given to a command that does not read it.
fn ignores_config(cli: &Cli) -> bool {
    cli.config.is_some() && !matches!(cli.command, Command::Render(_))
}

fn run_pages() -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    for (name, title) in PageKind::listing() {
        writeln!(stdout, "{name:<16} {title}")?;
    }
    Ok(())
}

fn run_render(args: RenderArgs, config: PhysicalScaleConfig) -> Result<(), CliError> {
    let kind = PageKind::resolve(&args.page)?;
    let starting = args.starting_coordinates.parse::<CoordinateMode>().map_err(CliError::InvalidMode)?;
    let overrides = match &args.overrides {
        Some(path) => read_json::<Overrides>(path)?,
        None => Overrides::new(),
    };
    let options = RenderOptions {
        container_id: args.container_id.unwrap_or_else(|| kind.name().to_owned()),
        starting,
        config,
        overrides,
    };

    let html = page::render(&kind, &options)?;
    match &args.out {
        Some(path) => {
            fs::write(path, html).map_err(|source| CliError::Write { path: path.clone(), source })?;
            tracing::info!(page = kind.name(), path = %path.display(), "page rendered");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{html}")?;
        }
    }
    Ok(())
}

fn run_scales(args: ScalesArgs) -> Result<(), CliError> {
    let PageKind::Calculator(calculator) = PageKind::resolve(&args.page)? else {
        return Err(CliError::NoTable(args.page));
    };
    let assignments = args
        .assignments
        .iter()
        .map(|raw| scales::parse_assignment(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let report = scales::evaluate(calculator, &assignments)?;
    let mut stdout = io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(stdout, "{}", scales::format_report(&report))?;
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    serde_json::from_str(&text).map_err(|source| CliError::InvalidJson { path: path.to_owned(), source })
}
