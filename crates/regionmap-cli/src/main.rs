use regionmap::{ColumnMap, CompileError, Dataset, MapConfig, Outcome};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Config { path: String, message: String },
    Json(serde_json::Error),
    Compile(CompileError),
    MissingColumns(Vec<String>),
    ErrorDocument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Config { path, message } => write!(f, "invalid config {path}: {message}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Compile(err) => write!(f, "{err}"),
            CliError::MissingColumns(missing) => {
                write!(f, "Missing columns: {}", missing.join(", "))
            }
            CliError::ErrorDocument(msg) => write!(f, "wrote error document: {msg}"),
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

impl From<CompileError> for CliError {
    fn from(value: CompileError) -> Self {
        Self::Compile(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    image: Option<String>,
    table: Option<String>,
    previews: Option<String>,
    config: Option<String>,
    embed_height: Option<u32>,
    scrolling: bool,
    title: Option<String>,
    out: Option<String>,
    pretty: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    headers: &'a [String],
    missing: &'a [String],
    rows: usize,
}

const DEFAULT_IMAGE: &str = "image1.jpg";
const DEFAULT_TABLE: &str = "spaces.csv";

fn usage() -> &'static str {
    "regionmap-cli\n\
\n\
USAGE:\n\
  regionmap-cli [render] [--image <path>] [--table <path>] [--previews <dir>] [--config <path>] [--embed-height <px>] [--scrolling] [--title <text>] [--out <path>]\n\
  regionmap-cli check [--table <path>] [--config <path>] [--pretty]\n\
\n\
NOTES:\n\
  - --image defaults to ./image1.jpg and --table to ./spaces.csv.\n\
  - render prints HTML to stdout by default; use --out to write a file.\n\
  - Preview images are looked up next to the table unless --previews (or the config) names a directory.\n\
  - --config reads a JSON MapConfig; flags given on the command line override it.\n\
  - render exits with 4 when the inputs could not be compiled; the error document is still written.\n\
  - check prints the normalized headers and missing fields as JSON; it exits with 3 if fields are missing.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "check" => args.command = Command::Check,
            "--scrolling" => args.scrolling = true,
            "--pretty" => args.pretty = true,
            "--image" | "--table" | "--previews" | "--config" | "--title" | "--out" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let slot = match a.as_str() {
                    "--image" => &mut args.image,
                    "--table" => &mut args.table,
                    "--previews" => &mut args.previews,
                    "--config" => &mut args.config,
                    "--title" => &mut args.title,
                    _ => &mut args.out,
                };
                *slot = Some(value.clone());
            }
            "--embed-height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let h = h.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
                if h == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.embed_height = Some(h);
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn load_config(args: &Args) -> Result<MapConfig, CliError> {
    let mut config = match args.config.as_deref() {
        None => MapConfig::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|err| CliError::Config {
                path: path.to_string(),
                message: err.to_string(),
            })?;
            MapConfig::from_json_str(&text).map_err(|err| CliError::Config {
                path: path.to_string(),
                message: err.to_string(),
            })?
        }
    };

    if let Some(dir) = &args.previews {
        config.preview_dir = Some(PathBuf::from(dir));
    }
    if let Some(h) = args.embed_height {
        config.embed_height = h;
    }
    if args.scrolling {
        config.scrolling = true;
    }
    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    Ok(config)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            use std::io::Write;
            std::io::stdout().lock().write_all(text.as_bytes())?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(path, "wrote document");
            Ok(())
        }
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

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let table = PathBuf::from(args.table.as_deref().unwrap_or(DEFAULT_TABLE));

    match args.command {
        Command::Check => {
            let dataset = Dataset::load(&table)?;
            let missing = match ColumnMap::resolve(&dataset.headers, &config.description_fields) {
                Ok(_) => Vec::new(),
                Err(err) => err.missing,
            };
            let report = CheckReport {
                headers: &dataset.headers,
                missing: &missing,
                rows: dataset.len(),
            };
            write_json(&report, args.pretty)?;
            if missing.is_empty() {
                Ok(())
            } else {
                Err(CliError::MissingColumns(missing))
            }
        }
        Command::Render => {
            let image = PathBuf::from(args.image.as_deref().unwrap_or(DEFAULT_IMAGE));
            let doc = regionmap::compile(&image, &table, &config);
            write_text(&doc.html, args.out.as_deref())?;
            match doc.outcome {
                Outcome::Map { regions } => {
                    tracing::info!(regions, "compiled map");
                    Ok(())
                }
                Outcome::Error(err) => Err(CliError::ErrorDocument(err.to_string())),
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "regionmap=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
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

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::MissingColumns(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err @ CliError::ErrorDocument(_)) => {
            eprintln!("{err}");
            std::process::exit(4);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
