mod document;

use document::{LayoutDocument, PlanOut};
use gutter::SolveOptions;
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Solve(gutter::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Solve(err) => write!(f, "{err}"),
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

impl From<gutter::Error> for CliError {
    fn from(value: gutter::Error) -> Self {
        Self::Solve(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Fit,
    Plan,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    pretty: bool,
    margin: Option<f64>,
    page_width: Option<f64>,
    page_height: Option<f64>,
    log: Option<String>,
}

fn usage() -> &'static str {
    "gutter-cli\n\
\n\
USAGE:\n\
  gutter-cli [fit] [--margin <m>] [--page-width <w>] [--page-height <h>] [--out <path>] [--pretty] [--log <filter>] [<path>|-]\n\
  gutter-cli plan [--margin <m>] [--page-width <w>] [--page-height <h>] [--out <path>] [--pretty] [--log <filter>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the layout document is read from stdin.\n\
  - fit prints the document with every image area re-fitted.\n\
  - plan prints the current and re-fitted geometry of every image area.\n\
  - Output goes to stdout unless --out names a file.\n\
  - Page size and margin come from the flags, then the document, then 5800x2900 with margin 100.\n\
  - --log takes a tracing filter (e.g. debug, gutter=trace); RUST_LOG is used otherwise.\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "fit" => args.command = Command::Fit,
            "plan" => args.command = Command::Plan,
            "--pretty" => args.pretty = true,
            "--margin" => args.margin = Some(parse_f64(it.next())?),
            "--page-width" => args.page_width = Some(parse_f64(it.next())?),
            "--page-height" => args.page_height = Some(parse_f64(it.next())?),
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--log" => {
                let Some(filter) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.log = Some(filter.clone());
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

    Ok(args)
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
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

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// Flags win over the document, which wins over the built-in defaults.
fn resolve_options(args: &Args, doc: &LayoutDocument) -> SolveOptions {
    let base = doc.solve_options(SolveOptions::default());
    SolveOptions {
        page_height: args.page_height.unwrap_or(base.page_height),
        page_width: args.page_width.unwrap_or(base.page_width),
        margin: args.margin.unwrap_or(base.margin),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut doc: LayoutDocument = serde_json::from_str(&text)?;
    let options = resolve_options(&args, &doc);
    tracing::info!(
        page_height = options.page_height,
        page_width = options.page_width,
        margin = options.margin,
        "re-fitting image areas"
    );

    let layout = doc.image_layout();
    let solution = gutter::solve_layout(&layout, &options)?;

    match args.command {
        Command::Plan => {
            let plan = PlanOut::new(&layout, &solution, &options);
            write_text(&to_json(&plan, args.pretty)?, args.out.as_deref())
        }
        Command::Fit => {
            let report = gutter::apply_solution(&layout, &solution, &mut doc)?;
            tracing::info!(
                written = report.written,
                skipped = report.skipped,
                "image areas updated"
            );
            write_text(&to_json(&doc, args.pretty)?, args.out.as_deref())
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

    init_tracing(args.log.as_deref());

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, parse_args, resolve_options};
    use crate::document::LayoutDocument;
    use serde_json::json;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("gutter-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn flags_override_document_values() {
        let args = parse_args(&argv(&["plan", "--margin", "40", "in.json"])).unwrap();
        assert!(matches!(args.command, Command::Plan));
        assert_eq!(args.input.as_deref(), Some("in.json"));

        let doc: LayoutDocument =
            serde_json::from_value(json!({ "margin": 10, "page_width": 1000, "pages": [] }))
                .unwrap();
        let opts = resolve_options(&args, &doc);
        assert_eq!(opts.margin, 40.0);
        assert_eq!(opts.page_width, 1000.0);
        assert_eq!(opts.page_height, 2900.0);
    }

    #[test]
    fn malformed_arguments_are_usage_errors() {
        for bad in [
            &["--margin"][..],
            &["--margin", "wide"][..],
            &["a.json", "b.json"][..],
            &["--frobnicate"][..],
        ] {
            assert!(parse_args(&argv(bad)).is_err(), "{bad:?}");
        }
    }
}
