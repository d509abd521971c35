use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{Parser, ValueEnum};
use fluentbit_classic::{ConvertOptions, Indent, MultilinePlacement};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "fluentbit-classic",
    version,
    about = "Convert Fluent Bit YAML configuration to the classic format"
)]
struct Args {
    /// Input file path (.yaml). Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Indentation size for section properties (default: 4).
    #[arg(long, value_name = "number", default_value_t = 4)]
    indent: usize,

    /// Where [MULTILINE_PARSER] sections go.
    #[arg(long, value_enum, value_name = "placement", default_value_t = PlacementArg::WithParsers)]
    multiline_placement: PlacementArg,

    /// Treat the input as a Lua chunk and print it spread over lines.
    #[arg(long)]
    beautify_lua: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlacementArg {
    WithParsers,
    AfterOutputs,
}

impl From<PlacementArg> for MultilinePlacement {
    fn from(value: PlacementArg) -> Self {
        match value {
            PlacementArg::WithParsers => MultilinePlacement::WithParsers,
            PlacementArg::AfterOutputs => MultilinePlacement::AfterOutputs,
        }
    }
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluentbit_classic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let (input_text, input_source) = read_input(args.input.as_deref())?;
    tracing::debug!(source = ?input_source, bytes = input_text.len(), "read input");

    let rendered = if args.beautify_lua {
        fluentbit_classic::lua::beautify(&input_text)?
    } else {
        let options = ConvertOptions::new()
            .with_indent(Indent::Spaces(args.indent))
            .with_multiline_placement(args.multiline_placement.into());
        fluentbit_classic::convert_str_with_options(&input_text, &options)?
    };

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    write_output(output_target.path(), rendered.as_bytes())?;
    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {path}: {err}"))?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => fs::write(path, data)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    eprintln!("✔ Converted {input_label} → {}", display_path(output_path));
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
