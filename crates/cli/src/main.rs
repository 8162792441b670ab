mod render;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sdui_components::{
    decode_lenient, to_value, Component, ComponentSource, DecodeError, DecodeOptions, FileSource,
    SourceError, StaticSource, SAMPLE_PAYLOAD,
};
use tracing_subscriber::EnvFilter;

use crate::render::RenderFormat;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "SDUI_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Output format for the render subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderOutputFormat {
    Terminal,
    Markdown,
}

/// Server-driven UI payload toolkit.
#[derive(Parser)]
#[command(name = "sdui", version, about = "Server-driven UI payload toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Decoder flags shared by every subcommand that reads a payload.
#[derive(Args, Debug, Clone, Copy)]
struct DecodeFlags {
    /// Skip elements that fail to decode instead of rejecting the payload
    #[arg(long)]
    lenient: bool,
    /// Accept a `type` field that differs from the `_type` discriminator
    #[arg(long)]
    allow_tag_mismatch: bool,
}

impl DecodeFlags {
    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            enforce_type_tag: !self.allow_tag_mismatch,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a component payload and report what it contains
    Decode {
        /// Path to the JSON payload file
        file: PathBuf,
        #[command(flatten)]
        flags: DecodeFlags,
    },

    /// Render a component payload as text
    Render {
        /// Path to the JSON payload file (default: the built-in sample)
        file: Option<PathBuf>,
        /// Render format (terminal or markdown)
        #[arg(long, default_value = "terminal", value_enum)]
        format: RenderOutputFormat,
        #[command(flatten)]
        flags: DecodeFlags,
    },

    /// Print the built-in sample payload
    Sample,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.output, cli.quiet);

    match cli.command {
        Commands::Decode { file, flags } => {
            cmd_decode(&file, flags, cli.output, cli.quiet);
        }
        Commands::Render {
            file,
            format,
            flags,
        } => {
            let format = match format {
                RenderOutputFormat::Terminal => RenderFormat::Terminal,
                RenderOutputFormat::Markdown => RenderFormat::Markdown,
            };
            cmd_render(file.as_deref(), format, flags, cli.output, cli.quiet);
        }
        Commands::Sample => {
            print!("{}", SAMPLE_PAYLOAD);
        }
    }
}

/// Install the stderr log subscriber.
///
/// `SDUI_LOG` takes precedence. Otherwise only errors are logged, since
/// the commands report decode failures and skipped elements themselves.
/// Quiet and JSON modes log nothing so stderr holds only the report.
fn init_logging(output: OutputFormat, quiet: bool) {
    let default_directive = if quiet || output == OutputFormat::Json {
        "off"
    } else {
        "error"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Components read from a source, plus the elements lenient mode skipped.
struct Loaded {
    components: Vec<Component>,
    skipped: Vec<DecodeError>,
}

/// Fetch components from `file`, or from the built-in sample when absent.
fn load(file: Option<&Path>, flags: DecodeFlags) -> Result<Loaded, SourceError> {
    let options = flags.options();

    if flags.lenient {
        let payload = match file {
            Some(path) => FileSource::new(path).read_payload()?,
            None => SAMPLE_PAYLOAD.to_string(),
        };
        let decoded = decode_lenient(&payload, &options)?;
        return Ok(Loaded {
            components: decoded.components,
            skipped: decoded.skipped,
        });
    }

    let source: Box<dyn ComponentSource> = match file {
        Some(path) => Box::new(FileSource::new(path).with_options(options)),
        None => Box::new(StaticSource::sample().with_options(options)),
    };
    Ok(Loaded {
        components: source.fetch_components()?,
        skipped: Vec::new(),
    })
}

fn cmd_decode(file: &Path, flags: DecodeFlags, output: OutputFormat, quiet: bool) {
    let loaded = match load(Some(file), flags) {
        Ok(l) => l,
        Err(e) => {
            report_source_error(&e, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => {
            if !quiet {
                for skipped in &loaded.skipped {
                    eprintln!("skipped: {}", skipped);
                }
                for (i, component) in loaded.components.iter().enumerate() {
                    println!(
                        "{:>3}  {:<11} {}",
                        i,
                        component.kind(),
                        render::summarize(component)
                    );
                }
                println!(
                    "decoded {} component(s){}",
                    loaded.components.len(),
                    if loaded.skipped.is_empty() {
                        String::new()
                    } else {
                        format!(", skipped {}", loaded.skipped.len())
                    }
                );
            }
        }
        OutputFormat::Json => {
            let components = match to_value(&loaded.components) {
                Ok(v) => v,
                Err(e) => {
                    report_failure("serialization", &e.to_string(), output, quiet);
                    process::exit(1);
                }
            };
            let skipped: Vec<serde_json::Value> =
                loaded.skipped.iter().map(decode_error_json).collect();
            let json = serde_json::json!({
                "valid": true,
                "components": components,
                "skipped": skipped
            });
            let text = serde_json::to_string_pretty(&json).unwrap_or_default();
            println!("{}", text);
        }
    }
}

fn cmd_render(
    file: Option<&Path>,
    format: RenderFormat,
    flags: DecodeFlags,
    output: OutputFormat,
    quiet: bool,
) {
    match load(file, flags) {
        Ok(loaded) => {
            if !quiet {
                for skipped in &loaded.skipped {
                    eprintln!("skipped: {}", skipped);
                }
            }
            print!("{}", render::render(&loaded.components, format));
        }
        Err(e) => {
            // The fallback screen replaces the UI; details go to stderr.
            print!("{}", render::render_failure(format));
            report_source_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn decode_error_json(e: &DecodeError) -> serde_json::Value {
    serde_json::json!({
        "category": e.category(),
        "message": e.to_string()
    })
}

fn report_source_error(e: &SourceError, output: OutputFormat, quiet: bool) {
    match e {
        SourceError::Decode(d) => report_failure(d.category(), &d.to_string(), output, quiet),
        SourceError::Io { .. } => report_failure("io", &e.to_string(), output, quiet),
    }
}

/// Print a failure to stderr: `error: <message>` in text mode, or the
/// `{"valid": false, ...}` report in JSON mode.
fn report_failure(category: &str, message: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", message);
            }
        }
        OutputFormat::Json => {
            let json = failure_json(category, message);
            let text = serde_json::to_string_pretty(&json).unwrap_or_default();
            eprintln!("{}", text);
        }
    }
}

fn failure_json(category: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "valid": false,
        "error": {
            "category": category,
            "message": message
        }
    })
}
