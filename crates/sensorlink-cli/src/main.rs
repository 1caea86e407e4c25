use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand, ValueEnum};
use sensorlink_core::{
    DecodeError, Field, FieldValue, Fields, HeaderKind, ProfileRegistry, RegistryConfig,
};

#[derive(Parser, Debug)]
#[command(name = "sensorlink")]
#[command(version)]
#[command(
    about = "Decoder for climate/CO2 sensor uplink payloads.",
    long_about = None,
    after_help = "Examples:\n  sensorlink decode 006455019000000000000190 --port 1\n  sensorlink decode '[0,100,85,1,144,0,0,0,0,0,1,144]' --encoding json --format text\n  sensorlink fields --port 2 --config profiles.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one uplink payload into named fields.
    #[command(
        after_help = "Examples:\n  sensorlink decode 006455019000000000000190\n  sensorlink decode AGRVAZAAAAAAAAGQ --encoding base64 --pretty\n  echo 006455019000000000000190 | sensorlink decode - -o fields.json"
    )]
    Decode {
        /// Payload text, or '-' to read it from stdin
        payload: String,

        /// Port the uplink was received on
        #[arg(short, long, default_value_t = 1)]
        port: u8,

        /// How the payload text encodes the bytes
        #[arg(short, long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Profile configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// List the frame layout and which fields a port emits.
    Fields {
        /// Port to resolve the profile for
        #[arg(short, long, default_value_t = 1)]
        port: u8,

        /// Profile configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Encoding {
    Hex,
    Base64,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

struct DecodeArgs {
    payload: String,
    port: u8,
    encoding: Encoding,
    format: OutputFormat,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
    compact: bool,
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            payload,
            port,
            encoding,
            format,
            output,
            config,
            pretty,
            compact,
            quiet,
        } => cmd_decode(DecodeArgs {
            payload,
            port,
            encoding,
            format,
            output,
            config,
            pretty,
            compact,
            quiet,
        }),
        Commands::Fields { port, config } => cmd_fields(port, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let hint = match &err {
            DecodeError::TruncatedPayload { needed, .. } => {
                Some(format!("a complete uplink frame is {needed} bytes"))
            }
            DecodeError::InvalidByteValue { .. } => {
                Some("every element must be an integer in 0..=255".to_string())
            }
            DecodeError::UnknownField { .. } => Some(format!(
                "known fields: {}",
                Field::ALL.map(Field::name).join(", ")
            )),
        };
        CliError::new(err.to_string(), hint)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let registry = load_registry(args.config.as_deref())?;
    let text = if args.payload == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        args.payload
    };
    let bytes = parse_payload(&text, args.encoding)?;
    let fields = registry.decode(&bytes, args.port)?;

    let rendered = match args.format {
        OutputFormat::Json => serialize_fields(&fields, args.pretty)?,
        OutputFormat::Text => render_text(&fields),
    };

    let Some(output) = args.output else {
        println!("{}", rendered);
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, rendered)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;

    if !args.quiet {
        eprintln!("OK: fields written -> {}", output.display());
    }
    Ok(())
}

fn cmd_fields(port: u8, config: Option<&Path>) -> Result<(), CliError> {
    let registry = load_registry(config)?;
    let profile = registry.profile_for(port);

    println!("profile: {} (port {})", profile.name, port);
    for field in Field::ALL {
        let span = field.span();
        let bytes = if span.len() == 1 {
            format!("{}", span.start)
        } else {
            format!("{}..{}", span.start, span.end)
        };
        let state = if profile.fields.contains(field) {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "  {:<6} {:<12} {:<4} {}",
            bytes,
            field.name(),
            field.unit().unwrap_or("-"),
            state
        );
    }
    Ok(())
}

fn load_registry(config: Option<&Path>) -> Result<ProfileRegistry, CliError> {
    let Some(path) = config else {
        return Ok(ProfileRegistry::default());
    };
    if !path.is_file() {
        return Err(CliError::new(
            format!("config file not found: {}", path.display()),
            Some("pass a JSON profile configuration".to_string()),
        ));
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: RegistryConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(ProfileRegistry::from_config(&config)?)
}

fn parse_payload(text: &str, encoding: Encoding) -> Result<Vec<u8>, CliError> {
    let text = text.trim();
    match encoding {
        Encoding::Hex => {
            let digits: String = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            hex::decode(&digits).map_err(|err| {
                CliError::new(
                    format!("invalid hex payload: {err}"),
                    Some("expected pairs of hex digits, e.g. 006455019000000000000190".to_string()),
                )
            })
        }
        Encoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(|err| {
                CliError::new(
                    format!("invalid base64 payload: {err}"),
                    Some("expected standard base64, e.g. AGRVAZAAAAAAAAGQ".to_string()),
                )
            }),
        Encoding::Json => {
            let values: Vec<i64> = serde_json::from_str(text).map_err(|err| {
                CliError::new(
                    format!("invalid JSON payload: {err}"),
                    Some("expected an array of integers, e.g. [0,100,85,...]".to_string()),
                )
            })?;
            Ok(sensorlink_core::bytes_from_values(&values)?)
        }
    }
}

fn serialize_fields(fields: &Fields, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(fields)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(fields)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn render_text(fields: &Fields) -> String {
    let mut lines = Vec::new();
    for field in Field::ALL {
        let Some(value) = fields.field(field) else {
            continue;
        };
        let line = match (field, value) {
            (Field::Header, FieldValue::Integer(raw)) => {
                let kind = u8::try_from(raw).map(HeaderKind::from);
                match kind {
                    Ok(kind) => format!("{} : {} ({})", field.label(), kind, raw),
                    Err(_) => format!("{} : {}", field.label(), raw),
                }
            }
            (_, FieldValue::Unread) => format!("{} : {}", field.label(), value),
            _ => match field.unit() {
                Some(unit) => format!("{} : {} {}", field.label(), value, unit),
                None => format!("{} : {}", field.label(), value),
            },
        };
        lines.push(line);
    }
    lines.join("\n")
}
