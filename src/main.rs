use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use terraform_provider_segment::config::{ProviderConfig, DEFAULT_URL};
use terraform_provider_segment::framework::Diagnostic;
use terraform_provider_segment::provider::SegmentProvider;
use terraform_provider_segment::segment::SegmentClient;
use terraform_provider_segment::VERSION;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "SEGMENT_LOG";

/// Drive Segment resources and data sources from the command line
#[derive(Parser, Debug)]
#[command(name = "terraform-provider-segment", version = VERSION, about, long_about = None)]
struct Args {
    /// Public API url (overrides SEGMENT_PUBLIC_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Public API token (overrides SEGMENT_PUBLIC_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Write logs to the log file in the config directory instead of stderr
    #[arg(long, global = true)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the provider, resource and data source schemas
    Schema,

    /// Run one lifecycle operation on a resource
    Resource {
        /// Resource type, e.g. segment_source
        type_name: String,

        #[arg(value_enum)]
        action: Action,

        /// JSON input file; stdin when omitted. For `update` the input is
        /// `{"plan": {...}, "prior": {...}}`.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Read a data source
    Data {
        /// Data source type, e.g. segment_role
        type_name: String,

        /// JSON configuration file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Action {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

#[derive(Deserialize)]
struct UpdateInput {
    plan: Value,
    prior: Value,
}

fn setup_logging(
    level: LogLevel,
    to_file: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // SEGMENT_LOG wins over the flag
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::new(directive),
        _ => EnvFilter::new(level.directive()?),
    };

    let (writer, guard) = if to_file {
        let log_path = get_log_path();
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match std::fs::OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => tracing_appender::non_blocking(file),
            Err(e) => {
                eprintln!("Unable to open log file {:?}: {}, logging to stderr", log_path, e);
                tracing_appender::non_blocking(std::io::stderr())
            }
        }
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("terraform-provider-segment {} started", VERSION);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("terraform-provider-segment")
            .join("terraform-provider-segment.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".terraform-provider-segment")
            .join("terraform-provider-segment.log");
    }
    PathBuf::from("terraform-provider-segment.log")
}

/// Read a JSON document from a file, or from stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {:?}", path))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read input from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Input is not valid JSON")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Schemas are static; the client behind this provider is never called
fn offline_provider() -> Result<SegmentProvider> {
    let client = SegmentClient::with_base_url(DEFAULT_URL, "")?;
    Ok(SegmentProvider::new(Arc::new(client)))
}

fn print_schema() -> Result<()> {
    let provider = offline_provider()?;

    let resources: serde_json::Map<String, Value> = provider
        .resources()
        .iter()
        .map(|(name, r)| -> Result<(String, Value)> {
            Ok((name.to_string(), serde_json::to_value(r.schema())?))
        })
        .collect::<Result<_>>()?;
    let data_sources: serde_json::Map<String, Value> = provider
        .data_sources()
        .iter()
        .map(|(name, d)| -> Result<(String, Value)> {
            Ok((name.to_string(), serde_json::to_value(d.schema())?))
        })
        .collect::<Result<_>>()?;

    print_json(&json!({
        "provider": SegmentProvider::schema(),
        "resource_schemas": resources,
        "data_source_schemas": data_sources,
    }))
}

async fn run_resource(
    provider: &SegmentProvider,
    type_name: &str,
    action: Action,
    input: Value,
) -> Result<Result<Value, Diagnostic>> {
    let resources = provider.resources();
    let resource = resources
        .get(type_name)
        .with_context(|| format!("Unknown resource type '{}'", type_name))?;

    tracing::debug!("Running {:?} on {}", action, type_name);

    let outcome = match action {
        Action::Create => resource.create(input).await,
        Action::Read => resource
            .read(input)
            .await
            .map(|state| state.unwrap_or(Value::Null)),
        Action::Update => {
            let UpdateInput { plan, prior } = serde_json::from_value(input)
                .context("Update input must be {\"plan\": ..., \"prior\": ...}")?;
            resource.update(plan, prior).await
        }
        Action::Delete => resource.delete(input).await.map(|()| Value::Null),
    };
    Ok(outcome)
}

async fn run_data_source(
    provider: &SegmentProvider,
    type_name: &str,
    input: Value,
) -> Result<Result<Value, Diagnostic>> {
    let data_sources = provider.data_sources();
    let data_source = data_sources
        .get(type_name)
        .with_context(|| format!("Unknown data source type '{}'", type_name))?;

    Ok(data_source.read(input).await)
}

fn configured_provider(args: &Args) -> Result<SegmentProvider, Diagnostic> {
    let config = ProviderConfig::resolve(args.url.clone(), args.token.clone());
    SegmentProvider::from_config(&config)
}

/// Print a diagnostic as JSON on stderr
fn report(diagnostic: &Diagnostic) -> ExitCode {
    let rendered = serde_json::to_string_pretty(diagnostic)
        .unwrap_or_else(|_| diagnostic.to_string());
    eprintln!("{}", rendered);
    ExitCode::FAILURE
}

/// Print the resulting state, or log and report the diagnostic
fn finish(outcome: Result<Value, Diagnostic>) -> Result<ExitCode> {
    match outcome {
        Ok(state) => {
            print_json(&state)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(diagnostic) => {
            tracing::error!("{}", diagnostic);
            Ok(report(&diagnostic))
        }
    }
}

async fn run(args: &Args) -> Result<ExitCode> {
    let outcome = match &args.command {
        Command::Schema => {
            print_schema()?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Resource {
            type_name,
            action,
            input,
        } => {
            let input = read_input(input.as_deref())?;
            let provider = match configured_provider(args) {
                Ok(provider) => provider,
                Err(diagnostic) => return Ok(report(&diagnostic)),
            };
            run_resource(&provider, type_name, *action, input).await?
        }
        Command::Data { type_name, input } => {
            let input = read_input(input.as_deref())?;
            let provider = match configured_provider(args) {
                Ok(provider) => provider,
                Err(diagnostic) => return Ok(report(&diagnostic)),
            };
            run_data_source(&provider, type_name, input).await?
        }
    };

    finish(outcome)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level, args.log_to_file);
    let result = run(&args).await;

    // Flushes the non-blocking writer before the process exits
    drop(log_guard);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// In-memory log sink shared with the non-blocking worker
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_outcome_is_logged_and_returns_failure() {
        let buffer = SharedBuffer::default();
        let (writer, guard) = tracing_appender::non_blocking(buffer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .finish();

        let code = tracing::subscriber::with_default(subscriber, || {
            finish(Err(Diagnostic::not_found("Role", "my-role-id-3"))).unwrap()
        });
        drop(guard);

        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("ERROR"));
        assert!(logged.contains("Role not found"));
    }

    #[test]
    fn test_successful_outcome_returns_success() {
        let code = finish(Ok(serde_json::json!({ "id": "role1" }))).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
    }
}
