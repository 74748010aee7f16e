// # sbar - status line daemon
//
// Thin integration layer: flags, logging, configuration, then hand the
// resolved format table and the selected sink to `StatusEngine`.
// All composition and lifecycle logic lives in sbar-core.
//
// ## Usage
//
// ```text
// sbar [-d] [-o] [-v]
//   -d  detach from the terminal (window title mode only)
//   -o  print one line per second on stdout instead of setting the title
//   -v  print the version and exit
// ```
//
// ## Configuration
//
// - `SBAR_LOG_LEVEL`: trace, debug, info, warn, error (default: warn).
//   Logs go to stderr.
// - `SBAR_CONFIG`: path to a JSON format table. The built-in table in
//   `defaults.rs` is used when unset.
//
// ## Example
//
// ```bash
// export SBAR_LOG_LEVEL=info
// export SBAR_CONFIG=~/.config/sbar.json
//
// sbar -o | lemonbar
// ```

mod defaults;

use anyhow::{Context, Result};
use clap::Parser;
use sbar_core::config::{EngineConfig, SbarConfig};
use sbar_core::lifecycle::{daemonize, install_signal_handlers};
use sbar_core::{
    FormatTable, LaunchOptions, Lifecycle, MetricRegistry, RunMode, StatusEngine, StatusSink,
    StreamSink,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info, trace};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "usage: sbar [-d] [-o] [-v]";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum SbarExitCode {
    /// Stopped by SIGINT/SIGTERM
    CleanShutdown = 0,
    /// Usage error or fatal startup failure
    StartupError = 1,
}

impl From<SbarExitCode> for ExitCode {
    fn from(code: SbarExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Command line flags
///
/// Help and version handling are disabled so every parse failure, `-h`
/// included, ends in the same usage message.
#[derive(Parser, Debug)]
#[command(name = "sbar", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Detach from the controlling terminal
    #[arg(short = 'd')]
    daemonize: bool,

    /// Write to stdout instead of the root window title
    #[arg(short = 'o')]
    stdout: bool,

    /// Print the version and exit
    #[arg(short = 'v')]
    version: bool,
}

/// Environment configuration
struct Config {
    log_level: Level,
    config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let level = env::var("SBAR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
        let log_level = match level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => anyhow::bail!(
                "SBAR_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                level
            ),
        };

        let config_path = env::var_os("SBAR_CONFIG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_level,
            config_path,
        })
    }

    /// Load and validate the format table declaration
    fn load_table(&self) -> Result<SbarConfig> {
        let table = match &self.config_path {
            Some(path) => SbarConfig::from_file(path)
                .with_context(|| format!("Invalid SBAR_CONFIG {}", path.display()))?,
            None => defaults::default_config(),
        };

        table.validate()?;
        Ok(table)
    }
}

fn usage() -> ExitCode {
    eprintln!("{}", USAGE);
    SbarExitCode::StartupError.into()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => return usage(),
    };

    if cli.version {
        println!("sbar-{}", env!("CARGO_PKG_VERSION"));
        return SbarExitCode::CleanShutdown.into();
    }

    let launch = match LaunchOptions::from_flags(cli.daemonize, cli.stdout) {
        Ok(launch) => launch,
        Err(_) => return usage(),
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SbarExitCode::StartupError.into();
        }
    };

    // stdout is reserved for -o output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SbarExitCode::StartupError.into();
    }

    let (table, engine_config) = match resolve_table(&config) {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return SbarExitCode::StartupError.into();
        }
    };

    // Fork before the runtime starts any threads
    if launch.daemonize
        && let Err(e) = daemonize()
    {
        error!("{}", e);
        return SbarExitCode::StartupError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SbarExitCode::StartupError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(launch.mode, table, engine_config).await {
            Ok(ticks) => {
                info!("Clean shutdown after {} tick(s)", ticks);
                SbarExitCode::CleanShutdown
            }
            Err(e) => {
                error!("{:#}", e);
                SbarExitCode::StartupError
            }
        }
    });

    result.into()
}

/// Build the format table from the configured declarations
fn resolve_table(config: &Config) -> Result<(FormatTable, EngineConfig)> {
    let declarations = config.load_table()?;

    let registry = MetricRegistry::new();
    sbar_metrics::register(&registry);

    let table = FormatTable::resolve(&declarations.entries, &registry)?;
    info!("Format table loaded: {} entries", table.len());

    Ok((table, declarations.engine))
}

/// Run the engine until SIGINT, SIGTERM or a closed sink
async fn run_daemon(mode: RunMode, table: FormatTable, engine_config: EngineConfig) -> Result<u64> {
    let lifecycle = Lifecycle::new();

    // Installed before the sink exists so an early signal is never lost
    let _signals = install_signal_handlers(lifecycle.stop_handle())?;

    let sink = open_sink(mode)?;
    let (engine, mut events) = StatusEngine::new(table, sink, &engine_config)?;

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            trace!("Engine event: {:?}", event);
        }
    });

    let ticks = engine.run(&lifecycle).await?;
    Ok(ticks)
}

fn open_sink(mode: RunMode) -> Result<Box<dyn StatusSink>> {
    match mode {
        RunMode::Stdout => Ok(Box::new(StreamSink::stdout())),
        RunMode::WindowTitle => open_window_title_sink(),
    }
}

#[cfg(feature = "x11")]
fn open_window_title_sink() -> Result<Box<dyn StatusSink>> {
    let sink = sbar_sink_x11::X11TitleSink::connect(None)?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "x11"))]
fn open_window_title_sink() -> Result<Box<dyn StatusSink>> {
    anyhow::bail!("sbar was built without X11 support; use -o")
}
