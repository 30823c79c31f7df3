//! zdevctl CLI — Z-series channel device inventory and activation.
//!
//! Stands in for the installer view layer: lists devices as a table or
//! JSON, enables/disables devices through `chzdev`, and supports a dry-run
//! mode that simulates activation against a seeded snapshot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zdevctl_devices::{SessionMode, ToolPaths, ZdevSession};

mod config;
mod output;

use config::ZdevctlConfig;
use output::{ActionOutput, DeviceEntry, ListOutput, OutputFormat};

/// zdevctl CLI.
#[derive(Parser)]
#[command(name = "zdevctl", version, about = "zdevctl — Z-series channel device tools")]
struct Cli {
    /// Simulate activation instead of running the real tools.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Seed the dry-run inventory from a pairs file (implies --dry-run).
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Configuration file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable verbose logging to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List channel devices.
    List,
    /// Enable a device.
    Enable {
        /// Device id, as shown by `list`.
        id: String,
    },
    /// Disable a device.
    Disable {
        /// Device id, as shown by `list`.
        id: String,
    },
    /// Show or inspect configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print configuration search paths and environment variables.
    Paths,
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr so stdout stays machine-readable.
    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("zdevctl=debug,zdevctl_devices=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let format = OutputFormat::from_str(&cli.format);

    let mut config = ZdevctlConfig::load(cli.config.as_deref())
        .map_err(|e| format!("cannot load configuration: {e}"))?;
    config.apply_env_overrides();
    if cli.dry_run {
        config.dry_run.enabled = true;
    }
    if let Some(ref snapshot) = cli.snapshot {
        config.dry_run.enabled = true;
        config.dry_run.snapshot_path = Some(snapshot.display().to_string());
    }
    debug!(
        lszdev = %config.tools.lszdev,
        chzdev = %config.tools.chzdev,
        dry_run = config.dry_run.enabled,
        "effective configuration"
    );

    match cli.command {
        Commands::List => {
            let mut session = open_session(&config)?;
            session.refresh().map_err(|e| e.to_string())?;
            print_devices(&session, format);
            Ok(())
        }
        Commands::Enable { id } => apply_action(&config, format, &id, true),
        Commands::Disable { id } => apply_action(&config, format, &id, false),
        Commands::Config { command } => run_config(&config, command),
    }
}

fn open_session(config: &ZdevctlConfig) -> Result<ZdevSession, String> {
    let tools = ToolPaths {
        lszdev: config.tools.lszdev.clone(),
        chzdev: config.tools.chzdev.clone(),
    };
    let mode = if config.dry_run.enabled {
        SessionMode::DryRun {
            snapshot_path: config.dry_run.snapshot_path.as_ref().map(PathBuf::from),
        }
    } else {
        SessionMode::Live
    };
    ZdevSession::new(mode, tools).map_err(|e| e.to_string())
}

fn apply_action(
    config: &ZdevctlConfig,
    format: OutputFormat,
    id: &str,
    active: bool,
) -> Result<(), String> {
    let mut session = open_session(config)?;
    session.refresh().map_err(|e| e.to_string())?;
    session
        .set_device_active(id, active)
        .map_err(|e| e.to_string())?;
    // Live activation only shows up in the next enumeration.
    session.refresh().map_err(|e| e.to_string())?;

    if format.is_json() {
        output::print_json(&ActionOutput {
            status: "success".to_string(),
            action: if active { "enable" } else { "disable" }.to_string(),
            device: id.to_string(),
            record: session.device(id).map(DeviceEntry::from_record),
        });
    } else {
        print_devices(&session, format);
    }
    Ok(())
}

fn print_devices(session: &ZdevSession, format: OutputFormat) {
    let devices = session.list_devices();
    if format.is_json() {
        output::print_json(&ListOutput::from_records(&devices));
    } else {
        print!("{}", output::render_table(&devices));
    }
}

fn run_config(config: &ZdevctlConfig, command: ConfigCommands) -> Result<(), String> {
    match command {
        ConfigCommands::Show => {
            let toml = toml::to_string_pretty(config)
                .map_err(|e| format!("cannot serialize configuration: {e}"))?;
            print!("{toml}");
            Ok(())
        }
        ConfigCommands::Paths => {
            println!("Configuration file search paths (first existing wins):");
            for path in ZdevctlConfig::search_paths() {
                println!("  {}", path.display());
            }
            println!();
            println!("Environment variables:");
            for (name, description) in ZdevctlConfig::env_vars() {
                println!("  {name:<18} {description}");
            }
            Ok(())
        }
    }
}
