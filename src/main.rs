//! `apigee-hcl` command line.
//!
//! ```text
//! apigee-hcl [--config FILE] [--log-level LEVEL] <COMMAND>
//!
//!   decode <FILE>   print the decoded document as JSON
//!   check  <FILE>   print a summary, or every error (exit 1)
//!   watch  <FILE>   re-check on every change until Ctrl-C
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use apigee_hcl::config::{load_config, ToolConfig};
use apigee_hcl::dsl::{load_document, Config, DocumentWatcher};
use apigee_hcl::observability::init_logging;

#[derive(Parser)]
#[command(name = "apigee-hcl")]
#[command(about = "Decode and check Apigee proxy definitions written in HCL", long_about = None)]
struct Cli {
    /// Tool configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `observability.log_level`.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded document as JSON
    Decode { file: PathBuf },
    /// Report whether the document decodes
    Check { file: PathBuf },
    /// Re-check the document whenever it changes
    Watch { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut tool_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ToolConfig::default(),
    };
    if let Some(level) = cli.log_level {
        tool_config.observability.log_level = level;
    }

    init_logging(&tool_config.observability.log_level)?;
    tracing::debug!(config = ?tool_config, "tool configuration loaded");

    match cli.command {
        Commands::Decode { file } => decode(&file, &tool_config),
        Commands::Check { file } => Ok(check(&file)),
        Commands::Watch { file } => watch(&file).await,
    }
}

fn decode(path: &Path, tool_config: &ToolConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = match load_document(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if !tool_config.output.include_resources {
        config.resources.clear();
    }

    let json = if tool_config.output.pretty {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

fn check(path: &Path) -> ExitCode {
    match load_document(path) {
        Ok(config) => {
            println!("{}: ok ({})", path.display(), summary(&config));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn summary(config: &Config) -> String {
    let mut summary = format!(
        "{} policies, {} proxy endpoints, {} target endpoints, {} resources",
        config.policies.len(),
        config.proxy_endpoints.len(),
        config.target_endpoints.len(),
        config.resources.len(),
    );
    if !config.skipped_policies.is_empty() {
        summary.push_str(&format!(", {} skipped", config.skipped_policies.len()));
    }
    summary
}

async fn watch(path: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    check(path);

    let (watcher, mut rx) = DocumentWatcher::new(path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(reload) = rx.recv() => match reload {
                Ok(config) => println!("{}: ok ({})", path.display(), summary(&config)),
                Err(e) => eprintln!("{}", e),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping watcher");
                return Ok(ExitCode::SUCCESS);
            }
        }
    }
}
