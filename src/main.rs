//! retryctl
//!
//! Inspect the wait schedule of a retry policy, or run a command under one.
//!
//! ```text
//! retryctl --config retry.toml schedule -n 10
//! retryctl --config retry.toml run --timeout-ms 30000 -- curl -fsS http://localhost:8080/health
//! ```

use std::path::PathBuf;
use std::process::{ExitCode, ExitStatus};

use clap::{Parser, Subcommand};
use serde::Serialize;

use retry_strategy::config::{load_config, RetryConfig};
use retry_strategy::lifecycle::signals::cancel_on_ctrl_c;
use retry_strategy::lifecycle::CancelSignal;
use retry_strategy::observability::logging;
use retry_strategy::RetryError;

#[derive(Parser)]
#[command(name = "retryctl")]
#[command(about = "Inspect retry schedules and run commands under a retry policy", long_about = None)]
struct Cli {
    /// TOML retry configuration (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the waits the configured strategy produces
    Schedule {
        /// Maximum number of retries to print
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,

        /// Print JSON instead of one line per retry
        #[arg(long)]
        json: bool,
    },
    /// Run a command until it exits successfully
    Run {
        /// Overall deadline in milliseconds (overrides the config)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Command and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct ScheduleEntry {
    retry: usize,
    wait_ms: u128,
}

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("failed to spawn: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("exited with {0}")]
    Exit(ExitStatus),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RetryConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!(
        kind = ?config.strategy.kind,
        interval_ms = config.strategy.interval_ms,
        max_retries = config.strategy.max_retries,
        adaptive = config.adaptive.enabled,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Schedule { count, json } => print_schedule(&config, count, json),
        Commands::Run {
            timeout_ms,
            command,
        } => run_command(&config, timeout_ms, &command).await,
    }
}

fn print_schedule(
    config: &RetryConfig,
    count: usize,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let strategy = config.build_strategy()?;

    let entries: Vec<ScheduleEntry> = (1..=count)
        .map_while(|retry| {
            strategy.advance().map(|wait| ScheduleEntry {
                retry,
                wait_ms: wait.as_millis(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("retry {:>4}: wait {} ms", entry.retry, entry.wait_ms);
        }
        if entries.len() < count {
            println!("exhausted after {} retries", entries.len());
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_command(
    config: &RetryConfig,
    timeout_ms: Option<u64>,
    command: &[String],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some((program, args)) = command.split_first() else {
        return Err("no command given".into());
    };

    let strategy = config.build_strategy()?;
    let executor = config.executor();
    let cancel = match timeout_ms {
        Some(ms) => CancelSignal::with_timeout(std::time::Duration::from_millis(ms)),
        None => config.executor.cancel_signal(),
    };
    let ctrl_c = cancel_on_ctrl_c(&cancel);

    let result = executor
        .run(&cancel, strategy.as_ref(), || async move {
            tracing::info!(program = %program, "Running command");
            let result = match tokio::process::Command::new(program).args(args).status().await {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => Err(CommandError::Exit(status)),
                Err(e) => Err(CommandError::Spawn(e)),
            };
            if let Err(e) = &result {
                tracing::warn!(program = %program, error = %e, "Command failed");
            }
            result
        })
        .await;

    ctrl_c.abort();

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e @ RetryError::AttemptsExhausted { .. }) => {
            eprintln!("{}", e);
            Ok(ExitCode::from(1))
        }
        Err(e @ RetryError::Cancelled(_)) => {
            eprintln!("{}", e);
            Ok(ExitCode::from(130))
        }
    }
}
