#![deny(unsafe_code)]
//! CLI binary for wake combination.
//!
//! Subcommands:
//! - `combine`: merge a wake field into a base field with a chosen model
//! - `list`: print registered combination models
//! - `schema <model>`: print a model's parameter schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use wake_combine_core::Combination;
use wake_combine_models::field_io::{field_to_json, read_field, write_field};
use wake_combine_models::CombinationKind;

#[derive(Parser)]
#[command(name = "wake-combine", about = "Wake combination CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Combine a wake field into a base field.
    Combine {
        /// Base flow field (JSON with "shape" and "data").
        #[arg(short, long)]
        base: PathBuf,

        /// Wake field to apply (same shape as the base).
        #[arg(short, long)]
        wake: PathBuf,

        /// Combination model string.
        #[arg(short, long, default_value = "fracnorm")]
        model: String,

        /// Model parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Index of the turbine the wake belongs to.
        #[arg(short, long)]
        turbine: Option<usize>,

        /// Output file path; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List registered combination models.
    List,
    /// Print the parameter schema of a model.
    Schema {
        /// Combination model string.
        model: String,
    },
}

/// Initializes `env_logger` at `level`, falling back to info for unknown names.
fn init_logging(level: &str) {
    let filter = level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(filter)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let models = CombinationKind::list_models();
            if cli.json {
                let info = serde_json::json!({ "models": models });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Models:");
                for name in models {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { model } => {
            let strategy = CombinationKind::from_name(&model, &serde_json::json!({}))?;
            println!("{}", serde_json::to_string_pretty(&strategy.param_schema())?);
        }
        Command::Combine {
            base,
            wake,
            model,
            params,
            turbine,
            output,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let strategy = CombinationKind::from_name(&model, &params)?;
            let base_field = read_field(&base)?;
            let wake_field = read_field(&wake)?;
            let combined = strategy.combine(&base_field, &wake_field, turbine)?;
            log::debug!(
                "combined {} fields of shape {:?}",
                strategy.model_string(),
                combined.shape()
            );

            match &output {
                Some(path) => {
                    write_field(&combined, path)?;
                    if cli.json {
                        let info = serde_json::json!({
                            "model": model,
                            "params": strategy.params(),
                            "turbine": turbine,
                            "shape": combined.shape(),
                            "output": path.display().to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        eprintln!(
                            "combined {} -> {} ({model}, shape {:?})",
                            wake.display(),
                            path.display(),
                            combined.shape()
                        );
                    }
                }
                None => println!("{}", field_to_json(&combined)?),
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
