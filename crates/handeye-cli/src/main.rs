use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use handeye_core::{RigidTransform, Sample};
use handeye_linear::{HandEyeConfig, HandEyeEstimate, HandEyeMode, HandEyeSolver};
use serde::{Deserialize, Serialize};

/// Hand-eye calibration CLI.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Estimate the robot-to-camera transform (AX = XB) from paired pose samples"
)]
struct Args {
    /// Path to JSON file containing HandEyeInput.
    #[arg(long)]
    input: PathBuf,

    /// Optional path to JSON HandEyeConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the mounting mode of the config.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Also write the 4x4 result as plain text rows to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Format printed to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    EyeInHand,
    EyeToHand,
}

impl From<ModeArg> for HandEyeMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::EyeInHand => HandEyeMode::EyeInHand,
            ModeArg::EyeToHand => HandEyeMode::EyeToHand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Paired samples as produced by the robot and vision front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HandEyeInput {
    samples: Vec<Sample>,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

/// Row-major 4x4 matrix, one whitespace-separated row per line.
fn format_matrix_text(t: &RigidTransform) -> String {
    t.to_rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:.12}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

fn run_handeye_from_files(
    input_path: &Path,
    config_path: Option<&Path>,
    mode: Option<HandEyeMode>,
) -> Result<HandEyeEstimate> {
    let input: HandEyeInput = load_json_file(input_path)?;

    let mut config = if let Some(cfg_path) = config_path {
        load_json_file::<HandEyeConfig>(cfg_path)?
    } else {
        HandEyeConfig::default()
    };
    if let Some(mode) = mode {
        config.mode = mode;
    }

    let estimate = HandEyeSolver::new(config)
        .solve(&input.samples)
        .context("hand-eye calibration failed")?;
    Ok(estimate)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let estimate = run_handeye_from_files(
        &args.input,
        args.config.as_deref(),
        args.mode.map(Into::into),
    )?;

    let text = format_matrix_text(&estimate.transform);
    if let Some(path) = &args.output {
        fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote calibration to {}", path.display());
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        OutputFormat::Text => print!("{text}"),
    }
    Ok(())
}
