use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rocket_staging::config::load_or_default;
use log::info;
use rocket_staging::{PopOutSequence, optimize_json_with};

/// Compute three-stage and pop-out staging results for an `/optimize` request body.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Staging calculator (three-stage and pop-out delta-v)"
)]
struct Cli {
    /// JSON request body with mass1..mass6, length1..length6 and optional mode ('-' for stdin)
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Settings file (TOML or YAML) overriding specific impulse and payload
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail instead of reporting infeasible stages
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Leave zero-sized boosters out of the pop-out burn sequence
    #[arg(long, default_value_t = false)]
    adaptive: bool,

    /// Pretty-print the JSON response
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_or_default(cli.config.as_ref())?;
    if let Some(path) = &cli.config {
        info!("loaded settings from {}", path.display());
    }
    let constants = settings.physical_constants();

    let sequence = if cli.adaptive {
        PopOutSequence::Adaptive
    } else {
        PopOutSequence::Full
    };
    let body = read_body(&cli.input)?;
    let response = optimize_json_with(&constants, &body, sequence)?;
    info!(
        "three-stage delta_v = {:.3} m/s, pop-out ({:?}) delta_v = {:.3} m/s",
        response.three_stage.result.delta_v, sequence, response.pop_out.result.delta_v
    );
    if cli.strict {
        response.require_feasible()?;
    }

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", rendered);

    Ok(())
}

fn read_body(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request from {}", path.display()))
    }
}
