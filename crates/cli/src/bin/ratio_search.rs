use std::io::Write;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use log::info;
use rocket_staging::config::{SearchSettings, load_or_default};
use rocket_staging::export::{self, json as export_json, ranking as export_ranking};
use rocket_staging::search::{
    self, DEFAULT_ENVELOPE_SAMPLES, DEFAULT_STRUCTURAL_RANGES, RankedCandidate, RatioGrid,
    SearchOutcome, SearchRequest,
};

/// Rank every three-stage length split of a fixed vehicle by total delta-v.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Length-ratio search for three-stage vehicles"
)]
struct Cli {
    /// Settings file (TOML or YAML) with [constants] and [search] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total vehicle length in metres (defaults to settings)
    #[arg(long)]
    total_length: Option<f64>,

    /// Vehicle diameter in metres (defaults to settings)
    #[arg(long)]
    diameter: Option<f64>,

    /// Samples per ratio axis (defaults to settings)
    #[arg(long)]
    points: Option<usize>,

    /// Number of ranked candidates to print and export (defaults to settings)
    #[arg(long)]
    top: Option<usize>,

    /// Optional ranking export path ('-' for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Also print the structural-fraction envelope and reference launch weight
    #[arg(long, default_value_t = false)]
    envelope: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ExportFormat {
    Csv,
    Json,
}

const SUMMARY_COUNT: usize = 10;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_or_default(cli.config.as_ref())?;
    if let Some(path) = &cli.config {
        info!("loaded settings from {}", path.display());
    }
    let constants = settings.physical_constants();
    let search_settings = apply_overrides(&cli, settings.search.clone());

    let request = SearchRequest {
        grid: RatioGrid {
            start: search_settings.ratio_start,
            stop: search_settings.ratio_stop,
            points: search_settings.points,
        },
        total_length_m: search_settings.total_length_m,
        diameter_m: search_settings.diameter_m,
    };

    if cli.envelope {
        print_envelope(&constants, &request);
    }

    let outcome = search::run(&constants, &request)?;
    let best = outcome
        .best()
        .ok_or_else(|| anyhow!("ratio grid produced no candidates"))?;
    let top_n = search_settings.top_n;

    println!("Candidates evaluated: {}", outcome.len());
    println!(
        "Best split: {:.4} / {:.4} / {:.4} -> {:.3} m/s (mass fractions {})",
        best.candidate.r1,
        best.candidate.r2,
        best.candidate.r3,
        best.result.delta_v,
        format_list(&best.result.mass_fractions)
    );

    println!("\nTop {} delta-v values:", SUMMARY_COUNT);
    for entry in outcome.top(SUMMARY_COUNT) {
        println!("{:>5}  {:.3}", entry.rank, entry.result.delta_v);
    }

    println!(
        "\nTop {} delta-v values and their corresponding mass fractions:",
        top_n
    );
    for entry in outcome.top(top_n) {
        println!(
            "{:>5}  {:.3}  {}",
            entry.rank,
            entry.result.delta_v,
            format_list(&entry.result.mass_fractions)
        );
    }

    if let Some(path) = &cli.output {
        let mut writer = export::writer_for_path(path)?;
        match cli.format {
            ExportFormat::Csv => write_csv(writer.as_mut(), outcome.top(top_n))?,
            ExportFormat::Json => {
                export_json::write_ranking(writer.as_mut(), &document(&request, &outcome, top_n))?
            }
        }
        writer.flush()?;
        info!(
            "wrote {} ranked candidates as {:?} to {}",
            outcome.top(top_n).len(),
            cli.format,
            path.display()
        );
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, mut settings: SearchSettings) -> SearchSettings {
    if let Some(total_length) = cli.total_length {
        settings.total_length_m = total_length;
    }
    if let Some(diameter) = cli.diameter {
        settings.diameter_m = diameter;
    }
    if let Some(points) = cli.points {
        settings.points = points;
    }
    if let Some(top) = cli.top {
        settings.top_n = top;
    }
    settings
}

fn print_envelope(constants: &rocket_staging::PhysicalConstants, request: &SearchRequest) {
    let weight =
        search::reference_launch_weight(constants, request.total_length_m, request.diameter_m);
    println!(
        "Launch weight: {:.3} lbs ({:.3} kg)",
        weight.lbs, weight.kg
    );

    let envelope = search::mass_fraction_envelope(
        constants,
        &DEFAULT_STRUCTURAL_RANGES,
        DEFAULT_ENVELOPE_SAMPLES,
    );
    println!("Max mass fraction / delta-v per stage:");
    for (idx, stage) in envelope.stages.iter().enumerate() {
        println!(
            "  Stage {}: {:.4} / {:.3} m/s",
            idx + 1,
            stage.max_mass_fraction,
            stage.max_delta_v_m_s
        );
    }
    println!(
        "Total delta-v upper bound: {:.3} m/s\n",
        envelope.total_max_delta_v_m_s
    );
}

fn write_csv(writer: &mut dyn Write, entries: &[RankedCandidate]) -> std::io::Result<()> {
    export_ranking::write_header(writer)?;
    for entry in entries {
        export_ranking::Record {
            rank: entry.rank,
            ratios: entry.candidate.ratios(),
            lengths_m: entry.stage_lengths_m,
            mass_fractions: &entry.result.mass_fractions,
            stage_delta_vs: &entry.result.stage_delta_vs,
            delta_v_total: entry.result.delta_v,
            feasible: entry.is_feasible(),
        }
        .write_to(writer)?;
    }
    Ok(())
}

fn document(
    request: &SearchRequest,
    outcome: &SearchOutcome,
    top_n: usize,
) -> export_json::RankingDocument {
    export_json::RankingDocument {
        total_length_m: request.total_length_m,
        diameter_m: request.diameter_m,
        grid_points: request.grid.points,
        candidates_evaluated: outcome.len(),
        entries: outcome
            .top(top_n)
            .iter()
            .map(|entry| export_json::RankedEntry {
                rank: entry.rank,
                ratios: entry.candidate.ratios(),
                lengths_m: entry.stage_lengths_m,
                mass_fractions: entry.result.mass_fractions.clone(),
                stage_delta_vs: entry.result.stage_delta_vs.clone(),
                delta_v: entry.result.delta_v,
                feasible: entry.is_feasible(),
            })
            .collect(),
    }
}

fn format_list(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.4}", v)).collect();
    format!("[{}]", parts.join(", "))
}
