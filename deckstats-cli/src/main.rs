//! DeckStats CLI — derive, export and chart deck statistics from purchase logs.
//!
//! Commands:
//! - `derive` — print the per-player summary for a purchase log
//! - `export` — write derived series as long CSV, wide CSV or JSON
//! - `view` — open the interactive chart view
//! - `sample` — write a synthetic purchase log

mod logging;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use deckstats_core::export::{
    export_csv, export_json, export_wide_csv, summary_table, SeriesDocument,
};
use deckstats_core::loader::{load_csv_path, LoadedLog};
use deckstats_core::roster::canonical_player;
use deckstats_core::{derive_series, sample, DeckStatsConfig, Derivation, Stat};
use deckstats_tui::AppState;

#[derive(Parser)]
#[command(
    name = "deckstats",
    about = "DeckStats CLI — deck size, power and efficiency from purchase logs"
)]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive statistics and print a per-player summary.
    Derive {
        /// Purchase log CSV.
        #[arg(long)]
        input: PathBuf,

        /// TOML config. Defaults to <config dir>/deckstats/config.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print every point of one player's series instead of the summary.
        #[arg(long)]
        player: Option<String>,

        /// Fail if any row or player partition was rejected.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Export derived series to a file.
    Export {
        /// Purchase log CSV.
        #[arg(long)]
        input: PathBuf,

        /// Destination file.
        #[arg(long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Statistic for the wide format: size, power or efficiency.
        #[arg(long, default_value = "power")]
        stat: Stat,

        /// TOML config. Defaults to <config dir>/deckstats/config.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Open the interactive chart view.
    View {
        /// Purchase log CSV.
        #[arg(long)]
        input: PathBuf,

        /// TOML config. Defaults to <config dir>/deckstats/config.toml when present.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a synthetic purchase log.
    Sample {
        /// Destination CSV.
        #[arg(long)]
        output: PathBuf,

        #[arg(long, default_value_t = 6)]
        players: usize,

        /// Purchases per player.
        #[arg(long, default_value_t = 40)]
        events: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One row per player and purchase.
    Csv,
    /// One column per player for a single statistic.
    Wide,
    /// Versioned JSON document.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The chart view owns the screen, so only warnings get through by default.
    let floor = match cli.command {
        Commands::View { .. } => "warn",
        _ => "info",
    };
    logging::initialize_logging(logging::level_for(cli.verbose, floor))?;

    match cli.command {
        Commands::Derive {
            input,
            config,
            player,
            strict,
        } => run_derive(&input, config.as_deref(), player.as_deref(), strict),
        Commands::Export {
            input,
            output,
            format,
            stat,
            config,
        } => run_export(&input, &output, format, stat, config.as_deref()),
        Commands::View { input, config } => run_view(&input, config.as_deref()),
        Commands::Sample {
            output,
            players,
            events,
            seed,
        } => run_sample(&output, players, events, seed),
    }
}

// ─── Shared steps ───────────────────────────────────────────────────

/// `--config`, else the per-user config file when it exists, else defaults.
fn resolve_config(explicit: Option<&Path>) -> Result<DeckStatsConfig> {
    if let Some(path) = explicit {
        return DeckStatsConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    if let Some(path) = user_config_path().filter(|p| p.exists()) {
        tracing::info!(path = %path.display(), "using user config");
        return DeckStatsConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    Ok(DeckStatsConfig::default())
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("deckstats").join("config.toml"))
}

/// Rejections are reported by the loader and deriver through `tracing`.
fn load_and_derive(input: &Path, config: &DeckStatsConfig) -> Result<(LoadedLog, Derivation)> {
    let log = load_csv_path(input).with_context(|| format!("reading {}", input.display()))?;
    let derivation = derive_series(&log.records, &config.derive_options());
    Ok((log, derivation))
}

fn rejected_player_count(log: &LoadedLog, derivation: &Derivation) -> usize {
    log.rejected_players().len() + derivation.failures.len()
}

// ─── Commands ───────────────────────────────────────────────────────

fn run_derive(input: &Path, config: Option<&Path>, player: Option<&str>, strict: bool) -> Result<()> {
    let config = resolve_config(config)?;
    let (log, derivation) = load_and_derive(input, &config)?;

    if strict && !log.is_clean() {
        bail!(
            "{} row(s) rejected across {} player(s)",
            log.rejected.len(),
            log.rejected_players().len()
        );
    }
    let series = if strict {
        derivation.into_result()?
    } else {
        derivation.series
    };

    println!("Snapshot {} ({} purchases)", log.fingerprint.short(), log.records.len());

    match player {
        Some(name) => {
            let id = canonical_player(name);
            let Some(s) = series.iter().find(|s| s.player == id) else {
                bail!("no series for player '{id}'");
            };
            print!("{}", export_csv(std::slice::from_ref(s))?);
        }
        None => print!("{}", summary_table(&series)),
    }
    Ok(())
}

fn run_export(
    input: &Path,
    output: &Path,
    format: Format,
    stat: Stat,
    config: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config)?;
    let (log, derivation) = load_and_derive(input, &config)?;

    let content = match format {
        Format::Csv => export_csv(&derivation.series)?,
        Format::Wide => export_wide_csv(&derivation.series, stat)?,
        Format::Json => export_json(&SeriesDocument::new(log.fingerprint, derivation.series))?,
    };
    std::fs::write(output, content).with_context(|| format!("writing {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn run_view(input: &Path, config: Option<&Path>) -> Result<()> {
    let config = resolve_config(config)?;
    let (log, derivation) = load_and_derive(input, &config)?;

    let source = format!(
        "{} [{}]",
        input.file_name().map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned()),
        log.fingerprint.short()
    );
    let rejected = rejected_player_count(&log, &derivation);
    let mut app = AppState::new(derivation.series, config.chart.hover_tolerance).with_source(source);
    if rejected > 0 {
        app.set_warning(format!("{rejected} player(s) rejected; see log"));
    }

    deckstats_tui::run(app)
}

fn run_sample(output: &Path, players: usize, events: usize, seed: u64) -> Result<()> {
    if players == 0 {
        bail!("--players must be at least 1");
    }
    let records = sample::generate(players, events, seed);
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    sample::write_csv(&records, BufWriter::new(file))?;

    println!("Wrote {} purchases for {players} player(s) to {}", records.len(), output.display());
    Ok(())
}
