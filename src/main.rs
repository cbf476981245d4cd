use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sacount::config::{AppConfig, get_config_path};
use sacount::index::dataset;
use sacount::output;
use sacount::search::{
    BruteWindow, CounterKind, EmptyPatternPolicy, LcpMaintenance, Runner,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sacount")]
#[command(about = "Exact pattern counting over precomputed suffix arrays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Colored output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    /// More log output (repeat for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the counters and write one result stream per counter
    Count {
        /// Dataset file (line format, or JSON with a .json extension)
        input: PathBuf,

        /// Directory for brute.out / binary.out / lcp.out
        #[arg(short, long = "output", default_value = ".")]
        out_dir: PathBuf,

        /// Counter to run (repeatable; defaults to the configured set)
        #[arg(short, long = "counter", value_enum)]
        counters: Vec<CounterKind>,

        /// Worker threads (0 = every core)
        #[arg(short, long)]
        threads: Option<usize>,

        #[arg(long, value_enum)]
        empty_pattern: Option<EmptyPatternPolicy>,

        #[arg(long, value_enum)]
        brute_window: Option<BruteWindow>,

        #[arg(long, value_enum)]
        lcp_mode: Option<LcpMaintenance>,

        /// Also write report.json with timings and work counters
        #[arg(long)]
        report: bool,

        /// Do not fail when counters disagree
        #[arg(long)]
        no_verify: bool,

        /// No progress bars or summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Load and validate a dataset, then print its statistics
    Check {
        /// Dataset file
        input: PathBuf,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Also save it to the config file
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let color = cli.color == ColorMode::Auto;

    match cli.command {
        Commands::Count {
            input,
            out_dir,
            counters,
            threads,
            empty_pattern,
            brute_window,
            lcp_mode,
            report,
            no_verify,
            quiet,
        } => {
            if !counters.is_empty() {
                config.counters = counters;
            }
            config.dedup_counters();
            if let Some(threads) = threads {
                config.threads = threads;
            }
            if let Some(policy) = empty_pattern {
                config.empty_pattern = policy;
            }
            if let Some(window) = brute_window {
                config.brute_window = window;
            }
            if let Some(mode) = lcp_mode {
                config.lcp_maintenance = mode;
            }

            run_count(&config, &input, &out_dir, report, !no_verify, quiet, color)?;
        }
        Commands::Check { input } => {
            let workload = dataset::open(&input)?.into_workload(&config.store_options()?)?;
            output::print_meta(&workload.store.meta(&workload.patterns), color)?;
        }
        Commands::Config { write } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if write {
                let path = cli
                    .config
                    .clone()
                    .or_else(get_config_path)
                    .context("No config directory on this platform")?;
                config.save_to(&path)?;
                tracing::info!(path = %path.display(), "saved config");
            }
        }
    }

    Ok(())
}

fn run_count(
    config: &AppConfig,
    input: &Path,
    out_dir: &Path,
    write_report: bool,
    verify: bool,
    quiet: bool,
    color: bool,
) -> Result<()> {
    let load_start = std::time::Instant::now();
    let workload = dataset::open(input)?
        .into_workload(&config.store_options()?)
        .with_context(|| format!("Invalid dataset {}", input.display()))?;
    tracing::info!(
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        text_len = workload.store.len(),
        patterns = workload.patterns.len(),
        "dataset loaded"
    );

    let show_progress = !quiet && std::io::stderr().is_terminal();
    let runner = Runner::new(config.runner_options(show_progress))?;
    let runs = runner.run(&workload, &config.counters)?;

    for path in output::write_results(out_dir, &runs)? {
        tracing::debug!(path = %path.display(), "wrote result stream");
    }

    let report = runner.report(&workload, &runs);
    if write_report {
        output::write_report(&out_dir.join("report.json"), &report)?;
    }
    if !quiet {
        output::print_summary(&report, color)?;
    }

    if verify && !report.disagreements.is_empty() {
        bail!(
            "counters disagree on {} of {} patterns",
            report.disagreements.len(),
            report.pattern_count
        );
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
