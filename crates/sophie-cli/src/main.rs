//! Sophie CLI - uniform pseudorandom samples from Sophie-Germain safe primes.
//!
//! Prints `num_observations` lines of the form `0.ddd...` to stdout, read off the
//! decimal expansion of $1/q$ for the safe prime selected by `seed`. Diagnostics go
//! to stderr so stdout can be captured as-is.
//!
//! The generator is deterministic and **not** cryptographically secure.

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use sophie_core::{
    survey_gaps, Observations, Preset, ProgressReporter, SophieConfig, SophieGenerator, Word,
};
use std::fmt::Display;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Limit preset selection.
#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum PresetArg {
    /// 64-bit words, 15 digits per observation, seeds up to 65535.
    Reference,
    /// 16-bit words, 2 digits per observation, seeds up to 15.
    Compact,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Reference => Preset::Reference,
            PresetArg::Compact => Preset::Compact,
        }
    }
}

/// CLI arguments structure.
#[derive(Parser)]
#[command(
    name = "sophie",
    version,
    about = "PRNG based on Sophie-Germain safe primes",
    long_about = None,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of observations to print.
    #[arg(required = true)]
    num_observations: Option<u64>,

    /// Seed selecting the safe prime.
    #[arg(required = true)]
    seed: Option<u64>,

    /// Configuration preset.
    #[arg(short, long, value_enum, default_value_t = PresetArg::Reference, global = true)]
    preset: PresetArg,

    /// Diagnostic log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check that every seed window of the preset holds a safe prime within GAP_MAX.
    Survey,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let preset = Preset::from(cli.preset);
    info!("PRNG Based on Sophie-Germain primes");
    info!("-----------------------------------");

    match cli.command {
        Some(Commands::Survey) => match preset {
            Preset::Reference => run_survey(SophieConfig::reference()),
            Preset::Compact => run_survey(SophieConfig::compact()),
        },
        None => {
            let (Some(num_observations), Some(seed)) = (cli.num_observations, cli.seed) else {
                usage_error(
                    preset,
                    ErrorKind::MissingRequiredArgument,
                    "num_observations and seed are required",
                );
            };
            match preset {
                Preset::Reference => {
                    run_generate(SophieConfig::reference(), preset, num_observations, seed)
                }
                Preset::Compact => {
                    run_generate(SophieConfig::compact(), preset, num_observations, seed)
                }
            }
        }
    }
}

/// Routes diagnostics to stderr, leaving stdout for observations only.
fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Prints a usage error listing the preset's limits and exits with failure status.
fn usage_error(preset: Preset, kind: ErrorKind, message: impl Display) -> ! {
    let (observations_max, seed_max) = preset.limits();
    Cli::command()
        .error(
            kind,
            format!(
                "{message}\n    (where num_observations <= {observations_max})\n    (where seed <= {seed_max})"
            ),
        )
        .exit()
}

/// Validates the request, locates the seed's safe prime and prints the observations.
///
/// # Arguments
///
/// * `config` - Preset limits; validated before anything else happens.
/// * `preset` - Preset name, for usage messages.
/// * `num_observations` - Number of lines to print.
/// * `seed` - Seed selecting the search window.
fn run_generate<W: Word>(
    config: SophieConfig<W>,
    preset: Preset,
    num_observations: u64,
    seed: u64,
) -> anyhow::Result<()> {
    let generator =
        SophieGenerator::new(config).context("configuration invariant check failed")?;

    let (Some(count), Some(seed)) = (W::from_u64(num_observations), W::from_u64(seed)) else {
        usage_error(
            preset,
            ErrorKind::ValueValidation,
            format!("num_observations={num_observations} or seed={seed} does not fit the {preset} preset"),
        );
    };
    if let Err(err) = generator.check_request(count, seed) {
        usage_error(preset, ErrorKind::ValueValidation, err);
    }

    let window = generator.window(seed)?;
    info!(
        "Looking for a Sophie-Germain safe prime q >= {}",
        window.lower_bound
    );

    let located = generator
        .locate(seed)
        .context("safe prime search violated a configuration invariant")?;
    info!("Found a Sophie-Germain safe prime q = {}", located.prime.q);
    info!(
        "Generating the decimal expansion of 1/{}...",
        located.prime.q
    );

    let observations = generator.observations_from(&located, count)?;
    match write_observations(observations) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write observations"),
    }
}

/// Streams observations to stdout through one reused line buffer.
fn write_observations<W: Word>(mut observations: Observations<W>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut line = String::new();
    while observations.next_into(&mut line) {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Scans every seed window of the preset and prints a summary.
///
/// Fails when any window lacks a safe prime, meaning GAP_MAX is too small.
fn run_survey<W: Word>(config: SophieConfig<W>) -> anyhow::Result<()> {
    let generator =
        SophieGenerator::new(config).context("configuration invariant check failed")?;
    let seeds = config.seed_max.as_u128() + 1;
    info!(
        "Surveying {} seed windows of width GAP_MAX = {}",
        seeds, config.gap_max
    );

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Survey progress: {percent:>3}% [{bar:40.green/dim}] ETA: {eta}")?
            .progress_chars("████"),
    );
    let pb_clone = pb.clone();
    let reporter: ProgressReporter =
        Box::new(move |fraction| pb_clone.set_position((fraction * 100.0) as u64));

    let start = Instant::now();
    let survey = survey_gaps(&generator, Some(reporter));
    let duration = start.elapsed();
    pb.finish_and_clear();

    println!("--- Gap Survey ---");
    println!("Seeds checked        : {}", survey.seeds_checked);
    println!("GAP_MAX              : {}", survey.gap_max);
    println!(
        "Widest offset        : {} (seed {})",
        survey.widest_offset, survey.widest_seed
    );
    println!("Slack                : {}", survey.slack());
    println!("Violations           : {}", survey.violations.len());
    println!("Shared primes        : {}", survey.duplicates.len());
    println!("Survey time          : {}", format_elapsed(duration));

    if !survey.is_sound() {
        anyhow::bail!(
            "GAP_MAX = {} does not hold: {} empty window(s), {} shared prime(s)",
            survey.gap_max,
            survey.violations.len(),
            survey.duplicates.len()
        );
    }
    println!("Global Status: Success. GAP_MAX holds for every seed.");
    Ok(())
}

/// Formats survey wall time, switching from milliseconds to seconds at one second.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.1}ms", secs * 1_000.0)
    } else {
        format!("{secs:.2}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_below_one_second_in_millis() {
        assert_eq!(format_elapsed(Duration::from_micros(300)), "0.3ms");
        assert_eq!(format_elapsed(Duration::from_millis(42)), "42.0ms");
    }

    #[test]
    fn elapsed_from_one_second_in_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(1_000)), "1.00s");
        assert_eq!(format_elapsed(Duration::from_millis(12_346)), "12.35s");
    }
}
