//! epochbar demo - drives a simulated pipeline so the live rows can be
//! eyeballed under different refresh rates, leave settings, and themes.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use epochbar::{BarConfig, EpochBar, NullSurface, Phase, PipelineObserver, Theme};

/// Simulate a fit run (sanity check, then train + validate epochs) and
/// an optional held-out test phase.
#[derive(Debug, Parser)]
#[command(name = "epochbar-demo", version, about)]
struct Args {
    /// Number of training epochs.
    #[arg(long, default_value_t = 3)]
    epochs: u64,

    /// Units per training phase.
    #[arg(long, default_value_t = 40)]
    train_units: u64,

    /// Units per validation phase (0 skips validation).
    #[arg(long, default_value_t = 15)]
    val_units: u64,

    /// Units for a held-out test phase after training (0 skips it).
    #[arg(long, default_value_t = 0)]
    test_units: u64,

    /// Units between renders (0 disables the bar).
    #[arg(long, default_value_t = 1)]
    refresh_rate: u32,

    /// Keep finished epoch rows on screen.
    #[arg(long)]
    leave: bool,

    /// Sanity-check unit budget.
    #[arg(long, default_value_t = 2)]
    sanity_steps: u64,

    /// TOML theme file overriding the default palette.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Run without touching the terminal.
    #[arg(long)]
    headless: bool,

    /// Upper bound of simulated work per unit, in milliseconds.
    #[arg(long, default_value_t = 35)]
    unit_ms: u64,
}

fn main() -> Result<()> {
    // Log lines go to stderr so they do not fight the live region.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = BarConfig::new()
        .refresh_rate(args.refresh_rate)
        .leave(args.leave)
        .sanity_steps(args.sanity_steps);
    if let Some(path) = &args.theme {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading theme file {}", path.display()))?;
        let theme: Theme = toml::from_str(&raw).context("parsing theme file")?;
        config = config.theme(theme);
    }

    let mut bar = if args.headless {
        EpochBar::with_surface(config, Box::new(NullSurface))
    } else {
        EpochBar::new(config)?
    };

    simulate(&mut bar, &args)?;
    Ok(())
}

fn simulate(bar: &mut EpochBar, args: &Args) -> Result<()> {
    let mut rng = rand::rng();

    // Sanity pass walks min(budget, availability) validation units.
    if args.val_units > 0 {
        bar.on_phase_start(Phase::SanityCheck, Some(args.val_units), 0)?;
        for _ in 0..args.sanity_steps.min(args.val_units) {
            work(&mut rng, args.unit_ms);
            bar.on_unit_processed(Phase::SanityCheck)?;
        }
        bar.on_phase_end(Phase::SanityCheck)?;
    }

    for epoch in 0..args.epochs {
        bar.on_phase_start(Phase::Train, Some(args.train_units), epoch)?;
        for _ in 0..args.train_units {
            work(&mut rng, args.unit_ms);
            bar.on_unit_processed(Phase::Train)?;
        }

        if args.val_units > 0 {
            bar.on_phase_start(Phase::Validate, Some(args.val_units), epoch)?;
            for _ in 0..args.val_units {
                work(&mut rng, args.unit_ms);
                bar.on_unit_processed(Phase::Validate)?;
            }
            bar.on_phase_end(Phase::Validate)?;
        }

        bar.on_phase_end(Phase::Train)?;
    }

    if args.test_units > 0 {
        bar.on_phase_start(Phase::Test, Some(args.test_units), 0)?;
        for _ in 0..args.test_units {
            work(&mut rng, args.unit_ms);
            bar.on_unit_processed(Phase::Test)?;
        }
        bar.on_phase_end(Phase::Test)?;
    }

    Ok(())
}

fn work(rng: &mut impl Rng, upper_ms: u64) {
    if upper_ms == 0 {
        return;
    }
    let ms = rng.random_range(upper_ms / 2..=upper_ms);
    thread::sleep(Duration::from_millis(ms));
}
