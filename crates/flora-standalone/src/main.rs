//! Headless bouquet runner.
//!
//! Drives the bouquet for a fixed number of frames against a renderer that
//! only keeps statistics, then prints a summary. Useful for profiling and for
//! checking configuration files.

mod stats;

use anyhow::{bail, Context, Result};
use clap::Parser;
use flora_bouquet::{Bouquet, BouquetConfig};
use flora_core::{ColorScheme, ParamId, NOMINAL_FRAME_DT};
use flora_decor::{ParticleField, ParticleSettings};
use stats::StatsRenderer;
use std::fmt::Write;
use std::path::PathBuf;

/// Animate a procedural flower bouquet without a window
#[derive(Parser, Debug)]
#[command(name = "flora", version)]
struct Cli {
    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = NOMINAL_FRAME_DT)]
    dt: f64,

    /// JSON bouquet configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override a parameter, e.g. `--set xPoints=40` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Start with playback paused
    #[arg(long)]
    paused: bool,

    /// Color scheme by name, e.g. `rose-magenta`
    #[arg(long)]
    scheme: Option<String>,

    /// Disable the particle field
    #[arg(long)]
    no_particles: bool,

    /// Disable instance drift
    #[arg(long)]
    no_drift: bool,

    /// Particle seed
    #[arg(long)]
    seed: Option<u32>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print every tunable parameter with its range and exit
    #[arg(long)]
    list_params: bool,
}

/// One line per parameter: name, label, range, default and description.
fn param_table() -> String {
    let mut out = String::new();
    for id in ParamId::ALL {
        let spec = id.spec();
        let kind = if spec.structural { " (regenerates)" } else { "" };
        let _ = writeln!(
            out,
            "{:<18} {:<18} [{}, {}] default {}{kind}\n    {}",
            spec.name, spec.label, spec.min, spec.max, spec.default_value, spec.description
        );
    }
    out
}

fn parse_override(arg: &str) -> Result<(&str, f64)> {
    let Some((name, value)) = arg.split_once('=') else {
        bail!("expected NAME=VALUE, got '{arg}'");
    };
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {name}"))?;
    Ok((name.trim(), value))
}

fn load_config(cli: &Cli) -> Result<BouquetConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            BouquetConfig::from_json(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => BouquetConfig::default(),
    };

    for arg in &cli.overrides {
        let (name, value) = parse_override(arg)?;
        let id = config.params.set_by_name(name, value)?;
        log::info!("{} = {}", id.name(), config.params.get(id));
    }

    if let Some(name) = &cli.scheme {
        let Some(scheme) = ColorScheme::from_name(name) else {
            let known: Vec<_> = ColorScheme::ALL.iter().map(|s| s.name()).collect();
            bail!("unknown color scheme '{name}' (known: {})", known.join(", "));
        };
        config.gradient = scheme.gradient();
    }

    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.list_params {
        print!("{}", param_table());
        return Ok(());
    }
    let config = load_config(&cli)?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let particles = (!cli.no_particles).then(|| {
        let mut settings = ParticleSettings::default();
        if let Some(seed) = cli.seed {
            settings.seed = seed;
        }
        ParticleField::new(settings)
    });

    let mut bouquet = Bouquet::new(config, StatsRenderer::default()).with_particles(particles);
    if cli.no_drift {
        bouquet = bouquet.with_drift(None);
    }
    if cli.paused {
        bouquet.command_sender().toggle_playback();
    }

    log::info!(
        "running {} frames at dt={} with {} flowers",
        cli.frames,
        cli.dt,
        bouquet.manager().len()
    );

    let started = std::time::Instant::now();
    let mut last = Default::default();
    for _ in 0..cli.frames {
        last = bouquet.frame(cli.dt);
    }
    let elapsed = started.elapsed();
    let ticks = bouquet.clock().ticks();

    let stats = bouquet.into_renderer();
    println!("{}", stats.summary(&last, cli.frames, ticks, elapsed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("xPoints=40").unwrap(), ("xPoints", 40.0));
        assert_eq!(parse_override(" radialScale = 2.5").unwrap(), ("radialScale", 2.5));
        assert!(parse_override("xPoints").is_err());
        assert!(parse_override("xPoints=lots").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["flora"]);
        assert_eq!(cli.frames, 600);
        assert_eq!(cli.dt, NOMINAL_FRAME_DT);
        assert!(!cli.paused);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let cli = Cli::parse_from(["flora", "--set", "xPoints=999", "--scheme", "green-lime"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.params.x_points, 50);
        assert_eq!(config.gradient, ColorScheme::GreenLime.gradient());
    }

    #[test]
    fn test_param_table_lists_every_param() {
        let table = param_table();
        for id in ParamId::ALL {
            assert!(table.contains(id.name()));
            assert!(table.contains(id.spec().label));
            assert!(table.contains(id.spec().description));
        }
        assert!(table.contains("xPoints"));
        assert!(table.contains("Shape Resolution"));
        assert_eq!(table.matches("(regenerates)").count(), 2);
    }

    #[test]
    fn test_unknown_override_rejected() {
        let cli = Cli::parse_from(["flora", "--set", "petals=3"]);
        assert!(load_config(&cli).is_err());
    }
}
