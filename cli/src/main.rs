mod mods;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mania_pp::{Beatmap, ManiaPerformanceAttributes, Mods};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::mods::parse_mods;

#[derive(Parser)]
#[command(name = "mania-pp")]
#[command(about = "Calculate star rating and pp of osu!mania maps", version)]
struct Args {
    /// Path to the .osu file
    path: PathBuf,

    /// Mods as bit value or acronyms, e.g. 64 or NFDT
    #[arg(env = "MANIA_PP_MODS", default_value = "0", value_parser = parse_mods)]
    mods: u32,

    /// Score of the play
    #[arg(env = "MANIA_PP_SCORE", default_value_t = 1_000_000)]
    score: u32,

    /// Print the result as JSON
    #[arg(short, long)]
    json: bool,

    /// Log the decoding and calculation steps
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Output {
    stars: Option<f64>,
    pp: f64,
    pp_strain: f64,
    pp_acc: f64,
    mods: u32,
    score: u32,
    clock_rate: f64,
    key_count: usize,
    n_notes: usize,
}

impl Output {
    fn new(map: &Beatmap, args: &Args, attrs: &ManiaPerformanceAttributes) -> Self {
        Self {
            stars: attrs.stars(),
            pp: attrs.pp(),
            pp_strain: attrs.pp_strain,
            pp_acc: attrs.pp_acc,
            mods: args.mods,
            score: args.score,
            clock_rate: args.mods.clock_rate(),
            key_count: map.key_count,
            n_notes: map.notes.len(),
        }
    }
}

/// `RUST_LOG` takes precedence over the default level, `--verbose`
/// raises the crate's level to debug on top of either.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    let filter = match rust_log.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {} `{directives}`", EnvFilter::DEFAULT_ENV))?,
        None => EnvFilter::new("mania_pp=info"),
    };

    if verbose {
        Ok(filter.add_directive("mania_pp=debug".parse()?))
    } else {
        Ok(filter)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref(), args.verbose)?)
        .init();

    let map = Beatmap::from_path(&args.path)
        .with_context(|| format!("failed to decode {}", args.path.display()))?;

    info!(
        keys = map.key_count,
        notes = map.notes.len(),
        od = map.od,
        "Decoded {:?}",
        args.path
    );

    let attrs = map.pp().mods(args.mods).score(args.score).calculate();

    debug!(
        pp_strain = attrs.pp_strain,
        pp_acc = attrs.pp_acc,
        clock_rate = args.mods.clock_rate(),
        "Calculated performance"
    );

    if args.json {
        let output = Output::new(&map, &args, &attrs);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "SR: {:.2} PP: {:.2}",
            attrs.stars().unwrap_or(0.0),
            attrs.pp()
        );
    }

    Ok(())
}
