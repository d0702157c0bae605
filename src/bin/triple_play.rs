use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use triple_tiles::{DirLevelSource, Engine, EngineConfig, HintOutcome, ShuffleOutcome, TileHandle};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless auto-player for triple-tiles levels")]
struct Cli {
    /// Directory containing <name>.json level files
    #[arg(long, value_name = "DIR", default_value = "levels")]
    levels: PathBuf,

    /// Level name (file stem)
    #[arg(long, value_name = "NAME")]
    level: String,

    /// Optional engine config JSON; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed for ids and shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Number of symbol types
    #[arg(long, value_name = "N")]
    types: Option<u32>,

    /// Tray capacity
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Shuffles to try when no hint is available
    #[arg(long, value_name = "N", default_value_t = 1)]
    shuffles: usize,
}

/// Picks the selectable tile whose id is most common in the tray.
fn greedy_pick(engine: &Engine) -> Option<TileHandle> {
    let tray_count = |id: i32| {
        engine
            .tray()
            .tiles()
            .iter()
            .filter(|&&h| engine.board().get(h).is_some_and(|t| t.id == id))
            .count()
    };
    engine
        .selectable_tiles()
        .into_iter()
        .max_by_key(|&h| engine.board().get(h).map_or(0, |t| tray_count(t.id)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json)?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(types) = cli.types {
        config.type_count = types;
    }
    if let Some(capacity) = cli.capacity {
        ensure!(capacity > 0, "--capacity must be at least 1");
        config = config.with_tray_capacity(capacity);
    }

    let source = DirLevelSource::new(&cli.levels);
    let mut engine = Engine::load(&source, &cli.level, config)
        .with_context(|| format!("loading level '{}'", cli.level))?;
    info!("loaded '{}' with {} tiles", cli.level, engine.board().len());

    let mut hints = 0usize;
    let mut picks = 0usize;
    let mut shuffles_left = cli.shuffles;
    while !engine.is_complete() {
        match engine.hint() {
            HintOutcome::Started(_) => hints += 1,
            _ if shuffles_left > 0
                && matches!(engine.shuffle(), ShuffleOutcome::Started { .. }) =>
            {
                shuffles_left -= 1;
            }
            _ => {
                let Some(tile) = greedy_pick(&engine) else {
                    break;
                };
                if !engine.pick(tile).is_accepted() {
                    break;
                }
                picks += 1;
            }
        }
        engine.settle();
    }

    if engine.is_complete() {
        info!(
            "cleared '{}' using {} hints, {} picks and {} shuffles",
            cli.level,
            hints,
            picks,
            cli.shuffles - shuffles_left
        );
    } else {
        info!(
            "stuck on '{}': {} tiles left, tray {}/{}",
            cli.level,
            engine.board().live_count(),
            engine.tray().len(),
            engine.tray().capacity()
        );
    }
    Ok(())
}
