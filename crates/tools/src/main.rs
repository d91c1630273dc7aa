use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_core::TuningConfig;
use crawl_core::mapgen::{Level, MapGenerator, derive_level_seed};
use crawl_tools::render::render_level;
use crawl_tools::seed::resolve_seed;
use log::info;

/// Generates tomb floors and prints them as text or JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Depth of the single floor to generate
    #[arg(short, long, default_value_t = 1)]
    depth: u32,
    /// Generate a whole tomb of this many floors instead of a single floor
    #[arg(short, long)]
    floors: Option<u32>,
    #[arg(long, default_value_t = 60)]
    width: usize,
    #[arg(long, default_value_t = 30)]
    height: usize,
    /// TOML tuning file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print levels as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<TuningConfig> {
    match path {
        Some(path) => TuningConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(TuningConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.width < 3 || args.height < 3 {
        bail!("map must be at least 3x3, got {}x{}", args.width, args.height);
    }

    let config = load_config(args.config.as_ref())?;
    let seed = resolve_seed(args.seed);
    if seed.generated {
        info!("no seed given, using {}", seed.value);
    }

    let generator = MapGenerator::new(config.generation);
    let depths = match args.floors {
        Some(0) => bail!("--floors must be at least 1"),
        Some(floors) => 1..=floors,
        None => args.depth..=args.depth,
    };
    let levels: Vec<Level> = depths
        .map(|depth| {
            let level_seed = derive_level_seed(seed.value, depth);
            generator.generate(depth, args.width, args.height, level_seed)
        })
        .collect();

    if args.json {
        let text =
            serde_json::to_string_pretty(&levels).context("Failed to serialize levels to JSON")?;
        println!("{text}");
        return Ok(());
    }

    println!("run seed {}", seed.value);
    for level in &levels {
        if !level.has_stairs() {
            println!("(depth {} has no rooms; the map is too small)", level.depth);
        }
        println!("{}", render_level(level));
    }
    Ok(())
}
