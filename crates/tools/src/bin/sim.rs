use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_core::tactics::resolve_melee;
use crawl_core::{Tomb, TuningConfig, World, WorldEvent};
use crawl_tools::render::render_world;
use crawl_tools::seed::resolve_seed;
use log::{info, warn};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

/// Headless soak: random player input against a generated tomb, checking invariants each turn.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    #[arg(short, long, default_value_t = 3)]
    floors: u32,
    #[arg(long, default_value_t = 60)]
    width: usize,
    #[arg(long, default_value_t = 30)]
    height: usize,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
    /// Dump the final floor as text
    #[arg(long)]
    show_map: bool,
}

#[derive(Debug, Default, Serialize)]
struct SimReport {
    seed: u64,
    turns_played: u32,
    final_depth: u32,
    deepest_depth: u32,
    player_hp: Option<i32>,
    deaths: usize,
    explosions: usize,
    projectiles_fired: usize,
    snapshot_hash: u64,
}

fn check_invariants(world: &World) -> Result<()> {
    let mut occupied = BTreeSet::new();
    for actor in world.actors() {
        if actor.hp <= 0 || actor.hp > actor.max_hp {
            bail!("actor {:?} has hp {} of {}", actor.id, actor.hp, actor.max_hp);
        }
        if !world.grid().is_passable(actor.pos) {
            bail!("actor {:?} stands on blocked tile {:?}", actor.id, actor.pos);
        }
        if !occupied.insert(actor.pos) {
            bail!("two actors share {:?}", actor.pos);
        }
    }
    for projectile in world.projectiles() {
        if !world.grid().in_bounds(projectile.pos) {
            bail!("projectile {:?} left the map at {:?}", projectile.id, projectile.pos);
        }
    }
    Ok(())
}

fn tally(report: &mut SimReport, events: &[WorldEvent]) {
    for event in events {
        match event {
            WorldEvent::ActorDied { .. } => report.deaths += 1,
            WorldEvent::Explosion { .. } => report.explosions += 1,
            WorldEvent::ProjectileCreated { .. } => report.projectiles_fired += 1,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TuningConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => TuningConfig::default(),
    };
    let seed = resolve_seed(args.seed).value;
    info!("soaking seed {seed} for up to {} turns", args.turns);

    let mut tomb = Tomb::generate(seed, args.floors, args.width, args.height, config);
    let mut inputs = ChaCha8Rng::seed_from_u64(seed);
    let mut report = SimReport { seed, final_depth: 1, deepest_depth: 1, ..SimReport::default() };

    for turn in 0..args.turns {
        let Some((player_id, player_pos)) =
            tomb.current().player().map(|actor| (actor.id, actor.pos))
        else {
            warn!("player is gone after {turn} turns");
            break;
        };

        match inputs.next_u64() % 40 {
            0 => {
                tomb.descend();
            }
            1 => {
                tomb.ascend();
            }
            roll => {
                let world = tomb.current_mut();
                let step = player_pos.neighbors8()[(roll % 8) as usize];
                match world.actor_at(step) {
                    Some(enemy) => {
                        resolve_melee(world, player_id, enemy);
                    }
                    None => {
                        world.try_move(player_id, step);
                    }
                }
            }
        }

        let world = tomb.current_mut();
        world.run_turn();
        let events = world.drain_events();
        tally(&mut report, &events);
        check_invariants(world)
            .with_context(|| format!("invariant broken on seed {seed} at turn {turn}"))?;

        report.turns_played = turn + 1;
        report.deepest_depth = report.deepest_depth.max(tomb.depth());
    }

    report.final_depth = tomb.depth();
    report.player_hp = tomb.current().player().map(|actor| actor.hp);
    report.snapshot_hash = tomb.current().snapshot_hash();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
    } else {
        println!("{report:#?}");
    }
    if args.show_map {
        println!("{}", render_world(tomb.current()));
    }
    Ok(())
}
