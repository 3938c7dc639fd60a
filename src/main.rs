//! wildroot - server-authoritative survival economy core
//!
//! Headless demo binary that runs the resource economy for a fixed number
//! of ticks with a single simulated player.

mod config;

use anyhow::Result;
use config::EconomyConfig;
use std::{env, path::PathBuf};
use tracing::info;
use wildroot_core::PlayerId;
use wildroot_server::{EventOutcome, InboundEvent, Server};
use wildroot_world::{SurfaceHit, TerrainProbe};

/// Gentle rolling hills, enough to exercise surface probing without a
/// full terrain stack behind it.
struct DemoTerrain;

impl TerrainProbe for DemoTerrain {
    fn probe_down(&self, x: f64, z: f64) -> Option<SurfaceHit> {
        let height = 64.0 + 3.0 * (x * 0.05).sin() + 2.0 * (z * 0.07).cos();
        let slope = 0.15 * (x * 0.05).cos().abs() + 0.14 * (z * 0.07).sin().abs();
        Some(SurfaceHit {
            height,
            tilt_degrees: slope.atan().to_degrees() as f32,
        })
    }
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting wildroot v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match &cli.config_path {
        Some(path) => EconomyConfig::load_from_path(path),
        None => EconomyConfig::load(),
    };
    if let Some(seed) = cli.seed {
        config.world_seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        config.demo_ticks = ticks;
    }

    run_demo(&config)
}

fn run_demo(config: &EconomyConfig) -> Result<()> {
    let terrain = DemoTerrain;
    let mut server = Server::new(config.server_options(), &terrain);
    info!(
        nodes = server.nodes().count(),
        seed = config.world_seed,
        "Economy server ready"
    );

    let player = PlayerId::new("demo_player");
    server.handle(InboundEvent::PlayerJoined {
        player: player.clone(),
    });

    let mut hits = 0u64;
    let mut destroyed = 0u64;
    let mut respawned = 0u64;
    for _ in 0..config.demo_ticks {
        let summary = server.tick();
        respawned += summary.nodes_respawned as u64;

        // One swing every 10 ticks, aimed from the nearest living node.
        if summary.tick.0 % 10 != 0 {
            continue;
        }
        let Some(target) = server
            .nodes()
            .alive_nodes()
            .into_iter()
            .next()
            .map(|node| node.position)
        else {
            continue;
        };
        let outcome = server.handle(InboundEvent::Attack {
            actor: player.clone(),
            raw_damage: config.demo_attack_damage,
            tool: None,
            position: target,
        });
        match outcome {
            EventOutcome::AttackHit {
                destroyed: was_destroyed,
                ..
            } => {
                hits += 1;
                if was_destroyed {
                    destroyed += 1;
                }
            }
            EventOutcome::AttackMissed => {}
            other => info!(?other, "Unexpected attack outcome"),
        }
    }

    info!(hits, destroyed, respawned, "Demo loop finished");

    if let Some(ledger) = server.players().ledger(&player) {
        let resources = serde_json::to_string_pretty(ledger.resources())?;
        println!("Ledger for {player} after {} ticks:", config.demo_ticks);
        println!("{resources}");
        println!("Total units held: {}", ledger.total_units());
    }

    Ok(())
}

/// Command-line options, parsed by hand to keep the binary dependency-light.
#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    ticks: Option<u64>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut options = CliOptions::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    options.config_path = args.next().map(PathBuf::from);
                }
                "--seed" => {
                    options.seed = args.next().and_then(|v| v.parse().ok());
                }
                "--ticks" => {
                    options.ticks = args.next().and_then(|v| v.parse().ok());
                }
                "--help" | "-h" => {
                    println!("wildroot [--config PATH] [--seed N] [--ticks N]");
                    std::process::exit(0);
                }
                other => {
                    tracing::warn!("Ignoring unknown argument: {other}");
                }
            }
        }
        options
    }
}
