//! Platformer demo
//!
//! Builds a small walled level, drops a player and a handful of crates into
//! it, and runs the platforming controller headless for a fixed number of
//! ticks. Progress is reported through the log.
//!
//! ```text
//! platformer_demo [config.toml|config.ron] [ticks]
//! ```

use platforming::foundation::logging;
use platforming::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const LEVEL_WIDTH: f32 = 640.0;
const FLOOR_Y: f32 = 200.0;
const WALL_WIDTH: f32 = 16.0;
const CRATE_SIZE: f32 = 16.0;
const CRATE_FIRST_X: f32 = 64.0;
const CRATE_SPACING: f32 = 48.0;
const MAX_CRATES: u32 = 11;
const REPORT_INTERVAL: u32 = 30;

/// Demo errors
#[derive(thiserror::Error, Debug)]
enum DemoError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Bad command line
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Demo settings, loadable from TOML or RON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct DemoConfig {
    /// Number of ticks to simulate
    ticks: u32,
    /// Crates dropped into the level
    crate_count: u32,
    /// Seed for crate placement
    seed: u64,
    /// Resolver settings
    physics: PlatformingConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 180,
            crate_count: 5,
            seed: 1,
            physics: PlatformingConfig::default(),
        }
    }
}

impl Config for DemoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.crate_count > MAX_CRATES {
            return Err(ConfigError::Invalid {
                field: "crate_count",
                reason: format!(
                    "at most {MAX_CRATES} crates fit in the level, got {}",
                    self.crate_count
                ),
            });
        }
        self.physics.validate()
    }
}

struct Level {
    bodies: BodySet,
    player: BodyId,
    dynamic: Vec<BodyId>,
}

impl Level {
    fn build(config: &DemoConfig) -> Self {
        let mut bodies = BodySet::new();
        let solid = CollisionLayers::SOLID;

        bodies.insert(BoundingBox::new(0.0, FLOOR_Y, LEVEL_WIDTH, 16.0).with_layers(solid));
        bodies.insert(BoundingBox::new(0.0, 0.0, WALL_WIDTH, FLOOR_Y).with_layers(solid));
        bodies.insert(
            BoundingBox::new(LEVEL_WIDTH - WALL_WIDTH, 0.0, WALL_WIDTH, FLOOR_Y).with_layers(solid),
        );

        let player = bodies.insert(
            BoundingBox::new(32.0, 120.0, 16.0, 32.0)
                .with_layers(CollisionLayers::PLAYER)
                .with_velocity(3.0, 0.0),
        );

        // One crate per slot, jittered inside its slot so none start touching
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut dynamic = vec![player];
        for slot in 0..config.crate_count {
            let jitter = rng.gen_range(0.0_f32..16.0).floor();
            let x = CRATE_FIRST_X + slot as f32 * CRATE_SPACING + jitter;
            let y = rng.gen_range(0.0_f32..120.0).floor();
            let body = BoundingBox::new(x, y, CRATE_SIZE, CRATE_SIZE).with_layers(solid);
            dynamic.push(bodies.insert(body));
        }

        Self {
            bodies,
            player,
            dynamic,
        }
    }
}

/// Optional config path and tick override from the command line
fn parse_args(
    args: impl Iterator<Item = String>,
) -> Result<(Option<String>, Option<u32>), DemoError> {
    let mut path = None;
    let mut ticks = None;

    for arg in args {
        if let Ok(value) = arg.parse::<u32>() {
            if ticks.replace(value).is_some() {
                return Err(DemoError::InvalidArgument(format!("tick count given twice: {arg}")));
            }
        } else if path.replace(arg.clone()).is_some() {
            return Err(DemoError::InvalidArgument(format!("config path given twice: {arg}")));
        }
    }

    Ok((path, ticks))
}

fn run(config: &DemoConfig) {
    let controller = PlatformerController::new(config.physics.clone());
    let mut level = Level::build(config);

    log::info!(
        "Level ready: {} bodies, {} dynamic, {} ticks",
        level.bodies.len(),
        level.dynamic.len(),
        config.ticks
    );

    let mut landings = 0;
    let mut overhead_hits = 0;

    for tick in 0..config.ticks {
        let reports = controller.step_bodies(&mut level.bodies, &level.dynamic);

        for (id, report) in &reports {
            if report.hit_overhead {
                overhead_hits += 1;
                log::debug!("Tick {tick}: {id:?} hit a ceiling");
            }
            if report.outcome.y_blocked && report.on_ground {
                landings += 1;
                log::debug!("Tick {tick}: {id:?} landed");
            }
        }

        if tick % REPORT_INTERVAL == 0 {
            if let Some(player) = level.bodies.get(level.player) {
                let position = player.final_position();
                log::info!(
                    "Tick {tick}: player at ({}, {}) speed ({:.1}, {:.1})",
                    position.x,
                    position.y,
                    player.x_speed(),
                    player.y_speed()
                );
            }
        }
    }

    let candidates = level.bodies.snapshot();
    let ground = CollisionLayers::ground_filter(controller.config().ground_mask);
    let grounded = level
        .dynamic
        .iter()
        .filter_map(|&id| level.bodies.get(id))
        .filter(|&body| controller.platforming().is_on_ground(body, &candidates, ground))
        .count();

    log::info!(
        "Finished: {landings} landings, {overhead_hits} ceiling hits, {grounded}/{} grounded",
        level.dynamic.len()
    );
}

fn main() -> Result<(), DemoError> {
    logging::init();

    let (path, ticks) = parse_args(std::env::args().skip(1))?;
    let mut config = match path {
        Some(path) => {
            log::info!("Loading config from {path}");
            DemoConfig::load_from_file(&path)?
        }
        None => DemoConfig::default(),
    };
    if let Some(ticks) = ticks {
        config.ticks = ticks;
    }

    run(&config);
    Ok(())
}
