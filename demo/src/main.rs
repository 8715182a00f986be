//! Headless drag demo.
//!
//! Builds the reference scene (spheres plus one box on a small ground plane) on top of the
//! Rapier backend, replays a scripted drag session through the object registry and logs where
//! everything ends up.
//!
//! ```text
//! RUST_LOG=debug cargo run -p drag_demo -- --config demo/scene.toml --seed 7
//! ```

mod session;

use anyhow::Context;
use clap::Parser;
use drag_shared::{ObjectRegistry, RapierScene, SceneConfig, Transform};
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drag-demo", about = "Replay a scripted drag session against a Rapier scene")]
struct Args {
    /// Scene description (TOML). Defaults to the built-in reference scene.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spawn placement seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Physics steps to run before and after the scripted drags.
    #[arg(long, default_value_t = 90)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let scene = RapierScene::from_config(Transform::identity(), &config);
    let mut registry = ObjectRegistry::new(scene, config);
    let handles = registry.populate(&mut rng).context("populating scene")?;
    info!("spawned {} objects", handles.len());

    let report = session::run(&mut registry, args.steps)?;
    report.log();

    Ok(())
}
