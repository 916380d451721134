mod app;

use anyhow::Result;

use nodefield_engine::animation::AnimationEngine;
use nodefield_engine::device::GpuInit;
use nodefield_engine::graph::FieldConfig;
use nodefield_engine::logging::{LoggingConfig, init_logging};
use nodefield_engine::window::{Runtime, RuntimeConfig};

use app::NodefieldApp;

/// Pins the random source, e.g. `NODEFIELD_SEED=7`.
const SEED_VAR: &str = "NODEFIELD_SEED";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = FieldConfig::default();
    let engine = match seed_from_env() {
        Some(seed) => {
            log::info!("seeding node field with {seed}");
            AnimationEngine::seeded(config, seed)?
        }
        None => AnimationEngine::from_entropy(config)?,
    };

    // Colors are authored as sRGB bytes and blended as-is, like a 2D canvas.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run(RuntimeConfig::default(), gpu_init, NodefieldApp::new(engine))
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_VAR).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(e) => {
            log::warn!("ignoring {SEED_VAR}={raw:?}: {e}");
            None
        }
    }
}
