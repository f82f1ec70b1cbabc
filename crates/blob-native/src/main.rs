use anyhow::Context;
use blob_core::{BlobControls, BlobEngine};
use clap::Parser;
use std::path::{Path, PathBuf};

mod script;

/// Drive the blob engine through a scripted input timeline and log the
/// resulting transforms.
#[derive(Parser, Debug)]
#[command(name = "blob-native", version)]
struct Args {
    /// Settings JSON (camelCase keys, missing keys use defaults)
    settings: Option<PathBuf>,

    /// Seed for motion profile generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated run length in seconds
    #[arg(long, default_value_t = 6.0)]
    seconds: f64,
}

fn load_controls(path: Option<&Path>) -> anyhow::Result<BlobControls> {
    let Some(path) = path else {
        return Ok(BlobControls::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    BlobControls::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let controls = load_controls(args.settings.as_deref())?;
    log::debug!("[native] effective settings {}", controls.to_json()?);
    let visual = controls.visual_params();
    log::info!(
        "[native] size={}px blur={}px opacity={} blend={} bg={}",
        visual.size,
        visual.blur,
        visual.opacity,
        visual.blend_mode,
        visual.background
    );

    let engine = BlobEngine::new(controls, args.seed);
    let mut runner = script::Runner::new(engine, script::demo_script());
    let mut last_report = 0.0;
    let mut last_generation = 0;
    while runner.now() < args.seconds {
        if !runner.step() {
            continue;
        }
        let snap = runner.engine.snapshot();
        let transforms = snap.transforms(&runner.engine.controls);
        for (i, t) in transforms.iter().enumerate() {
            log::debug!(
                "[tick] t={:.2} blob{} x={:.1} y={:.1} scale={:.3}",
                runner.now(),
                i,
                t.x,
                t.y,
                t.scale
            );
        }
        if runner.engine.generation() != last_generation {
            last_generation = runner.engine.generation();
            log::info!(
                "[native] t={:.2} profiles regenerated ({})",
                runner.now(),
                last_generation
            );
        }
        if runner.now() - last_report >= 1.0 {
            last_report = runner.now();
            log::info!(
                "[native] t={:.2} dir=({:.2},{:.2}) press={:?} red=({:.1},{:.1})x{:.3} green=({:.1},{:.1})x{:.3} blue=({:.1},{:.1})x{:.3}",
                runner.now(),
                snap.direction.x,
                snap.direction.y,
                runner.engine.interaction.phase,
                transforms[0].x,
                transforms[0].y,
                transforms[0].scale,
                transforms[1].x,
                transforms[1].y,
                transforms[1].scale,
                transforms[2].x,
                transforms[2].y,
                transforms[2].scale
            );
        }
    }
    runner.engine.teardown();
    Ok(())
}
