//! Headless runner: plays one run with the autopilot and records the score.
//!
//! Usage: dungeon-destruction [--seed N] [--config PATH] [--frames N]
//!        [--scores PATH] [--name NAME] [--profile] [--no-save]

use std::env;
use std::path::PathBuf;

use dungeon_destruction::autopilot;
use dungeon_destruction::constants::FRAMES_PER_SECOND;
use dungeon_destruction::leaderboard::{JsonScoreStore, MemoryScoreStore, ScoreStore};
use dungeon_destruction::{GameConfig, GameEngine};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Frame limit when `--frames` is not given: ten minutes of play
const DEFAULT_FRAME_LIMIT: u64 = 10 * 60 * FRAMES_PER_SECOND as u64;

#[derive(Debug)]
struct Args {
    seed: Option<u64>,
    config: Option<PathBuf>,
    frames: u64,
    scores: PathBuf,
    name: String,
    profile: bool,
    no_save: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        seed: None,
        config: None,
        frames: DEFAULT_FRAME_LIMIT,
        scores: PathBuf::from("scores.json"),
        name: "autopilot".to_string(),
        profile: false,
        no_save: false,
    };

    let mut iter = env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--seed" => args.seed = Some(value()?.parse()?),
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--frames" => args.frames = value()?.parse()?,
            "--scores" => args.scores = PathBuf::from(value()?),
            "--name" => args.name = value()?,
            "--profile" => args.profile = true,
            "--no-save" => args.no_save = true,
            other => return Err(format!("unknown argument '{other}'").into()),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    // Kept alive for the whole run so a profiler client can attach
    let _profiler = if args.profile {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        info!(%addr, "puffin server listening");
        Some(puffin_http::Server::new(&addr)?)
    } else {
        None
    };

    let dt = 1.0 / FRAMES_PER_SECOND as f32;
    let mut engine = GameEngine::new(config);
    for _ in 0..args.frames {
        puffin::GlobalProfiler::lock().new_frame();
        let input = autopilot::drive(engine.state());
        engine.step(&input, dt);
        if engine.is_over() {
            break;
        }
    }

    let score = match engine.final_score() {
        Some(score) => score,
        None => {
            warn!(frames = args.frames, "frame limit reached before the run ended");
            engine.score()
        }
    };
    info!(level = engine.level(), score, "final score");

    let mut store: Box<dyn ScoreStore> = if args.no_save {
        Box::new(MemoryScoreStore::new())
    } else {
        Box::new(JsonScoreStore::open(&args.scores)?)
    };
    store.record_score(&args.name, score)?;
    for (rank, entry) in store.top_scores(10)?.iter().enumerate() {
        info!(rank = rank + 1, name = %entry.name, score = entry.score, "leaderboard");
    }
    Ok(())
}
