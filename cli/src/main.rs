mod bot_controller;
mod feedback;

use clap::Parser;
use snake_common::driver::{DriverReport, run_realtime, run_simulated};
use snake_common::logger::{self, LogLevel};
use snake_common::snake::{Difficulty, GameEngine};
use snake_common::{LifetimeStats, ProfileStore, SessionRng, log, log_warn};

use bot_controller::{BotController, BotKind};
use feedback::FeedbackSink;

const TUTORIAL: &str = "\
Eat food (*) to grow and score 10 points. Every 50 points is a new level.
Avoid the walls and your own body. Power-ups (+) show up every 50 points:
  Speed and Slow change the pace, Multiplier doubles food points,
  Invincible lets you pass through walls and yourself.";

#[derive(Parser)]
#[command(name = "snake_cli")]
struct Args {
    /// Profile file holding settings, stats and the high score.
    #[arg(long, default_value = "snake_profile.yaml")]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 5_000)]
    max_ticks: u64,

    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    grid_size: Option<u32>,

    #[arg(long, value_enum, default_value_t = BotKind::Greedy)]
    bot: BotKind,

    /// Wait out every tick interval instead of simulating as fast as possible.
    #[arg(long)]
    realtime: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn print_summary(engine: &GameEngine, report: &DriverReport, high_score: u32, stats: &LifetimeStats) {
    let snapshot = engine.snapshot();
    print!("{}", snapshot.render_ascii());
    println!("Score: {}  Level: {}  Length: {}", snapshot.score, snapshot.level, snapshot.snake.len());
    match report.game_over {
        Some(reason) => println!("Game over after {} ticks: {:?}", report.ticks, reason),
        None => println!("Stopped after {} ticks", report.ticks),
    }
    println!("High score: {}", high_score);
    println!(
        "Games played: {}  Best: {}  Average: {}  Best streak: {}  Play time: {}",
        stats.games_played,
        stats.best_score,
        stats.average_score(),
        stats.best_streak,
        stats.formatted_play_time()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogLevel::Info);

    let store = ProfileStore::from_yaml_file(&args.config);
    let mut settings = store.profile().settings;
    if let Some(difficulty) = args.difficulty {
        settings.set_difficulty(difficulty);
    }
    if let Some(grid_size) = args.grid_size {
        settings.set_grid_size(grid_size as i64);
    }
    if let Err(e) = store.set_settings(settings.clone()) {
        log_warn!("Could not save settings: {}", e);
    }

    if !store.profile().tutorial_completed {
        println!("{}", TUTORIAL);
        if let Err(e) = store.complete_tutorial() {
            log_warn!("Could not save tutorial progress: {}", e);
        }
    }

    let rng = args.seed.map_or_else(SessionRng::from_random, SessionRng::new);
    let mut bot_rng = SessionRng::new(rng.seed().wrapping_add(1));
    log!(
        "Starting {:?} game on {1}x{1} grid, seed {2}",
        settings.difficulty,
        settings.grid_size,
        rng.seed()
    );

    let sink = FeedbackSink::new(settings.sound_enabled);
    let mut engine = GameEngine::new(settings, rng, Box::new(sink), Box::new(store.clone()));
    engine.resume();

    let bot = args.bot;
    let steer = |engine: &mut GameEngine| {
        if let Some(direction) = BotController::calculate_move(bot, &engine.snapshot(), &mut bot_rng) {
            engine.request_direction(direction);
        }
    };
    let report = if args.realtime {
        run_realtime(&mut engine, args.max_ticks, steer).await
    } else {
        run_simulated(&mut engine, args.max_ticks, steer)
    };
    engine.pause();

    let profile = store.profile();
    print_summary(&engine, &report, profile.high_score, &profile.stats);

    if let Err(e) = store.save() {
        log_warn!("Could not save profile to {}: {}", args.config, e);
    }

    Ok(())
}
