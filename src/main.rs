use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake3d::game::{Game, GameConfig};
use snake3d::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use snake3d::session::{Anonymous, LocalProfile, ScoreReporter, SessionProvider};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "snake3d")]
#[command(version, about = "Snake on a 3D grid")]
struct Cli {
    /// How to run the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edge length of the cubic grid
    #[arg(long)]
    grid_size: Option<u32>,

    /// Moves per second
    #[arg(long)]
    speed: Option<f64>,

    /// Start with the autopilot steering
    #[arg(long)]
    autopilot: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Profile file for recording high scores; play anonymously without one
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Player name for a new profile
    #[arg(long, default_value = "player")]
    player: String,

    /// Games to play in headless mode
    #[arg(long, default_value = "10")]
    games: usize,

    /// Tick limit per headless game
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Write logs here (human mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play in the terminal
    Human,
    /// Let the autopilot play and print a JSON report
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.autopilot |= self.autopilot;

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snake3d=info"));

    match (&cli.log_file, cli.mode) {
        (Some(path), _) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(std::sync::Mutex::new(file)))
                .with(filter)
                .init();
        }
        (None, Mode::Headless) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
        // The terminal belongs to the UI.
        (None, Mode::Human) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    let profile = match &cli.profile {
        Some(path) => Some(Arc::new(
            LocalProfile::open(path, &cli.player)
                .with_context(|| format!("Failed to open profile {}", path.display()))?,
        )),
        None => None,
    };
    let session: Arc<dyn SessionProvider> = match &profile {
        Some(profile) => profile.clone() as Arc<dyn SessionProvider>,
        None => Arc::new(Anonymous),
    };

    let game = Game::with_session(config, session).context("Failed to start game")?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(game);
            if let Some(profile) = profile {
                let (reporter, results) = ScoreReporter::new(profile);
                human_mode = human_mode.with_reporter(reporter, results);
            }
            human_mode.run().await?;
        }
        Mode::Headless => {
            let headless_config = HeadlessConfig {
                games: cli.games,
                max_ticks: cli.max_ticks,
            };
            let mut headless_mode = HeadlessMode::new(game, headless_config);
            if let Some(profile) = profile {
                let (reporter, results) = ScoreReporter::new(profile);
                headless_mode = headless_mode.with_reporter(reporter, results);
            }
            let report = headless_mode.run().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
