//! Headless autopilot runs
//!
//! Plays complete games with the autopilot on a virtual clock, without a
//! terminal. Useful for soak-testing the engine and for benchmarking the
//! heuristic across grid sizes.

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::game::{CollisionKind, Game, Mode};
use crate::metrics::GameMetrics;
use crate::session::{ScoreReporter, ScoreResult};

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of games to play
    pub games: usize,
    /// Give up on a game after this many ticks
    pub max_ticks: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_ticks: 10_000,
        }
    }
}

/// Result of one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: u64,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub collision: Option<CollisionKind>,
    pub new_high_score: bool,
}

/// Aggregate over all games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessReport {
    pub runs: Vec<RunSummary>,
    pub best_score: u32,
    pub mean_score: f64,
}

pub struct HeadlessMode {
    game: Game,
    config: HeadlessConfig,
    metrics: GameMetrics,
    reporter: Option<(ScoreReporter, UnboundedReceiver<ScoreResult>)>,
    /// Virtual clock, whole seconds
    now: f64,
}

impl HeadlessMode {
    pub fn new(mut game: Game, config: HeadlessConfig) -> Self {
        game.set_autopilot(true);

        Self {
            game,
            config,
            metrics: GameMetrics::new(),
            reporter: None,
            now: 0.0,
        }
    }

    pub fn with_reporter(
        mut self,
        reporter: ScoreReporter,
        results: UnboundedReceiver<ScoreResult>,
    ) -> Self {
        self.reporter = Some((reporter, results));
        self
    }

    pub async fn run(&mut self) -> Result<HeadlessReport> {
        let mut runs = Vec::with_capacity(self.config.games);

        for game_index in 0..self.config.games {
            if game_index > 0 {
                self.game.restart().context("Failed to restart game")?;
            }
            let summary = self.play_one().await?;
            info!(
                run_id = summary.run_id,
                score = summary.score,
                ticks = summary.ticks,
                collision = ?summary.collision,
                "game finished"
            );
            runs.push(summary);
        }

        let best_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let mean_score = if runs.is_empty() {
            0.0
        } else {
            runs.iter().map(|r| f64::from(r.score)).sum::<f64>() / runs.len() as f64
        };

        Ok(HeadlessReport {
            runs,
            best_score,
            mean_score,
        })
    }

    async fn play_one(&mut self) -> Result<RunSummary> {
        self.metrics.on_game_start();
        let mut collision = None;

        while self.metrics.ticks < self.config.max_ticks {
            // A whole second always covers one tick interval (speed >= 1).
            self.now += 1.0;
            let outcome = self.game.update(self.now).context("Game engine failure")?;
            self.metrics.on_update(&outcome);

            if let Some(submission) = outcome.submission {
                if let Some((reporter, results)) = &mut self.reporter {
                    reporter.submit(submission);
                    // Wait here so the summary carries the answer
                    if let Some(result) = results.recv().await {
                        self.game.apply_score_result(result.run_id, result.outcome);
                    }
                }
            }

            if let Some(tick) = outcome.tick {
                debug_assert!(!self.game.snake().has_overlap());
                collision = tick.collision;
            }
            if self.game.mode() == Mode::GameOver {
                break;
            }
        }

        self.metrics.on_game_over(self.game.score());
        if collision.is_none() {
            debug!(run_id = self.game.run_id(), "tick limit reached");
        }

        Ok(RunSummary {
            run_id: self.game.run_id(),
            score: self.game.score(),
            length: self.game.snake().len(),
            ticks: self.metrics.ticks,
            collision,
            new_high_score: self.game.new_high_score(),
        })
    }
}
