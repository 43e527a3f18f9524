use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::interval;
use tracing::info;

use crate::game::{Game, InputEvent, UpdateOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{ScoreReporter, ScoreResult};

/// Interactive play in the terminal
pub struct HumanMode {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    reporter: Option<ScoreReporter>,
    score_results: Option<UnboundedReceiver<ScoreResult>>,
    clock: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            reporter: None,
            score_results: None,
            clock: Instant::now(),
            should_quit: false,
        }
    }

    /// Report final scores through `reporter`, reading answers from `results`
    pub fn with_reporter(
        mut self,
        reporter: ScoreReporter,
        results: UnboundedReceiver<ScoreResult>,
    ) -> Self {
        self.reporter = Some(reporter);
        self.score_results = Some(results);
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Sample the clock well above the fastest game speed; the engine gates ticks itself.
        let mut clock_timer = interval(Duration::from_millis(10));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        // Held outside self for the select below
        let mut score_results = self.score_results.take();

        self.clock = Instant::now();
        self.metrics.on_game_start();
        info!(run_id = self.game.run_id(), "human mode started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Advance the simulation clock
                _ = clock_timer.tick() => {
                    let now = self.clock.elapsed().as_secs_f64();
                    let outcome = self.game.update(now).context("Game engine failure")?;
                    self.on_update(&outcome);
                }

                // Late answers from the score service
                Some(result) = next_score_result(&mut score_results) => {
                    self.game.apply_score_result(result.run_id, result.outcome);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.game.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(event) => self.apply_input(event)?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn apply_input(&mut self, event: InputEvent) -> Result<()> {
        let run_before = self.game.run_id();
        self.game
            .handle_input(event)
            .context("Game engine failure")?;

        if self.game.run_id() != run_before {
            self.metrics.on_game_start();
        }
        Ok(())
    }

    fn on_update(&mut self, outcome: &UpdateOutcome) {
        self.metrics.on_update(outcome);

        if outcome.tick.is_some_and(|tick| tick.collision.is_some()) {
            self.metrics.on_game_over(self.game.score());
        }

        if let Some(submission) = outcome.submission {
            match &self.reporter {
                Some(reporter) => reporter.submit(submission),
                None => info!(score = submission.score, "no score service, result not recorded"),
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Next score result, or never if no reporter is attached
async fn next_score_result(
    results: &mut Option<UnboundedReceiver<ScoreResult>>,
) -> Option<ScoreResult> {
    match results {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
