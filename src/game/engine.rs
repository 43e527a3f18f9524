use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::action::{Direction, InputEvent};
use super::autopilot;
use super::config::GameConfig;
use super::error::EngineError;
use super::food::place_food;
use super::movement::{MoveOutcome, advance_snake};
use super::state::{Cell, GridBounds, Mode, Resume, Snake, Snapshot};
use crate::session::{Anonymous, RunId, ScoreError, ScoreSubmission, SessionProvider};

/// Food slot. A pending slot is the single in-flight placement.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FoodSlot {
    Ready(Cell),
    /// Eaten; a replacement is due at `due_at` (seconds on the tick clock)
    Pending { due_at: f64 },
}

impl FoodSlot {
    fn eatable(&self) -> Option<Cell> {
        match self {
            FoodSlot::Ready(cell) => Some(*cell),
            FoodSlot::Pending { .. } => None,
        }
    }
}

/// Everything that happened during one call to [`Game::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    /// Set when a tick fired
    pub tick: Option<MoveOutcome>,
    /// Set when a pending food placement completed
    pub food_placed: Option<Cell>,
    /// Set on the tick that ended the run, if the score should be recorded
    pub submission: Option<ScoreSubmission>,
}

/// The game engine: owns one run's state and every rule that changes it.
///
/// All mutation goes through [`Game::handle_input`] and [`Game::update`].
pub struct Game {
    config: GameConfig,
    bounds: GridBounds,
    speed: f64,

    snake: Snake,
    food: FoodSlot,
    /// Direction applied on the last tick
    direction: Direction,
    /// Latched input, consumed by the next tick
    pending_direction: Direction,
    score: u32,
    mode: Mode,

    run_id: RunId,
    last_tick: f64,
    autopilot: bool,
    path_overlay: bool,
    new_high_score: bool,
    score_submitted: bool,

    session: Arc<dyn SessionProvider>,
    rng: StdRng,
}

impl Game {
    pub const INITIAL_HEAD: Cell = Cell::ORIGIN;
    pub const INITIAL_DIRECTION: Direction = Direction::PosX;

    /// Start an anonymous game
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_session(config, Arc::new(Anonymous))
    }

    /// Start a game whose final scores are reported for the session's user.
    ///
    /// Fails with [`EngineError::InvalidConfig`] if `config` does not validate.
    pub fn with_session(
        config: GameConfig,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bounds = GridBounds::new(config.clamp_grid_size(i64::from(config.grid_size)));
        let snake = Snake::new(Self::INITIAL_HEAD);
        let food = place_food(&snake, bounds, &mut rng, config.max_placement_attempts)?;

        Ok(Self {
            speed: config.clamp_speed(config.speed),
            autopilot: config.autopilot,
            config,
            bounds,
            snake,
            food: FoodSlot::Ready(food),
            direction: Self::INITIAL_DIRECTION,
            pending_direction: Self::INITIAL_DIRECTION,
            score: 0,
            mode: Mode::Playing,
            run_id: 0,
            last_tick: 0.0,
            path_overlay: true,
            new_high_score: false,
            score_submitted: false,
            session,
            rng,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food, `None` while a replacement is pending
    pub fn food(&self) -> Option<Cell> {
        self.food.eatable()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Seconds between ticks
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.speed
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            self.autopilot = enabled;
            info!(enabled, "autopilot toggled");
        }
    }

    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().to_vec(),
            food: self.food.eatable(),
            score: self.score,
            mode: self.mode,
            direction: self.direction,
            speed: self.speed,
            grid_size: self.bounds.grid_size(),
            autopilot: self.autopilot,
            path_overlay: self.path_overlay,
            new_high_score: self.new_high_score,
            run_id: self.run_id,
        }
    }

    /// Apply one input event. Only restarts and grid resizes can fail, and
    /// only when food cannot be placed.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), EngineError> {
        match event {
            InputEvent::Move(direction) => {
                // Latest wins; reversal is checked when the tick consumes it.
                self.pending_direction = direction;
            }
            InputEvent::Pause => {
                if self.mode == Mode::Playing {
                    self.set_mode(Mode::Paused);
                }
            }
            InputEvent::Resume => {
                if self.mode == Mode::Paused {
                    self.set_mode(Mode::Playing);
                }
            }
            InputEvent::TogglePause => match self.mode {
                Mode::Playing => self.set_mode(Mode::Paused),
                Mode::Paused => self.set_mode(Mode::Playing),
                _ => {}
            },
            InputEvent::OpenSettings => self.open_settings(),
            InputEvent::CloseSettings => self.close_settings(),
            InputEvent::ToggleSettings => {
                if matches!(self.mode, Mode::Settings { .. }) {
                    self.close_settings();
                } else {
                    self.open_settings();
                }
            }
            InputEvent::GridSizeDelta(delta) => {
                if matches!(self.mode, Mode::Settings { .. }) {
                    self.resize_grid(delta)?;
                }
            }
            InputEvent::SpeedDelta(steps) => {
                if matches!(self.mode, Mode::Settings { .. }) {
                    let speed = self.speed + f64::from(steps) * self.config.speed_step;
                    self.speed = self.config.clamp_speed(speed);
                    debug!(speed = self.speed, "speed changed");
                }
            }
            InputEvent::Restart => {
                if self.mode == Mode::GameOver {
                    self.restart()?;
                }
            }
            InputEvent::ToggleAutopilot => self.set_autopilot(!self.autopilot),
            InputEvent::TogglePathOverlay => {
                self.path_overlay = !self.path_overlay;
            }
        }

        Ok(())
    }

    /// Advance the clock to `now` (seconds, monotonically increasing).
    ///
    /// Completes a due food placement, then fires at most one tick if in
    /// Playing and a full tick interval has passed since the previous one.
    pub fn update(&mut self, now: f64) -> Result<UpdateOutcome, EngineError> {
        let mut outcome = UpdateOutcome::default();

        if self.mode == Mode::GameOver {
            return Ok(outcome);
        }

        if let FoodSlot::Pending { due_at } = self.food {
            if now >= due_at {
                outcome.food_placed = Some(self.respawn_food()?);
            }
        }

        if self.mode != Mode::Playing || now - self.last_tick < self.tick_interval() {
            return Ok(outcome);
        }
        self.last_tick = now;

        let requested = self.next_direction();
        let moved = advance_snake(
            &mut self.snake,
            requested,
            self.direction,
            self.food.eatable(),
            self.bounds,
        );
        self.direction = moved.direction;
        self.pending_direction = moved.direction;
        outcome.tick = Some(moved);

        if let Some(collision) = moved.collision {
            info!(?collision, score = self.score, run_id = self.run_id, "game over");
            self.set_mode(Mode::GameOver);
            outcome.submission = self.take_submission();
            return Ok(outcome);
        }

        if moved.ate {
            self.score += self.config.points_per_food;
            debug!(score = self.score, length = self.snake.len(), "food eaten");

            if self.config.food_respawn_delay > 0.0 {
                self.food = FoodSlot::Pending {
                    due_at: now + self.config.food_respawn_delay,
                };
            } else {
                outcome.food_placed = Some(self.respawn_food()?);
            }
        }

        Ok(outcome)
    }

    /// Record the answer to a score submission.
    ///
    /// Answers for an earlier run are discarded. Returns whether it was applied.
    pub fn apply_score_result(&mut self, run_id: RunId, result: Result<bool, ScoreError>) -> bool {
        if run_id != self.run_id {
            debug!(run_id, current = self.run_id, "ignoring stale score result");
            return false;
        }

        match result {
            Ok(is_best) => {
                self.new_high_score = is_best;
                if is_best {
                    info!(score = self.score, "new high score");
                }
                true
            }
            Err(e) => {
                warn!(error = %e, run_id, "score update failed");
                false
            }
        }
    }

    /// Start a new run. Grid size and speed carry over.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let snake = Snake::new(Self::INITIAL_HEAD);
        let food = place_food(
            &snake,
            self.bounds,
            &mut self.rng,
            self.config.max_placement_attempts,
        )?;

        self.run_id += 1;
        self.snake = snake;
        self.food = FoodSlot::Ready(food);
        self.direction = Self::INITIAL_DIRECTION;
        self.pending_direction = Self::INITIAL_DIRECTION;
        self.score = 0;
        self.new_high_score = false;
        self.score_submitted = false;
        self.set_mode(Mode::Playing);
        info!(run_id = self.run_id, "game restarted");

        Ok(())
    }

    fn next_direction(&self) -> Direction {
        if !self.autopilot {
            return self.pending_direction;
        }

        let choice = match self.food.eatable() {
            Some(food) => autopilot::choose_direction(&self.snake, food, self.direction, self.bounds),
            None => autopilot::hold_course(&self.snake, self.direction, self.bounds),
        };
        choice.unwrap_or(self.direction)
    }

    fn respawn_food(&mut self) -> Result<Cell, EngineError> {
        let cell = place_food(
            &self.snake,
            self.bounds,
            &mut self.rng,
            self.config.max_placement_attempts,
        )?;
        self.food = FoodSlot::Ready(cell);
        Ok(cell)
    }

    fn take_submission(&mut self) -> Option<ScoreSubmission> {
        if self.score_submitted || self.score == 0 {
            return None;
        }
        if self.session.current_user().is_none() {
            return None;
        }

        self.score_submitted = true;
        Some(ScoreSubmission {
            run_id: self.run_id,
            score: self.score,
        })
    }

    fn open_settings(&mut self) {
        let resume = match self.mode {
            Mode::Playing => Resume::Playing,
            Mode::Paused => Resume::Paused,
            Mode::GameOver => Resume::GameOver,
            Mode::Settings { .. } => return,
        };
        self.set_mode(Mode::Settings { resume });
    }

    fn close_settings(&mut self) {
        if let Mode::Settings { resume } = self.mode {
            self.set_mode(resume.into());
        }
    }

    fn resize_grid(&mut self, delta: i32) -> Result<(), EngineError> {
        let size = i64::from(self.bounds.grid_size()) + i64::from(delta);
        self.bounds = GridBounds::new(self.config.clamp_grid_size(size));
        debug!(grid_size = self.bounds.grid_size(), "grid resized");

        if let FoodSlot::Ready(cell) = self.food {
            if !self.bounds.contains(cell) {
                self.respawn_food()?;
            }
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "mode change");
            self.mode = mode;
        }
    }
}
