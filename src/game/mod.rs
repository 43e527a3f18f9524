//! Core game logic module for the 3D snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front-end and the headless runner both drive it through
//! [`Game::handle_input`] and [`Game::update`].

pub mod action;
pub mod autopilot;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod movement;
pub mod state;

// Re-export commonly used types
pub use action::{Axis, Direction, InputEvent};
pub use config::GameConfig;
pub use engine::{Game, UpdateOutcome};
pub use error::{ConfigError, EngineError};
pub use food::place_food;
pub use movement::{MoveOutcome, advance_snake};
pub use state::{Cell, CollisionKind, GridBounds, Mode, Resume, Snake, Snapshot};
