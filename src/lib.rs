//! snake3d - simulation engine for a snake game on a 3D grid
//!
//! This library provides:
//! - Core game logic: movement, collisions, food placement, autopilot and the
//!   mode state machine (game module)
//! - The boundary to session and high-score services (session module)
//! - A terminal front-end: key mapping, drawing and run modes (input, render,
//!   modes modules)
//! - Per-session statistics (metrics module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
