use serde::{Deserialize, Serialize};

use super::state::Cell;

/// Grid axis, in tie-breaking priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Direction the snake can move: one unit step along a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    /// Every direction in enumeration order (+x, -x, +y, -y, +z, -z)
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Unit direction along `axis`, positive or negative
    pub fn along(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Direction::PosX,
            (Axis::X, false) => Direction::NegX,
            (Axis::Y, true) => Direction::PosY,
            (Axis::Y, false) => Direction::NegY,
            (Axis::Z, true) => Direction::PosZ,
            (Axis::Z, false) => Direction::NegZ,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
            Direction::PosZ | Direction::NegZ => Axis::Z,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the unit offset for moving in this direction
    pub fn delta(&self) -> Cell {
        match self {
            Direction::PosX => Cell::new(1, 0, 0),
            Direction::NegX => Cell::new(-1, 0, 0),
            Direction::PosY => Cell::new(0, 1, 0),
            Direction::NegY => Cell::new(0, -1, 0),
            Direction::PosZ => Cell::new(0, 0, 1),
            Direction::NegZ => Cell::new(0, 0, -1),
        }
    }

    /// Looks up a logical movement symbol. Case-insensitive; unknown symbols map to `None`.
    ///
    /// The z axis points out of the screen, so "axis-in" is `-z`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Direction::PosY),
            "down" | "arrowdown" | "s" => Some(Direction::NegY),
            "left" | "arrowleft" | "a" => Some(Direction::NegX),
            "right" | "arrowright" | "d" => Some(Direction::PosX),
            "axis-in" | "q" => Some(Direction::NegZ),
            "axis-out" | "e" => Some(Direction::PosZ),
            _ => None,
        }
    }
}

/// Discrete input accepted by the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Latch a direction for the next tick
    Move(Direction),
    Pause,
    Resume,
    TogglePause,
    Restart,
    OpenSettings,
    CloseSettings,
    ToggleSettings,
    /// Grow or shrink the grid by this many cells (settings only)
    GridSizeDelta(i32),
    /// Change speed by this many speed steps (settings only)
    SpeedDelta(i32),
    ToggleAutopilot,
    TogglePathOverlay,
}

impl From<Direction> for InputEvent {
    fn from(direction: Direction) -> Self {
        InputEvent::Move(direction)
    }
}

impl InputEvent {
    /// Maps a named input symbol to an event. Unrecognized symbols are ignored.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_symbol(symbol) {
            return Some(InputEvent::Move(direction));
        }

        let event = match symbol.to_ascii_lowercase().as_str() {
            "pause" => InputEvent::Pause,
            "resume" => InputEvent::Resume,
            "p" => InputEvent::TogglePause,
            "restart" | "r" => InputEvent::Restart,
            "settings-open" => InputEvent::OpenSettings,
            "settings-close" | "escape" => InputEvent::CloseSettings,
            "tab" => InputEvent::ToggleSettings,
            "grid-size-down" | "[" => InputEvent::GridSizeDelta(-1),
            "grid-size-up" | "]" => InputEvent::GridSizeDelta(1),
            "speed-down" | "-" => InputEvent::SpeedDelta(-1),
            "speed-up" | "=" => InputEvent::SpeedDelta(1),
            "autopilot" | "t" => InputEvent::ToggleAutopilot,
            "path-overlay" | "f" => InputEvent::TogglePathOverlay,
            _ => return None,
        };

        Some(event)
    }
}
