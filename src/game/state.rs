use std::ops::{Add, Sub};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::{Axis, Direction};

/// A cell of the 3D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        *self + direction.delta()
    }

    pub fn component(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn manhattan_distance(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Squared Euclidean distance; orders cells exactly like the true distance
    pub fn distance_squared(&self, other: Cell) -> i64 {
        let d = other - *self;
        let (x, y, z) = (i64::from(d.x), i64::from(d.y), i64::from(d.z));
        x * x + y * y + z * z
    }

    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Cubic play area centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    grid_size: u32,
}

impl GridBounds {
    pub fn new(grid_size: u32) -> Self {
        Self { grid_size }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Largest absolute coordinate still inside the grid
    pub fn half_extent(&self) -> i32 {
        (self.grid_size / 2) as i32
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        let h = self.half_extent();
        cell.x.abs() <= h && cell.y.abs() <= h && cell.z.abs() <= h
    }

    /// Number of distinct in-bounds cells
    pub fn cell_count(&self) -> u64 {
        let side = 2 * u64::from(self.grid_size / 2) + 1;
        side * side * side
    }

    /// Uniformly random in-bounds cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let h = self.half_extent();
        Cell::new(
            rng.gen_range(-h..=h),
            rng.gen_range(-h..=h),
            rng.gen_range(-h..=h),
        )
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Cell>,
}

impl Snake {
    /// Create a single-cell snake
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for an empty body.
    pub fn from_body(body: Vec<Cell>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head onto `cell` hits the body.
    ///
    /// The tail is vacated by a plain move, so it only counts when the snake grows.
    pub fn would_collide(&self, cell: Cell, growing: bool) -> bool {
        let occupied = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        occupied.contains(&cell)
    }

    /// Push a new head, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// True if any two segments share a cell
    pub fn has_overlap(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(i, cell)| self.body[i + 1..].contains(cell))
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionKind {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Where closing the settings panel returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resume {
    Playing,
    Paused,
    GameOver,
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Playing,
    Paused,
    Settings { resume: Resume },
    GameOver,
}

impl Mode {
    pub fn is_playing(&self) -> bool {
        matches!(self, Mode::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Mode::GameOver)
    }
}

impl From<Resume> for Mode {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Playing => Mode::Playing,
            Resume::Paused => Mode::Paused,
            Resume::GameOver => Mode::GameOver,
        }
    }
}

/// Read-only copy of everything a display needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    /// `None` while a replacement is pending
    pub food: Option<Cell>,
    pub score: u32,
    pub mode: Mode,
    pub direction: Direction,
    pub speed: f64,
    pub grid_size: u32,
    pub autopilot: bool,
    pub path_overlay: bool,
    pub new_high_score: bool,
    pub run_id: u64,
}
