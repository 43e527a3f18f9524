use super::action::Direction;
use super::state::{Cell, CollisionKind, GridBounds, Snake};

/// Result of advancing the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Direction actually applied (the previous one if a reversal was rejected)
    pub direction: Direction,
    /// Whether the snake ate food this move
    pub ate: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionKind>,
}

/// Resolve the requested direction against the last applied one (prevent 180° turns)
pub fn resolve_direction(requested: Direction, last: Direction) -> Direction {
    if last.is_opposite(requested) {
        last
    } else {
        requested
    }
}

/// Check whether the head may move onto `new_head` this tick
pub fn check_collision(
    snake: &Snake,
    new_head: Cell,
    food: Option<Cell>,
    bounds: GridBounds,
) -> Option<CollisionKind> {
    if !bounds.contains(new_head) {
        return Some(CollisionKind::Wall);
    }

    if snake.would_collide(new_head, food == Some(new_head)) {
        return Some(CollisionKind::SelfCollision);
    }

    None
}

/// Move the snake one cell.
///
/// On collision the snake is left untouched. `food` is `None` while a
/// replacement is still being placed, so a consumed cell can never be eaten twice.
pub fn advance_snake(
    snake: &mut Snake,
    requested: Direction,
    last: Direction,
    food: Option<Cell>,
    bounds: GridBounds,
) -> MoveOutcome {
    let direction = resolve_direction(requested, last);
    let new_head = snake.head().moved_in_direction(direction);

    if let Some(collision) = check_collision(snake, new_head, food, bounds) {
        return MoveOutcome {
            direction,
            ate: false,
            collision: Some(collision),
        };
    }

    let ate = food == Some(new_head);
    snake.advance(new_head, ate);

    MoveOutcome {
        direction,
        ate,
        collision: None,
    }
}
