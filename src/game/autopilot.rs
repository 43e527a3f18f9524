//! Greedy autopilot and the axis-aligned path overlay.
//!
//! The autopilot is a one-step heuristic, not a path search: it heads for the
//! food along the dominant axis and only looks at its immediate neighbours when
//! that move is unsafe. It can walk itself into dead ends.

use super::action::{Axis, Direction};
use super::movement::check_collision;
use super::state::{Cell, GridBounds, Snake};

/// A move is safe if it is not a reversal and does not collide
fn is_safe(
    snake: &Snake,
    direction: Direction,
    last_direction: Direction,
    food: Option<Cell>,
    bounds: GridBounds,
) -> bool {
    if last_direction.is_opposite(direction) {
        return false;
    }
    let new_head = snake.head().moved_in_direction(direction);
    check_collision(snake, new_head, food, bounds).is_none()
}

/// All safe directions in enumeration order
pub fn safe_directions(
    snake: &Snake,
    last_direction: Direction,
    food: Option<Cell>,
    bounds: GridBounds,
) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| is_safe(snake, d, last_direction, food, bounds))
        .collect()
}

/// Direction along the axis with the largest remaining distance to `target`.
///
/// Ties go to x, then y, then z. `None` when already on the target.
fn preferred_direction(head: Cell, target: Cell) -> Option<Direction> {
    let delta = target - head;
    let mut best: Option<(Axis, i32)> = None;

    for axis in Axis::ALL {
        let d = delta.component(axis);
        if d == 0 {
            continue;
        }
        match best {
            Some((_, best_d)) if best_d.abs() >= d.abs() => {}
            _ => best = Some((axis, d)),
        }
    }

    best.map(|(axis, d)| Direction::along(axis, d > 0))
}

/// Choose the next direction towards `food`, or `None` if every move is fatal.
pub fn choose_direction(
    snake: &Snake,
    food: Cell,
    last_direction: Direction,
    bounds: GridBounds,
) -> Option<Direction> {
    let head = snake.head();

    if let Some(preferred) = preferred_direction(head, food) {
        if is_safe(snake, preferred, last_direction, Some(food), bounds) {
            return Some(preferred);
        }
    }

    let mut best: Option<(Direction, i64)> = None;
    for direction in safe_directions(snake, last_direction, Some(food), bounds) {
        let distance = head.moved_in_direction(direction).distance_squared(food);
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((direction, distance)),
        }
    }

    best.map(|(direction, _)| direction)
}

/// Steering while no food is on the board: keep going if safe, else take the first safe turn
pub fn hold_course(
    snake: &Snake,
    last_direction: Direction,
    bounds: GridBounds,
) -> Option<Direction> {
    if is_safe(snake, last_direction, last_direction, None, bounds) {
        return Some(last_direction);
    }
    safe_directions(snake, last_direction, None, bounds)
        .into_iter()
        .next()
}

/// Corner points of the x-then-y-then-z path from `head` to `food`.
///
/// Consecutive points form the straight legs drawn by the path overlay.
/// Empty when head and food coincide.
pub fn axis_path(head: Cell, food: Cell) -> Vec<Cell> {
    let mut points = Vec::new();
    let mut current = head;

    for axis in Axis::ALL {
        if current.component(axis) == food.component(axis) {
            continue;
        }
        points.push(current);
        match axis {
            Axis::X => current.x = food.x,
            Axis::Y => current.y = food.y,
            Axis::Z => current.z = food.z,
        }
        points.push(current);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snake(cells: &[(i32, i32, i32)]) -> Snake {
        Snake::from_body(cells.iter().map(|&(x, y, z)| Cell::new(x, y, z)).collect()).unwrap()
    }

    #[test]
    fn test_single_axis_delta() {
        let s = snake(&[(0, 0, 0)]);
        let bounds = GridBounds::new(14);

        assert_eq!(
            choose_direction(&s, Cell::new(0, 0, -4), Direction::PosX, bounds),
            Some(Direction::NegZ)
        );
        assert_eq!(
            choose_direction(&s, Cell::new(0, 3, 0), Direction::PosX, bounds),
            Some(Direction::PosY)
        );
    }

    #[test]
    fn test_largest_axis_wins_with_tie_order() {
        let s = snake(&[(0, 0, 0)]);
        let bounds = GridBounds::new(14);

        assert_eq!(
            choose_direction(&s, Cell::new(1, -5, 2), Direction::PosX, bounds),
            Some(Direction::NegY)
        );
        // |x| == |y| == |z|: x first
        assert_eq!(
            choose_direction(&s, Cell::new(-3, 3, 3), Direction::PosY, bounds),
            Some(Direction::NegX)
        );
        // |y| == |z| > |x|: y first
        assert_eq!(
            choose_direction(&s, Cell::new(1, 4, -4), Direction::PosX, bounds),
            Some(Direction::PosY)
        );
    }

    #[test]
    fn test_reversal_falls_back_to_nearest() {
        // Food straight behind: -x is a reversal, so pick the closest sideways move.
        let s = snake(&[(0, 0, 0), (-1, 0, 0)]);
        let bounds = GridBounds::new(14);
        let choice = choose_direction(&s, Cell::new(-3, 0, 0), Direction::PosX, bounds);

        // +y, -y, +z, -z are equidistant; +y comes first in enumeration order.
        assert_eq!(choice, Some(Direction::PosY));
    }

    #[test]
    fn test_fallback_avoids_body() {
        // Preferred +y hits the body; +x would leave the grid.
        let s = snake(&[(7, 0, 0), (7, 1, 0), (6, 1, 0), (6, 0, 0), (6, -1, 0)]);
        let bounds = GridBounds::new(14);
        let choice = choose_direction(&s, Cell::new(7, 5, 0), Direction::PosX, bounds);

        assert_eq!(choice, Some(Direction::PosZ));
    }

    #[test]
    fn test_trapped_returns_none() {
        // Head in a corner of a tiny grid, every neighbour blocked.
        let s = snake(&[
            (1, 1, 1),
            (0, 1, 1),
            (0, 0, 1),
            (1, 0, 1),
            (1, 0, 0),
            (1, 1, 0),
            (0, 1, 0),
        ]);
        let bounds = GridBounds::new(2);
        assert_eq!(
            choose_direction(&s, Cell::new(-1, -1, -1), Direction::PosX, bounds),
            None
        );
    }

    #[test]
    fn test_hold_course() {
        let bounds = GridBounds::new(14);
        let s = snake(&[(0, 0, 0)]);
        assert_eq!(hold_course(&s, Direction::NegZ, bounds), Some(Direction::NegZ));

        let at_wall = snake(&[(7, 0, 0)]);
        assert_eq!(hold_course(&at_wall, Direction::PosX, bounds), Some(Direction::PosY));
    }

    #[test]
    fn test_axis_path() {
        let path = axis_path(Cell::ORIGIN, Cell::new(2, 0, -3));
        assert_eq!(
            path,
            vec![
                Cell::ORIGIN,
                Cell::new(2, 0, 0),
                Cell::new(2, 0, 0),
                Cell::new(2, 0, -3),
            ]
        );
        assert!(axis_path(Cell::ORIGIN, Cell::ORIGIN).is_empty());
    }

    fn arb_cell(h: i32) -> impl Strategy<Value = Cell> {
        (-h..=h, -h..=h, -h..=h).prop_map(|(x, y, z)| Cell::new(x, y, z))
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_autopilot_never_reverses_or_exits(
            head in arb_cell(5),
            food in arb_cell(5),
            last in arb_direction(),
            turns in prop::collection::vec(arb_direction(), 0..12),
        ) {
            let bounds = GridBounds::new(10);
            prop_assume!(head != food);

            // Grow a body behind the head from a random walk, stopping at the first overlap.
            let mut body = vec![head];
            for turn in turns {
                let next = body[body.len() - 1].moved_in_direction(turn);
                if body.contains(&next) || next == food || !bounds.contains(next) {
                    break;
                }
                body.push(next);
            }
            let s = Snake::from_body(body).unwrap();

            if let Some(direction) = choose_direction(&s, food, last, bounds) {
                prop_assert!(!last.is_opposite(direction));
                let new_head = s.head().moved_in_direction(direction);
                prop_assert!(bounds.contains(new_head));
                prop_assert!(!s.would_collide(new_head, new_head == food));
            }
        }
    }
}
