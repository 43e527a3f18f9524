//! Collision-free food placement by rejection sampling.

use std::collections::HashSet;

use rand::Rng;

use super::error::EngineError;
use super::state::{Cell, GridBounds, Snake};

/// Draw random in-bounds cells until one is not occupied by the snake.
///
/// Fails fast with [`EngineError::GridFull`] when the snake already covers
/// every in-bounds cell, and with [`EngineError::FoodPlacementExhausted`] if
/// `max_attempts` draws are all rejected.
pub fn place_food<R: Rng + ?Sized>(
    snake: &Snake,
    bounds: GridBounds,
    rng: &mut R,
    max_attempts: u32,
) -> Result<Cell, EngineError> {
    let occupied: HashSet<Cell> = snake
        .cells()
        .iter()
        .copied()
        .filter(|cell| bounds.contains(*cell))
        .collect();

    if occupied.len() as u64 >= bounds.cell_count() {
        return Err(EngineError::GridFull {
            grid_size: bounds.grid_size(),
            cells: bounds.cell_count(),
        });
    }

    for _ in 0..max_attempts {
        let candidate = bounds.random_cell(rng);
        if !snake.contains(candidate) {
            return Ok(candidate);
        }
    }

    Err(EngineError::FoodPlacementExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Fill every in-bounds cell except `free`
    fn snake_filling(bounds: GridBounds, free: Option<Cell>) -> Snake {
        let h = bounds.half_extent();
        let mut body = Vec::new();
        for x in -h..=h {
            for y in -h..=h {
                for z in -h..=h {
                    let cell = Cell::new(x, y, z);
                    if Some(cell) != free {
                        body.push(cell);
                    }
                }
            }
        }
        Snake::from_body(body).unwrap()
    }

    #[test]
    fn test_places_in_bounds_and_off_snake() {
        let bounds = GridBounds::new(14);
        let snake = Snake::new(Cell::ORIGIN);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1000 {
            let food = place_food(&snake, bounds, &mut rng, 1000).unwrap();
            assert!(bounds.contains(food));
            assert_ne!(food, Cell::ORIGIN);
        }
    }

    #[test]
    fn test_finds_the_only_free_cell() {
        let bounds = GridBounds::new(2);
        let free = Cell::new(1, -1, 0);
        let snake = snake_filling(bounds, Some(free));
        let mut rng = StdRng::seed_from_u64(99);

        assert_eq!(place_food(&snake, bounds, &mut rng, 100_000), Ok(free));
    }

    #[test]
    fn test_full_grid_is_an_error() {
        let bounds = GridBounds::new(2);
        let snake = snake_filling(bounds, None);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            place_food(&snake, bounds, &mut rng, 10),
            Err(EngineError::GridFull {
                grid_size: 2,
                cells: 27
            })
        );
    }

    #[test]
    fn test_attempt_cap() {
        let bounds = GridBounds::new(2);
        let snake = snake_filling(bounds, Some(Cell::new(1, 1, 1)));
        let mut rng = StdRng::seed_from_u64(3);

        // One draw either hits the single free cell or gives up.
        let result = place_food(&snake, bounds, &mut rng, 1);
        match result {
            Ok(cell) => assert_eq!(cell, Cell::new(1, 1, 1)),
            Err(err) => assert_eq!(err, EngineError::FoodPlacementExhausted { attempts: 1 }),
        }
    }

    #[test]
    fn test_does_not_mutate_snake() {
        let bounds = GridBounds::new(10);
        let snake = Snake::from_body(vec![Cell::ORIGIN, Cell::new(0, 1, 0)]).unwrap();
        let before = snake.clone();
        let mut rng = StdRng::seed_from_u64(5);

        place_food(&snake, bounds, &mut rng, 100).unwrap();
        assert_eq!(snake, before);
    }

    fn arb_snake_and_bounds() -> impl Strategy<Value = (Snake, GridBounds, u64)> {
        (2u32..=8, any::<u64>()).prop_flat_map(|(grid_size, seed)| {
            let h = (grid_size / 2) as i32;
            let cell = (-h..=h, -h..=h, -h..=h).prop_map(|(x, y, z)| Cell::new(x, y, z));
            prop::collection::vec(cell, 1..40).prop_map(move |mut body| {
                body.dedup();
                let snake = Snake::from_body(body).unwrap();
                (snake, GridBounds::new(grid_size), seed)
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10_000))]

        #[test]
        fn prop_food_never_lands_on_snake((snake, bounds, seed) in arb_snake_and_bounds()) {
            let mut rng = StdRng::seed_from_u64(seed);
            match place_food(&snake, bounds, &mut rng, 100_000) {
                Ok(food) => {
                    prop_assert!(bounds.contains(food));
                    prop_assert!(!snake.contains(food));
                }
                Err(EngineError::GridFull { .. }) => {
                    prop_assert!(snake.len() as u64 >= bounds.cell_count());
                }
                Err(err) => prop_assert!(false, "unexpected error: {err}"),
            }
        }
    }
}
