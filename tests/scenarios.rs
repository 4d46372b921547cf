use grid_snake::{Cell, Direction, GameEngine, GameState, Geometry, Snake, TickOutcome};
use rand::{rngs::StdRng, SeedableRng};

fn fifteen_by_fifteen() -> Geometry {
    Geometry::new(20, 300).unwrap()
}

fn fresh_engine(food: Cell) -> GameEngine<StdRng> {
    let state = GameState::initial(food);
    GameEngine::with_state(fifteen_by_fifteen(), state, StdRng::seed_from_u64(42))
}

#[test]
fn running_right_hits_the_wall_exactly_at_board_size() {
    let food = Cell::new(0, 200);
    let mut engine = fresh_engine(food);

    engine.tick();
    assert_eq!(engine.state().snake().to_vec(), vec![Cell::new(20, 0)]);
    assert_eq!(engine.state().food(), food);

    // Heads 40..=280 are all on the board.
    for step in 2..=14 {
        assert!(matches!(engine.tick(), TickOutcome::Moved { .. }));
        assert_eq!(engine.state().snake().head(), Cell::new(step * 20, 0));
        assert!(!engine.state().is_game_over());
    }

    // The next head would be at x = 300.
    assert!(matches!(engine.tick(), TickOutcome::Crashed(_)));
    assert!(engine.state().is_game_over());
    assert_eq!(engine.state().snake().to_vec(), vec![Cell::new(280, 0)]);
}

#[test]
fn eating_the_first_food() {
    let mut engine = fresh_engine(Cell::new(20, 0));

    let outcome = engine.tick();

    assert_eq!(
        engine.state().snake().to_vec(),
        vec![Cell::new(20, 0), Cell::new(0, 0)]
    );
    assert!(matches!(outcome, TickOutcome::Ate { new_head, .. } if new_head == Cell::new(20, 0)));
    assert!(fifteen_by_fifteen().contains(engine.state().food()));
}

#[test]
fn game_over_is_sticky_until_reset() {
    let mut engine = fresh_engine(Cell::new(200, 200));
    engine.set_direction(Direction::Up);
    engine.tick();
    let after_one = engine.state().clone();

    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state(), &after_one);

    engine.reset();
    let reset_once = engine.state().clone();
    engine.reset();
    assert_eq!(engine.state(), &reset_once);
    assert_eq!(reset_once.snake(), &Snake::new(Cell::ORIGIN));
    assert_eq!(reset_once.direction(), Direction::Right);
    assert!(!reset_once.is_game_over());
    assert!(fifteen_by_fifteen().contains(reset_once.food()));
}

#[test]
fn a_long_snake_survives_a_lap() {
    // Length 3 snake walking the outer ring of a 15x15 board.
    let snake = Snake::from_segments(vec![Cell::new(40, 0), Cell::new(20, 0), Cell::new(0, 0)]).unwrap();
    let state = GameState::new(snake, Cell::new(140, 140), Direction::Right);
    let mut engine = GameEngine::with_state(fifteen_by_fifteen(), state, StdRng::seed_from_u64(7));

    let turns = [(Direction::Down, 14), (Direction::Left, 14), (Direction::Up, 14), (Direction::Right, 1)];
    for _ in 0..12 {
        engine.tick();
    }
    for &(direction, steps) in &turns {
        engine.set_direction(direction);
        for _ in 0..steps {
            assert!(matches!(engine.tick(), TickOutcome::Moved { .. }));
        }
    }

    assert_eq!(engine.state().snake().len(), 3);
    assert_eq!(engine.state().snake().head(), Cell::new(20, 0));
    assert!(!engine.state().is_game_over());
}
