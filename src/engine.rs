//! The game itself: one owned state, advanced one tick at a time.
//!
//! Hitting a wall or the snake's own body is not an error, it only sets the
//! game-over flag. From then on `tick` does nothing until `reset`.

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::Geometry;
use crate::snake::{Cell, Collision, Direction, Snake};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    snake: Snake,
    food: Cell,
    direction: Direction,
    game_over: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, direction: Direction) -> Self {
        GameState { snake, food, direction, game_over: false }
    }

    /// One segment at the origin heading right.
    pub fn initial(food: Cell) -> Self {
        GameState::new(Snake::new(Cell::ORIGIN), food, INITIAL_DIRECTION)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved { new_head: Cell, old_tail: Cell },
    Ate { new_head: Cell, next_food: Cell },
    Crashed(Collision),
    /// The game was already over, nothing changed.
    Halted,
}

/// Receives the state after every change. Rendering is one of these.
pub trait StateListener {
    fn state_changed(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> StateListener for F {
    fn state_changed(&mut self, state: &GameState) {
        self(state)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct GameEngine<R = ThreadRng> {
    geometry: Geometry,
    initial_food: Cell,
    state: GameState,
    rng: R,
    listeners: Vec<(SubscriptionId, Box<dyn StateListener>)>,
    next_subscription: u64,
}

impl GameEngine<ThreadRng> {
    pub fn new(geometry: Geometry) -> Self {
        GameEngine::with_rng(geometry, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Draws the starting food cell once. `reset` brings back that same cell.
    pub fn with_rng(geometry: Geometry, mut rng: R) -> Self {
        let initial_food = geometry.random_cell(&mut rng);
        let state = GameState::initial(initial_food);
        GameEngine::with_state(geometry, state, rng)
    }

    /// Starts from an arbitrary state. Its food becomes the reset food.
    pub fn with_state(geometry: Geometry, state: GameState, rng: R) -> Self {
        GameEngine {
            geometry,
            initial_food: state.food,
            state,
            rng,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state.game_over {
            return TickOutcome::Halted;
        }

        let new_head = self.state.snake.head().step(self.state.direction, self.geometry.cell_size());

        let collision = if !self.geometry.contains(new_head) {
            Some(Collision::Wall)
        } else if self.state.snake.occupies(new_head) {
            Some(Collision::Body)
        } else {
            None
        };

        let outcome = match collision {
            Some(collision) => {
                info!(
                    "game over: hit {} at {} with length {}",
                    collision,
                    new_head,
                    self.state.snake.len()
                );
                self.state.game_over = true;
                TickOutcome::Crashed(collision)
            }
            None if new_head == self.state.food => {
                self.state.snake.advance(new_head, true);
                // No exclusion check: the new food may land on the snake.
                let next_food = self.geometry.random_cell(&mut self.rng);
                self.state.food = next_food;
                debug!("ate food at {}, next food at {}", new_head, next_food);
                TickOutcome::Ate { new_head, next_food }
            }
            None => {
                let old_tail = self.state.snake.advance(new_head, false).unwrap_or(new_head);
                debug!("head moved to {}", new_head);
                TickOutcome::Moved { new_head, old_tail }
            }
        };

        self.notify();
        outcome
    }

    /// No reversal check: turning back onto the neck ends the game next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
        self.notify();
    }

    /// Unit-vector form of `set_direction`. Returns `false` and ignores
    /// anything that is not one of the four unit vectors.
    pub fn set_direction_vector(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_unit(dx, dy) {
            Some(direction) => {
                self.set_direction(direction);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = GameState::initial(self.initial_food);
        info!("game reset, food at {}", self.initial_food);
        self.notify();
    }

    pub fn subscribe<L: StateListener + 'static>(&mut self, listener: L) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.state_changed(&self.state);
        }
    }
}
