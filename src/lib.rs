//! A grid snake game: the engine, its timer and swipe input, and a terminal
//! front end that hosts them.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod gesture;
pub mod session;
pub mod snake;
pub mod term;
pub mod timer;
pub mod view;

pub use config::{Config, ConfigError, Geometry};
pub use engine::{GameEngine, GameState, StateListener, SubscriptionId, TickOutcome};
pub use error::Error;
pub use gesture::{swipe_direction, SwipeTracker, Translation};
pub use session::GameSession;
pub use snake::{Cell, Collision, Direction, Snake};
pub use timer::Ticker;
