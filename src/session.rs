//! One mounted game: the engine plus the timer that drives it.
//!
//! The ticker is armed when the session starts and whenever the direction
//! changes or a live tick completes. It is cancelled as soon as the game is
//! over, and goes away with the session.

use std::time::{Duration, Instant};

use log::debug;
use rand::Rng;

use crate::engine::{GameEngine, GameState, TickOutcome};
use crate::gesture::{swipe_direction, Translation};
use crate::snake::Direction;
use crate::timer::Ticker;

pub struct GameSession<R> {
    engine: GameEngine<R>,
    ticker: Ticker,
}

impl<R: Rng> GameSession<R> {
    pub fn start(engine: GameEngine<R>, interval: Duration, now: Instant) -> Self {
        let mut ticker = Ticker::new(interval);
        if !engine.state().is_game_over() {
            ticker.arm(now);
        }
        GameSession { engine, ticker }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<R> {
        &mut self.engine
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Applied now, seen by the next tick. A new direction reschedules the
    /// pending tick; repeating the current one leaves it alone.
    pub fn steer(&mut self, direction: Direction, now: Instant) {
        let changed = self.engine.state().direction() != direction;
        self.engine.set_direction(direction);
        if changed && !self.engine.state().is_game_over() {
            self.ticker.arm(now);
        }
    }

    /// Returns the direction the swipe resolved to, if any.
    pub fn swipe(&mut self, translation: Translation, now: Instant) -> Option<Direction> {
        let direction = swipe_direction(translation)?;
        self.steer(direction, now);
        Some(direction)
    }

    /// Runs the tick if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.fire(now) {
            return None;
        }

        let outcome = self.engine.tick();
        if self.engine.state().is_game_over() {
            debug!("game over, ticker released");
            self.ticker.cancel();
        } else {
            self.ticker.arm(now);
        }
        Some(outcome)
    }

    pub fn restart(&mut self, now: Instant) {
        self.engine.reset();
        self.ticker.arm(now);
    }

    /// How long the event loop may wait before the next tick is due.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Geometry;
    use crate::snake::{Cell, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    const INTERVAL: Duration = Duration::from_millis(200);

    fn session(head: Cell, food: Cell, now: Instant) -> GameSession<StdRng> {
        let state = GameState::new(Snake::new(head), food, Direction::Right);
        let engine = GameEngine::with_state(
            Geometry::new(20, 300).unwrap(),
            state,
            StdRng::seed_from_u64(1),
        );
        GameSession::start(engine, INTERVAL, now)
    }

    #[test]
    fn ticks_only_when_due() {
        let t0 = Instant::now();
        let mut session = session(Cell::ORIGIN, Cell::new(200, 200), t0);

        assert_eq!(session.poll(t0 + Duration::from_millis(100)), None);
        assert!(session.poll(t0 + INTERVAL).is_some());
        assert_eq!(session.state().snake().head(), Cell::new(20, 0));
        assert_eq!(session.ticker().deadline(), Some(t0 + INTERVAL * 2));
    }

    #[test]
    fn steering_waits_for_the_next_tick() {
        let t0 = Instant::now();
        let mut session = session(Cell::new(100, 100), Cell::ORIGIN, t0);

        session.steer(Direction::Down, t0 + Duration::from_millis(150));
        assert_eq!(session.state().snake().head(), Cell::new(100, 100));
        // The pending tick was replaced by one a full interval after the input.
        assert_eq!(session.poll(t0 + INTERVAL), None);
        assert!(session.poll(t0 + Duration::from_millis(350)).is_some());
        assert_eq!(session.state().snake().head(), Cell::new(100, 120));
    }

    #[test]
    fn repeating_the_direction_keeps_the_schedule() {
        let t0 = Instant::now();
        let mut session = session(Cell::new(100, 100), Cell::ORIGIN, t0);

        session.steer(Direction::Right, t0 + Duration::from_millis(150));
        assert_eq!(session.ticker().deadline(), Some(t0 + INTERVAL));
    }

    #[test]
    fn swipes_use_the_dominant_axis() {
        let t0 = Instant::now();
        let mut session = session(Cell::new(100, 100), Cell::ORIGIN, t0);

        assert_eq!(session.swipe(Translation::new(-4.0, 1.0), t0), Some(Direction::Left));
        assert_eq!(session.swipe(Translation::default(), t0), None);
        assert_eq!(session.state().direction(), Direction::Left);
    }

    #[test]
    fn game_over_releases_the_ticker_and_restart_rearms_it() {
        let t0 = Instant::now();
        let mut session = session(Cell::new(280, 0), Cell::ORIGIN, t0);

        let outcome = session.poll(t0 + INTERVAL);
        assert!(matches!(outcome, Some(TickOutcome::Crashed(_))));
        assert!(!session.ticker().is_armed());
        assert_eq!(session.time_until_tick(t0), None);

        session.steer(Direction::Left, t0 + INTERVAL);
        assert!(!session.ticker().is_armed());

        let t1 = t0 + INTERVAL * 5;
        session.restart(t1);
        assert!(!session.state().is_game_over());
        assert_eq!(session.ticker().deadline(), Some(t1 + INTERVAL));
    }
}
