use std::{cell::RefCell, cmp::min, rc::Rc, time::{Duration, Instant}};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{Config, Geometry};
use crate::engine::GameEngine;
use crate::error::{Error, Result};
use crate::gesture::SwipeTracker;
use crate::session::GameSession;
use crate::snake::Direction::{self, *};
use crate::term::TermManager;
use crate::view::{BoardView, COLUMNS_PER_CELL};

// How long to wait for input while no tick is scheduled
const IDLE_WAIT: Duration = Duration::from_millis(500);

enum Action {
    Continue,
    Quit,
}

pub struct SnakeGame {
    config: Config,
    term: Rc<RefCell<TermManager>>,
    geometry: Option<Geometry>,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let term = TermManager::new()?;
        Ok(SnakeGame { config, term: Rc::new(RefCell::new(term)), geometry: None })
    }

    /// Sizes the board to the terminal, then takes over the screen.
    pub fn initialize(&mut self) -> Result<Geometry> {
        let (width, height) = self.term.borrow().size();
        let max_columns = min(width.saturating_sub(2) / COLUMNS_PER_CELL, height.saturating_sub(2)) as i32;

        let geometry = self.config.geometry(max_columns)?;
        if geometry.columns() > max_columns {
            return Err(Error::BoardTooLarge { columns: geometry.columns(), width, height });
        }
        info!(
            "board {}x{} cells, cell size {}, tick every {:?}",
            geometry.columns(),
            geometry.columns(),
            geometry.cell_size(),
            self.config.tick_interval()
        );

        self.geometry = Some(geometry);
        self.term.borrow_mut().setup()?;
        Ok(geometry)
    }

    /// Returns `false` if the player quit from the intro screen.
    pub fn show_intro(&mut self) -> Result<bool> {
        let mut term = self.term.borrow_mut();
        term.show_message(&[
            "Arrow keys, WASD or drag the mouse to steer",
            "Esc or Q to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = term.read_key_blocking()?;
        term.hide_message()?;
        Ok(!is_quit(&key))
    }

    /// Runs games until the player quits.
    pub fn play(&mut self) -> Result<()> {
        let geometry = match self.geometry {
            Some(geometry) => geometry,
            None => self.initialize()?,
        };

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut engine = GameEngine::with_rng(geometry, rng);

        let mut view = BoardView::new(Rc::clone(&self.term), geometry);
        view.redraw(engine.state())?;
        engine.subscribe(view);

        let mut session = GameSession::start(engine, self.config.tick_interval(), Instant::now());
        let mut swipe = SwipeTracker::new();

        loop {
            let wait = session.time_until_tick(Instant::now()).unwrap_or(IDLE_WAIT);
            let event = self.term.borrow().next_event(wait)?;

            if let Some(event) = event {
                if let Action::Quit = handle_event(&mut session, &mut swipe, event) {
                    info!("quit with snake length {}", session.state().snake().len());
                    return Ok(());
                }
            }

            session.poll(Instant::now());
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.borrow_mut().restore()?;
        Ok(())
    }
}

fn handle_event(session: &mut GameSession<StdRng>, swipe: &mut SwipeTracker, event: Event) -> Action {
    let now = Instant::now();

    match event {
        Event::Key(key) if is_quit(&key) => return Action::Quit,
        Event::Key(KeyEvent { code, modifiers: _ }) => {
            if let Some(direction) = key_direction(code) {
                session.steer(direction, now);
            } else if is_restart(code) && session.state().is_game_over() {
                session.restart(now);
            }
        }
        Event::Mouse(MouseEvent { kind, column, row, modifiers: _ }) => {
            // Measure drags in board cells, not terminal columns
            let (x, y) = (column as f32 / COLUMNS_PER_CELL as f32, row as f32);
            match kind {
                MouseEventKind::Down(MouseButton::Left) => swipe.press(x, y),
                MouseEventKind::Drag(MouseButton::Left) => {
                    if let Some(direction) = swipe.drag(x, y) {
                        session.steer(direction, now);
                    }
                }
                MouseEventKind::Up(_) => swipe.release(),
                _ => {}
            }
        }
        Event::Resize(width, height) => debug!("terminal resized to {}x{}, board kept", width, height),
    }

    Action::Continue
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_restart(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char('r'))
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
        || matches!(ev.code, KeyCode::Esc | KeyCode::Char('q'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(key_direction(KeyCode::Char('w')), Some(Up));
        assert_eq!(key_direction(KeyCode::Right), Some(Right));
        assert_eq!(key_direction(KeyCode::Char('x')), None);
    }

    #[test]
    fn quit_and_restart_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(is_restart(KeyCode::Enter));
        assert!(!is_restart(KeyCode::Char('x')));
    }
}
