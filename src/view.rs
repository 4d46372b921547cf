use std::cell::RefCell;
use std::rc::Rc;

use crossterm::Result;

use crate::config::Geometry;
use crate::engine::{GameState, StateListener};
use crate::snake::Cell;
use crate::term::{TermManager, TermPos};

// Each board cell takes two terminal columns so it looks roughly square
pub const COLUMNS_PER_CELL: u16 = 2;

const SNAKE_BODY: [char; 2] = ['█', '█'];
const DEAD_SNAKE: [char; 2] = ['X', 'X'];
const FOOD: [char; 2] = ['(', ')'];
const EMPTY: [char; 2] = [' ', ' '];

/// Draws the board whenever the engine reports a change.
pub struct BoardView {
    term: Rc<RefCell<TermManager>>,
    geometry: Geometry,
    drawn_snake: Vec<Cell>,
    drawn_food: Option<Cell>,
}

impl BoardView {
    pub fn new(term: Rc<RefCell<TermManager>>, geometry: Geometry) -> Self {
        BoardView { term, geometry, drawn_snake: vec![], drawn_food: None }
    }

    /// Terminal columns and rows covered by the board, border excluded.
    pub fn inner_size(geometry: Geometry) -> TermPos {
        let columns = geometry.columns() as u16;
        (columns * COLUMNS_PER_CELL, columns)
    }

    /// Clears the screen and draws everything from scratch.
    pub fn redraw(&mut self, state: &GameState) -> Result<()> {
        {
            let mut term = self.term.borrow_mut();
            term.clear()?;
            term.draw_borders(BoardView::inner_size(self.geometry))?;
        }
        self.drawn_snake.clear();
        self.drawn_food = None;
        self.render(state)
    }

    pub fn render(&mut self, state: &GameState) -> Result<()> {
        let term = Rc::clone(&self.term);
        let mut term = term.borrow_mut();

        if term.has_message() {
            term.hide_message()?;
        }

        let snake = state.snake();
        for cell in &self.drawn_snake {
            if !snake.occupies(*cell) && *cell != state.food() {
                self.draw_cell(&mut term, *cell, EMPTY)?;
            }
        }
        if let Some(old_food) = self.drawn_food {
            if old_food != state.food() && !snake.occupies(old_food) {
                self.draw_cell(&mut term, old_food, EMPTY)?;
            }
        }

        for (cell, glyph) in paint_order(state) {
            self.draw_cell(&mut term, cell, glyph)?;
        }
        term.flush()?;

        self.drawn_snake = snake.to_vec();
        self.drawn_food = Some(state.food());

        if state.is_game_over() {
            let length = format!("Length: {}", snake.len());
            term.show_message(&[
                "Game Over",
                length.as_str(),
                "",
                "Enter or R to restart,",
                "Esc or Q to quit.",
            ])?;
        }

        Ok(())
    }

    fn draw_cell(&self, term: &mut TermManager, cell: Cell, glyph: [char; 2]) -> Result<()> {
        let (col, row) = self.geometry.index_of(cell);
        let x = 1 + col as u16 * COLUMNS_PER_CELL;
        let y = 1 + row as u16;
        term.print_at((x, y), glyph[0])?;
        term.print_at((x + 1, y), glyph[1])
    }
}

/// Cells to draw for `state`, later entries painted over earlier ones. Food
/// may spawn under the snake and comes last so it stays visible.
fn paint_order(state: &GameState) -> Vec<(Cell, [char; 2])> {
    let snake = state.snake();
    let body = if state.is_game_over() { DEAD_SNAKE } else { SNAKE_BODY };
    let head = if state.is_game_over() {
        DEAD_SNAKE
    } else {
        let ch = state.direction().head_char();
        [ch, ch]
    };

    let mut order: Vec<(Cell, [char; 2])> =
        snake.segments().skip(1).map(|cell| (*cell, body)).collect();
    order.push((snake.head(), head));
    order.push((state.food(), FOOD));
    order
}

impl StateListener for BoardView {
    fn state_changed(&mut self, state: &GameState) {
        if let Err(err) = self.render(state) {
            log::error!("failed to draw the board: {}", err);
        }
    }
}
