//! Swipe input. A drag is reduced to the direction of its dominant axis.

use crate::snake::Direction;

/// Displacement since the pointer went down. `y` grows downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

impl Translation {
    pub fn new(x: f32, y: f32) -> Self {
        Translation { x, y }
    }
}

/// The axis with the larger displacement wins, its sign picks the way along
/// it. Ties go to the vertical axis. A zero translation has no direction.
pub fn swipe_direction(translation: Translation) -> Option<Direction> {
    let Translation { x, y } = translation;

    if x.abs() > y.abs() {
        Some(if x > 0.0 { Direction::Right } else { Direction::Left })
    } else if y != 0.0 {
        Some(if y > 0.0 { Direction::Down } else { Direction::Up })
    } else {
        // A still pointer steers nowhere rather than defaulting to Up.
        None
    }
}

/// Follows one pointer from press to release.
#[derive(Clone, Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        SwipeTracker::default()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Classifies the whole translation since `press`. Every drag event gives
    /// a fresh answer, so the last one before a tick wins.
    pub fn drag(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (ox, oy) = self.origin?;
        swipe_direction(Translation::new(x - ox, y - oy))
    }

    pub fn release(&mut self) {
        self.origin = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }
}
