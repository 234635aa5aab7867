use std::collections::HashMap;
use std::time::{Duration, Instant};

use ttt_common::Position;

use crate::config::{Rgb, Theme};

pub const TILE_FADE: Duration = Duration::from_millis(100);
pub const FLASH_PERIOD: Duration = Duration::from_millis(200);
pub const FLASH_COUNT: u32 = 4;
pub const THINKING_DOT_PERIOD: Duration = Duration::from_millis(500);

/// A highlight that blinks a set of cells after a game ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Flash {
    WinningLine { cells: Vec<Position>, started: Instant },
    Draw { started: Instant },
}

impl Flash {
    fn started(&self) -> Instant {
        match self {
            Flash::WinningLine { started, .. } | Flash::Draw { started } => *started,
        }
    }

    fn covers(&self, pos: Position) -> bool {
        match self {
            Flash::WinningLine { cells, .. } => cells.contains(&pos),
            Flash::Draw { .. } => true,
        }
    }

    /// Color override for `pos`, or `None` when the cell keeps its own color.
    pub fn color_at(&self, pos: Position, theme: &Theme, now: Instant) -> Option<Rgb> {
        if !self.covers(pos) {
            return None;
        }
        let step = flash_step(now.saturating_duration_since(self.started()))?;
        let lit = step % 2 == 0;
        Some(match self {
            Flash::WinningLine { .. } if lit => Rgb::WIN_FLASH,
            Flash::WinningLine { .. } => theme.empty,
            Flash::Draw { .. } if lit => Rgb::DRAW_FLASH,
            Flash::Draw { .. } => Rgb::WHITE,
        })
    }

    pub fn is_running(&self, now: Instant) -> bool {
        flash_step(now.saturating_duration_since(self.started())).is_some()
    }
}

fn flash_step(elapsed: Duration) -> Option<u32> {
    let step = (elapsed.as_millis() / FLASH_PERIOD.as_millis()) as u32;
    (step <= FLASH_COUNT * 2).then_some(step)
}

/// Tracks when each mark appeared so new tiles fade in from white.
#[derive(Debug, Default)]
pub struct TileFades {
    placed_at: HashMap<Position, Instant>,
}

impl TileFades {
    pub fn place(&mut self, pos: Position, now: Instant) {
        self.placed_at.insert(pos, now);
    }

    pub fn clear(&mut self) {
        self.placed_at.clear();
    }

    pub fn color_at(&self, pos: Position, settled: Rgb, now: Instant) -> Rgb {
        match self.placed_at.get(&pos) {
            Some(&placed) if now.saturating_duration_since(placed) < TILE_FADE => Rgb::WHITE,
            _ => settled,
        }
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.placed_at
            .values()
            .any(|&placed| now.saturating_duration_since(placed) < TILE_FADE)
    }
}

/// "AI is thinking", "AI is thinking.", ... cycling every half second.
pub fn thinking_text(since: Instant, now: Instant) -> String {
    let ticks = now.saturating_duration_since(since).as_millis() / THINKING_DOT_PERIOD.as_millis();
    format!("AI is thinking{}", ".".repeat((ticks % 4) as usize))
}
