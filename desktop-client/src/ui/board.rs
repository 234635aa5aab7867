use std::time::Instant;

use eframe::egui;
use ttt_common::games::tictactoe::TicTacToeGameState;
use ttt_common::{Mark, Position};

use crate::animation::{Flash, TileFades};
use crate::config::{Rgb, Theme};

pub const CELL_SIZE: f32 = 110.0;
pub const CELL_GAP: f32 = 6.0;
const CELL_ROUNDING: f32 = 4.0;

pub fn board_side(size: usize) -> f32 {
    size as f32 * CELL_SIZE + size.saturating_sub(1) as f32 * CELL_GAP
}

pub fn to_color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}

fn cell_rect(board_rect: egui::Rect, pos: Position) -> egui::Rect {
    let stride = CELL_SIZE + CELL_GAP;
    egui::Rect::from_min_size(
        egui::pos2(
            board_rect.left() + pos.col as f32 * stride,
            board_rect.top() + pos.row as f32 * stride,
        ),
        egui::vec2(CELL_SIZE, CELL_SIZE),
    )
}

fn cell_at(board_rect: egui::Rect, point: egui::Pos2, size: usize) -> Option<Position> {
    if !board_rect.contains(point) {
        return None;
    }
    let stride = CELL_SIZE + CELL_GAP;
    let col = ((point.x - board_rect.left()) / stride) as usize;
    let row = ((point.y - board_rect.top()) / stride) as usize;
    (row < size && col < size).then(|| Position::new(row, col))
}

pub struct BoardView<'a> {
    pub state: &'a TicTacToeGameState,
    pub theme: &'a Theme,
    pub fades: &'a TileFades,
    pub flash: Option<&'a Flash>,
    pub interactive: bool,
}

impl BoardView<'_> {
    /// Draws the grid and returns the cell the user clicked, if any.
    pub fn show(&self, ui: &mut egui::Ui, now: Instant) -> Option<Position> {
        let size = self.state.size();
        let side = board_side(size);
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());

        let hovered = if self.interactive {
            response.hover_pos().and_then(|p| cell_at(rect, p, size))
        } else {
            None
        };

        let painter = ui.painter();
        let font = egui::FontId::proportional(CELL_SIZE * 0.5);

        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                let mark = self.state.cell(row, col).unwrap_or(Mark::Empty);
                let rect = cell_rect(rect, pos);

                painter.rect_filled(rect, CELL_ROUNDING, to_color32(self.cell_color(pos, mark, hovered, now)));

                if mark != Mark::Empty {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        mark.symbol(),
                        font.clone(),
                        egui::Color32::WHITE,
                    );
                }
            }
        }

        if !self.interactive || !response.clicked() {
            return None;
        }
        response
            .interact_pointer_pos()
            .and_then(|p| cell_at(rect, p, size))
    }

    fn cell_color(&self, pos: Position, mark: Mark, hovered: Option<Position>, now: Instant) -> Rgb {
        if let Some(color) = self.flash.and_then(|f| f.color_at(pos, self.theme, now)) {
            return color;
        }
        if mark == Mark::Empty && hovered == Some(pos) {
            return Rgb::HOVER;
        }
        self.fades.color_at(pos, self.theme.cell_color(mark), now)
    }
}
