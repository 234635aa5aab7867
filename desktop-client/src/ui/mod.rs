mod app;
mod board;

pub use app::TicTacToeApp;
pub use board::board_side;
