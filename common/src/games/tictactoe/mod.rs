mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{empty_board, get_available_moves, is_board_full};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use game_state::{DEFAULT_BOARD_SIZE, TicTacToeGameState};
pub use session::{AI_MARK, MatchSession, MatchSettings, Phase, SessionEvent};
pub use types::{Difficulty, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{check_win, check_win_with_line};
