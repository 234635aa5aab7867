use crate::games::SessionRng;
use crate::log;
use super::board::{first_available_move, get_available_moves, is_board_full};
use super::game_state::TicTacToeGameState;
use super::types::{Difficulty, Mark, Position};
use super::win_detector::check_win;

const WIN_SCORE: i32 = 1;
const LOSS_SCORE: i32 = -1;
const DRAW_SCORE: i32 = 0;

pub struct BotInput {
    pub board: Vec<Vec<Mark>>,
    pub bot_mark: Mark,
}

impl BotInput {
    /// The bot plays whichever mark is to move in `state`.
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board().to_vec(),
            bot_mark: state.current_mark(),
        }
    }
}

/// Returns an empty cell for the bot to play, or `None` if the board has no
/// empty cell left. Callers are expected to check for a full board first.
pub fn calculate_move(
    difficulty: Difficulty,
    input: BotInput,
    rng: &mut SessionRng,
) -> Option<Position> {
    if is_board_full(&input.board) {
        log!("Bot asked to move on a full board");
        return None;
    }

    match difficulty {
        Difficulty::Easy => calculate_first_empty_move(&input),
        Difficulty::Medium => calculate_random_move(&input, rng),
        Difficulty::Hard => calculate_minimax_move(&input),
    }
}

fn calculate_first_empty_move(input: &BotInput) -> Option<Position> {
    first_available_move(&input.board)
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = get_available_moves(&input.board);
    rng.choose(&available_moves).copied()
}

/// Full-depth minimax without pruning. Scores are taken from the bot's side:
/// +1 bot win, -1 opponent win, 0 draw. Ties keep the first cell in
/// row-major order.
pub fn calculate_minimax_move(input: &BotInput) -> Option<Position> {
    let bot_mark = input.bot_mark;
    let opponent_mark = bot_mark.opponent()?;

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for pos in get_available_moves(&input.board) {
        let child = with_mark(&input.board, pos, bot_mark);
        let score = minimax(&child, opponent_mark, bot_mark, opponent_mark);

        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
    }

    best_move
}

fn minimax(board: &[Vec<Mark>], to_move: Mark, bot_mark: Mark, opponent_mark: Mark) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == bot_mark { WIN_SCORE } else { LOSS_SCORE };
    }

    if is_board_full(board) {
        return DRAW_SCORE;
    }

    let is_maximizing = to_move == bot_mark;
    let next = if is_maximizing { opponent_mark } else { bot_mark };

    let scores = get_available_moves(board)
        .into_iter()
        .map(|pos| minimax(&with_mark(board, pos, to_move), next, bot_mark, opponent_mark));

    let best = if is_maximizing { scores.max() } else { scores.min() };
    best.unwrap_or(DRAW_SCORE)
}

fn with_mark(board: &[Vec<Mark>], pos: Position, mark: Mark) -> Vec<Vec<Mark>> {
    let mut child = board.to_vec();
    child[pos.row][pos.col] = mark;
    child
}
