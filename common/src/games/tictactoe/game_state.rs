use super::board::{empty_board, get_available_moves, is_board_full};
use super::types::{GameStatus, Mark, Position, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

pub const DEFAULT_BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    board: Vec<Vec<Mark>>,
    size: usize,
    current_mark: Mark,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl TicTacToeGameState {
    pub fn new(size: usize) -> Self {
        Self {
            board: empty_board(size),
            size,
            current_mark: Mark::X,
        }
    }

    /// Builds a state from an existing square grid with `current_mark` to move.
    pub fn from_board(board: Vec<Vec<Mark>>, current_mark: Mark) -> Result<Self, String> {
        let size = board.len();
        if size == 0 {
            return Err("Board must have at least one row".to_string());
        }
        if let Some(row) = board.iter().position(|cells| cells.len() != size) {
            return Err(format!(
                "Board must be square: row {} has {} cells, expected {}",
                row,
                board[row].len(),
                size
            ));
        }
        if current_mark == Mark::Empty {
            return Err("Current mark must be X or O".to_string());
        }

        Ok(Self {
            board,
            size,
            current_mark,
        })
    }

    pub fn board(&self) -> &[Vec<Mark>] {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.board.get(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Places the current mark and passes the turn. On error nothing changes.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), String> {
        if self.status().is_terminal() {
            return Err("Game is already over".to_string());
        }

        match self.cell(row, col) {
            None => return Err("Position out of bounds".to_string()),
            Some(Mark::Empty) => {}
            Some(_) => return Err("Cell is already marked".to_string()),
        }

        self.board[row][col] = self.current_mark;
        self.switch_turn();

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X {
            Mark::O
        } else {
            Mark::X
        };
    }

    pub fn check_winner(&self) -> Option<Mark> {
        check_win(&self.board)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn is_full(&self) -> bool {
        is_board_full(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.check_winner() {
            return GameStatus::from_winner(winner);
        }
        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn available_moves(&self) -> Vec<Position> {
        get_available_moves(&self.board)
    }

    pub fn reset(&mut self) {
        self.board = empty_board(self.size);
        self.current_mark = Mark::X;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_with_x_to_move() {
        let state = TicTacToeGameState::default();
        assert_eq!(state.size(), 3);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.available_moves().len(), 9);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_apply_move_places_mark_and_flips_turn() {
        let mut state = TicTacToeGameState::new(3);
        assert!(state.apply_move(1, 1).is_ok());
        assert_eq!(state.cell(1, 1), Some(Mark::X));
        assert_eq!(state.current_mark(), Mark::O);
        assert_eq!(state.available_moves().len(), 8);

        assert!(state.apply_move(0, 0).is_ok());
        assert_eq!(state.cell(0, 0), Some(Mark::O));
        assert_eq!(state.current_mark(), Mark::X);
    }

    #[test]
    fn test_repeated_illegal_move_never_flips_turn() {
        let mut state = TicTacToeGameState::new(3);
        state.apply_move(0, 0).unwrap();
        let snapshot = state.clone();

        for _ in 0..5 {
            assert_eq!(state.apply_move(0, 0), Err("Cell is already marked".to_string()));
        }
        assert_eq!(state, snapshot);
        assert_eq!(state.current_mark(), Mark::O);
    }

    #[test]
    fn test_out_of_range_move_is_rejected() {
        let mut state = TicTacToeGameState::new(3);
        assert_eq!(state.apply_move(3, 0), Err("Position out of bounds".to_string()));
        assert_eq!(state.apply_move(0, 7), Err("Position out of bounds".to_string()));
        assert_eq!(state, TicTacToeGameState::new(3));
    }

    #[test]
    fn test_moves_after_win_are_rejected() {
        let mut state = TicTacToeGameState::new(3);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            state.apply_move(row, col).unwrap();
        }
        assert_eq!(state.status(), GameStatus::XWon);
        assert_eq!(state.check_winner(), Some(Mark::X));
        assert_eq!(state.apply_move(2, 2), Err("Game is already over".to_string()));
        assert_eq!(state.cell(2, 2), Some(Mark::Empty));
    }

    #[test]
    fn test_full_sequence_without_line_is_draw() {
        // X O X / X O O / O X X
        let mut state = TicTacToeGameState::new(3);
        let moves = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        for (i, &(row, col)) in moves.iter().enumerate() {
            state.apply_move(row, col).unwrap();
            if i + 1 < moves.len() {
                assert_eq!(state.status(), GameStatus::InProgress, "after move {}", i);
            }
        }
        assert!(state.is_full());
        assert_eq!(state.check_winner(), None);
        assert_eq!(state.status(), GameStatus::Draw);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = TicTacToeGameState::new(3);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            state.apply_move(row, col).unwrap();
        }
        state.reset();
        assert_eq!(state, TicTacToeGameState::new(3));

        let mut state = TicTacToeGameState::new(3);
        state.apply_move(2, 2).unwrap();
        state.reset();
        assert_eq!(state.current_mark(), Mark::X);
        assert!(state.available_moves().len() == 9);
    }

    #[test]
    fn test_from_board_rejects_non_square() {
        let board = vec![vec![Mark::Empty; 3], vec![Mark::Empty; 2], vec![Mark::Empty; 3]];
        assert!(TicTacToeGameState::from_board(board, Mark::X).is_err());
        assert!(TicTacToeGameState::from_board(Vec::new(), Mark::X).is_err());
        assert!(TicTacToeGameState::from_board(empty_board(3), Mark::Empty).is_err());
    }
}
