use super::types::{Mark, Position};

pub fn empty_board(size: usize) -> Vec<Vec<Mark>> {
    vec![vec![Mark::Empty; size]; size]
}

/// Empty cells in row-major order.
pub fn get_available_moves(board: &[Vec<Mark>]) -> Vec<Position> {
    let mut moves = Vec::new();
    for (row, cells) in board.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == Mark::Empty {
                moves.push(Position::new(row, col));
            }
        }
    }
    moves
}

pub fn first_available_move(board: &[Vec<Mark>]) -> Option<Position> {
    board.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|&cell| cell == Mark::Empty)
            .map(|col| Position::new(row, col))
    })
}

pub fn is_board_full(board: &[Vec<Mark>]) -> bool {
    board
        .iter()
        .all(|cells| cells.iter().all(|&cell| cell != Mark::Empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_moves_are_row_major() {
        let board = vec![
            vec![Mark::X, Mark::Empty, Mark::O],
            vec![Mark::Empty, Mark::X, Mark::Empty],
            vec![Mark::O, Mark::O, Mark::X],
        ];
        let moves = get_available_moves(&board);
        assert_eq!(
            moves,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 2)]
        );
        assert_eq!(first_available_move(&board), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = vec![vec![Mark::X; 3]; 3];
        assert!(is_board_full(&board));
        assert!(get_available_moves(&board).is_empty());
        assert_eq!(first_available_move(&board), None);
        assert!(!is_board_full(&empty_board(3)));
    }
}
