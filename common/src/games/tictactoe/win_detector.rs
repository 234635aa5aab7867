use super::types::{Mark, Position, WinningLine};

/// Scans rows, then columns, then the main diagonal, then the
/// anti-diagonal, and returns the mark of the first complete line.
pub fn check_win(board: &[Vec<Mark>]) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &[Vec<Mark>]) -> Option<WinningLine> {
    let size = board.len();
    if size == 0 {
        return None;
    }

    for row in 0..size {
        if let Some(line) = complete_line(board, (0..size).map(|col| Position::new(row, col))) {
            return Some(line);
        }
    }

    for col in 0..size {
        if let Some(line) = complete_line(board, (0..size).map(|row| Position::new(row, col))) {
            return Some(line);
        }
    }

    if let Some(line) = complete_line(board, (0..size).map(|i| Position::new(i, i))) {
        return Some(line);
    }

    complete_line(board, (0..size).map(|i| Position::new(i, size - 1 - i)))
}

fn complete_line(
    board: &[Vec<Mark>],
    cells: impl Iterator<Item = Position>,
) -> Option<WinningLine> {
    let cells: Vec<Position> = cells.collect();
    let first = cells.first()?;
    let mark = board[first.row][first.col];
    if mark == Mark::Empty {
        return None;
    }

    if cells.iter().all(|pos| board[pos.row][pos.col] == mark) {
        Some(WinningLine::new(mark, cells))
    } else {
        None
    }
}
