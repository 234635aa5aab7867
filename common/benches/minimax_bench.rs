use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use ttt_common::games::tictactoe::{BotInput, Mark, TicTacToeGameState, calculate_minimax_move};

fn state_after(moves: &[(usize, usize)]) -> TicTacToeGameState {
    let mut state = TicTacToeGameState::new(3);
    for &(row, col) in moves {
        state
            .apply_move(row, col)
            .expect("bench opening must be legal");
    }
    state
}

fn bench_reply_to_center(state: &TicTacToeGameState) {
    let input = BotInput::from_game_state(state);
    black_box(calculate_minimax_move(&input));
}

fn bench_opening_as_x() {
    let input = BotInput {
        board: vec![vec![Mark::Empty; 3]; 3],
        bot_mark: Mark::X,
    };
    black_box(calculate_minimax_move(&input));
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");
    group.sample_size(10);

    let after_center = state_after(&[(1, 1)]);
    group.bench_function("reply_to_center", |b| {
        b.iter(|| bench_reply_to_center(&after_center))
    });

    let mid_game = state_after(&[(0, 0), (1, 1), (2, 2)]);
    group.bench_function("mid_game", |b| b.iter(|| bench_reply_to_center(&mid_game)));

    group.bench_function("empty_board_first_move", |b| b.iter(bench_opening_as_x));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
