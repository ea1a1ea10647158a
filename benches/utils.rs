use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use dama_engine::{
    apply_move, get_valid_moves, utils::perft, Board, Game, GameState, Piece, Player, Position,
};

fn iter_raw_count(board: &Board) -> usize {
    board.iter().filter(|&code| code != 0x00).count()
}

fn iter_pieces(board: &Board) -> usize {
    board
        .iter_pieces()
        .filter(|(_, piece)| piece.is_king())
        .count()
}

fn kings_board() -> Board {
    let mut board = Board::new();
    for (row, col, player) in [
        (0, 0, Player::White),
        (3, 4, Player::White),
        (7, 7, Player::Red),
        (4, 1, Player::Red),
    ] {
        board
            .place(Position::new(row, col), Some(Piece::king(player)))
            .expect("cell is on the board");
    }
    board
}

fn random_playout(seed: u64, max_plies: usize) -> Option<Player> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..max_plies {
        if let Ok(GameState::Finished(winner)) = game.make_random_move_with(&mut rng) {
            return Some(winner);
        }
    }
    None
}

fn utils_benchmark(c: &mut Criterion) {
    c.bench_function("iter raw count", |b| {
        b.iter(|| iter_raw_count(black_box(&Board::default())))
    });
    c.bench_function("iter piece count", |b| {
        b.iter(|| iter_pieces(black_box(&Board::default())))
    });
    c.bench_function("initial moves", |b| {
        b.iter(|| get_valid_moves(black_box(&Board::default()), Player::White, None))
    });
    c.bench_function("flying kings moves", |b| {
        let board = kings_board();
        b.iter(|| get_valid_moves(black_box(&board), Player::White, None))
    });
    c.bench_function("apply copy", |b| {
        let board = Board::default();
        let _move = get_valid_moves(&board, Player::White, None)[0];
        b.iter(|| apply_move(black_box(&board), black_box(&_move)))
    });
    c.bench_function("random playout 300", |b| {
        b.iter(|| random_playout(black_box(7), 300))
    });
}

fn perft_benchmark(c: &mut Criterion) {
    for depth in [3, 4] {
        c.bench_function(&format!("perft initial - {depth}"), |b| {
            b.iter(|| perft(&Game::new(), depth))
        });
    }
}

criterion_group!(benches, utils_benchmark, perft_benchmark);
criterion_main!(benches);
