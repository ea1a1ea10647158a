use std::{fmt::Display, ops::AddAssign};

use crate::core::definitions::{GameState, RulesError};
use crate::core::engine::{Board, Move};
use crate::core::game::Game;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub all: usize,
    pub captures: usize,
    pub promotions: usize,
    pub wins: usize,
}

impl PerftResult {
    pub fn combine(self, other: PerftResult) -> Self {
        PerftResult {
            all: self.all + other.all,
            captures: self.captures + other.captures,
            promotions: self.promotions + other.promotions,
            wins: self.wins + other.wins,
        }
    }
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} pr: {:<4} W: {:4}",
            self.all, self.captures, self.promotions, self.wins
        )
    }
}

fn is_promotion(board: &Board, _move: &Move) -> bool {
    board
        .piece_at(_move.from)
        .map(|piece| !piece.is_king() && _move.to.row == piece.player().back_rank())
        .unwrap_or(false)
}

fn count_perf_result(game: &Game, moves: Vec<Move>) -> Result<PerftResult, RulesError> {
    let mut result = PerftResult {
        all: moves.len(),
        ..Default::default()
    };
    for _move in moves {
        if _move.is_capture() {
            result.captures += 1;
        }
        if is_promotion(game.board(), &_move) {
            result.promotions += 1;
        }
        let mut next = game.clone();
        if matches!(next.play(_move)?, GameState::Finished(_)) {
            result.wins += 1;
        }
    }
    Ok(result)
}

/** Counts the move tree below `game`. Every call of `Game::play` is one ply,
 * so each jump of a capture sequence is counted separately. */
pub fn perft(game: &Game, depth: usize) -> Result<PerftResult, RulesError> {
    if depth == 0 {
        return Ok(PerftResult {
            all: 1,
            ..Default::default()
        });
    }
    let possible_moves = game.legal_moves();
    if depth == 1 {
        return count_perf_result(game, possible_moves);
    }
    let mut result = PerftResult::default();
    for _move in possible_moves {
        result += perft_after(game, _move, depth)?;
    }
    Ok(result)
}

/** Plays `_move` on a copy and counts what is left of `depth`. A finished
 * game only counts as a node when it sits exactly at the requested depth. */
fn perft_after(game: &Game, _move: Move, depth: usize) -> Result<PerftResult, RulesError> {
    let mut next = game.clone();
    match next.play(_move)? {
        GameState::Finished(_) => Ok(PerftResult {
            all: usize::from(depth == 1),
            wins: 1,
            ..Default::default()
        }),
        GameState::PlayerMove(_) => perft(&next, depth - 1),
    }
}

pub fn perf_test(
    game: &Game,
    depth: usize,
    expected: usize,
    detailed: bool,
) -> Result<bool, RulesError> {
    if !detailed || depth == 0 {
        let result = perft(game, depth)?;
        #[cfg(test)]
        println!(" details: {result}");
        return Ok(result.all == expected);
    }
    let mut total = PerftResult::default();
    for _move in game.legal_moves() {
        let result = perft_after(game, _move, depth)?;
        println!(" {_move} : {result}");
        total += result;
    }
    println!("+ total: {total}");
    Ok(total.all == expected)
}
