use std::error::Error;
use std::fmt::{self, Display};

use crate::core::engine::{Move, PieceType, Player, Position};

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceType,
    pub player: Player,
    pub can_move: bool,
    pub must_continue: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

/** Where the current turn stands. */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    Normal,
    /** piece at this position has captured and must keep capturing */
    MustContinue(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    PlayerMove(Player),
    Finished(Player),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulesError {
    /** no piece on the source cell of a move */
    EmptySource(Position),
    OffBoard(Position),
    /** move is not among the legal moves of the current turn */
    IllegalMove(Move),
    GameFinished,
}

impl Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::EmptySource(pos) => write!(f, "no piece at source cell {pos}"),
            RulesError::OffBoard(pos) => write!(f, "cell {pos} is outside of the board"),
            RulesError::IllegalMove(_move) => write!(f, "move {_move} is not legal now"),
            RulesError::GameFinished => f.write_str("game is already finished"),
        }
    }
}

impl Error for RulesError {}

pub trait MatchInterface {
    fn current_board(&self) -> Vec<Vec<Cell>>;
    fn cell(&self, row: usize, col: usize) -> Option<Cell>;
    fn possible_moves(&self, row: usize, col: usize) -> Option<Vec<Move>>;
    fn execute_move(&mut self, _move: Move) -> Result<GameState, RulesError>;
    // info
    fn current_player(&self) -> Player;
    fn turn_state(&self) -> TurnState;
    fn game_ended(&self) -> bool;
}
