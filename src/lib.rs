pub mod advice;
pub mod core;
pub mod utils;

// module re-exports
pub use crate::core::definitions::{Cell, Figure, GameState, MatchInterface, RulesError, TurnState};
pub use crate::core::engine::{
    apply_move, board_to_string, check_winner, create_initial_board, get_piece_moves,
    get_valid_moves, is_valid_pos, Board, Move, MoveType, Piece, PieceType, Player, Position,
};
pub use crate::core::game::Game;
