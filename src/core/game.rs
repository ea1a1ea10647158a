use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::definitions::{Cell, Figure, GameState, MatchInterface, RulesError, TurnState};
use crate::core::engine::{
    apply_move, check_winner, get_valid_moves, Board, Move, Player, Position, BOARD_SIZE,
};

fn ui_board(game: &Game) -> Vec<Vec<Cell>> {
    let legal = game.legal_moves();
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .map(|col| ui_cell(game, Position::new(row, col), &legal))
                .collect()
        })
        .collect()
}

fn ui_cell(game: &Game, pos: Position, legal: &[Move]) -> Cell {
    match game.board.piece_at(pos) {
        None => Cell::Empty,
        Some(piece) => Cell::Figure(Figure {
            kind: piece.type_(),
            player: piece.player(),
            can_move: legal.iter().any(|_move| _move.from == pos),
            must_continue: game.turn == TurnState::MustContinue(pos),
        }),
    }
}

/** Turn controller: holds the position, the side to move and an unfinished
 * capture sequence. Rules themselves live in the engine. */
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Player,
    turn: TurnState,
    winner: Option<Player>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_board(Board::initial(), Player::White)
    }

    pub fn with_board(board: Board, player: Player) -> Game {
        let mut game = Game {
            winner: check_winner(&board),
            board,
            current_player: player,
            turn: TurnState::Normal,
        };
        game.check_blocked();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn forced_piece(&self) -> Option<Position> {
        match self.turn {
            TurnState::Normal => None,
            TurnState::MustContinue(pos) => Some(pos),
        }
    }

    pub fn state(&self) -> GameState {
        match self.winner {
            Some(winner) => GameState::Finished(winner),
            None => GameState::PlayerMove(self.current_player),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        get_valid_moves(&self.board, self.current_player, self.forced_piece())
    }

    pub fn moves_from(&self, pos: Position) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|_move| _move.from == pos)
            .collect()
    }

    /** Commits a legal move and advances the turn. */
    pub fn play(&mut self, _move: Move) -> Result<GameState, RulesError> {
        if self.winner.is_some() {
            return Err(RulesError::GameFinished);
        }
        if !self.legal_moves().contains(&_move) {
            return Err(RulesError::IllegalMove(_move));
        }
        let (board, promoted) = apply_move(&self.board, &_move)?;
        self.board = board;

        if let Some(winner) = check_winner(&self.board) {
            info!("{winner} wins, no pieces of {} left", winner.opposite());
            self.winner = Some(winner);
            return Ok(self.state());
        }

        // crowning ends the turn even in the middle of a capture sequence
        let continues = _move.is_capture()
            && !promoted
            && get_valid_moves(&self.board, self.current_player, Some(_move.to))
                .iter()
                .any(Move::is_capture);
        if continues {
            debug!("{} continues capturing from {}", self.current_player, _move.to);
            self.turn = TurnState::MustContinue(_move.to);
        } else {
            self.turn = TurnState::Normal;
            self.current_player = self.current_player.opposite();
            debug!("Turn passes to {}", self.current_player);
        }
        self.check_blocked();
        Ok(self.state())
    }

    /** A side with nothing to play loses. */
    fn check_blocked(&mut self) {
        if self.winner.is_none() && self.legal_moves().is_empty() {
            let winner = self.current_player.opposite();
            info!("{} is blocked, {winner} wins", self.current_player);
            self.winner = Some(winner);
        }
    }

    /** Random playout step, not a strategy. */
    pub fn make_random_move_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GameState, RulesError> {
        let chosen = self
            .legal_moves()
            .choose(rng)
            .copied()
            .ok_or(RulesError::GameFinished)?;
        self.play(chosen)
    }

    pub fn make_random_move(&mut self) -> Result<GameState, RulesError> {
        self.make_random_move_with(&mut rand::thread_rng())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl MatchInterface for Game {
    fn current_board(&self) -> Vec<Vec<Cell>> {
        ui_board(self)
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < BOARD_SIZE as usize && col < BOARD_SIZE as usize {
            let pos = Position::new(row as i8, col as i8);
            Some(ui_cell(self, pos, &self.moves_from(pos)))
        } else {
            None
        }
    }

    fn possible_moves(&self, row: usize, col: usize) -> Option<Vec<Move>> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return None;
        }
        let moves = self.moves_from(Position::new(row as i8, col as i8));
        if moves.is_empty() {
            None
        } else {
            Some(moves)
        }
    }

    fn execute_move(&mut self, _move: Move) -> Result<GameState, RulesError> {
        self.play(_move)
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn turn_state(&self) -> TurnState {
        self.turn
    }

    fn game_ended(&self) -> bool {
        self.winner.is_some()
    }
}
