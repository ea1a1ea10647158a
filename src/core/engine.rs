use std::fmt::{self, Debug, Display};

use log::{debug, trace};

use crate::core::definitions::RulesError;
use crate::core::utils::{compact_pos, in_direction, is_valid_coord, unpack_pos, Direction};

pub const BOARD_SIZE: i8 = 8;

/** Two sides of the game. White starts at the top and moves down. */
#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash)]
pub enum Player {
    /** Side B, shown as Blue (`B`) on the board dump */
    Red = 0x00,
    #[default]
    White = 0x80,
}

impl Player {
    #[inline]
    fn from_byte(byte: u8) -> Player {
        if byte & 0x80 == 0 {
            Player::Red
        } else {
            Player::White
        }
    }

    pub fn opposite(self) -> Player {
        match self {
            Player::White => Player::Red,
            Player::Red => Player::White,
        }
    }

    /** Row where a man of this side is crowned. */
    pub fn back_rank(self) -> i8 {
        match self {
            Player::White => BOARD_SIZE - 1,
            Player::Red => 0,
        }
    }

    /** Forward and both sideways directions, never backwards. */
    pub fn man_directions(self) -> &'static [Direction] {
        match self {
            Player::White => &[Direction::Down, Direction::Left, Direction::Right],
            Player::Red => &[Direction::Up, Direction::Left, Direction::Right],
        }
    }

    pub fn letter(self) -> char {
        match self {
            Player::White => 'W',
            Player::Red => 'B',
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Player::White => "White",
            Player::Red => "Red",
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum PieceType {
    EmptySquare = 0x00,
    Man = 0x01,
    King = 0x02,
}

impl PieceType {
    #[inline]
    fn from_byte(byte: u8) -> PieceType {
        match byte & 0x03 {
            0x01 => PieceType::Man,
            0x02 => PieceType::King,
            _ => PieceType::EmptySquare,
        }
    }
}

/** Piece code layout:
 * Bit 7 -- Player, set for White
 * Bits 1-0 Piece type
 * - 1 -- Man
 * - 2 -- King
 * - 0 -- Empty Square */
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    code: u8,
}

impl Piece {
    pub const fn new(piece_type: PieceType, player: Player) -> Piece {
        Piece {
            code: piece_type as u8 | player as u8,
        }
    }

    pub const fn man(player: Player) -> Piece {
        Piece::new(PieceType::Man, player)
    }

    pub const fn king(player: Player) -> Piece {
        Piece::new(PieceType::King, player)
    }

    pub fn from_code(code: u8) -> Piece {
        Piece { code }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn player(&self) -> Player {
        Player::from_byte(self.code)
    }

    pub fn type_(&self) -> PieceType {
        PieceType::from_byte(self.code)
    }

    pub fn is_king(&self) -> bool {
        self.type_() == PieceType::King
    }

    /** Same side, promoted. Kings stay kings. */
    pub fn crowned(self) -> Piece {
        Piece::king(self.player())
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("code", &self.code)
            .field("player", &self.player())
            .field("type", &self.type_())
            .finish()
    }
}

/** Board coordinate, row 0 is the top. May point off the board. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Position {
        Position { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /** 0x88 square, `None` when off the board. */
    pub fn square(&self) -> Option<u8> {
        if self.is_valid() {
            Some(compact_pos(self.row as u8, self.col as u8))
        } else {
            None
        }
    }

    pub fn from_square(square: u8) -> Position {
        debug_assert!(is_valid_coord(square), "Square is off the board!");
        let (row, col): (u8, u8) = unpack_pos(square);
        Position::new(row as i8, col as i8)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i8, i8)> for Position {
    fn from((row, col): (i8, i8)) -> Self {
        Position::new(row, col)
    }
}

pub fn is_valid_pos(pos: Position) -> bool {
    pos.is_valid()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveType {
    QuietMove,
    /** position of the piece being captured */
    Capture(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub kind: MoveType,
}

impl Move {
    pub fn quiet(from: Position, to: Position) -> Move {
        Move {
            from,
            to,
            kind: MoveType::QuietMove,
        }
    }

    pub fn capture(from: Position, to: Position, captured: Position) -> Move {
        Move {
            from,
            to,
            kind: MoveType::Capture(captured),
        }
    }

    pub fn move_type(&self) -> MoveType {
        self.kind
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveType::Capture(_))
    }

    pub fn captured(&self) -> Option<Position> {
        match self.kind {
            MoveType::QuietMove => None,
            MoveType::Capture(pos) => Some(pos),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveType::QuietMove => write!(f, "{} -> {}", self.from, self.to),
            MoveType::Capture(captured) => {
                write!(f, "{} x {} -> {}", self.from, captured, self.to)
            }
        }
    }
}

/** Variation of 0x88 board, only the left half of every row is used */
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    arr: [u8; 128],
}

impl Board {
    /** Board without any pieces. */
    pub fn new() -> Board {
        Board { arr: [0x00; 128] }
    }

    pub fn initial() -> Board {
        let mut board = Board::new();
        for (rows, player) in [([1, 2], Player::White), ([5, 6], Player::Red)] {
            for row in rows {
                for col in 0..BOARD_SIZE as u8 {
                    board.arr[compact_pos(row, col) as usize] = Piece::man(player).code();
                }
            }
        }
        board
    }

    pub fn inside(&self) -> &[u8; 128] {
        &self.arr
    }

    /** Piece on a 0x88 square. The square must be on the board. */
    #[inline]
    pub(crate) fn square(&self, square: u8) -> Option<Piece> {
        match self.arr[square as usize] {
            0x00 => None,
            code => Some(Piece::from_code(code)),
        }
    }

    pub fn get(&self, row: i8, col: i8) -> Option<Piece> {
        self.piece_at(Position::new(row, col))
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        pos.square().and_then(|square| self.square(square))
    }

    /** Puts a piece on (or clears) a cell, used to set up positions. */
    pub fn place(&mut self, pos: Position, piece: Option<Piece>) -> Result<(), RulesError> {
        let square = pos.square().ok_or(RulesError::OffBoard(pos))?;
        self.arr[square as usize] = piece.map(|piece| piece.code()).unwrap_or(0x00);
        Ok(())
    }

    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Result<Board, RulesError> {
        self.place(pos, Some(piece))?;
        Ok(self)
    }

    /** Codes of all 64 cells in row-major order. */
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = u8> + 'a {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| compact_pos(row, col)))
            .map(|square| self.arr[square as usize])
    }

    /** Occupied cells in row-major order. */
    pub fn iter_pieces<'a>(&'a self) -> impl Iterator<Item = (Position, Piece)> + 'a {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| compact_pos(row, col)))
            .filter_map(|square| {
                self.square(square)
                    .map(|piece| (Position::from_square(square), piece))
            })
    }

    pub fn count(&self, player: Player) -> usize {
        self.iter_pieces()
            .filter(|(_, piece)| piece.player() == player)
            .count()
    }

    /** Execute move with validated coordinates, returns whether the piece was crowned. */
    fn execute(&mut self, _move: &Move, piece: Piece) -> bool {
        let promoted = !piece.is_king() && _move.to.row == piece.player().back_rank();
        let landed = if promoted { piece.crowned() } else { piece };
        let square = |pos: Position| compact_pos(pos.row as u8, pos.col as u8) as usize;
        self.arr[square(_move.to)] = landed.code();
        self.arr[square(_move.from)] = 0x00;
        if let Some(captured) = _move.captured() {
            self.arr[square(captured)] = 0x00;
        }
        promoted
    }
}

impl Default for Board {
    /** Starting position */
    fn default() -> Self {
        Board::initial()
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board\n{self}")
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "Row {row}: ")?;
            for col in 0..BOARD_SIZE {
                match self.get(row, col) {
                    None => f.write_str("[ ]")?,
                    Some(piece) => {
                        let king = if piece.is_king() { "K" } else { "" };
                        write!(f, "[{}{}]", piece.player().letter(), king)?
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn create_initial_board() -> Board {
    Board::initial()
}

pub fn board_to_string(board: &Board) -> String {
    board.to_string()
}

fn man_moves(
    board: &Board,
    origin: u8,
    player: Player,
    direction: Direction,
    moves: &mut Vec<Move>,
) {
    let from = Position::from_square(origin);
    let mut ray = in_direction(origin, direction);
    let Some(adjacent) = ray.next() else {
        return;
    };
    match board.square(adjacent) {
        None => moves.push(Move::quiet(from, Position::from_square(adjacent))),
        Some(target) if target.player() != player => {
            if let Some(landing) = ray.next().filter(|&sq| board.square(sq).is_none()) {
                moves.push(Move::capture(
                    from,
                    Position::from_square(landing),
                    Position::from_square(adjacent),
                ));
            }
        }
        Some(_) => (),
    }
}

fn king_moves(
    board: &Board,
    origin: u8,
    player: Player,
    direction: Direction,
    moves: &mut Vec<Move>,
) {
    let from = Position::from_square(origin);
    let mut ray = in_direction(origin, direction);
    // open run first, it ends at the nearest obstruction
    let (obstacle, blocker) = loop {
        let Some(square) = ray.next() else {
            return;
        };
        match board.square(square) {
            None => moves.push(Move::quiet(from, Position::from_square(square))),
            Some(piece) => break (square, piece),
        }
    };
    if blocker.player() == player {
        return;
    }
    let captured = Position::from_square(obstacle);
    for landing in ray.take_while(|&sq| board.square(sq).is_none()) {
        moves.push(Move::capture(from, Position::from_square(landing), captured));
    }
}

/** Moves of a single piece, the forced capture rule is not applied here. */
pub fn get_piece_moves(board: &Board, pos: Position, piece: Piece) -> Vec<Move> {
    let mut moves = Vec::with_capacity(16);
    let Some(origin) = pos.square() else {
        return moves;
    };
    let player = piece.player();
    if piece.is_king() {
        for direction in Direction::ALL {
            king_moves(board, origin, player, direction, &mut moves);
        }
    } else {
        for &direction in player.man_directions() {
            man_moves(board, origin, player, direction, &mut moves);
        }
    }
    trace!("{} moves for {:?} at {}", moves.len(), piece, pos);
    moves
}

/** Legal moves for `player`, limited to the piece at `from` when it is given
 * (a piece in the middle of a capture sequence). Captures are mandatory. */
pub fn get_valid_moves(board: &Board, player: Player, from: Option<Position>) -> Vec<Move> {
    let mut moves = match from {
        Some(pos) => match board.piece_at(pos) {
            Some(piece) if piece.player() == player => get_piece_moves(board, pos, piece),
            _ => Vec::new(),
        },
        None => board
            .iter_pieces()
            .filter(|(_, piece)| piece.player() == player)
            .flat_map(|(pos, piece)| get_piece_moves(board, pos, piece))
            .collect(),
    };
    if moves.iter().any(Move::is_capture) {
        let total = moves.len();
        moves.retain(Move::is_capture);
        debug!(
            "{player} must capture: {} of {total} moves left",
            moves.len()
        );
    }
    moves
}

/** Applies a move to a copy of the board. Returns the new board and whether
 * the moved piece was crowned. The source board is never touched. */
pub fn apply_move(board: &Board, _move: &Move) -> Result<(Board, bool), RulesError> {
    for pos in [_move.from, _move.to].into_iter().chain(_move.captured()) {
        if !pos.is_valid() {
            return Err(RulesError::OffBoard(pos));
        }
    }
    let piece = board
        .piece_at(_move.from)
        .ok_or(RulesError::EmptySource(_move.from))?;
    let mut next = board.clone();
    let promoted = next.execute(_move, piece);
    trace!("Applied {_move} for {}", piece.player());
    if promoted {
        debug!("{} man crowned at {}", piece.player(), _move.to);
    }
    Ok((next, promoted))
}

/** Winner by material only: a side without pieces has lost. */
pub fn check_winner(board: &Board) -> Option<Player> {
    let (red, white) = board
        .iter_pieces()
        .fold((0, 0), |(red, white), (_, piece)| match piece.player() {
            Player::Red => (red + 1, white),
            Player::White => (red, white + 1),
        });
    if red == 0 {
        Some(Player::White)
    } else if white == 0 {
        Some(Player::Red)
    } else {
        None
    }
}
