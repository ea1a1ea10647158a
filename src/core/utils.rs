#[derive(Debug)]
pub struct BetweenIterator {
    current: u8,
    target: u8,
    step: u8,
}

impl Iterator for BetweenIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.current.wrapping_add(self.step);
        if self.current == self.target || !is_valid_coord(self.current) {
            None
        } else {
            Some(self.current)
        }
    }
}

/** Squares strictly between two squares of one row or column. */
pub fn between(from: u8, to: u8) -> BetweenIterator {
    #[cfg(debug_assertions)]
    if !is_in_straight_line(from, to) {
        panic!("Points can't form line to search between them!")
    }
    let step = if from & 0xf0 == to & 0xf0 {
        if to & 0x0f > from & 0x0f {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if to & 0xf0 > from & 0xf0 {
        Direction::Down
    } else {
        Direction::Up
    };
    BetweenIterator {
        current: from,
        target: to,
        step: step.step(),
    }
}

/** Orthogonal directions, rows grow downwards. */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /** 0x88 offset, added with wrapping arithmetic. */
    #[inline]
    pub fn step(self) -> u8 {
        match self {
            Direction::Up => 0xf0,
            Direction::Down => 0x10,
            Direction::Left => 0xff,
            Direction::Right => 0x01,
        }
    }
}

pub struct DirectionIterator {
    position: u8,
    direction: u8,
}

impl Iterator for DirectionIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if !is_valid_coord(self.position) {
            return None;
        }
        self.position = self.position.wrapping_add(self.direction);
        if is_valid_coord(self.position) {
            Some(self.position)
        } else {
            None
        }
    }
}

/** Walks from `position` (exclusive) to the edge of the board. */
pub fn in_direction(position: u8, direction: Direction) -> DirectionIterator {
    DirectionIterator {
        position,
        direction: direction.step(),
    }
}

pub fn distance(from: u8, to: u8) -> u8 {
    (from & 0x0f).abs_diff(to & 0x0f) + ((from & 0xf0) >> 4).abs_diff((to & 0xf0) >> 4)
}

pub fn is_in_straight_line(a: u8, b: u8) -> bool {
    a & 0x0f == b & 0x0f || a & 0xf0 == b & 0xf0
}

#[inline]
pub fn is_valid_coord(coord: u8) -> bool {
    coord & 0x88 == 0x00
}

#[inline]
pub fn compact_pos(row: u8, col: u8) -> u8 {
    row << 4 | col
}

#[inline]
pub fn unpack_pos<T: From<u8>, V: Into<u8>>(pos: V) -> (T, T) {
    let pos: u8 = pos.into();
    (((pos & 0xf0) >> 4).into(), (pos & 0x0f).into())
}
