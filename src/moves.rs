//! Move representation, the `<col><row><dir>` wire format and move generation

use std::fmt;

use crate::board::{Board, BoardSize, Cell, Coord, Player};
use crate::error::InvalidMove;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Generation order, equal-scoring moves are resolved in this order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn from_delta(dx: isize, dy: isize) -> Option<Direction> {
        Self::ALL.iter().copied().find(|d| d.delta() == (dx, dy))
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(letter: char) -> Result<Direction, InvalidMove> {
        match letter.to_ascii_uppercase() {
            'N' => Ok(Direction::North),
            'S' => Ok(Direction::South),
            'E' => Ok(Direction::East),
            'W' => Ok(Direction::West),
            _ => Err(InvalidMove::Direction(letter)),
        }
    }
}

/// A slide of the piece on `from` to the empty square `to`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// The direction of the slide, `None` if `to` is not a neighbour of `from`
    pub fn direction(&self) -> Option<Direction> {
        let dx = self.to.x as isize - self.from.x as isize;
        let dy = self.to.y as isize - self.from.y as isize;
        Direction::from_delta(dx, dy)
    }

    /// Parses a `<col><row><dir>` token such as `14E`
    ///
    /// Coordinates are 1-indexed and the direction letter is case-insensitive.
    /// Both squares must lie on a board of the given size, ownership and
    /// occupancy are checked when the move is played.
    pub fn parse(token: &str, size: BoardSize) -> Result<Move, InvalidMove> {
        let chars: Vec<char> = token.trim().chars().collect();
        if chars.len() != 3 {
            return Err(InvalidMove::Format(token.trim().to_string()));
        }

        let mut coords = [0isize; 2];
        for (coord, &digit) in coords.iter_mut().zip(chars[..2].iter()) {
            *coord = match digit.to_digit(10) {
                Some(value @ 1..=9) => value as isize - 1,
                _ => return Err(InvalidMove::Coordinate(digit)),
            };
        }
        let [x, y] = coords;
        let direction = Direction::from_letter(chars[2])?;

        if !size.in_bounds(x, y) {
            return Err(InvalidMove::OffBoard { x, y });
        }
        let (dx, dy) = direction.delta();
        let (to_x, to_y) = (x + dx, y + dy);
        if !size.in_bounds(to_x, to_y) {
            return Err(InvalidMove::OffBoard { x: to_x, y: to_y });
        }

        Ok(Move::new(
            Coord::new(x as usize, y as usize),
            Coord::new(to_x as usize, to_y as usize),
        ))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = self.direction().map(Direction::letter).unwrap_or('?');
        write!(f, "{}{}{}", self.from.x + 1, self.from.y + 1, letter)
    }
}

/// Enumerates every slide available to `side`
///
/// Pieces are visited in row-major order and each piece tries the directions
/// in [`Direction::ALL`] order. An empty list means `side` is boxed in.
pub fn legal_moves(board: &Board, side: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces(side) {
        for direction in Direction::ALL.iter() {
            let (dx, dy) = direction.delta();
            let (x, y) = from.offset(dx, dy);
            if let Some(Cell::Empty) = board.get(x, y) {
                moves.push(Move::new(from, Coord::new(x as usize, y as usize)));
            }
        }
    }
    moves
}
