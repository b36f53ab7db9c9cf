use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, InvalidMove};
use crate::moves::Move;
use crate::{MAX_HEIGHT, MAX_WIDTH};

/// Line directions scanned for runs: east, south, south-east and south-west
pub static LINE_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    /// Player 0, moves first and maximizes the search score
    White,
    /// Player 1, minimizes the search score
    Black,
}

impl Player {
    pub fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub fn is_maximizing(self) -> bool {
        self == Player::White
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

impl FromStr for Player {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "w" | "white" => Ok(Player::White),
            "1" | "b" | "black" => Ok(Player::Black),
            other => Err(ConfigError::UnknownColour(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Piece(Player),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::Piece(player) => Some(*player),
            Cell::Empty => None,
        }
    }
}

/// A square on the board, `x` is the column and `y` the row counted from the top
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The signed coordinates one step of `(dx, dy)` away, possibly off the board
    pub fn offset(self, dx: isize, dy: isize) -> (isize, isize) {
        (self.x as isize + dx, self.y as isize + dy)
    }
}

/// The selectable board dimensions
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BoardSize {
    /// 4 rows by 5 columns
    Standard,
    /// 6 rows by 7 columns
    Large,
}

impl BoardSize {
    pub fn width(self) -> usize {
        match self {
            BoardSize::Standard => 5,
            BoardSize::Large => MAX_WIDTH,
        }
    }

    pub fn height(self) -> usize {
        match self {
            BoardSize::Standard => 4,
            BoardSize::Large => MAX_HEIGHT,
        }
    }

    pub fn in_bounds(self, x: isize, y: isize) -> bool {
        0 <= x && x < self.width() as isize && 0 <= y && y < self.height() as isize
    }

    /// All squares in row-major order
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        let width = self.width();
        (0..self.height()).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Every run of `N` consecutive squares along a line direction
    ///
    /// Runs are yielded direction by direction (horizontal, vertical,
    /// down-right, down-left), each in row-major order of its first square.
    pub fn segments<const N: usize>(self) -> impl Iterator<Item = [Coord; N]> {
        let size = self;
        LINE_DIRECTIONS.iter().flat_map(move |&(dx, dy)| {
            size.coords().filter_map(move |start| {
                let span = N as isize - 1;
                let (end_x, end_y) = start.offset(dx * span, dy * span);
                if !size.in_bounds(end_x, end_y) {
                    return None;
                }
                let mut run = [start; N];
                for (step, square) in run.iter_mut().enumerate() {
                    let (x, y) = start.offset(dx * step as isize, dy * step as isize);
                    *square = Coord::new(x as usize, y as usize);
                }
                Some(run)
            })
        })
    }

    // columns holding the starting pieces and the first row they occupy
    fn home_squares(self) -> (usize, usize, usize) {
        match self {
            BoardSize::Standard => (0, 4, 0),
            BoardSize::Large => (1, 5, 1),
        }
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize::Standard
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardSize::Standard => write!(f, "standard ({}x{})", self.height(), self.width()),
            BoardSize::Large => write!(f, "large ({}x{})", self.height(), self.width()),
        }
    }
}

impl FromStr for BoardSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "standard" | "4x5" => Ok(BoardSize::Standard),
            "l" | "large" | "6x7" => Ok(BoardSize::Large),
            other => Err(ConfigError::UnknownBoardSize(other.to_string())),
        }
    }
}

/// The outcome of a finished game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Win(Player),
    Draw,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    size: BoardSize,
    // cells are stored row by row from the top, only width * height are in use
    cells: [Cell; MAX_WIDTH * MAX_HEIGHT],
}

impl Board {
    /// Creates a board with the starting layout for `size`
    pub fn new(size: BoardSize) -> Self {
        let mut board = Self::empty(size);
        let (left, right, top) = size.home_squares();
        for row in 0..4 {
            let (near, far) = if row % 2 == 0 {
                (Player::White, Player::Black)
            } else {
                (Player::Black, Player::White)
            };
            board.set(Coord::new(left, top + row), Cell::Piece(near));
            board.set(Coord::new(right, top + row), Cell::Piece(far));
        }
        board
    }

    pub fn empty(size: BoardSize) -> Self {
        Self {
            size,
            cells: [Cell::Empty; MAX_WIDTH * MAX_HEIGHT],
        }
    }

    /// Builds a board from a diagram with one line per row
    ///
    /// `0` is a white piece, `1` a black piece and `.` or `_` an empty square.
    /// Whitespace and commas between squares are ignored.
    pub fn from_layout(size: BoardSize, layout: &str) -> Result<Self> {
        let mut board = Self::empty(size);
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != size.height() {
            return Err(anyhow!(
                "layout has {} rows, a {} board has {}",
                rows.len(),
                size,
                size.height()
            ));
        }

        for (y, row) in rows.iter().enumerate() {
            let squares: Vec<char> = row
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            if squares.len() != size.width() {
                return Err(anyhow!(
                    "row {} has {} squares, expected {}",
                    y + 1,
                    squares.len(),
                    size.width()
                ));
            }
            for (x, square) in squares.into_iter().enumerate() {
                let cell = match square {
                    '0' => Cell::Piece(Player::White),
                    '1' => Cell::Piece(Player::Black),
                    '.' | '_' => Cell::Empty,
                    other => return Err(anyhow!("could not parse '{}' as a square", other)),
                };
                board.set(Coord::new(x, y), cell);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width()
    }

    pub fn height(&self) -> usize {
        self.size.height()
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        self.size.in_bounds(x, y)
    }

    fn index(&self, at: Coord) -> usize {
        debug_assert!(self.in_bounds(at.x as isize, at.y as isize));
        at.x + self.width() * at.y
    }

    pub fn cell(&self, at: Coord) -> Cell {
        self.cells[self.index(at)]
    }

    /// The cell at signed coordinates, `None` when off the board
    pub fn get(&self, x: isize, y: isize) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cell(Coord::new(x as usize, y as usize)))
        } else {
            None
        }
    }

    pub fn set(&mut self, at: Coord, cell: Cell) {
        let idx = self.index(at);
        self.cells[idx] = cell;
    }

    /// Squares holding `player`'s pieces in row-major order
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Coord> + '_ {
        self.size
            .coords()
            .filter(move |&at| self.cell(at) == Cell::Piece(player))
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    /// Plays a move generated by the search, returning the new board
    ///
    /// The move must slide one of `mover`'s pieces into an empty neighbouring square.
    pub fn apply_move(&self, mv: Move, mover: Player) -> Board {
        debug_assert_eq!(self.cell(mv.from), Cell::Piece(mover));
        debug_assert!(self.cell(mv.to).is_empty());
        let mut next = *self;
        next.set(mv.to, Cell::Piece(mover));
        next.set(mv.from, Cell::Empty);
        next
    }

    /// Validates and plays a move from an untrusted source
    pub fn try_apply_move(&self, mv: Move, mover: Player) -> Result<Board, InvalidMove> {
        for square in [mv.from, mv.to].iter() {
            if !self.in_bounds(square.x as isize, square.y as isize) {
                return Err(InvalidMove::OffBoard {
                    x: square.x as isize,
                    y: square.y as isize,
                });
            }
        }
        if mv.direction().is_none() {
            return Err(InvalidMove::NotAdjacent);
        }
        match self.cell(mv.from) {
            Cell::Empty => {
                return Err(InvalidMove::EmptyOrigin {
                    x: mv.from.x,
                    y: mv.from.y,
                })
            }
            Cell::Piece(owner) if owner != mover => {
                return Err(InvalidMove::NotOwner {
                    x: mv.from.x,
                    y: mv.from.y,
                    owner,
                    mover,
                })
            }
            Cell::Piece(_) => {}
        }
        if !self.cell(mv.to).is_empty() {
            return Err(InvalidMove::Occupied {
                x: mv.to.x,
                y: mv.to.y,
            });
        }
        Ok(self.apply_move(mv, mover))
    }

    /// Checks for three of `player`'s pieces in a row along any line direction
    pub fn check_line_of_three(&self, player: Player) -> bool {
        let piece = Cell::Piece(player);
        self.size
            .segments::<3>()
            .any(|run| run.iter().all(|&at| self.cell(at) == piece))
    }

    /// The winner of the position if there is one
    ///
    /// Draws depend on the game history and are never reported here.
    pub fn terminal_status(&self) -> Option<Outcome> {
        if self.check_line_of_three(Player::White) {
            Some(Outcome::Win(Player::White))
        } else if self.check_line_of_three(Player::Black) {
            Some(Outcome::Win(Player::Black))
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            let row: Vec<&str> = (0..self.width())
                .map(|x| match self.cell(Coord::new(x, y)) {
                    Cell::Piece(Player::White) => "0",
                    Cell::Piece(Player::Black) => "1",
                    Cell::Empty => ".",
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
