//! Maze grid and generation module.
//!
//! This module contains the [`Grid`] type holding the labyrinth as a table of [`Cell`]s and the
//! [`generate`] function, which carves a random perfect maze into a fresh grid with a randomized
//! depth-first backtracker.

use std::fmt;

use color_eyre::eyre::{ensure, Result};
use log::{debug, info};
use rand::{seq::SliceRandom as _, Rng};

/// Smallest number of rows or columns a maze can be generated with.
///
/// Anything smaller leaves no room for the entrance and the exit to be told apart inside the
/// outer wall.
pub const MIN_DIMENSION: usize = 5;

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Open,
}

impl Cell {
    /// Returns the character used for the cell in the text form of a grid.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => ' ',
        }
    }
}

/// Coordinates of a cell inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row index, growing downwards.
    pub row: usize,
    /// Zero-based column index, growing to the right.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position one cell away in the given direction, or `None` if that would leave
    /// the non-negative quadrant. Whether the result lies inside a grid is up to the caller.
    #[must_use]
    pub const fn neighbour(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// Returns the position `distance` cells away in the given direction, or `None` if any
    /// coordinate would underflow or overflow.
    const fn offset(self, direction: Direction, distance: usize) -> Option<Self> {
        match direction {
            Direction::Up => match self.row.checked_sub(distance) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
            Direction::Down => match self.row.checked_add(distance) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
            Direction::Left => match self.col.checked_sub(distance) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
            Direction::Right => match self.col.checked_add(distance) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// The four axis-aligned directions a path can take through the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in no meaningful order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// Rectangular table of cells, indexed by row and then by column.
///
/// The dimensions are fixed on construction. The only way to obtain a maze is through
/// [`generate`]; a grid is never resized afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Cell storage as one vector per row, all rows of the same length.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// The entrance breach in the top wall.
    pub const ENTRANCE: Position = Position::new(0, 1);

    /// The cell carving starts from, right below the entrance breach.
    pub const START: Position = Position::new(1, 1);

    /// Creates a grid of the given dimensions with every cell set to [`Cell::Wall`].
    fn walled(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Wall; cols]; rows],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Returns the cell at `pos`, or `None` if the position lies outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
    }

    /// Returns `true` if `pos` is inside the grid and open.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Returns `true` if `pos` is on the outer ring of the grid.
    #[must_use]
    pub fn is_border(&self, pos: Position) -> bool {
        pos.row == 0
            || pos.col == 0
            || pos.row == self.rows().saturating_sub(1)
            || pos.col == self.cols().saturating_sub(1)
    }

    /// Returns the exit cell, one step inside the bottom-right corner.
    #[must_use]
    pub fn exit(&self) -> Position {
        Position::new(
            self.rows().saturating_sub(2),
            self.cols().saturating_sub(2),
        )
    }

    /// Returns `true` if touching `pos` counts as stepping into the entrance.
    #[must_use]
    pub const fn is_entrance_zone(pos: Position) -> bool {
        pos.col == Self::START.col && pos.row <= Self::START.row
    }

    /// Returns `true` if `pos` is the exit cell.
    #[must_use]
    pub fn is_exit(&self, pos: Position) -> bool {
        pos == self.exit()
    }

    /// Returns an iterator over the rows of the grid.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Returns an iterator over every open position, row by row.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, cell)| *cell == Cell::Open)
                .map(move |(col, _)| Position::new(row, col))
        })
    }

    /// Overwrites the cell at `pos` with [`Cell::Open`]. Positions outside the grid are ignored.
    fn open(&mut self, pos: Position) {
        if let Some(cell) = self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            *cell = Cell::Open;
        }
    }

    /// Returns `true` if `pos` lies strictly inside the outer wall.
    fn is_interior(&self, pos: Position) -> bool {
        pos.row > 0
            && pos.col > 0
            && pos.row < self.rows().saturating_sub(1)
            && pos.col < self.cols().saturating_sub(1)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.iter_rows().enumerate() {
            if idx > 0 {
                writeln!(formatter)?;
            }
            for cell in row {
                write!(formatter, "{}", cell.symbol())?;
            }
        }

        Ok(())
    }
}

/// Checks that a maze of the given dimensions can be generated.
///
/// # Errors
///
/// This function returns an error naming the offending dimension if either `rows` or `cols` is
/// smaller than [`MIN_DIMENSION`].
pub fn validate_dimensions(rows: usize, cols: usize) -> Result<()> {
    ensure!(
        rows >= MIN_DIMENSION,
        "maze needs at least {MIN_DIMENSION} rows, got {rows}"
    );
    ensure!(
        cols >= MIN_DIMENSION,
        "maze needs at least {MIN_DIMENSION} columns, got {cols}"
    );

    Ok(())
}

/// Generates a random maze of `rows × cols` cells.
///
/// The interior is carved with a randomized depth-first backtracker starting at
/// [`Grid::START`], which produces a spanning tree over every odd-coordinate cell. The entrance
/// and exit regions are then forced open so both ends are always walkable. The outer ring stays
/// walled apart from the entrance breach.
///
/// Both dimensions should preferably be odd so the carving lattice lines up with the outer wall,
/// but even dimensions work too.
///
/// # Errors
///
/// This function returns an error if either dimension is smaller than [`MIN_DIMENSION`]; no
/// grid is built in that case.
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Grid> {
    validate_dimensions(rows, cols)?;

    let mut grid = Grid::walled(rows, cols);
    let deepest = carve(&mut grid, rng);
    open_breaches(&mut grid);

    info!("generated {rows}x{cols} maze");
    debug!("frontier stack peaked at {deepest} cells");

    Ok(grid)
}

/// Carves passages into an all-wall grid and returns the largest size the frontier stack
/// reached.
fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let start = Grid::START;
    grid.open(start);

    let mut stack = vec![start];
    let mut deepest = stack.len();
    let mut candidates = Vec::with_capacity(Direction::ALL.len());

    while let Some(&current) = stack.last() {
        candidates.clear();
        candidates.extend(Direction::ALL.into_iter().filter_map(|direction| {
            let target = current.offset(direction, 2)?;
            (grid.is_interior(target) && grid.cell(target) == Some(Cell::Wall))
                .then_some((direction, target))
        }));

        if let Some(&(direction, target)) = candidates.choose(rng) {
            if let Some(between) = current.neighbour(direction) {
                grid.open(between);
            }
            grid.open(target);
            stack.push(target);
            deepest = deepest.max(stack.len());
        } else {
            let _ = stack.pop();
        }
    }

    deepest
}

/// Forces the entrance threshold and the exit corner open.
fn open_breaches(grid: &mut Grid) {
    let entrance = Grid::ENTRANCE;
    let start = Grid::START;
    let exit = grid.exit();

    for pos in [
        entrance,
        start,
        Position::new(start.row, start.col + 1),
        Position::new(start.row + 1, start.col),
        exit,
        Position::new(exit.row, exit.col.saturating_sub(1)),
        Position::new(exit.row.saturating_sub(1), exit.col),
    ] {
        grid.open(pos);
    }
}
