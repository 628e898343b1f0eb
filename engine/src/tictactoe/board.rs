use std::ops::{Deref, DerefMut};

use super::types::{Mark, Player, Position};

/// One of the `2N + 2` lines of an N×N board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

impl Line {
    /// Rows and columns interleaved, then both diagonals.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .flat_map(|i| [Line::Row(i), Line::Column(i)])
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    pub fn count(size: usize) -> usize {
        2 * size + 2
    }

    /// Lines passing through `pos`: its row and column, plus any diagonal it sits on.
    pub fn through(pos: Position, size: usize) -> Vec<Line> {
        let mut lines = vec![Line::Row(pos.row), Line::Column(pos.col)];
        if pos.is_on_diagonal() {
            lines.push(Line::Diagonal);
        }
        if pos.is_on_anti_diagonal(size) {
            lines.push(Line::AntiDiagonal);
        }
        lines
    }

    pub fn cells(self, size: usize) -> impl Iterator<Item = Position> {
        (0..size).map(move |i| match self {
            Line::Row(row) => Position::new(row, i),
            Line::Column(col) => Position::new(i, col),
            Line::Diagonal => Position::new(i, i),
            Line::AntiDiagonal => Position::new(i, size - 1 - i),
        })
    }

    pub fn end_points(self, size: usize) -> (Position, Position) {
        let last = size - 1;
        match self {
            Line::Row(row) => (Position::new(row, 0), Position::new(row, last)),
            Line::Column(col) => (Position::new(0, col), Position::new(last, col)),
            Line::Diagonal => (Position::new(0, 0), Position::new(last, last)),
            Line::AntiDiagonal => (Position::new(0, last), Position::new(last, 0)),
        }
    }
}

const EMPTY_BIT: u8 = 0b001;
const X_BIT: u8 = 0b010;
const O_BIT: u8 = 0b100;

/// The set of distinct cell values found along a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSet(u8);

impl LineSet {
    fn bit(mark: Mark) -> u8 {
        match mark {
            Mark::Empty => EMPTY_BIT,
            Mark::X => X_BIT,
            Mark::O => O_BIT,
        }
    }

    pub fn insert(&mut self, mark: Mark) {
        self.0 |= Self::bit(mark);
    }

    pub fn contains(&self, mark: Mark) -> bool {
        self.0 & Self::bit(mark) != 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Exactly one member and it is a player's mark: the line is complete.
    pub fn sole_player(&self) -> Option<Player> {
        match self.0 {
            X_BIT => Some(Player::X),
            O_BIT => Some(Player::O),
            _ => None,
        }
    }

    /// Exactly one player's mark plus empty cells: the line can still be completed.
    pub fn live_player(&self) -> Option<Player> {
        match self.0 {
            bits if bits == X_BIT | EMPTY_BIT => Some(Player::X),
            bits if bits == O_BIT | EMPTY_BIT => Some(Player::O),
            _ => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.contains(Mark::X) && self.contains(Mark::O)
    }
}

impl FromIterator<Mark> for LineSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut set = LineSet::default();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Mark>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Mark::Empty; size * size],
        }
    }

    /// Parses one string per row: `X`, `O`, and `.`/`-`/`_` for empty cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self, String> {
        let size = rows.len();
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if marks.len() != size {
                return Err(format!(
                    "Row {} has {} cells, expected {}",
                    row,
                    marks.len(),
                    size
                ));
            }
            for (col, symbol) in marks.into_iter().enumerate() {
                let mark = match symbol {
                    'X' | 'x' => Mark::X,
                    'O' | 'o' => Mark::O,
                    '.' | '-' | '_' => Mark::Empty,
                    other => return Err(format!("Unknown cell symbol '{}'", other)),
                };
                board.cells[row * size + col] = mark;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    /// Writes a mark; out-of-range positions are ignored and reported as `false`.
    pub fn set(&mut self, pos: Position, mark: Mark) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = mark;
                true
            }
            None => false,
        }
    }

    /// Places `mark` for the lifetime of the returned guard; the previous value comes
    /// back when the guard drops.
    pub fn place(&mut self, pos: Position, mark: Mark) -> MarkGuard<'_> {
        let previous = self.get(pos).unwrap_or(Mark::Empty);
        self.set(pos, mark);
        MarkGuard {
            board: self,
            pos,
            previous,
        }
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.contains(&Mark::Empty)
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|&&mark| mark != Mark::Empty).count()
    }

    /// Empty cells in row-major order.
    pub fn available_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &mark)| mark == Mark::Empty)
            .map(|(idx, _)| Position::new(idx / self.size, idx % self.size))
            .collect()
    }

    pub fn line_set(&self, line: Line) -> LineSet {
        line.cells(self.size)
            .map(|pos| self.cells[pos.row * self.size + pos.col])
            .collect()
    }

    pub fn line_sets(&self) -> impl Iterator<Item = LineSet> + '_ {
        Line::all(self.size).map(|line| self.line_set(line))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("   ");
        for col in 0..self.size {
            out.push_str(&format!(" {}", col));
        }
        out.push('\n');
        for row in 0..self.size {
            out.push_str(&format!("{:>2} ", row));
            for col in 0..self.size {
                out.push(' ');
                out.push(self.cells[row * self.size + col].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn rotated(&self) -> Board {
        let mut rotated = Board::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                rotated.cells[col * self.size + (self.size - 1 - row)] =
                    self.cells[row * self.size + col];
            }
        }
        rotated
    }

    #[cfg(test)]
    pub(crate) fn mirrored(&self) -> Board {
        let mut mirrored = Board::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                mirrored.cells[row * self.size + (self.size - 1 - col)] =
                    self.cells[row * self.size + col];
            }
        }
        mirrored
    }
}

/// Scope guard returned by [`Board::place`].
pub struct MarkGuard<'a> {
    board: &'a mut Board,
    pos: Position,
    previous: Mark,
}

impl Deref for MarkGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MarkGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MarkGuard<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, self.previous);
    }
}
