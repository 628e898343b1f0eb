use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }
}

/// The side to move. X is the maximizing player, O the minimizing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark().symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_diagonal(&self) -> bool {
        self.row == self.col
    }

    pub fn is_on_anti_diagonal(&self, size: usize) -> bool {
        self.row + self.col + 1 == size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(player: Player, start: Position, end: Position) -> Self {
        Self { player, start, end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => GameStatus::XWon,
            Player::O => GameStatus::OWon,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    Random,
    X,
    O,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    Random,
    Minimax,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for player in [Player::X, Player::O] {
            assert_ne!(player.opponent(), player);
            assert_eq!(player.opponent().opponent(), player);
        }
    }

    #[test]
    fn test_mark_player_roundtrip() {
        assert_eq!(Mark::from(Player::X).player(), Some(Player::X));
        assert_eq!(Mark::from(Player::O).player(), Some(Player::O));
        assert_eq!(Mark::Empty.player(), None);
    }

    #[test]
    fn test_diagonal_membership() {
        assert!(Position::new(1, 1).is_on_diagonal());
        assert!(Position::new(1, 1).is_on_anti_diagonal(3));
        assert!(Position::new(0, 3).is_on_anti_diagonal(4));
        assert!(!Position::new(0, 1).is_on_diagonal());
        assert!(!Position::new(0, 1).is_on_anti_diagonal(3));
    }
}
