use crate::board::Board;
use crate::game_state::{Phase, Tetromino};
use crate::pieces::Piece;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub position: Position,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            piece: value.piece,
            position: value.position,
        }
    }
}

/// Read-only view of a game, taken after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot<T> {
    pub board: Board,
    pub active: Option<ActiveSnapshot>,
    /// Filled cells of the active piece
    pub piece_size: Option<u32>,
    /// Token of the request that produced the active piece
    pub token: Option<T>,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub lock_pending: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl<T> GameSnapshot<T> {
    /// Board with the active piece drawn in its color
    pub fn overlay(&self) -> Board {
        match self.active {
            Some(active) => self.board.stamp(&active.piece, active.position),
            None => self.board.clone(),
        }
    }
}

impl<T> Default for GameSnapshot<T> {
    fn default() -> Self {
        Self {
            board: Board::new(),
            active: None,
            piece_size: None,
            token: None,
            phase: Phase::Idle,
            paused: false,
            game_over: false,
            lock_pending: false,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: crate::types::INITIAL_DROP_MS,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
