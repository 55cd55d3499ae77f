//! Game state module - the state machine that drives a game
//!
//! Ties together the board, the active piece, the sequencer and scoring. Every
//! operation is synchronous and runs to completion; rejected moves leave the
//! state untouched.
//!
//! Hard drop is the one split operation: it moves the piece to its landing
//! row and schedules the lock as a [`Deferred`] task so the landing position
//! can be shown once. The task runs on the next [`GameState::run_pending`],
//! and every other mutating call runs it first, so it always completes before
//! the next input is handled.

use crate::board::Board;
use crate::pieces::Piece;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::sequencer::{SizeRequest, Sequencer};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, Position, INITIAL_DROP_MS, SPAWN_POSITION};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No game started yet
    Idle,
    Active,
    Paused,
    /// Spawn collided; only `start` leaves this phase
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub piece: Piece,
    /// Board offset of the shape's top-left corner
    pub position: Position,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(piece: Piece) -> Self {
        Self {
            piece,
            position: SPAWN_POSITION,
        }
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            piece: self.piece,
            position: self.position.offset(dx, dy),
        }
    }

    /// Same position, shape turned clockwise
    pub fn rotated(&self) -> Self {
        Self {
            piece: self.piece.rotated(),
            position: self.position,
        }
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid(&self.piece, self.position)
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.piece
            .shape
            .cells()
            .map(move |(dx, dy)| Position::new(self.position.x + dx, self.position.y + dy))
    }
}

/// Work scheduled for the next scheduler turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    LockAndSpawn,
}

/// Outcome of one lock, kept until an observer takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
    /// The following spawn collided
    pub game_over: bool,
}

/// Complete game state
///
/// `T` is the token type carried by size requests and handed back alongside
/// each spawned piece.
#[derive(Debug, Clone)]
pub struct GameState<T = ()> {
    board: Board,
    active: Option<Tetromino>,
    /// Token of the request that produced `active`
    token: Option<T>,
    sequencer: Sequencer<T>,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Time accumulated towards the next gravity step
    drop_timer_ms: u32,
    pending: Option<Deferred>,
    /// Monotonic game counter (increments on every start)
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn)
    piece_id: u32,
    last_event: Option<LockEvent>,
}

impl<T: Clone> GameState<T> {
    /// Create an idle game fed by `sequencer`
    pub fn new(sequencer: Sequencer<T>) -> Self {
        Self {
            board: Board::new(),
            active: None,
            token: None,
            sequencer,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            drop_timer_ms: 0,
            pending: None,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
        }
    }

    /// Idle game in random mode
    pub fn random(seed: u32) -> Self {
        Self::new(Sequencer::new(seed))
    }

    /// Start a fresh game from any phase.
    ///
    /// The sequencer is not rewound; the next piece continues its cycle.
    pub fn start(&mut self) {
        self.run_pending();

        self.board = Board::new();
        self.active = None;
        self.token = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.drop_timer_ms = 0;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);

        log::info!(
            "game started: episode={} random={}",
            self.episode_id,
            self.sequencer.is_random()
        );
        self.spawn_piece();
    }

    /// Active and Paused swap; no-op otherwise. Returns whether the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.run_pending();
        let next = match self.phase {
            Phase::Active => Phase::Paused,
            Phase::Paused => Phase::Active,
            Phase::Idle | Phase::GameOver => return false,
        };
        self.phase = next;
        self.drop_timer_ms = 0;
        log::debug!("pause toggled: phase={}", next.as_str());
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.run_pending();
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.run_pending();
        self.try_move(1, 0)
    }

    /// One row down. Never locks; a blocked soft drop is just rejected.
    pub fn move_down(&mut self) -> bool {
        self.run_pending();
        self.try_move(0, 1)
    }

    /// Rotate clockwise in place. No kicks: a colliding rotation is rejected.
    pub fn rotate(&mut self) -> bool {
        self.run_pending();
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        if !rotated.is_valid(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        // A new piece value re-arms the gravity timer.
        self.drop_timer_ms = 0;
        true
    }

    /// Drop to the lowest valid row and schedule the lock.
    ///
    /// Returns true when a lock was scheduled.
    pub fn hard_drop(&mut self) -> bool {
        self.run_pending();
        if self.phase != Phase::Active {
            return false;
        }
        let Some(mut active) = self.active else {
            return false;
        };

        loop {
            let next = active.shifted(0, 1);
            if !next.is_valid(&self.board) {
                break;
            }
            active = next;
        }
        self.active = Some(active);
        self.pending = Some(Deferred::LockAndSpawn);
        true
    }

    /// Run the scheduled task, if any. Returns whether one ran.
    pub fn run_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(Deferred::LockAndSpawn) => {
                self.lock_and_spawn();
                true
            }
            None => false,
        }
    }

    pub fn lock_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// One gravity step: move down if possible, lock otherwise.
    ///
    /// Returns whether the state changed.
    pub fn tick(&mut self) -> bool {
        // A flushed lock replaces the piece and re-arms the timer.
        if self.run_pending() {
            return true;
        }
        if self.phase != Phase::Active || self.active.is_none() {
            return false;
        }

        if !self.try_move(0, 1) {
            self.lock_and_spawn();
        }
        true
    }

    /// Feed real time into the drop clock; ticks each time the interval elapses.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.run_pending() {
            return true;
        }
        if self.phase != Phase::Active {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let mut changed = false;
        while self.phase == Phase::Active && self.drop_timer_ms >= self.drop_interval_ms {
            self.drop_timer_ms -= self.drop_interval_ms;
            changed |= self.tick();
        }
        changed
    }

    /// Dispatch a discrete input command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => {
                self.start();
                true
            }
        }
    }

    /// Replace the size requests. The active piece is kept; the next spawn
    /// uses the first new request.
    pub fn set_size_requests(&mut self, requests: Vec<SizeRequest<T>>) {
        self.sequencer.replace(requests);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot<T> {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active.map(ActiveSnapshot::from),
            piece_size: self.piece_size(),
            token: self.token.clone(),
            phase: self.phase,
            paused: self.phase == Phase::Paused,
            game_over: self.phase == Phase::GameOver,
            lock_pending: self.pending.is_some(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            drop_interval_ms: self.drop_interval_ms,
            episode_id: self.episode_id,
            piece_id: self.piece_id,
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if !moved.is_valid(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn lock_and_spawn(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.token = None;

        let stamped = self.board.stamp(&active.piece, active.position);
        let (board, cleared) = stamped.clear_full_rows();
        self.board = board;

        let points = line_clear_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        let new_level = level_for_lines(self.lines);
        let level_up = new_level > self.level;
        if level_up {
            self.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
            log::info!(
                "level up: level={} drop_interval_ms={}",
                self.level,
                self.drop_interval_ms
            );
        }
        if cleared > 0 {
            log::info!(
                "lines cleared: count={} points={} total_lines={} score={}",
                cleared,
                points,
                self.lines,
                self.score
            );
        }

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
            level_up,
            game_over: !spawned,
        });
    }

    /// Draw the next piece and place it at spawn. Collision ends the game.
    fn spawn_piece(&mut self) -> bool {
        let drawn = self.sequencer.draw();
        let piece = Tetromino::new(drawn.piece);

        if !piece.is_valid(&self.board) {
            self.active = None;
            self.token = None;
            self.phase = Phase::GameOver;
            log::debug!("spawn blocked: size={}", piece.piece.cell_count());
            log::info!(
                "game over: episode={} score={} lines={} level={}",
                self.episode_id,
                self.score,
                self.lines,
                self.level
            );
            return false;
        }

        self.active = Some(piece);
        self.token = drawn.token;
        self.phase = Phase::Active;
        self.piece_id = self.piece_id.wrapping_add(1);
        self.drop_timer_ms = 0;
        log::debug!(
            "spawned piece: id={} size={} color={}",
            self.piece_id,
            piece.piece.cell_count(),
            piece.piece.color
        );
        true
    }

    /// Structural invariants; the message names the first one broken.
    pub fn check_invariants(&self) -> Result<(), String> {
        match (self.phase, self.active) {
            (Phase::Idle | Phase::GameOver, Some(_)) => {
                return Err(format!("{} phase with an active piece", self.phase.as_str()));
            }
            (Phase::Active | Phase::Paused, None) => {
                return Err(format!("{} phase without an active piece", self.phase.as_str()));
            }
            _ => {}
        }
        if let Some(active) = self.active {
            if !active.is_valid(&self.board) {
                return Err(format!(
                    "active piece at ({}, {}) overlaps or leaves the board",
                    active.position.x, active.position.y
                ));
            }
        } else if self.token.is_some() {
            return Err("token without an active piece".to_string());
        }
        if self.pending.is_some() && self.phase != Phase::Active {
            return Err("lock pending outside the active phase".to_string());
        }
        if self.level != level_for_lines(self.lines) {
            return Err(format!("level {} does not match {} lines", self.level, self.lines));
        }
        if self.drop_interval_ms != drop_interval_ms(self.level) {
            return Err(format!(
                "drop interval {}ms does not match level {}",
                self.drop_interval_ms, self.level
            ));
        }
        Ok(())
    }
}

impl<T> GameState<T> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Token of the request behind the active piece
    pub fn token(&self) -> Option<&T> {
        self.token.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    #[cfg(test)]
    fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Filled cells of the active piece
    pub fn piece_size(&self) -> Option<u32> {
        self.active.map(|a| a.piece.cell_count())
    }
}

impl Default for GameState<()> {
    fn default() -> Self {
        Self::random(1)
    }
}
