//! Board module - manages the game grid
//!
//! The board is a 20x30 grid where each cell is empty or holds the color of
//! the piece that locked there. Uses a flat array for better cache locality.
//! Coordinates: (x, y) where x ranges 0..19 (left to right), y ranges 0..29 (top to bottom).
//!
//! Piece-level operations ([`Board::stamp`], [`Board::clear_full_rows`]) are
//! copy-on-write: they return a new board and leave `self` untouched.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Color, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one compaction, top to bottom
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 20 columns x 30 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a single cell is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Whether `piece` fits at `pos`: every filled shape cell lands in bounds on an empty cell.
    ///
    /// Empty shape cells are never looked at, so a shape's blank corners may hang
    /// over the edge or over the stack.
    pub fn is_valid(&self, piece: &Piece, pos: Position) -> bool {
        piece
            .shape
            .cells()
            .all(|(dx, dy)| self.is_free(pos.x + dx, pos.y + dy))
    }

    /// New board with `piece` written at `pos` in its color.
    ///
    /// Cells that fall outside the board are skipped. `self` is not modified.
    pub fn stamp(&self, piece: &Piece, pos: Position) -> Board {
        let mut next = self.clone();
        next.paint(piece, pos, piece.color);
        next
    }

    /// Write `color` under every filled cell of `piece` at `pos`, in place.
    fn paint(&mut self, piece: &Piece, pos: Position, color: Color) {
        for (dx, dy) in piece.shape.cells() {
            self.set(pos.x + dx, pos.y + dy, Some(color));
        }
    }

    /// New board with every full row removed and the count removed.
    ///
    /// All full rows go at once; the remaining rows keep their order and empty
    /// rows are added at the top.
    pub fn clear_full_rows(&self) -> (Board, usize) {
        let mut next = self.clone();
        let cleared = next.compact_full_rows();
        (next, cleared.len())
    }

    /// In-place compaction behind [`Board::clear_full_rows`].
    ///
    /// Uses a two-pointer sweep from the bottom. Returns the removed row indices
    /// (as they were before the sweep), top to bottom.
    pub fn compact_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    // copy_within handles overlapping ranges
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Shape;

    const RED: Color = Color::new(220, 80, 80);
    const BLUE: Color = Color::new(80, 120, 220);

    fn piece(rows: &[&str]) -> Piece {
        Piece::new(Shape::from_pattern(rows), RED)
    }

    fn fill_row(board: &mut Board, y: i8, color: Color) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(19, 0), Some(19));
        assert_eq!(Board::index(0, 1), Some(20));
        assert_eq!(Board::index(19, 29), Some(599));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(20, 0), None);
        assert_eq!(Board::index(0, 30), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();
        board.set(0, 0, Some(RED));
        board.set(5, 10, Some(BLUE));

        assert_eq!(board.get(0, 0), Some(Some(RED)));
        assert_eq!(board.get(5, 10), Some(Some(BLUE)));
        assert_eq!(board.cells[0], Some(RED));
        assert_eq!(board.cells[10 * 20 + 5], Some(BLUE));
    }

    #[test]
    fn test_is_valid_ignores_blank_shape_cells() {
        let mut board = Board::new();
        // T's blank top-left corner sits on an occupied cell.
        board.set(3, 0, Some(BLUE));
        assert!(board.is_valid(&piece(&[".#.", "###"]), Position::new(3, 0)));
        // Blank corners may also hang off the left edge.
        assert!(board.is_valid(&piece(&[".#", ".#"]), Position::new(-1, 5)));
    }

    #[test]
    fn test_is_valid_bounds() {
        let board = Board::new();
        let bar = piece(&["####"]);
        assert!(board.is_valid(&bar, Position::new(0, 0)));
        assert!(board.is_valid(&bar, Position::new(16, 29)));
        assert!(!board.is_valid(&bar, Position::new(17, 0)));
        assert!(!board.is_valid(&bar, Position::new(-1, 0)));
        assert!(!board.is_valid(&bar, Position::new(0, -1)));
        assert!(!board.is_valid(&bar, Position::new(0, 30)));
    }

    #[test]
    fn test_stamp_is_copy_on_write() {
        let board = Board::new();
        let stamped = board.stamp(&piece(&["##", "##"]), Position::new(4, 28));

        assert_eq!(board.occupied_count(), 0);
        assert_eq!(stamped.occupied_count(), 4);
        assert_eq!(stamped.get(4, 28), Some(Some(RED)));
        assert_eq!(stamped.get(5, 29), Some(Some(RED)));
    }

    #[test]
    fn test_clear_full_rows_simultaneous() {
        let mut board = Board::new();
        fill_row(&mut board, 27, RED);
        fill_row(&mut board, 29, RED);
        board.set(2, 28, Some(BLUE));
        board.set(7, 26, Some(BLUE));

        let (cleared, lines) = board.clear_full_rows();
        assert_eq!(lines, 2);
        // Survivors keep their order and sink to the bottom.
        assert_eq!(cleared.get(2, 29), Some(Some(BLUE)));
        assert_eq!(cleared.get(7, 28), Some(Some(BLUE)));
        assert_eq!(cleared.occupied_count(), 2);
        // Original untouched.
        assert!(board.is_row_full(29));
    }

    #[test]
    fn test_compact_reports_rows_top_to_bottom() {
        let mut board = Board::new();
        fill_row(&mut board, 10, RED);
        fill_row(&mut board, 20, RED);
        let rows = board.compact_full_rows();
        assert_eq!(rows.as_slice(), &[10, 20]);
    }

    #[test]
    fn test_clear_whole_board() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut board, y, RED);
        }
        let (cleared, lines) = board.clear_full_rows();
        assert_eq!(lines, 30);
        assert_eq!(cleared, Board::new());
    }
}
