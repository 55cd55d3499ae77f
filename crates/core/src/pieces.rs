//! Pieces module - piece shapes, clockwise rotation and the piece catalog
//!
//! A [`Shape`] is a rectangular boolean matrix of at most 10x10 cells stored as
//! one bitmask per row. Rotation always produces a new value.
//!
//! The catalog holds hand-authored classic shapes for sizes 2..=10 and one
//! generated key for every size in 1..=42. [`random`] picks uniformly among
//! all keys, so a classic shape is exactly as likely as any generated filler.

use crate::generator;
use crate::rng::SimpleRng;
use crate::types::{Color, MAX_PIECE_CELLS, MAX_SHAPE_DIM, MIN_PIECE_CELLS};

const DIM: usize = MAX_SHAPE_DIM as usize;

/// Rectangular piece shape. Bit `x` of `rows[y]` is set when cell (x, y) is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u16; DIM],
}

impl Shape {
    /// An all-empty `width` x `height` matrix (both clamped to 1..=10).
    pub(crate) fn blank(width: u8, height: u8) -> Self {
        Self {
            width: width.clamp(1, MAX_SHAPE_DIM),
            height: height.clamp(1, MAX_SHAPE_DIM),
            rows: [0; DIM],
        }
    }

    /// Build a shape from text rows where `#` marks a filled cell.
    ///
    /// The width is the longest row; rows and columns past 10 are dropped.
    ///
    /// ```
    /// use run_tetris_core::Shape;
    ///
    /// let t = Shape::from_pattern(&[".#.", "###"]);
    /// assert_eq!((t.width(), t.height()), (3, 2));
    /// assert_eq!(t.cell_count(), 4);
    /// assert!(t.get(1, 0) && !t.get(0, 0));
    /// ```
    pub fn from_pattern(rows: &[&str]) -> Self {
        let height = rows.len().min(DIM) as u8;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0).min(DIM) as u8;
        let mut shape = Self::blank(width, height);
        for (y, row) in rows.iter().take(DIM).enumerate() {
            for (x, ch) in row.chars().take(DIM).enumerate() {
                if ch == '#' {
                    shape.fill(x as u8, y as u8);
                }
            }
        }
        shape
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether cell (x, y) is filled. Out-of-range cells are empty.
    #[inline(always)]
    pub fn get(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.rows[y as usize] & (1 << x) != 0
    }

    pub(crate) fn fill(&mut self, x: u8, y: u8) {
        if x < self.width && y < self.height {
            self.rows[y as usize] |= 1 << x;
        }
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> u32 {
        self.rows[..self.height as usize]
            .iter()
            .map(|r| r.count_ones())
            .sum()
    }

    /// Offsets `(dx, dy)` of every filled cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let shape = *self;
        (0..shape.height).flat_map(move |y| {
            (0..shape.width)
                .filter(move |&x| shape.get(x, y))
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    ///
    /// A `w x h` shape becomes `h x w`; cell (x, y) of the result is cell
    /// (y, h - 1 - x) of the input.
    pub fn rotate_cw(&self) -> Shape {
        let mut out = Shape::blank(self.height, self.width);
        for y in 0..out.height {
            for x in 0..out.width {
                if self.get(y, self.height - 1 - x) {
                    out.fill(x, y);
                }
            }
        }
        out
    }

    /// Text rendering, one string per row (`#` filled, `.` empty).
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.get(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// A piece: a shape plus the color its cells get when locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Same piece turned 90° clockwise
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotate_cw(),
            color: self.color,
        }
    }

    pub fn cell_count(&self) -> u32 {
        self.shape.cell_count()
    }
}

/// Hand-authored shapes, chosen for being recognizable at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassicKind {
    Domino,
    TrominoI,
    TrominoL,
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    PentaP,
    PentaU,
    PentaX,
    HexaSlab,
    HeptaArch,
    OctaRing,
    NonaBlock,
    DecaTower,
}

impl ClassicKind {
    pub const ALL: [ClassicKind; 18] = [
        ClassicKind::Domino,
        ClassicKind::TrominoI,
        ClassicKind::TrominoL,
        ClassicKind::I,
        ClassicKind::O,
        ClassicKind::T,
        ClassicKind::S,
        ClassicKind::Z,
        ClassicKind::J,
        ClassicKind::L,
        ClassicKind::PentaP,
        ClassicKind::PentaU,
        ClassicKind::PentaX,
        ClassicKind::HexaSlab,
        ClassicKind::HeptaArch,
        ClassicKind::OctaRing,
        ClassicKind::NonaBlock,
        ClassicKind::DecaTower,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClassicKind::Domino => "domino",
            ClassicKind::TrominoI => "tromino-i",
            ClassicKind::TrominoL => "tromino-l",
            ClassicKind::I => "i",
            ClassicKind::O => "o",
            ClassicKind::T => "t",
            ClassicKind::S => "s",
            ClassicKind::Z => "z",
            ClassicKind::J => "j",
            ClassicKind::L => "l",
            ClassicKind::PentaP => "penta-p",
            ClassicKind::PentaU => "penta-u",
            ClassicKind::PentaX => "penta-x",
            ClassicKind::HexaSlab => "hexa-slab",
            ClassicKind::HeptaArch => "hepta-arch",
            ClassicKind::OctaRing => "octa-ring",
            ClassicKind::NonaBlock => "nona-block",
            ClassicKind::DecaTower => "deca-tower",
        }
    }

    /// Spawn orientation, `#` = filled
    pub fn pattern(&self) -> &'static [&'static str] {
        match self {
            ClassicKind::Domino => &["##"],
            ClassicKind::TrominoI => &["###"],
            ClassicKind::TrominoL => &["#.", "##"],
            ClassicKind::I => &["####"],
            ClassicKind::O => &["##", "##"],
            ClassicKind::T => &[".#.", "###"],
            ClassicKind::S => &[".##", "##."],
            ClassicKind::Z => &["##.", ".##"],
            ClassicKind::J => &["#..", "###"],
            ClassicKind::L => &["..#", "###"],
            ClassicKind::PentaP => &["##", "##", "#."],
            ClassicKind::PentaU => &["#.#", "###"],
            ClassicKind::PentaX => &[".#.", "###", ".#."],
            ClassicKind::HexaSlab => &["###", "###"],
            ClassicKind::HeptaArch => &["###", "#.#", "#.#"],
            ClassicKind::OctaRing => &["###", "#.#", "###"],
            ClassicKind::NonaBlock => &["###", "###", "###"],
            ClassicKind::DecaTower => &["##", "##", "##", "##", "##"],
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ClassicKind::Domino => Color::new(170, 170, 190),
            ClassicKind::TrominoI => Color::new(120, 200, 240),
            ClassicKind::TrominoL => Color::new(240, 140, 180),
            ClassicKind::I => Color::new(80, 220, 220),
            ClassicKind::O => Color::new(240, 220, 80),
            ClassicKind::T => Color::new(200, 120, 220),
            ClassicKind::S => Color::new(100, 220, 120),
            ClassicKind::Z => Color::new(220, 80, 80),
            ClassicKind::J => Color::new(80, 120, 220),
            ClassicKind::L => Color::new(255, 165, 0),
            ClassicKind::PentaP => Color::new(150, 110, 240),
            ClassicKind::PentaU => Color::new(60, 190, 170),
            ClassicKind::PentaX => Color::new(250, 250, 250),
            ClassicKind::HexaSlab => Color::new(210, 180, 140),
            ClassicKind::HeptaArch => Color::new(240, 120, 60),
            ClassicKind::OctaRing => Color::new(120, 160, 90),
            ClassicKind::NonaBlock => Color::new(160, 90, 60),
            ClassicKind::DecaTower => Color::new(110, 110, 230),
        }
    }

    pub fn piece(&self) -> Piece {
        Piece::new(Shape::from_pattern(self.pattern()), self.color())
    }

    /// The hand-authored shape used when a size is requested explicitly.
    pub fn for_size(cells: u32) -> Option<ClassicKind> {
        match cells {
            2 => Some(ClassicKind::Domino),
            3 => Some(ClassicKind::TrominoL),
            4 => Some(ClassicKind::T),
            5 => Some(ClassicKind::PentaP),
            6 => Some(ClassicKind::HexaSlab),
            7 => Some(ClassicKind::HeptaArch),
            8 => Some(ClassicKind::OctaRing),
            9 => Some(ClassicKind::NonaBlock),
            10 => Some(ClassicKind::DecaTower),
            _ => None,
        }
    }
}

/// One selectable entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKey {
    Classic(ClassicKind),
    /// Snake-filled shape of the given size
    Generated(u8),
}

impl PieceKey {
    pub fn piece(&self) -> Piece {
        match self {
            PieceKey::Classic(kind) => kind.piece(),
            PieceKey::Generated(cells) => generator::generate(u32::from(*cells)),
        }
    }
}

/// Number of selectable catalog keys
pub const CATALOG_LEN: usize = ClassicKind::ALL.len() + MAX_PIECE_CELLS as usize;

/// Catalog key at `index`: classic entries first, then generated sizes 1..=42.
pub fn catalog_key(index: usize) -> Option<PieceKey> {
    let classic = ClassicKind::ALL.len();
    if index < classic {
        Some(PieceKey::Classic(ClassicKind::ALL[index]))
    } else if index < CATALOG_LEN {
        Some(PieceKey::Generated((index - classic) as u8 + 1))
    } else {
        None
    }
}

/// All catalog keys in index order
pub fn catalog_keys() -> impl Iterator<Item = PieceKey> {
    (0..CATALOG_LEN).filter_map(catalog_key)
}

/// Piece for an explicit size request.
///
/// The request is clamped to 1..=42; sizes with a hand-authored shape use it,
/// everything else comes from the shape generator.
pub fn by_size(cells: u32) -> Piece {
    let n = cells.clamp(MIN_PIECE_CELLS, MAX_PIECE_CELLS);
    match ClassicKind::for_size(n) {
        Some(kind) => kind.piece(),
        None => generator::generate(n),
    }
}

/// Uniformly chosen catalog key
pub fn random_key(rng: &mut SimpleRng) -> PieceKey {
    let index = rng.next_range(CATALOG_LEN as u32) as usize;
    catalog_key(index).unwrap_or(PieceKey::Classic(ClassicKind::T))
}

/// Uniformly chosen catalog piece
pub fn random(rng: &mut SimpleRng) -> Piece {
    random_key(rng).piece()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_shapes_are_non_empty_and_sized() {
        for kind in ClassicKind::ALL {
            let piece = kind.piece();
            assert!(piece.cell_count() >= 2, "{} is too small", kind.name());
            assert!(piece.shape.width() <= MAX_SHAPE_DIM);
            assert!(piece.shape.height() <= MAX_SHAPE_DIM);
        }
    }

    #[test]
    fn test_for_size_matches_cell_count() {
        for n in 2..=10 {
            let kind = ClassicKind::for_size(n).unwrap();
            assert_eq!(kind.piece().cell_count(), n, "{}", kind.name());
        }
        assert_eq!(ClassicKind::for_size(1), None);
        assert_eq!(ClassicKind::for_size(11), None);
    }

    #[test]
    fn test_seven_tetrominoes_have_four_cells() {
        for kind in [
            ClassicKind::I,
            ClassicKind::O,
            ClassicKind::T,
            ClassicKind::S,
            ClassicKind::Z,
            ClassicKind::J,
            ClassicKind::L,
        ] {
            assert_eq!(kind.piece().cell_count(), 4);
        }
    }

    #[test]
    fn test_rotate_cw_t_piece() {
        let t = Shape::from_pattern(&[".#.", "###"]);
        let r = t.rotate_cw();
        assert_eq!(r.to_pattern(), vec!["#.", "##", "#."]);
        assert_eq!(r.rotate_cw().to_pattern(), vec!["###", ".#."]);
    }

    #[test]
    fn test_rotate_cw_bar_swaps_dimensions() {
        let bar = Shape::from_pattern(&["####"]);
        let r = bar.rotate_cw();
        assert_eq!((r.width(), r.height()), (1, 4));
        assert_eq!(r.cell_count(), 4);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        for key in catalog_keys() {
            let piece = key.piece();
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back, piece, "{:?}", key);
        }
    }

    #[test]
    fn test_cells_iterates_filled_offsets() {
        let l = Shape::from_pattern(&["#.", "##"]);
        let cells: Vec<_> = l.cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_from_pattern_clips_to_ten() {
        let wide = Shape::from_pattern(&["############"]);
        assert_eq!(wide.width(), 10);
        assert_eq!(wide.cell_count(), 10);
    }

    #[test]
    fn test_catalog_covers_classics_and_every_size() {
        let keys: Vec<_> = catalog_keys().collect();
        assert_eq!(keys.len(), CATALOG_LEN);
        assert_eq!(keys.len(), 18 + 42);
        for n in 1..=42u8 {
            assert!(keys.contains(&PieceKey::Generated(n)));
        }
        assert_eq!(catalog_key(CATALOG_LEN), None);
    }

    #[test]
    fn test_by_size_clamps() {
        assert_eq!(by_size(0).cell_count(), 1);
        assert_eq!(by_size(1).cell_count(), 1);
        assert_eq!(by_size(4), ClassicKind::T.piece());
        assert_eq!(by_size(17).cell_count(), 17);
        assert_eq!(by_size(500).cell_count(), 42);
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..50 {
            assert_eq!(random(&mut a), random(&mut b));
        }
    }

    #[test]
    fn test_random_reaches_every_key() {
        let mut rng = SimpleRng::new(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20_000 {
            seen.insert(random_key(&mut rng));
        }
        assert_eq!(seen.len(), CATALOG_LEN);
    }
}
