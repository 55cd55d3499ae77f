//! Piece tests - catalog, generator and rotation properties

use proptest::prelude::*;

use run_tetris::core::generator::{color_for_size, generate, pick_dims};
use run_tetris::core::pieces::{self, by_size, catalog_keys, CATALOG_LEN};
use run_tetris::core::{ClassicKind, PieceKey, Shape, SimpleRng};

fn is_four_connected(shape: &Shape) -> bool {
    let cells: Vec<(i8, i8)> = shape.cells().collect();
    let mut seen = vec![cells[0]];
    let mut frontier = vec![cells[0]];
    while let Some((x, y)) = frontier.pop() {
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if cells.contains(&next) && !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    seen.len() == cells.len()
}

#[test]
fn test_classic_tetrominoes() {
    assert_eq!(ClassicKind::I.piece().shape.to_pattern(), vec!["####"]);
    assert_eq!(ClassicKind::O.piece().shape.to_pattern(), vec!["##", "##"]);
    assert_eq!(ClassicKind::S.piece().shape.to_pattern(), vec![".##", "##."]);
}

#[test]
fn test_by_size_prefers_classic_shapes() {
    assert_eq!(by_size(2), ClassicKind::Domino.piece());
    assert_eq!(by_size(5), ClassicKind::PentaP.piece());
    assert_eq!(by_size(10), ClassicKind::DecaTower.piece());
    // No hand-authored single or 11-cell piece.
    assert_eq!(by_size(1), generate(1));
    assert_eq!(by_size(11), generate(11));
}

#[test]
fn test_generated_color_depends_only_on_size() {
    assert_eq!(generate(30).color, color_for_size(30));
    assert_ne!(generate(3).color, generate(40).color);
}

#[test]
fn test_random_pieces_are_all_catalog_entries() {
    let all: Vec<_> = catalog_keys().map(|k: PieceKey| k.piece()).collect();
    assert_eq!(all.len(), CATALOG_LEN);

    let mut rng = SimpleRng::new(2024);
    for _ in 0..500 {
        let piece = pieces::random(&mut rng);
        assert!(all.contains(&piece));
    }
}

proptest! {
    #[test]
    fn prop_generate_exact_connected_and_bounded(cells in 1u32..=42) {
        let piece = generate(cells);
        prop_assert_eq!(piece.cell_count(), cells);
        prop_assert!(piece.shape.width() <= 10);
        prop_assert!(piece.shape.height() <= 10);
        prop_assert!(is_four_connected(&piece.shape));

        let (w, h) = pick_dims(cells);
        prop_assert_eq!((piece.shape.width(), piece.shape.height()), (w, h));
        prop_assert!(u32::from(w) * u32::from(h) >= cells);
    }

    #[test]
    fn prop_generate_clamps(cells in any::<u32>()) {
        let piece = generate(cells);
        prop_assert_eq!(piece.cell_count(), cells.clamp(1, 42));
    }

    #[test]
    fn prop_four_rotations_are_identity(cells in 1u32..=42) {
        let piece = by_size(cells);
        let turned = piece.rotated().rotated().rotated().rotated();
        prop_assert_eq!(turned, piece);
    }

    #[test]
    fn prop_rotation_preserves_cells_and_swaps_dims(cells in 1u32..=42) {
        let shape = by_size(cells).shape;
        let r = shape.rotate_cw();
        prop_assert_eq!(r.cell_count(), shape.cell_count());
        prop_assert_eq!((r.width(), r.height()), (shape.height(), shape.width()));
    }
}
