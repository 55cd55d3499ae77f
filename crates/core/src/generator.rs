//! Shape generator - compact connected shapes for arbitrary piece sizes
//!
//! Given a cell count, picks the tightest bounding box (area, then longest
//! edge, then height) and fills it in boustrophedon order: row 0 left to
//! right, row 1 right to left, and so on. Each row starts in the column where
//! the previous one ended, so the filled region is always 4-connected.
//!
//! The color walks the hue wheel from blue (240°) for tiny pieces to red (0°)
//! for a marathon-sized one, at 70% saturation and 55% lightness.

use crate::pieces::{Piece, Shape};
use crate::types::{Color, MAX_PIECE_CELLS, MAX_SHAPE_DIM, MIN_PIECE_CELLS};

const SATURATION: f64 = 0.70;
const LIGHTNESS: f64 = 0.55;

/// Generate the piece for `cells` (clamped to 1..=42). Never fails.
pub fn generate(cells: u32) -> Piece {
    let n = cells.clamp(MIN_PIECE_CELLS, MAX_PIECE_CELLS);
    Piece::new(snake_shape(n), color_for_size(n))
}

/// Bounding box `(width, height)` for `cells`.
///
/// Minimizes area, then the larger dimension, then the height.
pub fn pick_dims(cells: u32) -> (u8, u8) {
    (1..=MAX_SHAPE_DIM)
        .flat_map(|h| (1..=MAX_SHAPE_DIM).map(move |w| (w, h)))
        .filter(|&(w, h)| u32::from(w) * u32::from(h) >= cells)
        .min_by_key(|&(w, h)| (u32::from(w) * u32::from(h), w.max(h), h))
        .unwrap_or((MAX_SHAPE_DIM, MAX_SHAPE_DIM))
}

/// Snake-fill exactly `cells` cells of the [`pick_dims`] box.
pub fn snake_shape(cells: u32) -> Shape {
    let (w, h) = pick_dims(cells);
    let mut shape = Shape::blank(w, h);
    let mut remaining = cells;
    for y in 0..h {
        if remaining == 0 {
            break;
        }
        for i in 0..w {
            if remaining == 0 {
                break;
            }
            let x = if y % 2 == 0 { i } else { w - 1 - i };
            shape.fill(x, y);
            remaining -= 1;
        }
    }
    shape
}

/// Hue for size `n`: 240° at 0 down to 0° at 42 and beyond.
pub fn hue_for_size(n: u32) -> f64 {
    let t = (f64::from(n) / f64::from(MAX_PIECE_CELLS)).min(1.0);
    (240.0 - t * 240.0).floor()
}

pub fn color_for_size(n: u32) -> Color {
    hsl_to_rgb(hue_for_size(n), SATURATION, LIGHTNESS)
}

/// Standard HSL to RGB conversion. `hue` in degrees, `s` and `l` in 0..=1.
pub fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> Color {
    let h = hue / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| (hue_to_channel(p, q, t) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::new(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_four_connected(shape: &Shape) -> bool {
        let cells: Vec<(i8, i8)> = shape.cells().collect();
        let Some(&first) = cells.first() else {
            return false;
        };
        let mut seen = vec![first];
        let mut stack = vec![first];
        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = (x + dx, y + dy);
                if cells.contains(&next) && !seen.contains(&next) {
                    seen.push(next);
                    stack.push(next);
                }
            }
        }
        seen.len() == cells.len()
    }

    #[test]
    fn test_pick_dims_tie_breaks() {
        assert_eq!(pick_dims(1), (1, 1));
        assert_eq!(pick_dims(4), (2, 2));
        // Area 7 only as 7x1 or 1x7; equal longest edge, lower height wins.
        assert_eq!(pick_dims(7), (7, 1));
        // Area 8: 4x2 beats 8x1 on longest edge, and 2x4 on height.
        assert_eq!(pick_dims(8), (4, 2));
        assert_eq!(pick_dims(9), (3, 3));
        // 11 has no factor pair within 10x10: smallest area is 12 (4x3).
        assert_eq!(pick_dims(11), (4, 3));
        assert_eq!(pick_dims(41), (7, 6));
        assert_eq!(pick_dims(42), (7, 6));
    }

    #[test]
    fn test_snake_fill_order() {
        assert_eq!(snake_shape(7).to_pattern(), vec!["#######"]);
        // 13 cells in a 7x2 box: second row runs right to left and stops short.
        assert_eq!(snake_shape(13).to_pattern(), vec!["#######", ".######"]);
        // Third row of a 4x3 box resumes at the left edge.
        assert_eq!(snake_shape(11).to_pattern(), vec!["####", "####", "###."]);
    }

    #[test]
    fn test_generate_exact_count_bounded_and_connected() {
        for n in 1..=42 {
            let piece = generate(n);
            assert_eq!(piece.cell_count(), n);
            assert!(piece.shape.width() <= 10 && piece.shape.height() <= 10);
            assert!(is_four_connected(&piece.shape), "size {} not connected", n);
        }
    }

    #[test]
    fn test_generate_clamps_input() {
        assert_eq!(generate(0), generate(1));
        assert_eq!(generate(43), generate(42));
        assert_eq!(generate(u32::MAX).cell_count(), 42);
    }

    #[test]
    fn test_hue_range() {
        assert_eq!(hue_for_size(0), 240.0);
        assert_eq!(hue_for_size(1), 234.0);
        assert_eq!(hue_for_size(21), 120.0);
        assert_eq!(hue_for_size(42), 0.0);
        assert_eq!(hue_for_size(100), 0.0);
    }

    #[test]
    fn test_color_for_size_endpoints() {
        assert_eq!(color_for_size(42).to_string(), "#dd3c3c");
        assert_eq!(color_for_size(21).to_string(), "#3cdd3c");
        assert_eq!(color_for_size(0).to_string(), "#3c3cdd");
    }

    #[test]
    fn test_generated_colors_shift_towards_red() {
        let small = color_for_size(2);
        let large = color_for_size(40);
        assert!(small.b > small.r);
        assert!(large.r > large.b);
    }
}
