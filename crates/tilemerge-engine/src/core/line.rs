//! Collapse-and-merge of a single line.
//!
//! A line is one row or column, oriented so that the move direction points at
//! index 0. Collapsing a line:
//!
//! 1. drops the empty cells, keeping the relative order of the tiles
//! 2. walks the tiles from the destination edge, merging each tile with its
//!    successor when both carry the same value and the doubled value fits in
//!    a `u32`
//! 3. places the results into consecutive slots starting at index 0
//!
//! A tile takes part in at most one merge per move, and the tile produced by a
//! merge is never merged again in the same move, so `2 2 2 _` collapses to
//! `4 2 _ _` and `2 2 2 2` to `4 4 _ _`.
//!
//! # Example
//!
//! ```
//! use tilemerge_engine::line;
//!
//! let (collapsed, gained) = line::collapse_values(&[2, 2, 2, 0]);
//! assert_eq!(collapsed.as_slice(), [4, 2, 0, 0]);
//! assert_eq!(gained, 4);
//! ```

use std::iter;

use arrayvec::ArrayVec;

use super::{COLS, MAX_LINE_LEN, ROWS, direction::Direction, grid::CellValues, merged_value};

/// Destination slot of a collapsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<T> {
    /// A tile moved (possibly zero cells) without merging.
    Single(T),
    /// Two equal tiles merged; the first is the one closer to the destination edge.
    Merged(T, T),
}

/// Collapses the non-empty items of a line, closest to the destination first.
///
/// Slot `i` of the result is the content of line index `i` after the move.
/// A `Merged` slot always has a [`merged_value`].
///
/// # Panics
///
/// Panics if `items` is longer than a line.
pub fn collapse<T, F>(items: &[T], value: F) -> ArrayVec<Slot<T>, MAX_LINE_LEN>
where
    T: Copy,
    F: Fn(&T) -> u32,
{
    assert!(items.len() <= MAX_LINE_LEN, "line too long: {}", items.len());

    let mut slots = ArrayVec::new();
    let mut i = 0;
    while i < items.len() {
        let current = items[i];
        match items.get(i + 1) {
            Some(next)
                if value(next) == value(&current) && merged_value(value(&current)).is_some() =>
            {
                slots.push(Slot::Merged(current, *next));
                i += 2;
            }
            _ => {
                slots.push(Slot::Single(current));
                i += 1;
            }
        }
    }
    slots
}

/// Collapses a line of raw values (`0` = empty).
///
/// Returns the collapsed line, padded with zeros to the input length, and the
/// sum of the merged values.
#[must_use]
pub fn collapse_values(line: &[u32]) -> (ArrayVec<u32, MAX_LINE_LEN>, u64) {
    let tiles: ArrayVec<u32, MAX_LINE_LEN> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut collapsed = ArrayVec::new();
    let mut gained = 0;
    for slot in collapse(&tiles, |&v| v) {
        match slot {
            Slot::Single(v) => collapsed.push(v),
            Slot::Merged(v, _) => {
                let merged = merged_value(v).unwrap_or(v);
                collapsed.push(merged);
                gained += u64::from(merged);
            }
        }
    }
    collapsed.extend(iter::repeat_n(0, line.len() - collapsed.len()));
    (collapsed, gained)
}

/// Applies a whole move to a value matrix without touching any board.
///
/// Returns the resulting values and the score the move would earn.
#[must_use]
pub fn slide_values(values: &CellValues, direction: Direction) -> (CellValues, u64) {
    let mut slid = [[0; COLS]; ROWS];
    let mut gained = 0;
    for line in 0..direction.line_count() {
        let current: ArrayVec<u32, MAX_LINE_LEN> = direction
            .line_cells(line)
            .map(|pos| values[pos.row][pos.col])
            .collect();
        let (collapsed, line_gained) = collapse_values(&current);
        gained += line_gained;
        for (pos, value) in iter::zip(direction.line_cells(line), collapsed) {
            slid[pos.row][pos.col] = value;
        }
    }
    (slid, gained)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapsed(line: [u32; 4]) -> [u32; 4] {
        let (values, _) = collapse_values(&line);
        values.into_inner().unwrap()
    }

    #[test]
    fn test_slide_without_merge() {
        assert_eq!(collapsed([0, 2, 0, 4]), [2, 4, 0, 0]);
        assert_eq!(collapsed([0, 0, 0, 8]), [8, 0, 0, 0]);
        assert_eq!(collapsed([2, 4, 8, 16]), [2, 4, 8, 16]);
    }

    #[test]
    fn test_simple_merge() {
        assert_eq!(collapse_values(&[2, 2, 0, 0]), (ArrayVec::from([4, 0, 0, 0]), 4));
        assert_eq!(collapsed([0, 4, 0, 4]), [8, 0, 0, 0]);
    }

    #[test]
    fn test_no_double_merge() {
        assert_eq!(collapsed([2, 2, 2, 0]), [4, 2, 0, 0]);
        assert_eq!(collapsed([4, 4, 8, 0]), [8, 8, 0, 0]);
    }

    #[test]
    fn test_four_equal_make_two_pairs() {
        assert_eq!(collapse_values(&[2, 2, 2, 2]), (ArrayVec::from([4, 4, 0, 0]), 8));
    }

    #[test]
    fn test_earlier_tiles_take_priority() {
        assert_eq!(collapsed([2, 4, 4, 4]), [2, 8, 4, 0]);
        assert_eq!(collapsed([8, 8, 4, 4]), [16, 8, 0, 0]);
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1 << 31;
        assert_eq!(
            collapse_values(&[top, top, 0, 0]),
            (ArrayVec::from([top, top, 0, 0]), 0)
        );
        assert_eq!(
            collapse_values(&[1 << 30, 1 << 30, 1 << 30, 1 << 30]),
            (ArrayVec::from([top, top, 0, 0]), 1 << 32)
        );
    }

    #[test]
    fn test_collapse_reports_merge_partners() {
        let slots = collapse(&[('a', 2), ('b', 2), ('c', 2)], |&(_, v)| v);
        assert_eq!(
            slots.as_slice(),
            [Slot::Merged(('a', 2), ('b', 2)), Slot::Single(('c', 2))]
        );
        assert!(collapse(&[] as &[u32], |&v| v).is_empty());
    }

    #[test]
    fn test_sum_is_conserved() {
        let lines = [[2, 2, 2, 2], [0, 4, 4, 8], [16, 0, 16, 32], [2, 4, 2, 4]];
        for line in lines {
            let before: u32 = line.iter().sum();
            let after: u32 = collapsed(line).iter().sum();
            assert_eq!(before, after, "{line:?}");
        }
    }

    #[test]
    fn test_slide_values_each_direction() {
        let values = [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2]];

        let (left, gained) = slide_values(&values, Direction::Left);
        assert_eq!(left, [[4, 0, 0, 0], [0; 4], [0; 4], [2, 0, 0, 0]]);
        assert_eq!(gained, 4);

        let (right, _) = slide_values(&values, Direction::Right);
        assert_eq!(right, [[0, 0, 0, 4], [0; 4], [0; 4], [0, 0, 0, 2]]);

        let (up, gained) = slide_values(&values, Direction::Up);
        assert_eq!(up, [[2, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(gained, 0);

        let (down, _) = slide_values(&values, Direction::Down);
        assert_eq!(down, [[0; 4], [0; 4], [0; 4], [2, 2, 0, 2]]);
    }

    #[test]
    fn test_slide_values_noop_on_packed_grid() {
        let values = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        for direction in Direction::ALL {
            let (slid, gained) = slide_values(&values, direction);
            assert_eq!(slid, values, "{direction}");
            assert_eq!(gained, 0);
        }
    }
}
