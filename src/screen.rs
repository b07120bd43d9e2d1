/// Maps a click at pixel `(x, y)` in a square window of `window_size` pixels showing `rows` rows
/// to the `(row, col)` of the cell under it. [None] if the click lies outside the grid or the
/// window is too small to show every row.
pub fn clicked_cell(pixel: (u32, u32), rows: usize, window_size: u32) -> Option<(usize, usize)> {
    let (x, y) = pixel;
    let gap = window_size.checked_div(u32::try_from(rows).ok()?)?;
    if gap == 0 {
        return None;
    }
    let row = (y / gap) as usize;
    let col = (x / gap) as usize;
    (row < rows && col < rows).then_some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_pixels_to_cells() {
        // 28 rows in a 504 pixel window, 18 pixels per cell
        assert_eq!(clicked_cell((0, 0), 28, 504), Some((0, 0)));
        assert_eq!(clicked_cell((17, 18), 28, 504), Some((1, 0)));
        assert_eq!(clicked_cell((40, 5), 28, 504), Some((0, 2)));
        assert_eq!(clicked_cell((503, 503), 28, 504), Some((27, 27)));
    }

    #[test]
    fn rejects_outside_and_degenerate() {
        assert_eq!(clicked_cell((504, 0), 28, 504), None);
        assert_eq!(clicked_cell((0, 0), 0, 504), None);
        assert_eq!(clicked_cell((0, 0), 10, 5), None);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn rejects_row_count_beyond_u32() {
        assert_eq!(clicked_cell((0, 0), u32::MAX as usize + 2, 504), None);
    }
}
