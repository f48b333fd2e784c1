//! Screen geometry for the maze view.
//!
//! Every maze cell is drawn as a fixed block of terminal cells. The helpers here size that block,
//! place the maze in the middle of the available area and turn pointer coordinates back into grid
//! positions.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::layout::Rect;

use crate::maze::{Grid, Position};

/// Width of a maze cell in terminal columns. Terminal cells are roughly twice as tall as they are
/// wide, so two columns make a maze cell look square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Height of a maze cell in terminal rows.
pub(crate) const CELL_HEIGHT: u16 = 1;

/// Returns the size in terminal cells the maze needs to be drawn in full, as `(width, height)`.
///
/// # Errors
///
/// This function returns an error if the maze is too large to be addressed with terminal
/// coordinates.
pub(crate) fn maze_extent(grid: &Grid) -> Result<(u16, u16)> {
    let width = u16::try_from(grid.cols())?
        .checked_mul(CELL_WIDTH)
        .ok_or_eyre("maze is too wide to draw")?;
    let height = u16::try_from(grid.rows())?
        .checked_mul(CELL_HEIGHT)
        .ok_or_eyre("maze is too tall to draw")?;

    Ok((width, height))
}

/// Centres a `width × height` box inside `area`. The box is shrunk to the area if it does not fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let left = rounded_div::i32(i32::from(area.width - width), 2);
    let top = rounded_div::i32(i32::from(area.height - height), 2);

    Rect::new(
        area.x + u16::try_from(left).unwrap_or(0),
        area.y + u16::try_from(top).unwrap_or(0),
        width,
        height,
    )
}

/// Translates a pointer position in terminal coordinates into the grid position under it.
///
/// `origin` is the area the maze is drawn in. Pointer positions left of or above it have no grid
/// position. Positions to the right or below may fall outside the grid; [`Grid::cell`] tells those
/// apart.
pub(crate) fn pointer_to_cell(origin: Rect, column: u16, row: u16) -> Option<Position> {
    let dx = column.checked_sub(origin.x)?;
    let dy = row.checked_sub(origin.y)?;

    Some(Position::new(
        usize::from(dy / CELL_HEIGHT),
        usize::from(dx / CELL_WIDTH),
    ))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::maze::generate;

    #[test]
    fn test_maze_extent() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate(9, 15, &mut rng).expect("9x15 is a valid size");

        let extent = maze_extent(&grid).expect("small mazes fit in terminal coordinates");
        assert_eq!(extent, (30, 9));
    }

    #[test]
    fn test_centered_rect_even_padding() {
        let area = Rect::new(0, 0, 80, 24);

        let rect = centered_rect(area, 42, 20);
        assert_eq!(rect, Rect::new(19, 2, 42, 20));
    }

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(3, 5, 41, 17);

        for (width, height) in [(40, 16), (10, 2), (41, 17), (1, 1)] {
            let rect = centered_rect(area, width, height);
            assert_eq!(rect.intersection(area), rect, "{width}x{height} escaped the area");
            assert_eq!((rect.width, rect.height), (width, height));
        }
    }

    #[test]
    fn test_centered_rect_clamps_oversized_box() {
        let area = Rect::new(0, 0, 20, 10);

        let rect = centered_rect(area, 50, 30);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_pointer_to_cell() {
        let origin = Rect::new(10, 4, 42, 21);

        assert_eq!(pointer_to_cell(origin, 10, 4), Some(Position::new(0, 0)));
        assert_eq!(pointer_to_cell(origin, 11, 4), Some(Position::new(0, 0)));
        assert_eq!(pointer_to_cell(origin, 12, 4), Some(Position::new(0, 1)));
        assert_eq!(pointer_to_cell(origin, 15, 7), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_pointer_before_origin() {
        let origin = Rect::new(10, 4, 42, 21);

        assert_eq!(pointer_to_cell(origin, 9, 4), None);
        assert_eq!(pointer_to_cell(origin, 10, 3), None);
    }
}
