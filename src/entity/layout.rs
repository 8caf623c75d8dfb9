// Layout formulas for the replay canvas

use super::Position;
use std::f64::consts::PI;

/// Horizontal pitch of DP array cells and table columns
pub const CELL_SIZE: f64 = 50.0;

/// Top-left corner of the DP table
pub const TABLE_ORIGIN: Position = Position::new(100.0, 100.0);

/// Left end of the DP array row
pub const ARRAY_ORIGIN: Position = Position::new(100.0, 150.0);

/// Sorting bars: left edge, bar pitch (width + gap), baseline and value scale
pub const BAR_START_X: f64 = 50.0;
pub const BAR_PITCH: f64 = 40.0 + 10.0;
pub const BAR_BASE_Y: f64 = 300.0;
pub const BAR_HEIGHT_SCALE: f64 = 2.0;

/// Graph canvas centre and circle radius
pub const GRAPH_CENTER: Position = Position::new(400.0, 250.0);
pub const GRAPH_RADIUS: f64 = 150.0;

/// Graphs larger than this switch from the circle to the grid
pub const CIRCULAR_LAYOUT_MAX: usize = 8;

/// Tree root position, initial horizontal spacing and level height
pub const TREE_ROOT: Position = Position::new(400.0, 60.0);
pub const TREE_SPACING: f64 = 200.0;
pub const TREE_LEVEL_HEIGHT: f64 = 100.0;

/// Cell `index` of a one-dimensional DP array
pub fn array_cell(index: usize) -> Position {
    Position::new(ARRAY_ORIGIN.x + index as f64 * CELL_SIZE, ARRAY_ORIGIN.y)
}

/// Top of the bar for `value` at `index`; taller values sit higher
pub fn array_bar(index: usize, value: i64) -> Position {
    Position::new(
        BAR_START_X + index as f64 * BAR_PITCH,
        BAR_BASE_Y - value as f64 * BAR_HEIGHT_SCALE,
    )
}

/// Cell `(row, col)` of a DP table
pub fn table_cell(row: usize, col: usize) -> Position {
    Position::new(
        TABLE_ORIGIN.x + col as f64 * CELL_SIZE,
        TABLE_ORIGIN.y + row as f64 * CELL_SIZE,
    )
}

/// Position of the `index`-th of `count` graph nodes
///
/// Zero or one node sits at the centre; up to [`CIRCULAR_LAYOUT_MAX`] nodes are
/// spread on a circle; larger graphs use a grid.
pub fn graph_node(index: usize, count: usize) -> Position {
    if count <= 1 {
        return GRAPH_CENTER;
    }

    if count <= CIRCULAR_LAYOUT_MAX {
        let angle = 2.0 * PI * index as f64 / count as f64;
        return Position::new(
            GRAPH_CENTER.x + GRAPH_RADIUS * angle.cos(),
            GRAPH_CENTER.y + GRAPH_RADIUS * angle.sin(),
        );
    }

    let rows = (count as f64).sqrt().ceil() as usize;
    let cols = count.div_ceil(rows);
    let row = index / cols;
    let col = index % cols;
    let col_step = 600 / cols.saturating_sub(1).max(1);
    let row_step = 400 / rows.saturating_sub(1).max(1);
    Position::new(
        100.0 + (col * col_step) as f64,
        80.0 + (row * row_step) as f64,
    )
}

/// Positions of the two children of a tree node at `parent`
/// laid out with `spacing`; returns `(left, right, child_spacing)`
pub fn tree_children(parent: Position, spacing: f64) -> (Position, Position, f64) {
    let next = spacing / 2.0;
    let y = parent.y + TREE_LEVEL_HEIGHT;
    (
        Position::new(parent.x - next, y),
        Position::new(parent.x + next, y),
        next,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_node_graph_is_centred() {
        assert_eq!(graph_node(0, 1), GRAPH_CENTER);
        assert_eq!(graph_node(0, 0), GRAPH_CENTER);
    }

    #[test]
    fn test_circular_layout() {
        let first = graph_node(0, 4);
        assert!((first.x - 550.0).abs() < 1e-9);
        assert!((first.y - 250.0).abs() < 1e-9);

        let second = graph_node(1, 4);
        assert!((second.x - 400.0).abs() < 1e-9);
        assert!((second.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_layout_for_large_graphs() {
        // 9 nodes: 3 rows x 3 cols, 300 x 200 pitch
        assert_eq!(graph_node(0, 9), Position::new(100.0, 80.0));
        assert_eq!(graph_node(4, 9), Position::new(400.0, 280.0));
        assert_eq!(graph_node(8, 9), Position::new(700.0, 480.0));
    }

    #[test]
    fn test_tree_spacing_halves() {
        let (left, right, next) = tree_children(TREE_ROOT, TREE_SPACING);
        assert_eq!(left, Position::new(300.0, 160.0));
        assert_eq!(right, Position::new(500.0, 160.0));
        assert_eq!(next, 100.0);

        let (grand_left, _, _) = tree_children(left, next);
        assert_eq!(grand_left, Position::new(250.0, 260.0));
    }

    #[test]
    fn test_bar_height_tracks_value() {
        assert_eq!(array_bar(0, 10), Position::new(50.0, 280.0));
        assert_eq!(array_bar(2, 100), Position::new(150.0, 100.0));
    }
}
