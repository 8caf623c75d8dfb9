//! Visualization pane rendering
//!
//! Arrays, graphs and trees are drawn on a ratatui [`Canvas`] in layout
//! coordinates. Layout space grows downwards while the canvas grows upwards,
//! so every y is negated before drawing. DP tables are too dense for the
//! canvas and are shown as a [`Table`] window that follows the active cell.

use super::pane_block;
use crate::entity::{Entity, Position};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Block, Cell, Paragraph, Row, Table,
    },
    Frame,
};
use rustc_hash::FxHashMap;

/// Padding around the drawn entities, in layout units
const MARGIN: f64 = 40.0;
const NODE_RADIUS: f64 = 18.0;
/// Width of one sorting bar or DP array cell
const BAR_WIDTH: f64 = 40.0;
/// Terminal columns per DP table column
const TABLE_COLUMN_WIDTH: u16 = 6;

fn entity_color(entity: &Entity) -> Color {
    if entity.is_swapping() {
        DEFAULT_THEME.swapping
    } else if entity.is_highlighted() {
        DEFAULT_THEME.highlight
    } else {
        DEFAULT_THEME.entity
    }
}

fn edge_color(entity: &Entity) -> Color {
    if entity.is_highlighted() {
        DEFAULT_THEME.highlight
    } else {
        DEFAULT_THEME.edge
    }
}

/// Render the current step's entities
pub fn render_visual_pane(frame: &mut Frame, area: Rect, entities: &[Entity], is_focused: bool, title: &str) {
    let block = pane_block(title, is_focused);

    if entities.is_empty() {
        let paragraph = Paragraph::new("(nothing to draw)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    if entities.iter().any(|e| matches!(e, Entity::TableCell { .. })) {
        render_table(frame, area, entities, block);
        return;
    }

    let baseline = bar_baseline(entities);
    let ([x_min, x_max], [y_min, y_max]) = canvas_bounds(entities, baseline);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([x_min, x_max])
        .y_bounds([y_min, y_max])
        .paint(|ctx| {
            draw_arrays(ctx, entities, baseline);
            draw_graph(ctx, entities);
            draw_tree(ctx, entities);
        });
    frame.render_widget(canvas, area);
}

/// Array cells are drawn as bars hanging down to a common baseline, so a row
/// of equal-y DP cells reads as boxes and sorting bars keep their heights
fn bar_baseline(entities: &[Entity]) -> f64 {
    entities
        .iter()
        .filter(|e| matches!(e, Entity::ArrayCell { .. }))
        .map(|e| e.position().y)
        .fold(f64::MIN, f64::max)
        + BAR_WIDTH
}

fn canvas_bounds(entities: &[Entity], baseline: f64) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::MAX, f64::MIN];
    let mut y = [f64::MAX, f64::MIN];
    let mut include = |p: Position| {
        x[0] = x[0].min(p.x);
        x[1] = x[1].max(p.x);
        y[0] = y[0].min(p.y);
        y[1] = y[1].max(p.y);
    };

    for entity in entities {
        let p = entity.position();
        include(p);
        if let Entity::ArrayCell { .. } = entity {
            include(Position::new(p.x + BAR_WIDTH, baseline));
        }
    }

    // Flip y: the lowest layout point is the bottom of the canvas
    (
        [x[0] - MARGIN, x[1] + MARGIN],
        [-(y[1] + MARGIN), -(y[0] - MARGIN)],
    )
}

fn draw_arrays(ctx: &mut Context, entities: &[Entity], baseline: f64) {
    for entity in entities {
        let Entity::ArrayCell { value, position, .. } = entity else {
            continue;
        };
        let color = entity_color(entity);
        ctx.draw(&Rectangle {
            x: position.x,
            y: -baseline,
            width: BAR_WIDTH,
            height: baseline - position.y,
            color,
        });
        ctx.print(
            position.x + 4.0,
            -(position.y + BAR_WIDTH / 2.0),
            Span::styled(value.to_string(), Style::default().fg(color)),
        );
    }
}

fn draw_graph(ctx: &mut Context, entities: &[Entity]) {
    let nodes: FxHashMap<usize, Position> = entities
        .iter()
        .filter_map(|e| match e {
            Entity::GraphNode { id, position, .. } => Some((*id, *position)),
            _ => None,
        })
        .collect();
    if nodes.is_empty() {
        return;
    }

    // Idle halves first so an active half is never painted over
    let mut edges: Vec<&Entity> = entities
        .iter()
        .filter(|e| matches!(e, Entity::GraphEdge { .. }))
        .collect();
    edges.sort_by_key(|e| e.is_highlighted());

    for edge in &edges {
        let Entity::GraphEdge {
            source,
            target,
            weight,
            position,
            ..
        } = edge
        else {
            continue;
        };
        let (Some(from), Some(to)) = (nodes.get(source), nodes.get(target)) else {
            continue;
        };
        ctx.draw(&CanvasLine::new(from.x, -from.y, to.x, -to.y, edge_color(edge)));
        // Each undirected edge is labelled once
        if source < target {
            ctx.print(
                position.x,
                -position.y,
                Span::styled(weight.to_string(), Style::default().fg(DEFAULT_THEME.weight)),
            );
        }
    }

    ctx.layer();
    for entity in entities {
        if let Entity::GraphNode { id, position, .. } = entity {
            draw_node(ctx, *position, id.to_string(), entity_color(entity));
        }
    }
}

fn draw_tree(ctx: &mut Context, entities: &[Entity]) {
    let nodes: FxHashMap<usize, Position> = entities
        .iter()
        .filter_map(|e| match e {
            Entity::TreeNode { id, position, .. } => Some((*id, *position)),
            _ => None,
        })
        .collect();
    if nodes.is_empty() {
        return;
    }

    for entity in entities {
        if let Entity::TreeEdge { source, target, .. } = entity {
            if let (Some(from), Some(to)) = (nodes.get(source), nodes.get(target)) {
                ctx.draw(&CanvasLine::new(from.x, -from.y, to.x, -to.y, edge_color(entity)));
            }
        }
    }

    ctx.layer();
    for entity in entities {
        if let Entity::TreeNode { value, position, .. } = entity {
            draw_node(ctx, *position, value.to_string(), entity_color(entity));
        }
    }
}

fn draw_node(ctx: &mut Context, position: Position, label: String, color: Color) {
    ctx.draw(&Circle {
        x: position.x,
        y: -position.y,
        radius: NODE_RADIUS,
        color,
    });
    let offset = label.chars().count() as f64 * 3.0;
    ctx.print(
        position.x - offset,
        -position.y,
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    );
}

/// First index of a `visible`-wide window over `total` items that keeps
/// `focus` roughly centred
fn window_start(focus: usize, visible: usize, total: usize) -> usize {
    if total <= visible {
        return 0;
    }
    focus.saturating_sub(visible / 2).min(total - visible)
}

fn render_table(frame: &mut Frame, area: Rect, entities: &[Entity], block: Block<'_>) {
    let mut rows = 0;
    let mut cols = 0;
    let mut focus = (0, 0);
    let mut cells: FxHashMap<(usize, usize), &Entity> = FxHashMap::default();
    for entity in entities {
        if let Entity::TableCell { row, col, .. } = entity {
            rows = rows.max(row + 1);
            cols = cols.max(col + 1);
            if entity.is_highlighted() {
                focus = (*row, *col);
            }
            cells.insert((*row, *col), entity);
        }
    }

    // One column is taken by the row labels, one row by the header
    let inner_width = area.width.saturating_sub(2);
    let visible_cols = ((inner_width / TABLE_COLUMN_WIDTH).saturating_sub(1)).max(1) as usize;
    let visible_rows = (area.height.saturating_sub(3)).max(1) as usize;
    let col_start = window_start(focus.1, visible_cols, cols);
    let row_start = window_start(focus.0, visible_rows, rows);
    let col_range = col_start..(col_start + visible_cols).min(cols);
    let row_range = row_start..(row_start + visible_rows).min(rows);

    let label_style = Style::default().fg(DEFAULT_THEME.comment);
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(col_range.clone().map(|c| Cell::from(c.to_string()).style(label_style))),
    );

    let body: Vec<Row> = row_range
        .map(|r| {
            let values = col_range.clone().map(|c| match cells.get(&(r, c)) {
                Some(cell) => {
                    let mut style = Style::default().fg(entity_color(cell));
                    if cell.is_highlighted() {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Cell::from(cell.display_value()).style(style)
                }
                None => Cell::from(""),
            });
            Row::new(std::iter::once(Cell::from(r.to_string()).style(label_style)).chain(values))
        })
        .collect();

    let widths = vec![Constraint::Length(TABLE_COLUMN_WIDTH); col_range.len() + 1];
    let table = Table::new(body, widths).header(header).block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::layout;

    #[test]
    fn test_window_follows_focus() {
        assert_eq!(window_start(3, 10, 5), 0);
        assert_eq!(window_start(0, 4, 20), 0);
        assert_eq!(window_start(10, 4, 20), 8);
        assert_eq!(window_start(19, 4, 20), 16);
    }

    #[test]
    fn test_bounds_flip_y() {
        let entities = vec![Entity::TreeNode {
            id: 0,
            value: 50,
            position: layout::TREE_ROOT,
            highlighted: false,
        }];
        let (x, y) = canvas_bounds(&entities, f64::MIN);
        assert_eq!(x, [360.0, 440.0]);
        assert_eq!(y, [-100.0, -20.0]);
    }
}
