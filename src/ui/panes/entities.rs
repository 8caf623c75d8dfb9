//! Entity list pane rendering

use super::{clamp_scroll, pane_block};
use crate::entity::{Entity, EntityKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

fn kind_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::ArrayCell => "cell",
        EntityKind::TableCell => "table",
        EntityKind::GraphNode => "node",
        EntityKind::GraphEdge => "edge",
        EntityKind::TreeNode => "tree node",
        EntityKind::TreeEdge => "tree edge",
    }
}

fn entity_line(entity: &Entity) -> Line<'static> {
    let label = match entity {
        Entity::TableCell { row, col, .. } => format!("[{},{}]", row, col),
        other => format!("#{}", other.id()),
    };

    let value_style = if entity.is_swapping() {
        Style::default()
            .fg(DEFAULT_THEME.swapping)
            .add_modifier(Modifier::BOLD)
    } else if entity.is_highlighted() {
        Style::default()
            .fg(DEFAULT_THEME.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<10}", kind_label(entity.kind())),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<8}", label), Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(entity.display_value(), value_style),
    ];
    if entity.is_swapping() {
        spans.push(Span::styled(" ⇄", value_style));
    } else if entity.is_highlighted() {
        spans.push(Span::styled(" ●", value_style));
    }
    Line::from(spans)
}

/// Render the entity list of the current step
pub fn render_entities_pane(
    frame: &mut Frame,
    area: Rect,
    entities: &[Entity],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Entities ", is_focused);

    if entities.is_empty() {
        let paragraph = Paragraph::new("(no entities)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    clamp_scroll(scroll_offset, entities.len(), visible_height);

    let visible_items: Vec<ListItem> = entities
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|entity| ListItem::new(entity_line(entity)))
        .collect();

    let list = List::new(visible_items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
