//! Narration pane rendering

use super::{clamp_scroll, pane_block};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

/// Render the current step's message, one line per message line
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Narration ", is_focused);

    if snapshot.is_empty() {
        let paragraph = Paragraph::new("(no steps)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        format!("Step {} of {}", snapshot.step, snapshot.total_steps),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        snapshot
            .message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(DEFAULT_THEME.fg)))),
    );

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block.padding(Padding::new(1, 0, 0, 0)))
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
