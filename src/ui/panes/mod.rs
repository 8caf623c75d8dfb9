//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`visual`]: canvas drawing of arrays, graphs and trees; table view for DP tables
//! - [`narration`]: message of the current step
//! - [`entities`]: scrollable list of the step's entities and their flags
//! - [`status`]: status bar with keybindings and replay state
//!
//! Each pane module exports a `render_*` function that takes the frame, its
//! area, the data to show and, where the pane scrolls, a mutable scroll offset
//! that it clamps to the content.

pub mod entities;
pub mod narration;
pub mod status;
pub mod visual;

pub use entities::render_entities_pane;
pub use narration::render_narration_pane;
pub use status::render_status_bar;
pub use visual::render_visual_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane block, styled by focus
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp a scroll offset so the last page stays full
fn clamp_scroll(scroll_offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }
}
