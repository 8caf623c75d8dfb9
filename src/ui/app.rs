//! Main TUI application state and logic

use crate::config::ReplaySettings;
use crate::snapshot::{Snapshot, Trace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Visual,
    Narration,
    Entities,
}

impl FocusedPane {
    /// Move focus to the next pane (visual -> narration -> entities)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Visual => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Entities,
            FocusedPane::Entities => FocusedPane::Visual,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Visual => FocusedPane::Entities,
            FocusedPane::Narration => FocusedPane::Visual,
            FocusedPane::Entities => FocusedPane::Narration,
        }
    }
}

/// The main application state
pub struct App {
    /// The trace being replayed
    pub trace: Trace,

    /// Title of the visualization pane (algorithm being shown)
    pub title: String,

    /// 0-based index of the shown step
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub narration_scroll: usize,
    pub entities_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Auto-play step interval
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app replaying `trace`
    pub fn new(trace: Trace, title: impl Into<String>, settings: &ReplaySettings) -> Self {
        let position = if settings.start_at_end {
            trace.step_count().saturating_sub(1)
        } else {
            0
        };
        let status_message = if trace.is_empty() {
            String::from("Trace has no steps")
        } else {
            String::from("Ready!")
        };

        App {
            trace,
            title: title.into(),
            position,
            focused_pane: FocusedPane::Visual,
            narration_scroll: 0,
            entities_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            play_interval: Duration::from_millis(settings.play_interval_ms),
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Snapshot at the current position (the default snapshot for an empty trace)
    pub fn current(&self) -> Snapshot {
        self.trace.step_at(self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.trace.step_count()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    // No more steps available
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let snapshot = self.current();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Visualization (left) | Narration over Entities (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        let title = format!(" {} ", self.title);
        super::panes::render_visual_pane(
            frame,
            columns[0],
            &snapshot.entities,
            self.focused_pane == FocusedPane::Visual,
            &title,
        );

        super::panes::render_narration_pane(
            frame,
            right_rows[0],
            &snapshot,
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        super::panes::render_entities_pane(
            frame,
            right_rows[1],
            &snapshot.entities,
            self.focused_pane == FocusedPane::Entities,
            &mut self.entities_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.position,
            self.trace.step_count(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at first step".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at last step".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Visual => {}
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_sub(1);
                }
                FocusedPane::Entities => {
                    self.entities_scroll = self.entities_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Visual => {}
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_add(1);
                }
                FocusedPane::Entities => {
                    self.entities_scroll = self.entities_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.play_interval)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of the trace
                self.is_playing = false;
                self.jump_to(self.trace.step_count().saturating_sub(1));
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                // Jump to start of the trace
                self.is_playing = false;
                self.jump_to(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Advance one step. Returns `false` at the last step.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.jump_to(self.position + 1);
        true
    }

    /// Go back one step. Returns `false` at the first step.
    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.jump_to(self.position - 1);
        true
    }

    fn jump_to(&mut self, position: usize) {
        if position != self.position {
            self.narration_scroll = 0;
        }
        self.position = position;
    }
}
