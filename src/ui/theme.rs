use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub entity: Color,    // Idle cells, nodes, bars
    pub highlight: Color, // Active entity of the step
    pub swapping: Color,  // Cells about to be swapped
    pub edge: Color,      // Idle edges
    pub weight: Color,    // Edge weight labels
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    entity: Color::Rgb(137, 180, 250),         // Blue
    highlight: Color::Rgb(249, 226, 175),      // Yellow
    swapping: Color::Rgb(243, 139, 168),       // Red
    edge: Color::Rgb(88, 91, 112),             // Dim grey
    weight: Color::Rgb(148, 226, 213),         // Cyan/teal
};
