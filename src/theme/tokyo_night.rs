//! Tokyo Night theme implementation

use ratatui::style::Color;

use super::Theme;

/// Tokyo Night color palette
pub const TOKYO_NIGHT: Theme = Theme {
    name: String::new(),

    // Background colors
    bg_primary: Color::Rgb(26, 27, 38),   // #1a1b26
    bg_secondary: Color::Rgb(36, 40, 59), // #24283b

    // Foreground colors
    fg_primary: Color::Rgb(169, 177, 214),   // #a9b1d6
    fg_secondary: Color::Rgb(192, 202, 245), // #c0caf5
    fg_muted: Color::Rgb(86, 95, 137),       // #565f89

    // Accent colors
    accent_primary: Color::Rgb(122, 162, 247),   // #7aa2f7
    accent_secondary: Color::Rgb(187, 154, 247), // #bb9af7

    // Lesson kinds
    lesson_video: Color::Rgb(187, 154, 247),      // #bb9af7
    lesson_document: Color::Rgb(125, 207, 255),   // #7dcfff
    lesson_quiz: Color::Rgb(224, 175, 104),       // #e0af68
    lesson_assignment: Color::Rgb(255, 158, 100), // #ff9e64

    // Semantic colors
    success: Color::Rgb(158, 206, 106), // #9ece6a
    error: Color::Rgb(247, 118, 142),   // #f7768e

    // UI elements
    border: Color::Rgb(65, 72, 104),           // #414868
    border_focused: Color::Rgb(122, 162, 247), // #7aa2f7
    gauge_empty: Color::Rgb(40, 52, 87),       // #283457
};

impl Theme {
    pub fn tokyo_night() -> Self {
        Theme { name: "Tokyo Night".to_string(), ..TOKYO_NIGHT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_night_has_correct_name() {
        assert_eq!(Theme::tokyo_night().name, "Tokyo Night");
    }
}
