// TUI widget modules for each dashboard panel, plus shared cell styling.

pub mod boom_choke;
pub mod draft_value;
pub mod free_agents;
pub mod matchups;
pub mod nav;
pub mod report_card;
pub mod status_bar;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::TableState;

use crate::analytics::grade::Grade;

/// Header row style shared by every table.
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Color a letter grade: green at the top, red at the bottom.
pub fn grade_style(grade: Grade) -> Style {
    let color = match grade {
        Grade::APlus | Grade::A => Color::Green,
        Grade::B => Color::Cyan,
        Grade::C => Color::Yellow,
        Grade::D => Color::LightRed,
        Grade::F => Color::Red,
    };
    Style::default().fg(color)
}

/// Signed one-decimal delta, e.g. "+7.2" / "-3.0".
pub fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta:.1}")
    } else {
        format!("{delta:.1}")
    }
}

/// Table state scrolled to `offset`, clamped so the last row stays visible.
pub fn scrolled(offset: usize, row_count: usize) -> TableState {
    TableState::default().with_offset(offset.min(row_count.saturating_sub(1)))
}
