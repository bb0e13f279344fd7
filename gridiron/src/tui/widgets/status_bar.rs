// Status bar widget: league, season/week, last update time, fetch status.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{FetchStatus, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [league] [season/week] [updated] [fetch status]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (league, week_label) = match &state.dashboard {
        Some(d) => (
            d.league_name.clone(),
            format!("{} Week {}", d.season, d.week),
        ),
        None => ("gridiron".to_string(), "--".to_string()),
    };

    spans.push(Span::styled(
        format!(" {league} "),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(week_label, Style::default().fg(Color::White)));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        updated_label(state),
        Style::default().fg(Color::Gray),
    ));

    if let Some((text, color)) = fetch_indicator(&state.fetch_status) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

fn updated_label(state: &ViewState) -> String {
    match state.last_updated {
        Some(at) => format!("Updated {} UTC", at.format("%H:%M:%S")),
        None => "Not loaded".to_string(),
    }
}

/// Text and color for the fetch status, `None` when idle.
pub fn fetch_indicator(status: &FetchStatus) -> Option<(String, Color)> {
    match status {
        FetchStatus::Idle => None,
        FetchStatus::Loading { week } => Some((format!("Loading week {week}..."), Color::Yellow)),
        FetchStatus::Failed { week, message } => {
            Some((format!("Week {week} failed: {message}"), Color::Red))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{loaded_state, render_to_lines};

    #[test]
    fn fetch_indicator_idle_is_hidden() {
        assert!(fetch_indicator(&FetchStatus::Idle).is_none());
    }

    #[test]
    fn fetch_indicator_colors() {
        let (text, color) = fetch_indicator(&FetchStatus::Loading { week: 3 }).unwrap();
        assert_eq!(text, "Loading week 3...");
        assert_eq!(color, Color::Yellow);

        let (text, color) = fetch_indicator(&FetchStatus::Failed {
            week: 3,
            message: "HTTP 500".into(),
        })
        .unwrap();
        assert!(text.contains("HTTP 500"));
        assert_eq!(color, Color::Red);
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let state = ViewState::default();
        let lines = render_to_lines(80, 1, |frame| render(frame, frame.area(), &state));
        assert!(lines[0].contains("Not loaded"));
    }

    #[test]
    fn render_shows_league_and_week() {
        let state = loaded_state(7);
        let lines = render_to_lines(100, 1, |frame| render(frame, frame.area(), &state));
        assert!(lines[0].contains("Test League"));
        assert!(lines[0].contains("2025 Week 7"));
        assert!(lines[0].contains("Updated"));
    }
}
