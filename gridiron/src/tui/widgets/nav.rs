// Navigation sidebar: the view list, plus the team or position list the
// active view cycles through.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::View;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(nav_lines(state))
        .block(Block::default().borders(Borders::ALL).title("gridiron"));
    frame.render_widget(paragraph, area);
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Build the sidebar text. Exposed for tests.
pub fn nav_lines(state: &ViewState) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if *view == state.active_view {
                selected_style()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{} {}", i + 1, view.title()), style))
        })
        .collect();

    let Some(dash) = state.dashboard.as_ref() else {
        return lines;
    };

    let entries: Vec<(String, bool)> = match state.active_view {
        View::ReportCards => dash
            .report_cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                (
                    format!("{} ({:.2})", card.team_name, card.gpa),
                    i == state.selected_team,
                )
            })
            .collect(),
        View::FreeAgents => dash
            .free_agents
            .iter()
            .enumerate()
            .map(|(i, (pos, rows))| {
                (
                    format!("{} ({})", pos.display_str(), rows.len()),
                    i == state.fa_position,
                )
            })
            .collect(),
        _ => Vec::new(),
    };

    if !entries.is_empty() {
        let heading = if state.active_view == View::ReportCards {
            "Teams"
        } else {
            "Positions"
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::UNDERLINED),
        )));
        for (text, selected) in entries {
            let style = if selected {
                selected_style()
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
    }

    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
