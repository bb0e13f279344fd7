// Matchups widget: head-to-head scores with win probabilities.
//
// Columns: #, Home, Pts, Win%, Away, Pts, Win%. The leading side is bold.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{header_style, scrolled};
use crate::analytics::win_prob::MatchupSide;
use crate::protocol::View;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(dash) = state.dashboard.as_ref() else {
        return;
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Home"),
        Cell::from("Pts"),
        Cell::from("Win%"),
        Cell::from("Away"),
        Cell::from("Pts"),
        Cell::from("Win%"),
    ])
    .style(header_style());

    let rows: Vec<Row> = dash
        .matchups
        .iter()
        .map(|m| {
            let leader = m.leader();
            let mut cells = vec![Cell::from(format!("{}", m.matchup_id))];
            cells.extend(side_cells(&m.home, leader));
            cells.extend(side_cells(&m.away, leader));
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let title = format!("{} ({})", View::Matchups.title(), dash.matchups.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = scrolled(state.scroll(), dash.matchups.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn side_cells(side: &MatchupSide, leader: Option<&str>) -> [Cell<'static>; 3] {
    let style = if leader == Some(side.team_name.as_str()) {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    [
        Cell::from(side.team_name.clone()).style(style),
        Cell::from(format!("{:.1}", side.points)).style(style),
        Cell::from(format_percent(side.win_probability)).style(style),
    ]
}

/// Probability as a whole percentage, e.g. 0.6 -> "60%".
pub fn format_percent(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}
