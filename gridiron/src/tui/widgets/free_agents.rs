// Free-agent widget: the best unrostered players at the selected position.
//
// Columns: #, Player, Team, Pts, Grade

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{grade_style, header_style, scrolled};
use crate::protocol::View;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, rows) = match state.current_free_agents() {
        Some((pos, rows)) => (
            format!("{} [{}] ({})", View::FreeAgents.title(), pos.display_str(), rows.len()),
            rows,
        ),
        None => (View::FreeAgents.title().to_string(), &[][..]),
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Player"),
        Cell::from("Team"),
        Cell::from("Pts"),
        Cell::from("Grade"),
    ])
    .style(header_style());

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(r.player_name.clone()),
                Cell::from(r.team.clone()),
                Cell::from(format!("{:.1}", r.points)),
                Cell::from(r.grade.label()).style(grade_style(r.grade)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = scrolled(state.scroll(), rows.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}
