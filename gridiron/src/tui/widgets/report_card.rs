// Report card widget: one team's players with points and grades, and the
// team GPA in the title.

use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{grade_style, header_style, scrolled};
use crate::protocol::View;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(card) = state.current_report_card() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(View::ReportCards.title());
        frame.render_widget(block, area);
        return;
    };

    let title = format!(
        "{}: {} | GPA {:.2} | {:.1} pts",
        View::ReportCards.title(),
        card.team_name,
        card.gpa,
        card.total_points()
    );

    let header = Row::new(vec![
        Cell::from("Pos"),
        Cell::from("Player"),
        Cell::from("Pts"),
        Cell::from("Grade"),
    ])
    .style(header_style());

    let rows: Vec<Row> = card
        .rows
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.position_label.clone()),
                Cell::from(r.player_name.clone()),
                Cell::from(format!("{:.1}", r.points)),
                Cell::from(r.grade.label()).style(grade_style(r.grade)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = scrolled(state.scroll(), card.rows.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}
