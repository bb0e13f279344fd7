// Draft value widget: every pick with this week's grade and verdict.
//
// Columns: Pick, Rd, Player, Drafted By, Pts, Grade, Verdict

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{grade_style, header_style, scrolled};
use crate::analytics::draft_value::DraftVerdict;
use crate::protocol::View;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(dash) = state.dashboard.as_ref() else {
        return;
    };

    let header = Row::new(vec![
        Cell::from("Pick"),
        Cell::from("Rd"),
        Cell::from("Player"),
        Cell::from("Drafted By"),
        Cell::from("Pts"),
        Cell::from("Grade"),
        Cell::from("Verdict"),
    ])
    .style(header_style());

    let rows: Vec<Row> = dash
        .draft
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(format!("{}", p.pick_no)),
                Cell::from(format!("{}", p.round)),
                Cell::from(p.player_name.clone()),
                Cell::from(p.drafted_by.clone()),
                Cell::from(format!("{:.1}", p.points)),
                Cell::from(p.grade.label()).style(grade_style(p.grade)),
                Cell::from(p.verdict.label()).style(verdict_style(p.verdict)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(8),
    ];

    let title = if dash.draft.is_empty() {
        format!("{} (no draft picks)", View::DraftValue.title())
    } else {
        format!("{} ({})", View::DraftValue.title(), dash.draft.len())
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = scrolled(state.scroll(), dash.draft.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

pub fn verdict_style(verdict: DraftVerdict) -> Style {
    match verdict {
        DraftVerdict::Steal => Style::default().fg(Color::Green),
        DraftVerdict::Bust => Style::default().fg(Color::Red),
        DraftVerdict::Keeper => Style::default().fg(Color::Cyan),
        DraftVerdict::Fair => Style::default(),
    }
}
