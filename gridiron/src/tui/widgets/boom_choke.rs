// Boom/choke widget: rostered players ranked by actual minus projected.
//
// Columns: Player, Team, Proj, Actual, Delta, Status. When projections are
// read from the stats endpoint the title carries a marker, since every delta
// is then zero.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{format_delta, header_style, scrolled};
use crate::analytics::boom::BoomStatus;
use crate::protocol::View;
use crate::tui::ViewState;

pub const MIRROR_MARKER: &str = "[projections = actuals]";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(dash) = state.dashboard.as_ref() else {
        return;
    };

    let header = Row::new(vec![
        Cell::from("Player"),
        Cell::from("Team"),
        Cell::from("Proj"),
        Cell::from("Actual"),
        Cell::from("Delta"),
        Cell::from("Status"),
    ])
    .style(header_style());

    let rows: Vec<Row> = dash
        .boom
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.player_name.clone()),
                Cell::from(r.team_name.clone()),
                Cell::from(format!("{:.1}", r.projected)),
                Cell::from(format!("{:.1}", r.actual)),
                Cell::from(format_delta(r.delta)),
                Cell::from(r.status.label()).style(status_style(r.status)),
            ])
        })
        .collect();
    let row_count = rows.len();

    let widths = [
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title(
            View::BoomChoke.title(),
            dash.boom.len(),
            dash.projections_mirror_actuals,
        )));

    let mut table_state = scrolled(state.scroll(), row_count);
    frame.render_stateful_widget(table, area, &mut table_state);
}

pub fn status_style(status: BoomStatus) -> Style {
    match status {
        BoomStatus::Booming => Style::default().fg(Color::Green),
        BoomStatus::Choking => Style::default().fg(Color::Red),
        BoomStatus::Neutral | BoomStatus::Excluded => Style::default().fg(Color::Gray),
    }
}

fn title(base: &str, count: usize, mirrored: bool) -> String {
    if mirrored {
        format!("{base} ({count}) {MIRROR_MARKER}")
    } else {
        format!("{base} ({count})")
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
    fn title_carries_marker_only_when_mirrored() {
        assert_eq!(title("Boom / Choke", 2, false), "Boom / Choke (2)");
        assert!(title("Boom / Choke", 2, true).ends_with(MIRROR_MARKER));
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_style(BoomStatus::Booming).fg, Some(Color::Green));
        assert_eq!(status_style(BoomStatus::Choking).fg, Some(Color::Red));
        assert_eq!(status_style(BoomStatus::Neutral).fg, Some(Color::Gray));
    }

    #[test]
    fn render_lists_rows_with_signed_deltas() {
        let state = loaded_state(4);
        let lines = render_to_lines(100, 10, |frame| render(frame, frame.area(), &state));
        let all = lines.join("\n");
        assert!(all.contains("Big Game"));
        assert!(all.contains("+15.0"));
        assert!(all.contains("CHOKING"));
        assert!(!all.contains(MIRROR_MARKER));
    }

    #[test]
    fn render_shows_marker_when_mirrored() {
        let mut state = loaded_state(4);
        if let Some(d) = state.dashboard.as_mut() {
            d.projections_mirror_actuals = true;
        }
        let lines = render_to_lines(100, 10, |frame| render(frame, frame.area(), &state));
        assert!(lines[0].contains(MIRROR_MARKER));
    }

    #[test]
    fn scrolled_past_end_still_renders_last_row() {
        let mut state = loaded_state(4);
        state.scroll_offset.insert(View::BoomChoke, 99);
        let lines = render_to_lines(100, 10, |frame| render(frame, frame.area(), &state));
        let all = lines.join("\n");
        assert!(all.contains("Flat Line"));
        assert!(!all.contains("Big Game"));
    }
}
