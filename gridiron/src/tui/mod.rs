// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest dashboard plus local
// navigation state. The app orchestrator pushes `UiUpdate` messages over an
// mpsc channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::analytics::free_agents::FreeAgentRow;
use crate::analytics::report_card::ReportCard;
use crate::analytics::Dashboard;
use crate::league::Position;
use crate::protocol::{UiUpdate, UserCommand, View};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Progress of the most recent fetch, shown in the status bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading { week: u32 },
    Failed { week: u32, message: String },
}

/// TUI-local state.
///
/// `dashboard` is only replaced by a successful fetch, so a failed refresh
/// leaves the last good data on screen.
#[derive(Debug, Default)]
pub struct ViewState {
    pub dashboard: Option<Dashboard>,
    pub last_updated: Option<DateTime<Utc>>,
    pub fetch_status: FetchStatus,
    pub active_view: View,
    /// Index into `dashboard.free_agents`.
    pub fa_position: usize,
    /// Index into `dashboard.report_cards`.
    pub selected_team: usize,
    /// Per-view scroll offsets for the main panel.
    pub scroll_offset: HashMap<View, usize>,
    /// Digits typed into the go-to-week prompt; `Some` while it is open.
    pub week_input: Option<String>,
}

impl ViewState {
    pub fn scroll(&self) -> usize {
        self.scroll_offset
            .get(&self.active_view)
            .copied()
            .unwrap_or(0)
    }

    /// Free-agent table currently selected.
    pub fn current_free_agents(&self) -> Option<(Position, &[FreeAgentRow])> {
        let dash = self.dashboard.as_ref()?;
        dash.free_agents
            .get(self.fa_position)
            .map(|(pos, rows)| (*pos, rows.as_slice()))
    }

    /// Report card currently selected.
    pub fn current_report_card(&self) -> Option<&ReportCard> {
        self.dashboard
            .as_ref()?
            .report_cards
            .get(self.selected_team)
    }

    /// Number of entries the sub-selection cycles through in the active view.
    pub fn sub_selection_len(&self) -> usize {
        let Some(dash) = self.dashboard.as_ref() else {
            return 0;
        };
        match self.active_view {
            View::FreeAgents => dash.free_agents.len(),
            View::ReportCards => dash.report_cards.len(),
            _ => 0,
        }
    }

    fn install_dashboard(&mut self, dashboard: Dashboard, fetched_at: DateTime<Utc>) {
        let week_changed = self
            .dashboard
            .as_ref()
            .map_or(true, |d| d.week != dashboard.week || d.season != dashboard.season);
        if week_changed {
            self.scroll_offset.clear();
        }

        // Keep the same team selected across refreshes when it still exists.
        let selected_name = self.current_report_card().map(|c| c.team_name.clone());
        self.selected_team = selected_name
            .and_then(|name| {
                dashboard
                    .report_cards
                    .iter()
                    .position(|c| c.team_name == name)
            })
            .unwrap_or(0);
        if self.fa_position >= dashboard.free_agents.len() {
            self.fa_position = 0;
        }

        self.dashboard = Some(dashboard);
        self.last_updated = Some(fetched_at);
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Loading { week, .. } => {
            state.fetch_status = FetchStatus::Loading { week };
        }
        UiUpdate::Dashboard {
            dashboard,
            fetched_at,
        } => {
            state.install_dashboard(*dashboard, fetched_at);
            state.fetch_status = FetchStatus::Idle;
        }
        UiUpdate::FetchFailed { week, message } => {
            state.fetch_status = FetchStatus::Failed { week, message };
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::nav::render(frame, layout.nav, state);
    render_main_panel(frame, layout.main_panel, state);
    render_help_bar(frame, layout.help_bar, state);
}

fn render_main_panel(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    if state.dashboard.is_none() {
        let text = match &state.fetch_status {
            FetchStatus::Failed { message, .. } => format!("Could not load league data: {message}"),
            _ => "Loading league data...".to_string(),
        };
        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.active_view.title()),
        );
        frame.render_widget(paragraph, area);
        return;
    }

    match state.active_view {
        View::BoomChoke => widgets::boom_choke::render(frame, area, state),
        View::FreeAgents => widgets::free_agents::render(frame, area, state),
        View::ReportCards => widgets::report_card::render(frame, area, state),
        View::Matchups => widgets::matchups::render(frame, area, state),
        View::DraftValue => widgets::draft_value::render(frame, area, state),
    }
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let span = match &state.week_input {
        Some(digits) => Span::styled(
            format!(" Go to week: {digits}_ | Enter:Go | Esc:Cancel"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            concat!(
                " q:Quit | 1-5/Tab:Views | j/k:Scroll | h/l:Position/Team",
                " | [/]:Week | g:Go to week | r:Refresh",
            ),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        ),
    };
    let paragraph =
        Paragraph::new(Line::from(vec![span])).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input, and a render tick until the user
/// quits or the app closes the update channel.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App is shutting down.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Test fixtures shared by the widget tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
