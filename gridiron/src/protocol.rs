// Message types exchanged between the app orchestrator and the TUI.
//
// The TUI sends `UserCommand`s; the app answers with `UiUpdate`s. Views and
// sub-selections (free-agent position, report-card team) are TUI-local and
// never cross the channel.

use chrono::{DateTime, Utc};

use crate::analytics::Dashboard;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Dashboard views listed in the navigation sidebar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    BoomChoke,
    FreeAgents,
    ReportCards,
    Matchups,
    DraftValue,
}

impl View {
    pub const ALL: [View; 5] = [
        View::BoomChoke,
        View::FreeAgents,
        View::ReportCards,
        View::Matchups,
        View::DraftValue,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::BoomChoke => "Boom / Choke",
            View::FreeAgents => "Free Agents",
            View::ReportCards => "Report Cards",
            View::Matchups => "Matchups",
            View::DraftValue => "Draft Value",
        }
    }

    pub fn index(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    /// View for a 1-based number key, if any.
    pub fn from_number(n: u32) -> Option<View> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        View::ALL.get(idx).copied()
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// TUI -> App
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Show a specific week (clamped to the regular season).
    SelectWeek(u32),
    NextWeek,
    PrevWeek,
    /// Drop every cached snapshot and refetch the current week.
    Refresh,
    Quit,
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A fetch for this week has started.
    Loading { season: String, week: u32 },
    /// Fresh analytics for one week.
    Dashboard {
        dashboard: Box<Dashboard>,
        fetched_at: DateTime<Utc>,
    },
    /// The fetch failed; the TUI keeps whatever it was showing.
    FetchFailed { week: u32, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_map_to_views() {
        assert_eq!(View::from_number(1), Some(View::BoomChoke));
        assert_eq!(View::from_number(5), Some(View::DraftValue));
        assert_eq!(View::from_number(0), None);
        assert_eq!(View::from_number(6), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(View::DraftValue.next(), View::BoomChoke);
        assert_eq!(View::BoomChoke.prev(), View::DraftValue);
        for view in View::ALL {
            assert_eq!(view.next().prev(), view);
        }
    }

    #[test]
    fn index_matches_order() {
        for (i, view) in View::ALL.iter().enumerate() {
            assert_eq!(view.index(), i);
        }
    }
}
