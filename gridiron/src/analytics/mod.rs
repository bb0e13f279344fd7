// Analytics engine: grades, boom/choke, GPA, free agents, win probability,
// and draft value, all computed from one immutable `LeagueSnapshot`.
//
// Everything here is pure and synchronous. Running the engine twice on the
// same snapshot produces identical output.

pub mod boom;
pub mod draft_value;
pub mod free_agents;
pub mod gpa;
pub mod grade;
pub mod report_card;
pub mod win_prob;

use boom::{boom_report, BoomConfig, BoomRow};
use draft_value::{draft_report, DraftValueConfig, DraftValueRow};
use free_agents::{rank_free_agents, FreeAgentConfig, FreeAgentRow};
use gpa::GpaMethod;
use grade::CeilingTable;
use report_card::{report_card, ReportCard};
use win_prob::{matchup_report, MatchupRow};

use crate::league::{LeagueSnapshot, Position};

/// All tunables of the engine in one place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradingConfig {
    pub ceilings: CeilingTable,
    pub boom: BoomConfig,
    pub gpa: GpaMethod,
    pub free_agents: FreeAgentConfig,
    pub draft: DraftValueConfig,
}

/// Every derived view for one week, ready to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub league_name: String,
    pub season: String,
    pub week: u32,
    pub boom: Vec<BoomRow>,
    /// One table per configured position, in configured order.
    pub free_agents: Vec<(Position, Vec<FreeAgentRow>)>,
    /// One card per roster, sorted by team name.
    pub report_cards: Vec<ReportCard>,
    pub matchups: Vec<MatchupRow>,
    pub draft: Vec<DraftValueRow>,
    /// Projections and actuals share a source, so boom deltas are all zero.
    pub projections_mirror_actuals: bool,
}

impl Dashboard {
    pub fn free_agents_at(&self, position: Position) -> &[FreeAgentRow] {
        self.free_agents
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn report_card_for(&self, team_name: &str) -> Option<&ReportCard> {
        self.report_cards.iter().find(|c| c.team_name == team_name)
    }
}

/// Run every analysis over a snapshot.
pub fn compute_dashboard(snapshot: &LeagueSnapshot, config: &GradingConfig) -> Dashboard {
    let rostered = snapshot.rostered_ids();

    let free_agents = config
        .free_agents
        .positions
        .iter()
        .map(|&pos| {
            let rows = rank_free_agents(
                &snapshot.players,
                &rostered,
                &snapshot.actuals,
                pos,
                config.free_agents.min_points,
                config.free_agents.limit,
                &config.ceilings,
            );
            (pos, rows)
        })
        .collect();

    let mut report_cards: Vec<ReportCard> = snapshot
        .rosters
        .iter()
        .filter_map(|r| report_card(snapshot, r.roster_id, &config.gpa, &config.ceilings))
        .collect();
    report_cards.sort_by(|a, b| {
        a.team_name
            .to_lowercase()
            .cmp(&b.team_name.to_lowercase())
            .then_with(|| a.roster_id.cmp(&b.roster_id))
    });

    let dashboard = Dashboard {
        league_name: snapshot.league_name.clone(),
        season: snapshot.season.clone(),
        week: snapshot.week,
        boom: boom_report(snapshot, &config.boom),
        free_agents,
        report_cards,
        matchups: matchup_report(snapshot),
        draft: draft_report(snapshot, &config.draft, &config.ceilings),
        projections_mirror_actuals: snapshot.projections_mirror_actuals,
    };

    tracing::debug!(
        week = dashboard.week,
        boom_rows = dashboard.boom.len(),
        teams = dashboard.report_cards.len(),
        matchups = dashboard.matchups.len(),
        picks = dashboard.draft.len(),
        "dashboard computed"
    );

    dashboard
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
