// League data model: typed Sleeper records and the per-week snapshot that
// joins them.

pub mod types;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub use types::{
    DraftPick, League, MatchupEntry, NflState, Player, PlayerId, Position, Roster, RosterId,
    StatLine, User, SKILL_POSITIONS,
};

/// Placeholder team name for rosters whose owner cannot be resolved.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Everything fetched for one (season, week), as an immutable snapshot.
///
/// The analytics engine reads from this and never mutates it. Lookups that
/// miss degrade to placeholders ("Unknown", 0 points) rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueSnapshot {
    pub season: String,
    pub week: u32,
    pub league_name: String,
    /// Shared across weeks; the player directory does not depend on the week.
    pub players: Arc<HashMap<PlayerId, Player>>,
    pub rosters: Vec<Roster>,
    pub users: Vec<User>,
    pub projections: HashMap<PlayerId, StatLine>,
    pub actuals: HashMap<PlayerId, StatLine>,
    pub matchups: Vec<MatchupEntry>,
    pub draft_picks: Vec<DraftPick>,
    /// True when projections and actuals came from the same endpoint, which
    /// makes every boom/choke delta zero.
    pub projections_mirror_actuals: bool,
}

impl LeagueSnapshot {
    /// Union of every roster's player IDs.
    pub fn rostered_ids(&self) -> HashSet<&str> {
        self.rosters
            .iter()
            .flat_map(|r| r.players.iter().map(String::as_str))
            .collect()
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Display name for a user ID, or "Unknown".
    pub fn user_name(&self, user_id: &str) -> String {
        self.user(user_id)
            .map(User::team_display_name)
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
    }

    pub fn roster(&self, roster_id: RosterId) -> Option<&Roster> {
        self.rosters.iter().find(|r| r.roster_id == roster_id)
    }

    /// Owner of a roster, if both the roster and its owner exist.
    pub fn roster_owner(&self, roster_id: RosterId) -> Option<&User> {
        self.roster(roster_id)
            .and_then(|r| r.owner_id.as_deref())
            .and_then(|owner| self.user(owner))
    }

    /// Team name for a roster, or "Unknown".
    pub fn roster_name(&self, roster_id: RosterId) -> String {
        self.roster_owner(roster_id)
            .map(User::team_display_name)
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
    }

    /// The player record for an ID; unknown IDs yield an empty record so
    /// callers render "UNK DEF" / "??" instead of failing.
    pub fn player(&self, player_id: &str) -> Player {
        self.players.get(player_id).cloned().unwrap_or_default()
    }

    pub fn actual_points(&self, player_id: &str) -> f64 {
        points_in(&self.actuals, player_id)
    }

    pub fn projected_points(&self, player_id: &str) -> f64 {
        points_in(&self.projections, player_id)
    }
}

/// PPR points for a player in a stats map; 0.0 when absent.
pub fn points_in(stats: &HashMap<PlayerId, StatLine>, player_id: &str) -> f64 {
    stats.get(player_id).map(StatLine::points).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LeagueSnapshot {
        let mut players = HashMap::new();
        players.insert(
            "100".to_string(),
            Player {
                full_name: Some("Josh Allen".into()),
                position: Some("QB".into()),
                team: Some("BUF".into()),
            },
        );
        let mut actuals = HashMap::new();
        actuals.insert("100".to_string(), StatLine { pts_ppr: Some(25.4) });

        LeagueSnapshot {
            season: "2025".into(),
            week: 3,
            players: Arc::new(players),
            rosters: vec![
                Roster {
                    roster_id: 1,
                    owner_id: Some("u1".into()),
                    players: vec!["100".into(), "200".into()],
                },
                Roster {
                    roster_id: 2,
                    owner_id: Some("ghost".into()),
                    players: vec!["200".into(), "300".into()],
                },
            ],
            users: vec![User {
                user_id: "u1".into(),
                display_name: "allen_fan".into(),
                ..Default::default()
            }],
            actuals,
            ..Default::default()
        }
    }

    #[test]
    fn rostered_ids_is_union() {
        let snap = snapshot();
        let ids = snap.rostered_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("100") && ids.contains("200") && ids.contains("300"));
    }

    #[test]
    fn missing_lookups_degrade() {
        let snap = snapshot();
        assert_eq!(snap.roster_name(1), "allen_fan");
        assert_eq!(snap.roster_name(2), UNKNOWN_TEAM);
        assert_eq!(snap.roster_name(99), UNKNOWN_TEAM);
        assert_eq!(snap.user_name("nobody"), UNKNOWN_TEAM);
        assert_eq!(snap.player("999").display_name(), "UNK DEF");
    }

    #[test]
    fn absent_stats_are_zero_points() {
        let snap = snapshot();
        assert_eq!(snap.actual_points("100"), 25.4);
        assert_eq!(snap.actual_points("200"), 0.0);
        assert_eq!(snap.projected_points("100"), 0.0);
    }
}
