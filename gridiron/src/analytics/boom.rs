// Boom/choke classification: how far each rostered player landed from their
// projection this week.

use serde::{Deserialize, Serialize};

use crate::league::{LeagueSnapshot, PlayerId};

/// Thresholds for the boom/choke report.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoomConfig {
    /// A delta strictly beyond +/- this many points is a boom/choke.
    pub threshold: f64,
    /// Players projected at or below this are depth noise and are dropped.
    pub min_projected: f64,
}

impl Default for BoomConfig {
    fn default() -> Self {
        BoomConfig {
            threshold: 7.0,
            min_projected: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoomStatus {
    Booming,
    Choking,
    Neutral,
    /// Projection too low to be meaningful; never shown.
    Excluded,
}

impl BoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BoomStatus::Booming => "BOOMING",
            BoomStatus::Choking => "CHOKING",
            BoomStatus::Neutral => "NORMAL",
            BoomStatus::Excluded => "EXCLUDED",
        }
    }
}

/// Result of classifying one player's week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: BoomStatus,
    /// `actual - projected`, rounded to one decimal.
    pub delta: f64,
}

/// One line of the boom/choke report.
#[derive(Debug, Clone, PartialEq)]
pub struct BoomRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: String,
    pub actual: f64,
    pub projected: f64,
    pub delta: f64,
    pub status: BoomStatus,
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify a player's actual points against their projection.
pub fn classify(actual: f64, projected: f64, config: &BoomConfig) -> Classification {
    let delta = round1(actual - projected);
    if projected <= config.min_projected {
        return Classification {
            status: BoomStatus::Excluded,
            delta,
        };
    }

    let raw = actual - projected;
    let status = if raw > config.threshold {
        BoomStatus::Booming
    } else if raw < -config.threshold {
        BoomStatus::Choking
    } else {
        BoomStatus::Neutral
    };

    Classification { status, delta }
}

/// Build the boom/choke report for every rostered player.
///
/// Excluded players are removed. Rows are sorted by delta descending (booms
/// first, chokes last), player ID ascending on ties.
pub fn boom_report(snapshot: &LeagueSnapshot, config: &BoomConfig) -> Vec<BoomRow> {
    let mut rows: Vec<BoomRow> = snapshot
        .rosters
        .iter()
        .flat_map(|roster| {
            let team_name = snapshot.roster_name(roster.roster_id);
            roster.players.iter().filter_map(move |pid| {
                let actual = snapshot.actual_points(pid);
                let projected = snapshot.projected_points(pid);
                let c = classify(actual, projected, config);
                if c.status == BoomStatus::Excluded {
                    return None;
                }
                Some(BoomRow {
                    player_id: pid.clone(),
                    player_name: snapshot.player(pid).display_name(),
                    team_name: team_name.clone(),
                    actual,
                    projected,
                    delta: c.delta,
                    status: c.status,
                })
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.delta
            .partial_cmp(&a.delta)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::{Player, Roster, StatLine, User};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn classify_boom_choke_neutral() {
        let cfg = BoomConfig::default();
        assert_eq!(classify(20.0, 10.0, &cfg).status, BoomStatus::Booming);
        assert_eq!(classify(2.0, 10.0, &cfg).status, BoomStatus::Choking);
        assert_eq!(classify(15.0, 10.0, &cfg).status, BoomStatus::Neutral);
    }

    #[test]
    fn classify_threshold_is_strict() {
        let cfg = BoomConfig::default();
        assert_eq!(classify(17.0, 10.0, &cfg).status, BoomStatus::Neutral);
        assert_eq!(classify(3.0, 10.0, &cfg).status, BoomStatus::Neutral);
        assert_eq!(classify(17.1, 10.0, &cfg).status, BoomStatus::Booming);
    }

    #[test]
    fn classify_excludes_low_projections() {
        let cfg = BoomConfig::default();
        assert_eq!(classify(2.0, 3.0, &cfg).status, BoomStatus::Excluded);
        // Exactly at the floor is still excluded.
        assert_eq!(classify(30.0, 4.0, &cfg).status, BoomStatus::Excluded);
        assert_ne!(classify(30.0, 4.1, &cfg).status, BoomStatus::Excluded);
    }

    #[test]
    fn classify_rounds_delta() {
        let c = classify(12.37, 5.0, &BoomConfig::default());
        assert_eq!(c.delta, 7.4);
        assert_eq!(c.status, BoomStatus::Booming);
    }

    fn stat(points: f64) -> StatLine {
        StatLine {
            pts_ppr: Some(points),
        }
    }

    #[test]
    fn report_sorted_by_delta_and_drops_excluded() {
        let players: HashMap<String, Player> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    Player {
                        full_name: Some(format!("Player {id}")),
                        position: Some("WR".into()),
                        team: Some("SEA".into()),
                    },
                )
            })
            .collect();
        let projections = HashMap::from([
            ("a".to_string(), stat(10.0)),
            ("b".to_string(), stat(15.0)),
            ("c".to_string(), stat(12.0)),
            ("d".to_string(), stat(2.0)),
        ]);
        let actuals = HashMap::from([
            ("a".to_string(), stat(25.0)),
            ("b".to_string(), stat(3.0)),
            ("c".to_string(), stat(13.0)),
            ("d".to_string(), stat(30.0)),
        ]);
        let snap = LeagueSnapshot {
            players: Arc::new(players),
            rosters: vec![Roster {
                roster_id: 1,
                owner_id: Some("u1".into()),
                players: vec!["b".into(), "a".into(), "c".into(), "d".into()],
            }],
            users: vec![User {
                user_id: "u1".into(),
                display_name: "owner".into(),
                ..Default::default()
            }],
            projections,
            actuals,
            ..Default::default()
        };

        let rows = boom_report(&snap, &BoomConfig::default());
        let ids: Vec<&str> = rows.iter().map(|r| r.player_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert_eq!(rows[0].status, BoomStatus::Booming);
        assert_eq!(rows[1].status, BoomStatus::Neutral);
        assert_eq!(rows[2].status, BoomStatus::Choking);
        assert_eq!(rows[0].team_name, "owner");
        assert_eq!(rows[0].player_name, "Player a");
    }

    #[test]
    fn identical_projection_source_yields_all_neutral() {
        let stats = HashMap::from([("x".to_string(), stat(22.0))]);
        let snap = LeagueSnapshot {
            rosters: vec![Roster {
                roster_id: 1,
                owner_id: None,
                players: vec!["x".into()],
            }],
            projections: stats.clone(),
            actuals: stats,
            projections_mirror_actuals: true,
            ..Default::default()
        };
        let rows = boom_report(&snap, &BoomConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].delta, 0.0);
        assert_eq!(rows[0].status, BoomStatus::Neutral);
        assert_eq!(rows[0].team_name, "Unknown");
    }
}
