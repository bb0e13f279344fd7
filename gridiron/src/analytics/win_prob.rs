// Head-to-head matchups and a points-share win probability.
//
// This is a heuristic, not a statistical model: a side's "probability" is
// its share of the points scored so far, smoothed so that 0-0 is a coin flip.

use std::collections::BTreeMap;

use crate::league::{LeagueSnapshot, RosterId};

/// Smoothing mass split evenly between the two sides.
pub const WIN_PROB_EPSILON: f64 = 0.1;

/// Probability that side A wins, as A's smoothed share of total points.
///
/// `(a + eps/2) / (a + b + eps)`. Symmetric (`p(a, b) + p(b, a) == 1`),
/// exactly 0.5 for equal scores, and strictly inside (0, 1) for
/// non-negative inputs. The plain share `a / (a + b + eps)` is deliberately
/// not used: it reads 0 for both sides of a scoreless matchup.
pub fn win_probability(score_a: f64, score_b: f64) -> f64 {
    let a = score_a.max(0.0);
    let b = score_b.max(0.0);
    (a + WIN_PROB_EPSILON / 2.0) / (a + b + WIN_PROB_EPSILON)
}

/// One side of a matchup.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupSide {
    pub roster_id: RosterId,
    pub team_name: String,
    pub points: f64,
    pub win_probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupRow {
    pub matchup_id: u32,
    pub home: MatchupSide,
    pub away: MatchupSide,
}

impl MatchupRow {
    /// Team name of the side currently ahead, `None` when tied.
    pub fn leader(&self) -> Option<&str> {
        if self.home.points > self.away.points {
            Some(&self.home.team_name)
        } else if self.away.points > self.home.points {
            Some(&self.away.team_name)
        } else {
            None
        }
    }
}

/// Pair matchup entries by `matchup_id` and attach win probabilities.
///
/// Entries with no matchup ID (byes) and groups that do not contain exactly
/// two entries are skipped. Within a pair, the lower roster ID is "home".
/// Rows are ordered by matchup ID.
pub fn matchup_report(snapshot: &LeagueSnapshot) -> Vec<MatchupRow> {
    let mut groups: BTreeMap<u32, Vec<(RosterId, f64)>> = BTreeMap::new();
    for entry in &snapshot.matchups {
        if let Some(mid) = entry.matchup_id {
            groups
                .entry(mid)
                .or_default()
                .push((entry.roster_id, entry.points()));
        }
    }

    groups
        .into_iter()
        .filter_map(|(matchup_id, mut sides)| {
            if sides.len() != 2 {
                tracing::debug!(matchup_id, entries = sides.len(), "skipping unpaired matchup");
                return None;
            }
            sides.sort_by_key(|(rid, _)| *rid);
            let (home_id, home_pts) = sides[0];
            let (away_id, away_pts) = sides[1];
            Some(MatchupRow {
                matchup_id,
                home: MatchupSide {
                    roster_id: home_id,
                    team_name: snapshot.roster_name(home_id),
                    points: home_pts,
                    win_probability: win_probability(home_pts, away_pts),
                },
                away: MatchupSide {
                    roster_id: away_id,
                    team_name: snapshot.roster_name(away_id),
                    points: away_pts,
                    win_probability: win_probability(away_pts, home_pts),
                },
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
