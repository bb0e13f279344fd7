// Free-agent ranking: the best unrostered players at a position this week.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analytics::grade::{grade, CeilingTable, Grade};
use crate::league::{points_in, Player, PlayerId, Position, StatLine, SKILL_POSITIONS};

/// Filters for the free-agent tables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FreeAgentConfig {
    /// Players must score strictly more than this to be listed.
    pub min_points: f64,
    /// Maximum rows per position.
    pub limit: usize,
    /// Positions to build tables for, in tab order.
    pub positions: Vec<Position>,
}

impl Default for FreeAgentConfig {
    fn default() -> Self {
        FreeAgentConfig {
            min_points: 0.5,
            limit: 10,
            positions: SKILL_POSITIONS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeAgentRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub team: String,
    pub points: f64,
    pub grade: Grade,
}

/// Rank unrostered players at `position` by points.
///
/// Keeps players whose position matches, who are not in `rostered_ids`, and
/// who scored more than `min_points`. Sorted by points descending with player
/// ID ascending as the tiebreak, then truncated to `limit`.
pub fn rank_free_agents(
    players: &HashMap<PlayerId, Player>,
    rostered_ids: &HashSet<&str>,
    stats: &HashMap<PlayerId, StatLine>,
    position: Position,
    min_points: f64,
    limit: usize,
    ceilings: &CeilingTable,
) -> Vec<FreeAgentRow> {
    let mut rows: Vec<FreeAgentRow> = players
        .iter()
        .filter(|(id, p)| p.position() == position && !rostered_ids.contains(id.as_str()))
        .filter_map(|(id, p)| {
            let points = points_in(stats, id);
            if points <= min_points {
                return None;
            }
            Some(FreeAgentRow {
                player_id: id.clone(),
                player_name: p.display_name(),
                position,
                team: p.team.clone().unwrap_or_else(|| "FA".to_string()),
                points,
                grade: grade(points, position, ceilings),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    rows.truncate(limit);
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
