// Draft value: how each draft pick is paying off this week.
//
// Early picks playing at D or worse are busts, late picks playing at A or
// better are steals, keepers are tagged as such regardless of output.

use serde::{Deserialize, Serialize};

use crate::analytics::grade::{grade, CeilingTable, Grade};
use crate::league::{LeagueSnapshot, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DraftValueConfig {
    /// Rounds 1..=early_round_max are "early".
    pub early_round_max: u32,
    /// Rounds late_round_min.. are "late".
    pub late_round_min: u32,
}

impl Default for DraftValueConfig {
    fn default() -> Self {
        DraftValueConfig {
            early_round_max: 3,
            late_round_min: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftVerdict {
    Keeper,
    Steal,
    Bust,
    Fair,
}

impl DraftVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            DraftVerdict::Keeper => "KEEPER",
            DraftVerdict::Steal => "STEAL",
            DraftVerdict::Bust => "BUST",
            DraftVerdict::Fair => "FAIR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftValueRow {
    pub pick_no: u32,
    pub round: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub drafted_by: String,
    pub points: f64,
    pub grade: Grade,
    pub verdict: DraftVerdict,
}

/// Classify one pick from its round, keeper flag, and this week's grade.
pub fn classify_pick(
    round: u32,
    is_keeper: bool,
    week_grade: Grade,
    config: &DraftValueConfig,
) -> DraftVerdict {
    if is_keeper {
        DraftVerdict::Keeper
    } else if round <= config.early_round_max && week_grade <= Grade::D {
        DraftVerdict::Bust
    } else if round >= config.late_round_min && week_grade >= Grade::A {
        DraftVerdict::Steal
    } else {
        DraftVerdict::Fair
    }
}

/// Evaluate every draft pick in the snapshot, ordered by pick number.
pub fn draft_report(
    snapshot: &LeagueSnapshot,
    config: &DraftValueConfig,
    ceilings: &CeilingTable,
) -> Vec<DraftValueRow> {
    let mut rows: Vec<DraftValueRow> = snapshot
        .draft_picks
        .iter()
        .map(|pick| {
            let player = snapshot.player(&pick.player_id);
            let points = snapshot.actual_points(&pick.player_id);
            let week_grade = grade(points, player.position(), ceilings);
            DraftValueRow {
                pick_no: pick.pick_no,
                round: pick.round,
                player_id: pick.player_id.clone(),
                player_name: player.display_name(),
                drafted_by: snapshot.user_name(&pick.picked_by),
                points,
                grade: week_grade,
                verdict: classify_pick(pick.round, pick.metadata.is_keeper, week_grade, config),
            }
        })
        .collect();

    rows.sort_by_key(|r| r.pick_no);
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
