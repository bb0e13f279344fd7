// Team report card: every player on a roster with points and grade, plus the
// team GPA.

use crate::analytics::gpa::{team_gpa, GpaMethod};
use crate::analytics::grade::{grade, CeilingTable, Grade};
use crate::league::{LeagueSnapshot, PlayerId, Position, RosterId};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCardRow {
    pub player_id: PlayerId,
    /// Raw Sleeper position label, "??" when missing.
    pub position_label: String,
    pub position: Position,
    pub player_name: String,
    pub points: f64,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub roster_id: RosterId,
    pub team_name: String,
    pub avatar_url: Option<String>,
    pub gpa: f64,
    /// Sorted by points descending, player ID ascending on ties.
    pub rows: Vec<ReportCardRow>,
}

impl ReportCard {
    /// Sum of row points; 0.0 (not -0.0) for an empty roster.
    pub fn total_points(&self) -> f64 {
        self.rows.iter().fold(0.0, |acc, r| acc + r.points)
    }
}

/// Build the report card for one roster. Returns `None` if the roster ID is
/// not in the snapshot.
pub fn report_card(
    snapshot: &LeagueSnapshot,
    roster_id: RosterId,
    gpa_method: &GpaMethod,
    ceilings: &CeilingTable,
) -> Option<ReportCard> {
    let roster = snapshot.roster(roster_id)?;

    let mut rows: Vec<ReportCardRow> = roster
        .players
        .iter()
        .map(|pid| {
            let player = snapshot.player(pid);
            let position = player.position();
            let points = snapshot.actual_points(pid);
            ReportCardRow {
                player_id: pid.clone(),
                position_label: player.position_label(),
                position,
                player_name: player.display_name(),
                points,
                grade: grade(points, position, ceilings),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let scored: Vec<(f64, Position)> = rows.iter().map(|r| (r.points, r.position)).collect();
    let gpa = team_gpa(&scored, gpa_method, ceilings);

    let owner = snapshot.roster_owner(roster_id);
    Some(ReportCard {
        roster_id,
        team_name: snapshot.roster_name(roster_id),
        avatar_url: owner.and_then(|u| u.avatar_url()),
        gpa,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
