// Typed Sleeper records.
//
// Every optional field carries a documented default so the rest of the crate
// never touches raw JSON. Payloads are validated once, here, at the
// data-source boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Sleeper player IDs are strings ("4046", "KC" for team defenses).
pub type PlayerId = String;

/// Sleeper roster IDs are small integers, unique within a league.
pub type RosterId = u32;

/// Base URL for avatar thumbnails.
pub const AVATAR_THUMB_BASE: &str = "https://sleepercdn.com/avatars/thumbs";

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Football positions the grading engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    /// Any position Sleeper reports that we do not grade specifically
    /// (OL, LB, DB, ...).
    Other,
    /// The player record carried no position at all.
    Unknown,
}

/// Skill positions, in display order. Free agents are drawn from these.
pub const SKILL_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

impl Position {
    /// Parse a Sleeper position abbreviation. Never fails: unrecognized
    /// strings map to `Other`.
    pub fn from_str_pos(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "QB" => Position::Quarterback,
            "RB" => Position::RunningBack,
            "WR" => Position::WideReceiver,
            "TE" => Position::TightEnd,
            "K" => Position::Kicker,
            "DEF" | "DST" => Position::Defense,
            "" => Position::Unknown,
            _ => Position::Other,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::Other => "OTHER",
            Position::Unknown => "??",
        }
    }

    pub fn is_skill(&self) -> bool {
        SKILL_POSITIONS.contains(self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Entry of the `/players/nfl` map. Sleeper sends dozens of fields per
/// player; only the ones the dashboard uses are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Player {
    /// Absent for team defenses.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Raw position abbreviation. `None` renders as "??".
    #[serde(default)]
    pub position: Option<String>,
    /// NFL team abbreviation, `None` for free agents in the real-world sense.
    #[serde(default)]
    pub team: Option<String>,
}

impl Player {
    pub fn position(&self) -> Position {
        self.position
            .as_deref()
            .map(Position::from_str_pos)
            .unwrap_or(Position::Unknown)
    }

    /// Raw position label for display: the Sleeper abbreviation, or "??".
    pub fn position_label(&self) -> String {
        match self.position.as_deref() {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => Position::Unknown.display_str().to_string(),
        }
    }

    /// Full name, or "<team> DEF" for defenses (which have no name).
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("{} DEF", self.team.as_deref().unwrap_or("UNK")),
        }
    }
}

// ---------------------------------------------------------------------------
// Roster / User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: RosterId,
    /// Orphaned rosters have no owner.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Sleeper sends `null` for empty rosters; treated as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: UserMetadata,
}

impl User {
    /// Team name when the owner set one, otherwise the account display name.
    pub fn team_display_name(&self) -> String {
        match self.metadata.team_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => self.display_name.clone(),
        }
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(|a| format!("{AVATAR_THUMB_BASE}/{a}"))
    }
}

// ---------------------------------------------------------------------------
// Weekly data
// ---------------------------------------------------------------------------

/// One player's stat line for a week. Used for both projections and actuals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct StatLine {
    #[serde(default)]
    pub pts_ppr: Option<f64>,
}

impl StatLine {
    /// PPR points, 0.0 when absent or non-finite.
    pub fn points(&self) -> f64 {
        self.pts_ppr.filter(|p| p.is_finite()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchupEntry {
    pub roster_id: RosterId,
    /// `null` on bye weeks and in leagues without head-to-head scheduling.
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
}

impl MatchupEntry {
    pub fn points(&self) -> f64 {
        self.points.filter(|p| p.is_finite()).unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DraftPickMetadata {
    /// Sleeper encodes this as `"true"`, `true`, or omits it.
    #[serde(default, deserialize_with = "loose_bool")]
    pub is_keeper: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DraftPick {
    pub player_id: PlayerId,
    /// User ID of the drafter; empty for auto-picks on orphaned rosters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub picked_by: String,
    pub pick_no: u32,
    pub round: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: DraftPickMetadata,
}

// ---------------------------------------------------------------------------
// League / NFL state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct League {
    pub league_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    /// Missing for leagues that never scheduled a draft.
    #[serde(default)]
    pub draft_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NflState {
    pub week: u32,
    pub season: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_type: String,
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `true`, `"true"`, `"1"`, `"yes"`; everything else (including
/// `null` and unexpected types) is false.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => {
            matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes")
        }
        Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parsing() {
        assert_eq!(Position::from_str_pos("QB"), Position::Quarterback);
        assert_eq!(Position::from_str_pos("wr"), Position::WideReceiver);
        assert_eq!(Position::from_str_pos("DEF"), Position::Defense);
        assert_eq!(Position::from_str_pos("LB"), Position::Other);
        assert_eq!(Position::from_str_pos(""), Position::Unknown);
    }

    #[test]
    fn skill_positions_exclude_other_and_unknown() {
        assert!(Position::Kicker.is_skill());
        assert!(!Position::Other.is_skill());
        assert!(!Position::Unknown.is_skill());
    }

    #[test]
    fn defense_display_name_falls_back_to_team() {
        let def: Player = serde_json::from_str(r#"{"position":"DEF","team":"KC"}"#).unwrap();
        assert_eq!(def.display_name(), "KC DEF");
        assert_eq!(def.position(), Position::Defense);

        let nameless = Player::default();
        assert_eq!(nameless.display_name(), "UNK DEF");
        assert_eq!(nameless.position_label(), "??");
        assert_eq!(nameless.position(), Position::Unknown);
    }

    #[test]
    fn player_ignores_unknown_fields() {
        let json = r#"{
            "full_name": "Patrick Mahomes",
            "position": "QB",
            "team": "KC",
            "age": 29,
            "fantasy_positions": ["QB"],
            "injury_status": null
        }"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.display_name(), "Patrick Mahomes");
        assert_eq!(p.position(), Position::Quarterback);
    }

    #[test]
    fn roster_null_players_is_empty() {
        let r: Roster =
            serde_json::from_str(r#"{"roster_id": 3, "owner_id": "u1", "players": null}"#).unwrap();
        assert!(r.players.is_empty());
        let r: Roster = serde_json::from_str(r#"{"roster_id": 4}"#).unwrap();
        assert!(r.players.is_empty());
        assert!(r.owner_id.is_none());
    }

    #[test]
    fn user_team_name_preferred_over_display_name() {
        let u: User = serde_json::from_str(
            r#"{"user_id":"1","display_name":"dave",
                "metadata":{"team_name":"Gridiron Gang"},"avatar":"abc"}"#,
        )
        .unwrap();
        assert_eq!(u.team_display_name(), "Gridiron Gang");
        assert_eq!(
            u.avatar_url().as_deref(),
            Some("https://sleepercdn.com/avatars/thumbs/abc")
        );

        let u: User =
            serde_json::from_str(r#"{"user_id":"2","display_name":"sam","metadata":null}"#)
                .unwrap();
        assert_eq!(u.team_display_name(), "sam");
        assert!(u.avatar_url().is_none());
    }

    #[test]
    fn stat_line_defaults_to_zero() {
        let s: StatLine = serde_json::from_str(r#"{"pts_half_ppr": 4.0}"#).unwrap();
        assert_eq!(s.points(), 0.0);
        let s: StatLine = serde_json::from_str(r#"{"pts_ppr": 17.5}"#).unwrap();
        assert_eq!(s.points(), 17.5);
    }

    #[test]
    fn keeper_flag_accepts_strings_and_bools() {
        let pick = |meta: &str| -> DraftPick {
            serde_json::from_str(&format!(
                r#"{{"player_id":"1","picked_by":"u","pick_no":1,"round":1,"metadata":{meta}}}"#
            ))
            .unwrap()
        };
        assert!(pick(r#"{"is_keeper":"true"}"#).metadata.is_keeper);
        assert!(pick(r#"{"is_keeper":true}"#).metadata.is_keeper);
        assert!(!pick(r#"{"is_keeper":null}"#).metadata.is_keeper);
        assert!(!pick(r#"{"is_keeper":"false"}"#).metadata.is_keeper);
        assert!(!pick("{}").metadata.is_keeper);
        assert!(!pick("null").metadata.is_keeper);
    }

    #[test]
    fn matchup_entry_null_matchup_id() {
        let m: MatchupEntry =
            serde_json::from_str(r#"{"roster_id":1,"matchup_id":null,"points":null}"#).unwrap();
        assert!(m.matchup_id.is_none());
        assert_eq!(m.points(), 0.0);
    }

    #[test]
    fn draft_pick_null_picked_by_is_empty() {
        let picks: Vec<DraftPick> = serde_json::from_str(
            r#"[{"player_id":"4046","picked_by":null,"pick_no":1,"round":1,"metadata":{}}]"#,
        )
        .unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].picked_by, "");
        assert_eq!(picks[0].pick_no, 1);
    }

    #[test]
    fn user_null_display_name_is_empty() {
        let user: User =
            serde_json::from_str(r#"{"user_id":"u1","display_name":null,"metadata":null}"#)
                .unwrap();
        assert_eq!(user.display_name, "");
    }

    #[test]
    fn league_null_name_is_empty() {
        let league: League =
            serde_json::from_str(r#"{"league_id":"L1","name":null,"season":null}"#).unwrap();
        assert_eq!(league.name, "");
        assert!(league.draft_id.is_none());
    }
}
