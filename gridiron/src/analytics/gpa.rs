// Team GPA: a roster's week collapsed onto a 0.0-4.0 scale.

use serde::{Deserialize, Serialize};

use crate::analytics::grade::CeilingTable;
use crate::league::Position;

/// Upper bound of the GPA scale.
pub const MAX_GPA: f64 = 4.0;

/// How individual scores are combined into a GPA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GpaMethod {
    /// mean(points) / divisor * 4.0
    RawPoints { divisor: f64 },
    /// mean(points / ceiling(position)) * 4.0
    CeilingPercent,
}

impl Default for GpaMethod {
    fn default() -> Self {
        GpaMethod::RawPoints { divisor: 14.0 }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute a team GPA from `(points, position)` pairs.
///
/// Empty rosters score 0.0. The result is capped at 4.0 but not floored, so
/// negative weeks (possible for defenses and kickers) produce a negative GPA.
pub fn team_gpa(players: &[(f64, Position)], method: &GpaMethod, ceilings: &CeilingTable) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let n = players.len() as f64;

    let raw = match method {
        GpaMethod::RawPoints { divisor } => {
            let mean = players.iter().map(|(pts, _)| pts).sum::<f64>() / n;
            mean / divisor * MAX_GPA
        }
        GpaMethod::CeilingPercent => {
            let mean = players
                .iter()
                .map(|&(pts, pos)| pts / ceilings.ceiling(pos))
                .sum::<f64>()
                / n;
            mean * MAX_GPA
        }
    };

    round2(raw.min(MAX_GPA))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
