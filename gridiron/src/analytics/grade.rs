// Letter grades against position-specific ceilings.
//
// A player's points are expressed as a percentage of the ceiling for their
// position (the total treated as a 100% week) and bucketed into A+ .. F.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::league::Position;

#[derive(Debug, Error, PartialEq)]
pub enum GradingError {
    #[error("ceiling for {position} must be a positive finite number, got {value}")]
    InvalidCeiling { position: String, value: f64 },
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// Letter grade. Ordered worst to best, so `Grade::APlus > Grade::F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    APlus,
}

/// Slack applied at each boundary so `ceiling * 0.9` lands on A+ despite
/// float rounding in the percentage (e.g. 16.2 / 18 * 100 = 89.99999999999999).
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Inclusive lower bounds (percent of ceiling), best grade first.
const GRADE_THRESHOLDS: &[(f64, Grade)] = &[
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
];

impl Grade {
    /// Map a percentage of ceiling to a grade. NaN falls through to F.
    pub fn from_percent(percent: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(floor, _)| percent >= *floor - BOUNDARY_TOLERANCE)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Academic grade points (A+ is capped at 4.0 like A).
    pub fn points(&self) -> f64 {
        match self {
            Grade::APlus | Grade::A => 4.0,
            Grade::B => 3.0,
            Grade::C => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Ceiling table
// ---------------------------------------------------------------------------

/// Per-position ceilings with a fallback for everything else.
///
/// Construction validates that every ceiling is positive and finite, so the
/// percentage computation never divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CeilingTable {
    by_position: HashMap<Position, f64>,
    default_ceiling: f64,
}

impl CeilingTable {
    pub fn new(
        by_position: HashMap<Position, f64>,
        default_ceiling: f64,
    ) -> Result<Self, GradingError> {
        check_ceiling("default", default_ceiling)?;
        for (pos, &value) in &by_position {
            check_ceiling(pos.display_str(), value)?;
        }
        Ok(CeilingTable {
            by_position,
            default_ceiling,
        })
    }

    /// Ceiling for a position; unknown positions get the default.
    pub fn ceiling(&self, position: Position) -> f64 {
        self.by_position
            .get(&position)
            .copied()
            .unwrap_or(self.default_ceiling)
    }

    pub fn default_ceiling(&self) -> f64 {
        self.default_ceiling
    }
}

impl Default for CeilingTable {
    /// QB 24, RB 18, WR 18, TE 14, K 10, DEF 10, everything else 15.
    fn default() -> Self {
        let by_position = HashMap::from([
            (Position::Quarterback, 24.0),
            (Position::RunningBack, 18.0),
            (Position::WideReceiver, 18.0),
            (Position::TightEnd, 14.0),
            (Position::Kicker, 10.0),
            (Position::Defense, 10.0),
        ]);
        CeilingTable {
            by_position,
            default_ceiling: 15.0,
        }
    }
}

fn check_ceiling(position: &str, value: f64) -> Result<(), GradingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GradingError::InvalidCeiling {
            position: position.to_string(),
            value,
        })
    }
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Points as a percentage of the position's ceiling.
pub fn percent_of_ceiling(points: f64, position: Position, ceilings: &CeilingTable) -> f64 {
    points / ceilings.ceiling(position) * 100.0
}

/// Grade a single week's points for a position.
pub fn grade(points: f64, position: Position, ceilings: &CeilingTable) -> Grade {
    Grade::from_percent(percent_of_ceiling(points, position, ceilings))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
