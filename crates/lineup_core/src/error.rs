use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{GameId, Period, PlayId, PlayerId, SubDirection};

/// Structural failures. A period that raises one of these produces no rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error(
        "Malformed substitution at game {event_id} play {play_id}: no {} record",
        missing_label(*missing)
    )]
    MalformedSubstitution {
        event_id: GameId,
        play_id: PlayId,
        missing: SubDirection,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

fn missing_label(direction: SubDirection) -> &'static str {
    match direction {
        SubDirection::Entering => "entering (sequence=1)",
        SubDirection::Leaving => "leaving (sequence=2)",
    }
}

impl LineupError {
    /// Whether the caller can drop the offending period and keep going.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LineupError::MalformedSubstitution { .. } => true,
            LineupError::InvalidConfig(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;

/// Roster inconsistency seen while applying a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// Entering player was already on court
    AlreadyOnCourt,
    /// Leaving player was not on court
    NotOnCourt,
}

/// Data-quality issues that still allow a best-effort answer.
///
/// 경고는 출력에 함께 실리고 `tracing::warn!` 으로도 기록된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineupWarning {
    IncompleteStarters {
        event_id: GameId,
        period: Period,
        found: usize,
        expected: usize,
    },
    OversizedStarters {
        event_id: GameId,
        period: Period,
        found: usize,
        expected: usize,
        demoted: Vec<PlayerId>,
    },
    MissingLineupMarker {
        event_id: GameId,
        period: Period,
    },
    RosterDrift {
        event_id: GameId,
        play_id: PlayId,
        player_id: PlayerId,
        drift: DriftKind,
    },
    OrphanRecords {
        count: usize,
    },
}

impl std::fmt::Display for LineupWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineupWarning::IncompleteStarters {
                event_id,
                period,
                found,
                expected,
            } => write!(
                f,
                "starting lineup is less than {} ({}) for game {} period {}",
                expected, found, event_id, period
            ),
            LineupWarning::OversizedStarters {
                event_id,
                period,
                found,
                expected,
                demoted,
            } => write!(
                f,
                "starting lineup is greater than {} ({}) for game {} period {}; best guess demoted {:?}",
                expected, found, event_id, period, demoted
            ),
            LineupWarning::MissingLineupMarker { event_id, period } => write!(
                f,
                "no lineup marker for game {} period {}; starters tagged with first play",
                event_id, period
            ),
            LineupWarning::RosterDrift {
                event_id,
                play_id,
                player_id,
                drift,
            } => {
                let what = match drift {
                    DriftKind::AlreadyOnCourt => "entering player already on court",
                    DriftKind::NotOnCourt => "leaving player not on court",
                };
                write!(
                    f,
                    "{} (player {}) at game {} play {}",
                    what, player_id, event_id, play_id
                )
            }
            LineupWarning::OrphanRecords { count } => {
                write!(f, "{} participation records matched no play", count)
            }
        }
    }
}
