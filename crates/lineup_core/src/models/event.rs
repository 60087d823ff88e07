use serde::{Deserialize, Serialize};

use super::{GameId, Period, PlayId, PlayerId};

/// `play_event_id` 코드 분류
///
/// Only three codes carry meaning for lineup tracking; everything else is an
/// ordinary play that leaves the roster untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayEventKind {
    /// `0` - period start marker (period 1 starters hang off this)
    PeriodStart,
    /// `10`
    Substitution,
    /// `14` - starting lineup announced
    LineupAnnounced,
    Other(u16),
}

impl PlayEventKind {
    pub const PERIOD_START_CODE: u16 = 0;
    pub const SUBSTITUTION_CODE: u16 = 10;
    pub const LINEUP_ANNOUNCED_CODE: u16 = 14;

    pub fn code(self) -> u16 {
        match self {
            PlayEventKind::PeriodStart => Self::PERIOD_START_CODE,
            PlayEventKind::Substitution => Self::SUBSTITUTION_CODE,
            PlayEventKind::LineupAnnounced => Self::LINEUP_ANNOUNCED_CODE,
            PlayEventKind::Other(code) => code,
        }
    }
}

impl From<u16> for PlayEventKind {
    fn from(code: u16) -> Self {
        match code {
            Self::PERIOD_START_CODE => PlayEventKind::PeriodStart,
            Self::SUBSTITUTION_CODE => PlayEventKind::Substitution,
            Self::LINEUP_ANNOUNCED_CODE => PlayEventKind::LineupAnnounced,
            other => PlayEventKind::Other(other),
        }
    }
}

/// Which side of a substitution a participation record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubDirection {
    /// `sequence == 1`
    Entering,
    /// `sequence == 2`
    Leaving,
}

impl SubDirection {
    pub fn from_sequence(sequence: u8) -> Option<Self> {
        match sequence {
            1 => Some(SubDirection::Entering),
            2 => Some(SubDirection::Leaving),
            _ => None,
        }
    }

    pub fn sequence(self) -> u8 {
        match self {
            SubDirection::Entering => 1,
            SubDirection::Leaving => 2,
        }
    }
}

/// One row of the general play-by-play log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: GameId,
    pub play_id: PlayId,
    pub period: Period,
    pub play_event_id: u16,
}

impl Event {
    pub fn new(event_id: GameId, play_id: PlayId, period: Period, play_event_id: u16) -> Self {
        Self {
            event_id,
            play_id,
            period,
            play_event_id,
        }
    }

    pub fn kind(&self) -> PlayEventKind {
        PlayEventKind::from(self.play_event_id)
    }
}

/// One row of the player-indexed log.
///
/// A substitution play produces two of these at the same `(event_id, play_id)`:
/// one with `sequence == 1` (entering) and one with `sequence == 2` (leaving).
/// `sequence` is ignored for every other kind of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub event_id: GameId,
    pub play_id: PlayId,
    pub player_id: PlayerId,
    pub play_event_id: u16,
    #[serde(default)]
    pub sequence: Option<u8>,
}

impl ParticipationRecord {
    pub fn kind(&self) -> PlayEventKind {
        PlayEventKind::from(self.play_event_id)
    }

    /// Entering/leaving side, only for substitution records.
    pub fn sub_direction(&self) -> Option<SubDirection> {
        if self.kind() != PlayEventKind::Substitution {
            return None;
        }
        self.sequence.and_then(SubDirection::from_sequence)
    }

    pub fn is_at(&self, event_id: GameId, play_id: PlayId) -> bool {
        self.event_id == event_id && self.play_id == play_id
    }
}
