use serde::{Deserialize, Serialize};

use super::{Event, GameId, ParticipationRecord, Period, PlayId, PlayerId};
use crate::error::LineupWarning;

/// One active player at one play. A period's output has `lineup_size` of
/// these per distinct play under well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineupSnapshot {
    pub event_id: GameId,
    pub play_id: PlayId,
    pub player_id: PlayerId,
}

impl LineupSnapshot {
    pub fn new(event_id: GameId, play_id: PlayId, player_id: PlayerId) -> Self {
        Self {
            event_id,
            play_id,
            player_id,
        }
    }
}

/// (game, period) 단위 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    pub event_id: GameId,
    pub period: Period,
}

impl PeriodKey {
    pub fn new(event_id: GameId, period: Period) -> Self {
        Self { event_id, period }
    }

    pub fn is_first_period(&self) -> bool {
        self.period == 1
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game {} period {}", self.event_id, self.period)
    }
}

/// Everything the resolver and replayer need for one (game, period).
///
/// Both collections are expected in `play_id` order; the replayer re-sorts
/// events defensively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInput {
    pub key: PeriodKey,
    pub events: Vec<Event>,
    pub records: Vec<ParticipationRecord>,
}

impl PeriodInput {
    pub fn new(key: PeriodKey, events: Vec<Event>, records: Vec<ParticipationRecord>) -> Self {
        Self {
            key,
            events,
            records,
        }
    }

    /// Builds the unit from already-sliced collections. The key comes from the
    /// first event; `None` for an empty period.
    pub fn from_events(events: Vec<Event>, records: Vec<ParticipationRecord>) -> Option<Self> {
        let first = events.first()?;
        let key = PeriodKey::new(first.event_id, first.period);
        Some(Self::new(key, events, records))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Reconstructed lineups for one (game, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLineups {
    pub key: PeriodKey,
    /// Resolved starters, tagged with the lineup marker play
    pub starters: Vec<LineupSnapshot>,
    /// Starter rows first, then one block per replayed play
    pub snapshots: Vec<LineupSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LineupWarning>,
}

impl PeriodLineups {
    pub fn empty(key: PeriodKey) -> Self {
        Self {
            key,
            starters: Vec::new(),
            snapshots: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn starter_ids(&self) -> Vec<PlayerId> {
        self.starters.iter().map(|s| s.player_id).collect()
    }

    /// Players on court at `play_id`, ascending.
    pub fn players_at(&self, play_id: PlayId) -> Vec<PlayerId> {
        self.snapshots
            .iter()
            .filter(|s| s.play_id == play_id)
            .map(|s| s.player_id)
            .collect()
    }
}
