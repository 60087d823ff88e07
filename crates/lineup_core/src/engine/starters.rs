//! Starting-lineup resolver
//!
//! ## Period 1
//! The feed carries an explicit period-start record per starter
//! (`play_event_id == 0`). That set is authoritative.
//!
//! ## Later periods
//! No marker exists, so starters are inferred from substitution order:
//!
//! ```text
//! first substitution touching a player
//!   ├─ sequence=1 (entering) → was on the bench → NonStarter
//!   └─ sequence=2 (leaving)  → was on court     → Starter
//! never touched by a substitution → played the whole period → Starter
//! ```
//!
//! Only the first substitution per player counts; later ones are skipped.
//! A substitution record without a usable `sequence` still takes the player
//! out of the untouched pool (`Excluded`) without deciding a side.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::best_guess::best_guess_starters;
use crate::config::{LineupConfig, OversizePolicy};
use crate::error::LineupWarning;
use crate::models::{
    Event, LineupSnapshot, ParticipationRecord, PeriodInput, PlayEventKind, PlayerId, SubDirection,
};

/// Per-player classification. `Starter`/`NonStarter` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarterTag {
    #[default]
    Unknown,
    /// Touched by a substitution record with no entering/leaving side
    Excluded,
    Starter,
    NonStarter,
}

impl StarterTag {
    pub fn is_classified(self) -> bool {
        matches!(self, StarterTag::Starter | StarterTag::NonStarter)
    }
}

/// Classification state for every player seen in one period.
#[derive(Debug, Clone, Default)]
pub struct StarterLedger {
    tags: FxHashMap<PlayerId, StarterTag>,
    /// distinct players, first-appearance order
    appearance_order: Vec<PlayerId>,
    /// players in the order a substitution classified them
    classified_order: Vec<PlayerId>,
}

impl StarterLedger {
    /// Registers every player in `records`, then walks the substitution
    /// records in play order and classifies each player on first touch.
    pub fn from_records(records: &[ParticipationRecord]) -> Self {
        let mut ledger = Self::default();
        for record in records {
            if !ledger.tags.contains_key(&record.player_id) {
                ledger.tags.insert(record.player_id, StarterTag::Unknown);
                ledger.appearance_order.push(record.player_id);
            }
        }

        let mut subs: Vec<&ParticipationRecord> = records
            .iter()
            .filter(|r| r.kind() == PlayEventKind::Substitution)
            .collect();
        subs.sort_by_key(|r| r.play_id);

        for record in subs {
            match record.sub_direction() {
                Some(direction) => {
                    ledger.classify(record.player_id, direction);
                }
                None => ledger.exclude(record.player_id),
            }
        }
        ledger
    }

    /// Returns false when the player was already classified.
    pub fn classify(&mut self, player_id: PlayerId, direction: SubDirection) -> bool {
        if self.tag(player_id).is_classified() {
            return false;
        }
        if !self.tags.contains_key(&player_id) {
            self.appearance_order.push(player_id);
        }
        let tag = match direction {
            SubDirection::Entering => StarterTag::NonStarter,
            SubDirection::Leaving => StarterTag::Starter,
        };
        self.tags.insert(player_id, tag);
        self.classified_order.push(player_id);
        true
    }

    /// Drops an untouched player from the full-period pool. Classified
    /// players keep their tag.
    pub fn exclude(&mut self, player_id: PlayerId) {
        match self.tag(player_id) {
            StarterTag::Unknown => {
                if !self.tags.contains_key(&player_id) {
                    self.appearance_order.push(player_id);
                }
                self.tags.insert(player_id, StarterTag::Excluded);
            }
            StarterTag::Excluded | StarterTag::Starter | StarterTag::NonStarter => {}
        }
    }

    pub fn tag(&self, player_id: PlayerId) -> StarterTag {
        self.tags.get(&player_id).copied().unwrap_or_default()
    }

    /// Players never touched by a substitution, first-appearance order.
    pub fn unaccounted(&self) -> Vec<PlayerId> {
        self.appearance_order
            .iter()
            .copied()
            .filter(|&id| self.tag(id) == StarterTag::Unknown)
            .collect()
    }

    pub fn non_starters(&self) -> Vec<PlayerId> {
        self.classified_order
            .iter()
            .copied()
            .filter(|&id| self.tag(id) == StarterTag::NonStarter)
            .collect()
    }

    /// Starters confirmed by a substitution exit, classification order.
    pub fn confirmed_starters(&self) -> Vec<PlayerId> {
        self.classified_order
            .iter()
            .copied()
            .filter(|&id| self.tag(id) == StarterTag::Starter)
            .collect()
    }

    /// Substitution-confirmed starters followed by the unaccounted players.
    pub fn candidate_starters(&self) -> Vec<PlayerId> {
        let mut starters = self.confirmed_starters();
        starters.extend(self.unaccounted());
        starters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarterResolution {
    pub starters: Vec<LineupSnapshot>,
    pub warnings: Vec<LineupWarning>,
}

/// Resolves who was on court at the start of `input`'s period.
///
/// Empty periods resolve to an empty lineup without warnings.
pub fn resolve_starters(input: &PeriodInput, config: &LineupConfig) -> StarterResolution {
    if input.is_empty() {
        return StarterResolution::default();
    }

    if input.key.is_first_period() {
        resolve_first_period(input, config)
    } else {
        resolve_from_substitutions(input, config)
    }
}

fn resolve_first_period(input: &PeriodInput, config: &LineupConfig) -> StarterResolution {
    let starters: Vec<LineupSnapshot> = input
        .records
        .iter()
        .filter(|r| r.kind() == PlayEventKind::PeriodStart)
        .map(|r| LineupSnapshot::new(r.event_id, r.play_id, r.player_id))
        .collect();

    let mut warnings = Vec::new();
    if starters.len() < config.lineup_size {
        let warning = LineupWarning::IncompleteStarters {
            event_id: input.key.event_id,
            period: input.key.period,
            found: starters.len(),
            expected: config.lineup_size,
        };
        warn!("{}", warning);
        warnings.push(warning);
    } else if starters.len() > config.lineup_size {
        // 1쿼터 마커는 그대로 사용 (보정하지 않음)
        let warning = LineupWarning::OversizedStarters {
            event_id: input.key.event_id,
            period: input.key.period,
            found: starters.len(),
            expected: config.lineup_size,
            demoted: Vec::new(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    StarterResolution { starters, warnings }
}

fn resolve_from_substitutions(input: &PeriodInput, config: &LineupConfig) -> StarterResolution {
    let key = input.key;
    let ledger = StarterLedger::from_records(&input.records);
    let confirmed = ledger.confirmed_starters();
    // single_demotion: 교체 기록만으로 정원이 차면 미분류 선수는 추가하지 않음
    let mut starters = if config.oversize_policy == OversizePolicy::SingleDemotion
        && confirmed.len() == config.lineup_size
    {
        confirmed
    } else {
        ledger.candidate_starters()
    };
    let mut warnings = Vec::new();

    let found = starters.len();
    if found > config.lineup_size {
        let demoted = best_guess_starters(&mut starters, &ledger, &input.records, config);
        let warning = LineupWarning::OversizedStarters {
            event_id: key.event_id,
            period: key.period,
            found,
            expected: config.lineup_size,
            demoted,
        };
        warn!("{}", warning);
        warnings.push(warning);
    } else if found < config.lineup_size {
        let warning = LineupWarning::IncompleteStarters {
            event_id: key.event_id,
            period: key.period,
            found,
            expected: config.lineup_size,
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    let tag = match lineup_marker(&input.events) {
        Some(marker) => marker,
        None => {
            let warning = LineupWarning::MissingLineupMarker {
                event_id: key.event_id,
                period: key.period,
            };
            warn!("{}", warning);
            warnings.push(warning);
            // non-empty: checked by resolve_starters
            &input.events[0]
        }
    };

    let starters = starters
        .into_iter()
        .map(|player_id| LineupSnapshot::new(tag.event_id, tag.play_id, player_id))
        .collect();

    StarterResolution { starters, warnings }
}

fn lineup_marker(events: &[Event]) -> Option<&Event> {
    events
        .iter()
        .find(|e| e.kind() == PlayEventKind::LineupAnnounced)
}
