//! Game log → (game, period) units → lineups
//!
//! Grouping and batch execution around the per-period engine. Units share no
//! state, so the batch runs them on the rayon pool and keeps input order in
//! the result.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LineupConfig;
use crate::engine::reconstruct_period;
use crate::error::{LineupError, LineupWarning};
use crate::models::{
    Event, GameId, LineupSnapshot, ParticipationRecord, PeriodInput, PeriodKey, PeriodLineups,
    PlayId,
};

/// A full log split into independent units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedLog {
    /// Ascending by (event_id, period)
    pub periods: Vec<PeriodInput>,
    /// Participation rows whose play is not in the event log
    pub orphan_records: usize,
}

impl GroupedLog {
    pub fn warnings(&self) -> Vec<LineupWarning> {
        if self.orphan_records == 0 {
            Vec::new()
        } else {
            vec![LineupWarning::OrphanRecords {
                count: self.orphan_records,
            }]
        }
    }

    pub fn game_count(&self) -> usize {
        self.periods
            .iter()
            .map(|p| p.key.event_id)
            .collect::<FxHashSet<_>>()
            .len()
    }
}

/// Splits a whole log into (game, period) units.
///
/// Events carry the period; a participation row joins the unit of the event
/// at the same `(event_id, play_id)`. Both collections end up sorted by
/// `play_id` inside each unit.
pub fn group_periods(events: Vec<Event>, records: Vec<ParticipationRecord>) -> GroupedLog {
    let mut units: BTreeMap<PeriodKey, PeriodInput> = BTreeMap::new();
    let mut play_to_unit: FxHashMap<(GameId, PlayId), PeriodKey> = FxHashMap::default();

    for event in events {
        let key = PeriodKey::new(event.event_id, event.period);
        play_to_unit.insert((event.event_id, event.play_id), key);
        units
            .entry(key)
            .or_insert_with(|| PeriodInput::new(key, Vec::new(), Vec::new()))
            .events
            .push(event);
    }

    let mut orphan_records = 0;
    for record in records {
        match play_to_unit
            .get(&(record.event_id, record.play_id))
            .and_then(|key| units.get_mut(key))
        {
            Some(unit) => unit.records.push(record),
            None => orphan_records += 1,
        }
    }

    if orphan_records > 0 {
        warn!(
            "{} participation records matched no play and were dropped",
            orphan_records
        );
    }

    let periods = units
        .into_values()
        .map(|mut unit| {
            unit.events.sort_by_key(|e| e.play_id);
            unit.records.sort_by_key(|r| r.play_id);
            unit
        })
        .collect();

    GroupedLog {
        periods,
        orphan_records,
    }
}

/// Result for one unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodOutcome {
    pub key: PeriodKey,
    pub result: Result<PeriodLineups, LineupError>,
}

impl PeriodOutcome {
    pub fn lineups(&self) -> Option<&PeriodLineups> {
        self.result.as_ref().ok()
    }
}

/// Reconstructs every unit independently, in parallel. Output order matches
/// `units`.
pub fn reconstruct_all(units: &[PeriodInput], config: &LineupConfig) -> Vec<PeriodOutcome> {
    units
        .par_iter()
        .map(|unit| PeriodOutcome {
            key: unit.key,
            result: reconstruct_period(unit, config),
        })
        .collect()
}

/// Rows of every successful unit, in unit order.
pub fn lineup_rows(outcomes: &[PeriodOutcome]) -> impl Iterator<Item = &LineupSnapshot> {
    outcomes
        .iter()
        .filter_map(PeriodOutcome::lineups)
        .flat_map(|lineups| lineups.snapshots.iter())
}

/// 배치 실행 요약
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionSummary {
    pub games: usize,
    pub periods: usize,
    pub periods_failed: usize,
    pub rows: usize,
    pub warnings: usize,
}

impl ReconstructionSummary {
    pub fn from_outcomes(outcomes: &[PeriodOutcome]) -> Self {
        let games = outcomes
            .iter()
            .map(|o| o.key.event_id)
            .collect::<FxHashSet<_>>()
            .len();
        let mut summary = Self {
            games,
            periods: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(lineups) => {
                    summary.rows += lineups.snapshots.len();
                    summary.warnings += lineups.warnings.len();
                }
                Err(_) => summary.periods_failed += 1,
            }
        }
        info!(
            "reconstructed {} periods across {} games ({} failed, {} rows)",
            summary.periods, summary.games, summary.periods_failed, summary.rows
        );
        summary
    }
}
