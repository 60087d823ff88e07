//! Play-by-play CSV loader
//!
//! Two header-based files:
//! - general log: `event_id, play_id, period, play_event_id`
//! - player log: `event_id, play_id, player_id, play_event_id, sequence`
//!
//! Extra columns are ignored. Integer columns accept spreadsheet-style floats
//! (`"12.0"`) since most feeds pass through Excel at some point. Rows that
//! fail to parse are counted and skipped, not fatal.

use anyhow::{Context, Result};
use lineup_core::{Event, ParticipationRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    /// Player-log rows with an empty `player_id` (team plays)
    pub missing_player: u32,
}

#[derive(Debug, Deserialize)]
struct RawEventRow {
    event_id: String,
    play_id: String,
    period: String,
    play_event_id: String,
}

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    event_id: String,
    play_id: String,
    #[serde(default)]
    player_id: String,
    play_event_id: String,
    #[serde(default)]
    sequence: String,
}

/// Parses an integer cell. `Ok(None)` for an empty cell.
pub fn parse_feed_int(raw: &str) -> std::result::Result<Option<u64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(Some(value));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 => {
            Ok(Some(value as u64))
        }
        _ => Err(format!("'{}' is not a non-negative integer", trimmed)),
    }
}

fn required(raw: &str, column: &str) -> std::result::Result<u64, String> {
    parse_feed_int(raw)?.ok_or_else(|| format!("{} is empty", column))
}

fn narrow<T: TryFrom<u64>>(value: u64, column: &str) -> std::result::Result<T, String> {
    T::try_from(value).map_err(|_| format!("{} value {} out of range", column, value))
}

impl RawEventRow {
    fn into_event(self) -> std::result::Result<Event, String> {
        Ok(Event {
            event_id: required(&self.event_id, "event_id")?,
            play_id: required(&self.play_id, "play_id")?,
            period: narrow(required(&self.period, "period")?, "period")?,
            play_event_id: narrow(required(&self.play_event_id, "play_event_id")?, "play_event_id")?,
        })
    }
}

impl RawPlayerRow {
    /// `Ok(None)` when the row has no player attached.
    fn into_record(self) -> std::result::Result<Option<ParticipationRecord>, String> {
        let Some(player_id) = parse_feed_int(&self.player_id)? else {
            return Ok(None);
        };
        let sequence = match parse_feed_int(&self.sequence)? {
            Some(value) => Some(narrow(value, "sequence")?),
            None => None,
        };
        Ok(Some(ParticipationRecord {
            event_id: required(&self.event_id, "event_id")?,
            play_id: required(&self.play_id, "play_id")?,
            player_id,
            play_event_id: narrow(required(&self.play_event_id, "play_event_id")?, "play_event_id")?,
            sequence,
        }))
    }
}

/// Loads the general log, sorted by `(event_id, play_id)`.
pub fn load_events(csv_path: &Path) -> Result<(Vec<Event>, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut events = Vec::new();
    let mut stats = LoadStats::default();

    for (row, result) in reader.deserialize::<RawEventRow>().enumerate() {
        stats.total_rows += 1;
        // header = line 1
        let line = row + 2;
        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(RawEventRow::into_event);
        match parsed {
            Ok(event) => {
                events.push(event);
                stats.parsed += 1;
            }
            Err(reason) => {
                stats.failed += 1;
                warn!("{}: line {} skipped - {}", csv_path.display(), line, reason);
            }
        }
    }

    events.sort_by_key(|e| (e.event_id, e.play_id));
    Ok((events, stats))
}

/// Loads the player log, sorted by `(event_id, play_id)`. Rows without a
/// player are dropped.
pub fn load_participation(csv_path: &Path) -> Result<(Vec<ParticipationRecord>, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for (row, result) in reader.deserialize::<RawPlayerRow>().enumerate() {
        stats.total_rows += 1;
        let line = row + 2;
        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(RawPlayerRow::into_record);
        match parsed {
            Ok(Some(record)) => {
                records.push(record);
                stats.parsed += 1;
            }
            Ok(None) => stats.missing_player += 1,
            Err(reason) => {
                stats.failed += 1;
                warn!("{}: line {} skipped - {}", csv_path.display(), line, reason);
            }
        }
    }

    records.sort_by_key(|r| (r.event_id, r.play_id));
    Ok((records, stats))
}
