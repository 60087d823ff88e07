//! Lineup Builder Library
//!
//! CSV (play-by-play + player log) → (game, period) 단위 복원 → on-court CSV
//!
//! Owns every file the run touches; `lineup_core` stays I/O-free.

pub mod pbp_csv;

use anyhow::{Context, Result};
use lineup_core::{
    group_periods, lineup_rows, reconstruct_all, resolve_starters, LineupConfig, LineupWarning,
    PeriodKey, PeriodOutcome, ReconstructionSummary,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use pbp_csv::{load_events, load_participation, parse_feed_int, LoadStats};

/// Environment variable holding a config JSON path
pub const CONFIG_PATH_ENV: &str = "LINEUP_CONFIG_PATH";

/// Input/output locations for one on-court run
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub pbp_csv: PathBuf,
    pub players_csv: PathBuf,
    pub out_csv: PathBuf,
}

/// A period dropped from the output because its replay failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPeriod {
    pub event_id: u64,
    pub period: u16,
    pub error: String,
}

/// 실행 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// lineup_core version
    pub core_version: String,
    /// SHA256 체크섬 of the output CSV (hex)
    pub checksum: String,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
    pub rows_written: u64,
    pub events_loaded: LoadStats,
    pub players_loaded: LoadStats,
    pub summary: ReconstructionSummary,
    pub orphan_records: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_periods: Vec<SkippedPeriod>,
}

/// Resolves the run config: explicit path, then `LINEUP_CONFIG_PATH`, then
/// the default.
pub fn load_config(path: Option<&Path>) -> Result<LineupConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match env::var(CONFIG_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
            _ => return Ok(LineupConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = LineupConfig::from_json(&content)
        .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Loads both logs, reconstructs every period and writes the on-court CSV
/// exactly once.
///
/// With `fail_fast` the first malformed period aborts the run before anything
/// is written; otherwise such periods are skipped and listed in the metadata.
pub fn build_on_court(paths: &RunPaths, config: &LineupConfig, fail_fast: bool) -> Result<RunMetadata> {
    // 1. 입력 로드
    let (events, events_loaded) = load_events(&paths.pbp_csv)?;
    let (records, players_loaded) = load_participation(&paths.players_csv)?;
    info!(
        "loaded {} plays and {} player rows",
        events.len(),
        records.len()
    );

    // 2. 경기/쿼터 단위 분할
    let grouped = group_periods(events, records);
    for warning in grouped.warnings() {
        warn!("{}", warning);
    }

    // 3. 복원
    let outcomes = reconstruct_all(&grouped.periods, config);
    let skipped_periods = collect_failures(&outcomes);
    if fail_fast {
        if let Some(first) = skipped_periods.first() {
            anyhow::bail!(
                "Reconstruction failed for game {} period {}: {}",
                first.event_id,
                first.period,
                first.error
            );
        }
    }
    let summary = ReconstructionSummary::from_outcomes(&outcomes);

    // 4. 출력 쓰기
    let rows_written = write_lineups(&paths.out_csv, &outcomes)?;
    let checksum = file_checksum(&paths.out_csv)?;

    Ok(RunMetadata {
        core_version: lineup_core::VERSION.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        rows_written,
        events_loaded,
        players_loaded,
        summary,
        orphan_records: grouped.orphan_records,
        skipped_periods,
    })
}

fn collect_failures(outcomes: &[PeriodOutcome]) -> Vec<SkippedPeriod> {
    outcomes
        .iter()
        .filter_map(|outcome| {
            let err = outcome.result.as_ref().err()?;
            warn!("{} skipped: {}", outcome.key, err);
            Some(SkippedPeriod {
                event_id: outcome.key.event_id,
                period: outcome.key.period,
                error: err.to_string(),
            })
        })
        .collect()
}

/// Writes `event_id,play_id,player_id` rows in produced order.
pub fn write_lineups(out_csv: &Path, outcomes: &[PeriodOutcome]) -> Result<u64> {
    if let Some(parent) = out_csv.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(out_csv)
        .with_context(|| format!("Failed to create output file: {}", out_csv.display()))?;
    let mut rows = 0u64;
    for row in lineup_rows(outcomes) {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", out_csv.display()))?;
        rows += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", out_csv.display()))?;
    Ok(rows)
}

/// SHA256 of a file's bytes, hex encoded.
pub fn file_checksum(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Starting lineup of one period as printed by the `starters` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterReport {
    pub key: PeriodKey,
    pub play_id: Option<u64>,
    pub players: Vec<u64>,
    pub warnings: Vec<LineupWarning>,
}

/// Resolves starters for one game, optionally a single period.
pub fn game_starters(
    pbp_csv: &Path,
    players_csv: &Path,
    game: u64,
    period: Option<u16>,
    config: &LineupConfig,
) -> Result<Vec<StarterReport>> {
    let (events, _) = load_events(pbp_csv)?;
    let (records, _) = load_participation(players_csv)?;

    let events = events.into_iter().filter(|e| e.event_id == game).collect();
    let records = records.into_iter().filter(|r| r.event_id == game).collect();
    let grouped = group_periods(events, records);

    let reports: Vec<StarterReport> = grouped
        .periods
        .iter()
        .filter(|unit| period.map_or(true, |p| unit.key.period == p))
        .map(|unit| {
            let resolution = resolve_starters(unit, config);
            StarterReport {
                key: unit.key,
                play_id: resolution.starters.first().map(|s| s.play_id),
                players: resolution.starters.iter().map(|s| s.player_id).collect(),
                warnings: resolution.warnings,
            }
        })
        .collect();

    if reports.is_empty() {
        anyhow::bail!("No plays found for game {}", game);
    }
    Ok(reports)
}
