//! # Lineup Reconstruction Engine
//!
//! Per (game, period) pipeline:
//!
//! 1. `starters` - who was on court when the period began
//! 2. `replay` - walk the plays, applying substitutions to the roster
//!
//! `best_guess` is only consulted by the resolver when it ends up with too
//! many starters.

pub mod best_guess;
pub mod replay;
pub mod roster;
pub mod starters;

pub use best_guess::{best_guess_starters, count_appearances, pick_demotion};
pub use replay::{replay_period, replay_plays, ReplayOutput};
pub use roster::{ActiveRoster, SubOutcome};
pub use starters::{resolve_starters, StarterLedger, StarterResolution, StarterTag};

use tracing::debug;

use crate::config::LineupConfig;
use crate::error::Result;
use crate::models::{PeriodInput, PeriodLineups};

/// Resolves starters and replays one period.
///
/// Pure: the same input always yields the same output and nothing outlives
/// the call.
pub fn reconstruct_period(input: &PeriodInput, config: &LineupConfig) -> Result<PeriodLineups> {
    config.validate()?;
    if input.is_empty() {
        return Ok(PeriodLineups::empty(input.key));
    }

    let StarterResolution {
        starters,
        mut warnings,
    } = resolve_starters(input, config);
    let replay = replay_period(input, &starters)?;
    warnings.extend(replay.warnings);

    debug!(
        "{}: {} starters, {} rows, {} warnings",
        input.key,
        starters.len(),
        replay.snapshots.len(),
        warnings.len()
    );

    Ok(PeriodLineups {
        key: input.key,
        starters,
        snapshots: replay.snapshots,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ten_from, PeriodBuilder};
    use crate::models::{LineupSnapshot, PeriodKey, PlayerId};

    #[test]
    fn test_first_period_end_to_end() {
        let input = PeriodBuilder::new(12, 1)
            .period_start(&ten_from(1))
            .play(1)
            .sub(11, 1)
            .play(11)
            .build();

        let lineups = reconstruct_period(&input, &LineupConfig::default()).unwrap();
        assert_eq!(lineups.starter_ids(), ten_from(1));
        assert!(lineups.starters.iter().all(|s| s.play_id == 1000));
        assert_eq!(lineups.snapshots.len(), 40);
        assert_eq!(lineups.players_at(1001), ten_from(1));

        let after: Vec<PlayerId> = ten_from(2);
        assert_eq!(lineups.players_at(1002), after);
        assert_eq!(lineups.players_at(1003), after);
    }

    #[test]
    fn test_no_substitutions_period() {
        // 교체가 없는 쿼터: 등장한 10명이 전원 선발
        let mut builder = PeriodBuilder::new(12, 3).period_start(&[]).lineup_marker();
        for player in ten_from(21).into_iter().rev() {
            builder = builder.play(player);
        }
        let input = builder.team_play().build();

        let lineups = reconstruct_period(&input, &LineupConfig::default()).unwrap();
        let mut starters = lineups.starter_ids();
        starters.sort_unstable();
        assert_eq!(starters, ten_from(21));
        for play in input.events.iter().skip(2) {
            assert_eq!(lineups.players_at(play.play_id), ten_from(21));
        }
        assert!(lineups.warnings.is_empty());
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let input = PeriodBuilder::new(12, 2)
            .lineup_marker()
            .play(3)
            .sub(40, 3)
            .sub(41, 9)
            .sub(3, 40)
            .play(1)
            .play(2)
            .play(4)
            .play(5)
            .play(6)
            .play(7)
            .play(8)
            .play(10)
            .build();
        let config = LineupConfig::default();
        let first = reconstruct_period(&input, &config).unwrap();
        let second = reconstruct_period(&input, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.starters.len(), 10);
    }

    #[test]
    fn test_empty_period_is_empty_output() {
        let input = PeriodInput::new(PeriodKey::new(3, 5), Vec::new(), Vec::new());
        let lineups = reconstruct_period(&input, &LineupConfig::default()).unwrap();
        assert_eq!(lineups, PeriodLineups::empty(PeriodKey::new(3, 5)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let input = PeriodBuilder::new(1, 1).period_start(&[1]).build();
        let config = LineupConfig {
            lineup_size: 0,
            ..LineupConfig::default()
        };
        assert!(reconstruct_period(&input, &config).is_err());
    }

    #[test]
    fn test_starter_rows_lead_the_output() {
        let input = PeriodBuilder::new(12, 1)
            .period_start(&ten_from(1))
            .play(4)
            .build();
        let lineups = reconstruct_period(&input, &LineupConfig::default()).unwrap();
        let head: Vec<LineupSnapshot> = lineups.snapshots[..10].to_vec();
        assert_eq!(head, lineups.starters);
    }
}
