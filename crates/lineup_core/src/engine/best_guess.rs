//! Best-guess starter demotion
//!
//! A player can show up in a period's log without ever taking the floor: a
//! technical foul called on someone sitting on the bench is the classic case.
//! Such a player is never touched by a substitution, so the resolver counts
//! them as having played the whole period and ends up with too many starters.
//!
//! 판단 기준: 교체 기록이 없는 선수 중 기록 등장 횟수가 가장 적은 선수를 제외.

use rustc_hash::FxHashMap;

use super::starters::{StarterLedger, StarterTag};
use crate::config::{LineupConfig, OversizePolicy, TieBreak};
use crate::models::{ParticipationRecord, PlayerId};

/// How many participation rows each player has in the period.
pub fn count_appearances(records: &[ParticipationRecord]) -> FxHashMap<PlayerId, usize> {
    let mut counts = FxHashMap::default();
    for record in records {
        *counts.entry(record.player_id).or_insert(0) += 1;
    }
    counts
}

/// Picks the one starter to demote, or `None` for an empty candidate set.
///
/// Pool is the unaccounted-for candidates (tag `Unknown`); when every
/// candidate was classified by a substitution the whole set is the pool.
pub fn pick_demotion(
    candidates: &[PlayerId],
    ledger: &StarterLedger,
    appearances: &FxHashMap<PlayerId, usize>,
    tie_break: TieBreak,
) -> Option<PlayerId> {
    let unaccounted: Vec<PlayerId> = candidates
        .iter()
        .copied()
        .filter(|&id| ledger.tag(id) == StarterTag::Unknown)
        .collect();
    let pool = if unaccounted.is_empty() {
        candidates
    } else {
        unaccounted.as_slice()
    };

    let count = |id: &PlayerId| appearances.get(id).copied().unwrap_or(0);
    match tie_break {
        TieBreak::LowestPlayerId => pool.iter().copied().min_by_key(|id| (count(id), *id)),
        TieBreak::HighestPlayerId => pool
            .iter()
            .copied()
            .min_by_key(|id| (count(id), std::cmp::Reverse(*id))),
    }
}

/// Trims an oversized starter list. Returns the demoted players in the order
/// they were removed.
pub fn best_guess_starters(
    starters: &mut Vec<PlayerId>,
    ledger: &StarterLedger,
    records: &[ParticipationRecord],
    config: &LineupConfig,
) -> Vec<PlayerId> {
    let appearances = count_appearances(records);
    let mut demoted = Vec::new();

    while starters.len() > config.lineup_size {
        let Some(remove) = pick_demotion(starters, ledger, &appearances, config.tie_break) else {
            break;
        };
        starters.retain(|&id| id != remove);
        demoted.push(remove);

        if config.oversize_policy == OversizePolicy::SingleDemotion {
            break;
        }
    }

    demoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{PeriodBuilder, FOUL_CODE};
    use proptest::prelude::*;

    /// 10 regulars on court all period, plus `bench` fouling once from the bench.
    fn oversized_period(bench: PlayerId) -> crate::models::PeriodInput {
        let mut builder = PeriodBuilder::new(500, 4).period_start(&[]).lineup_marker();
        for player in 1..=10 {
            builder = builder.play(player).play(player);
        }
        builder.coded_play(FOUL_CODE, bench).build()
    }

    #[test]
    fn test_fewest_appearances_is_demoted() {
        let input = oversized_period(42);
        let ledger = StarterLedger::from_records(&input.records);
        let mut starters = ledger.candidate_starters();
        assert_eq!(starters.len(), 11);

        let demoted =
            best_guess_starters(&mut starters, &ledger, &input.records, &LineupConfig::default());
        assert_eq!(demoted, vec![42]);
        assert_eq!(starters, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_tie_break_is_configurable() {
        let mut appearances = FxHashMap::default();
        appearances.insert(7, 1);
        appearances.insert(3, 1);
        appearances.insert(5, 4);
        let ledger = StarterLedger::default();

        let low = pick_demotion(&[7, 3, 5], &ledger, &appearances, TieBreak::LowestPlayerId);
        let high = pick_demotion(&[7, 3, 5], &ledger, &appearances, TieBreak::HighestPlayerId);
        assert_eq!(low, Some(3));
        assert_eq!(high, Some(7));
    }

    #[test]
    fn test_substitution_starters_are_protected() {
        // 12: 교체 아웃 기록으로 선발 확정, 등장 1회
        // 13: 교체 기록 없음, 등장 2회
        let input = PeriodBuilder::new(1, 2)
            .lineup_marker()
            .partial_sub(None, Some(12))
            .play(13)
            .play(13)
            .build();
        let ledger = StarterLedger::from_records(&input.records);
        let appearances = count_appearances(&input.records);

        let pick = pick_demotion(&[12, 13], &ledger, &appearances, TieBreak::LowestPlayerId);
        assert_eq!(pick, Some(13));
    }

    #[test]
    fn test_single_demotion_policy_stops_after_one() {
        let mut builder = PeriodBuilder::new(8, 3).lineup_marker();
        for player in 1..=12 {
            builder = builder.play(player);
        }
        let input = builder.build();
        let ledger = StarterLedger::from_records(&input.records);

        let mut legacy = ledger.candidate_starters();
        let demoted = best_guess_starters(&mut legacy, &ledger, &input.records, &LineupConfig::legacy());
        assert_eq!(demoted, vec![1]);
        assert_eq!(legacy.len(), 11);

        let mut strict = ledger.candidate_starters();
        let demoted = best_guess_starters(&mut strict, &ledger, &input.records, &LineupConfig::strict());
        assert_eq!(demoted, vec![1, 2]);
        assert_eq!(strict.len(), 10);
    }

    #[test]
    fn test_empty_pool_picks_nothing() {
        let ledger = StarterLedger::default();
        assert_eq!(
            pick_demotion(&[], &ledger, &FxHashMap::default(), TieBreak::LowestPlayerId),
            None
        );
    }

    proptest! {
        #[test]
        fn test_strict_minimum_always_dropped(distinct in prop::collection::hash_set(1usize..500, 11)) {
            // 11명, 모두 다른 등장 횟수
            let counts: Vec<usize> = distinct.into_iter().collect();
            let mut builder = PeriodBuilder::new(1, 2).lineup_marker();
            for (idx, &n) in counts.iter().enumerate() {
                for _ in 0..n {
                    builder = builder.play(100 + idx as PlayerId);
                }
            }
            let input = builder.build();
            let ledger = StarterLedger::from_records(&input.records);
            let min_idx = counts
                .iter()
                .enumerate()
                .min_by_key(|&(_, &n)| n)
                .map(|(idx, _)| idx)
                .unwrap();

            let mut first = ledger.candidate_starters();
            let demoted = best_guess_starters(&mut first, &ledger, &input.records, &LineupConfig::default());
            prop_assert_eq!(demoted, vec![100 + min_idx as PlayerId]);

            let mut second = ledger.candidate_starters();
            best_guess_starters(&mut second, &ledger, &input.records, &LineupConfig::default());
            prop_assert_eq!(first, second);
        }
    }
}
