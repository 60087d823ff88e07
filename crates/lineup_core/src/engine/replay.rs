//! Lineup replayer
//!
//! Walks a period's plays from the resolved starters forward. Ordinary plays
//! re-tag the roster; substitution plays swap one player in and one out.
//! Every play emits one row per player on court.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::roster::ActiveRoster;
use crate::error::{DriftKind, LineupError, LineupWarning, Result};
use crate::models::{
    Event, GameId, LineupSnapshot, ParticipationRecord, PeriodInput, PlayEventKind, PlayId,
    PlayerId, SubDirection,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayOutput {
    pub snapshots: Vec<LineupSnapshot>,
    pub warnings: Vec<LineupWarning>,
}

/// Participation rows grouped by play for O(1) substitution lookup.
struct PlayIndex<'a> {
    by_play: FxHashMap<(GameId, PlayId), Vec<&'a ParticipationRecord>>,
}

impl<'a> PlayIndex<'a> {
    fn new(records: &'a [ParticipationRecord]) -> Self {
        let mut by_play: FxHashMap<(GameId, PlayId), Vec<&'a ParticipationRecord>> =
            FxHashMap::default();
        for record in records {
            by_play
                .entry((record.event_id, record.play_id))
                .or_default()
                .push(record);
        }
        Self { by_play }
    }

    /// First record at the play on the given side of the substitution.
    fn sub_player(&self, play: &Event, direction: SubDirection) -> Result<PlayerId> {
        self.by_play
            .get(&(play.event_id, play.play_id))
            .and_then(|records| {
                records
                    .iter()
                    .find(|r| r.sequence == Some(direction.sequence()))
            })
            .map(|r| r.player_id)
            .ok_or(LineupError::MalformedSubstitution {
                event_id: play.event_id,
                play_id: play.play_id,
                missing: direction,
            })
    }
}

/// Plays replayed after the starter block, ascending `play_id`.
///
/// The period start marker is never replayed. Outside period 1 the lineup
/// marker is skipped as well since the starter block already sits on it.
pub fn replay_plays(input: &PeriodInput) -> Vec<&Event> {
    let first_period = input.key.is_first_period();
    let mut plays: Vec<&Event> = input
        .events
        .iter()
        .filter(|e| match e.kind() {
            PlayEventKind::PeriodStart => false,
            PlayEventKind::LineupAnnounced => first_period,
            _ => true,
        })
        .collect();
    plays.sort_by_key(|e| e.play_id);
    plays
}

/// Replays `input` starting from `starters`.
///
/// Fails with [`LineupError::MalformedSubstitution`] on the first
/// substitution play missing its entering or leaving record; nothing is
/// returned for the period in that case.
pub fn replay_period(input: &PeriodInput, starters: &[LineupSnapshot]) -> Result<ReplayOutput> {
    let mut output = ReplayOutput {
        snapshots: starters.to_vec(),
        warnings: Vec::new(),
    };
    if input.is_empty() {
        return Ok(output);
    }

    let index = PlayIndex::new(&input.records);
    let mut roster = ActiveRoster::from_starters(starters);

    for play in replay_plays(input) {
        if play.kind() == PlayEventKind::Substitution {
            let entering = index.sub_player(play, SubDirection::Entering)?;
            let leaving = index.sub_player(play, SubDirection::Leaving)?;
            let outcome = roster.apply_substitution(entering, leaving);

            if !outcome.entered {
                output
                    .warnings
                    .push(drift(play, entering, DriftKind::AlreadyOnCourt));
            }
            if !outcome.left {
                output
                    .warnings
                    .push(drift(play, leaving, DriftKind::NotOnCourt));
            }
        }

        roster.advance_to(play.event_id, play.play_id);
        output.snapshots.extend(roster.snapshot());
    }

    Ok(output)
}

fn drift(play: &Event, player_id: PlayerId, kind: DriftKind) -> LineupWarning {
    let warning = LineupWarning::RosterDrift {
        event_id: play.event_id,
        play_id: play.play_id,
        player_id,
        drift: kind,
    };
    warn!("{}", warning);
    warning
}
