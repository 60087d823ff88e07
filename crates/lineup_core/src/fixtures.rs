//! Test helpers: build a period's play-by-play the way the feed lays it out.

use crate::models::{
    Event, GameId, ParticipationRecord, Period, PeriodInput, PeriodKey, PlayId, PlayEventKind,
    PlayerId,
};

/// Ordinary play code used by the fixtures (a made shot in the feed).
pub const SHOT_CODE: u16 = 3;
/// Personal foul
pub const FOUL_CODE: u16 = 6;

pub struct PeriodBuilder {
    key: PeriodKey,
    next_play: PlayId,
    events: Vec<Event>,
    records: Vec<ParticipationRecord>,
}

impl PeriodBuilder {
    pub fn new(event_id: GameId, period: Period) -> Self {
        Self {
            key: PeriodKey::new(event_id, period),
            next_play: PlayId::from(period) * 1000,
            events: Vec::new(),
            records: Vec::new(),
        }
    }

    fn push_event(&mut self, code: u16) -> PlayId {
        let play_id = self.next_play;
        self.next_play += 1;
        self.events
            .push(Event::new(self.key.event_id, play_id, self.key.period, code));
        play_id
    }

    fn push_record(&mut self, play_id: PlayId, player_id: PlayerId, code: u16, sequence: Option<u8>) {
        self.records.push(ParticipationRecord {
            event_id: self.key.event_id,
            play_id,
            player_id,
            play_event_id: code,
            sequence,
        });
    }

    /// Period start marker with one record per listed player (period 1 style).
    pub fn period_start(mut self, players: &[PlayerId]) -> Self {
        let play_id = self.push_event(PlayEventKind::PERIOD_START_CODE);
        for &player in players {
            self.push_record(play_id, player, PlayEventKind::PERIOD_START_CODE, None);
        }
        self
    }

    pub fn lineup_marker(mut self) -> Self {
        self.push_event(PlayEventKind::LINEUP_ANNOUNCED_CODE);
        self
    }

    pub fn play(self, player_id: PlayerId) -> Self {
        self.coded_play(SHOT_CODE, player_id)
    }

    pub fn coded_play(mut self, code: u16, player_id: PlayerId) -> Self {
        let play_id = self.push_event(code);
        self.push_record(play_id, player_id, code, None);
        self
    }

    /// Play with no player attached (timeouts, team rebounds).
    pub fn team_play(mut self) -> Self {
        self.push_event(SHOT_CODE);
        self
    }

    pub fn sub(self, entering: PlayerId, leaving: PlayerId) -> Self {
        self.partial_sub(Some(entering), Some(leaving))
    }

    pub fn partial_sub(mut self, entering: Option<PlayerId>, leaving: Option<PlayerId>) -> Self {
        let code = PlayEventKind::SUBSTITUTION_CODE;
        let play_id = self.push_event(code);
        if let Some(player) = entering {
            self.push_record(play_id, player, code, Some(1));
        }
        if let Some(player) = leaving {
            self.push_record(play_id, player, code, Some(2));
        }
        self
    }

    /// play_id the next pushed event will get
    pub fn next_play_id(&self) -> PlayId {
        self.next_play
    }

    pub fn build(self) -> PeriodInput {
        PeriodInput::new(self.key, self.events, self.records)
    }
}

/// Ten ids starting at `first`.
pub fn ten_from(first: PlayerId) -> Vec<PlayerId> {
    (first..first + 10).collect()
}
