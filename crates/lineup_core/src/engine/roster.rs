//! Active roster - 현재 코트 위 선수 집합
//!
//! Set-backed so entering/leaving are O(1) and a player can never be on
//! court twice. The roster also remembers which play it currently describes.

use rustc_hash::FxHashSet;

use crate::models::{GameId, LineupSnapshot, PlayId, PlayerId};

/// What actually changed when a substitution was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubOutcome {
    /// false when the entering player was already on court
    pub entered: bool,
    /// false when the leaving player was not on court
    pub left: bool,
}

impl SubOutcome {
    pub fn is_clean(&self) -> bool {
        self.entered && self.left
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoster {
    players: FxHashSet<PlayerId>,
    event_id: GameId,
    play_id: PlayId,
}

impl ActiveRoster {
    /// Seeds the roster from resolved starters. Tag comes from the first
    /// starter row; an empty lineup starts at play 0.
    pub fn from_starters(starters: &[LineupSnapshot]) -> Self {
        let (event_id, play_id) = starters
            .first()
            .map(|s| (s.event_id, s.play_id))
            .unwrap_or((0, 0));
        Self {
            players: starters.iter().map(|s| s.player_id).collect(),
            event_id,
            play_id,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.contains(&player_id)
    }

    pub fn play_id(&self) -> PlayId {
        self.play_id
    }

    /// Re-tag the roster for a play that did not change who is on court.
    pub fn advance_to(&mut self, event_id: GameId, play_id: PlayId) {
        self.event_id = event_id;
        self.play_id = play_id;
    }

    /// 교체 적용: entering 추가 후 leaving 제거
    pub fn apply_substitution(&mut self, entering: PlayerId, leaving: PlayerId) -> SubOutcome {
        let entered = self.players.insert(entering);
        let left = self.players.remove(&leaving);
        SubOutcome { entered, left }
    }

    /// Player ids on court, ascending.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.players.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// One row per player at the roster's current play.
    pub fn snapshot(&self) -> Vec<LineupSnapshot> {
        self.player_ids()
            .into_iter()
            .map(|player_id| LineupSnapshot::new(self.event_id, self.play_id, player_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starters(ids: &[PlayerId]) -> Vec<LineupSnapshot> {
        ids.iter().map(|&id| LineupSnapshot::new(3, 40, id)).collect()
    }

    #[test]
    fn test_seed_and_snapshot_sorted() {
        let roster = ActiveRoster::from_starters(&starters(&[9, 2, 5]));
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.play_id(), 40);
        let rows = roster.snapshot();
        assert_eq!(
            rows,
            vec![
                LineupSnapshot::new(3, 40, 2),
                LineupSnapshot::new(3, 40, 5),
                LineupSnapshot::new(3, 40, 9),
            ]
        );
    }

    #[test]
    fn test_substitution_swaps_players() {
        let mut roster = ActiveRoster::from_starters(&starters(&[1, 2, 3]));
        let outcome = roster.apply_substitution(4, 2);
        assert!(outcome.is_clean());
        assert!(roster.contains(4));
        assert!(!roster.contains(2));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_substitution_drift_is_reported() {
        let mut roster = ActiveRoster::from_starters(&starters(&[1, 2, 3]));

        // 이미 코트에 있는 선수 투입
        let outcome = roster.apply_substitution(1, 3);
        assert!(!outcome.entered);
        assert!(outcome.left);
        assert_eq!(roster.len(), 2);

        // 코트에 없는 선수 교체 아웃
        let outcome = roster.apply_substitution(7, 99);
        assert!(outcome.entered);
        assert!(!outcome.left);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_advance_retags_rows() {
        let mut roster = ActiveRoster::from_starters(&starters(&[1]));
        roster.advance_to(3, 55);
        assert_eq!(roster.snapshot(), vec![LineupSnapshot::new(3, 55, 1)]);
    }
}
