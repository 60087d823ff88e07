//! # Play-by-play data model
//!
//! - `event` - Event / ParticipationRecord (입력 레코드)
//! - `lineup` - LineupSnapshot, PeriodKey, PeriodInput (출력 + 단위)

pub mod event;
pub mod lineup;

pub use event::{Event, ParticipationRecord, PlayEventKind, SubDirection};
pub use lineup::{LineupSnapshot, PeriodInput, PeriodKey, PeriodLineups};

/// Game identifier (`event_id` in the feed)
pub type GameId = u64;
/// Sequence number of a play within a game
pub type PlayId = u64;
pub type PlayerId = u64;
/// Quarter / overtime number, 1-based
pub type Period = u16;
