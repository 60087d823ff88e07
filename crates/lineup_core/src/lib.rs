//! # lineup_core - On-Court Lineup Reconstruction
//!
//! Rebuilds, for every play of a basketball play-by-play log, the ten
//! players on the floor.
//!
//! ## Features
//! - Period 1 starters from the explicit period-start marker
//! - Later-period starters inferred from substitution order
//! - Best-guess demotion when the feed lists more starters than fit
//! - Pure per-(game, period) functions, batch-parallel via rayon
//!
//! ```rust
//! use lineup_core::{reconstruct_period, Event, LineupConfig, ParticipationRecord, PeriodInput};
//!
//! let mut events = vec![Event::new(1, 100, 1, 0)];
//! let mut records: Vec<ParticipationRecord> = (1..=10)
//!     .map(|player_id| ParticipationRecord {
//!         event_id: 1,
//!         play_id: 100,
//!         player_id,
//!         play_event_id: 0,
//!         sequence: None,
//!     })
//!     .collect();
//! events.push(Event::new(1, 101, 1, 3));
//! records.push(ParticipationRecord {
//!     event_id: 1,
//!     play_id: 101,
//!     player_id: 4,
//!     play_event_id: 3,
//!     sequence: None,
//! });
//!
//! let input = PeriodInput::from_events(events, records).unwrap();
//! let lineups = reconstruct_period(&input, &LineupConfig::default()).unwrap();
//! assert_eq!(lineups.players_at(101).len(), 10);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{LineupConfig, OversizePolicy, TieBreak};
pub use engine::{reconstruct_period, replay_period, resolve_starters};
pub use error::{DriftKind, LineupError, LineupWarning, Result};
pub use models::{
    Event, GameId, LineupSnapshot, ParticipationRecord, Period, PeriodInput, PeriodKey,
    PeriodLineups, PlayEventKind, PlayId, PlayerId, SubDirection,
};
pub use pipeline::{
    group_periods, lineup_rows, reconstruct_all, GroupedLog, PeriodOutcome, ReconstructionSummary,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
