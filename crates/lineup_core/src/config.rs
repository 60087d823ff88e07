//! # Reconstruction Configuration
//!
//! 라인업 복원 튜닝 값을 한곳에서 관리한다.
//!
//! ## 사용법
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::default();
//! let legacy = LineupConfig::legacy();
//! assert_eq!(config.lineup_size, legacy.lineup_size);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};

/// Players on court for both teams combined.
pub const DEFAULT_LINEUP_SIZE: usize = 10;

/// How many players the best-guess pass may demote when a period resolves
/// too many starters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Keep demoting until the lineup fits
    #[default]
    RepeatUntilFit,
    /// Skip untouched players when substitution exits already fill the
    /// lineup; otherwise demote exactly one player, even if the set is still
    /// oversized
    SingleDemotion,
}

/// Tie-break among candidates with equal appearance counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    LowestPlayerId,
    HighestPlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    /// 코트 위 인원 (양 팀 합계, 기본: 10)
    pub lineup_size: usize,
    /// 초과 선발 처리 방식 (기본: repeat_until_fit)
    pub oversize_policy: OversizePolicy,
    /// 등장 횟수 동률 처리 (기본: lowest_player_id)
    pub tie_break: TieBreak,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            lineup_size: DEFAULT_LINEUP_SIZE,
            oversize_policy: OversizePolicy::RepeatUntilFit,
            tie_break: TieBreak::LowestPlayerId,
        }
    }
}

impl LineupConfig {
    /// Same as `default()`
    pub fn strict() -> Self {
        Self::default()
    }

    /// Historical feed tooling behaviour: untouched players are only added
    /// when substitution exits do not already give a full lineup, and at most
    /// one player is demoted per period.
    pub fn legacy() -> Self {
        Self {
            oversize_policy: OversizePolicy::SingleDemotion,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lineup_size == 0 {
            return Err(LineupError::InvalidConfig(
                "lineup_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LineupConfig::default();
        assert_eq!(config.lineup_size, 10);
        assert_eq!(config.oversize_policy, OversizePolicy::RepeatUntilFit);
        assert_eq!(config.tie_break, TieBreak::LowestPlayerId);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = LineupConfig::from_json(r#"{"oversize_policy":"single_demotion"}"#).unwrap();
        assert_eq!(config, LineupConfig::legacy());
    }

    #[test]
    fn test_zero_lineup_rejected() {
        let config = LineupConfig::from_json(r#"{"lineup_size":0}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(LineupError::InvalidConfig(_))
        ));
    }
}
