//! Metrics configuration.
//!
//! # Responsibility
//! - Hold every tunable threshold used by derived metrics.
//! - Reject configurations that would make classifications ambiguous.
//!
//! # Invariants
//! - `risk.warning_min <= risk.healthy_min <= 100`.
//! - `velocity_per_week` is finite and positive.
//! - Missing keys in serialized config fall back to `Default`.

use crate::model::project::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Days before a task deadline that flips `On Track` into `Risk`.
pub const DEFAULT_URGENCY_RISK_WINDOW_DAYS: i64 = 7;
/// Days before a project deadline that marks it urgent on the dashboard.
pub const DEFAULT_DEADLINE_URGENT_DAYS: i64 = 7;
/// Assumed team throughput used for completion forecasts.
pub const DEFAULT_VELOCITY_PER_WEEK: f64 = 3.5;
/// Average phase duration (days) above which a phase is a bottleneck.
pub const DEFAULT_BOTTLENECK_THRESHOLD_DAYS: u32 = 7;
/// Minimum completion rate for a project to count as on time.
pub const DEFAULT_SLA_MIN_COMPLETION: u8 = 50;
/// Length of ranked dashboard lists.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Tunables for `metrics` and `service::dashboard_service`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub risk: RiskThresholds,
    pub urgency_risk_window_days: i64,
    pub deadline_urgent_days: i64,
    pub velocity_per_week: f64,
    pub bottleneck_threshold_days: u32,
    pub sla_min_completion: u8,
    pub list_limit: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk: RiskThresholds::default(),
            urgency_risk_window_days: DEFAULT_URGENCY_RISK_WINDOW_DAYS,
            deadline_urgent_days: DEFAULT_DEADLINE_URGENT_DAYS,
            velocity_per_week: DEFAULT_VELOCITY_PER_WEEK,
            bottleneck_threshold_days: DEFAULT_BOTTLENECK_THRESHOLD_DAYS,
            sla_min_completion: DEFAULT_SLA_MIN_COMPLETION,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ThresholdOutOfRange { field: &'static str, value: u8 },
    InvertedRiskThresholds { healthy_min: u8, warning_min: u8 },
    InvalidVelocity(f64),
    NegativeWindow { field: &'static str, value: i64 },
    ZeroListLimit,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThresholdOutOfRange { field, value } => {
                write!(f, "{field} ({value}) must be within 0..=100")
            }
            Self::InvertedRiskThresholds {
                healthy_min,
                warning_min,
            } => write!(
                f,
                "risk.warning_min ({warning_min}) must be <= risk.healthy_min ({healthy_min})"
            ),
            Self::InvalidVelocity(value) => {
                write!(f, "velocity_per_week ({value}) must be a positive number")
            }
            Self::NegativeWindow { field, value } => {
                write!(f, "{field} ({value}) cannot be negative")
            }
            Self::ZeroListLimit => write!(f, "list_limit must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("risk.healthy_min", self.risk.healthy_min),
            ("risk.warning_min", self.risk.warning_min),
            ("sla_min_completion", self.sla_min_completion),
        ] {
            if value > 100 {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        if self.risk.warning_min > self.risk.healthy_min {
            return Err(ConfigError::InvertedRiskThresholds {
                healthy_min: self.risk.healthy_min,
                warning_min: self.risk.warning_min,
            });
        }
        if !self.velocity_per_week.is_finite() || self.velocity_per_week <= 0.0 {
            return Err(ConfigError::InvalidVelocity(self.velocity_per_week));
        }
        for (field, value) in [
            ("urgency_risk_window_days", self.urgency_risk_window_days),
            ("deadline_urgent_days", self.deadline_urgent_days),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeWindow { field, value });
            }
        }
        if self.list_limit == 0 {
            return Err(ConfigError::ZeroListLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MetricsConfig};
    use crate::model::project::RiskThresholds;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(MetricsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let config = MetricsConfig {
            risk: RiskThresholds {
                healthy_min: 40,
                warning_min: 60,
            },
            ..MetricsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRiskThresholds {
                healthy_min: 40,
                warning_min: 60,
            })
        );
    }

    #[test]
    fn validate_rejects_non_positive_velocity() {
        for velocity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = MetricsConfig {
                velocity_per_week: velocity,
                ..MetricsConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidVelocity(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_empty_lists() {
        let config = MetricsConfig {
            list_limit: 0,
            ..MetricsConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroListLimit));
    }
}
