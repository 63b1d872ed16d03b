//! Board view filters.

use crate::model::phase::Phase;
use crate::model::project::{Project, RiskLevel, RiskThresholds};

/// Active board filters; `None` and empty search mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    /// Case-insensitive substring over name, manager and description.
    pub search: String,
    pub project_manager: Option<String>,
    pub risk: Option<RiskLevel>,
    pub phase: Option<Phase>,
}

impl BoardFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.project_manager.is_some()
            || self.risk.is_some()
            || self.phase.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, project: &Project, thresholds: &RiskThresholds) -> bool {
        if let Some(phase) = self.phase {
            if project.status != phase {
                return false;
            }
        }
        if let Some(manager) = &self.project_manager {
            if project.project_manager.trim() != manager.trim() {
                return false;
            }
        }
        if let Some(risk) = self.risk {
            if project.risk_level(thresholds) != risk {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            project.name.as_str(),
            project.project_manager.as_str(),
            project.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
