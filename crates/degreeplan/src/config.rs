//! Configuration types for plan evaluation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`PrerequisiteConfig`] - Classification pseudo-courses and the recursion guard.
//! - [`RuleConfig`] - Rule types folded into the consolidated view.
//!
//! # Example
//!
//! ```
//! # use degreeplan::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.prerequisites().max_depth(), 64);
//! ```

use serde::Deserialize;

use degreeplan_core::{identifier::Id, rule::RuleType};

use crate::consolidate::ConsolidationSet;

/// Default ids of courses satisfied by a checkbox instead of a placement.
pub const DEFAULT_CLASSIFICATION_IDS: [&str; 3] = ["01130013", "01130014", "miluim_exemption"];

/// Default nesting limit of a prerequisite tree.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Prerequisite checking section.
    #[serde(default)]
    prerequisites: PrerequisiteConfig,

    /// Rule evaluation section.
    #[serde(default)]
    rules: RuleConfig,
}

impl AppConfig {
    pub fn new(prerequisites: PrerequisiteConfig, rules: RuleConfig) -> Self {
        Self {
            prerequisites,
            rules,
        }
    }

    pub fn prerequisites(&self) -> &PrerequisiteConfig {
        &self.prerequisites
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }
}

/// Settings of the prerequisite checker.
#[derive(Debug, Clone, Deserialize)]
pub struct PrerequisiteConfig {
    /// Ids whose prerequisite leaves are driven by classification checkboxes.
    #[serde(default = "default_classification_ids")]
    classification_ids: Vec<String>,

    /// Deeper subtrees are treated as satisfied.
    #[serde(default = "default_max_depth")]
    max_depth: usize,
}

fn default_classification_ids() -> Vec<String> {
    DEFAULT_CLASSIFICATION_IDS.iter().map(|id| id.to_string()).collect()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for PrerequisiteConfig {
    fn default() -> Self {
        Self {
            classification_ids: default_classification_ids(),
            max_depth: default_max_depth(),
        }
    }
}

impl PrerequisiteConfig {
    pub fn new(classification_ids: Vec<String>, max_depth: usize) -> Self {
        Self {
            classification_ids,
            max_depth,
        }
    }

    pub fn classification_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.classification_ids.iter().map(Id::from)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Settings of the rule evaluator.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Rule types shown as one consolidated entry.
    #[serde(default = "default_consolidated")]
    consolidated: Vec<RuleType>,
}

fn default_consolidated() -> Vec<RuleType> {
    ConsolidationSet::default().iter().collect()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            consolidated: default_consolidated(),
        }
    }
}

impl RuleConfig {
    pub fn new(consolidated: Vec<RuleType>) -> Self {
        Self { consolidated }
    }

    pub fn consolidation_set(&self) -> ConsolidationSet {
        self.consolidated.iter().copied().collect()
    }
}
