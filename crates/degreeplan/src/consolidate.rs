//! Consolidated view of a template's rules.
//!
//! Rules whose type belongs to a [`ConsolidationSet`] are folded into one
//! entry reporting how many of them are satisfied. Everything else is shown
//! on its own, and the first classification rule gets a slot of its own.

use std::fmt;

use indexmap::IndexSet;
use log::debug;
use serde::Serialize;

use degreeplan_core::rule::{DegreeRule, RuleType};

use crate::evaluate::{Evaluation, RuleContext, evaluate};

/// Rule types folded into the consolidated entry.
///
/// # Examples
///
/// ```
/// # use degreeplan::consolidate::ConsolidationSet;
/// # use degreeplan_core::rule::RuleType;
/// let set = ConsolidationSet::default();
/// assert!(set.contains(RuleType::TotalCredits));
/// assert!(!set.contains(RuleType::ClassificationCourses));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationSet {
    types: IndexSet<RuleType>,
}

impl ConsolidationSet {
    /// Types folded by default.
    pub const DEFAULT_TYPES: [RuleType; 8] = [
        RuleType::TotalCredits,
        RuleType::CreditsFromList,
        RuleType::MinGrade,
        RuleType::MinCredits,
        RuleType::MinCoursesFromList,
        RuleType::MinCreditsFromMandatory,
        RuleType::MinCreditsFromAnySelectiveList,
        RuleType::MinCreditsFromIdPattern,
    ];

    /// A set folding nothing.
    pub fn empty() -> Self {
        Self {
            types: IndexSet::new(),
        }
    }

    pub fn contains(&self, rule_type: RuleType) -> bool {
        self.types.contains(&rule_type)
    }

    /// Whether `rule` is folded. Unsupported rules never are.
    pub fn includes(&self, rule: &DegreeRule) -> bool {
        rule.rule_type().is_some_and(|rule_type| self.contains(rule_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleType> + '_ {
        self.types.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ConsolidationSet {
    fn default() -> Self {
        Self::DEFAULT_TYPES.into_iter().collect()
    }
}

impl FromIterator<RuleType> for ConsolidationSet {
    fn from_iter<I: IntoIterator<Item = RuleType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// Aggregate of the folded rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedResult {
    pub satisfied: usize,
    pub total: usize,
    pub is_satisfied: bool,
    pub rules: Vec<Evaluation>,
}

impl ConsolidatedResult {
    /// Progress as `satisfied/total`.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.satisfied, self.total)
    }

    /// Share of satisfied rules in percent.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.satisfied as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for ConsolidatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rules satisfied", self.progress())
    }
}

/// Evaluates the rules of `rules` folded by `set` and aggregates them.
///
/// Returns `None` when no rule is folded.
pub fn consolidate<'r>(
    rules: impl IntoIterator<Item = &'r DegreeRule>,
    ctx: &RuleContext<'_>,
    set: &ConsolidationSet,
) -> Option<ConsolidatedResult> {
    let evaluations: Vec<Evaluation> = rules
        .into_iter()
        .filter(|rule| set.includes(rule))
        .map(|rule| evaluate(rule, ctx))
        .collect();
    if evaluations.is_empty() {
        return None;
    }

    let satisfied = evaluations.iter().filter(|eval| eval.is_satisfied).count();
    let total = evaluations.len();
    Some(ConsolidatedResult {
        satisfied,
        total,
        is_satisfied: satisfied == total,
        rules: evaluations,
    })
}

/// Every rule of a template, arranged for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleBoard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consolidated: Option<ConsolidatedResult>,
    pub standalone: Vec<Evaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Evaluation>,
}

impl RuleBoard {
    /// Evaluates and arranges `rules` in rule order.
    pub fn new(rules: &[DegreeRule], ctx: &RuleContext<'_>, set: &ConsolidationSet) -> Self {
        let consolidated = consolidate(rules, ctx, set);

        let mut classification = None;
        let mut standalone = Vec::new();
        for rule in rules.iter().filter(|rule| !set.includes(rule)) {
            let evaluation = evaluate(rule, ctx);
            let is_classification = rule.rule_type() == Some(RuleType::ClassificationCourses);
            if is_classification && classification.is_none() {
                classification = Some(evaluation);
            } else {
                standalone.push(evaluation);
            }
        }

        debug!(
            consolidated = consolidated.as_ref().map_or(0, |result| result.total),
            standalone = standalone.len(),
            classification = classification.is_some();
            "Rule board built"
        );
        Self {
            consolidated,
            standalone,
            classification,
        }
    }

    /// Whether every rule on the board is satisfied.
    pub fn is_satisfied(&self) -> bool {
        self.consolidated
            .as_ref()
            .is_none_or(|result| result.is_satisfied)
            && self.standalone.iter().all(|eval| eval.is_satisfied)
            && self
                .classification
                .as_ref()
                .is_none_or(|eval| eval.is_satisfied)
    }
}
