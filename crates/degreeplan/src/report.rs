//! The outcome of evaluating one plan.

use serde::Serialize;

use degreeplan_core::identifier::Id;

use crate::{
    average::Averages,
    consolidate::RuleBoard,
    edges::PrereqEdge,
    prerequisite::CourseStatus,
};

/// Everything the engine derives from a plan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub template_id: String,
    pub template_name: String,
    /// Prerequisite status of every placement, in plan order.
    pub statuses: Vec<CourseStatus>,
    pub edges: Vec<PrereqEdge>,
    pub rules: RuleBoard,
    pub averages: Averages,
    /// Courses of one prerequisite cycle among the planned courses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<Id>>,
}

impl PlanReport {
    /// Placements whose prerequisites are not met.
    pub fn prerequisite_errors(&self) -> impl Iterator<Item = &CourseStatus> {
        self.statuses.iter().filter(|status| status.status.is_error())
    }

    /// Placements taken together with one of their prerequisites.
    pub fn prerequisite_warnings(&self) -> impl Iterator<Item = &CourseStatus> {
        self.statuses
            .iter()
            .filter(|status| !status.status.is_satisfied() && !status.status.is_error())
    }

    /// Whether every prerequisite is met and every rule satisfied.
    pub fn is_complete(&self) -> bool {
        self.prerequisite_errors().next().is_none() && self.rules.is_satisfied()
    }
}
