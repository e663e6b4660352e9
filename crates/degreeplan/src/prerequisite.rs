//! Prerequisite satisfaction checking.
//!
//! A course placed in semester `s` needs each prerequisite leaf placed in a
//! semester before `s`. Any equivalent course counts. Leaves naming a
//! classification pseudo-course are satisfied by their checkbox instead.
//!
//! Statuses are ordered by severity. A leaf gets the best status over every
//! placement of every equivalent, an AND group the worst status of its
//! children and an OR group the best. Unknown group kinds, unrecognized nodes
//! and empty groups never block a course.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use log::{debug, trace, warn};
use serde::Serialize;

use degreeplan_core::{
    catalog::Catalog,
    identifier::Id,
    plan::Plan,
    prerequisite::{GroupKind, PrerequisiteExpr},
    session::ClassificationState,
};

use crate::{config::PrerequisiteConfig, equivalence::EquivalenceIndex};

/// Outcome of a prerequisite check, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrereqStatus {
    Satisfied,
    /// A prerequisite sits in the same semester as the course.
    WarnSameSemester,
    /// A prerequisite is planned only after the course.
    ErrorLaterSemester,
    /// A prerequisite is missing from the plan.
    ErrorNotInPlan,
}

impl PrereqStatus {
    pub fn is_satisfied(self) -> bool {
        self == Self::Satisfied
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::ErrorLaterSemester | Self::ErrorNotInPlan)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::WarnSameSemester => "warn-same-semester",
            Self::ErrorLaterSemester => "error-later-semester",
            Self::ErrorNotInPlan => "error-not-in-plan",
        }
    }

    /// Status of one placement relative to the course's semester.
    fn of_placement(placed: usize, semester: usize) -> Self {
        match placed.cmp(&semester) {
            std::cmp::Ordering::Less => Self::Satisfied,
            std::cmp::Ordering::Equal => Self::WarnSameSemester,
            std::cmp::Ordering::Greater => Self::ErrorLaterSemester,
        }
    }
}

impl fmt::Display for PrereqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one placed course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseStatus {
    pub course: Id,
    pub semester: usize,
    pub status: PrereqStatus,
}

/// Checks prerequisites against one plan snapshot.
///
/// Placements and equivalence sets are indexed once, so checking every course
/// of a plan costs one tree walk per course.
#[derive(Debug)]
pub struct PrereqChecker<'a> {
    catalog: &'a Catalog,
    classification: &'a ClassificationState,
    placements: HashMap<Id, Vec<usize>>,
    equivalents: EquivalenceIndex,
    classification_ids: HashSet<Id>,
    max_depth: usize,
}

impl<'a> PrereqChecker<'a> {
    pub fn new(
        plan: &Plan,
        catalog: &'a Catalog,
        classification: &'a ClassificationState,
        config: &PrerequisiteConfig,
    ) -> Self {
        Self {
            catalog,
            classification,
            placements: plan.placement_index(),
            equivalents: EquivalenceIndex::new(catalog),
            classification_ids: config.classification_ids().collect(),
            max_depth: config.max_depth(),
        }
    }

    /// Status of `course` placed in semester `semester`.
    ///
    /// A course without prerequisites, or missing from the catalog, is
    /// satisfied.
    pub fn check(&self, course: Id, semester: usize) -> PrereqStatus {
        let Some(expr) = self.catalog.get(course).and_then(|c| c.prerequisites()) else {
            return PrereqStatus::Satisfied;
        };
        let status = self.check_expr(expr, semester);
        trace!(course:% = course, semester, status:%; "Checked prerequisites");
        status
    }

    /// Status of an arbitrary tree for a course in semester `semester`.
    pub fn check_expr(&self, expr: &PrerequisiteExpr, semester: usize) -> PrereqStatus {
        self.eval(expr, semester, 0)
    }

    /// Checks every placement of `plan`, in plan order.
    pub fn check_plan(&self, plan: &Plan) -> Vec<CourseStatus> {
        let statuses: Vec<CourseStatus> = plan
            .placements()
            .map(|(semester, course)| CourseStatus {
                course,
                semester,
                status: self.check(course, semester),
            })
            .collect();
        debug!(
            courses = statuses.len(),
            errors = statuses.iter().filter(|s| s.status.is_error()).count();
            "Prerequisites checked"
        );
        statuses
    }

    fn eval(&self, expr: &PrerequisiteExpr, semester: usize, depth: usize) -> PrereqStatus {
        if depth > self.max_depth {
            warn!(max_depth = self.max_depth; "Prerequisite tree too deep, treating subtree as satisfied");
            return PrereqStatus::Satisfied;
        }

        match expr {
            PrerequisiteExpr::Course(id) => self.leaf(*id, semester),
            PrerequisiteExpr::AllOf(items) => self.all(items, semester, depth),
            PrerequisiteExpr::OneOf(items) => self.any(items, semester, depth),
            PrerequisiteExpr::Group { kind, items, .. } => match kind {
                GroupKind::All => self.all(items, semester, depth),
                GroupKind::One => self.any(items, semester, depth),
                GroupKind::Other(name) => {
                    debug!(kind = name.as_str(); "Unknown prerequisite group kind, treating as satisfied");
                    PrereqStatus::Satisfied
                }
            },
            PrerequisiteExpr::Unrecognized => PrereqStatus::Satisfied,
        }
    }

    fn all(&self, items: &[PrerequisiteExpr], semester: usize, depth: usize) -> PrereqStatus {
        items
            .iter()
            .map(|item| self.eval(item, semester, depth + 1))
            .max()
            .unwrap_or(PrereqStatus::Satisfied)
    }

    fn any(&self, items: &[PrerequisiteExpr], semester: usize, depth: usize) -> PrereqStatus {
        items
            .iter()
            .map(|item| self.eval(item, semester, depth + 1))
            .min()
            .unwrap_or(PrereqStatus::Satisfied)
    }

    fn leaf(&self, id: Id, semester: usize) -> PrereqStatus {
        if self.classification_ids.contains(&id) {
            return if self.classification.is_checked(id) {
                PrereqStatus::Satisfied
            } else {
                PrereqStatus::ErrorNotInPlan
            };
        }

        self.equivalents
            .equivalents(id)
            .filter_map(|equivalent| self.placements.get(&equivalent))
            .flatten()
            .map(|placed| PrereqStatus::of_placement(*placed, semester))
            .min()
            .unwrap_or(PrereqStatus::ErrorNotInPlan)
    }
}

/// Checks one course with the default configuration.
///
/// Builds a fresh [`PrereqChecker`]; prefer the checker when checking many
/// courses of the same plan.
pub fn check_prerequisites(
    course: Id,
    semester: usize,
    plan: &Plan,
    catalog: &Catalog,
    classification: &ClassificationState,
) -> PrereqStatus {
    PrereqChecker::new(plan, catalog, classification, &PrerequisiteConfig::default())
        .check(course, semester)
}
