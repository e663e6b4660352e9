//! Derives "prerequisite → dependent" edges between planned courses.
//!
//! Every leaf of a course's prerequisite tree yields an edge when the leaf
//! course is itself in the plan, whatever AND/OR group it sits under. The
//! graph shows every plan-internal relationship, not only the branch that
//! currently satisfies the course.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::debug;
use serde::Serialize;

use degreeplan_core::{catalog::Catalog, identifier::Id, plan::Plan};

/// A directed edge from a prerequisite to the course that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PrereqEdge {
    pub from: Id,
    pub to: Id,
}

impl PrereqEdge {
    pub fn new(from: Id, to: Id) -> Self {
        Self { from, to }
    }
}

/// Edges between courses of `plan`, deduplicated, ordered by plan order and
/// then by pre-order position in each tree.
pub fn derive_edges(plan: &Plan, catalog: &Catalog) -> IndexSet<PrereqEdge> {
    let planned: HashSet<Id> = plan.course_ids().collect();

    let edges: IndexSet<PrereqEdge> = plan
        .course_ids()
        .filter_map(|course| {
            catalog
                .get(course)
                .and_then(|entry| entry.prerequisites())
                .map(|tree| (course, tree))
        })
        .flat_map(|(course, tree)| {
            tree.course_ids()
                .into_iter()
                .filter(|leaf| planned.contains(leaf))
                .map(move |leaf| PrereqEdge::new(leaf, course))
        })
        .collect();

    debug!(courses = planned.len(), edges = edges.len(); "Prerequisite edges derived");
    edges
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use degreeplan_core::{catalog::Course, plan::Semester, prerequisite::PrerequisiteExpr};

    use super::*;

    // ===================
    // Strategies
    // ===================

    const IDS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

    fn expr_strategy() -> impl Strategy<Value = PrerequisiteExpr> {
        let leaf = prop::sample::select(IDS.to_vec()).prop_map(PrerequisiteExpr::course);
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(PrerequisiteExpr::AllOf),
                prop::collection::vec(inner, 0..4).prop_map(PrerequisiteExpr::OneOf),
            ]
        })
    }

    /// Catalog giving some ids a random tree.
    fn catalog_strategy() -> impl Strategy<Value = Catalog> {
        prop::collection::vec(prop::option::of(expr_strategy()), IDS.len()).prop_map(|trees| {
            IDS.iter()
                .zip(trees)
                .map(|(id, tree)| {
                    let course = Course::new(*id, *id, 1.0);
                    match tree {
                        Some(tree) => course.with_prerequisites(tree),
                        None => course,
                    }
                })
                .collect()
        })
    }

    /// Plan with a random subset of ids in one semester.
    fn plan_strategy() -> impl Strategy<Value = Plan> {
        prop::sample::subsequence(IDS.to_vec(), 0..=IDS.len())
            .prop_map(|ids| Plan::new(vec![Semester::new("1", ids)]))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Both ends of every edge are planned and no edge repeats.
    fn check_edges_planned_and_unique(plan: &Plan, catalog: &Catalog) -> Result<(), TestCaseError> {
        let edges: Vec<PrereqEdge> = derive_edges(plan, catalog).into_iter().collect();

        let unique: HashSet<PrereqEdge> = edges.iter().copied().collect();
        prop_assert_eq!(unique.len(), edges.len());
        for edge in &edges {
            prop_assert!(plan.contains(edge.from));
            prop_assert!(plan.contains(edge.to));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn edges_planned_and_unique(plan in plan_strategy(), catalog in catalog_strategy()) {
            check_edges_planned_and_unique(&plan, &catalog)?;
        }
    }
}
