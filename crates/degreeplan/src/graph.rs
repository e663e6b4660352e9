//! Prerequisite graph of the planned courses.
//!
//! Built from the derived edges, one node per planned course in plan order.
//! Catalog trees are assumed acyclic, but nothing enforces it; the graph is
//! where a cycle between planned courses becomes visible.

use std::collections::HashMap;

use log::{debug, warn};
use petgraph::{
    Direction,
    algo::{tarjan_scc, toposort},
    graph::{DiGraph, NodeIndex},
};

use degreeplan_core::{identifier::Id, plan::Plan};

use crate::edges::PrereqEdge;

/// Directed graph with an edge from each prerequisite to its dependent.
#[derive(Debug, Default)]
pub struct PrerequisiteGraph {
    graph: DiGraph<Id, ()>,
    node_id_map: HashMap<Id, NodeIndex>,
}

impl PrerequisiteGraph {
    /// Builds the graph over the courses of `plan`.
    ///
    /// Edges whose ends are not planned are ignored.
    pub fn new<'e>(plan: &Plan, edges: impl IntoIterator<Item = &'e PrereqEdge>) -> Self {
        let mut graph = Self::default();
        for course in plan.course_ids() {
            graph.add_node(course);
        }
        for edge in edges {
            let (Some(&from), Some(&to)) =
                (graph.node_id_map.get(&edge.from), graph.node_id_map.get(&edge.to))
            else {
                continue;
            };
            graph.graph.update_edge(from, to, ());
        }
        debug!(
            nodes = graph.graph.node_count(),
            edges = graph.graph.edge_count();
            "Prerequisite graph built"
        );
        graph
    }

    fn add_node(&mut self, course: Id) -> NodeIndex {
        if let Some(&idx) = self.node_id_map.get(&course) {
            return idx;
        }
        let idx = self.graph.add_node(course);
        self.node_id_map.insert(course, idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Courses with no planned prerequisite, in plan order.
    pub fn roots(&self) -> Vec<Id> {
        self.graph
            .node_indices()
            .filter(|idx| {
                self.graph
                    .neighbors_directed(*idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Planned direct prerequisites of `course`, in plan order.
    pub fn prerequisites_of(&self, course: Id) -> Vec<Id> {
        self.neighbors(course, Direction::Incoming)
    }

    /// Planned courses that directly need `course`, in plan order.
    pub fn dependents_of(&self, course: Id) -> Vec<Id> {
        self.neighbors(course, Direction::Outgoing)
    }

    fn neighbors(&self, course: Id, direction: Direction) -> Vec<Id> {
        let Some(&idx) = self.node_id_map.get(&course) else {
            return Vec::new();
        };
        let mut neighbors: Vec<NodeIndex> =
            self.graph.neighbors_directed(idx, direction).collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors.into_iter().map(|idx| self.graph[idx]).collect()
    }

    /// Courses ordered so every prerequisite precedes its dependents, or
    /// `None` when the planned courses form a cycle.
    pub fn topological_order(&self) -> Option<Vec<Id>> {
        match toposort(&self.graph, None) {
            Ok(order) => Some(order.into_iter().map(|idx| self.graph[idx]).collect()),
            Err(cycle) => {
                warn!(course:% = self.graph[cycle.node_id()]; "Prerequisite cycle in plan");
                None
            }
        }
    }

    /// The courses of one prerequisite cycle, in plan order, if any.
    ///
    /// A course that lists itself as a prerequisite is a cycle of one.
    pub fn find_cycle(&self) -> Option<Vec<Id>> {
        let mut components = tarjan_scc(&self.graph);
        components.sort_by_key(|component| component.iter().min().copied());

        components
            .into_iter()
            .find(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|idx| self.graph.contains_edge(*idx, *idx))
            })
            .map(|mut component| {
                component.sort_unstable();
                component.into_iter().map(|idx| self.graph[idx]).collect()
            })
    }
}
