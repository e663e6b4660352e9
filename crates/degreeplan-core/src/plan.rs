//! Semester-by-semester course assignment.
//!
//! Ordering of semesters is explicit: a [`Plan`] is a sequence, and a course's
//! semester index is its position in that sequence.

use std::collections::HashMap;

use crate::identifier::Id;

/// One semester slot of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    label: String,
    courses: Vec<Id>,
}

impl Semester {
    pub fn new<I, C>(label: impl Into<String>, courses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Id>,
    {
        Self {
            label: label.into(),
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn courses(&self) -> &[Id] {
        &self.courses
    }

    pub fn contains(&self, id: Id) -> bool {
        self.courses.contains(&id)
    }
}

/// An ordered sequence of semesters.
///
/// A course is expected in at most one semester. This is not enforced: lookups
/// report every placement and callers decide how to treat duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    semesters: Vec<Semester>,
}

impl Plan {
    pub fn new(semesters: Vec<Semester>) -> Self {
        Self { semesters }
    }

    /// Appends a semester and returns its index.
    pub fn push_semester(&mut self, semester: Semester) -> usize {
        self.semesters.push(semester);
        self.semesters.len() - 1
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Index of the first semester holding `id`.
    pub fn semester_index_of(&self, id: Id) -> Option<usize> {
        self.semesters
            .iter()
            .position(|semester| semester.contains(id))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.semester_index_of(id).is_some()
    }

    /// Every `(semester index, course id)` pair in plan order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, Id)> + '_ {
        self.semesters
            .iter()
            .enumerate()
            .flat_map(|(idx, semester)| semester.courses.iter().map(move |id| (idx, *id)))
    }

    /// Every placed course id in plan order, duplicates included.
    pub fn course_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.placements().map(|(_, id)| id)
    }

    /// Builds an index from course id to all of its semester indices.
    pub fn placement_index(&self) -> HashMap<Id, Vec<usize>> {
        let mut index: HashMap<Id, Vec<usize>> = HashMap::new();
        for (idx, id) in self.placements() {
            index.entry(id).or_default().push(idx);
        }
        index
    }
}

impl FromIterator<Semester> for Plan {
    fn from_iter<T: IntoIterator<Item = Semester>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        Plan::new(vec![
            Semester::new("Winter 1", ["A", "B"]),
            Semester::new("Spring 1", ["C"]),
            Semester::new("Winter 2", Vec::<Id>::new()),
            Semester::new("Spring 2", ["D", "A"]),
        ])
    }

    #[test]
    fn test_semester_index_of() {
        let plan = sample_plan();

        assert_eq!(plan.semester_index_of(Id::new("A")), Some(0));
        assert_eq!(plan.semester_index_of(Id::new("C")), Some(1));
        assert_eq!(plan.semester_index_of(Id::new("D")), Some(3));
        assert_eq!(plan.semester_index_of(Id::new("Z")), None);
        assert!(plan.contains(Id::new("B")));
    }

    #[test]
    fn test_placements_in_order() {
        let plan = sample_plan();
        let placements: Vec<_> = plan
            .placements()
            .map(|(idx, id)| (idx, id.to_string()))
            .collect();

        assert_eq!(
            placements,
            vec![
                (0, "A".to_string()),
                (0, "B".to_string()),
                (1, "C".to_string()),
                (3, "D".to_string()),
                (3, "A".to_string()),
            ]
        );
    }

    #[test]
    fn test_placement_index_keeps_duplicates() {
        let plan = sample_plan();
        let index = plan.placement_index();

        assert_eq!(index[&Id::new("A")], vec![0, 3]);
        assert_eq!(index[&Id::new("C")], vec![1]);
        assert!(!index.contains_key(&Id::new("Z")));
    }

    #[test]
    fn test_push_semester() {
        let mut plan = Plan::default();
        assert!(plan.is_empty());

        let idx = plan.push_semester(Semester::new("Summer", ["X"]));
        assert_eq!(idx, 0);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.semesters()[0].label(), "Summer");
    }
}
