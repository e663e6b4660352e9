//! Course catalog.

use indexmap::IndexMap;
use log::debug;

use crate::{identifier::Id, prerequisite::PrerequisiteExpr};

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: Id,
    name: String,
    credits: f64,
    offered: Vec<String>,
    prerequisites: Option<PrerequisiteExpr>,
    equivalents: Option<String>,
    is_classification: bool,
}

impl Course {
    /// Creates a course with no prerequisites, equivalents or offering tags.
    ///
    /// Negative or non-finite credits are stored as zero.
    pub fn new(id: impl Into<Id>, name: impl Into<String>, credits: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits: if credits.is_finite() && credits > 0.0 {
                credits
            } else {
                0.0
            },
            offered: Vec::new(),
            prerequisites: None,
            equivalents: None,
            is_classification: false,
        }
    }

    /// Sets the prerequisite tree.
    pub fn with_prerequisites(mut self, prerequisites: PrerequisiteExpr) -> Self {
        self.prerequisites = Some(prerequisites);
        self
    }

    /// Sets the raw no-credit equivalence string, e.g. `"01040031, 01040032"`.
    pub fn with_equivalents(mut self, equivalents: impl Into<String>) -> Self {
        self.equivalents = Some(equivalents.into());
        self
    }

    /// Sets the semester tags the course is offered in.
    pub fn with_offered<I, S>(mut self, offered: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offered = offered.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the course as a classification pseudo-course.
    pub fn with_classification(mut self, is_classification: bool) -> Self {
        self.is_classification = is_classification;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    /// Semester tags the course is offered in.
    pub fn offered(&self) -> &[String] {
        &self.offered
    }

    pub fn prerequisites(&self) -> Option<&PrerequisiteExpr> {
        self.prerequisites.as_ref()
    }

    /// The raw equivalence string as found in the catalog.
    pub fn equivalents(&self) -> Option<&str> {
        self.equivalents.as_deref()
    }

    pub fn is_classification(&self) -> bool {
        self.is_classification
    }

    /// Adds offering tags not already present, keeping the existing order.
    pub(crate) fn merge_offered(&mut self, other: &[String]) {
        for tag in other {
            if !self.offered.contains(tag) {
                self.offered.push(tag.clone());
            }
        }
    }
}

/// All known courses keyed by id, in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: IndexMap<Id, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a course, replacing any previous entry with the same id.
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        self.courses.insert(course.id(), course)
    }

    /// Merges `course` into the catalog.
    ///
    /// A new id is inserted as is. For an existing id the stored record is
    /// kept and only the offering tags of `course` are added to it.
    pub fn merge(&mut self, course: Course) {
        match self.courses.get_mut(&course.id()) {
            Some(existing) => {
                debug!(course_id:% = course.id(); "Merging offered semesters");
                existing.merge_offered(course.offered());
            }
            None => {
                self.courses.insert(course.id(), course);
            }
        }
    }

    pub fn get(&self, id: Id) -> Option<&Course> {
        self.courses.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.courses.contains_key(&id)
    }

    /// Credits of `id`, or zero for ids missing from the catalog.
    pub fn credits(&self, id: Id) -> f64 {
        self.get(id).map_or(0.0, Course::credits)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}

impl IntoIterator for Catalog {
    type Item = Course;
    type IntoIter = indexmap::map::IntoValues<Id, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.into_values()
    }
}
