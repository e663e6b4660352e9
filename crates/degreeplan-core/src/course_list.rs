//! Named course lists referenced by rules.


use indexmap::{IndexMap, IndexSet};

use crate::identifier::Id;

/// Name of the list derived from a template's mandatory courses.
pub const MANDATORY_LIST_NAME: &str = "mandatory";

/// Where a list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Written by the template author.
    Selective,
    /// Derived from the template's mandatory courses.
    Mandatory,
}

/// A named, ordered set of course ids.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseList {
    name: String,
    kind: ListKind,
    courses: IndexSet<Id>,
}

impl CourseList {
    pub fn new<I, C>(name: impl Into<String>, kind: ListKind, courses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Id>,
    {
        Self {
            name: name.into(),
            kind,
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn contains(&self, id: Id) -> bool {
        self.courses.contains(&id)
    }

    pub fn courses(&self) -> impl Iterator<Item = Id> + '_ {
        self.courses.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// All lists of a template, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CourseLists {
    lists: IndexMap<String, CourseList>,
}

impl CourseLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, list: CourseList) -> Option<CourseList> {
        self.lists.insert(list.name().to_string(), list)
    }

    pub fn get(&self, name: &str) -> Option<&CourseList> {
        self.lists.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseList> {
        self.lists.values()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Union of all selective lists, in first-seen order.
    pub fn selective_courses(&self) -> IndexSet<Id> {
        self.lists
            .values()
            .filter(|list| list.kind() == ListKind::Selective)
            .flat_map(CourseList::courses)
            .collect()
    }
}

impl FromIterator<CourseList> for CourseLists {
    fn from_iter<T: IntoIterator<Item = CourseList>>(iter: T) -> Self {
        let mut lists = Self::new();
        for list in iter {
            lists.insert(list);
        }
        lists
    }
}
