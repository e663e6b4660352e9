//! Prerequisite expression trees.
//!
//! A course's prerequisites form a tree of AND/OR groups over course ids.
//! Catalog data carries two encodings of the same idea: the compact
//! `{"and": [...]}` / `{"or": [...]}` objects and an older
//! `{"type": "all" | "one" | ..., "list": [...], "credits": N}` form. Both are
//! kept as distinct variants so evaluation can honour the legacy form's
//! unknown kinds exactly.

use std::fmt;

use serde::Serialize;

use crate::identifier::Id;

/// Kind of a legacy prerequisite group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Every item is required (`"all"`).
    All,
    /// At least one item is required (`"one"`).
    One,
    /// Any other kind, such as `at_least_X_credits_from_list`.
    Other(String),
}

impl GroupKind {
    /// Maps a raw `type` value to a group kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "one" => Self::One,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the raw name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::One => "one",
            Self::Other(name) => name,
        }
    }
}

/// A node of a prerequisite tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteExpr {
    /// A single required course.
    Course(Id),
    /// Every item must be satisfied.
    AllOf(Vec<PrerequisiteExpr>),
    /// At least one item must be satisfied.
    OneOf(Vec<PrerequisiteExpr>),
    /// Legacy typed group.
    Group {
        kind: GroupKind,
        items: Vec<PrerequisiteExpr>,
        credit_threshold: Option<f64>,
    },
    /// A node whose shape was not understood when loading.
    Unrecognized,
}

impl PrerequisiteExpr {
    /// Shorthand for a course leaf.
    pub fn course(id: impl Into<Id>) -> Self {
        Self::Course(id.into())
    }

    /// Returns every course id in the tree in pre-order.
    ///
    /// AND/OR structure is discarded; an id referenced on several branches is
    /// returned once per reference.
    pub fn course_ids(&self) -> Vec<Id> {
        let mut ids = Vec::new();
        self.collect_course_ids(&mut ids);
        ids
    }

    fn collect_course_ids(&self, ids: &mut Vec<Id>) {
        match self {
            Self::Course(id) => ids.push(*id),
            Self::AllOf(items) | Self::OneOf(items) | Self::Group { items, .. } => {
                for item in items {
                    item.collect_course_ids(ids);
                }
            }
            Self::Unrecognized => {}
        }
    }

    /// Returns the nesting depth of the tree. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Course(_) | Self::Unrecognized => 1,
            Self::AllOf(items) | Self::OneOf(items) | Self::Group { items, .. } => {
                1 + items.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for PrerequisiteExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(
            f: &mut fmt::Formatter<'_>,
            items: &[PrerequisiteExpr],
            separator: &str,
        ) -> fmt::Result {
            write!(f, "(")?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    write!(f, " {separator} ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, ")")
        }

        match self {
            Self::Course(id) => write!(f, "{id}"),
            Self::AllOf(items) => join(f, items, "and"),
            Self::OneOf(items) => join(f, items, "or"),
            Self::Group { kind, items, .. } => match kind {
                GroupKind::All => join(f, items, "and"),
                GroupKind::One => join(f, items, "or"),
                GroupKind::Other(name) => {
                    write!(f, "{name}")?;
                    join(f, items, ",")
                }
            },
            Self::Unrecognized => write!(f, "<unrecognized>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kind_from_name() {
        assert_eq!(GroupKind::from_name("all"), GroupKind::All);
        assert_eq!(GroupKind::from_name("one"), GroupKind::One);
        assert_eq!(
            GroupKind::from_name("at_least_X_credits_from_list"),
            GroupKind::Other("at_least_X_credits_from_list".to_string())
        );
        assert_eq!(GroupKind::from_name("one").as_str(), "one");
    }

    #[test]
    fn test_course_ids_pre_order() {
        let expr = PrerequisiteExpr::AllOf(vec![
            PrerequisiteExpr::course("A"),
            PrerequisiteExpr::OneOf(vec![
                PrerequisiteExpr::course("B"),
                PrerequisiteExpr::course("A"),
            ]),
            PrerequisiteExpr::Unrecognized,
            PrerequisiteExpr::Group {
                kind: GroupKind::Other("credits".to_string()),
                items: vec![PrerequisiteExpr::course("C")],
                credit_threshold: Some(6.0),
            },
        ]);

        let ids = expr.course_ids();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], "A");
        assert_eq!(ids[1], "B");
        assert_eq!(ids[2], "A");
        assert_eq!(ids[3], "C");
    }

    #[test]
    fn test_depth() {
        assert_eq!(PrerequisiteExpr::course("A").depth(), 1);
        assert_eq!(PrerequisiteExpr::AllOf(vec![]).depth(), 1);

        let nested = PrerequisiteExpr::OneOf(vec![PrerequisiteExpr::AllOf(vec![
            PrerequisiteExpr::course("A"),
        ])]);
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_display() {
        let expr = PrerequisiteExpr::OneOf(vec![
            PrerequisiteExpr::course("A"),
            PrerequisiteExpr::AllOf(vec![
                PrerequisiteExpr::course("B"),
                PrerequisiteExpr::course("C"),
            ]),
        ]);

        assert_eq!(expr.to_string(), "(A or (B and C))");
    }
}
