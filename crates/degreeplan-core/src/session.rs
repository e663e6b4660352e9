//! Per-session student state: grades, pass flags and exemption checkboxes.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use crate::identifier::Id;

/// Highest valid numeric grade.
pub const MAX_GRADE: f64 = 100.0;

/// Reasons a raw grade string is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradeError {
    #[error("grade is empty")]
    Empty,

    #[error("grade `{0}` is not a number")]
    NotANumber(String),

    #[error("grade {0} is outside 0..=100")]
    OutOfRange(f64),
}

/// A numeric grade in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Grade(f64);

impl Grade {
    /// Creates a grade, rejecting non-finite or out-of-range values.
    pub fn new(value: f64) -> Result<Self, GradeError> {
        if value.is_finite() && (0.0..=MAX_GRADE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GradeError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Grade {
    type Err = GradeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GradeError::Empty);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| GradeError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion state of a single course.
///
/// A numeric grade and a pass flag are mutually exclusive, so both live in one
/// variant and an invalid combination cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "grade")]
pub enum Completion {
    #[default]
    Ungraded,
    Graded(Grade),
    Pass,
}

impl Completion {
    /// Builds a completion from a raw grade string and a pass flag.
    ///
    /// A set pass flag wins over any grade text. An empty or invalid grade
    /// yields [`Completion::Ungraded`].
    pub fn from_raw(grade: Option<&str>, pass: bool) -> Self {
        if pass {
            return Self::Pass;
        }
        grade
            .and_then(|raw| raw.parse::<Grade>().ok())
            .map_or(Self::Ungraded, Self::Graded)
    }

    /// Whether the course counts toward "done".
    pub fn is_done(self) -> bool {
        !matches!(self, Self::Ungraded)
    }

    /// The numeric grade, if there is one. A pass has none.
    pub fn grade(self) -> Option<Grade> {
        match self {
            Self::Graded(grade) => Some(grade),
            Self::Ungraded | Self::Pass => None,
        }
    }
}

/// Completion state of every course the student touched.
#[derive(Debug, Clone, Default)]
pub struct Completions {
    states: HashMap<Id, Completion>,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion of `id`; courses never touched are ungraded.
    pub fn get(&self, id: Id) -> Completion {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn is_done(&self, id: Id) -> bool {
        self.get(id).is_done()
    }

    pub fn set(&mut self, id: Id, completion: Completion) {
        if completion == Completion::Ungraded {
            self.states.remove(&id);
        } else {
            self.states.insert(id, completion);
        }
    }

    /// Applies a typed grade string. Any pass flag is cleared.
    ///
    /// Returns the resulting completion; invalid text leaves the course
    /// ungraded.
    pub fn set_grade(&mut self, id: Id, raw: &str) -> Completion {
        let completion = Completion::from_raw(Some(raw), false);
        self.set(id, completion);
        completion
    }

    /// Toggles the pass flag. Setting it clears any numeric grade; clearing it
    /// leaves the course ungraded.
    pub fn set_pass(&mut self, id: Id, pass: bool) {
        let completion = if pass {
            Completion::Pass
        } else {
            Completion::Ungraded
        };
        self.set(id, completion);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Completion)> + '_ {
        self.states.iter().map(|(id, completion)| (*id, *completion))
    }
}

/// Checkbox and credit state of one classification item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClassificationEntry {
    pub checked: bool,
    pub credits: Option<f64>,
}

/// Classification checkboxes, independent of the plan.
#[derive(Debug, Clone, Default)]
pub struct ClassificationState {
    entries: HashMap<Id, ClassificationEntry>,
}

impl ClassificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, id: Id) -> ClassificationEntry {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    pub fn is_checked(&self, id: Id) -> bool {
        self.entry(id).checked
    }

    pub fn set_checked(&mut self, id: Id, checked: bool) {
        self.entries.entry(id).or_default().checked = checked;
    }

    /// Records the credits entered for `id`, clamped to `0..=cap`.
    ///
    /// Non-finite input clears the value.
    pub fn set_credits(&mut self, id: Id, credits: f64, cap: Option<f64>) {
        let value = credits.is_finite().then(|| {
            let floor = credits.max(0.0);
            cap.map_or(floor, |cap| floor.min(cap.max(0.0)))
        });
        self.entries.entry(id).or_default().credits = value;
    }

    /// Sum of the credits of all checked entries.
    pub fn checked_credits(&self) -> f64 {
        self.entries
            .values()
            .filter(|entry| entry.checked)
            .filter_map(|entry| entry.credits)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, ClassificationEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, *entry))
    }
}

/// Everything the student entered during a session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub completions: Completions,
    pub classification: ClassificationState,
}

impl SessionState {
    pub fn new(completions: Completions, classification: ClassificationState) -> Self {
        Self {
            completions,
            classification,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Raw grade strings: valid numbers, out-of-range numbers and junk.
    fn raw_grade_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0.0..=MAX_GRADE).prop_map(|value| format!("{value}")),
            (-1000.0..1000.0f64).prop_map(|value| format!(" {value} ")),
            "[a-z ]{0,6}",
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A parsed grade is always finite and in range.
    fn check_parsed_grade_in_range(raw: &str) -> Result<(), TestCaseError> {
        if let Ok(grade) = raw.parse::<Grade>() {
            prop_assert!(grade.value().is_finite());
            prop_assert!((0.0..=MAX_GRADE).contains(&grade.value()));
        }
        Ok(())
    }

    /// A pass flag always wins over a grade, and only the pass is done
    /// without a grade.
    fn check_pass_wins(raw: &str) -> Result<(), TestCaseError> {
        let completion = Completion::from_raw(Some(raw), true);
        prop_assert_eq!(completion, Completion::Pass);
        prop_assert!(completion.grade().is_none());

        let graded = Completion::from_raw(Some(raw), false);
        prop_assert_eq!(graded.is_done(), raw.parse::<Grade>().is_ok());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn parsed_grade_in_range(raw in raw_grade_strategy()) {
            check_parsed_grade_in_range(&raw)?;
        }

        #[test]
        fn pass_wins(raw in raw_grade_strategy()) {
            check_pass_wins(&raw)?;
        }
    }
}
