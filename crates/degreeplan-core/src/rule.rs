//! Degree rules.
//!
//! Every rule has an id, a description and type-specific parameters. The set
//! of rule types is closed; anything else is kept as
//! [`RuleSpec::Unsupported`] so a template with newer rule types still loads.
//! Parameters the source may omit are optional and reported as
//! misconfiguration at evaluation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// The closed set of rule types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleType {
    #[serde(rename = "total_credits")]
    TotalCredits,
    #[serde(rename = "minCredits")]
    MinCredits,
    #[serde(rename = "credits_from_list")]
    CreditsFromList,
    #[serde(rename = "minCoursesFromList")]
    MinCoursesFromList,
    #[serde(rename = "minCreditsFromMandatory")]
    MinCreditsFromMandatory,
    #[serde(rename = "minCreditsFromAnySelectiveList")]
    MinCreditsFromAnySelectiveList,
    #[serde(rename = "minCreditsFromIdPattern")]
    MinCreditsFromIdPattern,
    #[serde(rename = "min_grade")]
    MinGrade,
    #[serde(rename = "minCoursesFromMultipleLists")]
    MinCoursesFromMultipleLists,
    #[serde(rename = "classification_courses")]
    ClassificationCourses,
}

impl RuleType {
    pub const ALL: [RuleType; 10] = [
        RuleType::TotalCredits,
        RuleType::MinCredits,
        RuleType::CreditsFromList,
        RuleType::MinCoursesFromList,
        RuleType::MinCreditsFromMandatory,
        RuleType::MinCreditsFromAnySelectiveList,
        RuleType::MinCreditsFromIdPattern,
        RuleType::MinGrade,
        RuleType::MinCoursesFromMultipleLists,
        RuleType::ClassificationCourses,
    ];

    /// The name used in template files.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::TotalCredits => "total_credits",
            RuleType::MinCredits => "minCredits",
            RuleType::CreditsFromList => "credits_from_list",
            RuleType::MinCoursesFromList => "minCoursesFromList",
            RuleType::MinCreditsFromMandatory => "minCreditsFromMandatory",
            RuleType::MinCreditsFromAnySelectiveList => "minCreditsFromAnySelectiveList",
            RuleType::MinCreditsFromIdPattern => "minCreditsFromIdPattern",
            RuleType::MinGrade => "min_grade",
            RuleType::MinCoursesFromMultipleLists => "minCoursesFromMultipleLists",
            RuleType::ClassificationCourses => "classification_courses",
        }
    }

    /// Looks up a rule type by its template name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-list threshold of a multi-list rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequirement {
    pub list: String,
    pub min: f64,
}

/// Bounds of a user-entered credit value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditInput {
    pub max: f64,
    pub step: f64,
}

/// One checkbox of a classification rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationItem {
    pub id: Id,
    pub name: String,
    pub credit_input: Option<CreditInput>,
}

/// Type-specific rule parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    TotalCredits {
        required: Option<f64>,
    },
    MinCredits {
        min: Option<f64>,
    },
    CreditsFromList {
        list: Option<String>,
        required: Option<f64>,
    },
    MinCoursesFromList {
        list: Option<String>,
        min: Option<f64>,
    },
    MinCreditsFromMandatory {
        min: Option<f64>,
    },
    MinCreditsFromAnySelectiveList {
        min: Option<f64>,
    },
    MinCreditsFromIdPattern {
        pattern: Option<String>,
        exclude: Vec<Id>,
        min: Option<f64>,
    },
    MinGrade {
        min_grade: Option<f64>,
        courses: Vec<Id>,
    },
    MinCoursesFromMultipleLists {
        lists: Vec<ListRequirement>,
    },
    ClassificationCourses {
        items: Vec<ClassificationItem>,
    },
    /// A rule type this engine does not know.
    Unsupported {
        type_name: String,
    },
}

impl RuleSpec {
    /// The rule type, or `None` for unsupported rules.
    pub fn rule_type(&self) -> Option<RuleType> {
        let kind = match self {
            RuleSpec::TotalCredits { .. } => RuleType::TotalCredits,
            RuleSpec::MinCredits { .. } => RuleType::MinCredits,
            RuleSpec::CreditsFromList { .. } => RuleType::CreditsFromList,
            RuleSpec::MinCoursesFromList { .. } => RuleType::MinCoursesFromList,
            RuleSpec::MinCreditsFromMandatory { .. } => RuleType::MinCreditsFromMandatory,
            RuleSpec::MinCreditsFromAnySelectiveList { .. } => {
                RuleType::MinCreditsFromAnySelectiveList
            }
            RuleSpec::MinCreditsFromIdPattern { .. } => RuleType::MinCreditsFromIdPattern,
            RuleSpec::MinGrade { .. } => RuleType::MinGrade,
            RuleSpec::MinCoursesFromMultipleLists { .. } => RuleType::MinCoursesFromMultipleLists,
            RuleSpec::ClassificationCourses { .. } => RuleType::ClassificationCourses,
            RuleSpec::Unsupported { .. } => return None,
        };
        Some(kind)
    }

    /// The type name as written in the template.
    pub fn type_name(&self) -> &str {
        match self {
            RuleSpec::Unsupported { type_name } => type_name,
            other => other.rule_type().map_or("", RuleType::as_str),
        }
    }
}

/// A graduation rule of a degree template.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeRule {
    id: String,
    description: String,
    spec: RuleSpec,
}

impl DegreeRule {
    pub fn new(id: impl Into<String>, description: impl Into<String>, spec: RuleSpec) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            spec,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn rule_type(&self) -> Option<RuleType> {
        self.spec.rule_type()
    }
}
