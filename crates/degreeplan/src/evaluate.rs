//! Degree rule evaluation.
//!
//! Every rule yields three numbers: `done` (completed credits or courses),
//! `planned` (everything placed in the plan, graded or not) and `required`
//! (the rule's threshold). A rule is satisfied when `done` reaches
//! `required`; planned progress never satisfies a rule.
//!
//! Evaluation never fails. Missing lists, missing parameters and unknown rule
//! types produce an unsatisfied result with a [`Notice`] explaining why.

use std::{collections::HashSet, fmt};

use indexmap::IndexSet;
use log::{debug, trace};
use serde::Serialize;

use degreeplan_core::{
    catalog::Catalog,
    course_list::CourseLists,
    identifier::Id,
    plan::Plan,
    rule::{ClassificationItem, DegreeRule, ListRequirement, RuleSpec},
    session::{ClassificationState, Completions, SessionState},
    template::DegreeTemplate,
};

/// What a rule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Credits,
    Courses,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Credits => "credits",
            Unit::Courses => "courses",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a rule could not be evaluated normally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Notice {
    /// None of the rule's courses is in the plan.
    NotApplicable,
    /// The rule names a course list the template does not define.
    ListNotFound { list: String },
    /// A required parameter is missing.
    Misconfigured { field: &'static str },
    /// The rule type is unknown to this engine.
    NotImplemented { type_name: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotApplicable => write!(f, "not applicable: none of the rule's courses is in the plan"),
            Notice::ListNotFound { list } => write!(f, "course list `{list}` not found"),
            Notice::Misconfigured { field } => write!(f, "misconfigured rule: `{field}` is missing"),
            Notice::NotImplemented { type_name } => {
                write!(f, "rule type `{type_name}` is not implemented")
            }
        }
    }
}

/// Progress of one list of a multi-list rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListProgress {
    pub list: String,
    pub found: bool,
    pub done: f64,
    pub planned: f64,
    pub required: f64,
}

impl ListProgress {
    pub fn is_satisfied(&self) -> bool {
        self.found && self.done >= self.required
    }
}

/// State of one item of a classification rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationProgress {
    pub id: Id,
    pub name: String,
    pub checked: bool,
    /// Entered credits, clamped to the item's cap. Only for credit items.
    pub credits: Option<f64>,
    pub max_credits: Option<f64>,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub rule_id: String,
    pub description: String,
    pub rule_type: String,
    pub done: f64,
    pub planned: f64,
    pub required: f64,
    pub unit: Unit,
    pub is_satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub display_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<ListProgress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ClassificationProgress>,
}

/// Counts before they become an [`Evaluation`].
#[derive(Debug, Default)]
struct Tally {
    done: f64,
    planned: f64,
}

/// Everything a rule can look at: one consistent snapshot of the plan and
/// the session.
#[derive(Debug)]
pub struct RuleContext<'a> {
    plan: &'a Plan,
    catalog: &'a Catalog,
    completions: &'a Completions,
    classification: &'a ClassificationState,
    lists: &'a CourseLists,
    mandatory: HashSet<Id>,
    /// Planned courses, each once, in plan order.
    planned: IndexSet<Id>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        plan: &'a Plan,
        catalog: &'a Catalog,
        session: &'a SessionState,
        lists: &'a CourseLists,
        mandatory: impl IntoIterator<Item = Id>,
    ) -> Self {
        Self {
            plan,
            catalog,
            completions: &session.completions,
            classification: &session.classification,
            lists,
            mandatory: mandatory.into_iter().collect(),
            planned: plan.course_ids().collect(),
        }
    }

    /// Context for evaluating `template`'s rules against its own plan.
    pub fn from_template(
        template: &'a DegreeTemplate,
        catalog: &'a Catalog,
        session: &'a SessionState,
    ) -> Self {
        Self::new(
            template.plan(),
            catalog,
            session,
            template.lists(),
            template.mandatory().iter().copied(),
        )
    }

    pub fn plan(&self) -> &Plan {
        self.plan
    }

    /// Credits of the planned courses matching `filter`.
    fn credits(&self, filter: impl Fn(Id) -> bool) -> Tally {
        self.tally(filter, |id| self.catalog.credits(id))
    }

    /// Number of planned courses matching `filter`.
    fn courses(&self, filter: impl Fn(Id) -> bool) -> Tally {
        self.tally(filter, |_| 1.0)
    }

    fn tally(&self, filter: impl Fn(Id) -> bool, weight: impl Fn(Id) -> f64) -> Tally {
        self.planned
            .iter()
            .copied()
            .filter(|id| filter(*id))
            .fold(Tally::default(), |mut tally, id| {
                let weight = weight(id);
                tally.planned += weight;
                if self.completions.is_done(id) {
                    tally.done += weight;
                }
                tally
            })
    }
}

/// Builds evaluations for one rule.
struct Evaluator<'r> {
    rule: &'r DegreeRule,
}

impl Evaluator<'_> {
    fn result(&self, unit: Unit, tally: Tally, required: f64) -> Evaluation {
        let is_satisfied = tally.done >= required;
        let display_text = format!(
            "{} / {} {} ({} planned)",
            round(tally.done),
            round(required),
            unit,
            round(tally.planned)
        );
        self.evaluation(unit, tally, required, is_satisfied, None, display_text)
    }

    /// An unsatisfied result carrying `notice`.
    fn notice(&self, unit: Unit, tally: Tally, required: f64, notice: Notice) -> Evaluation {
        let display_text = notice.to_string();
        self.evaluation(unit, tally, required, false, Some(notice), display_text)
    }

    fn evaluation(
        &self,
        unit: Unit,
        tally: Tally,
        required: f64,
        is_satisfied: bool,
        notice: Option<Notice>,
        display_text: String,
    ) -> Evaluation {
        Evaluation {
            rule_id: self.rule.id().to_string(),
            description: self.rule.description().to_string(),
            rule_type: self.rule.spec().type_name().to_string(),
            done: tally.done,
            planned: tally.planned,
            required,
            unit,
            is_satisfied,
            notice,
            display_text,
            lists: Vec::new(),
            items: Vec::new(),
        }
    }

    /// A threshold rule: `tally` against `threshold`, or misconfigured.
    fn threshold(
        &self,
        unit: Unit,
        tally: Tally,
        threshold: Option<f64>,
        field: &'static str,
    ) -> Evaluation {
        match threshold {
            Some(required) => self.result(unit, tally, required),
            None => self.notice(unit, tally, 0.0, Notice::Misconfigured { field }),
        }
    }

    fn list_rule(
        &self,
        ctx: &RuleContext<'_>,
        unit: Unit,
        list: Option<&str>,
        threshold: Option<f64>,
        threshold_field: &'static str,
    ) -> Evaluation {
        let Some(name) = list else {
            return self.notice(
                unit,
                Tally::default(),
                threshold.unwrap_or(0.0),
                Notice::Misconfigured {
                    field: "course_list_name",
                },
            );
        };
        let Some(list) = ctx.lists.get(name) else {
            return self.notice(
                unit,
                Tally::default(),
                threshold.unwrap_or(0.0),
                Notice::ListNotFound {
                    list: name.to_string(),
                },
            );
        };

        let tally = match unit {
            Unit::Credits => ctx.credits(|id| list.contains(id)),
            Unit::Courses => ctx.courses(|id| list.contains(id)),
        };
        self.threshold(unit, tally, threshold, threshold_field)
    }

    fn min_grade(&self, ctx: &RuleContext<'_>, min_grade: Option<f64>, courses: &[Id]) -> Evaluation {
        let present: IndexSet<Id> = courses
            .iter()
            .copied()
            .filter(|id| ctx.planned.contains(id))
            .collect();
        let Some(threshold) = min_grade else {
            return self.notice(
                Unit::Courses,
                Tally::default(),
                present.len() as f64,
                Notice::Misconfigured {
                    field: "min_grade_value",
                },
            );
        };
        if present.is_empty() {
            return self.notice(Unit::Courses, Tally::default(), 0.0, Notice::NotApplicable);
        }

        let reached = present
            .iter()
            .filter(|id| {
                ctx.completions
                    .get(**id)
                    .grade()
                    .is_some_and(|grade| grade.value() >= threshold)
            })
            .count();
        let count = present.len() as f64;
        let tally = Tally {
            done: reached as f64,
            planned: count,
        };

        let mut evaluation = self.result(Unit::Courses, tally, count);
        evaluation.display_text = format!(
            "{reached} / {} courses with grade {} or above",
            present.len(),
            round(threshold)
        );
        evaluation
    }

    fn multiple_lists(&self, ctx: &RuleContext<'_>, requirements: &[ListRequirement]) -> Evaluation {
        if requirements.is_empty() {
            return self.notice(
                Unit::Courses,
                Tally::default(),
                0.0,
                Notice::Misconfigured { field: "lists" },
            );
        }

        let progress: Vec<ListProgress> = requirements
            .iter()
            .map(|requirement| match ctx.lists.get(&requirement.list) {
                Some(list) => {
                    let tally = ctx.courses(|id| list.contains(id));
                    ListProgress {
                        list: requirement.list.clone(),
                        found: true,
                        done: tally.done.min(requirement.min),
                        planned: tally.planned.min(requirement.min),
                        required: requirement.min,
                    }
                }
                None => ListProgress {
                    list: requirement.list.clone(),
                    found: false,
                    done: 0.0,
                    planned: 0.0,
                    required: requirement.min,
                },
            })
            .collect();

        let tally = Tally {
            done: progress.iter().map(|list| list.done).sum(),
            planned: progress.iter().map(|list| list.planned).sum(),
        };
        let required = progress.iter().map(|list| list.required).sum();

        let missing = progress.iter().find(|list| !list.found).map(|list| list.list.clone());
        let mut evaluation = match missing {
            Some(list) => self.notice(Unit::Courses, tally, required, Notice::ListNotFound { list }),
            None => self.result(Unit::Courses, tally, required),
        };
        evaluation.lists = progress;
        evaluation
    }

    fn classification(&self, ctx: &RuleContext<'_>, items: &[ClassificationItem]) -> Evaluation {
        let progress: Vec<ClassificationProgress> = items
            .iter()
            .map(|item| {
                let entry = ctx.classification.entry(item.id);
                let max_credits = item.credit_input.map(|input| input.max);
                ClassificationProgress {
                    id: item.id,
                    name: item.name.clone(),
                    checked: entry.checked,
                    credits: max_credits.map(|max| entry.credits.unwrap_or(0.0).clamp(0.0, max)),
                    max_credits,
                }
            })
            .collect();

        let checkboxes = progress.iter().filter(|item| item.max_credits.is_none());
        let checked = checkboxes.clone().filter(|item| item.checked).count() as f64;
        let required = checkboxes.count() as f64;
        let tally = Tally {
            done: checked,
            planned: checked,
        };

        let mut evaluation = self.result(Unit::Courses, tally, required);
        evaluation.display_text = format!("{} / {} exemptions", round(checked), round(required));
        evaluation.items = progress;
        evaluation
    }
}

/// Whether `id` matches one of the comma-separated prefixes of `pattern`.
/// A trailing `*` on a prefix is optional.
fn matches_pattern(id: Id, pattern: &str) -> bool {
    pattern
        .split(',')
        .map(|prefix| prefix.trim().trim_end_matches('*'))
        .filter(|prefix| !prefix.is_empty())
        .any(|prefix| id.starts_with(prefix))
}

/// Rounds to two decimals for display.
fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evaluates one rule against `ctx`.
pub fn evaluate(rule: &DegreeRule, ctx: &RuleContext<'_>) -> Evaluation {
    let evaluator = Evaluator { rule };

    let evaluation = match rule.spec() {
        RuleSpec::TotalCredits { required } => {
            let mut tally = ctx.credits(|_| true);
            let exemptions = ctx.classification.checked_credits();
            tally.done += exemptions;
            tally.planned += exemptions;
            evaluator.threshold(Unit::Credits, tally, *required, "required_credits")
        }
        RuleSpec::MinCredits { min } => {
            evaluator.threshold(Unit::Credits, ctx.credits(|_| true), *min, "min")
        }
        RuleSpec::CreditsFromList { list, required } => evaluator.list_rule(
            ctx,
            Unit::Credits,
            list.as_deref(),
            *required,
            "required_credits",
        ),
        RuleSpec::MinCoursesFromList { list, min } => {
            evaluator.list_rule(ctx, Unit::Courses, list.as_deref(), *min, "min")
        }
        RuleSpec::MinCreditsFromMandatory { min } => evaluator.threshold(
            Unit::Credits,
            ctx.credits(|id| ctx.mandatory.contains(&id)),
            *min,
            "min",
        ),
        RuleSpec::MinCreditsFromAnySelectiveList { min } => {
            let selective = ctx.lists.selective_courses();
            evaluator.threshold(
                Unit::Credits,
                ctx.credits(|id| selective.contains(&id)),
                *min,
                "min",
            )
        }
        RuleSpec::MinCreditsFromIdPattern {
            pattern,
            exclude,
            min,
        } => match pattern {
            Some(pattern) => evaluator.threshold(
                Unit::Credits,
                ctx.credits(|id| matches_pattern(id, pattern) && !exclude.contains(&id)),
                *min,
                "min",
            ),
            None => evaluator.notice(
                Unit::Credits,
                Tally::default(),
                min.unwrap_or(0.0),
                Notice::Misconfigured { field: "idPattern" },
            ),
        },
        RuleSpec::MinGrade { min_grade, courses } => evaluator.min_grade(ctx, *min_grade, courses),
        RuleSpec::MinCoursesFromMultipleLists { lists } => evaluator.multiple_lists(ctx, lists),
        RuleSpec::ClassificationCourses { items } => evaluator.classification(ctx, items),
        RuleSpec::Unsupported { type_name } => {
            debug!(rule_id = rule.id(), type_name = type_name.as_str(); "Unsupported rule type");
            evaluator.notice(
                Unit::Courses,
                Tally::default(),
                0.0,
                Notice::NotImplemented {
                    type_name: type_name.clone(),
                },
            )
        }
    };

    trace!(
        rule_id = rule.id(),
        done = evaluation.done,
        planned = evaluation.planned,
        required = evaluation.required,
        satisfied = evaluation.is_satisfied;
        "Rule evaluated"
    );
    evaluation
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use degreeplan_core::{
        catalog::Course,
        course_list::{CourseList, ListKind},
        plan::Semester,
        rule::CreditInput,
    };

    use super::*;

    struct Fixture {
        plan: Plan,
        catalog: Catalog,
        session: SessionState,
        lists: CourseLists,
        mandatory: Vec<Id>,
    }

    impl Fixture {
        fn new(semesters: &[&[&str]]) -> Self {
            let catalog = [
                ("A", 10.0),
                ("B", 10.0),
                ("C", 4.0),
                ("D", 3.0),
                ("E", 2.0),
                ("02340114", 4.0),
                ("02360343", 3.0),
                ("09340001", 2.0),
            ]
            .into_iter()
            .map(|(id, credits)| Course::new(id, id, credits))
            .collect();
            let plan = semesters
                .iter()
                .enumerate()
                .map(|(idx, courses)| Semester::new(idx.to_string(), courses.iter().copied()))
                .collect();
            Self {
                plan,
                catalog,
                session: SessionState::default(),
                lists: CourseLists::new(),
                mandatory: Vec::new(),
            }
        }

        fn grade(mut self, id: &str, grade: &str) -> Self {
            self.session.completions.set_grade(Id::new(id), grade);
            self
        }

        fn pass(mut self, id: &str) -> Self {
            self.session.completions.set_pass(Id::new(id), true);
            self
        }

        fn list(mut self, name: &str, kind: ListKind, courses: &[&str]) -> Self {
            self.lists.insert(CourseList::new(name, kind, courses.iter().copied()));
            self
        }

        fn mandatory(mut self, courses: &[&str]) -> Self {
            self.mandatory = courses.iter().map(|id| Id::new(id)).collect();
            self
        }

        fn eval(&self, spec: RuleSpec) -> Evaluation {
            let ctx = RuleContext::new(
                &self.plan,
                &self.catalog,
                &self.session,
                &self.lists,
                self.mandatory.iter().copied(),
            );
            evaluate(&DegreeRule::new("r", "rule", spec), &ctx)
        }
    }

    #[test]
    fn test_total_credits() {
        let fixture = Fixture::new(&[&["A"], &["B"]]).grade("A", "90").grade("B", "80");
        let result = fixture.eval(RuleSpec::TotalCredits {
            required: Some(20.0),
        });
        assert_approx_eq!(f64, result.done, 20.0);
        assert_approx_eq!(f64, result.planned, 20.0);
        assert!(result.is_satisfied);

        let fixture = Fixture::new(&[&["A"], &["B"]]).grade("A", "90");
        let result = fixture.eval(RuleSpec::TotalCredits {
            required: Some(20.0),
        });
        assert_approx_eq!(f64, result.done, 10.0);
        assert_approx_eq!(f64, result.planned, 20.0);
        assert!(!result.is_satisfied);
        assert_eq!(result.display_text, "10 / 20 credits (20 planned)");
    }

    #[test]
    fn test_total_credits_include_exemption_credits() {
        let mut fixture = Fixture::new(&[&["A"]]).pass("A");
        let id = Id::new("miluim_exemption");
        fixture.session.classification.set_checked(id, true);
        fixture.session.classification.set_credits(id, 4.0, Some(6.0));

        let result = fixture.eval(RuleSpec::TotalCredits {
            required: Some(14.0),
        });
        assert_approx_eq!(f64, result.done, 14.0);
        assert!(result.is_satisfied);
    }

    #[test]
    fn test_min_credits_ignores_exemptions() {
        let mut fixture = Fixture::new(&[&["C"]]).grade("C", "70");
        fixture.session.classification.set_checked(Id::new("x"), true);
        fixture.session.classification.set_credits(Id::new("x"), 4.0, None);

        let result = fixture.eval(RuleSpec::MinCredits { min: Some(8.0) });
        assert_approx_eq!(f64, result.done, 4.0);
        assert!(!result.is_satisfied);
    }

    #[test]
    fn test_list_rules() {
        let fixture = Fixture::new(&[&["C", "D", "E"]])
            .grade("C", "95")
            .pass("D")
            .list("Electives", ListKind::Selective, &["C", "D", "E", "Z"]);

        let credits = fixture.eval(RuleSpec::CreditsFromList {
            list: Some("Electives".to_string()),
            required: Some(7.0),
        });
        assert_approx_eq!(f64, credits.done, 7.0);
        assert_approx_eq!(f64, credits.planned, 9.0);
        assert!(credits.is_satisfied);

        let courses = fixture.eval(RuleSpec::MinCoursesFromList {
            list: Some("Electives".to_string()),
            min: Some(3.0),
        });
        assert_eq!(courses.unit, Unit::Courses);
        assert_approx_eq!(f64, courses.done, 2.0);
        assert_approx_eq!(f64, courses.planned, 3.0);
        assert!(!courses.is_satisfied);
    }

    #[test]
    fn test_list_not_found_and_misconfigured() {
        let fixture = Fixture::new(&[&["C"]]).grade("C", "95");

        let missing = fixture.eval(RuleSpec::CreditsFromList {
            list: Some("Nope".to_string()),
            required: Some(1.0),
        });
        assert!(!missing.is_satisfied);
        assert_eq!(
            missing.notice,
            Some(Notice::ListNotFound {
                list: "Nope".to_string()
            })
        );
        assert_eq!(missing.display_text, "course list `Nope` not found");

        let no_threshold = fixture.eval(RuleSpec::MinCredits { min: None });
        assert!(!no_threshold.is_satisfied);
        assert_eq!(no_threshold.notice, Some(Notice::Misconfigured { field: "min" }));
    }

    #[test]
    fn test_mandatory_and_selective() {
        let fixture = Fixture::new(&[&["A", "C", "D"]])
            .grade("A", "90")
            .grade("C", "90")
            .grade("D", "90")
            .mandatory(&["A"])
            .list("List 1", ListKind::Selective, &["A", "C"])
            .list("List 2", ListKind::Selective, &["C", "D"])
            .list("mandatory", ListKind::Mandatory, &["A"]);

        let mandatory = fixture.eval(RuleSpec::MinCreditsFromMandatory { min: Some(10.0) });
        assert_approx_eq!(f64, mandatory.done, 10.0);
        assert!(mandatory.is_satisfied);

        // C counts once even though it is in two lists.
        let selective = fixture.eval(RuleSpec::MinCreditsFromAnySelectiveList { min: Some(18.0) });
        assert_approx_eq!(f64, selective.done, 17.0);
        assert!(!selective.is_satisfied);
    }

    #[test]
    fn test_selective_lists_keep_mandatory_ids() {
        let fixture = Fixture::new(&[&["A", "C"]])
            .grade("A", "90")
            .grade("C", "90")
            .mandatory(&["A"])
            .list("Electives", ListKind::Selective, &["A", "C"]);

        let result = fixture.eval(RuleSpec::MinCreditsFromAnySelectiveList { min: Some(14.0) });
        assert_approx_eq!(f64, result.done, 14.0);
        assert_approx_eq!(f64, result.planned, 14.0);
        assert!(result.is_satisfied);
    }

    #[test]
    fn test_id_pattern() {
        let fixture = Fixture::new(&[&["02340114", "02360343", "09340001"]])
            .grade("02340114", "80")
            .grade("02360343", "80")
            .grade("09340001", "80");

        let result = fixture.eval(RuleSpec::MinCreditsFromIdPattern {
            pattern: Some("0234*, 0236".to_string()),
            exclude: vec![Id::new("02360343")],
            min: Some(4.0),
        });
        assert_approx_eq!(f64, result.done, 4.0);
        assert!(result.is_satisfied);

        assert!(matches_pattern(Id::new("09340001"), "0934*"));
        assert!(!matches_pattern(Id::new("09340001"), " , *"));
    }

    #[test]
    fn test_min_grade() {
        let fixture = Fixture::new(&[&["A", "B", "C"]])
            .grade("A", "60")
            .grade("B", "50")
            .pass("C");

        let result = fixture.eval(RuleSpec::MinGrade {
            min_grade: Some(55.0),
            courses: vec![Id::new("A"), Id::new("B"), Id::new("C"), Id::new("Z")],
        });
        assert_approx_eq!(f64, result.done, 1.0);
        assert_approx_eq!(f64, result.required, 3.0);
        assert!(!result.is_satisfied);
        assert_eq!(result.display_text, "1 / 3 courses with grade 55 or above");

        let satisfied = Fixture::new(&[&["A"]]).grade("A", "55").eval(RuleSpec::MinGrade {
            min_grade: Some(55.0),
            courses: vec![Id::new("A"), Id::new("Z")],
        });
        assert!(satisfied.is_satisfied);
    }

    #[test]
    fn test_min_grade_not_applicable() {
        let result = Fixture::new(&[&["A"]]).eval(RuleSpec::MinGrade {
            min_grade: Some(55.0),
            courses: vec![Id::new("Z")],
        });

        assert!(!result.is_satisfied);
        assert_eq!(result.notice, Some(Notice::NotApplicable));
    }

    #[test]
    fn test_multiple_lists() {
        let fixture = Fixture::new(&[&["A", "B", "C", "D", "E"]])
            .grade("A", "90")
            .grade("B", "90")
            .grade("C", "90")
            .grade("D", "90")
            .list("List A", ListKind::Selective, &["A", "B", "C"])
            .list("List B", ListKind::Selective, &["D", "E"]);

        let result = fixture.eval(RuleSpec::MinCoursesFromMultipleLists {
            lists: vec![
                ListRequirement {
                    list: "List A".to_string(),
                    min: 2.0,
                },
                ListRequirement {
                    list: "List B".to_string(),
                    min: 2.0,
                },
            ],
        });

        assert_approx_eq!(f64, result.done, 3.0);
        assert_approx_eq!(f64, result.required, 4.0);
        assert!(!result.is_satisfied);
        assert_eq!(result.lists.len(), 2);
        assert!(result.lists[0].is_satisfied());
        assert!(!result.lists[1].is_satisfied());
        assert_approx_eq!(f64, result.lists[1].done, 1.0);
        assert_approx_eq!(f64, result.lists[1].planned, 2.0);
    }

    #[test]
    fn test_multiple_lists_missing_list() {
        let fixture = Fixture::new(&[&["A"]]).grade("A", "90").list("List A", ListKind::Selective, &["A"]);

        let result = fixture.eval(RuleSpec::MinCoursesFromMultipleLists {
            lists: vec![
                ListRequirement {
                    list: "List A".to_string(),
                    min: 1.0,
                },
                ListRequirement {
                    list: "Gone".to_string(),
                    min: 0.0,
                },
            ],
        });

        assert!(!result.is_satisfied);
        assert_eq!(
            result.notice,
            Some(Notice::ListNotFound {
                list: "Gone".to_string()
            })
        );
        assert!(!result.lists[1].found);
    }

    #[test]
    fn test_classification_courses() {
        let mut fixture = Fixture::new(&[]);
        let english = Id::new("01130013");
        let miluim = Id::new("miluim_exemption");
        fixture.session.classification.set_checked(english, true);
        fixture.session.classification.set_checked(miluim, true);
        fixture.session.classification.set_credits(miluim, 9.0, None);

        let result = fixture.eval(RuleSpec::ClassificationCourses {
            items: vec![
                ClassificationItem {
                    id: english,
                    name: "English".to_string(),
                    credit_input: None,
                },
                ClassificationItem {
                    id: Id::new("01130014"),
                    name: "Hebrew".to_string(),
                    credit_input: None,
                },
                ClassificationItem {
                    id: miluim,
                    name: "Reserve duty".to_string(),
                    credit_input: Some(CreditInput { max: 6.0, step: 1.0 }),
                },
            ],
        });

        assert_approx_eq!(f64, result.done, 1.0);
        assert_approx_eq!(f64, result.required, 2.0);
        assert!(!result.is_satisfied);
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[2].credits, Some(6.0));
        assert_eq!(result.items[0].credits, None);
    }

    #[test]
    fn test_unsupported_rule() {
        let result = Fixture::new(&[&["A"]]).eval(RuleSpec::Unsupported {
            type_name: "mystery".to_string(),
        });

        assert!(!result.is_satisfied);
        assert_eq!(result.rule_type, "mystery");
        assert_eq!(result.display_text, "rule type `mystery` is not implemented");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let fixture = Fixture::new(&[&["A", "C"]]).grade("A", "70");
        let spec = RuleSpec::MinCredits { min: Some(12.0) };

        assert_eq!(fixture.eval(spec.clone()), fixture.eval(spec));
    }
}
