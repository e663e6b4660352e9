//! Degree templates: the starting plan, its rules and its course lists.

use std::collections::HashSet;

use crate::{
    course_list::CourseLists,
    identifier::Id,
    plan::Plan,
    rule::{DegreeRule, RuleType},
};

/// A degree template.
#[derive(Debug, Clone, Default)]
pub struct DegreeTemplate {
    id: String,
    name: String,
    total_credits: Option<f64>,
    plan: Plan,
    rules: Vec<DegreeRule>,
    lists: CourseLists,
    mandatory: Vec<Id>,
}

impl DegreeTemplate {
    /// Creates a template whose mandatory courses are the ones in `plan`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, plan: Plan) -> Self {
        let mandatory = plan.course_ids().collect();
        Self {
            id: id.into(),
            name: name.into(),
            total_credits: None,
            plan,
            rules: Vec::new(),
            lists: CourseLists::new(),
            mandatory,
        }
    }

    pub fn with_total_credits(mut self, total_credits: f64) -> Self {
        self.total_credits = Some(total_credits);
        self
    }

    pub fn with_rules(mut self, rules: Vec<DegreeRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_lists(mut self, lists: CourseLists) -> Self {
        self.lists = lists;
        self
    }

    /// Overrides the mandatory course ids derived from the plan.
    pub fn with_mandatory(mut self, mandatory: Vec<Id>) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Replaces the plan, keeping the mandatory set untouched.
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }

    /// Appends rules shared by all templates.
    pub fn extend_rules(&mut self, rules: impl IntoIterator<Item = DegreeRule>) {
        self.rules.extend(rules);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_credits(&self) -> Option<f64> {
        self.total_credits
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn rules(&self) -> &[DegreeRule] {
        &self.rules
    }

    pub fn lists(&self) -> &CourseLists {
        &self.lists
    }

    pub fn mandatory(&self) -> &[Id] {
        &self.mandatory
    }

    pub fn mandatory_set(&self) -> HashSet<Id> {
        self.mandatory.iter().copied().collect()
    }

    /// Every classification rule, in rule order.
    pub fn classification_rules(&self) -> impl Iterator<Item = &DegreeRule> {
        self.rules
            .iter()
            .filter(|rule| rule.rule_type() == Some(RuleType::ClassificationCourses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{plan::Semester, rule::RuleSpec};

    #[test]
    fn test_mandatory_defaults_to_plan() {
        let plan = Plan::new(vec![Semester::new("1", ["A", "B"])]);
        let template = DegreeTemplate::new("cs", "Computer Science", plan);

        assert_eq!(template.mandatory().len(), 2);
        assert!(template.mandatory_set().contains(&Id::new("A")));
    }

    #[test]
    fn test_with_mandatory_overrides() {
        let plan = Plan::new(vec![Semester::new("1", ["A", "B"])]);
        let template =
            DegreeTemplate::new("cs", "Computer Science", plan).with_mandatory(vec![Id::new("Z")]);

        assert_eq!(template.mandatory(), &[Id::new("Z")]);
    }

    #[test]
    fn test_classification_rules() {
        let template = DegreeTemplate::new("cs", "CS", Plan::default()).with_rules(vec![
            DegreeRule::new("t", "total", RuleSpec::TotalCredits { required: None }),
            DegreeRule::new(
                "c",
                "classification",
                RuleSpec::ClassificationCourses { items: vec![] },
            ),
        ]);

        let ids: Vec<&str> = template.classification_rules().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c"]);
    }
}
