//! Degree template loading.
//!
//! A degrees file maps template ids to templates. The optional `globalRules`
//! key holds rules appended to every template.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use degreeplan_core::{
    course_list::{CourseList, CourseLists, ListKind, MANDATORY_LIST_NAME},
    identifier::Id,
    plan::{Plan, Semester},
    rule::{ClassificationItem, CreditInput, DegreeRule, ListRequirement, RuleSpec, RuleType},
    template::DegreeTemplate,
};

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    json,
};

const GLOBAL_RULES_KEY: &str = "globalRules";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTemplate {
    id: Option<Value>,
    name: Option<String>,
    total_credits: Option<Value>,
    semesters: IndexMap<String, Value>,
    rules: Option<Vec<Value>>,
    #[serde(rename = "courses-lists")]
    course_lists: Option<IndexMap<String, Value>>,
    #[serde(rename = "semester-names")]
    semester_names: Option<IndexMap<String, String>>,
    #[serde(rename = "definedMandatoryCourseIds")]
    mandatory: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRule {
    id: Option<Value>,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    required_credits: Option<Value>,
    min: Option<Value>,
    course_list_name: Option<String>,
    #[serde(rename = "listName")]
    list_name: Option<String>,
    lists: Option<Vec<Value>>,
    min_grade_value: Option<Value>,
    courses_for_min_grade: Option<Value>,
    courses: Option<Vec<Value>>,
    #[serde(rename = "idPattern", alias = "id_pattern", alias = "pattern")]
    id_pattern: Option<String>,
    #[serde(
        rename = "excludedCourses",
        alias = "excludeCourses",
        alias = "exclude_courses"
    )]
    excluded: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawListRequirement {
    #[serde(rename = "listName")]
    list_name: String,
    min: Value,
}

#[derive(Debug, Deserialize)]
struct RawClassificationItem {
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "creditInput")]
    credit_input: Option<RawCreditInput>,
}

#[derive(Debug, Deserialize)]
struct RawCreditInput {
    max: Value,
    #[serde(default)]
    step: Option<Value>,
}

/// Decodes rules, reporting problems in the context of one template.
struct RuleDecoder<'d> {
    context: String,
    diagnostics: &'d mut DiagnosticCollector,
}

impl RuleDecoder<'_> {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic.in_context(&self.context));
    }

    fn rules(&mut self, values: Vec<Value>) -> Vec<DegreeRule> {
        values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| self.rule(index, value))
            .collect()
    }

    fn rule(&mut self, index: usize, value: Value) -> Option<DegreeRule> {
        let raw = match serde_json::from_value::<RawRule>(value) {
            Ok(raw) => raw,
            Err(err) => {
                self.warn(
                    Diagnostic::warning(format!("rule #{} is malformed: {err}", index + 1))
                        .with_code(ErrorCode::E303)
                        .with_help("the rule is skipped"),
                );
                return None;
            }
        };

        let id = match raw.id.as_ref().and_then(json::identifier) {
            Some(id) => id,
            None => {
                let generated = format!("rule-{}", index + 1);
                self.warn(
                    Diagnostic::warning(format!("rule #{} has no id", index + 1))
                        .with_code(ErrorCode::E301)
                        .with_help(format!("it is reported as `{generated}`")),
                );
                generated
            }
        };

        let spec = self.spec(&id, &raw);
        Some(DegreeRule::new(
            id,
            raw.description.clone().unwrap_or_default(),
            spec,
        ))
    }

    fn spec(&mut self, id: &str, raw: &RawRule) -> RuleSpec {
        let type_name = raw.kind.clone().unwrap_or_default();
        let Some(kind) = RuleType::from_name(&type_name) else {
            self.warn(
                Diagnostic::warning(format!("rule `{id}` has unsupported type `{type_name}`"))
                    .with_code(ErrorCode::E302)
                    .with_help("the rule is reported as not implemented"),
            );
            return RuleSpec::Unsupported { type_name };
        };

        let required_first = |this: &mut Self| {
            this.number(id, "required_credits", raw.required_credits.as_ref())
                .or_else(|| this.number(id, "min", raw.min.as_ref()))
        };
        let min_first = |this: &mut Self| {
            this.number(id, "min", raw.min.as_ref())
                .or_else(|| this.number(id, "required_credits", raw.required_credits.as_ref()))
        };

        match kind {
            RuleType::TotalCredits => RuleSpec::TotalCredits {
                required: required_first(self),
            },
            RuleType::MinCredits => RuleSpec::MinCredits {
                min: min_first(self),
            },
            RuleType::CreditsFromList => RuleSpec::CreditsFromList {
                list: raw.course_list_name.clone().or_else(|| raw.list_name.clone()),
                required: required_first(self),
            },
            RuleType::MinCoursesFromList => RuleSpec::MinCoursesFromList {
                list: raw.list_name.clone().or_else(|| raw.course_list_name.clone()),
                min: min_first(self),
            },
            RuleType::MinCreditsFromMandatory => RuleSpec::MinCreditsFromMandatory {
                min: min_first(self),
            },
            RuleType::MinCreditsFromAnySelectiveList => RuleSpec::MinCreditsFromAnySelectiveList {
                min: min_first(self),
            },
            RuleType::MinCreditsFromIdPattern => RuleSpec::MinCreditsFromIdPattern {
                pattern: raw.id_pattern.clone().filter(|pattern| !pattern.trim().is_empty()),
                exclude: raw
                    .excluded
                    .as_ref()
                    .map(json::strings)
                    .unwrap_or_default()
                    .iter()
                    .map(Id::from)
                    .collect(),
                min: min_first(self),
            },
            RuleType::MinGrade => RuleSpec::MinGrade {
                min_grade: self.number(id, "min_grade_value", raw.min_grade_value.as_ref()),
                courses: raw
                    .courses_for_min_grade
                    .as_ref()
                    .map(json::strings)
                    .unwrap_or_default()
                    .iter()
                    .map(Id::from)
                    .collect(),
            },
            RuleType::MinCoursesFromMultipleLists => RuleSpec::MinCoursesFromMultipleLists {
                lists: self.list_requirements(id, raw.lists.clone().unwrap_or_default()),
            },
            RuleType::ClassificationCourses => RuleSpec::ClassificationCourses {
                items: self.classification_items(id, raw.courses.clone().unwrap_or_default()),
            },
        }
    }

    /// A numeric field. A present but non-numeric value is reported.
    fn number(&mut self, id: &str, field: &str, value: Option<&Value>) -> Option<f64> {
        let value = value.filter(|value| !value.is_null())?;
        let number = json::number(value);
        if number.is_none() {
            self.warn(
                Diagnostic::warning(format!("rule `{id}` has non-numeric `{field}`: {value}"))
                    .with_code(ErrorCode::E303),
            );
        }
        number
    }

    fn list_requirements(&mut self, id: &str, values: Vec<Value>) -> Vec<ListRequirement> {
        let mut requirements = Vec::new();
        for value in values {
            let raw = match serde_json::from_value::<RawListRequirement>(value) {
                Ok(raw) => raw,
                Err(err) => {
                    self.warn(
                        Diagnostic::warning(format!("rule `{id}` has a malformed list entry: {err}"))
                            .with_code(ErrorCode::E303)
                            .with_help("the entry is skipped"),
                    );
                    continue;
                }
            };
            match self.number(id, "min", Some(&raw.min)) {
                Some(min) => requirements.push(ListRequirement {
                    list: raw.list_name,
                    min,
                }),
                None => continue,
            }
        }
        requirements
    }

    fn classification_items(&mut self, id: &str, values: Vec<Value>) -> Vec<ClassificationItem> {
        let mut items = Vec::new();
        for value in values {
            let raw = match serde_json::from_value::<RawClassificationItem>(value) {
                Ok(raw) => raw,
                Err(err) => {
                    self.warn(
                        Diagnostic::warning(format!("rule `{id}` has a malformed item: {err}"))
                            .with_code(ErrorCode::E303)
                            .with_help("the item is skipped"),
                    );
                    continue;
                }
            };
            let Some(item_id) = json::identifier(&raw.id) else {
                self.warn(
                    Diagnostic::warning(format!("rule `{id}` has an item without id"))
                        .with_code(ErrorCode::E303),
                );
                continue;
            };

            let credit_input = match raw.credit_input {
                Some(input) => match self.number(id, "creditInput.max", Some(&input.max)) {
                    Some(max) => Some(CreditInput {
                        max: max.max(0.0),
                        step: input
                            .step
                            .as_ref()
                            .and_then(json::number)
                            .filter(|step| *step > 0.0)
                            .unwrap_or(1.0),
                    }),
                    None => None,
                },
                None => None,
            };

            items.push(ClassificationItem {
                id: Id::new(&item_id),
                name: raw.name.unwrap_or_else(|| item_id.clone()),
                credit_input,
            });
        }
        items
    }
}

/// Decodes one template object. `key` is its key in a degrees file.
pub(crate) fn decode_template(
    key: Option<&str>,
    value: Value,
    diagnostics: &mut DiagnosticCollector,
) -> Option<DegreeTemplate> {
    let raw = match serde_json::from_value::<RawTemplate>(value) {
        Ok(raw) => raw,
        Err(err) => {
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "degree template `{}` is malformed: {err}",
                    key.unwrap_or("?")
                ))
                .with_code(ErrorCode::E300)
                .with_help("the template is skipped"),
            );
            return None;
        }
    };

    let id = raw
        .id
        .as_ref()
        .and_then(json::identifier)
        .or_else(|| key.map(str::to_string))
        .unwrap_or_default();
    let context = format!("degree template `{id}`");

    let semester_names = raw.semester_names.unwrap_or_default();
    let plan: Plan = raw
        .semesters
        .iter()
        .map(|(key, courses)| {
            let label = semester_names.get(key).unwrap_or(key);
            Semester::new(label.as_str(), json::strings(courses).iter())
        })
        .collect();

    let mut lists = CourseLists::new();
    for (name, value) in raw.course_lists.unwrap_or_default() {
        let courses = match &value {
            Value::Object(object) => object.get("courses").map(json::strings),
            Value::Array(_) => Some(json::strings(&value)),
            _ => None,
        };
        match courses {
            Some(courses) => {
                lists.insert(CourseList::new(name, ListKind::Selective, courses.iter()));
            }
            None => diagnostics.emit(
                Diagnostic::warning(format!(
                    "course list `{name}` must be an array of course ids"
                ))
                .with_code(ErrorCode::E300)
                .in_context(&context),
            ),
        }
    }

    let mut template = DegreeTemplate::new(id.as_str(), raw.name.unwrap_or_else(|| id.clone()), plan);
    if let Some(mandatory) = raw.mandatory.as_ref() {
        template = template.with_mandatory(json::strings(mandatory).iter().map(Id::from).collect());
    }
    if lists.get(MANDATORY_LIST_NAME).is_none() {
        lists.insert(CourseList::new(
            MANDATORY_LIST_NAME,
            ListKind::Mandatory,
            template.mandatory().iter().copied(),
        ));
    }
    template = template.with_lists(lists);

    if let Some(total) = raw.total_credits.as_ref().and_then(json::number) {
        template = template.with_total_credits(total);
    }

    let mut decoder = RuleDecoder {
        context,
        diagnostics,
    };
    let rules = decoder.rules(raw.rules.unwrap_or_default());
    template = template.with_rules(rules);

    debug!(
        template = template.id(),
        semesters = template.plan().len(),
        rules = template.rules().len();
        "Degree template decoded"
    );
    Some(template)
}

/// Warns about rules naming course lists the template does not define.
pub(crate) fn check_list_references(template: &DegreeTemplate, diagnostics: &mut DiagnosticCollector) {
    for rule in template.rules() {
        let names: Vec<&str> = match rule.spec() {
            RuleSpec::CreditsFromList { list: Some(list), .. }
            | RuleSpec::MinCoursesFromList { list: Some(list), .. } => vec![list.as_str()],
            RuleSpec::MinCoursesFromMultipleLists { lists } => {
                lists.iter().map(|req| req.list.as_str()).collect()
            }
            _ => Vec::new(),
        };
        for name in names {
            if template.lists().get(name).is_none() {
                diagnostics.emit(
                    Diagnostic::warning(format!(
                        "rule `{}` references unknown course list `{name}`",
                        rule.id()
                    ))
                    .with_code(ErrorCode::E304)
                    .with_help("the rule is reported as unsatisfied")
                    .in_context(format!("degree template `{}`", template.id())),
                );
            }
        }
    }
}

/// All templates of a degrees file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Degrees {
    templates: IndexMap<String, DegreeTemplate>,
}

impl Degrees {
    pub fn get(&self, id: &str) -> Option<&DegreeTemplate> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DegreeTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Takes the template `id`, or the first template when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an E305 diagnostic when the template does not exist.
    pub fn into_template(mut self, id: Option<&str>) -> Result<DegreeTemplate, ParseError> {
        let found = match id {
            Some(id) => self.templates.shift_remove(id),
            None => self.templates.shift_remove_index(0).map(|(_, template)| template),
        };
        found.ok_or_else(|| {
            let available = self.ids().collect::<Vec<_>>().join(", ");
            let message = match id {
                Some(id) => format!("unknown degree template `{id}`"),
                None => "the degrees file defines no template".to_string(),
            };
            Diagnostic::error(message)
                .with_code(ErrorCode::E305)
                .with_help(if available.is_empty() {
                    "add a template to the degrees file".to_string()
                } else {
                    format!("available templates: {available}")
                })
                .into()
        })
    }
}

/// Loads a degrees file.
///
/// # Errors
///
/// Fails when the source is not JSON or its top level is not an object.
/// Malformed templates and rules are skipped or degraded with warnings.
pub fn parse_degrees(source: &str) -> Result<Parsed<Degrees>, ParseError> {
    let document = json::parse_document(source, "degrees file")?;
    let Value::Object(entries) = document else {
        return Err(json::unexpected_shape("degrees file", "an object", &document).into());
    };

    let mut diagnostics = DiagnosticCollector::new();
    let mut templates = IndexMap::new();
    let mut global_rules = Vec::new();

    for (key, value) in entries {
        if key == GLOBAL_RULES_KEY {
            match value {
                Value::Array(values) => {
                    let mut decoder = RuleDecoder {
                        context: "global rules".to_string(),
                        diagnostics: &mut diagnostics,
                    };
                    global_rules = decoder.rules(values);
                }
                other => diagnostics.emit(
                    Diagnostic::warning(format!(
                        "`{GLOBAL_RULES_KEY}` must be an array, found {}",
                        json::type_name(&other)
                    ))
                    .with_code(ErrorCode::E300),
                ),
            }
            continue;
        }
        if let Some(template) = decode_template(Some(&key), value, &mut diagnostics) {
            templates.insert(key, template);
        }
    }

    for template in templates.values_mut() {
        template.extend_rules(global_rules.iter().cloned());
        check_list_references(template, &mut diagnostics);
    }

    let warnings = diagnostics.finish()?;
    info!(
        templates = templates.len(),
        global_rules = global_rules.len(),
        warnings = warnings.len();
        "Degrees file loaded"
    );
    Ok(Parsed::new(Degrees { templates }, warnings))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const DEGREES: &str = r#"{
        "cs": {
            "name": "Computer Science",
            "total_credits": 120,
            "semesters": {
                "s1": ["01040012", "02340114"],
                "s2": ["02340124"]
            },
            "semester-names": { "s1": "Semester 1" },
            "courses-lists": { "Electives": ["02360343", "02360360"] },
            "rules": [
                { "id": "r1", "type": "total_credits", "required_credits": 120 },
                { "id": "r2", "type": "minCoursesFromList", "listName": "Electives", "min": "2" },
                { "type": "min_grade", "min_grade_value": 55, "courses_for_min_grade": ["02340114"] },
                { "id": "r4", "type": "mystery" }
            ]
        },
        "globalRules": [
            { "id": "g1", "type": "classification_courses", "courses": [
                { "id": "01130013", "name": "English" },
                { "id": "miluim_exemption", "name": "Reserve duty", "creditInput": { "max": 6, "step": 0.5 } }
            ]}
        ]
    }"#;

    #[test]
    fn test_template_plan_and_lists() {
        let parsed = parse_degrees(DEGREES).unwrap();
        let template = parsed.value().get("cs").unwrap();

        assert_eq!(template.name(), "Computer Science");
        assert_eq!(template.total_credits(), Some(120.0));
        let labels: Vec<&str> = template.plan().semesters().iter().map(Semester::label).collect();
        assert_eq!(labels, vec!["Semester 1", "s2"]);
        assert_eq!(template.mandatory().len(), 3);

        assert_eq!(template.lists().get("Electives").unwrap().len(), 2);
        let mandatory = template.lists().get(MANDATORY_LIST_NAME).unwrap();
        assert_eq!(mandatory.kind(), ListKind::Mandatory);
        assert_eq!(mandatory.len(), 3);
    }

    #[test]
    fn test_rules_decoded_with_global_rules() {
        let parsed = parse_degrees(DEGREES).unwrap();
        let template = parsed.value().get("cs").unwrap();
        let rules = template.rules();

        assert_eq!(rules.len(), 5);
        assert_eq!(
            rules[1].spec(),
            &RuleSpec::MinCoursesFromList {
                list: Some("Electives".to_string()),
                min: Some(2.0)
            }
        );
        assert_eq!(rules[2].id(), "rule-3");
        assert_eq!(rules[3].rule_type(), None);
        assert_eq!(rules[4].id(), "g1");

        let RuleSpec::ClassificationCourses { items } = rules[4].spec() else {
            panic!("expected classification rule");
        };
        assert_eq!(items.len(), 2);
        let input = items[1].credit_input.unwrap();
        assert_approx_eq!(f64, input.max, 6.0);
        assert_approx_eq!(f64, input.step, 0.5);
    }

    #[test]
    fn test_warnings_for_degraded_rules() {
        let parsed = parse_degrees(DEGREES).unwrap();
        let codes: Vec<_> = parsed.warnings().iter().filter_map(Diagnostic::code).collect();

        assert_eq!(codes, vec![ErrorCode::E301, ErrorCode::E302]);
    }

    #[test]
    fn test_unknown_list_reference_warns() {
        let parsed = parse_degrees(
            r#"{"d": {"semesters": {}, "rules": [
                {"id": "r", "type": "credits_from_list", "course_list_name": "Missing", "required_credits": 10}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(parsed.warnings().len(), 1);
        assert_eq!(parsed.warnings()[0].code(), Some(ErrorCode::E304));
    }

    #[test]
    fn test_select_template() {
        let degrees = parse_degrees(DEGREES).unwrap().into_value();
        assert_eq!(degrees.clone().into_template(None).unwrap().id(), "cs");
        assert_eq!(degrees.clone().into_template(Some("cs")).unwrap().id(), "cs");

        let err = degrees.into_template(Some("math")).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E305));
        assert_eq!(err.diagnostics()[0].help(), Some("available templates: cs"));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = parse_degrees("[]").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
    }
}
