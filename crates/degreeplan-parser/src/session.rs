//! Stored session loading: grades, pass flags, classification checkboxes and
//! the student's edited plan.

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;
use serde_json::Value;

use degreeplan_core::{
    identifier::Id,
    session::{ClassificationState, Completions, SessionState},
    template::DegreeTemplate,
};

use crate::{
    Parsed,
    degrees::{check_list_references, decode_template},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    json,
};

/// Key of the local-storage wrapper around a stored plan.
const AUTOSAVE_KEY: &str = "autosavedPlan";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSession {
    grades: Option<IndexMap<String, Value>>,
    #[serde(rename = "binaryStates")]
    binary_states: Option<IndexMap<String, Value>>,
    #[serde(rename = "classificationChecked")]
    classification_checked: Option<IndexMap<String, Value>>,
    #[serde(rename = "classificationCredits")]
    classification_credits: Option<IndexMap<String, Value>>,
    #[serde(alias = "degreeTemplate")]
    template: Option<Value>,
}

/// A loaded session.
#[derive(Debug, Clone, Default)]
pub struct StoredSession {
    /// Everything the student entered.
    pub state: SessionState,
    /// The edited plan saved with the session, if any.
    pub template: Option<DegreeTemplate>,
}

fn flag(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

fn completions(raw: &RawSession, diagnostics: &mut DiagnosticCollector) -> Completions {
    let mut completions = Completions::new();

    for (course, value) in raw.grades.iter().flatten() {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Null => continue,
            other => {
                diagnostics.emit(
                    Diagnostic::warning(format!(
                        "grade of `{course}` must be a string or a number, found {}",
                        json::type_name(other)
                    ))
                    .with_code(ErrorCode::E400),
                );
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }
        if let Err(err) = text.parse::<degreeplan_core::session::Grade>() {
            diagnostics.emit(
                Diagnostic::warning(format!("grade of `{course}` is invalid: {err}"))
                    .with_code(ErrorCode::E400)
                    .with_help("the course is treated as ungraded"),
            );
            continue;
        }
        completions.set_grade(Id::new(course), &text);
    }

    // A pass flag wins over a grade.
    for (course, value) in raw.binary_states.iter().flatten() {
        if flag(value) {
            completions.set_pass(Id::new(course), true);
        }
    }

    completions
}

fn classification(raw: &RawSession, diagnostics: &mut DiagnosticCollector) -> ClassificationState {
    let mut state = ClassificationState::new();

    for (id, value) in raw.classification_checked.iter().flatten() {
        state.set_checked(Id::new(id), flag(value));
    }
    for (id, value) in raw.classification_credits.iter().flatten() {
        match json::number(value) {
            Some(credits) => state.set_credits(Id::new(id), credits, None),
            None if value.is_null() => {}
            None => diagnostics.emit(
                Diagnostic::warning(format!("classification credits of `{id}` are invalid: {value}"))
                    .with_code(ErrorCode::E401)
                    .with_help("the value is ignored"),
            ),
        }
    }

    state
}

/// Loads a stored session.
///
/// Both a bare stored plan and the local-storage wrapper
/// `{"autosavedPlan": {...}}` are accepted.
///
/// # Errors
///
/// Fails when the source is not JSON or its top level is not an object.
pub fn parse_session(source: &str) -> Result<Parsed<StoredSession>, ParseError> {
    let mut document = json::parse_document(source, "session")?;
    if let Value::Object(object) = &mut document {
        if let Some(inner @ Value::Object(_)) = object.shift_remove(AUTOSAVE_KEY) {
            document = inner;
        }
    }
    if !document.is_object() {
        return Err(json::unexpected_shape("session", "an object", &document).into());
    }

    let mut diagnostics = DiagnosticCollector::new();
    let raw = match serde_json::from_value::<RawSession>(document) {
        Ok(raw) => raw,
        Err(err) => {
            return Err(Diagnostic::error(format!("session is malformed: {err}"))
                .with_code(ErrorCode::E101)
                .into());
        }
    };

    let state = SessionState::new(
        completions(&raw, &mut diagnostics),
        classification(&raw, &mut diagnostics),
    );
    let template = raw
        .template
        .filter(|value| !value.is_null())
        .and_then(|value| decode_template(None, value, &mut diagnostics));
    if let Some(template) = &template {
        check_list_references(template, &mut diagnostics);
    }

    let warnings = diagnostics.finish()?;
    info!(
        graded = state.completions.iter().count(),
        has_template = template.is_some(),
        warnings = warnings.len();
        "Session loaded"
    );
    Ok(Parsed::new(StoredSession { state, template }, warnings))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use degreeplan_core::session::Completion;

    use super::*;

    #[test]
    fn test_grades_and_pass_flags() {
        let parsed = parse_session(
            r#"{
                "grades": { "A": "87", "B": "", "C": 95, "D": "abc", "E": "70" },
                "binaryStates": { "E": true, "F": true, "G": false }
            }"#,
        )
        .unwrap();

        let completions = &parsed.value().state.completions;
        assert_eq!(completions.get(Id::new("A")).grade().map(|g| g.value()), Some(87.0));
        assert_eq!(completions.get(Id::new("B")), Completion::Ungraded);
        assert!(completions.is_done(Id::new("C")));
        assert_eq!(completions.get(Id::new("D")), Completion::Ungraded);
        assert_eq!(completions.get(Id::new("E")), Completion::Pass);
        assert_eq!(completions.get(Id::new("F")), Completion::Pass);
        assert!(!completions.is_done(Id::new("G")));

        assert_eq!(parsed.warnings().len(), 1);
        assert_eq!(parsed.warnings()[0].code(), Some(ErrorCode::E400));
    }

    #[test]
    fn test_classification_state() {
        let parsed = parse_session(
            r#"{
                "classificationChecked": { "01130013": true, "miluim_exemption": true },
                "classificationCredits": { "miluim_exemption": 4.5, "x": "lots" }
            }"#,
        )
        .unwrap();

        let state = &parsed.value().state.classification;
        assert!(state.is_checked(Id::new("01130013")));
        assert_approx_eq!(f64, state.checked_credits(), 4.5);
        assert_eq!(parsed.warnings()[0].code(), Some(ErrorCode::E401));
    }

    #[test]
    fn test_autosave_wrapper_and_template() {
        let parsed = parse_session(
            r#"{"autosavedPlan": {
                "template": {
                    "id": "cs",
                    "name": "CS",
                    "semesters": { "1": ["A"], "2": ["B"] }
                },
                "grades": { "A": "90" }
            }}"#,
        )
        .unwrap();

        let session = parsed.value();
        let template = session.template.as_ref().unwrap();
        assert_eq!(template.id(), "cs");
        assert_eq!(template.plan().len(), 2);
        assert!(session.state.completions.is_done(Id::new("A")));
    }

    #[test]
    fn test_session_must_be_object() {
        let err = parse_session("\"plan\"").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
    }
}
