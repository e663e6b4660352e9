//! Course catalog loading.

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use degreeplan_core::{
    catalog::{Catalog, Course},
    prerequisite::{GroupKind, PrerequisiteExpr},
};

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    json, prerequisite_text,
};

/// One catalog record as stored. Fields the engine does not use are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCourse {
    #[serde(rename = "_id")]
    id: Option<Value>,
    name: Option<String>,
    credits: Option<Value>,
    semester: Option<Value>,
    #[serde(rename = "prereqTree")]
    prereq_tree: Option<Value>,
    prerequisites: Option<String>,
    no_credit_courses: Option<Value>,
    #[serde(rename = "isClassificationCourse")]
    is_classification: Option<bool>,
}

/// Decodes catalog records into courses, collecting warnings.
struct CatalogLoader {
    catalog: Catalog,
    diagnostics: DiagnosticCollector,
}

impl CatalogLoader {
    fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Loads one record. `key` is the object key for keyed catalogs.
    fn record(&mut self, key: Option<&str>, value: Value) {
        let raw = match serde_json::from_value::<RawCourse>(value) {
            Ok(raw) => raw,
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "catalog record {} is malformed: {err}",
                        key.unwrap_or("without id")
                    ))
                    .with_code(ErrorCode::E101)
                    .with_help("the record is skipped"),
                );
                return;
            }
        };

        let id = raw
            .id
            .as_ref()
            .and_then(json::identifier)
            .or_else(|| key.map(str::to_string));
        let Some(id) = id else {
            self.diagnostics.emit(
                Diagnostic::warning("catalog record has no `_id`")
                    .with_code(ErrorCode::E200)
                    .with_help("the record is skipped"),
            );
            return;
        };

        let credits = self.credits(&id, raw.credits.as_ref());
        let mut course = Course::new(id.as_str(), raw.name.unwrap_or_default(), credits)
            .with_offered(raw.semester.as_ref().map(json::strings).unwrap_or_default())
            .with_classification(raw.is_classification.unwrap_or(false));

        if let Some(tree) = self.prerequisites(&id, raw.prereq_tree, raw.prerequisites) {
            course = course.with_prerequisites(tree);
        }
        if let Some(equivalents) = raw.no_credit_courses.as_ref().map(json::strings) {
            let joined = equivalents.join(",");
            if !joined.trim().is_empty() {
                course = course.with_equivalents(joined);
            }
        }

        if self.catalog.contains(course.id()) {
            self.diagnostics.emit(
                Diagnostic::warning(format!("course `{id}` is listed more than once"))
                    .with_code(ErrorCode::E203)
                    .with_help("the first record is kept; offered semesters are combined"),
            );
        }
        self.catalog.merge(course);
    }

    fn credits(&mut self, id: &str, value: Option<&Value>) -> f64 {
        let Some(value) = value else {
            return 0.0;
        };
        match json::number(value) {
            Some(credits) if credits >= 0.0 => credits,
            _ => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("course `{id}` has invalid credits `{value}`"))
                        .with_code(ErrorCode::E201)
                        .with_help("credits must be a non-negative number; the course counts as 0"),
                );
                0.0
            }
        }
    }

    /// The structured tree wins; free text is parsed only when it is absent.
    fn prerequisites(
        &mut self,
        id: &str,
        tree: Option<Value>,
        text: Option<String>,
    ) -> Option<PrerequisiteExpr> {
        if let Some(tree) = tree {
            return decode_tree(&tree, &mut |diagnostic| {
                self.diagnostics
                    .emit(diagnostic.in_context(format!("course `{id}` prerequisites")));
            });
        }

        let text = text?;
        let (tree, warnings) = prerequisite_text::parse_prerequisite_text(&text).into_parts();
        self.diagnostics.extend(
            warnings
                .into_iter()
                .map(|warning| warning.in_context(format!("course `{id}` prerequisite text"))),
        );
        tree
    }

    fn finish(self) -> Result<Parsed<Catalog>, ParseError> {
        let warnings = self.diagnostics.finish()?;
        Ok(Parsed::new(self.catalog, warnings))
    }
}

/// Decodes a stored prerequisite tree.
///
/// Returns `None` for `null` or an empty string. Shapes that are not a
/// course id, an `and`/`or` object or a `{type, list}` group become
/// [`PrerequisiteExpr::Unrecognized`] and are reported through `warn`.
fn decode_tree(value: &Value, warn: &mut dyn FnMut(Diagnostic)) -> Option<PrerequisiteExpr> {
    match value {
        Value::Null => None,
        Value::String(_) | Value::Number(_) => json::identifier(value).map(PrerequisiteExpr::course),
        Value::Object(object) => {
            if let Some(items) = object.get("and") {
                return Some(PrerequisiteExpr::AllOf(decode_items(items, warn)));
            }
            if let Some(items) = object.get("or") {
                return Some(PrerequisiteExpr::OneOf(decode_items(items, warn)));
            }
            if let (Some(Value::String(kind)), Some(items)) = (object.get("type"), object.get("list")) {
                return Some(PrerequisiteExpr::Group {
                    kind: GroupKind::from_name(kind),
                    items: decode_items(items, warn),
                    credit_threshold: object.get("credits").and_then(json::number),
                });
            }
            Some(unrecognized(value, warn))
        }
        Value::Bool(_) | Value::Array(_) => Some(unrecognized(value, warn)),
    }
}

fn decode_items(value: &Value, warn: &mut dyn FnMut(Diagnostic)) -> Vec<PrerequisiteExpr> {
    match value {
        Value::Array(items) => items.iter().filter_map(|item| decode_tree(item, warn)).collect(),
        other => vec![unrecognized(other, warn)],
    }
}

fn unrecognized(value: &Value, warn: &mut dyn FnMut(Diagnostic)) -> PrerequisiteExpr {
    warn(
        Diagnostic::warning(format!(
            "unrecognized prerequisite node ({})",
            json::type_name(value)
        ))
        .with_code(ErrorCode::E202)
        .with_help("the node is treated as satisfied"),
    );
    PrerequisiteExpr::Unrecognized
}

/// Loads a course catalog.
///
/// Accepts either an object keyed by course id or an array of records that
/// carry their id in `_id`.
///
/// # Errors
///
/// Fails when the source is not JSON or its top level is neither an object
/// nor an array. Problems inside records are returned as warnings.
pub fn parse_catalog(source: &str) -> Result<Parsed<Catalog>, ParseError> {
    let document = json::parse_document(source, "catalog")?;
    let mut loader = CatalogLoader::new();

    match document {
        Value::Object(records) => {
            for (key, record) in records {
                loader.record(Some(&key), record);
            }
        }
        Value::Array(records) => {
            for record in records {
                loader.record(None, record);
            }
        }
        other => return Err(json::unexpected_shape("catalog", "an object or an array", &other).into()),
    }

    let parsed = loader.finish()?;
    info!(
        courses = parsed.value().len(),
        warnings = parsed.warnings().len();
        "Catalog loaded"
    );
    Ok(parsed)
}

/// Merges two catalogs, e.g. two terms of the same course offering.
///
/// Ids present in both keep the record of `first`, with the offered semesters
/// of both. Ids only in `second` are appended.
pub fn merge_catalogs(first: Catalog, second: Catalog) -> Catalog {
    let mut merged = first;
    let before = merged.len();
    for course in second {
        merged.merge(course);
    }
    debug!(added = merged.len() - before; "Catalogs merged");
    merged
}
