//! Degreeplan - consistency checks for multi-semester degree plans.
//!
//! Given a course catalog, a degree template and what the student entered so
//! far, the engine reports prerequisite problems between semesters, the
//! prerequisite edges between planned courses, graduation-rule progress and
//! grade averages. Evaluation is a pure function of that snapshot.

pub mod average;
pub mod config;
pub mod consolidate;
pub mod edges;
pub mod equivalence;
pub mod evaluate;
pub mod export;
pub mod graph;
pub mod prerequisite;
pub mod report;

mod error;

pub use degreeplan_core::{catalog, identifier, plan, rule, session, template};
pub use degreeplan_parser::{Diagnostic, Parsed};

pub use error::DegreePlanError;
pub use report::PlanReport;

use log::{debug, info, trace, warn};

use degreeplan_core::{
    catalog::Catalog,
    rule::RuleSpec,
    session::SessionState,
    template::DegreeTemplate,
};
use degreeplan_parser::{Degrees, StoredSession};

use config::AppConfig;
use consolidate::RuleBoard;
use evaluate::RuleContext;
use graph::PrerequisiteGraph;
use prerequisite::PrereqChecker;

/// Loads documents and evaluates plans with one configuration.
///
/// # Examples
///
/// ```rust
/// use degreeplan::{PlanEvaluator, config::AppConfig};
///
/// let catalog = r#"{
///     "02340114": { "name": "Intro", "credits": 4 },
///     "02340124": { "name": "Systems", "credits": 4, "prereqTree": "02340114" }
/// }"#;
/// let degrees = r#"{
///     "cs": {
///         "name": "Computer Science",
///         "semesters": { "Fall": ["02340114"], "Spring": ["02340124"] },
///         "rules": [{ "id": "total", "type": "total_credits", "required_credits": 8 }]
///     }
/// }"#;
///
/// let evaluator = PlanEvaluator::new(AppConfig::default());
/// let catalog = evaluator.parse_catalog(catalog).unwrap().into_value();
/// let degrees = evaluator.parse_degrees(degrees).unwrap().into_value();
/// let template = degrees.get("cs").unwrap();
///
/// let report = evaluator.evaluate(template, &catalog, &Default::default());
/// assert!(report.prerequisite_errors().next().is_none());
/// assert_eq!(report.edges.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PlanEvaluator {
    config: AppConfig,
}

impl PlanEvaluator {
    /// Create a new evaluator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`DegreePlanError::Parse`] when the document is not a catalog.
    pub fn parse_catalog(&self, source: &str) -> Result<Parsed<Catalog>, DegreePlanError> {
        info!("Parsing catalog");
        let parsed = degreeplan_parser::parse_catalog(source)
            .map_err(|err| DegreePlanError::new_parse_error(err, source))?;
        log_warnings("catalog", parsed.warnings());
        Ok(parsed)
    }

    /// Parse a degrees file.
    ///
    /// # Errors
    ///
    /// Returns [`DegreePlanError::Parse`] when the document is not a degrees
    /// file.
    pub fn parse_degrees(&self, source: &str) -> Result<Parsed<Degrees>, DegreePlanError> {
        info!("Parsing degree templates");
        let parsed = degreeplan_parser::parse_degrees(source)
            .map_err(|err| DegreePlanError::new_parse_error(err, source))?;
        log_warnings("degrees", parsed.warnings());
        Ok(parsed)
    }

    /// Parse a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`DegreePlanError::Parse`] when the document is not a session.
    pub fn parse_session(&self, source: &str) -> Result<Parsed<StoredSession>, DegreePlanError> {
        info!("Parsing session");
        let parsed = degreeplan_parser::parse_session(source)
            .map_err(|err| DegreePlanError::new_parse_error(err, source))?;
        log_warnings("session", parsed.warnings());
        Ok(parsed)
    }

    /// Evaluate `template`'s plan and rules against `catalog` and `session`.
    ///
    /// Never fails: malformed pieces of the inputs show up in the report
    /// instead.
    pub fn evaluate(
        &self,
        template: &DegreeTemplate,
        catalog: &Catalog,
        session: &SessionState,
    ) -> PlanReport {
        info!(template = template.id(), semesters = template.plan().len(); "Evaluating plan");

        let session = cap_classification_credits(template, session);
        let plan = template.plan();

        let checker = PrereqChecker::new(
            plan,
            catalog,
            &session.classification,
            self.config.prerequisites(),
        );
        let statuses = checker.check_plan(plan);

        let edges = edges::derive_edges(plan, catalog);
        let graph = PrerequisiteGraph::new(plan, &edges);
        let cycle = graph.find_cycle();
        if let Some(cycle) = &cycle {
            warn!(courses = cycle.len(); "Planned courses form a prerequisite cycle");
        }

        let ctx = RuleContext::from_template(template, catalog, &session);
        let rules = RuleBoard::new(
            template.rules(),
            &ctx,
            &self.config.rules().consolidation_set(),
        );

        let averages = average::calculate_averages(plan, catalog, &session.completions);

        let report = PlanReport {
            template_id: template.id().to_string(),
            template_name: template.name().to_string(),
            statuses,
            edges: edges.into_iter().collect(),
            rules,
            averages,
            cycle,
        };
        debug!(
            errors = report.prerequisite_errors().count(),
            rules_satisfied = report.rules.is_satisfied();
            "Plan evaluated"
        );
        report
    }
}

/// Copy of `session` with every classification credit value clamped to the
/// cap its template item declares.
fn cap_classification_credits(template: &DegreeTemplate, session: &SessionState) -> SessionState {
    let mut session = session.clone();
    let inputs = template
        .classification_rules()
        .filter_map(|rule| match rule.spec() {
            RuleSpec::ClassificationCourses { items } => Some(items),
            _ => None,
        })
        .flatten()
        .filter_map(|item| item.credit_input.map(|input| (item.id, input.max)));

    for (id, max) in inputs {
        if let Some(credits) = session.classification.entry(id).credits {
            trace!(course:% = id, credits, max; "Capping classification credits");
            session.classification.set_credits(id, credits, Some(max));
        }
    }
    session
}

fn log_warnings(document: &str, warnings: &[Diagnostic]) {
    for warning in warnings {
        debug!(document, code:? = warning.code(); "{}", warning.message());
    }
}
