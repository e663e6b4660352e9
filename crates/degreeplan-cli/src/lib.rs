//! CLI logic for the degree plan checker.
//!
//! Loads the catalog, degree template and session named on the command line,
//! evaluates the plan and writes the report.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use degreeplan::{
    DegreePlanError, Parsed, PlanEvaluator,
    catalog::Catalog,
    export::{Exporter, json::JsonExporter, text::TextExporter},
    template::DegreeTemplate,
};
use degreeplan_parser::{StoredSession, merge_catalogs};

use error_adapter::warning_reportables;

/// Run the degreeplan CLI application
///
/// # Errors
///
/// Returns `DegreePlanError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Documents that cannot be loaded
/// - Report export errors
pub fn run(args: &Args) -> Result<(), DegreePlanError> {
    info!(
        catalogs = args.catalogs.len(),
        template:? = args.template,
        session:? = args.session;
        "Checking degree plan"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let evaluator = PlanEvaluator::new(app_config);

    let catalog = load_catalogs(&evaluator, &args.catalogs)?;

    let session = match &args.session {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            let parsed = evaluator.parse_session(&source)?;
            report_warnings(&parsed, &source);
            parsed.into_value()
        }
        None => StoredSession::default(),
    };

    let template = load_template(&evaluator, args, session.template)?;
    let report = evaluator.evaluate(&template, &catalog, &session.state);

    let exporter: Box<dyn Exporter> = match args.format.as_str() {
        "json" => Box::new(JsonExporter::new().with_pretty(true)),
        "text" => Box::new(TextExporter::new()),
        other => {
            return Err(DegreePlanError::Config(format!(
                "unknown report format `{other}`"
            )));
        }
    };

    match &args.output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            exporter.export_report(&report, &mut file)?;
            file.flush()?;
            info!(output_file = path; "Report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            exporter.export_report(&report, &mut stdout)?;
        }
    }

    Ok(())
}

/// Loads every catalog and merges them in order.
fn load_catalogs(evaluator: &PlanEvaluator, paths: &[String]) -> Result<Catalog, DegreePlanError> {
    let mut merged: Option<Catalog> = None;
    for path in paths {
        let source = fs::read_to_string(path)?;
        let parsed = evaluator.parse_catalog(&source)?;
        report_warnings(&parsed, &source);
        let catalog = parsed.into_value();
        info!(path, courses = catalog.len(); "Catalog loaded");
        merged = Some(match merged {
            Some(first) => merge_catalogs(first, catalog),
            None => catalog,
        });
    }
    Ok(merged.unwrap_or_default())
}

/// Picks the template from `--template`, falling back to the one embedded in
/// the session.
fn load_template(
    evaluator: &PlanEvaluator,
    args: &Args,
    embedded: Option<DegreeTemplate>,
) -> Result<DegreeTemplate, DegreePlanError> {
    let Some(path) = &args.template else {
        return embedded.ok_or_else(|| {
            DegreePlanError::Config(
                "no degree template: pass --template or a session with an embedded template"
                    .to_string(),
            )
        });
    };

    let source = fs::read_to_string(path)?;
    let parsed = evaluator.parse_degrees(&source)?;
    report_warnings(&parsed, &source);
    parsed
        .into_value()
        .into_template(args.degree.as_deref())
        .map_err(|err| DegreePlanError::new_parse_error(err, source.clone()))
}

/// Renders loader warnings against their source document.
fn report_warnings<T>(parsed: &Parsed<T>, source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warning_reportables(parsed.warnings(), source) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }
}
