//! Human-readable report.

use std::io::Write;

use log::debug;

use crate::{
    average::Averages,
    consolidate::RuleBoard,
    evaluate::Evaluation,
    export::{Error, Exporter},
    report::PlanReport,
};

/// Writes the report as plain text, one section per concern.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    fn write_prerequisites(&self, report: &PlanReport, out: &mut dyn Write) -> Result<(), Error> {
        writeln!(out, "Prerequisites")?;
        if report.statuses.is_empty() {
            writeln!(out, "  (empty plan)")?;
        }
        for status in &report.statuses {
            let mark = if status.status.is_satisfied() {
                "ok"
            } else if status.status.is_error() {
                "!!"
            } else {
                "~~"
            };
            writeln!(
                out,
                "  [{mark}] semester {} {}: {}",
                status.semester + 1,
                status.course,
                status.status
            )?;
        }

        if !report.edges.is_empty() {
            writeln!(out, "Edges")?;
            for edge in &report.edges {
                writeln!(out, "  {} -> {}", edge.from, edge.to)?;
            }
        }

        if let Some(cycle) = &report.cycle {
            let courses: Vec<String> = cycle.iter().map(ToString::to_string).collect();
            writeln!(out, "Warning: prerequisite cycle between {}", courses.join(", "))?;
        }
        Ok(())
    }

    fn write_rules(&self, board: &RuleBoard, out: &mut dyn Write) -> Result<(), Error> {
        writeln!(out, "Rules")?;
        if let Some(consolidated) = &board.consolidated {
            writeln!(
                out,
                "  [{}] consolidated: {}",
                check(consolidated.is_satisfied),
                consolidated
            )?;
            for evaluation in &consolidated.rules {
                write_evaluation(evaluation, "    ", out)?;
            }
        }
        for evaluation in &board.standalone {
            write_evaluation(evaluation, "  ", out)?;
        }
        if let Some(classification) = &board.classification {
            writeln!(out, "Exemptions")?;
            write_evaluation(classification, "  ", out)?;
            for item in &classification.items {
                let credits = match (item.credits, item.max_credits) {
                    (Some(credits), Some(max)) => format!(" ({credits} / {max} credits)"),
                    _ => String::new(),
                };
                writeln!(out, "    [{}] {}{credits}", check(item.checked), item.name)?;
            }
        }
        Ok(())
    }

    fn write_averages(&self, averages: &Averages, out: &mut dyn Write) -> Result<(), Error> {
        writeln!(out, "Averages")?;
        for semester in &averages.semesters {
            writeln!(
                out,
                "  {}: {} ({} credits)",
                semester.label,
                format_average(semester.average),
                semester.credits
            )?;
        }
        writeln!(
            out,
            "  overall: {} ({} credits)",
            format_average(averages.overall),
            averages.total_credits
        )?;
        Ok(())
    }
}

fn check(satisfied: bool) -> &'static str {
    if satisfied { "x" } else { " " }
}

fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "-".to_string(), |average| format!("{average:.2}"))
}

fn write_evaluation(evaluation: &Evaluation, indent: &str, out: &mut dyn Write) -> Result<(), Error> {
    writeln!(
        out,
        "{indent}[{}] {}: {}",
        check(evaluation.is_satisfied),
        evaluation.description,
        evaluation.display_text
    )?;
    for list in &evaluation.lists {
        writeln!(
            out,
            "{indent}    [{}] {}: {} / {}",
            check(list.is_satisfied()),
            list.list,
            list.done,
            list.required
        )?;
    }
    Ok(())
}

impl Exporter for TextExporter {
    fn export_report(&self, report: &PlanReport, out: &mut dyn Write) -> Result<(), Error> {
        writeln!(out, "{} ({})", report.template_name, report.template_id)?;
        self.write_prerequisites(report, out)?;
        self.write_rules(&report.rules, out)?;
        self.write_averages(&report.averages, out)?;
        debug!(courses = report.statuses.len(); "Report exported as text");
        Ok(())
    }
}
