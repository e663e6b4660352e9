//! Credit-weighted grade averages.

use serde::Serialize;

use degreeplan_core::{catalog::Catalog, plan::Plan, session::Completions};

/// Average of one semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterAverage {
    pub label: String,
    /// `None` when no course of the semester carries a numeric grade.
    pub average: Option<f64>,
    /// Credits of every placed course, graded or not.
    pub credits: f64,
}

/// Per-semester and overall averages of a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Averages {
    pub semesters: Vec<SemesterAverage>,
    pub overall: Option<f64>,
    pub total_credits: f64,
}

/// Running sum of grade × credits.
#[derive(Debug, Default, Clone, Copy)]
struct Weighted {
    sum: f64,
    weight: f64,
}

impl Weighted {
    fn add(&mut self, grade: f64, credits: f64) {
        self.sum += grade * credits;
        self.weight += credits;
    }

    fn merge(&mut self, other: Weighted) {
        self.sum += other.sum;
        self.weight += other.weight;
    }

    fn average(self) -> Option<f64> {
        (self.weight > 0.0).then(|| self.sum / self.weight)
    }
}

/// Computes the averages of `plan`.
///
/// Only courses with a numeric grade and positive credits count towards an
/// average. Pass flags carry no grade. Courses missing from the catalog carry
/// no credits.
pub fn calculate_averages(plan: &Plan, catalog: &Catalog, completions: &Completions) -> Averages {
    let mut overall = Weighted::default();
    let mut total_credits = 0.0;

    let semesters = plan
        .semesters()
        .iter()
        .map(|semester| {
            let mut weighted = Weighted::default();
            let mut credits = 0.0;
            for &course in semester.courses() {
                let course_credits = catalog.credits(course);
                credits += course_credits;
                if course_credits <= 0.0 {
                    continue;
                }
                if let Some(grade) = completions.get(course).grade() {
                    weighted.add(grade.value(), course_credits);
                }
            }
            overall.merge(weighted);
            total_credits += credits;
            SemesterAverage {
                label: semester.label().to_string(),
                average: weighted.average(),
                credits,
            }
        })
        .collect();

    Averages {
        semesters,
        overall: overall.average(),
        total_credits,
    }
}
