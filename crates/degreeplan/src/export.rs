pub mod json;
pub mod text;

use std::io::Write;

use crate::report::PlanReport;

/// Writes a [`PlanReport`] in some output format.
pub trait Exporter {
    fn export_report(&self, _report: &PlanReport, _out: &mut dyn Write) -> Result<(), Error> {
        Err(Error::Render("Plan report export not implemented".to_string()))
    }

    /// Renders the report into a string.
    fn render_report(&self, report: &PlanReport) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.export_report(report, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| Error::Render(err.to_string()))
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
