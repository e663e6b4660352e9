use std::io::Write;

use log::debug;

use crate::{
    export::{Error, Exporter},
    report::PlanReport,
};

/// Writes the report as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Exporter for JsonExporter {
    fn export_report(&self, report: &PlanReport, out: &mut dyn Write) -> Result<(), Error> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, report)
        } else {
            serde_json::to_writer(&mut *out, report)
        };
        result.map_err(|err| Error::Render(err.to_string()))?;
        writeln!(out)?;
        debug!(pretty = self.pretty; "Report exported as JSON");
        Ok(())
    }
}
