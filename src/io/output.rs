use crate::audit::{AuditReport, ModularityReport};
use crate::metrics::{CouplingLoad, ModularityRating, StabilityBand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

/// Rows shown in the coupling table.
const TOP_COUPLED: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, report: &AuditReport) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        let Some(report) = report.as_complete() else {
            writeln!(self.writer, "{}", "No modules to analyze.".yellow())?;
            return Ok(());
        };

        self.write_header()?;
        self.write_summary(report)?;
        self.write_coupling(report)?;
        self.write_communities(report)?;
        self.write_circular_groups(report)?;
        self.write_warnings(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Modularity Report".bold().underline())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title.bold())?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ModularityReport) -> anyhow::Result<()> {
        let rating = report.modularity_rating();
        let rating_label = match rating {
            ModularityRating::Strong => rating.to_string().green(),
            ModularityRating::Moderate => rating.to_string().yellow(),
            ModularityRating::Weak => rating.to_string().red(),
        };

        let mut table = new_table();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec!["Modules".to_string(), report.module_count().to_string()]);
        table.add_row(vec![
            "Dependencies".to_string(),
            report.graph.edge_count().to_string(),
        ]);
        table.add_row(vec![
            "Communities".to_string(),
            report.community_count().to_string(),
        ]);
        table.add_row(vec![
            "Modularity".to_string(),
            format!("{:.3} ({})", report.modularity, rating),
        ]);
        table.add_row(vec!["Density".to_string(), format!("{:.3}", report.density)]);
        table.add_row(vec![
            "Circular groups".to_string(),
            report.circular_groups.len().to_string(),
        ]);

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer, "Modularity is {}", rating_label)?;
        Ok(())
    }

    fn write_coupling(&mut self, report: &ModularityReport) -> anyhow::Result<()> {
        let ranked = report.most_coupled(TOP_COUPLED);
        if ranked.is_empty() {
            return Ok(());
        }
        self.section("Most coupled modules")?;

        let mut table = new_table();
        table.set_header(vec!["Module", "Ce", "Ca", "Instability", "Stability", "Load"]);
        for (module, record) in ranked {
            table.add_row(vec![
                module.clone(),
                record.efferent_coupling.to_string(),
                record.afferent_coupling.to_string(),
                record.instability_display(),
                StabilityBand::classify(record.instability_index).to_string(),
                CouplingLoad::classify(record.total_coupling()).to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_communities(&mut self, report: &ModularityReport) -> anyhow::Result<()> {
        self.section("Communities")?;
        for (id, members) in report.community_members().iter().enumerate() {
            let names: Vec<&str> = members.iter().map(|m| m.as_str()).collect();
            writeln!(
                self.writer,
                "  {} {}",
                format!("#{id}").cyan(),
                names.join(", ")
            )?;
        }
        Ok(())
    }

    fn write_circular_groups(&mut self, report: &ModularityReport) -> anyhow::Result<()> {
        if report.circular_groups.is_empty() {
            return Ok(());
        }
        self.section("Circular dependencies")?;
        for group in &report.circular_groups {
            let mut path = group.clone();
            if let Some(first) = group.first() {
                path.push(first.clone());
            }
            writeln!(self.writer, "  {} {}", "↻".red(), path.join(" -> "))?;
        }
        Ok(())
    }

    fn write_warnings(&mut self, report: &ModularityReport) -> anyhow::Result<()> {
        if report.warnings.is_empty() {
            return Ok(());
        }
        self.section("Warnings")?;
        for warning in &report.warnings {
            writeln!(self.writer, "  {} {}", "!".yellow(), warning)?;
        }
        Ok(())
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
