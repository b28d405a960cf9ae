use crate::audit::ModularityAudit;
use crate::config::{self, ModmapConfig};
use crate::extractor::FileExtractor;
use crate::io::output::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub tree: PathBuf,
    pub diagram: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub resolution: Option<f64>,
    pub no_parallel: bool,
    pub require_layout: bool,
    pub format: crate::cli::OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;

    let mut extractor = FileExtractor::new(&config.tree).with_exclude(
        settings
            .filter
            .patterns()
            .context("Invalid exclude pattern")?,
    );
    if let Some(diagram) = &config.diagram {
        extractor = extractor.with_diagram(diagram);
    }

    let report = ModularityAudit::new(settings).run(&extractor);
    if report.is_empty() {
        tracing::warn!(tree = %config.tree.display(), "nothing to report");
    }

    let sink: Box<dyn Write> = match &config.output {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    let format: OutputFormat = config.format.into();
    create_writer(format, sink).write_results(&report)?;
    Ok(())
}

/// Config file values with command-line overrides applied.
fn resolve_settings(config: &AnalyzeConfig) -> Result<ModmapConfig> {
    let mut settings = match &config.config {
        Some(path) => config::load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config::load_config(),
    };

    if let Some(resolution) = config.resolution {
        settings.community.resolution = resolution;
    }
    if config.no_parallel {
        settings.execution.parallel = false;
    }
    if config.require_layout {
        settings.layout.required = true;
    }

    settings.validate().context("Invalid analysis settings")?;
    Ok(settings)
}
