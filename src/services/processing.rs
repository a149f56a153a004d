use anyhow::Result;
use log::info;
use std::fs;
use std::path::Path;

use crate::config::settings::AppConfig;
use crate::display;
use crate::errors::with_read_context;
use crate::output::{self, OutputWriter};
use crate::services::analysis::{analyze, GameAnalysis};

pub struct ProcessingService {
    config: AppConfig,
    writer: OutputWriter,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        let writer = OutputWriter::new(config.output.dir);
        Self { config, writer }
    }

    pub fn run(&self, xml_path: &Path) -> Result<()> {
        info!("=== Starting Play-by-Play Analysis ===\n");
        info!("Input: {}", xml_path.display());

        // Step 1: Read and analyze the document
        let xml = with_read_context(fs::read_to_string(xml_path), &xml_path.display().to_string())?;
        let analysis = self.analyze(&xml)?;

        // Step 2: Write all tables; nothing is written for an unusable document
        let written = output::write_all(&self.writer, &self.config.output, &analysis)?;
        info!(
            "  → Wrote {} files to {}\n",
            written.len(),
            self.writer.dir().display()
        );

        // Step 3: Console summary
        display::print_summary(&analysis);

        info!("=== Analysis Complete ===");
        Ok(())
    }

    fn analyze(&self, xml: &str) -> Result<GameAnalysis> {
        let analysis = analyze(xml, &self.config.game)?;
        info!(
            "  → {} vs {}: {} plays, {} warnings\n",
            analysis.metadata.away.name,
            analysis.metadata.home.name,
            analysis.plays.len(),
            analysis.diagnostics.len()
        );
        Ok(analysis)
    }
}
