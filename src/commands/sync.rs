use crate::areas::builder::{OverviewBuilder, PassReport};
use crate::areas::overview::Overview;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Overview {
    /// Runs one update pass over every configured category and writes the
    /// outline back.
    pub fn sync(&self, outline: Option<&Path>) -> anyhow::Result<PassReport> {
        let file = self.outline_file(outline);
        let mut document = file
            .load(&self.config().outline.title)
            .with_context(|| format!("failed to read outline {}", file.path().display()))?;

        let report =
            OverviewBuilder::new(self.git()).update_all(&mut document, &self.config().categories);

        file.store(&document)
            .with_context(|| format!("failed to write outline {}", file.path().display()))?;

        for warning in &report.warnings {
            writeln!(
                self.writer(),
                "{} {}: {}",
                "warning:".yellow().bold(),
                warning.path.display(),
                warning.error
            )?;
        }

        for repository in &report.synced {
            for branch in &repository.report.duplicates {
                writeln!(
                    self.writer(),
                    "{} {}: branch {} appears more than once",
                    "warning:".yellow().bold(),
                    repository.root.display(),
                    branch
                )?;
            }
        }

        writeln!(
            self.writer(),
            "{} {} repositories, {} new branches, {} skipped",
            "Synchronized".green(),
            report.synced.len(),
            report.inserted_branches(),
            report.warnings.len()
        )?;

        Ok(report)
    }
}
