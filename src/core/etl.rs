use crate::core::dispatcher::Command;
use crate::core::{extractor, generators};
use crate::core::{DocumentSource, OutputFormat, Storage};
use crate::utils::error::Result;

/// What a run did, for the final report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub user_records: usize,
    pub other_records: usize,
    pub skipped_lines: usize,
    pub written: Vec<String>,
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
}

pub struct DirectoryEngine<D: DocumentSource, S: Storage> {
    source: D,
    storage: S,
}

impl<D: DocumentSource, S: Storage> DirectoryEngine<D, S> {
    pub fn new(source: D, storage: S) -> Self {
        Self { source, storage }
    }

    pub async fn run(&self, command: &Command) -> Result<RunSummary> {
        match command {
            Command::Nothing => Ok(RunSummary::default()),
            Command::Remove => self.remove_outputs().await,
            Command::Generate(formats) => self.generate(formats).await,
        }
    }

    /// Fetch once, extract once, then write each requested file in turn.
    /// A failed write stops the run; files already written stay.
    pub async fn generate(&self, formats: &[OutputFormat]) -> Result<RunSummary> {
        println!("Fetching directory...");
        let text = self.source.fetch_text().await?;

        let extraction = extractor::extract(&text);
        let records = extraction.records;
        let mut summary = RunSummary {
            user_records: records.iter().filter(|r| r.is_user()).count(),
            other_records: records.iter().filter(|r| r.is_other()).count(),
            skipped_lines: extraction.skipped_lines,
            ..Default::default()
        };

        for format in formats {
            let payload = generators::render(*format, &records)?;
            self.storage.write_file(format.file_name(), &payload).await?;
            tracing::info!("📁 Wrote {} ({} bytes)", format.file_name(), payload.len());
            println!("Generated: {}", format.file_name());
            summary.written.push(format.file_name().to_string());
        }

        println!("Number of user extensions found: {}", summary.user_records);
        println!("Number of other extensions found: {}", summary.other_records);
        Ok(summary)
    }

    /// Delete every known output file; missing files are only reported.
    pub async fn remove_outputs(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for format in OutputFormat::ALL {
            let file = format.file_name();
            if self.storage.remove_file(file).await? {
                println!("Removed: {}", file);
                summary.removed.push(file.to_string());
            } else {
                println!("Not found: {}", file);
                summary.not_found.push(file.to_string());
            }
        }
        Ok(summary)
    }
}
