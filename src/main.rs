use anyhow::Context;
use clap::Parser;
use hamvoip_directory::domain::ports::ConfigProvider;
use hamvoip_directory::utils::logger;
use hamvoip_directory::{
    AppConfig, CliConfig, Command, DirectoryEngine, DirectoryError, LocalStorage, LogFormat,
    PdfDirectorySource, RunSummary,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match AppConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting hamvoip-directory");
    tracing::debug!(
        "Config: download_page={}, pdf_url={:?}, output_dir={}, timeout={}s",
        config.download_page,
        config.pdf_url,
        config.output_dir,
        config.timeout_seconds
    );

    let command = Command::from_flags(&cli.actions);
    if command == Command::Nothing {
        println!("No options provided. Use --help for usage information.");
        return;
    }

    match run(&command, config).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Done: {} written, {} removed, {} lines skipped",
                summary.written.len(),
                summary.removed.len(),
                summary.skipped_lines
            );
            println!("Process completed successfully.");
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<DirectoryError>() {
                Some(err) => {
                    tracing::error!("❌ {:#} (Category: {:?})", e, err.category());
                    eprintln!("❌ {}", err.user_friendly_message());
                    eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
                    err.exit_code()
                }
                None => {
                    tracing::error!("❌ {:#}", e);
                    eprintln!("❌ {:#}", e);
                    1
                }
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: &Command, config: AppConfig) -> anyhow::Result<RunSummary> {
    config.validate().context("invalid configuration")?;

    let storage = LocalStorage::new(config.output_dir().to_string());
    let source = PdfDirectorySource::new(config).context("failed to set up HTTP client")?;
    let engine = DirectoryEngine::new(source, storage);

    let summary = engine
        .run(command)
        .await
        .with_context(|| format!("{:?} failed", command))?;
    Ok(summary)
}
