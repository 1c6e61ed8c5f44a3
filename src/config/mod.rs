pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use clap::{Args, Parser};
use std::path::{Path, PathBuf};
pub use toml_config::{LogFormat, TomlConfig};
use url::Url;

pub const DEFAULT_DOWNLOAD_PAGE: &str = "https://hamvoip.nl/download.php";
pub const DEFAULT_PASSWORD: &str = "passw0rd";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "hamvoip-directory")]
#[command(about = "Hamvoip Directory Tool: turn the extension PDF into phonebook files")]
#[command(version)]
pub struct CliConfig {
    #[command(flatten)]
    pub actions: ActionFlags,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the files are written to and removed from
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Download this PDF directly instead of looking it up on the download page
    #[arg(long)]
    pub pdf_url: Option<String>,

    /// Password of the directory PDF
    #[arg(long)]
    pub password: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ActionFlags {
    #[arg(short, long, help = "Generate all CSVs and XML")]
    pub all: bool,

    #[arg(short, long, help = "Generate hamvoip_cisco.xml")]
    pub cisco: bool,

    #[arg(short, long, help = "Generate hamvoip_dapnet.csv")]
    pub dapnet: bool,

    #[arg(short, long, help = "Generate hamvoip_fanvil.csv")]
    pub fanvil: bool,

    #[arg(short, long, help = "Generate hamvoip_other.csv")]
    pub other: bool,

    #[arg(short, long, help = "Generate hamvoip_users.csv")]
    pub users: bool,

    #[arg(short, long, help = "Generate hamvoip_yealink.csv")]
    pub yealink: bool,

    #[arg(
        short,
        long,
        help = "Remove CSV and XML files",
        conflicts_with_all = ["all", "cisco", "dapnet", "fanvil", "other", "users", "yealink"]
    )]
    pub remove: bool,
}

/// Resolved settings for one run: defaults, then the TOML file, then CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub download_page: String,
    pub pdf_url: Option<String>,
    pub password: String,
    pub output_dir: String,
    pub timeout_seconds: u64,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_page: DEFAULT_DOWNLOAD_PAGE.to_string(),
            pdf_url: None,
            password: DEFAULT_PASSWORD.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = AppConfig::default();

        if let Some(path) = &cli.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(dir) = &cli.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(url) = &cli.pdf_url {
            config.pdf_url = Some(url.clone());
        }
        if let Some(password) = &cli.password {
            config.password = password.clone();
        }

        Ok(config)
    }
}

impl ConfigProvider for AppConfig {
    fn download_page(&self) -> &str {
        &self.download_page
    }

    fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl AppConfig {
    /// Checks run before any network or filesystem use.
    ///
    /// The password may be empty: an unencrypted PDF is read without one.
    pub fn validate(&self) -> Result<()> {
        check_http_url("source.download_page", &self.download_page)?;
        if let Some(url) = &self.pdf_url {
            check_http_url("source.pdf_url", url)?;
        }
        if self.password.contains(['\r', '\n']) {
            return Err(DirectoryError::ConfigValidationError {
                field: "source.password".to_string(),
                message: "Password cannot contain line breaks".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(invalid(
                "source.timeout_seconds",
                "0",
                "Timeout must be at least 1 second",
            ));
        }
        check_output_dir(&self.output_dir)
    }
}

fn invalid(field: &str, value: &str, reason: impl Into<String>) -> DirectoryError {
    DirectoryError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn check_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            value,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

/// The directory may be missing (it is created on write) but must not be a file.
fn check_output_dir(dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(invalid("output.directory", dir, "Directory cannot be empty"));
    }
    if dir.contains('\0') {
        return Err(invalid("output.directory", dir, "Directory contains null bytes"));
    }
    let path = Path::new(dir);
    if path.exists() && !path.is_dir() {
        return Err(invalid("output.directory", dir, "Path exists and is not a directory"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_short_flags() {
        let cli = CliConfig::try_parse_from(["hamvoip-directory", "-u", "-d", "-v"]).unwrap();
        assert!(cli.actions.users);
        assert!(cli.actions.dapnet);
        assert!(!cli.actions.cisco);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_long_flags() {
        let cli = CliConfig::try_parse_from([
            "hamvoip-directory",
            "--all",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();
        assert!(cli.actions.all);
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_remove_conflicts_with_generation() {
        let err = CliConfig::try_parse_from(["hamvoip-directory", "-r", "-u"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_defaults_are_valid() {
        let cli = CliConfig::try_parse_from(["hamvoip-directory"]).unwrap();
        let config = AppConfig::resolve(&cli).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[source]
password = "from-file"
pdf_url = "https://example.com/file.pdf"

[output]
directory = "./from-file"
"#,
        )
        .unwrap();

        let cli = CliConfig::try_parse_from([
            "hamvoip-directory",
            "--config",
            file.path().to_str().unwrap(),
            "--password",
            "from-cli",
        ])
        .unwrap();
        let config = AppConfig::resolve(&cli).unwrap();

        assert_eq!(config.password, "from-cli");
        assert_eq!(config.output_dir, "./from-file");
        assert_eq!(config.pdf_url(), Some("https://example.com/file.pdf"));
    }

    #[test]
    fn test_invalid_pdf_url_rejected() {
        let config = AppConfig {
            pdf_url: Some("not a url".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(err.to_string().contains("source.pdf_url"));
    }

    #[test]
    fn test_download_page_must_be_http() {
        for page in ["", "ftp://hamvoip.nl/download.php", "hamvoip.nl/download.php"] {
            let config = AppConfig {
                download_page: page.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{:?} should be rejected", page);
        }
    }

    #[test]
    fn test_empty_password_is_allowed() {
        let config = AppConfig {
            password: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_password_with_line_break_rejected() {
        let config = AppConfig {
            password: "passw0rd\n".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source.password"));
        assert!(!err.to_string().contains("passw0rd"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AppConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_dir_checks() {
        let file = NamedTempFile::new().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("not-yet-created");

        let with_dir = |output_dir: &str| AppConfig {
            output_dir: output_dir.to_string(),
            ..Default::default()
        };

        assert!(with_dir(dir.path().to_str().unwrap()).validate().is_ok());
        assert!(with_dir(missing.to_str().unwrap()).validate().is_ok());
        assert!(with_dir(file.path().to_str().unwrap()).validate().is_err());
        assert!(with_dir("").validate().is_err());
        assert!(with_dir("out\0put").validate().is_err());
    }

    #[test]
    fn test_output_dir_comes_through_provider() {
        let cli = CliConfig::try_parse_from(["hamvoip-directory", "--output-dir", "phonebooks"])
            .unwrap();
        let config = AppConfig::resolve(&cli).unwrap();
        assert_eq!(ConfigProvider::output_dir(&config), "phonebooks");
    }
}
