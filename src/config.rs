use crate::ingest::INPUT_DATE_FORMAT;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected 'text' or 'json'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings for a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// CSV file holding the instructions.
    pub input: PathBuf,
    pub format: OutputFormat,
    /// chrono format string for the two date columns.
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("sample.csv"),
            format: OutputFormat::Text,
            date_format: INPUT_DATE_FORMAT.to_string(),
        }
    }
}
