//! Loading settlement instructions from CSV.
//!
//! Rows are decoded, validated, adjusted onto a business day and split by
//! direction. A bad row never aborts the run: it is logged, skipped and
//! reported back as a [`Rejection`]. Only failures of the stream itself
//! (missing file, unreadable header, I/O errors) are returned as errors.

pub mod reader;

use crate::core::instruction::InstructionBatch;
use std::path::PathBuf;
use thiserror::Error;

pub use reader::{load_instructions, read_instructions, RawRecord};

/// Layout of the date columns, e.g. `02 Jan 2016`.
pub const INPUT_DATE_FORMAT: &str = "%d %b %Y";

/// Errors raised while reading instructions.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open instructions file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown instruction type '{code}', expected 'B' or 'S'")]
    UnknownDirection { code: String },
    #[error("invalid {field} '{value}': {source}")]
    InvalidDate {
        field: &'static str,
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

impl IngestError {
    /// Whether the error belongs to a single row rather than the whole file.
    pub fn is_row_error(&self) -> bool {
        match self {
            IngestError::Open { .. } => false,
            IngestError::Csv(e) => !e.is_io_error(),
            _ => true,
        }
    }
}

/// A row excluded from the batch.
#[derive(Debug)]
pub struct Rejection {
    /// 1-based line number in the input, header included.
    pub line: u64,
    pub error: IngestError,
}

/// Result of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    pub batch: InstructionBatch,
    pub rejected: Vec<Rejection>,
}

impl IngestOutcome {
    pub fn accepted(&self) -> usize {
        self.batch.len()
    }
}
