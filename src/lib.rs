//! # settlement-reports
//!
//! Reporting over trade settlement instructions.
//!
//! Instructions are read from CSV, their settlement dates are moved onto the
//! next business day for their currency, and the result is summarised as
//! daily settled totals and counterparty rankings, separately for incoming
//! and outgoing money.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: instructions, directions, entities, currencies
//! - **calendar**: Per-currency business weeks and settlement date adjustment
//! - **ingest**: CSV decoding, validation and the adjust-then-partition step
//! - **report**: Daily totals, entity rankings, money formatting, rendering
//! - **simulation**: Random instruction books for benchmarks and demos

pub mod calendar;
pub mod config;
pub mod core;
pub mod ingest;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::calendar::business_day::{adjust_settlement_date, BusinessWeek, Weekday};
    pub use crate::config::{OutputFormat, ReportConfig};
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::entity::EntityId;
    pub use crate::core::instruction::{Direction, Instruction, InstructionBatch};
    pub use crate::ingest::{IngestError, IngestOutcome};
    pub use crate::report::daily::{daily_amounts, DailyAmount};
    pub use crate::report::ranking::{rank_entities, EntityRanking};
    pub use crate::report::SettlementReport;
}
