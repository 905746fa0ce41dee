//! Settlement reports built from an [`InstructionBatch`].
//!
//! A report carries four datasets: daily totals and entity rankings, each
//! for incoming and outgoing instructions.

pub mod daily;
pub mod money;
pub mod ranking;

use crate::core::instruction::InstructionBatch;
use daily::{daily_amounts, DailyAmount};
use money::format_usd;
use ranking::{rank_entities, EntityRanking};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output layout for daily report lines, e.g. `Mon 04 Jan 2016`.
pub const REPORT_DATE_FORMAT: &str = "%a %d %b %Y";

/// The four report datasets for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub incoming_daily: Vec<DailyAmount>,
    pub outgoing_daily: Vec<DailyAmount>,
    pub incoming_ranking: Vec<EntityRanking>,
    pub outgoing_ranking: Vec<EntityRanking>,
}

impl SettlementReport {
    /// Aggregate both directions of a batch.
    pub fn from_batch(batch: &InstructionBatch) -> Self {
        log::info!(
            "building report for {} incoming and {} outgoing instructions",
            batch.incoming().len(),
            batch.outgoing().len()
        );
        Self {
            incoming_daily: daily_amounts(batch.incoming()),
            outgoing_daily: daily_amounts(batch.outgoing()),
            incoming_ranking: rank_entities(batch.incoming()),
            outgoing_ranking: rank_entities(batch.outgoing()),
        }
    }

    /// Pretty-printed JSON. Amounts are written as decimal strings.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn write_daily(f: &mut fmt::Formatter<'_>, title: &str, amounts: &[DailyAmount]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    for day in amounts {
        writeln!(
            f,
            "{} {:>15}",
            day.date.format(REPORT_DATE_FORMAT),
            format_usd(day.amount)
        )?;
    }
    writeln!(f)
}

fn write_ranking(f: &mut fmt::Formatter<'_>, title: &str, ranking: &[EntityRanking]) -> fmt::Result {
    writeln!(f, "{}", title)?;
    for (position, rank) in ranking.iter().enumerate() {
        writeln!(
            f,
            "{}. {:<12} {:>15}",
            position + 1,
            rank.entity,
            format_usd(rank.amount)
        )?;
    }
    writeln!(f)
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_daily(f, "Incoming settled amounts", &self.incoming_daily)?;
        write_daily(f, "Outgoing settled amounts", &self.outgoing_daily)?;
        write_ranking(f, "Incoming entity ranking", &self.incoming_ranking)?;
        write_ranking(f, "Outgoing entity ranking", &self.outgoing_ranking)
    }
}
