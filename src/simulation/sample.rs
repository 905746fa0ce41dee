//! Random instruction books for benchmarks and demo input files.

use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityId;
use crate::core::instruction::{Direction, Instruction};
use crate::ingest::RawRecord;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use std::io::Write;

/// Configuration for generating a random set of instructions.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of distinct counterparties.
    pub entity_count: usize,
    pub instruction_count: usize,
    /// Currencies to draw from.
    pub currencies: Vec<CurrencyCode>,
    /// First possible settlement date.
    pub start_date: NaiveDate,
    /// Settlement dates fall within `start_date .. start_date + span_days`.
    pub span_days: i64,
    pub max_units: u32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            entity_count: 5,
            instruction_count: 50,
            currencies: ["SGP", "AED", "SAR", "GBP", "EUR"]
                .iter()
                .map(|c| CurrencyCode::new(*c))
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or(NaiveDate::MIN),
            span_days: 14,
            max_units: 500,
        }
    }
}

/// Generate unadjusted instructions. Settlement dates may fall on weekends.
pub fn generate_instructions(config: &SampleConfig) -> Vec<Instruction> {
    let mut rng = rand::thread_rng();

    let entities: Vec<EntityId> = (0..config.entity_count.max(1))
        .map(|i| EntityId::new(format!("ENTITY-{:03}", i)))
        .collect();
    let currencies = if config.currencies.is_empty() {
        vec![CurrencyCode::new("USD")]
    } else {
        config.currencies.clone()
    };

    (0..config.instruction_count)
        .map(|_| {
            let direction = if rng.gen_bool(0.5) {
                Direction::Incoming
            } else {
                Direction::Outgoing
            };
            let settles = config.start_date + Duration::days(rng.gen_range(0..config.span_days.max(1)));
            let issued = settles - Duration::days(rng.gen_range(0..3));
            // cents, then hundredths of a rate
            let price = Decimal::new(rng.gen_range(100..50_000), 2);
            let fx = Decimal::new(rng.gen_range(10..=200), 2);

            Instruction::new(
                entities[rng.gen_range(0..entities.len())].clone(),
                direction,
                currencies[rng.gen_range(0..currencies.len())].clone(),
                settles,
                rng.gen_range(1..=config.max_units.max(1)),
                price,
            )
            .with_agreed_fx(fx)
            .with_instruction_date(issued)
        })
        .collect()
}

/// Write instructions in the input CSV layout, header included.
pub fn write_csv<W: Write>(
    writer: W,
    instructions: &[Instruction],
    date_format: &str,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for instruction in instructions {
        wtr.serialize(RawRecord::from_instruction(instruction, date_format))?;
    }
    wtr.flush()?;
    Ok(())
}
