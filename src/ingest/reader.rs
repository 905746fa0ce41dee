//! CSV columns:
//! Entity,Buy/Sell,AgreedFx,Currency,InstructionDate,SettlementDate,Units,PricePerUnit

use crate::config::ReportConfig;
use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityId;
use crate::core::instruction::{checked_amount, Direction, Instruction};
use crate::ingest::{IngestError, IngestOutcome, Rejection};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;

/// One undecoded CSV row. Every column is kept as text so that each field
/// can be validated with its own error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Buy/Sell")]
    pub direction: String,
    #[serde(rename = "AgreedFx")]
    pub agreed_fx: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "InstructionDate")]
    pub instruction_date: String,
    #[serde(rename = "SettlementDate")]
    pub settlement_date: String,
    #[serde(rename = "Units")]
    pub units: String,
    #[serde(rename = "PricePerUnit")]
    pub price_per_unit: String,
}

impl RawRecord {
    /// Render an instruction back into its CSV columns.
    pub fn from_instruction(instruction: &Instruction, date_format: &str) -> Self {
        Self {
            entity: instruction.entity().to_string(),
            direction: instruction.direction().code().to_string(),
            agreed_fx: instruction.agreed_fx().to_string(),
            currency: instruction.currency().to_string(),
            instruction_date: instruction.instruction_date().format(date_format).to_string(),
            settlement_date: instruction.settlement_date().format(date_format).to_string(),
            units: instruction.units().to_string(),
            price_per_unit: instruction.price_per_unit().to_string(),
        }
    }

    /// Validate the row and build an unadjusted instruction from it.
    pub fn parse(&self, date_format: &str) -> Result<Instruction, IngestError> {
        let direction =
            Direction::from_code(&self.direction).ok_or_else(|| IngestError::UnknownDirection {
                code: self.direction.clone(),
            })?;

        let agreed_fx = parse_decimal("AgreedFx", &self.agreed_fx)?;
        if agreed_fx <= Decimal::ZERO {
            return Err(IngestError::OutOfRange {
                field: "AgreedFx",
                value: self.agreed_fx.clone(),
            });
        }

        let price_per_unit = parse_decimal("PricePerUnit", &self.price_per_unit)?;
        if price_per_unit < Decimal::ZERO {
            return Err(IngestError::OutOfRange {
                field: "PricePerUnit",
                value: self.price_per_unit.clone(),
            });
        }

        let units: u32 = self.units.parse().map_err(|_| IngestError::InvalidNumber {
            field: "Units",
            value: self.units.clone(),
        })?;

        let notional = checked_amount(price_per_unit, Decimal::from(units)).ok_or_else(|| {
            IngestError::OutOfRange {
                field: "PricePerUnit",
                value: self.price_per_unit.clone(),
            }
        })?;
        if checked_amount(notional, agreed_fx).is_none() {
            return Err(IngestError::OutOfRange {
                field: "AgreedFx",
                value: self.agreed_fx.clone(),
            });
        }

        let instruction_date = parse_date("InstructionDate", &self.instruction_date, date_format)?;
        let settlement_date = parse_date("SettlementDate", &self.settlement_date, date_format)?;

        Ok(Instruction::new(
            EntityId::new(self.entity.as_str()),
            direction,
            CurrencyCode::new(self.currency.as_str()),
            settlement_date,
            units,
            price_per_unit,
        )
        .with_agreed_fx(agreed_fx)
        .with_instruction_date(instruction_date))
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, IngestError> {
    value.parse().map_err(|_| IngestError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_date(field: &'static str, value: &str, format: &str) -> Result<NaiveDate, IngestError> {
    NaiveDate::parse_from_str(value, format).map_err(|source| IngestError::InvalidDate {
        field,
        value: value.to_string(),
        source,
    })
}

/// Read instructions from any CSV source with a header row.
///
/// Accepted rows are adjusted and partitioned into the outcome's batch.
/// Rows that fail to decode or validate are logged and collected in
/// `rejected`; I/O failures abort the read.
pub fn read_instructions<R: Read>(source: R, date_format: &str) -> Result<IngestOutcome, IngestError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let headers = rdr.headers()?.clone();

    let mut outcome = IngestOutcome::default();
    let mut record = StringRecord::new();

    loop {
        let line = match rdr.read_record(&mut record) {
            Ok(true) => record.position().map(|p| p.line()).unwrap_or(0),
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                reject(&mut outcome, line, e.into());
                continue;
            }
        };

        let parsed = record
            .deserialize::<RawRecord>(Some(&headers))
            .map_err(IngestError::from)
            .and_then(|raw| raw.parse(date_format));

        match parsed {
            Ok(instruction) => outcome.batch.add(instruction),
            Err(e) => reject(&mut outcome, line, e),
        }
    }

    log::info!(
        "ingested {} instructions ({} incoming, {} outgoing), rejected {}",
        outcome.accepted(),
        outcome.batch.incoming().len(),
        outcome.batch.outgoing().len(),
        outcome.rejected.len()
    );
    Ok(outcome)
}

fn reject(outcome: &mut IngestOutcome, line: u64, error: IngestError) {
    log::warn!("skipping instruction at line {}: {}", line, error);
    outcome.rejected.push(Rejection { line, error });
}

/// Open the configured input file and read it.
pub fn load_instructions(config: &ReportConfig) -> Result<IngestOutcome, IngestError> {
    let file = File::open(&config.input).map_err(|source| IngestError::Open {
        path: config.input.clone(),
        source,
    })?;
    log::info!("reading instructions from {}", config.input.display());
    read_instructions(file, &config.date_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instruction::MAX_AMOUNT;
    use crate::ingest::INPUT_DATE_FORMAT;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "Entity,Buy/Sell,AgreedFx,Currency,InstructionDate,SettlementDate,Units,PricePerUnit\n";

    fn read(rows: &str) -> IngestOutcome {
        let input = format!("{}{}", HEADER, rows);
        read_instructions(input.as_bytes(), INPUT_DATE_FORMAT).unwrap()
    }

    fn rejected_field(rejection: &Rejection) -> Option<&'static str> {
        match &rejection.error {
            IngestError::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }

    fn raw(direction: &str, fx: &str, units: &str, price: &str, settles: &str) -> RawRecord {
        RawRecord {
            entity: "foo".to_string(),
            direction: direction.to_string(),
            agreed_fx: fx.to_string(),
            currency: "SGP".to_string(),
            instruction_date: "01 Jan 2016".to_string(),
            settlement_date: settles.to_string(),
            units: units.to_string(),
            price_per_unit: price.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_record() {
        let i = raw("B", "0.50", "200", "100.25", "02 Jan 2016")
            .parse(INPUT_DATE_FORMAT)
            .unwrap();
        assert_eq!(i.direction(), Direction::Outgoing);
        assert_eq!(i.usd_amount(), dec!(10025));
        assert_eq!(i.instruction_date(), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
        // parse does not adjust
        assert_eq!(i.settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        let cases = [
            raw("X", "0.5", "1", "1", "02 Jan 2016"),
            raw("S", "abc", "1", "1", "02 Jan 2016"),
            raw("S", "0", "1", "1", "02 Jan 2016"),
            raw("S", "0.5", "-1", "1", "02 Jan 2016"),
            raw("S", "0.5", "1", "-0.01", "02 Jan 2016"),
            raw("S", "0.5", "1", "1", "2016-01-02"),
        ];
        for case in &cases {
            assert!(case.parse(INPUT_DATE_FORMAT).is_err(), "{:?}", case);
        }
    }

    #[test]
    fn test_read_partitions_and_adjusts() {
        let outcome = read(
            "foo,B,0.50,SGP,01 Jan 2016,02 Jan 2016,200,100.25\n\
             bar,S,0.22,AED,05 Jan 2016,07 Jan 2016,450,150.5\n\
             baz,S,1,SAR,05 Jan 2016,08 Jan 2016,1,1\n",
        );

        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.accepted(), 3);

        let outgoing = outcome.batch.outgoing();
        assert_eq!(outgoing.len(), 1);
        // Saturday, default week: on to Monday
        assert_eq!(outgoing[0].settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());

        let incoming = outcome.batch.incoming();
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming[0].settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 7).unwrap());
        assert_eq!(incoming[1].settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 10).unwrap());
    }

    #[test]
    fn test_unknown_type_is_rejected_not_fatal() {
        let outcome = read(
            "foo,B,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n\
             bar,X,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n\
             baz,S,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n",
        );

        assert_eq!(outcome.accepted(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line, 3);
        assert!(matches!(
            &outcome.rejected[0].error,
            IngestError::UnknownDirection { code } if code == "X"
        ));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let outcome = read(
            "foo,B,1,GBP,04 Jan 2016\n\
             baz,S,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n",
        );

        assert_eq!(outcome.accepted(), 1);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line, 2);
        assert!(outcome.rejected[0].error.is_row_error());
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let outcome = read(
            "big,S,2,GBP,04 Jan 2016,04 Jan 2016,4000000000,79228162514264337593543950335\n\
             huge,S,1,GBP,04 Jan 2016,04 Jan 2016,1,50000000000000000000000000000\n\
             huge,S,1,GBP,04 Jan 2016,04 Jan 2016,1,50000000000000000000000000000\n\
             rich,B,2,GBP,04 Jan 2016,04 Jan 2016,10,100000000000000000\n\
             foo,S,1,GBP,04 Jan 2016,04 Jan 2016,10,2.5\n",
        );

        assert_eq!(outcome.accepted(), 1);
        assert_eq!(outcome.batch.incoming()[0].usd_amount(), dec!(25));

        let lines: Vec<u64> = outcome.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
        let fields: Vec<_> = outcome.rejected.iter().map(rejected_field).collect();
        assert_eq!(
            fields,
            vec![
                Some("PricePerUnit"),
                Some("PricePerUnit"),
                Some("PricePerUnit"),
                Some("AgreedFx"),
            ]
        );
    }

    #[test]
    fn test_amount_at_the_bound_is_accepted() {
        let outcome = read("rich,B,1,GBP,04 Jan 2016,04 Jan 2016,10,100000000000000000\n");
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.batch.outgoing()[0].usd_amount(), MAX_AMOUNT);
    }

    #[test]
    fn test_invalid_utf8_row_is_rejected() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"f\xffo,S,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n");
        input.extend_from_slice(b"baz,S,1,GBP,04 Jan 2016,04 Jan 2016,1,1\n");

        let outcome = read_instructions(input.as_slice(), INPUT_DATE_FORMAT).unwrap();

        assert_eq!(outcome.accepted(), 1);
        assert_eq!(outcome.batch.incoming()[0].entity().as_str(), "baz");
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line, 2);
        assert!(matches!(outcome.rejected[0].error, IngestError::Csv(_)));
        assert!(outcome.rejected[0].error.is_row_error());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let outcome = read("foo , S , 1.0 , GBP , 04 Jan 2016 , 04 Jan 2016 , 10 , 2.5\n");
        assert_eq!(outcome.accepted(), 1);
        assert_eq!(outcome.batch.incoming()[0].usd_amount(), dec!(25));
        assert_eq!(outcome.batch.incoming()[0].entity().as_str(), "foo");
    }

    #[test]
    fn test_header_only() {
        let outcome = read("");
        assert!(outcome.batch.is_empty());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let config = ReportConfig {
            input: "does/not/exist.csv".into(),
            ..Default::default()
        };
        let err = load_instructions(&config).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
        assert!(!err.is_row_error());
    }
}
