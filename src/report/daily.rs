use crate::core::instruction::Instruction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total USD settled on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Sum instruction amounts per settlement date, earliest date first.
///
/// Instructions are expected to carry adjusted settlement dates already.
/// The input slice is left in its original order; only references are
/// sorted before the single merging pass.
///
/// # Examples
///
/// ```
/// use settlement_reports::prelude::*;
/// use settlement_reports::report::daily::daily_amounts;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let jan = |d| NaiveDate::from_ymd_opt(2016, 1, d).unwrap();
/// let instructions = vec![
///     Instruction::new("a".into(), Direction::Incoming, "GBP".into(), jan(7), 10, dec!(1)),
///     Instruction::new("b".into(), Direction::Incoming, "GBP".into(), jan(4), 5, dec!(1)),
///     Instruction::new("c".into(), Direction::Incoming, "GBP".into(), jan(7), 1, dec!(1)),
/// ];
///
/// let days = daily_amounts(&instructions);
/// assert_eq!(days.len(), 2);
/// assert_eq!((days[0].date, days[0].amount), (jan(4), dec!(5)));
/// assert_eq!((days[1].date, days[1].amount), (jan(7), dec!(11)));
/// ```
pub fn daily_amounts(instructions: &[Instruction]) -> Vec<DailyAmount> {
    let mut sorted: Vec<&Instruction> = instructions.iter().collect();
    sorted.sort_by_key(|i| i.settlement_date());

    let mut amounts: Vec<DailyAmount> = Vec::new();
    for instruction in sorted {
        let date = instruction.settlement_date();
        match amounts.last_mut() {
            Some(current) if current.date == date => current.amount += instruction.usd_amount(),
            _ => amounts.push(DailyAmount {
                date,
                amount: instruction.usd_amount(),
            }),
        }
    }

    log::debug!(
        "aggregated {} instructions into {} settlement days",
        instructions.len(),
        amounts.len()
    );
    amounts
}
