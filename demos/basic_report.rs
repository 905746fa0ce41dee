//! Basic settlement report example.
//!
//! Shows how settlement dates move onto business days per currency and how
//! the daily totals and entity rankings are built from a small book.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use settlement_reports::prelude::*;
use settlement_reports::report::money::format_usd;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  settlement-reports: Basic Report Example     ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // --- Scenario 1: Business-day adjustment ---
    println!("━━━ Scenario 1: Business-Day Adjustment ━━━\n");

    let friday = NaiveDate::from_ymd_opt(2016, 1, 8).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2016, 1, 10).unwrap();
    for code in ["GBP", "AED", "SAR"] {
        let currency = CurrencyCode::new(code);
        for date in [friday, sunday] {
            let adjusted = adjust_settlement_date(date, &currency);
            println!(
                "  {}  {} → {}",
                currency,
                date.format("%a %d %b %Y"),
                adjusted.format("%a %d %b %Y")
            );
        }
    }
    println!();

    // --- Scenario 2: Reports over a small book ---
    println!("━━━ Scenario 2: Settlement Reports ━━━\n");

    let jan = |d| NaiveDate::from_ymd_opt(2016, 1, d).unwrap();
    let book = vec![
        Instruction::new("foo".into(), Direction::Outgoing, "SGP".into(), jan(2), 200, dec!(100.25))
            .with_agreed_fx(dec!(0.50)),
        Instruction::new("bar".into(), Direction::Incoming, "AED".into(), jan(7), 450, dec!(150.5))
            .with_agreed_fx(dec!(0.22)),
        Instruction::new("qux".into(), Direction::Incoming, "SAR".into(), jan(8), 300, dec!(2)),
        Instruction::new("foo".into(), Direction::Incoming, "GBP".into(), jan(10), 100, dec!(10))
            .with_agreed_fx(dec!(0.50)),
    ];

    let batch: InstructionBatch = book.into_iter().collect();
    println!("Gross USD: {}\n", format_usd(batch.gross_usd()));

    let report = SettlementReport::from_batch(&batch);
    print!("{}", report);
}
