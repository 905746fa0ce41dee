use crate::calendar::business_day::adjust_settlement_date;
use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Upper bound for an instruction's notional (`price_per_unit * units`) and
/// for its USD value. Report totals are sums of values under this bound, so
/// they cannot overflow a `Decimal` for any batch that fits in memory.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Product of two non-negative amounts, or `None` if it overflows or
/// exceeds [`MAX_AMOUNT`].
pub fn checked_amount(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    lhs.checked_mul(rhs).filter(|product| *product <= MAX_AMOUNT)
}

/// Which way the money moves for the reporting entity.
///
/// Produced once at ingestion from the raw `Buy/Sell` column: a sell brings
/// money in, a buy sends it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    /// Map a raw type code to a direction. Only `"S"` and `"B"` are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Direction::Incoming),
            "B" => Some(Direction::Outgoing),
            _ => None,
        }
    }

    /// The raw type code this direction is read from.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Incoming => "S",
            Direction::Outgoing => "B",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
        }
    }
}

/// A single trade settlement instruction.
///
/// Instructions are immutable. Moving the settlement date onto a business
/// day is done by [`Instruction::adjusted`], which consumes the record and
/// returns a new one; [`InstructionBatch`] is the only place that calls it
/// on the ingestion path.
///
/// # Examples
///
/// ```
/// use settlement_reports::core::currency::CurrencyCode;
/// use settlement_reports::core::entity::EntityId;
/// use settlement_reports::core::instruction::{Direction, Instruction};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let instruction = Instruction::new(
///     EntityId::new("foo"),
///     Direction::Outgoing,
///     CurrencyCode::new("SGP"),
///     NaiveDate::from_ymd_opt(2016, 1, 2).unwrap(),
///     200,
///     dec!(100.25),
/// )
/// .with_agreed_fx(dec!(0.50));
///
/// assert_eq!(instruction.usd_amount(), dec!(10025));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Counterparty the instruction is booked against.
    entity: EntityId,
    direction: Direction,
    /// Exchange rate into USD. Must be positive.
    agreed_fx: Decimal,
    currency: CurrencyCode,
    /// Date the instruction was sent. Not used by any report.
    instruction_date: NaiveDate,
    settlement_date: NaiveDate,
    units: u32,
    /// Must not be negative. `price_per_unit * units` stays within
    /// [`MAX_AMOUNT`].
    price_per_unit: Decimal,
}

impl Instruction {
    /// Create a new instruction with an agreed FX of 1 and an instruction
    /// date equal to the settlement date.
    ///
    /// # Panics
    ///
    /// Panics if `price_per_unit` is negative, or if `price_per_unit * units`
    /// exceeds [`MAX_AMOUNT`].
    pub fn new(
        entity: EntityId,
        direction: Direction,
        currency: CurrencyCode,
        settlement_date: NaiveDate,
        units: u32,
        price_per_unit: Decimal,
    ) -> Self {
        assert!(
            price_per_unit >= Decimal::ZERO,
            "Price per unit must not be negative, got {}",
            price_per_unit
        );
        assert!(
            checked_amount(price_per_unit, Decimal::from(units)).is_some(),
            "Notional of {} x {} is out of range",
            units,
            price_per_unit
        );
        Self {
            entity,
            direction,
            agreed_fx: Decimal::ONE,
            currency,
            instruction_date: settlement_date,
            settlement_date,
            units,
            price_per_unit,
        }
    }

    /// Set the agreed exchange rate.
    ///
    /// # Panics
    ///
    /// Panics if `agreed_fx` is not positive, or if the resulting USD value
    /// exceeds [`MAX_AMOUNT`].
    pub fn with_agreed_fx(mut self, agreed_fx: Decimal) -> Self {
        assert!(
            agreed_fx > Decimal::ZERO,
            "Agreed FX must be positive, got {}",
            agreed_fx
        );
        assert!(
            checked_amount(self.notional(), agreed_fx).is_some(),
            "USD value of {} at {} is out of range",
            self.notional(),
            agreed_fx
        );
        self.agreed_fx = agreed_fx;
        self
    }

    /// Set the instruction date.
    pub fn with_instruction_date(mut self, date: NaiveDate) -> Self {
        self.instruction_date = date;
        self
    }

    /// Return this instruction with its settlement date moved onto the next
    /// business day for its currency. A date already on a business day is
    /// left untouched, so applying this twice is harmless.
    pub fn adjusted(mut self) -> Self {
        let adjusted = adjust_settlement_date(self.settlement_date, &self.currency);
        if adjusted != self.settlement_date {
            log::debug!(
                "{} {} settlement moved {} -> {}",
                self.entity,
                self.currency,
                self.settlement_date,
                adjusted
            );
        }
        self.settlement_date = adjusted;
        self
    }

    /// Value in the instruction's own currency: `price_per_unit * units`.
    pub fn notional(&self) -> Decimal {
        self.price_per_unit * Decimal::from(self.units)
    }

    /// Settlement value in USD: `price_per_unit * units * agreed_fx`.
    pub fn usd_amount(&self) -> Decimal {
        self.notional() * self.agreed_fx
    }

    // --- Accessors ---

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn agreed_fx(&self) -> Decimal {
        self.agreed_fx
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn instruction_date(&self) -> NaiveDate {
        self.instruction_date
    }

    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }
}

/// Adjusted instructions split by direction.
///
/// Building a batch is the adjust-then-partition step of the pipeline: every
/// instruction is adjusted exactly once on the way in, and the report
/// builders only ever read from a batch.
#[derive(Debug, Clone, Default)]
pub struct InstructionBatch {
    incoming: Vec<Instruction>,
    outgoing: Vec<Instruction>,
}

impl InstructionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust an instruction's settlement date and file it under its direction.
    pub fn add(&mut self, instruction: Instruction) {
        let instruction = instruction.adjusted();
        match instruction.direction() {
            Direction::Incoming => self.incoming.push(instruction),
            Direction::Outgoing => self.outgoing.push(instruction),
        }
    }

    /// Instructions that bring money in (sells).
    pub fn incoming(&self) -> &[Instruction] {
        &self.incoming
    }

    /// Instructions that send money out (buys).
    pub fn outgoing(&self) -> &[Instruction] {
        &self.outgoing
    }

    pub fn len(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }

    /// Total USD value across both directions.
    pub fn gross_usd(&self) -> Decimal {
        self.incoming
            .iter()
            .chain(self.outgoing.iter())
            .map(|i| i.usd_amount())
            .sum()
    }
}

impl FromIterator<Instruction> for InstructionBatch {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        let mut batch = Self::new();
        for instruction in iter {
            batch.add(instruction);
        }
        batch
    }
}
