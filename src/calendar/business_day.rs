//! Business-day adjustment of settlement dates.
//!
//! Each currency follows one of two fixed working weeks. A settlement date
//! that lands on a weekend for its currency is rolled forward to the first
//! day of the next working week with a single table lookup.

use crate::core::currency::CurrencyCode;
use chrono::{Datelike, Duration, NaiveDate};

/// Day of the week, numbered Sunday = 0 through Saturday = 6.
///
/// The offset tables are indexed by this numbering. It is pinned here
/// rather than borrowed from `chrono`, whose own helpers number from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Position in the Sunday-first week.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

/// Days to add to a date falling on each weekday, Sunday first.
/// Zero marks a business day.
const SUNDAY_TO_THURSDAY_OFFSETS: [i64; 7] = [0, 0, 0, 0, 0, 2, 1];
const MONDAY_TO_FRIDAY_OFFSETS: [i64; 7] = [1, 0, 0, 0, 0, 0, 2];

/// Currencies settled on a Sunday-Thursday week.
const SUNDAY_TO_THURSDAY_CURRENCIES: [&str; 2] = ["AED", "SAR"];

/// The working week a currency settles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessWeek {
    /// Friday and Saturday are the weekend (AED, SAR).
    SundayToThursday,
    /// Saturday and Sunday are the weekend. Used for every other currency.
    MondayToFriday,
}

impl BusinessWeek {
    /// Pick the working week for a currency. Unknown codes get Monday-Friday.
    pub fn for_currency(currency: &CurrencyCode) -> Self {
        if SUNDAY_TO_THURSDAY_CURRENCIES.contains(&currency.as_str()) {
            BusinessWeek::SundayToThursday
        } else {
            BusinessWeek::MondayToFriday
        }
    }

    fn offsets(self) -> &'static [i64; 7] {
        match self {
            BusinessWeek::SundayToThursday => &SUNDAY_TO_THURSDAY_OFFSETS,
            BusinessWeek::MondayToFriday => &MONDAY_TO_FRIDAY_OFFSETS,
        }
    }

    /// Number of days a date on `day` must move forward.
    pub fn offset(self, day: Weekday) -> i64 {
        self.offsets()[day.index()]
    }

    pub fn is_business_day(self, day: Weekday) -> bool {
        self.offset(day) == 0
    }

    /// Move `date` onto the next business day of this week, or return it
    /// unchanged if it already is one.
    pub fn adjust(self, date: NaiveDate) -> NaiveDate {
        match self.offset(Weekday::of(date)) {
            0 => date,
            days => date + Duration::days(days),
        }
    }
}

/// Adjust a raw settlement date for the given currency.
///
/// # Examples
///
/// ```
/// use settlement_reports::calendar::business_day::adjust_settlement_date;
/// use settlement_reports::core::currency::CurrencyCode;
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2016, 1, 3).unwrap();
///
/// let gbp = adjust_settlement_date(sunday, &CurrencyCode::new("GBP"));
/// assert_eq!(gbp, NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
///
/// let aed = adjust_settlement_date(sunday, &CurrencyCode::new("AED"));
/// assert_eq!(aed, sunday);
/// ```
pub fn adjust_settlement_date(date: NaiveDate, currency: &CurrencyCode) -> NaiveDate {
    BusinessWeek::for_currency(currency).adjust(date)
}
