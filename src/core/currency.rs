use std::fmt;

/// ISO 4217-style currency code.
///
/// The code is what selects the business-day rule for an instruction's
/// settlement date (see [`BusinessWeek`](crate::calendar::business_day::BusinessWeek)).
/// No validation is performed: unknown codes are carried through as-is and
/// fall back to the default Monday-Friday week.
///
/// # Examples
///
/// ```
/// use settlement_reports::core::currency::CurrencyCode;
///
/// let gbp = CurrencyCode::new("GBP");
/// let aed = CurrencyCode::new("AED");
/// assert_ne!(gbp, aed);
/// assert_eq!(gbp.as_str(), "GBP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
