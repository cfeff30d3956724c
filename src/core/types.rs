use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::countries::CountryCode;
use super::currencies::CurrencyCode;

/// Marker used in place of an absent identification scheme.
///
/// Downstream matching compares schemes as plain strings, so a missing scheme
/// is represented by this literal rather than an empty string.
pub const NULL_SCHEME: &str = "null";

/// Identifier value with an optional identification scheme (e.g. `"IT:REA"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    value: String,
    scheme: Option<String>,
}

impl Identifier {
    /// Identifier without a scheme.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: None,
        }
    }

    pub fn with_scheme(value: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme: Some(scheme.into()),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The scheme, or [`NULL_SCHEME`] when absent.
    pub fn scheme_or_null(&self) -> &str {
        self.scheme.as_deref().unwrap_or(NULL_SCHEME)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{scheme}:{}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Typed value carried by a Business Term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermValue {
    Text(String),
    Identifier(Identifier),
    Date(NaiveDate),
    Currency(CurrencyCode),
    Amount(Decimal),
    Country(CountryCode),
}

impl TermValue {
    /// Name of the value's type as shown in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Identifier(_) => "identifier",
            Self::Date(_) => "date",
            Self::Currency(_) => "currency code",
            Self::Amount(_) => "amount",
            Self::Country(_) => "country code",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_country(&self) -> Option<&CountryCode> {
        match self {
            Self::Country(c) => Some(c),
            _ => None,
        }
    }

    /// Raw value as a string, without any scheme.
    pub fn raw(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Identifier(id) => id.value().to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Currency(c) => c.to_string(),
            Self::Amount(a) => a.to_string(),
            Self::Country(c) => c.to_string(),
        }
    }

    /// Identification scheme, for identifier values.
    pub fn scheme(&self) -> Option<&str> {
        self.as_identifier().and_then(Identifier::scheme)
    }
}

impl From<Identifier> for TermValue {
    fn from(id: Identifier) -> Self {
        Self::Identifier(id)
    }
}

impl From<CountryCode> for TermValue {
    fn from(code: CountryCode) -> Self {
        Self::Country(code)
    }
}

impl From<CurrencyCode> for TermValue {
    fn from(code: CurrencyCode) -> Self {
        Self::Currency(code)
    }
}

impl From<NaiveDate> for TermValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<Decimal> for TermValue {
    fn from(amount: Decimal) -> Self {
        Self::Amount(amount)
    }
}

impl From<&str> for TermValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TermValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_scheme_is_null_literal() {
        let id = Identifier::new("12345");
        assert_eq!(id.scheme(), None);
        assert_eq!(id.scheme_or_null(), "null");
    }

    #[test]
    fn identifier_display() {
        assert_eq!(Identifier::with_scheme("RM:1", "IT:REA").to_string(), "IT:REA:RM:1");
        assert_eq!(Identifier::new("ABC").to_string(), "ABC");
    }

    #[test]
    fn raw_values() {
        assert_eq!(TermValue::from(dec!(12.50)).raw(), "12.50");
        assert_eq!(
            TermValue::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).raw(),
            "2024-03-01"
        );
        assert_eq!(
            TermValue::from(Identifier::with_scheme("X1", "0088")).raw(),
            "X1"
        );
    }

    #[test]
    fn scheme_only_for_identifiers() {
        assert_eq!(
            TermValue::from(Identifier::with_scheme("X1", "0088")).scheme(),
            Some("0088")
        );
        assert_eq!(TermValue::from("plain").scheme(), None);
    }
}
