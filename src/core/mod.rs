//! Semantic invoice model, value types, and static lookup tables.
//!
//! The model follows the EN 16931 hierarchy of Business Groups (BG) and
//! Business Terms (BT). Every group and term may occur any number of times;
//! occurrences are kept in insertion order.

pub mod catalogue;
mod countries;
mod currencies;
mod error;
mod model;
mod types;

pub use countries::{CountryCode, is_known_country_code};
pub use currencies::{CurrencyCode, is_known_currency_code};
pub use error::*;
pub use model::*;
pub use types::*;
