//! Rule engine.
//!
//! A [`Rule`] classifies an invoice into one of four [`Outcome`]s and never
//! fails: parse errors, type mismatches and out-of-range access all become
//! [`Outcome::Error`] with the cause in the description.
//!
//! ```
//! use cenfattura::core::*;
//! use cenfattura::rules::*;
//!
//! let rules: Vec<Box<dyn Rule>> = vec![
//!     Box::new(InvoiceNumberRequired),
//!     Box::new(IntegrityRule::new("${empty invoice.BG0004 ? }")),
//!     Box::new(IntegrityRule::new("${invoice.BT0001[0].startsWith('FT')}")),
//! ];
//! let invoice = Invoice::new().with_term("BT0001", "FT-2024-001");
//!
//! let codes: Vec<&str> = validate(&rules, &invoice)
//!     .iter()
//!     .map(|o| o.outcome().code())
//!     .collect();
//! assert_eq!(codes, ["SUCCESS", "ERROR", "SUCCESS"]);
//! ```

mod expr;
mod outcome;
mod rule;

pub use expr::{Expression, ExpressionError, MAX_EXPRESSION_BYTES, MAX_NESTING, ROOT_VARIABLE, Value};
pub use outcome::{Outcome, RuleOutcome};
pub use rule::{IntegrityRule, InvoiceNumberRequired, Rule, validate};
