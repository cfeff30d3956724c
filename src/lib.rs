//! # cenfattura
//!
//! Converts invoices from the EN 16931 semantic model into the Italian
//! FatturaPA format, and validates invoices against declarative rules.
//!
//! Conversion never aborts on bad input: every mapping problem becomes a
//! [`ConversionIssue`](crate::core::ConversionIssue), and data with no home in
//! FatturaPA is written to a plain-text overflow attachment. Rule evaluation
//! is total: every rule yields one of four outcomes, even for malformed
//! expressions.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "fattpa", feature = "rules"))]
//! # {
//! use cenfattura::core::*;
//! use cenfattura::fattpa::*;
//! use cenfattura::rules::*;
//!
//! let invoice = Invoice::new()
//!     .with_term("BT0001", "FT-2024-001")
//!     .with_group(
//!         BusinessGroup::new("BG0004")
//!             .with_term("BT0027", "Rossi S.r.l.")
//!             .with_term("BT0029", Identifier::with_scheme("RSSMRA80A01H501U", "IT:CF"))
//!             .with_term("BT0030", Identifier::with_scheme("RM:123456", "IT:REA")),
//!     );
//!
//! let mut document = FatturaElettronica::with_seller_skeleton();
//! let issues = MappingDispatcher::seller().convert(&invoice, &mut document);
//! assert!(issues.is_empty());
//!
//! let data = document.seller().unwrap().personal_data.as_ref().unwrap();
//! assert_eq!(data.tax_code.as_deref(), Some("RSSMRA80A01H501U"));
//! assert_eq!(data.tax_regime, Some(TaxRegime::DEFAULT));
//!
//! let outcome = IntegrityRule::new("${!invoice.BT0001.isEmpty()}").is_compliant(&invoice);
//! assert_eq!(outcome.outcome(), Outcome::Success);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Semantic invoice model, identifiers, lookup tables |
//! | `fattpa` | FatturaPA destination tree, scheme resolver, overflow channel, mappers |
//! | `rules` | Rule engine with expression rules and coded rules |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "fattpa")]
pub mod fattpa;

#[cfg(feature = "rules")]
pub mod rules;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
