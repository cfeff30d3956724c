//! CEN to FatturaPA conversion.
//!
//! A [`MappingDispatcher`] runs independent [`FieldMapper`]s over a semantic
//! [`Invoice`](crate::core::Invoice) and a caller-supplied
//! [`FatturaElettronica`]. Mappers never abort the conversion: problems are
//! returned as [`ConversionIssue`](crate::core::ConversionIssue)s and data
//! without a FatturaPA field goes to the overflow attachment.
//!
//! # Example
//!
//! ```
//! use cenfattura::core::*;
//! use cenfattura::fattpa::*;
//!
//! let invoice = Invoice::new().with_group(
//!     BusinessGroup::new("BG0004")
//!         .with_term("BT0027", "Rossi S.r.l.")
//!         .with_term("BT0029", Identifier::with_scheme("0123456789", "0088")),
//! );
//! let mut document = FatturaElettronica::with_seller_skeleton();
//! MappingDispatcher::seller().convert(&invoice, &mut document);
//!
//! let body = document.first_body().unwrap();
//! assert_eq!(
//!     overflow_text(body).unwrap(),
//!     "BT-29 Seller identifier: 0088:0123456789\n"
//! );
//! ```

mod dispatcher;
mod document;
mod overflow;
pub mod scheme;
mod seller;

pub use dispatcher::{FieldMapper, MappingDispatcher};
pub use document::*;
pub use overflow::{
    OVERFLOW_ATTACHMENT_NAME, OVERFLOW_FORMAT, append_overflow, format_line, overflow_lines,
    overflow_text,
};
pub use scheme::{Resolution, ResolvedKind, SchemeKind, resolve, resolve_raw};
pub use seller::{
    SellerIdentifierMapper, SellerLegalRegistrationMapper, SellerNameMapper,
    SellerTaxRegimeMapper, SellerVatMapper,
};
