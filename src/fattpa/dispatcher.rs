//! Ordered mapping pipeline.
//!
//! Every [`FieldMapper`] runs regardless of what earlier ones reported;
//! issues from all of them are collected into one list.

use crate::core::{ConversionError, ConversionIssue, Invoice};

use super::document::FatturaElettronica;
use super::seller::{
    SellerIdentifierMapper, SellerLegalRegistrationMapper, SellerNameMapper,
    SellerTaxRegimeMapper, SellerVatMapper,
};

/// One independent conversion step.
///
/// A mapper reads from the semantic invoice, writes into the destination
/// document, and pushes every problem onto `issues`. It must not panic on
/// missing data; siblings keep running regardless of what it reports.
pub trait FieldMapper: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    );
}

/// Runs an ordered list of [`FieldMapper`]s over one invoice/document pair.
///
/// ```
/// use cenfattura::core::*;
/// use cenfattura::fattpa::*;
///
/// let invoice = Invoice::new().with_group(
///     BusinessGroup::new("BG0004")
///         .with_term("BT0027", "Rossi S.r.l.")
///         .with_term("BT0030", Identifier::with_scheme("RM:123456", "IT:REA")),
/// );
/// let mut document = FatturaElettronica::with_seller_skeleton();
/// let issues = MappingDispatcher::seller().convert(&invoice, &mut document);
///
/// assert!(issues.is_empty());
/// let rea = document.seller().unwrap().rea.as_ref().unwrap();
/// assert_eq!(rea.office, "RM");
/// ```
#[derive(Default)]
pub struct MappingDispatcher {
    mappers: Vec<Box<dyn FieldMapper>>,
}

impl MappingDispatcher {
    /// An empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `CedentePrestatore` pipeline.
    ///
    /// The tax regime mapper runs last so that it only fills in a default
    /// when nothing earlier supplied a regime.
    pub fn seller() -> Self {
        Self::new()
            .with(SellerNameMapper)
            .with(SellerVatMapper)
            .with(SellerIdentifierMapper)
            .with(SellerLegalRegistrationMapper)
            .with(SellerTaxRegimeMapper)
    }

    /// Append a mapper to the end of the pipeline.
    pub fn with(mut self, mapper: impl FieldMapper + 'static) -> Self {
        self.mappers.push(Box::new(mapper));
        self
    }

    pub fn mapper_names(&self) -> Vec<&'static str> {
        self.mappers.iter().map(|m| m.name()).collect()
    }

    /// Run every mapper in order. Returns all issues found (not just the
    /// first); an empty list means a clean conversion.
    pub fn convert(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
    ) -> Vec<ConversionIssue> {
        let mut issues = Vec::new();
        for mapper in &self.mappers {
            let before = issues.len();
            mapper.map(invoice, document, &mut issues);
            tracing::debug!(
                mapper = mapper.name(),
                issues = issues.len() - before,
                "mapper finished"
            );
        }
        issues
    }

    /// Like [`convert`](Self::convert), but treats error-level issues as
    /// fatal. Warnings are returned on success.
    ///
    /// The document is still mutated by every mapper even when this fails.
    pub fn convert_strict(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
    ) -> Result<Vec<ConversionIssue>, ConversionError> {
        let issues = self.convert(invoice, document);
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.is_error())
            .map(ToString::to_string)
            .collect();
        if errors.is_empty() {
            Ok(issues)
        } else {
            Err(ConversionError::Mapping(errors.join("; ")))
        }
    }
}

impl std::fmt::Debug for MappingDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingDispatcher")
            .field("mappers", &self.mapper_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl FieldMapper for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn map(&self, _: &Invoice, _: &mut FatturaElettronica, issues: &mut Vec<ConversionIssue>) {
            issues.push(ConversionIssue::error("Test", "always fails"));
        }
    }

    struct SetsTaxCode;

    impl FieldMapper for SetsTaxCode {
        fn name(&self) -> &'static str {
            "sets-tax-code"
        }

        fn map(&self, _: &Invoice, doc: &mut FatturaElettronica, _: &mut Vec<ConversionIssue>) {
            if let Some(seller) = doc.header.seller.as_mut() {
                seller.personal_data_mut().tax_code = Some("X".into());
            }
        }
    }

    #[test]
    fn seller_pipeline_order() {
        assert_eq!(
            MappingDispatcher::seller().mapper_names(),
            vec![
                "seller-name",
                "seller-vat",
                "seller-identifier",
                "seller-legal-registration",
                "seller-tax-regime",
            ]
        );
    }

    #[test]
    fn failing_mapper_does_not_stop_siblings() {
        let dispatcher = MappingDispatcher::new().with(Failing).with(SetsTaxCode);
        let mut doc = FatturaElettronica::with_seller_skeleton();
        let issues = dispatcher.convert(&Invoice::new(), &mut doc);

        assert_eq!(issues.len(), 1);
        let pd = doc.seller().unwrap().personal_data.as_ref().unwrap();
        assert_eq!(pd.tax_code.as_deref(), Some("X"));
    }

    #[test]
    fn empty_dispatcher_is_clean() {
        let mut doc = FatturaElettronica::default();
        assert!(MappingDispatcher::new().convert(&Invoice::new(), &mut doc).is_empty());
    }

    #[test]
    fn strict_conversion_fails_on_errors() {
        let dispatcher = MappingDispatcher::new().with(Failing);
        let mut doc = FatturaElettronica::with_seller_skeleton();
        let err = dispatcher.convert_strict(&Invoice::new(), &mut doc).unwrap_err();
        assert_eq!(err.to_string(), "mapping error: [error] Test: always fails");
    }

    #[test]
    fn strict_conversion_passes_without_errors() {
        let dispatcher = MappingDispatcher::new().with(SetsTaxCode);
        let mut doc = FatturaElettronica::with_seller_skeleton();
        assert!(dispatcher.convert_strict(&Invoice::new(), &mut doc).unwrap().is_empty());
    }
}
