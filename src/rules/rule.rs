use crate::core::{ConversionError, Invoice, Node};

use super::expr::{Expression, ExpressionError};
use super::outcome::{Outcome, RuleOutcome};

/// A compliance check over one invoice.
///
/// Implementations are total: every failure is reported as an
/// [`Outcome::Error`] outcome, never as a panic.
pub trait Rule: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &str;

    fn is_compliant(&self, invoice: &Invoice) -> RuleOutcome;
}

/// A rule defined by an expression string.
///
/// Parsing happens once, at construction. A rule whose expression does not
/// parse is still a valid [`Rule`]: every check reports the parse error.
///
/// ```
/// use cenfattura::core::*;
/// use cenfattura::rules::*;
///
/// let rule = IntegrityRule::new("${invoice.BG0004[0].BT0027.size() == 1}");
/// let outcome = rule.is_compliant(&Invoice::new());
///
/// assert_eq!(outcome.outcome(), Outcome::Error);
/// assert_eq!(
///     outcome.description(),
///     "Error in the rule: index 0 out of range for length 0"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct IntegrityRule {
    source: String,
    compiled: Result<Expression, ExpressionError>,
}

impl IntegrityRule {
    pub fn new(expression: impl Into<String>) -> Self {
        let source = expression.into();
        let compiled = Expression::parse(&source);
        Self { source, compiled }
    }

    /// Like [`new`](Self::new), but rejects an expression that does not parse.
    pub fn try_new(expression: impl Into<String>) -> Result<Self, ConversionError> {
        let rule = Self::new(expression);
        match &rule.compiled {
            Ok(_) => Ok(rule),
            Err(err) => Err(ConversionError::Expression(err.to_string())),
        }
    }

    pub fn expression(&self) -> &str {
        &self.source
    }
}

impl Rule for IntegrityRule {
    fn id(&self) -> &str {
        &self.source
    }

    fn is_compliant(&self, invoice: &Invoice) -> RuleOutcome {
        let result = match &self.compiled {
            Ok(expression) => expression.evaluate(invoice),
            Err(err) => Err(err.clone()),
        };
        RuleOutcome::from_evaluation(result)
    }
}

/// BR-02: an invoice shall have an invoice number (BT-1).
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceNumberRequired;

impl Rule for InvoiceNumberRequired {
    fn id(&self) -> &str {
        "BR-02"
    }

    fn is_compliant(&self, invoice: &Invoice) -> RuleOutcome {
        let numbered = invoice
            .terms("BT0001")
            .iter()
            .any(|term| !term.value().raw().trim().is_empty());
        if numbered {
            RuleOutcome::success()
        } else {
            RuleOutcome::failed()
        }
    }
}

/// Check every rule against `invoice`. Outcomes are returned in rule order;
/// one rule's ERROR does not affect the others.
pub fn validate(rules: &[Box<dyn Rule>], invoice: &Invoice) -> Vec<RuleOutcome> {
    rules
        .iter()
        .map(|rule| {
            let outcome = rule.is_compliant(invoice);
            if outcome.outcome() == Outcome::Error {
                tracing::warn!(
                    rule = rule.id(),
                    description = outcome.description(),
                    "rule could not be evaluated"
                );
            } else {
                tracing::debug!(rule = rule.id(), outcome = %outcome.outcome(), "rule evaluated");
            }
            outcome
        })
        .collect()
}
