//! Property-based tests for the overflow channel, scheme resolution, and
//! rule totality.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(all(feature = "fattpa", feature = "rules"))]

use cenfattura::core::*;
use cenfattura::fattpa::*;
use cenfattura::rules::*;
use proptest::prelude::*;

fn entry() -> impl Strategy<Value = (String, Option<String>, String)> {
    (
        "[A-Z]{2}-[0-9]{1,3}[ a-z]{0,12}",
        prop::option::of("[A-Z0-9:]{1,8}"),
        "[^\n]{0,24}",
    )
}

fn tax_code() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,20}".prop_filter("not blank", |s| !s.trim().is_empty())
}

proptest! {
    /// Appending E1 then E2 yields E1's line followed by E2's line, whatever
    /// was appended before.
    #[test]
    fn overflow_append_is_associative(
        prior in prop::collection::vec(entry(), 0..6),
        first in entry(),
        second in entry(),
    ) {
        let mut body = Body::default();
        for (label, scheme, value) in &prior {
            append_overflow(&mut body, label, scheme.as_deref(), value);
        }
        let before = overflow_text(&body).unwrap_or_default();

        append_overflow(&mut body, &first.0, first.1.as_deref(), &first.2);
        append_overflow(&mut body, &second.0, second.1.as_deref(), &second.2);

        let expected = format!(
            "{before}{}{}",
            format_line(&first.0, first.1.as_deref(), &first.2),
            format_line(&second.0, second.1.as_deref(), &second.2),
        );
        prop_assert_eq!(overflow_text(&body).unwrap(), expected);
        prop_assert_eq!(
            body.attachments.iter().filter(|a| a.name == OVERFLOW_ATTACHMENT_NAME).count(),
            1
        );
    }

    /// Every IT:CF identifier lands in CodiceFiscale verbatim.
    #[test]
    fn tax_code_is_copied_verbatim(code in tax_code()) {
        let invoice = Invoice::new().with_group(
            BusinessGroup::new("BG0004")
                .with_term("BT0027", "Seller")
                .with_term("BT0029", Identifier::with_scheme(code.clone(), "IT:CF")),
        );
        let mut document = FatturaElettronica::with_seller_skeleton();
        MappingDispatcher::seller().convert(&invoice, &mut document);

        let personal_data = document.seller().unwrap().personal_data.as_ref().unwrap();
        prop_assert_eq!(personal_data.tax_code.as_deref(), Some(code.as_str()));
    }

    /// The resolver is total and never invents a structured result for an
    /// unknown scheme.
    #[test]
    fn resolver_is_total(value in ".{0,40}", scheme in prop::option::of(".{0,10}")) {
        let identifier = match &scheme {
            Some(s) => Identifier::with_scheme(value.clone(), s.clone()),
            None => Identifier::new(value.clone()),
        };
        let resolution = resolve(&identifier);
        let known = scheme.as_deref().and_then(SchemeKind::from_tag).is_some()
            || ["IT:CF:", "IT:EORI:", "IT:ALBO:", "IT:REA:"]
                .iter()
                .any(|p| value.starts_with(p));
        if !known {
            prop_assert_eq!(resolution.kind, ResolvedKind::Unrecognized);
            prop_assert_eq!(resolution.value, value);
        }
    }

    /// Conversion never panics, whatever the seller carries.
    #[test]
    fn conversion_is_total(
        names in prop::collection::vec(".{0,20}", 0..3),
        ids in prop::collection::vec((".{0,20}", prop::option::of("IT:(CF|EORI|ALBO|REA)|[0-9]{4}")), 0..4),
        vat in prop::option::of(".{0,14}"),
        regime in prop::option::of("RF[0-9]{2}|.{0,6}"),
    ) {
        let mut seller = BusinessGroup::new("BG0004");
        for name in &names {
            seller.push_term(BusinessTerm::new("BT0027", name.as_str()));
        }
        for (value, scheme) in &ids {
            let id = match scheme {
                Some(s) => Identifier::with_scheme(value.clone(), s.clone()),
                None => Identifier::new(value.clone()),
            };
            seller.push_term(BusinessTerm::new("BT0029", id.clone()));
            seller.push_term(BusinessTerm::new("BT0030", id));
        }
        if let Some(vat) = &vat {
            seller.push_term(BusinessTerm::new("BT0031", vat.as_str()));
        }
        if let Some(regime) = &regime {
            seller.push_term(BusinessTerm::new("BT0032", regime.as_str()));
        }

        let mut document = FatturaElettronica::with_seller_skeleton();
        MappingDispatcher::seller().convert(&Invoice::new().with_group(seller), &mut document);
        let personal_data = document.seller().unwrap().personal_data.as_ref().unwrap();
        prop_assert!(personal_data.tax_regime.is_some());
    }

    /// Rule evaluation is total: arbitrary text yields one of the four
    /// outcomes, never a panic.
    #[test]
    fn rule_evaluation_is_total(expression in "\\$\\{[a-zA-Z0-9_.()\\[\\]!&|=' ]{0,40}\\}|.{0,40}") {
        let invoice = Invoice::new()
            .with_term("BT0001", "1")
            .with_group(BusinessGroup::new("BG0004"));
        let outcome = IntegrityRule::new(expression).is_compliant(&invoice);
        prop_assert!(matches!(
            outcome.outcome(),
            Outcome::Success | Outcome::Failed | Outcome::Error | Outcome::Unapplicable
        ));
        if outcome.outcome() == Outcome::Error {
            prop_assert!(outcome.description().starts_with(RuleOutcome::ERROR_PREFIX));
        }
    }
}
