//! Run with: `cargo test --features rules --test rule_tests`

#![cfg(feature = "rules")]

use cenfattura::core::*;
use cenfattura::rules::*;

fn invoice() -> Invoice {
    Invoice::new()
        .with_term("BT0001", "FT-2024-001")
        .with_group(
            BusinessGroup::new("BG0004")
                .with_term("BT0027", "Rossi S.r.l.")
                .with_term("BT0029", Identifier::with_scheme("RSSMRA80A01H501U", "IT:CF"))
                .with_term("BT0030", Identifier::with_scheme("RM:123456", "IT:REA")),
        )
}

fn check(expression: &str, invoice: &Invoice) -> RuleOutcome {
    IntegrityRule::new(expression).is_compliant(invoice)
}

// --- The four outcomes ---

#[test]
fn true_is_success() {
    let outcome = check("${true}", &Invoice::new());
    assert_eq!(outcome.outcome(), Outcome::Success);
    assert_eq!(outcome.description(), "Rule successfully validated");
}

#[test]
fn false_is_failed() {
    let outcome = check("${false}", &Invoice::new());
    assert_eq!(outcome.outcome(), Outcome::Failed);
    assert_eq!(outcome.description(), "Rule has failed");
}

#[test]
fn null_is_unapplicable() {
    let outcome = check("${null}", &Invoice::new());
    assert_eq!(outcome.outcome(), Outcome::Unapplicable);
    assert_eq!(outcome.description(), "Rule is unapplicable");
}

#[test]
fn malformed_expression_is_error() {
    for expression in [
        "${!invoice.BT0001.isEmpty(}",
        "${!invoice.BT0001.isEmpty}",
        "${invoice..BT0001}",
        "${invoice.BT0001[0}",
        "${true",
        "${'open}",
        "${}",
    ] {
        let outcome = check(expression, &invoice());
        assert_eq!(outcome.outcome(), Outcome::Error, "{expression}");
        assert!(
            outcome.description().starts_with("Error in the rule: "),
            "{expression}: {}",
            outcome.description()
        );
    }
}

#[test]
fn non_boolean_result_names_its_type() {
    let outcome = check("test", &Invoice::new());
    assert_eq!(outcome.outcome(), Outcome::Error);
    assert!(outcome.description().contains("string"), "{}", outcome.description());

    let outcome = check("${invoice.BG0004.size()}", &invoice());
    assert_eq!(outcome.outcome(), Outcome::Error);
    assert!(outcome.description().contains("integer"));
}

#[test]
fn out_of_range_on_empty_group_is_error() {
    let outcome = check(
        "${invoice.BG0004.get(0).BG0005.isEmpty()}",
        &Invoice::new().with_term("BT0001", "1"),
    );
    assert_eq!(outcome.outcome(), Outcome::Error);
    assert_eq!(
        outcome.description(),
        "Error in the rule: index 0 out of range for length 0"
    );
}

// --- Realistic rules ---

#[test]
fn invoice_number_present() {
    assert!(check("${!invoice.BT0001.isEmpty()}", &invoice()).is_success());
    assert_eq!(
        check("${!invoice.BT0001.isEmpty()}", &Invoice::new()).outcome(),
        Outcome::Failed
    );
}

#[test]
fn seller_identifier_scheme() {
    let rule = "${invoice.BG0004[0].BT0029[0].scheme() == 'IT:CF'}";
    assert!(check(rule, &invoice()).is_success());
}

#[test]
fn conditional_rule_can_be_unapplicable() {
    // scheme() of an identifier without a scheme is null
    let inv = Invoice::new().with_group(
        BusinessGroup::new("BG0004").with_term("BT0029", Identifier::new("LOCAL-1")),
    );
    let outcome = check("${invoice.BG0004[0].BT0029[0].scheme()}", &inv);
    assert_eq!(outcome.outcome(), Outcome::Unapplicable);
}

#[test]
fn guarded_access_avoids_error() {
    let rule = "${empty invoice.BG0004 || invoice.BG0004[0].BT0027.size() == 1}";
    assert!(check(rule, &Invoice::new()).is_success());
    assert!(check(rule, &invoice()).is_success());
}

#[test]
fn registration_prefix() {
    let rule = "${invoice.BG0004[0].BT0030[0].startsWith('RM:')}";
    assert!(check(rule, &invoice()).is_success());
}

// --- Batches ---

#[test]
fn batch_with_every_outcome() {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(InvoiceNumberRequired),
        Box::new(IntegrityRule::new("${invoice.BG0007.size() == 1}")),
        Box::new(IntegrityRule::new("${invoice.BG0004.get(1)}")),
        Box::new(IntegrityRule::new("${null}")),
        Box::new(IntegrityRule::new("${!invoice.BT0001.isEmpty()}")),
    ];
    let outcomes = validate(&rules, &invoice());
    let codes: Vec<&str> = outcomes.iter().map(|o| o.outcome().code()).collect();
    assert_eq!(codes, ["SUCCESS", "FAILED", "ERROR", "UNAPPLICABLE", "SUCCESS"]);
    assert_eq!(
        outcomes[2].description(),
        "Error in the rule: index 1 out of range for length 1"
    );
}

#[test]
fn rules_are_reusable_across_invoices() {
    let rule = IntegrityRule::new("${invoice.BT0001[0] == 'FT-2024-001'}");
    assert!(rule.is_compliant(&invoice()).is_success());
    assert_eq!(
        rule.is_compliant(&Invoice::new().with_term("BT0001", "X")).outcome(),
        Outcome::Failed
    );
    assert_eq!(
        rule.is_compliant(&Invoice::new()).outcome(),
        Outcome::Error
    );
}

#[test]
fn try_new_reports_parse_errors_up_front() {
    let err = IntegrityRule::try_new("${invoice.BT0001 ==}").unwrap_err();
    assert!(err.to_string().starts_with("expression error: unexpected"));
}

#[test]
fn outcomes_serialize_with_codes() {
    let json = serde_json::to_value(check("${false}", &Invoice::new())).unwrap();
    assert_eq!(json["outcome"], "FAILED");
    assert_eq!(json["description"], "Rule has failed");
}
