#![no_main]

use cenfattura::core::{BusinessGroup, Identifier, Invoice};
use cenfattura::rules::{IntegrityRule, Rule};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let invoice = Invoice::new().with_term("BT0001", "FT-1").with_group(
            BusinessGroup::new("BG0004")
                .with_term("BT0029", Identifier::with_scheme("RSSMRA80A01H501U", "IT:CF")),
        );
        // Every expression must classify; a panic is a bug.
        let _ = IntegrityRule::new(s).is_compliant(&invoice);
        let _ = IntegrityRule::new(format!("${{{s}}}")).is_compliant(&invoice);
    }
});
