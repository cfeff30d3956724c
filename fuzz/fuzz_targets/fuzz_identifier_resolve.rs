#![no_main]

use cenfattura::core::{BusinessGroup, Identifier, Invoice};
use cenfattura::fattpa::{FatturaElettronica, MappingDispatcher, resolve};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, Option<&str>)| {
    let (value, scheme) = data;
    let id = match scheme {
        Some(s) => Identifier::with_scheme(value, s),
        None => Identifier::new(value),
    };
    let _ = resolve(&id);

    let invoice = Invoice::new().with_group(
        BusinessGroup::new("BG0004")
            .with_term("BT0029", id.clone())
            .with_term("BT0030", id)
            .with_term("BT0031", value)
            .with_term("BT0032", value),
    );
    let mut document = FatturaElettronica::with_seller_skeleton();
    let _ = MappingDispatcher::seller().convert(&invoice, &mut document);
});
