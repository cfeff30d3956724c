//! Mappers for `CedentePrestatore` (the seller, BG-4).
//!
//! Each mapper needs the header's seller party, the first body (for the
//! overflow attachment) and the invoice's first BG-4 occurrence. A missing
//! one is reported as an issue and the mapper returns without touching the
//! document.

use crate::core::{
    BusinessGroup, BusinessTerm, ConversionIssue, CountryCode, Identifier, Invoice, Node,
    TermValue,
};

use super::dispatcher::FieldMapper;
use super::document::{
    Body, FatturaElettronica, LiquidationStatus, PersonalData, ReaRegistration, SellerParty, TaxId,
    TaxRegime,
};
use super::overflow::append_overflow;
use super::scheme::{ResolvedKind, resolve};

const SELLER: &str = "BG0004";
const SELLER_ADDRESS: &str = "BG0005";
const SELLER_NAME: &str = "BT0027";
const SELLER_IDENTIFIER: &str = "BT0029";
const SELLER_LEGAL_REGISTRATION: &str = "BT0030";
const SELLER_VAT: &str = "BT0031";
const SELLER_TAX_REGISTRATION: &str = "BT0032";
const SELLER_COUNTRY: &str = "BT0040";

/// Everything a seller mapper writes to or reads from.
struct Target<'a> {
    seller: &'a BusinessGroup,
    party: &'a mut SellerParty,
    body: &'a mut Body,
}

fn target<'a>(
    invoice: &'a Invoice,
    document: &'a mut FatturaElettronica,
    field: &str,
    issues: &mut Vec<ConversionIssue>,
) -> Option<Target<'a>> {
    let FatturaElettronica { header, bodies } = document;
    let Some(party) = header.seller.as_mut() else {
        issues.push(ConversionIssue::error(
            "CedentePrestatore",
            "no CedentePrestatore found in FatturaElettronicaHeader",
        ));
        return None;
    };
    let Some(body) = bodies.first_mut() else {
        issues.push(ConversionIssue::error(
            "FatturaElettronicaBody",
            "no FatturaElettronicaBody found in document",
        ));
        return None;
    };
    let Some(seller) = invoice.group(SELLER, 0) else {
        issues.push(ConversionIssue::error(field, "invoice has no seller (BG-4)"));
        return None;
    };
    Some(Target {
        seller,
        party,
        body,
    })
}

fn identifier_of(term: &BusinessTerm) -> Identifier {
    match term.value() {
        TermValue::Identifier(id) => id.clone(),
        other => Identifier::new(other.raw()),
    }
}

fn overflow(body: &mut Body, term: &BusinessTerm, scheme: Option<&str>, value: &str) {
    append_overflow(body, term.denomination(), scheme, value);
}

/// Write `value` into an empty slot. Returns `false` when the slot already
/// holds a different value.
fn fill(slot: &mut Option<String>, value: &str) -> bool {
    match slot {
        Some(existing) => existing == value,
        None => {
            *slot = Some(value.to_string());
            true
        }
    }
}

fn seller_country(seller: &BusinessGroup) -> Option<&CountryCode> {
    seller
        .group(SELLER_ADDRESS, 0)
        .and_then(|address| address.term_value(SELLER_COUNTRY, 0))
        .and_then(TermValue::as_country)
}

/// BT-27 seller name → `Anagrafica.Denominazione`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerNameMapper;

impl FieldMapper for SellerNameMapper {
    fn name(&self) -> &'static str {
        "seller-name"
    }

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    ) {
        const FIELD: &str = "Anagrafica.Denominazione";
        let Some(t) = target(invoice, document, FIELD, issues) else {
            return;
        };

        let Some((first, rest)) = t.seller.terms(SELLER_NAME).split_first() else {
            issues.push(ConversionIssue::error(FIELD, "seller name (BT-27) is missing"));
            return;
        };

        let name = first.value().raw();
        let registry = t.party.personal_data_mut().registry_mut();
        if fill(&mut registry.name, &name) {
            tracing::debug!(name = %name, "mapped BT-27 to Denominazione");
        } else {
            overflow(t.body, first, None, &name);
        }
        for extra in rest {
            overflow(t.body, extra, None, &extra.value().raw());
        }
    }
}

/// BT-31 seller VAT identifier → `IdFiscaleIVA`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerVatMapper;

/// Split `"IT01234567890"` into country prefix and code.
fn split_vat_id(raw: &str) -> Option<TaxId> {
    let prefix = raw.get(..2)?;
    let code = raw.get(2..)?.trim();
    CountryCode::parse(prefix).ok()?;
    if code.is_empty() {
        return None;
    }
    Some(TaxId {
        country: prefix.to_string(),
        code: code.to_string(),
    })
}

impl FieldMapper for SellerVatMapper {
    fn name(&self) -> &'static str {
        "seller-vat"
    }

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    ) {
        let Some(t) = target(invoice, document, "IdFiscaleIVA", issues) else {
            return;
        };

        for term in t.seller.terms(SELLER_VAT) {
            let raw = term.value().raw();
            let personal_data = t.party.personal_data_mut();
            match split_vat_id(&raw) {
                Some(tax_id) if personal_data.vat_id.is_none() => {
                    tracing::debug!(country = %tax_id.country, "mapped BT-31 to IdFiscaleIVA");
                    personal_data.vat_id = Some(tax_id);
                }
                Some(tax_id) if personal_data.vat_id.as_ref() == Some(&tax_id) => {}
                _ => overflow(t.body, term, None, &raw),
            }
        }
    }
}

/// BT-29 seller identifiers → `CodiceFiscale`, `Anagrafica.CodEORI`,
/// `AlboProfessionale`/`NumeroIscrizioneAlbo`.
///
/// Every occurrence is processed in order. Unrecognized or malformed
/// identifiers, and ones that would overwrite a different value, go to the
/// overflow attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerIdentifierMapper;

impl FieldMapper for SellerIdentifierMapper {
    fn name(&self) -> &'static str {
        "seller-identifier"
    }

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    ) {
        let Some(t) = target(invoice, document, "DatiAnagrafici", issues) else {
            return;
        };

        for term in t.seller.terms(SELLER_IDENTIFIER) {
            let resolution = resolve(&identifier_of(term));
            tracing::debug!(scheme = %resolution.scheme, "mapping BT-29");

            let personal_data = t.party.personal_data_mut();
            let mapped = match &resolution.kind {
                ResolvedKind::TaxCode(code) => fill(&mut personal_data.tax_code, code),
                ResolvedKind::Eori(code) => fill(&mut personal_data.registry_mut().eori_code, code),
                ResolvedKind::ProfessionalRegister { register, number } => {
                    if personal_data.professional_register.is_none()
                        && personal_data.register_number.is_none()
                    {
                        personal_data.professional_register = Some(register.clone());
                        personal_data.register_number = Some(number.clone());
                        true
                    } else {
                        personal_data.professional_register.as_ref() == Some(register)
                            && personal_data.register_number.as_ref() == Some(number)
                    }
                }
                // REA belongs to BT-30; anything else has no field here
                _ => false,
            };

            if !mapped {
                overflow(t.body, term, Some(&resolution.scheme), &resolution.value);
            }
        }
    }
}

/// BT-30 seller legal registration → `IscrizioneREA`.
///
/// Only the first well-formed `IT:REA` registration of an Italian (or
/// country-less) seller is structured; the rest go to the overflow
/// attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerLegalRegistrationMapper;

impl FieldMapper for SellerLegalRegistrationMapper {
    fn name(&self) -> &'static str {
        "seller-legal-registration"
    }

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    ) {
        const FIELD: &str = "IscrizioneREA";
        let Some(t) = target(invoice, document, FIELD, issues) else {
            return;
        };

        let registrations = t.seller.terms(SELLER_LEGAL_REGISTRATION);
        if registrations.is_empty() {
            issues.push(ConversionIssue::error(
                FIELD,
                "seller has no legal registration identifier (BT-30)",
            ));
            return;
        }

        let italian = seller_country(t.seller).is_none_or(CountryCode::is_italy);
        for term in registrations {
            let resolution = resolve(&identifier_of(term));
            match resolution.kind {
                ResolvedKind::Rea { office, number } if italian && t.party.rea.is_none() => {
                    tracing::debug!(office = %office, number = %number, "mapped BT-30 to IscrizioneREA");
                    t.party.rea = Some(ReaRegistration {
                        office,
                        number,
                        liquidation_status: LiquidationStatus::NotInLiquidation,
                    });
                }
                _ => overflow(t.body, term, Some(&resolution.scheme), &resolution.value),
            }
        }
    }
}

/// The regime already present, or [`TaxRegime::DEFAULT`] written in its place.
fn regime_or_default(personal_data: &mut PersonalData) -> TaxRegime {
    *personal_data.tax_regime.get_or_insert(TaxRegime::DEFAULT)
}

/// BT-32 seller tax registration → `RegimeFiscale`, with a default.
///
/// Must run after every mapper that can set a regime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SellerTaxRegimeMapper;

impl FieldMapper for SellerTaxRegimeMapper {
    fn name(&self) -> &'static str {
        "seller-tax-regime"
    }

    fn map(
        &self,
        invoice: &Invoice,
        document: &mut FatturaElettronica,
        issues: &mut Vec<ConversionIssue>,
    ) {
        const FIELD: &str = "RegimeFiscale";
        let Some(t) = target(invoice, document, FIELD, issues) else {
            return;
        };

        let italian_vat = t
            .seller
            .term_value(SELLER_VAT, 0)
            .is_some_and(|vat| vat.raw().starts_with("IT"));
        let personal_data = t.party.personal_data_mut();

        let Some((term, rest)) = t.seller.terms(SELLER_TAX_REGISTRATION).split_first() else {
            let regime = regime_or_default(personal_data);
            tracing::info!(regime = regime.code(), "no BT-32, RegimeFiscale kept or defaulted");
            return;
        };

        let raw = term.value().raw();
        if !italian_vat {
            let regime = regime_or_default(personal_data);
            tracing::debug!(regime = regime.code(), "seller not Italian, BT-32 not mapped");
            overflow(t.body, term, None, &raw);
        } else if let Some(regime) = TaxRegime::from_code(raw.trim()) {
            tracing::debug!(regime = regime.code(), "mapped BT-32 to RegimeFiscale");
            personal_data.tax_regime = Some(regime);
        } else {
            regime_or_default(personal_data);
            overflow(t.body, term, None, &raw);
            issues.push(ConversionIssue::warning(
                FIELD,
                format!(
                    "'{raw}' is not a RegimeFiscale code, defaulted to {}",
                    TaxRegime::DEFAULT.code()
                ),
            ));
        }

        for extra in rest {
            overflow(t.body, extra, None, &extra.value().raw());
        }
    }
}
