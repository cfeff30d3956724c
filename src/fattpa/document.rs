//! The subset of the FatturaPA object tree touched by the seller mappers.
//!
//! Field names are English; serde renames map them onto the FatturaPA
//! element names. Optional sub-structures are created on demand through the
//! `*_mut` accessors.

use serde::{Deserialize, Serialize};

/// `FatturaElettronica`: header plus one or more bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatturaElettronica {
    #[serde(rename = "FatturaElettronicaHeader")]
    pub header: Header,
    #[serde(rename = "FatturaElettronicaBody")]
    pub bodies: Vec<Body>,
}

impl FatturaElettronica {
    /// Document with an empty seller party and a single empty body, the
    /// minimum the seller mappers require.
    pub fn with_seller_skeleton() -> Self {
        Self {
            header: Header {
                seller: Some(SellerParty::default()),
            },
            bodies: vec![Body::default()],
        }
    }

    pub fn seller(&self) -> Option<&SellerParty> {
        self.header.seller.as_ref()
    }

    pub fn first_body(&self) -> Option<&Body> {
        self.bodies.first()
    }
}

/// `FatturaElettronicaHeader`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "CedentePrestatore")]
    pub seller: Option<SellerParty>,
}

/// `CedentePrestatore`: the supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerParty {
    #[serde(rename = "DatiAnagrafici")]
    pub personal_data: Option<PersonalData>,
    #[serde(rename = "IscrizioneREA")]
    pub rea: Option<ReaRegistration>,
}

impl SellerParty {
    /// `DatiAnagrafici`, created if absent.
    pub fn personal_data_mut(&mut self) -> &mut PersonalData {
        self.personal_data.get_or_insert_with(PersonalData::default)
    }
}

/// `DatiAnagrafici` of the supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    #[serde(rename = "IdFiscaleIVA")]
    pub vat_id: Option<TaxId>,
    #[serde(rename = "CodiceFiscale")]
    pub tax_code: Option<String>,
    #[serde(rename = "Anagrafica")]
    pub registry: Option<Registry>,
    #[serde(rename = "AlboProfessionale")]
    pub professional_register: Option<String>,
    #[serde(rename = "NumeroIscrizioneAlbo")]
    pub register_number: Option<String>,
    #[serde(rename = "RegimeFiscale")]
    pub tax_regime: Option<TaxRegime>,
}

impl PersonalData {
    /// `Anagrafica`, created if absent.
    pub fn registry_mut(&mut self) -> &mut Registry {
        self.registry.get_or_insert_with(Registry::default)
    }
}

/// `IdFiscaleIVA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxId {
    #[serde(rename = "IdPaese")]
    pub country: String,
    #[serde(rename = "IdCodice")]
    pub code: String,
}

/// `Anagrafica`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "Denominazione")]
    pub name: Option<String>,
    #[serde(rename = "CodEORI")]
    pub eori_code: Option<String>,
}

/// `IscrizioneREA`: registration in the companies register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaRegistration {
    /// Province code of the registering office.
    #[serde(rename = "Ufficio")]
    pub office: String,
    #[serde(rename = "NumeroREA")]
    pub number: String,
    #[serde(rename = "StatoLiquidazione")]
    pub liquidation_status: LiquidationStatus,
}

/// `StatoLiquidazione`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidationStatus {
    /// LS: in liquidation.
    #[serde(rename = "LS")]
    InLiquidation,
    /// LN: not in liquidation.
    #[serde(rename = "LN")]
    NotInLiquidation,
}

/// `FatturaElettronicaBody`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    #[serde(rename = "Allegati")]
    pub attachments: Vec<Attachment>,
}

impl Body {
    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.name == name)
    }
}

/// `Allegati`: an attachment carried inside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "NomeAttachment")]
    pub name: String,
    #[serde(rename = "FormatoAttachment")]
    pub format: Option<String>,
    #[serde(rename = "Attachment")]
    pub content: Vec<u8>,
}

/// `RegimeFiscale` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxRegime {
    /// RF01: ordinary regime.
    Rf01,
    /// RF02: minimum taxpayers.
    Rf02,
    /// RF04: agriculture and fishing.
    Rf04,
    /// RF05: sale of salts and tobacco.
    Rf05,
    /// RF06: match trade.
    Rf06,
    /// RF07: publishing.
    Rf07,
    /// RF08: public telephony services.
    Rf08,
    /// RF09: resale of public transport documents.
    Rf09,
    /// RF10: entertainment and gaming.
    Rf10,
    /// RF11: travel agencies.
    Rf11,
    /// RF12: agritourism.
    Rf12,
    /// RF13: door-to-door sales.
    Rf13,
    /// RF14: resale of used goods, art, antiques.
    Rf14,
    /// RF15: auctions of art, antiques.
    Rf15,
    /// RF16: VAT on cash basis for public administration.
    Rf16,
    /// RF17: VAT on cash basis.
    Rf17,
    /// RF18: other.
    Rf18,
    /// RF19: flat-rate regime.
    Rf19,
}

impl TaxRegime {
    /// Regime applied when the invoice carries no usable one.
    pub const DEFAULT: Self = Self::Rf18;

    pub fn code(&self) -> &'static str {
        match self {
            Self::Rf01 => "RF01",
            Self::Rf02 => "RF02",
            Self::Rf04 => "RF04",
            Self::Rf05 => "RF05",
            Self::Rf06 => "RF06",
            Self::Rf07 => "RF07",
            Self::Rf08 => "RF08",
            Self::Rf09 => "RF09",
            Self::Rf10 => "RF10",
            Self::Rf11 => "RF11",
            Self::Rf12 => "RF12",
            Self::Rf13 => "RF13",
            Self::Rf14 => "RF14",
            Self::Rf15 => "RF15",
            Self::Rf16 => "RF16",
            Self::Rf17 => "RF17",
            Self::Rf18 => "RF18",
            Self::Rf19 => "RF19",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RF01" => Some(Self::Rf01),
            "RF02" => Some(Self::Rf02),
            "RF04" => Some(Self::Rf04),
            "RF05" => Some(Self::Rf05),
            "RF06" => Some(Self::Rf06),
            "RF07" => Some(Self::Rf07),
            "RF08" => Some(Self::Rf08),
            "RF09" => Some(Self::Rf09),
            "RF10" => Some(Self::Rf10),
            "RF11" => Some(Self::Rf11),
            "RF12" => Some(Self::Rf12),
            "RF13" => Some(Self::Rf13),
            "RF14" => Some(Self::Rf14),
            "RF15" => Some(Self::Rf15),
            "RF16" => Some(Self::Rf16),
            "RF17" => Some(Self::Rf17),
            "RF18" => Some(Self::Rf18),
            "RF19" => Some(Self::Rf19),
            _ => None,
        }
    }
}
