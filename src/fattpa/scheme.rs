//! Identification scheme resolution for seller identifiers.
//!
//! A scheme tag is matched against a closed table of Italian schemes, either
//! exactly (`scheme = "IT:REA"`) or as a prefix embedded in the raw value
//! (`value = "IT:REA:RM:123456"`). Composite schemes then split the value on
//! [`COMPOSITE_DELIMITER`] and must yield enough parts; otherwise the
//! identifier is reported as [`ResolvedKind::Malformed`] rather than failing.

use crate::core::Identifier;

/// Separator between the parts of a composite identifier.
pub const COMPOSITE_DELIMITER: char = ':';

/// Codice Fiscale.
pub const SCHEME_TAX_CODE: &str = "IT:CF";
/// EORI code.
pub const SCHEME_EORI: &str = "IT:EORI";
/// Professional register (`<register>:<number>`).
pub const SCHEME_PROFESSIONAL_REGISTER: &str = "IT:ALBO";
/// REA companies register (`<office>:<number>`).
pub const SCHEME_REA: &str = "IT:REA";

/// Minimum parts of a REA value: office and number.
pub const MIN_REA_PARTS: usize = 2;

/// The recognized schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    TaxCode,
    Eori,
    ProfessionalRegister,
    Rea,
}

static SCHEMES: &[(&str, SchemeKind)] = &[
    (SCHEME_PROFESSIONAL_REGISTER, SchemeKind::ProfessionalRegister),
    (SCHEME_TAX_CODE, SchemeKind::TaxCode),
    (SCHEME_EORI, SchemeKind::Eori),
    (SCHEME_REA, SchemeKind::Rea),
];

impl SchemeKind {
    /// Exact lookup of a scheme tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        SCHEMES.iter().find(|(t, _)| *t == tag).map(|(_, k)| *k)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::TaxCode => SCHEME_TAX_CODE,
            Self::Eori => SCHEME_EORI,
            Self::ProfessionalRegister => SCHEME_PROFESSIONAL_REGISTER,
            Self::Rea => SCHEME_REA,
        }
    }

    /// Structural check of a value under this scheme.
    fn parse(self, value: &str) -> ResolvedKind {
        let parsed = match self {
            Self::TaxCode => non_empty(value).map(ResolvedKind::TaxCode),
            Self::Eori => non_empty(value).map(ResolvedKind::Eori),
            Self::ProfessionalRegister => match split_parts(value).as_slice() {
                [register, number] => Some(ResolvedKind::ProfessionalRegister {
                    register: register.to_string(),
                    number: number.to_string(),
                }),
                _ => None,
            },
            Self::Rea => {
                let parts = split_parts(value);
                if parts.len() >= MIN_REA_PARTS {
                    Some(ResolvedKind::Rea {
                        office: parts[0].to_string(),
                        number: parts[1].to_string(),
                    })
                } else {
                    None
                }
            }
        };
        parsed.unwrap_or(ResolvedKind::Malformed(self))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value.to_string())
}

/// Split on the delimiter; any empty part makes the whole value unusable.
fn split_parts(value: &str) -> Vec<&str> {
    let parts: Vec<&str> = value.split(COMPOSITE_DELIMITER).collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        Vec::new()
    } else {
        parts
    }
}

/// What an identifier turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKind {
    TaxCode(String),
    Eori(String),
    ProfessionalRegister { register: String, number: String },
    Rea { office: String, number: String },
    /// Known scheme, but the value fails its structural precondition.
    Malformed(SchemeKind),
    /// Scheme not in the table (or absent).
    Unrecognized,
}

/// Result of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The scheme tag as matched, or [`NULL_SCHEME`](crate::core::NULL_SCHEME) when none.
    pub scheme: String,
    /// The value with any embedded scheme prefix removed.
    pub value: String,
    pub kind: ResolvedKind,
}

impl Resolution {
    /// `true` when the identifier has a structured destination.
    pub fn is_structured(&self) -> bool {
        !matches!(
            self.kind,
            ResolvedKind::Malformed(_) | ResolvedKind::Unrecognized
        )
    }
}

/// Resolve an identifier against the scheme table.
pub fn resolve(identifier: &Identifier) -> Resolution {
    let value = identifier.value();

    if let Some(kind) = identifier.scheme().and_then(SchemeKind::from_tag) {
        return Resolution {
            scheme: kind.tag().to_string(),
            value: value.to_string(),
            kind: kind.parse(value),
        };
    }

    if let Some((kind, rest)) = embedded_scheme(value) {
        return Resolution {
            scheme: kind.tag().to_string(),
            value: rest.to_string(),
            kind: kind.parse(rest),
        };
    }

    Resolution {
        scheme: identifier.scheme_or_null().to_string(),
        value: value.to_string(),
        kind: ResolvedKind::Unrecognized,
    }
}

/// Resolve a bare string that may embed its scheme (`"IT:CF:RSSMRA..."`).
pub fn resolve_raw(raw: &str) -> Resolution {
    resolve(&Identifier::new(raw))
}

/// Find a known scheme tag prefixing `value`, followed by the delimiter.
fn embedded_scheme(value: &str) -> Option<(SchemeKind, &str)> {
    SCHEMES.iter().find_map(|(tag, kind)| {
        value
            .strip_prefix(tag)
            .and_then(|rest| rest.strip_prefix(COMPOSITE_DELIMITER))
            .map(|rest| (*kind, rest))
    })
}
