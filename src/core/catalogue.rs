//! EN 16931 Business Group / Business Term catalogue.
//!
//! Codes are written in the zero-padded form used throughout the model
//! (`BG0004`, `BT0030`). The catalogue only maps codes to their human-readable
//! denomination; it does not constrain which codes a model may hold.

/// Length of a normalized code: `BG` or `BT` followed by four digits.
const CODE_LEN: usize = 6;

/// Extract the canonical code from a bare code (`"BG0004"`) or a descriptive
/// name that starts with one (`"BG0004Seller"`).
///
/// Returns `None` when `name` does not start with a well-formed code.
pub fn normalize_code(name: &str) -> Option<&str> {
    let code = name.get(..CODE_LEN)?;
    let bytes = code.as_bytes();
    let prefix_ok = bytes[0] == b'B' && (bytes[1] == b'G' || bytes[1] == b'T');
    if prefix_ok && bytes[2..].iter().all(u8::is_ascii_digit) {
        Some(code)
    } else {
        None
    }
}

/// `true` for Business Group codes.
pub fn is_group_code(code: &str) -> bool {
    code.starts_with("BG")
}

/// Human-readable denomination for a code, e.g.
/// `"BT-30 Seller legal registration identifier"`.
pub fn denomination(code: &str) -> Option<&'static str> {
    CATALOGUE
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| CATALOGUE[i].1)
}

/// Sorted by code for binary search.
static CATALOGUE: &[(&str, &str)] = &[
    ("BG0000", "BG-0 Invoice"),
    ("BG0001", "BG-1 Invoice note"),
    ("BG0002", "BG-2 Process control"),
    ("BG0003", "BG-3 Preceding invoice reference"),
    ("BG0004", "BG-4 Seller"),
    ("BG0005", "BG-5 Seller postal address"),
    ("BG0006", "BG-6 Seller contact"),
    ("BG0007", "BG-7 Buyer"),
    ("BG0008", "BG-8 Buyer postal address"),
    ("BG0009", "BG-9 Buyer contact"),
    ("BG0010", "BG-10 Payee"),
    ("BG0011", "BG-11 Seller tax representative party"),
    ("BG0016", "BG-16 Payment instructions"),
    ("BG0022", "BG-22 Document totals"),
    ("BG0024", "BG-24 Additional supporting documents"),
    ("BG0025", "BG-25 Invoice line"),
    ("BT0001", "BT-1 Invoice number"),
    ("BT0002", "BT-2 Invoice issue date"),
    ("BT0003", "BT-3 Invoice type code"),
    ("BT0005", "BT-5 Invoice currency code"),
    ("BT0006", "BT-6 VAT accounting currency code"),
    ("BT0007", "BT-7 Value added tax point date"),
    ("BT0009", "BT-9 Payment due date"),
    ("BT0010", "BT-10 Buyer reference"),
    ("BT0013", "BT-13 Purchase order reference"),
    ("BT0020", "BT-20 Payment terms"),
    ("BT0022", "BT-22 Invoice note"),
    ("BT0027", "BT-27 Seller name"),
    ("BT0028", "BT-28 Seller trading name"),
    ("BT0029", "BT-29 Seller identifier"),
    ("BT0030", "BT-30 Seller legal registration identifier"),
    ("BT0031", "BT-31 Seller VAT identifier"),
    ("BT0032", "BT-32 Seller tax registration identifier"),
    ("BT0033", "BT-33 Seller additional legal information"),
    ("BT0034", "BT-34 Seller electronic address"),
    ("BT0035", "BT-35 Seller address line 1"),
    ("BT0036", "BT-36 Seller address line 2"),
    ("BT0037", "BT-37 Seller city"),
    ("BT0038", "BT-38 Seller post code"),
    ("BT0039", "BT-39 Seller country subdivision"),
    ("BT0040", "BT-40 Seller country code"),
    ("BT0044", "BT-44 Buyer name"),
    ("BT0046", "BT-46 Buyer identifier"),
    ("BT0047", "BT-47 Buyer legal registration identifier"),
    ("BT0048", "BT-48 Buyer VAT identifier"),
    ("BT0049", "BT-49 Buyer electronic address"),
    ("BT0050", "BT-50 Buyer address line 1"),
    ("BT0052", "BT-52 Buyer city"),
    ("BT0053", "BT-53 Buyer post code"),
    ("BT0055", "BT-55 Buyer country code"),
    ("BT0109", "BT-109 Invoice total amount without VAT"),
    ("BT0110", "BT-110 Invoice total VAT amount"),
    ("BT0112", "BT-112 Invoice total amount with VAT"),
    ("BT0115", "BT-115 Amount due for payment"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_and_named() {
        assert_eq!(normalize_code("BG0004"), Some("BG0004"));
        assert_eq!(normalize_code("BG0004Seller"), Some("BG0004"));
        assert_eq!(
            normalize_code("BT0030SellerLegalRegistrationIdentifier"),
            Some("BT0030")
        );
    }

    #[test]
    fn normalize_rejects_malformed() {
        assert_eq!(normalize_code("BG4"), None);
        assert_eq!(normalize_code("BX0004"), None);
        assert_eq!(normalize_code("bg0004"), None);
        assert_eq!(normalize_code("BG00A4"), None);
        assert_eq!(normalize_code(""), None);
        assert_eq!(normalize_code("BG00é4"), None);
    }

    #[test]
    fn denominations() {
        assert_eq!(denomination("BG0004"), Some("BG-4 Seller"));
        assert_eq!(
            denomination("BT0032"),
            Some("BT-32 Seller tax registration identifier")
        );
        assert_eq!(denomination("BT9999"), None);
    }

    #[test]
    fn catalogue_is_sorted() {
        for window in CATALOGUE.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "catalogue not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }
}
