//! Overflow attachment for source data with no place in FatturaPA.
//!
//! All such data lands in a single plain-text attachment named
//! [`OVERFLOW_ATTACHMENT_NAME`], one fact per line:
//!
//! ```text
//! <label>: [<scheme>:]<value>
//! ```
//!
//! Lines are UTF-8 and terminated by `\n`. Existing content is never
//! rewritten, so repeated appends concatenate byte for byte. Content left
//! without a final terminator gets one before the next line.

use crate::core::NULL_SCHEME;

use super::document::{Attachment, Body};

/// Name of the overflow attachment.
pub const OVERFLOW_ATTACHMENT_NAME: &str = "not-mapped-values";

/// Format tag of the overflow attachment.
pub const OVERFLOW_FORMAT: &str = "txt";

/// Format one overflow line, including its terminator.
///
/// The scheme is omitted when absent or equal to the `"null"` marker.
pub fn format_line(label: &str, scheme: Option<&str>, value: &str) -> String {
    match scheme.filter(|s| *s != NULL_SCHEME) {
        Some(scheme) => format!("{label}: {scheme}:{value}\n"),
        None => format!("{label}: {value}\n"),
    }
}

/// Append a line to the overflow attachment of `body`, creating the
/// attachment if the body has none.
pub fn append_overflow(body: &mut Body, label: &str, scheme: Option<&str>, value: &str) {
    let line = format_line(label, scheme, value);
    tracing::info!(line = line.trim_end(), "routed value to overflow attachment");

    let content = &mut overflow_attachment_mut(body).content;
    if content.last().is_some_and(|b| *b != b'\n') {
        content.push(b'\n');
    }
    content.extend_from_slice(line.as_bytes());
}

/// The overflow attachment, registered in the body's attachment list on
/// first use.
fn overflow_attachment_mut(body: &mut Body) -> &mut Attachment {
    let position = body
        .attachments
        .iter()
        .position(|a| a.name == OVERFLOW_ATTACHMENT_NAME);
    let index = match position {
        Some(index) => index,
        None => {
            body.attachments.push(Attachment {
                name: OVERFLOW_ATTACHMENT_NAME.to_string(),
                format: Some(OVERFLOW_FORMAT.to_string()),
                content: Vec::new(),
            });
            body.attachments.len() - 1
        }
    };
    &mut body.attachments[index]
}

/// Current overflow text, if any has been written.
pub fn overflow_text(body: &Body) -> Option<String> {
    body.attachment(OVERFLOW_ATTACHMENT_NAME)
        .map(|a| String::from_utf8_lossy(&a.content).into_owned())
}

/// Overflow lines without terminators.
pub fn overflow_lines(body: &Body) -> Vec<String> {
    overflow_text(body)
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        assert_eq!(
            format_line("BT-30 Seller legal registration identifier", Some("0088"), "123"),
            "BT-30 Seller legal registration identifier: 0088:123\n"
        );
        assert_eq!(format_line("BT-32", None, "X"), "BT-32: X\n");
        assert_eq!(format_line("BT-29", Some("null"), "X"), "BT-29: X\n");
    }

    #[test]
    fn first_append_creates_attachment() {
        let mut body = Body::default();
        assert!(overflow_text(&body).is_none());

        append_overflow(&mut body, "BT-29", Some("0088"), "A1");

        assert_eq!(body.attachments.len(), 1);
        let attachment = &body.attachments[0];
        assert_eq!(attachment.name, "not-mapped-values");
        assert_eq!(attachment.format.as_deref(), Some("txt"));
        assert_eq!(attachment.content, b"BT-29: 0088:A1\n");
    }

    #[test]
    fn appends_preserve_previous_lines() {
        let mut body = Body::default();
        append_overflow(&mut body, "BT-29", Some("0088"), "A1");
        append_overflow(&mut body, "BT-30", None, "B2");
        append_overflow(&mut body, "BT-32", Some("IT:X"), "C3");

        assert_eq!(body.attachments.len(), 1);
        assert_eq!(
            overflow_text(&body).unwrap(),
            "BT-29: 0088:A1\nBT-30: B2\nBT-32: IT:X:C3\n"
        );
        assert_eq!(overflow_lines(&body), vec!["BT-29: 0088:A1", "BT-30: B2", "BT-32: IT:X:C3"]);
    }

    #[test]
    fn finds_sentinel_among_other_attachments() {
        let mut body = Body::default();
        body.attachments.push(Attachment {
            name: "contract.pdf".into(),
            format: Some("PDF".into()),
            content: vec![0x25, 0x50],
        });
        body.attachments.push(Attachment {
            name: OVERFLOW_ATTACHMENT_NAME.into(),
            format: Some(OVERFLOW_FORMAT.into()),
            content: b"existing: line\n".to_vec(),
        });

        append_overflow(&mut body, "BT-29", None, "X");

        assert_eq!(body.attachments.len(), 2);
        assert_eq!(body.attachments[0].content, vec![0x25, 0x50]);
        assert_eq!(
            body.attachments[1].content,
            b"existing: line\nBT-29: X\n".to_vec()
        );
    }

    #[test]
    fn unterminated_content_is_closed_before_append() {
        let mut body = Body::default();
        body.attachments.push(Attachment {
            name: OVERFLOW_ATTACHMENT_NAME.into(),
            format: Some(OVERFLOW_FORMAT.into()),
            content: b"legacy: fact".to_vec(),
        });

        append_overflow(&mut body, "BT-29", None, "X");

        assert_eq!(overflow_lines(&body), vec!["legacy: fact", "BT-29: X"]);
        assert_eq!(overflow_text(&body).unwrap(), "legacy: fact\nBT-29: X\n");
    }

    #[test]
    fn other_attachments_do_not_receive_overflow() {
        let mut body = Body::default();
        body.attachments.push(Attachment {
            name: "invoice.pdf".into(),
            format: None,
            content: Vec::new(),
        });
        append_overflow(&mut body, "BT-29", None, "X");
        assert_eq!(body.attachments.len(), 2);
        assert!(body.attachments[0].content.is_empty());
    }

    #[test]
    fn utf8_values_roundtrip() {
        let mut body = Body::default();
        append_overflow(&mut body, "BT-27", None, "Società Cooperativa «Sì»");
        assert_eq!(
            overflow_text(&body).unwrap(),
            "BT-27: Società Cooperativa «Sì»\n"
        );
    }
}
