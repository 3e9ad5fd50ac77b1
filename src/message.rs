//! Plain-text body extraction from raw RFC 5322 messages.
//!
//! Signature detection works on already-decoded text. This module gets there from a
//! raw `.eml` file with `mailparse`: multipart messages contribute their first
//! `text/plain` leaf, searched through nested multiparts, everything else falls back
//! to the root body.

use std::io::Read;
use std::path::Path;

use mailparse::{ParsedMail, parse_mail};

use crate::error::InputError;

/// How raw input bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// The input already is the plain-text body.
    #[default]
    Text,
    /// The input is a full RFC 5322 message.
    Eml,
}

/// Remove NUL bytes left behind by malformed messages.
fn sanitize_text(text: &str) -> String {
    text.replace('\0', "")
}

/// First `text/plain` leaf in depth-first order, descending into nested multiparts.
fn find_text_plain<'a, 'b>(part: &'b ParsedMail<'a>) -> Option<&'b ParsedMail<'a>> {
    if part.subparts.is_empty() {
        return (part.ctype.mimetype == "text/plain").then_some(part);
    }
    part.subparts.iter().find_map(find_text_plain)
}

/// Decode the plain-text body of a raw message.
pub fn plain_text_body(raw: &[u8]) -> Result<String, InputError> {
    let parsed = parse_mail(raw).map_err(|e| {
        log::debug!("failed to parse MIME: {}", e);
        InputError::Mime(e)
    })?;

    let text_part = find_text_plain(&parsed)
        .map(|part| part.get_body())
        .transpose()?
        .unwrap_or_default();

    let body = if text_part.is_empty() {
        parsed.get_body()?
    } else {
        text_part
    };

    Ok(sanitize_text(&body))
}

/// Read a body from `reader`, decoding it according to `format`.
///
/// Plain text is decoded lossily so stray invalid bytes do not reject the whole body.
pub fn read_body<R: Read>(mut reader: R, format: InputFormat) -> Result<String, InputError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    match format {
        InputFormat::Text => Ok(sanitize_text(&String::from_utf8_lossy(&raw))),
        InputFormat::Eml => plain_text_body(&raw),
    }
}

/// Read a body from the file at `path`.
pub fn read_body_file(path: &Path, format: InputFormat) -> Result<String, InputError> {
    let file = std::fs::File::open(path)?;
    read_body(std::io::BufReader::new(file), format)
}
