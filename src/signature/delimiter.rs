//! Line delimiter detection.
//!
//! A message body is assumed to use one line ending throughout; the first line break
//! found decides which one. Bodies without any line break default to `"\n"`.

/// Line ending used by a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Lf,
    CrLf,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Lf => "\n",
            Delimiter::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the line delimiter of `text` from its first line break.
pub fn detect_delimiter(text: &str) -> Delimiter {
    detect_delimiter_bytes(text.as_bytes())
}

/// Same as [`detect_delimiter`] for undecoded message bytes.
pub fn detect_delimiter_bytes(bytes: &[u8]) -> Delimiter {
    match bytes.iter().position(|&b| b == b'\n') {
        Some(idx) if idx > 0 && bytes[idx - 1] == b'\r' => Delimiter::CrLf,
        _ => Delimiter::Lf,
    }
}

/// Split `text` on `delimiter`, dropping a single empty trailing segment.
///
/// Joining the result back with the same delimiter does not necessarily reproduce
/// `text`: a trailing delimiter is lost.
pub fn split_lines(text: &str, delimiter: Delimiter) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split(delimiter.as_str()).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
