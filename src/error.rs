use thiserror::Error;

/// Internal faults that abort an extraction.
///
/// None of these cross [`SignatureExtractor::extract`](crate::SignatureExtractor::extract):
/// they end up inside [`Outcome::Degraded`](crate::Outcome::Degraded) next to the
/// untouched input body.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    #[error("failed to compile phrase pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("offset {offset} is out of range for text of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("offset {offset} does not fall on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Errors raised while loading message bodies for extraction.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse MIME structure: {0}")]
    Mime(#[from] mailparse::MailParseError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Slice `text[..end]`, reporting instead of panicking on bad offsets.
pub(crate) fn checked_prefix(text: &str, end: usize) -> Result<&str, ExtractError> {
    if end > text.len() {
        return Err(ExtractError::OffsetOutOfRange {
            offset: end,
            len: text.len(),
        });
    }
    text.get(..end)
        .ok_or(ExtractError::NotCharBoundary { offset: end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_prefix_in_range() {
        assert_eq!(checked_prefix("hello", 3).unwrap(), "hel");
        assert_eq!(checked_prefix("hello", 5).unwrap(), "hello");
    }

    #[test]
    fn checked_prefix_rejects_overflow() {
        let err = checked_prefix("hi", 3).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::OffsetOutOfRange { offset: 3, len: 2 }
        ));
    }

    #[test]
    fn checked_prefix_rejects_split_character() {
        let err = checked_prefix("grüße", 3).unwrap_err();
        assert!(matches!(err, ExtractError::NotCharBoundary { offset: 3 }));
    }
}
