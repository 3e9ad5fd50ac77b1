use std::env;

/// Maximum trimmed length (in characters) of a line that can still be part of a signature.
pub const TOO_LONG_SIGNATURE_LINE: usize = 60;

/// Suggested cap for [`ExtractorConfig::max_signature_lines`].
pub const SIGNATURE_MAX_LINES: usize = 11;

fn env_usize(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
}

/// Tunables for signature extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Lines whose trimmed length exceeds this are classified as long.
    pub too_long_line: usize,
    /// Only the last N non-empty lines are considered as signature candidates.
    /// `None` considers every non-empty line after the first.
    pub max_signature_lines: Option<usize>,
}

impl ExtractorConfig {
    /// Read overrides from `SIGNATURE_TOO_LONG_LINE` and `SIGNATURE_MAX_LINES`.
    ///
    /// Missing or unparsable values fall back to the defaults. A `SIGNATURE_MAX_LINES`
    /// of `0` disables the cap.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            too_long_line: env_usize("SIGNATURE_TOO_LONG_LINE").unwrap_or(defaults.too_long_line),
            max_signature_lines: match env_usize("SIGNATURE_MAX_LINES") {
                Some(0) => None,
                Some(limit) => Some(limit),
                None => defaults.max_signature_lines,
            },
        }
    }

    pub fn with_too_long_line(mut self, too_long_line: usize) -> Self {
        self.too_long_line = too_long_line;
        self
    }

    pub fn with_max_signature_lines(mut self, limit: Option<usize>) -> Self {
        self.max_signature_lines = limit.filter(|limit| *limit > 0);
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            too_long_line: TOO_LONG_SIGNATURE_LINE,
            max_signature_lines: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtin_threshold() {
        let config = ExtractorConfig::default();
        assert_eq!(config.too_long_line, 60);
        assert_eq!(config.max_signature_lines, None);
    }

    #[test]
    fn zero_cap_disables_limit() {
        let config = ExtractorConfig::default().with_max_signature_lines(Some(0));
        assert_eq!(config.max_signature_lines, None);

        let config = config.with_max_signature_lines(Some(SIGNATURE_MAX_LINES));
        assert_eq!(config.max_signature_lines, Some(11));
    }
}
