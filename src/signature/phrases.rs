//! Phrase patterns that anchor the start of a signature.
//!
//! Two independent sets are maintained:
//!
//! - **Sign-off phrases**: valedictions such as "Regards", "Thanks", "Cheers", German
//!   closers ("Mit freundlichen Grüßen", "Vielen Dank") and dash separator lines.
//!   These are ambiguous on their own and are only searched inside the structural
//!   candidate window.
//! - **Phone footers**: trailers appended verbatim by mobile mail clients
//!   ("Sent from my iPhone", "Enviado desde mi BlackBerry"). These need no structural
//!   confirmation and are searched in the whole raw body.
//!
//! Every alternative is compiled as its own case-insensitive, multi-line regex. A set
//! matches at the earliest offset where any of its alternatives matches, and the match
//! always extends to the end of the searched text: the phrase line and everything after
//! it belong to the signature.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;

/// Letters allowed around German closers: ASCII letters, umlauts, sharp s and whitespace.
const ENG_GER_CHARS_SPACES: &str = r"[a-z\x{E4}\x{F6}\x{FC}\x{C4}\x{D6}\x{DC}\x{DF}\s]";

const SIGNOFF_PATTERNS: &[&str] = &[
    // dash separator, optionally followed by a short name
    r"^\s*--*\s*[a-z .]*$",
    r"^\s*\x{2014}+\s*$",
    r"^thanks?\s?(?:you?\s*)?[a-z]*[\s,!]*$",
    r"^regards\s?[a-z]*[\s,!]*$",
    r"^(?:with?\s*)?kind\sregards[\sa-z]*[\s,!]*$",
    r"^take\scare\s?[a-z]*[\s,!]*$",
    r"^cheers\s?[a-z]*[\s,!]*$",
    r"^sincerely[\s,!]*$",
    r"^best[ a-z]*[\s,!]*$",
    r"^ihre?[\s,!]*$",
    r"^deine?[\s,!]*$",
    r"^{ENG}*grüße{ENG}*[\s,!]*$",
    r"^vielen?\sdank[\s,!]*$",
    // not anchored to the line start
    r"die\sbesten\swünsche[\s,!]*$",
    r"^danke{ENG}*[\s,!]*$",
    r"^[a-z\s]+ ?/ ?mit freundlichen grüßen[\n,!]+$",
    r"^mit freundlichen grüßen ?/ ?[a-z\s]+[\n,!]+$",
];

const PHONE_FOOTER_PATTERNS: &[&str] = &[
    r"^sent from my[\s,!\w]*$",
    r"^sent from Mailbox for iPhone",
    r"^sent (?:\S* )?from my BlackBerry",
    r"^Enviado desde mi (?:\S+ ){0,2}BlackBerry",
];

static SIGNOFF: OnceLock<Result<PhraseSet, regex::Error>> = OnceLock::new();
static PHONE_FOOTER: OnceLock<Result<PhraseSet, regex::Error>> = OnceLock::new();

/// A phrase hit: the matched phrase line through the end of the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'t> {
    start: usize,
    text: &'t str,
}

impl<'t> PhraseMatch<'t> {
    /// Byte offset of the match in the searched text.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the match, which is always the end of the searched text.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn as_str(&self) -> &'t str {
        self.text
    }
}

/// A named group of alternative phrase patterns.
#[derive(Debug)]
pub struct PhraseSet {
    name: &'static str,
    patterns: Vec<Regex>,
}

impl PhraseSet {
    /// Compile `patterns` case-insensitively with `^`/`$` matching at line boundaries.
    ///
    /// `{ENG}` inside a pattern expands to the German/English letter class.
    pub fn compile(name: &'static str, patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(&pattern.replace("{ENG}", ENG_GER_CHARS_SPACES))
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!("compiled {} phrase set ({} patterns)", name, patterns.len());
        Ok(Self { name, patterns })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Find the earliest offset at which any alternative matches.
    ///
    /// The returned span runs from that offset to the end of `text`.
    pub fn find<'t>(&self, text: &'t str) -> Option<PhraseMatch<'t>> {
        let start = self
            .patterns
            .iter()
            .filter_map(|re| re.find(text))
            .map(|m| m.start())
            .min()?;

        Some(PhraseMatch {
            start,
            text: &text[start..],
        })
    }
}

fn cached(
    cell: &'static OnceLock<Result<PhraseSet, regex::Error>>,
    name: &'static str,
    patterns: &[&str],
) -> Result<&'static PhraseSet, ExtractError> {
    cell.get_or_init(|| PhraseSet::compile(name, patterns))
        .as_ref()
        .map_err(|e| ExtractError::Pattern(e.clone()))
}

/// The built-in sign-off phrase set.
pub fn signoff_phrases() -> Result<&'static PhraseSet, ExtractError> {
    cached(&SIGNOFF, "sign-off", SIGNOFF_PATTERNS)
}

/// The built-in phone-footer phrase set.
pub fn phone_footer_phrases() -> Result<&'static PhraseSet, ExtractError> {
    cached(&PHONE_FOOTER, "phone footer", PHONE_FOOTER_PATTERNS)
}

/// Search `text` for a sign-off phrase.
pub fn find_signoff(text: &str) -> Result<Option<PhraseMatch<'_>>, ExtractError> {
    Ok(signoff_phrases()?.find(text))
}

/// Search `text` for a phone-client footer.
pub fn find_phone_footer(text: &str) -> Result<Option<PhraseMatch<'_>>, ExtractError> {
    Ok(phone_footer_phrases()?.find(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signoff(text: &str) -> Option<&str> {
        find_signoff(text).unwrap().map(|m| m.as_str())
    }

    fn phone(text: &str) -> Option<&str> {
        find_phone_footer(text).unwrap().map(|m| m.as_str())
    }

    #[test]
    fn test_builtin_sets_compile() {
        assert_eq!(signoff_phrases().unwrap().name(), "sign-off");
        assert_eq!(phone_footer_phrases().unwrap().name(), "phone footer");
    }

    #[test]
    fn test_dash_separator_takes_rest_of_text() {
        assert_eq!(signoff("--\nRegards,\nRoman"), Some("--\nRegards,\nRoman"));
        assert_eq!(signoff("-- John Doe\nAcme"), Some("-- John Doe\nAcme"));
        assert_eq!(signoff("\u{2014}\u{2014}\nJohn"), Some("\u{2014}\u{2014}\nJohn"));
    }

    #[test]
    fn test_english_signoffs() {
        assert_eq!(signoff("Thanks,\nBob"), Some("Thanks,\nBob"));
        assert_eq!(signoff("Thank you!\nBob"), Some("Thank you!\nBob"));
        assert_eq!(signoff("Kind regards\nBob"), Some("Kind regards\nBob"));
        assert_eq!(signoff("With kind regards,\nBob"), Some("With kind regards,\nBob"));
        assert_eq!(signoff("Take care\nBob"), Some("Take care\nBob"));
        assert_eq!(signoff("Cheers mate!\nBob"), Some("Cheers mate!\nBob"));
        assert_eq!(signoff("SINCERELY,\nBob"), Some("SINCERELY,\nBob"));
        assert_eq!(signoff("Best wishes,\nBob"), Some("Best wishes,\nBob"));
    }

    #[test]
    fn test_signoff_must_fill_the_line() {
        assert_eq!(signoff("Thanks for the update, see you tomorrow."), None);
        assert_eq!(signoff("Regards to your family."), None);
        assert_eq!(signoff("The best option is B."), None);
    }

    #[test]
    fn test_german_signoffs() {
        assert_eq!(signoff("Ihr\nMax"), Some("Ihr\nMax"));
        assert_eq!(signoff("Deine\nAnna"), Some("Deine\nAnna"));
        assert_eq!(signoff("Viele Grüße\nMax"), Some("Viele Grüße\nMax"));
        assert_eq!(signoff("Vielen Dank!\nMax"), Some("Vielen Dank!\nMax"));
        assert_eq!(signoff("Danke schön\nMax"), Some("Danke schön\nMax"));
        assert_eq!(
            signoff("Max Mustermann / Mit freundlichen Grüßen\n"),
            Some("Max Mustermann / Mit freundlichen Grüßen\n")
        );
        assert_eq!(
            signoff("Mit freundlichen Grüßen / Max,"),
            Some("Mit freundlichen Grüßen / Max,")
        );
    }

    #[test]
    fn test_besten_wuensche_matches_mid_line() {
        assert_eq!(
            signoff("Alles Gute und die besten Wünsche\nMax"),
            Some("die besten Wünsche\nMax")
        );
    }

    #[test]
    fn test_earliest_alternative_wins() {
        // "Best" appears before the dash line, so it anchors the match.
        let m = find_signoff("Hello\nBest\n--\nBob").unwrap().unwrap();
        assert_eq!(m.start(), 6);
        assert_eq!(m.as_str(), "Best\n--\nBob");
        assert_eq!(m.end(), "Hello\nBest\n--\nBob".len());
    }

    #[test]
    fn test_phone_footers() {
        assert_eq!(phone("Hi\n\nSent from my iPhone"), Some("Sent from my iPhone"));
        assert_eq!(
            phone("Hi\nsent from Mailbox for iPhone\n"),
            Some("sent from Mailbox for iPhone\n")
        );
        assert_eq!(
            phone("Hi\nSent wirelessly from my BlackBerry device"),
            Some("Sent wirelessly from my BlackBerry device")
        );
        assert_eq!(
            phone("Hola\nEnviado desde mi oficina movil BlackBerry"),
            Some("Enviado desde mi oficina movil BlackBerry")
        );
    }

    #[test]
    fn test_phone_footer_must_start_line() {
        assert_eq!(phone("It was sent from my iPhone"), None);
        assert_eq!(phone("Nothing to see here"), None);
    }
}
