//! Per-line shape classification for signature candidates.

use std::fmt;

/// Structural shape of a candidate line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    /// Could be a signature line.
    Content,
    /// Too long to be part of a signature.
    Long,
    /// Starts with dashes and has other characters as well (separator or list item).
    Dash,
}

impl LineShape {
    pub fn marker(self) -> char {
        match self {
            LineShape::Content => 'c',
            LineShape::Long => 'l',
            LineShape::Dash => 'd',
        }
    }
}

impl fmt::Display for LineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Classify a single line. Length is counted in characters after trimming.
pub fn classify(line: &str, too_long_line: usize) -> LineShape {
    let line = line.trim();
    if line.chars().count() > too_long_line {
        LineShape::Long
    } else if line.starts_with('-') && !line.trim_matches('-').is_empty() {
        LineShape::Dash
    } else {
        LineShape::Content
    }
}

/// Mark every candidate line index with its shape, in candidate order.
///
/// The returned vector is aligned 1:1 with `candidate`.
pub fn mark_candidates(lines: &[&str], candidate: &[usize], too_long_line: usize) -> Vec<LineShape> {
    let mut markers = vec![LineShape::Content; candidate.len()];
    // marked bottom-up
    for (i, &line_idx) in candidate.iter().enumerate().rev() {
        markers[i] = classify(lines[line_idx], too_long_line);
    }
    markers
}

/// Render shapes as a marker string such as `"cldc"`.
pub fn marker_string(markers: &[LineShape]) -> String {
    markers.iter().map(|shape| shape.marker()).collect()
}
