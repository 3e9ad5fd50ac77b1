//! Candidate window selection over line shape markers.
//!
//! The marker string is read from the bottom of the message. Trailing long lines are
//! set aside first: they never start a window, but once a window starts above them they
//! belong to it. On what remains, let the *tail run* be the maximal run of
//! [`LineShape::Content`] markers at the end (possibly empty). Three rules are tried in
//! order and the first one that applies wins:
//!
//! 1. `c+ d` directly above the tail run: content lines, exactly one dash line, then
//!    the tail run (or the end of the string). The window starts at the first of those
//!    content lines.
//! 2. The tail run alone, when nothing or a long line sits above it.
//! 3. A single dash line directly above the tail run (or a trailing dash line). The
//!    window starts at that dash line.
//!
//! Anything else (empty string, only long lines) selects no window.
//!
//! ```text
//! ccc   -> 0..3   rule 2
//! lcc   -> 1..3   rule 2
//! ccl   -> 0..3   rule 2
//! cdc   -> 0..3   rule 1
//! ccdl  -> 0..4   rule 1
//! clddc -> 3..5   rule 3
//! lll   -> none
//! ```

use std::ops::Range;

use super::shape::LineShape;

type Rule = fn(&[LineShape], usize) -> Option<usize>;

const RULES: &[(&str, Rule)] = &[
    ("content+dash", content_then_dash as Rule),
    ("content run", content_run as Rule),
    ("single dash", single_dash as Rule),
];

/// Select the candidate window as a range of positions into `markers`.
///
/// The range always ends at `markers.len()`.
pub fn select_window(markers: &[LineShape]) -> Option<Range<usize>> {
    let end = markers
        .iter()
        .rposition(|shape| *shape != LineShape::Long)
        .map_or(0, |idx| idx + 1);
    let head = &markers[..end];
    let tail = tail_run_start(head);

    RULES.iter().find_map(|(name, rule)| {
        let start = rule(head, tail)?;
        log::trace!("window rule `{}` selected start {}", name, start);
        Some(start..markers.len())
    })
}

fn tail_run_start(markers: &[LineShape]) -> usize {
    markers
        .iter()
        .rposition(|shape| *shape != LineShape::Content)
        .map_or(0, |idx| idx + 1)
}

fn content_then_dash(markers: &[LineShape], tail: usize) -> Option<usize> {
    let dash = tail.checked_sub(1)?;
    if markers[dash] != LineShape::Dash {
        return None;
    }

    let start = markers[..dash]
        .iter()
        .rposition(|shape| *shape != LineShape::Content)
        .map_or(0, |idx| idx + 1);

    (start < dash).then_some(start)
}

fn content_run(markers: &[LineShape], tail: usize) -> Option<usize> {
    if tail == markers.len() {
        return None;
    }

    match tail.checked_sub(1).map(|idx| markers[idx]) {
        None | Some(LineShape::Long) => Some(tail),
        Some(_) => None,
    }
}

fn single_dash(markers: &[LineShape], tail: usize) -> Option<usize> {
    let dash = tail.checked_sub(1)?;
    (markers[dash] == LineShape::Dash).then_some(dash)
}
