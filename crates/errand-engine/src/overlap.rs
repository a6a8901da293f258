//! Overlap detection between errands.
//!
//! Everything here is a pure function of its arguments: the caller passes
//! the full, point-in-time set of candidate errands on every call and the
//! engine keeps no state between calls. A linear scan is used throughout,
//! which is fine for boards of a few thousand errands.

use serde::Serialize;
use tracing::debug;

use crate::errand::{Errand, UserId};
use crate::interval::Interval;

/// Whether two intervals overlap under the half-open rule.
///
/// `a.start < b.end && b.start < a.end`. Symmetric in its arguments.
/// Touching endpoints do not count.
///
/// # Examples
///
/// ```
/// use errand_engine::{overlaps, Interval};
///
/// let morning = Interval::parse("09:00", "10:00").unwrap();
/// let late_morning = Interval::parse("10:00", "11:00").unwrap();
/// let brunch = Interval::parse("09:30", "11:00").unwrap();
///
/// assert!(!overlaps(&morning, &late_morning));
/// assert!(overlaps(&morning, &brunch));
/// ```
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

/// Find every candidate whose interval overlaps `target`'s.
///
/// Candidates with the same id as `target` are skipped, so the full errand
/// set can be passed as-is. The result keeps the order of `candidates`; an
/// empty result means no conflict.
pub fn find_overlaps<'a, I>(target: &Errand, candidates: I) -> Vec<&'a Errand>
where
    I: IntoIterator<Item = &'a Errand>,
{
    let found: Vec<&Errand> = candidates
        .into_iter()
        .filter(|c| c.id != target.id)
        .filter(|c| overlaps(&target.interval, &c.interval))
        .collect();

    debug!(
        errand = target.id,
        interval = %target.interval,
        conflicts = found.len(),
        "computed overlaps"
    );
    found
}

/// One of a user's errands together with the errands it collides with.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedErrand<'a> {
    pub errand: &'a Errand,
    pub overlaps: Vec<&'a Errand>,
}

/// Pair each errand owned by `user` with its overlaps against `all`.
///
/// Both the user's errands and each overlap list follow the order of `all`.
/// Cost is O(n·m) for n owned errands and m errands in total.
pub fn annotate_overlaps(user: UserId, all: &[Errand]) -> Vec<AnnotatedErrand<'_>> {
    all.iter()
        .filter(|e| e.is_owned_by(user))
        .map(|errand| AnnotatedErrand {
            errand,
            overlaps: find_overlaps(errand, all),
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────
