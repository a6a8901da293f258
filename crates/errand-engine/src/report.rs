//! Human-readable and structured conflict reports.

use std::fmt;

use serde::Serialize;

use crate::errand::{Errand, ErrandId};

/// Header line of a non-empty text report.
pub const REPORT_HEADER: &str = "⚠ Warning! This errand overlaps with:";

/// One conflicting errand, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    pub errand_id: ErrandId,
    pub owner_name: String,
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&Errand> for ConflictEntry {
    fn from(e: &Errand) -> Self {
        Self {
            errand_id: e.id,
            owner_name: e.owner_name.clone(),
            name: e.name.clone(),
            location: e.location.clone(),
            start_time: e.interval.start.to_string(),
            end_time: e.interval.end.to_string(),
        }
    }
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {}'s {} ({}-{}) at {}",
            self.owner_name, self.name, self.start_time, self.end_time, self.location
        )
    }
}

/// Conflicts of a single target errand.
///
/// `Display` renders the text report: the header followed by one line per
/// conflict, every line newline-terminated. A report with no conflicts
/// renders as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub errand_id: ErrandId,
    pub errand_name: String,
    pub conflicts: Vec<ConflictEntry>,
}

impl ConflictReport {
    pub fn new(target: &Errand, overlaps: &[&Errand]) -> Self {
        Self {
            errand_id: target.id,
            errand_name: target.name.clone(),
            conflicts: overlaps.iter().map(|e| ConflictEntry::from(*e)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return Ok(());
        }
        writeln!(f, "{REPORT_HEADER}")?;
        for entry in &self.conflicts {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Render the warning shown when `target` overlaps other errands.
///
/// # Examples
///
/// ```
/// use errand_engine::{find_overlaps, format_conflict_report, Errand};
///
/// let all: Vec<Errand> = serde_json::from_str(r#"[
///     {"id": 1, "owner_id": 1, "owner_name": "alice", "name": "Groceries",
///      "location": "Market", "start_time": "09:00", "end_time": "10:00"},
///     {"id": 2, "owner_id": 2, "owner_name": "bob", "name": "Bank",
///      "location": "Main St", "start_time": "09:30", "end_time": "10:30"}
/// ]"#).unwrap();
///
/// let found = find_overlaps(&all[0], &all);
/// assert_eq!(
///     format_conflict_report(&all[0], &found),
///     "⚠ Warning! This errand overlaps with:\n- bob's Bank (09:30-10:30) at Main St\n"
/// );
/// ```
pub fn format_conflict_report(target: &Errand, overlaps: &[&Errand]) -> String {
    ConflictReport::new(target, overlaps).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errand::{ErrandDraft, User, DEFAULT_PRIORITY};

    fn errand(id: u64, owner: &str, name: &str, location: &str, start: &str, end: &str) -> Errand {
        let draft = ErrandDraft {
            name: name.to_string(),
            location: location.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            priority: None,
        };
        Errand::new(
            id,
            &User::new(id, owner),
            draft.validate(DEFAULT_PRIORITY).unwrap(),
        )
    }

    #[test]
    fn test_report_lists_each_conflict() {
        let target = errand(1, "alice", "Groceries", "Market", "09:00", "12:00");
        let x = errand(2, "bob", "Bank", "Main St", "08:00", "09:30");
        let y = errand(3, "carol", "Gym", "Downtown", "11:00", "13:00");

        let text = format_conflict_report(&target, &[&x, &y]);
        assert_eq!(
            text,
            "⚠ Warning! This errand overlaps with:\n\
             - bob's Bank (08:00-09:30) at Main St\n\
             - carol's Gym (11:00-13:00) at Downtown\n"
        );
    }

    #[test]
    fn test_report_empty_when_no_conflicts() {
        let target = errand(1, "alice", "Groceries", "Market", "09:00", "10:00");
        assert_eq!(format_conflict_report(&target, &[]), "");
        assert!(ConflictReport::new(&target, &[]).is_empty());
    }

    #[test]
    fn test_structured_report_fields() {
        let target = errand(1, "alice", "Groceries", "Market", "09:00", "10:00");
        let other = errand(5, "bob", "Bank", "Main St", "09:30", "10:30");
        let report = ConflictReport::new(&target, &[&other]);

        assert_eq!(report.errand_id, 1);
        assert_eq!(report.errand_name, "Groceries");
        assert_eq!(
            report.conflicts,
            vec![ConflictEntry {
                errand_id: 5,
                owner_name: "bob".to_string(),
                name: "Bank".to_string(),
                location: "Main St".to_string(),
                start_time: "09:30".to_string(),
                end_time: "10:30".to_string(),
            }]
        );
    }
}
