//! An in-memory errand board.
//!
//! [`Board`] wraps one snapshot of every errand and applies the board's
//! rules on top of it: only the owner may edit or delete an errand, anyone
//! may join one, and every create or edit is checked for overlaps against
//! the rest of the snapshot. Overlaps are warnings; they never block a
//! write. Loading and saving the snapshot is up to the caller.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::errand::{Errand, ErrandDraft, ErrandId, User, UserId, DEFAULT_PRIORITY};
use crate::error::{ErrandError, Result};
use crate::overlap::{annotate_overlaps, find_overlaps, AnnotatedErrand};
use crate::report::ConflictReport;

/// The errand that was written, plus what it now overlaps.
#[derive(Debug, Clone, Serialize)]
pub struct Mutation {
    pub errand: Errand,
    pub report: ConflictReport,
}

/// Result of [`Board::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    errands: Vec<Errand>,
    default_priority: Option<i64>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a loaded snapshot.
    ///
    /// # Errors
    ///
    /// [`ErrandError::DuplicateId`] if two errands share an id.
    pub fn from_errands(errands: Vec<Errand>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(errands.len());
        if let Some(dup) = errands.iter().find(|e| !seen.insert(e.id)) {
            warn!(errand = dup.id, "snapshot holds duplicate errand id");
            return Err(ErrandError::DuplicateId(dup.id));
        }
        Ok(Self {
            errands,
            default_priority: None,
        })
    }

    /// Priority given to drafts that leave it out. Defaults to
    /// [`DEFAULT_PRIORITY`].
    pub fn with_default_priority(mut self, priority: i64) -> Self {
        self.default_priority = Some(priority);
        self
    }

    pub fn default_priority(&self) -> i64 {
        self.default_priority.unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn errands(&self) -> &[Errand] {
        &self.errands
    }

    pub fn into_errands(self) -> Vec<Errand> {
        self.errands
    }

    pub fn get(&self, id: ErrandId) -> Result<&Errand> {
        self.errands
            .iter()
            .find(|e| e.id == id)
            .ok_or(ErrandError::NotFound(id))
    }

    /// Conflicts of an errand already on the board.
    pub fn conflicts(&self, id: ErrandId) -> Result<ConflictReport> {
        let target = self.get(id)?;
        Ok(ConflictReport::new(
            target,
            &find_overlaps(target, &self.errands),
        ))
    }

    /// Conflicts a prospective errand would have, without adding it.
    ///
    /// The returned errand carries the id it would be stored under.
    pub fn check(&self, owner: &User, draft: &ErrandDraft) -> Result<Mutation> {
        let details = draft.validate(self.default_priority())?;
        let errand = Errand::new(self.next_id()?, owner, details);
        let report = ConflictReport::new(&errand, &find_overlaps(&errand, &self.errands));
        Ok(Mutation { errand, report })
    }

    /// Add a new errand owned by `owner`.
    ///
    /// Overlaps are computed against the board before the insert and
    /// returned alongside the stored errand.
    pub fn add(&mut self, owner: &User, draft: &ErrandDraft) -> Result<Mutation> {
        let details = draft.validate(self.default_priority())?;
        let errand = Errand::new(self.next_id()?, owner, details);
        let report = ConflictReport::new(&errand, &find_overlaps(&errand, &self.errands));

        if !report.is_empty() {
            warn!(
                errand = errand.id,
                conflicts = report.conflicts.len(),
                "new errand overlaps existing errands"
            );
        }
        info!(errand = errand.id, owner = owner.id, "errand added");

        self.errands.push(errand.clone());
        Ok(Mutation { errand, report })
    }

    /// Replace the editable fields of errand `id`.
    ///
    /// # Errors
    ///
    /// [`ErrandError::NotFound`], [`ErrandError::NotOwner`] if `actor` does
    /// not own the errand, or a validation error from the draft.
    pub fn edit(&mut self, id: ErrandId, actor: UserId, draft: &ErrandDraft) -> Result<Mutation> {
        let index = self.owned_index(id, actor)?;
        let details = draft.validate(self.default_priority())?;
        self.errands[index].apply(details);

        let errand = &self.errands[index];
        let report = ConflictReport::new(errand, &find_overlaps(errand, &self.errands));
        if !report.is_empty() {
            warn!(
                errand = id,
                conflicts = report.conflicts.len(),
                "edited errand overlaps existing errands"
            );
        }
        info!(errand = id, owner = actor, "errand updated");

        Ok(Mutation {
            errand: errand.clone(),
            report,
        })
    }

    /// Remove errand `id`. Only its owner may do so.
    pub fn delete(&mut self, id: ErrandId, actor: UserId) -> Result<Errand> {
        let index = self.owned_index(id, actor)?;
        let removed = self.errands.remove(index);
        info!(errand = id, owner = actor, "errand deleted");
        Ok(removed)
    }

    /// Add `user` to the participants of errand `id`.
    pub fn join(&mut self, id: ErrandId, user: UserId) -> Result<JoinOutcome> {
        let errand = self
            .errands
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ErrandError::NotFound(id))?;

        if errand.participants.insert(user) {
            info!(errand = id, user, "joined errand");
            Ok(JoinOutcome::Joined)
        } else {
            Ok(JoinOutcome::AlreadyJoined)
        }
    }

    /// `user`'s own errands, each with its overlaps against the whole board.
    pub fn dashboard(&self, user: UserId) -> Vec<AnnotatedErrand<'_>> {
        annotate_overlaps(user, &self.errands)
    }

    fn next_id(&self) -> Result<ErrandId> {
        match self.errands.iter().map(|e| e.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(ErrandError::IdSpaceExhausted),
        }
    }

    fn owned_index(&self, id: ErrandId, actor: UserId) -> Result<usize> {
        let index = self
            .errands
            .iter()
            .position(|e| e.id == id)
            .ok_or(ErrandError::NotFound(id))?;
        if !self.errands[index].is_owned_by(actor) {
            warn!(errand = id, user = actor, "refused change by non-owner");
            return Err(ErrandError::NotOwner {
                errand: id,
                user: actor,
            });
        }
        Ok(index)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new(1, "alice")
    }

    fn bob() -> User {
        User::new(2, "bob")
    }

    fn draft(name: &str, start: &str, end: &str) -> ErrandDraft {
        ErrandDraft {
            name: name.to_string(),
            location: "Town".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            priority: None,
        }
    }

    fn seeded() -> Board {
        let mut board = Board::new();
        board.add(&alice(), &draft("Groceries", "09:00", "10:00")).unwrap();
        board.add(&bob(), &draft("Bank", "09:30", "10:30")).unwrap();
        board.add(&bob(), &draft("Gym", "18:00", "19:00")).unwrap();
        board
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let board = seeded();
        let ids: Vec<u64> = board.errands().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(board.get(2).unwrap().owner_name, "bob");
    }

    #[test]
    fn test_add_reports_conflicts_but_still_commits() {
        let mut board = seeded();
        let m = board.add(&alice(), &draft("Post office", "10:00", "11:00")).unwrap();
        assert_eq!(m.errand.id, 4);
        assert_eq!(m.report.conflicts.len(), 1);
        assert_eq!(m.report.conflicts[0].name, "Bank");
        assert!(board.get(4).is_ok());
    }

    #[test]
    fn test_add_uses_board_default_priority() {
        let mut board = Board::new().with_default_priority(5);
        let m = board.add(&alice(), &draft("Laundry", "08:00", "08:30")).unwrap();
        assert_eq!(m.errand.priority, 5);
    }

    #[test]
    fn test_add_invalid_draft_leaves_board_untouched() {
        let mut board = seeded();
        let err = board.add(&alice(), &draft("Nap", "noon", "13:00")).unwrap_err();
        assert_eq!(err, ErrandError::InvalidTimeFormat("noon".to_string()));
        assert_eq!(board.errands().len(), 3);
    }

    #[test]
    fn test_check_does_not_write() {
        let board = seeded();
        let m = board.check(&alice(), &draft("Coffee", "09:45", "10:15")).unwrap();
        assert_eq!(m.errand.id, 4);
        assert_eq!(m.report.conflicts.len(), 2);
        assert_eq!(board.errands().len(), 3);
    }

    #[test]
    fn test_conflicts_of_existing_errand_skip_itself() {
        let board = seeded();
        let report = board.conflicts(1).unwrap();
        assert_eq!(report.errand_name, "Groceries");
        let ids: Vec<u64> = report.conflicts.iter().map(|c| c.errand_id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(board.conflicts(42).unwrap_err(), ErrandError::NotFound(42));
    }

    #[test]
    fn test_edit_by_owner_recomputes_interval() {
        let mut board = seeded();
        let m = board.edit(1, 1, &draft("Groceries", "18:30", "19:30")).unwrap();
        assert_eq!(m.errand.interval.to_string(), "18:30-19:30");
        assert_eq!(m.report.conflicts.len(), 1);
        assert_eq!(m.report.conflicts[0].name, "Gym");
    }

    #[test]
    fn test_edit_by_other_user_is_refused() {
        let mut board = seeded();
        let err = board.edit(1, 2, &draft("Hijack", "01:00", "02:00")).unwrap_err();
        assert_eq!(err, ErrandError::NotOwner { errand: 1, user: 2 });
        assert_eq!(board.get(1).unwrap().name, "Groceries");
    }

    #[test]
    fn test_delete_rules() {
        let mut board = seeded();
        assert_eq!(
            board.delete(2, 1).unwrap_err(),
            ErrandError::NotOwner { errand: 2, user: 1 }
        );
        assert_eq!(board.delete(9, 1).unwrap_err(), ErrandError::NotFound(9));

        let removed = board.delete(2, 2).unwrap();
        assert_eq!(removed.name, "Bank");
        assert!(board.get(2).is_err());
    }

    #[test]
    fn test_ids_not_reused_below_max() {
        let mut board = seeded();
        board.delete(2, 2).unwrap();
        let m = board.add(&alice(), &draft("Walk", "07:00", "07:30")).unwrap();
        assert_eq!(m.errand.id, 4);
    }

    #[test]
    fn test_join_twice() {
        let mut board = seeded();
        assert_eq!(board.join(2, 1).unwrap(), JoinOutcome::Joined);
        assert_eq!(board.join(2, 1).unwrap(), JoinOutcome::AlreadyJoined);
        assert!(board.get(2).unwrap().has_participant(1));
        assert_eq!(board.join(99, 1).unwrap_err(), ErrandError::NotFound(99));
    }

    #[test]
    fn test_join_does_not_change_overlaps() {
        let mut board = seeded();
        let before = board.conflicts(1).unwrap();
        board.join(2, 1).unwrap();
        assert_eq!(board.conflicts(1).unwrap(), before);
    }

    fn stored(id: u64, owner: &User, start: &str, end: &str) -> Errand {
        let details = draft("Stored", start, end).validate(DEFAULT_PRIORITY).unwrap();
        Errand::new(id, owner, details)
    }

    #[test]
    fn test_from_errands_rejects_duplicate_ids() {
        let errands = vec![
            stored(1, &alice(), "09:00", "10:00"),
            stored(1, &bob(), "09:30", "10:30"),
        ];
        assert_eq!(
            Board::from_errands(errands).unwrap_err(),
            ErrandError::DuplicateId(1)
        );
    }

    #[test]
    fn test_from_errands_keeps_unique_snapshot() {
        let errands = vec![
            stored(1, &alice(), "09:00", "10:00"),
            stored(7, &bob(), "09:30", "10:30"),
        ];
        let board = Board::from_errands(errands).unwrap();
        assert_eq!(board.conflicts(1).unwrap().conflicts[0].errand_id, 7);
    }

    #[test]
    fn test_add_after_max_id_is_an_error() {
        let full = vec![stored(u64::MAX, &bob(), "09:00", "10:00")];
        let mut board = Board::from_errands(full).unwrap();
        let draft = draft("Walk", "07:00", "07:30");
        assert_eq!(
            board.add(&alice(), &draft).unwrap_err(),
            ErrandError::IdSpaceExhausted
        );
        assert_eq!(
            board.check(&alice(), &draft).unwrap_err(),
            ErrandError::IdSpaceExhausted
        );
        assert_eq!(board.errands().len(), 1);
    }

    #[test]
    fn test_max_id_errand_still_queryable() {
        let mut board = Board::from_errands(vec![
            stored(0, &alice(), "09:00", "10:00"),
            stored(u64::MAX, &bob(), "09:30", "10:30"),
        ])
        .unwrap();
        assert_eq!(board.conflicts(u64::MAX).unwrap().conflicts[0].errand_id, 0);
        assert_eq!(board.join(u64::MAX, 1).unwrap(), JoinOutcome::Joined);
    }

    #[test]
    fn test_dashboard_annotates_own_errands() {
        let board = seeded();
        let dash = board.dashboard(2);
        let summary: Vec<(&str, usize)> = dash
            .iter()
            .map(|a| (a.errand.name.as_str(), a.overlaps.len()))
            .collect();
        assert_eq!(summary, vec![("Bank", 1), ("Gym", 0)]);
    }
}
