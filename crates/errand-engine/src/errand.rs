//! The errand entity and its input-validation boundary.
//!
//! Raw input reaches the engine in two shapes:
//!
//! - [`ErrandDraft`]: form fields for a new or edited errand, before it has
//!   an id or an owner.
//! - [`ErrandRecord`]: a stored row as handed over by the persistence layer.
//!
//! Both are validated into typed values ([`ErrandDetails`], [`Errand`]) so
//! that nothing downstream ever sees a malformed time or a blank name.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ErrandError, Result};
use crate::interval::Interval;

pub type ErrandId = u64;
pub type UserId = u64;

/// Priority assigned when the submitter leaves it out.
pub const DEFAULT_PRIORITY: i64 = 3;

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

/// A board member, as far as errands are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ── Drafts ──────────────────────────────────────────────────────────────────

/// Unvalidated errand fields, as submitted by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrandDraft {
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// The validated, owner-independent part of an errand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrandDetails {
    pub name: String,
    pub location: String,
    pub interval: Interval,
    pub priority: i64,
}

impl ErrandDraft {
    /// Validate the draft, filling in `default_priority` when none was given.
    ///
    /// # Errors
    ///
    /// - [`ErrandError::MissingField`] if `name`, `location`, `start_time`
    ///   or `end_time` is blank.
    /// - [`ErrandError::InvalidTimeFormat`] if a time is not `HH:MM`.
    pub fn validate(&self, default_priority: i64) -> Result<ErrandDetails> {
        let name = required("name", &self.name)?;
        let location = required("location", &self.location)?;
        // Times are parsed untrimmed; only blankness is checked here.
        required("start_time", &self.start_time)?;
        required("end_time", &self.end_time)?;

        Ok(ErrandDetails {
            name: name.to_string(),
            location: location.to_string(),
            interval: Interval::parse(&self.start_time, &self.end_time)?,
            priority: self.priority.unwrap_or(default_priority),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ErrandError::MissingField(field));
    }
    Ok(trimmed)
}

// ── Errand ──────────────────────────────────────────────────────────────────

/// A user-owned, time-boxed errand.
///
/// Serializes as a flat [`ErrandRecord`], with times as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ErrandRecord", into = "ErrandRecord")]
pub struct Errand {
    pub id: ErrandId,
    pub owner_id: UserId,
    /// Display name of the owner, used in conflict reports.
    pub owner_name: String,
    pub name: String,
    pub location: String,
    pub interval: Interval,
    /// Opaque to overlap detection.
    pub priority: i64,
    /// Users who joined this errand, besides the owner.
    pub participants: BTreeSet<UserId>,
}

impl Errand {
    pub fn new(id: ErrandId, owner: &User, details: ErrandDetails) -> Self {
        Self {
            id,
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            name: details.name,
            location: details.location,
            interval: details.interval,
            priority: details.priority,
            participants: BTreeSet::new(),
        }
    }

    /// Overwrite every editable field. Id, owner and participants are kept.
    pub fn apply(&mut self, details: ErrandDetails) {
        self.name = details.name;
        self.location = details.location;
        self.interval = details.interval;
        self.priority = details.priority;
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    pub fn has_participant(&self, user: UserId) -> bool {
        self.participants.contains(&user)
    }
}

// ── Records ─────────────────────────────────────────────────────────────────

/// An errand as stored: plain strings for the times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrandRecord {
    pub id: ErrandId,
    pub owner_id: UserId,
    pub owner_name: String,
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub participants: BTreeSet<UserId>,
}

impl TryFrom<ErrandRecord> for Errand {
    type Error = ErrandError;

    fn try_from(record: ErrandRecord) -> Result<Self> {
        let draft = ErrandDraft {
            name: record.name,
            location: record.location,
            start_time: record.start_time,
            end_time: record.end_time,
            priority: Some(record.priority),
        };
        let details = draft.validate(DEFAULT_PRIORITY)?;
        let owner = User::new(record.owner_id, record.owner_name);

        let mut errand = Errand::new(record.id, &owner, details);
        errand.participants = record.participants;
        Ok(errand)
    }
}

impl From<Errand> for ErrandRecord {
    fn from(e: Errand) -> Self {
        Self {
            id: e.id,
            owner_id: e.owner_id,
            owner_name: e.owner_name,
            name: e.name,
            location: e.location,
            start_time: e.interval.start.to_string(),
            end_time: e.interval.end.to_string(),
            priority: e.priority,
            participants: e.participants,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
