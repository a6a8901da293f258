//! # errand-engine
//!
//! Scheduling conflict detection for a shared errand board.
//!
//! Users post time-boxed errands (a name, a location, an `HH:MM-HH:MM`
//! interval and a priority). The engine parses and validates those inputs,
//! finds which other errands a given errand overlaps, and renders a
//! conflict report. It holds no database handle: every query takes the
//! current errand set as an argument.
//!
//! ## Modules
//!
//! - [`clock`] — `HH:MM` parsing into a comparable [`ClockTime`]
//! - [`interval`] — start/end pairs and the half-open overlap rule
//! - [`errand`] — the errand entity and its validation boundary
//! - [`overlap`] — overlap search over a candidate set
//! - [`report`] — text and structured conflict reports
//! - [`board`] — in-memory board with ownership and join rules
//! - [`error`] — Error types

pub mod board;
pub mod clock;
pub mod errand;
pub mod error;
pub mod interval;
pub mod overlap;
pub mod report;

pub use board::{Board, JoinOutcome, Mutation};
pub use clock::{parse, ClockTime};
pub use errand::{
    Errand, ErrandDetails, ErrandDraft, ErrandId, ErrandRecord, User, UserId, DEFAULT_PRIORITY,
};
pub use error::ErrandError;
pub use interval::Interval;
pub use overlap::{annotate_overlaps, find_overlaps, overlaps, AnnotatedErrand};
pub use report::{format_conflict_report, ConflictEntry, ConflictReport};
