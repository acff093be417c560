//! "Single active record" rule for kinds such as CVs and public profiles.
//!
//! The server is the only party allowed to demote a previously active
//! record. The client never flips flags on its own; it re-reads the list
//! after any mutation that could have changed the active set and then
//! checks what came back.

use crate::models::Resource;

/// Whether a successful create/update must be followed by a re-sync.
///
/// True when the saved record is active, or when an existing record's flag
/// changed in either direction.
pub fn requires_resync<R: Resource>(previous: Option<&R>, saved: &R) -> bool {
    if !R::KIND.single_active() {
        return false;
    }
    let now_active = saved.is_active() == Some(true);
    let was_active = previous.and_then(Resource::is_active);
    now_active || matches!(was_active, Some(prev) if Some(prev) != saved.is_active())
}

pub fn active_records<R: Resource>(records: &[R]) -> Vec<&R> {
    records.iter().filter(|r| r.is_active() == Some(true)).collect()
}

/// At most one record is flagged active.
pub fn is_satisfied<R: Resource>(records: &[R]) -> bool {
    active_records(records).len() <= 1
}

/// Log a conflict when the server's list holds several active records.
/// Nothing is corrected locally; returns the offending ids.
pub fn report_conflict<R: Resource>(records: &[R]) -> Vec<String> {
    let active: Vec<String> = active_records(records).iter().map(|r| r.id().to_string()).collect();
    if active.len() > 1 {
        log::warn!(
            "{} active {} reported by the server ({}); leaving as-is",
            active.len(),
            R::KIND.plural(),
            active.join(", ")
        );
        return active;
    }
    Vec::new()
}
