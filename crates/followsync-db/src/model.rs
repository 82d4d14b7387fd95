//! Source-side record types.

use chrono::NaiveDate;

/// One active user row. Immutable for the duration of a run.
///
/// `user_id` is the cross-store join key: the graph vertex for this
/// user carries the same id and it is never regenerated.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub nickname: Option<String>,
    pub birth: Option<NaiveDate>,
}

/// One active follow row: `from_user_id` follows `to_user_id`.
///
/// Pairs are consumed oldest-first. The first follow observed between
/// two users decides the direction recorded in the graph; a later
/// reverse follow only flips the mutual flag.
#[derive(Debug, Clone)]
pub struct FollowPair {
    pub from_user_id: String,
    pub to_user_id: String,
}
