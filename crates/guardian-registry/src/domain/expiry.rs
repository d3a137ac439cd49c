//! Time guard: dead-man-switch expiry computation.
//!
//! Pure functions over the ledger clock. The boundary is inclusive: a
//! listing is expired exactly when `now - last_activity >= window`.

use shared_types::Timestamp;

/// Returns true iff the inactivity window has fully elapsed.
///
/// Saturating: a clock reading earlier than `last_activity` never
/// underflows and simply reads as zero elapsed time.
pub fn is_expired(last_activity: Timestamp, now: Timestamp, window_secs: u64) -> bool {
    now.saturating_sub(last_activity) >= window_secs
}

/// Seconds left until expiry; zero once expired.
pub fn remaining(last_activity: Timestamp, now: Timestamp, window_secs: u64) -> u64 {
    window_secs.saturating_sub(now.saturating_sub(last_activity))
}
