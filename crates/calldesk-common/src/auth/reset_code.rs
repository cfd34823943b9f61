//! One-time password reset codes
//!
//! Numeric 6-digit codes with a short expiry, stored on the principal row.
//! Delivery is an out-of-band collaborator concern; the code is never placed
//! in an HTTP response.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How long a reset code stays valid
pub const RESET_CODE_TTL_MINUTES: i64 = 15;

/// Generate a 6-digit numeric reset code
#[must_use]
pub fn generate_reset_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

/// Expiry timestamp for a code generated at `now`
#[must_use]
pub fn reset_code_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(RESET_CODE_TTL_MINUTES)
}
