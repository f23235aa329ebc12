//! Time helpers.
//!
//! Readings are timestamped with integer epoch seconds on the wire and in the
//! store, so the domain works in `i64` rather than a richer timestamp type.

use chrono::Utc;

/// Epoch seconds, as stored on every reading.
pub type Epoch = i64;

/// Return the current time as epoch seconds.
#[must_use]
pub fn now_epoch() -> Epoch {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_epoch_seconds() {
        let before = Utc::now().timestamp();
        let ts = now_epoch();
        let after = Utc::now().timestamp();
        assert!(ts >= before);
        assert!(ts <= after);
    }
}
