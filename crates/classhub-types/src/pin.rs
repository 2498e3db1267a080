//! result-access pins and their usage policy.
//!
//! a pin grants a guardian or student a limited number of lookups of
//! published results without full authentication. exhaustion and expiry are
//! evaluated at read time against the stored counters - a pin is never
//! flipped inactive by the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exam::ExamId;
use crate::pin_code::PinCode;

/// why a pin check was denied, in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDenial {
    /// no active pin matched the (code, student) pair.
    Invalid,
    /// the validity window has passed.
    Expired,
    /// every allowed use has been consumed.
    LimitExceeded,
}

impl PinDenial {
    /// the message shown to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            PinDenial::Invalid => "Invalid PIN or Student ID",
            PinDenial::Expired => "PIN has expired",
            PinDenial::LimitExceeded => "PIN usage limit exceeded",
        }
    }
}

/// a result-access pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPin {
    /// unique identifier.
    pub id: u64,

    /// the code itself - globally unique.
    pub pin_code: PinCode,

    /// the student whose results this pin unlocks.
    pub student_code: String,

    /// optional exam scope; `None` unlocks all published results.
    pub exam_id: Option<ExamId>,

    /// how many successful checks this pin allows.
    pub max_usage_count: i32,

    /// how many checks have been consumed. monotonic non-decreasing.
    pub current_usage_count: i32,

    /// administrative kill switch.
    pub active: bool,

    /// start of the validity window.
    pub valid_from: DateTime<Utc>,

    /// end of the validity window.
    pub valid_until: DateTime<Utc>,

    /// stamped on the first successful check, then never changes.
    pub first_used_at: Option<DateTime<Utc>>,

    /// stamped on every successful check.
    pub last_used_at: Option<DateTime<Utc>>,

    /// when the pin was generated.
    pub created_at: DateTime<Utc>,
}

impl ResultPin {
    /// default number of allowed checks.
    pub const DEFAULT_MAX_USAGE: i32 = 5;

    /// default validity window in days.
    pub const DEFAULT_VALID_DAYS: i64 = 30;

    /// create a new pin for a student with the default policy.
    pub fn new(id: u64, pin_code: PinCode, student_code: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            pin_code,
            student_code,
            exam_id: None,
            max_usage_count: Self::DEFAULT_MAX_USAGE,
            current_usage_count: 0,
            active: true,
            valid_from: now,
            valid_until: now + chrono::Duration::days(Self::DEFAULT_VALID_DAYS),
            first_used_at: None,
            last_used_at: None,
            created_at: now,
        }
    }

    /// whether the validity window has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.valid_until
    }

    /// whether every allowed use has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.current_usage_count >= self.max_usage_count
    }

    /// checks left before exhaustion.
    pub fn remaining_checks(&self) -> i32 {
        (self.max_usage_count - self.current_usage_count).max(0)
    }

    /// evaluate the denial policy, in priority order: inactive, then
    /// expired, then exhausted. an expired pin reports "expired" even with
    /// uses remaining; an exhausted pin inside its window reports
    /// "limit exceeded".
    pub fn deny_reason(&self) -> Option<PinDenial> {
        if !self.active {
            return Some(PinDenial::Invalid);
        }
        if self.is_expired() {
            return Some(PinDenial::Expired);
        }
        if self.is_exhausted() {
            return Some(PinDenial::LimitExceeded);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pin() -> ResultPin {
        ResultPin::new(1, "PIN-2026-0001".parse().unwrap(), "STU001".to_string())
    }

    #[test]
    fn test_fresh_pin_allowed() {
        let pin = test_pin();
        assert_eq!(pin.deny_reason(), None);
        assert_eq!(pin.remaining_checks(), ResultPin::DEFAULT_MAX_USAGE);
    }

    #[test]
    fn test_inactive_pin_is_invalid() {
        let mut pin = test_pin();
        pin.active = false;
        assert_eq!(pin.deny_reason(), Some(PinDenial::Invalid));
    }

    #[test]
    fn test_expired_pin_denied_even_with_uses_left() {
        let mut pin = test_pin();
        pin.valid_until = Utc::now() - chrono::Duration::hours(1);
        assert_eq!(pin.current_usage_count, 0);
        assert_eq!(pin.deny_reason(), Some(PinDenial::Expired));
    }

    #[test]
    fn test_exhausted_pin_denied_inside_window() {
        let mut pin = test_pin();
        pin.current_usage_count = pin.max_usage_count;
        assert!(!pin.is_expired());
        assert_eq!(pin.deny_reason(), Some(PinDenial::LimitExceeded));
        assert_eq!(pin.remaining_checks(), 0);
    }

    #[test]
    fn test_remaining_checks_never_negative() {
        let mut pin = test_pin();
        pin.current_usage_count = pin.max_usage_count + 3;
        assert_eq!(pin.remaining_checks(), 0);
    }
}
