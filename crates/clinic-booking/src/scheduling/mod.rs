//! Appointment eligibility rules.
//!
//! [`validate`] is the single source of truth for whether a candidate slot may be booked. It is
//! pure: the verdict depends only on the slot, the supplied `now`, and the rules, so callers can
//! run it from any thread and tests can pin the clock. [`EligibilityValidator`] bundles the
//! rules with a [`Clock`] for call sites that want the ambient time.

mod clock;
mod messages;
mod policy;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use policy::{validate, EligibilityVerdict, ReasonCode};
pub use router::eligibility_router;
pub use rules::{RulesError, SchedulingRules};

use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// Stateless checker that applies one rule set against a clock.
#[derive(Clone)]
pub struct EligibilityValidator {
    rules: SchedulingRules,
    clock: Arc<dyn Clock>,
}

impl EligibilityValidator {
    pub fn new(rules: SchedulingRules) -> Self {
        Self::with_clock(rules, Arc::new(SystemClock))
    }

    pub fn with_clock(rules: SchedulingRules, clock: Arc<dyn Clock>) -> Self {
        Self { rules, clock }
    }

    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Check a slot against the clock's current time.
    pub fn check(&self, candidate: NaiveDateTime) -> EligibilityVerdict {
        self.check_at(candidate, self.clock.now())
    }

    pub fn check_at(&self, candidate: NaiveDateTime, now: NaiveDateTime) -> EligibilityVerdict {
        validate(candidate, now, &self.rules)
    }
}

impl Default for EligibilityValidator {
    fn default() -> Self {
        Self::new(SchedulingRules::default())
    }
}

impl fmt::Debug for EligibilityValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EligibilityValidator")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
