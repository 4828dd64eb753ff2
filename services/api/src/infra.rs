use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDateTime;
use clinic_booking::appointments::{BookingService, DoctorDirectory};
use clinic_booking::gateway::InMemoryBackend;
use clinic_booking::locale::Locale;
use clinic_booking::scheduling::{EligibilityValidator, FixedClock, SchedulingRules};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Services wired over one shared in-memory backend.
#[derive(Clone)]
pub(crate) struct BookingStack {
    pub(crate) backend: Arc<InMemoryBackend>,
    pub(crate) validator: Arc<EligibilityValidator>,
    pub(crate) booking: Arc<BookingService<InMemoryBackend>>,
    pub(crate) directory: Arc<DoctorDirectory<InMemoryBackend>>,
}

impl BookingStack {
    pub(crate) fn new(validator: EligibilityValidator) -> Self {
        let backend = Arc::new(InMemoryBackend::with_sample_doctors());
        let validator = Arc::new(validator);
        let booking = Arc::new(BookingService::new(backend.clone(), validator.clone()));
        let directory = Arc::new(DoctorDirectory::new(backend.clone()));
        Self {
            backend,
            validator,
            booking,
            directory,
        }
    }

    /// Stack whose validator reads the system clock, or `now` when pinned.
    pub(crate) fn with_rules(rules: SchedulingRules, now: Option<NaiveDateTime>) -> Self {
        let validator = match now {
            Some(now) => EligibilityValidator::with_clock(rules, Arc::new(FixedClock(now))),
            None => EligibilityValidator::new(rules),
        };
        Self::new(validator)
    }
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::from_tag(raw).ok_or_else(|| format!("unsupported locale '{raw}' (expected en or es)"))
}
