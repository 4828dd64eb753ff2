use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::policy::EligibilityVerdict;
use super::EligibilityValidator;
use crate::locale::Locale;

#[derive(Clone)]
pub(crate) struct EligibilityState {
    validator: Arc<EligibilityValidator>,
    locale: Locale,
}

impl EligibilityState {
    pub(crate) fn new(validator: Arc<EligibilityValidator>, locale: Locale) -> Self {
        Self { validator, locale }
    }
}

/// Candidate slot posted by the booking screen. `now` pins the evaluation time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    #[serde(with = "crate::wire")]
    pub candidate: NaiveDateTime,
    #[serde(default, with = "crate::wire::option")]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityResponse {
    #[serde(flatten)]
    pub verdict: EligibilityVerdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Router exposing the validator over HTTP.
pub fn eligibility_router(validator: Arc<EligibilityValidator>, locale: Locale) -> Router {
    Router::new()
        .route(
            "/api/v1/appointments/eligibility",
            post(eligibility_handler),
        )
        .with_state(EligibilityState::new(validator, locale))
}

pub(crate) async fn eligibility_handler(
    State(state): State<EligibilityState>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityResponse> {
    let now = request.now.unwrap_or_else(|| state.validator.now());
    let verdict = state.validator.check_at(request.candidate, now);
    let message = verdict.message(state.locale, state.validator.rules());

    Json(EligibilityResponse { verdict, message })
}
