//! Risk Scoring
//!
//! Heuristic fallback scoring used when the remote inference endpoint
//! returns no usable value. Three pure functions over a validated
//! [`PredictionInput`]: the additive risk score, the confidence
//! estimator, and the recommendation generator.
//!
//! The weights, bands, and thresholds are hand-tuned business logic,
//! not a fitted statistical model. Clients and reports depend on the
//! exact values; do not adjust them without a matching change upstream.

mod heuristic;
mod recommend;

pub use heuristic::{confidence_estimate, risk_score};
pub use recommend::recommendations;

/// Round a percentage to one decimal place for display and storage.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
