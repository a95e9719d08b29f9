//! Remote Inference
//!
//! Client for the hosted malnutrition prediction endpoint plus the
//! resolution layer that merges a remote response with the local
//! heuristic fallback into a final [`crate::model::PredictionRecord`].
//!
//! The remote service is uncontrolled: every field of its response is
//! optional and may be absent, zero, or a fraction instead of a
//! percentage. The resolution layer normalizes whatever arrives and
//! falls back to the local heuristics whenever the remote value is
//! unusable. No retry is attempted for prediction calls.

mod client;
mod resolve;

pub use client::{InferenceClient, InferenceConfig, InferenceError, RemotePrediction};
pub use resolve::resolve_prediction;
