//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analytics;
pub mod datasets;
pub mod export;
pub mod health;
pub mod predictions;
