//! AnimeFit progression engine
//!
//! The rules core of an anime-themed fitness app: users pick a mentor
//! character, log daily workouts, earn XP toward exponential level
//! thresholds, and keep consecutive-day streaks alive.
//!
//! - `catalog` / `intensity`: static exercise and character data with
//!   difficulty-scaled intensity tiers
//! - `progression` / `streak`: the pure XP, level-up, and streak calculators
//! - `service`: the one entry point for state transitions, with idempotency
//!   guards around awards
//! - `store`: SQLite-backed persistence of profiles and daily logs
//! - `auth`: identity provider client supplying the user id and display name

pub mod auth;
pub mod catalog;
pub mod intensity;
pub mod models;
pub mod progression;
pub mod service;
pub mod store;
pub mod streak;

#[cfg(test)]
mod test_utils;

pub use catalog::{Catalog, CatalogError};
pub use models::{DailyLog, UserProfile};
pub use progression::Difficulty;
pub use service::{EngineError, ProgressionService, WorkoutOutcome, WorkoutSummary};
