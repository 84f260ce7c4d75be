//! Sales analytics pipeline: load a CSV of sales records once, then
//! filter, aggregate, and rank on demand.
//!
//! The pipeline is a one-way flow of pure functions
//! (loader → filter → aggregate → rank); [`state::DashboardState`] is the
//! caller-held session that re-invokes them per interaction, the way a
//! dashboard front-end would.

pub mod data;
pub mod state;
