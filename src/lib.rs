//! Roster generation and comp-off accounting engine.
//!
//! This crate assigns team members to shifts, week-offs and on-call duty
//! across a date range, and derives the compensatory time-off ("comp-off")
//! each member earns from on-call days.
//!
//! The engine itself is synchronous and side-effect free. Rules, members and
//! leave records are supplied by the caller; generated assignments and
//! balances are returned as plain values for the caller to persist.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
