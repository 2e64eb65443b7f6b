//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod comp_off;
mod member;
mod monthly_balance;

pub use assignment::{
    RosterEntryRecord, STATUS_ON_CALL, STATUS_REGULAR_SHIFT, STATUS_WEEK_OFF, ShiftAssignment,
    ShiftCode,
};
pub use comp_off::{
    CompOffBalance, CompOffStatistics, CompOffUsage, CompOffUsageCheck, DenialReason,
};
pub use member::{LeaveEntry, TeamMember};
pub use monthly_balance::MonthlyBalance;
