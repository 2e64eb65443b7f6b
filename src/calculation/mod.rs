//! Calculation logic for the roster engine.
//!
//! This module contains the calendar helpers, the weekly-rotation roster
//! generator, and the comp-off accounting built on top of generated
//! assignments: per-member balances, range statistics, the usage gate and
//! the month-by-month carry-forward ledger.

mod calendar;
mod carry_forward;
mod comp_off_balance;
mod comp_off_statistics;
mod comp_off_usage;
mod roster_generator;

pub use calendar::{
    dates_between, day_of_week, days_in_range, is_week_off, is_weekend, iso_week_number,
    month_bounds,
};
pub use carry_forward::CarryForwardLedger;
pub use comp_off_balance::{balance_for_all, balance_for_member};
pub use comp_off_statistics::statistics_for_range;
pub use comp_off_usage::can_use_comp_off;
pub use roster_generator::{
    ROTATION_POOL, generate_roster, generate_roster_from_raw, reference_date, rotating_shift,
};
