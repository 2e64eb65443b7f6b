//! Roster rule configuration.
//!
//! This module turns stored or submitted rule records, which may use either
//! snake_case or camelCase keys, into the one canonical [`RosterRules`] the
//! generator accepts. It also loads stored team rules from disk.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::{normalize_rules_for_today, ConfigLoader};
//!
//! let loader = ConfigLoader::load("./config/teams").unwrap();
//! let rules = normalize_rules_for_today(loader.rules_for("platform-ops").unwrap()).unwrap();
//! println!("Generating {} to {}", rules.start_date, rules.end_date);
//! ```

mod loader;
mod normalizer;
mod raw;
mod types;

pub use loader::ConfigLoader;
pub use normalizer::{
    DEFAULT_ADVANCE_NOTIFICATION_DAYS, MAX_ROSTER_DAYS, DEFAULT_CONSECUTIVE_SHIFT_LIMIT,
    DEFAULT_MAX_MEMBERS_PER_SHIFT, DEFAULT_MIN_MEMBERS_PER_SHIFT, DEFAULT_MIN_REST_HOURS,
    DEFAULT_NUMBER_OF_SHIFTS, normalize_rules, normalize_rules_for_today,
};
pub use raw::RawRosterRules;
pub use types::{
    CoverageLevel, DedicatedMemberRef, OnCallType, RosterRules, RotationCycle, ShiftTiming,
    WeekOff,
};
