//! Utility modules for the VibeFlow application.
//!
//! - [`datetime`] - ISO-8601 timestamps and the day-prefix matching used for
//!   completion bookkeeping

pub mod datetime;
