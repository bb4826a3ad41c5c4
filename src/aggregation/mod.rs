//! Attendance aggregation.
//!
//! Pure functions turn attendance records and roster data into weekly
//! totals and day overviews. [`AggregationEngine`] loads the inputs from
//! the store and calls them.

mod display_name;
mod engine;
mod overview;
mod weekly;

pub use display_name::display_name;
pub use engine::AggregationEngine;
pub use overview::attendance_overview;
pub use weekly::weekly_stats;
