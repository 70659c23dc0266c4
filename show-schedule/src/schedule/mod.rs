//! Schedule building.
//!
//! Turns the raw roster, class list and rider pages of a show into the
//! rows of the published schedule: riders are matched by name, class
//! labels are resolved against the user's overrides, and days, times and
//! ring names are normalized for display.

mod assemble;
mod classes;
mod matcher;
mod normalize;


pub use assemble::{DEFAULT_PACING, ScheduleAssembler, ScheduleError, ScheduleRow, rider_rows};
pub use classes::{ClassLookup, ClassMapping, build_class_lookup, format_class_string};
pub use matcher::{MatchedRider, find_riders_by_names};
pub use normalize::{
    DateTimeError, UNPARSED_PLACEHOLDER, extract_class_number, extract_rider_name, format_time,
    french_day, normalize_ring_name, parse_local_date_time,
};
