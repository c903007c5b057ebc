//! Reducers from a record sequence to chart series.
//!
//! Each reducer is a pure function of its inputs. A record missing the field
//! a reducer looks at contributes nothing to that reducer.

mod categorical;
mod flag;
mod gpa;
mod lookup;
mod range;
mod timeline;

pub use categorical::{categorical_count, cohort_count, tally_by};
pub use flag::{FlagMatch, FlagRule, flag_count};
pub use gpa::{GpaBand, gpa_band_count, gpa_band_size, gpa_values_in_band};
pub use lookup::per_entity_value;
pub use range::{SEMESTER_RANGE, fixed_range_count, semester_count};
pub use timeline::{date_bucket_count, date_bucket_tally, details_for_bucket};
