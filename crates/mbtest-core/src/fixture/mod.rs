//! Synthetic photolysis-rate input fixture.
//!
//! The "parking lot" use case drives MusicBox with externally supplied
//! photolysis rates read from a NetCDF file. This module generates that file:
//! one year of hourly samples on an unlimited `time` axis, with three rate
//! channels that ramp linearly during a short afternoon window and sit at a
//! baseline everywhere else.
//!
//! The layout of the file (variable names, dimension, `units` attributes) is
//! read by MusicBox and must not change.

mod calendar;
mod netcdf_io;
mod series;

pub use calendar::{days_before_month, days_before_year, is_leap_year, CalendarInstant};
pub use netcdf_io::{
    read_photo_rates, verify_photo_rates, write_photo_rates, PhotoRateTable, Variable,
    WriteSummary,
};
pub use series::{ActiveWindow, PhotoRateSample, PhotoRateSeries, PhotoRates};

/// File written by the generator when no output path is given.
pub const OUTPUT_FILE_NAME: &str = "parking_lot_photo_rates.nc";

/// Name of the unlimited record dimension.
pub const TIME_DIMENSION: &str = "time";
/// Name of the time coordinate variable.
pub const TIME_VARIABLE: &str = "time";
/// Units of the time coordinate: hours since 0001-01-01T00:00.
pub const TIME_UNITS: &str = "hours";

/// Photolysis-rate channels, in file order.
pub const CHANNEL_NAMES: [&str; 3] = ["O3_1", "O3_2", "O2_1"];
/// Units shared by every photolysis-rate channel.
pub const CHANNEL_UNITS: &str = "s-1";

/// Attribute carrying the physical unit of each variable.
pub const UNITS_ATTRIBUTE: &str = "units";
