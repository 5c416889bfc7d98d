//! Photolysis-rate fixture parameters
//!
//! Controls the time axis and the ramp applied during the active window. The
//! defaults reproduce the canonical `parking_lot_photo_rates.nc` input exactly,
//! so a TOML file only needs the fields that should differ.

use crate::errors::{FixtureError, FixtureResult};
use crate::fixture::{ActiveWindow, CalendarInstant, PhotoRates, OUTPUT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters for the photolysis-rate fixture.
///
/// All calendar instants are local time; `utc_offset_hours` converts them
/// before they are placed on the time axis.
///
/// # Example
///
/// ```
/// use mbtest_core::parameters::PhotoRateParameters;
///
/// let parameters = PhotoRateParameters::from_toml_str("total_hours = 48").unwrap();
/// assert_eq!(parameters.total_hours, 48);
/// assert_eq!(parameters.utc_offset_hours, -8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoRateParameters {
    /// Output file
    /// default: parking_lot_photo_rates.nc
    pub output: PathBuf,

    /// Offset of local time from UTC
    /// unit: hours
    /// default: -8.0
    pub utc_offset_hours: f64,

    /// Local time of the first sample
    /// default: 2005-01-01 00:00
    ///
    /// 2005 is not a leap year, so the canonical window date of June 11th
    /// falls on the same day of year as June 10th of 2020.
    pub dataset_start: CalendarInstant,

    /// Local time at which the ramp starts
    /// default: 2005-06-11 13:00
    pub window_start: CalendarInstant,

    /// Local time after which the ramp stops
    /// default: 2005-06-11 15:30
    pub window_stop: CalendarInstant,

    /// Last hour index; `total_hours + 1` samples are written
    /// unit: hours
    /// default: 8784 (366 days)
    pub total_hours: u32,

    /// Rates of the first sample inside the window
    /// unit: s-1
    /// default: O3_1 = 1e-4, O3_2 = 2e-4, O2_1 = 3e-4
    pub seeds: PhotoRates,

    /// Per-sample growth of the rates inside the window
    /// unit: s-1
    /// default: O3_1 = 1e-5, O3_2 = 2e-5, O2_1 = 3e-5
    pub increments: PhotoRates,

    /// Slack applied to both window bounds
    /// unit: hours
    /// default: 1e-10
    pub window_epsilon: f64,
}

impl Default for PhotoRateParameters {
    fn default() -> Self {
        Self {
            output: PathBuf::from(OUTPUT_FILE_NAME),
            utc_offset_hours: -8.0,
            dataset_start: CalendarInstant::date(2005, 1, 1),
            window_start: CalendarInstant::date(2005, 6, 11).with_time(13.0, 0.0),
            window_stop: CalendarInstant::date(2005, 6, 11).with_time(15.0, 30.0),
            total_hours: 366 * 24,
            seeds: PhotoRates::new(1.0e-4, 2.0e-4, 3.0e-4),
            increments: PhotoRates::new(1.0e-5, 2.0e-5, 3.0e-5),
            window_epsilon: 1.0e-10,
        }
    }
}

impl PhotoRateParameters {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load parameters from a TOML file. Missing fields take their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| FixtureError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&contents).map_err(|source| FixtureError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_utc_hours(&self, instant: CalendarInstant) -> f64 {
        instant
            .offset_hours(self.utc_offset_hours)
            .hours_since_epoch()
    }

    /// Time of the first sample, in hours since the epoch.
    pub fn dataset_start_hours(&self) -> f64 {
        self.to_utc_hours(self.dataset_start)
    }

    /// The ramp window, in hours since the epoch.
    pub fn active_window(&self) -> ActiveWindow {
        ActiveWindow {
            start: self.to_utc_hours(self.window_start),
            stop: self.to_utc_hours(self.window_stop),
            epsilon: self.window_epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_two_and_a_half_hours() {
        let parameters = PhotoRateParameters::default();
        let window = parameters.active_window();
        assert_eq!(window.stop - window.start, 2.5);
        assert_eq!(
            window.start - parameters.dataset_start_hours(),
            (161 * 24 + 13) as f64
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml = r#"
            total_hours = 100
            output = "short.nc"

            [increments]
            O3_1 = 0.5
            O3_2 = 0.0
            O2_1 = 0.0

            [window_start]
            year = 2005
            month = 1
            day = 2
            hours = 1.0
        "#;
        let parameters = PhotoRateParameters::from_toml_str(toml).unwrap();
        let defaults = PhotoRateParameters::default();

        assert_eq!(parameters.total_hours, 100);
        assert_eq!(parameters.output, PathBuf::from("short.nc"));
        assert_eq!(parameters.increments, PhotoRates::new(0.5, 0.0, 0.0));
        assert_eq!(
            parameters.window_start,
            CalendarInstant::date(2005, 1, 2).with_time(1.0, 0.0)
        );
        assert_eq!(parameters.seeds, defaults.seeds);
        assert_eq!(parameters.window_stop, defaults.window_stop);
        assert_eq!(parameters.utc_offset_hours, defaults.utc_offset_hours);
    }

    #[test]
    fn serialization_round_trip() {
        let params = PhotoRateParameters::default();
        let json = serde_json::to_string(&params).expect("Serialization failed");
        let restored: PhotoRateParameters =
            serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(params, restored);
    }

    #[test]
    fn unknown_file_is_reported() {
        let err = PhotoRateParameters::from_toml_file("/no/such/params.toml").unwrap_err();
        assert!(matches!(err, FixtureError::ConfigRead { .. }));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        std::fs::write(&path, "total_hours = \"many\"").unwrap();
        let err = PhotoRateParameters::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, FixtureError::ConfigParse { .. }));
    }
}
