//! Hourly photolysis-rate sample synthesis.

use crate::errors::{FixtureError, FixtureResult};
use crate::parameters::PhotoRateParameters;
use serde::{Deserialize, Serialize};

/// One value per photolysis-rate channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoRates {
    #[serde(rename = "O3_1")]
    pub o3_1: f64,
    #[serde(rename = "O3_2")]
    pub o3_2: f64,
    #[serde(rename = "O2_1")]
    pub o2_1: f64,
}

impl PhotoRates {
    pub const fn new(o3_1: f64, o3_2: f64, o2_1: f64) -> Self {
        Self { o3_1, o3_2, o2_1 }
    }

    /// Values in the order of [`CHANNEL_NAMES`](super::CHANNEL_NAMES).
    pub fn values(&self) -> [f64; 3] {
        [self.o3_1, self.o3_2, self.o2_1]
    }

    fn advance(&mut self, increments: &PhotoRates) {
        self.o3_1 += increments.o3_1;
        self.o3_2 += increments.o3_2;
        self.o2_1 += increments.o2_1;
    }
}

/// Closed time interval, in hours since the epoch, during which rates ramp.
///
/// Both bounds are widened by `epsilon` to absorb rounding in the calendar
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWindow {
    pub start: f64,
    pub stop: f64,
    pub epsilon: f64,
}

impl ActiveWindow {
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start - self.epsilon && time <= self.stop + self.epsilon
    }
}

/// A single record of the fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoRateSample {
    /// Hour index from the start of the dataset, also the record index
    pub index: usize,
    /// Hours since the epoch
    pub time: f64,
    pub rates: PhotoRates,
}

/// Lazily generates the hourly samples described by a [`PhotoRateParameters`].
///
/// Samples are produced for hour indices `0..=total_hours`. Inside the active
/// window the rates start at the seeds and grow by the increments after every
/// emitted sample. Outside it `O3_2` and `O2_1` are zero and `O3_1` carries the
/// hour index.
// The hour index in O3_1 looks like a leftover from debugging but MusicBox
// tests were written against it, so it stays.
#[derive(Debug, Clone)]
pub struct PhotoRateSeries {
    dataset_start: f64,
    window: ActiveWindow,
    rates: PhotoRates,
    increments: PhotoRates,
    next: usize,
    len: usize,
}

impl PhotoRateSeries {
    pub fn new(parameters: &PhotoRateParameters) -> FixtureResult<Self> {
        let window = parameters.active_window();
        if window.stop < window.start {
            return Err(FixtureError::InvalidWindow {
                start: window.start,
                stop: window.stop,
            });
        }
        Ok(Self {
            dataset_start: parameters.dataset_start_hours(),
            window,
            rates: parameters.seeds,
            increments: parameters.increments,
            next: 0,
            len: parameters.total_hours as usize + 1,
        })
    }

    pub fn window(&self) -> ActiveWindow {
        self.window
    }

    pub fn dataset_start(&self) -> f64 {
        self.dataset_start
    }
}

impl Iterator for PhotoRateSeries {
    type Item = PhotoRateSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let time = self.dataset_start + index as f64;
        let rates = if self.window.contains(time) {
            let current = self.rates;
            self.rates.advance(&self.increments);
            current
        } else {
            PhotoRates::new(index as f64, 0.0, 0.0)
        };
        Some(PhotoRateSample { index, time, rates })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PhotoRateSeries {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::CalendarInstant;
    use approx::assert_relative_eq;

    // 2005-06-11 13:00 local is 3877 hours after 2005-01-01 00:00 local
    const FIRST_ACTIVE_HOUR: usize = 161 * 24 + 13;

    fn samples() -> Vec<PhotoRateSample> {
        PhotoRateSeries::new(&PhotoRateParameters::default())
            .unwrap()
            .collect()
    }

    #[test]
    fn covers_a_leap_year_of_hours() {
        let series = PhotoRateSeries::new(&PhotoRateParameters::default()).unwrap();
        assert_eq!(series.len(), 8785);
        assert_eq!(samples().len(), 366 * 24 + 1);
    }

    #[test]
    fn time_axis_is_hourly_from_local_midnight() {
        let samples = samples();
        let start = CalendarInstant::date(2005, 1, 1)
            .offset_hours(-8.0)
            .hours_since_epoch();
        let series = PhotoRateSeries::new(&PhotoRateParameters::default()).unwrap();
        assert_eq!(series.dataset_start(), start);
        assert_eq!(samples[0].time, start);
        assert!(samples.windows(2).all(|w| w[1].time - w[0].time == 1.0));
        assert!(samples.iter().enumerate().all(|(i, s)| s.index == i));
    }

    #[test]
    fn ramps_inside_the_window() {
        let samples = samples();
        let active: Vec<_> = samples
            .iter()
            .filter(|s| s.rates.o3_2 != 0.0)
            .collect();
        // 13:00, 14:00 and 15:00; 16:00 is past the 15:30 stop
        assert_eq!(active.len(), 3);
        assert_eq!(active[0].index, FIRST_ACTIVE_HOUR);
        assert_eq!(active[2].index, FIRST_ACTIVE_HOUR + 2);

        let expected = [
            [1.0e-4, 2.0e-4, 3.0e-4],
            [1.1e-4, 2.2e-4, 3.3e-4],
            [1.2e-4, 2.4e-4, 3.6e-4],
        ];
        for (sample, expected) in active.iter().zip(expected) {
            for (value, expected) in sample.rates.values().into_iter().zip(expected) {
                assert_relative_eq!(value, expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn baseline_outside_the_window() {
        let samples = samples();
        for sample in samples
            .iter()
            .filter(|s| !(FIRST_ACTIVE_HOUR..FIRST_ACTIVE_HOUR + 3).contains(&s.index))
        {
            assert_eq!(sample.rates.o3_1, sample.index as f64);
            assert_eq!(sample.rates.o3_2, 0.0);
            assert_eq!(sample.rates.o2_1, 0.0);
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = ActiveWindow {
            start: 10.0,
            stop: 12.5,
            epsilon: 1e-10,
        };
        assert!(window.contains(10.0));
        assert!(window.contains(10.0 - 1e-11));
        assert!(window.contains(12.5));
        assert!(!window.contains(9.9));
        assert!(!window.contains(12.6));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let parameters = PhotoRateParameters {
            window_stop: CalendarInstant::date(2005, 6, 10),
            ..Default::default()
        };
        assert!(matches!(
            PhotoRateSeries::new(&parameters),
            Err(FixtureError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn shorter_series() {
        let parameters = PhotoRateParameters {
            total_hours: 24,
            ..Default::default()
        };
        let samples: Vec<_> = PhotoRateSeries::new(&parameters).unwrap().collect();
        assert_eq!(samples.len(), 25);
        assert_eq!(samples[24].rates.o3_1, 24.0);
    }
}
