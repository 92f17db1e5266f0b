// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observation start times and the timestamps sampled across an observation.

mod error;

pub use error::*;

use hifitime::{Duration, Epoch};
use vec1::Vec1;

/// Parse a UTC start time. Accepted formats are "YYYY-MM-DD HH:MM[:SS[.S]]"
/// (a 'T' may separate the date and time) and "DD/MM/YYYY HH:MM[:SS[.S]]".
pub fn parse_start_time(s: &str) -> Result<Epoch, TimeParseError> {
    let format_err = || TimeParseError::Format(s.to_string());

    let trimmed = s.trim();
    let (date, time) = trimmed
        .split_once(|c: char| c == 'T' || c.is_whitespace())
        .ok_or_else(format_err)?;

    let date: Vec<&str> = if date.contains('-') {
        date.split('-').collect()
    } else {
        date.split('/').rev().collect()
    };
    let (year, month, day) = match date.as_slice() {
        [y, m, d] if y.len() == 4 => (
            y.parse::<i32>().map_err(|_| format_err())?,
            m.parse::<u8>().map_err(|_| format_err())?,
            d.parse::<u8>().map_err(|_| format_err())?,
        ),
        _ => return Err(format_err()),
    };

    let time: Vec<&str> = time.trim().split(':').collect();
    let (hour, minute, seconds) = match time.as_slice() {
        [h, m] => (h, m, 0.0),
        [h, m, s] => (h, m, s.parse::<f64>().map_err(|_| format_err())?),
        _ => return Err(format_err()),
    };
    let hour = hour.parse::<u8>().map_err(|_| format_err())?;
    let minute = minute.parse::<u8>().map_err(|_| format_err())?;
    if !(0.0..60.0).contains(&seconds) {
        return Err(TimeParseError::InvalidDate(s.to_string()));
    }
    let whole_seconds = seconds.trunc();
    let nanos = ((seconds - whole_seconds) * 1e9).round().min(999_999_999.0);

    Epoch::maybe_from_gregorian_utc(
        year,
        month,
        day,
        hour,
        minute,
        whole_seconds as u8,
        nanos as u32,
    )
    .map_err(|_| TimeParseError::InvalidDate(s.to_string()))
}

/// The timestamps at which source positions are evaluated over an
/// observation.
#[derive(Debug, Clone)]
pub struct ObservationWindow {
    start: Epoch,
    duration: Duration,
    interval: Duration,

    /// Strictly increasing, starting at `start`. The last timestamp is within
    /// half an interval of the end of the observation.
    timestamps: Vec1<Epoch>,
}

impl ObservationWindow {
    /// Sample an observation starting at `start` lasting `duration_h` hours
    /// every `interval_h` hours. The end of the observation is included when
    /// it lies on (or within half an interval of) a sample.
    pub fn new(
        start: Epoch,
        duration_h: f64,
        interval_h: f64,
    ) -> Result<ObservationWindow, ObservationWindowError> {
        if !duration_h.is_finite() || duration_h < 0.0 {
            return Err(ObservationWindowError::InvalidDuration(duration_h));
        }
        if !interval_h.is_finite() || interval_h <= 0.0 {
            return Err(ObservationWindowError::InvalidInterval(interval_h));
        }

        let num_samples = ((duration_h + interval_h / 2.0) / interval_h).ceil() as usize;
        let interval = Duration::from_hours(interval_h);
        let timestamps = (0..num_samples.max(1))
            .map(|i| start + Duration::from_hours(interval_h * i as f64))
            .collect::<Vec<_>>();

        Ok(ObservationWindow {
            start,
            duration: Duration::from_hours(duration_h),
            interval,
            // There is always at least one sample.
            timestamps: Vec1::try_from_vec(timestamps)
                .map_err(|_| ObservationWindowError::InvalidDuration(duration_h))?,
        })
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.start + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timestamps(&self) -> &Vec1<Epoch> {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false; a window has at least one timestamp.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Format an [`Epoch`] as "YYYY-MM-DD HH:MM:SS" (UTC).
pub fn format_utc(e: Epoch) -> String {
    let (y, m, d, h, min, s, _) = e.to_gregorian_utc();
    format!("{y:04}-{m:02}-{d:02} {h:02}:{min:02}:{s:02}")
}
