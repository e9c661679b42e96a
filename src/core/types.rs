use serde::{Deserialize, Serialize};

use crate::error::{ArtworkError, ArtworkResult};

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Duration in seconds.
pub type Seconds = i64;

/// Graph area size measured in character units (width of a lower case `x`,
/// height of one text line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphSize {
    pub width: u32,
    pub height: u32,
}

impl GraphSize {
    /// Smallest width that leaves room for the time axis labels.
    pub const MIN_WIDTH: u32 = 8;

    pub fn new(width: u32, height: u32) -> ArtworkResult<Self> {
        let size = Self { width, height };
        if !size.is_valid() {
            return Err(ArtworkError::InvalidGraphSize { width, height });
        }
        Ok(size)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width >= Self::MIN_WIDTH && self.height > 0
    }
}

impl Default for GraphSize {
    fn default() -> Self {
        Self {
            width: 70,
            height: 16,
        }
    }
}

/// Sampling window of a time series: `[start, end)` sampled every `step` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
    step: Seconds,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp, step: Seconds) -> ArtworkResult<Self> {
        if end <= start || step <= 0 {
            return Err(ArtworkError::InvalidTimeWindow { start, end, step });
        }
        Ok(Self { start, end, step })
    }

    #[must_use]
    pub fn start(self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Timestamp {
        self.end
    }

    #[must_use]
    pub fn step(self) -> Seconds {
        self.step
    }

    /// Number of samples a series over this window carries; `None` when the
    /// count does not fit into memory addressing.
    #[must_use]
    pub fn sample_count(self) -> Option<usize> {
        let span = i128::from(self.end) - i128::from(self.start);
        let step = i128::from(self.step);
        usize::try_from((span + step - 1) / step).ok()
    }
}

/// Ordered samples over a [`TimeWindow`]; `None` marks a data gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    window: TimeWindow,
    values: Vec<Option<f64>>,
}

impl TimeSeries {
    pub fn new(window: TimeWindow, values: Vec<Option<f64>>) -> ArtworkResult<Self> {
        let Some(expected) = window.sample_count() else {
            return Err(ArtworkError::InvalidTimeWindow {
                start: window.start,
                end: window.end,
                step: window.step,
            });
        };
        if values.len() != expected {
            return Err(ArtworkError::InvalidData(format!(
                "series has {} samples but window expects {expected}",
                values.len()
            )));
        }
        Ok(Self { window, values })
    }

    /// Builds a series from gap-free samples.
    pub fn from_present(window: TimeWindow, values: &[f64]) -> ArtworkResult<Self> {
        Self::new(window, values.iter().copied().map(Some).collect())
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the samples that are not gaps.
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|value| *value)
    }

    #[must_use]
    pub fn is_all_gaps(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Reads the sample covering `timestamp` without interpolating.
    #[must_use]
    pub fn value_at(&self, timestamp: Timestamp) -> Option<f64> {
        let offset = (i128::from(timestamp) - i128::from(self.window.start))
            .div_euclid(i128::from(self.window.step));
        let index = usize::try_from(offset).ok()?;
        self.values.get(index).copied().flatten()
    }
}
