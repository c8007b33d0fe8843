use crate::format::{round_seconds, HumanDuration};
use average::Variance;
use itertools::{Itertools, MinMaxResult};
use std::fmt;

/// Descriptive statistics over elapsed seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    /// population standard deviation
    pub std_dev: f64,
}

impl Summary {
    /// `None` for an empty slice
    pub fn from_times(times: &[u64]) -> Option<Self> {
        let (min, max) = match times.iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(time) => (time, time),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let variance: Variance = times.iter().map(|&time| time as f64).collect();

        Some(Self {
            min,
            max,
            mean: variance.mean(),
            std_dev: variance.population_variance().sqrt(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[raw]   min/max/mean/std.dev: {}/{}/{:.0}/{:.0}",
            self.min, self.max, self.mean, self.std_dev
        )?;
        writeln!(
            f,
            "[fancy] min/max/mean/std.dev: {}/{}/{}/{}",
            HumanDuration(self.min),
            HumanDuration(self.max),
            HumanDuration(round_seconds(self.mean)),
            HumanDuration(round_seconds(self.std_dev))
        )
    }
}
