use crate::format::general;
use condor_flavour::{Flavour, FlavourTable};
use std::{collections::BTreeMap, fmt};
use tracing::{debug, trace};

/// Elapsed time and input size of a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobInfo {
    pub time: u64,
    pub size: u64,
}

/// Jobs newly falling below the ceiling of `flavour`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub flavour: &'a Flavour,
    pub count: usize,
    /// largest input in bytes, only known when sizes were looked up
    pub max_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub total: usize,
    /// one entry per flavour up to the first one that covers every job
    pub buckets: Vec<Bucket<'a>>,
    /// jobs running at least as long as the longest ceiling
    pub unclassified: usize,
}

impl Classification<'_> {
    pub fn classified(&self) -> usize {
        self.total - self.unclassified
    }

    fn percentage(&self, count: usize) -> f64 {
        100.0 * count as f64 / self.total as f64
    }
}

/// Bucket every time with [`FlavourTable::classify`] and list, for every
/// flavour in order, how many times no shorter flavour already covers.
/// Stops once every time is accounted for.
pub fn classify_times<'a>(times: &[u64], table: &'a FlavourTable) -> Classification<'a> {
    let mut counts = vec![0; table.len()];
    let mut unclassified = 0;

    for &time in times {
        match table.classify(time) {
            Some(index) => counts[index] += 1,
            None => unclassified += 1,
        }
    }

    debug!(total = times.len(), unclassified, "Classified times");
    Classification {
        total: times.len(),
        buckets: collect_buckets(
            table,
            times.len(),
            counts.into_iter().map(|count| (count, None)),
        ),
        unclassified,
    }
}

/// Same as [`classify_times`] for attributed jobs, additionally tracking the
/// largest input of every bucket
pub fn classify_jobs<'a>(
    jobs: &BTreeMap<String, JobInfo>,
    table: &'a FlavourTable,
) -> Classification<'a> {
    // (count, largest input) per flavour
    let mut groups: Vec<(usize, u64)> = vec![(0, 0); table.len()];
    let mut unclassified = 0;

    for (name, job) in jobs.iter() {
        match table.classify(job.time) {
            Some(index) => {
                let (count, max_size) = &mut groups[index];
                *count += 1;
                *max_size = (*max_size).max(job.size);
            }
            None => {
                trace!(job = %name, time = job.time, "Job exceeds every flavour");
                unclassified += 1;
            }
        }
    }

    debug!(total = jobs.len(), unclassified, "Classified jobs");
    Classification {
        total: jobs.len(),
        buckets: collect_buckets(
            table,
            jobs.len(),
            groups
                .into_iter()
                .map(|(count, max_size)| (count, Some(max_size))),
        ),
        unclassified,
    }
}

/// pair every flavour with its group until the groups cover all `total` entries
fn collect_buckets<'a>(
    table: &'a FlavourTable,
    total: usize,
    groups: impl Iterator<Item = (usize, Option<u64>)>,
) -> Vec<Bucket<'a>> {
    let mut buckets = Vec::new();
    let mut below_tot = 0;

    if total == 0 {
        return buckets;
    }

    for (flavour, (count, max_size)) in table.iter().zip(groups) {
        buckets.push(Bucket {
            flavour,
            count,
            max_size,
        });
        below_tot += count;

        if below_tot == total {
            break;
        }
    }

    buckets
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in self.buckets.iter() {
            write!(
                f,
                "{:<12}: {:>2} ({}%)",
                bucket.flavour.name,
                bucket.count,
                general(self.percentage(bucket.count), 3)
            )?;
            if let Some(size) = bucket.max_size {
                write!(f, " - max_size: {:4.1} GB", size as f64 / 1e9)?;
            }
            writeln!(f)?;
        }

        if self.unclassified > 0 {
            writeln!(
                f,
                "{:<12}: {:>2} ({}%)",
                "unclassified",
                self.unclassified,
                general(self.percentage(self.unclassified), 3)
            )?;
        }

        Ok(())
    }
}
