use std::time::{Duration, Instant};

struct Split {
    pub name: String,
    pub duration: Duration,
}

pub struct Stopwatch {
    splits: Vec<Split>,
    pub name: String,
    pub start_total: Instant,
    pub start_split: Instant,
}

impl Stopwatch {
    pub fn new(name: String) -> Stopwatch {
        let now = Instant::now();
        Stopwatch {
            splits: Vec::default(),
            name,
            start_total: now,
            start_split: now,
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_total.elapsed()
    }
    pub fn split_elapsed(&self) -> Duration {
        self.start_split.elapsed()
    }

    pub fn record_split(&mut self, name: String) -> Duration {
        let duration = self.split_elapsed();
        self.start_split = Instant::now();
        self.splits.push(Split { name, duration });
        duration
    }

    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    pub fn log_summary(&self) {
        log::info!(
            "Stopwatch: {};  Total elapsed duration: {:?}",
            self.name,
            self.total_elapsed()
        );
        for split in self.splits.iter() {
            log::info!("  {}: {:?}", split.name, split.duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_ge;

    #[test]
    fn test_stopwatch_splits() {
        let mut stopwatch = Stopwatch::new("test".to_owned());
        let first = stopwatch.record_split("first".to_owned());
        let second = stopwatch.record_split("second".to_owned());
        assert_eq!(stopwatch.split_count(), 2);
        assert_ge!(stopwatch.total_elapsed(), first + second);
        stopwatch.log_summary();
    }
}
