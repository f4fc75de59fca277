use chrono::{DateTime, Utc};

/// Hands out integer ids shaped like millisecond creation timestamps.
///
/// Ids are strictly increasing: two items created within the same
/// millisecond still get distinct ids, and a generator seeded from a
/// loaded collection never reuses an id that is already on disk.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn seeded(existing: impl IntoIterator<Item = i64>) -> Self {
        Self { last: existing.into_iter().max().unwrap_or(0) }
    }

    pub fn next_id(&mut self) -> i64 { self.next_at(Utc::now()) }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> i64 {
        self.last = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_instant_yields_distinct_increasing_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::default();
        let a = ids.next_at(now);
        let b = ids.next_at(now);
        let c = ids.next_at(now);
        assert_eq!(a, 1_700_000_000_000);
        assert!(a < b && b < c);
    }

    #[test]
    fn seeded_generator_stays_above_existing_ids() {
        let past = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::seeded([5_000, 12_000, 7_000]);
        assert_eq!(ids.next_at(past), 12_001);
    }

    #[test]
    fn clock_ahead_of_seed_wins() {
        let now = Utc.timestamp_millis_opt(50_000).unwrap();
        let mut ids = IdGenerator::seeded([10]);
        assert_eq!(ids.next_at(now), 50_000);
    }
}
