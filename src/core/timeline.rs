use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use itertools::Itertools;

use crate::{
    api::octopus::PriceRecord,
    prelude::*,
    quantity::{interval::Interval, rate::KilowattHourRate},
};

const PRICE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RateInterval {
    pub interval: Interval,
    pub rate: KilowattHourRate,
}

/// Hourly rates sorted by the interval start.
///
/// Missing hours are simply absent.
#[derive(Clone, Default, Debug)]
#[must_use]
pub struct Timeline(Vec<RateInterval>);

impl Timeline {
    /// Pair the half-hourly records into the hourly intervals.
    ///
    /// A pair is merged only when the first half starts on the hour and the halves are adjacent.
    /// Anything else leaves a gap.
    #[instrument(skip_all, fields(n_records = records.len()))]
    pub fn build(records: Vec<PriceRecord>) -> Self {
        let mut slots = records.into_iter().filter_map(RateInterval::try_parse).collect_vec();
        slots.sort_by_key(|slot| slot.interval.start);
        slots.dedup_by_key(|slot| slot.interval.start);

        let mut previous: Option<RateInterval> = None;
        let mut hours = Vec::with_capacity(slots.len() / 2);
        for current in slots {
            if let Some(previous) = previous
                && previous.interval.end == current.interval.start
                && previous.interval.start.minute() == 0
            {
                hours.push(RateInterval {
                    interval: previous.interval.with_end(current.interval.end),
                    rate: (previous.rate + current.rate) / 2.0,
                });
            }
            previous = Some(current);
        }

        info!(n_hours = hours.len(), "built the timeline");
        Self(hours)
    }

    /// Find the rate applicable at the specified time.
    ///
    /// An interval ends at its own end or at the start of the next interval, whichever is earlier.
    /// Gaps between the intervals match nothing.
    #[must_use]
    pub fn resolve(&self, at: DateTime<Utc>) -> Option<KilowattHourRate> {
        let n_started = self.0.partition_point(|hour| hour.interval.start <= at);
        let hour = self.0.get(n_started.checked_sub(1)?)?;
        (at < hour.interval.end).then_some(hour.rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateInterval> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl FromIterator<RateInterval> for Timeline {
    fn from_iter<I: IntoIterator<Item = RateInterval>>(iter: I) -> Self {
        Self(iter.into_iter().sorted_by_key(|hour| hour.interval.start).collect())
    }
}

impl RateInterval {
    fn try_parse(record: PriceRecord) -> Option<Self> {
        let parse = |timestamp: &str| {
            NaiveDateTime::parse_from_str(timestamp, PRICE_TIMESTAMP_FORMAT)
                .map(|timestamp| timestamp.and_utc())
                .inspect_err(|error| warn!(timestamp, %error, "failed to parse the timestamp"))
                .ok()
        };
        let interval = Interval::new(parse(&record.valid_from)?, parse(&record.valid_to)?);
        if interval.start >= interval.end {
            warn!(?interval, "skipped the empty interval");
            return None;
        }
        Some(Self { interval, rate: record.value_inc_vat })
    }
}
