use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord};

use crate::{prelude::*, quantity::energy::KilowattHours};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const TIMESTAMP_COLUMN: usize = 1;
const WATT_HOURS_COLUMN: usize = 25;

/// Single meter reading.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ConsumptionRow {
    pub timestamp: DateTime<Utc>,
    pub energy: KilowattHours,
}

impl ConsumptionRow {
    /// Decode the row, malformed rows are treated as zero consumption.
    fn from_record(record: &StringRecord) -> Option<Self> {
        let timestamp = record.get(TIMESTAMP_COLUMN)?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .inspect_err(|error| debug!(timestamp, %error, "failed to parse the timestamp"))
            .ok()?
            .and_utc();
        let watt_hours = record.get(WATT_HOURS_COLUMN)?;
        let watt_hours = watt_hours
            .trim()
            .parse::<f64>()
            .inspect_err(|error| debug!(watt_hours, %error, "failed to parse the energy"))
            .ok()?;
        Some(Self { timestamp, energy: KilowattHours::from_watt_hours(watt_hours) })
    }
}

/// Uploaded meter readings.
///
/// Holds the raw bytes, the rows are decoded lazily.
pub struct ConsumptionCsv<'a>(&'a [u8]);

impl<'a> ConsumptionCsv<'a> {
    /// Validate the input before anything gets parsed.
    pub fn try_new(bytes: &'a [u8], max_size: usize) -> Result<Self> {
        ensure!(
            bytes.len() <= max_size,
            "bad input: the file is {} bytes, but at most {max_size} bytes are accepted",
            bytes.len(),
        );
        ensure!(
            bytes.iter().any(|byte| !byte.is_ascii_whitespace()),
            "bad input: the file is empty, expected a header row",
        );
        Ok(Self(bytes))
    }

    /// Iterate over the rows with positive consumption.
    ///
    /// The header row is skipped.
    pub fn rows(&self) -> impl Iterator<Item = ConsumptionRow> + 'a {
        ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.0)
            .into_records()
            .enumerate()
            .filter_map(|(index, record)| match record {
                Ok(record) => ConsumptionRow::from_record(&record),
                Err(error) => {
                    warn!(row = index + 1, %error, "skipped the unreadable row");
                    None
                }
            })
            .filter(|row| row.energy > KilowattHours::ZERO)
    }
}
